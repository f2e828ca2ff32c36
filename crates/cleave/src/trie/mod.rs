// Cleave is an open source word segmentation engine.
// Copyright (C) 2024 Cleave contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Count/entropy tries with deferred statistics.
//!
//! Insertions only bump counts. Branching entropies and the per-depth
//! normalization table are recomputed in bulk by [`EntropyTrie::update_stats`],
//! which runs lazily before the first statistics-dependent query after an
//! insert. The validity of the persisted table is tracked by the depth-0
//! normalization record, which doubles as the on-disk "stats valid" sentinel.

mod node;

use node::{
    children_range, last_token, ngram_key, normalization_key, posting_docid, posting_freq,
    posting_key, posting_range, NodeRecord, NormRecord, NORMALIZATION_PREFIX,
};

use std::collections::HashSet;
use std::path::Path;

use crate::kv::Kv;
use crate::{Error, Result, Token, SEPARATOR};

/// Entropy rewrites are committed in bounded batches during a stats pass.
const STATS_BATCH_SIZE: usize = 50_000;

/// Highest representable node depth; `0xFE`/`0xFF` are reserved prefixes.
const MAX_DEPTH: usize = 0xFD;

/// Count and entropy of a node, as seen by queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStats {
    pub count: u64,
    pub entropy: Option<f64>,
}

/// One posting-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub docid: u64,
    pub freq: u64,
}

/// Welford accumulator for the entropy variation observed at one depth.
#[derive(Debug, Clone, Copy, Default)]
struct DepthAccumulator {
    mean: f64,
    m2: f64,
    count: u64,
}

impl DepthAccumulator {
    fn push(&mut self, ev: f64) {
        let old_mean = self.mean;
        self.count += 1;
        self.mean += (ev - old_mean) / self.count as f64;
        self.m2 += (ev - old_mean) * (ev - self.mean);
    }

    fn finish(self) -> NormRecord {
        NormRecord {
            mean: self.mean as f32,
            stdev: (self.m2 / self.count.max(1) as f64).sqrt() as f32,
        }
    }
}

/// An n-gram trie mapping each node to its occurrence count and the branching
/// entropy of its children distribution.
pub struct EntropyTrie<S: Kv> {
    store: S,
    depth: usize,
    terminals: HashSet<Vec<u8>>,
    normalization: Vec<NormRecord>,
    dirty: bool,
}

impl<S: Kv> EntropyTrie<S> {
    /// Opens a trie holding ngrams of up to `depth` tokens. `terminals` are
    /// the sentence-boundary tokens given the maximum-surprisal entropy term.
    pub fn open<P, T>(path: P, depth: usize, terminals: &[T]) -> Result<Self>
    where
        P: AsRef<Path>,
        T: Token,
    {
        if depth < 1 || depth > MAX_DEPTH {
            return Err(Error::Order(depth));
        }

        let mut terminal_bytes = HashSet::new();

        for terminal in terminals {
            let bytes = terminal.token_bytes();

            if bytes.contains(&SEPARATOR) {
                return Err(Error::ReservedByte);
            }

            terminal_bytes.insert(bytes.into_owned());
        }

        let store = S::open(path)?;
        let normalization = Self::load_normalization(&store)?;
        let dirty = normalization.is_empty();

        Ok(Self {
            store,
            depth,
            terminals: terminal_bytes,
            normalization,
            dirty,
        })
    }

    /// The persisted table is trusted only when the depth-0 record is
    /// present; inserts delete it, so its absence means statistics are stale.
    fn load_normalization(store: &S) -> Result<Vec<NormRecord>> {
        let start = normalization_key(0);
        let stop = vec![NORMALIZATION_PREFIX, 0xFF];

        let entries = store.range(&start, &stop)?;

        match entries.first() {
            Some((key, _)) if *key == start => entries
                .iter()
                .map(|(_, value)| NormRecord::from_bytes(value))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Empties the store.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        self.normalization.clear();
        self.dirty = true;
        Ok(())
    }

    /// Increments counts along the root-to-leaf path of `ngram`. Negative
    /// frequencies subtract, clamping at zero.
    pub fn add_ngram<T: Token>(&mut self, ngram: &[T], freq: i64) -> Result<()> {
        self.add_ngram_inner(ngram, None, freq)
    }

    /// Like [`EntropyTrie::add_ngram`], additionally recording `docid` in the
    /// posting list of every node along the path.
    pub fn add_ngram_for_doc<T: Token>(&mut self, ngram: &[T], docid: u64, freq: i64) -> Result<()> {
        self.add_ngram_inner(ngram, Some(docid), freq)
    }

    fn add_ngram_inner<T: Token>(&mut self, ngram: &[T], docid: Option<u64>, freq: i64) -> Result<()> {
        self.validate_len(ngram.len(), 1)?;

        if !self.dirty {
            self.dirty = true;
            self.normalization.clear();
            self.store.delete(&normalization_key(0))?;
        }

        let mut batch = Vec::with_capacity(2 * ngram.len() + 1);
        let mut key = vec![0u8];

        let root = self.read_node(&key)?;
        batch.push((key.clone(), bump(root, freq).as_bytes().to_vec()));

        // Once an absent node is reached, its descendants cannot exist
        // either; skip the point reads for the rest of the path.
        let mut create = false;

        for i in 1..=ngram.len() {
            let bytes = ngram[i - 1].token_bytes();

            if bytes.contains(&SEPARATOR) {
                return Err(Error::ReservedByte);
            }

            key[0] = i as u8;
            key.push(SEPARATOR);
            key.extend_from_slice(&bytes);

            let record = if create {
                NodeRecord::absent()
            } else {
                self.read_node(&key)?
            };

            if record.count == 0 {
                create = true;
            }

            batch.push((key.clone(), bump(record, freq).as_bytes().to_vec()));

            if let Some(docid) = docid {
                let posting = posting_key(&key, docid);

                let current = match self.store.get(&posting)? {
                    Some(value) => posting_freq(&value)?,
                    None => 0,
                };

                batch.push((posting, clamped(i64::from(current) + freq).to_le_bytes().to_vec()));
            }
        }

        self.store.write_batch(batch)
    }

    pub fn query_count<T: Token>(&self, ngram: &[T]) -> Result<u64> {
        self.validate_len(ngram.len(), 0)?;

        Ok(u64::from(self.read_node(&ngram_key(ngram)?)?.count))
    }

    pub fn query_node<T: Token>(&mut self, ngram: &[T]) -> Result<NodeStats> {
        self.validate_len(ngram.len(), 0)?;
        self.update_stats()?;

        self.node_stats(ngram)
    }

    pub fn query_entropy<T: Token>(&mut self, ngram: &[T]) -> Result<Option<f64>> {
        self.validate_len(ngram.len(), 0)?;
        self.update_stats()?;

        self.entropy_value(ngram)
    }

    pub fn query_ev<T: Token>(&mut self, ngram: &[T]) -> Result<Option<f64>> {
        self.validate_len(ngram.len(), 0)?;
        self.update_stats()?;

        self.ev_value(ngram)
    }

    pub fn query_autonomy<T: Token>(&mut self, ngram: &[T]) -> Result<Option<f64>> {
        self.validate_len(ngram.len(), 0)?;
        self.update_stats()?;

        self.autonomy_value(ngram)
    }

    /// Docids the node was observed in, with per-document frequencies.
    pub fn query_postings<T: Token>(&self, ngram: &[T]) -> Result<Vec<Posting>> {
        self.validate_len(ngram.len(), 1)?;

        let key = ngram_key(ngram)?;
        let (start, stop) = posting_range(&key);

        let mut postings = Vec::new();

        for (key, value) in self.store.range(&start, &stop)? {
            postings.push(Posting {
                docid: posting_docid(&key)?,
                freq: u64::from(posting_freq(&value)?),
            });
        }

        Ok(postings)
    }

    /// Recomputes the entropy of every node and rebuilds the per-depth
    /// normalization table. A no-op when the trie is clean; running it again
    /// from any partially updated state converges to the same bytes.
    pub fn update_stats(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let root_key = vec![0u8];
        let root = self.read_node(&root_key)?;

        let mut accumulators: Vec<DepthAccumulator> = Vec::new();
        let mut pending: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
        let mut visited = 0u64;

        let mut stack = vec![(root_key, root, f64::NAN, 0usize)];

        while let Some((key, record, parent_entropy, depth)) = stack.pop() {
            visited += 1;

            let (start, stop) = children_range(&key);
            let children = self.store.range(&start, &stop)?;

            let entropy = self.node_entropy(&key, record, &children)?;

            if !same_entropy(entropy as f32, record.entropy) {
                pending.push((
                    key,
                    NodeRecord {
                        count: record.count,
                        entropy: entropy as f32,
                    }
                    .as_bytes()
                    .to_vec(),
                ));

                if pending.len() >= STATS_BATCH_SIZE {
                    self.store.write_batch(std::mem::take(&mut pending))?;
                }
            }

            // The entropy variation against the parent enters the depth
            // distribution only when both entropies are numbers and at least
            // one of them is non-zero.
            if !entropy.is_nan()
                && !parent_entropy.is_nan()
                && (entropy != 0.0 || parent_entropy != 0.0)
            {
                if accumulators.len() <= depth {
                    accumulators.resize_with(depth + 1, DepthAccumulator::default);
                }

                accumulators[depth].push(entropy - parent_entropy);
            }

            for (child_key, value) in children {
                let child = NodeRecord::from_bytes(&value)?;
                stack.push((child_key, child, entropy, depth + 1));
            }
        }

        if accumulators.is_empty() {
            accumulators.push(DepthAccumulator::default());
        }

        self.normalization = accumulators
            .into_iter()
            .map(DepthAccumulator::finish)
            .collect();

        for (depth, norm) in self.normalization.iter().enumerate() {
            pending.push((normalization_key(depth), norm.as_bytes().to_vec()));
        }

        self.store.write_batch(pending)?;
        self.store.flush()?;
        self.store.compact();

        self.dirty = false;

        tracing::debug!(nodes = visited, "recomputed trie statistics");

        Ok(())
    }

    /// Branching entropy over the children distribution. Terminal edges
    /// contribute the maximum surprisal `log2(count)` instead of the usual
    /// Shannon term.
    fn node_entropy(
        &self,
        key: &[u8],
        record: NodeRecord,
        children: &[(Vec<u8>, Vec<u8>)],
    ) -> Result<f64> {
        if record.count == 0 {
            return Ok(f64::NAN);
        }

        let total = f64::from(record.count);
        let mut entropy = 0.0;
        let mut sum = 0u64;

        for (child_key, value) in children {
            let child = NodeRecord::from_bytes(value)?;

            if child.count == 0 {
                continue;
            }

            sum += u64::from(child.count);
            let p = f64::from(child.count) / total;

            if self.terminals.contains(last_token(child_key)) {
                entropy += p * total.log2();
            } else {
                entropy -= p * p.log2();
            }
        }

        if sum == 0 {
            return Ok(f64::NAN);
        }

        if sum != u64::from(record.count) {
            return Err(Error::Corruption(format!(
                "children counts sum to {sum} but the node at {key:?} has count {}",
                record.count
            )));
        }

        if entropy < 0.0 {
            return Err(Error::Corruption(format!(
                "negative entropy {entropy} at node {key:?}"
            )));
        }

        Ok(entropy)
    }

    pub(crate) fn node_stats<T: Token>(&self, ngram: &[T]) -> Result<NodeStats> {
        let record = self.read_node(&ngram_key(ngram)?)?;

        Ok(NodeStats {
            count: u64::from(record.count),
            entropy: defined(record.entropy),
        })
    }

    pub(crate) fn entropy_value<T: Token>(&self, ngram: &[T]) -> Result<Option<f64>> {
        Ok(defined(self.read_node(&ngram_key(ngram)?)?.entropy))
    }

    /// Entropy variation against the parent node. Assumes settled statistics.
    pub(crate) fn ev_value<T: Token>(&self, ngram: &[T]) -> Result<Option<f64>> {
        if ngram.is_empty() {
            return Ok(None);
        }

        let entropy = match self.entropy_value(ngram)? {
            Some(entropy) => entropy,
            None => return Ok(None),
        };

        let parent = defined(self.read_node(&ngram_key(&ngram[..ngram.len() - 1])?)?.entropy);

        match parent {
            Some(parent) if entropy != 0.0 || parent != 0.0 => Ok(Some(entropy - parent)),
            _ => Ok(None),
        }
    }

    /// Z-score of the entropy variation within its depth distribution.
    /// Assumes settled statistics.
    pub(crate) fn autonomy_value<T: Token>(&self, ngram: &[T]) -> Result<Option<f64>> {
        let ev = match self.ev_value(ngram)? {
            Some(ev) => ev,
            None => return Ok(None),
        };

        match self.normalization.get(ngram.len()) {
            Some(norm) if norm.stdev != 0.0 => {
                Ok(Some((ev - f64::from(norm.mean)) / f64::from(norm.stdev)))
            }
            _ => Ok(None),
        }
    }

    fn read_node(&self, key: &[u8]) -> Result<NodeRecord> {
        match self.store.get(key)? {
            Some(bytes) => NodeRecord::from_bytes(&bytes),
            None => Ok(NodeRecord::absent()),
        }
    }

    fn validate_len(&self, len: usize, min: usize) -> Result<()> {
        if len < min || len > self.depth {
            return Err(Error::NgramLength {
                got: len,
                max: self.depth,
            });
        }

        Ok(())
    }
}

fn bump(record: NodeRecord, freq: i64) -> NodeRecord {
    NodeRecord {
        count: clamped(i64::from(record.count) + freq),
        ..record
    }
}

fn clamped(count: i64) -> u32 {
    count.clamp(0, i64::from(u32::MAX)) as u32
}

fn defined(value: f32) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(f64::from(value))
    }
}

fn same_entropy(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;

    fn petit_chat_trie() -> EntropyTrie<MemoryKv> {
        let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

        trie.add_ngram(&["le", "petit", "chat"], 1).unwrap();
        trie.add_ngram(&["le", "petit", "chien"], 1).unwrap();
        trie.add_ngram(&["le", "gros", "chien"], 1).unwrap();

        trie
    }

    fn dump(trie: &EntropyTrie<MemoryKv>) -> Vec<(Vec<u8>, Vec<u8>)> {
        trie.store.range(&[0x00], &[0xFF, 0xFF]).unwrap()
    }

    #[test]
    fn counts_along_the_path() {
        let trie = petit_chat_trie();

        assert_eq!(trie.query_count::<String>(&[]).unwrap(), 3);
        assert_eq!(trie.query_count(&["le"]).unwrap(), 3);
        assert_eq!(trie.query_count(&["le", "petit"]).unwrap(), 2);
        assert_eq!(trie.query_count(&["le", "gros"]).unwrap(), 1);
        assert_eq!(trie.query_count(&["le", "petit", "chat"]).unwrap(), 1);
    }

    #[test]
    fn basic_nodes() {
        let mut trie = petit_chat_trie();

        let node = trie.query_node(&["le", "petit"]).unwrap();
        assert_eq!(node.count, 2);
        assert_eq!(node.entropy, Some(1.0));

        assert_eq!(trie.query_node::<String>(&[]).unwrap().count, 3);

        let petit = trie.query_node(&["le", "petit"]).unwrap();
        let gros = trie.query_node(&["le", "gros"]).unwrap();
        assert_ne!(petit.count, gros.count);
    }

    #[test]
    fn subtracting_restores_equality() {
        let mut trie = petit_chat_trie();

        trie.add_ngram(&["le", "petit", "chat"], -1).unwrap();

        let petit = trie.query_node(&["le", "petit"]).unwrap();
        let gros = trie.query_node(&["le", "gros"]).unwrap();

        assert_eq!(petit, gros);
    }

    #[test]
    fn unseen_ngrams_are_absent_not_errors() {
        let mut trie = petit_chat_trie();

        assert_eq!(trie.query_count(&["nonexistent"]).unwrap(), 0);
        assert_eq!(trie.query_entropy(&["nonexistent"]).unwrap(), None);
        assert_eq!(trie.query_ev(&["nonexistent"]).unwrap(), None);
        assert_eq!(trie.query_autonomy(&["nonexistent"]).unwrap(), None);

        let stats = trie.query_node(&["le", "nonexistent"]).unwrap();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.entropy, None);
    }

    #[test]
    fn length_validation() {
        let mut trie = petit_chat_trie();

        assert!(matches!(
            trie.add_ngram::<String>(&[], 1),
            Err(Error::NgramLength { got: 0, max: 3 })
        ));
        assert!(matches!(
            trie.add_ngram(&["a", "b", "c", "d"], 1),
            Err(Error::NgramLength { got: 4, max: 3 })
        ));
        assert!(matches!(
            trie.query_autonomy(&["a", "b", "c", "d"]),
            Err(Error::NgramLength { .. })
        ));
    }

    #[test]
    fn reserved_byte_rejected() {
        let mut trie = EntropyTrie::<MemoryKv>::open("unused", 2, &["^", "$"]).unwrap();

        assert!(matches!(
            trie.add_ngram(&[vec![b'a', 0x00]], 1),
            Err(Error::ReservedByte)
        ));
    }

    #[test]
    fn dirty_flag_lifecycle() {
        let mut trie = petit_chat_trie();
        assert!(trie.is_dirty());

        trie.update_stats().unwrap();
        assert!(!trie.is_dirty());

        trie.add_ngram(&["le", "petit", "chat"], 1).unwrap();
        assert!(trie.is_dirty());

        // any statistics query settles the trie again
        trie.query_entropy(&["le"]).unwrap();
        assert!(!trie.is_dirty());
    }

    #[test]
    fn entropies_are_never_negative() {
        let mut trie = petit_chat_trie();
        trie.update_stats().unwrap();

        for (key, value) in dump(&trie) {
            if key[0] >= 0xFE {
                continue;
            }

            let record = NodeRecord::from_bytes(&value).unwrap();
            assert!(record.entropy.is_nan() || record.entropy >= 0.0);
        }
    }

    #[test]
    fn update_stats_is_idempotent_and_restartable() {
        let mut trie = petit_chat_trie();

        trie.update_stats().unwrap();
        let settled = dump(&trie);

        trie.update_stats().unwrap();
        assert_eq!(settled, dump(&trie));

        // rerunning from an already-updated store converges to the same bytes
        trie.dirty = true;
        trie.update_stats().unwrap();
        assert_eq!(settled, dump(&trie));
    }

    #[test]
    fn terminal_edges_use_maximum_surprisal() {
        let mut trie = EntropyTrie::<MemoryKv>::open("unused", 2, &["^", "$"]).unwrap();

        // two sentences worth of windows for "^ x $", by hand
        for ngram in [vec!["^", "x"], vec!["x", "$"]] {
            trie.add_ngram(&ngram, 2).unwrap();
        }
        trie.add_ngram(&["$"], 2).unwrap();

        // root children: ^ (terminal, 2), x (2), $ (terminal, 2); count 6
        let third: f64 = 2.0 / 6.0;
        let expected = 2.0 * (third * 6f64.log2()) - third * third.log2();

        let entropy = trie.query_entropy::<String>(&[]).unwrap().unwrap();
        assert!((entropy - expected).abs() < 1e-6);
    }

    #[test]
    fn ev_undefined_when_both_entropies_are_zero() {
        let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

        // a deterministic chain: every node has exactly one continuation
        trie.add_ngram(&["a", "b", "c"], 5).unwrap();

        // entropy(a) = entropy(a, b) = 0, so the variation carries no signal
        assert_eq!(trie.query_entropy(&["a"]).unwrap(), Some(0.0));
        assert_eq!(trie.query_ev(&["a", "b"]).unwrap(), None);
        assert_eq!(trie.query_autonomy(&["a", "b"]).unwrap(), None);
    }

    #[test]
    fn mismatched_child_counts_fail_loudly() {
        let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

        trie.add_ngram(&["a"], 1).unwrap();
        trie.add_ngram(&["a", "b"], 1).unwrap();

        // (a) was seen twice but its only child once
        assert!(matches!(trie.update_stats(), Err(Error::Corruption(_))));
    }

    #[test]
    fn postings_accumulate_per_document() {
        let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

        trie.add_ngram_for_doc(&["le", "petit"], 7, 1).unwrap();
        trie.add_ngram_for_doc(&["le", "petit"], 7, 1).unwrap();
        trie.add_ngram_for_doc(&["le", "petit"], 9, 1).unwrap();

        assert_eq!(
            trie.query_postings(&["le"]).unwrap(),
            vec![
                Posting { docid: 7, freq: 2 },
                Posting { docid: 9, freq: 1 }
            ]
        );
        assert_eq!(
            trie.query_postings(&["le", "petit"]).unwrap(),
            vec![
                Posting { docid: 7, freq: 2 },
                Posting { docid: 9, freq: 1 }
            ]
        );
        assert!(trie.query_postings(&["petit"]).unwrap().is_empty());
    }

    #[test]
    fn clear_empties_the_trie() {
        let mut trie = petit_chat_trie();
        trie.update_stats().unwrap();

        trie.clear().unwrap();

        assert!(trie.is_dirty());
        assert_eq!(trie.query_count::<String>(&[]).unwrap(), 0);
        assert!(dump(&trie).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn ngrams() -> impl Strategy<Value = Vec<Vec<String>>> {
            // fixed-length ngrams over a small vocabulary, so that children
            // counts stay consistent with their parents
            proptest::collection::vec(
                proptest::collection::vec("[a-d]", 3..=3),
                1..40,
            )
        }

        proptest! {
            #[test]
            fn prefix_counts_are_monotone(ngrams in ngrams()) {
                let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

                for ngram in &ngrams {
                    trie.add_ngram(ngram, 1).unwrap();
                }

                for ngram in &ngrams {
                    for i in 0..ngram.len() {
                        prop_assert!(
                            trie.query_count(&ngram[..i]).unwrap()
                                >= trie.query_count(&ngram[..i + 1]).unwrap()
                        );
                    }
                }
            }

            #[test]
            fn root_counts_every_insertion(ngrams in ngrams()) {
                let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

                for ngram in &ngrams {
                    trie.add_ngram(ngram, 1).unwrap();
                }

                prop_assert_eq!(trie.query_count::<String>(&[]).unwrap(), ngrams.len() as u64);

                let unigrams: std::collections::BTreeSet<_> =
                    ngrams.iter().map(|ngram| ngram[0].clone()).collect();
                let total: u64 = unigrams
                    .iter()
                    .map(|t| trie.query_count(&[t.clone()]).unwrap())
                    .sum();

                prop_assert_eq!(total, ngrams.len() as u64);
            }

            #[test]
            fn entropy_domain_after_update(ngrams in ngrams()) {
                let mut trie = EntropyTrie::<MemoryKv>::open("unused", 3, &["^", "$"]).unwrap();

                for ngram in &ngrams {
                    trie.add_ngram(ngram, 1).unwrap();
                }

                trie.update_stats().unwrap();

                for ngram in &ngrams {
                    for i in 0..=ngram.len() {
                        if let Some(entropy) = trie.entropy_value(&ngram[..i]).unwrap() {
                            prop_assert!(entropy >= 0.0);
                        }
                    }
                }
            }
        }
    }
}
