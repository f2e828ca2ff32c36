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

use std::path::{Path, PathBuf};

use crate::config::IndexConfig;
use crate::kv::{Kv, MemoryKv, RocksDbStore};
use crate::segmenter::Segmenter;
use crate::trie::{EntropyTrie, Posting};
use crate::{Error, Result, Token};

/// Forward and backward statistics of an ngram, averaged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSummary {
    pub count: f64,
    pub entropy: Option<f64>,
}

/// Bidirectional autonomy index.
///
/// Owns one entropy trie per reading direction: branching entropy to the
/// right captures right-context cohesion, branching entropy to the left
/// captures left-context cohesion. Averaging the two z-scores yields a
/// symmetric measure that fires on true multi-token units.
pub struct Cleave<S: Kv = RocksDbStore> {
    order: usize,
    start: String,
    end: String,
    fwd: EntropyTrie<S>,
    bwd: EntropyTrie<S>,
}

impl Cleave<MemoryKv> {
    /// In-memory index; nothing touches disk.
    pub fn in_memory(config: IndexConfig) -> Result<Self> {
        Self::open(config, "cleave")
    }
}

impl<S: Kv> Cleave<S> {
    /// Opens (or creates) the index stores at `<prefix>_fwd` and
    /// `<prefix>_bwd`.
    pub fn open<P: AsRef<Path>>(config: IndexConfig, path_prefix: P) -> Result<Self> {
        if config.order <= 1 {
            return Err(Error::Order(config.order));
        }

        let terminals = [config.start_marker.as_str(), config.end_marker.as_str()];
        let depth = config.order + 1;

        let fwd = EntropyTrie::open(suffixed(path_prefix.as_ref(), "_fwd"), depth, &terminals)?;
        let bwd = EntropyTrie::open(suffixed(path_prefix.as_ref(), "_bwd"), depth, &terminals)?;

        Ok(Self {
            order: config.order,
            start: config.start_marker,
            end: config.end_marker,
            fwd,
            bwd,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn start_marker(&self) -> &str {
        &self.start
    }

    pub fn end_marker(&self) -> &str {
        &self.end
    }

    pub fn is_dirty(&self) -> bool {
        self.fwd.is_dirty() || self.bwd.is_dirty()
    }

    /// Empties both tries.
    pub fn clear(&mut self) -> Result<()> {
        self.fwd.clear()?;
        self.bwd.clear()
    }

    pub fn add_sentence(&mut self, sentence: &[String], docid: u64) -> Result<()> {
        self.add_sentence_weighted(sentence, docid, 1)
    }

    /// Feeds every window of `^ sentence $` to the forward trie and every
    /// window of the reversed sequence to the backward trie, so that every
    /// prefix of length ≤ order+1 starting at every position is counted
    /// exactly once per direction.
    pub fn add_sentence_weighted(
        &mut self,
        sentence: &[String],
        docid: u64,
        freq: i64,
    ) -> Result<()> {
        let depth = self.order + 1;

        if let Some(token) = sentence
            .iter()
            .find(|token| **token == self.start || **token == self.end)
        {
            return Err(Error::ReservedToken(token.clone()));
        }

        let mut tokens: Vec<&str> = Vec::with_capacity(sentence.len() + 2);
        tokens.push(&self.start);
        tokens.extend(sentence.iter().map(String::as_str));
        tokens.push(&self.end);

        for i in 0..tokens.len() {
            let window = &tokens[i..(i + depth).min(tokens.len())];
            self.fwd.add_ngram_for_doc(window, docid, freq)?;
        }

        tokens.reverse();

        for i in 0..tokens.len() {
            let window = &tokens[i..(i + depth).min(tokens.len())];
            self.bwd.add_ngram(window, freq)?;
        }

        Ok(())
    }

    /// Symmetric autonomy: mean of the forward score and the backward score
    /// of the reversed ngram. Absent unless both directions are defined.
    pub fn query_autonomy<T: Token>(&mut self, ngram: &[T]) -> Result<Option<f64>> {
        self.validate(ngram.len(), 1)?;
        self.update_stats()?;

        self.autonomy(ngram)
    }

    pub fn query_ev<T: Token>(&mut self, ngram: &[T]) -> Result<Option<f64>> {
        self.validate(ngram.len(), 1)?;
        self.update_stats()?;

        let fwd = self.fwd.ev_value(ngram)?;
        let bwd = self.bwd.ev_value(&reversed(ngram))?;

        Ok(combine(fwd, bwd))
    }

    /// Averaged count and entropy; the count averages unconditionally while
    /// the entropy requires both directions.
    pub fn query_node<T: Token>(&mut self, ngram: &[T]) -> Result<NodeSummary> {
        self.validate(ngram.len(), 0)?;
        self.update_stats()?;

        let fwd = self.fwd.node_stats(ngram)?;
        let bwd = self.bwd.node_stats(&reversed(ngram))?;

        Ok(NodeSummary {
            count: (fwd.count as f64 + bwd.count as f64) / 2.0,
            entropy: combine(fwd.entropy, bwd.entropy),
        })
    }

    /// Documents the ngram was observed in (forward trie only).
    pub fn query_postings<T: Token>(&self, ngram: &[T]) -> Result<Vec<Posting>> {
        self.validate(ngram.len(), 1)?;

        self.fwd.query_postings(ngram)
    }

    pub fn update_stats(&mut self) -> Result<()> {
        self.fwd.update_stats()?;
        self.bwd.update_stats()
    }

    /// Settles statistics and hands out a segmenter borrowing this index.
    pub fn segmenter(&mut self) -> Result<Segmenter<'_, S>> {
        Segmenter::new(self)
    }

    /// Splits `sentence` into the maximum-autonomy segmentation.
    pub fn segment(&mut self, sentence: &[String]) -> Result<Vec<Vec<String>>> {
        self.segmenter()?.segment(sentence)
    }

    /// Combined autonomy without settling statistics first; the segmenter
    /// relies on this running against a clean index.
    pub(crate) fn autonomy<T: Token>(&self, ngram: &[T]) -> Result<Option<f64>> {
        let fwd = self.fwd.autonomy_value(ngram)?;
        let bwd = self.bwd.autonomy_value(&reversed(ngram))?;

        Ok(combine(fwd, bwd))
    }

    fn validate(&self, len: usize, min: usize) -> Result<()> {
        if min > 0 && len == 0 {
            return Err(Error::EmptyNgram);
        }

        if len > self.order {
            return Err(Error::NgramLength {
                got: len,
                max: self.order,
            });
        }

        Ok(())
    }
}

fn reversed<T: Token>(ngram: &[T]) -> Vec<&T> {
    ngram.iter().rev().collect()
}

fn combine(fwd: Option<f64>, bwd: Option<f64>) -> Option<f64> {
    match (fwd, bwd) {
        (Some(fwd), Some(bwd)) => Some((fwd + bwd) / 2.0),
        _ => None,
    }
}

fn suffixed(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_os_string();
    path.push(suffix);
    path.into()
}
