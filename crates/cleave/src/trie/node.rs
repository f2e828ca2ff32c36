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

//! Fixed-width records and the byte layout of trie keys.
//!
//! A node key is `[depth] || (SEP || token_bytes)^depth`, the root being the
//! single byte `0x00`. Since SEP sorts below any token byte, the children of
//! a node occupy one contiguous key range and a single scan enumerates them.
//! Two prefixes sort above every node key: `0xFE` for posting lists and
//! `0xFF` for the per-depth normalization table.

use crate::{Error, Result, Token, SEPARATOR};

pub(crate) const POSTING_PREFIX: u8 = 0xFE;
pub(crate) const NORMALIZATION_PREFIX: u8 = 0xFF;

/// Count and branching entropy of one trie node.
///
/// `entropy` keeps NaN as the "not defined" sentinel on the wire; the query
/// surface translates it to `None`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeRecord {
    pub count: u32,
    pub entropy: f32,
}

impl NodeRecord {
    pub const BYTES: usize = 8;

    pub fn absent() -> Self {
        Self {
            count: 0,
            entropy: f32::NAN,
        }
    }

    pub fn as_bytes(&self) -> [u8; Self::BYTES] {
        let mut buf = [0; Self::BYTES];
        buf[..4].copy_from_slice(&self.count.to_le_bytes());
        buf[4..].copy_from_slice(&self.entropy.to_le_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTES {
            return Err(Error::Corruption(format!(
                "node record of {} bytes",
                bytes.len()
            )));
        }

        Ok(Self {
            count: u32::from_le_bytes(bytes[..4].try_into().unwrap()),
            entropy: f32::from_le_bytes(bytes[4..].try_into().unwrap()),
        })
    }
}

/// Mean and population standard deviation of the entropy variation observed
/// at one depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NormRecord {
    pub mean: f32,
    pub stdev: f32,
}

impl NormRecord {
    pub const BYTES: usize = 8;

    pub fn as_bytes(&self) -> [u8; Self::BYTES] {
        let mut buf = [0; Self::BYTES];
        buf[..4].copy_from_slice(&self.mean.to_le_bytes());
        buf[4..].copy_from_slice(&self.stdev.to_le_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTES {
            return Err(Error::Corruption(format!(
                "normalization record of {} bytes",
                bytes.len()
            )));
        }

        Ok(Self {
            mean: f32::from_le_bytes(bytes[..4].try_into().unwrap()),
            stdev: f32::from_le_bytes(bytes[4..].try_into().unwrap()),
        })
    }
}

pub(crate) fn ngram_key<T: Token>(ngram: &[T]) -> Result<Vec<u8>> {
    let mut key = vec![ngram.len() as u8];

    for token in ngram {
        let bytes = token.token_bytes();

        if bytes.contains(&SEPARATOR) {
            return Err(Error::ReservedByte);
        }

        key.push(SEPARATOR);
        key.extend_from_slice(&bytes);
    }

    Ok(key)
}

/// Children of the node at `key` occupy exactly `[start, stop)`.
pub(crate) fn children_range(key: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut start = Vec::with_capacity(key.len() + 1);
    start.push(key[0] + 1);
    start.extend_from_slice(&key[1..]);
    start.push(SEPARATOR);

    let mut stop = start.clone();
    *stop.last_mut().unwrap() = SEPARATOR + 1;

    (start, stop)
}

/// Token bytes on the edge into `key`: everything after the last separator.
pub(crate) fn last_token(key: &[u8]) -> &[u8] {
    match key.iter().rposition(|&b| b == SEPARATOR) {
        Some(i) => &key[i + 1..],
        None => &[],
    }
}

pub(crate) fn normalization_key(depth: usize) -> Vec<u8> {
    vec![NORMALIZATION_PREFIX, depth as u8]
}

pub(crate) fn posting_key(node_key: &[u8], docid: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(node_key.len() + 10);
    key.push(POSTING_PREFIX);
    key.extend_from_slice(node_key);
    key.push(SEPARATOR);
    key.extend_from_slice(&docid.to_be_bytes());
    key
}

/// Posting records of the node at `node_key` occupy exactly `[start, stop)`.
pub(crate) fn posting_range(node_key: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut start = Vec::with_capacity(node_key.len() + 2);
    start.push(POSTING_PREFIX);
    start.extend_from_slice(node_key);
    start.push(SEPARATOR);

    let mut stop = start.clone();
    *stop.last_mut().unwrap() = SEPARATOR + 1;

    (start, stop)
}

pub(crate) fn posting_docid(key: &[u8]) -> Result<u64> {
    if key.len() < 8 {
        return Err(Error::Corruption(format!(
            "posting key of {} bytes",
            key.len()
        )));
    }

    Ok(u64::from_be_bytes(key[key.len() - 8..].try_into().unwrap()))
}

pub(crate) fn posting_freq(bytes: &[u8]) -> Result<u32> {
    if bytes.len() != 4 {
        return Err(Error::Corruption(format!(
            "posting record of {} bytes",
            bytes.len()
        )));
    }

    Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
}
