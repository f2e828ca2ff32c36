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

//! Unsupervised word and phrase segmentation based on branching entropy.
//!
//! Sentences feed a symmetric pair of n-gram tries, one per reading
//! direction. The branching entropy of every trie node, normalized per depth
//! into a z-score (the "autonomy" of the n-gram), drives a dynamic-programming
//! segmenter that cuts token streams into cohesive chunks.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

pub mod config;
pub mod kv;
pub mod segmenter;
pub mod trie;

mod index;

pub use config::IndexConfig;
pub use index::{Cleave, NodeSummary};
pub use segmenter::Segmenter;
pub use trie::{EntropyTrie, NodeStats, Posting};

/// Byte strictly smaller than any token byte; separates tokens inside node
/// keys so that the children of a node occupy one contiguous key range.
pub const SEPARATOR: u8 = 0x00;

#[derive(Error, Debug)]
pub enum Error {
    #[error("order must be greater than 1 (got {0})")]
    Order(usize),

    #[error("ngram length must be between 1 and {max} (got {got})")]
    NgramLength { got: usize, max: usize },

    #[error("the empty ngram has no autonomy")]
    EmptyNgram,

    #[error("token contains the reserved separator byte 0x00")]
    ReservedByte,

    #[error("token {0:?} is reserved as a sentence boundary")]
    ReservedToken(String),

    #[error("trie corruption: {0}")]
    Corruption(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A symbol that can be stored in the tries.
///
/// The byte form must be stable across runs, and must not contain
/// [`SEPARATOR`]. Strings encode as UTF-8; byte strings are stored verbatim.
pub trait Token {
    fn token_bytes(&self) -> Cow<'_, [u8]>;
}

impl Token for String {
    fn token_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Token for str {
    fn token_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl Token for Vec<u8> {
    fn token_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl Token for [u8] {
    fn token_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<T: Token + ?Sized> Token for &T {
    fn token_bytes(&self) -> Cow<'_, [u8]> {
        (**self).token_bytes()
    }
}

// taken from https://docs.rs/sled/0.34.7/src/sled/config.rs.html#445
pub fn gen_temp_path() -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::SystemTime;

    static SALT_COUNTER: AtomicUsize = AtomicUsize::new(0);

    let seed = SALT_COUNTER.fetch_add(1, Ordering::SeqCst) as u128;

    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        << 48;

    let pid = u128::from(std::process::id());

    let salt = (pid << 16) + now + seed;

    if cfg!(target_os = "linux") {
        // use shared memory for temporary linux files
        format!("/dev/shm/cleave.tmp.{salt}").into()
    } else {
        std::env::temp_dir().join(format!("cleave.tmp.{salt}"))
    }
}
