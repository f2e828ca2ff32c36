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

//! Ordered key-value storage for the tries.

pub mod rocksdb_store;

pub use rocksdb_store::RocksDbStore;

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;

use crate::Result;

/// Everything the tries require from a backing store: point reads, batched
/// writes and byte-ordered range scans over raw keys.
pub trait Kv
where
    Self: Send + Sync,
{
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Commits every pair in a single write.
    fn write_batch(&mut self, batch: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()>;

    /// Key-ordered scan of `[start, stop)`.
    fn range(&self, start: &[u8], stop: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Removes every key.
    fn clear(&mut self) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn compact(&mut self) {}
}

/// In-memory backend. The path handed to [`Kv::open`] is ignored; contents
/// do not survive the process.
#[derive(Default)]
pub struct MemoryKv {
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Kv for MemoryKv {
    fn open<P: AsRef<Path>>(_path: P) -> Result<Self> {
        Ok(Self::default())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.map.get(key).cloned())
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.map.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.map.remove(key);
        Ok(())
    }

    fn write_batch(&mut self, batch: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()> {
        for (key, value) in batch {
            self.map.insert(key, value);
        }
        Ok(())
    }

    fn range(&self, start: &[u8], stop: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .map
            .range::<[u8], _>((Bound::Included(start), Bound::Excluded(stop)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    fn clear(&mut self) -> Result<()> {
        self.map.clear();
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
