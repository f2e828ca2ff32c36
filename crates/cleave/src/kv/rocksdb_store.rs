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

use std::fs;
use std::path::Path;

use anyhow::Context;
use rocksdb::{BlockBasedOptions, IteratorMode, Options, ReadOptions, WriteBatch, WriteOptions, DB};

use super::Kv;
use crate::Result;

pub struct RocksDbStore {
    db: DB,
}

impl RocksDbStore {
    fn options() -> Options {
        let mut options = Options::default();
        options.create_if_missing(true);

        // some recommended settings (https://github.com/facebook/rocksdb/wiki/Setup-Options-and-Basic-Tuning)
        options.set_level_compaction_dynamic_level_bytes(true);
        options.set_bytes_per_sync(1048576);
        let mut block_options = BlockBasedOptions::default();
        block_options.set_block_size(16 * 1024);
        block_options.set_format_version(5);
        block_options.set_cache_index_and_filter_blocks(true);
        block_options.set_pin_l0_filter_and_index_blocks_in_cache(true);

        options.set_block_based_table_factory(&block_options);
        options.set_compression_type(rocksdb::DBCompressionType::Lz4);

        options
    }

    fn read_options() -> ReadOptions {
        let mut opts = ReadOptions::default();
        opts.set_verify_checksums(false);
        opts
    }

    fn write_options() -> WriteOptions {
        let mut opts = WriteOptions::default();
        opts.disable_wal(true);
        opts
    }
}

impl Kv for RocksDbStore {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            fs::create_dir_all(path.as_ref()).context("failed to create store directory")?;
        }

        let db = DB::open(&Self::options(), path.as_ref()).context("failed to open rocksdb")?;

        Ok(Self { db })
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self
            .db
            .get_opt(key, &Self::read_options())
            .context("failed to read key")?)
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.db
            .put_opt(key, value, &Self::write_options())
            .context("failed to write key")?;

        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.db
            .delete_opt(key, &Self::write_options())
            .context("failed to delete key")?;

        Ok(())
    }

    fn write_batch(&mut self, batch: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()> {
        let mut write = WriteBatch::default();

        for (key, value) in batch {
            write.put(key, value);
        }

        self.db
            .write_opt(write, &Self::write_options())
            .context("failed to commit write batch")?;

        Ok(())
    }

    fn range(&self, start: &[u8], stop: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let iter = self.db.iterator_opt(
            IteratorMode::From(start, rocksdb::Direction::Forward),
            Self::read_options(),
        );

        let mut scanned = Vec::new();

        for entry in iter {
            let (key, value) = entry.context("failed to scan range")?;

            if key.as_ref() >= stop {
                break;
            }

            scanned.push((key.into_vec(), value.into_vec()));
        }

        Ok(scanned)
    }

    fn clear(&mut self) -> Result<()> {
        let iter = self
            .db
            .iterator_opt(IteratorMode::Start, Self::read_options());

        let mut write = WriteBatch::default();

        for entry in iter {
            let (key, _) = entry.context("failed to scan keys")?;
            write.delete(key);
        }

        self.db
            .write_opt(write, &Self::write_options())
            .context("failed to clear store")?;

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Err(err) = self.db.flush() {
            match err.kind() {
                rocksdb::ErrorKind::NotSupported => {}
                _ => return Err(anyhow::Error::new(err).context("failed to flush").into()),
            }
        }

        Ok(())
    }

    fn compact(&mut self) {
        self.db.compact_range::<&[u8], &[u8]>(None, None);
    }
}
