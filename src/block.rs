//! Block-granular reads against a lease store.
//!
//! The reader treats the store as opaque sectors. A probe either yields a
//! full block or reports a hole; running past the end of a truncated backing
//! file, hitting a bad sector, or racing a concurrent resize all collapse to
//! the hole case. The scanner decides what a hole means for the scan.

use std::{
   fs::File,
   io::{self, Read, Seek, SeekFrom},
   path::{Path, PathBuf},
};

use crate::{Result, error::Error};

/// Outcome of probing one block of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockProbe {
   /// The block was read in full.
   Block(Vec<u8>),
   /// The block could not be produced: past end of storage, short read, or
   /// read failure.
   Hole,
}

/// Read-only handle on a lease store, opened once per scan.
///
/// Opening never locks or flocks the path; the store belongs to the lock
/// manager and this tool only observes it.
#[derive(Debug)]
pub struct BlockReader {
   file: File,
   path: PathBuf,
}

impl BlockReader {
   /// Opens the store for reading. Works on both block devices and backing
   /// files.
   pub fn open(path: &Path) -> Result<Self> {
      let file = File::open(path).map_err(|reason| Error::OpenStore {
         path: path.to_path_buf(),
         reason,
      })?;
      Ok(Self { file, path: path.to_path_buf() })
   }

   /// Probes one block of `block_size` bytes starting at `byte_offset`.
   ///
   /// Only a complete block counts: anything short of `block_size` bytes is
   /// a [`BlockProbe::Hole`], as is any read or seek failure. Failures are
   /// logged and swallowed so one bad sector cannot abort a whole scan.
   pub fn read_block(&mut self, byte_offset: u64, block_size: usize) -> BlockProbe {
      if let Err(err) = self.file.seek(SeekFrom::Start(byte_offset)) {
         tracing::warn!("seek to {byte_offset} failed on {}: {err}", self.path.display());
         return BlockProbe::Hole;
      }

      let mut block = vec![0u8; block_size];
      let mut filled = 0;
      while filled < block.len() {
         match self.file.read(&mut block[filled..]) {
            Ok(0) => {
               tracing::debug!(
                  "short read at {byte_offset} ({filled}/{block_size} bytes) on {}",
                  self.path.display()
               );
               return BlockProbe::Hole;
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
               tracing::warn!("read at {byte_offset} failed on {}: {err}", self.path.display());
               return BlockProbe::Hole;
            }
         }
      }
      BlockProbe::Block(block)
   }
}
