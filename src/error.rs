use std::{io, path::PathBuf};

use thiserror::Error;

/// Main error type for the leasedump application.
///
/// This enum represents the errors that can surface from a dump: opening the
/// lease store, validating the scan geometry, validating a header layout, and
/// rendering output. Per-slot decode problems never appear here; a slot that
/// cannot be read or decoded is reported as empty, not as an error.
#[derive(Debug, Error)]
pub enum Error {
   /// Lease store could not be opened for reading.
   #[error("failed to open lease store {path}: {reason}", path = path.display())]
   OpenStore {
      path:   PathBuf,
      #[source]
      reason: io::Error,
   },

   /// I/O error occurred outside the per-slot probe path.
   #[error("io error: {0}")]
   Io(#[from] io::Error),

   /// Scan request violated a geometry constraint.
   #[error("invalid scan request: {0}")]
   Request(#[from] RequestError),

   /// Header layout is unusable with the requested block size.
   #[error("invalid header layout: {0}")]
   Layout(#[from] LayoutError),

   /// JSON serialization error occurred.
   #[error("json error: {0}")]
   Json(#[from] serde_json::Error),
}

impl Error {
   pub fn exit_code(&self) -> i32 {
      match self {
         Error::Request(_) | Error::Layout(_) => 2,
         _ => 1,
      }
   }
}

/// Errors raised while validating scan geometry.
///
/// These are caller mistakes: a request whose offset, size, block size, and
/// alignment do not describe a well-formed slot grid. They are rejected
/// before any storage read happens.
#[derive(Debug, Error)]
pub enum RequestError {
   /// Alignment (the slot stride) must be non-zero.
   #[error("alignment must be non-zero")]
   ZeroAlignment,

   /// Block size must be one of the sector sizes the lease format supports.
   #[error("unsupported block size {0}: expected 512 or 4096")]
   UnsupportedBlockSize(u64),

   /// Every slot must hold a whole number of blocks.
   #[error("block size {block_size} does not divide alignment {alignment}")]
   MisalignedBlockSize { block_size: u64, alignment: u64 },

   /// A bounded scan must cover a whole number of slots.
   #[error("scan size {size} is not a multiple of alignment {alignment}")]
   UnalignedSize { size: u64, alignment: u64 },
}

/// Errors raised while validating a header layout against a block size.
#[derive(Debug, Error)]
pub enum LayoutError {
   /// Name fields of width zero would make every record decode as empty.
   #[error("name fields must be wider than zero bytes")]
   ZeroNameWidth,

   /// All header fields must fit inside a single probe block.
   #[error("header spans {span} bytes but the probe block holds only {block_size}")]
   ExceedsBlock { span: usize, block_size: u64 },
}

/// Standard result type using [`enum@Error`] as the default error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
