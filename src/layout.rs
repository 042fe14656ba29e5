//! On-disk geometry of lease leader records.
//!
//! Every lease slot starts with a little-endian leader record. The two lease
//! kinds (delta leases in a lockspace store, paxos leases in a resource
//! store) share one field arrangement and differ only in their magic and
//! format version. [`HeaderLayout`] captures the arrangement as data so the
//! decoder stays a pure function over it, and the two stock variants are
//! exposed as the [`HeaderLayout::lockspace`] and [`HeaderLayout::resource`]
//! presets.

use crate::error::LayoutError;

/// Byte width of the lockspace and resource name fields.
pub const NAME_WIDTH: usize = 48;

/// Magic of a delta-lease leader record (lockspace stores).
pub const LOCKSPACE_MAGIC: u32 = 0x1221_2010;

/// Magic of a paxos-lease leader record (resource stores).
pub const RESOURCE_MAGIC: u32 = 0x0615_2010;

/// Format version of delta-lease records, major half.
pub const LOCKSPACE_VERSION: u32 = 0x0003_0000;

/// Format version of paxos-lease records, major half.
pub const RESOURCE_VERSION: u32 = 0x0006_0000;

/// Mask selecting the major half of the version word. Minor revisions stay
/// decodable under the same layout.
pub const VERSION_MAJOR_MASK: u32 = 0xFFFF_0000;

/// Field geometry of a leader record within its probe block.
///
/// All offsets are byte positions from the start of the slot. Magic and
/// version are `u32`, the counters are `u64`, and the two names are
/// fixed-width NUL-padded fields of `name_width` bytes each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
   pub magic:          u32,
   pub version:        u32,
   pub version_mask:   u32,
   pub magic_off:      usize,
   pub version_off:    usize,
   pub owner_off:      usize,
   pub generation_off: usize,
   pub lver_off:       usize,
   pub lockspace_off:  usize,
   pub resource_off:   usize,
   pub timestamp_off:  usize,
   pub name_width:     usize,
}

impl HeaderLayout {
   fn leader_record(magic: u32, version: u32) -> Self {
      Self {
         magic,
         version,
         version_mask: VERSION_MAJOR_MASK,
         magic_off: 0,
         version_off: 4,
         owner_off: 32,
         generation_off: 40,
         lver_off: 48,
         lockspace_off: 56,
         resource_off: 104,
         timestamp_off: 152,
         name_width: NAME_WIDTH,
      }
   }

   /// Layout of a delta-lease store (`ids` files).
   pub fn lockspace() -> Self {
      Self::leader_record(LOCKSPACE_MAGIC, LOCKSPACE_VERSION)
   }

   /// Layout of a paxos-lease store (`leases` and volume-lease files).
   pub fn resource() -> Self {
      Self::leader_record(RESOURCE_MAGIC, RESOURCE_VERSION)
   }

   /// Returns the layout with its magic or version replaced. `None` keeps
   /// the preset value; used for config overrides on private forks of the
   /// format.
   pub fn with_marker(mut self, magic: Option<u32>, version: Option<u32>) -> Self {
      if let Some(magic) = magic {
         self.magic = magic;
      }
      if let Some(version) = version {
         self.version = version;
      }
      self
   }

   /// Position one past the last byte any header field touches.
   pub fn span(&self) -> usize {
      let words = [
         self.magic_off + 4,
         self.version_off + 4,
         self.owner_off + 8,
         self.generation_off + 8,
         self.lver_off + 8,
         self.timestamp_off + 8,
         self.lockspace_off + self.name_width,
         self.resource_off + self.name_width,
      ];
      words.into_iter().max().unwrap_or(0)
   }

   /// Checks that every field of a record read with this layout lands inside
   /// one probe block of `block_size` bytes.
   pub fn ensure_fits(&self, block_size: u64) -> Result<(), LayoutError> {
      if self.name_width == 0 {
         return Err(LayoutError::ZeroNameWidth);
      }
      let span = self.span();
      if span as u64 > block_size {
         return Err(LayoutError::ExceedsBlock { span, block_size });
      }
      Ok(())
   }
}
