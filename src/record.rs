//! Lease record types and the leader-record decoder.
//!
//! The decoder is deliberately total: any block that does not carry a
//! well-formed leader record for the given layout decodes to
//! [`SlotOutcome::Empty`]. Foreign data, zeroed sectors, short blocks, and
//! records from a different lease format are all indistinguishable from an
//! uninitialized slot, which is exactly how the scanner wants to treat them.

use serde::Serialize;

use crate::layout::HeaderLayout;

/// A decoded delta lease: one host's membership slot in a lockspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockspaceRecord {
   pub byte_offset:    u64,
   pub lockspace_name: String,
   pub owner_host_id:  u64,
   pub generation:     u64,
}

/// A decoded paxos lease guarding one named resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
   pub byte_offset:    u64,
   pub lockspace_name: String,
   pub resource_name:  String,
   pub owner_host_id:  u64,
   pub generation:     u64,
   pub leader_version: u64,
   pub timestamp:      u64,
}

/// Either lease kind, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LeaseRecord {
   Lockspace(LockspaceRecord),
   Resource(ResourceRecord),
}

impl LeaseRecord {
   /// Absolute position of the slot this record was decoded from.
   pub fn byte_offset(&self) -> u64 {
      match self {
         LeaseRecord::Lockspace(record) => record.byte_offset,
         LeaseRecord::Resource(record) => record.byte_offset,
      }
   }

   /// Name of the lockspace the record belongs to.
   pub fn lockspace_name(&self) -> &str {
      match self {
         LeaseRecord::Lockspace(record) => &record.lockspace_name,
         LeaseRecord::Resource(record) => &record.lockspace_name,
      }
   }
}

/// Result of decoding one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
   /// The slot holds a delta lease.
   Lockspace(LockspaceRecord),
   /// The slot holds a paxos lease.
   Resource(ResourceRecord),
   /// The slot holds no record this layout recognizes.
   Empty,
}

/// Decodes the leader record of one slot.
///
/// `block` is the first block of the slot, `byte_offset` its absolute
/// position in the store. The checks run in order: magic, major version,
/// then the lockspace name, which must be non-empty in every live record.
/// An empty resource name then marks the record as a lockspace (delta)
/// lease; a non-empty one as a resource (paxos) lease.
///
/// This function never fails. Whatever cannot be decoded is `Empty`.
pub fn decode_slot(block: &[u8], layout: &HeaderLayout, byte_offset: u64) -> SlotOutcome {
   try_decode_slot(block, layout, byte_offset).unwrap_or(SlotOutcome::Empty)
}

fn try_decode_slot(block: &[u8], layout: &HeaderLayout, byte_offset: u64) -> Option<SlotOutcome> {
   let magic = read_le_u32(block, layout.magic_off)?;
   if magic != layout.magic {
      return None;
   }

   let version = read_le_u32(block, layout.version_off)?;
   if version & layout.version_mask != layout.version & layout.version_mask {
      return None;
   }

   let lockspace_name = read_name(block, layout.lockspace_off, layout.name_width)?;
   if lockspace_name.is_empty() {
      return None;
   }

   let resource_name = read_name(block, layout.resource_off, layout.name_width)?;
   let owner_host_id = read_le_u64(block, layout.owner_off)?;
   let generation = read_le_u64(block, layout.generation_off)?;

   if resource_name.is_empty() {
      return Some(SlotOutcome::Lockspace(LockspaceRecord {
         byte_offset,
         lockspace_name,
         owner_host_id,
         generation,
      }));
   }

   Some(SlotOutcome::Resource(ResourceRecord {
      byte_offset,
      lockspace_name,
      resource_name,
      owner_host_id,
      generation,
      leader_version: read_le_u64(block, layout.lver_off)?,
      timestamp: read_le_u64(block, layout.timestamp_off)?,
   }))
}

fn read_le_u32(block: &[u8], offset: usize) -> Option<u32> {
   let end = offset.checked_add(4)?;
   let bytes = block.get(offset..end)?;
   Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

fn read_le_u64(block: &[u8], offset: usize) -> Option<u64> {
   let end = offset.checked_add(8)?;
   let bytes = block.get(offset..end)?;
   Some(u64::from_le_bytes(bytes.try_into().ok()?))
}

/// Reads a fixed-width name field, trims the trailing NUL padding, and
/// decodes the rest lossily. Interior NULs survive; a record written with a
/// short C string simply ends at its padding.
fn read_name(block: &[u8], offset: usize, width: usize) -> Option<String> {
   let end = offset.checked_add(width)?;
   let field = block.get(offset..end)?;
   let trimmed = trim_trailing_nul(field);
   Some(String::from_utf8_lossy(trimmed).into_owned())
}

fn trim_trailing_nul(field: &[u8]) -> &[u8] {
   let mut end = field.len();
   while end > 0 && field[end - 1] == 0 {
      end -= 1;
   }
   &field[..end]
}
