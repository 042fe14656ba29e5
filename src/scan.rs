//! Slot-grid scanning over a lease store.
//!
//! A scan walks consecutive slots from a base offset, one probe per slot,
//! and yields the records it can decode. How holes are treated depends on
//! the request: without a size the store is taken as unbounded and the scan
//! stops for good at the first hole; with a size exactly `size / alignment`
//! slots are probed and holes are skipped. Records come out in slot order
//! either way, and rescanning an unchanged store yields the same sequence.

use std::path::PathBuf;

use crate::{
   Result,
   block::{BlockProbe, BlockReader},
   error::RequestError,
   layout::HeaderLayout,
   record::{LeaseRecord, LockspaceRecord, ResourceRecord, SlotOutcome, decode_slot},
};

/// Sector size of 512-byte storage.
pub const SECTOR_SIZE_512: u64 = 512;

/// Sector size of 4K storage.
pub const SECTOR_SIZE_4K: u64 = 4096;

/// Slot stride used on 512-byte sector storage.
pub const ALIGNMENT_1M: u64 = 1 << 20;

/// Slot stride used on 4K sector storage.
pub const ALIGNMENT_2M: u64 = 2 << 20;

/// Larger strides the lock manager supports for high host counts.
pub const ALIGNMENT_4M: u64 = 4 << 20;
pub const ALIGNMENT_8M: u64 = 8 << 20;

/// Geometry of one scan: where the slot grid lives and how it is stepped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
   /// Lease store path, a block device or backing file.
   pub path: PathBuf,

   /// Byte position of slot 0.
   pub offset: u64,

   /// Bytes to scan. `None` scans until the first hole; `Some(n)` probes
   /// exactly `n / alignment` slots.
   pub size: Option<u64>,

   /// Sector size of the storage, 512 or 4096. Only the first block of
   /// each slot is read.
   pub block_size: u64,

   /// Distance between consecutive slots.
   pub alignment: u64,
}

impl ScanRequest {
   /// Checks that the request describes a well-formed slot grid.
   pub fn validate(&self) -> Result<(), RequestError> {
      if self.alignment == 0 {
         return Err(RequestError::ZeroAlignment);
      }
      if self.block_size != SECTOR_SIZE_512 && self.block_size != SECTOR_SIZE_4K {
         return Err(RequestError::UnsupportedBlockSize(self.block_size));
      }
      if self.alignment % self.block_size != 0 {
         return Err(RequestError::MisalignedBlockSize {
            block_size: self.block_size,
            alignment:  self.alignment,
         });
      }
      if let Some(size) = self.size {
         if size % self.alignment != 0 {
            return Err(RequestError::UnalignedSize { size, alignment: self.alignment });
         }
      }
      Ok(())
   }

   /// Number of slots a bounded scan probes; `None` for an unbounded scan.
   fn slot_limit(&self) -> Option<u64> {
      self.size.map(|size| size / self.alignment)
   }
}

/// A lazy scan over the slot grid; each `next()` probes at most the slots
/// needed to produce one more record.
#[derive(Debug)]
pub struct LeaseScan {
   reader:     BlockReader,
   layout:     HeaderLayout,
   offset:     u64,
   alignment:  u64,
   block_size: usize,
   limit:      Option<u64>,
   next_slot:  u64,
   done:       bool,
}

impl LeaseScan {
   fn probe(&mut self, slot: u64) -> SlotOutcome {
      let byte_offset = slot
         .checked_mul(self.alignment)
         .and_then(|distance| self.offset.checked_add(distance));
      let Some(byte_offset) = byte_offset else {
         // A slot past the addressable range cannot hold a record.
         return SlotOutcome::Empty;
      };
      match self.reader.read_block(byte_offset, self.block_size) {
         BlockProbe::Hole => SlotOutcome::Empty,
         BlockProbe::Block(block) => decode_slot(&block, &self.layout, byte_offset),
      }
   }

   /// Narrows the scan to lockspace (delta) records.
   pub fn lockspaces(self) -> impl Iterator<Item = LockspaceRecord> {
      self.filter_map(|record| match record {
         LeaseRecord::Lockspace(record) => Some(record),
         LeaseRecord::Resource(_) => None,
      })
   }

   /// Narrows the scan to resource (paxos) records.
   pub fn resources(self) -> impl Iterator<Item = ResourceRecord> {
      self.filter_map(|record| match record {
         LeaseRecord::Resource(record) => Some(record),
         LeaseRecord::Lockspace(_) => None,
      })
   }
}

impl Iterator for LeaseScan {
   type Item = LeaseRecord;

   fn next(&mut self) -> Option<LeaseRecord> {
      while !self.done {
         if let Some(limit) = self.limit {
            if self.next_slot >= limit {
               self.done = true;
               break;
            }
         }
         let slot = self.next_slot;
         self.next_slot += 1;

         match self.probe(slot) {
            SlotOutcome::Empty => {
               // Unbounded scans treat the first hole as end of store.
               if self.limit.is_none() {
                  self.done = true;
               }
            }
            SlotOutcome::Lockspace(record) => return Some(LeaseRecord::Lockspace(record)),
            SlotOutcome::Resource(record) => return Some(LeaseRecord::Resource(record)),
         }
      }
      None
   }
}

/// Starts a scan of `request` decoding slots with `layout`.
///
/// Validates the geometry, checks the layout against the block size, and
/// opens the store once. No storage is read until the iterator is driven.
pub fn scan(request: &ScanRequest, layout: HeaderLayout) -> Result<LeaseScan> {
   request.validate()?;
   layout.ensure_fits(request.block_size)?;
   let reader = BlockReader::open(&request.path)?;
   Ok(LeaseScan {
      reader,
      layout,
      offset: request.offset,
      alignment: request.alignment,
      block_size: request.block_size as usize,
      limit: request.slot_limit(),
      next_slot: 0,
      done: false,
   })
}

/// Dumps the delta leases of a lockspace store in slot order.
///
/// Slots holding paxos leases under the same markers are skipped without
/// ending an unbounded scan; only true holes do that.
pub fn dump_lockspace_leases(
   request: &ScanRequest,
) -> Result<impl Iterator<Item = LockspaceRecord>> {
   Ok(scan(request, HeaderLayout::lockspace())?.lockspaces())
}

/// Dumps the paxos leases of a resource store in slot order.
pub fn dump_resource_leases(request: &ScanRequest) -> Result<impl Iterator<Item = ResourceRecord>> {
   Ok(scan(request, HeaderLayout::resource())?.resources())
}
