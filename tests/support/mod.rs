#![allow(dead_code)]

use std::{
   fs::OpenOptions,
   io::{Seek, SeekFrom, Write},
   path::{Path, PathBuf},
};

use leasedump::layout::HeaderLayout;

/// Field values of one leader record to place in a store.
#[derive(Debug, Clone, Default)]
pub struct RecordSpec {
   pub lockspace:  String,
   pub resource:   String,
   pub own:        u64,
   pub generation: u64,
   pub lver:       u64,
   pub timestamp:  u64,
}

/// Writes leader records into a scratch store the way the lock manager's
/// init tool lays them out: one record at the head of each slot, names
/// NUL-padded to their fixed width, everything else zeroed.
pub struct StoreBuilder {
   path:       PathBuf,
   block_size: u64,
   alignment:  u64,
}

impl StoreBuilder {
   pub fn new(path: &Path, block_size: u64, alignment: u64) -> Self {
      Self { path: path.to_path_buf(), block_size, alignment }
   }

   pub fn path(&self) -> &Path {
      &self.path
   }

   /// Grows or shrinks the backing file to exactly `len` bytes. Unwritten
   /// ranges read back as zeros, like a blank device.
   pub fn truncate(&self, len: u64) {
      let file = self.open();
      file.set_len(len).expect("set store length");
   }

   /// Places a freshly initialized delta lease: lockspace name plus the
   /// owning host id and generation, no resource name.
   pub fn write_lockspace(&self, slot: u64, lockspace: &str, own: u64, generation: u64) {
      let spec = RecordSpec {
         lockspace: lockspace.to_string(),
         own,
         generation,
         ..RecordSpec::default()
      };
      self.write_record(slot, &HeaderLayout::lockspace(), &spec);
   }

   /// Places a freshly initialized paxos lease: names set, all counters
   /// zero, exactly what init produces before any acquisition.
   pub fn write_resource(&self, slot: u64, lockspace: &str, resource: &str) {
      let spec = RecordSpec {
         lockspace: lockspace.to_string(),
         resource: resource.to_string(),
         ..RecordSpec::default()
      };
      self.write_record(slot, &HeaderLayout::resource(), &spec);
   }

   /// Places a leader record with full control over layout and fields.
   pub fn write_record(&self, slot: u64, layout: &HeaderLayout, spec: &RecordSpec) {
      let block = encode_leader(layout, self.block_size, spec);
      self.write_block(slot, &block);
   }

   /// Writes raw bytes at the head of a slot.
   pub fn write_block(&self, slot: u64, block: &[u8]) {
      let mut file = self.open();
      file
         .seek(SeekFrom::Start(slot * self.alignment))
         .expect("seek to slot");
      file.write_all(block).expect("write slot block");
   }

   fn open(&self) -> std::fs::File {
      OpenOptions::new()
         .write(true)
         .create(true)
         .truncate(false)
         .open(&self.path)
         .expect("open store for writing")
   }
}

/// Encodes one leader record into a zeroed block of `block_size` bytes.
pub fn encode_leader(layout: &HeaderLayout, block_size: u64, spec: &RecordSpec) -> Vec<u8> {
   let mut block = vec![0u8; block_size as usize];
   put_u32(&mut block, layout.magic_off, layout.magic);
   put_u32(&mut block, layout.version_off, layout.version);
   put_u64(&mut block, layout.owner_off, spec.own);
   put_u64(&mut block, layout.generation_off, spec.generation);
   put_u64(&mut block, layout.lver_off, spec.lver);
   put_u64(&mut block, layout.timestamp_off, spec.timestamp);
   put_name(&mut block, layout.lockspace_off, layout.name_width, &spec.lockspace);
   put_name(&mut block, layout.resource_off, layout.name_width, &spec.resource);
   block
}

fn put_u32(block: &mut [u8], offset: usize, value: u32) {
   block[offset..][..4].copy_from_slice(&value.to_le_bytes());
}

fn put_u64(block: &mut [u8], offset: usize, value: u64) {
   block[offset..][..8].copy_from_slice(&value.to_le_bytes());
}

fn put_name(block: &mut [u8], offset: usize, width: usize, name: &str) {
   let bytes = name.as_bytes();
   assert!(bytes.len() <= width, "name {name:?} wider than the field");
   block[offset..][..bytes.len()].copy_from_slice(bytes);
}
