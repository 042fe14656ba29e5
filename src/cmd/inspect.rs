//! Single-slot inspection command.
//!
//! Probes one slot, tries both header layouts against it, and reports what
//! is there. Useful when a dump looks wrong and the question becomes "what
//! exactly is in slot 7": a lease of the other kind, a stale record from a
//! reinitialized store, or plain garbage. `--raw` adds a hex dump of the
//! header region.

use console::style;

use crate::{
   Result,
   block::{BlockProbe, BlockReader},
   config, report,
   record::{SlotOutcome, decode_slot},
   scan::ScanRequest,
   util::format_size,
};

/// Executes the inspect command against one slot of a lease store.
pub fn execute(request: &ScanRequest, slot: u64, raw: bool) -> Result<()> {
   request.validate()?;

   let cfg = config::get();
   let layouts = [("resource", cfg.resource_layout()), ("lockspace", cfg.lockspace_layout())];
   for (_, layout) in &layouts {
      layout.ensure_fits(request.block_size)?;
   }

   let byte_offset = slot
      .checked_mul(request.alignment)
      .and_then(|distance| request.offset.checked_add(distance));
   let Some(byte_offset) = byte_offset else {
      println!("{} slot {slot} lies past the addressable range", style("○").yellow());
      return Ok(());
   };

   println!(
      "slot {slot} at byte {byte_offset} ({}), probing {} bytes",
      format_size(byte_offset),
      request.block_size
   );

   let mut reader = BlockReader::open(&request.path)?;
   let block = match reader.read_block(byte_offset, request.block_size as usize) {
      BlockProbe::Hole => {
         println!(
            "{} no readable block: past end of store or unreadable sector",
            style("○").yellow()
         );
         return Ok(());
      }
      BlockProbe::Block(block) => block,
   };

   let mut marker = "";
   let mut outcome = SlotOutcome::Empty;
   for (kind, layout) in &layouts {
      match decode_slot(&block, layout, byte_offset) {
         SlotOutcome::Empty => {}
         decoded => {
            marker = *kind;
            outcome = decoded;
            break;
         }
      }
   }

   match outcome {
      SlotOutcome::Empty => {
         println!("{} no lease record under either layout", style("○").yellow());
      }
      SlotOutcome::Lockspace(record) => {
         println!("{} delta lease ({marker} markers)", style("✓").green());
         println!("   lockspace  {}", record.lockspace_name);
         println!("   own        {}", record.owner_host_id);
         println!("   gen        {}", record.generation);
      }
      SlotOutcome::Resource(record) => {
         println!("{} paxos lease ({marker} markers)", style("✓").green());
         println!("   lockspace  {}", record.lockspace_name);
         println!("   resource   {}", record.resource_name);
         println!("   own        {}", record.owner_host_id);
         println!("   gen        {}", record.generation);
         println!("   lver       {}", record.leader_version);
         println!("   timestamp  {}", record.timestamp);
      }
   }

   if raw {
      let span = layouts
         .iter()
         .map(|(_, layout)| layout.span())
         .max()
         .unwrap_or(0)
         .min(block.len());
      println!();
      print!("{}", report::hex_dump(&block[..span]));
   }

   Ok(())
}
