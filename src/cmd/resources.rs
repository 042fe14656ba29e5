//! Resource lease dump command.
//!
//! Renders the paxos leases of a resource store in slot order.

use crate::{
   Result, config,
   report::{self, DumpRow},
   scan::{self, ScanRequest},
};

/// Executes the resources command against one lease store.
pub fn execute(request: &ScanRequest, json: bool) -> Result<()> {
   let layout = config::get().resource_layout();
   let rows: Vec<DumpRow> = scan::scan(request, layout)?
      .resources()
      .map(|record| DumpRow::from_resource(&record))
      .collect();

   if json {
      report::print_json(&rows)
   } else {
      report::print_table(&rows);
      Ok(())
   }
}
