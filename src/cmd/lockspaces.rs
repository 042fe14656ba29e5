//! Lockspace lease dump command.
//!
//! Renders the delta leases of a lockspace store: one row per host slot
//! with the owning host id and its generation.

use crate::{
   Result, config,
   report::{self, DumpRow},
   scan::{self, ScanRequest},
};

/// Executes the lockspaces command against one lease store.
pub fn execute(request: &ScanRequest, json: bool) -> Result<()> {
   let layout = config::get().lockspace_layout();
   let rows: Vec<DumpRow> = scan::scan(request, layout)?
      .lockspaces()
      .map(|record| DumpRow::from_lockspace(&record))
      .collect();

   if json {
      report::print_json(&rows)
   } else {
      report::print_table(&rows);
      Ok(())
   }
}
