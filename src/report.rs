//! Rendering of dump results for humans and for `--json`.

use console::style;
use serde::Serialize;

use crate::{
   Result,
   record::{LeaseRecord, LockspaceRecord, ResourceRecord},
};

/// One rendered lease record with the flat field set operators expect.
///
/// Fields a lockspace record does not carry (`resource`, `timestamp`,
/// `lver`) stay `None` and are omitted from JSON output entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpRow {
   pub offset:     u64,
   pub lockspace:  String,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub resource:   Option<String>,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub timestamp:  Option<u64>,
   pub own:        u64,
   #[serde(rename = "gen")]
   pub generation: u64,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub lver:       Option<u64>,
}

impl DumpRow {
   pub fn from_lockspace(record: &LockspaceRecord) -> Self {
      Self {
         offset: record.byte_offset,
         lockspace: record.lockspace_name.clone(),
         resource: None,
         timestamp: None,
         own: record.owner_host_id,
         generation: record.generation,
         lver: None,
      }
   }

   pub fn from_resource(record: &ResourceRecord) -> Self {
      Self {
         offset: record.byte_offset,
         lockspace: record.lockspace_name.clone(),
         resource: Some(record.resource_name.clone()),
         timestamp: Some(record.timestamp),
         own: record.owner_host_id,
         generation: record.generation,
         lver: Some(record.leader_version),
      }
   }

   pub fn from_record(record: &LeaseRecord) -> Self {
      match record {
         LeaseRecord::Lockspace(record) => Self::from_lockspace(record),
         LeaseRecord::Resource(record) => Self::from_resource(record),
      }
   }
}

/// Prints rows as an aligned table, header dimmed. Columns no row uses are
/// left out, so a lockspace dump renders without the resource columns.
pub fn print_table(rows: &[DumpRow]) {
   if rows.is_empty() {
      println!("{}", style("no lease records").dim());
      return;
   }
   let mut lines = format_rows(rows).into_iter();
   if let Some(header) = lines.next() {
      println!("{}", style(header).dim());
   }
   for line in lines {
      println!("{line}");
   }
}

/// Prints rows as a pretty JSON array.
pub fn print_json(rows: &[DumpRow]) -> Result<()> {
   println!("{}", serde_json::to_string_pretty(rows)?);
   Ok(())
}

fn format_rows(rows: &[DumpRow]) -> Vec<String> {
   let with_resource = rows.iter().any(|row| row.resource.is_some());

   let mut table: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
   let mut header = vec!["offset".to_string(), "lockspace".to_string()];
   if with_resource {
      header.extend(["resource".to_string(), "timestamp".to_string()]);
   }
   header.extend(["own".to_string(), "gen".to_string()]);
   if with_resource {
      header.push("lver".to_string());
   }
   table.push(header);

   for row in rows {
      let mut cells = vec![row.offset.to_string(), row.lockspace.clone()];
      if with_resource {
         cells.push(row.resource.clone().unwrap_or_default());
         cells.push(row.timestamp.map(|t| t.to_string()).unwrap_or_default());
      }
      cells.extend([row.own.to_string(), row.generation.to_string()]);
      if with_resource {
         cells.push(row.lver.map(|v| v.to_string()).unwrap_or_default());
      }
      table.push(cells);
   }

   let columns = table[0].len();
   let widths: Vec<usize> = (0..columns)
      .map(|col| table.iter().map(|cells| cells[col].len()).max().unwrap_or(0))
      .collect();
   // Name columns read left-aligned, counters right-aligned.
   let left_aligned: Vec<bool> = table[0]
      .iter()
      .map(|name| matches!(name.as_str(), "lockspace" | "resource"))
      .collect();

   table
      .iter()
      .map(|cells| {
         let mut line = String::new();
         for (col, cell) in cells.iter().enumerate() {
            if col > 0 {
               line.push_str("  ");
            }
            if left_aligned[col] && col != columns - 1 {
               line.push_str(&format!("{cell:<width$}", width = widths[col]));
            } else {
               line.push_str(&format!("{cell:>width$}", width = widths[col]));
            }
         }
         line.trim_end().to_string()
      })
      .collect()
}

/// Classic hex dump of a byte region: offset, sixteen bytes, ASCII gutter.
pub fn hex_dump(bytes: &[u8]) -> String {
   let mut out = String::new();
   for (index, chunk) in bytes.chunks(16).enumerate() {
      let hex: Vec<String> = chunk.iter().map(|byte| format!("{byte:02x}")).collect();
      let ascii: String = chunk
         .iter()
         .map(|&byte| if (0x20..0x7F).contains(&byte) { byte as char } else { '.' })
         .collect();
      out.push_str(&format!("{:06x}  {:<47}  |{ascii}|\n", index * 16, hex.join(" ")));
   }
   out
}
