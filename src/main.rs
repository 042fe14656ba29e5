use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leasedump::{Result, cmd, config, scan::ScanRequest, util::parse_byte_size};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the leasedump application
#[derive(Parser)]
#[command(name = "leasedump")]
#[command(about = "Read-only dump of sanlock-format lease stores")]
#[command(version)]
struct Cli {
   #[command(subcommand)]
   command: Cmd,
}

/// Available subcommands for leasedump
#[derive(Subcommand)]
enum Cmd {
   #[command(about = "Dump resource (paxos) leases from a lease store")]
   Resources {
      #[arg(help = "Lease store path (block device or backing file)")]
      path: PathBuf,

      #[arg(short = 'o', long, default_value_t = 0, help = "Byte offset of slot 0")]
      offset: u64,

      #[arg(
         short = 's',
         long,
         value_parser = parse_byte_size,
         help = "Bytes to scan, probing size/align slots and skipping holes \
                 (default: stop at the first hole)"
      )]
      size: Option<u64>,

      #[arg(
         short = 'Z',
         long,
         value_parser = parse_byte_size,
         help = "Sector size of the store, 512 or 4096 (default: config)"
      )]
      block_size: Option<u64>,

      #[arg(
         short = 'A',
         long = "align",
         value_parser = parse_byte_size,
         help = "Slot stride, e.g. 1M (default: config)"
      )]
      alignment: Option<u64>,

      #[arg(long, help = "JSON output")]
      json: bool,
   },

   #[command(about = "Dump lockspace (delta) leases from a lease store")]
   Lockspaces {
      #[arg(help = "Lease store path (block device or backing file)")]
      path: PathBuf,

      #[arg(short = 'o', long, default_value_t = 0, help = "Byte offset of slot 0")]
      offset: u64,

      #[arg(
         short = 's',
         long,
         value_parser = parse_byte_size,
         help = "Bytes to scan, probing size/align slots and skipping holes \
                 (default: stop at the first hole)"
      )]
      size: Option<u64>,

      #[arg(
         short = 'Z',
         long,
         value_parser = parse_byte_size,
         help = "Sector size of the store, 512 or 4096 (default: config)"
      )]
      block_size: Option<u64>,

      #[arg(
         short = 'A',
         long = "align",
         value_parser = parse_byte_size,
         help = "Slot stride, e.g. 1M (default: config)"
      )]
      alignment: Option<u64>,

      #[arg(long, help = "JSON output")]
      json: bool,
   },

   #[command(about = "Decode a single slot and show what is in it")]
   Inspect {
      #[arg(help = "Lease store path (block device or backing file)")]
      path: PathBuf,

      #[arg(help = "Slot index to inspect")]
      slot: u64,

      #[arg(short = 'o', long, default_value_t = 0, help = "Byte offset of slot 0")]
      offset: u64,

      #[arg(
         short = 'Z',
         long,
         value_parser = parse_byte_size,
         help = "Sector size of the store, 512 or 4096 (default: config)"
      )]
      block_size: Option<u64>,

      #[arg(
         short = 'A',
         long = "align",
         value_parser = parse_byte_size,
         help = "Slot stride, e.g. 1M (default: config)"
      )]
      alignment: Option<u64>,

      #[arg(long, help = "Hex dump of the raw header region")]
      raw: bool,
   },
}

fn main() {
   tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
      .init();

   let cli = Cli::parse();
   if let Err(err) = run(cli) {
      eprintln!("{err}");
      std::process::exit(err.exit_code());
   }
}

fn run(cli: Cli) -> Result<()> {
   match cli.command {
      Cmd::Resources { path, offset, size, block_size, alignment, json } => {
         let request = to_request(path, offset, size, block_size, alignment);
         cmd::resources::execute(&request, json)
      }
      Cmd::Lockspaces { path, offset, size, block_size, alignment, json } => {
         let request = to_request(path, offset, size, block_size, alignment);
         cmd::lockspaces::execute(&request, json)
      }
      Cmd::Inspect { path, slot, offset, block_size, alignment, raw } => {
         let request = to_request(path, offset, None, block_size, alignment);
         cmd::inspect::execute(&request, slot, raw)
      }
   }
}

fn to_request(
   path: PathBuf,
   offset: u64,
   size: Option<u64>,
   block_size: Option<u64>,
   alignment: Option<u64>,
) -> ScanRequest {
   let cfg = config::get();
   ScanRequest {
      path,
      offset,
      size,
      block_size: block_size.unwrap_or(cfg.block_size),
      alignment: alignment.unwrap_or(cfg.alignment),
   }
}
