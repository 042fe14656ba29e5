//! Read-only inspection of sanlock-format lease stores.
//!
//! A lease store is a fixed grid of slots on shared block storage; each
//! slot may hold a leader record describing either a delta lease (lockspace
//! membership) or a paxos lease (a named resource). This crate decodes
//! those records without ever writing to or locking the storage, for use
//! when the lock manager itself is unavailable or distrusted.
//!
//! The library surface is [`scan::dump_lockspace_leases`] and
//! [`scan::dump_resource_leases`] plus the pieces they are built from:
//! block-level probing in [`block`], the total decoder in [`record`], and
//! the pluggable header geometry in [`layout`]. The `leasedump` binary
//! wraps these behind `resources`, `lockspaces`, and `inspect` subcommands.

pub mod block;
pub mod cmd;
pub mod config;
pub mod error;
pub mod layout;
pub mod record;
pub mod report;
pub mod scan;
pub mod util;

pub use error::{Error, Result};
pub use layout::HeaderLayout;
pub use record::{LeaseRecord, LockspaceRecord, ResourceRecord, SlotOutcome};
pub use scan::{LeaseScan, ScanRequest, dump_lockspace_leases, dump_resource_leases, scan};
