//! CLI command implementations for leasedump.
//!
//! This module contains all subcommand implementations for the leasedump CLI
//! tool. Each module corresponds to a specific command available to users.

pub mod inspect;
pub mod lockspaces;
pub mod resources;
