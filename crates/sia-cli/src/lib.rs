//! # sia-cli: Spend Policy Command-Line Interface
//!
//! ## Subcommands
//!
//! - `parse`: Parse a policy and print its canonical text form
//! - `address`: Derive a policy's address
//! - `encode`: Print a policy's canonical binary encoding as hex
//! - `decode`: Decode hex-encoded canonical bytes back to a policy
//! - `standard-address`: Address of the single-key policy `pk(<key>)`
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here return the rendered
//!   output so they can be tested without a process.
//! - Handlers delegate to `sia-policy`; no policy logic lives here.

pub mod config;
pub mod policy;
