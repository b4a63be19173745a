//! Shared plumbing for the scour workspace.
//!
//! Currently this is just [`observability`], the centralised `tracing`
//! initialisation used by the binary and by integration tests. The crate is kept
//! dependency-light so every other crate can pull it in without cost.

pub mod observability;
