//! # sct-cli -- The `sctid` command
//!
//! ## Subcommands
//!
//! - `sctid classify` -- Component type of each identifier.
//! - `sctid check` -- Pass/fail validation, optionally against one type.
//! - `sctid activity` -- Authoring activity for concepts from the
//!   traceability service.
//! - `sctid upload` -- Disk-buffered upload into the object store.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Every identifier accepted, or the operation succeeded |
//! | 1 | At least one identifier rejected |
//! | 2 | Operational failure (configuration, network, I/O) |
//!
//! ```bash
//! sctid classify 138875005 100014 100022
//! sctid check --type concept --explain 138875005 138875006
//! sctid activity --concept 404684003 --type promotion
//! sctid upload --bucket builds --key int/manifest.xml manifest.xml
//! ```

pub mod activity;
pub mod check;
pub mod classify;
pub mod upload;
