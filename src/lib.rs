//! geoform-rs
//! ==========
//!
//! Workspace crate for `geoform-core`; hosts the runnable demos under
//! `demos/` and re-exports the core API so the examples (and quick
//! experiments) can depend on a single crate.
//!
//! For the actual library, see the [`geoform_core`] crate in
//! `crates/geoform-core`.

pub use geoform_core::*;
