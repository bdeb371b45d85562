#![deny(unsafe_code)]
//! Export pipeline for the camo-engine: still PNG snapshots and animated
//! GIF sequence export with per-frame progress.
//!
//! This crate owns everything that turns an evaluated [`ImageSurface`]
//! (from `camo-core`) into bytes. It performs no filesystem or network
//! side effects beyond the explicit `write_*` helpers; the primary API
//! hands back encoded byte streams and lets the caller decide where they
//! go.
//!
//! [`ImageSurface`]: camo_core::ImageSurface

pub mod sequence;
pub mod snapshot;

pub use sequence::{CancelFlag, ExportSettings, ExportSlot, ExportStep, SequenceExport};
pub use snapshot::{encode_png, write_png};
