// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Per-frame light volume staging for wgpu renderers.
//!
//! A scene describes dynamic lighting as a list of *light volumes*, each a
//! variable-length list of lights affecting one region. This crate packs
//! that list into two fixed-capacity GPU storage buffers (one flat array of
//! light records, one `[begin, end)` range per volume) and binds them for
//! shader reads.
//!
//! # Key entry points
//!
//! - [`gpu::light_volume_buffer::LightVolumeBuffer`] - create / release /
//!   update / bind lifecycle of the buffer pair
//! - [`pack::pack_volumes`] - the capacity-bounded flattening step
//! - [`scene`] - light volume sources, per-thread lists, the cross-thread
//!   feed, and light-to-volume assignment
//! - [`options::Options`] - capacities and binding slots, loadable from TOML
//!
//! # Architecture
//!
//! Each update packs into aligned CPU staging, then streams only the used
//! prefix into the next of four rotating GPU buffers (regular and
//! recursive pass, two frames in flight), so the GPU never reads a buffer
//! being written. Overflow is truncated, never reported as an error.

pub mod error;
pub mod gpu;
pub mod options;
pub mod pack;
pub mod scene;
pub mod volume;

pub use error::LightVolumeError;
pub use gpu::light_volume_buffer::{LightVolumeBuffer, LightVolumeStats};
pub use options::Options;
pub use volume::{LightData, LightVolume, LightVolumeInfo, LightVolumeRange};
