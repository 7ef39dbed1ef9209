//! GPU resource management for light volumes.
//!
//! Provides device acquisition, aligned staging, rotating structured
//! buffers, the light volume buffer manager, and the matching WGSL.

/// Light info and light range buffers with create/update/bind lifecycle.
pub mod light_volume_buffer;
/// wgpu device and queue initialization.
pub mod render_context;
/// WGSL declarations matching the GPU record layouts.
pub mod shader;
/// Aligned CPU staging areas and the streaming alignment rule.
pub mod staging;
/// Fixed-capacity storage buffers rotated per update.
pub mod structured_buffer;

#[cfg(test)]
pub(crate) mod test_support;
