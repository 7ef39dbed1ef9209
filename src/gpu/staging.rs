//! Aligned CPU staging areas for streaming uploads.

/// Size and offset alignment required for streamed buffer uploads.
pub const STREAMING_ALIGNMENT: u64 = 256;

/// Round `bytes` up to [`STREAMING_ALIGNMENT`].
#[must_use]
pub const fn align_for_streaming(bytes: u64) -> u64 {
    bytes.div_ceil(STREAMING_ALIGNMENT) * STREAMING_ALIGNMENT
}

/// Zero-initialized staging array for `capacity` items of `T`.
///
/// The backing storage is padded so that the aligned size of any prefix up
/// to `capacity` items can be sliced as bytes without going out of bounds.
pub struct StagingArea<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: bytemuck::Pod> StagingArea<T> {
    /// Staging for `capacity` items, padded to the streaming alignment.
    pub fn new(capacity: usize) -> Self {
        let item_size = size_of::<T>().max(1);
        let aligned_bytes = align_for_streaming((capacity * item_size) as u64);
        let padded_len = (aligned_bytes as usize).div_ceil(item_size);
        Self {
            items: vec![T::zeroed(); padded_len],
            capacity,
        }
    }

    /// Number of usable items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The usable items (excludes alignment padding).
    pub fn items(&self) -> &[T] {
        &self.items[..self.capacity]
    }

    /// Mutable view of the usable items.
    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items[..self.capacity]
    }

    /// Aligned upload size for the first `count` items.
    pub fn upload_size(&self, count: usize) -> u64 {
        align_for_streaming((count.min(self.capacity) * size_of::<T>()) as u64)
    }

    /// Bytes covering the aligned size of the first `count` items.
    pub fn upload_bytes(&self, count: usize) -> &[u8] {
        let size = self.upload_size(count) as usize;
        let bytes: &[u8] = bytemuck::cast_slice(&self.items);
        &bytes[..size]
    }
}
