//! Fixed-capacity structured GPU buffers with multi-buffered rotation
//!
//! Each update writes to the next buffer in the rotation, so a frame the
//! GPU may still be reading is never overwritten. Capacity is fixed at
//! creation; writes past it are clamped.

use std::marker::PhantomData;

use super::staging::{align_for_streaming, STREAMING_ALIGNMENT};

/// Rotating set of read-only storage buffers holding up to `capacity` items.
pub struct StructuredBuffer<T> {
    buffers: Vec<wgpu::Buffer>,
    slot: usize,
    capacity: usize,
    size: u64,
    len: u64, // bytes written by the last update
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> StructuredBuffer<T> {
    /// Allocate `depth` buffers of `capacity` items each, with no contents.
    ///
    /// The allocation size is rounded up to the streaming alignment.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        depth: usize,
    ) -> Self {
        let size = Self::allocation_size(capacity);
        let depth = depth.max(1);

        let buffers = (0..depth)
            .map(|i| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("{label} {i}")),
                    size,
                    usage: wgpu::BufferUsages::STORAGE
                        | wgpu::BufferUsages::COPY_DST
                        | wgpu::BufferUsages::COPY_SRC,
                    mapped_at_creation: false,
                })
            })
            .collect();

        Self {
            buffers,
            // First update lands in slot 0.
            slot: depth - 1,
            capacity,
            size,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Bytes allocated per slot for `capacity` items.
    pub fn allocation_size(capacity: usize) -> u64 {
        align_for_streaming((capacity * size_of::<T>()) as u64)
            .max(STREAMING_ALIGNMENT)
    }

    /// Advance to the next buffer and write `data` at offset 0.
    ///
    /// Bytes past the allocation are dropped. Empty uploads still advance,
    /// so buffers updated together stay on the same slot.
    pub fn update_content(&mut self, queue: &wgpu::Queue, data: &[u8]) {
        self.slot = (self.slot + 1) % self.buffers.len();

        let len = (data.len() as u64).min(self.size);
        if len > 0 {
            queue.write_buffer(
                &self.buffers[self.slot],
                0,
                &data[..len as usize],
            );
        }
        self.len = len;
    }

    /// Free every buffer in the rotation.
    pub fn destroy(&self) {
        for buffer in &self.buffers {
            buffer.destroy();
        }
    }

    /// Buffer written by the most recent update.
    pub fn current(&self) -> &wgpu::Buffer {
        &self.buffers[self.slot]
    }

    /// Buffer at a given rotation slot.
    pub fn buffer(&self, slot: usize) -> Option<&wgpu::Buffer> {
        self.buffers.get(slot)
    }

    /// Slot written by the most recent update.
    pub fn current_slot(&self) -> usize {
        self.slot
    }

    /// Number of buffers in the rotation.
    pub fn depth(&self) -> usize {
        self.buffers.len()
    }

    /// Capacity in items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes uploaded by the most recent update.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the most recent update uploaded nothing.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes per buffer.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Allocated bytes across the whole rotation.
    pub fn allocated_bytes(&self) -> u64 {
        self.size * self.buffers.len() as u64
    }
}
