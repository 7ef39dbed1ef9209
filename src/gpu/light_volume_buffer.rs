//! GPU light volume buffers: per-light infos plus per-volume ranges.
//!
//! Every frame the scene hands over its light volumes; they are packed into
//! two fixed-capacity staging areas and streamed into a pair of rotating
//! storage buffers. Shaders look up a volume's `[begin, end)` range and
//! iterate the infos inside it.
//!
//! Lifecycle mirrors the device: [`LightVolumeBuffer::create`] allocates the
//! GPU buffers, [`LightVolumeBuffer::release`] frees them, and
//! [`LightVolumeBuffer::update_content`] / [`LightVolumeBuffer::bind_srvs`]
//! run once per render pass in between.

use super::staging::StagingArea;
use super::structured_buffer::StructuredBuffer;
use crate::error::LightVolumeError;
use crate::options::{BindingOptions, CapacityOptions, Options};
use crate::pack::{pack_volumes, PackSummary};
use crate::scene::{LightVolumeSource, RenderThread};
use crate::volume::{LightVolume, LightVolumeInfo, LightVolumeRange};

/// Statistics of the most recent update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightVolumeStats {
    /// Packing outcome.
    pub summary: PackSummary,
    /// Bytes streamed into the info buffer.
    pub info_upload_bytes: u64,
    /// Bytes streamed into the range buffer.
    pub range_upload_bytes: u64,
    /// Updates since the buffers were created.
    pub updates: u64,
}

struct GpuBuffers {
    infos: StructuredBuffer<LightVolumeInfo>,
    ranges: StructuredBuffer<LightVolumeRange>,
    /// One per rotation slot; both buffers rotate in lockstep.
    bind_groups: Vec<wgpu::BindGroup>,
}

/// Manager for the light info and light range storage buffers.
pub struct LightVolumeBuffer {
    capacity: CapacityOptions,
    binding: BindingOptions,
    layout: wgpu::BindGroupLayout,
    info_staging: StagingArea<LightVolumeInfo>,
    range_staging: StagingArea<LightVolumeRange>,
    gpu: Option<GpuBuffers>,
    num_volumes: u32,
    stats: LightVolumeStats,
}

impl LightVolumeBuffer {
    /// Build the bind group layout and staging areas. GPU buffers are not
    /// allocated until [`create`](Self::create).
    ///
    /// # Errors
    ///
    /// Returns [`LightVolumeError::InvalidOptions`] if `options` fail
    /// validation or either buffer would exceed the device's storage
    /// binding limits.
    pub fn new(
        device: &wgpu::Device,
        options: &Options,
    ) -> Result<Self, LightVolumeError> {
        options.validate()?;
        check_device_limits(&options.capacity, &device.limits())?;
        let capacity = options.capacity.clone();
        let binding = options.binding.clone();

        let visibility = binding.visibility();
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Light Volume Bind Group Layout"),
                entries: &[
                    read_only_storage(binding.info_binding(), visibility),
                    read_only_storage(binding.range_binding(), visibility),
                ],
            });

        Ok(Self {
            info_staging: StagingArea::new(capacity.max_light_infos as usize),
            range_staging: StagingArea::new(capacity.max_volumes as usize),
            capacity,
            binding,
            layout,
            gpu: None,
            num_volumes: 0,
            stats: LightVolumeStats::default(),
        })
    }

    /// Allocate both rotating buffers with no initial contents.
    ///
    /// Calling this on a created manager releases the old buffers first.
    pub fn create(&mut self, device: &wgpu::Device) {
        if self.gpu.is_some() {
            log::debug!("light volume buffers re-created; releasing old set");
            self.release();
        }

        let depth = self.capacity.rotation_depth as usize;
        let infos = StructuredBuffer::new(
            device,
            "Light Volume Infos",
            self.capacity.max_light_infos as usize,
            depth,
        );
        let ranges = StructuredBuffer::new(
            device,
            "Light Volume Ranges",
            self.capacity.max_volumes as usize,
            depth,
        );

        let bind_groups = (0..depth)
            .filter_map(|slot| {
                let info = infos.buffer(slot)?;
                let range = ranges.buffer(slot)?;
                Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Light Volume Bind Group {slot}")),
                    layout: &self.layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: self.binding.info_binding(),
                            resource: info.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: self.binding.range_binding(),
                            resource: range.as_entire_binding(),
                        },
                    ],
                }))
            })
            .collect();

        log::debug!(
            "light volume buffers created: {} infos, {} volumes, depth {depth} \
             ({} bytes)",
            self.capacity.max_light_infos,
            self.capacity.max_volumes,
            infos.allocated_bytes() + ranges.allocated_bytes()
        );

        self.gpu = Some(GpuBuffers {
            infos,
            ranges,
            bind_groups,
        });
        self.num_volumes = 0;
        self.stats = LightVolumeStats::default();
    }

    /// Free the GPU buffers. Updates and binds are ignored until the next
    /// [`create`](Self::create).
    pub fn release(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.infos.destroy();
            gpu.ranges.destroy();
        }
        self.num_volumes = 0;
    }

    /// Pack `volumes` and stream the used part into the next buffer slot.
    ///
    /// Infos past the info capacity and volumes past the volume capacity are
    /// dropped silently; [`stats`](Self::stats) reports how much.
    pub fn update_content(&mut self, queue: &wgpu::Queue, volumes: &[LightVolume]) {
        let Some(gpu) = self.gpu.as_mut() else {
            log::warn!("light volume update on released buffers ignored");
            return;
        };

        let summary = pack_volumes(
            volumes,
            self.info_staging.items_mut(),
            self.range_staging.items_mut(),
        );

        let range_count = if self.capacity.upload_used_ranges_only {
            summary.volumes
        } else {
            self.range_staging.capacity()
        };
        let info_bytes = self.info_staging.upload_bytes(summary.infos);
        let range_bytes = self.range_staging.upload_bytes(range_count);

        gpu.infos.update_content(queue, info_bytes);
        gpu.ranges.update_content(queue, range_bytes);

        self.num_volumes = summary.volumes as u32;
        self.stats = LightVolumeStats {
            summary,
            info_upload_bytes: info_bytes.len() as u64,
            range_upload_bytes: range_bytes.len() as u64,
            updates: self.stats.updates + 1,
        };
    }

    /// [`update_content`](Self::update_content) with the list `source`
    /// holds for `thread`.
    pub fn update_from_source<S: LightVolumeSource + ?Sized>(
        &mut self,
        queue: &wgpu::Queue,
        source: &S,
        thread: RenderThread,
    ) {
        self.update_content(queue, source.light_volumes(thread));
    }

    /// Set the current slot's buffers on a render pass at the configured
    /// group. Returns `false` when the buffers are released.
    pub fn bind_srvs(&self, pass: &mut wgpu::RenderPass<'_>) -> bool {
        let Some(bind_group) = self.bind_group() else {
            log::warn!("light volume bind on released buffers ignored");
            return false;
        };
        pass.set_bind_group(self.binding.group, bind_group, &[]);
        true
    }

    /// [`bind_srvs`](Self::bind_srvs) for compute passes.
    pub fn bind_srvs_compute(&self, pass: &mut wgpu::ComputePass<'_>) -> bool {
        let Some(bind_group) = self.bind_group() else {
            log::warn!("light volume bind on released buffers ignored");
            return false;
        };
        pass.set_bind_group(self.binding.group, bind_group, &[]);
        true
    }

    /// Bind group of the slot written by the most recent update.
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        let gpu = self.gpu.as_ref()?;
        gpu.bind_groups.get(gpu.infos.current_slot())
    }

    /// Layout shared by every slot's bind group.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Whether GPU buffers are allocated.
    pub fn is_created(&self) -> bool {
        self.gpu.is_some()
    }

    /// Volumes packed by the most recent update.
    pub fn num_volumes(&self) -> u32 {
        self.num_volumes
    }

    /// Rotation slot written by the most recent update.
    pub fn current_slot(&self) -> Option<usize> {
        self.gpu.as_ref().map(|gpu| gpu.infos.current_slot())
    }

    /// Statistics of the most recent update.
    pub fn stats(&self) -> LightVolumeStats {
        self.stats
    }

    /// Binding configuration.
    pub fn binding(&self) -> &BindingOptions {
        &self.binding
    }

    /// Capacity configuration.
    pub fn capacity(&self) -> &CapacityOptions {
        &self.capacity
    }

    /// The current slot's info buffer.
    pub fn current_info_buffer(&self) -> Option<&wgpu::Buffer> {
        self.gpu.as_ref().map(|gpu| gpu.infos.current())
    }

    /// The current slot's range buffer.
    pub fn current_range_buffer(&self) -> Option<&wgpu::Buffer> {
        self.gpu.as_ref().map(|gpu| gpu.ranges.current())
    }

    /// GPU memory held across all slots, in bytes.
    pub fn memory_bytes(&self) -> u64 {
        self.gpu.as_ref().map_or(0, |gpu| {
            gpu.infos.allocated_bytes() + gpu.ranges.allocated_bytes()
        })
    }

    /// GPU buffer sizes: `(label, used_bytes, allocated_bytes)`.
    pub fn buffer_info(&self) -> Vec<(&'static str, usize, usize)> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Vec::new();
        };
        vec![
            (
                "Light Volume Infos",
                gpu.infos.len() as usize,
                gpu.infos.allocated_bytes() as usize,
            ),
            (
                "Light Volume Ranges",
                gpu.ranges.len() as usize,
                gpu.ranges.allocated_bytes() as usize,
            ),
        ]
    }
}

/// Reject capacities whose per-slot buffers the device cannot bind.
fn check_device_limits(
    capacity: &CapacityOptions,
    limits: &wgpu::Limits,
) -> Result<(), LightVolumeError> {
    let max = u64::from(limits.max_storage_buffer_binding_size)
        .min(limits.max_buffer_size);
    let sizes = [
        (
            "capacity.max_light_infos",
            StructuredBuffer::<LightVolumeInfo>::allocation_size(
                capacity.max_light_infos as usize,
            ),
        ),
        (
            "capacity.max_volumes",
            StructuredBuffer::<LightVolumeRange>::allocation_size(
                capacity.max_volumes as usize,
            ),
        ),
    ];
    for (field, size) in sizes {
        if size > max {
            return Err(LightVolumeError::InvalidOptions(format!(
                "{field} needs {size} bytes per buffer; device binds at most \
                 {max}"
            )));
        }
    }
    Ok(())
}

fn read_only_storage(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
