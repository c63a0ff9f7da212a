/// Dynamic uniform buffer holding one [`PassUniform`] per jitter pass.
///
/// All passes are recorded into the same command encoder before anything is
/// submitted, so a single uniform rewritten between draws would only ever
/// show its last value.  Instead every pass gets its own slot and the
/// accumulation pass binds the buffer once, switching only the offset:
///
/// ```text
/// rpass.set_bind_group(0, &uniforms.bind_group, &[uniforms.offset(i)]);
/// ```
///
/// ## Alignment
///
/// Each slot is `align_up(64, min_uniform_buffer_offset_alignment)` bytes
/// (256 on most desktop GPUs) even though only 64 are read.
use std::sync::Arc;

use crate::jitter::PassUniform;

const SLOT_SIZE: u64 = std::mem::size_of::<PassUniform>() as u64;

pub struct PassUniformBuffer {
    pub buffer: wgpu::Buffer,
    /// Bind group covering one slot; the slot is chosen by dynamic offset.
    pub bind_group: Arc<wgpu::BindGroup>,
    /// Byte stride between consecutive slots.
    pub stride: u32,
    capacity: usize,
}

impl PassUniformBuffer {
    /// `layout` must be the pass-uniform layout (`has_dynamic_offset: true`).
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let stride = align_up(SLOT_SIZE as u32, alignment);
        let capacity = capacity.max(1);
        let buffer = Self::create_buffer(device, capacity, stride);
        let bind_group = Self::create_bind_group(device, layout, &buffer);

        Self {
            buffer,
            bind_group: Arc::new(bind_group),
            stride,
            capacity,
        }
    }

    #[inline]
    pub fn offset(&self, index: usize) -> u32 {
        (index as u32).wrapping_mul(self.stride)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `uniform` into slot `index`.
    #[inline]
    pub fn write(&self, queue: &wgpu::Queue, index: usize, uniform: &PassUniform) {
        debug_assert!(index < self.capacity, "pass uniform slot out of range");
        queue.write_buffer(
            &self.buffer,
            self.offset(index) as u64,
            bytemuck::bytes_of(uniform),
        );
    }

    /// Grows the buffer to hold at least `needed` slots.  The bind group is
    /// recreated when that happens.
    pub fn ensure_capacity(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        needed: usize,
    ) {
        if needed <= self.capacity {
            return;
        }
        let mut new_cap = self.capacity;
        while new_cap < needed {
            new_cap *= 2;
        }
        self.buffer = Self::create_buffer(device, new_cap, self.stride);
        self.bind_group = Arc::new(Self::create_bind_group(device, layout, &self.buffer));
        self.capacity = new_cap;
    }

    fn create_buffer(device: &wgpu::Device, capacity: usize, stride: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Jitter Pass Uniforms"),
            size: capacity as u64 * stride as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Jitter Pass Uniforms BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(SLOT_SIZE),
                }),
            }],
        })
    }
}

/// Round `value` up to the next multiple of `alignment` (a power of two).
#[inline]
fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}
