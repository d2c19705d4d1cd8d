//! Typed GPU buffers that are rewritten every frame and grow on demand.

use std::marker::PhantomData;

/// Items to reserve beyond a write that outgrew the buffer.
const GROWTH_HEADROOM: usize = 16;

/// Item capacity after a write of `needed` items overflowed `current`.
fn grown_capacity(needed: usize, current: usize) -> usize {
    needed.max(current * 2) + GROWTH_HEADROOM
}

/// Vertex or instance data of type `T`, replaced wholesale by each
/// [`write`](Self::write).
///
/// The buffer is reallocated when a write does not fit and never shrinks.
pub struct DynamicBuffer<T> {
    buffer: wgpu::Buffer,
    label: String,
    usage: wgpu::BufferUsages,
    capacity: usize,
    count: usize,
    _items: PhantomData<T>,
}

impl<T: bytemuck::Pod> DynamicBuffer<T> {
    /// Buffer with room for `capacity` items (at least one).
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: allocate::<T>(device, label, capacity, usage),
            label: label.to_owned(),
            usage,
            capacity,
            count: 0,
            _items: PhantomData,
        }
    }

    /// Replace the contents with `items`. Returns `true` if the GPU buffer
    /// was reallocated.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) -> bool {
        let grew = items.len() > self.capacity;
        if grew {
            let capacity = grown_capacity(items.len(), self.capacity);
            self.buffer = allocate::<T>(device, &self.label, capacity, self.usage);
            log::debug!("{}: {} -> {capacity} items", self.label, self.capacity);
            self.capacity = capacity;
        }
        if !items.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        }
        self.count = items.len();
        grew
    }

    /// The GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items from the last write.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Items that fit without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn allocate<T>(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity * size_of::<T>()) as wgpu::BufferAddress,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_at_least_doubles() {
        assert_eq!(grown_capacity(20, 16), 48);
    }

    #[test]
    fn large_overflow_fits_the_write() {
        assert_eq!(grown_capacity(1500, 16), 1516);
    }
}
