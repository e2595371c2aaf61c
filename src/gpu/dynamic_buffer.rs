//! Dynamic GPU buffer management with automatic resizing
//!
//! Provides buffers that grow automatically when data exceeds capacity,
//! using a 2x growth strategy to minimize reallocations.

use std::marker::PhantomData;

/// Smallest buffer ever allocated, in bytes.
const MIN_CAPACITY: usize = 64;

/// New byte capacity when `needed` exceeds `capacity`: double the need,
/// growing by at least 1KB. `None` when the data already fits.
#[must_use]
pub fn grown_capacity(needed: usize, capacity: usize) -> Option<usize> {
    (needed > capacity).then(|| (needed * 2).max(capacity + 1024))
}

/// A typed GPU buffer that can grow dynamically.
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize, // Capacity in bytes
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = (size_of::<T>() * capacity).max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write data to buffer, growing if necessary
    ///
    /// Returns `true` if buffer was reallocated (bind groups need recreation)
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let grown = grown_capacity(bytes.len(), self.capacity);
        if let Some(capacity) = grown {
            log::debug!(
                "{}: growing {} -> {capacity} bytes",
                self.label,
                self.capacity
            );
            self.buffer =
                Self::allocate(device, &self.label, capacity, self.usage);
            self.capacity = capacity;
        }

        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();

        grown.is_some()
    }

    /// The underlying `wgpu::Buffer`.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last [`write`](Self::write).
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_policy() {
        assert_eq!(grown_capacity(100, 128), None);
        assert_eq!(grown_capacity(128, 128), None);
        assert_eq!(grown_capacity(129, 128), Some(1152));
        assert_eq!(grown_capacity(10_000, 2048), Some(20_000));
    }
}
