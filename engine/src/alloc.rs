//! Allocation accounting used for the memory axis.
//!
//! The binary installs [`TrackingAllocator`] as its global allocator; the
//! counters are process wide, so anything allocating on another thread during
//! a measurement window shows up as noise. When the allocator is not installed
//! (library tests, embedding) every sample reads zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: delegating to the system allocator with the same layout
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            let current = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
            PEAK_ALLOCATED.fetch_max(current, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
        // SAFETY: delegating to the system allocator with the same ptr and layout
        unsafe { System.dealloc(ptr, layout) }
    }
}

pub fn allocated_bytes() -> usize {
    ALLOCATED.load(Ordering::Relaxed)
}

pub fn peak_bytes() -> usize {
    PEAK_ALLOCATED.load(Ordering::Relaxed)
}

/// High-water delta of a measurement window, clamped at zero.
pub fn clamp_delta(start: usize, peak: usize) -> u64 {
    peak.saturating_sub(start) as u64
}

pub trait MemoryProbe {
    /// Opens a measurement window and returns the mark it is relative to.
    fn start(&self) -> usize;
    /// Bytes allocated above `mark` at the window's high-water point.
    fn peak_since(&self, mark: usize) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllocatorProbe;

impl MemoryProbe for AllocatorProbe {
    fn start(&self) -> usize {
        let current = allocated_bytes();
        PEAK_ALLOCATED.store(current, Ordering::Relaxed);
        current
    }

    fn peak_since(&self, mark: usize) -> u64 {
        clamp_delta(mark, peak_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_deltas_clamp_to_zero() {
        assert_eq!(clamp_delta(100, 40), 0);
        assert_eq!(clamp_delta(100, 100), 0);
        assert_eq!(clamp_delta(100, 164), 64);
    }

    #[test]
    fn tracking_allocator_records_high_water_mark() {
        let layout = Layout::from_size_align(4096, 8).unwrap();
        let probe = AllocatorProbe;
        let mark = probe.start();
        let ptr = unsafe { TrackingAllocator.alloc(layout) };
        assert!(!ptr.is_null());
        // a concurrent start() lowers the peak only to the live total, which still holds this block
        let peak = probe.peak_since(mark);
        unsafe { TrackingAllocator.dealloc(ptr, layout) };

        assert!(peak >= 4096);
        assert_eq!(clamp_delta(mark, allocated_bytes()), 0);
    }
}
