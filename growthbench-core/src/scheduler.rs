//! Chunked Scheduler
//!
//! Splits `[0, count)` into ascending, contiguous batches of at most
//! `chunk_size` indices. The harness runs each batch concurrently and drains
//! it completely before pulling the next one, which bounds the number of
//! in-flight invocations to the chunk size.

use std::ops::Range;

/// Lazy sequence of index batches covering `[0, count)` exactly once
#[derive(Debug, Clone)]
pub struct ChunkSchedule {
    count: usize,
    chunk_size: usize,
    next: usize,
}

impl ChunkSchedule {
    /// Create a schedule. A chunk size of zero is treated as one.
    pub fn new(count: usize, chunk_size: usize) -> Self {
        Self {
            count,
            chunk_size: chunk_size.max(1),
            next: 0,
        }
    }

    /// Total number of batches this schedule yields from the start
    pub fn chunk_count(&self) -> usize {
        self.count.div_ceil(self.chunk_size)
    }
}

impl Iterator for ChunkSchedule {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let start = self.next;
        let end = (start + self.chunk_size).min(self.count);
        self.next = end;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next).div_ceil(self.chunk_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkSchedule {}
