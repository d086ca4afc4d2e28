use std::collections::TryReserveError;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::util::page_size;

#[derive(Debug, Error)]
pub enum AllocError {
    #[error("cannot allocate {size} bytes aligned to {align}: {source}")]
    Exhausted {
        size: usize,
        align: usize,
        source: TryReserveError,
    },
    #[error("allocation size {size} overflows with alignment {align}")]
    Overflow { size: usize, align: usize },
}

/// A buffer of exactly `size` usable bytes whose start address is a
/// multiple of `alignment`.
///
/// The raw over-allocation (`size + alignment - 1` bytes) stays owned by
/// the struct and the usable window is carved out at the first aligned
/// offset, so dropping the struct releases the whole region exactly once
/// no matter which path the caller exits through.
#[derive(Debug)]
pub struct AlignedBuf {
    raw: Vec<u8>,
    offset: usize,
    len: usize,
}

impl AlignedBuf {
    /// Allocate `size` usable bytes aligned to `alignment`.
    ///
    /// An alignment of 0 is treated as 1. A non-power-of-two alignment is
    /// coerced to the system page size (which itself falls back to 4096),
    /// with a warning. Allocation failure is reported as a value, not a
    /// panic.
    pub fn new(size: usize, alignment: usize) -> Result<Self, AllocError> {
        let align = Self::coerce_alignment(alignment);

        let total = size
            .checked_add(align - 1)
            .ok_or(AllocError::Overflow { size, align })?;
        let mut raw = Vec::new();
        raw.try_reserve_exact(total)
            .map_err(|source| AllocError::Exhausted {
                size,
                align,
                source,
            })?;
        raw.resize(total, 0);

        let offset = raw.as_ptr().align_offset(align);
        if offset >= align {
            // align_offset reports usize::MAX when alignment is impossible
            return Err(AllocError::Overflow { size, align });
        }
        Ok(Self {
            raw,
            offset,
            len: size,
        })
    }

    fn coerce_alignment(alignment: usize) -> usize {
        if alignment == 0 {
            return 1;
        }
        if !alignment.is_power_of_two() {
            let ps = page_size();
            eprintln!(
                "warning: alignment {} is not a power of two, using page size {}",
                alignment, ps
            );
            return ps;
        }
        alignment
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for AlignedBuf {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.raw[self.offset..self.offset + self.len]
    }
}

impl DerefMut for AlignedBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.raw[self.offset..self.offset + self.len]
    }
}

#[cfg(test)]
mod test {
    use super::AlignedBuf;

    #[test]
    fn test_alignment_grid() {
        for align in [1_usize, 4096, 65536] {
            for size in [1_usize, 4095, 4096, 1_000_000] {
                let buf = AlignedBuf::new(size, align).unwrap();
                assert_eq!(buf.as_ptr() as usize % align, 0, "align:{align}, size:{size}");
                assert_eq!(buf.len(), size);
            }
        }
    }

    #[test]
    fn test_zero_alignment_is_treated_as_one() {
        let buf = AlignedBuf::new(128, 0).unwrap();
        assert_eq!(buf.len(), 128);
    }

    #[test]
    fn test_non_power_of_two_alignment_is_coerced() {
        let buf = AlignedBuf::new(4096, 3000).unwrap();
        // coerced to the page size, which is a power of two
        assert_eq!(buf.as_ptr() as usize % crate::util::page_size(), 0);
        assert_eq!(buf.len(), 4096);
    }

    #[test]
    fn test_repeated_alloc_release_cycles() {
        for _ in 0..10_000 {
            let mut buf = AlignedBuf::new(65536, 4096).unwrap();
            buf[0] = 0xAB;
            buf[65535] = 0xCD;
            assert_eq!(buf[0], 0xAB);
        }
    }

    #[test]
    fn test_buffer_is_writable_across_full_window() {
        let mut buf = AlignedBuf::new(4096, 4096).unwrap();
        buf.fill(0x5A);
        assert!(buf.iter().all(|&b| b == 0x5A));
    }
}
