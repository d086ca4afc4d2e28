use std::fs;
use std::os::fd::AsRawFd;
use std::os::unix::fs::MetadataExt;

use crate::util::page_size;

/// Baseline transfer size, chosen experimentally. Only a filesystem that
/// reports a larger power-of-two preferred block size overrides it.
pub const OPTIMAL_CHUNK_SIZE: usize = 256 * 1024;

/// Transfer sizing for one run: how many bytes to move per read/write
/// cycle and the boundary the buffer must be aligned to. Computed once,
/// never revised mid-copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPolicy {
    pub chunk_size: usize,
    pub alignment: usize,
}

impl TransferPolicy {
    /// Derive the policy for an already-open input file. Never fails:
    /// page-size and metadata query failures degrade to documented
    /// fallbacks with a stderr warning.
    pub fn for_file(file: &fs::File) -> Self {
        let alignment = page_size();
        let fs_blk_size = match file.metadata() {
            Ok(meta) => meta.blksize(),
            Err(e) => {
                eprintln!("warning: failed to query input file metadata: {}", e);
                0
            }
        };
        Self {
            chunk_size: choose_chunk_size(fs_blk_size),
            alignment,
        }
    }
}

fn choose_chunk_size(fs_blk_size: u64) -> usize {
    // The filesystem's preference only wins when it is a power of two
    // strictly larger than the baseline; anything else is treated as
    // absent.
    if fs_blk_size > 0 && fs_blk_size.is_power_of_two() {
        let fs_blk_size = fs_blk_size as usize;
        if fs_blk_size > OPTIMAL_CHUNK_SIZE {
            return fs_blk_size;
        }
    }
    OPTIMAL_CHUNK_SIZE
}

/// Tell the kernel the file will be read front-to-back so it can prefetch
/// more aggressively. Best effort: failure costs nothing but the hint.
pub fn advise_sequential(file: &fs::File) {
    let ret = unsafe {
        libc::posix_fadvise(file.as_raw_fd(), 0, 0, libc::POSIX_FADV_SEQUENTIAL)
    };
    if ret != 0 {
        eprintln!(
            "warning: posix_fadvise(SEQUENTIAL) failed: {}",
            std::io::Error::from_raw_os_error(ret)
        );
    }
}
