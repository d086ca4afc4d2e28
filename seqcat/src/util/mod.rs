pub mod buffer;

use std::fs;
use std::os::fd::IntoRawFd;

pub const FALLBACK_PAGE_SIZE: usize = 4096;

/// Memory page size of the running system. Falls back to 4096 when the
/// sysconf query fails or reports a non-power-of-two, so the result is
/// always usable as a buffer alignment.
pub fn page_size() -> usize {
    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if raw <= 0 {
        eprintln!(
            "warning: sysconf(_SC_PAGESIZE) failed, assuming {}",
            FALLBACK_PAGE_SIZE
        );
        return FALLBACK_PAGE_SIZE;
    }
    let raw = raw as usize;
    if !raw.is_power_of_two() {
        eprintln!(
            "warning: invalid page size {} for alignment, using {}",
            raw, FALLBACK_PAGE_SIZE
        );
        return FALLBACK_PAGE_SIZE;
    }
    raw
}

/// Close `file` and surface the close result. Dropping a `File` swallows
/// the error from close(2), so take the fd and close it ourselves.
pub fn close_file(file: fs::File) -> std::io::Result<()> {
    let fd = file.into_raw_fd();
    if unsafe { libc::close(fd) } == -1 {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use tempfile::NamedTempFile;

    #[test]
    fn test_page_size_is_power_of_two() {
        let ps = super::page_size();
        assert!(ps > 0);
        assert!(ps.is_power_of_two());
    }

    #[test]
    fn test_close_file() {
        let named_file = NamedTempFile::new().unwrap();
        let file = std::fs::File::open(named_file.path()).unwrap();
        super::close_file(file).unwrap();
    }
}
