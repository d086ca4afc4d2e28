use std::io::{ErrorKind, Read, Write};

use crate::io::CatError;
use crate::util::buffer::AlignedBuf;

/// Copy every byte of `input` to `output` through `buf`, whose length is
/// the transfer chunk size. Returns the total number of bytes forwarded.
///
/// A read of zero bytes is clean end-of-input. Reads and writes aborted
/// by a signal are retried with the same arguments; short writes advance
/// a cursor and retry the unwritten tail, so the loop never moves to the
/// next read before the previous chunk is fully flushed.
pub fn copy_all<R, W>(input: &mut R, output: &mut W, buf: &mut AlignedBuf) -> Result<u64, CatError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total = 0_u64;
    loop {
        let n_read = match input.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CatError::Read(e)),
        };

        let mut n_written = 0;
        while n_written < n_read {
            match output.write(&buf[n_written..n_read]) {
                Ok(0) => {
                    return Err(CatError::Write(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "output accepted zero bytes",
                    )));
                }
                Ok(n) => n_written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CatError::Write(e)),
            }
        }
        total += n_read as u64;
    }
    Ok(total)
}
