pub mod io;
pub mod util;

pub use io::CatError;
pub use io::copy::copy_all;
pub use io::policy::TransferPolicy;
pub use util::buffer::AlignedBuf;
