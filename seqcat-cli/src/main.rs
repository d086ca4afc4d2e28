use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use seqcat::io::policy::{self, TransferPolicy};
use seqcat::io::{CatError, copy::copy_all};
use seqcat::util::{buffer::AlignedBuf, close_file};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// input file to copy to stdout
    pub in_path: PathBuf,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = std::fs::File::open(&cli.in_path)
        .with_context(|| format!("error opening input file {}", cli.in_path.display()))?;

    policy::advise_sequential(&file);
    let policy = TransferPolicy::for_file(&file);

    let mut buf = match AlignedBuf::new(policy.chunk_size, policy.alignment) {
        Ok(buf) => buf,
        Err(e) => {
            // no buffer means no copy, but the input still gets closed
            if let Err(close_err) = close_file(file) {
                eprintln!("seqcat: {}", CatError::Close(close_err));
            }
            return Err(CatError::from(e).into());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let copied = copy_all(&mut &file, &mut out, &mut buf)
        .and_then(|total| out.flush().map_err(CatError::Write).map(|_| total));

    // the first failure determines the outcome; a close failure after a
    // failed copy is only reported
    match close_file(file) {
        Ok(()) => {}
        Err(e) if copied.is_ok() => return Err(CatError::Close(e).into()),
        Err(e) => eprintln!("seqcat: {}", CatError::Close(e)),
    }
    copied?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("seqcat: {:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
