use bmp_console::{Bmp, BmpError, Glyphs};
use clap::Parser;
use log::info;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Draw a black and white bitmap on the console
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// A path to a 24 or 32 bit bmp file with only black and white pixels
    path: PathBuf,

    /// Draw white pixels as `##` instead of block characters
    #[arg(long)]
    ascii: bool,
}

fn run(args: &Args) -> Result<(), BmpError> {
    let bmp = Bmp::open(&args.path)?;
    info!(
        "{} is {}x{}",
        args.path.display(),
        bmp.width(),
        bmp.height()
    );

    let glyphs = if args.ascii {
        Glyphs::ASCII
    } else {
        Glyphs::BLOCK
    };
    let stdout = io::stdout();
    bmp.render(glyphs, BufWriter::new(stdout.lock()))?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
