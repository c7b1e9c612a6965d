use std::fs;

use clap::Parser;
use kpl::get_result;
use tracing_subscriber::EnvFilter;

/// kpl runs programs written in KPL, a small typed scripting language with
/// Khasi keywords.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells kpl to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode is a feature that automatically prints out the value of a
    /// program: its first top-level `=>`, else its last expression.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Log level used when `RUST_LOG` is not set (e.g. `debug`, `trace`).
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = get_result(&script, args.pipe_mode) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
