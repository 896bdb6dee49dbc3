//! The `covenant` binary: a thin shell around [`cli::run`].
//!
//! Everything the binary does beyond argument parsing and printing lives in the
//! library (`covenant::api` and below), so the same operations are available to
//! other clients without going through a terminal.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
