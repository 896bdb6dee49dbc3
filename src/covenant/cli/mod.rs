//! # CLI Layer
//!
//! One client of the covenant library. This is the only place that:
//! - Parses shell arguments (clap)
//! - Writes to stdout/stderr
//! - Installs the tracing subscriber
//! - Calls `std::process::exit`
//!
//! ## Structure
//!
//! - `setup`: the clap definition, grouped help, field and format flags
//! - `commands`: `run()` and one `handle_*` per subcommand
//! - `print`: turns `CmdResult` pieces into terminal output
//!
//! Business rules (gating, fallbacks, history limits) belong to the command layer;
//! tests here cover parsing and formatting only.

mod commands;
mod print;
mod setup;

pub use commands::run;
