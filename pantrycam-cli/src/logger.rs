use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Module filters match by prefix, so this also covers the `pantrycam_*` crates.
const CRATE_PREFIX: &str = "pantrycam";

pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    // Dependencies stay at warn; RUST_LOG below can still override everything.
    builder.filter_level(LevelFilter::Warn);
    builder.filter_module(CRATE_PREFIX, level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder
        .format(|buf, record| {
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    format!(
                        "[{} {} {}] {}",
                        "pantrycam".cyan(),
                        level_str,
                        record.target().white(),
                        record.args()
                    )
                }
                _ => format!("[{}] {}", "pantrycam".cyan(), record.args()),
            };
            writeln!(buf, "{line}")
        })
        .target(env_logger::Target::Stderr)
        .init();
}
