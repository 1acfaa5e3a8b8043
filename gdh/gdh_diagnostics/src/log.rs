use ::log::LevelFilter;
use std::io::Write;

/// Installs the process-wide logger.
/// `RUST_LOG` wins over `verbose` when it is set.
/// Calling this more than once is harmless: later calls are ignored.
pub fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(default_level(verbose))
        // The tags already carry the severity, so we don't print it twice.
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .parse_default_env();

    let _ = builder.try_init();
}

pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    }
}
