use env_logger::{Builder, Env};

/// Installs env_logger. `RUST_LOG` takes precedence over `verbosity`
/// (0 = info, 1 = debug, 2+ = trace for this crate).
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let default = format!("{},hyper=warn,reqwest=warn", level);
    let mut builder = Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp_secs().format_module_path(false);
    // A logger may already be installed when embedded in another binary.
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
