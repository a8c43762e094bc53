//! Logging setup for isofield.

/// Initializes the `env_logger` backend for the `log` facade.
///
/// The level is controlled through `RUST_LOG`. Calling this more than once,
/// or after another logger has been installed, is harmless.
///
/// # Example
///
/// ```no_run
/// isofield::init_logging();
/// log::info!("ready");
/// ```
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("isofield logging initialized");
    }
}
