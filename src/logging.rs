//! Logger installation for the player's host binaries.

/// Installs the platform logger once. Later calls are no-ops.
///
/// Native targets use `env_logger` (filtered by `RUST_LOG`, default
/// `info`); wasm32 logs to the browser console and routes panics there.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A logger installed by the host (or an earlier call) wins.
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Console logger already installed");
    }
}
