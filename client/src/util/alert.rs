//! Blocking browser alerts for user-facing failures.
//!
//! Requires a browser environment; SSR and host test builds only log the
//! message so server rendering stays side-effect free.

/// Show `message` in a blocking `window.alert`.
pub fn show(message: &str) {
    log::info!("alert: {message}");
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
