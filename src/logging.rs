use std::sync::Once;

const DEFAULT_FILTER: &str = "suivi=debug,suivi_ndef=debug,info";

static INIT: Once = Once::new();

/// Platform native logging, safe to call more than once
///
/// - Android: paranoid-android → logcat
/// - everything else: tracing-subscriber fmt → stderr, filtered by `RUST_LOG`
pub fn init() {
    INIT.call_once(|| {
        #[cfg(target_os = "android")]
        {
            use tracing_subscriber::prelude::*;

            let android_layer = paranoid_android::layer("suivi")
                .with_filter(tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

            let _ = tracing_subscriber::registry().with(android_layer).try_init();
        }

        #[cfg(not(target_os = "android"))]
        {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| DEFAULT_FILTER.into()),
                )
                .try_init();
        }
    });
}

#[uniffi::export]
fn init_logging() {
    init();
}
