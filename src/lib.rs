pub mod config;
pub mod error;
pub mod lifecycle;
pub mod permissions;

#[cfg(target_os = "android")]
pub mod android;

pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use lifecycle::{ActivityCallbacks, ActivityHost, LifecycleLogger, QuitSlot};
pub use permissions::{Permission, PermissionBootstrapper, PermissionGate, PermissionHost};

// Android native activity entry point. Exported when building the cdylib for APK.
#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
fn android_main(app: android_activity::AndroidApp) {
    let config = ShellConfig::from_features();
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(config.log_level)
            .with_tag(config.log_tag),
    );
    android::run(app, &config);
}

/// Called from native code to finish the activity and remove its task.
#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
pub extern "C" fn xr_native_shell_finish() {
    if let Err(e) = android::request_native_finish() {
        log::warn!("native finish ignored: {e}");
    }
}
