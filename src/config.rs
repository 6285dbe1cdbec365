//! Per-shell configuration.
//!
//! A [`ShellConfig`] is built once when the native library is loaded and
//! never mutated afterwards. Which sample flavour is built is a compile-time
//! choice made with the `scene-model` cargo feature.

use log::LevelFilter;

use crate::lifecycle::{ActivityCallbacks, LifecycleLogger};
use crate::permissions::{PermissionBootstrapper, PermissionGate, PermissionHost};

pub const DEFAULT_LOG_TAG: &str = "XrSamples";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub log_tag: &'static str,
    pub activity_name: &'static str,
    pub log_level: LevelFilter,
    /// Emit `<activity>.onCreate()/onDestroy() called` trace lines.
    pub trace_lifecycle: bool,
    pub permissions: Option<PermissionBootstrapper>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::body_face_eye_social()
    }
}

impl ShellConfig {
    /// Body/face/eye social sample: requests eye, face and microphone access.
    pub fn body_face_eye_social() -> Self {
        Self {
            log_tag: DEFAULT_LOG_TAG,
            activity_name: "MainActivity",
            log_level: LevelFilter::Debug,
            trace_lifecycle: false,
            permissions: Some(PermissionBootstrapper::default()),
        }
    }

    /// Scene model sample: lifecycle tracing only.
    pub fn scene_model() -> Self {
        Self {
            log_tag: DEFAULT_LOG_TAG,
            activity_name: "MainNativeActivity",
            log_level: LevelFilter::Debug,
            trace_lifecycle: true,
            permissions: None,
        }
    }

    pub fn from_features() -> Self {
        if cfg!(feature = "scene-model") {
            Self::scene_model()
        } else {
            Self::body_face_eye_social()
        }
    }

    pub fn with_log_tag(mut self, tag: &'static str) -> Self {
        self.log_tag = tag;
        self
    }

    pub fn with_activity_name(mut self, name: &'static str) -> Self {
        self.activity_name = name;
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_lifecycle_trace(mut self, enabled: bool) -> Self {
        self.trace_lifecycle = enabled;
        self
    }

    pub fn with_permissions(mut self, bootstrapper: PermissionBootstrapper) -> Self {
        self.permissions = Some(bootstrapper);
        self
    }

    pub fn without_permissions(mut self) -> Self {
        self.permissions = None;
        self
    }

    /// Assemble the create/destroy callback stack this configuration asks for.
    pub fn callbacks<H>(&self, host: H) -> Box<dyn ActivityCallbacks>
    where
        H: PermissionHost + 'static,
    {
        let base: Box<dyn ActivityCallbacks> = match &self.permissions {
            Some(bootstrapper) => Box::new(PermissionGate::new(
                self.log_tag,
                bootstrapper.clone(),
                host,
                (),
            )),
            None => Box::new(()),
        };

        if self.trace_lifecycle {
            Box::new(LifecycleLogger::new(self.log_tag, self.activity_name, base))
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::lifecycle::tests::capture;
    use crate::permissions::{Permission, REQUEST_CODE_EYE_AND_FACE_TRACKING};

    struct NothingGranted;

    impl PermissionHost for NothingGranted {
        fn is_granted(&self, _: &str) -> Result<bool> {
            Ok(false)
        }

        fn request_permissions(&self, _: &[&str], _: i32) -> Result<()> {
            Ok(())
        }
    }

    fn messages() -> Vec<String> {
        capture::take().into_iter().map(|r| r.2).collect()
    }

    #[test]
    fn social_preset_bootstraps_all_three() {
        let config = ShellConfig::body_face_eye_social();
        let bootstrapper = config.permissions.expect("bootstrap configured");
        assert_eq!(bootstrapper.permissions(), &Permission::ALL);
        assert_eq!(
            bootstrapper.request_code(),
            REQUEST_CODE_EYE_AND_FACE_TRACKING
        );
        assert_eq!(config.activity_name, "MainActivity");
        assert!(!config.trace_lifecycle);
    }

    #[test]
    fn scene_model_preset_skips_bootstrap() {
        let config = ShellConfig::scene_model();
        assert!(config.permissions.is_none());
        assert_eq!(config.activity_name, "MainNativeActivity");
        assert_eq!(config.log_tag, DEFAULT_LOG_TAG);
        assert!(config.trace_lifecycle);
    }

    #[test]
    fn feature_selection() {
        let config = ShellConfig::from_features();
        assert_eq!(
            config.permissions.is_none(),
            cfg!(feature = "scene-model")
        );
    }

    #[test]
    fn builders_override_fields() {
        let config = ShellConfig::scene_model()
            .with_log_tag("Custom")
            .with_activity_name("Shell")
            .with_log_level(LevelFilter::Info)
            .with_lifecycle_trace(false)
            .with_permissions(PermissionBootstrapper::new(vec![Permission::RecordAudio], 7));

        assert_eq!(config.log_tag, "Custom");
        assert_eq!(config.activity_name, "Shell");
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(!config.trace_lifecycle);
        assert_eq!(config.permissions.as_ref().map(|p| p.request_code()), Some(7));
        assert!(config.without_permissions().permissions.is_none());
    }

    #[test]
    fn social_stack_requests_without_tracing() {
        capture::install();
        let mut callbacks = ShellConfig::body_face_eye_social().callbacks(NothingGranted);
        callbacks.on_create(None);
        callbacks.on_destroy();

        assert_eq!(messages(), vec!["requested 3 permission(s) with code 1"]);
    }

    #[test]
    fn scene_model_stack_traces_without_requesting() {
        capture::install();
        let mut callbacks = ShellConfig::scene_model().callbacks(NothingGranted);
        callbacks.on_create(None);
        callbacks.on_destroy();

        assert_eq!(
            messages(),
            vec![
                "MainNativeActivity.onCreate() called",
                "MainNativeActivity.onDestroy() called",
            ]
        );
    }

    #[test]
    fn traced_stack_logs_before_requesting() {
        capture::install();
        let mut callbacks = ShellConfig::body_face_eye_social()
            .with_lifecycle_trace(true)
            .callbacks(NothingGranted);
        callbacks.on_create(None);

        assert_eq!(
            messages(),
            vec![
                "MainActivity.onCreate() called",
                "requested 3 permission(s) with code 1",
            ]
        );
    }
}
