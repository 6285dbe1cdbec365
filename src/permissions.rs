//! Runtime permission bootstrap for the eye/face tracking samples.
//!
//! On creation the shell checks each configured permission and issues one
//! batched request for whatever is missing. The result arrives through the
//! activity's permission callback, which is not handled here.

use std::fmt;

use crate::error::Result;
use crate::lifecycle::ActivityCallbacks;

/// Correlates the batched request with its result callback.
pub const REQUEST_CODE_EYE_AND_FACE_TRACKING: i32 = 1;

/// Runtime permissions the samples depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    EyeTracking,
    FaceTracking,
    RecordAudio,
}

impl Permission {
    pub const ALL: [Permission; 3] = [
        Permission::EyeTracking,
        Permission::FaceTracking,
        Permission::RecordAudio,
    ];

    /// The Android manifest identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::EyeTracking => "com.oculus.permission.EYE_TRACKING",
            Permission::FaceTracking => "com.oculus.permission.FACE_TRACKING",
            Permission::RecordAudio => "android.permission.RECORD_AUDIO",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform grant state and request primitive.
pub trait PermissionHost {
    fn is_granted(&self, permission: &str) -> Result<bool>;

    /// Ask the OS for `permissions`. Returns as soon as the request is queued.
    fn request_permissions(&self, permissions: &[&str], request_code: i32) -> Result<()>;
}

impl<T: PermissionHost + ?Sized> PermissionHost for &T {
    fn is_granted(&self, permission: &str) -> Result<bool> {
        (**self).is_granted(permission)
    }

    fn request_permissions(&self, permissions: &[&str], request_code: i32) -> Result<()> {
        (**self).request_permissions(permissions, request_code)
    }
}

/// A request that was handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    pub permissions: Vec<Permission>,
    pub request_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionBootstrapper {
    permissions: Vec<Permission>,
    request_code: i32,
}

impl Default for PermissionBootstrapper {
    fn default() -> Self {
        Self::new(Permission::ALL.to_vec(), REQUEST_CODE_EYE_AND_FACE_TRACKING)
    }
}

impl PermissionBootstrapper {
    pub fn new(permissions: Vec<Permission>, request_code: i32) -> Self {
        Self {
            permissions,
            request_code,
        }
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn request_code(&self) -> i32 {
        self.request_code
    }

    /// Configured permissions the host reports as not granted, in configured order.
    pub fn missing<H: PermissionHost + ?Sized>(&self, host: &H) -> Result<Vec<Permission>> {
        let mut missing = Vec::new();
        for &permission in &self.permissions {
            if !host.is_granted(permission.as_str())? {
                missing.push(permission);
            }
        }
        Ok(missing)
    }

    /// Request every missing permission in a single call.
    ///
    /// Returns `None` when everything is already granted, in which case the
    /// host is not asked for anything.
    pub fn bootstrap<H: PermissionHost + ?Sized>(
        &self,
        host: &H,
    ) -> Result<Option<PermissionRequest>> {
        let missing = self.missing(host)?;
        if missing.is_empty() {
            return Ok(None);
        }

        let ids: Vec<&str> = missing.iter().map(Permission::as_str).collect();
        host.request_permissions(&ids, self.request_code)?;
        Ok(Some(PermissionRequest {
            permissions: missing,
            request_code: self.request_code,
        }))
    }
}

/// Runs the bootstrap once the base create behaviour has completed.
pub struct PermissionGate<H, D = ()> {
    target: &'static str,
    bootstrapper: PermissionBootstrapper,
    host: H,
    base: D,
}

impl<H: PermissionHost, D: ActivityCallbacks> PermissionGate<H, D> {
    pub fn new(
        target: &'static str,
        bootstrapper: PermissionBootstrapper,
        host: H,
        base: D,
    ) -> Self {
        Self {
            target,
            bootstrapper,
            host,
            base,
        }
    }
}

impl<H: PermissionHost, D: ActivityCallbacks> ActivityCallbacks for PermissionGate<H, D> {
    fn on_create(&mut self, saved_state: Option<&[u8]>) {
        self.base.on_create(saved_state);

        match self.bootstrapper.bootstrap(&self.host) {
            Ok(Some(request)) => log::info!(
                target: self.target,
                "requested {} permission(s) with code {}",
                request.permissions.len(),
                request.request_code
            ),
            Ok(None) => log::debug!(target: self.target, "all runtime permissions already granted"),
            Err(e) => log::error!(target: self.target, "permission bootstrap failed: {e}"),
        }
    }

    fn on_destroy(&mut self) {
        self.base.on_destroy();
    }
}
