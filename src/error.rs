//! Error type shared by the permission and lifecycle hosts.
//!
//! Nothing here crosses the FFI boundary: entry points log and absorb.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// A call through JNI into the Java activity failed.
    #[cfg(target_os = "android")]
    #[error("jni call failed: {0}")]
    Jni(#[from] jni::errors::Error),

    /// A host reported a failure of its own.
    #[error("host error: {0}")]
    Host(String),

    /// The native quit entry point ran before the activity was registered.
    #[error("no running activity to finish")]
    NotRunning,
}

pub type Result<T, E = ShellError> = std::result::Result<T, E>;
