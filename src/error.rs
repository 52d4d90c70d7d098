use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Device already active")]
    AlreadyActive,

    #[error("Cannot activate a device from its own pose thread")]
    ActivateOnPoseThread,

    #[error("Host refused to register device {0}")]
    DeviceRegistrationFailed(String),

    #[error("Driver not initialized")]
    NotInitialized,
}

/// Failure reported by a host property or input setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("Invalid property container")]
    InvalidContainer,

    #[error("Property is read-only")]
    ReadOnly,
}

pub type Result<T> = std::result::Result<T, Error>;
