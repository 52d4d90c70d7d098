mod device;
mod display;
mod error;
mod host;
mod manager;
mod pose;
mod protocol;
mod settings;

pub use device::{HmdDevice, InputHandles, POSE_UPDATE_INTERVAL};
pub use display::{
    DisplayComponent, DistortionCoordinates, Eye, ProjectionRaw, Viewport, WindowBounds,
};
pub use error::{Error, PropertyError, Result};
pub use host::{
    Component, DeviceClass, DriverInput, HostContext, HostEvent, Properties, Property,
    ServerDriverHost, Settings, TrackedDeviceDriver, STEAMVR_IPD_KEY, STEAMVR_SECTION,
};
pub use manager::HmdManager;
pub use pose::{Pose, TrackingResult};
pub use protocol::{
    DeviceIndex, DriverPoseData, HmdQuaternion, InputHandle, PropertyContainerHandle,
    DEVICE_INDEX_INVALID, DISPLAY_COMPONENT_VERSION, DRIVER_POSE_SIZE, INPUT_HANDLE_INVALID,
    INPUT_PROFILE_PATH, INPUT_SYSTEM_CLICK, INPUT_SYSTEM_TOUCH, PROPERTY_CONTAINER_INVALID,
    SECONDS_FROM_VSYNC_TO_PHOTONS,
};
pub use settings::{DeviceConfig, DisplayConfiguration, TomlSettings, DISPLAY_SECTION, MAIN_SECTION};
