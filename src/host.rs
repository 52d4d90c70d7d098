//! Services the runtime's driver host provides to this driver.
//!
//! The host normally exposes these as process-wide singletons. Here each one
//! is a trait handed to the driver through [`HostContext`], so the driver can
//! be driven in-process by a test double.

use crate::display::DisplayComponent;
use crate::error::{self, PropertyError};
use crate::protocol::{DeviceIndex, DriverPoseData, InputHandle, PropertyContainerHandle};
use std::sync::Arc;

/// Section the runtime keeps its own user settings in.
pub const STEAMVR_SECTION: &str = "steamvr";
pub const STEAMVR_IPD_KEY: &str = "ipd";

/// Read-only key/value settings store. Missing or mistyped keys read as the
/// type's empty value.
pub trait Settings: Send + Sync {
    fn get_string(&self, section: &str, key: &str) -> String;
    fn get_i32(&self, section: &str, key: &str) -> i32;
    fn get_f32(&self, section: &str, key: &str) -> f32;
    fn get_bool(&self, section: &str, key: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    ModelNumber,
    SerialNumber,
    UserIpdMeters,
    DisplayFrequency,
    UserHeadToEyeDepthMeters,
    SecondsFromVsyncToPhotons,
    IsOnDesktop,
    DisplayDebugMode,
    InputProfilePath,
}

pub trait Properties: Send + Sync {
    fn tracked_device_to_property_container(&self, index: DeviceIndex) -> PropertyContainerHandle;

    fn set_string_property(
        &self,
        container: PropertyContainerHandle,
        prop: Property,
        value: &str,
    ) -> Result<(), PropertyError>;

    fn set_float_property(
        &self,
        container: PropertyContainerHandle,
        prop: Property,
        value: f32,
    ) -> Result<(), PropertyError>;

    fn set_bool_property(
        &self,
        container: PropertyContainerHandle,
        prop: Property,
        value: bool,
    ) -> Result<(), PropertyError>;
}

pub trait DriverInput: Send + Sync {
    fn create_boolean_component(
        &self,
        container: PropertyContainerHandle,
        name: &str,
    ) -> Result<InputHandle, PropertyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Hmd,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The user's IPD setting changed.
    IpdChanged(f32),
    EnterStandby,
    Quit,
    /// Any event this driver does not interpret, by raw type id.
    Other(u32),
}

pub trait ServerDriverHost: Send + Sync {
    /// Pose sink. Called from the pose thread while the device is active.
    fn tracked_device_pose_updated(
        &self,
        index: DeviceIndex,
        pose: &DriverPoseData,
        pose_size: usize,
    );

    /// Returns false if the host refused the device.
    fn tracked_device_added(
        &self,
        serial_number: &str,
        class: DeviceClass,
        device: Arc<dyn TrackedDeviceDriver>,
    ) -> bool;

    fn poll_next_event(&self) -> Option<HostEvent>;
}

/// Capability interface handed out by [`TrackedDeviceDriver::get_component`].
#[derive(Debug, Clone)]
pub enum Component {
    Display(Arc<DisplayComponent>),
}

impl Component {
    pub fn as_display(&self) -> Option<&Arc<DisplayComponent>> {
        match self {
            Component::Display(display) => Some(display),
        }
    }
}

/// What the host calls on a device it has been handed.
pub trait TrackedDeviceDriver: Send + Sync {
    /// Registers properties and inputs under `index` and starts streaming
    /// poses.
    fn activate(&self, index: DeviceIndex) -> error::Result<()>;

    /// Stops the pose stream. Once this returns no further pose is delivered.
    fn deactivate(&self);

    fn enter_standby(&self);

    /// Looks up a capability by its exact versioned interface name.
    fn get_component(&self, name_and_version: &str) -> Option<Component>;

    /// Writes a NUL-terminated reply into `response`.
    fn debug_request(&self, request: &str, response: &mut [u8]);

    fn get_pose(&self) -> DriverPoseData;
}

#[derive(Clone)]
pub struct HostContext {
    pub settings: Arc<dyn Settings>,
    pub properties: Arc<dyn Properties>,
    pub input: Arc<dyn DriverInput>,
    pub server: Arc<dyn ServerDriverHost>,
}

impl HostContext {
    pub fn new(
        settings: Arc<dyn Settings>,
        properties: Arc<dyn Properties>,
        input: Arc<dyn DriverInput>,
        server: Arc<dyn ServerDriverHost>,
    ) -> Self {
        Self {
            settings,
            properties,
            input,
            server,
        }
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext").finish_non_exhaustive()
    }
}
