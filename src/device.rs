use crate::display::DisplayComponent;
use crate::error::{Error, PropertyError, Result};
use crate::host::{
    Component, HostContext, HostEvent, Property, ServerDriverHost, TrackedDeviceDriver,
    STEAMVR_IPD_KEY, STEAMVR_SECTION,
};
use crate::pose::Pose;
use crate::protocol::*;
use crate::settings::DeviceConfig;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

/// Pause between two pose deliveries. Also the worst-case time `deactivate`
/// waits for the pose thread to notice the stop.
pub const POSE_UPDATE_INTERVAL: Duration = Duration::from_millis(5);

thread_local! {
    // Address of the activation flag owned by the pose loop running on this
    // thread, 0 on every other thread.
    static POSE_LOOP_OWNER: Cell<usize> = const { Cell::new(0) };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputHandles {
    pub system_touch: InputHandle,
    pub system_click: InputHandle,
}

/// The virtual HMD.
///
/// `activate` starts a thread that pushes a synthetic pose to the host every
/// [`POSE_UPDATE_INTERVAL`]; `deactivate` stops it and waits for it to exit.
/// `pose_thread` serializes activation and deactivation and is held across
/// the join, so nothing the pose sink can call may take it.
pub struct HmdDevice {
    host: HostContext,
    model_number: String,
    serial_number: String,
    display: Arc<DisplayComponent>,
    device_index: AtomicU32,
    frame_number: Arc<AtomicU64>,
    is_active: Arc<AtomicBool>,
    input_handles: Mutex<InputHandles>,
    pose_thread: Mutex<Option<JoinHandle<()>>>,
}

impl HmdDevice {
    pub fn new(host: HostContext) -> Self {
        let config = DeviceConfig::from_settings(host.settings.as_ref());
        Self::with_config(host, config)
    }

    pub fn with_config(host: HostContext, config: DeviceConfig) -> Self {
        Self {
            host,
            model_number: config.model_number,
            serial_number: config.serial_number,
            display: Arc::new(DisplayComponent::new(config.display)),
            device_index: AtomicU32::new(DEVICE_INDEX_INVALID),
            frame_number: Arc::new(AtomicU64::new(0)),
            is_active: Arc::new(AtomicBool::new(false)),
            input_handles: Mutex::new(InputHandles::default()),
            pose_thread: Mutex::new(None),
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn model_number(&self) -> &str {
        &self.model_number
    }

    pub fn display(&self) -> &Arc<DisplayComponent> {
        &self.display
    }

    /// `DEVICE_INDEX_INVALID` while inactive.
    pub fn device_index(&self) -> DeviceIndex {
        self.device_index.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number.load(Ordering::Relaxed)
    }

    pub fn input_handles(&self) -> InputHandles {
        *self
            .input_handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Host frame tick.
    pub fn run_frame(&self) {
        self.frame_number.fetch_add(1, Ordering::Relaxed);
    }

    pub fn process_event(&self, event: &HostEvent) {
        match event {
            HostEvent::IpdChanged(ipd) => {
                debug!(serial = %self.serial_number, ipd, "IPD changed")
            }
            other => {
                trace!(serial = %self.serial_number, event = ?other, "ignoring host event")
            }
        }
    }

    fn lock_pose_thread(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pose_thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn on_own_pose_thread(&self) -> bool {
        let flag = Arc::as_ptr(&self.is_active) as usize;
        POSE_LOOP_OWNER.with(|owner| owner.get() == flag)
    }

    fn register_with_host(&self, index: DeviceIndex) -> InputHandles {
        let properties = &self.host.properties;
        let container = properties.tracked_device_to_property_container(index);
        let ipd = self
            .host
            .settings
            .get_f32(STEAMVR_SECTION, STEAMVR_IPD_KEY);

        let strings = [
            (Property::ModelNumber, self.model_number.as_str()),
            (Property::SerialNumber, self.serial_number.as_str()),
            (Property::InputProfilePath, INPUT_PROFILE_PATH),
        ];
        let floats = [
            (Property::UserIpdMeters, ipd),
            (Property::DisplayFrequency, 0.0),
            (Property::UserHeadToEyeDepthMeters, 0.0),
            (
                Property::SecondsFromVsyncToPhotons,
                SECONDS_FROM_VSYNC_TO_PHOTONS,
            ),
        ];
        let bools = [
            (Property::IsOnDesktop, false),
            (Property::DisplayDebugMode, true),
        ];

        for (property, value) in strings {
            let result = properties.set_string_property(container, property, value);
            self.warn_on_property_error(property, result);
        }
        for (property, value) in floats {
            let result = properties.set_float_property(container, property, value);
            self.warn_on_property_error(property, result);
        }
        for (property, value) in bools {
            let result = properties.set_bool_property(container, property, value);
            self.warn_on_property_error(property, result);
        }

        InputHandles {
            system_touch: self.create_boolean_input(container, INPUT_SYSTEM_TOUCH),
            system_click: self.create_boolean_input(container, INPUT_SYSTEM_CLICK),
        }
    }

    fn warn_on_property_error(
        &self,
        property: Property,
        result: std::result::Result<(), PropertyError>,
    ) {
        if let Err(e) = result {
            warn!(serial = %self.serial_number, ?property, "failed to set property: {e}");
        }
    }

    fn create_boolean_input(&self, container: PropertyContainerHandle, name: &str) -> InputHandle {
        self.host
            .input
            .create_boolean_component(container, name)
            .unwrap_or_else(|e: PropertyError| {
                warn!(
                    serial = %self.serial_number,
                    input = name,
                    "failed to create input component: {e}"
                );
                INPUT_HANDLE_INVALID
            })
    }

    fn spawn_pose_thread(&self, index: DeviceIndex) -> Result<JoinHandle<()>> {
        let server = Arc::clone(&self.host.server);
        let is_active = Arc::clone(&self.is_active);
        let frame_number = Arc::clone(&self.frame_number);

        let handle = std::thread::Builder::new()
            .name(format!("pose-{}", self.serial_number))
            .spawn(move || pose_update_loop(server, index, is_active, frame_number))?;

        Ok(handle)
    }
}

fn pose_update_loop(
    server: Arc<dyn ServerDriverHost>,
    index: DeviceIndex,
    is_active: Arc<AtomicBool>,
    frame_number: Arc<AtomicU64>,
) {
    POSE_LOOP_OWNER.with(|owner| owner.set(Arc::as_ptr(&is_active) as usize));
    debug!(index, "pose thread started");

    while is_active.load(Ordering::SeqCst) {
        let pose = Pose::synthetic(frame_number.load(Ordering::Relaxed)).to_driver_pose();
        server.tracked_device_pose_updated(index, &pose, DRIVER_POSE_SIZE);

        std::thread::sleep(POSE_UPDATE_INTERVAL);
    }

    debug!(index, "pose thread stopped");
}

fn join_pose_thread(handle: JoinHandle<()>, serial_number: &str) {
    if handle.join().is_err() {
        error!(serial = %serial_number, "pose thread panicked");
    }
}

impl TrackedDeviceDriver for HmdDevice {
    fn activate(&self, index: DeviceIndex) -> Result<()> {
        // The current thread is the one a restart would have to join.
        if self.on_own_pose_thread() {
            return Err(Error::ActivateOnPoseThread);
        }

        let mut pose_thread = self.lock_pose_thread();

        if self.is_active.load(Ordering::SeqCst) {
            return Err(Error::AlreadyActive);
        }

        // Left behind by a loop that stopped itself from inside the pose sink.
        if let Some(stale) = pose_thread.take() {
            join_pose_thread(stale, &self.serial_number);
        }

        self.device_index.store(index, Ordering::SeqCst);
        self.frame_number.store(0, Ordering::Relaxed);
        let handles = self.register_with_host(index);
        *self
            .input_handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = handles;

        self.is_active.store(true, Ordering::SeqCst);
        match self.spawn_pose_thread(index) {
            Ok(handle) => *pose_thread = Some(handle),
            Err(e) => {
                self.is_active.store(false, Ordering::SeqCst);
                self.device_index
                    .store(DEVICE_INDEX_INVALID, Ordering::SeqCst);
                return Err(e);
            }
        }

        info!(serial = %self.serial_number, index, "HMD activated");
        Ok(())
    }

    fn deactivate(&self) {
        if self.on_own_pose_thread() {
            // The loop exits on its next flag check; whoever takes the lock
            // next joins it.
            if self.is_active.swap(false, Ordering::SeqCst) {
                self.device_index
                    .store(DEVICE_INDEX_INVALID, Ordering::SeqCst);
            }
            return;
        }

        let mut pose_thread = self.lock_pose_thread();
        let was_active = self.is_active.swap(false, Ordering::SeqCst);

        if let Some(handle) = pose_thread.take() {
            join_pose_thread(handle, &self.serial_number);
        }

        if was_active {
            self.device_index
                .store(DEVICE_INDEX_INVALID, Ordering::SeqCst);
            info!(serial = %self.serial_number, "HMD deactivated");
        }
    }

    fn enter_standby(&self) {
        info!(serial = %self.serial_number, "HMD has been put into standby");
    }

    fn get_component(&self, name_and_version: &str) -> Option<Component> {
        match name_and_version {
            DISPLAY_COMPONENT_VERSION => Some(Component::Display(Arc::clone(&self.display))),
            _ => None,
        }
    }

    fn debug_request(&self, request: &str, response: &mut [u8]) {
        trace!(serial = %self.serial_number, request, "debug request");
        if let Some(first) = response.first_mut() {
            *first = 0;
        }
    }

    fn get_pose(&self) -> DriverPoseData {
        Pose::synthetic(self.frame_number()).to_driver_pose()
    }
}

impl Drop for HmdDevice {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for HmdDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmdDevice")
            .field("model_number", &self.model_number)
            .field("serial_number", &self.serial_number)
            .field("device_index", &self.device_index())
            .field("is_active", &self.is_active())
            .field("frame_number", &self.frame_number())
            .finish_non_exhaustive()
    }
}
