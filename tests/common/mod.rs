#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use virtual_hmd::*;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Float(f32),
    Bool(bool),
}

/// In-process host that records everything the driver tells it.
#[derive(Default)]
pub struct RecordingHost {
    pub poses: Mutex<Vec<(DeviceIndex, Pose)>>,
    pub pose_sizes: Mutex<Vec<usize>>,
    pub properties: Mutex<Vec<(PropertyContainerHandle, Property, PropertyValue)>>,
    pub inputs: Mutex<Vec<(PropertyContainerHandle, String)>>,
    pub added: Mutex<Vec<(String, DeviceClass)>>,
    pub events: Mutex<Vec<HostEvent>>,
    /// Device the pose sink deactivates once `stop_after` poses arrived.
    pub stop_device: Mutex<Weak<HmdDevice>>,
    pub stop_after: AtomicUsize,
    /// Makes the sink call `activate` right after stopping `stop_device`.
    pub restart_after_stop: AtomicBool,
    /// One entry per restart attempt, true if it was refused as expected.
    pub restart_refused: Mutex<Vec<bool>>,
    /// Device the pose sink reads back on every delivery, after `query_delay`.
    pub query_device: Mutex<Weak<HmdDevice>>,
    pub query_delay: Mutex<Duration>,
    pub queries: AtomicUsize,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pose_count(&self) -> usize {
        self.poses.lock().unwrap().len()
    }

    pub fn property(&self, prop: Property) -> Option<PropertyValue> {
        self.properties
            .lock()
            .unwrap()
            .iter()
            .find(|(_, p, _)| *p == prop)
            .map(|(_, _, v)| v.clone())
    }
}

impl Properties for RecordingHost {
    fn tracked_device_to_property_container(&self, index: DeviceIndex) -> PropertyContainerHandle {
        0x1000 + index as u64
    }

    fn set_string_property(
        &self,
        container: PropertyContainerHandle,
        prop: Property,
        value: &str,
    ) -> std::result::Result<(), PropertyError> {
        self.properties
            .lock()
            .unwrap()
            .push((container, prop, PropertyValue::String(value.to_string())));
        Ok(())
    }

    fn set_float_property(
        &self,
        container: PropertyContainerHandle,
        prop: Property,
        value: f32,
    ) -> std::result::Result<(), PropertyError> {
        self.properties
            .lock()
            .unwrap()
            .push((container, prop, PropertyValue::Float(value)));
        Ok(())
    }

    fn set_bool_property(
        &self,
        container: PropertyContainerHandle,
        prop: Property,
        value: bool,
    ) -> std::result::Result<(), PropertyError> {
        self.properties
            .lock()
            .unwrap()
            .push((container, prop, PropertyValue::Bool(value)));
        Ok(())
    }
}

impl DriverInput for RecordingHost {
    fn create_boolean_component(
        &self,
        container: PropertyContainerHandle,
        name: &str,
    ) -> std::result::Result<InputHandle, PropertyError> {
        let mut inputs = self.inputs.lock().unwrap();
        inputs.push((container, name.to_string()));
        Ok(inputs.len() as InputHandle)
    }
}

impl ServerDriverHost for RecordingHost {
    fn tracked_device_pose_updated(
        &self,
        index: DeviceIndex,
        pose: &DriverPoseData,
        pose_size: usize,
    ) {
        let count = {
            let mut poses = self.poses.lock().unwrap();
            poses.push((index, Pose::from(pose)));
            poses.len()
        };
        self.pose_sizes.lock().unwrap().push(pose_size);

        if count == self.stop_after.load(Ordering::SeqCst) {
            let device = self.stop_device.lock().unwrap().upgrade();
            if let Some(device) = device {
                device.deactivate();
                if self.restart_after_stop.load(Ordering::SeqCst) {
                    let refused =
                        matches!(device.activate(index), Err(Error::ActivateOnPoseThread));
                    self.restart_refused.lock().unwrap().push(refused);
                }
            }
        }

        let device = self.query_device.lock().unwrap().upgrade();
        if let Some(device) = device {
            std::thread::sleep(*self.query_delay.lock().unwrap());
            device.input_handles();
            self.queries.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn tracked_device_added(
        &self,
        serial_number: &str,
        class: DeviceClass,
        _device: Arc<dyn TrackedDeviceDriver>,
    ) -> bool {
        self.added
            .lock()
            .unwrap()
            .push((serial_number.to_string(), class));
        true
    }

    fn poll_next_event(&self) -> Option<HostEvent> {
        let mut events = self.events.lock().unwrap();
        if events.is_empty() {
            None
        } else {
            Some(events.remove(0))
        }
    }
}

pub const SETTINGS: &str = r#"
[SteamHMD]
model_number = "VirtualHMD"
serial_number = "VHMD-TEST-0001"

[Android-Display]
window_x = 0
window_y = 0
window_width = 1921
window_height = 1080
render_width = 1920
render_height = 1080

[steamvr]
ipd = 0.063
"#;

pub fn context(host: &Arc<RecordingHost>) -> HostContext {
    let settings = Arc::new(TomlSettings::from_toml_str(SETTINGS).unwrap());
    HostContext::new(settings, host.clone(), host.clone(), host.clone())
}

pub fn device(host: &Arc<RecordingHost>) -> Arc<HmdDevice> {
    Arc::new(HmdDevice::new(context(host)))
}
