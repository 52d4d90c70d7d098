use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use virtual_hmd::*;

/// Host that forwards every pose it receives over a channel.
struct ChannelHost {
    tx: Mutex<mpsc::Sender<Pose>>,
}

impl Properties for ChannelHost {
    fn tracked_device_to_property_container(&self, index: DeviceIndex) -> PropertyContainerHandle {
        index as u64 + 1
    }

    fn set_string_property(
        &self,
        _: PropertyContainerHandle,
        _: Property,
        _: &str,
    ) -> std::result::Result<(), PropertyError> {
        Ok(())
    }

    fn set_float_property(
        &self,
        _: PropertyContainerHandle,
        _: Property,
        _: f32,
    ) -> std::result::Result<(), PropertyError> {
        Ok(())
    }

    fn set_bool_property(
        &self,
        _: PropertyContainerHandle,
        _: Property,
        _: bool,
    ) -> std::result::Result<(), PropertyError> {
        Ok(())
    }
}

impl DriverInput for ChannelHost {
    fn create_boolean_component(
        &self,
        _: PropertyContainerHandle,
        _: &str,
    ) -> std::result::Result<InputHandle, PropertyError> {
        Ok(1)
    }
}

impl ServerDriverHost for ChannelHost {
    fn tracked_device_pose_updated(&self, _: DeviceIndex, pose: &DriverPoseData, _: usize) {
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(Pose::from(pose));
        }
    }

    fn tracked_device_added(
        &self,
        _: &str,
        _: DeviceClass,
        _: Arc<dyn TrackedDeviceDriver>,
    ) -> bool {
        true
    }

    fn poll_next_event(&self) -> Option<HostEvent> {
        None
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virtual_hmd=debug".into()),
        )
        .init();

    let (tx, pose_rx) = mpsc::channel();
    let host = Arc::new(ChannelHost { tx: Mutex::new(tx) });
    let settings = TomlSettings::new().with_value(MAIN_SECTION, "serial_number", "VHMD-DEMO");
    let context = HostContext::new(Arc::new(settings), host.clone(), host.clone(), host);
    let device = HmdDevice::new(context);

    device.activate(0)?;

    for _ in 0..100 {
        // drive the bob faster than a real compositor would
        for _ in 0..10 {
            device.run_frame();
        }
        let pose = pose_rx.recv_timeout(Duration::from_secs(1))?;
        println!(
            "pos: [{:.3}, {:.3}, {:.3}] rot: [{:.3}, {:.3}, {:.3}, {:.3}] {:?}",
            pose.position[0],
            pose.position[1],
            pose.position[2],
            pose.rotation[0],
            pose.rotation[1],
            pose.rotation[2],
            pose.rotation[3],
            pose.tracking_result
        );
    }

    device.deactivate();
    Ok(())
}
