use std::sync::Arc;
use virtual_hmd::*;

/// Host that logs every call.
struct PrintingHost;

impl Properties for PrintingHost {
    fn tracked_device_to_property_container(&self, index: DeviceIndex) -> PropertyContainerHandle {
        index as u64 + 1
    }

    fn set_string_property(
        &self,
        _: PropertyContainerHandle,
        prop: Property,
        value: &str,
    ) -> std::result::Result<(), PropertyError> {
        println!("  {:?} = {:?}", prop, value);
        Ok(())
    }

    fn set_float_property(
        &self,
        _: PropertyContainerHandle,
        prop: Property,
        value: f32,
    ) -> std::result::Result<(), PropertyError> {
        println!("  {:?} = {}", prop, value);
        Ok(())
    }

    fn set_bool_property(
        &self,
        _: PropertyContainerHandle,
        prop: Property,
        value: bool,
    ) -> std::result::Result<(), PropertyError> {
        println!("  {:?} = {}", prop, value);
        Ok(())
    }
}

impl DriverInput for PrintingHost {
    fn create_boolean_component(
        &self,
        _: PropertyContainerHandle,
        name: &str,
    ) -> std::result::Result<InputHandle, PropertyError> {
        println!("  input {}", name);
        Ok(1)
    }
}

impl ServerDriverHost for PrintingHost {
    fn tracked_device_pose_updated(&self, _: DeviceIndex, _: &DriverPoseData, _: usize) {}

    fn tracked_device_added(
        &self,
        serial_number: &str,
        class: DeviceClass,
        _: Arc<dyn TrackedDeviceDriver>,
    ) -> bool {
        println!("Added {:?} {}", class, serial_number);
        true
    }

    fn poll_next_event(&self) -> Option<HostEvent> {
        None
    }
}

fn main() -> virtual_hmd::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virtual_hmd=info".into()),
        )
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => TomlSettings::load(path)?,
        None => TomlSettings::from_toml_str(include_str!("virtualhmd.toml"))?,
    };

    let host = Arc::new(PrintingHost);
    let context = HostContext::new(Arc::new(settings), host.clone(), host.clone(), host);
    let mut manager = HmdManager::new(context);
    manager.init()?;

    let Some(device) = manager.device().cloned() else {
        println!("No HMD registered!");
        return Ok(());
    };

    println!("\nActivating:");
    device.activate(0)?;

    let Some(component) = device.get_component(DISPLAY_COMPONENT_VERSION) else {
        println!("No display component!");
        return Ok(());
    };
    if let Some(display) = component.as_display() {
        println!("\nDisplay:");
        println!("  Window: {:?}", display.window_bounds());
        println!("  Render target: {:?}", display.recommended_render_target_size());
        for eye in [Eye::Left, Eye::Right] {
            println!("  {:?} viewport: {:?}", eye, display.eye_output_viewport(eye));
            println!("  {:?} projection: {:?}", eye, display.projection_raw(eye));
        }
    }

    for _ in 0..10 {
        manager.run_frame()?;
    }
    let pose = Pose::from(&device.get_pose());
    println!("\nPose after 10 frames: {:?}", pose.position);

    println!("\nStopping...");
    manager.cleanup();

    println!("Done!");
    Ok(())
}
