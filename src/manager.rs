use crate::device::HmdDevice;
use crate::error::{Error, Result};
use crate::host::{DeviceClass, HostContext, TrackedDeviceDriver};
use crate::settings::DeviceConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Server-side provider: owns the HMD, registers it with the host and relays
/// per-frame work to it.
pub struct HmdManager {
    host: HostContext,
    device: Option<Arc<HmdDevice>>,
}

impl HmdManager {
    pub fn new(host: HostContext) -> Self {
        Self { host, device: None }
    }

    pub fn init(&mut self) -> Result<()> {
        if self.device.is_some() {
            return Ok(());
        }

        let config = DeviceConfig::from_settings(self.host.settings.as_ref());
        let serial = config.serial_number.clone();
        let device = Arc::new(HmdDevice::with_config(self.host.clone(), config));

        if !self
            .host
            .server
            .tracked_device_added(&serial, DeviceClass::Hmd, Arc::clone(&device) as Arc<dyn TrackedDeviceDriver>)
        {
            warn!(serial = %serial, "host refused HMD");
            return Err(Error::DeviceRegistrationFailed(serial));
        }

        info!(serial = %serial, "registered HMD with host");
        self.device = Some(device);
        Ok(())
    }

    pub fn device(&self) -> Option<&Arc<HmdDevice>> {
        self.device.as_ref()
    }

    pub fn get_device_by_serial(&self, serial_number: &str) -> Option<&Arc<HmdDevice>> {
        self.device
            .as_ref()
            .filter(|d| d.serial_number() == serial_number)
    }

    /// Ticks the device once and hands it every event the host has queued.
    pub fn run_frame(&self) -> Result<()> {
        let device = self.device.as_ref().ok_or(Error::NotInitialized)?;
        device.run_frame();

        while let Some(event) = self.host.server.poll_next_event() {
            device.process_event(&event);
        }

        Ok(())
    }

    pub fn enter_standby(&self) {
        if let Some(device) = &self.device {
            device.enter_standby();
        }
    }

    pub fn leave_standby(&self) {
        debug!("leaving standby");
    }

    pub fn should_block_standby_mode(&self) -> bool {
        false
    }

    pub fn cleanup(&mut self) {
        if let Some(device) = self.device.take() {
            device.deactivate();
            info!(serial = %device.serial_number(), "HMD released");
        }
    }
}

impl Drop for HmdManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}
