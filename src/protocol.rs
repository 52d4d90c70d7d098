use bytemuck::{Pod, Zeroable};

/// Opaque index the host assigns to a tracked device on activation.
pub type DeviceIndex = u32;
pub type PropertyContainerHandle = u64;
pub type InputHandle = u64;

pub const DEVICE_INDEX_INVALID: DeviceIndex = u32::MAX;
pub const PROPERTY_CONTAINER_INVALID: PropertyContainerHandle = 0;
pub const INPUT_HANDLE_INVALID: InputHandle = 0;

pub const DISPLAY_COMPONENT_VERSION: &str = "IVRDisplayComponent_002";

pub const INPUT_SYSTEM_TOUCH: &str = "/input/system/touch";
pub const INPUT_SYSTEM_CLICK: &str = "/input/system/click";
pub const INPUT_PROFILE_PATH: &str = "{virtualhmd}/input/virtualhmd_profile.json";

pub const SECONDS_FROM_VSYNC_TO_PHOTONS: f32 = 0.11;

pub const TRACKING_RESULT_CALIBRATING_IN_PROGRESS: u32 = 100;
pub const TRACKING_RESULT_CALIBRATING_OUT_OF_RANGE: u32 = 101;
pub const TRACKING_RESULT_RUNNING_OK: u32 = 200;
pub const TRACKING_RESULT_RUNNING_OUT_OF_RANGE: u32 = 201;
pub const TRACKING_RESULT_FALLBACK_ROTATION_ONLY: u32 = 300;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct HmdQuaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl HmdQuaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Pose record in the layout the host's pose sink expects.
///
/// Boolean fields are single bytes (0 or 1) so the struct stays `Pod`; the
/// trailing four flags exactly fill the alignment slot after `result`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DriverPoseData {
    pub pose_time_offset: f64,
    pub q_world_from_driver_rotation: HmdQuaternion,
    pub vec_world_from_driver_translation: [f64; 3],
    pub q_driver_from_head_rotation: HmdQuaternion,
    pub vec_driver_from_head_translation: [f64; 3],
    pub vec_position: [f64; 3],
    pub vec_velocity: [f64; 3],
    pub vec_acceleration: [f64; 3],
    pub q_rotation: HmdQuaternion,
    pub vec_angular_velocity: [f64; 3],
    pub vec_angular_acceleration: [f64; 3],
    pub result: u32,
    pub pose_is_valid: u8,
    pub will_drift_in_yaw: u8,
    pub should_apply_head_model: u8,
    pub device_is_connected: u8,
}

pub const DRIVER_POSE_SIZE: usize = std::mem::size_of::<DriverPoseData>();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_pose_layout() {
        assert_eq!(DRIVER_POSE_SIZE, 34 * 8 + 4 + 4);
        assert_eq!(std::mem::align_of::<DriverPoseData>(), 8);
    }

    #[test]
    fn test_zeroed_pose_is_all_zero_bytes() {
        let pose = DriverPoseData::zeroed();
        assert!(bytemuck::bytes_of(&pose).iter().all(|b| *b == 0));
        assert_eq!(pose.q_rotation.w, 0.0);
    }
}
