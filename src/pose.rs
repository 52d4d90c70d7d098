use crate::protocol::*;
use bytemuck::Zeroable;

/// Resting head height the synthetic pose bobs around, in metres.
pub const BASE_HEIGHT: f64 = 1.0;
pub const BOB_AMPLITUDE: f64 = 0.1;
/// Phase advance per frame, in radians.
pub const BOB_FREQUENCY: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub position: [f64; 3],
    /// (w, x, y, z)
    pub rotation: [f64; 4],
    pub pose_is_valid: bool,
    pub device_is_connected: bool,
    pub should_apply_head_model: bool,
    pub tracking_result: TrackingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingResult {
    Uninitialized = 1,
    CalibratingInProgress = 100,
    CalibratingOutOfRange = 101,
    RunningOk = 200,
    RunningOutOfRange = 201,
    FallbackRotationOnly = 300,
}

impl From<u32> for TrackingResult {
    fn from(value: u32) -> Self {
        match value {
            TRACKING_RESULT_CALIBRATING_IN_PROGRESS => TrackingResult::CalibratingInProgress,
            TRACKING_RESULT_CALIBRATING_OUT_OF_RANGE => TrackingResult::CalibratingOutOfRange,
            TRACKING_RESULT_RUNNING_OK => TrackingResult::RunningOk,
            TRACKING_RESULT_RUNNING_OUT_OF_RANGE => TrackingResult::RunningOutOfRange,
            TRACKING_RESULT_FALLBACK_ROTATION_ONLY => TrackingResult::FallbackRotationOnly,
            _ => TrackingResult::Uninitialized,
        }
    }
}

impl Pose {
    /// Synthetic head pose for the given frame: a slow vertical bob with no
    /// rotation. Depends on nothing but `frame_number`.
    pub fn synthetic(frame_number: u64) -> Self {
        let y = BASE_HEIGHT + BOB_AMPLITUDE * (frame_number as f64 * BOB_FREQUENCY).sin();

        Pose {
            position: [0.0, y, 0.0],
            rotation: [1.0, 0.0, 0.0, 0.0],
            pose_is_valid: true,
            device_is_connected: true,
            should_apply_head_model: true,
            tracking_result: TrackingResult::RunningOk,
        }
    }

    pub fn to_driver_pose(&self) -> DriverPoseData {
        let mut data = DriverPoseData::zeroed();

        data.q_world_from_driver_rotation = HmdQuaternion::IDENTITY;
        data.q_driver_from_head_rotation = HmdQuaternion::IDENTITY;

        data.q_rotation = HmdQuaternion {
            w: self.rotation[0],
            x: self.rotation[1],
            y: self.rotation[2],
            z: self.rotation[3],
        };
        data.vec_position = self.position;

        data.pose_is_valid = self.pose_is_valid as u8;
        data.device_is_connected = self.device_is_connected as u8;
        data.should_apply_head_model = self.should_apply_head_model as u8;
        data.result = self.tracking_result as u32;

        data
    }
}

impl From<&DriverPoseData> for Pose {
    fn from(data: &DriverPoseData) -> Self {
        Pose {
            position: data.vec_position,
            rotation: [
                data.q_rotation.w,
                data.q_rotation.x,
                data.q_rotation.y,
                data.q_rotation.z,
            ],
            pose_is_valid: data.pose_is_valid != 0,
            device_is_connected: data.device_is_connected != 0,
            should_apply_head_model: data.should_apply_head_model != 0,
            tracking_result: TrackingResult::from(data.result),
        }
    }
}
