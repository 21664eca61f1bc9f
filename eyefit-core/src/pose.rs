//! Capture quality: how frontal, level and well framed the face is.
//!
//! Each check subtracts a fixed penalty from a score that starts at 100.
//! Checks are independent and compound.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::landmarks::{index as idx, Landmarks};

pub const ROTATED_WARNING: &str = "Face appears rotated. Please face the camera directly.";
pub const SLIGHT_ROTATION_WARNING: &str =
    "Slight face rotation detected. Center your face for best results.";
pub const TILTED_WARNING: &str = "Face is tilted. Keep your head level.";
pub const TOO_FAR_WARNING: &str = "Move closer to the camera.";
pub const TOO_CLOSE_WARNING: &str = "Move back slightly from the camera.";
pub const DEPTH_ASYMMETRY_WARNING: &str =
    "Face depth asymmetry detected. Ensure even lighting and frontal pose.";

/// Fraction of the forehead-to-chin span at which a level nose tip sits.
const LEVEL_NOSE_RATIO: f64 = 0.55;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseValidation {
    /// 0..=100
    pub score: u8,
    /// In check order: rotation, tilt, distance, depth.
    pub warnings: Vec<String>,
}

#[derive(Default)]
struct Tally {
    penalty: u32,
    warnings: Vec<String>,
}

impl Tally {
    fn flag(&mut self, penalty: u32, warning: Option<&str>) {
        self.penalty += penalty;
        if let Some(w) = warning {
            self.warnings.push(w.to_string());
        }
    }
}

pub fn validate_face_pose(landmarks: &Landmarks<'_>) -> PoseValidation {
    let mut tally = Tally::default();

    let left_eye_x = landmarks[idx::LEFT_EYE_OUTER].x;
    let right_eye_x = landmarks[idx::RIGHT_EYE_OUTER].x;
    let nose = landmarks[idx::NOSE_TIP];
    let eye_span = (right_eye_x - left_eye_x).abs();

    // Left/right rotation
    let expected_nose_x = (left_eye_x + right_eye_x) / 2.0;
    let horizontal = (nose.x - expected_nose_x).abs() / eye_span;
    if horizontal > 0.15 {
        tally.flag(30, Some(ROTATED_WARNING));
    } else if horizontal > 0.08 {
        tally.flag(15, Some(SLIGHT_ROTATION_WARNING));
    }

    // Up/down tilt. The mild tier is penalized without a message.
    let top = landmarks[idx::FOREHEAD_TOP].y;
    let chin = landmarks[idx::CHIN_BOTTOM].y;
    let expected_nose_y = top + (chin - top) * LEVEL_NOSE_RATIO;
    let vertical = (nose.y - expected_nose_y).abs() / (chin - top);
    if vertical > 0.12 {
        tally.flag(25, Some(TILTED_WARNING));
    } else if vertical > 0.06 {
        tally.flag(10, None);
    }

    // Distance from the camera
    if eye_span < 0.2 {
        tally.flag(20, Some(TOO_FAR_WARNING));
    } else if eye_span > 0.7 {
        tally.flag(15, Some(TOO_CLOSE_WARNING));
    }

    // Profile vs frontal
    let z_left = (landmarks[idx::LEFT_CHEEKBONE].z + landmarks[idx::LEFT_TEMPLE].z) / 2.0;
    let z_right = (landmarks[idx::RIGHT_CHEEKBONE].z + landmarks[idx::RIGHT_TEMPLE].z) / 2.0;
    if (z_left - z_right).abs() > 0.05 {
        tally.flag(20, Some(DEPTH_ASYMMETRY_WARNING));
    }

    let score = 100u32.saturating_sub(tally.penalty) as u8;
    debug!(
        "pose: horizontal={:.3} vertical={:.3} eye_span={:.3} score={}",
        horizontal, vertical, eye_span, score
    );

    PoseValidation {
        score,
        warnings: tally.warnings,
    }
}
