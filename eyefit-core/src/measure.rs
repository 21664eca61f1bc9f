//! Landmark-to-millimeter measurement extraction.
//!
//! Distances are calibrated against the outer eye-corner span, taken as
//! an average adult inter-pupillary distance. Ratios use the raw
//! normalized distances so calibration error cancels out.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::geometry::{angle_at_vertex, distance, round_half_up};
use crate::landmarks::{index as idx, Landmarks};

/// Average adult inter-pupillary distance in millimeters.
pub const AVERAGE_IPD_MM: f64 = 63.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceMeasurements {
    pub face_length_mm: u32,
    pub forehead_width_mm: u32,
    pub cheekbone_width_mm: u32,
    pub jaw_width_mm: u32,
    pub temple_width_mm: u32,
    pub nose_bridge_width_mm: u32,
}

/// Dimensionless shape ratios. `jaw_angle_sharpness` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRatios {
    pub length_to_width: f64,
    pub forehead_to_jaw: f64,
    pub cheek_to_jaw: f64,
    pub forehead_to_cheek: f64,
    pub jaw_angle_sharpness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementSet {
    pub measurements: FaceMeasurements,
    pub ratios: FaceRatios,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn to_mm(normalized: f64, ipd: f64) -> u32 {
    if ipd == 0.0 {
        return 0;
    }
    round_half_up(normalized / ipd * AVERAGE_IPD_MM) as u32
}

/// Zero widths only come from collapsed landmarks; they yield 0 instead
/// of an infinite ratio.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn jaw_angle(landmarks: &Landmarks<'_>, side: Side) -> f64 {
    let (mid, vertex, lower) = match side {
        Side::Left => (idx::LEFT_JAW_MID, idx::LEFT_JAW_ANGLE, idx::LEFT_JAW_LOWER),
        Side::Right => (idx::RIGHT_JAW_MID, idx::RIGHT_JAW_ANGLE, idx::RIGHT_JAW_LOWER),
    };
    angle_at_vertex(&landmarks[mid], &landmarks[vertex], &landmarks[lower])
}

pub fn extract_measurements(landmarks: &Landmarks<'_>) -> MeasurementSet {
    let span = |a: usize, b: usize| distance(&landmarks[a], &landmarks[b]);

    let ipd = span(idx::LEFT_EYE_OUTER, idx::RIGHT_EYE_OUTER);
    if ipd == 0.0 {
        warn!("eye corners coincide, measurements cannot be calibrated and fall back to 0mm");
    }

    let face_length = span(idx::FOREHEAD_TOP, idx::CHIN_BOTTOM);
    let forehead_width = span(idx::LEFT_FOREHEAD_OUTER, idx::RIGHT_FOREHEAD_OUTER);
    let cheekbone_width = span(idx::LEFT_CHEEKBONE, idx::RIGHT_CHEEKBONE);
    let jaw_width = span(idx::LEFT_JAW_ANGLE, idx::RIGHT_JAW_ANGLE);
    let temple_width = span(idx::LEFT_TEMPLE, idx::RIGHT_TEMPLE);
    let nose_bridge_width = span(idx::NOSE_BRIDGE_LEFT, idx::NOSE_BRIDGE_RIGHT);

    let measurements = FaceMeasurements {
        face_length_mm: to_mm(face_length, ipd),
        forehead_width_mm: to_mm(forehead_width, ipd),
        cheekbone_width_mm: to_mm(cheekbone_width, ipd),
        jaw_width_mm: to_mm(jaw_width, ipd),
        temple_width_mm: to_mm(temple_width, ipd),
        nose_bridge_width_mm: to_mm(nose_bridge_width, ipd),
    };

    let jaw_angle_sharpness =
        (jaw_angle(landmarks, Side::Left) + jaw_angle(landmarks, Side::Right)) / 2.0;

    let ratios = FaceRatios {
        length_to_width: ratio(face_length, cheekbone_width),
        forehead_to_jaw: ratio(forehead_width, jaw_width),
        cheek_to_jaw: ratio(cheekbone_width, jaw_width),
        forehead_to_cheek: ratio(forehead_width, cheekbone_width),
        jaw_angle_sharpness,
    };

    debug!("measurements: {:?}", measurements);
    debug!("ratios: {:?}", ratios);

    MeasurementSet {
        measurements,
        ratios,
    }
}
