use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classify::{classify_face_shape, FaceShape};
use crate::error::Result;
use crate::geometry::round_half_up;
use crate::landmarks::{Landmark, Landmarks};
use crate::measure::{extract_measurements, FaceMeasurements, FaceRatios};
use crate::pose::validate_face_pose;
use crate::recommend::{
    calculate_frame_size, enhanced_recommendations, frame_suggestions, FrameRecommendation,
    Prescription, RecommendationContext,
};

/// Lowest confidence reported once pose quality has been applied.
const MIN_REPORTED_CONFIDENCE: f64 = 25.0;

/// Everything derived from one capture, ready for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetectionResult {
    pub face_shape: FaceShape,
    pub frame_size: String,
    pub frame_suggestion: Vec<FrameRecommendation>,
    /// Opaque capture payload, passed through for downstream display.
    pub face_image: String,
    pub measurements: FaceMeasurements,
    pub confidence: u8,
    pub ratios: FaceRatios,
    pub pose_warnings: Vec<String>,
    pub pose_quality: u8,
}

impl FaceDetectionResult {
    /// Re-rank `frame_suggestion` once patient form data is known.
    pub fn apply_patient_context(
        &mut self,
        prescription: Option<&Prescription>,
        age: Option<u32>,
        gender: Option<&str>,
    ) {
        let ctx = RecommendationContext {
            face_shape: self.face_shape,
            measurements: &self.measurements,
            prescription,
            age,
            gender,
        };
        self.frame_suggestion = enhanced_recommendations(&ctx);
    }
}

/// Runs pose validation, measurement, classification and frame lookup
/// over one detector output.
///
/// `image_width` is part of the detector contract but unused: all math
/// happens in normalized coordinates. Fails only when the detector
/// returned fewer points than the face mesh defines.
pub fn process_face_detection(
    points: &[Landmark],
    image_width: u32,
    face_image: impl Into<String>,
) -> Result<FaceDetectionResult> {
    let landmarks = Landmarks::new(points)?;
    debug!(
        "processing {} landmarks from a {}px wide capture",
        landmarks.len(),
        image_width
    );

    let pose = validate_face_pose(&landmarks);
    let set = extract_measurements(&landmarks);
    let classification = classify_face_shape(&set.ratios);

    // A poor pose discounts even a clear shape match
    let pose_factor = f64::from(pose.score) / 100.0;
    let confidence = round_half_up(f64::from(classification.confidence) * pose_factor)
        .max(MIN_REPORTED_CONFIDENCE) as u8;

    info!(
        "face shape {} (confidence {}%, pose quality {})",
        classification.shape, confidence, pose.score
    );

    Ok(FaceDetectionResult {
        face_shape: classification.shape,
        frame_size: calculate_frame_size(set.measurements.cheekbone_width_mm),
        frame_suggestion: frame_suggestions(classification.shape),
        face_image: face_image.into(),
        measurements: set.measurements,
        confidence,
        ratios: set.ratios,
        pose_warnings: pose.warnings,
        pose_quality: pose.score,
    })
}
