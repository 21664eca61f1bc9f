//! Face measurement, face-shape classification and eyewear frame
//! recommendation from face-mesh landmarks.
//!
//! The pipeline runs leaves first:
//!
//! 1. [`pose`] scores how frontal and well framed the capture is
//! 2. [`measure`] turns landmarks into millimeter measurements and ratios
//! 3. [`classify`] scores the seven face shapes and picks a winner
//! 4. [`recommend`] ranks frame styles for the shape and prescription
//!
//! [`pipeline::process_face_detection`] runs all of them in one call.

mod error;
pub mod classify;
pub mod geometry;
pub mod landmarks;
pub mod measure;
pub mod pipeline;
pub mod pose;
pub mod recommend;

pub use classify::{classify_face_shape, shape_scores, Classification, FaceShape};
pub use error::{Error, Result};
pub use landmarks::{Landmark, Landmarks};
pub use measure::{extract_measurements, FaceMeasurements, FaceRatios, MeasurementSet};
pub use pipeline::{process_face_detection, FaceDetectionResult};
pub use pose::{validate_face_pose, PoseValidation};
pub use recommend::{
    calculate_frame_size, enhanced_recommendations, frame_suggestions, BridgeFit,
    FrameRecommendation, Prescription, PrescriptionEye, Priority, RecommendationContext,
};
