pub mod config;
pub mod input;

// Re-export core types for convenience
pub use eyefit_core::{
    calculate_frame_size, classify, enhanced_recommendations, landmarks, measure, pipeline, pose,
    process_face_detection, recommend, FaceDetectionResult, FaceShape, Landmark,
    RecommendationContext,
};
