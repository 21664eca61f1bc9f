use eyefit_core::landmarks::{index as idx, FACE_MESH_LANDMARKS};
use eyefit_core::Landmark;

/// Frontal, level, well framed face with oval proportions.
///
/// Eye corners are 0.3 apart, so every 0.1 of normalized distance is 21mm.
/// Raw ratios: length/width 1.42, forehead/jaw 1.11, cheek/jaw 1.22,
/// forehead/cheek 0.91, jaw angle 138 degrees.
pub fn oval_face() -> Vec<Landmark> {
    let mut points = vec![Landmark::new(0.5, 0.5, 0.0); FACE_MESH_LANDMARKS];
    let mut set = |i: usize, x: f64, y: f64| points[i] = Landmark::new(x, y, 0.0);

    set(idx::LEFT_EYE_OUTER, 0.35, 0.45);
    set(idx::RIGHT_EYE_OUTER, 0.65, 0.45);
    set(idx::FOREHEAD_TOP, 0.5, 0.15);
    set(idx::CHIN_BOTTOM, 0.5, 0.86);
    // 55% of the way down from forehead to chin
    set(idx::NOSE_TIP, 0.5, 0.5405);

    set(idx::LEFT_FOREHEAD_OUTER, 0.2725, 0.30);
    set(idx::RIGHT_FOREHEAD_OUTER, 0.7275, 0.30);
    set(idx::LEFT_CHEEKBONE, 0.25, 0.5);
    set(idx::RIGHT_CHEEKBONE, 0.75, 0.5);
    set(idx::LEFT_TEMPLE, 0.24, 0.35);
    set(idx::RIGHT_TEMPLE, 0.76, 0.35);
    set(idx::NOSE_BRIDGE_LEFT, 0.46, 0.45);
    set(idx::NOSE_BRIDGE_RIGHT, 0.54, 0.45);

    set(idx::LEFT_JAW_ANGLE, 0.295, 0.70);
    set(idx::RIGHT_JAW_ANGLE, 0.705, 0.70);
    set(idx::LEFT_JAW_MID, 0.295, 0.60);
    set(idx::RIGHT_JAW_MID, 0.705, 0.60);
    // 0.1 * (sin 138, -cos 138) away from each vertex
    set(idx::LEFT_JAW_LOWER, 0.361913, 0.774314);
    set(idx::RIGHT_JAW_LOWER, 0.638087, 0.774314);

    points
}
