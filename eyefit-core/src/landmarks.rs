//! Face-mesh landmark input and the fixed anatomical index table.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::{Error, Result};

/// Point count of the canonical face mesh. Iris-refined meshes (478)
/// carry the same first 468 points.
pub const FACE_MESH_LANDMARKS: usize = 468;

/// A detected face point in normalized image coordinates; `z` is
/// relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Face-mesh indices of the anatomical points the pipeline reads.
pub mod index {
    pub const FOREHEAD_TOP: usize = 10;
    pub const CHIN_BOTTOM: usize = 152;

    // Forehead width is taken at eyebrow level
    pub const LEFT_FOREHEAD_OUTER: usize = 70;
    pub const RIGHT_FOREHEAD_OUTER: usize = 300;

    pub const LEFT_TEMPLE: usize = 127;
    pub const RIGHT_TEMPLE: usize = 356;

    /// Zygomatic width, normally the widest measurement of the face.
    pub const LEFT_CHEEKBONE: usize = 234;
    pub const RIGHT_CHEEKBONE: usize = 454;

    /// Gonion. Jaw width and the vertex of the jaw angle.
    pub const LEFT_JAW_ANGLE: usize = 172;
    pub const RIGHT_JAW_ANGLE: usize = 397;
    pub const LEFT_JAW_MID: usize = 136;
    pub const RIGHT_JAW_MID: usize = 365;
    pub const LEFT_JAW_LOWER: usize = 150;
    pub const RIGHT_JAW_LOWER: usize = 379;

    pub const NOSE_BRIDGE_LEFT: usize = 193;
    pub const NOSE_BRIDGE_RIGHT: usize = 417;

    pub const LEFT_CHEEK_INNER: usize = 116;
    pub const RIGHT_CHEEK_INNER: usize = 345;

    pub const NOSE_TIP: usize = 1;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const RIGHT_EYE_OUTER: usize = 263;
    pub const LEFT_EYE_INNER: usize = 133;
    pub const RIGHT_EYE_INNER: usize = 362;
}

/// Closed silhouette path around the face, first index repeated last.
pub const FACE_CONTOUR: [usize; 37] = [
    10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378, 400, 377, 152,
    148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67, 109, 10,
];

/// Landmark pairs spanned by each measurement, for overlay drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementLandmarks {
    pub face_length: [usize; 2],
    pub forehead_width: [usize; 2],
    pub cheekbone_width: [usize; 2],
    pub jaw_width: [usize; 2],
    pub temple_width: [usize; 2],
    pub nose_bridge: [usize; 2],
    pub eyes: [usize; 2],
}

pub const fn measurement_landmarks() -> MeasurementLandmarks {
    use index::*;
    MeasurementLandmarks {
        face_length: [FOREHEAD_TOP, CHIN_BOTTOM],
        forehead_width: [LEFT_FOREHEAD_OUTER, RIGHT_FOREHEAD_OUTER],
        cheekbone_width: [LEFT_CHEEKBONE, RIGHT_CHEEKBONE],
        jaw_width: [LEFT_JAW_ANGLE, RIGHT_JAW_ANGLE],
        temple_width: [LEFT_TEMPLE, RIGHT_TEMPLE],
        nose_bridge: [NOSE_BRIDGE_LEFT, NOSE_BRIDGE_RIGHT],
        eyes: [LEFT_EYE_OUTER, RIGHT_EYE_OUTER],
    }
}

/// A borrowed landmark sequence known to cover the full face mesh.
///
/// Construction is the only place an incomplete detector output is
/// rejected; indexing with the constants in [`index`] cannot go out of
/// bounds afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Landmarks<'a> {
    points: &'a [Landmark],
}

impl<'a> Landmarks<'a> {
    pub fn new(points: &'a [Landmark]) -> Result<Self> {
        if points.len() < FACE_MESH_LANDMARKS {
            return Err(Error::IncompleteLandmarks {
                expected: FACE_MESH_LANDMARKS,
                found: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &'a [Landmark] {
        self.points
    }
}

impl Index<usize> for Landmarks<'_> {
    type Output = Landmark;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_sequences() {
        let points = vec![Landmark::default(); 100];
        let err = Landmarks::new(&points).unwrap_err();
        assert_eq!(
            err,
            Error::IncompleteLandmarks {
                expected: FACE_MESH_LANDMARKS,
                found: 100
            }
        );
    }

    #[test]
    fn accepts_iris_refined_mesh() {
        let points = vec![Landmark::default(); 478];
        let landmarks = Landmarks::new(&points).unwrap();
        assert_eq!(landmarks.len(), 478);
    }

    #[test]
    fn table_fits_inside_the_mesh() {
        let m = measurement_landmarks();
        let pairs = [
            m.face_length,
            m.forehead_width,
            m.cheekbone_width,
            m.jaw_width,
            m.temple_width,
            m.nose_bridge,
            m.eyes,
        ];
        for idx in pairs.iter().flatten().chain(FACE_CONTOUR.iter()) {
            assert!(*idx < FACE_MESH_LANDMARKS);
        }
        assert_eq!(FACE_CONTOUR.first(), FACE_CONTOUR.last());
    }
}
