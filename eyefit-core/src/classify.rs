//! Rule-table face shape classification.
//!
//! Every shape owns a list of rule chains. A chain looks at one ratio and
//! awards the points of the first band that matches, so bands inside a
//! chain are ordered from strongest to weakest evidence.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::round_half_up;
use crate::measure::FaceRatios;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Diamond,
    Oblong,
    Triangle,
}

impl FaceShape {
    /// Canonical order. Ties between equal scores go to the earlier shape.
    pub const ALL: [FaceShape; 7] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Oblong,
        FaceShape::Triangle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Oval => "Oval",
            Self::Round => "Round",
            Self::Square => "Square",
            Self::Heart => "Heart",
            Self::Diamond => "Diamond",
            Self::Oblong => "Oblong",
            Self::Triangle => "Triangle",
        }
    }

    fn rules(&self) -> &'static [Chain] {
        match self {
            Self::Oval => OVAL,
            Self::Round => ROUND,
            Self::Square => SQUARE,
            Self::Heart => HEART,
            Self::Diamond => DIAMOND,
            Self::Oblong => OBLONG,
            Self::Triangle => TRIANGLE,
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FaceShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaceShape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownFaceShape(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub shape: FaceShape,
    /// 35..=98
    pub confidence: u8,
}

#[derive(Clone, Copy)]
enum Ratio {
    LengthToWidth,
    ForeheadToJaw,
    CheekToJaw,
    ForeheadToCheek,
    JawAngle,
}

impl Ratio {
    fn of(self, r: &FaceRatios) -> f64 {
        match self {
            Ratio::LengthToWidth => r.length_to_width,
            Ratio::ForeheadToJaw => r.forehead_to_jaw,
            Ratio::CheekToJaw => r.cheek_to_jaw,
            Ratio::ForeheadToCheek => r.forehead_to_cheek,
            Ratio::JawAngle => r.jaw_angle_sharpness,
        }
    }
}

#[derive(Clone, Copy)]
enum Band {
    /// lo <= v <= hi
    Within(f64, f64),
    /// lo < v < hi
    Between(f64, f64),
    /// v > t
    Above(f64),
    /// v < t
    Below(f64),
    /// |v - center| < tolerance
    Near(f64, f64),
    /// v < lo or v > hi
    Outside(f64, f64),
}

impl Band {
    fn contains(self, v: f64) -> bool {
        match self {
            Band::Within(lo, hi) => v >= lo && v <= hi,
            Band::Between(lo, hi) => v > lo && v < hi,
            Band::Above(t) => v > t,
            Band::Below(t) => v < t,
            Band::Near(center, tolerance) => (v - center).abs() < tolerance,
            Band::Outside(lo, hi) => v < lo || v > hi,
        }
    }
}

struct Chain {
    ratio: Ratio,
    bands: &'static [(Band, i32)],
}

impl Chain {
    fn points(&self, ratios: &FaceRatios) -> i32 {
        let v = self.ratio.of(ratios);
        self.bands
            .iter()
            .find(|(band, _)| band.contains(v))
            .map_or(0, |&(_, points)| points)
    }
}

use Band::*;
use Ratio::*;

/// Moderately long, forehead a little wider than jaw, softly rounded jaw.
const OVAL: &[Chain] = &[
    Chain {
        ratio: LengthToWidth,
        bands: &[(Within(1.3, 1.5), 4), (Within(1.2, 1.6), 2), (Within(1.15, 1.7), 1)],
    },
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Within(1.05, 1.25), 3), (Within(1.0, 1.3), 1)],
    },
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Within(0.85, 0.98), 2)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Within(1.05, 1.25), 2)],
    },
    Chain {
        ratio: JawAngle,
        bands: &[(Between(130.0, 145.0), 2)],
    },
];

/// Length close to width, similar widths, very rounded jaw.
const ROUND: &[Chain] = &[
    Chain {
        ratio: LengthToWidth,
        bands: &[(Within(1.0, 1.2), 4), (Within(0.9, 1.3), 2), (Outside(0.9, 1.3), -1)],
    },
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Near(1.0, 0.1), 3), (Near(1.0, 0.15), 1)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Within(1.0, 1.12), 2)],
    },
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Near(1.0, 0.1), 1)],
    },
    Chain {
        ratio: JawAngle,
        bands: &[(Above(140.0), 3), (Above(135.0), 1)],
    },
];

/// Forehead and jaw nearly equal, sharp angular jaw.
const SQUARE: &[Chain] = &[
    Chain {
        ratio: LengthToWidth,
        bands: &[(Within(1.0, 1.25), 3), (Within(0.9, 1.3), 1)],
    },
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Near(1.0, 0.08), 4), (Near(1.0, 0.12), 2)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Within(0.95, 1.1), 2)],
    },
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Near(1.0, 0.1), 1)],
    },
    Chain {
        ratio: JawAngle,
        bands: &[(Below(120.0), 4), (Below(130.0), 2), (Above(135.0), -2)],
    },
];

/// Wide forehead narrowing to a pointed chin.
const HEART: &[Chain] = &[
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Above(1.3), 4), (Above(1.2), 2), (Above(1.1), 1)],
    },
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Above(0.95), 2), (Above(0.88), 1)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Above(1.25), 2), (Above(1.15), 1)],
    },
    Chain {
        ratio: LengthToWidth,
        bands: &[(Within(1.2, 1.6), 1)],
    },
    Chain {
        ratio: JawAngle,
        bands: &[(Above(125.0), 1)],
    },
];

/// Cheekbones clearly widest, forehead and jaw both narrow.
const DIAMOND: &[Chain] = &[
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Below(0.82), 4), (Below(0.88), 2), (Below(0.92), 1)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Above(1.25), 3), (Above(1.15), 2)],
    },
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Between(1.02, 1.2), 2)],
    },
    Chain {
        ratio: LengthToWidth,
        bands: &[(Within(1.25, 1.6), 1)],
    },
];

/// Long face with near-parallel sides.
const OBLONG: &[Chain] = &[
    Chain {
        ratio: LengthToWidth,
        bands: &[(Above(1.6), 5), (Above(1.5), 3), (Above(1.4), 1), (Below(1.3), -1)],
    },
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Near(1.0, 0.12), 2), (Near(1.0, 0.18), 1)],
    },
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Near(1.0, 0.1), 1)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Near(1.0, 0.12), 1)],
    },
];

/// Pear: jaw wider than forehead.
const TRIANGLE: &[Chain] = &[
    Chain {
        ratio: ForeheadToJaw,
        bands: &[(Below(0.8), 5), (Below(0.9), 3), (Below(0.95), 1)],
    },
    Chain {
        ratio: CheekToJaw,
        bands: &[(Below(1.08), 2), (Below(1.15), 1)],
    },
    Chain {
        ratio: ForeheadToCheek,
        bands: &[(Below(0.9), 1)],
    },
    Chain {
        ratio: LengthToWidth,
        bands: &[(Within(1.1, 1.5), 1)],
    },
];

/// Score a best match is normalized against.
const MAX_PLAUSIBLE_SCORE: f64 = 15.0;
const MIN_CONFIDENCE: f64 = 35.0;
const MAX_CONFIDENCE: f64 = 98.0;

/// Points for every shape, in [`FaceShape::ALL`] order.
pub fn shape_scores(ratios: &FaceRatios) -> [(FaceShape, i32); 7] {
    FaceShape::ALL.map(|shape| {
        let score = shape.rules().iter().map(|chain| chain.points(ratios)).sum::<i32>();
        (shape, score)
    })
}

pub fn classify_face_shape(ratios: &FaceRatios) -> Classification {
    let mut ranked = shape_scores(ratios);
    debug!("shape scores: {:?}", ranked);
    // Stable, so equal scores keep canonical order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let (shape, best) = ranked[0];
    let second = ranked[1].1;
    let third = ranked[2].1;

    let margin1 = (best - second).max(0) as f64;
    let margin2 = (second - third).max(0) as f64;

    let base = (best as f64 / MAX_PLAUSIBLE_SCORE * 60.0).min(60.0);
    let margin_bonus = (margin1 / 5.0 * 30.0).min(30.0);
    let clarity_bonus = (margin2 / 3.0 * 10.0).min(10.0);

    let confidence =
        round_half_up(base + margin_bonus + clarity_bonus).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
    debug!("classified {} with confidence {}", shape, confidence);

    Classification {
        shape,
        confidence: confidence as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios(ltw: f64, ftj: f64, ctj: f64, ftc: f64, jaw: f64) -> FaceRatios {
        FaceRatios {
            length_to_width: ltw,
            forehead_to_jaw: ftj,
            cheek_to_jaw: ctj,
            forehead_to_cheek: ftc,
            jaw_angle_sharpness: jaw,
        }
    }

    fn score_of(scores: &[(FaceShape, i32); 7], shape: FaceShape) -> i32 {
        scores.iter().find(|(s, _)| *s == shape).map(|(_, p)| *p).unwrap()
    }

    #[test]
    fn square_rules() {
        // Only the forehead/jaw and jaw angle chains fire
        let scores = shape_scores(&ratios(2.0, 1.0, 2.0, 0.5, 110.0));
        assert_eq!(score_of(&scores, FaceShape::Square), 8);

        let scores = shape_scores(&ratios(2.0, 1.0, 2.0, 0.5, 140.0));
        assert_eq!(score_of(&scores, FaceShape::Square), 2);
    }

    #[test]
    fn heart_forehead_rule() {
        let scores = shape_scores(&ratios(1.4, 1.35, 1.3, 0.97, 130.0));
        // 4 + 2 + 2 + 1 + 1
        assert_eq!(score_of(&scores, FaceShape::Heart), 10);
        let c = classify_face_shape(&ratios(1.4, 1.35, 1.3, 0.97, 130.0));
        assert_eq!(c.shape, FaceShape::Heart);
    }

    #[test]
    fn round_penalizes_long_faces() {
        let scores = shape_scores(&ratios(1.8, 2.0, 2.0, 0.5, 100.0));
        assert_eq!(score_of(&scores, FaceShape::Round), -1);
        assert_eq!(score_of(&scores, FaceShape::Oblong), 5);
    }

    #[test]
    fn classic_oblong() {
        let c = classify_face_shape(&ratios(1.7, 1.0, 1.0, 1.0, 150.0));
        assert_eq!(c.shape, FaceShape::Oblong);
        // Oblong 9, Round 8, Square 5: 36 + 6 + 10
        assert_eq!(c.confidence, 52);
    }

    #[test]
    fn ties_resolve_in_canonical_order() {
        let r = ratios(1.7, 1.0, 1.0, 1.0, 125.0);
        let scores = shape_scores(&r);
        assert_eq!(score_of(&scores, FaceShape::Square), 9);
        assert_eq!(score_of(&scores, FaceShape::Oblong), 9);
        assert_eq!(classify_face_shape(&r).shape, FaceShape::Square);
    }

    #[test]
    fn classic_triangle() {
        let c = classify_face_shape(&ratios(1.3, 0.75, 1.0, 0.8, 120.0));
        assert_eq!(c.shape, FaceShape::Triangle);
    }

    #[test]
    fn no_evidence_floors_confidence_and_keeps_order() {
        let c = classify_face_shape(&ratios(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN));
        assert_eq!(c.shape, FaceShape::Oval);
        assert_eq!(c.confidence, 35);
    }

    #[test]
    fn confidence_stays_in_range() {
        let grid = [0.0, 0.7, 0.9, 1.0, 1.1, 1.25, 1.4, 1.6, 2.0];
        let angles = [0.0, 110.0, 128.0, 138.0, 150.0, 180.0];
        for &a in &grid {
            for &b in &grid {
                for &c in &grid {
                    for &jaw in &angles {
                        let result = classify_face_shape(&ratios(a, b, c, b / c.max(0.1), jaw));
                        assert!((35..=98).contains(&result.confidence));
                    }
                }
            }
        }
    }

    #[test]
    fn parses_shape_names() {
        assert_eq!("heart".parse::<FaceShape>().unwrap(), FaceShape::Heart);
        assert_eq!(" Oblong ".parse::<FaceShape>().unwrap(), FaceShape::Oblong);
        assert!(matches!(
            "Egg".parse::<FaceShape>(),
            Err(Error::UnknownFaceShape(_))
        ));
    }
}
