//! Frame style recommendations.
//!
//! Each face shape has a fixed list of flattering frame styles. The
//! context-aware ranking adjusts that list for prescription strength and
//! attaches the wearer's bridge fit.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classify::FaceShape;
use crate::geometry::round_half_up;
use crate::measure::FaceMeasurements;

pub const INADEQUATE_SUPPORT_NOTE: &str = "May not provide adequate support for your prescription strength. Consider full-rim alternatives.";
pub const SECURE_SUPPORT_NOTE: &str =
    "Excellent choice for your prescription strength - provides secure lens support.";

/// Substring that marks a recommendation carrying [`INADEQUATE_SUPPORT_NOTE`].
const INADEQUATE_MARKER: &str = "not provide adequate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Best,
    Good,
    Okay,
}

impl Priority {
    fn rank(self) -> u8 {
        match self {
            Priority::Best => 3,
            Priority::Good => 2,
            Priority::Okay => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeFit {
    Narrow,
    Standard,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suitability {
    Excellent,
    Good,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgeAppeal {
    Young,
    Mature,
    Universal,
}

struct FrameStyle {
    frame_type: &'static str,
    reason: &'static str,
    priority: Priority,
    suitability: Suitability,
    age_appeal: AgeAppeal,
}

const fn style(
    frame_type: &'static str,
    reason: &'static str,
    priority: Priority,
    suitability: Suitability,
    age_appeal: AgeAppeal,
) -> FrameStyle {
    FrameStyle {
        frame_type,
        reason,
        priority,
        suitability,
        age_appeal,
    }
}

use AgeAppeal as A;
use Priority as P;
use Suitability as S;

const OVAL_FRAMES: &[FrameStyle] = &[
    style("Wayfarer", "Classic shape that complements your balanced proportions", P::Best, S::Excellent, A::Universal),
    style("Aviator", "Enhances your natural symmetry with a timeless look", P::Best, S::Good, A::Universal),
    style("Cat Eye", "Adds stylish lift while maintaining balance", P::Good, S::Good, A::Young),
    style("Rectangular", "Adds structure without overwhelming your features", P::Good, S::Excellent, A::Mature),
    style("Round", "Creates a soft, harmonious look with your face shape", P::Okay, S::Good, A::Young),
    style("Browline", "Adds definition to the brow area gracefully", P::Okay, S::Excellent, A::Mature),
];

const ROUND_FRAMES: &[FrameStyle] = &[
    style("Rectangular", "Adds angular definition to balance soft curves", P::Best, S::Excellent, A::Universal),
    style("Square", "Creates contrast and adds structure to round features", P::Best, S::Excellent, A::Mature),
    style("Geometric", "Sharp angles provide strong visual contrast", P::Good, S::Good, A::Young),
    style("Browline", "Draws attention upward and adds width at the top", P::Good, S::Excellent, A::Mature),
    style("Wayfarer", "Slightly angular shape provides subtle definition", P::Okay, S::Excellent, A::Universal),
];

const SQUARE_FRAMES: &[FrameStyle] = &[
    style("Round", "Softens strong angular jawline for a balanced look", P::Best, S::Good, A::Universal),
    style("Oval", "Curves complement and soften square features", P::Best, S::Excellent, A::Universal),
    style("Aviator", "Teardrop shape contrasts well with angular jawline", P::Good, S::Good, A::Universal),
    style("Rimless", "Minimalist frame does not add more angularity", P::Good, S::Limited, A::Mature),
    style("Cat Eye", "Upswept shape softens and lifts square proportions", P::Okay, S::Good, A::Young),
];

const HEART_FRAMES: &[FrameStyle] = &[
    style("Aviator", "Wider bottom balances a broad forehead perfectly", P::Best, S::Good, A::Universal),
    style("Rimless", "Lightweight design keeps focus on your best features", P::Best, S::Limited, A::Mature),
    style("Round", "Soft curves complement a pointed chin line", P::Good, S::Good, A::Universal),
    style("Light Bottom-Heavy", "Adds width to the lower face for symmetry", P::Good, S::Good, A::Young),
    style("Oval", "Gentle curves balance forehead-chin ratio", P::Okay, S::Excellent, A::Universal),
];

const DIAMOND_FRAMES: &[FrameStyle] = &[
    style("Cat Eye", "Accentuates cheekbones and adds width at brow level", P::Best, S::Good, A::Young),
    style("Oval", "Soft curves balance prominent cheekbones", P::Best, S::Excellent, A::Universal),
    style("Semi-Rimless", "Adds subtle width at the top without bulk", P::Good, S::Good, A::Mature),
    style("Rimless", "Clean lines complement angular features", P::Good, S::Limited, A::Mature),
    style("Browline", "Adds definition to the forehead area", P::Okay, S::Excellent, A::Mature),
];

const OBLONG_FRAMES: &[FrameStyle] = &[
    style("Oversized", "Wide frames shorten the appearance of face length", P::Best, S::Good, A::Young),
    style("Wayfarer", "Bold shape adds width and visual breaks to face length", P::Best, S::Excellent, A::Universal),
    style("Square", "Wide square frames create horizontal balance", P::Good, S::Excellent, A::Mature),
    style("Round", "Curves break vertical lines and add width", P::Good, S::Good, A::Universal),
    style("Aviator", "Wide lens area covers more vertical space", P::Okay, S::Good, A::Universal),
];

const TRIANGLE_FRAMES: &[FrameStyle] = &[
    style("Cat Eye", "Wider top frames balance a broader jaw perfectly", P::Best, S::Good, A::Young),
    style("Browline", "Heavy top gives visual width to the forehead", P::Best, S::Excellent, A::Mature),
    style("Aviator", "Wide top contrasts and balances jaw width", P::Good, S::Good, A::Universal),
    style("Semi-Rimless", "Bold top half adds needed upper-face definition", P::Good, S::Good, A::Mature),
    style("Round", "Curved frames soften strong jaw angles", P::Okay, S::Good, A::Universal),
];

fn frame_styles(shape: FaceShape) -> &'static [FrameStyle] {
    match shape {
        FaceShape::Oval => OVAL_FRAMES,
        FaceShape::Round => ROUND_FRAMES,
        FaceShape::Square => SQUARE_FRAMES,
        FaceShape::Heart => HEART_FRAMES,
        FaceShape::Diamond => DIAMOND_FRAMES,
        FaceShape::Oblong => OBLONG_FRAMES,
        FaceShape::Triangle => TRIANGLE_FRAMES,
    }
}

/// One eye of an optical prescription. Diopter and degree values are
/// optional because forms leave them blank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionEye {
    pub spherical: Option<f64>,
    pub cylindrical: Option<f64>,
    pub axis: Option<f64>,
    pub prism: Option<f64>,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prescription {
    pub right_eye: PrescriptionEye,
    pub left_eye: PrescriptionEye,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrescriptionStrength {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionAnalysis {
    pub strength: PrescriptionStrength,
    pub needs_full_rim: bool,
    /// General advice, most important first.
    pub notes: Vec<&'static str>,
}

/// Blank and unparseable entries count as zero power.
fn power(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.abs(),
        _ => 0.0,
    }
}

fn has_prism(eye: &PrescriptionEye) -> bool {
    eye.prism.is_some_and(|p| p.abs() > 0.0)
}

pub fn analyze_prescription(prescription: Option<&Prescription>) -> PrescriptionAnalysis {
    let Some(rx) = prescription else {
        return PrescriptionAnalysis {
            strength: PrescriptionStrength::None,
            needs_full_rim: false,
            notes: Vec::new(),
        };
    };

    let (right, left) = (&rx.right_eye, &rx.left_eye);
    let max_sph = power(right.spherical).max(power(left.spherical));
    let max_cyl = power(right.cylindrical).max(power(left.cylindrical));
    // Cylinder weighs half as much as sphere
    let total = max_sph + max_cyl * 0.5;

    let (strength, mut needs_full_rim, mut notes) = if total == 0.0 {
        (PrescriptionStrength::None, false, vec![])
    } else if total <= 2.0 {
        (
            PrescriptionStrength::Low,
            false,
            vec!["Your prescription works well with any frame style"],
        )
    } else if total <= 4.0 {
        (
            PrescriptionStrength::Moderate,
            true,
            vec!["Smaller frames will minimize lens thickness"],
        )
    } else if total <= 6.0 {
        (
            PrescriptionStrength::High,
            true,
            vec![
                "Choose full-rim frames to secure thicker lenses",
                "Smaller, rounder lens shapes reduce edge thickness",
            ],
        )
    } else {
        (
            PrescriptionStrength::VeryHigh,
            true,
            vec![
                "Full-rim frames highly recommended for lens support",
                "Smaller frames significantly improve appearance",
                "Consider high-index lenses to reduce thickness",
            ],
        )
    };

    if has_prism(right) || has_prism(left) {
        notes.push("Prism correction requires sturdy full-rim frames");
        needs_full_rim = true;
    }

    if max_cyl > 2.0 {
        notes.push("High astigmatism: choose frames with stable lens positioning");
    }

    debug!(
        "prescription: total={:.2} strength={:?} full_rim={}",
        total, strength, needs_full_rim
    );

    PrescriptionAnalysis {
        strength,
        needs_full_rim,
        notes,
    }
}

pub fn analyze_bridge_fit(nose_bridge_width_mm: u32) -> BridgeFit {
    if nose_bridge_width_mm < 16 {
        BridgeFit::Narrow
    } else if nose_bridge_width_mm > 21 {
        BridgeFit::Wide
    } else {
        BridgeFit::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecommendation {
    #[serde(rename = "type")]
    pub frame_type: String,
    pub reason: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_fit: Option<BridgeFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_note: Option<String>,
}

impl FrameRecommendation {
    fn from_style(style: &FrameStyle) -> Self {
        Self {
            frame_type: style.frame_type.to_string(),
            reason: style.reason.to_string(),
            priority: style.priority,
            bridge_fit: None,
            prescription_note: None,
        }
    }

    fn warns_inadequate_support(&self) -> bool {
        self.prescription_note
            .as_deref()
            .is_some_and(|note| note.contains(INADEQUATE_MARKER))
    }
}

/// Everything the ranking needs about one wearer.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    pub face_shape: FaceShape,
    pub measurements: &'a FaceMeasurements,
    pub prescription: Option<&'a Prescription>,
    pub age: Option<u32>,
    /// Carried for form compatibility; no ranking rule reads it.
    pub gender: Option<&'a str>,
}

/// Age appeal is checked but never changes the priority. Whether older
/// wearers should see youth-oriented styles lower is still undecided.
fn adjust_for_age(priority: Priority, age: Option<u32>, appeal: AgeAppeal) -> Priority {
    match (age, appeal) {
        (Some(age), AgeAppeal::Mature) if age > 0 && age < 30 => priority,
        (Some(age), AgeAppeal::Young) if age >= 50 => priority,
        _ => priority,
    }
}

/// Plain per-shape suggestions without bridge fit or prescription notes.
pub fn frame_suggestions(shape: FaceShape) -> Vec<FrameRecommendation> {
    frame_styles(shape)
        .iter()
        .map(FrameRecommendation::from_style)
        .collect()
}

/// Ranked suggestions adjusted for prescription, bridge fit and age.
pub fn enhanced_recommendations(ctx: &RecommendationContext<'_>) -> Vec<FrameRecommendation> {
    let rx = analyze_prescription(ctx.prescription);
    let bridge_fit = analyze_bridge_fit(ctx.measurements.nose_bridge_width_mm);

    let mut recommendations: Vec<FrameRecommendation> = frame_styles(ctx.face_shape)
        .iter()
        .map(|style| {
            let mut rec = FrameRecommendation::from_style(style);
            rec.bridge_fit = Some(bridge_fit);

            if rx.needs_full_rim {
                if style.frame_type.to_lowercase().contains("rimless") {
                    rec.priority = Priority::Okay;
                    rec.prescription_note = Some(INADEQUATE_SUPPORT_NOTE.to_string());
                } else if style.suitability == Suitability::Excellent {
                    rec.prescription_note = Some(SECURE_SUPPORT_NOTE.to_string());
                }
            }

            rec.priority = adjust_for_age(rec.priority, ctx.age, style.age_appeal);
            rec
        })
        .collect();

    // Stable: table order survives within a priority
    recommendations.sort_by(|a, b| {
        b.priority.rank().cmp(&a.priority.rank()).then_with(|| {
            if rx.needs_full_rim {
                a.warns_inadequate_support()
                    .cmp(&b.warns_inadequate_support())
            } else {
                std::cmp::Ordering::Equal
            }
        })
    });

    if let (Some(top), Some(&note)) = (recommendations.first_mut(), rx.notes.first()) {
        if top.prescription_note.is_none() {
            top.prescription_note = Some(note.to_string());
        }
    }

    recommendations
}

/// Bridge width assumed when deriving lens width from total frame width.
const STANDARD_BRIDGE_MM: i64 = 18;

/// Frame size in optical notation, e.g. `"Medium (33mm lens / 84mm total)"`.
pub fn calculate_frame_size(cheekbone_width_mm: u32) -> String {
    let total = i64::from(cheekbone_width_mm);
    let lens = round_half_up((total - STANDARD_BRIDGE_MM) as f64 / 2.0) as i64;

    let band = if lens <= 47 {
        "Small"
    } else if lens <= 52 {
        "Medium"
    } else if lens <= 57 {
        "Large"
    } else {
        "Extra Large"
    };
    format!("{band} ({lens}mm lens / {total}mm total)")
}
