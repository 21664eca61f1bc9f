//! JSON hand-off with the external collaborators: the landmark detector,
//! the patient form and the result consumer.

use anyhow::{Context, Result};
use eyefit_core::{FaceDetectionResult, Landmark, Prescription};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Patient details collected by the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientForm {
    pub prescription: Option<Prescription>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl PatientForm {
    pub fn apply_to(&self, result: &mut FaceDetectionResult) {
        result.apply_patient_context(
            self.prescription.as_ref(),
            self.age,
            self.gender.as_deref(),
        );
    }
}

/// Detectors emit either a bare array of points or a single face object
/// with a `landmarks` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkFile {
    Points(Vec<Landmark>),
    Face { landmarks: Vec<Landmark> },
}

pub fn load_landmarks(path: &Path) -> Result<Vec<Landmark>> {
    let data =
        std::fs::read(path).with_context(|| format!("reading landmarks {}", path.display()))?;
    let file: LandmarkFile = serde_json::from_slice(&data)
        .with_context(|| format!("parsing landmarks {}", path.display()))?;
    Ok(match file {
        LandmarkFile::Points(points) => points,
        LandmarkFile::Face { landmarks } => landmarks,
    })
}

pub fn load_patient(path: &Path) -> Result<PatientForm> {
    let data =
        std::fs::read(path).with_context(|| format!("reading patient form {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing patient form {}", path.display()))
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

pub fn save_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_json(value, pretty)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
