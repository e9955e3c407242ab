use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "SCY")]
    Scy,
    #[serde(rename = "SCM")]
    Scm,
    #[serde(rename = "LCM")]
    Lcm,
}

impl Course {
    /// Accepts the one-letter codes Y, S and L in any case, and the full
    /// codes SCY, SCM and LCM exactly as written.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "Y" => return Some(Course::Scy),
            "S" => return Some(Course::Scm),
            "L" => return Some(Course::Lcm),
            _ => {}
        }
        match code {
            "SCY" => Some(Course::Scy),
            "SCM" => Some(Course::Scm),
            "LCM" => Some(Course::Lcm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::Scy => "SCY",
            Course::Scm => "SCM",
            Course::Lcm => "LCM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stroke {
    Free,
    Back,
    Breast,
    Fly,
    Im,
}

const STROKE_SYNONYMS: [(Stroke, &[&str]); 5] = [
    (Stroke::Free, &["FREE", "FREESTYLE", "FR"]),
    (Stroke::Back, &["BACK", "BACKSTROKE", "BK"]),
    (Stroke::Breast, &["BREAST", "BREASTSTROKE", "BR"]),
    (Stroke::Fly, &["FLY", "BUTTERFLY", "FL"]),
    (Stroke::Im, &["IM", "I.M.", "INDIVIDUAL MEDLEY", "MEDLEY"]),
];

impl Stroke {
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_uppercase();
        STROKE_SYNONYMS
            .iter()
            .find(|(_, names)| names.contains(&upper.as_str()))
            .map(|(stroke, _)| *stroke)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Free => "FREE",
            Stroke::Back => "BACK",
            Stroke::Breast => "BREAST",
            Stroke::Fly => "FLY",
            Stroke::Im => "IM",
        }
    }
}

/// Canonical identity of an event such as "100 Y FREESTYLE"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub distance: u32,
    pub course: Course,
    pub stroke: Stroke,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.distance, self.course.as_str(), self.stroke.as_str())
    }
}

/// Why a label could not be turned into an [`EventKey`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventLabelError {
    #[error("expected \"<distance> <course> <stroke>\", got {0:?}")]
    Malformed(String),
    #[error("invalid distance {0:?}")]
    Distance(String),
    #[error("unknown course {0:?}")]
    Course(String),
    #[error("unknown stroke {0:?}")]
    Stroke(String),
}

pub fn parse_event_label(label: &str) -> Result<EventKey, EventLabelError> {
    let parts: Vec<&str> = label.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(EventLabelError::Malformed(label.to_string()));
    }

    let distance = parts[0]
        .parse::<u32>()
        .map_err(|_| EventLabelError::Distance(parts[0].to_string()))?;
    let course = Course::from_code(parts[1]).ok_or_else(|| EventLabelError::Course(parts[1].to_string()))?;

    let stroke_name = parts[2..].join(" ");
    let stroke = Stroke::from_name(&stroke_name).ok_or_else(|| EventLabelError::Stroke(stroke_name.to_uppercase()))?;

    Ok(EventKey {
        distance,
        course,
        stroke,
    })
}
