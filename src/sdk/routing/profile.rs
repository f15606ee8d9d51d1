use serde::Serialize;
use std::fmt;

/// Travel mode a path is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl Profile {
    /// Maps free-form mode names and their synonyms onto a supported profile.
    /// Anything unknown, including no value at all, falls back to driving.
    pub fn normalize(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("walking" | "walk" | "on foot" | "foot") => Self::Walking,
            Some("cycling" | "cycle" | "bicycle" | "bike") => Self::Cycling,
            _ => Self::Driving,
        }
    }

    /// Path segment used by the directions API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
