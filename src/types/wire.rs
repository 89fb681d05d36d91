//! Request and response shapes for casting and solar correction

use serde::{Deserialize, Serialize};
use crate::types::{CastResult, HexagramName, LineKind, LineState, PalaceReading, SolarTimeResult};

/// Cast request; all fields optional, at most one of `seed`/`phrase`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastRequest {
    /// Deterministic seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Seed derived from a phrase (e.g. the question asked)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    /// Replay of six pre-drawn back-counts, bottom to top
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tosses: Option<Vec<u8>>,
}

/// One line of a cast response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub position: usize,
    pub is_yang: bool,
    pub is_moving: bool,
    pub backs: u8,
    pub kind: LineKind,
    pub symbol: String,
    pub label: String,
    pub position_name: String,
}

impl From<&LineState> for LineView {
    fn from(line: &LineState) -> Self {
        Self {
            position: line.position(),
            is_yang: line.is_yang(),
            is_moving: line.is_moving(),
            backs: line.toss().backs(),
            kind: line.kind(),
            symbol: line.symbol().to_string(),
            label: line.label().to_string(),
            position_name: line.position_name().to_string(),
        }
    }
}

/// Named hexagram in a cast response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexagramView {
    pub pattern: u8,
    pub number: u8,
    pub name: String,
    pub traditional_name: String,
    /// Upper trigram, e.g. ☰乾
    pub upper: String,
    /// Lower trigram, e.g. ☷坤
    pub lower: String,
}

impl From<&HexagramName> for HexagramView {
    fn from(entry: &HexagramName) -> Self {
        Self {
            pattern: entry.pattern,
            number: entry.number,
            name: entry.name.clone(),
            traditional_name: entry.traditional_name.clone(),
            upper: entry.upper.to_string(),
            lower: entry.lower.to_string(),
        }
    }
}

/// Cast response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastResponse {
    pub primary_pattern: u8,
    pub transformed_pattern: u8,
    pub lines: Vec<LineView>,
    pub moving_positions: Vec<usize>,
    pub has_changes: bool,
    pub primary: HexagramView,
    pub transformed: HexagramView,
    /// Palace, 世/應 and branch per line
    pub palace: PalaceReading,
}

impl CastResponse {
    pub fn new(
        cast: &CastResult,
        primary: &HexagramName,
        transformed: &HexagramName,
        palace: PalaceReading,
    ) -> Self {
        Self {
            primary_pattern: cast.primary().pattern(),
            transformed_pattern: cast.transformed().pattern(),
            lines: cast.lines().iter().map(LineView::from).collect(),
            moving_positions: cast.moving_positions().to_vec(),
            has_changes: cast.has_changes(),
            primary: primary.into(),
            transformed: transformed.into(),
            palace,
        }
    }
}

/// Solar-correction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarRequest {
    /// ISO-8601 timestamp; without an offset it is read as UTC+8 wall time
    pub date: String,
    /// Location key or alias from the city table
    pub location: String,
}

/// Solar-correction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarResponse {
    pub input_date: String,
    pub corrected_date: String,
    pub longitude_offset_minutes: f64,
    pub equation_of_time_minutes: f64,
    pub total_offset_minutes: f64,
    pub location: String,
    pub location_found: bool,
    /// Double-hour index (0..=12) before and after correction
    pub input_shichen: u8,
    pub corrected_shichen: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SolarResponse {
    /// Build from a correction result and already formatted timestamps
    pub fn new(
        result: &SolarTimeResult,
        location: &str,
        input_date: String,
        corrected_date: String,
    ) -> Self {
        Self {
            input_date,
            corrected_date,
            longitude_offset_minutes: result.longitude_offset_minutes,
            equation_of_time_minutes: result.equation_of_time_minutes,
            total_offset_minutes: result.total_offset_minutes,
            location: location.to_string(),
            location_found: result.location_found,
            input_shichen: result.input_shichen().index(),
            corrected_shichen: result.corrected_shichen().index(),
            note: result.correction_note(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_request_accepts_empty_object() {
        let req: CastRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, CastRequest::default());
    }

    #[test]
    fn test_cast_request_camel_case() {
        let req: CastRequest =
            serde_json::from_str(r#"{"seed": 7, "tosses": [0,1,2,3,1,2]}"#).unwrap();
        assert_eq!(req.seed, Some(7));
        assert_eq!(req.tosses.as_deref(), Some(&[0u8, 1, 2, 3, 1, 2][..]));
    }
}
