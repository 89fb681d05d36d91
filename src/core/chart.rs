//! Chart collaborator contract and the built-in summary generator
//!
//! Downstream generators receive either a corrected birth time or a cast
//! through [`ChartGenerator`] and nothing else.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{read_cast, HexagramTable};
use crate::types::{CastResult, Hexagram, PalaceReading, Shichen, SolarTimeResult, Trigram};

/// What a chart is generated from
#[derive(Debug, Clone, Copy)]
pub enum ChartSubject<'a> {
    BirthTime(&'a SolarTimeResult),
    Cast(&'a CastResult),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("C401_UNCORRECTED_BIRTH_TIME: location unknown, birth time was not corrected")]
    UncorrectedBirthTime,

    #[error("C402_GENERATOR_FAILED: {generator}: {reason}")]
    GeneratorFailed { generator: String, reason: String },
}

impl ChartError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UncorrectedBirthTime => "C401_UNCORRECTED_BIRTH_TIME",
            Self::GeneratorFailed { .. } => "C402_GENERATOR_FAILED",
        }
    }
}

/// The only way charts are produced
pub trait ChartGenerator {
    fn generate(&self, subject: ChartSubject<'_>) -> Result<Chart, ChartError>;
}

// =============================================================================
// CHART SHAPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Chart {
    BirthTime(BirthTimeSummary),
    Cast(CastSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthTimeSummary {
    pub corrected_date: String,
    pub shichen: Shichen,
    pub branch: String,
    pub late_zi: bool,
    pub location_found: bool,
    pub total_offset_minutes: f64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrigramSummary {
    pub name: String,
    pub symbol: char,
    pub image: String,
    pub element: String,
}

impl From<Trigram> for TrigramSummary {
    fn from(t: Trigram) -> Self {
        Self {
            name: t.name().to_string(),
            symbol: t.symbol(),
            image: t.image().to_string(),
            element: t.element().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureSummary {
    pub number: u8,
    pub name: String,
    pub traditional_name: String,
    pub upper: TrigramSummary,
    pub lower: TrigramSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingLineSummary {
    pub position: usize,
    pub position_name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastSummary {
    pub primary: FigureSummary,
    /// Absent for a static reading
    pub transformed: Option<FigureSummary>,
    pub moving_lines: Vec<MovingLineSummary>,
    pub palace: PalaceReading,
}

// =============================================================================
// SUMMARY GENERATOR
// =============================================================================

/// Structured summary of a subject, for display or prompting
#[derive(Debug, Clone)]
pub struct SummaryChart {
    names: Arc<HexagramTable>,
    require_location: bool,
}

impl SummaryChart {
    pub fn new(names: Arc<HexagramTable>) -> Self {
        Self { names, require_location: false }
    }

    /// Refuse birth times whose location was not found
    pub fn require_location(mut self, require: bool) -> Self {
        self.require_location = require;
        self
    }

    fn figure(&self, hexagram: Hexagram) -> FigureSummary {
        let entry = self.names.lookup(hexagram);
        FigureSummary {
            number: entry.number,
            name: entry.name.clone(),
            traditional_name: entry.traditional_name.clone(),
            upper: entry.upper.into(),
            lower: entry.lower.into(),
        }
    }

    fn birth_time(&self, result: &SolarTimeResult) -> Result<BirthTimeSummary, ChartError> {
        if self.require_location && !result.location_found {
            return Err(ChartError::UncorrectedBirthTime);
        }
        let shichen = result.corrected_shichen();
        Ok(BirthTimeSummary {
            corrected_date: result.corrected_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            shichen,
            branch: shichen.branch().to_string(),
            late_zi: shichen.is_late_zi(),
            location_found: result.location_found,
            total_offset_minutes: result.total_offset_minutes,
            note: result.correction_note(),
        })
    }

    fn cast(&self, cast: &CastResult) -> CastSummary {
        CastSummary {
            primary: self.figure(cast.primary()),
            transformed: cast.has_changes().then(|| self.figure(cast.transformed())),
            moving_lines: cast
                .lines()
                .iter()
                .filter(|line| line.is_moving())
                .map(|line| MovingLineSummary {
                    position: line.position(),
                    position_name: line.position_name().to_string(),
                    label: line.label().to_string(),
                })
                .collect(),
            palace: read_cast(cast),
        }
    }
}

impl ChartGenerator for SummaryChart {
    fn generate(&self, subject: ChartSubject<'_>) -> Result<Chart, ChartError> {
        let chart = match subject {
            ChartSubject::BirthTime(result) => Chart::BirthTime(self.birth_time(result)?),
            ChartSubject::Cast(cast) => Chart::Cast(self.cast(cast)),
        };
        debug!(?chart, "summary chart generated");
        Ok(chart)
    }
}

// =============================================================================
// TESTS
// =============================================================================
