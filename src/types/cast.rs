//! Result of one six-line cast

use serde::{Deserialize, Serialize};
use crate::core::build_transformed;
use crate::types::{ClassificationError, Hexagram, LineState};
use crate::LINE_COUNT;

/// Primary and transformed figures of one cast
///
/// `transformed` is `primary` with every moving position flipped. A cast
/// with no moving lines is a static reading: `transformed == primary`.
/// Fields are read-only; a deserialized cast is checked against its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CastRecord")]
pub struct CastResult {
    primary: Hexagram,
    transformed: Hexagram,
    /// Classified lines, bottom (0) to top (5)
    lines: [LineState; LINE_COUNT],
    /// Ascending positions of moving lines
    moving_positions: Vec<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CastRecord {
    primary: Hexagram,
    transformed: Hexagram,
    lines: [LineState; LINE_COUNT],
    moving_positions: Vec<usize>,
}

impl TryFrom<CastRecord> for CastResult {
    type Error = ClassificationError;

    fn try_from(record: CastRecord) -> Result<Self, Self::Error> {
        let inconsistent = |reason| ClassificationError::InconsistentCast { reason };

        if record.lines.iter().enumerate().any(|(i, line)| line.position() != i) {
            return Err(inconsistent("lines are not in bottom-to-top order"));
        }
        let primary = Hexagram::from_lines(std::array::from_fn(|i| record.lines[i].is_yang()));
        if primary != record.primary {
            return Err(inconsistent("primary does not match the lines"));
        }
        let moving: Vec<usize> = record
            .lines
            .iter()
            .filter(|line| line.is_moving())
            .map(LineState::position)
            .collect();
        if moving != record.moving_positions {
            return Err(inconsistent("moving positions do not match the lines"));
        }
        if build_transformed(primary, &moving)? != record.transformed {
            return Err(inconsistent("transformed is not primary with moving lines flipped"));
        }

        Ok(Self {
            primary,
            transformed: record.transformed,
            lines: record.lines,
            moving_positions: moving,
        })
    }
}

impl CastResult {
    /// Assemble from parts already derived from `lines`
    pub(crate) fn from_parts(
        primary: Hexagram,
        transformed: Hexagram,
        lines: [LineState; LINE_COUNT],
        moving_positions: Vec<usize>,
    ) -> Self {
        Self { primary, transformed, lines, moving_positions }
    }

    pub fn primary(&self) -> Hexagram {
        self.primary
    }

    pub fn transformed(&self) -> Hexagram {
        self.transformed
    }

    pub fn lines(&self) -> &[LineState; LINE_COUNT] {
        &self.lines
    }

    pub fn moving_positions(&self) -> &[usize] {
        &self.moving_positions
    }

    /// Does any line move?
    pub fn has_changes(&self) -> bool {
        !self.moving_positions.is_empty()
    }

    /// Back-counts in draw order
    pub fn tosses(&self) -> [u8; LINE_COUNT] {
        std::array::from_fn(|i| self.lines[i].toss().backs())
    }
}
