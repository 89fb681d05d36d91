//! Line classification: back-count → polarity and moving flag
//!
//! | backs | yang | moving | line       |
//! |-------|------|--------|------------|
//! | 0     | no   | yes    | old yin    |
//! | 1     | yes  | no     | young yang |
//! | 2     | no   | no     | young yin  |
//! | 3     | yes  | yes    | old yang   |

use tracing::error;

use crate::types::{ClassificationError, CoinToss, LineState};

/// Classify a raw back-count at a line position
///
/// Values above 3 or positions above 5 mean the caller broke the toss
/// contract; they are reported, never coerced.
pub fn classify(value: u8, position: usize) -> Result<LineState, ClassificationError> {
    let toss = CoinToss::new(value).map_err(|e| {
        error!(code = e.code(), value, position, "toss outside contract");
        e
    })?;
    classify_toss(toss, position)
}

/// Classify an already validated toss
pub fn classify_toss(toss: CoinToss, position: usize) -> Result<LineState, ClassificationError> {
    LineState::new(toss, position).map_err(|e| {
        error!(code = e.code(), position, "line position outside contract");
        e
    })
}

// =============================================================================
// TESTS
// =============================================================================
