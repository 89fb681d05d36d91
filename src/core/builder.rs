//! HexagramBuilder: primary figure, transformed figure, names, full cast
//!
//! Moving lines flip: the transformed figure is the primary XOR a mask with
//! one bit per moving position. No moving lines → transformed == primary.

use std::sync::Arc;
use rand::RngCore;
use tracing::debug;

use crate::core::classifier::{classify, classify_toss};
use crate::core::{CoinCaster, HexagramTable};
use crate::types::{CastResult, ClassificationError, CoinToss, Hexagram, HexagramName, LineState};
use crate::LINE_COUNT;

/// Primary pattern: bit i set iff line i is yang
pub fn build_primary(lines: &[LineState; LINE_COUNT]) -> Hexagram {
    Hexagram::from_lines(std::array::from_fn(|i| lines[i].is_yang()))
}

/// Flip every bit at a moving position
///
/// Positions above 5 are a contract violation.
pub fn build_transformed(
    primary: Hexagram,
    moving_positions: &[usize],
) -> Result<Hexagram, ClassificationError> {
    let mut mask = 0u8;
    for &position in moving_positions {
        if position >= LINE_COUNT {
            return Err(ClassificationError::PositionOutOfRange { position });
        }
        mask |= 1 << position;
    }
    Ok(primary.flipped(mask))
}

/// Positions of moving lines, ascending
pub fn moving_positions(lines: &[LineState; LINE_COUNT]) -> Vec<usize> {
    lines
        .iter()
        .filter(|line| line.is_moving())
        .map(LineState::position)
        .collect()
}

/// Builds casts and names them from an injected table
#[derive(Debug, Clone)]
pub struct HexagramBuilder {
    names: Arc<HexagramTable>,
}

impl HexagramBuilder {
    pub fn new(names: Arc<HexagramTable>) -> Self {
        Self { names }
    }

    /// Name lookup for a pattern
    pub fn lookup_name(&self, hexagram: Hexagram) -> &HexagramName {
        self.names.lookup(hexagram)
    }

    pub fn table(&self) -> &HexagramTable {
        &self.names
    }

    /// Draw six lines and build the reading
    pub fn cast<R: RngCore>(
        &self,
        caster: &mut CoinCaster<R>,
    ) -> Result<CastResult, ClassificationError> {
        let tosses = caster.cast_six_lines();
        self.from_tosses(tosses)
    }

    /// Build a reading from validated tosses, bottom to top
    pub fn from_tosses(
        &self,
        tosses: [CoinToss; LINE_COUNT],
    ) -> Result<CastResult, ClassificationError> {
        let lines: Vec<LineState> = tosses
            .iter()
            .enumerate()
            .map(|(i, &toss)| classify_toss(toss, i))
            .collect::<Result<_, _>>()?;
        self.assemble(lines)
    }

    /// Replay raw back-counts; any value above 3 is rejected
    pub fn from_values(&self, values: [u8; LINE_COUNT]) -> Result<CastResult, ClassificationError> {
        let lines: Vec<LineState> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| classify(value, i))
            .collect::<Result<_, _>>()?;
        self.assemble(lines)
    }

    fn assemble(&self, lines: Vec<LineState>) -> Result<CastResult, ClassificationError> {
        let found = lines.len();
        let lines: [LineState; LINE_COUNT] = lines
            .try_into()
            .map_err(|_| ClassificationError::PositionOutOfRange { position: found })?;
        let primary = build_primary(&lines);
        let moving = moving_positions(&lines);
        let transformed = build_transformed(primary, &moving)?;

        debug!(
            primary = %primary,
            transformed = %transformed,
            moving = ?moving,
            name = %self.lookup_name(primary).traditional_name,
            "cast built"
        );

        Ok(CastResult::from_parts(primary, transformed, lines, moving))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn builder() -> HexagramBuilder {
        HexagramBuilder::new(Arc::new(HexagramTable::bundled().unwrap()))
    }

    fn hex(p: u8) -> Hexagram {
        Hexagram::from_pattern(p).unwrap()
    }

    #[test]
    fn test_transformed_without_moving_is_identical() {
        for p in 0..64 {
            assert_eq!(build_transformed(hex(p), &[]).unwrap(), hex(p));
        }
    }

    #[test]
    fn test_flip_bottom_only() {
        assert_eq!(build_transformed(hex(0b111111), &[0]).unwrap(), hex(0b111110));
    }

    #[test]
    fn test_transformed_rejects_position_six() {
        assert_eq!(
            build_transformed(hex(0), &[6]),
            Err(ClassificationError::PositionOutOfRange { position: 6 })
        );
    }

    #[test]
    fn test_primary_reads_bottom_first() {
        let lines: [LineState; 6] =
            std::array::from_fn(|i| classify(if i == 0 { 1 } else { 2 }, i).unwrap());
        assert_eq!(build_primary(&lines), hex(0b000001));
    }

    #[test]
    fn test_static_reading() {
        let cast = builder().from_values([1, 2, 1, 2, 1, 2]).unwrap();
        assert!(!cast.has_changes());
        assert_eq!(cast.primary(), cast.transformed());
    }

    #[test]
    fn test_all_old_yang_becomes_kun() {
        let b = builder();
        let cast = b.from_values([3; 6]).unwrap();
        assert_eq!(cast.primary().pattern(), 0b111111);
        assert_eq!(cast.transformed().pattern(), 0);
        assert_eq!(cast.moving_positions(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(b.lookup_name(cast.transformed()).traditional_name, "坤為地");
    }

    #[test]
    fn test_from_values_rejects_bad_toss() {
        let err = builder().from_values([0, 1, 2, 9, 1, 2]).unwrap_err();
        assert_eq!(err, ClassificationError::TossOutOfRange { value: 9 });
    }

    #[test]
    fn test_seeded_cast_is_reproducible() {
        let b = builder();
        let one = b.cast(&mut CoinCaster::from_seed(7)).unwrap();
        let two = b.cast(&mut CoinCaster::from_seed(7)).unwrap();
        assert_eq!(one, two);
    }

    proptest! {
        #[test]
        fn prop_transformed_flips_exactly_moving(values in proptest::array::uniform6(0u8..=3)) {
            let cast = builder().from_values(values).unwrap();
            for i in 0..6 {
                let flipped = cast.primary().is_yang(i) != cast.transformed().is_yang(i);
                prop_assert_eq!(flipped, cast.moving_positions().contains(&i));
            }
        }

        #[test]
        fn prop_build_transformed_is_involution(p in 0u8..64, bits in 0u8..64) {
            let positions: Vec<usize> = (0..6).filter(|i| bits & (1 << i) != 0).collect();
            let once = build_transformed(hex(p), &positions).unwrap();
            let twice = build_transformed(once, &positions).unwrap();
            prop_assert_eq!(twice, hex(p));
        }
    }
}
