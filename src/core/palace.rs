//! Palace placement (尋宮安世), branch attachment (納甲) and six relatives
//!
//! All of it depends on the two trigrams only; nothing here reads a date.
//!
//! Palace sequence from the pure figure `g` over `g` (bit 0 = bottom):
//!
//! | kind      | upper   | lower   | 世 |
//! |-----------|---------|---------|----|
//! | pure      | g       | g       | 6  |
//! | 1st       | g       | g ^ 001 | 1  |
//! | 2nd       | g       | g ^ 011 | 2  |
//! | 3rd       | g       | g ^ 111 | 3  |
//! | 4th       | g ^ 001 | g ^ 111 | 4  |
//! | 5th       | g ^ 011 | g ^ 111 | 5  |
//! | wandering | g ^ 010 | g ^ 111 | 4  |
//! | returning | g ^ 010 | g       | 3  |

use std::collections::HashSet;

use tracing::debug;

use crate::types::{
    Branch, CastResult, Hexagram, NajiaLine, Palace, PalaceKind, PalaceLine, PalaceReading,
    Trigram,
};
use crate::LINE_COUNT;

/// (kind, upper mask, lower mask) relative to the palace trigram
const PALACE_SEQUENCE: [(PalaceKind, u8, u8); 8] = [
    (PalaceKind::Pure, 0b000, 0b000),
    (PalaceKind::First, 0b000, 0b001),
    (PalaceKind::Second, 0b000, 0b011),
    (PalaceKind::Third, 0b000, 0b111),
    (PalaceKind::Fourth, 0b001, 0b111),
    (PalaceKind::Fifth, 0b011, 0b111),
    (PalaceKind::Wandering, 0b010, 0b111),
    (PalaceKind::Returning, 0b010, 0b000),
];

/// Branches a trigram carries, bottom to top, as a lower (0-2) and upper (3-5) figure
pub fn trigram_branches(trigram: Trigram) -> [Branch; LINE_COUNT] {
    use Branch::*;
    match trigram {
        Trigram::Qian | Trigram::Zhen => [Zi, Yin, Chen, Wu, Shen, Xu],
        Trigram::Dui => [Si, Mao, Chou, Hai, You, Wei],
        Trigram::Li => [Mao, Chou, Hai, You, Wei, Si],
        Trigram::Xun => [Chou, Hai, You, Wei, Si, Mao],
        Trigram::Kan => [Yin, Chen, Wu, Shen, Xu, Zi],
        Trigram::Gen => [Chen, Wu, Shen, Xu, Zi, Yin],
        Trigram::Kun => [Wei, Si, Mao, Chou, Hai, You],
    }
}

/// Branch attached to each line of a figure
pub fn najia(hexagram: Hexagram) -> [Branch; LINE_COUNT] {
    let lower = trigram_branches(hexagram.lower());
    let upper = trigram_branches(hexagram.upper());
    std::array::from_fn(|i| if i < 3 { lower[i] } else { upper[i] })
}

/// The palace a figure belongs to and its 世/應 lines
pub fn find_palace(hexagram: Hexagram) -> Palace {
    let (upper, lower) = (hexagram.upper().bits(), hexagram.lower().bits());
    Trigram::ALL
        .iter()
        .find_map(|&palace| {
            let g = palace.bits();
            PALACE_SEQUENCE
                .iter()
                .find(|(_, up, low)| g ^ up == upper && g ^ low == lower)
                .map(|&(kind, _, _)| Palace::new(palace, kind))
        })
        // The eight sequences partition all 64 figures
        .unwrap_or_else(|| Palace::new(hexagram.upper(), PalaceKind::Pure))
}

/// Palace reading of a primary figure and its transformation
///
/// Lines that differ between the two figures carry the transformed branch.
/// Relatives missing from the primary are looked up in the pure palace
/// figure and attached as hidden spirits at the same positions.
pub fn read_palace(primary: Hexagram, transformed: Hexagram) -> PalaceReading {
    let palace = find_palace(primary);
    let branches = najia(primary);
    let changed = najia(transformed);
    let pure = najia(Hexagram::from_trigrams(palace.trigram, palace.trigram));

    let present: HashSet<_> = branches
        .iter()
        .map(|&b| NajiaLine::new(b, palace.element).relative)
        .collect();

    let lines = (0..LINE_COUNT)
        .map(|i| {
            let hidden = NajiaLine::new(pure[i], palace.element);
            PalaceLine {
                position: i,
                najia: NajiaLine::new(branches[i], palace.element),
                is_shi: i == palace.shi,
                is_ying: i == palace.ying,
                changed: (primary.is_yang(i) != transformed.is_yang(i))
                    .then(|| NajiaLine::new(changed[i], palace.element)),
                hidden: (!present.contains(&hidden.relative)).then_some(hidden),
            }
        })
        .collect();

    debug!(
        palace = palace.trigram.name(),
        kind = palace.kind.name(),
        shi = palace.shi,
        "palace read"
    );

    PalaceReading { palace, lines }
}

/// Palace reading of a cast
pub fn read_cast(cast: &CastResult) -> PalaceReading {
    read_palace(cast.primary(), cast.transformed())
}

// =============================================================================
// TESTS
// =============================================================================
