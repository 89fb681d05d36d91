//! Hexagram bit patterns, trigrams and table entries

use serde::{Deserialize, Serialize};
use crate::types::Element;
use crate::LINE_COUNT;

/// Mask covering the six line bits
pub const PATTERN_MASK: u8 = 0b11_1111;

/// The eight trigrams; bit 0 is the bottom line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigram {
    Qian,
    Dui,
    Li,
    Zhen,
    Xun,
    Kan,
    Gen,
    Kun,
}

impl Trigram {
    pub const ALL: [Trigram; 8] = [
        Trigram::Qian,
        Trigram::Dui,
        Trigram::Li,
        Trigram::Zhen,
        Trigram::Xun,
        Trigram::Kan,
        Trigram::Gen,
        Trigram::Kun,
    ];

    /// Three-bit pattern, bottom line in bit 0
    pub fn bits(&self) -> u8 {
        match self {
            Trigram::Qian => 0b111,
            Trigram::Dui => 0b011,
            Trigram::Li => 0b101,
            Trigram::Zhen => 0b001,
            Trigram::Xun => 0b110,
            Trigram::Kan => 0b010,
            Trigram::Gen => 0b100,
            Trigram::Kun => 0b000,
        }
    }

    /// Inverse of [`Trigram::bits`]; only the low three bits are read
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b111 => Trigram::Qian,
            0b011 => Trigram::Dui,
            0b101 => Trigram::Li,
            0b001 => Trigram::Zhen,
            0b110 => Trigram::Xun,
            0b010 => Trigram::Kan,
            0b100 => Trigram::Gen,
            _ => Trigram::Kun,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Trigram::Qian => '☰',
            Trigram::Dui => '☱',
            Trigram::Li => '☲',
            Trigram::Zhen => '☳',
            Trigram::Xun => '☴',
            Trigram::Kan => '☵',
            Trigram::Gen => '☶',
            Trigram::Kun => '☷',
        }
    }

    /// Chinese trigram name
    pub fn name(&self) -> &'static str {
        match self {
            Trigram::Qian => "乾",
            Trigram::Dui => "兌",
            Trigram::Li => "離",
            Trigram::Zhen => "震",
            Trigram::Xun => "巽",
            Trigram::Kan => "坎",
            Trigram::Gen => "艮",
            Trigram::Kun => "坤",
        }
    }

    /// Natural image, as used in traditional hexagram names
    pub fn image(&self) -> &'static str {
        match self {
            Trigram::Qian => "天",
            Trigram::Dui => "澤",
            Trigram::Li => "火",
            Trigram::Zhen => "雷",
            Trigram::Xun => "風",
            Trigram::Kan => "水",
            Trigram::Gen => "山",
            Trigram::Kun => "地",
        }
    }

    /// Five-phase element of the trigram
    pub fn element(&self) -> Element {
        match self {
            Trigram::Qian | Trigram::Dui => Element::Metal,
            Trigram::Li => Element::Fire,
            Trigram::Zhen | Trigram::Xun => Element::Wood,
            Trigram::Kan => Element::Water,
            Trigram::Gen | Trigram::Kun => Element::Earth,
        }
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.symbol(), self.name())
    }
}

/// Six-line figure as a bit pattern; bit i set iff line i is yang
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hexagram(u8);

impl Hexagram {
    /// Construct from a pattern; `None` if any bit above bit 5 is set
    pub fn from_pattern(pattern: u8) -> Option<Self> {
        (pattern <= PATTERN_MASK).then_some(Self(pattern))
    }

    /// Compose from yang flags, bottom line first
    pub fn from_lines(lines: [bool; LINE_COUNT]) -> Self {
        let pattern = lines
            .iter()
            .enumerate()
            .filter(|(_, &yang)| yang)
            .fold(0u8, |acc, (i, _)| acc | (1 << i));
        Self(pattern)
    }

    /// Compose from lower (lines 0-2) and upper (lines 3-5) trigrams
    pub fn from_trigrams(upper: Trigram, lower: Trigram) -> Self {
        Self(lower.bits() | (upper.bits() << 3))
    }

    pub fn pattern(self) -> u8 {
        self.0
    }

    /// Is the line at `position` yang? Positions past the top read as yin.
    pub fn is_yang(self, position: usize) -> bool {
        position < LINE_COUNT && self.0 & (1 << position) != 0
    }

    /// Yang flags bottom to top
    pub fn lines(self) -> [bool; LINE_COUNT] {
        let mut lines = [false; LINE_COUNT];
        for (i, line) in lines.iter_mut().enumerate() {
            *line = self.is_yang(i);
        }
        lines
    }

    pub fn lower(self) -> Trigram {
        Trigram::from_bits(self.0)
    }

    pub fn upper(self) -> Trigram {
        Trigram::from_bits(self.0 >> 3)
    }

    /// Flip every line whose bit is set in `mask`
    pub fn flipped(self, mask: u8) -> Self {
        Self((self.0 ^ mask) & PATTERN_MASK)
    }
}

impl TryFrom<u8> for Hexagram {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_pattern(value).ok_or_else(|| format!("pattern {value} exceeds 6 bits"))
    }
}

impl From<Hexagram> for u8 {
    fn from(h: Hexagram) -> u8 {
        h.0
    }
}

impl std::fmt::Display for Hexagram {
    /// Binary pattern, top line first (as the figure is drawn)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06b}", self.0)
    }
}

/// One entry of the 64-hexagram reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexagramName {
    /// King Wen sequence number, 1..=64
    pub number: u8,
    /// Short name (e.g. 否)
    pub name: String,
    /// Upper image + lower image (e.g. 天地否)
    pub traditional_name: String,
    pub upper: Trigram,
    pub lower: Trigram,
    /// Six-bit pattern, bit 0 = bottom line
    pub pattern: u8,
}
