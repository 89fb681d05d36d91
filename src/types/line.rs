//! Coin tosses and line classifications

use colored::Color;
use serde::{Deserialize, Serialize};
use crate::types::ClassificationError;
use crate::{COINS_PER_TOSS, LINE_COUNT, MAX_BACKS};

/// Number of backs showing after one three-coin toss (0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CoinToss(u8);

impl CoinToss {
    /// Validate a raw back-count
    pub fn new(backs: u8) -> Result<Self, ClassificationError> {
        if backs > MAX_BACKS {
            return Err(ClassificationError::TossOutOfRange { value: backs });
        }
        Ok(Self(backs))
    }

    /// Count the backs among three coin faces (`true` = back)
    pub fn from_coins(coins: [bool; COINS_PER_TOSS as usize]) -> Self {
        Self(coins.iter().filter(|&&back| back).count() as u8)
    }

    /// Raw back-count
    pub fn backs(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CoinToss {
    type Error = ClassificationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoinToss> for u8 {
    fn from(toss: CoinToss) -> u8 {
        toss.0
    }
}

/// The four canonical line classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    /// 0 backs: yin, moving (becomes yang)
    OldYin,
    /// 1 back: yang, static
    YoungYang,
    /// 2 backs: yin, static
    YoungYin,
    /// 3 backs: yang, moving (becomes yin)
    OldYang,
}

impl LineKind {
    /// Classification for a validated toss
    pub fn from_toss(toss: CoinToss) -> Self {
        match toss.backs() {
            0 => LineKind::OldYin,
            1 => LineKind::YoungYang,
            2 => LineKind::YoungYin,
            _ => LineKind::OldYang,
        }
    }

    pub fn is_yang(&self) -> bool {
        matches!(self, LineKind::YoungYang | LineKind::OldYang)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, LineKind::OldYin | LineKind::OldYang)
    }

    /// Line glyph; moving lines carry their change mark
    pub fn symbol(&self) -> &'static str {
        match self {
            LineKind::OldYin => "⚋ ○",
            LineKind::YoungYang => "⚊",
            LineKind::YoungYin => "⚋",
            LineKind::OldYang => "⚊ ×",
        }
    }

    /// Traditional label with the coin faces that produce it
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::OldYin => "老陰 (3正)",
            LineKind::YoungYang => "少陽 (2正1負)",
            LineKind::YoungYin => "少陰 (1正2負)",
            LineKind::OldYang => "老陽 (3負)",
        }
    }

    /// Terminal color for this kind of line
    pub fn color(&self) -> Color {
        match self {
            LineKind::OldYin => Color::Blue,
            LineKind::YoungYang => Color::Yellow,
            LineKind::YoungYin => Color::BrightBlack,
            LineKind::OldYang => Color::Red,
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LineKind::OldYin => "OLD_YIN",
            LineKind::YoungYang => "YOUNG_YANG",
            LineKind::YoungYin => "YOUNG_YIN",
            LineKind::OldYang => "OLD_YANG",
        };
        write!(f, "{}", name)
    }
}

/// Names of the six line positions, bottom to top
pub const POSITION_NAMES: [&str; LINE_COUNT] = ["初爻", "二爻", "三爻", "四爻", "五爻", "上爻"];

/// One classified line of a cast
///
/// Everything but `position` and `toss` is derived; deserialization reads
/// those two and re-derives the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LineRecord")]
pub struct LineState {
    /// 0 = bottom (first toss) .. 5 = top (last toss)
    position: usize,
    /// The toss that produced this line
    toss: CoinToss,
    kind: LineKind,
    is_yang: bool,
    is_moving: bool,
    symbol: String,
    label: String,
}

#[derive(Deserialize)]
struct LineRecord {
    position: usize,
    toss: CoinToss,
}

impl TryFrom<LineRecord> for LineState {
    type Error = ClassificationError;

    fn try_from(record: LineRecord) -> Result<Self, Self::Error> {
        Self::new(record.toss, record.position)
    }
}

impl LineState {
    /// Build a line at a checked position
    pub fn new(toss: CoinToss, position: usize) -> Result<Self, ClassificationError> {
        if position >= LINE_COUNT {
            return Err(ClassificationError::PositionOutOfRange { position });
        }
        let kind = LineKind::from_toss(toss);
        Ok(Self {
            position,
            toss,
            kind,
            is_yang: kind.is_yang(),
            is_moving: kind.is_moving(),
            symbol: kind.symbol().to_string(),
            label: kind.label().to_string(),
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn toss(&self) -> CoinToss {
        self.toss
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn is_yang(&self) -> bool {
        self.is_yang
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Traditional position name (初爻 .. 上爻)
    pub fn position_name(&self) -> &'static str {
        POSITION_NAMES.get(self.position).copied().unwrap_or_default()
    }
}
