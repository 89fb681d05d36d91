//! Five phases, earthly branches, six relatives and palace readings

use serde::{Deserialize, Serialize};
use crate::types::Trigram;
use crate::LINE_COUNT;

/// The five phases, in generating order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Wood → Fire → Earth → Metal → Water → Wood
    pub const CYCLE: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The phase this one generates
    pub fn generates(self) -> Element {
        Self::CYCLE[(self.index() + 1) % 5]
    }

    /// The phase this one overcomes
    pub fn overcomes(self) -> Element {
        Self::CYCLE[(self.index() + 2) % 5]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The twelve earthly branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Branch {
    pub fn name(&self) -> &'static str {
        match self {
            Branch::Zi => "子",
            Branch::Chou => "丑",
            Branch::Yin => "寅",
            Branch::Mao => "卯",
            Branch::Chen => "辰",
            Branch::Si => "巳",
            Branch::Wu => "午",
            Branch::Wei => "未",
            Branch::Shen => "申",
            Branch::You => "酉",
            Branch::Xu => "戌",
            Branch::Hai => "亥",
        }
    }

    pub fn element(&self) -> Element {
        match self {
            Branch::Zi | Branch::Hai => Element::Water,
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Six relatives (六親) of a line to its palace; five kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relative {
    /// Same phase as the palace
    Siblings,
    /// Generated by the palace
    Offspring,
    /// Overcome by the palace
    Wealth,
    /// Generates the palace
    Parents,
    /// Overcomes the palace
    Officer,
}

impl Relative {
    pub const ALL: [Relative; 5] = [
        Relative::Siblings,
        Relative::Offspring,
        Relative::Wealth,
        Relative::Parents,
        Relative::Officer,
    ];

    /// Relation of a line's phase to the palace phase
    pub fn between(palace: Element, line: Element) -> Self {
        if line == palace {
            Relative::Siblings
        } else if palace.generates() == line {
            Relative::Offspring
        } else if palace.overcomes() == line {
            Relative::Wealth
        } else if line.generates() == palace {
            Relative::Parents
        } else {
            Relative::Officer
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Relative::Siblings => "兄弟",
            Relative::Offspring => "子孫",
            Relative::Wealth => "妻財",
            Relative::Parents => "父母",
            Relative::Officer => "官鬼",
        }
    }
}

impl std::fmt::Display for Relative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Place of a hexagram within its palace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PalaceKind {
    Pure,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Wandering,
    Returning,
}

impl PalaceKind {
    pub fn name(&self) -> &'static str {
        match self {
            PalaceKind::Pure => "本宮卦",
            PalaceKind::First => "一世卦",
            PalaceKind::Second => "二世卦",
            PalaceKind::Third => "三世卦",
            PalaceKind::Fourth => "四世卦",
            PalaceKind::Fifth => "五世卦",
            PalaceKind::Wandering => "遊魂卦",
            PalaceKind::Returning => "歸魂卦",
        }
    }

    /// Position of the 世 line, 0 = bottom
    pub fn shi(&self) -> usize {
        match self {
            PalaceKind::Pure => 5,
            PalaceKind::First => 0,
            PalaceKind::Second => 1,
            PalaceKind::Third | PalaceKind::Returning => 2,
            PalaceKind::Fourth | PalaceKind::Wandering => 3,
            PalaceKind::Fifth => 4,
        }
    }

    /// Position of the 應 line, three away from 世
    pub fn ying(&self) -> usize {
        (self.shi() + 3) % LINE_COUNT
    }
}

impl std::fmt::Display for PalaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Palace membership of a hexagram (尋宮安世)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palace {
    pub trigram: Trigram,
    pub kind: PalaceKind,
    pub element: Element,
    pub shi: usize,
    pub ying: usize,
}

impl Palace {
    pub fn new(trigram: Trigram, kind: PalaceKind) -> Self {
        Self {
            trigram,
            kind,
            element: trigram.element(),
            shi: kind.shi(),
            ying: kind.ying(),
        }
    }
}

/// A branch attached to a line with its phase and relative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NajiaLine {
    pub branch: Branch,
    pub element: Element,
    pub relative: Relative,
}

impl NajiaLine {
    pub fn new(branch: Branch, palace: Element) -> Self {
        let element = branch.element();
        Self {
            branch,
            element,
            relative: Relative::between(palace, element),
        }
    }
}

impl std::fmt::Display for NajiaLine {
    /// e.g. 兄弟申金
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.relative, self.branch, self.element)
    }
}

/// One line of a palace reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalaceLine {
    pub position: usize,
    pub najia: NajiaLine,
    pub is_shi: bool,
    pub is_ying: bool,
    /// Branch of the transformed figure, on moving lines only
    pub changed: Option<NajiaLine>,
    /// Hidden spirit (伏神) from the pure palace figure
    pub hidden: Option<NajiaLine>,
}

/// Palace, branches and relatives for a cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalaceReading {
    pub palace: Palace,
    /// Bottom to top
    pub lines: Vec<PalaceLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Metal.overcomes(), Element::Wood);
        assert_eq!(Element::Water.overcomes(), Element::Fire);
    }

    #[test]
    fn test_relatives_for_metal_palace() {
        let metal = Element::Metal;
        assert_eq!(Relative::between(metal, Element::Metal), Relative::Siblings);
        assert_eq!(Relative::between(metal, Element::Water), Relative::Offspring);
        assert_eq!(Relative::between(metal, Element::Wood), Relative::Wealth);
        assert_eq!(Relative::between(metal, Element::Earth), Relative::Parents);
        assert_eq!(Relative::between(metal, Element::Fire), Relative::Officer);
    }

    #[test]
    fn test_shi_ying_three_apart() {
        for kind in [PalaceKind::Pure, PalaceKind::First, PalaceKind::Fifth, PalaceKind::Returning] {
            let gap = (kind.ying() + LINE_COUNT - kind.shi()) % LINE_COUNT;
            assert_eq!(gap, 3, "{}", kind);
        }
        assert_eq!(PalaceKind::Pure.ying(), 2);
        assert_eq!(PalaceKind::Third.ying(), 5);
    }

    #[test]
    fn test_najia_display() {
        assert_eq!(NajiaLine::new(Branch::Shen, Element::Metal).to_string(), "兄弟申金");
    }
}
