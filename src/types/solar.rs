//! Locations, true solar time results and double hours

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A named location from the city table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub key: String,
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    /// Alternate spellings resolving to this entry
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Outcome of a true solar time correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTimeResult {
    /// Civil wall-clock time as given
    pub input_date: NaiveDateTime,
    /// `input_date + total_offset_minutes`
    pub corrected_date: NaiveDateTime,
    pub longitude_offset_minutes: f64,
    pub equation_of_time_minutes: f64,
    pub total_offset_minutes: f64,
    /// False when the location was unknown and no correction was applied
    pub location_found: bool,
}

impl SolarTimeResult {
    /// Unknown-location fallback: date unchanged, zero offsets
    pub fn unchanged(date: NaiveDateTime) -> Self {
        Self {
            input_date: date,
            corrected_date: date,
            longitude_offset_minutes: 0.0,
            equation_of_time_minutes: 0.0,
            total_offset_minutes: 0.0,
            location_found: false,
        }
    }

    pub fn input_shichen(&self) -> Shichen {
        Shichen::from_hour(self.input_date.hour())
    }

    pub fn corrected_shichen(&self) -> Shichen {
        Shichen::from_hour(self.corrected_date.hour())
    }

    /// Did the correction move the time across midnight?
    pub fn date_changed(&self) -> bool {
        self.input_date.date() != self.corrected_date.date()
    }

    /// Did the correction move the time into another double hour?
    ///
    /// Early and late 子 on different days count as different hours.
    pub fn shichen_changed(&self) -> bool {
        self.input_shichen() != self.corrected_shichen() || self.date_changed()
    }

    /// Human note when the double hour changed, e.g. 時辰由【午】變更為【巳】（調整 -25 分）
    pub fn correction_note(&self) -> Option<String> {
        if !self.shichen_changed() {
            return None;
        }
        let minutes = self.total_offset_minutes.round() as i64;
        let sign = if minutes >= 0 { "+" } else { "" };
        let date = if self.date_changed() {
            format!(
                "，日期由【{}】變更為【{}】",
                self.input_date.format("%Y-%m-%d"),
                self.corrected_date.format("%Y-%m-%d")
            )
        } else {
            String::new()
        };
        Some(format!(
            "經真太陽時校正：時辰由【{}】變更為【{}】{}（調整 {}{} 分）",
            self.input_shichen().branch(),
            self.corrected_shichen().branch(),
            date,
            sign,
            minutes
        ))
    }
}

/// Chinese double hour; index 0 is early Zi (00-01), 12 is late Zi (23-24)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shichen(u8);

const BRANCHES: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];

impl Shichen {
    /// Index for an hour of day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0 => Self(0),
            23 => Self(12),
            h => Self(((h + 1) / 2) as u8),
        }
    }

    /// 0..=12, as chart generators expect
    pub fn index(self) -> u8 {
        self.0
    }

    /// Earthly branch of the hour
    pub fn branch(self) -> &'static str {
        BRANCHES[(self.0 % 12) as usize]
    }

    pub fn is_late_zi(self) -> bool {
        self.0 == 12
    }
}

impl std::fmt::Display for Shichen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}時", self.branch())
    }
}
