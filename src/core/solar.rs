//! SolarTimeCorrector: civil time → true solar time
//!
//! total offset = longitude offset + equation of time
//!
//! - Longitude offset: (longitude − 120°E) × 4 min/degree, relative to the
//!   UTC+8 standard meridian.
//! - Equation of time: a three-term empirical fit,
//!   `b = 2π(d − 81)/365`, `EOT = 9.87·sin 2b − 7.53·cos b − 1.5·sin b`.
//!
//! The fit is off by up to a few minutes over the year. That is fine for
//! picking a double hour; it is not an ephemeris and must not be used where
//! sub-minute accuracy matters.

use std::f64::consts::PI;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::core::CityTable;
use crate::types::SolarTimeResult;
use crate::{
    EOT_COS_B, EOT_PHASE_DAY, EOT_SIN_2B, EOT_SIN_B, EOT_YEAR_DAYS, MINUTES_PER_DEGREE,
    STANDARD_MERIDIAN_DEG,
};

/// Ordinal day within the year, 1..=366
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Equation of time in minutes for a day of year
pub fn equation_of_time(day: u32) -> f64 {
    let b = 2.0 * PI * (day as f64 - EOT_PHASE_DAY) / EOT_YEAR_DAYS;
    EOT_SIN_2B * (2.0 * b).sin() - EOT_COS_B * b.cos() - EOT_SIN_B * b.sin()
}

/// Minutes between local mean time at `longitude` and UTC+8 clock time
pub fn longitude_offset_minutes(longitude: f64) -> f64 {
    (longitude - STANDARD_MERIDIAN_DEG) * MINUTES_PER_DEGREE
}

/// Fractional minutes as a duration, rounded to the millisecond
fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::milliseconds((minutes * 60_000.0).round() as i64)
}

/// Corrector over an injected city table
#[derive(Debug, Clone)]
pub struct SolarTimeCorrector {
    cities: Arc<CityTable>,
}

impl SolarTimeCorrector {
    pub fn new(cities: Arc<CityTable>) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &CityTable {
        &self.cities
    }

    /// Longitude offset for a known location
    pub fn longitude_offset(&self, location: &str) -> Option<f64> {
        self.cities
            .lookup(location)
            .map(|city| longitude_offset_minutes(city.longitude))
    }

    /// Correct a civil time at a location
    ///
    /// Unknown locations are not an error: the date comes back unchanged with
    /// zero offsets and `location_found == false`.
    pub fn correct(&self, date: NaiveDateTime, location: &str) -> SolarTimeResult {
        let Some(longitude_offset) = self.longitude_offset(location) else {
            warn!(location, "unknown location, true solar time not applied");
            return SolarTimeResult::unchanged(date);
        };

        let day = day_of_year(date.date());
        let eot = equation_of_time(day);
        let total = longitude_offset + eot;
        let delta = minutes_to_duration(total);

        // Saturates only at the edge of the representable calendar
        let corrected_date = date.checked_add_signed(delta).unwrap_or(if total < 0.0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        });

        debug!(
            location,
            day,
            longitude_offset,
            eot,
            total,
            %corrected_date,
            "true solar time"
        );

        SolarTimeResult {
            input_date: date,
            corrected_date,
            longitude_offset_minutes: longitude_offset,
            equation_of_time_minutes: eot,
            total_offset_minutes: total,
            location_found: true,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn corrector() -> SolarTimeCorrector {
        SolarTimeCorrector::new(Arc::new(CityTable::bundled().unwrap()))
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_day_of_year_bounds() {
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()), 1);
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), 365);
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 366);
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2024, 3, 21).unwrap()), 81);
    }

    #[test]
    fn test_eot_at_phase_day() {
        // b = 0: sin terms vanish, cos(0) = 1
        assert_abs_diff_eq!(equation_of_time(81), -7.53, epsilon = 1e-12);
    }

    #[test]
    fn test_eot_bounded() {
        for d in 1..=366 {
            let eot = equation_of_time(d);
            assert!(eot.abs() < 20.0, "day {} eot {}", d, eot);
        }
    }

    #[test]
    fn test_eot_seasonal_extremes() {
        // Early November the sun runs fast (~+16 min), mid February slow (~-14 min)
        assert!(equation_of_time(307) > 15.0);
        assert!(equation_of_time(45) < -13.0);
    }

    #[test]
    fn test_longitude_offset() {
        assert_abs_diff_eq!(longitude_offset_minutes(120.0), 0.0);
        assert_abs_diff_eq!(longitude_offset_minutes(121.5), 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(longitude_offset_minutes(118.5), -6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_location_falls_back() {
        let date = dt(1990, 6, 15, 12, 0);
        let result = corrector().correct(date, "Atlantis");
        assert_eq!(result.corrected_date, date);
        assert_eq!(result.total_offset_minutes, 0.0);
        assert_eq!(result.longitude_offset_minutes, 0.0);
        assert_eq!(result.equation_of_time_minutes, 0.0);
        assert!(!result.location_found);
    }

    #[test]
    fn test_taipei_correction_components() {
        let c = corrector();
        let date = dt(2024, 3, 21, 12, 0);
        let result = c.correct(date, "臺北市");
        let lon = c.cities().lookup("臺北市").unwrap().longitude;

        assert!(result.location_found);
        assert_abs_diff_eq!(result.longitude_offset_minutes, (lon - 120.0) * 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.equation_of_time_minutes, -7.53, epsilon = 1e-9);
        assert_abs_diff_eq!(
            result.total_offset_minutes,
            result.longitude_offset_minutes + result.equation_of_time_minutes,
            epsilon = 1e-12
        );
        let applied = (result.corrected_date - date).num_milliseconds() as f64 / 60_000.0;
        assert_abs_diff_eq!(applied, result.total_offset_minutes, epsilon = 1e-3);
    }

    #[test]
    fn test_correction_can_cross_midnight() {
        // Kinmen lies west of 120°E; just after midnight in mid February
        let result = corrector().correct(dt(2024, 2, 14, 0, 5), "金門縣");
        assert!(result.total_offset_minutes < -5.0);
        assert_eq!(result.corrected_date.date(), NaiveDate::from_ymd_opt(2024, 2, 13).unwrap());
    }
}
