//! Integration tests for true solar time
//!
//! Tests the correction contract:
//! - total = longitude offset + equation of time
//! - Unknown locations fall back to the input unchanged
//! - Request parsing and timestamp formatting

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use liuyao::config::ReferenceData;
use liuyao::core::{equation_of_time, handle_solar, SolarTimeCorrector};
use liuyao::types::SolarRequest;
use pretty_assertions::assert_eq;

fn corrector() -> SolarTimeCorrector {
    ReferenceData::bundled().expect("bundled tables").corrector()
}

fn request(date: &str, location: &str) -> SolarRequest {
    SolarRequest {
        date: date.to_string(),
        location: location.to_string(),
    }
}

// =============================================================================
// SCENARIO 1: Known locations
// =============================================================================

#[test]
fn test_taipei_midsummer() {
    let response = handle_solar(&corrector(), &request("1990-06-15T12:30:00", "臺北市")).unwrap();
    assert!(response.location_found);
    assert_abs_diff_eq!(response.longitude_offset_minutes, 6.2548, epsilon = 1e-9);
    assert_abs_diff_eq!(response.equation_of_time_minutes, -0.1925, epsilon = 1e-3);
    assert_eq!(response.corrected_date, "1990-06-15T12:36:03.741");
    assert_eq!(response.note, None);
}

#[test]
fn test_aliases_resolve_to_same_entry() {
    let c = corrector();
    let a = handle_solar(&c, &request("1990-06-15T12:30:00", "臺北市")).unwrap();
    let b = handle_solar(&c, &request("1990-06-15T12:30:00", "台北市")).unwrap();
    let d = handle_solar(&c, &request("1990-06-15T12:30:00", "Taipei")).unwrap();
    assert_eq!(a.corrected_date, b.corrected_date);
    assert_eq!(a.corrected_date, d.corrected_date);
}

#[test]
fn test_shichen_change_is_noted() {
    // Early November: EOT ~ +16 min pushes 12:55 past 13:00
    let response = handle_solar(&corrector(), &request("2024-11-03 12:55", "臺北市")).unwrap();
    assert_eq!(response.input_shichen, 6);
    assert_eq!(response.corrected_shichen, 7);
    assert_eq!(
        response.note.as_deref(),
        Some("經真太陽時校正：時辰由【午】變更為【未】（調整 +23 分）")
    );
}

#[test]
fn test_kinmen_crosses_midnight() {
    let response = handle_solar(&corrector(), &request("2024-02-14T00:05:00", "金門縣")).unwrap();
    assert!(response.total_offset_minutes < -20.0);
    assert!(response.corrected_date.starts_with("2024-02-13T23:43"), "{}", response.corrected_date);
    assert_eq!(response.corrected_shichen, 12);
    assert_eq!(
        response.note.as_deref(),
        Some("經真太陽時校正：時辰由【子】變更為【子】，日期由【2024-02-14】變更為【2024-02-13】（調整 -21 分）")
    );
}

#[test]
fn test_offset_input_is_read_as_utc8() {
    let response = handle_solar(&corrector(), &request("1990-06-15T04:30:00Z", "臺北市")).unwrap();
    assert_eq!(response.input_date, "1990-06-15T12:30:00+08:00");
    assert_eq!(response.corrected_date, "1990-06-15T12:36:03.741+08:00");
}

// =============================================================================
// SCENARIO 2: Fallback and errors
// =============================================================================

#[test]
fn test_unknown_location_fallback() {
    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
    let result = corrector().correct(date, "Springfield");
    assert_eq!(result.corrected_date, date);
    assert_eq!(result.total_offset_minutes, 0.0);
    assert!(!result.location_found);
}

#[test]
fn test_invalid_date_rejected() {
    let err = handle_solar(&corrector(), &request("15/06/1990", "臺北市")).unwrap_err();
    assert_eq!(err.code(), "C301_INVALID_DATE");
}

#[test]
fn test_eot_reference_day() {
    assert_abs_diff_eq!(equation_of_time(81), -7.53, epsilon = 1e-12);
}

#[test]
fn test_solar_response_json_shape() {
    let response = handle_solar(&corrector(), &request("1990-06-15T12:30:00", "臺北市")).unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("correctedDate").is_some());
    assert!(json.get("longitudeOffsetMinutes").is_some());
    assert!(json.get("equationOfTimeMinutes").is_some());
    assert!(json.get("totalOffsetMinutes").is_some());
    assert!(json.get("note").is_none());
}
