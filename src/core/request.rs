//! Request handling for casts and solar corrections
//!
//! Cast: `{seed?, phrase?, tosses?}` → CastResponse
//! Solar: `{date, location}` → SolarResponse
//!
//! Timestamps with an explicit offset are first moved to UTC+8 wall time,
//! the clock the longitude offset is measured against, and are returned
//! with a `+08:00` suffix. Timestamps without one are taken as UTC+8 wall
//! time and returned without a suffix.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::core::{read_cast, CoinCaster, HexagramBuilder, SolarTimeCorrector};
use crate::types::{CastRequest, CastResponse, RequestError, SolarRequest, SolarResponse};
use crate::LINE_COUNT;

const CIVIL_OFFSET_HOURS: i64 = 8;
const CIVIL_OFFSET_SUFFIX: &str = "+08:00";
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A parsed civil timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    /// UTC+8 wall-clock time
    pub local: NaiveDateTime,
    /// Whether the input carried its own offset
    pub had_offset: bool,
}

impl CivilTime {
    /// Format a wall time the way the input was given
    pub fn format(&self, local: NaiveDateTime) -> String {
        let text = local.format(OUTPUT_FORMAT).to_string();
        if self.had_offset {
            format!("{text}{CIVIL_OFFSET_SUFFIX}")
        } else {
            text
        }
    }
}

/// Parse an ISO-8601 timestamp (RFC 3339, naive date-time, or date only)
pub fn parse_timestamp(input: &str) -> Result<CivilTime, RequestError> {
    let trimmed = input.trim();

    let with_offset = DateTime::parse_from_rfc3339(trimmed).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
    });
    if let Some(dt) = with_offset {
        let local = dt
            .naive_utc()
            .checked_add_signed(Duration::hours(CIVIL_OFFSET_HOURS))
            .ok_or_else(|| RequestError::InvalidDate { input: input.to_string() })?;
        return Ok(CivilTime { local, had_offset: true });
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(CivilTime { local, had_offset: false });
        }
    }
    if let Some(local) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(CivilTime { local, had_offset: false });
    }

    Err(RequestError::InvalidDate { input: input.to_string() })
}

/// Serve a cast request
pub fn handle_cast(
    builder: &HexagramBuilder,
    request: &CastRequest,
) -> Result<CastResponse, RequestError> {
    let cast = match (&request.tosses, request.seed, &request.phrase) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(RequestError::ConflictingSources(
                "tosses cannot be combined with seed or phrase",
            ));
        }
        (None, Some(_), Some(_)) => {
            return Err(RequestError::ConflictingSources("give seed or phrase, not both"));
        }
        (Some(tosses), None, None) => {
            let values: [u8; LINE_COUNT] = tosses
                .as_slice()
                .try_into()
                .map_err(|_| RequestError::WrongTossCount(tosses.len()))?;
            builder.from_values(values)?
        }
        (None, Some(seed), None) => builder.cast(&mut CoinCaster::from_seed(seed))?,
        (None, None, Some(phrase)) => builder.cast(&mut CoinCaster::from_phrase(phrase))?,
        (None, None, None) => builder.cast(&mut CoinCaster::from_entropy())?,
    };

    let primary = builder.lookup_name(cast.primary());
    let transformed = builder.lookup_name(cast.transformed());
    let palace = read_cast(&cast);
    info!(
        primary = %primary.traditional_name,
        transformed = %transformed.traditional_name,
        moving = cast.moving_positions().len(),
        palace = palace.palace.trigram.name(),
        "cast served"
    );
    Ok(CastResponse::new(&cast, primary, transformed, palace))
}

/// Serve a solar-correction request
pub fn handle_solar(
    corrector: &SolarTimeCorrector,
    request: &SolarRequest,
) -> Result<SolarResponse, RequestError> {
    let civil = parse_timestamp(&request.date)?;
    let result = corrector.correct(civil.local, &request.location);
    info!(
        location = %request.location,
        found = result.location_found,
        total = result.total_offset_minutes,
        "solar correction served"
    );
    Ok(SolarResponse::new(
        &result,
        &request.location,
        civil.format(result.input_date),
        civil.format(result.corrected_date),
    ))
}

// =============================================================================
// TESTS
// =============================================================================
