//! Liuyao: coin-cast hexagram engine and true solar time correction
//!
//! Casting path: CoinCaster → classify → HexagramBuilder → CastResult
//! Timing path: SolarTimeCorrector (longitude + equation of time)

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// CASTING [C]
// =============================================================================

/// Lines in a hexagram, bottom (0) to top (5)
pub const LINE_COUNT: usize = 6;

/// Coins thrown per line
pub const COINS_PER_TOSS: u8 = 3;

/// Highest valid back-count for one toss
pub const MAX_BACKS: u8 = COINS_PER_TOSS;

/// Number of distinct hexagrams (2^6)
pub const HEXAGRAM_COUNT: usize = 64;

// =============================================================================
// SOLAR TIME [C]
// =============================================================================

/// Standard meridian of UTC+8 (degrees east)
pub const STANDARD_MERIDIAN_DEG: f64 = 120.0;

/// Minutes of clock time per degree of longitude
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Day of year at which the equation-of-time phase angle is zero
pub const EOT_PHASE_DAY: f64 = 81.0;

/// Days per year used by the equation-of-time approximation
pub const EOT_YEAR_DAYS: f64 = 365.0;

/// Equation of time coefficients (minutes): sin(2b), cos(b), sin(b)
pub const EOT_SIN_2B: f64 = 9.87;
pub const EOT_COS_B: f64 = 7.53;
pub const EOT_SIN_B: f64 = 1.5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
