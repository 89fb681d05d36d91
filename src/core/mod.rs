//! Core modules for liuyao

pub mod tables;
pub mod coin;
pub mod classifier;
pub mod builder;
pub mod solar;
pub mod palace;
pub mod chart;
pub mod request;

pub use tables::{CityTable, HexagramTable};
pub use coin::{phrase_seed, CoinCaster};
pub use classifier::{classify, classify_toss};
pub use builder::{build_primary, build_transformed, moving_positions, HexagramBuilder};
pub use solar::{day_of_year, equation_of_time, longitude_offset_minutes, SolarTimeCorrector};
pub use palace::{find_palace, najia, read_cast, read_palace, trigram_branches};
pub use chart::{Chart, ChartError, ChartGenerator, ChartSubject, SummaryChart};
pub use request::{handle_cast, handle_solar, parse_timestamp, CivilTime};
