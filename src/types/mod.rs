//! Core types for liuyao

mod error;
mod line;
mod hexagram;
mod cast;
mod solar;
mod palace;
mod wire;
mod output;

pub use error::{ClassificationError, ConfigurationError, RequestError};
pub use line::{CoinToss, LineKind, LineState, POSITION_NAMES};
pub use hexagram::{Hexagram, HexagramName, Trigram, PATTERN_MASK};
pub use cast::CastResult;
pub use solar::{GeoCoordinate, Shichen, SolarTimeResult};
pub use palace::{Branch, Element, NajiaLine, Palace, PalaceKind, PalaceLine, PalaceReading, Relative};
pub use wire::{CastRequest, CastResponse, HexagramView, LineView, SolarRequest, SolarResponse};
