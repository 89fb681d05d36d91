//! Reference data configuration
//!
//! The hexagram and city tables are loaded once, validated, and shared
//! read-only with every component through `Arc`.

use std::path::Path;
use std::sync::Arc;

use crate::core::{CityTable, HexagramBuilder, HexagramTable, SolarTimeCorrector, SummaryChart};
use crate::types::ConfigurationError;

/// Environment variable naming a hexagram table file
pub const HEXAGRAMS_ENV: &str = "LIUYAO_HEXAGRAMS";

/// Environment variable naming a city table file
pub const CITIES_ENV: &str = "LIUYAO_CITIES";

/// Both reference tables, immutable after load
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub hexagrams: Arc<HexagramTable>,
    pub cities: Arc<CityTable>,
}

impl ReferenceData {
    /// Tables shipped with the crate
    pub fn bundled() -> Result<Self, ConfigurationError> {
        Self::load(None, None)
    }

    /// Load tables, falling back to the bundled copy for any path not given
    pub fn load(
        hexagrams: Option<&Path>,
        cities: Option<&Path>,
    ) -> Result<Self, ConfigurationError> {
        let hexagrams = match hexagrams {
            Some(path) => HexagramTable::load(path)?,
            None => HexagramTable::bundled()?,
        };
        let cities = match cities {
            Some(path) => CityTable::load(path)?,
            None => CityTable::bundled()?,
        };
        Ok(Self {
            hexagrams: Arc::new(hexagrams),
            cities: Arc::new(cities),
        })
    }

    /// Builder sharing the hexagram table
    pub fn builder(&self) -> HexagramBuilder {
        HexagramBuilder::new(Arc::clone(&self.hexagrams))
    }

    /// Corrector sharing the city table
    pub fn corrector(&self) -> SolarTimeCorrector {
        SolarTimeCorrector::new(Arc::clone(&self.cities))
    }

    pub fn summary_chart(&self) -> SummaryChart {
        SummaryChart::new(Arc::clone(&self.hexagrams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bundled_loads() {
        let data = ReferenceData::bundled().unwrap();
        assert!(!data.cities.is_empty());
    }

    #[test]
    fn test_missing_file_fails_fast() {
        let path = PathBuf::from("/nonexistent/liuyao/cities.json");
        let err = ReferenceData::load(None, Some(&path)).unwrap_err();
        assert_eq!(err.code(), "C201_TABLE_UNREADABLE");
    }

    #[test]
    fn test_custom_city_file() {
        let dir = std::env::temp_dir().join(format!("liuyao_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cities.json");
        std::fs::write(&path, r#"[{"key": "Greenwich", "latitude": 51.48, "longitude": 0.0}]"#)
            .unwrap();

        let data = ReferenceData::load(None, Some(&path)).unwrap();
        assert_eq!(data.cities.len(), 1);
        assert!(data.cities.lookup("Greenwich").is_some());

        std::fs::remove_dir_all(&dir).ok();
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_components_are_send_sync() {
        assert_send_sync::<ReferenceData>();
        assert_send_sync::<HexagramBuilder>();
        assert_send_sync::<SolarTimeCorrector>();
        assert_send_sync::<SummaryChart>();
    }

    #[test]
    fn test_concurrent_readers_match_serial() {
        use chrono::NaiveDate;

        let data = ReferenceData::bundled().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap().and_hms_opt(12, 55, 0).unwrap();
        let locations = ["臺北市", "高雄市", "金門縣", "花蓮縣"];

        let work = |data: &ReferenceData, seed: u64| {
            let cast = data
                .builder()
                .cast(&mut crate::core::CoinCaster::from_seed(seed))
                .unwrap();
            let location = locations[seed as usize % locations.len()];
            (cast, data.corrector().correct(date, location))
        };

        let serial: Vec<_> = (0..8).map(|seed| work(&data, seed)).collect();
        let parallel: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|seed| {
                    let data = &data;
                    scope.spawn(move || work(data, seed))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(serial, parallel);
    }
}
