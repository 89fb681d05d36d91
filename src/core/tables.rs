//! Reference tables: the 64 hexagram names and city coordinates
//!
//! Both tables are parsed and validated once at start-up. Any defect is a
//! `ConfigurationError`; lookups on a loaded table never fail for valid keys.

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::types::{ConfigurationError, GeoCoordinate, Hexagram, HexagramName};
use crate::HEXAGRAM_COUNT;

const BUNDLED_HEXAGRAMS: &str = include_str!("../../data/hexagrams.json");
const BUNDLED_CITIES: &str = include_str!("../../data/cities.json");

fn read_table(path: &Path) -> Result<String, ConfigurationError> {
    std::fs::read_to_string(path).map_err(|source| ConfigurationError::Unreadable {
        path: path.display().to_string(),
        source,
    })
}

// =============================================================================
// HEXAGRAM TABLE
// =============================================================================

/// King Wen names keyed by bit pattern
#[derive(Debug, Clone)]
pub struct HexagramTable {
    /// Indexed by pattern (0..64)
    by_pattern: Vec<HexagramName>,
    /// Short name, short name + 卦, and traditional name → pattern
    name_index: HashMap<String, u8>,
    /// King Wen number → pattern
    number_index: HashMap<u8, u8>,
}

impl HexagramTable {
    const TABLE: &'static str = "hexagrams";

    /// Table shipped with the crate
    pub fn bundled() -> Result<Self, ConfigurationError> {
        Self::from_json(BUNDLED_HEXAGRAMS)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let json = read_table(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let entries: Vec<HexagramName> = serde_json::from_str(json)
            .map_err(|source| ConfigurationError::Malformed { table: Self::TABLE, source })?;
        Self::from_entries(entries)
    }

    /// Validate entries and build the indexes
    pub fn from_entries(entries: Vec<HexagramName>) -> Result<Self, ConfigurationError> {
        if entries.len() != HEXAGRAM_COUNT {
            return Err(ConfigurationError::WrongSize {
                table: Self::TABLE,
                found: entries.len(),
                expected: HEXAGRAM_COUNT,
            });
        }

        let mut slots: Vec<Option<HexagramName>> = vec![None; HEXAGRAM_COUNT];
        let mut name_index = HashMap::new();
        let mut number_index = HashMap::new();

        for entry in entries {
            let key = format!("#{}", entry.number);
            let invalid = |reason: String| ConfigurationError::InvalidEntry {
                table: Self::TABLE,
                key: key.clone(),
                reason,
            };

            if entry.number == 0 || entry.number as usize > HEXAGRAM_COUNT {
                return Err(invalid(format!("number {} outside 1..=64", entry.number)));
            }
            let pattern = Hexagram::from_pattern(entry.pattern)
                .ok_or_else(|| invalid(format!("pattern {} exceeds 6 bits", entry.pattern)))?;
            if Hexagram::from_trigrams(entry.upper, entry.lower) != pattern {
                return Err(invalid(format!(
                    "trigrams {}/{} do not match pattern {}",
                    entry.upper, entry.lower, pattern
                )));
            }
            if entry.name.trim().is_empty() || entry.traditional_name.trim().is_empty() {
                return Err(invalid("empty name".to_string()));
            }
            if number_index.insert(entry.number, entry.pattern).is_some() {
                return Err(ConfigurationError::Duplicate { table: Self::TABLE, key });
            }

            let mut names = vec![entry.name.clone(), entry.traditional_name.clone()];
            if !entry.name.ends_with('卦') {
                names.push(format!("{}卦", entry.name));
            }
            for name in names {
                if let Some(existing) = name_index.insert(name.clone(), entry.pattern) {
                    if existing != entry.pattern {
                        return Err(ConfigurationError::Duplicate { table: Self::TABLE, key: name });
                    }
                }
            }

            let slot = &mut slots[entry.pattern as usize];
            if slot.is_some() {
                return Err(ConfigurationError::Duplicate {
                    table: Self::TABLE,
                    key: format!("pattern {}", pattern),
                });
            }
            *slot = Some(entry);
        }

        // 64 entries with 64 distinct in-range patterns fill every slot
        let by_pattern: Vec<HexagramName> = slots.into_iter().flatten().collect();
        info!(entries = by_pattern.len(), "hexagram table loaded");

        Ok(Self { by_pattern, name_index, number_index })
    }

    /// Entry for a pattern
    pub fn lookup(&self, hexagram: Hexagram) -> &HexagramName {
        &self.by_pattern[hexagram.pattern() as usize]
    }

    /// Entry by King Wen number (1..=64)
    pub fn by_number(&self, number: u8) -> Option<&HexagramName> {
        self.number_index
            .get(&number)
            .map(|&p| &self.by_pattern[p as usize])
    }

    /// Entry by short name (否, 否卦) or traditional name (天地否)
    pub fn by_name(&self, name: &str) -> Option<&HexagramName> {
        self.name_index
            .get(name.trim())
            .map(|&p| &self.by_pattern[p as usize])
    }

    /// All entries in King Wen order
    pub fn king_wen_order(&self) -> Vec<&HexagramName> {
        let mut entries: Vec<&HexagramName> = self.by_pattern.iter().collect();
        entries.sort_by_key(|e| e.number);
        entries
    }
}

// =============================================================================
// CITY TABLE
// =============================================================================

/// Location key → coordinate
#[derive(Debug, Clone)]
pub struct CityTable {
    entries: Vec<GeoCoordinate>,
    /// Keys and aliases → entry index
    index: HashMap<String, usize>,
}

impl CityTable {
    const TABLE: &'static str = "cities";

    /// Table shipped with the crate (Taiwan cities and counties)
    pub fn bundled() -> Result<Self, ConfigurationError> {
        Self::from_json(BUNDLED_CITIES)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let json = read_table(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let entries: Vec<GeoCoordinate> = serde_json::from_str(json)
            .map_err(|source| ConfigurationError::Malformed { table: Self::TABLE, source })?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<GeoCoordinate>) -> Result<Self, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::Empty { table: Self::TABLE });
        }

        let mut index = HashMap::new();
        for (i, city) in entries.iter().enumerate() {
            let invalid = |reason: &str| ConfigurationError::InvalidEntry {
                table: Self::TABLE,
                key: city.key.clone(),
                reason: reason.to_string(),
            };
            if city.key.trim().is_empty() {
                return Err(invalid("empty key"));
            }
            if !city.latitude.is_finite() || !(-90.0..=90.0).contains(&city.latitude) {
                return Err(invalid("latitude outside -90..=90"));
            }
            if !city.longitude.is_finite() || !(-180.0..=180.0).contains(&city.longitude) {
                return Err(invalid("longitude outside -180..=180"));
            }
            for name in std::iter::once(&city.key).chain(city.aliases.iter()) {
                if index.insert(name.trim().to_string(), i).is_some() {
                    return Err(ConfigurationError::Duplicate {
                        table: Self::TABLE,
                        key: name.clone(),
                    });
                }
            }
        }

        info!(entries = entries.len(), names = index.len(), "city table loaded");
        Ok(Self { entries, index })
    }

    /// Coordinate for a key or alias
    pub fn lookup(&self, location: &str) -> Option<&GeoCoordinate> {
        self.index.get(location.trim()).map(|&i| &self.entries[i])
    }

    /// Entries in table order
    pub fn entries(&self) -> &[GeoCoordinate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
