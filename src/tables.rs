//! Lookup Tables - Injected Plate Data
//!
//! Regions, localities and category glyphs are plain data supplied by the
//! host. They are checked once when loaded and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::TableError;

/// glyph -> localities
pub type LocalityTable = BTreeMap<String, Vec<String>>;

/// region number -> glyph -> localities
pub type RegionNumbers = BTreeMap<String, LocalityTable>;

const BUNDLED_TABLES: &str = include_str!("../data/tables.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateTables {
    /// Trailing literal every plate ends with.
    pub country: String,
    /// Alternative spellings of the country literal accepted on input.
    #[serde(default)]
    pub country_aliases: Vec<String>,
    #[serde(default = "default_country_prefix")]
    pub country_prefix: String,
    pub regions: BTreeMap<String, RegionNumbers>,
    /// glyph -> category name
    pub categories: BTreeMap<String, String>,
    /// glyph -> two digit code
    pub category_codes: BTreeMap<String, String>,
    /// glyph -> Latin equivalent
    pub latin: BTreeMap<String, String>,
}

fn default_country_prefix() -> String { "IR".to_string() }

impl PlateTables {
    /// Tables shipped with the crate.
    pub fn bundled() -> Result<Self, TableError> {
        Self::from_json(BUNDLED_TABLES)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tables: Self = serde_json::from_str(json)?;
        tables.check()?;
        Ok(tables)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, TableError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Verify the construction invariants: region numbers partition the
    /// regions, and glyph codes form a bijection over the glyph set.
    pub fn check(&self) -> Result<(), TableError> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (region, numbers) in &self.regions {
            for number in numbers.keys() {
                if let Some(first) = owners.insert(number, region) {
                    return Err(TableError::DuplicateRegionNumber {
                        number: number.clone(),
                        first: first.to_string(),
                        second: region.clone(),
                    });
                }
            }
        }

        if self.categories.is_empty() {
            return Err(TableError::EmptyGlyph);
        }

        let mut code_owners: HashMap<&str, &str> = HashMap::new();
        for glyph in self.categories.keys() {
            if glyph.is_empty() {
                return Err(TableError::EmptyGlyph);
            }
            let code = self.category_codes.get(glyph)
                .ok_or_else(|| TableError::MissingCategoryCode(glyph.clone()))?;
            if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TableError::MalformedCategoryCode {
                    glyph: glyph.clone(),
                    code: code.clone(),
                });
            }
            if let Some(first) = code_owners.insert(code, glyph) {
                return Err(TableError::DuplicateCategoryCode {
                    code: code.clone(),
                    first: first.to_string(),
                    second: glyph.clone(),
                });
            }
            if !self.latin.contains_key(glyph) {
                return Err(TableError::MissingLatinForm(glyph.clone()));
            }
        }

        Ok(())
    }

    /// Scan every region for the one that owns `number`.
    pub fn region_for_number(&self, number: &str) -> Option<&str> {
        self.regions.iter()
            .find(|(_, numbers)| numbers.contains_key(number))
            .map(|(name, _)| name.as_str())
    }

    pub fn category_name(&self, glyph: &str) -> Option<&str> {
        self.categories.get(glyph).map(String::as_str)
    }

    pub fn category_code(&self, glyph: &str) -> Option<&str> {
        self.category_codes.get(glyph).map(String::as_str)
    }

    /// Inverse of [`PlateTables::category_code`].
    pub fn glyph_for_code(&self, code: &str) -> Option<&str> {
        self.category_codes.iter()
            .find(|(_, c)| c.as_str() == code)
            .map(|(glyph, _)| glyph.as_str())
    }

    pub fn latin_for(&self, glyph: &str) -> Option<&str> {
        self.latin.get(glyph).map(String::as_str)
    }

    /// Localities on file for a region/number/glyph triple. Missing entries
    /// at any level yield an empty slice.
    pub fn localities(&self, region: &str, number: &str, glyph: &str) -> &[String] {
        self.regions.get(region)
            .and_then(|numbers| numbers.get(number))
            .and_then(|glyphs| glyphs.get(glyph))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// The canonical country literal followed by its aliases.
    pub fn country_literals(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.country.as_str())
            .chain(self.country_aliases.iter().map(String::as_str))
    }
}
