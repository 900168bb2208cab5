//! Grammar Validator
//!
//! Plates read `NN G NNN - R <country>`. The glyph alternation is built
//! from the category table, so the grammar is compiled per table set.

use regex::Regex;

use crate::error::{PlateError, TableError};
use crate::tables::PlateTables;

/// The five fields captured from a valid plate string, in grammar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateFields {
    pub two_digit_number: String,
    pub category_glyph: String,
    pub three_digit_number: String,
    pub region_number: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct PlateGrammar {
    pattern: Regex,
}

impl PlateGrammar {
    pub fn new(tables: &PlateTables) -> Result<Self, TableError> {
        let pattern = Regex::new(&Self::pattern_source(tables))?;
        Ok(Self { pattern })
    }

    /// `[0-9]` rather than `\d`: the latter also matches Persian digits.
    fn pattern_source(tables: &PlateTables) -> String {
        let glyphs = alternation(tables.glyphs());
        let countries = alternation(tables.country_literals());
        format!(
            r"^([1-9][0-9])\s+({})\s+([1-9][0-9]{{2}})\s+-\s+(10|[1-9][0-9]?)\s+({})$",
            glyphs, countries
        )
    }

    /// Strict check: the captured fields, or `GrammarMismatch`.
    pub fn validate(&self, input: &str) -> Result<PlateFields, PlateError> {
        let caps = self.pattern.captures(input.trim())
            .ok_or_else(|| PlateError::GrammarMismatch(input.to_string()))?;

        let field = |i: usize| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string());

        Ok(PlateFields {
            two_digit_number: field(1),
            category_glyph: field(2),
            three_digit_number: field(3),
            region_number: field(4),
            country: field(5),
        })
    }

    /// Soft check.
    pub fn is_valid(&self, input: &str) -> bool {
        self.pattern.is_match(input.trim())
    }
}

/// Escaped, longest-first alternation so multi-unit glyphs win over
/// their own prefixes.
fn alternation<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let mut items: Vec<&str> = items.collect();
    items.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    items.iter()
        .map(|item| regex::escape(item))
        .collect::<Vec<_>>()
        .join("|")
}
