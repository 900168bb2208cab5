//! Decoder - validated string to ParsedPlate
//!
//! Decoding is a pure function of the input and the tables. There is no
//! cached parse state, so one set of tables can serve any number of calls.

use serde::Serialize;

use crate::error::PlateError;
use crate::grammar::{PlateFields, PlateGrammar};
use crate::tables::PlateTables;

pub const TAXI_CATEGORY: &str = "taxi";

/// A fully decoded plate. Only produced by a successful decode.
///
/// Equality compares the decoded fields and the date stamp. The source
/// spelling is not part of it, so a plate rebuilt from its numeric code
/// equals the one it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPlate {
    pub(crate) two_digit_number: String,
    pub(crate) three_digit_number: String,
    pub(crate) category_glyph: String,
    pub(crate) category_name: String,
    pub(crate) category_code: String,
    pub(crate) region_number: String,
    pub(crate) region_name: String,
    pub(crate) locality_name: String,
    pub(crate) country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) date_stamp: Option<String>,
    pub(crate) source: String,
}

impl PartialEq for ParsedPlate {
    fn eq(&self, other: &Self) -> bool {
        self.two_digit_number == other.two_digit_number
            && self.three_digit_number == other.three_digit_number
            && self.category_glyph == other.category_glyph
            && self.category_name == other.category_name
            && self.category_code == other.category_code
            && self.region_number == other.region_number
            && self.region_name == other.region_name
            && self.locality_name == other.locality_name
            && self.country == other.country
            && self.date_stamp == other.date_stamp
    }
}

impl Eq for ParsedPlate {}

impl ParsedPlate {
    pub fn two_digit_number(&self) -> &str { &self.two_digit_number }
    pub fn three_digit_number(&self) -> &str { &self.three_digit_number }
    pub fn category_glyph(&self) -> &str { &self.category_glyph }
    pub fn category_name(&self) -> &str { &self.category_name }
    pub fn category_code(&self) -> &str { &self.category_code }
    pub fn region_number(&self) -> &str { &self.region_number }
    pub fn region_name(&self) -> &str { &self.region_name }

    /// Comma separated localities, empty when none are on file.
    pub fn locality_name(&self) -> &str { &self.locality_name }

    pub fn country(&self) -> &str { &self.country }

    /// Normalized `yy/mm/dd`, if a stamp was attached.
    pub fn date_stamp(&self) -> Option<&str> { self.date_stamp.as_deref() }

    pub fn is_taxi(&self) -> bool {
        self.category_name == TAXI_CATEGORY
    }
}

/// Validate `input` against the grammar and decode it. `input` is kept
/// verbatim as the display string.
pub fn decode(input: &str, grammar: &PlateGrammar, tables: &PlateTables) -> Result<ParsedPlate, PlateError> {
    let fields = grammar.validate(input)?;
    let plate = decode_fields(input, fields, tables)?;
    tracing::debug!(
        region = %plate.region_name,
        category = %plate.category_name,
        "decoded plate"
    );
    Ok(plate)
}

/// Resolve fields captured by the grammar against the tables.
fn decode_fields(source: &str, fields: PlateFields, tables: &PlateTables) -> Result<ParsedPlate, PlateError> {
    let region_name = tables.region_for_number(&fields.region_number)
        .ok_or_else(|| PlateError::RegionIsNotValid(fields.region_number.clone()))?
        .to_string();

    let category_name = tables.category_name(&fields.category_glyph)
        .ok_or_else(|| PlateError::GlyphIsNotValid(fields.category_glyph.clone()))?
        .to_string();

    let category_code = tables.category_code(&fields.category_glyph)
        .ok_or_else(|| PlateError::MissingCategoryCode(fields.category_glyph.clone()))?
        .to_string();

    // An empty locality list is a valid outcome, not LocalityNotFound.
    let locality_name = tables
        .localities(&region_name, &fields.region_number, &fields.category_glyph)
        .join(", ");

    Ok(ParsedPlate {
        two_digit_number: fields.two_digit_number,
        three_digit_number: fields.three_digit_number,
        category_glyph: fields.category_glyph,
        category_name,
        category_code,
        region_number: fields.region_number,
        region_name,
        locality_name,
        country: tables.country.clone(),
        date_stamp: None,
        source: source.to_string(),
    })
}
