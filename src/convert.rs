//! Canonical Converter
//!
//! Equivalent forms of a decoded plate:
//! - numeric code `RRCCNNMMM`
//! - display string (the validated source, verbatim)
//! - component array `[country, region, glyph, threeDigit, twoDigit]`
//! - Latin text `[IR]NN<latin>NNN-R`

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::decoder::{decode, ParsedPlate};
use crate::error::PlateError;
use crate::grammar::PlateGrammar;
use crate::tables::PlateTables;

pub const NUMERIC_CODE_LEN: usize = 9;

static DATE_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").unwrap()
});

/// Region (zero padded to 2), category code, two-digit and three-digit
/// numbers.
pub fn to_numeric_code(plate: &ParsedPlate) -> String {
    format!(
        "{:0>2}{}{}{}",
        plate.region_number, plate.category_code, plate.two_digit_number, plate.three_digit_number
    )
}

/// Rebuild the display string a numeric code stands for.
///
/// Never fails: a malformed code or an unknown category code produces a
/// string the grammar rejects, so callers must re-validate.
pub fn from_numeric_code(code: &str, tables: &PlateTables) -> String {
    if code.len() != NUMERIC_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return code.to_string();
    }

    let (region, rest) = code.split_at(2);
    let (category_code, rest) = rest.split_at(2);
    let (two_digit, three_digit) = rest.split_at(2);

    let glyph = tables.glyph_for_code(category_code).unwrap_or(category_code);
    let region = match region.trim_start_matches('0') {
        "" => region,
        trimmed => trimmed,
    };

    format!("{} {} {} - {} {}", two_digit, glyph, three_digit, region, tables.country)
}

/// Reconstruct, re-validate and decode a numeric code.
pub fn decode_numeric_code(
    code: &str,
    grammar: &PlateGrammar,
    tables: &PlateTables,
) -> Result<ParsedPlate, PlateError> {
    decode(&from_numeric_code(code, tables), grammar, tables)
}

/// The string the plate was decoded from, exactly as given.
pub fn to_display_string(plate: &ParsedPlate) -> &str {
    &plate.source
}

/// Split from the display string's tokens, so the result mirrors whatever
/// spelling the source used (including country aliases).
pub fn to_component_array(plate: &ParsedPlate) -> [String; 5] {
    let tokens: Vec<&str> = plate.source
        .split_whitespace()
        .filter(|token| *token != "-")
        .collect();
    let token = |i: usize| tokens.get(i).copied().unwrap_or_default().to_string();

    [token(4), token(3), token(1), token(2), token(0)]
}

pub fn to_latin_text(plate: &ParsedPlate, tables: &PlateTables, include_prefix: bool) -> String {
    let latin = tables.latin_for(&plate.category_glyph).unwrap_or(plate.category_glyph.as_str());
    let prefix = if include_prefix { tables.country_prefix.as_str() } else { "" };
    format!(
        "{}{}{}{}-{}",
        prefix, plate.two_digit_number, latin, plate.three_digit_number, plate.region_number
    )
}

/// Attach a `yy-mm-dd` stamp, stored as `yy/mm/dd`.
///
/// Months are bounded to 01..12 and days to 01..31 for every month.
pub fn attach_date(plate: &ParsedPlate, date: &str) -> Result<ParsedPlate, PlateError> {
    let caps = DATE_STAMP.captures(date)
        .ok_or_else(|| PlateError::DateIsNotValid(date.to_string()))?;

    let mut stamped = plate.clone();
    stamped.date_stamp = Some(format!("{}/{}/{}", &caps[1], &caps[2], &caps[3]));
    Ok(stamped)
}

/// `yy-mm-dd` input form for a calendar date.
pub fn date_stamp_for(date: NaiveDate) -> String {
    date.format("%y-%m-%d").to_string()
}
