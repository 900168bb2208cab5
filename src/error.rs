//! Error taxonomy
//!
//! Decode errors are deterministic. Nothing here is retryable.

use thiserror::Error;

/// Failures while validating or decoding a plate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlateError {
    #[error("Plate number is not valid: {0}")]
    GrammarMismatch(String),

    #[error("Category glyph is not valid: {0}")]
    GlyphIsNotValid(String),

    #[error("There is no region with number {0}")]
    RegionIsNotValid(String),

    #[error("Date stamp is not valid (expected yy-mm-dd): {0}")]
    DateIsNotValid(String),

    /// Declared for callers that match on it. Decoding resolves a missing
    /// locality to an empty string and never returns this.
    #[error("There is no locality for region {region} number {number} glyph {glyph}")]
    LocalityNotFound {
        region: String,
        number: String,
        glyph: String,
    },

    #[error("Category glyph {0} has no numeric code")]
    MissingCategoryCode(String),
}

/// Failures while loading or checking lookup tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tables: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Region number {number} appears under both {first} and {second}")]
    DuplicateRegionNumber {
        number: String,
        first: String,
        second: String,
    },

    #[error("Category code {code} is shared by {first} and {second}")]
    DuplicateCategoryCode {
        code: String,
        first: String,
        second: String,
    },

    #[error("Category code for {glyph} must be two ASCII digits, got {code:?}")]
    MalformedCategoryCode { glyph: String, code: String },

    #[error("Category glyph {0} has no numeric code")]
    MissingCategoryCode(String),

    #[error("Category glyph {0} has no Latin form")]
    MissingLatinForm(String),

    #[error("Category table is empty or contains an empty glyph")]
    EmptyGlyph,

    #[error("Failed to build plate pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failures while compositing a plate image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read render assets: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font data is not a usable TrueType/OpenType font")]
    FontInvalid,

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}
