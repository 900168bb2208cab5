//! Persian Plate Core - Vehicle Plate Decoding and Rendering
//!
//! # Flow
//! 1. Grammar validates `NN G NNN - R <country>`
//! 2. Decoder resolves region, category and locality from injected tables
//! 3. Converter maps between display string, numeric code, component
//!    array and Latin text
//! 4. Renderer lays out glyphs and draws them embossed onto a template

pub mod error;
pub mod tables;
pub mod grammar;
pub mod decoder;
pub mod convert;
pub mod layout;
pub mod templates;
pub mod render;
pub mod hashing;
pub mod pipeline;

pub use error::{PlateError, RenderError, TableError};
pub use tables::PlateTables;
pub use grammar::{PlateFields, PlateGrammar};
pub use decoder::{decode, ParsedPlate};
pub use convert::{
    attach_date, decode_numeric_code, from_numeric_code, to_component_array, to_display_string,
    to_latin_text, to_numeric_code,
};
pub use templates::{CategoryGroup, TemplateSet};
pub use render::{Canvas, PlateRenderer};
pub use pipeline::{PipelineError, PlatePipeline, RenderedPlate};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
