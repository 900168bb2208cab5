//! Plate Pipeline - Single Entry Point
//!
//! Rendering only ever starts from a decoded plate, so every rendered image
//! has passed the grammar and table checks.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::convert::{self, attach_date, to_numeric_code};
use crate::decoder::{self, ParsedPlate};
use crate::error::{PlateError, RenderError, TableError};
use crate::grammar::PlateGrammar;
use crate::hashing::render_fingerprint;
use crate::render::PlateRenderer;
use crate::tables::PlateTables;
use crate::templates::CategoryGroup;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid plate: {0}")]
    Plate(#[from] PlateError),

    #[error("Invalid tables: {0}")]
    Tables(#[from] TableError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("No render templates configured")]
    RendererNotConfigured,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPlate {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub numeric_code: String,
    pub template: CategoryGroup,
    pub hash: String,
    pub data_base64: String,
    #[serde(skip)]
    pub png: Vec<u8>,
}

pub struct PlatePipeline {
    tables: PlateTables,
    grammar: PlateGrammar,
    renderer: Option<PlateRenderer>,
}

impl PlatePipeline {
    pub fn new(tables: PlateTables) -> Result<Self, PipelineError> {
        tables.check()?;
        let grammar = PlateGrammar::new(&tables)?;
        Ok(Self { tables, grammar, renderer: None })
    }

    pub fn with_renderer(mut self, renderer: PlateRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn tables(&self) -> &PlateTables {
        &self.tables
    }

    /// Soft grammar check.
    pub fn validate(&self, input: &str) -> bool {
        self.grammar.is_valid(input)
    }

    pub fn decode(&self, input: &str) -> Result<ParsedPlate, PlateError> {
        decoder::decode(input, &self.grammar, &self.tables)
    }

    pub fn decode_code(&self, code: &str) -> Result<ParsedPlate, PlateError> {
        convert::decode_numeric_code(code, &self.grammar, &self.tables)
    }

    pub fn from_numeric_code(&self, code: &str) -> String {
        convert::from_numeric_code(code, &self.tables)
    }

    pub fn latin_text(&self, plate: &ParsedPlate, include_prefix: bool) -> String {
        convert::to_latin_text(plate, &self.tables, include_prefix)
    }

    /// Decode, optionally stamp, and render in one step.
    pub fn render_input(&self, input: &str, date: Option<&str>) -> Result<RenderedPlate, PipelineError> {
        let plate = self.decode(input)?;
        let plate = match date {
            Some(date) => attach_date(&plate, date)?,
            None => plate,
        };
        self.render(&plate)
    }

    pub fn render(&self, plate: &ParsedPlate) -> Result<RenderedPlate, PipelineError> {
        let renderer = self.renderer.as_ref().ok_or(PipelineError::RendererNotConfigured)?;
        let png = renderer.render(plate, &self.tables)?;

        let numeric_code = to_numeric_code(plate);
        let rendered = RenderedPlate {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            hash: render_fingerprint(&numeric_code, &png),
            data_base64: base64::engine::general_purpose::STANDARD.encode(&png),
            template: CategoryGroup::from_category_name(plate.category_name()),
            numeric_code,
            png,
        };

        tracing::info!(code = %rendered.numeric_code, template = ?rendered.template, "plate rendered");
        Ok(rendered)
    }
}
