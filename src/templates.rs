//! Plate Templates - Category Groups and Render Assets
//!
//! Each category group has its own background bitmap and accent colour.
//! Categories outside the named groups use the normal template.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::RenderError;

pub const FONT_FILE: &str = "font.ttf";

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryGroup {
    Normal,
    Taxi,
    Government,
    Police,
}

impl CategoryGroup {
    pub const ALL: [CategoryGroup; 4] = [
        CategoryGroup::Normal,
        CategoryGroup::Taxi,
        CategoryGroup::Government,
        CategoryGroup::Police,
    ];

    pub fn from_category_name(name: &str) -> Self {
        match name {
            "taxi" => Self::Taxi,
            "government" => Self::Government,
            "police" => Self::Police,
            _ => Self::Normal,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Normal => "plate-normal.png",
            Self::Taxi => "plate-taxi.png",
            Self::Government => "plate-government.png",
            Self::Police => "plate-police.png",
        }
    }

    /// Front layer colour of the plate characters.
    pub fn accent(&self) -> Rgb {
        match self {
            Self::Normal => [20, 20, 20],
            Self::Taxi => [40, 32, 8],
            Self::Government => [140, 20, 28],
            Self::Police => [18, 80, 40],
        }
    }
}

/// Template bitmaps and the plate font, as encoded bytes.
pub struct TemplateSet {
    font: Vec<u8>,
    templates: HashMap<CategoryGroup, Vec<u8>>,
}

impl TemplateSet {
    pub fn new(font: Vec<u8>) -> Self {
        Self { font, templates: HashMap::new() }
    }

    /// Read `font.ttf` and whichever `plate-*.png` files exist. The normal
    /// template is required.
    pub fn load_from_dir(dir: &Path) -> Result<Self, RenderError> {
        let mut set = Self::new(fs::read(dir.join(FONT_FILE))?);
        for group in CategoryGroup::ALL {
            let path = dir.join(group.file_name());
            if path.is_file() {
                set.register(group, fs::read(&path)?);
            }
        }

        if !set.templates.contains_key(&CategoryGroup::Normal) {
            return Err(RenderError::TemplateNotFound(
                dir.join(CategoryGroup::Normal.file_name()).display().to_string(),
            ));
        }

        tracing::debug!(dir = %dir.display(), templates = set.templates.len(), "loaded plate templates");
        Ok(set)
    }

    pub fn register(&mut self, group: CategoryGroup, png: Vec<u8>) {
        self.templates.insert(group, png);
    }

    pub fn font(&self) -> &[u8] {
        &self.font
    }

    /// The group's template, falling back to the normal one.
    pub fn get(&self, group: CategoryGroup) -> Result<&[u8], RenderError> {
        self.templates.get(&group)
            .or_else(|| self.templates.get(&CategoryGroup::Normal))
            .map(Vec::as_slice)
            .ok_or_else(|| RenderError::TemplateNotFound(group.file_name().to_string()))
    }
}
