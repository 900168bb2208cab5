//! Contract Invariant Tests
//!
//! These tests verify the plate decoding and conversion guarantees
//! end to end through the pipeline.

use persian_plate_core::{
    attach_date, to_component_array, to_display_string, to_latin_text, to_numeric_code,
    CategoryGroup, PipelineError, PlateError, PlatePipeline, PlateTables, TableError,
};
use std::fs;
use tempfile::TempDir;

const ARABIC_YEH_COUNTRY: &str = "\u{627}\u{64a}\u{631}\u{627}\u{646}";

fn create_pipeline() -> PlatePipeline {
    PlatePipeline::new(PlateTables::bundled().unwrap()).unwrap()
}

#[test]
fn invariant_end_to_end_taxi_plate() {
    let pipeline = create_pipeline();

    let plate = pipeline.decode(&format!("12 ت 345 - 67 {}", ARABIC_YEH_COUNTRY)).unwrap();
    assert_eq!(plate.two_digit_number(), "12");
    assert_eq!(plate.category_glyph(), "ت");
    assert_eq!(plate.three_digit_number(), "345");
    assert_eq!(plate.region_number(), "67");
    assert_eq!(plate.category_name(), "taxi");

    let code = pipeline.tables().category_code("ت").unwrap();
    assert_eq!(to_numeric_code(&plate), format!("67{}12345", code));
    assert_eq!(pipeline.latin_text(&plate, false), "12T345-67");
    assert_eq!(
        CategoryGroup::from_category_name(plate.category_name()),
        CategoryGroup::Taxi
    );
}

#[test]
fn invariant_numeric_code_round_trip() {
    let pipeline = create_pipeline();
    let country = pipeline.tables().country.clone();

    let regions: Vec<String> = pipeline.tables().regions.values()
        .flat_map(|numbers| numbers.keys().cloned())
        .collect();
    let glyphs: Vec<String> = pipeline.tables().glyphs().map(str::to_string).collect();

    for (i, region) in regions.iter().enumerate() {
        let glyph = &glyphs[i % glyphs.len()];
        let source = format!("{} {} {} - {} {}", 10 + i % 90, glyph, 100 + i * 7 % 900, region, country);
        let plate = pipeline.decode(&source).unwrap();
        let again = pipeline.decode_code(&to_numeric_code(&plate)).unwrap();
        assert_eq!(again, plate, "round trip of {}", source);
    }
}

#[test]
fn invariant_round_trip_ignores_source_spelling() {
    let pipeline = create_pipeline();

    for source in [
        format!("12 ت 345 - 67 {}", ARABIC_YEH_COUNTRY),
        format!("12   ت  345 -  67 {}", pipeline.tables().country),
    ] {
        let plate = pipeline.decode(&source).unwrap();
        let again = pipeline.decode_code(&to_numeric_code(&plate)).unwrap();
        assert_eq!(again, plate, "round trip of {}", source);
        assert_eq!(to_display_string(&plate), source);
    }
}

#[test]
fn invariant_region_boundaries() {
    let pipeline = create_pipeline();
    let plate = |region: &str| format!("12 ب 345 - {} {}", region, pipeline.tables().country);

    assert!(pipeline.validate(&plate("10")));
    assert!(pipeline.decode(&plate("10")).is_ok());
    assert!(!pipeline.validate(&plate("0")));
    assert!(!pipeline.validate(&plate("100")));
    assert!(matches!(
        pipeline.decode(&plate("100")),
        Err(PlateError::GrammarMismatch(_))
    ));
}

#[test]
fn invariant_every_region_number_has_one_region() {
    let tables = PlateTables::bundled().unwrap();
    for (name, numbers) in &tables.regions {
        for number in numbers.keys() {
            assert_eq!(tables.region_for_number(number), Some(name.as_str()));
        }
    }
}

#[test]
fn invariant_conversions_are_pure() {
    let pipeline = create_pipeline();
    let plate = pipeline.decode(&format!("47 الف 219 - 55 {}", pipeline.tables().country)).unwrap();

    assert_eq!(to_component_array(&plate), to_component_array(&plate));
    assert_eq!(
        to_latin_text(&plate, pipeline.tables(), true),
        to_latin_text(&plate, pipeline.tables(), true)
    );
    assert_eq!(to_latin_text(&plate, pipeline.tables(), true), "IR47A219-55");
}

#[test]
fn invariant_date_stamp_rules() {
    let pipeline = create_pipeline();
    let plate = pipeline.decode(&format!("12 ب 345 - 67 {}", pipeline.tables().country)).unwrap();

    assert!(matches!(attach_date(&plate, "13-13-40"), Err(PlateError::DateIsNotValid(_))));

    let stamped = attach_date(&plate, "99-02-31").unwrap();
    assert_eq!(stamped.date_stamp(), Some("99/02/31"));
    assert_eq!(to_numeric_code(&stamped), to_numeric_code(&plate));
}

#[test]
fn invariant_empty_locality_is_not_an_error() {
    let pipeline = create_pipeline();
    let plate = pipeline.decode(&format!("12 ب 345 - 64 {}", pipeline.tables().country)).unwrap();
    assert_eq!(plate.region_name(), "Yazd");
    assert_eq!(plate.locality_name(), "");
}

#[test]
fn invariant_render_requires_templates() {
    let pipeline = create_pipeline();
    let result = pipeline.render_input(&format!("12 ت 345 - 67 {}", pipeline.tables().country), None);
    assert!(matches!(result, Err(PipelineError::RendererNotConfigured)));
}

#[test]
fn invariant_render_validates_first() {
    let pipeline = create_pipeline();
    let result = pipeline.render_input("12 X 345 - 67 nowhere", None);
    assert!(matches!(result, Err(PipelineError::Plate(PlateError::GrammarMismatch(_)))));

    let result = pipeline.render_input(
        &format!("12 ت 345 - 67 {}", pipeline.tables().country),
        Some("13-13-40"),
    );
    assert!(matches!(result, Err(PipelineError::Plate(PlateError::DateIsNotValid(_)))));
}

#[test]
fn invariant_tables_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(&path, r#"{
        "country": "ایران",
        "regions": {"Qom": {"16": {"ب": ["Qom"]}}},
        "categories": {"ب": "normal"},
        "categoryCodes": {"ب": "01"},
        "latin": {"ب": "B"}
    }"#).unwrap();

    let pipeline = PlatePipeline::new(PlateTables::load_from_file(&path).unwrap()).unwrap();
    let plate = pipeline.decode(&format!("12 ب 345 - 16 {}", pipeline.tables().country)).unwrap();
    assert_eq!(plate.locality_name(), "Qom");
    assert_eq!(pipeline.tables().country_prefix, "IR");
    assert_eq!(to_numeric_code(&plate), "160112345");
}

#[test]
fn invariant_overlapping_regions_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(&path, r#"{
        "country": "ایران",
        "regions": {"A": {"16": {}}, "B": {"16": {}}},
        "categories": {"ب": "normal"},
        "categoryCodes": {"ب": "01"},
        "latin": {"ب": "B"}
    }"#).unwrap();

    assert!(matches!(
        PlateTables::load_from_file(&path),
        Err(TableError::DuplicateRegionNumber { .. })
    ));
}

#[test]
fn invariant_pipeline_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PlatePipeline>();
    assert_send_sync::<PlateTables>();
}
