//! Glyph Layout Engine
//!
//! Positions are computed by walking a run of characters with a running x
//! cursor. Characters with an explicit margin use it directly. Anything
//! else (the category glyph) borrows its lead from the previous
//! character's neighbor margin and its trail from the next one's, plus a
//! fixed bias. The tables and constants below fix the pixel output; any
//! change to them moves glyphs on the rendered plate.

use crate::decoder::ParsedPlate;

/// Offset applied before drawing (`lead`) and after it (`trail`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub lead: i32,
    pub trail: i32,
}

impl Margin {
    pub const fn new(lead: i32, trail: i32) -> Self {
        Self { lead, trail }
    }
}

/// Character-keyed margin table.
#[derive(Debug)]
pub struct KerningTable(&'static [(char, Margin)]);

impl KerningTable {
    pub fn get(&self, ch: char) -> Option<Margin> {
        self.0.iter().find(|(key, _)| *key == ch).map(|(_, margin)| *margin)
    }
}

pub static DIGIT_MARGINS: KerningTable = KerningTable(&[
    ('0', Margin::new(-4, -12)),
    ('1', Margin::new(4, -12)),
    ('2', Margin::new(2, -7)),
    ('3', Margin::new(2, -11)),
    ('4', Margin::new(2, -10)),
    ('5', Margin::new(1, -10)),
    ('6', Margin::new(3, -10)),
    ('7', Margin::new(2, -10)),
    ('8', Margin::new(0, -10)),
    ('9', Margin::new(2, -11)),
]);

/// Margins a digit lends to an adjacent category glyph.
pub static NEIGHBOR_MARGINS: KerningTable = KerningTable(&[
    ('0', Margin::new(8, 4)),
    ('1', Margin::new(-2, 4)),
    ('2', Margin::new(-9, 2)),
    ('3', Margin::new(-2, 3)),
    ('4', Margin::new(-3, 0)),
    ('5', Margin::new(2, 4)),
    ('6', Margin::new(-7, 4)),
    ('7', Margin::new(0, 0)),
    ('8', Margin::new(6, 4)),
    ('9', Margin::new(-2, 4)),
]);

/// Region box digits: the main digit margins shifted by (+3, +1).
pub static REGION_MARGINS: KerningTable = KerningTable(&[
    ('0', Margin::new(-1, -11)),
    ('1', Margin::new(7, -11)),
    ('2', Margin::new(5, -6)),
    ('3', Margin::new(5, -10)),
    ('4', Margin::new(5, -9)),
    ('5', Margin::new(4, -9)),
    ('6', Margin::new(6, -9)),
    ('7', Margin::new(5, -9)),
    ('8', Margin::new(3, -9)),
    ('9', Margin::new(5, -10)),
]);

pub const MAIN_FONT_SIZE: i32 = 44;
pub const REGION_FONT_SIZE: i32 = MAIN_FONT_SIZE - 7;

#[derive(Debug)]
pub struct LayoutProfile {
    pub origin_x: i32,
    pub digit_y: i32,
    pub glyph_y: i32,
    pub font_size: i32,
    pub margins: &'static KerningTable,
    pub neighbor_margins: &'static KerningTable,
    /// Added to synthesized margins.
    pub fallback_bias: Margin,
}

/// Two-digit number, category glyph, three-digit number.
pub static MAIN_PROFILE: LayoutProfile = LayoutProfile {
    origin_x: MAIN_FONT_SIZE - 8,
    digit_y: 22,
    glyph_y: 21,
    font_size: MAIN_FONT_SIZE,
    margins: &DIGIT_MARGINS,
    neighbor_margins: &NEIGHBOR_MARGINS,
    fallback_bias: Margin::new(2, 10),
};

/// Region box.
pub static REGION_PROFILE: LayoutProfile = LayoutProfile {
    origin_x: 281,
    digit_y: 32,
    glyph_y: 32,
    font_size: REGION_FONT_SIZE,
    margins: &REGION_MARGINS,
    neighbor_margins: &NEIGHBOR_MARGINS,
    fallback_bias: Margin::new(2, 10),
};

/// A character with its top-left pen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub ch: char,
    pub x: i32,
    pub y: i32,
    pub font_size: i32,
}

/// Category glyphs spelled with several code points ("الف") are drawn
/// inline as their first code point only.
pub fn inline_glyph(glyph: &str) -> Option<char> {
    glyph.chars().next()
}

pub fn main_run(plate: &ParsedPlate) -> Vec<char> {
    plate.two_digit_number().chars()
        .chain(inline_glyph(plate.category_glyph()))
        .chain(plate.three_digit_number().chars())
        .collect()
}

pub fn region_run(plate: &ParsedPlate) -> Vec<char> {
    plate.region_number().chars().collect()
}

pub fn layout(run: &[char], profile: &LayoutProfile) -> Vec<PlacedGlyph> {
    let mut x = profile.origin_x;
    let mut placed = Vec::with_capacity(run.len());

    for (index, &ch) in run.iter().enumerate() {
        let margin = profile.margins.get(ch)
            .unwrap_or_else(|| synthesize_margin(run, index, profile));

        let y = if ch.is_ascii_digit() { profile.digit_y } else { profile.glyph_y };

        x += margin.lead;
        placed.push(PlacedGlyph { ch, x, y, font_size: profile.font_size });
        x += margin.trail + profile.font_size;
    }

    placed
}

/// Missing neighbors, or neighbors without an entry, contribute zero.
fn synthesize_margin(run: &[char], index: usize, profile: &LayoutProfile) -> Margin {
    let neighbor = |i: Option<usize>| {
        i.and_then(|i| run.get(i))
            .and_then(|&ch| profile.neighbor_margins.get(ch))
            .unwrap_or(Margin::new(0, 0))
    };

    let previous = neighbor(index.checked_sub(1));
    let next = neighbor(index.checked_add(1));

    Margin::new(
        previous.lead + profile.fallback_bias.lead,
        next.trail + profile.fallback_bias.trail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(ch: char, x: i32, y: i32, font_size: i32) -> PlacedGlyph {
        PlacedGlyph { ch, x, y, font_size }
    }

    #[test]
    fn test_main_run_positions() {
        let run: Vec<char> = "12ت345".chars().collect();
        assert_eq!(
            layout(&run, &MAIN_PROFILE),
            vec![
                placed('1', 40, 22, 44),
                placed('2', 74, 22, 44),
                placed('ت', 104, 21, 44),
                placed('3', 163, 22, 44),
                placed('4', 198, 22, 44),
                placed('5', 233, 22, 44),
            ]
        );
    }

    #[test]
    fn test_region_run_positions() {
        let run: Vec<char> = "67".chars().collect();
        assert_eq!(
            layout(&run, &REGION_PROFILE),
            vec![placed('6', 287, 32, 37), placed('7', 320, 32, 37)]
        );
    }

    #[test]
    fn test_region_margins_match_shifted_digit_margins() {
        for digit in '0'..='9' {
            let main = DIGIT_MARGINS.get(digit).unwrap();
            let region = REGION_MARGINS.get(digit).unwrap();
            assert_eq!(region, Margin::new(main.lead + 3, main.trail + 1));
        }
    }

    #[test]
    fn test_fallback_uses_neighbors() {
        // prev '0' lends lead 8, next '8' lends trail 4.
        let run: Vec<char> = "0ب8".chars().collect();
        let glyphs = layout(&run, &MAIN_PROFILE);
        let after_zero = MAIN_PROFILE.origin_x - 4 + (-12) + 44;
        assert_eq!(glyphs[1].x, after_zero + 8 + 2);
        let after_glyph = glyphs[1].x + 4 + 10 + 44;
        assert_eq!(glyphs[2].x, after_glyph);
        assert_eq!(glyphs[1].y, MAIN_PROFILE.glyph_y);
    }

    #[test]
    fn test_fallback_without_neighbors() {
        let glyphs = layout(&['ب'], &MAIN_PROFILE);
        assert_eq!(glyphs[0].x, MAIN_PROFILE.origin_x + 2);
    }

    #[test]
    fn test_inline_glyph_takes_first_code_point() {
        assert_eq!(inline_glyph("الف"), Some('ا'));
        assert_eq!(inline_glyph("ت"), Some('ت'));
        assert_eq!(inline_glyph(""), None);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let run: Vec<char> = "98ا107".chars().collect();
        assert_eq!(layout(&run, &MAIN_PROFILE), layout(&run, &MAIN_PROFILE));
    }
}
