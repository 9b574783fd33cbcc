use crate::{
    measure::{Extent, Orientation, TextMeasurer},
    units::Px,
    TagWallError,
};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::fmt;

/// A parsed TTF or OTF font used to measure tags the way they will render.
///
/// Measurements follow the font's horizontal metrics: a horizontal tag is as
/// wide as the sum of its glyph advances and as tall as the font's ascent plus
/// descent. A vertical tag stacks one glyph per line, so it is as wide as its
/// widest glyph and as tall as one line height per character.
pub struct Font {
    pub face: OwnedFace,
    /// Extra width and height reserved for emphasized (stroked) text
    pub emphasis_stroke: Px,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TagWallError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font {
            face,
            emphasis_stroke: Px(0.0),
        })
    }

    /// Reserve `stroke` extra pixels around emphasized text
    pub fn with_emphasis_stroke(mut self, stroke: Px) -> Font {
        self.emphasis_stroke = stroke;
        self
    }

    /// Obtain the full name of the font, if it carries one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Px) -> Px {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Px) -> Px {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Height of a single line of text without the leading
    pub fn line_height(&self, size: Px) -> Px {
        self.ascent(size) - self.descent(size)
    }

    /// Glyph for `ch`, falling back to the replacement character and then `?`
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
    }

    fn advance(&self, ch: char, size: Px) -> Px {
        self.glyph_id(ch)
            .and_then(|gid| self.face.as_face_ref().glyph_hor_advance(gid))
            .map(|adv| self.scaling(size) * adv as f32)
            .unwrap_or_default()
    }

    /// Calculate the width of a given string of text at the given size
    pub fn width_of_text(&self, text: &str, size: Px) -> Px {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("emphasis_stroke", &self.emphasis_stroke)
            .finish()
    }
}

impl TextMeasurer for Font {
    fn measure(&self, text: &str, size: Px, emphasis: bool, orientation: Orientation) -> Extent {
        let stroke = if emphasis {
            self.emphasis_stroke
        } else {
            Px(0.0)
        };

        match orientation {
            Orientation::Horizontal => Extent::new(
                self.width_of_text(text, size) + stroke,
                self.line_height(size) + stroke,
            ),
            Orientation::Vertical => {
                let widest = text
                    .chars()
                    .map(|ch| self.advance(ch, size))
                    .fold(Px(0.0), Px::max);
                let rows = text.chars().count() as f32;
                Extent::new(widest + stroke, self.line_height(size) * rows + stroke)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = Font::load(b"definitely not a font".to_vec());
        assert!(matches!(result, Err(TagWallError::FaceParsing(_))));
    }

    #[test]
    fn empty_bytes_are_rejected() {
        assert!(Font::load(Vec::new()).is_err());
    }

    fn mono() -> Font {
        Font::load(include_bytes!("../tests/fonts/DejaVuSansMono.ttf").to_vec()).expect("valid font")
    }

    fn close(a: Px, b: Px) -> bool {
        (a.0 - b.0).abs() < 1e-3
    }

    #[test]
    fn debug_names_the_face() {
        let font = mono();
        assert_eq!(font.name().as_deref(), Some("DejaVu Sans Mono"));
        assert!(format!("{font:?}").contains("DejaVu Sans Mono"));
    }

    #[test]
    fn horizontal_extent_sums_advances() {
        let font = mono();
        let size = Px(20.0);
        let one = font.measure("a", size, false, Orientation::Horizontal);
        let three = font.measure("abc", size, false, Orientation::Horizontal);

        assert!(one.width.0 > 0.0);
        assert!(close(three.width, one.width * 3.0));
        assert!(close(three.height, font.line_height(size)));
        assert!(font.line_height(size).0 > 0.0);
    }

    #[test]
    fn vertical_extent_stacks_one_line_per_character() {
        let font = mono();
        let size = Px(16.0);
        let vertical = font.measure("abcd", size, false, Orientation::Vertical);
        let single = font.measure("a", size, false, Orientation::Horizontal);

        assert!(close(vertical.width, single.width));
        assert!(close(vertical.height, font.line_height(size) * 4.0));
    }

    #[test]
    fn emphasis_adds_the_stroke() {
        let font = mono().with_emphasis_stroke(Px(2.0));
        let size = Px(12.0);
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let plain = font.measure("tag", size, false, orientation);
            let bold = font.measure("tag", size, true, orientation);
            assert!(close(bold.width, plain.width + Px(2.0)));
            assert!(close(bold.height, plain.height + Px(2.0)));
        }
    }

    #[test]
    fn missing_glyphs_fall_back() {
        let font = mono();
        assert!(font.glyph_id('\u{10FFFD}').is_some());
        assert!(close(
            font.width_of_text("\u{10FFFD}", Px(10.0)),
            font.width_of_text("a", Px(10.0))
        ));
    }
}
