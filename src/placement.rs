use crate::colour::Colour;
use crate::measure::Orientation;
use crate::rect::Rect;
use crate::units::Px;

/// One rendered tag instance: where it goes and how it looks
#[derive(Clone, PartialEq, Debug)]
pub struct Placement {
    pub rect: Rect,
    pub text_size: Px,
    pub colour: Colour,
    /// Primary tags are drawn bold / stroked
    pub emphasis: bool,
    /// Stroke width to draw emphasized text with; zero when not emphasized
    pub stroke_width: Px,
    pub orientation: Orientation,
    pub text: String,
}

impl Placement {
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// The cell each character of a vertical tag is centred in: the tag's
    /// rectangle divided into equal rows, top to bottom. [None] for horizontal
    /// tags, which are drawn as one run of text across the whole rectangle.
    pub fn glyph_cells(&self) -> Option<Vec<(char, Rect)>> {
        if !self.is_vertical() {
            return None;
        }

        let count = self.text.chars().count() as i32;
        if count == 0 {
            return Some(Vec::new());
        }
        let row = self.rect.height / count;
        let cells = self
            .text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let top = self.rect.top + i as i32 * row;
                (ch, Rect::new(self.rect.left, top, self.rect.width, row))
            })
            .collect();
        Some(cells)
    }
}
