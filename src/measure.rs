use crate::rect::Size;
use crate::units::Px;

/// How the characters of a tag are arranged
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// All characters on a single baseline
    #[default]
    Horizontal,
    /// Characters stacked top to bottom, one per row
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// The rendered bounding box of a piece of text
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Extent {
    pub width: Px,
    pub height: Px,
}

impl Extent {
    pub fn new(width: Px, height: Px) -> Extent {
        Extent { width, height }
    }

    /// The whole-pixel box that covers this extent, or [None] when the extent
    /// is zero, negative or not a number (such text cannot be placed)
    pub fn to_pixels(self) -> Option<Size> {
        if !self.width.is_finite_positive() || !self.height.is_finite_positive() {
            return None;
        }
        Some(Size::new(self.width.ceil_pixels(), self.height.ceil_pixels()))
    }
}

/// Reports how large a tag renders. Implementations are shared with the layout
/// worker thread, so they must be `Send + Sync`.
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` at `size`, with or without the emphasis stroke, laid out
    /// in `orientation`
    fn measure(&self, text: &str, size: Px, emphasis: bool, orientation: Orientation) -> Extent;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, size: Px, emphasis: bool, orientation: Orientation) -> Extent {
        (**self).measure(text, size, emphasis, orientation)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for std::sync::Arc<T> {
    fn measure(&self, text: &str, size: Px, emphasis: bool, orientation: Orientation) -> Extent {
        (**self).measure(text, size, emphasis, orientation)
    }
}

/// Treats every character as a `size` x `size` cell, which is how CJK text
/// (the typical tag content) renders in practice. Needs no font data.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MonospaceMeasurer {
    /// Added to both dimensions of emphasized text
    pub stroke_width: Px,
}

impl MonospaceMeasurer {
    pub fn new() -> MonospaceMeasurer {
        MonospaceMeasurer::default()
    }

    pub fn with_stroke_width(stroke_width: Px) -> MonospaceMeasurer {
        MonospaceMeasurer { stroke_width }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: Px, emphasis: bool, orientation: Orientation) -> Extent {
        let chars = text.chars().count() as f32;
        let stroke = if emphasis { self.stroke_width } else { Px(0.0) };
        let long = size * chars + stroke;
        let short = size + stroke;
        match orientation {
            Orientation::Horizontal => Extent::new(long, short),
            Orientation::Vertical => Extent::new(short, long),
        }
    }
}
