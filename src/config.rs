use crate::colour::{colours, Colour};
use crate::units::Px;

/// Minimum readable text size per unit of display density
const MIN_TEXT_SIZE_PER_DENSITY: f32 = 4.0;

/// Share of the canvas' shorter side the longest tag may span at the derived
/// maximum text size
const MAX_TEXT_SPAN: f32 = 0.8;

/// How the placement selector picks among the free rectangles a tag fits in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SelectionStrategy {
    /// The first large enough rectangle, in region enumeration order
    FirstFit,
    /// The largest rectangle for the first tag of a pass, afterwards the one
    /// whose centre lies farthest from the previously placed tag
    #[default]
    Spread,
}

/// Everything a layout run needs besides the tags themselves. A run works on
/// its own copy; changing the configuration schedules a fresh run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub width: i32,
    /// Canvas height in pixels
    pub height: i32,
    /// Smallest readable text size, also the step between tried sizes and the
    /// grid that random offsets snap to
    pub min_text_size: Px,
    /// Text size of the most prominent tags. Derived from the canvas and the
    /// longest tag when [None].
    pub max_text_size: Option<Px>,
    pub primary_colour: Colour,
    pub secondary_colour: Colour,
    pub strategy: SelectionStrategy,
    /// A tag is tried vertically once in this many attempts; 0 never rotates
    pub vertical_odds: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::for_density(1.0)
    }
}

impl LayoutConfig {
    /// Configuration for a display with the given pixel density, where the
    /// minimum text size is four density-independent pixels
    pub fn for_density(density: f32) -> LayoutConfig {
        LayoutConfig {
            width: 0,
            height: 0,
            min_text_size: Px(MIN_TEXT_SIZE_PER_DENSITY * density),
            max_text_size: None,
            primary_colour: colours::CHARCOAL,
            secondary_colour: colours::SILVER,
            strategy: SelectionStrategy::default(),
            vertical_odds: 3,
        }
    }

    /// Set the canvas size, modifying `self`
    pub fn size(&mut self, width: i32, height: i32) -> &mut Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the smallest readable text size, modifying `self`
    pub fn min_text_size(&mut self, size: Px) -> &mut Self {
        self.min_text_size = size;
        self
    }

    /// Set (or clear, to derive it) the largest text size, modifying `self`
    pub fn max_text_size(&mut self, size: Option<Px>) -> &mut Self {
        self.max_text_size = size;
        self
    }

    /// Set the primary and secondary tag colours, modifying `self`
    pub fn colours<P: Into<Colour>, S: Into<Colour>>(&mut self, primary: P, secondary: S) -> &mut Self {
        self.primary_colour = primary.into();
        self.secondary_colour = secondary.into();
        self
    }

    /// Set the placement selection strategy, modifying `self`
    pub fn strategy(&mut self, strategy: SelectionStrategy) -> &mut Self {
        self.strategy = strategy;
        self
    }

    /// Set how rarely tags are rotated, modifying `self`
    pub fn vertical_odds(&mut self, odds: u32) -> &mut Self {
        self.vertical_odds = odds;
        self
    }

    /// Stroke width used for emphasized tags
    pub fn stroke_width(&self) -> Px {
        self.min_text_size / 8.0
    }

    /// Whether a run with this configuration can place anything at all
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0 || !self.min_text_size.is_finite_positive()
    }

    /// The text size primary tags start at. An explicit ceiling is used as is;
    /// otherwise the longest tag may span most of the canvas' shorter side,
    /// snapped down to a multiple of the minimum size and never below it.
    pub fn resolve_max_text_size<S: AsRef<str>>(&self, tags: &[S]) -> Px {
        if let Some(size) = self.max_text_size {
            return size;
        }

        let longest = tags
            .iter()
            .map(|tag| tag.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        if longest == 0 {
            return self.min_text_size;
        }

        let shorter_side = self.width.min(self.height).max(0) as f32;
        let span = Px((shorter_side * MAX_TEXT_SPAN / longest as f32).floor());
        span.floor_to_multiple(self.min_text_size)
            .max(self.min_text_size)
    }
}
