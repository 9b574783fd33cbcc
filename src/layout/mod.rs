//! The tag layout engine.
//!
//! A layout run packs as many tags as fit into a canvas without overlap, in
//! three passes that share one shrinking [`FreeRegion`]:
//!
//! 1. **Primary** - each tag in input order gets one prominent, emphasized
//!    placement, as large as will fit.
//! 2. **Secondary** - the tag list is swept again and again at decreasing sizes,
//!    placing de-emphasized copies wherever they fit.
//! 3. **Edge** - leftover slivers receive a tag whose length matches them.
//!
//! Every placement of the first two passes goes through [`select`], which picks a
//! free rectangle, jitters the tag inside it and claims the space. Runs are
//! randomized; give them a seeded [`XorShiftRng`](crate::XorShiftRng) for
//! reproducible output.
//!
//! # Example
//!
//! ```
//! use tag_wall::layout::compute_layout;
//! use tag_wall::{LayoutConfig, MonospaceMeasurer, Px, XorShiftRng};
//!
//! let mut config = LayoutConfig::default();
//! config.size(200, 120).min_text_size(Px(8.0));
//!
//! let tags = ["小清新", "萌萌哒", "鸡头", "只爱英剧", "大叔", "铲屎官"];
//! let placements = compute_layout(
//!     &tags,
//!     &config,
//!     &MonospaceMeasurer::new(),
//!     &mut XorShiftRng::new(7),
//! );
//!
//! assert!(!placements.is_empty());
//! assert_eq!(placements[0].text, "小清新");
//! ```

mod edge;
mod primary;
mod secondary;
mod selector;

pub use selector::select;

use tracing::{debug, trace};

use crate::colour::Colour;
use crate::config::LayoutConfig;
use crate::measure::{Orientation, TextMeasurer};
use crate::placement::Placement;
use crate::random::RandomSource;
use crate::rect::Rect;
use crate::region::FreeRegion;
use crate::units::Px;

/// Lay out `tags` on the full canvas described by `config`.
///
/// Never fails: tags that do not fit are left out, and an empty tag list or a
/// canvas without area yields no placements.
pub fn compute_layout<S, M, R>(
    tags: &[S],
    config: &LayoutConfig,
    measurer: &M,
    rng: &mut R,
) -> Vec<Placement>
where
    S: AsRef<str>,
    M: TextMeasurer + ?Sized,
    R: RandomSource + ?Sized,
{
    let region = FreeRegion::new(config.width, config.height);
    compute_layout_in(region, tags, config, measurer, rng)
}

/// Lay out `tags` inside a custom shape. The shape is clipped to the canvas
/// described by `config` before any tag is placed.
pub fn compute_layout_in<S, M, R>(
    mut region: FreeRegion,
    tags: &[S],
    config: &LayoutConfig,
    measurer: &M,
    rng: &mut R,
) -> Vec<Placement>
where
    S: AsRef<str>,
    M: TextMeasurer + ?Sized,
    R: RandomSource + ?Sized,
{
    if tags.is_empty() || config.is_degenerate() {
        debug!(tags = tags.len(), width = config.width, height = config.height, "nothing to lay out");
        return Vec::new();
    }

    region.clip(config.width, config.height);
    let tags: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
    let mut run = LayoutRun {
        config,
        measurer,
        rng,
        max_text_size: config.resolve_max_text_size(&tags),
        tags,
        region,
        placements: Vec::new(),
    };

    run.primary_pass();
    run.secondary_pass();
    run.edge_pass();

    debug!(
        placements = run.placements.len(),
        free_area = run.region.area(),
        "layout finished"
    );
    run.placements
}

/// Colour and emphasis shared by all placements of a pass
#[derive(Debug, Copy, Clone)]
struct Style {
    colour: Colour,
    emphasis: bool,
    stroke_width: Px,
}

impl Style {
    fn primary(config: &LayoutConfig) -> Style {
        Style {
            colour: config.primary_colour,
            emphasis: true,
            stroke_width: config.stroke_width(),
        }
    }

    fn secondary(config: &LayoutConfig) -> Style {
        Style {
            colour: config.secondary_colour,
            emphasis: false,
            stroke_width: Px(0.0),
        }
    }
}

/// The private state of one layout run
struct LayoutRun<'a, M: ?Sized, R: ?Sized> {
    config: &'a LayoutConfig,
    measurer: &'a M,
    rng: &'a mut R,
    tags: Vec<&'a str>,
    max_text_size: Px,
    region: FreeRegion,
    placements: Vec<Placement>,
}

impl<M: TextMeasurer + ?Sized, R: RandomSource + ?Sized> LayoutRun<'_, M, R> {
    fn random_orientation(&mut self) -> Orientation {
        if self.rng.one_in(self.config.vertical_odds) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// `size` lowered to the longest side of any free rectangle, snapped down to
    /// a multiple of the minimum size. Text larger than that fits nowhere.
    fn capped_size(&self, size: Px) -> Px {
        let min = self.config.min_text_size;
        let longest = self
            .region
            .rects()
            .map(|rect| rect.width.max(rect.height))
            .max()
            .unwrap_or(0);
        let longest = Px(longest as f32);
        if size.0 > longest.0 {
            longest.floor_to_multiple(min).max(min)
        } else {
            size
        }
    }

    /// Measure `text` and claim room for it, recording the placement on success
    fn try_place(
        &mut self,
        text: &str,
        size: Px,
        orientation: Orientation,
        anchor: Option<Rect>,
        style: Style,
    ) -> Option<Rect> {
        let extent = self.measurer.measure(text, size, style.emphasis, orientation);
        let Some(boxed) = extent.to_pixels() else {
            trace!(text, %size, "unmeasurable text");
            return None;
        };

        let rect = select(
            &mut self.region,
            boxed,
            anchor,
            self.config.strategy,
            self.config.min_text_size,
            &mut *self.rng,
        )?;

        self.placements.push(Placement {
            rect,
            text_size: size,
            colour: style.colour,
            emphasis: style.emphasis,
            stroke_width: style.stroke_width,
            orientation,
            text: text.to_string(),
        });
        Some(rect)
    }
}
