use std::collections::BTreeMap;

use tracing::debug;

use super::{LayoutRun, Style};
use crate::measure::{Orientation, TextMeasurer};
use crate::placement::Placement;
use crate::random::RandomSource;
use crate::rect::Rect;

impl<'a, M: TextMeasurer + ?Sized, R: RandomSource + ?Sized> LayoutRun<'a, M, R> {
    /// Drop filler text into the leftover slivers. Each leftover rectangle at
    /// least one minimum size in both directions receives the first tag whose
    /// character count is as close as possible to (but not more than) how many
    /// minimum-size characters fit along its longer side. The tag takes the
    /// whole rectangle, written along its longer side.
    pub(super) fn edge_pass(&mut self) {
        let style = Style::secondary(self.config);
        let min = self.config.min_text_size;

        let mut by_length: BTreeMap<usize, Vec<&'a str>> = BTreeMap::new();
        for &tag in &self.tags {
            by_length.entry(tag.chars().count()).or_default().push(tag);
        }

        let leftovers: Vec<Rect> = self.region.rects().collect();
        let mut placed = 0usize;
        for rect in leftovers {
            if (rect.width as f32) < min.0 || (rect.height as f32) < min.0 {
                continue;
            }

            let longest = rect.width.max(rect.height);
            let max_chars = (longest as f32 / min.0).floor() as usize;
            if max_chars == 0 {
                continue;
            }
            let orientation = if rect.width >= rect.height {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };

            let fits = |tag: &str| {
                self.measurer
                    .measure(tag, min, false, orientation)
                    .to_pixels()
                    .is_some_and(|size| rect.fits(size))
            };
            let Some(text) = by_length
                .range(1..=max_chars)
                .rev()
                .flat_map(|(_, tags)| tags.iter().copied())
                .find(|&tag| fits(tag))
            else {
                continue;
            };

            self.region.subtract(rect);
            self.placements.push(Placement {
                rect,
                text_size: min,
                colour: style.colour,
                emphasis: style.emphasis,
                stroke_width: style.stroke_width,
                orientation,
                text: text.to_string(),
            });
            placed += 1;
        }

        debug!(placed, "edge pass done");
    }
}
