use tracing::debug;

use super::{LayoutRun, Style};
use crate::measure::TextMeasurer;
use crate::random::RandomSource;
use crate::units::stepped_sizes;

impl<M: TextMeasurer + ?Sized, R: RandomSource + ?Sized> LayoutRun<'_, M, R> {
    /// Give every tag, in input order, one chance at a prominent spot. Each tag
    /// starts at the maximum text size and steps down until it fits in either
    /// orientation; tags that fit nowhere are left to the later passes.
    pub(super) fn primary_pass(&mut self) {
        let style = Style::primary(self.config);
        let min = self.config.min_text_size;
        let start = self.capped_size(self.max_text_size);
        let mut anchor = None;
        let mut placed = 0usize;

        for index in 0..self.tags.len() {
            let text = self.tags[index];
            let first = self.random_orientation();

            'sizes: for size in stepped_sizes(start, min, min) {
                for orientation in [first, first.flipped()] {
                    if let Some(rect) = self.try_place(text, size, orientation, anchor, style) {
                        anchor = Some(rect);
                        placed += 1;
                        break 'sizes;
                    }
                }
            }
        }

        debug!(placed, tags = self.tags.len(), max_text_size = %self.max_text_size, "primary pass done");
    }
}
