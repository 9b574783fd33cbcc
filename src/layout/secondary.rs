use tracing::debug;

use super::{LayoutRun, Style};
use crate::measure::TextMeasurer;
use crate::random::RandomSource;
use crate::units::stepped_sizes;

impl<M: TextMeasurer + ?Sized, R: RandomSource + ?Sized> LayoutRun<'_, M, R> {
    /// Fill the remaining space with de-emphasized copies of the tags. Whole
    /// sweeps over the tag list repeat at one size while they still place
    /// something, then the size drops by one step, down to the minimum.
    pub(super) fn secondary_pass(&mut self) {
        let style = Style::secondary(self.config);
        let min = self.config.min_text_size;
        let start = self.capped_size(self.max_text_size - min * 2.0).max(min);
        let mut anchor = None;
        let mut placed = 0usize;
        let mut sweeps = 0usize;

        for size in stepped_sizes(start, min, min) {
            loop {
                let mut placed_in_sweep = false;
                for index in 0..self.tags.len() {
                    let text = self.tags[index];
                    let orientation = self.random_orientation();
                    if let Some(rect) = self.try_place(text, size, orientation, anchor, style) {
                        anchor = Some(rect);
                        placed += 1;
                        placed_in_sweep = true;
                    }
                }
                sweeps += 1;

                // every placement claims area, so sweeps at one size run out
                if !placed_in_sweep {
                    break;
                }
            }
        }

        debug!(placed, sweeps, "secondary pass done");
    }
}
