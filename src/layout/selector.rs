use tracing::trace;

use crate::config::SelectionStrategy;
use crate::random::RandomSource;
use crate::rect::{Rect, Size};
use crate::region::FreeRegion;
use crate::units::Px;

/// Find room for a box of `size` in `region`, claim it and return where it went.
///
/// A free rectangle large enough to hold the box is picked according to
/// `strategy`, relative to `anchor` (the previously placed box, if any). The box
/// is then offset from the rectangle's top-left corner by a random multiple of
/// `grid` on each axis, as long as it stays inside the rectangle; an axis with
/// less than one `grid` of slack is not offset. The claimed area is removed from
/// `region`. When nothing fits, [None] is returned and `region` is untouched.
pub fn select<R: RandomSource + ?Sized>(
    region: &mut FreeRegion,
    size: Size,
    anchor: Option<Rect>,
    strategy: SelectionStrategy,
    grid: Px,
    rng: &mut R,
) -> Option<Rect> {
    if size.is_empty() {
        return None;
    }

    let candidate = choose(region, size, anchor, strategy)?;
    let left = candidate.left + jitter(candidate.width - size.width, grid, rng);
    let top = candidate.top + jitter(candidate.height - size.height, grid, rng);
    let claimed = Rect::new(left, top, size.width, size.height);

    trace!(?candidate, ?claimed, "claimed free space");
    region.subtract(claimed);
    Some(claimed)
}

fn choose(
    region: &FreeRegion,
    size: Size,
    anchor: Option<Rect>,
    strategy: SelectionStrategy,
) -> Option<Rect> {
    let mut fitting = region.rects().filter(|rect| rect.fits(size));
    match (strategy, anchor) {
        (SelectionStrategy::FirstFit, _) => fitting.next(),
        // ties keep the earlier rectangle
        (SelectionStrategy::Spread, None) => fitting.fold(None, |best: Option<Rect>, rect| match best {
            Some(best) if best.area() >= rect.area() => Some(best),
            _ => Some(rect),
        }),
        (SelectionStrategy::Spread, Some(anchor)) => fitting
            .map(|rect| (rect.center_distance_sq(&anchor), rect))
            .fold(None, |best: Option<(f64, Rect)>, (distance, rect)| match best {
                Some(best) if best.0 >= distance => Some(best),
                _ => Some((distance, rect)),
            })
            .map(|(_, rect)| rect),
    }
}

/// A random offset in `[0, slack]` that is a multiple of `grid`
fn jitter<R: RandomSource + ?Sized>(slack: i32, grid: Px, rng: &mut R) -> i32 {
    if !grid.is_finite_positive() || (slack as f32) < grid.0 {
        return 0;
    }
    let slots = (slack as f32 / grid.0).floor() as u32;
    let offset = (rng.next_below(slots + 1) as f32 * grid.0) as i32;
    offset.min(slack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::XorShiftRng;

    #[test]
    fn no_fit_leaves_region_untouched() {
        let mut region = FreeRegion::new(50, 50);
        let before = region.clone();
        let mut rng = XorShiftRng::new(1);
        let result = select(
            &mut region,
            Size::new(60, 10),
            None,
            SelectionStrategy::FirstFit,
            Px(10.0),
            &mut rng,
        );
        assert_eq!(result, None);
        assert_eq!(region, before);
    }

    #[test]
    fn claimed_box_is_removed_and_inside_candidate() {
        let mut region = FreeRegion::new(100, 100);
        let mut rng = XorShiftRng::new(9);
        let claimed = select(
            &mut region,
            Size::new(30, 20),
            None,
            SelectionStrategy::FirstFit,
            Px(10.0),
            &mut rng,
        )
        .expect("fits");

        assert_eq!(claimed.size(), Size::new(30, 20));
        assert!(Rect::new(0, 0, 100, 100).contains_rect(&claimed));
        assert_eq!(claimed.left % 10, 0);
        assert_eq!(claimed.top % 10, 0);
        assert_eq!(region.area(), 100 * 100 - 30 * 20);
        assert!(!region.rects().any(|r| r.intersects(&claimed)));
    }

    #[test]
    fn small_slack_is_not_jittered() {
        let mut region = FreeRegion::new(35, 15);
        let mut rng = XorShiftRng::new(4);
        let claimed = select(
            &mut region,
            Size::new(30, 10),
            None,
            SelectionStrategy::FirstFit,
            Px(10.0),
            &mut rng,
        )
        .expect("fits");
        assert_eq!((claimed.left, claimed.top), (0, 0));
    }

    #[test]
    fn first_fit_takes_enumeration_order() {
        // leaves a 100x20 strip on top and a 100x70 block below
        let mut region = FreeRegion::new(100, 100);
        region.subtract(Rect::new(0, 20, 100, 10));
        let chosen = choose(&region, Size::new(10, 10), None, SelectionStrategy::FirstFit);
        assert_eq!(chosen, Some(Rect::new(0, 0, 100, 20)));
    }

    #[test]
    fn spread_without_anchor_takes_largest() {
        let mut region = FreeRegion::new(100, 100);
        region.subtract(Rect::new(0, 20, 100, 10));
        let chosen = choose(&region, Size::new(10, 10), None, SelectionStrategy::Spread);
        assert_eq!(chosen, Some(Rect::new(0, 30, 100, 70)));
    }

    #[test]
    fn spread_with_anchor_takes_farthest() {
        let mut region = FreeRegion::new(100, 100);
        // split into a left and a right column
        region.subtract(Rect::new(40, 0, 20, 100));
        let anchor = Rect::new(0, 0, 10, 10);
        let chosen = choose(
            &region,
            Size::new(10, 10),
            Some(anchor),
            SelectionStrategy::Spread,
        );
        assert_eq!(chosen, Some(Rect::new(60, 0, 40, 100)));
    }

    #[test]
    fn jitter_stays_within_slack() {
        let mut rng = XorShiftRng::new(11);
        for slack in 0..60 {
            for _ in 0..10 {
                let offset = jitter(slack, Px(7.5), &mut rng);
                assert!(offset >= 0 && offset <= slack);
            }
        }
        assert_eq!(jitter(100, Px(0.0), &mut rng), 0);
    }
}
