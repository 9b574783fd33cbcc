use proptest::prelude::*;
use tag_wall::layout::{compute_layout, compute_layout_in};
use tag_wall::{
    FreeRegion, LayoutConfig, MonospaceMeasurer, Placement, Px, Rect, SelectionStrategy,
    TextMeasurer, XorShiftRng,
};

fn strategy_strategy() -> impl Strategy<Value = SelectionStrategy> {
    prop_oneof![
        Just(SelectionStrategy::FirstFit),
        Just(SelectionStrategy::Spread),
    ]
}

fn config_strategy() -> impl Strategy<Value = LayoutConfig> {
    (
        0i32..=240,
        0i32..=240,
        4u32..=16,
        prop::option::of(1u32..=8),
        strategy_strategy(),
        0u32..=4,
    )
        .prop_map(|(width, height, min, max_steps, strategy, odds)| {
            let min = Px(min as f32);
            let mut config = LayoutConfig::default();
            config
                .size(width, height)
                .min_text_size(min)
                .max_text_size(max_steps.map(|steps| min * steps as f32))
                .strategy(strategy)
                .vertical_odds(odds);
            config
        })
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{0,8}|[鸡头大叔萌哒]{1,4}", 0..10)
}

fn check_invariants<M: TextMeasurer>(
    placements: &[Placement],
    config: &LayoutConfig,
    measurer: &M,
) -> Result<(), TestCaseError> {
    let canvas = Rect::new(0, 0, config.width, config.height);
    for (i, p) in placements.iter().enumerate() {
        prop_assert!(
            canvas.contains_rect(&p.rect),
            "{:?} leaves canvas {:?}",
            p.rect,
            canvas
        );

        let measured = measurer
            .measure(&p.text, p.text_size, p.emphasis, p.orientation)
            .to_pixels();
        prop_assert!(measured.is_some(), "{:?} was placed without a size", p.text);
        if let Some(measured) = measured {
            prop_assert!(
                p.rect.fits(measured),
                "{:?} is smaller than measured {:?}",
                p,
                measured
            );
        }

        for q in placements.iter().skip(i + 1) {
            prop_assert!(!p.rect.intersects(&q.rect), "{:?} overlaps {:?}", p, q);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placements_never_overlap_or_leave_the_canvas(
        config in config_strategy(),
        tags in tags_strategy(),
        seed in any::<u64>(),
        stroke in 0u32..=3,
    ) {
        let measurer = MonospaceMeasurer::with_stroke_width(Px(stroke as f32));
        let placements = compute_layout(&tags, &config, &measurer, &mut XorShiftRng::new(seed));
        check_invariants(&placements, &config, &measurer)?;
    }

    #[test]
    fn fixed_seed_reproduces_the_layout(
        config in config_strategy(),
        tags in tags_strategy(),
        seed in any::<u64>(),
    ) {
        let measurer = MonospaceMeasurer::new();
        let first = compute_layout(&tags, &config, &measurer, &mut XorShiftRng::new(seed));
        let second = compute_layout(&tags, &config, &measurer, &mut XorShiftRng::new(seed));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn shaped_layouts_stay_inside_the_shape(
        config in config_strategy(),
        tags in tags_strategy(),
        seed in any::<u64>(),
        pieces in prop::collection::vec((0i32..200, 0i32..200, 1i32..120, 1i32..120), 1..4),
    ) {
        let shape = FreeRegion::from_rects(
            pieces.iter().map(|&(left, top, width, height)| Rect::new(left, top, width, height)),
        );
        let measurer = MonospaceMeasurer::new();
        let placements = compute_layout_in(
            shape.clone(),
            &tags,
            &config,
            &measurer,
            &mut XorShiftRng::new(seed),
        );

        check_invariants(&placements, &config, &measurer)?;
        for p in &placements {
            prop_assert!(shape.contains_rect(&p.rect), "{:?} is outside the shape", p.rect);
        }
    }

    #[test]
    fn primary_placements_follow_tag_order(
        config in config_strategy(),
        tags in tags_strategy(),
        seed in any::<u64>(),
    ) {
        let placements = compute_layout(&tags, &config, &MonospaceMeasurer::new(), &mut XorShiftRng::new(seed));

        // emphasized placements form a prefix and keep the input order
        let primary: Vec<&str> = placements
            .iter()
            .take_while(|p| p.emphasis)
            .map(|p| p.text.as_str())
            .collect();
        prop_assert!(placements.iter().skip(primary.len()).all(|p| !p.emphasis));

        let mut remaining = tags.iter();
        for text in primary {
            prop_assert!(remaining.any(|tag| tag == text), "{:?} out of order", text);
        }
    }
}

#[test]
fn three_tags_get_primary_slots_in_order() {
    let mut config = LayoutConfig::default();
    config
        .size(100, 100)
        .min_text_size(Px(10.0))
        .max_text_size(Some(Px(40.0)));
    let measurer = MonospaceMeasurer::new();

    for seed in 0..32 {
        let placements = compute_layout(&["A", "BB", "CCC"], &config, &measurer, &mut XorShiftRng::new(seed));
        let primary: Vec<&str> = placements
            .iter()
            .filter(|p| p.emphasis)
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(primary, vec!["A", "BB", "CCC"], "seed {seed}");
        assert_eq!(placements[0].text_size, Px(40.0));

        // every size is one of the allowed steps
        for p in &placements {
            let steps = p.text_size.0 / 10.0;
            assert!(steps >= 1.0 && steps <= 4.0 && steps.fract() == 0.0, "{p:?}");
        }
    }
}

#[test]
fn lorem_ipsum_words_saturate_a_wide_canvas() {
    let words: Vec<String> = lipsum::lipsum_words(120)
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty())
        .collect();

    let mut config = LayoutConfig::for_density(2.0);
    config.size(640, 360);
    let measurer = MonospaceMeasurer::with_stroke_width(config.stroke_width());

    let placements = compute_layout(&words, &config, &measurer, &mut XorShiftRng::new(77));
    assert!(!placements.is_empty());

    let covered: i64 = placements.iter().map(|p| p.rect.area()).sum();
    assert!(covered <= 640 * 360);
    // the secondary pass packs the canvas densely
    assert!(covered * 2 > 640 * 360, "only {covered} pixels covered");
}

#[test]
fn a_tag_larger_than_the_canvas_is_dropped_silently() {
    let mut config = LayoutConfig::default();
    config.size(30, 30).min_text_size(Px(10.0));

    let placements = compute_layout(
        &["supercalifragilistic"],
        &config,
        &MonospaceMeasurer::new(),
        &mut XorShiftRng::new(1),
    );
    assert!(placements.is_empty());
}

#[test]
fn single_repeated_tag_terminates() {
    let mut config = LayoutConfig::default();
    config.size(80, 60).min_text_size(Px(5.0));
    let tags = vec!["铲屎官"; 50];

    let placements = compute_layout(&tags, &config, &MonospaceMeasurer::new(), &mut XorShiftRng::new(3));
    let primary = placements.iter().filter(|p| p.emphasis).count();
    assert!(primary > 0);
    // each copy covers at least 15x5 pixels
    assert!(placements.len() <= (80 * 60) / (15 * 5));
}
