use proptest::prelude::*;
use riddle_problems::{
    boxes::{self, MAX_CAPACITY},
    squares::{self, Config, Square},
};

fn arb_capacity() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1..=MAX_CAPACITY, 1..60)
}

fn arb_squares() -> impl Strategy<Value = Vec<Square>> {
    prop::collection::vec((0_i64..=1000, 0_i64..=1000, 1_i64..=100), 1..30).prop_map(|triples| {
        triples
            .into_iter()
            .map(|(x, y, side)| Square::new(x, y, side).unwrap())
            .collect()
    })
}

/// Squares at the full `0..=1e9` coordinate range.
fn arb_large_squares() -> impl Strategy<Value = Vec<Square>> {
    prop::collection::vec(
        (0_i64..=1000, 0_i64..=1_000_000_000, 1_i64..=1_000_000_000),
        1..8,
    )
    .prop_map(|triples| {
        triples
            .into_iter()
            .map(|(x, y, side)| Square::new(x, y, side).unwrap())
            .collect()
    })
}

proptest! {
    #[test]
    fn box_strategies_agree(
        apple in prop::collection::vec(0_u32..=50, 0..40),
        capacity in arb_capacity(),
    ) {
        prop_assert_eq!(
            boxes::minimum_boxes_sorted(&apple, &capacity),
            boxes::minimum_boxes_counted(&apple, &capacity)
        );
    }

    #[test]
    fn box_count_grows_with_demand(
        capacity in arb_capacity(),
        a in 0.0_f64..=1.0,
        b in 0.0_f64..=1.0,
    ) {
        let available: u32 = capacity.iter().sum();
        let (low, high) = (a.min(b), a.max(b));
        let smaller = (low * f64::from(available)) as u32;
        let larger = (high * f64::from(available)) as u32;

        for method in boxes::Method::ALL {
            let fewer = method.solve(&[smaller], &capacity).unwrap();
            let more = method.solve(&[larger], &capacity).unwrap();
            prop_assert!(fewer <= more, "{}: {fewer} > {more}", method.name());
        }
    }

    #[test]
    fn line_strategies_agree(squares in arb_squares()) {
        let config = Config::default();
        let expected = squares::event_sweep(&squares).unwrap();

        for method in squares::Method::ALL {
            let y = method.solve(&squares, &config).unwrap();
            prop_assert!(
                (y - expected).abs() <= 1e-5,
                "{}: {y} vs {expected}",
                method.name()
            );
        }
    }

    #[test]
    fn line_halves_the_area(squares in arb_squares()) {
        let half = squares::total_area(&squares) / 2.0;
        let max_slope: f64 = squares.iter().map(Square::width).sum();

        for method in squares::Method::ALL {
            let y = method.solve(&squares, &Config::default()).unwrap();
            let area = squares::area_below(&squares, y);
            prop_assert!(
                (area - half).abs() <= max_slope * 1e-5,
                "{}: area {area} vs half {half}",
                method.name()
            );
        }
    }

    #[test]
    fn area_below_is_non_decreasing(
        squares in arb_squares(),
        a in -10.0_f64..1200.0,
        b in -10.0_f64..1200.0,
    ) {
        let (low, high) = (a.min(b), a.max(b));
        prop_assert!(squares::area_below(&squares, low) <= squares::area_below(&squares, high));
    }

    #[test]
    fn line_strategies_agree_at_large_scale(squares in arb_large_squares()) {
        // Areas here exceed 2^53 and are rounded, so compare the area below
        // each answer rather than the heights themselves.
        let config = Config::default();
        let total = squares::total_area(&squares);
        let max_slope: f64 = squares.iter().map(Square::width).sum();
        let expected = squares::area_below(&squares, squares::event_sweep(&squares).unwrap());

        for method in squares::Method::ALL {
            let y = method.solve(&squares, &config).unwrap();
            let area = squares::area_below(&squares, y);
            prop_assert!(
                (area - expected).abs() <= max_slope * 1e-5 + total * 1e-12,
                "{}: area {area} vs {expected}",
                method.name()
            );
        }
    }
}
