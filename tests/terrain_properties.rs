//! Property tests for terrain generation, sampling, and the tick loop

use hill_rider::Tuning;
use hill_rider::sim::{RunState, SimulationState, Terrain, TickInput, tick};
use proptest::prelude::*;

fn generated(seed: u64, n: usize, tuning: &Tuning) -> Terrain {
    let mut terrain = Terrain::from_tuning(tuning, seed);
    terrain.generate(n, tuning);
    terrain
}

fn input_from_bits(bits: u8) -> TickInput {
    TickInput {
        forward: bits & 1 != 0,
        reverse: bits & 2 != 0,
        click: bits & 4 != 0,
    }
}

proptest! {
    #[test]
    fn sampling_is_total(seed in any::<u64>(), n in 2usize..200, frac in 0.0f32..=1.0) {
        let tuning = Tuning::default();
        let terrain = generated(seed, n, &tuning);
        let first = terrain.first().unwrap().x;
        let last = terrain.last().unwrap().x;
        let w = tuning.viewport_width;
        let x = (first - w) + frac * (last - first + 2.0 * w);

        prop_assert!(terrain.height_at(x).is_finite());
        prop_assert!(terrain.slope_at(x).is_finite());
    }

    #[test]
    fn sampling_is_exact_at_vertices(seed in any::<u64>(), n in 2usize..200) {
        let tuning = Tuning::default();
        let terrain = generated(seed, n, &tuning);
        for p in terrain.points() {
            prop_assert_eq!(terrain.height_at(p.x), p.y);
        }
    }

    #[test]
    fn sampling_stays_within_neighbours(seed in any::<u64>(), n in 2usize..100, frac in 0.0f32..1.0) {
        let tuning = Tuning::default();
        let terrain = generated(seed, n, &tuning);
        let x = terrain.last().unwrap().x * frac;
        let y = terrain.height_at(x);
        prop_assert!(y >= tuning.min_terrain_y() - 1e-3);
        prop_assert!(y <= tuning.max_terrain_y() + 1e-3);
    }

    #[test]
    fn extension_is_monotone(seed in any::<u64>(), start in 2usize..50, n in 1usize..50, amplitude in 0.0f32..400.0) {
        let tuning = Tuning { amplitude, ..Tuning::default() };
        let mut terrain = generated(seed, start, &tuning);
        let before = terrain.last().unwrap().x;

        terrain.generate(n, &tuning);
        let after = terrain.last().unwrap().x;
        let expected = n as f32 * tuning.spacing();
        // Positions accumulate, allow a few ulps of drift per point
        prop_assert!(((after - before) - expected).abs() < 0.05);
        prop_assert_eq!(terrain.len(), start + n);

        let points: Vec<_> = terrain.points().iter().copied().collect();
        for pair in points.windows(2) {
            prop_assert!(pair[1].x > pair[0].x);
        }
        for p in &points[start..] {
            prop_assert!(p.y >= tuning.min_terrain_y() && p.y <= tuning.max_terrain_y());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn ticks_keep_invariants(seed in any::<u64>(), inputs in prop::collection::vec(0u8..8, 50..400)) {
        let tuning = Tuning::default();
        let mut state = SimulationState::new(seed, &tuning);
        tick(&mut state, &TickInput { click: true, ..Default::default() }, &tuning);

        let max_points = 2 * tuning.segment_count + tuning.extend_batch + 4;
        for (i, bits) in inputs.iter().cycle().take(3_000).enumerate() {
            // Mostly drive forward so the track actually scrolls
            let mut input = input_from_bits(*bits);
            input.forward |= i % 3 != 0;
            tick(&mut state, &input, &tuning);

            let v = &state.vehicle;
            prop_assert!(v.is_finite());
            prop_assert!(v.speed.abs() <= tuning.max_speed);
            prop_assert!(state.terrain.len() >= 2);
            prop_assert!(state.terrain.len() <= max_points, "{} points retained", state.terrain.len());
            // A restart tick hands back a fresh track before the first extension
            if state.run_state == RunState::Playing && state.time_ticks > 0 {
                prop_assert!(state.terrain.last().unwrap().x >= v.x + tuning.viewport_width - 1e-2);
            }
        }
    }
}
