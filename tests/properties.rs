//! Property tests over randomly generated stages and decks

use ahash::AHashSet;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use robodeck::core::types::Cell;
use robodeck::core::SimulationConfig;
use robodeck::deck::{random_deck, Card, Deck, Sensed, SensorMask};
use robodeck::robot::{apply, Action};
use robodeck::simulation::{choose_action, occupied_cells, resolve, FailKind, StageState, Timeline};
use robodeck::stage::Stage;

/// Seeded random stage with scattered interior walls
fn random_stage(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Stage {
    let pick = |rng: &mut ChaCha8Rng| {
        Cell::new(
            rng.gen_range(1..width as i32 - 1),
            rng.gen_range(1..height as i32 - 1),
        )
    };
    let entrance = pick(rng);
    let exit = pick(rng);
    let mut stage = Stage::new(width, height, entrance, exit).unwrap();
    for y in 1..height as i32 - 1 {
        for x in 1..width as i32 - 1 {
            let cell = Cell::new(x, y);
            if cell != entrance && cell != exit && rng.gen_bool(0.25) {
                stage.set_wall(cell, true);
            }
        }
    }
    stage
}

#[derive(Debug)]
struct Run {
    stage: Stage,
    deck: Deck,
    config: SimulationConfig,
    timeline: Timeline,
}

fn run(seed: u64, width: usize, height: usize, robots: usize, cards: usize, touch_exit: bool) -> Run {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let stage = random_stage(&mut rng, width, height);
    let deck = random_deck(&mut rng, cards);
    let config = SimulationConfig {
        touch_exit,
        robot_count: robots,
        max_ticks: 200,
    };
    let initial = StageState::spawning(stage.entrance(), robots);
    let timeline = Timeline::build(&stage, &deck, initial, &config);
    Run {
        stage,
        deck,
        config,
        timeline,
    }
}

fn run_strategy() -> impl Strategy<Value = Run> {
    (any::<u64>(), 4usize..10, 4usize..10, 1usize..7, 1usize..8, any::<bool>())
        .prop_map(|(seed, w, h, robots, cards, touch)| run(seed, w, h, robots, cards, touch))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn live_robots_never_overlap(r in run_strategy()) {
        for state in r.timeline.states() {
            let mut seen = AHashSet::new();
            for robot in state.active_robots() {
                prop_assert!(seen.insert(robot.position), "overlap at {}", robot.position);
            }
            // Robots still queued only ever share the entrance
            for robot in state.robots.iter().filter(|s| s.is_spawning()) {
                prop_assert_eq!(robot.position, r.stage.entrance());
            }
        }
    }

    #[test]
    fn robots_never_enter_walls(r in run_strategy()) {
        for state in r.timeline.states() {
            for robot in &state.robots {
                prop_assert!(!r.stage.is_wall(robot.position));
            }
        }
    }

    #[test]
    fn fail_fast_comes_in_swapping_pairs(r in run_strategy()) {
        for state in r.timeline.states() {
            let targets: Vec<Cell> = state
                .robots
                .iter()
                .zip(&state.actions)
                .map(|(robot, action)| apply(*robot, *action).position)
                .collect();
            for (i, kind) in state.failed.iter().enumerate() {
                if *kind != FailKind::FailFast {
                    continue;
                }
                let partner = (0..state.robots.len()).find(|&j| {
                    j != i
                        && state.failed[j] == FailKind::FailFast
                        && state.robots[j].position == targets[i]
                        && targets[j] == state.robots[i].position
                });
                prop_assert!(partner.is_some());
            }
        }
    }

    #[test]
    fn swapping_pairs_always_fail_fast(r in run_strategy()) {
        for state in r.timeline.states() {
            let gate = state
                .robots
                .iter()
                .position(|robot| robot.is_spawning())
                .unwrap_or(state.robots.len());
            let targets: Vec<_> = state
                .robots
                .iter()
                .zip(&state.actions)
                .map(|(robot, action)| apply(*robot, *action))
                .collect();
            for i in 0..gate {
                for j in (i + 1)..gate {
                    let (a, b) = (state.robots[i], state.robots[j]);
                    if !a.direction.is_live() || !b.direction.is_live() {
                        continue;
                    }
                    if targets[i].is_despawned() || targets[j].is_despawned() {
                        continue;
                    }
                    if targets[i].position == b.position && targets[j].position == a.position {
                        prop_assert_eq!(state.failed[i], FailKind::FailFast);
                        prop_assert_eq!(state.failed[j], FailKind::FailFast);
                    }
                }
            }
        }
    }

    #[test]
    fn passes_bounded_by_robot_count(r in run_strategy()) {
        for state in r.timeline.states() {
            let result = resolve(&r.stage, &r.deck, &state.robots, &r.config);
            prop_assert!(result.passes <= state.robot_count());
        }
    }

    #[test]
    fn recorded_transitions_replay(r in run_strategy()) {
        let states = r.timeline.states();
        for pair in states.windows(2) {
            let result = resolve(&r.stage, &r.deck, &pair[0].robots, &r.config);
            prop_assert_eq!(&result.next, &pair[1].robots);
            prop_assert_eq!(&result.actions, &pair[0].actions);
            prop_assert_eq!(&result.failed, &pair[0].failed);
        }
    }

    #[test]
    fn loops_point_at_equal_states(r in run_strategy()) {
        let timeline = &r.timeline;
        prop_assert!(timeline.max_time() <= r.config.max_ticks);
        if let Some(start) = timeline.loop_time() {
            prop_assert!(start < timeline.max_time());
            prop_assert_eq!(
                timeline.state(start).fingerprint(),
                timeline.state(timeline.max_time()).fingerprint()
            );
        }
    }

    #[test]
    fn first_repeat_ends_the_timeline(r in run_strategy()) {
        let timeline = &r.timeline;
        let fingerprints: Vec<_> = timeline.states().iter().map(|s| s.fingerprint()).collect();

        // Earliest tick whose configuration already appeared, with its first occurrence
        let repeat = (1..fingerprints.len()).find_map(|t| {
            (0..t).find(|&k| fingerprints[k] == fingerprints[t]).map(|k| (k, t))
        });

        match repeat {
            Some((k, t)) => {
                prop_assert_eq!(timeline.max_time(), t);
                let last = timeline.state(t);
                let inert = last
                    .actions
                    .iter()
                    .all(|a| matches!(a, Action::Wait | Action::Spawn));
                if last.all_despawned() || inert {
                    prop_assert_eq!(timeline.loop_time(), None);
                } else {
                    prop_assert_eq!(timeline.loop_time(), Some(k));
                }
            }
            None => {
                prop_assert_eq!(timeline.loop_time(), None);
            }
        }
    }

    #[test]
    fn matching_is_deterministic(r in run_strategy()) {
        for state in r.timeline.states() {
            let occupied = occupied_cells(&state.robots);
            for robot in &state.robots {
                let first = choose_action(&r.stage, &occupied, &r.deck, robot, &r.config);
                let second = choose_action(&r.stage, &occupied, &r.deck, robot, &r.config);
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn mask_bytes_follow_bit_rules(byte in any::<u8>()) {
        let mask = SensorMask::from_byte(byte);
        for sensed in Sensed::ALL {
            // Only 1..=7 are real masks; anything else accepts everything
            let expected = !(1..=7).contains(&byte) || byte & sensed.bit() != 0;
            prop_assert_eq!(mask.matches(sensed), expected);
        }
    }

    #[test]
    fn card_needs_every_sensor(bytes in prop::array::uniform5(0u8..8), observed in prop::array::uniform5(0usize..3)) {
        let sensors = bytes.map(SensorMask::from_byte);
        let observed = observed.map(|i| Sensed::ALL[i]);
        let card = Card::new(sensors, Action::Wait);
        let expected = sensors.iter().zip(&observed).all(|(m, s)| m.matches(*s));
        prop_assert_eq!(card.matches(&observed), expected);
    }
}
