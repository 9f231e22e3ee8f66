use side_scroller::collision::CollisionReport;
use side_scroller::config::GameConfig;
use side_scroller::input::{Action, ActionSet};
use side_scroller::ledger::ResourceLedger;
use side_scroller::player::{react, Player, PlayerState, Reaction, Stance, Trail};
use side_scroller::world::{Pools, TickContext};

use rand::rngs::StdRng;
use rand::SeedableRng;

struct Rig {
    config: GameConfig,
    ledger: ResourceLedger,
    pools: Pools,
    rng: StdRng,
    debug: bool,
}

impl Rig {
    fn new() -> Self {
        let config = GameConfig::default();
        Rig {
            ledger: ResourceLedger::new(&config),
            pools: Pools::default(),
            rng: StdRng::seed_from_u64(42),
            debug: false,
            config,
        }
    }

    fn player(&self) -> Player {
        Player::new(&self.config)
    }

    fn step(&mut self, player: &mut Player, input: &ActionSet, delta_ms: f64) -> CollisionReport {
        let mut ctx = TickContext {
            ledger: &mut self.ledger,
            pools: &mut self.pools,
            config: &self.config,
            rng: &mut self.rng,
            debug: self.debug,
        };
        player.update(input, delta_ms, &mut ctx)
    }
}

fn stance(on_ground: bool, energy: f64) -> Stance {
    Stance {
        on_ground,
        vy: 0.0,
        weight: 1.0,
        energy,
        animation_done: false,
    }
}

fn keys<const N: usize>(actions: [Action; N]) -> ActionSet {
    ActionSet::from(actions)
}

// ── Transition table (pure) ───────────────────────────────────────────────────

#[test]
fn sitting_transitions() {
    let s = stance(true, 5.0);
    assert_eq!(react(PlayerState::Sitting, &s, &keys([Action::Left])).next, Some(PlayerState::Running));
    assert_eq!(react(PlayerState::Sitting, &s, &keys([Action::Right])).next, Some(PlayerState::Running));
    assert_eq!(react(PlayerState::Sitting, &s, &keys([Action::Roll])).next, Some(PlayerState::Rolling));
    assert_eq!(react(PlayerState::Sitting, &s, &ActionSet::new()), Reaction::default());
}

#[test]
fn sitting_roll_without_energy_flags_shortage() {
    let r = react(PlayerState::Sitting, &stance(true, 1.0), &keys([Action::Roll]));
    assert_eq!(r.next, None);
    assert!(r.low_energy);
}

#[test]
fn running_transitions_and_dust() {
    let s = stance(true, 5.0);
    let down = react(PlayerState::Running, &s, &keys([Action::Down]));
    assert_eq!(down.next, Some(PlayerState::Sitting));
    assert_eq!(down.trail, Some(Trail::Dust));
    assert_eq!(react(PlayerState::Running, &s, &keys([Action::Up])).next, Some(PlayerState::Jumping));
    assert_eq!(react(PlayerState::Running, &s, &keys([Action::Roll])).next, Some(PlayerState::Rolling));
    let idle = react(PlayerState::Running, &s, &ActionSet::new());
    assert_eq!(idle.next, None);
    assert_eq!(idle.trail, Some(Trail::Dust));
}

#[test]
fn jumping_falls_once_descending() {
    let mut s = stance(false, 5.0);
    s.vy = 2.0;
    assert_eq!(react(PlayerState::Jumping, &s, &ActionSet::new()).next, Some(PlayerState::Falling));
    s.vy = 1.0; // not strictly above weight
    assert_eq!(react(PlayerState::Jumping, &s, &ActionSet::new()).next, None);
    assert_eq!(react(PlayerState::Jumping, &s, &keys([Action::Down])).next, Some(PlayerState::Diving));
    assert_eq!(react(PlayerState::Jumping, &s, &keys([Action::Roll])).next, Some(PlayerState::Rolling));
}

#[test]
fn falling_transitions() {
    assert_eq!(
        react(PlayerState::Falling, &stance(true, 5.0), &keys([Action::Down])).next,
        Some(PlayerState::Running)
    );
    assert_eq!(
        react(PlayerState::Falling, &stance(false, 5.0), &keys([Action::Down])).next,
        Some(PlayerState::Diving)
    );
    assert_eq!(react(PlayerState::Falling, &stance(false, 5.0), &ActionSet::new()).next, None);
}

#[test]
fn rolling_transitions() {
    let ground = stance(true, 5.0);
    let air = stance(false, 5.0);
    assert_eq!(react(PlayerState::Rolling, &ground, &ActionSet::new()).next, Some(PlayerState::Running));
    assert_eq!(react(PlayerState::Rolling, &air, &ActionSet::new()).next, Some(PlayerState::Falling));

    let boost = react(PlayerState::Rolling, &ground, &keys([Action::Roll, Action::Up]));
    assert!(boost.boost);
    assert_eq!(boost.next, None);
    assert_eq!(boost.trail, Some(Trail::Fire));

    assert_eq!(
        react(PlayerState::Rolling, &air, &keys([Action::Roll, Action::Down])).next,
        Some(PlayerState::Diving)
    );
    // down on the ground does nothing
    assert_eq!(react(PlayerState::Rolling, &ground, &keys([Action::Roll, Action::Down])).next, None);
}

#[test]
fn diving_transitions() {
    let landed = react(PlayerState::Diving, &stance(true, 5.0), &keys([Action::Roll]));
    assert_eq!(landed.next, Some(PlayerState::Running));
    assert!(landed.splash);

    let released = react(PlayerState::Diving, &stance(false, 5.0), &ActionSet::new());
    assert_eq!(released.next, Some(PlayerState::Rolling));

    let tired = react(PlayerState::Diving, &stance(false, 0.5), &ActionSet::new());
    assert_eq!(tired.next, None);
    assert!(tired.low_energy);
}

#[test]
fn hit_waits_for_animation() {
    let mut s = stance(true, 5.0);
    let all = keys([Action::Left, Action::Up, Action::Roll]);
    assert_eq!(react(PlayerState::Hit, &s, &all).next, None);
    s.animation_done = true;
    assert_eq!(react(PlayerState::Hit, &s, &all).next, Some(PlayerState::Running));
    s.on_ground = false;
    assert_eq!(react(PlayerState::Hit, &s, &all).next, Some(PlayerState::Falling));
}

#[test]
fn scroll_multipliers_per_state() {
    let expected = [0.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0];
    for (state, mult) in PlayerState::ALL.iter().zip(expected) {
        assert_eq!(state.scroll_multiplier(), mult, "{:?}", state);
    }
}

// ── Scenarios through Player::update ─────────────────────────────────────────

#[test]
fn sitting_low_energy_roll_posts_message() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    rig.ledger.energy = 0.5;

    rig.step(&mut p, &keys([Action::Roll]), 0.0);

    assert_eq!(p.state, PlayerState::Sitting);
    assert_eq!(rig.pools.messages.len(), 1);
    let msg = rig.pools.messages.iter().next().unwrap();
    assert_eq!(msg.text, "Energy");
    assert!(msg.is_static());
    assert_eq!(rig.ledger.score, 0);
    assert_eq!(rig.ledger.energy, 0.5);
}

#[test]
fn running_roll_enters_rolling_with_fresh_animation() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Running, &mut rig.ledger);
    p.clock.frame = 3;

    rig.step(&mut p, &keys([Action::Roll]), 0.0);

    assert_eq!(p.state, PlayerState::Rolling);
    assert_eq!(rig.ledger.scroll_speed, 2.0 * rig.config.world.max_scroll_speed);
    assert_eq!(p.clock.frame, 0);
    assert_eq!(p.clock.row, 6);
}

#[test]
fn jump_impulse_only_from_ground() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Running, &mut rig.ledger);

    rig.step(&mut p, &keys([Action::Up]), 16.0);
    assert_eq!(p.state, PlayerState::Jumping);
    assert!(p.y < p.ground_y());
    assert_eq!(p.vy, -26.0);

    // re-entering mid-air leaves velocity alone
    p.set_state(PlayerState::Jumping, &mut rig.ledger);
    assert_eq!(p.vy, -26.0);
}

#[test]
fn jump_lands_back_running() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Running, &mut rig.ledger);
    rig.step(&mut p, &keys([Action::Up]), 16.0);

    let mut seen = vec![p.state];
    for _ in 0..120 {
        rig.step(&mut p, &ActionSet::new(), 16.0);
        if seen.last() != Some(&p.state) {
            seen.push(p.state);
        }
    }
    assert_eq!(
        seen,
        vec![PlayerState::Jumping, PlayerState::Falling, PlayerState::Running]
    );
    assert!(p.is_on_ground());
    assert_eq!(p.vy, 0.0);
}

#[test]
fn player_stays_inside_world() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    let max_x = rig.config.world.width - p.width;

    for i in 0..300 {
        let input = match (i / 50) % 3 {
            0 => keys([Action::Left, Action::Up]),
            1 => keys([Action::Right, Action::Up]),
            _ => keys([Action::Right, Action::Down]),
        };
        rig.step(&mut p, &input, 16.0);
        assert!(p.x >= 0.0 && p.x <= max_x, "x={} at tick {}", p.x, i);
        assert!(p.y <= p.ground_y(), "y={} at tick {}", p.y, i);
    }
}

#[test]
fn hit_ignores_horizontal_input() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.x = 100.0;
    p.set_state(PlayerState::Hit, &mut rig.ledger);
    for _ in 0..3 {
        rig.step(&mut p, &keys([Action::Right]), 16.0);
    }
    assert_eq!(p.x, 100.0);
    assert_eq!(p.vx, 0.0);
}

#[test]
fn hit_recovers_after_animation() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Hit, &mut rig.ledger);

    let mut ticks = 0;
    while p.state == PlayerState::Hit && ticks < 200 {
        rig.step(&mut p, &ActionSet::new(), 60.0);
        ticks += 1;
    }
    assert_eq!(p.state, PlayerState::Running);
    // ten frame advances, each needing two ticks
    assert!(ticks > 10);
}

#[test]
fn rolling_out_of_energy_on_ground_sits() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Rolling, &mut rig.ledger);
    rig.ledger.energy = 0.25;

    let roll = keys([Action::Roll]);
    rig.step(&mut p, &roll, 60.0); // timer fills
    assert_eq!(p.state, PlayerState::Rolling);
    rig.step(&mut p, &roll, 60.0); // frame advances, energy drained
    assert_eq!(rig.ledger.energy, 0.0);
    assert_eq!(p.state, PlayerState::Sitting);
    assert_eq!(rig.ledger.scroll_speed, 0.0);
}

#[test]
fn rolling_out_of_energy_in_air_falls() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.y = p.ground_y() - 300.0;
    p.set_state(PlayerState::Rolling, &mut rig.ledger);
    rig.ledger.energy = 0.25;

    let roll = keys([Action::Roll]);
    rig.step(&mut p, &roll, 60.0);
    rig.step(&mut p, &roll, 60.0);
    assert_eq!(p.state, PlayerState::Falling);
    assert_eq!(rig.ledger.scroll_speed, rig.config.world.max_scroll_speed);
}

#[test]
fn rolling_costs_energy_per_frame_not_per_tick() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Rolling, &mut rig.ledger);
    rig.ledger.energy = 5.0;

    // 50 ms frame interval: six 10 ms ticks fill the timer, the seventh advances
    for _ in 0..14 {
        rig.step(&mut p, &keys([Action::Roll]), 10.0);
    }
    assert_eq!(rig.ledger.energy, 4.5);
}

#[test]
fn debug_rolling_is_free() {
    let mut rig = Rig::new();
    rig.debug = true;
    let mut p = rig.player();
    p.set_state(PlayerState::Rolling, &mut rig.ledger);
    rig.ledger.energy = 2.0;
    for _ in 0..20 {
        rig.step(&mut p, &keys([Action::Roll]), 60.0);
    }
    assert_eq!(rig.ledger.energy, 2.0);
    assert_eq!(p.state, PlayerState::Rolling);
}

#[test]
fn rolling_emits_fire_each_tick() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Rolling, &mut rig.ledger);
    for _ in 0..5 {
        rig.step(&mut p, &keys([Action::Roll]), 1.0);
    }
    assert_eq!(rig.pools.particles.len(), 5);
}

#[test]
fn dive_landing_splashes() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.y = p.ground_y() - 5.0;
    p.set_state(PlayerState::Diving, &mut rig.ledger);
    assert_eq!(p.vy, rig.config.player.dive_speed);

    let hold = keys([Action::Roll]);
    rig.step(&mut p, &hold, 1.0);
    assert_eq!(p.state, PlayerState::Diving);
    assert!(p.is_on_ground());

    rig.step(&mut p, &hold, 1.0);
    assert_eq!(p.state, PlayerState::Running);
    // one fire per diving tick plus the splash burst
    assert_eq!(rig.pools.particles.len(), 2 + rig.config.effects.splash_count);
}

#[test]
fn rolling_boost_lifts_off() {
    let mut rig = Rig::new();
    let mut p = rig.player();
    p.set_state(PlayerState::Rolling, &mut rig.ledger);
    rig.step(&mut p, &keys([Action::Roll, Action::Up]), 1.0);
    assert_eq!(p.state, PlayerState::Rolling);
    assert!(!p.is_on_ground());
}
