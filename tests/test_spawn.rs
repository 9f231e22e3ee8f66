use side_scroller::config::SpawnConfig;
use side_scroller::entities::{EnemyClass, PickupKind};
use side_scroller::spawn::{SpawnRequest, SpawnScheduler};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemies_only() -> SpawnConfig {
    SpawnConfig {
        pickup_interval_ms: 1e12,
        ..SpawnConfig::default()
    }
}

#[test]
fn enemy_timer_fires_only_after_interval_is_exceeded() {
    let mut s = SpawnScheduler::new(&enemies_only());
    let mut rng = seeded_rng();

    assert!(s.tick(500.0, 0.0, &mut rng).is_empty()); // 500
    assert!(s.tick(500.0, 0.0, &mut rng).is_empty()); // 1000, not past yet
    assert!(s.tick(500.0, 0.0, &mut rng).is_empty()); // 1500
    let fired = s.tick(500.0, 0.0, &mut rng);
    assert!(!fired.is_empty());
    assert_eq!(s.enemy_timer_ms, 0.0);
}

#[test]
fn standing_still_spawns_only_flyers() {
    let mut s = SpawnScheduler::new(&enemies_only());
    let mut rng = seeded_rng();
    s.enemy_timer_ms = 2000.0;

    let fired = s.tick(16.0, 0.0, &mut rng);
    assert_eq!(fired, vec![SpawnRequest::Enemy(EnemyClass::Flying)]);
}

#[test]
fn scrolling_adds_ground_or_climbing_before_flyer() {
    let mut s = SpawnScheduler::new(&enemies_only());
    let mut rng = seeded_rng();
    let mut seen_ground = false;
    let mut seen_climbing = false;

    for _ in 0..50 {
        s.enemy_timer_ms = 2000.0;
        let fired = s.tick(16.0, 5.0, &mut rng);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[1], SpawnRequest::Enemy(EnemyClass::Flying));
        match fired[0] {
            SpawnRequest::Enemy(EnemyClass::Ground) => seen_ground = true,
            SpawnRequest::Enemy(EnemyClass::Climbing) => seen_climbing = true,
            other => panic!("unexpected spawn {:?}", other),
        }
    }
    assert!(seen_ground && seen_climbing);
}

#[test]
fn pickup_timer_resets_even_when_nothing_spawns() {
    let config = SpawnConfig {
        enemy_interval_ms: 1e12,
        pickup_chance: 0.0,
        ..SpawnConfig::default()
    };
    let mut s = SpawnScheduler::new(&config);
    let mut rng = seeded_rng();
    s.pickup_timer_ms = 6000.0;

    assert!(s.tick(16.0, 0.0, &mut rng).is_empty());
    assert_eq!(s.pickup_timer_ms, 0.0);
}

#[test]
fn certain_pickup_spawns_on_fire() {
    let config = SpawnConfig {
        enemy_interval_ms: 1e12,
        pickup_chance: 1.0,
        ..SpawnConfig::default()
    };
    let mut s = SpawnScheduler::new(&config);
    let mut rng = seeded_rng();
    s.pickup_timer_ms = 6000.0;

    assert_eq!(
        s.tick(16.0, 0.0, &mut rng),
        vec![SpawnRequest::Pickup(PickupKind::Restorative)]
    );
}

#[test]
fn same_seed_same_schedule() {
    let run = || {
        let mut s = SpawnScheduler::new(&SpawnConfig::default());
        let mut rng = seeded_rng();
        (0..2000)
            .flat_map(|i| s.tick(16.0, if i % 300 < 150 { 5.0 } else { 0.0 }, &mut rng))
            .collect::<Vec<_>>()
    };
    let a = run();
    assert!(!a.is_empty());
    assert_eq!(a, run());
}
