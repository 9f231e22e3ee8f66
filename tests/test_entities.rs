use side_scroller::config::{DriftConfig, GameConfig};
use side_scroller::effects::{CollisionFlash, FloatingMessage, Particle};
use side_scroller::entities::{drift, Enemy, EnemyClass, EnemyKind, Pickup, PickupKind, Rect};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.overlaps(&a));
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn spawned_enemies_start_off_right_edge() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for class in [EnemyClass::Flying, EnemyClass::Ground, EnemyClass::Climbing] {
        let e = Enemy::spawn(class, &config, &mut rng);
        assert_eq!(e.kind.class(), class);
        assert!(e.x >= config.world.width);
        assert!(!e.marked);
    }
}

#[test]
fn ground_enemy_sits_on_ground_and_scrolls() {
    let config = GameConfig::default();
    let mut e = Enemy::spawn(EnemyClass::Ground, &config, &mut seeded_rng());
    assert_eq!(e.y + e.height, config.world.height - config.world.ground_margin);

    let x0 = e.x;
    e.update(16.0, 5.0, &config);
    assert_eq!(e.x, x0 - 5.0);
}

#[test]
fn enemy_leaving_left_edge_is_marked() {
    let config = GameConfig::default();
    let mut e = Enemy::spawn(EnemyClass::Ground, &config, &mut seeded_rng());
    e.x = -e.width + 1.0;
    e.update(16.0, 0.0, &config);
    assert!(!e.marked);
    e.update(16.0, 5.0, &config);
    assert!(e.marked);
}

#[test]
fn flying_enemy_bobs() {
    let config = GameConfig::default();
    let mut e = Enemy::spawn(EnemyClass::Flying, &config, &mut seeded_rng());
    let y0 = e.y;
    e.update(16.0, 0.0, &config);
    let EnemyKind::Flying { angle, angle_velocity } = e.kind else {
        panic!("not a flyer");
    };
    assert_eq!(angle, angle_velocity);
    assert!((e.y - (y0 + angle.sin())).abs() < 1e-9);
}

#[test]
fn climbing_enemy_bounces_off_ground() {
    let config = GameConfig::default();
    let mut e = Enemy::spawn(EnemyClass::Climbing, &config, &mut seeded_rng());
    e.vy = 1.0;
    e.y = config.ground_y(e.height) + 0.5;
    e.update(16.0, 0.0, &config);
    assert_eq!(e.vy, -1.0);
}

#[test]
fn climbing_enemy_leaving_top_is_marked() {
    let config = GameConfig::default();
    let mut e = Enemy::spawn(EnemyClass::Climbing, &config, &mut seeded_rng());
    e.vy = -1.0;
    e.y = -e.height;
    e.update(16.0, 0.0, &config);
    assert!(e.marked);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn pickup_drift_shape_is_configurable() {
    let mut rng = seeded_rng();
    let still = DriftConfig {
        still_chance: 1.0,
        ..DriftConfig::default()
    };
    assert_eq!(drift(&still, &mut rng), 0.0);

    let rising = DriftConfig {
        still_chance: 0.0,
        rise_chance: 1.0,
        ..DriftConfig::default()
    };
    for _ in 0..100 {
        let v = drift(&rising, &mut rng);
        assert!((-1.0..0.0).contains(&v));
    }

    let sinking = DriftConfig {
        still_chance: 0.0,
        rise_chance: 0.0,
        ..DriftConfig::default()
    };
    for _ in 0..100 {
        let v = drift(&sinking, &mut rng);
        assert!((1.0..2.0).contains(&v));
    }
}

#[test]
fn pickup_moves_left_and_expires() {
    let config = GameConfig::default();
    let mut p = Pickup::spawn(PickupKind::Restorative, &config, &mut seeded_rng());
    let x0 = p.x;
    p.update(16.0, 5.0);
    assert!(p.x < x0 - 5.0);
    p.x = -100.0;
    p.update(16.0, 5.0);
    assert!(p.marked);
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[test]
fn particles_shrink_until_gone() {
    let mut rng = seeded_rng();
    let mut p = Particle::dust(100.0, 100.0, &mut rng);
    let size = p.size;
    p.update(0.0);
    assert!((p.size - size * 0.95).abs() < 1e-9);

    let mut ticks = 0;
    while !p.marked {
        p.update(0.0);
        ticks += 1;
        assert!(ticks < 1000);
    }
    assert!(p.size < 0.5);
}

#[test]
fn splash_is_offset_by_size() {
    let p = Particle::splash(500.0, 400.0, &mut seeded_rng());
    assert!((p.x - (500.0 - p.size * 0.4)).abs() < 1e-9);
    assert!((p.y - (400.0 - p.size * 0.5)).abs() < 1e-9);
}

#[test]
fn flash_is_centred_and_expires() {
    let mut f = CollisionFlash::new(200.0, 100.0, &mut seeded_rng());
    assert!((f.x + f.width * 0.5 - 200.0).abs() < 1e-9);
    assert!((f.y + f.height * 0.5 - 100.0).abs() < 1e-9);

    let mut ticks = 0;
    while !f.marked {
        f.update(250.0, 0.0); // longer than any frame interval
        ticks += 1;
        assert!(ticks < 100);
    }
    assert_eq!(f.clock.frame, 5);
}

#[test]
fn static_message_expires_after_lifetime() {
    let mut m = FloatingMessage::fixed("Energy", 24.0, 107.0, 100);
    for _ in 0..100 {
        m.update();
    }
    assert!(!m.marked);
    m.update();
    assert!(m.marked);
    assert_eq!((m.x, m.y), (24.0, 107.0));
}

#[test]
fn dynamic_message_eases_toward_target() {
    let mut m = FloatingMessage::moving("+1", (100.0, 200.0), (0.0, 0.0), 0.03, 100);
    m.update();
    assert!((m.x - 97.0).abs() < 1e-9);
    assert!((m.y - 194.0).abs() < 1e-9);
}
