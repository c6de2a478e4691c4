mod common;

use common::*;
use glam::Vec2;
use smallvec::smallvec;
use wavefield_core::*;

fn wave_at(reg: &mut VoiceRegistry, x: f32, y: f32, color: Color) -> Wave {
    let id = reg.voice_for(color.key());
    Wave::spawn(Vec2::new(x, y), color, 0.1, smallvec![id], reg)
}

#[test]
fn spawn_takes_an_instance_on_each_voice() {
    let (mut reg, _log) = registry();
    let a = reg.voice_for(ColorKey::from(Color::new(10.0, 20.0, 30.0)));
    let b = reg.voice_for(ColorKey::from(Color::new(40.0, 50.0, 60.0)));
    let w = Wave::spawn(
        Vec2::ZERO,
        Color::new(25.0, 35.0, 45.0),
        0.1,
        smallvec![a, b, a],
        &mut reg,
    );
    assert_eq!(w.radius, INITIAL_RADIUS);
    assert_eq!(w.phase(), WavePhase::Growing);
    assert_eq!(reg.get(a).unwrap().active_instances(), 2);
    assert_eq!(reg.get(b).unwrap().active_instances(), 1);
    assert!(reg.get(a).unwrap().is_looping());
}

#[test]
fn growth_is_tripled_while_pressing() {
    let (mut reg, _log) = registry();
    let mut w = wave_at(&mut reg, 0.0, 0.0, Color::new(100.0, 100.0, 100.0));
    w.update(false, &mut reg);
    assert!((w.radius - (INITIAL_RADIUS + 0.1)).abs() < 1e-5);
    assert!((w.growth() - 0.1).abs() < 1e-6);
    w.update(true, &mut reg);
    assert!((w.growth() - 0.3).abs() < 1e-6);
    assert!((w.radius - (INITIAL_RADIUS + 0.4)).abs() < 1e-5);
    w.update(false, &mut reg);
    assert!((w.growth() - 0.1).abs() < 1e-6);
    assert_eq!(w.base_growth(), 0.1, "pressing never changes the base rate");
}

#[test]
fn radius_never_shrinks_while_growing() {
    let (mut reg, _log) = registry();
    let mut w = wave_at(&mut reg, 0.0, 0.0, Color::new(100.0, 100.0, 100.0));
    let mut prev = w.radius;
    for i in 0..300 {
        w.update(i % 3 == 0, &mut reg);
        assert!(w.radius >= prev);
        prev = w.radius;
    }
}

#[test]
fn turn_grey_is_idempotent_and_one_way() {
    let (mut reg, _log) = registry();
    let mut w = wave_at(&mut reg, 0.0, 0.0, Color::new(100.0, 100.0, 100.0));
    w.turn_grey();
    assert!(w.is_grey());
    assert_eq!(w.grey_level(), GREY_HEAD_START);
    w.turn_grey();
    assert_eq!(w.grey_level(), GREY_HEAD_START);
    let r = w.radius;
    for _ in 0..50 {
        w.update(true, &mut reg);
        w.turn_grey();
        assert!(w.is_grey());
    }
    assert_eq!(w.radius, r, "grey waves stop growing");
    assert_eq!(w.grey_level(), GREY_HEAD_START + 50 * GREY_STEP);
}

#[test]
fn death_releases_voices_exactly_once() {
    let (mut reg, _log) = registry();
    let key_a = Color::new(200.0, 50.0, 50.0);
    let key_b = Color::new(50.0, 200.0, 50.0);
    let a = reg.voice_for(key_a.key());
    let b = reg.voice_for(key_b.key());
    // A second wave keeps voice `a` referenced
    let _other = Wave::spawn(Vec2::ZERO, key_a, 0.1, smallvec![a], &mut reg);
    let mut w = Wave::spawn(Vec2::ZERO, key_a, 0.1, smallvec![a, b], &mut reg);
    assert_eq!(reg.get(a).unwrap().active_instances(), 2);
    assert_eq!(reg.get(b).unwrap().active_instances(), 1);

    w.turn_grey();
    let mut ticks = 0;
    while !w.is_dead() {
        w.update(false, &mut reg);
        ticks += 1;
        assert!(ticks < 200);
    }
    // 10 + 2n > 240 first holds at n = 116
    assert_eq!(ticks, 116);
    assert!(w.grey_level() > GREY_DEATH_THRESHOLD);
    assert_eq!(w.phase(), WavePhase::Dead);
    assert_eq!(reg.get(a).unwrap().active_instances(), 1);
    assert_eq!(reg.get(b).unwrap().active_instances(), 0);

    for _ in 0..50 {
        w.update(false, &mut reg);
    }
    assert_eq!(w.grey_level(), 255, "grey level saturates");
    assert_eq!(reg.get(a).unwrap().active_instances(), 1);
    assert_eq!(reg.get(b).unwrap().active_instances(), 0);
}

#[test]
fn contains_center_matches_distance_and_is_asymmetric() {
    let (mut reg, _log) = registry();
    let mut big = wave_at(&mut reg, 0.0, 0.0, Color::new(60.0, 60.0, 60.0));
    let mut small = wave_at(&mut reg, 30.0, 40.0, Color::new(70.0, 70.0, 70.0));
    big.radius = 60.0;
    small.radius = 10.0;
    let d = big.position.distance(small.position);
    assert_eq!(d, 50.0);
    assert_eq!(big.contains_center(&small), d < big.radius);
    assert_eq!(small.contains_center(&big), d < small.radius);
    assert!(big.contains_center(&small));
    assert!(!small.contains_center(&big));

    // Strict: a centre exactly on the rim is outside
    big.radius = 50.0;
    assert!(!big.contains_center(&small));
}

#[test]
fn growing_wave_draws_ring_with_halo() {
    let (mut reg, _log) = registry();
    let mut w = wave_at(&mut reg, 100.0, 100.0, Color::new(200.0, 50.0, 50.0));
    w.radius = 40.0;
    let mut surface = RecordingSurface::new(800.0, 600.0);
    w.draw(&mut surface);
    assert_eq!(surface.rings(), 1 + HALO_RINGS);
    assert_eq!(surface.discs(), 0);
    match &surface.calls[0] {
        DrawCall::Ring {
            radius,
            stroke,
            width,
            ..
        } => {
            assert_eq!(*radius, 40.0);
            assert_eq!(stroke.a, 255.0);
            assert_eq!(*width, RING_STROKE);
        }
        other => panic!("unexpected {other:?}"),
    }
    let mut prev_alpha = 255.0;
    for (i, call) in surface.calls.iter().enumerate().skip(1) {
        if let DrawCall::Ring { radius, stroke, .. } = call {
            assert_eq!(*radius, 40.0 - i as f32 * HALO_RADIUS_STEP);
            assert!(stroke.a < prev_alpha, "halo fades inward");
            prev_alpha = stroke.a;
        }
    }
}

#[test]
fn small_wave_skips_halo_rings_with_no_room() {
    let (mut reg, _log) = registry();
    let w = wave_at(&mut reg, 0.0, 0.0, Color::new(200.0, 50.0, 50.0));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    w.draw(&mut surface);
    // radius 5: only the 1 px halo ring fits
    assert_eq!(surface.rings(), 2);
}

#[test]
fn grey_wave_draws_disc_with_grey_level_alpha() {
    let (mut reg, _log) = registry();
    let mut w = wave_at(&mut reg, 10.0, 10.0, Color::new(200.0, 50.0, 50.0));
    w.turn_grey();
    w.update(false, &mut reg);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    w.draw(&mut surface);
    assert_eq!(surface.rings(), 0);
    match &surface.calls[0] {
        DrawCall::Disc { fill, radius, .. } => {
            assert_eq!(*radius, w.radius);
            assert_eq!(fill.a, (GREY_HEAD_START + GREY_STEP) as f32);
            assert_eq!([fill.r, fill.g, fill.b], GREY_FILL_RGB);
        }
        other => panic!("unexpected {other:?}"),
    }
}
