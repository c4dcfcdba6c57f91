use hype_type_core::{BleedOptions, BurnOptions, ChillOptions, FreezeOptions, StatusOptions, Vitals};
use hype_type_system_status_effects::{StatusState, StatusTuning};

const STEP: f32 = 1.0 / 60.0;

fn burn(duration_sec: f32, dps: f32) -> StatusOptions {
    StatusOptions::Burn(BurnOptions {
        duration_sec: Some(duration_sec),
        dps: Some(dps),
    })
}

#[test]
fn repeated_burns_keep_longest_and_strongest() {
    let vitals = Vitals::full(30.0);
    let tuning = StatusTuning::default();
    let cases = [(2.0, 8.0, 5.0, 3.0), (5.0, 3.0, 2.0, 8.0), (4.0, 4.0, 4.0, 4.0)];

    for (d1, p1, d2, p2) in cases {
        let mut state = StatusState::default();
        let _ = state.apply(&burn(d1, p1), &vitals, &tuning);
        let _ = state.apply(&burn(d2, p2), &vitals, &tuning);

        let active = state.burn().expect("burn active");
        assert!((active.remaining - f32::max(d1, d2)).abs() < 1e-6);
        assert!((active.dps - f32::max(p1, p2)).abs() < 1e-6);
    }
}

#[test]
fn freeze_always_clears_chill() {
    let vitals = Vitals::full(30.0);
    let tuning = StatusTuning::default();

    for prior_chill in [false, true] {
        let mut state = StatusState::default();
        if prior_chill {
            let _ = state.apply(
                &StatusOptions::Chill(ChillOptions::default()),
                &vitals,
                &tuning,
            );
            assert!(state.chill().is_some());
        }

        let _ = state.apply(
            &StatusOptions::Freeze(FreezeOptions {
                duration_sec: Some(2.0),
            }),
            &vitals,
            &tuning,
        );

        assert!(state.chill().is_none());
        assert!((state.freeze().expect("frozen").remaining - 2.0).abs() < 1e-6);
    }
}

#[test]
fn sustained_chill_promotes_into_freeze() {
    let mut vitals = Vitals::full(30.0);
    let tuning = StatusTuning::default();
    let mut state = StatusState::default();
    let _ = state.apply(
        &StatusOptions::Chill(ChillOptions {
            duration_sec: Some(10.0),
            freeze_threshold_sec: Some(2.0),
            freeze_duration_sec: Some(1.5),
            ..ChillOptions::default()
        }),
        &vitals,
        &tuning,
    );
    assert!(state.chill().expect("chilled").can_freeze);

    let mut promotions = 0;
    for _ in 0..4 {
        let tick = state.update(&mut vitals, 0.5);
        if tick.promoted_to_freeze {
            promotions += 1;
            assert!(tick.freeze_active);
        }
    }

    assert_eq!(promotions, 1);
    assert!(state.chill().is_none());
    assert!((state.freeze().expect("frozen").remaining - 1.5).abs() < 1e-6);
    assert!(vitals.hp < 30.0, "chill dealt damage before freezing");
}

#[test]
fn short_chill_never_freezes() {
    let mut vitals = Vitals::full(30.0);
    let tuning = StatusTuning::default();
    let mut state = StatusState::default();
    let _ = state.apply(
        &StatusOptions::Chill(ChillOptions {
            duration_sec: Some(1.0),
            freeze_threshold_sec: Some(2.0),
            ..ChillOptions::default()
        }),
        &vitals,
        &tuning,
    );

    for _ in 0..180 {
        let tick = state.update(&mut vitals, STEP);
        assert!(!tick.freeze_active);
    }
    assert!(state.chill().is_none());
    assert!(state.freeze().is_none());
}

#[test]
fn bleed_clamps_ceiling_and_reports_kill_on_first_floor_tick() {
    let mut vitals = Vitals::full(100.0);
    let tuning = StatusTuning::default();
    let mut state = StatusState::default();
    let _ = state.apply(
        &StatusOptions::Bleed(BleedOptions {
            duration_sec: Some(10.0),
            percent_per_sec: Some(50.0),
            min_ratio: Some(0.1),
        }),
        &vitals,
        &tuning,
    );

    let first = state.update(&mut vitals, 1.0);
    assert!(first.bleed_kill, "floor reached on the first tick");
    assert!((vitals.max_hp - 10.0).abs() < 1e-4);
    assert!(vitals.hp <= vitals.max_hp);

    let second = state.update(&mut vitals, 1.0);
    assert!(second.bleed_kill);
    assert!((vitals.max_hp - 10.0).abs() < 1e-4, "ceiling never drops below floor");
}

#[test]
fn slow_bleed_only_kills_once_the_floor_is_reached() {
    let mut vitals = Vitals::full(100.0);
    let tuning = StatusTuning::default();
    let mut state = StatusState::default();
    let _ = state.apply(
        &StatusOptions::Bleed(BleedOptions {
            duration_sec: Some(30.0),
            percent_per_sec: Some(0.5),
            min_ratio: Some(0.5),
        }),
        &vitals,
        &tuning,
    );

    let early = state.update(&mut vitals, 0.5);
    assert!(!early.bleed_kill);
    assert!((vitals.max_hp - 75.0).abs() < 1e-4);
    assert!((vitals.hp - 75.0).abs() < 1e-4, "hp clamped to the new ceiling");

    let late = state.update(&mut vitals, 0.5);
    assert!(late.bleed_kill);
}

#[test]
fn burn_and_chill_stack_damage_when_not_frozen() {
    let mut vitals = Vitals::full(30.0);
    let tuning = StatusTuning::default();
    let mut state = StatusState::default();
    let _ = state.apply(&burn(3.0, 4.0), &vitals, &tuning);
    let _ = state.apply(
        &StatusOptions::Chill(ChillOptions {
            base_dps: Some(2.0),
            dps_growth_per_sec: Some(0.0),
            ..ChillOptions::default()
        }),
        &vitals,
        &tuning,
    );

    let tick = state.update(&mut vitals, 1.0);
    assert!((tick.dot_damage - 6.0).abs() < 1e-5);
    assert!((vitals.hp - 24.0).abs() < 1e-5);
}
