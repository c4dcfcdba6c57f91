use hype_type_core::DifficultyTier;
use hype_type_system_wave::{WaveAdvance, WaveController, WAVE_REWARD_POINTS};

#[test]
fn tenth_kill_advances_the_wave() {
    let mut wave = WaveController::default();
    wave.init(1, 10);

    for kill in 1..10 {
        assert_eq!(wave.on_enemy_defeated(), None, "kill {kill} must not advance");
        assert_eq!(wave.kills_this_wave(), kill);
        assert_eq!(wave.current_wave(), 1);
    }

    assert_eq!(
        wave.on_enemy_defeated(),
        Some(WaveAdvance {
            wave: 2,
            reward_points: WAVE_REWARD_POINTS,
        })
    );
    assert_eq!(wave.current_wave(), 2);
    assert_eq!(wave.kills_this_wave(), 0);
}

#[test]
fn difficulties_unlock_every_two_waves() {
    let mut wave = WaveController::default();
    let expectations = [
        (1, vec![DifficultyTier::Easy]),
        (2, vec![DifficultyTier::Easy]),
        (3, vec![DifficultyTier::Easy, DifficultyTier::Medium]),
        (
            5,
            vec![
                DifficultyTier::Easy,
                DifficultyTier::Medium,
                DifficultyTier::Hard,
            ],
        ),
        (7, DifficultyTier::ALL.to_vec()),
        (40, DifficultyTier::ALL.to_vec()),
    ];

    for (start, allowed) in expectations {
        wave.init(start, 10);
        assert_eq!(wave.allowed_difficulties(), allowed, "wave {start}");
    }
}

#[test]
fn init_resets_kill_progress() {
    let mut wave = WaveController::default();
    wave.init(1, 3);
    let _ = wave.on_enemy_defeated();
    let _ = wave.on_enemy_defeated();

    wave.init(4, 3);

    assert_eq!(wave.current_wave(), 4);
    assert_eq!(wave.kills_this_wave(), 0);
    assert_eq!(wave.on_enemy_defeated(), None);
}
