use glam::Vec2;
use hype_type_core::{BulletId, DefeatCause, EnemyId, Event, Palette, SessionMode, UpgradeNodeId};
use hype_type_presentation::{present, Color, Presentation, SoundCue, DAMAGE_NUMBER_COLOR};

#[derive(Debug, Default)]
struct Recorder {
    sounds: Vec<SoundCue>,
    numbers: Vec<(Vec2, f32, Color)>,
    fragments: Vec<(Vec2, Color)>,
}

impl Presentation for Recorder {
    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn spawn_damage_number(&mut self, position: Vec2, value: f32, color: Color) {
        self.numbers.push((position, value, color));
    }

    fn spawn_defeat_fragments(&mut self, position: Vec2, color: Color) {
        self.fragments.push((position, color));
    }
}

#[test]
fn hits_float_damage_numbers_above_the_enemy() {
    let mut recorder = Recorder::default();
    let events = vec![Event::EnemyHit {
        enemy: EnemyId::new(1),
        bullet: BulletId::new(7),
        position: Vec2::new(100.0, 200.0),
        damage: 10.0,
    }];

    present(&events, &Palette::STANDARD, &mut recorder);

    assert_eq!(
        recorder.numbers,
        vec![(Vec2::new(100.0, 180.0), 10.0, DAMAGE_NUMBER_COLOR)]
    );
    assert!(recorder.sounds.is_empty());
}

#[test]
fn defeats_burst_into_fragments_with_sound() {
    let mut recorder = Recorder::default();
    let palette = Palette::STANDARD;
    let events = vec![Event::EnemyDefeated {
        enemy: EnemyId::new(3),
        position: Vec2::new(5.0, 6.0),
        word: "cat".to_owned(),
        cause: DefeatCause::Bleed,
    }];

    present(&events, &palette, &mut recorder);

    assert_eq!(
        recorder.fragments,
        vec![(Vec2::new(5.0, 6.0), Color::from(palette.enemy))]
    );
    assert_eq!(recorder.sounds, vec![SoundCue::Defeat]);
    assert_eq!(SoundCue::Defeat.asset(), "cu1.mp3");
}

#[test]
fn purchases_play_the_info_cue_and_other_events_are_silent() {
    let mut recorder = Recorder::default();
    let events = vec![
        Event::ModeChanged {
            mode: SessionMode::Running,
        },
        Event::UpgradeAcquired {
            node: UpgradeNodeId::new("sharp"),
            balance: 3,
        },
    ];

    present(&events, &Palette::STANDARD, &mut recorder);

    assert_eq!(recorder.sounds, vec![SoundCue::Info]);
    assert!(recorder.numbers.is_empty());
    assert!(recorder.fragments.is_empty());
}
