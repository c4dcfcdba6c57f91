//! Headless run driven by the scripted typist.

use std::{fmt, time::Duration};

use anyhow::{bail, Result};
use glam::Vec2;
use hype_type_core::{
    Command, Event, SessionMode, UpgradeCatalog, UpgradeNodeId, WordLibrary,
};
use hype_type_presentation::{present, Color, Presentation, SoundCue};
use hype_type_world::{apply, query, SessionConfig, World};

use crate::typist::ScriptedTypist;

/// Knobs of a headless run.
#[derive(Clone, Debug)]
pub(crate) struct RunOptions {
    /// Simulated seconds before the run is cut short.
    pub(crate) seconds: u32,
    /// Wave the run starts at.
    pub(crate) start_wave: u32,
    /// Typing speed of the scripted player.
    pub(crate) keys_per_second: u32,
}

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunSummary {
    pub(crate) elapsed: Duration,
    pub(crate) mode: SessionMode,
    pub(crate) wave: u32,
    pub(crate) kills: u32,
    pub(crate) score: u32,
    pub(crate) points: u32,
    pub(crate) player_hp: f32,
    pub(crate) keystrokes: u32,
    pub(crate) upgrades: Vec<UpgradeNodeId>,
    pub(crate) sounds: u32,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "time      {:.1}s", self.elapsed.as_secs_f32())?;
        writeln!(f, "outcome   {:?}", self.mode)?;
        writeln!(f, "wave      {}", self.wave)?;
        writeln!(f, "kills     {}", self.kills)?;
        writeln!(f, "score     {}", self.score)?;
        writeln!(f, "points    {}", self.points)?;
        writeln!(f, "hp        {:.0}", self.player_hp)?;
        writeln!(f, "keys      {}", self.keystrokes)?;
        writeln!(f, "sounds    {}", self.sounds)?;
        let upgrades: Vec<&str> = self.upgrades.iter().map(UpgradeNodeId::as_str).collect();
        write!(f, "upgrades  {}", upgrades.join(", "))
    }
}

/// Presenter that turns hooks into trace output.
#[derive(Debug, Default)]
struct TracePresenter {
    sounds: u32,
}

impl Presentation for TracePresenter {
    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds += 1;
        tracing::trace!(asset = cue.asset(), "sound");
    }

    fn spawn_damage_number(&mut self, position: Vec2, value: f32, _color: Color) {
        tracing::trace!(x = position.x, y = position.y, value, "damage number");
    }

    fn spawn_defeat_fragments(&mut self, position: Vec2, _color: Color) {
        tracing::trace!(x = position.x, y = position.y, "fragments");
    }
}

/// Plays a run until the player falls or `options.seconds` pass.
pub(crate) fn run(
    config: SessionConfig,
    words: WordLibrary,
    catalog: Option<UpgradeCatalog>,
    options: &RunOptions,
) -> Result<RunSummary> {
    let dt = config.frame_interval();
    let frames = u64::from(options.seconds) * u64::from(config.frame_rate.max(1));
    let mut typist = ScriptedTypist::new(options.keys_per_second, config.frame_rate);
    let mut world = World::with_config(config);
    let mut presenter = TracePresenter::default();
    let mut events = Vec::new();

    let shop: Vec<UpgradeNodeId> = catalog
        .as_ref()
        .map(|catalog| catalog.nodes().map(|node| node.id.clone()).collect())
        .unwrap_or_default();
    if let Some(catalog) = catalog {
        apply(&mut world, Command::LoadUpgradeCatalog { catalog }, &mut events);
    }

    apply(
        &mut world,
        Command::StartRun {
            words,
            start_wave: options.start_wave,
        },
        &mut events,
    );
    if let Some(reason) = events.iter().find_map(|event| match event {
        Event::RunRejected { reason } => Some(reason.clone()),
        _ => None,
    }) {
        bail!(reason);
    }
    flush(&mut events, &world, &mut presenter);

    let mut keystrokes = 0;
    let mut upgrades = Vec::new();
    for _ in 0..frames {
        apply(&mut world, Command::Tick { dt }, &mut events);
        if query::mode(&world) != SessionMode::Running {
            flush(&mut events, &world, &mut presenter);
            break;
        }

        let enemies = query::enemies(&world);
        if let Some(key) = typist.next_key(query::player_position(&world), &enemies) {
            keystrokes += 1;
            apply(&mut world, Command::KeyPressed { key }, &mut events);
        }

        for node in &shop {
            if !query::owns(&world, node) && query::can_purchase(&world, node) {
                apply(
                    &mut world,
                    Command::PurchaseUpgrade { node: node.clone() },
                    &mut events,
                );
                tracing::info!(node = %node, "purchased upgrade");
                upgrades.push(node.clone());
            }
        }
        flush(&mut events, &world, &mut presenter);
    }

    let wave = query::wave(&world);
    Ok(RunSummary {
        elapsed: query::elapsed(&world),
        mode: query::mode(&world),
        wave: wave.wave,
        kills: query::kills(&world),
        score: query::score(&world),
        points: query::points(&world),
        player_hp: query::player_hp(&world),
        keystrokes,
        upgrades,
        sounds: presenter.sounds,
    })
}

fn flush(events: &mut Vec<Event>, world: &World, presenter: &mut TracePresenter) {
    present(events, &query::palette(world), presenter);
    for event in events.drain(..) {
        match &event {
            Event::WaveAdvanced { wave, .. } => tracing::info!(wave, "wave cleared"),
            Event::RunEnded { wave, kills } => tracing::info!(wave, kills, "run ended"),
            _ => tracing::debug!(?event, "event"),
        }
    }
}
