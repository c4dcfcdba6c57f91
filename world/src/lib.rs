#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state and the fixed-step combat loop for Hype Type.
//!
//! The world is mutated exclusively through [`apply`]. Each accepted
//! [`Command::Tick`] that completes a frame runs one simulation step in a
//! fixed order: due burst shots are released, status effects tick, enemies
//! advance and touch the player, bullets move and strike, spent bullets
//! expire and finally the spawning system is consulted.

mod combat;
mod config;
mod enemy;

use glam::Vec2;
use hype_type_core::{
    derive_stream_seed, Arena, Command, DefeatCause, EnemyId, Event, Palette, SessionMode,
    StartError, StatusKind, StatusOptions, TuningError, UpgradeEffect, WordLibrary,
};
use hype_type_system_spawning::{Config as SpawnConfig, Spawning};
use hype_type_system_status_effects::StatusTuning;
use hype_type_system_typing::{TypingResolver, WordPool};
use hype_type_system_upgrades::{Progression, KILL_REWARD_POINTS};
use hype_type_system_wave::WaveController;
use hype_type_system_weapon::{ShotQueue, WeaponSystem};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use config::{SessionConfig, DEFAULT_SEED};

use combat::Projectile;
use config::FixedStep;
use enemy::Enemy;

/// Score granted for every defeated enemy.
pub const SCORE_PER_KILL: u32 = 10;

const TYPING_STREAM: &str = "typing";
const WEAPON_STREAM: &str = "weapon";
const PROC_STREAM: &str = "status-procs";
const SPAWN_STREAM: &str = "spawning";

/// Independent random streams derived from the session seed.
#[derive(Debug)]
struct RandomStreams {
    typing: ChaCha8Rng,
    weapon: ChaCha8Rng,
    procs: ChaCha8Rng,
}

impl RandomStreams {
    fn new(seed: u64) -> Self {
        Self {
            typing: ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, TYPING_STREAM)),
            weapon: ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, WEAPON_STREAM)),
            procs: ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, PROC_STREAM)),
        }
    }
}

/// Represents the authoritative Hype Type session state.
#[derive(Debug)]
pub struct World {
    config: SessionConfig,
    mode: SessionMode,
    arena: Arena,
    palette: Palette,
    clock: FixedStep,
    player_hp: f32,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    next_enemy: u32,
    next_bullet: u32,
    weapon: WeaponSystem,
    shots: ShotQueue,
    status_tuning: StatusTuning,
    wave: WaveController,
    progression: Progression,
    library: WordLibrary,
    pool: WordPool,
    resolver: TypingResolver,
    spawning: Spawning,
    rng: RandomStreams,
    kills: u32,
    score: u32,
}

impl World {
    /// Creates an idle world using the stock session configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates an idle world using the provided configuration.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            mode: SessionMode::Idle,
            arena: Arena::new(config.arena_width, config.arena_height),
            palette: Palette::STANDARD,
            clock: FixedStep::new(config.frame_interval()),
            player_hp: config.player_max_hp,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            next_enemy: 0,
            next_bullet: 0,
            weapon: WeaponSystem::default(),
            shots: ShotQueue::default(),
            status_tuning: StatusTuning::default(),
            wave: WaveController::default(),
            progression: Progression::default(),
            library: WordLibrary::new(),
            pool: WordPool::default(),
            resolver: TypingResolver::default(),
            spawning: new_spawning(&config),
            rng: RandomStreams::new(config.seed),
            kills: 0,
            score: 0,
            config,
        }
    }

    fn player_position(&self) -> Vec2 {
        self.arena.center()
    }

    fn set_mode(&mut self, mode: SessionMode, out_events: &mut Vec<Event>) {
        if self.mode != mode {
            self.mode = mode;
            out_events.push(Event::ModeChanged { mode });
        }
    }

    fn start_run(&mut self, library: WordLibrary, start_wave: u32, out_events: &mut Vec<Event>) {
        let mut wave = WaveController::default();
        wave.init(start_wave, self.config.kills_per_wave);
        let words = library.words_for(&wave.allowed_difficulties());
        if words.is_empty() {
            let reason = StartError::NoWords {
                wave: wave.current_wave(),
            };
            tracing::warn!(%reason, "run rejected");
            out_events.push(Event::RunRejected { reason });
            return;
        }

        self.enemies.clear();
        self.projectiles.clear();
        self.shots.clear();
        self.next_enemy = 0;
        self.next_bullet = 0;
        self.weapon = WeaponSystem::default();
        self.status_tuning = StatusTuning::default();
        self.progression.reset();
        self.resolver = TypingResolver::default();
        self.spawning = new_spawning(&self.config);
        self.rng = RandomStreams::new(self.config.seed);
        self.clock = FixedStep::new(self.config.frame_interval());
        self.player_hp = self.config.player_max_hp;
        self.kills = 0;
        self.score = 0;
        self.wave = wave;
        self.library = library;
        let word_count = words.len();
        self.pool = WordPool::new(words);

        tracing::info!(wave = self.wave.current_wave(), words = word_count, "run started");
        self.set_mode(SessionMode::Running, out_events);
        out_events.push(Event::RunStarted {
            wave: self.wave.current_wave(),
            words: word_count,
        });
    }

    fn end_run(&mut self, out_events: &mut Vec<Event>) {
        self.enemies.clear();
        self.projectiles.clear();
        self.shots.clear();
        tracing::info!(wave = self.wave.current_wave(), kills = self.kills, "run ended");
        self.set_mode(SessionMode::GameOver, out_events);
        out_events.push(Event::RunEnded {
            wave: self.wave.current_wave(),
            kills: self.kills,
        });
    }

    fn spawn_enemy(&mut self, position: Vec2, out_events: &mut Vec<Event>) {
        if !matches!(self.mode, SessionMode::Running | SessionMode::Paused) {
            tracing::warn!(%position, "spawn ignored outside a run");
            return;
        }
        let Some(word) = self.pool.draw(&mut self.rng.typing) else {
            tracing::warn!(%position, "spawn ignored without words");
            return;
        };

        let enemy = EnemyId::new(self.next_enemy);
        self.next_enemy += 1;
        let hp = self.wave.enemy_hp_for_wave(self.config.enemy_base_hp);
        tracing::trace!(enemy = enemy.get(), %word, hp, "enemy spawned");
        out_events.push(Event::EnemySpawned {
            enemy,
            position,
            word: word.clone(),
            hp,
        });
        self.enemies.push(Enemy::new(enemy, position, word, hp));
    }

    fn handle_key(&mut self, key: char, out_events: &mut Vec<Event>) {
        let player = self.player_position();
        let before: Vec<usize> = self.enemies.iter().map(|enemy| enemy.typed).collect();
        let completion = self.resolver.handle(
            key,
            self.enemies.as_mut_slice(),
            player,
            &mut self.pool,
            &mut self.rng.typing,
        );
        let completed = completion.as_ref().map(|completion| completion.enemy);

        for (enemy, typed) in self.enemies.iter().zip(before) {
            if enemy.typed != typed && Some(enemy.id) != completed {
                out_events.push(Event::TypingProgressed {
                    enemy: enemy.id,
                    typed: enemy.typed,
                });
            }
        }

        let Some(completion) = completion else {
            return;
        };
        let target = self
            .enemies
            .iter()
            .find(|enemy| enemy.id == completion.enemy)
            .map(|enemy| enemy.position);
        out_events.push(Event::WordCompleted {
            enemy: completion.enemy,
            word: completion.word,
            replacement: completion.replacement,
        });

        if let Some(target) = target {
            let count = self.weapon.fire_at_target(
                player,
                target,
                self.clock.elapsed(),
                &self.palette,
                &mut self.shots,
            );
            out_events.push(Event::ShotsQueued {
                target: completion.enemy,
                count,
            });
        }
    }

    fn apply_status(&mut self, enemy: EnemyId, status: &StatusOptions, out_events: &mut Vec<Event>) {
        match self.enemy_index(enemy) {
            Some(index) => self.apply_status_at(index, status, out_events),
            None => tracing::trace!(enemy = enemy.get(), "status for unknown enemy ignored"),
        }
    }

    fn apply_status_at(&mut self, index: usize, status: &StatusOptions, out_events: &mut Vec<Event>) {
        let enemy = &mut self.enemies[index];
        if enemy.status.apply(status, &enemy.vitals, &self.status_tuning) {
            out_events.push(Event::StatusApplied {
                enemy: enemy.id,
                kind: status.kind(),
            });
        }
    }

    fn apply_effect(&mut self, effect: UpgradeEffect) -> Result<(), TuningError> {
        match effect {
            UpgradeEffect::Stat { target, op, value } => {
                self.weapon.apply_effect(&target, op, value)
            }
            UpgradeEffect::Special {
                table,
                path,
                op,
                value,
            } => self.status_tuning.apply_effect(table, &path, op, value),
            UpgradeEffect::StatusOnHit { entry } => {
                self.weapon.push_status_on_hit(entry);
                Ok(())
            }
            UpgradeEffect::Unsupported => {
                tracing::warn!("skipping unsupported upgrade effect");
                Ok(())
            }
        }
    }

    fn apply_effect_reporting(&mut self, effect: UpgradeEffect, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.apply_effect(effect) {
            tracing::warn!(%reason, "upgrade effect rejected");
            out_events.push(Event::EffectRejected { reason });
        }
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|candidate| candidate.id == enemy)
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        let first_event = out_events.len();
        out_events.push(Event::TimeAdvanced {
            dt: self.clock.interval(),
        });

        self.release_shots(out_events);
        self.tick_statuses(out_events);
        self.move_enemies();
        if self.resolve_contacts(out_events) {
            return;
        }
        self.move_projectiles(out_events);
        let offspring = self.resolve_hits(out_events);
        self.expire_projectiles(out_events);
        for bullet in offspring {
            self.launch(bullet, out_events);
        }

        let mut commands = Vec::new();
        self.spawning.handle(
            &out_events[first_event..],
            self.mode,
            &self.arena,
            &mut commands,
        );
        for command in commands {
            apply(self, command, out_events);
        }
    }

    fn tick_statuses(&mut self, out_events: &mut Vec<Event>) {
        let dt_sec = self.clock.interval().as_secs_f32();
        let mut index = 0;
        while index < self.enemies.len() {
            let enemy = &mut self.enemies[index];
            let tick = enemy.status.update(&mut enemy.vitals, dt_sec);
            if tick.promoted_to_freeze {
                out_events.push(Event::EnemyFrozen { enemy: enemy.id });
            }

            let cause = if tick.bleed_kill {
                Some(DefeatCause::Bleed)
            } else if enemy.vitals.is_depleted() {
                Some(DefeatCause::DamageOverTime)
            } else {
                None
            };
            match cause {
                Some(cause) => self.defeat(index, cause, out_events),
                None => index += 1,
            }
        }
    }

    fn move_enemies(&mut self) {
        let player = self.player_position();
        let speed = self.config.enemy_speed;
        for enemy in &mut self.enemies {
            let distance = speed * enemy.status.speed_factor();
            enemy.step_towards(player, distance);
        }
    }

    /// Removes enemies touching the player. Returns whether the run ended.
    fn resolve_contacts(&mut self, out_events: &mut Vec<Event>) -> bool {
        let player = self.player_position();
        let reach = self.config.player_radius + self.config.enemy_radius;
        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].position.distance(player) >= reach {
                index += 1;
                continue;
            }

            let enemy = self.enemies.remove(index);
            self.pool.release(&enemy.word);
            self.player_hp -= self.config.contact_damage;
            tracing::debug!(enemy = enemy.id.get(), hp = self.player_hp, "player hit");
            out_events.push(Event::PlayerDamaged {
                enemy: enemy.id,
                damage: self.config.contact_damage,
                hp: self.player_hp.max(0.0),
            });
            if self.player_hp <= 0.0 {
                self.end_run(out_events);
                return true;
            }
        }
        false
    }

    fn defeat(&mut self, index: usize, cause: DefeatCause, out_events: &mut Vec<Event>) {
        let enemy = self.enemies.remove(index);
        self.pool.release(&enemy.word);
        tracing::debug!(enemy = enemy.id.get(), word = %enemy.word, ?cause, "enemy defeated");
        out_events.push(Event::EnemyDefeated {
            enemy: enemy.id,
            position: enemy.position,
            word: enemy.word,
            cause,
        });

        self.kills += 1;
        self.score += SCORE_PER_KILL;
        let balance = self.progression.award(KILL_REWARD_POINTS);
        out_events.push(Event::PointsAwarded {
            points: KILL_REWARD_POINTS,
            balance,
        });

        if let Some(advance) = self.wave.on_enemy_defeated() {
            let difficulties = self.wave.allowed_difficulties();
            let words = self.library.words_for(&difficulties);
            if !words.is_empty() {
                self.pool.replace_words(words);
            }
            out_events.push(Event::WaveAdvanced {
                wave: advance.wave,
                difficulties,
            });
            let balance = self.progression.award(advance.reward_points);
            out_events.push(Event::PointsAwarded {
                points: advance.reward_points,
                balance,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn new_spawning(config: &SessionConfig) -> Spawning {
    Spawning::new(
        SpawnConfig::new(
            config.spawn_interval(),
            derive_stream_seed(config.seed, SPAWN_STREAM),
        )
        .with_edge_margin(config.enemy_radius),
    )
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureArena { width, height } => {
            world.arena = Arena::new(width, height);
            out_events.push(Event::ArenaConfigured { arena: world.arena });
        }
        Command::StartRun { words, start_wave } => {
            world.start_run(words, start_wave, out_events);
        }
        Command::SetPaused { paused } => match (world.mode, paused) {
            (SessionMode::Running, true) => world.set_mode(SessionMode::Paused, out_events),
            (SessionMode::Paused, false) => world.set_mode(SessionMode::Running, out_events),
            _ => {}
        },
        Command::Tick { dt } => {
            if world.mode == SessionMode::Running && world.clock.accrue(dt) {
                world.step(out_events);
            }
        }
        Command::KeyPressed { key } => {
            if world.mode == SessionMode::Running {
                world.handle_key(key, out_events);
            } else {
                tracing::trace!(?key, mode = ?world.mode, "keystroke ignored");
            }
        }
        Command::SpawnEnemy { position } => world.spawn_enemy(position, out_events),
        Command::ApplyStatus { enemy, status } => world.apply_status(enemy, &status, out_events),
        Command::ApplyNamedStatus { enemy, name } => match name.parse::<StatusKind>() {
            Ok(kind) => {
                world.apply_status(enemy, &StatusOptions::defaults_for(kind), out_events);
            }
            Err(error) => {
                tracing::warn!(%error, enemy = enemy.get(), "status request rejected");
                out_events.push(Event::StatusRejected { enemy, name });
            }
        },
        Command::ApplyUpgradeEffect { effect } => {
            world.apply_effect_reporting(effect, out_events);
        }
        Command::LoadUpgradeCatalog { catalog } => {
            let nodes = catalog.nodes().count();
            world.progression.load_catalog(catalog);
            out_events.push(Event::UpgradeCatalogLoaded { nodes });
        }
        Command::PurchaseUpgrade { node } => match world.progression.purchase(&node) {
            Ok(effects) => {
                for effect in effects {
                    world.apply_effect_reporting(effect, out_events);
                }
                out_events.push(Event::UpgradeAcquired {
                    node,
                    balance: world.progression.points(),
                });
            }
            Err(reason) => {
                tracing::debug!(%reason, "upgrade purchase refused");
                out_events.push(Event::UpgradeRejected { node, reason });
            }
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use hype_type_core::{
        Arena, BulletId, DifficultyTier, EnemyId, Palette, Rgb, SessionMode, StatusKind,
        UpgradeNodeId,
    };
    use hype_type_system_status_effects::{StatusState, StatusTuning};
    use hype_type_system_weapon::WeaponStats;

    use super::{Enemy, World};

    /// Current lifecycle mode of the session.
    #[must_use]
    pub fn mode(world: &World) -> SessionMode {
        world.mode
    }

    /// Playable arena.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.arena
    }

    /// Colors used for bullets and enemies.
    #[must_use]
    pub fn palette(world: &World) -> Palette {
        world.palette
    }

    /// Player position, always the arena center.
    #[must_use]
    pub fn player_position(world: &World) -> Vec2 {
        world.player_position()
    }

    /// Player health clamped at zero.
    #[must_use]
    pub fn player_hp(world: &World) -> f32 {
        world.player_hp.max(0.0)
    }

    /// Simulated time covered by the steps of the current run.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock.elapsed()
    }

    /// Snapshots of every live enemy in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world.enemies.iter().map(EnemySnapshot::from_enemy).collect()
    }

    /// Snapshot of a single enemy.
    #[must_use]
    pub fn enemy(world: &World, id: EnemyId) -> Option<EnemySnapshot> {
        world
            .enemies
            .iter()
            .find(|enemy| enemy.id == id)
            .map(EnemySnapshot::from_enemy)
    }

    /// Status effects carried by a single enemy.
    #[must_use]
    pub fn enemy_status(world: &World, id: EnemyId) -> Option<&StatusState> {
        world
            .enemies
            .iter()
            .find(|enemy| enemy.id == id)
            .map(|enemy| &enemy.status)
    }

    /// Snapshots of every bullet in flight.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| BulletSnapshot {
                id: projectile.id,
                position: projectile.bullet.position,
                velocity: projectile.bullet.velocity,
                color: projectile.bullet.color,
                damage: projectile.bullet.damage,
                ricochet_count: projectile.bullet.ricochet_count,
            })
            .collect()
    }

    /// Burst shots scheduled but not yet released.
    #[must_use]
    pub fn pending_shots(world: &World) -> usize {
        world.shots.len()
    }

    /// Resolved weapon statistics.
    #[must_use]
    pub fn weapon_stats(world: &World) -> WeaponStats {
        world.weapon.stats()
    }

    /// Global status tuning tables.
    #[must_use]
    pub fn status_tuning(world: &World) -> &StatusTuning {
        &world.status_tuning
    }

    /// Wave progress of the current run.
    #[must_use]
    pub fn wave(world: &World) -> WaveSnapshot {
        WaveSnapshot {
            wave: world.wave.current_wave(),
            kills_this_wave: world.wave.kills_this_wave(),
            kills_to_advance: world.wave.kills_to_advance(),
            difficulties: world.wave.allowed_difficulties(),
        }
    }

    /// Words enemies currently draw from.
    #[must_use]
    pub fn active_words(world: &World) -> &[String] {
        world.pool.words()
    }

    /// Upgrade points available for purchases.
    #[must_use]
    pub fn points(world: &World) -> u32 {
        world.progression.points()
    }

    /// Reports whether the upgrade node was purchased during this run.
    #[must_use]
    pub fn owns(world: &World, node: &UpgradeNodeId) -> bool {
        world.progression.owns(node)
    }

    /// Reports whether the upgrade node can be bought right now.
    #[must_use]
    pub fn can_purchase(world: &World, node: &UpgradeNodeId) -> bool {
        world.progression.can_purchase(node)
    }

    /// Enemies defeated during the current run.
    #[must_use]
    pub fn kills(world: &World) -> u32 {
        world.kills
    }

    /// Score of the current run.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Immutable representation of a single enemy.
    #[derive(Clone, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Identifier of the enemy.
        pub id: EnemyId,
        /// Current position.
        pub position: Vec2,
        /// Word the enemy carries.
        pub word: String,
        /// Count of matched leading characters.
        pub typed: usize,
        /// Untyped remainder of the word.
        pub display_word: String,
        /// Health clamped into `0.0..=max_hp`.
        pub hp: f32,
        /// Current health ceiling.
        pub max_hp: f32,
        /// Health ceiling at spawn.
        pub base_max_hp: f32,
        /// Active status kinds in canonical order.
        pub statuses: Vec<StatusKind>,
        /// Movement multiplier implied by the statuses.
        pub speed_factor: f32,
    }

    impl EnemySnapshot {
        fn from_enemy(enemy: &Enemy) -> Self {
            Self {
                id: enemy.id,
                position: enemy.position,
                word: enemy.word.clone(),
                typed: enemy.typed,
                display_word: enemy.display_word(),
                hp: enemy.vitals.clamped_hp(),
                max_hp: enemy.vitals.max_hp,
                base_max_hp: enemy.vitals.base_max_hp,
                statuses: enemy.status.active_kinds(),
                speed_factor: enemy.status.speed_factor(),
            }
        }
    }

    /// Immutable representation of a single bullet.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BulletSnapshot {
        /// Identifier of the bullet.
        pub id: BulletId,
        /// Current position.
        pub position: Vec2,
        /// Displacement per step.
        pub velocity: Vec2,
        /// Current color.
        pub color: Rgb,
        /// Damage per hit.
        pub damage: f32,
        /// Remaining wall bounces.
        pub ricochet_count: i32,
    }

    /// Wave progress snapshot.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct WaveSnapshot {
        /// Wave in progress.
        pub wave: u32,
        /// Kills counted toward the wave.
        pub kills_this_wave: u32,
        /// Kills needed to clear the wave.
        pub kills_to_advance: u32,
        /// Difficulty tiers enemies draw words from.
        pub difficulties: Vec<DifficultyTier>,
    }
}
