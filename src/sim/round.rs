//! Round controller
//!
//! Owns the world for the lifetime of a round and drives the frame cycle:
//! step → resolve → end check → present. The host calls [`RoundController::run_frame`]
//! once per display refresh and stops scheduling frames when it returns false.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::config::RoundConfig;
use super::entity::Direction;
use super::snapshot::{FrameSnapshot, StatusReadout};
use super::state::{EliminationCause, GameEvent, RoundPhase, WorldState};
use super::tick;

/// Input surface: everything the host can ask of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Lobby → Running
    Start,
    /// Rebuild the world and keep (or resume) running
    Reset,
    /// Stop/resume storm shrinking
    ToggleStorm,
    /// Drop an extra weapon pickup into the arena
    SpawnPickup,
    Move(Direction),
    Shoot,
}

/// Result of one frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: u64,
    pub events: Vec<GameEvent>,
    pub phase: RoundPhase,
}

impl FrameReport {
    /// Whether the host should schedule another frame
    pub fn keep_running(&self) -> bool {
        self.phase.is_running()
    }
}

pub struct RoundController {
    config: RoundConfig,
    phase: RoundPhase,
    world: WorldState,
    /// Seeds each rebuilt world
    seeds: Pcg32,
    frame: u64,
}

impl RoundController {
    pub fn new(config: RoundConfig, seed: u64) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let world = WorldState::empty(&config, seeds.random());
        Self {
            config,
            phase: RoundPhase::Lobby,
            world,
            seeds,
            frame: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Direct world access for hosts and tests that stage scenarios
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply one input command immediately (between frames).
    /// Returns events caused by the command, e.g. a storm elimination on move.
    pub fn apply(&mut self, command: Command) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match (command, self.phase) {
            (Command::Start, RoundPhase::Lobby) => {
                self.rebuild();
                self.phase = RoundPhase::Running;
                log::info!("Round started with {} agents", self.world.agents.len());
            }
            (Command::Start, _) => log::debug!("Start ignored: round already begun"),
            (_, RoundPhase::Lobby) => log::debug!("{:?} ignored in lobby", command),

            (Command::Reset, _) => {
                self.rebuild();
                self.phase = RoundPhase::Running;
                log::info!("Round reset");
            }
            (Command::ToggleStorm, _) => {
                let shrinking = self.world.storm.toggle();
                log::info!("Storm shrinking: {}", shrinking);
            }
            (Command::SpawnPickup, _) => {
                let pos = self.world.spawn_pickup();
                log::debug!("Spawned pickup at ({:.0}, {:.0})", pos.x, pos.y);
            }

            (Command::Move(direction), RoundPhase::Running) => {
                let WorldState {
                    arena,
                    agents,
                    storm,
                    ..
                } = &mut self.world;
                if let Some(human) = agents.iter_mut().find(|a| a.is_human())
                    && human.move_in(direction, *arena, storm)
                {
                    log::debug!("Agent {} eliminated by the storm", human.id);
                    events.push(GameEvent::Eliminated {
                        id: human.id,
                        cause: EliminationCause::Storm,
                    });
                }
            }
            (Command::Shoot, RoundPhase::Running) => {
                if let Some(shot) = self.world.human().and_then(|h| h.shoot()) {
                    events.push(GameEvent::ShotFired { owner: shot.owner });
                    self.world.projectiles.push(shot);
                }
            }
            (Command::Move(_) | Command::Shoot, _) => {}
        }
        events
    }

    /// Advance one frame. No-op unless running.
    pub fn tick(&mut self) -> FrameReport {
        let mut events = Vec::new();
        if !self.phase.is_running() {
            return FrameReport {
                frame: self.frame,
                events,
                phase: self.phase,
            };
        }

        tick::advance(&mut self.world, &self.config, &mut events);
        collision::resolve(&mut self.world, &self.config, &mut events);
        self.frame += 1;

        if self.world.alive_count() <= 1 {
            let winner = self.world.first_survivor().map(|a| a.id);
            self.phase = RoundPhase::Ended { winner };
            match winner {
                Some(id) => log::info!("Player {} wins after {} frames", id, self.frame),
                None => log::info!("No survivors after {} frames", self.frame),
            }
        }

        FrameReport {
            frame: self.frame,
            events,
            phase: self.phase,
        }
    }

    /// One full frame cycle including the presentation callback.
    /// Returns whether the host should schedule the next frame.
    pub fn run_frame(&mut self, present: impl FnOnce(&FrameSnapshot, &StatusReadout)) -> bool {
        let report = self.tick();
        present(&self.snapshot(), &self.status());
        report.keep_running()
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.world, self.phase)
    }

    pub fn status(&self) -> StatusReadout {
        StatusReadout::capture(&self.world, self.phase)
    }

    /// Fresh world; the storm toggle survives rebuilds
    fn rebuild(&mut self) {
        let shrink_rate = self.world.storm.shrink_rate;
        self.world = WorldState::new(&self.config, self.seeds.random());
        self.world.storm.shrink_rate = shrink_rate;
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::entity::WeaponKind;

    fn running(config: RoundConfig) -> RoundController {
        let mut round = RoundController::new(config, 99);
        round.apply(Command::Start);
        round
    }

    #[test]
    fn test_lobby_ignores_everything_but_start() {
        let mut round = RoundController::new(RoundConfig::default(), 1);
        round.apply(Command::Reset);
        round.apply(Command::SpawnPickup);
        round.apply(Command::Move(Direction::Up));
        assert_eq!(round.phase(), RoundPhase::Lobby);
        assert!(round.world().agents.is_empty());
        assert!(round.world().pickups.is_empty());

        let report = round.tick();
        assert!(!report.keep_running());
        assert_eq!(round.frame(), 0);

        round.apply(Command::Start);
        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.world().alive_count(), 10);
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut round = running(RoundConfig::default());
        round.tick();
        round.apply(Command::Start);
        assert_eq!(round.frame(), 1);
    }

    #[test]
    fn test_reset_rebuilds_mid_round() {
        let mut round = running(RoundConfig::default());
        for _ in 0..10 {
            round.tick();
        }
        round.world_mut().pickups[0].claimed = true;
        round.apply(Command::Reset);

        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.frame(), 0);
        assert_eq!(round.world().storm.radius, 500.0);
        assert!(round.world().pickups.iter().all(|p| !p.claimed));
        assert!(round.world().projectiles.is_empty());
    }

    #[test]
    fn test_storm_toggle_survives_reset() {
        let mut round = running(RoundConfig::default());
        round.apply(Command::ToggleStorm);
        round.apply(Command::Reset);
        assert_eq!(round.world().storm.shrink_rate, 0.0);
        round.tick();
        assert_eq!(round.world().storm.radius, 500.0);
    }

    #[test]
    fn test_shoot_needs_weapon() {
        let mut round = running(RoundConfig::default());
        assert!(round.apply(Command::Shoot).is_empty());
        assert!(round.world().projectiles.is_empty());

        round.world_mut().agents[0].weapon = Some(WeaponKind::Rifle);
        let events = round.apply(Command::Shoot);
        assert_eq!(events, vec![GameEvent::ShotFired { owner: 0 }]);
        assert_eq!(round.world().projectiles.len(), 1);
    }

    #[test]
    fn test_spawn_pickup_grows_collection() {
        let mut round = running(RoundConfig::default());
        round.apply(Command::SpawnPickup);
        assert_eq!(round.world().pickups.len(), 6);
    }

    #[test]
    fn test_last_agent_standing_wins() {
        let config = RoundConfig {
            autonomous_fire_chance: 0.0,
            ..Default::default()
        };
        let mut round = running(config);
        for agent in round.world_mut().agents.iter_mut().skip(1) {
            if agent.id != 6 {
                agent.take_damage(100);
            }
        }
        round.world_mut().agents[0].take_damage(100);

        let report = round.tick();
        assert_eq!(report.phase, RoundPhase::Ended { winner: Some(6) });
        assert!(!report.keep_running());

        // Ended rounds no longer advance
        let radius = round.world().storm.radius;
        round.tick();
        assert_eq!(round.world().storm.radius, radius);
    }

    #[test]
    fn test_everyone_out_means_no_winner() {
        let mut round = running(RoundConfig::default());
        for agent in round.world_mut().agents.iter_mut() {
            agent.take_damage(100);
        }
        let report = round.tick();
        assert_eq!(report.phase, RoundPhase::Ended { winner: None });
        assert_eq!(round.status().banner().as_deref(), Some("No survivors"));
    }

    #[test]
    fn test_reset_after_end_runs_again() {
        let mut round = running(RoundConfig::default());
        for agent in round.world_mut().agents.iter_mut() {
            agent.take_damage(100);
        }
        round.tick();
        round.apply(Command::Reset);
        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.world().alive_count(), 10);
    }

    #[test]
    fn test_run_frame_presents_and_reports() {
        let mut round = running(RoundConfig::default());
        let mut seen = None;
        let keep = round.run_frame(|frame, status| {
            seen = Some((frame.sprites.len(), status.alive));
        });
        assert!(keep);
        let (sprites, alive) = seen.unwrap();
        assert!(sprites >= alive);
    }

    #[test]
    fn test_move_outside_storm_reports_elimination() {
        let config = RoundConfig {
            hazard_start_radius: 50.0,
            ..Default::default()
        };
        let mut round = running(config);
        let human = &mut round.world_mut().agents[0];
        human.pos = Vec2::new(30.0, 30.0);
        human.health = 1;

        let events = round.apply(Command::Move(Direction::Right));
        assert_eq!(events.len(), 1);
        assert!(!round.world().agents[0].alive);
    }
}
