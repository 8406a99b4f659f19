//! Level/session controller
//!
//! Owns the body, the current level, the clock, and the outcome. Everything
//! mutable lives on this object and is passed into each tick - no
//! process-wide state anywhere in the crate.

use glam::Vec2;

use crate::consts::BODY_RADIUS;
use crate::level::{Level, LevelProvider};
use crate::persistence::KvStore;
use crate::records::{Records, format_seconds};
use crate::sim::{Body, SampleLayout, TickInput, step};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No game started yet.
    Uninitialized,
    /// A level is loaded and ticks advance the body.
    Running,
    /// The player quit; a loss outcome is available.
    Failed,
    /// Every level was traversed; a win outcome is available.
    Completed,
}

/// Host-visible happenings from a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Fell out of the level; respawned at the current level's spawn.
    Died,
    /// Crossed into the given level number.
    LevelAdvanced(u32),
    /// No more levels; the run is complete.
    Won,
    /// The player quit to the loss state.
    Quit,
    /// Recovered from inescapable geometry by respawning.
    Respawned,
}

/// Per-tick report for the host: redraw hint plus an optional event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub changed: bool,
    pub event: Option<TickEvent>,
}

/// Structured end-of-run signal for the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A free-text prompt, e.g. "Retry?".
    Loss { prompt: String },
    /// Ordered label/value lines: elapsed time, fastest time, deaths.
    Win { lines: Vec<(String, String)> },
}

/// The session: one body, one level, one clock.
pub struct Session {
    phase: SessionPhase,
    provider: Box<dyn LevelProvider>,
    store: Box<dyn KvStore>,
    records: Records,
    level: Option<Level>,
    body: Option<Body>,
    layout: SampleLayout,
    level_number: u32,
    elapsed_secs: f64,
    deaths: u32,
    outcome: Option<Outcome>,
}

impl Session {
    /// Build a session and read the persisted records once.
    pub fn new(provider: Box<dyn LevelProvider>, store: Box<dyn KvStore>) -> Self {
        let records = Records::load(store.as_ref());
        Self {
            phase: SessionPhase::Uninitialized,
            provider,
            store,
            records,
            level: None,
            body: None,
            layout: SampleLayout::default(),
            level_number: 1,
            elapsed_secs: 0.0,
            deaths: 0,
            outcome: None,
        }
    }

    /// Choose the probe layout for bodies spawned from now on. The default
    /// is the 8-point layout; the 4-point one trades contact fidelity for
    /// cheaper oracle queries.
    pub fn set_sample_layout(&mut self, layout: SampleLayout) {
        self.layout = layout;
    }

    /// Reset the session counters and load level 1.
    pub fn new_game(&mut self) {
        self.elapsed_secs = 0.0;
        self.deaths = 0;
        self.outcome = None;
        self.load_level(1);
    }

    /// Reload the current level. The clock, death counter, and level number
    /// are left alone.
    pub fn restart_level(&mut self) {
        self.load_level(self.level_number);
    }

    /// Advance the session by one frame.
    ///
    /// A no-op outside the `Running` phase; leaving that phase is how the
    /// host knows to stop scheduling frames. Never panics and never lets an
    /// error escape - every fault lands in a defined next state.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TickReport {
        if self.phase != SessionPhase::Running {
            return TickReport::default();
        }

        if input.quit {
            log::info!("quit after {}", format_seconds(self.elapsed_secs));
            self.outcome = Some(Outcome::Loss {
                prompt: "Retry?".to_owned(),
            });
            self.phase = SessionPhase::Failed;
            return TickReport {
                changed: true,
                event: Some(TickEvent::Quit),
            };
        }

        if input.restart {
            self.restart_level();
            return TickReport {
                changed: true,
                event: None,
            };
        }

        self.elapsed_secs += f64::from(dt);

        let step_result = {
            let Some(level) = self.level.as_ref() else {
                return TickReport::default();
            };
            let Some(body) = self.body.as_mut() else {
                return TickReport::default();
            };
            step(body, level.geometry.as_ref(), &level.bounds, input, dt)
        };

        match step_result {
            Ok(outcome) => {
                if outcome.fell {
                    self.deaths += 1;
                    log::info!("fell out of level {} (death #{})", self.level_number, self.deaths);
                    self.respawn();
                    return TickReport {
                        changed: true,
                        event: Some(TickEvent::Died),
                    };
                }
                if outcome.crossed {
                    let next = self.level_number + 1;
                    self.load_level(next);
                    let event = if self.phase == SessionPhase::Completed {
                        TickEvent::Won
                    } else {
                        TickEvent::LevelAdvanced(next)
                    };
                    return TickReport {
                        changed: true,
                        event: Some(event),
                    };
                }
                TickReport {
                    changed: outcome.changed,
                    event: None,
                }
            }
            Err(err) => {
                log::error!("collision resolution failed: {err}; respawning");
                self.respawn();
                TickReport {
                    changed: true,
                    event: Some(TickEvent::Respawned),
                }
            }
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn best_time(&self) -> Option<f64> {
        self.records.best_time
    }

    /// Swap in a level by number, or finish the run when it does not exist.
    fn load_level(&mut self, number: u32) {
        match self.provider.load(number) {
            Some(level) => {
                log::info!("level {number} loaded");
                self.body = Some(Self::spawned_body(&level, self.layout));
                self.level = Some(level);
                self.level_number = number;
                self.phase = SessionPhase::Running;
            }
            None => self.win(),
        }
    }

    /// A fresh body resting just above the level's spawn marker.
    fn spawned_body(level: &Level, layout: SampleLayout) -> Body {
        let center = Vec2::new(level.spawn.x, level.spawn.y - BODY_RADIUS);
        Body::new(center, BODY_RADIUS, layout)
    }

    /// Recreate the body at the current level's spawn.
    fn respawn(&mut self) {
        if let Some(level) = self.level.as_ref() {
            self.body = Some(Self::spawned_body(level, self.layout));
        }
    }

    /// All levels traversed: fold the time into the records (persisted
    /// before the outcome is surfaced) and build the summary lines.
    fn win(&mut self) {
        let best = self
            .records
            .record_win(self.elapsed_secs, self.store.as_mut());
        log::info!("run complete in {}", format_seconds(self.elapsed_secs));
        self.outcome = Some(Outcome::Win {
            lines: vec![
                ("Time".to_owned(), format_seconds(self.elapsed_secs)),
                ("Fastest Time".to_owned(), format_seconds(best)),
                ("Deaths".to_owned(), self.deaths.to_string()),
            ],
        });
        self.phase = SessionPhase::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Level, LevelBounds, Region};
    use crate::persistence::MemoryStore;

    /// Flat floor whose top spans the whole level.
    struct Floor {
        top: f32,
    }

    impl Region for Floor {
        fn contains(&self, point: Vec2) -> bool {
            point.y >= self.top
        }
    }

    /// No terrain: everything is air.
    struct Void;

    impl Region for Void {
        fn contains(&self, _point: Vec2) -> bool {
            false
        }
    }

    /// Terrain everywhere: a malformed level.
    struct Solid;

    impl Region for Solid {
        fn contains(&self, _point: Vec2) -> bool {
            true
        }
    }

    enum Terrain {
        Floor,
        Void,
        Solid,
    }

    /// `count` copies of one terrain shape, then no more levels.
    struct TestLevels {
        count: u32,
        terrain: Terrain,
        spawn: Vec2,
    }

    impl LevelProvider for TestLevels {
        fn load(&self, number: u32) -> Option<Level> {
            if number > self.count {
                return None;
            }
            let geometry: Box<dyn Region> = match self.terrain {
                Terrain::Floor => Box::new(Floor { top: 1000.0 }),
                Terrain::Void => Box::new(Void),
                Terrain::Solid => Box::new(Solid),
            };
            Some(Level {
                geometry,
                spawn: self.spawn,
                bounds: LevelBounds::default(),
            })
        }
    }

    fn floor_session(levels: u32) -> Session {
        Session::new(
            Box::new(TestLevels {
                count: levels,
                terrain: Terrain::Floor,
                spawn: Vec2::new(200.0, 1000.0),
            }),
            Box::new(MemoryStore::new()),
        )
    }

    const DT: f32 = 1.0 / 60.0;

    fn run_until<F: Fn(&TickReport) -> bool>(
        session: &mut Session,
        input: &TickInput,
        max_ticks: usize,
        stop: F,
    ) -> bool {
        for _ in 0..max_ticks {
            let report = session.tick(input, DT);
            if stop(&report) {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_new_game_then_restart_keeps_the_level_and_clock() {
        let mut session = floor_session(3);
        session.new_game();
        session.restart_level();
        assert_eq!(session.level_number(), 1);
        assert_eq!(session.elapsed_secs(), 0.0);
        assert_eq!(session.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_clock_accumulates_tick_deltas() {
        let mut session = floor_session(1);
        session.new_game();
        session.tick(&TickInput::default(), 0.5);
        session.tick(&TickInput::default(), 0.25);
        assert!((session.elapsed_secs() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_spawn_sits_just_above_the_marker() {
        let mut session = floor_session(1);
        session.new_game();
        let body = session.body().unwrap();
        assert_eq!(body.pose.center, Vec2::new(200.0, 1000.0 - BODY_RADIUS));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_running_right_traverses_every_level_and_wins() {
        let mut session = floor_session(2);
        session.new_game();
        let input = TickInput {
            right: true,
            ..TickInput::default()
        };

        assert!(run_until(&mut session, &input, 2000, |r| {
            r.event == Some(TickEvent::LevelAdvanced(2))
        }));
        assert_eq!(session.level_number(), 2);

        assert!(run_until(&mut session, &input, 2000, |r| {
            r.event == Some(TickEvent::Won)
        }));
        assert_eq!(session.phase(), SessionPhase::Completed);
        let Some(Outcome::Win { lines }) = session.outcome() else {
            panic!("expected a win outcome");
        };
        assert_eq!(lines[0].0, "Time");
        assert_eq!(lines[1].0, "Fastest Time");
        assert_eq!(lines[2], ("Deaths".to_owned(), "0".to_owned()));
    }

    #[test]
    fn test_best_time_is_the_running_minimum_across_wins() {
        let mut session = floor_session(1);
        let input = TickInput {
            right: true,
            ..TickInput::default()
        };

        session.new_game();
        assert!(run_until(&mut session, &input, 2000, |r| {
            r.event == Some(TickEvent::Won)
        }));
        let first = session.best_time().unwrap();
        assert!((first - session.elapsed_secs()).abs() < 1e-9);

        // A slower second run must not displace the record. Waste time
        // standing still first.
        session.new_game();
        for _ in 0..120 {
            session.tick(&TickInput::default(), DT);
        }
        assert!(run_until(&mut session, &input, 2000, |r| {
            r.event == Some(TickEvent::Won)
        }));
        assert_eq!(session.best_time(), Some(first));
    }

    #[test]
    fn test_falling_out_costs_a_death_and_respawns() {
        let mut session = Session::new(
            Box::new(TestLevels {
                count: 1,
                terrain: Terrain::Void,
                spawn: Vec2::new(200.0, 1000.0),
            }),
            Box::new(MemoryStore::new()),
        );
        session.new_game();

        assert!(run_until(
            &mut session,
            &TickInput::default(),
            2000,
            |r| r.event == Some(TickEvent::Died)
        ));
        assert_eq!(session.deaths(), 1);
        assert_eq!(session.phase(), SessionPhase::Running);
        let body = session.body().unwrap();
        assert_eq!(body.pose.center, Vec2::new(200.0, 1000.0 - BODY_RADIUS));
    }

    #[test]
    fn test_quit_surfaces_a_loss_and_stops_ticking() {
        let mut session = floor_session(1);
        session.new_game();
        let quit = TickInput {
            quit: true,
            ..TickInput::default()
        };
        let report = session.tick(&quit, DT);
        assert_eq!(report.event, Some(TickEvent::Quit));
        assert_eq!(session.phase(), SessionPhase::Failed);
        assert_eq!(
            session.outcome(),
            Some(&Outcome::Loss {
                prompt: "Retry?".to_owned()
            })
        );

        // Ticks after leaving Running are no-ops.
        let elapsed = session.elapsed_secs();
        let report = session.tick(&TickInput::default(), DT);
        assert_eq!(report, TickReport::default());
        assert_eq!(session.elapsed_secs(), elapsed);
    }

    #[test]
    fn test_buried_spawn_recovers_by_respawning() {
        let mut session = Session::new(
            Box::new(TestLevels {
                count: 1,
                terrain: Terrain::Solid,
                spawn: Vec2::new(200.0, 1000.0),
            }),
            Box::new(MemoryStore::new()),
        );
        session.new_game();
        let report = session.tick(&TickInput::default(), DT);
        assert_eq!(report.event, Some(TickEvent::Respawned));
        // Not a player death, and the loop keeps going.
        assert_eq!(session.deaths(), 0);
        assert_eq!(session.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_restart_key_reloads_without_touching_counters() {
        let mut session = floor_session(2);
        session.new_game();
        for _ in 0..30 {
            session.tick(&TickInput::default(), DT);
        }
        let elapsed = session.elapsed_secs();
        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        let report = session.tick(&restart, DT);
        assert!(report.changed);
        assert_eq!(session.level_number(), 1);
        assert_eq!(session.elapsed_secs(), elapsed);
        assert_eq!(session.body().unwrap().velocity, Vec2::ZERO);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_best_time_round_trips_through_the_file_store() {
        use crate::persistence::FileStore;

        let path = std::env::temp_dir().join(format!(
            "glissade-records-{}-roundtrip.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let provider = || {
            Box::new(TestLevels {
                count: 1,
                terrain: Terrain::Floor,
                spawn: Vec2::new(200.0, 1000.0),
            })
        };
        let input = TickInput {
            right: true,
            ..TickInput::default()
        };

        let mut session = Session::new(provider(), Box::new(FileStore::open(&path)));
        session.new_game();
        assert!(run_until(&mut session, &input, 2000, |r| {
            r.event == Some(TickEvent::Won)
        }));
        let written = session.best_time().unwrap();
        drop(session);

        let reloaded = Session::new(provider(), Box::new(FileStore::open(&path)));
        assert_eq!(reloaded.best_time(), Some(written));
        let _ = std::fs::remove_file(&path);
    }
}
