//! Glissade entry point
//!
//! A headless scripted run through the bundled demo levels: hold right,
//! climb the step, cross both levels, print the outcome. The demo supplies
//! what a real host would - polygon terrain implementing the geometry
//! oracle, a file-backed record store, key events, and frame timestamps.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use glissade::consts::TARGET_FPS;
    use glissade::input::{InputState, Key};
    use glissade::level::{Level, LevelBounds, LevelProvider, Region};
    use glissade::persistence::FileStore;
    use glissade::platform::{self, FramePacer};
    use glissade::session::{Session, SessionPhase, TickEvent};
    use glissade::Outcome;

    /// Closed polygon terrain with even-odd containment.
    #[derive(Debug, Clone)]
    struct PolygonRegion {
        vertices: Vec<Vec2>,
    }

    impl Region for PolygonRegion {
        fn contains(&self, point: Vec2) -> bool {
            let mut inside = false;
            let mut j = self.vertices.len() - 1;
            for i in 0..self.vertices.len() {
                let (a, b) = (self.vertices[i], self.vertices[j]);
                if (a.y > point.y) != (b.y > point.y)
                    && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
                {
                    inside = !inside;
                }
                j = i;
            }
            inside
        }
    }

    struct DemoLevels;

    impl LevelProvider for DemoLevels {
        fn load(&self, number: u32) -> Option<Level> {
            let (vertices, spawn) = match number {
                // A flat run all the way past the right edge.
                1 => (
                    vec![
                        Vec2::new(-100.0, 1000.0),
                        Vec2::new(2100.0, 1000.0),
                        Vec2::new(2100.0, 1300.0),
                        Vec2::new(-100.0, 1300.0),
                    ],
                    Vec2::new(200.0, 1000.0),
                ),
                // Same floor with a step to climb mid-way.
                2 => (
                    vec![
                        Vec2::new(-100.0, 1100.0),
                        Vec2::new(800.0, 1100.0),
                        Vec2::new(800.0, 900.0),
                        Vec2::new(1000.0, 900.0),
                        Vec2::new(1000.0, 1100.0),
                        Vec2::new(2100.0, 1100.0),
                        Vec2::new(2100.0, 1300.0),
                        Vec2::new(-100.0, 1300.0),
                    ],
                    Vec2::new(200.0, 1100.0),
                ),
                _ => return None,
            };
            Some(Level {
                geometry: Box::new(PolygonRegion { vertices }),
                spawn,
                bounds: LevelBounds::default(),
            })
        }
    }

    pub fn run() {
        platform::init_logging();

        let store = FileStore::open("glissade-records.json");
        let mut session = Session::new(Box::new(DemoLevels), Box::new(store));
        session.new_game();

        let mut input = InputState::new();
        input.press(Key::from_name("ArrowRight").expect("known key"));

        // Host "frames" arrive at ~125 Hz; the pacer coalesces the excess
        // down to the target rate.
        let mut pacer = FramePacer::new(TARGET_FPS);
        pacer.reset(0.0);
        let mut now_ms = 0.0;

        // Two simulated minutes, far more than the run needs.
        while session.phase() == SessionPhase::Running && now_ms < 120_000.0 {
            now_ms += 8.0;
            let Some(dt) = pacer.admit(now_ms) else {
                continue;
            };
            let report = session.tick(&input.take_tick_input(), dt);
            if let Some(event) = report.event {
                match event {
                    TickEvent::LevelAdvanced(number) => log::info!("entered level {number}"),
                    TickEvent::Died => log::info!("fell out, respawning"),
                    other => log::debug!("{other:?}"),
                }
            }
        }

        match session.outcome() {
            Some(Outcome::Win { lines }) => {
                println!("Run complete:");
                for (label, value) in lines {
                    println!("  {label}: {value}");
                }
            }
            Some(Outcome::Loss { prompt }) => println!("Run ended: {prompt}"),
            None => println!("Run still going after the scripted window"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven by the host page through the library crate.
}
