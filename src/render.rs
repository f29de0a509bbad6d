use log::info;

use crate::simulation::{FlightState, Segment, Simulation};

/// Scalar values shown on the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub fuel: f64,
    pub speed: f64,
    pub vertical_speed: f64,
    pub angle: f64,
    pub state: FlightState,
    pub level: usize,
    pub tick: u64,
}

/// Read-only view of one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub sim: &'a Simulation,
    pub wings: [Segment; 2],
    pub hud: Hud,
}

impl<'a> Frame<'a> {
    pub fn capture(sim: &'a Simulation) -> Self {
        let craft = sim.craft();
        Self {
            sim,
            wings: sim.classifier().wings(craft),
            hud: Hud {
                fuel: craft.fuel,
                speed: craft.speed(),
                vertical_speed: craft.velocity.y,
                angle: craft.angle,
                state: sim.state(),
                level: sim.level_index(),
                tick: sim.tick_count(),
            },
        }
    }

    pub fn terrain_segments(&self) -> impl Iterator<Item = Segment> + 'a {
        self.sim.terrain().segments()
    }
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Writes the HUD to the log every `every` frames and on state changes.
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_state: Option<FlightState>,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_state: None,
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        let Hud {
            fuel,
            speed,
            vertical_speed,
            angle,
            state,
            level,
            tick,
        } = frame.hud;
        let changed = self.last_state != Some(state);
        if changed || self.frames % self.every == 0 {
            info!(
                "tick {tick:>5} level {level} {state:?} fuel {fuel:6.2} speed {speed:6.2} vy {vertical_speed:6.2} angle {angle:7.2}"
            );
        }
        self.last_state = Some(state);
        self.frames += 1;
    }
}

/// Discards every frame.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _: &Frame<'_>) {}
}
