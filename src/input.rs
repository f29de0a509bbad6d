use std::collections::VecDeque;

use crate::simulation::{Controls, FlightState, Simulation};

/// Everything the session reads from the player for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub controls: Controls,
    /// One-shot; only honoured while crashed.
    pub restart: bool,
    /// One-shot; ends the session in any state.
    pub quit: bool,
}

impl InputSnapshot {
    pub fn with_controls(self, controls: Controls) -> Self {
        Self { controls, ..self }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

pub trait InputSource {
    /// Sample input for the coming frame. The simulation is read-only here.
    fn poll(&mut self, sim: &Simulation) -> InputSnapshot;
}

/// Replays a fixed list of snapshots, then asks to quit.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn repeat(snapshot: InputSnapshot, frames: usize) -> Self {
        Self::new(std::iter::repeat(snapshot).take(frames))
    }

    pub fn then(mut self, other: ScriptedInput) -> Self {
        self.frames.extend(other.frames);
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _: &Simulation) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_else(InputSnapshot::quit)
    }
}

mod defaults {
    pub const UPRIGHT: f64 = -90.;
    pub const ANGLE_TOLERANCE: f64 = 1.;
    pub const DESCENT_SPEED: f64 = 4.;
}

/// Points the engine up and burns whenever the descent gets faster than
/// `descent_speed`. Asks for a restart after a crash.
#[derive(Debug, Clone)]
pub struct Autopilot {
    descent_speed: f64,
    angle_tolerance: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            descent_speed: defaults::DESCENT_SPEED,
            angle_tolerance: defaults::ANGLE_TOLERANCE,
        }
    }
}

impl Autopilot {
    pub fn with_descent_speed(self, descent_speed: f64) -> Self {
        Self {
            descent_speed,
            ..self
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, sim: &Simulation) -> InputSnapshot {
        if sim.state() == FlightState::Crashed {
            return InputSnapshot::restart();
        }
        let craft = sim.craft();
        let error = angle_error(craft.angle, defaults::UPRIGHT);
        let upright = error.abs() <= self.angle_tolerance;

        let controls = Controls::idle()
            .with_rotate_left(error > self.angle_tolerance)
            .with_rotate_right(error < -self.angle_tolerance)
            .with_thrust(upright && !craft.resting && craft.velocity.y > self.descent_speed);
        InputSnapshot::default().with_controls(controls)
    }
}

/// Signed difference `angle - target` wrapped into [-180, 180).
fn angle_error(angle: f64, target: f64) -> f64 {
    (angle - target + 180.).rem_euclid(360.) - 180.
}
