use std::time::Duration;

use log::{debug, info};

use crate::input::InputSource;
use crate::render::{Frame, Renderer};
use crate::simulation::*;
use crate::timing::{FixedStep, TimeCounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    InProgress,
    Finished,
}

/// How the session spends wall time between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Measure real frame time and sleep out the remaining budget.
    Realtime,
    /// Pretend every frame lasted exactly one tick; never sleeps.
    Headless,
}

/// Single-threaded session loop: input, physics ticks, render, pace.
pub struct App<I, R> {
    sim: Simulation,
    input: I,
    renderer: R,
    stepper: FixedStep,
    pacing: Pacing,
    history: FlightHistory,
    frames: u64,
}

impl<I: InputSource, R: Renderer> App<I, R> {
    pub fn new(sim: Simulation, input: I, renderer: R) -> Self {
        let dt = sim.physics().dt();
        let history = FlightHistory::with_initial_state(sim.craft());
        Self {
            sim,
            input,
            renderer,
            stepper: FixedStep::new(dt),
            pacing: Pacing::Headless,
            history,
            frames: 0,
        }
    }

    pub fn with_stepper(self, stepper: FixedStep) -> Self {
        Self { stepper, ..self }
    }

    pub fn with_pacing(self, pacing: Pacing) -> Self {
        Self { pacing, ..self }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn history(&self) -> &FlightHistory {
        &self.history
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run one frame that lasted `elapsed`.
    pub fn frame(&mut self, elapsed: Duration) -> ExecutionStatus {
        let snapshot = self.input.poll(&self.sim);
        if snapshot.quit {
            info!("quit requested after {} frames", self.frames);
            return ExecutionStatus::Finished;
        }
        if snapshot.restart && self.sim.restart() {
            self.stepper.reset();
            self.history.append(0, self.sim.craft(), self.sim.state());
        }

        let ticks = self.stepper.advance(elapsed);
        for _ in 0..ticks {
            if let TickOutcome::Frozen = self.sim.step(&snapshot.controls) {
                break;
            }
            self.history
                .append(self.sim.tick_count(), self.sim.craft(), self.sim.state());
        }

        self.renderer.render(&Frame::capture(&self.sim));
        self.frames += 1;
        ExecutionStatus::InProgress
    }

    /// Run until quit, or until `max_frames` frames when given.
    pub fn run(&mut self, max_frames: Option<u64>) -> ExecutionStatus {
        let budget = self.stepper.dt();
        info!(
            "session started on level {} ({:?}, {:?} per tick)",
            self.sim.level_index(),
            self.pacing,
            budget
        );
        let mut elapsed = budget;
        loop {
            if max_frames.is_some_and(|max| self.frames >= max) {
                debug!("frame limit reached");
                return ExecutionStatus::InProgress;
            }
            let clock = TimeCounter::started();
            if let ExecutionStatus::Finished = self.frame(elapsed) {
                return ExecutionStatus::Finished;
            }
            elapsed = match self.pacing {
                Pacing::Headless => budget,
                Pacing::Realtime => {
                    let spent = clock.elapsed();
                    if let Some(rest) = budget.checked_sub(spent) {
                        std::thread::sleep(rest);
                    }
                    clock.elapsed()
                }
            };
        }
    }
}
