use super::{Controls, Craft, Vec2};

mod defaults {
    pub const G: f64 = 9.82;
    pub const TICK_RATE: f64 = 60.;
    pub const DT: f64 = 1. / TICK_RATE;
}

/// Session-wide constants. Positive gravity pulls toward +y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct World {
    pub gravity: f64,
}

impl Default for World {
    fn default() -> Self {
        Self {
            gravity: defaults::G,
        }
    }
}

impl World {
    pub fn with_gravity(self, gravity: f64) -> Self {
        Self { gravity }
    }
}

/// Fixed-timestep semi-implicit Euler integrator.
#[derive(Clone, Debug)]
pub struct Physics {
    world: World,
    dt: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            world: World::default(),
            dt: defaults::DT,
        }
    }
}

impl Physics {
    pub fn with_world(self, world: World) -> Self {
        Self { world, ..self }
    }

    pub fn with_g(self, g: f64) -> Self {
        Self {
            world: self.world.with_gravity(g),
            ..self
        }
    }

    pub fn with_dt(self, dt: f64) -> Self {
        assert!(dt > 0.);
        Self { dt, ..self }
    }

    pub fn world(&self) -> World {
        self.world
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn iterate(&self, mut craft: Craft, controls: &Controls) -> Craft {
        craft.apply_controls(controls);

        // no angular inertia: the rate is snapped from input
        craft.angle += craft.angular_velocity * self.dt;

        let thrust = Vec2::from_angle(craft.angle) * (craft.max_thrust * craft.throttle);
        let drag = drag(craft.velocity, craft.drag_coefficient);
        craft.acceleration = (thrust - drag) * (1. / craft.mass);
        craft.acceleration.y += self.world.gravity;

        // velocity first, then position with the updated velocity
        craft.velocity = craft.velocity + craft.acceleration * self.dt;
        craft.position = craft.position + craft.velocity * self.dt;

        craft.consume_fuel(self.dt);
        craft
    }
}

/// Quadratic drag force, applied to each axis on its own.
pub fn drag(velocity: Vec2, coefficient: f64) -> Vec2 {
    Vec2::new(
        coefficient * velocity.x * velocity.x.abs(),
        coefficient * velocity.y * velocity.y.abs(),
    )
}
