use serde::Serialize;

use super::Vec2;

mod defaults {
    pub const X: f64 = 160.;
    pub const Y: f64 = 120.;
    pub const MASS: f64 = 1.;
    pub const MAX_THRUST: f64 = 20.;
    pub const DRAG: f64 = 0.01;
    pub const FUEL: f64 = 20.;
    pub const FUEL_CONSUMPTION: f64 = 1.;
    pub const SIZE: f64 = 10.;
    pub const ROTATION_RATE: f64 = 90.;
}

/// Logical control signals sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

impl Controls {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_rotate_left(self, rotate_left: bool) -> Self {
        Self {
            rotate_left,
            ..self
        }
    }

    pub fn with_rotate_right(self, rotate_right: bool) -> Self {
        Self {
            rotate_right,
            ..self
        }
    }

    pub fn with_thrust(self, thrust: bool) -> Self {
        Self { thrust, ..self }
    }
}

/// Kinematic and physical state of the rocket.
///
/// Angles are in degrees: 0 points along +x and the angle grows toward +y
/// (screen down). The angle is never normalized.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Craft {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Recomputed every tick, not integrated.
    pub acceleration: Vec2,
    pub angle: f64,
    pub angular_velocity: f64,
    pub rotation_rate: f64,
    pub mass: f64,
    pub max_thrust: f64,
    pub throttle: f64,
    pub drag_coefficient: f64,
    pub fuel: f64,
    pub fuel_consumption: f64,
    /// Wing half-length, used for drawing and for collision.
    pub size: f64,
    /// Set after a safe touchdown until the craft lifts off again.
    pub resting: bool,
}

impl Default for Craft {
    fn default() -> Self {
        Self {
            position: Vec2::new(defaults::X, defaults::Y),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            angle: 0.,
            angular_velocity: 0.,
            rotation_rate: defaults::ROTATION_RATE,
            mass: defaults::MASS,
            max_thrust: defaults::MAX_THRUST,
            throttle: 0.,
            drag_coefficient: defaults::DRAG,
            fuel: defaults::FUEL,
            fuel_consumption: defaults::FUEL_CONSUMPTION,
            size: defaults::SIZE,
            resting: false,
        }
    }
}

impl Craft {
    pub fn with_position(self, x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..self
        }
    }

    pub fn with_velocity(self, vx: f64, vy: f64) -> Self {
        Self {
            velocity: Vec2::new(vx, vy),
            ..self
        }
    }

    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    pub fn with_rotation_rate(self, rotation_rate: f64) -> Self {
        Self {
            rotation_rate,
            ..self
        }
    }

    pub fn with_mass(self, mass: f64) -> Self {
        assert!(mass > 0.);
        Self { mass, ..self }
    }

    pub fn with_max_thrust(self, max_thrust: f64) -> Self {
        Self { max_thrust, ..self }
    }

    pub fn with_drag_coefficient(self, drag_coefficient: f64) -> Self {
        Self {
            drag_coefficient,
            ..self
        }
    }

    pub fn with_fuel(self, fuel: f64) -> Self {
        Self { fuel, ..self }
    }

    pub fn with_fuel_consumption(self, fuel_consumption: f64) -> Self {
        Self {
            fuel_consumption,
            ..self
        }
    }

    pub fn with_size(self, size: f64) -> Self {
        Self { size, ..self }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Snap angular velocity and throttle to the requested controls.
    ///
    /// Rotate-left wins over rotate-right; thrust needs fuel.
    pub fn apply_controls(&mut self, controls: &Controls) {
        self.angular_velocity = if controls.rotate_left {
            -self.rotation_rate
        } else if controls.rotate_right {
            self.rotation_rate
        } else {
            0.
        };
        self.throttle = if controls.thrust && self.fuel > 0. {
            1.
        } else {
            0.
        };
    }

    /// Burn fuel for `dt` seconds at the current throttle.
    pub fn consume_fuel(&mut self, dt: f64) {
        self.fuel -= self.fuel_consumption * self.throttle * dt;
        if self.fuel <= 0. {
            self.fuel = 0.;
            self.throttle = 0.;
        }
    }
}
