use log::debug;

use super::{segments_intersect, Craft, Segment, Terrain, Vec2};

mod defaults {
    pub const WING_SPREAD: f64 = 33.;
    pub const LANDING_THRESHOLD: f64 = 10.;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Landing {
    Correct,
    TooFastVertical { error_abs: f64, error_rel: f64 },
}

/// What the classifier did with the craft this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Contact {
    Airborne,
    /// Already down; held at ground height.
    Resting,
    Landed(Landing),
}

/// The two wing segments of the "V" silhouette.
///
/// Both wings share an origin placed half a size behind `position` along the
/// bisector; tips sit `size` away along `angle` and `angle + wing_spread`.
pub fn wing_segments(position: Vec2, angle: f64, size: f64, wing_spread: f64) -> [Segment; 2] {
    let origin = position - Vec2::from_angle(angle + wing_spread / 2.) * (size / 2.);
    [
        (origin, origin + Vec2::from_angle(angle) * size),
        (origin, origin + Vec2::from_angle(angle + wing_spread) * size),
    ]
}

#[derive(Debug, Clone)]
pub struct Classifier {
    wing_spread: f64,
    landing_threshold: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            wing_spread: defaults::WING_SPREAD,
            landing_threshold: defaults::LANDING_THRESHOLD,
        }
    }
}

impl Classifier {
    pub fn with_wing_spread(self, wing_spread: f64) -> Self {
        Self {
            wing_spread,
            ..self
        }
    }

    pub fn with_landing_threshold(self, landing_threshold: f64) -> Self {
        assert!(landing_threshold > 0.);
        Self {
            landing_threshold,
            ..self
        }
    }

    pub fn landing_threshold(&self) -> f64 {
        self.landing_threshold
    }

    pub fn wings(&self, craft: &Craft) -> [Segment; 2] {
        wing_segments(craft.position, craft.angle, craft.size, self.wing_spread)
    }

    /// True when either wing touches a terrain segment.
    pub fn touches(&self, terrain: &Terrain, craft: &Craft) -> bool {
        let wings = self.wings(craft);
        let (min_x, max_x) = wings
            .iter()
            .flat_map(|(a, b)| [a.x, b.x])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });

        terrain
            .segments_spanning(min_x, max_x)
            .any(|(c, d)| wings.iter().any(|&(a, b)| segments_intersect(a, b, c, d)))
    }

    pub fn classify(&self, vertical_speed: f64) -> Landing {
        let speed = vertical_speed.abs();
        if speed <= self.landing_threshold {
            Landing::Correct
        } else {
            let error_abs = speed - self.landing_threshold;
            Landing::TooFastVertical {
                error_abs,
                error_rel: error_abs / self.landing_threshold,
            }
        }
    }

    /// Resolve contact for the freshly integrated craft.
    ///
    /// A safe contact puts the craft at `ground - size`, zeroes the vertical
    /// velocity only and marks it resting. A resting craft follows that height
    /// along the ground until it climbs above it under its own thrust.
    /// Crashes leave the craft untouched.
    pub fn resolve(&self, terrain: &Terrain, craft: &mut Craft) -> Contact {
        if craft.resting {
            let rest_y = rest_height(terrain, craft);
            let rising = craft.velocity.y < 0.;
            if !rising || craft.position.y >= rest_y {
                craft.position.y = rest_y;
                craft.velocity.y = 0.;
                return Contact::Resting;
            }
            debug!("lift off at ({:.2}, {:.2})", craft.position.x, craft.position.y);
            craft.resting = false;
        }

        if !self.touches(terrain, craft) {
            return Contact::Airborne;
        }

        let landing = self.classify(craft.velocity.y);
        if landing == Landing::Correct {
            craft.position.y = rest_height(terrain, craft);
            craft.velocity.y = 0.;
            craft.resting = true;
            debug!(
                "touchdown at ({:.2}, {:.2}) vx {:.2}",
                craft.position.x, craft.position.y, craft.velocity.x
            );
        }
        Contact::Landed(landing)
    }
}

fn rest_height(terrain: &Terrain, craft: &Craft) -> f64 {
    terrain.ground_height_at(craft.position.x) - craft.size
}
