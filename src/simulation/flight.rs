use log::{debug, info};

use super::{levels, Classifier, Contact, Controls, Craft, Landing, Physics, Terrain};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FlightState {
    Playing,
    Crashed,
}

/// Result of one call to [`Simulation::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Crashed; nothing was integrated.
    Frozen,
    Airborne,
    Resting,
    Landed,
    Crashed { error_abs: f64, error_rel: f64 },
}

/// The whole mutable simulation: craft, level catalog and flight state.
///
/// Owned by the tick loop; renderers only get shared references.
#[derive(Debug)]
pub struct Simulation {
    physics: Physics,
    classifier: Classifier,
    levels: Vec<Terrain>,
    initial_level: usize,
    level_index: usize,
    initial_craft: Craft,
    craft: Craft,
    state: FlightState,
    tick: u64,
}

impl Simulation {
    pub fn new(levels: Vec<Terrain>, initial_craft: Craft) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::LevelOutOfRange { index: 0, len: 0 });
        }
        Ok(Self {
            physics: Physics::default(),
            classifier: Classifier::default(),
            levels,
            initial_level: 0,
            level_index: 0,
            craft: initial_craft.clone(),
            initial_craft,
            state: FlightState::Playing,
            tick: 0,
        })
    }

    /// Built-in catalog and default craft.
    pub fn try_default() -> Result<Self, ConfigError> {
        Self::new(levels::catalog()?, Craft::default())
    }

    pub fn with_physics(self, physics: Physics) -> Self {
        Self { physics, ..self }
    }

    pub fn with_classifier(self, classifier: Classifier) -> Self {
        Self { classifier, ..self }
    }

    /// Level used at start and after every restart.
    pub fn with_initial_level(self, index: usize) -> Result<Self, ConfigError> {
        self.check_level(index)?;
        Ok(Self {
            initial_level: index,
            level_index: index,
            ..self
        })
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    pub fn terrain(&self) -> &Terrain {
        &self.levels[self.level_index]
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn num_of_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Switch level while playing; the craft keeps flying and has to land
    /// again on the new ground. Returns false (and does nothing) while crashed.
    pub fn select_level(&mut self, index: usize) -> Result<bool, ConfigError> {
        self.check_level(index)?;
        if self.state != FlightState::Playing {
            return Ok(false);
        }
        debug!("level {} selected", index);
        self.level_index = index;
        self.craft.resting = false;
        Ok(true)
    }

    /// Advance one fixed tick: integrate, then resolve terrain contact.
    pub fn step(&mut self, controls: &Controls) -> TickOutcome {
        if self.state == FlightState::Crashed {
            return TickOutcome::Frozen;
        }
        self.tick += 1;

        let mut craft = self.physics.iterate(self.craft.clone(), controls);
        let contact = self.classifier.resolve(&self.levels[self.level_index], &mut craft);
        self.craft = craft;

        match contact {
            Contact::Airborne => TickOutcome::Airborne,
            Contact::Resting => TickOutcome::Resting,
            Contact::Landed(Landing::Correct) => {
                info!(
                    "landed at ({:.1}, {:.1}) on tick {}",
                    self.craft.position.x, self.craft.position.y, self.tick
                );
                TickOutcome::Landed
            }
            Contact::Landed(Landing::TooFastVertical {
                error_abs,
                error_rel,
            }) => {
                self.state = FlightState::Crashed;
                info!(
                    "crashed at ({:.1}, {:.1}) on tick {}, vertical speed {:.2} over limit by {:.2}",
                    self.craft.position.x,
                    self.craft.position.y,
                    self.tick,
                    self.craft.velocity.y.abs(),
                    error_abs
                );
                TickOutcome::Crashed {
                    error_abs,
                    error_rel,
                }
            }
        }
    }

    /// Leave Crashed for Playing. Returns false (and does nothing) while playing.
    pub fn restart(&mut self) -> bool {
        if self.state != FlightState::Crashed {
            return false;
        }
        self.reset();
        info!("restarted on level {}", self.level_index);
        true
    }

    /// Back to the initial craft, level and Playing, whatever the state.
    pub fn reset(&mut self) {
        self.craft = self.initial_craft.clone();
        self.level_index = self.initial_level;
        self.state = FlightState::Playing;
        self.tick = 0;
    }

    fn check_level(&self, index: usize) -> Result<(), ConfigError> {
        if index < self.levels.len() {
            Ok(())
        } else {
            Err(ConfigError::LevelOutOfRange {
                index,
                len: self.levels.len(),
            })
        }
    }
}

#[cfg(test)]
mod flight_tests {
    use super::*;

    fn flat() -> Vec<Terrain> {
        vec![Terrain::from_pairs(&[(0., 200.), (320., 200.)]).unwrap()]
    }

    fn drop_from(y: f64) -> Simulation {
        Simulation::new(flat(), Craft::default().with_position(160., y)).unwrap()
    }

    fn run_until_contact(sim: &mut Simulation, controls: &Controls) -> TickOutcome {
        for _ in 0..10_000 {
            match sim.step(controls) {
                TickOutcome::Airborne => continue,
                outcome => return outcome,
            }
        }
        panic!("no contact");
    }

    #[test]
    fn starts_playing() {
        let sim = Simulation::try_default().unwrap();
        assert_eq!(sim.state(), FlightState::Playing);
        assert_eq!(sim.level_index(), 0);
        assert_eq!(sim.craft(), &Craft::default());
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(Simulation::new(vec![], Craft::default()).is_err());
    }

    #[test]
    fn free_fall_crashes_and_freezes() {
        let mut sim = drop_from(0.);
        let outcome = run_until_contact(&mut sim, &Controls::idle());
        assert!(matches!(outcome, TickOutcome::Crashed { .. }));
        assert_eq!(sim.state(), FlightState::Crashed);

        let frozen = sim.craft().clone();
        let ticks = sim.tick_count();
        let all_on = Controls::idle().with_thrust(true).with_rotate_left(true);
        for _ in 0..10 {
            assert_eq!(sim.step(&all_on), TickOutcome::Frozen);
        }
        assert_eq!(sim.craft(), &frozen);
        assert_eq!(sim.tick_count(), ticks);
    }

    #[test]
    fn short_drop_lands() {
        let mut sim = drop_from(192.);
        let outcome = run_until_contact(&mut sim, &Controls::idle());
        assert_eq!(outcome, TickOutcome::Landed);
        assert_eq!(sim.state(), FlightState::Playing);
        assert_eq!(sim.craft().position.y, 190.);
        assert_eq!(sim.craft().velocity.y, 0.);

        // stays put on following ticks
        for _ in 0..120 {
            assert_eq!(sim.step(&Controls::idle()), TickOutcome::Resting);
        }
        assert_eq!(sim.craft().position.y, 190.);
        assert_eq!(sim.state(), FlightState::Playing);
    }

    #[test]
    fn restart_only_from_crashed() {
        let mut sim = drop_from(0.);
        sim.step(&Controls::idle());
        assert!(!sim.restart());
        assert_ne!(sim.craft().position.y, 0.);

        run_until_contact(&mut sim, &Controls::idle());
        assert!(sim.restart());
        assert_eq!(sim.state(), FlightState::Playing);
        assert_eq!(sim.craft().position.y, 0.);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn restart_returns_to_initial_level() {
        let levels = vec![
            Terrain::from_pairs(&[(0., 200.), (320., 200.)]).unwrap(),
            Terrain::from_pairs(&[(0., 150.), (320., 150.)]).unwrap(),
        ];
        let mut sim = Simulation::new(levels, Craft::default().with_position(160., 0.)).unwrap();
        assert!(sim.select_level(1).unwrap());
        assert_eq!(sim.level_index(), 1);
        assert!(matches!(
            sim.select_level(2),
            Err(ConfigError::LevelOutOfRange { index: 2, len: 2 })
        ));

        run_until_contact(&mut sim, &Controls::idle());
        assert_eq!(sim.state(), FlightState::Crashed);
        sim.restart();
        assert_eq!(sim.level_index(), 0);
    }

    #[test]
    fn level_locked_while_crashed() {
        let levels = vec![
            Terrain::from_pairs(&[(0., 200.), (320., 200.)]).unwrap(),
            Terrain::from_pairs(&[(0., 150.), (320., 150.)]).unwrap(),
        ];
        let mut sim = Simulation::new(levels, Craft::default().with_position(160., 0.)).unwrap();
        run_until_contact(&mut sim, &Controls::idle());
        assert_eq!(sim.state(), FlightState::Crashed);

        assert!(!sim.select_level(1).unwrap());
        assert_eq!(sim.level_index(), 0);
        assert!(sim.select_level(5).is_err());
    }

    #[test]
    fn level_switch_takes_craft_off_the_ground() {
        let levels = vec![
            Terrain::from_pairs(&[(0., 200.), (320., 200.)]).unwrap(),
            Terrain::from_pairs(&[(0., 195.), (320., 195.)]).unwrap(),
        ];
        let mut sim = Simulation::new(levels, Craft::default().with_position(160., 192.)).unwrap();
        assert_eq!(run_until_contact(&mut sim, &Controls::idle()), TickOutcome::Landed);
        assert!(sim.craft().resting);

        assert!(sim.select_level(1).unwrap());
        assert!(!sim.craft().resting);
        assert_eq!(sim.craft().position.y, 190.);

        // not snapped up to the new rest height; the wing tip drops about 1 px
        // onto the new ground and lands again
        assert_eq!(sim.step(&Controls::idle()), TickOutcome::Airborne);
        assert_eq!(run_until_contact(&mut sim, &Controls::idle()), TickOutcome::Landed);
        assert_eq!(sim.craft().position.y, 185.);
        assert_eq!(sim.state(), FlightState::Playing);
    }

    #[test]
    fn initial_level_is_kept() {
        let sim = Simulation::try_default()
            .unwrap()
            .with_initial_level(2)
            .unwrap();
        assert_eq!(sim.level_index(), 2);
        assert!(Simulation::try_default()
            .unwrap()
            .with_initial_level(99)
            .is_err());
    }
}
