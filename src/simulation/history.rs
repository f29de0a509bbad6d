use serde::Serialize;

use super::{Craft, FlightState};

/// Per-tick telemetry, one column per quantity.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FlightHistory {
    tick: Vec<u64>,
    x: Vec<f64>,
    y: Vec<f64>,
    vx: Vec<f64>,
    vy: Vec<f64>,
    angle: Vec<f64>,
    fuel: Vec<f64>,
    throttle: Vec<f64>,
    state: Vec<FlightState>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub tick: u64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub angle: f64,
    pub fuel: f64,
    pub throttle: f64,
    pub state: FlightState,
}

impl FlightHistory {
    pub fn with_initial_state(craft: &Craft) -> Self {
        let mut history = Self::default();
        history.append(0, craft, FlightState::Playing);
        history
    }

    pub fn len(&self) -> usize {
        self.tick.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tick.is_empty()
    }

    pub fn append(&mut self, tick: u64, craft: &Craft, state: FlightState) {
        self.tick.push(tick);
        self.x.push(craft.position.x);
        self.y.push(craft.position.y);
        self.vx.push(craft.velocity.x);
        self.vy.push(craft.velocity.y);
        self.angle.push(craft.angle);
        self.fuel.push(craft.fuel);
        self.throttle.push(craft.throttle);
        self.state.push(state);
    }

    pub fn iter_history(&self) -> impl Iterator<Item = Sample> + '_ {
        self.tick
            .iter()
            .zip(&self.x)
            .zip(&self.y)
            .zip(&self.vx)
            .zip(&self.vy)
            .zip(&self.angle)
            .zip(&self.fuel)
            .zip(&self.throttle)
            .zip(&self.state)
            .map(
                |((((((((tick, x), y), vx), vy), angle), fuel), throttle), state)| Sample {
                    tick: *tick,
                    x: *x,
                    y: *y,
                    vx: *vx,
                    vy: *vy,
                    angle: *angle,
                    fuel: *fuel,
                    throttle: *throttle,
                    state: *state,
                },
            )
    }

    pub fn pretty_to_string(&self) -> String {
        self.iter_history().fold(
            format!(
                "{:>6}{:>9}{:>9}{:>9}{:>9}{:>9}{:>8}{:>6}  {}",
                "TICK", "X", "Y", "VX", "VY", "ANGLE", "FUEL", "THR", "STATE"
            ),
            |out,
             Sample {
                 tick,
                 x,
                 y,
                 vx,
                 vy,
                 angle,
                 fuel,
                 throttle,
                 state,
             }| {
                out + &format!(
                    "\n{tick:>6}{x:>9.2}{y:>9.2}{vx:>9.2}{vy:>9.2}{angle:>9.2}{fuel:>8.2}{throttle:>6.0}  {state:?}"
                )
            },
        )
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.iter_history().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let craft = Craft::default();
        let mut history = FlightHistory::with_initial_state(&craft);
        let moved = craft.clone().with_position(1., 2.).with_fuel(3.);
        history.append(1, &moved, FlightState::Crashed);

        let samples: Vec<_> = history.iter_history().collect();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].x, 160.);
        assert_eq!(samples[1].tick, 1);
        assert_eq!(samples[1].y, 2.);
        assert_eq!(samples[1].fuel, 3.);
        assert_eq!(samples[1].state, FlightState::Crashed);
    }

    #[test]
    fn pretty_has_header_and_rows() {
        let history = FlightHistory::with_initial_state(&Craft::default());
        let text = history.pretty_to_string();
        assert!(text.starts_with("  TICK"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("Playing"));
    }

    #[test]
    fn json_export() {
        let history = FlightHistory::with_initial_state(&Craft::default());
        let value: serde_json::Value = serde_json::from_str(&history.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["x"], 160.0);
        assert_eq!(value[0]["state"], "Playing");
    }
}
