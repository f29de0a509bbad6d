use std::{fs::File, io::Read, path::Path, time::Duration};

use json::{self, JsonValue};
use log::debug;

use crate::error::ConfigError;
use crate::simulation::*;

macro_rules! get_json {
    ($json:ident,$($key:literal),+, $func:ident) => {
            get_json!($json$([$key])+, concat!($("/",$key),+), $func)
    };

    ($value:expr, $key:expr, $func:ident) => {
        $value
            .$func()
            .ok_or(ConfigError::MissingKey($key))?
    };
}

macro_rules! get_json_or {
    ($json:ident,$($key:literal),+, $func:ident, $default:expr) => {
            {
                let value = &$json$([$key])+;
                if value.is_null() {
                    $default
                } else {
                    get_json!((value), concat!($("/",$key),+), $func)
                }
            }
    };
}

/// Everything a session needs besides its input and renderer.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub world: World,
    pub tick_rate: f64,
    pub craft: Craft,
    pub landing_threshold: f64,
    pub levels: Vec<Terrain>,
}

impl Scenario {
    pub fn into_simulation(self) -> Result<Simulation, ConfigError> {
        let physics = Physics::default()
            .with_world(self.world)
            .with_dt(1. / self.tick_rate);
        let classifier = Classifier::default().with_landing_threshold(self.landing_threshold);
        Ok(Simulation::new(self.levels, self.craft)?
            .with_physics(physics)
            .with_classifier(classifier))
    }
}

pub fn parse_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ConfigError> {
    parse_from_json(&read_json(path)?)
}

pub fn parse_from_string(content: &str) -> Result<Scenario, ConfigError> {
    parse_from_json(&json::parse(content)?)
}

fn read_json<P: AsRef<Path>>(path: P) -> Result<JsonValue, ConfigError> {
    let path = path.as_ref();
    let io_err = |source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file_content = String::new();
    File::open(path)
        .map_err(io_err)?
        .read_to_string(&mut file_content)
        .map_err(io_err)?;
    Ok(json::parse(&file_content)?)
}

fn parse_from_json(json: &JsonValue) -> Result<Scenario, ConfigError> {
    let world = World::default().with_gravity(get_json_or!(
        json,
        "World",
        "Gravity",
        as_f64,
        World::default().gravity
    ));
    let tick_rate = tick_rate(get_json_or!(json, "World", "TickRate", as_f64, 60.))?;
    let landing_threshold = positive(
        "/World/LandingThreshold",
        get_json_or!(json, "World", "LandingThreshold", as_f64, 10.),
    )?;

    let levels = if json["Levels"].is_null() {
        levels::catalog()?
    } else {
        parse_levels(&json["Levels"])?
    };
    debug!("scenario with {} levels", levels.len());

    Ok(Scenario {
        world,
        tick_rate,
        craft: parse_craft(json)?,
        landing_threshold,
        levels,
    })
}

fn parse_craft(json: &JsonValue) -> Result<Craft, ConfigError> {
    let default = Craft::default();
    let craft = Craft {
        position: Vec2::new(
            get_json!(json, "Craft", "X", as_f64),
            get_json!(json, "Craft", "Y", as_f64),
        ),
        velocity: Vec2::new(
            get_json_or!(json, "Craft", "HSpeed", as_f64, 0.),
            get_json_or!(json, "Craft", "VSpeed", as_f64, 0.),
        ),
        angle: get_json_or!(json, "Craft", "Angle", as_f64, default.angle),
        rotation_rate: get_json_or!(json, "Craft", "RotationRate", as_f64, default.rotation_rate),
        mass: positive(
            "/Craft/Mass",
            get_json_or!(json, "Craft", "Mass", as_f64, default.mass),
        )?,
        max_thrust: non_negative(
            "/Craft/MaxThrust",
            get_json_or!(json, "Craft", "MaxThrust", as_f64, default.max_thrust),
        )?,
        drag_coefficient: non_negative(
            "/Craft/Drag",
            get_json_or!(json, "Craft", "Drag", as_f64, default.drag_coefficient),
        )?,
        fuel: non_negative("/Craft/Fuel", get_json!(json, "Craft", "Fuel", as_f64))?,
        fuel_consumption: non_negative(
            "/Craft/FuelConsumption",
            get_json_or!(json, "Craft", "FuelConsumption", as_f64, default.fuel_consumption),
        )?,
        size: positive(
            "/Craft/Size",
            get_json_or!(json, "Craft", "Size", as_f64, default.size),
        )?,
        ..default
    };
    Ok(craft)
}

fn parse_levels(levels: &JsonValue) -> Result<Vec<Terrain>, ConfigError> {
    if !levels.is_array() {
        return Err(ConfigError::InvalidParameter {
            key: "/Levels",
            reason: "expected an array of levels".to_owned(),
        });
    }
    levels
        .members()
        .enumerate()
        .map(|(index, level)| {
            let points = level
                .members()
                .map(|point_json| {
                    let invalid = || ConfigError::InvalidParameter {
                        key: "/Levels",
                        reason: format!("level {index} has to contain numeric [x, y] points"),
                    };
                    let x = point_json[0].as_f64().ok_or_else(invalid)?;
                    let y = point_json[1].as_f64().ok_or_else(invalid)?;
                    Ok(Vec2::new(x, y))
                })
                .collect::<Result<Vec<_>, ConfigError>>()?;
            Terrain::new(points).map_err(|source| ConfigError::Level { index, source })
        })
        .collect()
}

/// The tick must be a positive rate whose period fits a non-zero `Duration`.
fn tick_rate(value: f64) -> Result<f64, ConfigError> {
    let value = positive("/World/TickRate", value)?;
    match Duration::try_from_secs_f64(1. / value) {
        Ok(period) if !period.is_zero() => Ok(value),
        _ => Err(ConfigError::InvalidParameter {
            key: "/World/TickRate",
            reason: format!("a tick period of 1/{value} s is out of range"),
        }),
    }
}

fn positive(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0. && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            key,
            reason: format!("{value} is not positive"),
        })
    }
}

fn non_negative(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0. && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            key,
            reason: format!("{value} is negative"),
        })
    }
}
