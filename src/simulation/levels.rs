use rand::Rng;

use super::{Terrain, Vec2};
use crate::error::{ConfigError, TerrainError};

const LEVEL_0: &[(f64, f64)] = &[
    (0., 190.),
    (40., 170.),
    (80., 180.),
    (130., 185.),
    (190., 185.),
    (230., 160.),
    (270., 175.),
    (320., 150.),
];

const LEVEL_1: &[(f64, f64)] = &[
    (0., 150.),
    (50., 175.),
    (90., 160.),
    (120., 190.),
    (170., 190.),
    (200., 165.),
    (250., 180.),
    (320., 140.),
];

const LEVEL_2: &[(f64, f64)] = &[
    (0., 140.),
    (30., 185.),
    (60., 150.),
    (100., 192.),
    (140., 192.),
    (180., 170.),
    (220., 192.),
    (260., 192.),
    (290., 160.),
    (320., 180.),
];

pub const CATALOG: &[&[(f64, f64)]] = &[LEVEL_0, LEVEL_1, LEVEL_2];

/// The built-in levels, in catalog order.
pub fn catalog() -> Result<Vec<Terrain>, ConfigError> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, points)| {
            Terrain::from_pairs(points).map_err(|source| ConfigError::Level { index, source })
        })
        .collect()
}

/// Shape of a procedurally generated level.
#[derive(Clone, Debug)]
pub struct LevelShape {
    pub width: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub points: usize,
}

impl Default for LevelShape {
    fn default() -> Self {
        Self {
            width: 320.,
            min_y: 140.,
            max_y: 195.,
            points: 12,
        }
    }
}

/// Random terrain with evenly spaced points and one flat landing pad.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, shape: &LevelShape) -> Result<Terrain, TerrainError> {
    let (min_y, max_y) = (shape.min_y, shape.max_y);
    if !(min_y.is_finite() && max_y.is_finite() && min_y <= max_y) {
        return Err(TerrainError::HeightRange { min_y, max_y });
    }
    let spacing = if shape.points > 1 {
        shape.width / (shape.points - 1) as f64
    } else {
        0.
    };
    let mut points: Vec<_> = (0..shape.points)
        .map(|i| Vec2::new(i as f64 * spacing, rng.gen_range(min_y..=max_y)))
        .collect();

    if points.len() >= 2 {
        let pad = rng.gen_range(0..points.len() - 1);
        points[pad + 1].y = points[pad].y;
    }
    Terrain::new(points)
}
