use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::fish::spawn_school;
use crate::grid::WaterGrid;
use crate::pollution::{PollutionField, PollutionSettings};
use crate::sources::{Discharge, FilterUnit, Runoff};
use crate::world::World;

const LAND_COLOUR: Rgba<u8> = Rgba([96, 128, 56, 255]);
const WATER_COLOUR: Rgba<u8> = Rgba([36, 98, 198, 255]);

fn default_map_width() -> u32 {
    768
}

fn default_map_height() -> u32 {
    768
}

fn default_tile_size() -> u32 {
    8
}

fn default_snapshot_interval_ticks() -> u64 {
    30
}

fn default_discharge_rate() -> f64 {
    0.05
}

fn default_runoff_rate() -> f64 {
    0.02
}

fn default_filter_rate() -> f64 {
    0.05
}

fn default_school_count() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    pub map: MapConfig,
    #[serde(default)]
    pub pollution: PollutionSettings,
    #[serde(default)]
    pub discharges: Vec<DischargeConfig>,
    #[serde(default)]
    pub runoff: Vec<RunoffConfig>,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    #[serde(default)]
    pub fish_schools: Vec<FishSchoolConfig>,
}

/// Either a map image on disk, or a generated one: a land fill with water
/// rectangles painted over it, which then runs through the same classifier
/// a real image would.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default = "default_map_width")]
    pub width: u32,
    #[serde(default = "default_map_height")]
    pub height: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default)]
    pub water: Vec<WaterRect>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WaterRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DischargeConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_discharge_rate")]
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RunoffConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_runoff_rate")]
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FilterConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_filter_rate")]
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FishSchoolConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default = "default_school_count")]
    pub count: usize,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl MapConfig {
    pub fn build_image(&self) -> Result<RgbaImage> {
        if let Some(path) = &self.image {
            let image = image::open(path)
                .with_context(|| format!("Failed to load map image {}", path.display()))?;
            return Ok(image.to_rgba8());
        }
        let mut image = RgbaImage::from_pixel(self.width, self.height, LAND_COLOUR);
        for rect in &self.water {
            for y in rect.y..(rect.y + rect.height).min(self.height) {
                for x in rect.x..(rect.x + rect.width).min(self.width) {
                    image.put_pixel(x, y, WATER_COLOUR);
                }
            }
        }
        Ok(image)
    }
}

impl Scenario {
    pub fn build_world(&self) -> Result<World> {
        let image = self.map.build_image()?;
        let grid = WaterGrid::from_image(&image, self.map.tile_size)
            .context("Failed to classify the map")?;
        let mut world = World::new(grid, PollutionField::new(self.pollution.clone()));

        for discharge in &self.discharges {
            world.add_discharge(Discharge::new(discharge.x, discharge.y, discharge.rate));
        }
        for runoff in &self.runoff {
            world.add_runoff(Runoff::new(runoff.x, runoff.y, runoff.rate));
        }
        for filter in &self.filters {
            world.add_filter(FilterUnit::new(filter.x, filter.y, filter.rate));
        }

        // Placement draws come straight off the scenario seed, so the same
        // scenario always starts with the same fish.
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        for school in &self.fish_schools {
            let spawned = spawn_school(
                world.grid(),
                &mut rng,
                school.x,
                school.y,
                school.radius,
                school.count,
            );
            world.add_school(spawned);
        }
        Ok(world)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(600)
    }
}
