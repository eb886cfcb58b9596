use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::WaterGrid;

/// Distance covered per tick at full health, in world pixels.
const SWIM_SPEED: f64 = 8.0;
/// Sick fish slow down with health, but never below this fraction.
const MIN_SPEED_FRACTION: f64 = 0.2;
/// Concentration above which the occupied cell harms the fish.
const HARM_THRESHOLD: f64 = 0.1;
/// Health lost per tick is the cell's pollution times this rate.
const HARM_RATE: f64 = 0.1;
/// A wander target closer than this counts as reached.
const ARRIVE_DISTANCE: f64 = 2.0;

/// Rectangle a fish wanders inside, in world pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HomeRange {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A single organism: swims between random water points inside its home
/// range, takes damage from the pollution under it and dies at zero
/// health. Dead fish stay in the population (they count against the
/// survival rate) but no longer update.
#[derive(Debug, Clone)]
pub struct Fish {
    pub x: f64,
    pub y: f64,
    pub health: f64,
    pub alive: bool,
    home: HomeRange,
    target: Option<(f64, f64)>,
}

impl Fish {
    pub fn new(x: f64, y: f64, home: HomeRange) -> Self {
        Self {
            x,
            y,
            health: 100.0,
            alive: true,
            home,
            target: None,
        }
    }

    pub fn update<R: Rng>(&mut self, grid: &WaterGrid, rng: &mut R) {
        if !self.alive {
            return;
        }

        let (col, row) = grid.tile_at(self.x, self.y);
        let mut speed = SWIM_SPEED;
        if let Some(cell) = grid.cell(col, row) {
            if cell.pollution > HARM_THRESHOLD {
                self.health -= cell.pollution * HARM_RATE;
                speed = SWIM_SPEED * (self.health / 100.0).max(MIN_SPEED_FRACTION);
            }
        }

        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            return;
        }

        match self.target {
            Some((tx, ty)) => {
                let dx = tx - self.x;
                let dy = ty - self.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < ARRIVE_DISTANCE {
                    self.pick_target(grid, rng);
                } else {
                    let step = speed.min(distance);
                    self.x += dx / distance * step;
                    self.y += dy / distance * step;
                }
            }
            None => self.pick_target(grid, rng),
        }
    }

    /// Draw a random point in the home range, keeping it only if it lands
    /// on water; otherwise idle in place and retry next tick.
    fn pick_target<R: Rng>(&mut self, grid: &WaterGrid, rng: &mut R) {
        let tx = rng.gen_range(self.home.x..self.home.x + self.home.width);
        let ty = rng.gen_range(self.home.y..self.home.y + self.home.height);
        let (col, row) = grid.tile_at(tx, ty);
        self.target = if grid.is_water(col, row) {
            Some((tx, ty))
        } else {
            Some((self.x, self.y))
        };
    }
}

/// Scatter up to `count` fish uniformly over the disc around
/// (`cx`, `cy`); draws landing on land are dropped, so a school straddling
/// a shoreline comes up short rather than beached.
pub fn spawn_school<R: Rng>(
    grid: &WaterGrid,
    rng: &mut R,
    cx: f64,
    cy: f64,
    radius: f64,
    count: usize,
) -> Vec<Fish> {
    let home = HomeRange {
        x: cx - radius,
        y: cy - radius,
        width: radius * 2.0,
        height: radius * 2.0,
    };
    let mut school = Vec::with_capacity(count);
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let r = rng.gen::<f64>().sqrt() * radius;
        let x = cx + r * angle.cos();
        let y = cy + r * angle.sin();
        let (col, row) = grid.tile_at(x, y);
        if grid.is_water(col, row) {
            school.push(Fish::new(x, y, home));
        }
    }
    school
}
