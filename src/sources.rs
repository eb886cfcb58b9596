use crate::grid::WaterGrid;
use crate::pollution::PollutionField;

/// Half-width, in tiles, of the block a discharge scans for its outlet.
const OUTLET_SEARCH: i32 = 2;
/// Tile radius covered by runoff spread and by filter intake.
const SPREAD_RADIUS: i32 = 3;
/// Runoff is split across the water cells it reaches, but over no more than
/// this many shares so a wide spread still registers per cell.
const DILUTION_CAP: usize = 5;

/// Policy level 0-100 mapped onto an emission rate of 0.01 to 0.05 per
/// tick: 0 is the strictest practice, 100 the laxest.
pub fn policy_rate(level: f64) -> f64 {
    0.01 + 0.04 * (level.clamp(0.0, 100.0) / 100.0)
}

/// A point source, such as a factory outfall. Positions are world-space
/// pixels; the source anchors to land and pipes into the nearest water.
#[derive(Debug, Clone)]
pub struct Discharge {
    pub x: f64,
    pub y: f64,
    pub rate: f64,
}

impl Discharge {
    pub fn new(x: f64, y: f64, rate: f64) -> Self {
        Self { x, y, rate }
    }

    pub fn set_policy_level(&mut self, level: f64) {
        self.rate = policy_rate(level);
    }

    /// Inject one tick's emission into the first water tile found in the
    /// 5x5 block around the anchor, scanning top-to-bottom. No water in
    /// reach means no emission this tick.
    pub fn apply(&self, field: &PollutionField, grid: &mut WaterGrid) {
        let (col, row) = grid.tile_at(self.x, self.y);
        for dy in -OUTLET_SEARCH..=OUTLET_SEARCH {
            for dx in -OUTLET_SEARCH..=OUTLET_SEARCH {
                if grid.is_water(col + dx, row + dy) {
                    field.add_pollution(grid, col + dx, row + dy, self.rate);
                    return;
                }
            }
        }
    }
}

/// An area source, such as fertiliser runoff from a farm. Unlike a
/// discharge pipe, runoff lands diluted across every water cell in reach.
#[derive(Debug, Clone)]
pub struct Runoff {
    pub x: f64,
    pub y: f64,
    pub rate: f64,
}

impl Runoff {
    pub fn new(x: f64, y: f64, rate: f64) -> Self {
        Self { x, y, rate }
    }

    pub fn set_policy_level(&mut self, level: f64) {
        self.rate = policy_rate(level);
    }

    pub fn apply(&self, field: &PollutionField, grid: &mut WaterGrid) {
        let (col, row) = grid.tile_at(self.x, self.y);
        let mut reached = Vec::new();
        for dy in -SPREAD_RADIUS..=SPREAD_RADIUS {
            for dx in -SPREAD_RADIUS..=SPREAD_RADIUS {
                if grid.is_water(col + dx, row + dy) {
                    reached.push((col + dx, row + dy));
                }
            }
        }
        if reached.is_empty() {
            return;
        }
        let per_cell = self.rate / reached.len().min(DILUTION_CAP) as f64;
        for (c, r) in reached {
            field.add_pollution(grid, c, r, per_cell);
        }
    }
}

/// A cleanup device pulling pollution out of every cell around it while
/// active. Removal quietly skips land and off-grid offsets.
#[derive(Debug, Clone)]
pub struct FilterUnit {
    pub x: f64,
    pub y: f64,
    pub rate: f64,
    pub active: bool,
}

impl FilterUnit {
    pub fn new(x: f64, y: f64, rate: f64) -> Self {
        Self {
            x,
            y,
            rate,
            active: true,
        }
    }

    pub fn toggle(&mut self, active: bool) {
        self.active = active;
    }

    pub fn apply(&self, field: &PollutionField, grid: &mut WaterGrid) {
        if !self.active {
            return;
        }
        let (col, row) = grid.tile_at(self.x, self.y);
        for dy in -SPREAD_RADIUS..=SPREAD_RADIUS {
            for dx in -SPREAD_RADIUS..=SPREAD_RADIUS {
                field.remove_pollution(grid, col + dx, row + dy, self.rate);
            }
        }
    }
}
