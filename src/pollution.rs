use serde::{Deserialize, Serialize};

use crate::grid::WaterGrid;

/// Sweep order for outgoing transfers: north, south, west, east.
const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Tunable rates for the per-tick pollution step. The defaults are the
/// calibrated values the simulation ships with; scenarios may override any
/// of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutionSettings {
    /// Fraction of the concentration difference passed to a lower neighbour
    /// per tick.
    pub diffusion_rate: f64,
    /// Residue gained per tick, scaled by the cell's pollution, while
    /// pollution sits above `high_threshold`.
    pub residue_accrual_rate: f64,
    /// Residue shed per tick while pollution sits below `low_threshold`.
    pub residue_recovery_rate: f64,
    pub high_threshold: f64,
    pub low_threshold: f64,
    /// Below this concentration a cell no longer spreads to its neighbours.
    pub settle_threshold: f64,
}

impl Default for PollutionSettings {
    fn default() -> Self {
        Self {
            diffusion_rate: 0.1,
            residue_accrual_rate: 0.0005,
            residue_recovery_rate: 0.0002,
            high_threshold: 0.2,
            low_threshold: 0.05,
            settle_threshold: 0.01,
        }
    }
}

/// Aggregate view over every water cell, as 0-100 percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutionStats {
    pub water_cells: usize,
    pub mean_pollution_pct: f64,
    pub mean_residue_pct: f64,
}

/// Advances the pollutant field one discrete tick at a time and offers the
/// clamped point mutations producers call into.
///
/// The field holds only its settings; every operation borrows the grid it
/// acts on, which keeps the grid's single-writer story visible at the call
/// site. All mutations clamp `pollution` and `residue` to `[0, 1]`, and
/// land or out-of-range targets are silent no-ops so producers may race a
/// moving target without pre-validating.
#[derive(Debug, Clone, Default)]
pub struct PollutionField {
    settings: PollutionSettings,
}

impl PollutionField {
    pub fn new(settings: PollutionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PollutionSettings {
        &self.settings
    }

    pub fn add_pollution(&self, grid: &mut WaterGrid, col: i32, row: i32, amount: f64) {
        if let Some(cell) = grid.cell_mut(col, row) {
            cell.pollution = (cell.pollution + amount).clamp(0.0, 1.0);
        }
    }

    pub fn remove_pollution(&self, grid: &mut WaterGrid, col: i32, row: i32, amount: f64) {
        if let Some(cell) = grid.cell_mut(col, row) {
            cell.pollution = (cell.pollution - amount).clamp(0.0, 1.0);
        }
    }

    /// One simulation tick: a single row-major sweep over the grid.
    ///
    /// Per water cell, residue first: above `high_threshold` it accrues in
    /// proportion to the standing pollution, below `low_threshold` it
    /// recovers at a flat rate, in between it holds. Then diffusion: each
    /// cardinal neighbour with strictly lower pollution immediately receives
    /// `(self - neighbour) * diffusion_rate`, and the summed outflow comes
    /// off the cell afterwards. Cells at or below `settle_threshold` keep
    /// their residue update but spread nothing.
    ///
    /// The sweep is deliberately in-place: a cell updated early can pass
    /// what it just received onward within the same tick. Later cells see
    /// earlier cells' new values. Callers must not interleave point
    /// mutations with a running sweep.
    pub fn step(&self, grid: &mut WaterGrid) {
        let s = &self.settings;
        let width = grid.width() as i32;
        let height = grid.height() as i32;

        for row in 0..height {
            for col in 0..width {
                let pollution = match grid.cell_mut(col, row) {
                    Some(cell) => {
                        if cell.pollution > s.high_threshold {
                            cell.residue = (cell.residue
                                + cell.pollution * s.residue_accrual_rate)
                                .clamp(0.0, 1.0);
                        } else if cell.pollution < s.low_threshold {
                            cell.residue =
                                (cell.residue - s.residue_recovery_rate).clamp(0.0, 1.0);
                        }
                        cell.pollution
                    }
                    None => continue,
                };

                if pollution <= s.settle_threshold {
                    continue;
                }

                let mut spread = 0.0;
                for (dx, dy) in NEIGHBOURS {
                    if let Some(neighbour) = grid.cell_mut(col + dx, row + dy) {
                        if neighbour.pollution < pollution {
                            let transfer = (pollution - neighbour.pollution) * s.diffusion_rate;
                            neighbour.pollution = (neighbour.pollution + transfer).min(1.0);
                            spread += transfer;
                        }
                    }
                }

                if spread > 0.0 {
                    if let Some(cell) = grid.cell_mut(col, row) {
                        cell.pollution = (cell.pollution - spread).max(0.0);
                    }
                }
            }
        }
    }

    /// Full scan over the water cells. A grid without water yields all
    /// zeroes rather than a division fault.
    pub fn statistics(&self, grid: &WaterGrid) -> PollutionStats {
        let mut water_cells = 0usize;
        let mut pollution_sum = 0.0;
        let mut residue_sum = 0.0;
        for cell in grid.water_cells() {
            water_cells += 1;
            pollution_sum += cell.pollution;
            residue_sum += cell.residue;
        }
        if water_cells == 0 {
            return PollutionStats::default();
        }
        PollutionStats {
            water_cells,
            mean_pollution_pct: pollution_sum / water_cells as f64 * 100.0,
            mean_residue_pct: residue_sum / water_cells as f64 * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rates_match_calibration() {
        let s = PollutionSettings::default();
        assert_eq!(s.diffusion_rate, 0.1);
        assert_eq!(s.residue_accrual_rate, 0.0005);
        assert_eq!(s.residue_recovery_rate, 0.0002);
        assert_eq!(s.high_threshold, 0.2);
        assert_eq!(s.low_threshold, 0.05);
        assert_eq!(s.settle_threshold, 0.01);
    }
}
