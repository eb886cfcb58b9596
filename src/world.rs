use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fish::Fish;
use crate::grid::WaterGrid;
use crate::health::{EcosystemHealth, EcosystemState, HealthInputs};
use crate::pollution::{PollutionField, PollutionStats};
use crate::sources::{Discharge, FilterUnit, Runoff};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FishSummary {
    pub live: usize,
    pub total: usize,
    pub mean_health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub stats: PollutionStats,
    pub health_score: f64,
    pub ecosystem_state: EcosystemState,
    pub fish: FishSummary,
}

/// All mutable simulation state for one run: the classified grid, the
/// pollutant field settings, the stimulus producers, the fish population
/// and the health evaluator. Systems receive the world explicitly each
/// tick; nothing lives in ambient globals, so runs are repeatable.
pub struct World {
    grid: WaterGrid,
    field: PollutionField,
    discharges: Vec<Discharge>,
    runoffs: Vec<Runoff>,
    filters: Vec<FilterUnit>,
    fish: Vec<Fish>,
    health: EcosystemHealth,
    tick: u64,
}

impl World {
    pub fn new(grid: WaterGrid, field: PollutionField) -> Self {
        Self {
            grid,
            field,
            discharges: Vec::new(),
            runoffs: Vec::new(),
            filters: Vec::new(),
            fish: Vec::new(),
            health: EcosystemHealth::new(),
            tick: 0,
        }
    }

    pub fn add_discharge(&mut self, discharge: Discharge) {
        self.discharges.push(discharge);
    }

    pub fn add_runoff(&mut self, runoff: Runoff) {
        self.runoffs.push(runoff);
    }

    pub fn add_filter(&mut self, filter: FilterUnit) {
        self.filters.push(filter);
    }

    pub fn add_school(&mut self, school: Vec<Fish>) {
        self.fish.extend(school);
    }

    pub fn grid(&self) -> &WaterGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut WaterGrid {
        &mut self.grid
    }

    pub fn field(&self) -> &PollutionField {
        &self.field
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn health(&self) -> &EcosystemHealth {
        &self.health
    }

    pub fn health_mut(&mut self) -> &mut EcosystemHealth {
        &mut self.health
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
    }

    pub fn live_fish(&self) -> usize {
        self.fish.iter().filter(|f| f.alive).count()
    }

    pub fn mean_fish_health(&self) -> f64 {
        let mut sum = 0.0;
        let mut alive = 0usize;
        for fish in self.fish.iter().filter(|f| f.alive) {
            sum += fish.health;
            alive += 1;
        }
        if alive == 0 {
            0.0
        } else {
            sum / alive as f64
        }
    }

    /// Every producer injects or removes its tick's worth of pollution.
    pub fn apply_sources(&mut self) {
        let Self {
            grid,
            field,
            discharges,
            runoffs,
            filters,
            ..
        } = self;
        for discharge in discharges.iter() {
            discharge.apply(field, grid);
        }
        for runoff in runoffs.iter() {
            runoff.apply(field, grid);
        }
        for filter in filters.iter() {
            filter.apply(field, grid);
        }
    }

    /// Exactly one diffusion/residue sweep.
    pub fn step_pollution(&mut self) {
        let Self { grid, field, .. } = self;
        field.step(grid);
    }

    pub fn update_fish<R: Rng>(&mut self, rng: &mut R) {
        let Self { grid, fish, .. } = self;
        for fish in fish.iter_mut() {
            fish.update(grid, rng);
        }
    }

    /// Gather the tick's metrics, score them and run the state machine.
    pub fn evaluate_health(&mut self) -> f64 {
        let stats = self.field.statistics(&self.grid);
        let inputs = HealthInputs {
            live_count: self.live_fish(),
            total_count: self.fish.len(),
            mean_organism_health: self.mean_fish_health(),
            active_pollution_pct: stats.mean_pollution_pct,
            field_health_pct: (100.0 - stats.mean_residue_pct).max(0.0),
        };
        self.health.calculate_health(&inputs);
        self.health.update_state();
        self.health.score()
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            stats: self.field.statistics(&self.grid),
            health_score: self.health.score(),
            ecosystem_state: self.health.state(),
            fish: FishSummary {
                live: self.live_fish(),
                total: self.fish.len(),
                mean_health: self.mean_fish_health(),
            },
        }
    }
}
