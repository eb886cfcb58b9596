use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Runs every discharge, runoff and filter for the tick. These are the
/// only point mutations of the field, and they all land before the sweep.
pub struct SourceSystem;

impl SourceSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SourceSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SourceSystem {
    fn name(&self) -> &str {
        "sources"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.apply_sources();
        Ok(())
    }
}
