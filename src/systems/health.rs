use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Last in the tick: collects field statistics and population metrics,
/// scores them and lets the state machine notify its listener.
pub struct HealthSystem;

impl HealthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for HealthSystem {
    fn name(&self) -> &str {
        "health"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let score = world.evaluate_health();
        tracing::trace!(tick = ctx.tick, score, state = %world.health().state(), "health evaluated");
        Ok(())
    }
}
