use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Moves the fish and applies pollution damage after the field has
/// settled for the tick, so the health read-out downstream sees
/// current-tick conditions.
pub struct FishSystem;

impl FishSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FishSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FishSystem {
    fn name(&self) -> &str {
        "fish"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.update_fish(rng);
        Ok(())
    }
}
