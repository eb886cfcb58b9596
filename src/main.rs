use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use watershed::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{FishSystem, HealthSystem, PollutionSystem, SourceSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Watershed pollution simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/headwater.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override snapshot interval in ticks
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let mut world = scenario.build_world()?;
    let ticks = scenario.ticks(cli.ticks);
    let snapshot_interval = cli
        .snapshot_interval
        .unwrap_or(scenario.snapshot_interval_ticks);
    let snapshot_dir = cli
        .snapshot_dir
        .unwrap_or_else(|| PathBuf::from("snapshots"));

    world.health_mut().on_state_change(|new_state, old_state, score| {
        tracing::warn!(%new_state, %old_state, score, "ecosystem state changed");
    });

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir,
    };

    let mut engine = EngineBuilder::new(settings)
        .with_system(SourceSystem::new())
        .with_system(PollutionSystem::new())
        .with_system(FishSystem::new())
        .with_system(HealthSystem::new())
        .build();

    engine.run(&mut world, ticks)?;

    let summary = world.snapshot(&scenario.name);
    println!(
        "Scenario '{}' completed for {} ticks. Ecosystem {} (score {:.1}), fish {}/{} alive, mean pollution {:.2}%, mean residue {:.2}%.",
        scenario.name,
        ticks,
        summary.ecosystem_state,
        summary.health_score,
        summary.fish.live,
        summary.fish.total,
        summary.stats.mean_pollution_pct,
        summary.stats.mean_residue_pct,
    );
    Ok(())
}
