use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use simulation::{
    init,
    input::Autopilot,
    levels::{self, LevelShape},
    render::LogRenderer,
    timing::FixedStep,
    App, Craft, ExecutionStatus, Pacing, Simulation,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scenario json file path; built-in craft and levels when omitted
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Level index to start on
    #[arg(long, short, default_value = "0")]
    level: usize,

    /// Fly a procedurally generated level from this seed instead of the catalog
    #[arg(long)]
    seed: Option<u64>,

    /// Maximal number of frames
    #[arg(long, short, default_value = "3600")]
    frames: u64,

    /// Sleep out each frame budget instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// One physics tick per frame regardless of frame time
    #[arg(long)]
    coupled: bool,

    /// Log the HUD every N frames
    #[arg(long, default_value = "60")]
    hud_every: u64,

    /// Write the flight history as json
    #[arg(long, value_name = "FILE")]
    telemetry: Option<PathBuf>,
}

fn build_simulation(cli: &Cli) -> anyhow::Result<Simulation> {
    let sim = match (&cli.scenario, cli.seed) {
        (Some(path), _) => init::json::parse_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))?
            .into_simulation()?,
        (None, Some(seed)) => {
            let terrain = levels::generate(&mut StdRng::seed_from_u64(seed), &LevelShape::default())?;
            Simulation::new(vec![terrain], Craft::default())?
        }
        (None, None) => Simulation::try_default()?,
    };
    Ok(sim.with_initial_level(cli.level)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let sim = build_simulation(&cli)?;
    let dt = sim.physics().dt();
    let stepper = if cli.coupled {
        FixedStep::coupled(dt)
    } else {
        FixedStep::new(dt)
    };
    let pacing = if cli.realtime {
        Pacing::Realtime
    } else {
        Pacing::Headless
    };

    let mut app = App::new(sim, Autopilot::default(), LogRenderer::new(cli.hud_every))
        .with_stepper(stepper)
        .with_pacing(pacing);

    let now = std::time::Instant::now();
    let result = app.run(Some(cli.frames));
    let elapsed = now.elapsed();
    log::info!(
        "Run ended with result: {result:?} after {} frames, time: {elapsed:?}",
        app.frames()
    );
    if let ExecutionStatus::InProgress = result {
        log::info!("final state {:?}", app.simulation().state());
    }

    if let Some(path) = &cli.telemetry {
        std::fs::write(path, app.history().to_json()?)
            .with_context(|| format!("writing telemetry to {}", path.display()))?;
    }
    Ok(())
}
