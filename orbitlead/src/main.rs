use orbitlead::{Command, ScenarioConfig, Scenario, ThrustDirection};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Run an orbital scenario headlessly and report the lead")]
struct Args {
    /// Scenario file; bare names are looked up in the crate's scenarios/ directory
    #[arg(short, long, default_value = "kerbin.yaml")]
    file: PathBuf,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 240_000)]
    frames: u64,

    /// Frame at which to fire a prograde burn (repeatable)
    #[arg(long = "burn")]
    burns: Vec<u64>,

    /// Log a status line every N frames
    #[arg(long, default_value_t = 24_000)]
    report_every: u64,
}

// load here to keep main clean
fn load_scenario_from_yaml(file: &PathBuf) -> Result<ScenarioConfig> {
    let config_path = if file.exists() {
        file.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };
    let reader = BufReader::new(
        File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?,
    );
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario_cfg = load_scenario_from_yaml(&args.file)?;
    let Scenario { mut engine, mut world } = Scenario::build_scenario(&scenario_cfg)?;

    let sc = world.spacecraft();
    let report_every = args.report_every.max(1);
    let mut recomputes = 0u64;
    let mut reparents = 0u64;

    for frame in 0..args.frames {
        let inputs: Vec<Command> = args
            .burns
            .iter()
            .filter(|b| **b == frame)
            .map(|_| Command::Thrust(ThrustDirection::Prograde))
            .collect();

        let report = engine.frame(&mut world, &inputs, |world, _| {
            if frame % report_every == 0 {
                let parent = world
                    .parent(sc)
                    .map_or("none", |p| world.satellite(p).name.as_str());
                let lead_len = world.lead(sc).map_or(0, |l| l.len());
                info!(
                    "t = {:>10.1} s  craft at ({:>10.1}, {:>10.1}) km  parent {:<8} lead {} nodes",
                    world.time(),
                    world.position(sc).x,
                    world.position(sc).y,
                    parent,
                    lead_len,
                );
            }
        })?;

        recomputes += u64::from(report.lead_recomputed);
        reparents += u64::from(report.reparented);
    }

    info!(
        "done: {} frames, {:.1} s simulated, {} full leads, {} reparents",
        args.frames,
        world.time(),
        recomputes,
        reparents
    );
    Ok(())
}
