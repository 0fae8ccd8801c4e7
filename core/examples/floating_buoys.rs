//! Example: Float a buoy and a raft on a single travelling wave.
//!
//! Uses the GPU evaluator when an adapter is available, otherwise the CPU one.
//!
//! Run with:
//!     RUST_LOG=info cargo run --example floating_buoys [scene.json]

use anyhow::Context;
use water_system::simulation::{EvaluatorKind, SimulationConfig, TickContext, WaterSimulation};
use water_system::GpuContext;

const DEFAULT_SCENE: &str = r#"{
    "waves": [0.5, 12.0, 0.3, 1.0],
    "evaluator": "gpu",
    "bodies": [
        {
            "name": "buoy",
            "pose": { "position": [0.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0] },
            "buoyancy": { "model": { "type": "point" }, "position_hardness": 0.2 }
        },
        {
            "name": "raft",
            "pose": { "position": [6.0, -1.0, 2.0], "rotation": [0.0, 0.0, 0.0, 1.0] },
            "buoyancy": { "model": { "type": "surface" }, "sinking_correction": -0.05 }
        }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path)
            .with_context(|| format!("failed to load scene {path}"))?,
        None => SimulationConfig::from_json_str(DEFAULT_SCENE)?,
    };

    let gpu = match config.evaluator {
        EvaluatorKind::Gpu => match GpuContext::new_blocking() {
            Ok(ctx) => {
                log::info!("Using adapter: {}", ctx.adapter_info().name);
                Some(ctx)
            }
            Err(e) => {
                log::warn!("GPU unavailable ({e}), sampling on the CPU");
                None
            }
        },
        EvaluatorKind::Cpu => None,
    };

    let mut sim = WaterSimulation::from_config_dynamic(&config, gpu.as_ref())?;

    println!("Water System - Floating Buoys");
    println!("=============================\n");

    let fps = 30.0;
    for frame in 0..90 {
        sim.tick(TickContext::new(1.0 / fps))?;
        if frame % 15 != 0 {
            continue;
        }
        println!("t = {:.2}s", sim.elapsed());
        for body in sim.bodies() {
            let p = body.pose.position;
            let up = body.pose.up();
            println!(
                "  {:<6} position ({:>6.3}, {:>6.3}, {:>6.3})  up ({:>5.2}, {:>5.2}, {:>5.2})",
                body.name, p.x, p.y, p.z, up.x, up.y, up.z
            );
        }
    }

    let stats = sim.sampler().stats();
    println!(
        "\nDispatches: {}  allocations: {}  releases: {}",
        stats.dispatches, stats.allocations, stats.releases
    );
    Ok(())
}
