//! Bouncy Balls entry point
//!
//! The browser build is driven from JavaScript through the `BouncyBalls`
//! handle. Natively this runs the simulation headless at a fixed timestep
//! and prints the final state as JSON.
//!
//! Usage: `bouncy-balls [config.json] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bouncy_balls::platform::PlatformTimeSource;
    use bouncy_balls::sim::Simulation;
    use bouncy_balls::{SimConfig, SimError};

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;
    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_TICKS: u64 = 600;

    pub fn run() -> Result<(), SimError> {
        let mut args = std::env::args().skip(1);

        let config = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| SimError::InvalidConfig(format!("cannot read {path}: {e}")))?;
                SimConfig::from_json(&json)?
            }
            None => SimConfig::default(),
        };
        let ticks = match args.next() {
            Some(n) => n
                .parse::<u64>()
                .map_err(|e| SimError::InvalidConfig(format!("bad tick count {n:?}: {e}")))?,
            None => DEFAULT_TICKS,
        };

        let mut sim = Simulation::initialize(WIDTH, HEIGHT, &config, PlatformTimeSource::default())?;
        for _ in 0..ticks {
            sim.step(FRAME_DT);
        }
        log::info!("Ran {} ticks ({:.1}s simulated)", sim.ticks(), ticks as f32 * FRAME_DT);

        let json = serde_json::to_string_pretty(&sim.snapshot()).map_err(SimError::Serialize)?;
        println!("{json}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bouncy Balls (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live on the `BouncyBalls` handle
}
