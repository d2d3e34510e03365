//! highway: drives one ego vehicle down a three-lane highway with the
//! behavior planner and records what it decided.
//!
//! ```text
//! cargo run --release -p highway -- [planner.json] [traffic.csv | random:N]
//! ```
//!
//! Without arguments the default `PlannerConfig` and an embedded traffic
//! scenario are used.  `random:N` draws `N` vehicles from the seed instead.  Output lands in `output/highway`.  Set `RUST_LOG`
//! (e.g. `RUST_LOG=hp_planner=debug`) to see per-candidate costs.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hp_core::{Maneuver, SimClock, SimConfig, SimRng, Tick, VehicleSnapshot};
use hp_output::writer::OutputWriter;
use hp_output::{CsvWriter, SimOutputObserver};
use hp_planner::{Planner, PlannerConfig};
use hp_sim::{JitterTraffic, PlanningTraffic, SimBuilder, SimObserver, TickReport};
use hp_sim::{ScenarioSpec, load_traffic_csv, load_traffic_reader, random_traffic};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64   = 42;
const SIM_SECS:              f64   = 40.0;
const OUTPUT_INTERVAL_TICKS: u64   = 5;
const PREDICTION_HORIZON:    usize = 2;
/// Chance per tick that a traffic vehicle taps the brakes.
const BRAKE_PROBABILITY:     f64   = 0.002;
const OUTPUT_DIR:            &str  = "output/highway";

// ── Traffic CSV ───────────────────────────────────────────────────────────────

// Eight cars spread over three lanes around the ego start (lane 1, s = 0).
const TRAFFIC_CSV: &str = "\
vehicle_id,lane,s,v,a\n\
0,0,25.0,17.0,0.0\n\
1,1,60.0,14.0,0.0\n\
2,2,10.0,21.0,0.0\n\
3,0,-45.0,20.0,0.0\n\
4,1,140.0,12.5,0.0\n\
5,2,95.0,16.0,0.0\n\
6,0,120.0,19.0,0.0\n\
7,2,-60.0,22.0,0.0\n\
";

// ── Observer wrapper to count decisions ──────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    lane_changes: usize,
    fallbacks:    usize,
    ego_rows:     usize,
    summary_rows: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, lane_changes: 0, fallbacks: 0, ego_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let maneuver = report.ego.trajectory.maneuver();
        if maneuver.is_lane_change() {
            self.lane_changes += 1;
            info!(tick = %report.tick, %maneuver, lane = report.ego.trajectory.projected.lane, "ego changed lane");
        }
        self.fallbacks += report.ego.fallback as usize;
        self.summary_rows += 1;
        self.inner.on_tick_end(report);
    }

    fn on_snapshot(&mut self, report: &TickReport, traffic: &[Planner]) {
        self.ego_rows += 1;
        self.inner.on_snapshot(report, traffic);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_planner_config(path: Option<&str>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening planner config {path}"))?;
    let config: PlannerConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing planner config {path}"))?;
    config.validate()?;
    Ok(config)
}

fn load_traffic(
    arg:    Option<&str>,
    config: &PlannerConfig,
    ego:    &VehicleSnapshot,
) -> Result<Vec<VehicleSnapshot>> {
    let traffic = match arg {
        Some(arg) if arg.starts_with("random:") => {
            let count = arg["random:".len()..]
                .parse()
                .with_context(|| format!("bad vehicle count in {arg}"))?;
            let spec = ScenarioSpec {
                vehicles: count,
                lanes:    config.lanes_available,
                ..ScenarioSpec::default()
            };
            random_traffic(&spec, std::slice::from_ref(ego), &mut SimRng::new(SEED))?
        }
        Some(path) => load_traffic_csv(Path::new(path))
            .with_context(|| format!("loading traffic {path}"))?,
        None => load_traffic_reader(Cursor::new(TRAFFIC_CSV))?,
    };
    Ok(traffic)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("highway=info,hp_sim=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // 1. Planner configuration.
    let planner_config = load_planner_config(args.first().map(String::as_str))?;
    info!(
        target_speed = planner_config.target_speed,
        goal_s = planner_config.goal_s,
        goal_lane = planner_config.goal_lane,
        lanes = planner_config.lanes_available,
        "planner configured"
    );

    // 2. Traffic scenario.
    let ego = VehicleSnapshot::new(1, 0.0, 0.0, 0.0, Maneuver::KeepLane);
    let traffic = load_traffic(args.get(1).map(String::as_str), &planner_config, &ego)?;
    info!(vehicles = traffic.len(), "traffic loaded");

    // 3. Sim config.
    let config = SimConfig {
        timestep_secs:         planner_config.timestep,
        total_ticks:           SimClock::new(planner_config.timestep).ticks_for_secs(SIM_SECS),
        seed:                  SEED,
        num_threads:           None, // all logical cores
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        prediction_horizon:    PREDICTION_HORIZON,
    };
    println!("=== highway: behavior planner ===");
    println!(
        "Traffic: {}  |  Ticks: {} ({SIM_SECS} s)  |  Seed: {SEED}",
        traffic.len(),
        config.total_ticks
    );
    println!();

    // 4. Build sim.  Traffic vehicles run their own planner with the same
    //    tuning, plus the occasional brake tap.
    let model = JitterTraffic::new(PlanningTraffic, BRAKE_PROBABILITY)?;
    let mut sim = SimBuilder::new(config, planner_config, ego, model)
        .traffic(traffic)
        .build()?;

    // 5. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    println!(
        "Simulated {:.1} s in {:.3} s",
        sim.clock.elapsed_secs(),
        elapsed.as_secs_f64()
    );
    println!("  ego_trajectory.csv : {} rows", obs.ego_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!("  lane changes       : {}", obs.lane_changes);
    println!("  fallbacks          : {}", obs.fallbacks);
    println!();

    // 8. Final positions table.
    println!("{:<8} {:<6} {:>10} {:>8} {:<6}", "Vehicle", "Lane", "s (m)", "v (m/s)", "State");
    println!("{}", "-".repeat(42));
    let ego = sim.ego.ego();
    println!("{:<8} {:<6} {:>10.1} {:>8.2} {:<6}", "ego", ego.lane, ego.s, ego.v, ego.state);
    for (i, planner) in sim.traffic.iter().enumerate() {
        let car = planner.ego();
        println!("{:<8} {:<6} {:>10.1} {:>8.2} {:<6}", i, car.lane, car.s, car.v, car.state);
    }

    Ok(())
}
