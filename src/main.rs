//! ERGODIC: ergodicity, Kelly criterion and fission reference plots.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! then computes and renders every enabled figure in turn. A failing
//! figure is logged and the run carries on with the next one.

use anyhow::{bail, Context, Result};
use std::fs;
use std::time::Instant;
use tracing::{error, info};

use ergodic::config::AppConfig;
use ergodic::render::{self, Figure};
use ergodic::simulation::{coin_flip_run, seeded_rng, BettingSimulator, MultiplicativeGame};
use ergodic::strategy::KellyGame;
use ergodic::types::Band;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = AppConfig::load_or_default(CONFIG_PATH)?;
    fs::create_dir_all(&cfg.output.dir).with_context(|| {
        format!("Failed to create output directory: {}", cfg.output.dir.display())
    })?;

    info!(
        output_dir = %cfg.output.dir.display(),
        width = cfg.output.width,
        height = cfg.output.height,
        "ERGODIC starting up"
    );

    let figures: [(&str, bool, fn(&AppConfig) -> Result<()>); 6] = [
        ("ergodic", cfg.ergodic.enabled, plot_coin_flips),
        ("kelly_curve", cfg.growth_curve.enabled, plot_growth_curve),
        ("kelly_sim", cfg.kelly_sim.enabled, plot_kelly_simulations),
        ("non_ergodic", cfg.non_ergodic.enabled, plot_multiplicative),
        ("cross_sections", cfg.physics.cross_sections, plot_cross_sections),
        ("spectra", cfg.physics.spectra, plot_spectra),
    ];

    let mut failed = 0usize;
    for (name, enabled, run) in figures {
        if !enabled {
            info!(figure = name, "Figure disabled, skipping");
            continue;
        }
        let started = Instant::now();
        match run(&cfg) {
            Ok(()) => info!(
                figure = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Figure complete"
            ),
            Err(e) => {
                error!(figure = name, error = format!("{e:#}"), "Figure failed, continuing");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} figure(s) failed");
    }
    info!("All figures written.");
    Ok(())
}

fn figure(cfg: &AppConfig, file_name: &str) -> Figure {
    Figure::new(&cfg.output.dir, file_name, (cfg.output.width, cfg.output.height))
}

fn plot_coin_flips(cfg: &AppConfig) -> Result<()> {
    let c = &cfg.ergodic;
    let mut rng = seeded_rng(c.seed);
    let run = coin_flip_run(c.steps, c.win_prob, &mut rng)?;
    info!(
        steps = c.steps,
        final_time_average = format!("{:.3}", run.time_average.last().copied().unwrap_or(0.0)),
        ensemble_average = format!("{:.3}", run.ensemble_average),
        "Coin flips simulated"
    );
    render::render_coin_flips(&figure(cfg, "ergodic.png"), &run)
        .context("Failed to render coin flip chart")
}

fn plot_growth_curve(cfg: &AppConfig) -> Result<()> {
    let c = &cfg.growth_curve;
    let game = KellyGame::new(c.win_prob, c.win_coef, c.loss_coef);
    let curve = game.growth_curve(c.fraction_max, c.samples);
    info!(
        kelly_fraction = format!("{:.3}", game.kelly_fraction()),
        points = curve.len(),
        "Growth curve computed"
    );
    render::render_growth_curve(
        &figure(cfg, "kelly_curve.png"),
        &game,
        &curve,
        c.fraction_max,
        (c.y_min, c.y_max),
    )
    .context("Failed to render growth curve")
}

fn plot_kelly_simulations(cfg: &AppConfig) -> Result<()> {
    let c = &cfg.kelly_sim;
    let simulator = BettingSimulator::new(c.percentiles);
    let f_kelly = KellyGame::new(c.win_prob, c.win_coef, c.loss_coef).kelly_fraction();

    for &rounds in &c.rounds {
        let scenario = c.scenario(rounds);
        // Every round count replays the same seed.
        let mut rng = seeded_rng(c.seed);
        let table = simulator
            .simulate(&scenario, &mut rng)
            .with_context(|| format!("Kelly simulation failed for {rounds} rounds"))?;

        let best = |band: Band| table.best_for(band).map(|r| r.fraction).unwrap_or(f64::NAN);
        info!(
            rounds,
            best_low = format!("{:.3}", best(Band::Low)),
            best_mid = format!("{:.3}", best(Band::Mid)),
            best_high = format!("{:.3}", best(Band::High)),
            kelly = format!("{f_kelly:.3}"),
            "Optimal fractions"
        );

        render::render_kelly_simulation(
            &figure(cfg, &format!("kelly_sim_{rounds}.png")),
            &scenario,
            &table,
            simulator.percentiles(),
        )
        .with_context(|| format!("Failed to render Kelly chart for {rounds} rounds"))?;
    }
    Ok(())
}

fn plot_multiplicative(cfg: &AppConfig) -> Result<()> {
    let c = &cfg.non_ergodic;
    let game = MultiplicativeGame::new(c.win_prob, c.up_factor, c.down_factor);
    let mut rng = seeded_rng(c.seed);
    let run = game.run(c.steps, &mut rng)?;
    info!(
        steps = c.steps,
        final_value = format!("{:.4}", run.path.last().copied().unwrap_or(1.0)),
        final_time_average = format!("{:.4}", run.time_average.last().copied().unwrap_or(1.0)),
        final_ensemble_average = format!("{:.4}", run.ensemble_average.last().copied().unwrap_or(1.0)),
        "Multiplicative path simulated"
    );
    render::render_multiplicative(&figure(cfg, "non-ergodic.png"), &run)
        .context("Failed to render multiplicative chart")
}

fn plot_cross_sections(cfg: &AppConfig) -> Result<()> {
    render::render_cross_sections(&figure(cfg, "cross-sections.png"))
        .context("Failed to render cross-section chart")
}

fn plot_spectra(cfg: &AppConfig) -> Result<()> {
    render::render_spectra(&figure(cfg, "energy-distribution-emitted-neutrons.png"))
        .context("Failed to render spectra chart")
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ergodic=info"));

    let json_logging = std::env::var("ERGODIC_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
