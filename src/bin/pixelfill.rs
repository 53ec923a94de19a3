use std::io::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

use clap::Parser;
use image::Rgba;
use pixelfill::cli::{Cli, Commands};
use pixelfill::config::TimerConfig;
use pixelfill::driver::{Driver, IntervalScheduler, Outcome};
use pixelfill::error::Result;
use pixelfill::session::Session;
use pixelfill::socket::{self, SocketListener};
use pixelfill::{TimerState, hud};

const HUD_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render {
            config,
            width,
            height,
            at,
            out,
            hud,
        } => render(config.as_deref(), width, height, at, &out, hud),
        Commands::Preview {
            config,
            width,
            height,
            snapshot_every,
            snapshot_dir,
        } => preview(config.as_deref(), width, height, snapshot_every, &snapshot_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<TimerConfig> {
    match path {
        Some(path) => TimerConfig::load(path),
        None => Ok(TimerConfig::default()),
    }
}

fn build_session(config: &TimerConfig, width: u32, height: u32, now: Instant) -> Result<Session> {
    Session::new(
        config.window(now)?,
        config.colors()?,
        config.mode(),
        width,
        height,
    )
}

fn render(
    config: Option<&Path>,
    width: u32,
    height: u32,
    at: Option<f64>,
    out: &Path,
    draw_hud: bool,
) -> Result {
    let config = load_config(config)?;
    let now = Instant::now();
    let mut session = build_session(&config, width, height, now)?;

    // render at an explicit progress point, or wherever the clock is now
    let eval_at = match at {
        Some(progress) => session.window().instant_at(progress),
        None => now,
    };
    let report = session.step(eval_at);

    let mut surface = session.surface().clone();
    if draw_hud {
        let remaining = format!("{} remaining", report.remaining);
        hud::draw_status(
            &mut surface,
            &[&report.percent, &remaining, &report.rate],
            HUD_COLOR,
        );
        if let Some(title) = &config.title {
            hud::draw_title(&mut surface, title, HUD_COLOR);
        }
    }

    surface.save(out)?;
    tracing::info!(out = %out.display(), percent = %report.percent, "frame written");
    Ok(())
}

fn preview(
    config: Option<&Path>,
    width: u32,
    height: u32,
    snapshot_every: Option<u64>,
    snapshot_dir: &Path,
) -> Result {
    let config = load_config(config)?;
    let session = build_session(&config, width, height, Instant::now())?;

    let (tx, rx) = socket::command_channel();
    let mut listener = match SocketListener::new(tx) {
        Ok(listener) => Some(listener),
        Err(e) => {
            tracing::warn!(error = %e, "control socket unavailable, preview runs uncontrolled");
            None
        }
    };

    let mut driver =
        Driver::new(session, IntervalScheduler::new(config.interval())).with_commands(rx);

    let title = config.title.clone();
    let mut last_snapshot = Instant::now();
    let mut snapshot_seq = 0u32;

    let outcome = driver.run(|frame| {
        print!(
            "\r{} | {} remaining | {}   ",
            frame.report.percent, frame.report.remaining, frame.report.rate
        );
        let _ = std::io::stdout().flush();

        let periodic_due = snapshot_every
            .is_some_and(|secs| last_snapshot.elapsed() >= Duration::from_secs(secs));
        let final_frame = frame.report.state == TimerState::Complete;
        if frame.snapshot || periodic_due || final_frame {
            last_snapshot = Instant::now();
            snapshot_seq += 1;
            let out = snapshot_dir.join(format!("pixelfill-{snapshot_seq:04}.png"));

            let mut snapshot = frame.surface.clone();
            let remaining = format!("{} remaining", frame.report.remaining);
            hud::draw_status(
                &mut snapshot,
                &[&frame.report.percent, &remaining, &frame.report.rate],
                HUD_COLOR,
            );
            if let Some(title) = &title {
                hud::draw_title(&mut snapshot, title, HUD_COLOR);
            }

            match snapshot.save(&out) {
                Ok(()) => tracing::info!(out = %out.display(), "snapshot written"),
                Err(e) => tracing::warn!(error = %e, "snapshot failed"),
            }
        }
    });

    println!();
    match outcome {
        Outcome::Completed => println!("100.00% Complete!"),
        Outcome::Cancelled => println!("preview stopped"),
    }

    if let Some(listener) = listener.as_mut() {
        listener.shutdown();
    }
    Ok(())
}
