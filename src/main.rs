//! Semester Siege headless runner
//!
//! Drives a session frame by frame without a window: the autopilot (or
//! nobody) supplies input, the status report is printed on an interval and
//! the final grade is printed when the run ends.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use semester_siege::autopilot::Autopilot;
use semester_siege::controls::ControlOutcome;
use semester_siege::render::CommandBuffer;
use semester_siege::{Session, Settings};

#[derive(Debug, Parser)]
#[command(name = "semester-siege")]
#[command(about = "Run a headless Semester Siege session", long_about = None)]
#[command(version)]
struct Args {
    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Session seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of frames to run
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Sleep between frames
    #[arg(long)]
    realtime: bool,

    /// Run without the built-in pilot
    #[arg(long)]
    no_autopilot: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(frames) = self.frames {
            settings.max_frames = frames;
        }
        settings.realtime |= self.realtime;
        settings.autopilot &= !self.no_autopilot;
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let settings = Args::parse().settings()?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Semester Siege (headless) starting, seed {}", seed);
    run(&settings, seed);
    Ok(())
}

fn run(settings: &Settings, seed: u64) {
    let mut session = Session::new(seed);
    let pilot = settings.autopilot.then(Autopilot::default);
    let interval = Duration::from_millis(settings.frame_interval_ms);
    let mut frame_buffer = CommandBuffer::new();

    let start = Instant::now();
    let mut now = start;

    for frame in 0..settings.max_frames {
        now = if settings.realtime {
            std::thread::sleep(interval);
            Instant::now()
        } else {
            now + interval
        };

        if let Some(pilot) = &pilot {
            for event in pilot.plan(&session.state, frame) {
                if let ControlOutcome::Quit(grade) = session.handle(event, now) {
                    println!("Semester dropped!\nFinal Grade: {}", grade);
                    return;
                }
            }
        }

        if let Some(report) = session.frame(now) {
            if report.enemies_defeated > 0 || report.player_hits > 0 {
                log::debug!("Frame {}: {:?}", frame, report);
            }
        }

        frame_buffer.clear();
        session.draw(&mut frame_buffer);
        log::trace!("Frame {} drew {} commands", frame, frame_buffer.commands.len());

        if settings.status_every > 0 && frame % settings.status_every == 0 {
            println!("{}", session.status());
        }

        if session.state.game_over {
            break;
        }
    }

    println!("{}", session.status());
    let simulated = (now - start).as_secs_f32();
    match session.state.final_grade {
        Some(grade) => println!(
            "Ran {} frames ({:.1}s simulated). Final Grade: {}",
            session.frames(),
            simulated,
            grade
        ),
        None => println!(
            "Stopped after {} frames ({:.1}s simulated) in wave {}. Grade so far: {}",
            session.frames(),
            simulated,
            session.state.wave,
            session.state.grade()
        ),
    }
}
