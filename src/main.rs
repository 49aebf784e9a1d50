//! Mirror Laser headless runner
//!
//! Plays generated levels without touching any mirror and logs how each one
//! ends. Useful for eyeballing level generation.
//!
//! Environment:
//! - `MIRROR_LASER_CONFIG`: path to a settings JSON file
//! - `MIRROR_LASER_SEED`: run seed (default 1)
//! - `MIRROR_LASER_LEVELS`: number of levels to play (default 1)
//! - `RUST_LOG`: log filter (e.g. `debug`, `mirror_laser=trace`)

use std::error::Error;
use std::path::PathBuf;

use mirror_laser::Settings;
use mirror_laser::sim::{Session, Status};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable {key}={raw}");
            default
        }),
        Err(_) => default,
    }
}

fn load_settings() -> Settings {
    let Some(path) = std::env::var_os("MIRROR_LASER_CONFIG").map(PathBuf::from) else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default settings, {} unusable: {e}", path.display());
            Settings::default()
        }
    }
}

/// Board dump with the beam drawn as `*`
fn render(session: &Session) -> String {
    let beam = session.beam().pos;
    let side = session.board().side() as usize;
    let mut out = String::new();
    for (pos, cell) in session.board().iter() {
        out.push(if pos == beam { '*' } else { cell.glyph() });
        if pos.x as usize == side - 1 {
            out.push('\n');
        }
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Mirror Laser (headless) starting...");

    let settings = load_settings();
    let seed: u64 = env_or("MIRROR_LASER_SEED", 1);
    let levels: u32 = env_or("MIRROR_LASER_LEVELS", 1);
    log::info!(
        "{}x{} board, {} ms/tick ({})",
        settings.level.side_length,
        settings.level.side_length,
        settings.speed.tick_interval_ms(),
        settings.speed.as_str()
    );

    let mut session = Session::new(settings, seed)?;
    // Every beam state visited twice means the beam is looping
    let side = session.board().side() as u64;
    let max_ticks = side * side * 4;

    for level in 1..=levels {
        if level > 1 {
            session.new_level()?;
        }
        println!(
            "Level {} (seed {}):\n{}",
            session.level(),
            session.seed(),
            render(&session)
        );

        session.start();
        while session.status() == Status::Running && session.ticks() <= max_ticks {
            session.tick();
        }

        let outcome = match session.status() {
            Status::Running => "Laser is stuck in a loop".to_string(),
            status => status.message().to_string(),
        };
        println!("{}\n{outcome} after {} ticks\n", render(&session), session.ticks());
    }

    Ok(())
}
