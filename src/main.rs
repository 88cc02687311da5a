//! Countdown Timer - interactive terminal front end
//!
//! Prints the remaining time on every change and reads control commands
//! (`start`, `pause`, `set <seconds>`, `status`, `quit`) from stdin.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use countdown_timer::{
    commands::Command,
    config::Config,
    controller::TimerController,
    state::TimerSnapshot,
    utils::shutdown_signal,
};

fn render(snapshot: &TimerSnapshot, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(snapshot)?)
    } else {
        let status = if snapshot.is_running { "running" } else { "paused" };
        Ok(format!("{} ({})", snapshot.formatted_time, status))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-timer v0.1.0 with {} minutes", config.minutes);

    let timer = TimerController::new(i64::try_from(config.minutes)?)?;
    let mut updates = timer.subscribe();
    let mut previous = updates.borrow_and_update().clone();
    println!("{}", render(&previous, config.json)?);

    if !config.paused {
        timer.start();
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", render(&snapshot, config.json)?);
                if snapshot.expired_since(&previous) {
                    println!("Time's up! Use `set <seconds>` to go again.");
                }
                previous = snapshot;
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(Command::Status) => {
                        println!("{}", render(&timer.snapshot(), config.json)?);
                    }
                    Ok(command) => {
                        if let Err(e) = command.apply(&timer) {
                            warn!("{}", e);
                        }
                    }
                    Err(e) => warn!("{}", e),
                }
            }

            result = &mut shutdown => {
                result?;
                info!("Shutdown signal received");
                break;
            }
        }
    }

    timer.pause();
    info!("Stopped at {}", timer.formatted_time());
    Ok(())
}
