//! Entry point for the fetchtop panel. Parses args and runs the App.

mod app;
mod ui;

use std::env;
use std::time::Duration;

use fetchtop_engine::{fetch_once, EngineConfig, Scheduler};
use tracing_subscriber::EnvFilter;

use app::App;

const USAGE: &str = "Usage: fetchtop [--refresh SECONDS] [--tick MS] [--once [--json]]";

struct ParsedArgs {
    refresh: Duration,
    tick: Duration,
    once: bool,
    json: bool,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut parsed = ParsedArgs {
        refresh: Duration::from_secs(5),
        tick: Duration::from_millis(500),
        once: false,
        json: false,
        help: false,
    };
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--once" => parsed.once = true,
            "--json" => parsed.json = true,
            "--refresh" => {
                parsed.refresh = Duration::from_secs(parse_positive("--refresh", it.next())?);
            }
            "--tick" => {
                parsed.tick = Duration::from_millis(parse_positive("--tick", it.next())?);
            }
            _ if arg.starts_with("--refresh=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    parsed.refresh =
                        Duration::from_secs(parse_positive("--refresh", Some(v.to_string()))?);
                }
            }
            _ if arg.starts_with("--tick=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    parsed.tick =
                        Duration::from_millis(parse_positive("--tick", Some(v.to_string()))?);
                }
            }
            _ => return Err(format!("Unexpected argument '{arg}'. {USAGE}")),
        }
    }
    if parsed.json && !parsed.once {
        return Err(format!("--json only applies to --once. {USAGE}"));
    }
    Ok(parsed)
}

fn parse_positive(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value. {USAGE}"))?;
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!(
            "{flag} needs a positive integer, got '{value}'. {USAGE}"
        )),
    }
}

/// Logs go to stderr so they never tear the panel; silent unless RUST_LOG
/// turns something on.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reuse the same parsing logic for testability
    let parsed = match parse_args(env::args()) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };
    if parsed.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_tracing();

    if parsed.once {
        let snapshot = fetch_once().await;
        if parsed.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            print!("{}", snapshot.to_text());
        }
        return Ok(());
    }

    let mut scheduler = Scheduler::new(EngineConfig {
        refresh: parsed.refresh,
        tick: parsed.tick,
    });
    scheduler.start()?;
    let mut app = App::new(scheduler.snapshots(), scheduler.meters());
    let result = app.run().await;
    scheduler.stop().await;
    result
}
