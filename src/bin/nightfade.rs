//! Command-line front-end for the nightfade scheduling engine.

use anyhow::bail;
use nightfade::engine::manager::ScheduleEngine;
use nightfade::{AppConfig, LaunchctlCli, Schedule, fade_dirs, nightlight};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nightfade=info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("nightfade failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "list" => list(args.iter().any(|a| a == "--json")),
        "add" => {
            if args.len() != 4 {
                bail!("add requires a time (HH:MM) and an intensity (0-100)");
            }
            let (hour, minute) = parse_time(&args[2])?;
            let Ok(intensity) = args[3].parse::<i32>() else {
                bail!("invalid intensity `{}`", args[3]);
            };
            add(hour, minute, intensity)
        }
        "remove" => {
            if args.len() != 3 {
                bail!("remove requires a time (HH:MM)");
            }
            let (hour, minute) = parse_time(&args[2])?;
            remove(hour, minute)
        }
        "preset" => preset(),
        "doctor" => doctor(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => bail!("unknown subcommand `{other}` (use list|add|remove|preset|doctor)"),
    }
}

fn engine() -> ScheduleEngine<LaunchctlCli> {
    ScheduleEngine::system(&AppConfig::load())
}

fn list(json: bool) -> anyhow::Result<()> {
    let mut engine = engine();
    engine.reload();

    if json {
        let rows: Vec<_> = engine
            .schedules()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "hour": s.hour,
                    "minute": s.minute,
                    "intensity": s.intensity,
                    "time": s.display_time(),
                    "label": s.label(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if engine.schedules().is_empty() {
        println!("no schedules registered");
        return Ok(());
    }
    for schedule in engine.schedules() {
        println!(
            "{:>8}  {:>4}%  {}",
            schedule.display_time(),
            schedule.intensity,
            schedule.label()
        );
    }
    Ok(())
}

fn add(hour: u8, minute: u8, intensity: i32) -> anyhow::Result<()> {
    let schedule = Schedule::new(hour, minute, intensity);
    let mut engine = engine();
    engine.add(&schedule);

    // The list after reload, not our intent, is the report.
    if engine
        .schedules()
        .iter()
        .any(|s| s.label() == schedule.label())
    {
        println!("scheduled {} -> {}%", schedule.display_time(), intensity);
    } else {
        println!(
            "schedule for {} did not appear after reload; rerun with RUST_LOG=nightfade=debug",
            schedule.display_time()
        );
    }
    Ok(())
}

fn remove(hour: u8, minute: u8) -> anyhow::Result<()> {
    // Intensity is irrelevant to identity; any value locates the job.
    let schedule = Schedule::new(hour, minute, 0);
    let mut engine = engine();
    engine.remove(&schedule);
    println!("removed {}", schedule.display_time());
    Ok(())
}

fn preset() -> anyhow::Result<()> {
    let mut engine = engine();
    engine.add_preset();
    println!("added the dusk-to-midnight ramp:");
    for schedule in engine.schedules() {
        println!("{:>8}  {:>4}%", schedule.display_time(), schedule.intensity);
    }
    Ok(())
}

fn doctor() -> anyhow::Result<()> {
    let config = AppConfig::load();
    println!("config file:     {}", fade_dirs::config_file().display());
    println!("agents dir:      {}", fade_dirs::agents_dir().display());
    println!(
        "nightlight path: {}",
        nightlight::discover(config.nightlight_path.as_deref()).display()
    );
    Ok(())
}

/// Parse a `HH:MM` wall-clock argument.
fn parse_time(text: &str) -> anyhow::Result<(u8, u8)> {
    let parsed = text.split_once(':').and_then(|(h, m)| {
        let hour: u8 = h.parse().ok()?;
        let minute: u8 = m.parse().ok()?;
        (hour <= 23 && minute <= 59).then_some((hour, minute))
    });
    match parsed {
        Some(time) => Ok(time),
        None => bail!("invalid time `{text}` (expected HH:MM)"),
    }
}

fn print_usage() {
    println!("nightfade - scheduled Night Shift warmth ramps");
    println!();
    println!("usage:");
    println!("  nightfade list [--json]        show registered schedules");
    println!("  nightfade add <HH:MM> <0-100>  schedule a warmth change");
    println!("  nightfade remove <HH:MM>       remove the schedule at a time");
    println!("  nightfade preset               add the dusk-to-midnight ramp");
    println!("  nightfade doctor               print resolved paths");
}
