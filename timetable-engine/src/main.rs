use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use timetable_engine::conflict::{DetectorConfig, detect_conflicts};
use timetable_engine::domain::{Minutes, ScheduleId};
use timetable_engine::metrics::{positions_at, train_metrics};
use timetable_engine::scheduler::{SchedulerConfig, StopScheduler};
use timetable_engine::store::{MemoryStore, Snapshot};

/// Snapshot document used when `TIMETABLE_SNAPSHOT` is not set.
const DEFAULT_SNAPSHOT: &str = "timetable.json";

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| matches!(v.as_str(), "1" | "true" | "yes"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("timetable_engine=info")),
        )
        .init();

    let path = PathBuf::from(
        std::env::var("TIMETABLE_SNAPSHOT").unwrap_or_else(|_| DEFAULT_SNAPSHOT.to_string()),
    );
    let schedule = match std::env::var("TIMETABLE_SCHEDULE_ID") {
        Ok(raw) => match raw.parse::<i64>() {
            Ok(id) => ScheduleId(id),
            Err(e) => {
                error!(value = %raw, error = %e, "Invalid TIMETABLE_SCHEDULE_ID");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => ScheduleId::default(),
    };
    let at = match std::env::var("TIMETABLE_AT") {
        Ok(raw) => match Minutes::parse_hhmm(&raw) {
            Ok(at) => at,
            Err(e) => {
                error!(value = %raw, error = %e, "Invalid TIMETABLE_AT");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => Minutes::from(Local::now().time()),
    };

    let store = match MemoryStore::load(&path) {
        Ok(store) => store,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load snapshot");
            return ExitCode::FAILURE;
        }
    };

    if env_flag("TIMETABLE_RECOMPUTE") {
        let snapshot = match Snapshot::fetch(&store, schedule).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Failed to read snapshot");
                return ExitCode::FAILURE;
            }
        };

        let config = SchedulerConfig::default();
        let scheduler = StopScheduler::new(&store, &config);
        if let Err(e) = scheduler.recompute_all(&snapshot).await {
            error!(error = %e, "Failed to recompute stops");
            return ExitCode::FAILURE;
        }
        if let Err(e) = store.save(&path).await {
            error!(path = %path.display(), error = %e, "Failed to save snapshot");
            return ExitCode::FAILURE;
        }
        info!(path = %path.display(), "Saved recomputed stops");
    }

    // Re-read so detection sees any recomputed stops
    let snapshot = match Snapshot::fetch(&store, schedule).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Failed to read snapshot");
            return ExitCode::FAILURE;
        }
    };
    let network = snapshot.network();
    let legend = snapshot.legend();

    let conflicts = detect_conflicts(
        &network,
        &snapshot.trains,
        &snapshot.train_stops,
        &DetectorConfig::default(),
    );

    println!("Schedule {schedule}: {} trains", snapshot.trains.len());
    println!();
    println!("Speeds:");
    for m in train_metrics(&network, &snapshot.trains, &snapshot.train_stops) {
        let Some(train) = snapshot.train(m.train_id) else {
            continue;
        };
        println!(
            "  {:>8} {:<12} {:>7.1} km/h  ({} min moving, {} min dwell)",
            train.number,
            legend.label(train.train_type),
            m.speed_kmh,
            m.moving_minutes,
            m.dwell_minutes
        );
    }

    println!();
    println!("Positions at {at}:");
    for p in positions_at(&network, &snapshot.trains, &snapshot.train_stops, at) {
        let Some(train) = snapshot.train(p.train_id) else {
            continue;
        };
        println!("  {:>8} {:>7.1} km", train.number, p.distance_km);
    }

    println!();
    if conflicts.is_empty() {
        println!("No conflicts.");
    } else {
        println!("Conflicts ({}):", conflicts.len());
        for conflict in &conflicts {
            println!("  {conflict}");
        }
    }

    ExitCode::SUCCESS
}
