//! stayview - reservation cards from booking snapshots
//!
//! Wires together:
//! - Configuration loading
//! - Snapshot parsing and validation
//! - The reservation state engine and board
//! - Optional action dry-runs against an in-memory backend

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use stayview_actions::{GuestIdentity, MockBackend};
use stayview_api::{DenialReason, ReservationAction, ReservationView, VIEW_VERSION};
use stayview_config::load_config_or_default;
use stayview_core::{ActionDecision, ActionDispatcher, ReservationBoard, ReservationStateEngine};
use stayview_util::{default_config_path, parse_timestamp, BookingId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// stayview - Render reservation cards from booking snapshots
#[derive(Parser, Debug)]
#[command(name = "stayview")]
#[command(about = "Render reservation cards from booking snapshots", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/stayview/config.toml)
    #[arg(short, long, env = "STAYVIEW_CONFIG", default_value_os_t = default_config_path())]
    config: PathBuf,

    /// JSON file holding an array of booking records
    #[arg(short, long)]
    reservations: PathBuf,

    /// Evaluate as of this instant instead of the current time
    #[arg(long)]
    now: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Run an action against an in-memory backend before rendering
    #[arg(long, value_enum, requires = "booking")]
    action: Option<ActionArg>,

    /// Booking the action applies to
    #[arg(long)]
    booking: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ActionArg {
    Edit,
    Delete,
    Pay,
}

impl From<ActionArg> for ReservationAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Edit => ReservationAction::Edit,
            ActionArg::Delete => ReservationAction::Delete,
            ActionArg::Pay => ReservationAction::Pay,
        }
    }
}

/// A snapshot that failed validation
#[derive(Debug, Serialize)]
struct Rejected {
    index: usize,
    error: String,
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    version: u32,
    now: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<&'a ActionDecision>,
    reservations: &'a [ReservationView],
    rejected: &'a [Rejected],
}

/// Dispatch one action and wait for its completion event
async fn run_action(
    board: &mut ReservationBoard,
    engine: &ReservationStateEngine,
    action: ReservationAction,
    booking_id: BookingId,
    now: DateTime<Utc>,
) -> ActionDecision {
    let Some(reservation) = board.get(booking_id).cloned() else {
        warn!(booking_id = %booking_id, "Action requested for booking not on display");
        return ActionDecision::Denied {
            reasons: vec![DenialReason::UnknownBooking { booking_id }],
        };
    };

    let backend = Arc::new(MockBackend::with_bookings(
        board.reservations().iter().map(|r| r.id),
    ));
    let (dispatcher, mut events) =
        ActionDispatcher::new(backend.clone(), backend, engine.navigator());

    let decision = match action {
        ReservationAction::Edit => dispatcher.request_edit(&reservation, now),
        ReservationAction::Delete => dispatcher.request_delete(&reservation, now),
        ReservationAction::Pay => {
            let payer = GuestIdentity::new(reservation.guest_id);
            dispatcher.request_payment(&reservation, payer, now)
        }
    };
    info!(booking_id = %booking_id, action = %action, decision = ?decision, "Action requested");

    if matches!(decision, ActionDecision::Dispatched { .. })
        && let Some(event) = events.recv().await
    {
        debug!(event = ?event, "Action completed");
        if let Some(change) = board.handle_event(&event) {
            info!(change = ?change, "Board changed");
        }
    }

    decision
}

fn print_text(views: &[ReservationView], rejected: &[Rejected], decision: Option<&ActionDecision>) {
    if let Some(decision) = decision {
        match decision {
            ActionDecision::Dispatched {
                booking_id,
                action,
            } => println!("{} dispatched for #{}", action, booking_id),
            ActionDecision::Navigate { route } => println!("edit: {}", route),
            ActionDecision::Denied { reasons } => {
                for reason in reasons {
                    println!("denied: {}", reason);
                }
            }
        }
        println!();
    }

    for view in views {
        println!("#{} {} [{}]", view.booking_id, view.title, view.status);
        println!("  {}", view.date_line);

        let paid = if view.paid_badge { " (paid)" } else { "" };
        println!("  {} · {}{}", view.guests, view.price, paid);
        println!("  {}", view.booked_at);

        let mut slots: Vec<&str> = view.actions.iter().map(|a| a.as_str()).collect();
        if view.paid_indicator {
            slots.push("paid");
        }
        if !slots.is_empty() {
            println!("  actions: {}", slots.join(", "));
        }
        if let Some(route) = &view.edit_route {
            println!("  edit: {}", route);
        }
        println!();
    }

    for rejected in rejected {
        println!("record {} rejected: {}", rejected.index, rejected.error);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let settings = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    info!(config_path = %args.config.display(), "Configuration loaded");

    let engine = ReservationStateEngine::new(&settings);

    let now = match &args.now {
        Some(value) => parse_timestamp(value)
            .with_context(|| format!("Invalid --now value {:?}", value))?,
        None => engine.now(),
    };

    let json = std::fs::read_to_string(&args.reservations)
        .with_context(|| format!("Failed to read {:?}", args.reservations))?;
    let records = stayview_api::parse_snapshot_list(&json)
        .with_context(|| format!("Failed to parse {:?}", args.reservations))?;

    let mut rejected = Vec::new();
    let mut board = ReservationBoard::default();
    for (index, record) in records.into_iter().enumerate() {
        match record.map_err(|e| e.to_string()) {
            Ok(reservation) => {
                if let Err(e) = board.apply_snapshot(reservation) {
                    warn!(index, error = %e, "Snapshot not applied");
                    rejected.push(Rejected {
                        index,
                        error: e.to_string(),
                    });
                }
            }
            Err(error) => {
                warn!(index, error = %error, "Invalid booking record");
                rejected.push(Rejected { index, error });
            }
        }
    }

    info!(count = board.len(), rejected = rejected.len(), now = %now, "Snapshots loaded");

    let decision = match (args.action, args.booking) {
        (Some(action), Some(id)) => {
            Some(run_action(&mut board, &engine, action.into(), BookingId::new(id), now).await)
        }
        _ => None,
    };

    let views = board.views(&engine, now);

    match args.format {
        OutputFormat::Text => print_text(&views, &rejected, decision.as_ref()),
        OutputFormat::Json => {
            let output = Output {
                version: VIEW_VERSION,
                now,
                decision: decision.as_ref(),
                reservations: &views,
                rejected: &rejected,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
