//! Command-line client for the study rooms booking API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mockable::DefaultEnv;
use tokio::runtime::Builder;

use study_rooms::client::render::{
    EXIT_UNREACHABLE, Rendered, render, render_cancel, render_unreachable,
};
use study_rooms::client::{ApiClient, NewBooking, resolve_api};

/// `study-rooms-cli` arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "study-rooms-cli",
    about = "Browse rooms and manage bookings against the study rooms API",
    version
)]
struct CliArgs {
    /// Base API URL. Falls back to `STUDY_API`, then http://127.0.0.1:8000.
    #[arg(long, global = true, value_name = "url")]
    api: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List available rooms.
    Rooms,
    /// Search for rooms available in a time window.
    Search {
        /// Day to search, `YYYY-MM-DD`.
        date: String,
        /// Window start, `HH:MM` (24h).
        start: String,
        /// Window end, `HH:MM` (24h).
        end: String,
    },
    /// Create a booking.
    Book {
        user_id: i64,
        room_id: i64,
        /// ISO datetime, e.g. 2025-11-02T13:00:00.
        start: String,
        /// ISO datetime, e.g. 2025-11-02T14:00:00.
        end: String,
        #[arg(short = 'g', long, default_value_t = 1)]
        group_size: i64,
    },
    /// List bookings for a user.
    Mine { user_id: i64 },
    /// Cancel a booking by id.
    Cancel { booking_id: i64 },
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let rendered = match run(args) {
        Ok(rendered) => rendered,
        Err(error) => Rendered {
            stdout: String::new(),
            stderr: format!("{error}\n"),
            exit_code: EXIT_UNREACHABLE,
        },
    };
    emit(&rendered);
    ExitCode::from(rendered.exit_code)
}

fn run(args: CliArgs) -> io::Result<Rendered> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    let base = resolve_api(args.api, &DefaultEnv::new());
    let client = ApiClient::new(base)
        .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
    Ok(runtime.block_on(execute(&client, args.command)))
}

async fn execute(client: &ApiClient, command: Command) -> Rendered {
    let outcome = match command {
        Command::Rooms => client.rooms().await.map(|res| render(&res, &[200])),
        Command::Search { date, start, end } => client
            .search(&date, &start, &end)
            .await
            .map(|res| render(&res, &[200])),
        Command::Book {
            user_id,
            room_id,
            start,
            end,
            group_size,
        } => {
            let booking = NewBooking {
                user_id,
                room_id,
                start,
                end,
                group_size,
            };
            client
                .book(&booking)
                .await
                .map(|res| render(&res, &[200, 201]))
        }
        Command::Mine { user_id } => client.mine(user_id).await.map(|res| render(&res, &[200])),
        Command::Cancel { booking_id } => client
            .cancel(booking_id)
            .await
            .map(|res| render_cancel(&res)),
    };
    outcome.unwrap_or_else(|error| render_unreachable(&error))
}

fn emit(rendered: &Rendered) {
    // A closed pipe leaves nothing useful to report.
    if !rendered.stdout.is_empty() {
        drop(io::stdout().lock().write_all(rendered.stdout.as_bytes()));
    }
    if !rendered.stderr.is_empty() {
        drop(io::stderr().lock().write_all(rendered.stderr.as_bytes()));
    }
}
