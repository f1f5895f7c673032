//! Dafuweng interactive console game.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;
mod render;
mod session;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Board file from the first argument or env, defaulting to map.dat
    let map_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DAFUWENG_MAP").ok())
        .unwrap_or_else(|| "map.dat".into());

    info!("Starting Dafuweng...");

    let board = match dafuweng_core::Board::load(&map_path) {
        Ok(board) => board,
        Err(err) => {
            warn!("failed to load board data from {map_path}: {err}");
            dafuweng_core::Board::default()
        }
    };
    if board.skipped_records() > 0 {
        warn!(
            "skipped {} malformed record(s) in {map_path}",
            board.skipped_records()
        );
    }

    session::run(board)
}
