//! Profile export service.
//!
//! Serves the skills-profile PDF export over HTTP. The evaluation
//! records are held in an in-memory store, optionally seeded from a
//! JSON file at startup.

use anyhow::Context;
use clap::Parser;
use profile_server::resolver::StoreResolver;
use profile_server::routes::{router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use store::MemoryEvalStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line configuration
#[derive(Debug, Parser)]
#[command(name = "profile-server", about = "Skills-profile PDF export service")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "PROFILE_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// JSON seed file with users, phases, categories, and grades
    #[arg(long, env = "PROFILE_SEED")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let store = match &args.seed {
        Some(path) => MemoryEvalStore::from_json_file(path)
            .await
            .with_context(|| format!("failed to load seed data from {}", path.display()))?,
        None => {
            tracing::warn!("No seed file given, starting with an empty store");
            MemoryEvalStore::new()
        }
    };
    let store: Arc<dyn store::EvalStore> = Arc::new(store);

    let state = Arc::new(AppState {
        resolver: Arc::new(StoreResolver::new(store.clone())),
        store,
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!("Listening on http://{}", args.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
