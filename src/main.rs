use attune::config::ResponderConfig;
use attune::pipeline::validate_utterance;
use attune::{ChatResponse, InMemoryHistoryStore, ModelHandles, Responder, SessionId};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging/tracing (stderr, so stdout stays one JSON reply per line)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("Attune Responder Booting...");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ResponderConfig::load(&path)?,
        None => ResponderConfig::default(),
    };

    // Models load exactly once and are shared by every request
    let models = ModelHandles::load(&config).await;
    if !models.is_available() {
        tracing::warn!("Running without a generation model; replies will be degraded");
    }

    let history = Arc::new(InMemoryHistoryStore::with_capacity(config.history_capacity));
    let responder = Responder::new(models, history, &config);
    let session = SessionId::generate();

    tracing::info!("Session {} active. One message per line, Ctrl+D to stop.", session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let utterance = match validate_utterance(&line) {
            Ok(u) => u,
            Err(e) => {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
                continue;
            }
        };

        let reply = responder.respond(utterance, &session).await;
        println!("{}", serde_json::to_string(&ChatResponse::from(&reply))?);
    }

    let stats = responder.stats();
    tracing::info!(
        "Session closed: {} replies ({} generated, {} guarded, {} fallback, {} degraded)",
        stats.replies.total,
        stats.replies.generated,
        stats.replies.guarded,
        stats.replies.fallback,
        stats.replies.degraded
    );
    Ok(())
}
