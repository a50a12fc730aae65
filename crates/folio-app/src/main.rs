use std::sync::Arc;

use folio_core::config::load_config;
use folio_core::constants::ROLE_ADMIN;
use folio_service::comment::CommentService;
use folio_service::document::DocumentService;
use folio_service::subscription::SubscriptionService;
use folio_service::tag::TagService;
use folio_store::model::user::User;
use folio_store::store::UserStore;
use folio_store::store::memory::MemoryStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Folio document service");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = Arc::new(MemoryStore::new());

    let admin = store
        .save_user(
            User::new(
                &config.admin.username,
                &config.admin.full_name,
                &config.admin.email,
            )
            .with_role(ROLE_ADMIN),
        )
        .await?;
    tracing::info!(user_id = %admin.id, username = %admin.username, "Admin user seeded");

    let documents = DocumentService::new(Arc::clone(&store), config.limits.clone());
    let comments = CommentService::new(Arc::clone(&store));
    let tags = TagService::new(Arc::clone(&store));
    let subscriptions = SubscriptionService::new(Arc::clone(&store));

    // Services are constructed here so an embedding frontend can take
    // ownership of them. Until one is wired in, keep the process alive for
    // operator tooling to attach.
    let _ = (&documents, &comments, &tags, &subscriptions);

    tracing::info!("Folio services ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
