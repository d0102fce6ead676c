use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phonics_srs::{
  config,
  curriculum::{self, Catalog},
  db::SqliteProgressStore,
  handlers,
  srs::{Scheduler, SystemClock},
  state::AppState,
};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phonics_srs=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let app_config = config::load_app_config();

  // A catalog that breaks an invariant must never reach the scheduler
  let catalog: Catalog = match &app_config.curriculum_path {
    Some(path) => curriculum::load_catalog(path),
    None => curriculum::builtin_catalog(),
  }
  .unwrap_or_else(|e| {
    tracing::error!("Invalid curriculum: {}", e);
    std::process::exit(1);
  });
  tracing::info!(
    "Loaded curriculum: {} cards, {} phonemes, {} lessons",
    catalog.len(),
    catalog.phonemes().len(),
    catalog.max_lesson()
  );

  let store = SqliteProgressStore::open(&app_config.database_path).expect("Failed to initialize database");

  let scheduler = Scheduler::with_catalog_curriculum(
    Arc::new(catalog),
    Arc::new(store),
    Arc::new(SystemClock),
    app_config.scheduler.clone(),
  );

  let app = handlers::router(AppState::new(Arc::new(scheduler))).layer(TraceLayer::new_for_http());

  let bind_addr = app_config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", app_config.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
