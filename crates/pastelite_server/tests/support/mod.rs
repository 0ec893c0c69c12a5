//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use pastelite_core::{store::MemoryStore, ManualClock};
use pastelite_server::{create_app, AppState, Clock, Config, Database, PasteService, PasteStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) const TEST_BASE_URL: &str = "http://paste.test";

pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_paste_size: 10_000_000,
        store_timeout_ms: 5_000,
        base_url: Some(TEST_BASE_URL.to_string()),
    }
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let config = test_config_for_db_path(&db_path);
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let server = TestServer::new(create_app(AppState::new(config, db), false)).expect("server");
    (server, temp_dir)
}

/// Server over an arbitrary store and clock.
pub(crate) fn test_server_with(
    config: Config,
    store: Arc<dyn PasteStore>,
    clock: Arc<dyn Clock>,
) -> TestServer {
    let state = AppState::with_service(config, PasteService::new(store, clock));
    TestServer::new(create_app(state, false)).expect("server")
}

/// In-memory server whose clock the test drives.
pub(crate) fn setup_manual_clock_server() -> (TestServer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let config = test_config_for_db_path(Path::new("/unused"));
    let server = test_server_with(config, Arc::new(MemoryStore::new()), clock.clone());
    (server, clock)
}
