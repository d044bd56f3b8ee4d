//! Shared harness for integration tests: a session wired to the in-memory
//! store and a recording projector, over a small three-zone layout.

use std::sync::Arc;

use boothsync::projector::RecordingProjector;
use boothsync::store::MemoryStore;
use boothsync::{AreaLayout, Booth, Config, Session, StaticIdentity, ZoneConfig};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub projector: Arc<RecordingProjector>,
    pub session: Session,
}

/// Two leaf zones plus one tent with two sub-booths.
pub fn test_zones() -> ZoneConfig {
    ZoneConfig {
        zones: vec![
            "zone_a".to_string(),
            "zone_b".to_string(),
            "tent1".to_string(),
        ],
        areas: vec![AreaLayout {
            key: "tentone".to_string(),
            title: "Tent 1".to_string(),
            tent_id: "tent1".to_string(),
            booths: vec![
                Booth {
                    id: "tent1_booth1".to_string(),
                    name: "Booth 1".to_string(),
                },
                Booth {
                    id: "tent1_booth2".to_string(),
                    name: "Booth 2".to_string(),
                },
            ],
        }],
    }
}

pub fn start_session() -> Harness {
    start_session_with(Config::default())
}

pub fn start_session_with(config: Config) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let projector = Arc::new(RecordingProjector::new());
    let session = Session::start(
        config,
        test_zones(),
        store.clone(),
        projector.clone(),
        Arc::new(StaticIdentity::admin("ops@example.com")),
    );
    Harness {
        store,
        projector,
        session,
    }
}

/// Let the background workers drain their queues and timers.
pub async fn settle() {
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
}
