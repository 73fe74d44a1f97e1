//! Bootstrap tests - content loading, board regeneration and degradation

use std::cell::Cell;
use std::time::Duration;

use async_trait::async_trait;

use memory_match::content::{ContentSource, DirContentSource, LoadError, MediaAsset};
use memory_match::core::{generate, ContentCatalog};
use memory_match::persist::{KeyValueStore, MemoryStore};
use memory_match::session::{Collaborators, GameSession, ManualClock, PageUrl, StartOptions};
use memory_match::types::{Difficulty, ELAPSED_TIME_KEY, MATCHED_TILES_KEY, MOVE_COUNT_KEY};

const CATALOG: &str = r##"{
    "rarities": {
        "covert": { "id": 6, "name": "Covert", "color": "#eb4b4b" }
    },
    "weapons": [
        {
            "id": 7,
            "baseWeapon": "AK-47",
            "skins": [
                { "id": "ak-redline", "name": "Redline", "rarity": "classified" },
                { "id": "ak-vulcan", "name": "Vulcan", "rarity": "covert" },
                { "id": "ak-slate", "name": "Slate", "rarity": "mil-spec" }
            ]
        },
        {
            "id": 9,
            "baseWeapon": "AWP",
            "skins": [
                { "id": "awp-asiimov", "name": "Asiimov", "rarity": "covert" },
                { "id": "awp-missing", "name": "Missing Art", "rarity": "restricted" }
            ]
        },
        { "id": 11, "baseWeapon": "Empty", "skins": [] }
    ]
}"##;

/// Serves [`CATALOG`]; every asset except `awp-missing` loads.
#[derive(Default)]
struct MockSource {
    catalog_calls: Cell<usize>,
    asset_calls: Cell<usize>,
}

#[async_trait(?Send)]
impl ContentSource for MockSource {
    async fn fetch_catalog(&self) -> Result<ContentCatalog, LoadError> {
        self.catalog_calls.set(self.catalog_calls.get() + 1);
        Ok(serde_json::from_str(CATALOG)?)
    }

    async fn load_asset(&self, variant_id: &str) -> Result<MediaAsset, LoadError> {
        self.asset_calls.set(self.asset_calls.get() + 1);
        if variant_id == "awp-missing" {
            return Err(LoadError::Status {
                url: format!("mock://{variant_id}.webp"),
                status: 404,
            });
        }
        Ok(MediaAsset {
            variant_id: variant_id.to_string(),
            bytes: variant_id.as_bytes().to_vec(),
        })
    }
}

/// Fails every request.
struct Offline;

#[async_trait(?Send)]
impl ContentSource for Offline {
    async fn fetch_catalog(&self) -> Result<ContentCatalog, LoadError> {
        Err(LoadError::Status {
            url: "mock://catalog.json".into(),
            status: 503,
        })
    }

    async fn load_asset(&self, variant_id: &str) -> Result<MediaAsset, LoadError> {
        Err(LoadError::InvalidLocation(variant_id.to_string()))
    }
}

fn session_at(url: &str, tab: &MemoryStore, clock: &ManualClock) -> GameSession {
    GameSession::new(Collaborators {
        tab_store: Box::new(tab.clone()),
        durable_store: Box::new(MemoryStore::new()),
        location: Box::new(PageUrl::parse(url).unwrap()),
        clock: Box::new(clock.clone()),
    })
}

#[test]
fn test_load_data_caches_catalog_and_media_status() {
    let tab = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = session_at("http://localhost/", &tab, &clock);
    let source = MockSource::default();

    tokio_test::block_on(session.load_data(&source));

    assert_eq!(source.catalog_calls.get(), 1);
    assert_eq!(source.asset_calls.get(), 5);
    assert_eq!(session.catalog().map(|c| c.items.len()), Some(3));

    let media = session.media();
    assert_eq!(media.loaded_count(), 4);
    assert!(media.is_loaded("ak-vulcan"));
    assert!(!media.is_loaded("awp-missing"));
    assert_eq!(media.status().len(), 5);

    // Inert page: nothing to regenerate or restore.
    assert!(session.board().is_none());
}

#[test]
fn test_load_data_regenerates_url_board_with_catalog() {
    let tab = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = session_at("http://localhost/?seed=1%26shared", &tab, &clock);
    assert!(session.board().unwrap().tiles().iter().all(|t| t.pairing.is_placeholder()));

    tokio_test::block_on(session.load_data(&MockSource::default()));

    let catalog: ContentCatalog = serde_json::from_str(CATALOG).unwrap();
    let expected = generate(Difficulty::Easy, Some("shared"), Some(&catalog));
    assert_eq!(session.board(), Some(&expected));

    let real = session
        .board()
        .unwrap()
        .pair_counts()
        .keys()
        .filter(|k| !k.starts_with("placeholder-"))
        .count();
    assert_eq!(real, 5);
}

#[test]
fn test_load_data_restores_progress_and_resumes_timer() {
    let mut tab = MemoryStore::new();
    let clock = ManualClock::new(0);

    let catalog: ContentCatalog = serde_json::from_str(CATALOG).unwrap();
    let board = generate(Difficulty::Medium, Some("resume"), Some(&catalog));
    let key = board.tiles()[0].pair_key().to_string();

    tab.set(MOVE_COUNT_KEY, "5").unwrap();
    tab.set(ELAPSED_TIME_KEY, "40").unwrap();
    tab.set(MATCHED_TILES_KEY, &serde_json::to_string(&[&key]).unwrap())
        .unwrap();

    let mut session = session_at("http://localhost/?seed=2%26resume", &tab, &clock);
    tokio_test::block_on(session.load_data(&MockSource::default()));

    assert_eq!(session.state().move_count, 5);
    assert_eq!(session.state().elapsed_secs, 40);
    assert!(session.is_timer_running());
    for tile in session.board().unwrap().tiles() {
        assert_eq!(tile.is_matched, tile.pair_key() == key);
    }

    clock.advance(Duration::from_secs(2));
    session.poll_timer();
    assert_eq!(session.state().elapsed_secs, 42);
}

#[test]
fn test_offline_bootstrap_keeps_placeholder_board() {
    let tab = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = session_at("http://localhost/?seed=3%26offline", &tab, &clock);
    let before = session.board().cloned();

    tokio_test::block_on(session.load_data(&Offline));

    assert!(session.catalog().is_none());
    assert!(session.media().is_empty());
    assert!(session.state().is_started);
    assert_eq!(session.board().cloned(), before);
}

#[test]
fn test_end_preserves_cached_content() {
    let tab = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = session_at("http://localhost/", &tab, &clock);
    tokio_test::block_on(session.load_data(&MockSource::default()));

    session.start(StartOptions::default().with_seed("cached"));
    assert!(session
        .board()
        .unwrap()
        .tiles()
        .iter()
        .any(|t| !t.pairing.is_placeholder()));
    session.end();

    assert!(session.catalog().is_some());
    assert_eq!(session.media().loaded_count(), 4);
    assert!(session.board().is_none());
}

#[test]
fn test_directory_source_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    let asset_dir = dir.path().join("images");
    std::fs::write(&catalog_path, CATALOG).unwrap();
    std::fs::create_dir_all(&asset_dir).unwrap();
    for id in ["ak-redline", "ak-vulcan"] {
        std::fs::write(asset_dir.join(format!("{id}.webp")), b"RIFF").unwrap();
    }

    let tab = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = session_at("http://localhost/", &tab, &clock);
    let source = DirContentSource::new(&catalog_path, &asset_dir);
    tokio_test::block_on(session.load_data(&source));

    let media = session.media();
    assert_eq!(media.loaded_count(), 2);
    assert_eq!(media.failed_ids().count(), 3);
    assert_eq!(media.get("ak-vulcan").map(|a| a.bytes.as_slice()), Some(&b"RIFF"[..]));
}
