//! Game session controller
//!
//! # State Machine
//!
//! ```text
//!            start()                    increment_move_count()
//!   Inert ------------> Active <------------------------------+
//!     ^                   |  |                                |
//!     |      end()        |  +--------------------------------+
//!     +-------------------+      start_timer() / poll_timer()
//! ```
//!
//! A session is created from its [`Collaborators`]. When the page URL carries
//! a seed token the session starts active on a catalog-less placeholder
//! board; [`GameSession::load_data`] later swaps in the catalog-aware board
//! and restores per-tab progress.
//!
//! No public operation returns an error. Storage failures, malformed tokens
//! and content load failures are logged and replaced by fallbacks.

use std::time::Duration;

use memory_match_content::{fetch_catalog_or_none, prefetch_assets, ContentSource, MediaCache};
use memory_match_core::seed::{self, SeedToken};
use memory_match_core::{generate, Board, ContentCatalog};
use memory_match_persist::{HistoryEntry, HistoryLog, KeyValueStore, SessionPersistence};
use memory_match_types::{Difficulty, TIMER_INTERVAL_MS};

use crate::clock::{SessionClock, TimerHandle};
use crate::location::SeedLocation;

/// External pieces a session talks to.
pub struct Collaborators {
    /// Per-tab storage: counters and the matched set.
    pub tab_store: Box<dyn KeyValueStore>,
    /// Cross-session storage: the history log.
    pub durable_store: Box<dyn KeyValueStore>,
    pub location: Box<dyn SeedLocation>,
    pub clock: Box<dyn SessionClock>,
}

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_started: bool,
    pub difficulty: Difficulty,
    pub board: Option<Board>,
    pub seed: Option<String>,
    pub move_count: u32,
    pub elapsed_secs: u64,
}

/// Overrides for [`GameSession::start`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    /// Keep the current difficulty when `None`.
    pub difficulty: Option<Difficulty>,
    /// Synthesize from the clock when `None` or empty.
    pub seed: Option<String>,
}

impl StartOptions {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }
}

pub struct GameSession {
    state: SessionState,
    persistence: SessionPersistence,
    history: HistoryLog,
    location: Box<dyn SeedLocation>,
    clock: Box<dyn SessionClock>,
    timer: Option<TimerHandle>,
    /// Token the page was opened with, until a start or end replaces it.
    url_seed: Option<SeedToken>,
    catalog: Option<ContentCatalog>,
    media: MediaCache,
}

impl GameSession {
    /// Cold start from the current location.
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            tab_store,
            durable_store,
            location,
            clock,
        } = collaborators;

        let url_seed = location
            .seed_param()
            .and_then(|value| seed::parse_seed_param(&value));

        let state = match &url_seed {
            Some(token) => {
                tracing::info!(difficulty = token.difficulty.as_str(), seed = %token.seed, "resuming seed from URL");
                SessionState {
                    is_started: true,
                    difficulty: token.difficulty,
                    board: Some(generate(token.difficulty, Some(&token.seed), None)),
                    seed: Some(token.seed.clone()),
                    ..SessionState::default()
                }
            }
            None => SessionState::default(),
        };

        Self {
            state,
            persistence: SessionPersistence::new(tab_store),
            history: HistoryLog::new(durable_store),
            location,
            clock,
            timer: None,
            url_seed,
            catalog: None,
            media: MediaCache::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.state.board.as_ref()
    }

    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.state.board.as_mut()
    }

    pub fn catalog(&self) -> Option<&ContentCatalog> {
        self.catalog.as_ref()
    }

    pub fn media(&self) -> &MediaCache {
        &self.media
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Token for the active session, as written into the URL.
    pub fn share_token(&self) -> Option<String> {
        if !self.state.is_started {
            return None;
        }
        self.state
            .seed
            .as_deref()
            .map(|s| seed::encode(self.state.difficulty, s))
    }

    /// Finished sessions, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    /// Begin a fresh session.
    ///
    /// Per-tab progress is cleared and any running timer is stopped.
    pub fn start(&mut self, options: StartOptions) {
        self.cancel_timer();
        self.persistence.clear();

        let difficulty = options.difficulty.unwrap_or(self.state.difficulty);
        let seed = match options.seed {
            Some(seed) if !seed.is_empty() => seed,
            _ => self.clock.now_millis().to_string(),
        };
        let board = generate(difficulty, Some(&seed), self.catalog.as_ref());

        self.state = SessionState {
            is_started: true,
            difficulty,
            seed: Some(board.seed().to_string()),
            board: Some(board),
            move_count: 0,
            elapsed_secs: 0,
        };
        self.url_seed = None;
        self.location.set_seed_param(&seed::encode(difficulty, &seed));

        tracing::info!(difficulty = difficulty.as_str(), seed = %seed, "session started");
    }

    pub fn increment_move_count(&mut self) {
        self.state.move_count += 1;
        self.save_counters();
    }

    /// Arm the one-second timer. No-op while already running.
    ///
    /// Elapsed time resumes from storage for a started session, otherwise
    /// from zero.
    pub fn start_timer(&mut self) {
        if self.timer.is_some() {
            return;
        }

        self.state.elapsed_secs = match self.persistence.load_elapsed() {
            Some(secs) if self.state.is_started => secs,
            _ => 0,
        };
        self.timer = Some(self.clock.every(Duration::from_millis(TIMER_INTERVAL_MS)));
        tracing::debug!(elapsed = self.state.elapsed_secs, "timer started");
    }

    /// Apply ticks fired since the last poll. Returns the number applied.
    pub fn poll_timer(&mut self) -> u32 {
        let Some(handle) = self.timer else {
            return 0;
        };
        let fired = self.clock.drain(handle);
        if fired > 0 {
            self.state.elapsed_secs += u64::from(fired);
            self.save_counters();
        }
        fired
    }

    /// Apply pending ticks, then disarm the timer.
    pub fn stop_timer(&mut self) {
        if self.timer.is_none() {
            return;
        }
        self.poll_timer();
        self.cancel_timer();
        tracing::debug!(elapsed = self.state.elapsed_secs, "timer stopped");
    }

    /// Record the current session in the history log.
    pub fn save_to_history(&mut self) {
        self.history.append(HistoryEntry {
            move_count: self.state.move_count,
            elapsed_time: self.state.elapsed_secs,
            difficulty: self.state.difficulty,
            timestamp: self.clock.now_millis(),
        });
    }

    /// Return to inert defaults. Catalog and media stay cached.
    pub fn end(&mut self) {
        self.stop_timer();
        if self.state.is_started {
            self.save_to_history();
        }

        self.location.clear_seed_param();
        self.persistence.clear();
        self.url_seed = None;
        self.state = SessionState::default();
        tracing::info!("session ended");
    }

    /// Bootstrap: fetch content, rebuild a URL-seeded board, restore progress.
    ///
    /// Content failures leave the placeholder board in place.
    pub async fn load_data(&mut self, source: &dyn ContentSource) {
        if let Some(catalog) = fetch_catalog_or_none(source).await {
            self.media = prefetch_assets(source, &catalog).await;

            if let Some(token) = self.url_seed.as_ref().filter(|_| self.state.is_started) {
                self.state.board = Some(generate(token.difficulty, Some(&token.seed), Some(&catalog)));
                tracing::debug!(seed = %token.seed, "regenerated URL board with catalog");
            }
            self.catalog = Some(catalog);
        }

        self.restore_progress();
    }

    /// Read counters and the matched set back from per-tab storage.
    ///
    /// Only a started session restores. The timer resumes when the restored
    /// session already has moves and elapsed time.
    pub fn restore_progress(&mut self) {
        if !self.state.is_started {
            return;
        }

        let counters = self.persistence.load_counters();
        if let Some(moves) = counters.move_count {
            self.state.move_count = moves;
        }
        if let Some(secs) = counters.elapsed_secs {
            self.state.elapsed_secs = secs;
        }

        let matched = self.persistence.load_matches();
        if let Some(board) = self.state.board.as_mut() {
            let marked = board.apply_matches(&matched);
            tracing::debug!(marked, moves = self.state.move_count, "restored session progress");
        }

        if self.state.move_count > 0 && self.state.elapsed_secs > 0 {
            self.start_timer();
        }
    }

    /// Record newly matched pair keys and mark them on the board.
    pub fn update_matched_tiles<S: AsRef<str>>(&mut self, keys: &[S]) {
        let Some(board) = self.state.board.as_mut() else {
            return;
        };
        board.apply_matches(keys);
        self.persistence.record_matches(keys);
    }

    fn save_counters(&mut self) {
        if self.state.is_started {
            self.persistence
                .save_counters(self.state.move_count, self.state.elapsed_secs);
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.clock.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::location::PageUrl;
    use memory_match_persist::MemoryStore;
    use memory_match_types::{ELAPSED_TIME_KEY, MATCHED_TILES_KEY, MOVE_COUNT_KEY};

    struct Harness {
        session: GameSession,
        tab: MemoryStore,
        durable: MemoryStore,
        page: PageUrl,
        clock: ManualClock,
    }

    fn harness(url: &str) -> Harness {
        let tab = MemoryStore::new();
        let durable = MemoryStore::new();
        let page = PageUrl::parse(url).unwrap();
        let clock = ManualClock::new(1_700_000_000_000);
        let session = GameSession::new(Collaborators {
            tab_store: Box::new(tab.clone()),
            durable_store: Box::new(durable.clone()),
            location: Box::new(page.clone()),
            clock: Box::new(clock.clone()),
        });
        Harness {
            session,
            tab,
            durable,
            page,
            clock,
        }
    }

    #[test]
    fn new_session_without_seed_is_inert() {
        let h = harness("http://localhost/");
        let state = h.session.state();
        assert!(!state.is_started);
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert!(state.board.is_none());
        assert_eq!(h.session.share_token(), None);
    }

    #[test]
    fn new_session_with_url_seed_is_active() {
        let h = harness("http://localhost/?seed=3%26friday");
        let state = h.session.state();
        assert!(state.is_started);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.seed.as_deref(), Some("friday"));
        assert_eq!(h.session.board().map(|b| b.tiles().len()), Some(24));
    }

    #[test]
    fn start_synthesizes_seed_from_clock() {
        let mut h = harness("http://localhost/");
        h.session.start(StartOptions::default());

        let state = h.session.state();
        assert!(state.is_started);
        assert_eq!(state.seed.as_deref(), Some("1700000000000"));
        assert_eq!(h.page.seed_param().as_deref(), Some("2&1700000000000"));
    }

    #[test]
    fn start_clears_stale_progress() {
        let mut h = harness("http://localhost/");
        h.session.start(StartOptions::default());
        h.session.increment_move_count();
        h.session.update_matched_tiles(&["placeholder-1"]);
        assert!(h.tab.get(MATCHED_TILES_KEY).unwrap().is_some());

        h.session.start(StartOptions::default().with_seed("again"));
        assert_eq!(h.session.state().move_count, 0);
        assert_eq!(h.tab.get(MATCHED_TILES_KEY).unwrap(), None);
        assert_eq!(h.tab.get(MOVE_COUNT_KEY).unwrap(), None);
    }

    #[test]
    fn increment_persists_only_while_started() {
        let mut h = harness("http://localhost/");
        h.session.increment_move_count();
        assert_eq!(h.tab.write_count(), 0);

        h.session.start(StartOptions::default());
        h.session.increment_move_count();
        assert_eq!(h.tab.get(MOVE_COUNT_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn start_stops_running_timer() {
        let mut h = harness("http://localhost/");
        h.session.start(StartOptions::default());
        h.session.start_timer();
        h.session.start(StartOptions::default());

        assert!(!h.session.is_timer_running());
        assert_eq!(h.clock.active_timers(), 0);
    }

    #[test]
    fn timer_resumes_from_persisted_elapsed() {
        let mut h = harness("http://localhost/");
        h.session.start(StartOptions::default());
        h.tab.clone().set(ELAPSED_TIME_KEY, "42").unwrap();

        h.session.start_timer();
        assert_eq!(h.session.state().elapsed_secs, 42);

        h.clock.advance(Duration::from_secs(2));
        assert_eq!(h.session.poll_timer(), 2);
        assert_eq!(h.session.state().elapsed_secs, 44);
    }

    #[test]
    fn timer_on_inert_session_starts_from_zero() {
        let mut h = harness("http://localhost/");
        h.tab.clone().set(ELAPSED_TIME_KEY, "42").unwrap();
        h.session.start_timer();
        assert_eq!(h.session.state().elapsed_secs, 0);
    }

    #[test]
    fn end_appends_history_and_clears_url() {
        let mut h = harness("http://localhost/");
        h.session.start(StartOptions::default().with_difficulty(Difficulty::Easy));
        h.session.increment_move_count();
        h.clock.advance(Duration::from_millis(500));
        h.session.end();

        assert_eq!(h.page.seed_param(), None);
        assert!(h.tab.is_empty());

        let history = h.session.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].move_count, 1);
        assert_eq!(history[0].difficulty, Difficulty::Easy);
        assert_eq!(history[0].timestamp, 1_700_000_000_500);
        assert_eq!(h.durable.len(), 1);
    }

    #[test]
    fn end_on_inert_session_records_nothing() {
        let mut h = harness("http://localhost/");
        h.session.end();
        assert!(h.session.history().is_empty());
    }

    #[test]
    fn restore_marks_matched_tiles_and_resumes_timer() {
        let mut h = harness("http://localhost/?seed=1%26abc");
        let mut tab = h.tab.clone();
        tab.set(MOVE_COUNT_KEY, "3").unwrap();
        tab.set(ELAPSED_TIME_KEY, "9").unwrap();
        tab.set(MATCHED_TILES_KEY, r#"["placeholder-2"]"#).unwrap();

        h.session.restore_progress();

        let state = h.session.state();
        assert_eq!(state.move_count, 3);
        assert_eq!(state.elapsed_secs, 9);
        let matched: Vec<_> = h
            .session
            .board()
            .unwrap()
            .tiles()
            .iter()
            .filter(|t| t.is_matched)
            .collect();
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|t| t.is_revealed && t.pair_key() == "placeholder-2"));
        assert!(h.session.is_timer_running());
    }

    #[test]
    fn update_matched_tiles_without_board_is_noop() {
        let mut h = harness("http://localhost/");
        h.session.update_matched_tiles(&["x"]);
        assert_eq!(h.tab.get(MATCHED_TILES_KEY).unwrap(), None);
    }
}
