//! Game session controller
//!
//! Owns the lifecycle of one game: starting, counting moves, ticking the
//! timer, ending, and bootstrapping content. Everything outside the process
//! is injected through [`Collaborators`]:
//!
//! | Collaborator      | Trait                | Provided implementations          |
//! |-------------------|----------------------|-----------------------------------|
//! | per-tab storage   | `KeyValueStore`      | `MemoryStore`, `FileStore`        |
//! | durable storage   | `KeyValueStore`      | `MemoryStore`, `FileStore`        |
//! | shareable URL     | [`SeedLocation`]     | [`PageUrl`]                       |
//! | time and timers   | [`SessionClock`]     | [`SystemClock`], [`ManualClock`]  |
//!
//! The session is single-threaded. The host drives the timer by calling
//! [`GameSession::poll_timer`] from its loop.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use memory_match_persist::MemoryStore;
//! use memory_match_session::{Collaborators, GameSession, ManualClock, PageUrl, StartOptions};
//!
//! let clock = ManualClock::new(0);
//! let mut session = GameSession::new(Collaborators {
//!     tab_store: Box::new(MemoryStore::new()),
//!     durable_store: Box::new(MemoryStore::new()),
//!     location: Box::new(PageUrl::parse("http://localhost/").unwrap()),
//!     clock: Box::new(clock.clone()),
//! });
//!
//! session.start(StartOptions::default().with_seed("demo"));
//! session.start_timer();
//! clock.advance(Duration::from_secs(5));
//! session.stop_timer();
//!
//! assert_eq!(session.state().elapsed_secs, 5);
//! assert_eq!(session.share_token().as_deref(), Some("2&demo"));
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod location;

pub use clock::{Clock, ManualClock, Scheduler, SessionClock, SystemClock, TimerHandle};
pub use config::{AppConfig, ConfigError};
pub use controller::{Collaborators, GameSession, SessionState, StartOptions};
pub use location::{PageUrl, SeedLocation};
