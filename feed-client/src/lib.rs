//! # feed-client
//!
//! Async feed pagination and favorites sync for jobfeed.
//!
//! This is the library that applications compose a feed screen from.
//!
//! ## Features
//!
//! - **Incremental pagination**: [`FeedController`] turns repeated
//!   "load more" signals into an ordered, append-only item list with
//!   loading, error, and end-of-data signaling
//! - **Durable favorites**: [`FavoritesRepository`] toggles membership in a
//!   persisted set with read-after-write consistency
//! - **Adapter seams**: pluggable [`FeedSource`] (HTTP, mock) and
//!   [`FavoritesStore`] (SQLite, in-memory) implementations
//! - **Pure state machine**: uses feed-core for side-effect-free logic
//!
//! ## Example
//!
//! ```ignore
//! use feed_client::{FeedController, FavoritesRepository, HttpFeedSource, SqliteFavoritesStore};
//!
//! let source = HttpFeedSource::new(HttpFeedConfig::default());
//! let controller = FeedController::new(source);
//! controller.load_more().await;
//!
//! let store = SqliteFavoritesStore::new(Path::new("favorites.db")).await?;
//! let favorites = FavoritesRepository::new(store);
//! favorites.initialize().await?;
//! favorites.toggle_favorite(&job).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod favorites;
pub mod source;
pub mod store;

pub use controller::{FeedController, FeedError};
pub use favorites::FavoritesRepository;
pub use source::{FeedSource, FeedSourceError, HttpFeedConfig, HttpFeedSource, MockFeedSource};
pub use store::{FavoritesStore, MemoryFavoritesStore, SqliteFavoritesStore, StorageError};
