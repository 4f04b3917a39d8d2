//! # recency
//!
//! Bounded LRU cache with O(1) `get` / `put`.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1))
//! - **Recency List**: doubly-linked list over a slot arena, framed by
//!   head/tail sentinels (O(1) move-to-front and tail eviction)
//! - **Stats**: hit/miss/eviction counters
//!
//! The cache is single-threaded. Wrap it in a lock to share it.

#![warn(missing_docs)]

mod cache;
mod error;
mod list;
mod node;
mod stats;

pub use cache::RecencyCache;
pub use error::{Error, Result};
pub use stats::CacheStats;
