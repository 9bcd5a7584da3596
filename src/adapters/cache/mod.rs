//! Cache provider adapters.

pub mod moka_cache;

pub use moka_cache::{CacheSettings, MokaListCache};
