/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Partial subscription updates (edit.rs)
/// - The remote subscriptions cache and its query status (cache.rs)
/// - The local SQLite snapshot of that cache (store.rs)

pub mod cache;
pub mod data;
pub mod edit;
pub mod store;
