//! Read cache for server resources.
//!
//! Keyed by resource kind plus an optional identifier or query, the
//! cache keeps the last fetched value of each read visible to callers
//! until a mutation stales it. Invalidation is deliberately coarse: a
//! successful create, update, or delete stales the whole `posts` prefix
//! (membership in any list or search result may have changed), which
//! over-invalidates rather than under-invalidates. An update
//! additionally writes the server-confirmed post straight through to
//! its point key so an open detail view is consistent without a
//! refetch.
//!
//! Values are stored as JSON snapshots so one cache serves every
//! resource type. Two in-flight operations that resolve into writes for
//! the same key interleave as last-write-wins; no version token is
//! carried.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key space used by the data-access operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey<'a> {
    /// `posts:active`: the unauthenticated list.
    ActivePosts,
    /// `posts:all`: the authenticated list.
    AllPosts,
    /// `posts:<id>`: a single post.
    Post(i64),
    /// `posts:search:<term>`: title search results.
    Search(&'a str),
    /// `auth:me`: the current user.
    Me,
}

impl CacheKey<'_> {
    /// Prefix covering every post-derived read.
    pub const POSTS_PREFIX: &'static str = "posts";
    /// Prefix covering authenticated-identity reads.
    pub const AUTH_PREFIX: &'static str = "auth";

    pub fn render(&self) -> String {
        match self {
            CacheKey::ActivePosts => "posts:active".to_string(),
            CacheKey::AllPosts => "posts:all".to_string(),
            CacheKey::Post(id) => format!("posts:{id}"),
            CacheKey::Search(term) => format!("posts:search:{term}"),
            CacheKey::Me => "auth:me".to_string(),
        }
    }
}

impl std::fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    fresh: bool,
}

/// Process-wide keyed store of previously fetched resources.
///
/// Cheap to clone; all clones share the same state. Mutated only by the
/// data-access layer, never by callers directly.
#[derive(Clone)]
pub struct ResourceCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Read a fresh entry. Stale or missing entries return `None`,
    /// forcing the caller to refetch.
    pub fn read<T: DeserializeOwned>(&self, key: &CacheKey<'_>) -> Option<T> {
        let rendered = key.render();
        let entries = self.entries.read();
        let entry = entries.get(&rendered)?;
        if !entry.fresh {
            return None;
        }
        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => {
                tracing::debug!(key = %rendered, "cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %rendered, error = %e, "cached value failed to decode");
                None
            }
        }
    }

    /// Unconditionally overwrite an entry with a known-fresh value.
    pub fn write<T: Serialize>(&self, key: &CacheKey<'_>, value: &T) {
        let rendered = key.render();
        let snapshot = match serde_json::to_value(value) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %rendered, error = %e, "value not cacheable");
                return;
            }
        };
        self.entries.write().insert(
            rendered,
            CacheEntry {
                value: snapshot,
                fresh: true,
            },
        );
    }

    /// Stale every entry only an authenticated session may read: the
    /// identity (`auth` prefix) and the authenticated-only post list.
    /// Runs on both session-termination paths, sign-out and 401
    /// interception, so a later session never reads the previous one's
    /// entries.
    pub fn invalidate_session_scoped(&self) {
        self.invalidate_prefix(CacheKey::AUTH_PREFIX);
        self.invalidate_prefix(&CacheKey::AllPosts.render());
    }

    /// Mark every entry under `prefix` stale. Matches whole key
    /// segments: prefix `posts` stales `posts:active` and `posts:7`,
    /// never a hypothetical `postscript:x`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write();
        let mut staled = 0usize;
        for (key, entry) in entries.iter_mut() {
            if entry.fresh && covered_by_prefix(key, prefix) {
                entry.fresh = false;
                staled += 1;
            }
        }
        tracing::debug!(prefix, staled, "cache invalidated");
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

fn covered_by_prefix(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with(':'),
        None => false,
    }
}
