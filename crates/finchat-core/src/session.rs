//! Conversation Context Store
//!
//! Per-session mutable state and the store that owns it. The store is the
//! only mutable shared resource in the engine and its per-key locks are the
//! sole synchronization point: a request holds exactly one session lock for
//! its whole read+update critical section, so concurrent requests for the
//! same session key cannot interleave and corrupt the last discussed symbol.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::symbol::{AssetCategory, Symbol};

/// How many resolved turns a session remembers
pub const FLOW_DEPTH: usize = 10;

/// Default maximum number of live sessions before eviction kicks in
pub const DEFAULT_CAPACITY: usize = 1024;

/// One resolved turn in the conversation flow log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEntry {
    pub intent: Intent,
    pub symbols: Vec<Symbol>,
}

/// Mutable per-conversation state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Most recently discussed instrument, referent for "it"/"that"
    pub last_symbol: Option<Symbol>,

    /// Category of `last_symbol`, needed so "the crypto" only resolves to an
    /// actual crypto symbol
    pub last_category: Option<AssetCategory>,

    /// Topic tag of the last financial turn ("crypto", "stocks", "market")
    pub last_topic: Option<String>,

    /// Bounded log of recent resolved turns, oldest evicted
    pub flow: VecDeque<FlowEntry>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            last_symbol: None,
            last_category: None,
            last_topic: None,
            flow: VecDeque::with_capacity(FLOW_DEPTH),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record one resolved turn.
    ///
    /// An empty resolution never erases the last discussed symbol, so a vague
    /// follow-up keeps its referent. A turn identical to the previous one
    /// only refreshes the activity timestamp - no history growth.
    pub fn record(
        &mut self,
        intent: Intent,
        symbols: &[Symbol],
        category: Option<AssetCategory>,
        topic: Option<&str>,
    ) {
        if let Some(primary) = symbols.first() {
            self.last_symbol = Some(primary.clone());
            self.last_category = category;
        }
        if let Some(topic) = topic {
            self.last_topic = Some(topic.to_string());
        }

        let repeat = self
            .flow
            .back()
            .is_some_and(|e| e.intent == intent && e.symbols == symbols);
        if !repeat {
            if self.flow.len() == FLOW_DEPTH {
                self.flow.pop_front();
            }
            self.flow.push_back(FlowEntry {
                intent,
                symbols: symbols.to_vec(),
            });
        }
        self.touch();
    }

    /// Refresh the activity timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn turn_count(&self) -> usize {
        self.flow.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared store of session state, keyed by an opaque session key.
///
/// Each key maps to its own `Mutex<Session>`; the outer map lock is only held
/// long enough to find or create the entry. Lock order is always map first,
/// then session, so eviction cannot deadlock with an in-flight request.
pub struct ContextStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    capacity: usize,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Lock handle for a session, lazily creating default state on first
    /// sight of the key. Never fails for unknown keys.
    pub fn session(&self, key: &str) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().unwrap();
            if let Some(entry) = sessions.get(key) {
                return entry.clone();
            }
        }

        let mut sessions = self.sessions.write().unwrap();
        if !sessions.contains_key(key) && sessions.len() >= self.capacity {
            Self::evict_oldest(&mut sessions);
        }
        sessions
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone()
    }

    /// Read-only copy of a session's current state, if the key is known
    pub fn snapshot(&self, key: &str) -> Option<Session> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(key).map(|entry| entry.lock().unwrap().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Least-recently-updated eviction keeps the store bounded. An in-flight
    /// request keeps its evicted session alive through the `Arc` until the
    /// request finishes.
    fn evict_oldest(sessions: &mut HashMap<String, Arc<Mutex<Session>>>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.lock().unwrap().updated_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            tracing::debug!(session_key = %key, "evicting least recently updated session");
            sessions.remove(&key);
        }
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_session_creation() {
        let store = ContextStore::new();
        assert!(store.snapshot("unseen").is_none());

        let entry = store.session("unseen");
        assert!(entry.lock().unwrap().last_symbol.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_resolution_keeps_last_symbol() {
        let mut session = Session::new();
        session.record(
            Intent::Informational,
            &[Symbol::from("AMD")],
            Some(AssetCategory::Equity),
            Some("stocks"),
        );
        session.record(Intent::Greeting, &[], None, None);

        assert_eq!(session.last_symbol, Some(Symbol::from("AMD")));
        assert_eq!(session.last_topic.as_deref(), Some("stocks"));
    }

    #[test]
    fn test_last_symbol_overwritten_not_accumulated() {
        let mut session = Session::new();
        session.record(
            Intent::Informational,
            &[Symbol::from("AMD")],
            Some(AssetCategory::Equity),
            Some("stocks"),
        );
        session.record(
            Intent::Informational,
            &[Symbol::from("NVDA")],
            Some(AssetCategory::Equity),
            Some("stocks"),
        );

        assert_eq!(session.last_symbol, Some(Symbol::from("NVDA")));
    }

    #[test]
    fn test_repeat_turn_is_history_noop() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.record(
                Intent::Informational,
                &[Symbol::from("BTC")],
                Some(AssetCategory::Crypto),
                Some("crypto"),
            );
        }
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn test_flow_depth_bounded() {
        let mut session = Session::new();
        for i in 0..(FLOW_DEPTH + 5) {
            session.record(
                Intent::Informational,
                &[Symbol::new(format!("SYM{i}"))],
                Some(AssetCategory::Equity),
                None,
            );
        }
        assert_eq!(session.turn_count(), FLOW_DEPTH);
        // Oldest entries were the ones evicted
        assert_eq!(
            session.flow.front().unwrap().symbols,
            vec![Symbol::new("SYM5")]
        );
    }

    #[test]
    fn test_capacity_eviction() {
        let store = ContextStore::with_capacity(2);
        store.session("a").lock().unwrap().touch();
        store.session("b").lock().unwrap().touch();
        store.session("c");

        assert_eq!(store.len(), 2);
        assert!(store.snapshot("c").is_some());
    }

    #[test]
    fn test_same_key_same_entry() {
        let store = ContextStore::new();
        let first = store.session("k");
        let second = store.session("k");
        assert!(Arc::ptr_eq(&first, &second));
    }
}
