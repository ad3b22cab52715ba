use tracing::{info, warn};

use shared::{Catalog, GameKind, PrizeDefinition};

use crate::pool;
use crate::store::{now_ms, SessionStore, StoredSession};

/// Draws prizes one at a time from a pre-shuffled, capacity-bounded pool,
/// writing progress through to the session store after every draw.
///
/// Two states only: Ready while `cursor < pool.len()`, Exhausted once the
/// cursor reaches the end. [`DrawEngine::draw`] refuses (returns `None`)
/// when Exhausted; callers gate their spin/drop/flip control on
/// [`DrawEngine::remaining`].
pub struct DrawEngine {
    catalog: Catalog,
    key: String,
    store: SessionStore,
    cursor: usize,
    pool: Vec<usize>,
    created_at: i64,
}

impl DrawEngine {
    /// Resumes the persisted session under `key`, or builds a fresh
    /// shuffled pool when none is valid. A stored pool whose id multiset
    /// does not match the catalog (for instance after a capacity-table
    /// change, or a key collision with another game) is discarded the same
    /// way a malformed one is.
    pub fn new(catalog: Catalog, key: impl Into<String>, store: SessionStore) -> Self {
        let key = key.into();
        match store.load(&key) {
            Some(session) if pool_matches_catalog(&session.pool, &catalog) => {
                info!(
                    "🎟️ Resuming draw session '{}' at {}/{}",
                    key,
                    session.cursor,
                    session.pool.len()
                );
                Self {
                    catalog,
                    key,
                    store,
                    cursor: session.cursor,
                    pool: session.pool,
                    created_at: session.created_at,
                }
            }
            Some(_) => {
                warn!(
                    "🧹 Stored pool under '{}' does not match the catalog, rebuilding",
                    key
                );
                store.clear(&key);
                Self::fresh(catalog, key, store)
            }
            None => Self::fresh(catalog, key, store),
        }
    }

    /// Engine for one of the built-in game families, on that family's own
    /// storage key.
    pub fn for_game(kind: GameKind, store: SessionStore) -> Self {
        Self::new(kind.catalog().clone(), kind.storage_key(), store)
    }

    fn fresh(catalog: Catalog, key: String, store: SessionStore) -> Self {
        let mut engine = Self {
            pool: pool::build(&catalog),
            catalog,
            key,
            store,
            cursor: 0,
            created_at: now_ms(),
        };
        engine.persist();
        info!(
            "🆕 New draw session '{}' with {} prizes in the pool",
            engine.key,
            engine.pool.len()
        );
        engine
    }

    fn persist(&mut self) {
        let session = StoredSession {
            cursor: self.cursor,
            pool: self.pool.clone(),
            created_at: self.created_at,
        };
        if let Err(e) = self.store.save(&self.key, &session) {
            // Best-effort persistence: the in-memory session stays the
            // source of truth for this run, the player sees nothing.
            warn!("Failed to persist session '{}': {}", self.key, e);
        }
    }

    /// The next prize in pool order, or `None` once the pool is exhausted.
    /// Advances the cursor and persists before returning.
    pub fn draw(&mut self) -> Option<PrizeDefinition> {
        let id = *self.pool.get(self.cursor)?;
        let prize = self.catalog.get(id).cloned()?;
        self.cursor += 1;
        self.persist();
        info!(
            "🎡 DRAW '{}': {} ({}) — {}/{} awarded",
            self.key,
            prize.label,
            prize.value,
            self.cursor,
            self.pool.len()
        );
        Some(prize)
    }

    /// Undrawn prizes left in the pool.
    pub fn remaining(&self) -> usize {
        self.pool.len() - self.cursor
    }

    /// Pool length, for "X/Total" counters.
    pub fn total_capacity(&self) -> usize {
        self.pool.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.pool.len()
    }

    /// Undrawn count per prize, in catalog order. Feeds the stats display.
    pub fn remaining_by_prize(&self) -> Vec<(PrizeDefinition, u32)> {
        let mut counts = vec![0u32; self.catalog.len()];
        for &id in &self.pool[self.cursor..] {
            counts[id] += 1;
        }
        self.catalog.entries().iter().cloned().zip(counts).collect()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Discards the persisted session and starts over with a freshly
    /// shuffled pool. Used by the manual reset action; expiry takes the
    /// same path via [`SessionStore::load`] returning absent.
    pub fn reset(&mut self) {
        self.store.clear(&self.key);
        self.pool = pool::build(&self.catalog);
        self.cursor = 0;
        self.created_at = now_ms();
        self.persist();
        info!(
            "🔄 Reset draw session '{}', {} prizes back in play",
            self.key,
            self.pool.len()
        );
    }
}

fn pool_matches_catalog(pool: &[usize], catalog: &Catalog) -> bool {
    if pool.len() != catalog.total_capacity() {
        return false;
    }
    let mut counts = vec![0usize; catalog.len()];
    for &id in pool {
        match counts.get_mut(id) {
            Some(count) => *count += 1,
            None => return false,
        }
    }
    catalog
        .entries()
        .iter()
        .zip(counts)
        .all(|(entry, count)| entry.capacity as usize == count)
}
