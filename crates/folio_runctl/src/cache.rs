//! Position-indexed memoization of rendered results.

use std::collections::HashMap;

use folio_common::ContentHash;

use crate::pipeline::Unit;

/// One memoized result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry<R> {
    /// Fingerprint of the unit source that produced `result`.
    pub snapshot: ContentHash,
    /// The stored result.
    pub result: R,
}

/// Per-artifact lists of results, indexed by pass position.
///
/// A list never holds more than one entry per position. Recording at a
/// position drops that entry and every entry after it, so an edit early in a
/// document forces everything downstream to be recomputed.
#[derive(Debug)]
pub struct RunCache<R> {
    entries: HashMap<String, Vec<CacheEntry<R>>>,
}

impl<R> Default for RunCache<R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<R> RunCache<R> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The result recorded at `position` if its snapshot equals `snapshot`.
    pub fn lookup(&self, artifact: &str, position: usize, snapshot: ContentHash) -> Option<&R> {
        self.entries
            .get(artifact)?
            .get(position)
            .filter(|entry| entry.snapshot == snapshot)
            .map(|entry| &entry.result)
    }

    /// Replaces the tail of the artifact's list, starting at `position`, with
    /// a single fresh entry.
    pub fn record(&mut self, artifact: &str, position: usize, snapshot: ContentHash, result: R) {
        let list = self.entries.entry(artifact.to_string()).or_default();
        list.truncate(position);
        list.push(CacheEntry { snapshot, result });
    }

    /// Discards every entry recorded for `artifact`.
    pub fn clear(&mut self, artifact: &str) {
        if let Some(list) = self.entries.get_mut(artifact) {
            tracing::debug!(artifact, dropped = list.len(), "clearing run cache");
            list.clear();
        }
    }

    /// The entries recorded for `artifact`, in position order.
    pub fn entries(&self, artifact: &str) -> &[CacheEntry<R>] {
        self.entries.get(artifact).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reuses the result at `position` or computes a new one with `render`.
    ///
    /// Honors the unit's `clear` option first. An error from `render` is
    /// returned as is and leaves the list untouched.
    pub fn render_or_reuse<E, F>(
        &mut self,
        artifact: &str,
        position: usize,
        unit: &Unit<'_>,
        render: F,
    ) -> Result<R, E>
    where
        R: Clone,
        F: FnOnce(&Unit<'_>) -> Result<R, E>,
    {
        if unit.options.clear {
            self.clear(artifact);
        }
        let snapshot = ContentHash::of_source(unit.source);
        if let Some(hit) = self.lookup(artifact, position, snapshot) {
            tracing::trace!(artifact, position, "reusing cached result");
            return Ok(hit.clone());
        }
        tracing::debug!(artifact, position, snapshot = %snapshot.short(), "running unit");
        let result = render(unit)?;
        self.record(artifact, position, snapshot, result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn hash(s: &str) -> ContentHash {
        ContentHash::of_source(s)
    }

    #[test]
    fn lookup_requires_equal_snapshot() {
        let mut cache = RunCache::new();
        cache.record("a.py", 0, hash("x"), 1);
        assert_eq!(cache.lookup("a.py", 0, hash("x")), Some(&1));
        assert_eq!(cache.lookup("a.py", 0, hash("y")), None);
        assert_eq!(cache.lookup("a.py", 1, hash("x")), None);
        assert_eq!(cache.lookup("b.py", 0, hash("x")), None);
    }

    #[test]
    fn record_truncates_tail() {
        let mut cache = RunCache::new();
        for (i, src) in ["a", "b", "c", "d"].iter().enumerate() {
            cache.record("f", i, hash(src), i);
        }
        cache.record("f", 1, hash("B"), 10);
        let results: Vec<usize> = cache.entries("f").iter().map(|e| e.result).collect();
        assert_eq!(results, vec![0, 10]);
    }

    #[test]
    fn clear_only_touches_one_artifact() {
        let mut cache = RunCache::new();
        cache.record("f", 0, hash("a"), 'a');
        cache.record("g", 0, hash("a"), 'b');
        cache.clear("f");
        assert!(cache.entries("f").is_empty());
        assert_eq!(cache.entries("g").len(), 1);
    }

    #[test]
    fn render_or_reuse_hits_and_misses() {
        let mut cache = RunCache::new();
        let mut calls = 0;
        let unit = Unit::new("x = 1");
        for _ in 0..3 {
            let out: Result<String, ()> = cache.render_or_reuse("f", 0, &unit, |u| {
                calls += 1;
                Ok(u.source.to_uppercase())
            });
            assert_eq!(out.unwrap(), "X = 1");
        }
        assert_eq!(calls, 1);

        let cleared = Unit::new("x = 1").with_options(Options::from_tokens(["clear"]));
        let _ = cache.render_or_reuse::<(), _>("f", 0, &cleared, |_| {
            calls += 1;
            Ok("again".to_string())
        });
        assert_eq!(calls, 2);
    }

    #[test]
    fn failed_render_keeps_list() {
        let mut cache = RunCache::new();
        cache.record("f", 0, hash("a"), 0);
        cache.record("f", 1, hash("b"), 1);
        let err = cache.render_or_reuse("f", 0, &Unit::new("changed"), |_| Err("boom"));
        assert_eq!(err, Err("boom"));
        assert_eq!(cache.entries("f").len(), 2);
    }
}
