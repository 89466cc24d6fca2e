//! Intrusive bucket priority queue keyed by integer gain (spec.md §4.3:
//! "a bucket priority queue (array of doubly linked lists indexed by gain
//! value, with a cached pointer to the current maximum) giving O(1)
//! insert, O(1) update, O(1) removal and O(1) (amortized) extract-max").
//!
//! Gains are bounded in magnitude by `Σ w(e)` (spec.md §3), so the bucket
//! array is sized `2 * max_gain + 1` and indexed by `gain + max_gain`. Each
//! vertex id appears in at most one bucket at a time; the doubly linked
//! list is intrusive (stored as parallel `prev`/`next` arrays indexed by
//! vertex id, not as a separate allocation per node).

use crate::ids::{VertexId, Weight};

pub struct BucketQueue {
    max_gain: Weight,
    buckets: Vec<Option<usize>>,
    prev: Vec<Option<usize>>,
    next: Vec<Option<usize>>,
    gain_of: Vec<Option<Weight>>,
    max_bucket: Option<usize>,
    size: usize,
}

impl BucketQueue {
    /// `max_gain` must bound the magnitude of every gain ever inserted
    /// (the multilevel driver derives it from `Σ w(e)` per spec.md §3).
    pub fn new(max_gain: Weight, capacity_hint: usize) -> Self {
        let bucket_count = (2 * max_gain + 1).max(1) as usize;
        BucketQueue {
            max_gain,
            buckets: vec![None; bucket_count],
            prev: vec![None; capacity_hint],
            next: vec![None; capacity_hint],
            gain_of: vec![None; capacity_hint],
            max_bucket: None,
            size: 0,
        }
    }

    fn bucket_index(&self, gain: Weight) -> usize {
        debug_assert!(
            gain >= -self.max_gain && gain <= self.max_gain,
            "gain {gain} out of bucket queue range +-{}",
            self.max_gain
        );
        (gain + self.max_gain) as usize
    }

    fn ensure_capacity(&mut self, v: VertexId) {
        if v.index() >= self.prev.len() {
            let new_len = v.index() + 1;
            self.prev.resize(new_len, None);
            self.next.resize(new_len, None);
            self.gain_of.resize(new_len, None);
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.gain_of.len() && self.gain_of[v.index()].is_some()
    }

    pub fn gain_of(&self, v: VertexId) -> Option<Weight> {
        self.gain_of.get(v.index()).copied().flatten()
    }

    /// Inserts `v` with `gain`, or does nothing if already present (use
    /// [`BucketQueue::update_gain`] for that).
    pub fn insert(&mut self, v: VertexId, gain: Weight) {
        self.ensure_capacity(v);
        if self.gain_of[v.index()].is_some() {
            return;
        }
        let bucket = self.bucket_index(gain);
        let old_head = self.buckets[bucket];
        self.next[v.index()] = old_head;
        self.prev[v.index()] = None;
        if let Some(head) = old_head {
            self.prev[head] = Some(v.index());
        }
        self.buckets[bucket] = Some(v.index());
        self.gain_of[v.index()] = Some(gain);
        self.size += 1;

        self.max_bucket = Some(match self.max_bucket {
            Some(current) if current >= bucket => current,
            _ => bucket,
        });
    }

    /// Unlinks `v` from its bucket's list without touching `max_bucket`
    /// (the caller fixes that up afterward so remove/insert pairs used by
    /// `update_gain` don't pay for a scan twice).
    fn unlink(&mut self, v: VertexId) -> usize {
        let gain = self.gain_of[v.index()].expect("unlink called on absent vertex");
        let bucket = self.bucket_index(gain);
        let p = self.prev[v.index()];
        let n = self.next[v.index()];
        match p {
            Some(p) => self.next[p] = n,
            None => self.buckets[bucket] = n,
        }
        if let Some(n) = n {
            self.prev[n] = p;
        }
        self.prev[v.index()] = None;
        self.next[v.index()] = None;
        self.gain_of[v.index()] = None;
        self.size -= 1;
        bucket
    }

    fn fix_max_bucket_from(&mut self, hint: usize) {
        if self.buckets[hint].is_some() {
            self.max_bucket = Some(hint);
            return;
        }
        let mut b = hint;
        loop {
            if self.buckets[b].is_some() {
                self.max_bucket = Some(b);
                return;
            }
            if b == 0 {
                self.max_bucket = None;
                return;
            }
            b -= 1;
        }
    }

    pub fn remove(&mut self, v: VertexId) {
        if !self.contains(v) {
            return;
        }
        let bucket = self.unlink(v);
        if self.max_bucket == Some(bucket) {
            self.fix_max_bucket_from(bucket);
        }
    }

    pub fn update_gain(&mut self, v: VertexId, new_gain: Weight) {
        if self.contains(v) {
            self.remove(v);
        }
        self.insert(v, new_gain);
    }

    /// Removes and returns the vertex with maximum gain, amortized O(1):
    /// the downward scan in `fix_max_bucket_from` only ever revisits
    /// buckets that extract_max has already emptied.
    pub fn extract_max(&mut self) -> Option<(VertexId, Weight)> {
        let bucket = self.max_bucket?;
        let head = self.buckets[bucket].expect("max_bucket must point at a nonempty bucket");
        let v = VertexId::new(head);
        let gain = self.gain_of[head].unwrap();
        self.unlink(v);
        self.fix_max_bucket_from(bucket);
        Some((v, gain))
    }

    pub fn peek_max(&self) -> Option<(VertexId, Weight)> {
        let bucket = self.max_bucket?;
        let head = self.buckets[bucket]?;
        Some((VertexId::new(head), self.gain_of[head].unwrap()))
    }
}
