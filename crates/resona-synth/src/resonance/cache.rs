//! Least-recently-used store of parameter sets keyed by frame shape.

use std::collections::VecDeque;

use super::input::FrameShape;
use super::params::ResonanceParams;

/// Parameter sets ordered from most to least recently used.
#[derive(Debug, Clone)]
pub struct ShapeCache {
    capacity: usize,
    entries: VecDeque<(FrameShape, ResonanceParams)>,
}

impl ShapeCache {
    /// Creates an empty cache holding at most `capacity` shapes (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Maximum number of shapes kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `shape` without touching the recency order.
    pub fn peek(&self, shape: FrameShape) -> Option<&ResonanceParams> {
        self.entries
            .iter()
            .find(|(key, _)| *key == shape)
            .map(|(_, params)| params)
    }

    /// Looks up `shape` and marks it most recently used.
    pub fn touch(&mut self, shape: FrameShape) -> Option<&ResonanceParams> {
        let index = self.entries.iter().position(|(key, _)| *key == shape)?;
        if index != 0 {
            let entry = self.entries.remove(index)?;
            self.entries.push_front(entry);
        }
        self.entries.front().map(|(_, params)| params)
    }

    /// Inserts `params` for `shape` as the most recent entry.
    ///
    /// Returns whatever was displaced: a previous set for the same shape and
    /// any least-recently-used sets beyond capacity.
    pub fn insert(
        &mut self,
        shape: FrameShape,
        params: ResonanceParams,
    ) -> Vec<(FrameShape, ResonanceParams)> {
        let mut displaced = Vec::new();
        if let Some(index) = self.entries.iter().position(|(key, _)| *key == shape) {
            if let Some(old) = self.entries.remove(index) {
                displaced.push(old);
            }
        }
        self.entries.push_front((shape, params));
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                displaced.push(evicted);
            }
        }
        displaced
    }

    /// Shapes from most to least recently used.
    pub fn shapes(&self) -> Vec<FrameShape> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    /// Iterates over live parameter sets, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &(FrameShape, ResonanceParams)> {
        self.entries.iter()
    }

    /// Removes every entry and returns them.
    pub fn drain(&mut self) -> Vec<(FrameShape, ResonanceParams)> {
        self.entries.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResonanceConfig;
    use crate::resonance::params::ResonanceInit;
    use candle_core::{DType, Device};
    use pretty_assertions::assert_eq;

    fn params_for(init: &mut ResonanceInit, shape: FrameShape) -> ResonanceParams {
        init.draw(shape, &Device::Cpu, DType::F32).unwrap()
    }

    fn init() -> ResonanceInit {
        ResonanceInit::new(&ResonanceConfig::new(1).with_seed(0))
    }

    #[test]
    fn test_insert_and_peek() {
        let mut init = init();
        let mut cache = ShapeCache::new(2);
        let shape = FrameShape::new(1, 4);

        let displaced = cache.insert(shape, params_for(&mut init, shape));
        assert!(displaced.is_empty());
        assert_eq!(cache.len(), 1);
        assert!(cache.peek(shape).is_some());
        assert!(cache.peek(FrameShape::new(1, 5)).is_none());
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut init = init();
        let mut cache = ShapeCache::new(2);
        let a = FrameShape::new(1, 4);
        let b = FrameShape::new(1, 5);
        let c = FrameShape::new(2, 4);

        cache.insert(a, params_for(&mut init, a));
        cache.insert(b, params_for(&mut init, b));
        // a becomes most recent, so b is evicted next
        assert!(cache.touch(a).is_some());

        let displaced = cache.insert(c, params_for(&mut init, c));
        assert_eq!(displaced.len(), 1);
        assert_eq!(displaced[0].0, b);
        assert_eq!(cache.shapes(), vec![c, a]);
    }

    #[test]
    fn test_reinsert_same_shape_displaces_old() {
        let mut init = init();
        let mut cache = ShapeCache::new(3);
        let a = FrameShape::new(1, 4);

        let first = params_for(&mut init, a);
        let first_id = first.frequencies().id();
        cache.insert(a, first);

        let displaced = cache.insert(a, params_for(&mut init, a));
        assert_eq!(displaced.len(), 1);
        assert_eq!(displaced[0].1.frequencies().id(), first_id);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_one_replaces() {
        let mut init = init();
        let mut cache = ShapeCache::new(1);
        let a = FrameShape::new(1, 4);
        let b = FrameShape::new(1, 8);

        cache.insert(a, params_for(&mut init, a));
        let displaced = cache.insert(b, params_for(&mut init, b));
        assert_eq!(displaced.len(), 1);
        assert_eq!(cache.shapes(), vec![b]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        assert_eq!(ShapeCache::new(0).capacity(), 1);
    }

    #[test]
    fn test_drain_empties() {
        let mut init = init();
        let mut cache = ShapeCache::new(2);
        let a = FrameShape::new(1, 4);
        cache.insert(a, params_for(&mut init, a));

        assert_eq!(cache.drain().len(), 1);
        assert!(cache.is_empty());
    }
}
