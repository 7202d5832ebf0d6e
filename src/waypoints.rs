//! Ordered, capacity-bounded waypoint collection.
//!
//! Order is the visiting order. The store holds no algorithm; it only keeps
//! ids unique and the sequence intact across mutations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::point::GeoPoint;
use crate::traits::Located;

/// Maximum number of stored waypoints.
pub const MAX_WAYPOINTS: usize = 10;

/// Opaque waypoint identity, stable across reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointId(u64);

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wp-{}", self.0)
    }
}

/// A named stop in a planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub label: String,
    pub position: GeoPoint,
}

impl Located for Waypoint {
    fn position(&self) -> GeoPoint {
        self.position
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
    next_id: u64,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a waypoint and returns it.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        position: GeoPoint,
    ) -> Result<Waypoint, StoreError> {
        if self.waypoints.len() >= MAX_WAYPOINTS {
            return Err(StoreError::CapacityExceeded {
                capacity: MAX_WAYPOINTS,
            });
        }

        // Ids are never reused, even after `clear`.
        let waypoint = Waypoint {
            id: WaypointId(self.next_id),
            label: label.into(),
            position,
        };
        self.next_id += 1;
        self.waypoints.push(waypoint.clone());
        Ok(waypoint)
    }

    /// Removes the waypoint with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: WaypointId) -> bool {
        match self.waypoints.iter().position(|wp| wp.id == id) {
            Some(index) => {
                self.waypoints.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), StoreError> {
        let len = self.waypoints.len();
        for index in [a, b] {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }
        self.waypoints.swap(a, b);
        Ok(())
    }

    /// Moves the waypoint at `index` one slot earlier.
    pub fn move_up(&mut self, index: usize) -> Result<(), StoreError> {
        match index.checked_sub(1) {
            Some(previous) => self.swap(previous, index),
            None => Err(StoreError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            }),
        }
    }

    /// Moves the waypoint at `index` one slot later.
    pub fn move_down(&mut self, index: usize) -> Result<(), StoreError> {
        self.swap(index, index.saturating_add(1))
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Rewrites the order to follow `ids`.
    ///
    /// `ids` must be a permutation of the stored ids; anything else leaves
    /// the store untouched and returns `false`.
    pub fn reorder(&mut self, ids: &[WaypointId]) -> bool {
        if ids.len() != self.waypoints.len() {
            return false;
        }

        let mut remaining = self.waypoints.clone();
        let mut reordered = Vec::with_capacity(ids.len());
        for id in ids {
            match remaining.iter().position(|wp| wp.id == *id) {
                Some(index) => reordered.push(remaining.swap_remove(index)),
                None => return false,
            }
        }

        self.waypoints = reordered;
        true
    }

    pub fn all(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|wp| wp.id == id)
    }

    pub fn positions(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.waypoints.iter().map(|wp| wp.position)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> WaypointStore {
        let mut store = WaypointStore::new();
        for (i, label) in ["a", "b", "c"].into_iter().enumerate() {
            store.add(label, GeoPoint::new(i as f64, 0.0)).unwrap();
        }
        store
    }

    fn labels(store: &WaypointStore) -> Vec<&str> {
        store.all().iter().map(|wp| wp.label.as_str()).collect()
    }

    #[rstest]
    fn test_add_assigns_unique_ids(store: WaypointStore) {
        let mut ids: Vec<_> = store.all().iter().map(|wp| wp.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(labels(&store), ["a", "b", "c"]);
    }

    #[rstest]
    fn test_eleventh_waypoint_rejected() {
        let mut store = WaypointStore::new();
        for i in 0..MAX_WAYPOINTS {
            store.add(format!("wp{i}"), GeoPoint::new(0.0, i as f64)).unwrap();
        }

        let result = store.add("overflow", GeoPoint::new(1.0, 1.0));
        assert_eq!(
            result.unwrap_err(),
            StoreError::CapacityExceeded {
                capacity: MAX_WAYPOINTS
            }
        );
        assert_eq!(store.len(), MAX_WAYPOINTS);
    }

    #[rstest]
    fn test_remove_preserves_order(mut store: WaypointStore) {
        let b = store.all()[1].id;
        assert!(store.remove(b));
        assert_eq!(labels(&store), ["a", "c"]);
    }

    #[rstest]
    fn test_remove_unknown_is_noop(mut store: WaypointStore) {
        let b = store.all()[1].id;
        store.remove(b);
        assert!(!store.remove(b));
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    fn test_swap(mut store: WaypointStore) {
        store.swap(0, 2).unwrap();
        assert_eq!(labels(&store), ["c", "b", "a"]);
    }

    #[rstest]
    #[case(0, 3)]
    #[case(5, 1)]
    fn test_swap_out_of_range(mut store: WaypointStore, #[case] a: usize, #[case] b: usize) {
        assert!(matches!(
            store.swap(a, b),
            Err(StoreError::IndexOutOfRange { len: 3, .. })
        ));
        assert_eq!(labels(&store), ["a", "b", "c"]);
    }

    #[rstest]
    fn test_move_up_and_down(mut store: WaypointStore) {
        store.move_up(2).unwrap();
        assert_eq!(labels(&store), ["a", "c", "b"]);
        store.move_down(0).unwrap();
        assert_eq!(labels(&store), ["c", "a", "b"]);
        assert!(store.move_up(0).is_err());
        assert!(store.move_down(2).is_err());
    }

    #[rstest]
    fn test_reorder(mut store: WaypointStore) {
        let ids: Vec<_> = store.all().iter().rev().map(|wp| wp.id).collect();
        assert!(store.reorder(&ids));
        assert_eq!(labels(&store), ["c", "b", "a"]);
    }

    #[rstest]
    fn test_reorder_rejects_non_permutation(mut store: WaypointStore) {
        let first = store.all()[0].id;
        assert!(!store.reorder(&[first, first, first]));
        assert!(!store.reorder(&[first]));
        assert_eq!(labels(&store), ["a", "b", "c"]);
    }

    #[rstest]
    fn test_clear_keeps_ids_fresh(mut store: WaypointStore) {
        let old_ids: Vec<_> = store.all().iter().map(|wp| wp.id).collect();
        store.clear();
        assert!(store.is_empty());

        let fresh = store.add("d", GeoPoint::new(0.0, 0.0)).unwrap();
        assert!(!old_ids.contains(&fresh.id));
    }
}
