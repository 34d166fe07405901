//! Saved real-world points
//!
//! The collection is ordered by insertion and allows duplicates; callers that
//! want to avoid them check [`RealWorldLocations::has`] first. Every mutation
//! rewrites the whole collection under one key and then notifies observers.
//!
//! Mutating methods take `&mut self`, so there is exactly one writer at a time.
//! Owners that share the store across tasks wrap it in a lock.

use crate::constants::storage::WORLD_POINTS_KEY;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::GeoCodeResult;
use crate::notify::{Notification, Observers, Subscription};
use crate::store::KeyValueStore;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Persisted, observable collection of geocoded points
#[derive(Debug)]
pub struct RealWorldLocations<S: KeyValueStore> {
    storage: S,
    points: Vec<GeoCodeResult>,
    observers: Observers,
}

impl<S: KeyValueStore> RealWorldLocations<S> {
    /// Load whatever was last saved.
    ///
    /// Entries that no longer decode are dropped, and a value of the wrong
    /// shape loads as empty. Only failing to read the storage is an error.
    pub fn load(storage: S) -> Result<Self> {
        let points = match storage.get(WORLD_POINTS_KEY)? {
            Some(Value::Array(entries)) => {
                let total = entries.len();
                let points: Vec<GeoCodeResult> = entries
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(GeoCodeResult::from_map)
                    .collect();
                if points.len() < total {
                    warn!(dropped = total - points.len(), "skipped undecodable saved points");
                }
                points
            }
            Some(_) => {
                warn!(key = WORLD_POINTS_KEY, "saved points are not a list, starting empty");
                Vec::new()
            }
            None => Vec::new(),
        };

        debug!(count = points.len(), "loaded saved points");

        Ok(Self {
            storage,
            points,
            observers: Observers::new(),
        })
    }

    /// Points in insertion order
    pub fn points(&self) -> &[GeoCodeResult] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&GeoCodeResult> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a saved point sits exactly at `point`.
    ///
    /// Compares primary locations with exact `==` on both components; there
    /// is no tolerance, so `0.0` and `-0.0` match.
    pub fn has(&self, point: &Coordinates) -> bool {
        self.points.iter().any(|p| p.location().same_as(point))
    }

    /// Add a point at the end, save, and notify.
    ///
    /// Points with non-finite coordinates are refused since they cannot be
    /// saved. If saving fails the point is taken back out, nobody is notified,
    /// and the save error is returned.
    pub fn append(&mut self, result: GeoCodeResult) -> Result<()> {
        for coords in [result.location(), result.display_location()] {
            if !coords.is_finite() {
                return Err(Error::InvalidCoordinates(format!(
                    "Coordinates ({}, {}) are not finite",
                    coords.lat, coords.lng
                )));
            }
        }

        info!(location = result.location_string(), "adding point");
        self.points.push(result);
        if let Err(e) = self.commit() {
            self.points.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove the point at `index`, save, and notify.
    ///
    /// On a save failure the point goes back where it was.
    pub fn remove_at(&mut self, index: usize) -> Result<GeoCodeResult> {
        if index >= self.points.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }

        let removed = self.points.remove(index);
        if let Err(e) = self.commit() {
            self.points.insert(index, removed);
            return Err(e);
        }
        info!(index, location = removed.location_string(), "removed point");
        Ok(removed)
    }

    /// Register for change notifications
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Notification) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// The storage this collection saves into
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn commit(&self) -> Result<()> {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save points");
            return Err(e);
        }
        self.observers.notify(Notification::LocationsUpdated);
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let entries = self
            .points
            .iter()
            .map(|p| Value::Object(p.to_map()))
            .collect();
        self.storage.set(WORLD_POINTS_KEY, Value::Array(entries))
    }
}
