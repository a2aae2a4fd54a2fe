//! Turn rotation among participants.
//!
//! ## TurnOrder
//!
//! A fixed ring of markers established at configuration time, each with an
//! active flag. `next` walks the ring from a marker to the following
//! *active* marker, so deactivated participants are skipped without the
//! ring being rebuilt or reordered.
//!
//! Deserialized orders go through the same checks as [`TurnOrder::new`].

use serde::{Deserialize, Serialize};

use super::marker::Marker;
use crate::error::ConfigurationError;

/// Cyclic turn order over participant markers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTurnOrder", into = "RawTurnOrder")]
pub struct TurnOrder {
    ring: Vec<Marker>,
    active: Vec<bool>,
}

/// Wire form of a [`TurnOrder`], unchecked.
#[derive(Serialize, Deserialize)]
struct RawTurnOrder {
    ring: Vec<Marker>,
    active: Vec<bool>,
}

impl TryFrom<RawTurnOrder> for TurnOrder {
    type Error = ConfigurationError;

    fn try_from(raw: RawTurnOrder) -> Result<Self, Self::Error> {
        let mut order = TurnOrder::new(raw.ring)?;
        if raw.active.len() != order.ring.len() {
            return Err(ConfigurationError::TurnOrderMismatch {
                markers: order.ring.len(),
                flags: raw.active.len(),
            });
        }
        if !raw.active.contains(&true) {
            return Err(ConfigurationError::NoActiveParticipants);
        }
        order.active = raw.active;
        Ok(order)
    }
}

impl From<TurnOrder> for RawTurnOrder {
    fn from(order: TurnOrder) -> Self {
        Self {
            ring: order.ring,
            active: order.active,
        }
    }
}

impl TurnOrder {
    /// Create a turn order with every marker active.
    ///
    /// Fails if the ring is empty or contains duplicate markers.
    pub fn new(markers: impl IntoIterator<Item = Marker>) -> Result<Self, ConfigurationError> {
        let ring: Vec<Marker> = markers.into_iter().collect();
        if ring.is_empty() {
            return Err(ConfigurationError::NoActiveParticipants);
        }
        for (i, marker) in ring.iter().enumerate() {
            if ring[..i].contains(marker) {
                return Err(ConfigurationError::DuplicateMarker { marker: *marker });
            }
        }
        let active = vec![true; ring.len()];
        Ok(Self { ring, active })
    }

    /// Number of markers in the ring, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True if the ring holds no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Number of active markers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    /// Iterate over active markers in ring order.
    pub fn active_markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.ring
            .iter()
            .zip(&self.active)
            .filter(|(_, active)| **active)
            .map(|(m, _)| *m)
    }

    /// Iterate over every marker in ring order.
    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.ring.iter().copied()
    }

    /// Check whether a marker is in the ring and active.
    #[must_use]
    pub fn is_active(&self, marker: Marker) -> bool {
        self.position(marker).is_some_and(|i| self.active[i])
    }

    /// First active marker in ring order.
    #[must_use]
    pub fn first_active(&self) -> Option<Marker> {
        self.active_markers().next()
    }

    /// Successor of `marker` among the active markers.
    ///
    /// The marker itself need not be active: the walk starts at its ring
    /// slot. An unknown marker starts the walk before the first slot.
    /// With a single active marker, that marker is its own successor.
    #[must_use]
    pub fn next(&self, marker: Marker) -> Marker {
        let len = self.ring.len();
        let start = self.position(marker).map_or(len - 1, |i| i);
        (1..=len)
            .map(|step| (start + step) % len)
            .find(|&i| self.active[i])
            .map_or(marker, |i| self.ring[i])
    }

    /// Remove a marker from the rotation, keeping its ring slot.
    ///
    /// Fails if the marker is unknown or is the last active marker.
    pub fn deactivate(&mut self, marker: Marker) -> Result<(), ConfigurationError> {
        let i = self
            .position(marker)
            .ok_or(ConfigurationError::UnknownMarker { marker })?;
        if self.active[i] && self.active_count() == 1 {
            return Err(ConfigurationError::NoActiveParticipants);
        }
        self.active[i] = false;
        Ok(())
    }

    /// Return a marker to the rotation at its original ring slot.
    pub fn activate(&mut self, marker: Marker) -> Result<(), ConfigurationError> {
        let i = self
            .position(marker)
            .ok_or(ConfigurationError::UnknownMarker { marker })?;
        self.active[i] = true;
        Ok(())
    }

    fn position(&self, marker: Marker) -> Option<usize> {
        self.ring.iter().position(|m| *m == marker)
    }
}
