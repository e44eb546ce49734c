//! Stable integer identifiers used throughout the behavior core.
//!
//! Every cross-reference a machine makes (to a unit, a waypoint, a polygon, an
//! in-flight path request, or a state) is one of these newtypes rather than a
//! raw `u32` or a Bevy `Entity`. That keeps save files stable across reloads
//! (an `Entity` is an allocator detail; these are not) and keeps a stale
//! reference a normal, checkable value instead of a dangling pointer.

use serde::{Deserialize, Serialize};

/// Identifies a unit (the owner of a machine, a victim, an ally, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub const INVALID: ObjectId = ObjectId(0);

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Identifies a waypoint in the level's waypoint graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaypointId(pub u32);

/// Identifies a navigable polygon/layer region (bridges, tunnels, upper decks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolygonId(pub u32);

/// Identifies an in-flight asynchronous path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathId(pub u32);

/// Identifies one of an object's weapon slots (primary/secondary/tertiary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponId(pub u32);

/// Identifies a state within one machine's transition table.
///
/// Two sentinels terminate a machine outright rather than naming a real row:
/// [`StateId::EXIT_WITH_SUCCESS`] and [`StateId::EXIT_WITH_FAILURE`]. They are
/// never registered states; the driver intercepts them before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub u32);

impl StateId {
    pub const EXIT_WITH_SUCCESS: StateId = StateId(u32::MAX);
    pub const EXIT_WITH_FAILURE: StateId = StateId(u32::MAX - 1);

    pub fn is_sentinel(self) -> bool {
        self == Self::EXIT_WITH_SUCCESS || self == Self::EXIT_WITH_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_distinct_and_flagged() {
        assert!(StateId::EXIT_WITH_SUCCESS.is_sentinel());
        assert!(StateId::EXIT_WITH_FAILURE.is_sentinel());
        assert_ne!(StateId::EXIT_WITH_SUCCESS, StateId::EXIT_WITH_FAILURE);
        assert!(!StateId(0).is_sentinel());
    }

    #[test]
    fn object_id_zero_is_invalid() {
        assert!(!ObjectId::INVALID.is_valid());
        assert!(ObjectId(1).is_valid());
    }
}
