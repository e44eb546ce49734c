//! Group-command dispatch (§4.6): a `Group` is a lightweight, lazily-cached
//! view over a set of member ids — it owns no machine of its own, it only
//! decides, once per group command, how to turn one player intent into each
//! member's individual goal.
//!
//! The per-shape offset math below is adapted from the box/line/wedge/circle
//! formation math `game-units`'s formation system uses for on-screen unit
//! layout, generalized here to world-space offsets fed into each member's
//! `MoveToPosition`-equivalent goal rather than a screen-space `Transform`.

use crate::ids::ObjectId;
use crate::tunables::{
    MIN_DISTANCE_FOR_GROUP, MIN_INFANTRY_FOR_GROUP, MIN_VEHICLES_FOR_GROUP, SKIRMISH_GROUP_FUDGE,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// On-screen/world formation shapes a group move can be arranged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationShape {
    Line,
    Column,
    Box,
    Wedge,
}

/// A set of units being dispatched as one group. Centroid and the group's
/// effective speed (slowest member, so nobody leaves stragglers behind) are
/// cached and only recomputed when `dirty` is set — membership changes, or a
/// caller explicitly calls [`Group::mark_dirty`].
///
/// The cached fields are skipped on xfer (§6): a save only needs `object_ids`
/// to reconstruct the group; the centroid/speed cache is marked dirty again
/// by `Default` and recomputed on the first query after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub object_ids: Vec<ObjectId>,
    #[serde(skip)]
    cached_centroid: Option<Vec3>,
    #[serde(skip)]
    cached_speed: Option<f32>,
    #[serde(skip, default = "default_dirty")]
    dirty: bool,
}

fn default_dirty() -> bool {
    true
}

impl Group {
    pub fn new(object_ids: Vec<ObjectId>) -> Self {
        Self {
            object_ids,
            cached_centroid: None,
            cached_speed: None,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.object_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_ids.is_empty()
    }

    /// Recomputes (if dirty) and returns the group's centroid.
    pub fn centroid(&mut self, position_of: impl Fn(ObjectId) -> Option<Vec3>) -> Vec3 {
        if self.dirty || self.cached_centroid.is_none() {
            self.recompute(&position_of, |_| 0.0);
        }
        self.cached_centroid.unwrap_or(Vec3::ZERO)
    }

    /// Recomputes (if dirty) and returns the group's effective speed: the
    /// slowest member's speed, so a shared-path group move never leaves
    /// anyone behind.
    pub fn effective_speed(
        &mut self,
        position_of: impl Fn(ObjectId) -> Option<Vec3>,
        speed_of: impl Fn(ObjectId) -> f32,
    ) -> f32 {
        if self.dirty || self.cached_speed.is_none() {
            self.recompute(&position_of, &speed_of);
        }
        self.cached_speed.unwrap_or(0.0)
    }

    fn recompute(
        &mut self,
        position_of: &impl Fn(ObjectId) -> Option<Vec3>,
        speed_of: &impl Fn(ObjectId) -> f32,
    ) {
        let positions: Vec<Vec3> = self.object_ids.iter().filter_map(|id| position_of(*id)).collect();
        self.cached_centroid = if positions.is_empty() {
            None
        } else {
            Some(positions.iter().fold(Vec3::ZERO, |acc, p| acc + *p) / positions.len() as f32)
        };
        self.cached_speed = self
            .object_ids
            .iter()
            .map(|id| speed_of(*id))
            .filter(|s| *s > 0.0)
            .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.min(s))));
        self.dirty = false;
    }
}

/// Whether a group move of `infantry_count` infantry and `vehicle_count`
/// vehicles over `distance` is worth routing as one shared formation path,
/// versus simply handing every member its own individual goal (§4.6: short
/// hops, or too few members, aren't worth the shared-path bookkeeping).
pub fn should_use_group_path(infantry_count: usize, vehicle_count: usize, distance: f32) -> bool {
    if distance < MIN_DISTANCE_FOR_GROUP {
        return false;
    }
    infantry_count >= MIN_INFANTRY_FOR_GROUP || vehicle_count >= MIN_VEHICLES_FOR_GROUP
}

/// World-space offset (on the ground plane) for `index` of `total` members
/// arranged in `shape`, centered on the group's destination.
pub fn formation_offset(shape: FormationShape, index: usize, total: usize, spacing: f32) -> Vec3 {
    match shape {
        FormationShape::Line => {
            let center_offset = (total.saturating_sub(1)) as f32 * spacing / 2.0;
            Vec3::new(index as f32 * spacing - center_offset, 0.0, 0.0)
        }
        FormationShape::Column => Vec3::new(0.0, 0.0, index as f32 * spacing),
        FormationShape::Box => {
            let per_row = (total as f32).sqrt().ceil() as usize;
            let per_row = per_row.max(1);
            let row = index / per_row;
            let col = index % per_row;
            let center_offset = (per_row.saturating_sub(1)) as f32 * spacing / 2.0;
            Vec3::new(col as f32 * spacing - center_offset, 0.0, row as f32 * spacing)
        }
        FormationShape::Wedge => {
            let row = ((index as f32 * 2.0).sqrt()).floor() as usize;
            let pos_in_row = index.saturating_sub(row * (row + 1) / 2);
            let x = if row == 0 {
                0.0
            } else {
                (pos_in_row as f32 - row as f32 / 2.0) * spacing
            };
            Vec3::new(x, 0.0, row as f32 * spacing)
        }
    }
}

/// The "close enough" skirmish termination fudge factor for a group move
/// (§4.6): a skirmish-AI group move is considered arrived once every member
/// is within `base_tolerance + group_size * SKIRMISH_GROUP_FUDGE` of its own
/// formation slot, rather than waiting for an exact per-member arrival.
pub fn skirmish_arrival_tolerance(base_tolerance: f32, group_size: usize) -> f32 {
    base_tolerance + group_size as f32 * SKIRMISH_GROUP_FUDGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_averages_member_positions() {
        let mut group = Group::new(vec![ObjectId(1), ObjectId(2)]);
        let positions = |id: ObjectId| match id {
            ObjectId(1) => Some(Vec3::new(0.0, 0.0, 0.0)),
            ObjectId(2) => Some(Vec3::new(10.0, 0.0, 0.0)),
            _ => None,
        };
        assert_eq!(group.centroid(positions), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn effective_speed_is_the_slowest_member() {
        let mut group = Group::new(vec![ObjectId(1), ObjectId(2)]);
        let positions = |_: ObjectId| Some(Vec3::ZERO);
        let speeds = |id: ObjectId| match id {
            ObjectId(1) => 5.0,
            ObjectId(2) => 2.0,
            _ => 0.0,
        };
        assert_eq!(group.effective_speed(positions, speeds), 2.0);
    }

    #[test]
    fn short_moves_skip_group_path_even_with_enough_members() {
        assert!(!should_use_group_path(MIN_INFANTRY_FOR_GROUP, 0, 1.0));
        assert!(should_use_group_path(MIN_INFANTRY_FOR_GROUP, 0, MIN_DISTANCE_FOR_GROUP));
    }

    #[test]
    fn too_few_members_skip_group_path_regardless_of_distance() {
        assert!(!should_use_group_path(1, 1, 1000.0));
    }

    #[test]
    fn line_formation_centers_around_zero() {
        let left = formation_offset(FormationShape::Line, 0, 3, 2.0);
        let middle = formation_offset(FormationShape::Line, 1, 3, 2.0);
        let right = formation_offset(FormationShape::Line, 2, 3, 2.0);
        assert_eq!(middle, Vec3::ZERO);
        assert_eq!(left.x, -right.x);
    }

    /// §8 scenario 5: a larger group's skirmish tolerance widens, so members
    /// that land a bit short of their exact formation slot still count as
    /// arrived rather than trickling in one straggler at a time.
    #[test]
    fn larger_groups_get_a_wider_skirmish_tolerance() {
        let small = skirmish_arrival_tolerance(2.0, 4);
        let large = skirmish_arrival_tolerance(2.0, 20);
        assert!(large > small);
        assert_eq!(small, 2.0 + 4.0 * SKIRMISH_GROUP_FUDGE);
        assert_eq!(large, 2.0 + 20.0 * SKIRMISH_GROUP_FUDGE);
    }
}
