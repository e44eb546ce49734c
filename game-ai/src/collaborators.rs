//! The external-collaborator contracts (§6) expressed as traits, bundled
//! into one [`SimContext`] handed down the call chain instead of read off
//! global singletons (§9, "Global singletons ... → a single `SimContext`
//! bundle passed down the call chain").
//!
//! This crate owns none of the real implementations — the pathfinder lives
//! in `game-physics`/`game-world`, the partition manager in
//! `game-physics::spatial`, terrain in `game-world::terrain`. A thin adapter
//! outside this crate implements these traits over the real resources each
//! tick and builds the `SimContext`; the behavior core itself only ever sees
//! the trait objects, which is what makes it testable against hand-written
//! fakes.

use crate::ids::{ObjectId, PathId, PolygonId, WaypointId, WeaponId};
use glam::Vec3;

/// Relationship between two objects' owning players, as the behavior core
/// needs to reason about it (targeting, guard scans, attack conditions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Relationship {
    Enemies,
    Neutral,
    Allies,
}

/// A resolved path: way-ordered world-space points plus whether the
/// destination was adjusted/snapped by the pathfinder.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Path {
    pub points: Vec<Vec3>,
    pub adjusted: bool,
}

impl Path {
    pub fn destination(&self) -> Option<Vec3> {
        self.points.last().copied()
    }
}

/// `request_path` / `adjust_destination` / `is_view_blocked` / cell queries.
pub trait Pathfinder {
    fn request_path(&mut self, owner: ObjectId, from: Vec3, to: Vec3, adjust: bool) -> PathId;
    fn is_waiting_for_path(&self, owner: ObjectId) -> bool;
    fn get_path(&self, owner: ObjectId) -> Option<Path>;
    fn adjust_destination(&self, owner: ObjectId, pos: Vec3) -> Option<Vec3>;
    fn snap_closest_goal_position(&self, owner: ObjectId, pos: Vec3) -> Option<Vec3>;
    fn update_goal(&mut self, owner: ObjectId, pos: Vec3, layer: PolygonId);
    fn remove_goal(&mut self, owner: ObjectId);
    fn is_attack_view_blocked(&self, owner: ObjectId, from: Vec3, target: ObjectId, to: Vec3) -> bool;
    fn get_cell_walkable(&self, layer: PolygonId, x: i32, y: i32) -> Option<bool>;
}

/// Ordering hint for `iterate_objects_in_range` (closest-first vs. unordered
/// bucket scan — the partition manager is free to pick the cheap one for a
/// given caller per §4.4's "insertion-cheap-first" guard scan).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOrder {
    NearToFar,
    Unordered,
}

/// Spatial queries: closest-object and range iteration, distance helpers.
pub trait PartitionManager {
    fn get_closest_object(
        &self,
        pos: Vec3,
        range: f32,
        filter: &dyn Fn(ObjectId) -> bool,
    ) -> Option<ObjectId>;

    fn iterate_objects_in_range(
        &self,
        pos: Vec3,
        range: f32,
        order: IterationOrder,
    ) -> Vec<ObjectId>;

    fn get_distance_squared(&self, a: ObjectId, b: ObjectId) -> f32;
    fn get_relative_angle_2d(&self, unit: ObjectId, target: ObjectId) -> f32;
}

/// Status, weapon, containment and relationship queries against a unit.
pub trait ObjectQuery {
    fn position(&self, id: ObjectId) -> Option<Vec3>;
    fn is_effectively_dead(&self, id: ObjectId) -> bool;
    fn is_airborne(&self, id: ObjectId) -> bool;
    fn is_contained_by(&self, id: ObjectId) -> Option<ObjectId>;
    fn is_disabled(&self, id: ObjectId) -> bool;
    fn is_able_to_attack(&self, id: ObjectId) -> bool;
    fn is_stealthed_and_undetected(&self, observer: ObjectId, target: ObjectId) -> bool;
    fn is_building(&self, id: ObjectId) -> bool;
    fn relationship(&self, from: ObjectId, to: ObjectId) -> Relationship;

    /// Whether `observer` currently has `target` out of the fog of war
    /// (§4.5's "unfogged" filter step); a fogged target is never a valid
    /// acquisition candidate regardless of how it scores otherwise.
    fn is_unfogged(&self, observer: ObjectId, target: ObjectId) -> bool;
    /// Whether `id` is flagged as too minor to bother engaging (scaffolding,
    /// decorative debris, ...) — the last filter step before stealth
    /// rejection in target acquisition (§4.5).
    fn is_insignificant(&self, id: ObjectId) -> bool;

    fn current_weapon_range(&self, id: ObjectId) -> Option<f32>;
    fn is_within_attack_range(&self, attacker: ObjectId, target: ObjectId) -> bool;
    fn is_contact_weapon(&self, id: ObjectId) -> bool;
    fn has_leech_range(&self, id: ObjectId) -> bool;
    fn is_too_close(&self, attacker: ObjectId, target: ObjectId) -> bool;

    fn contained_objects(&self, container: ObjectId) -> Vec<ObjectId>;
    fn add_to_contain(&mut self, container: ObjectId, occupant: ObjectId) -> bool;
    fn remove_from_contain(&mut self, container: ObjectId, occupant: ObjectId);
    fn contain_capacity_remaining(&self, container: ObjectId) -> u32;

    /// Declared target priority for priority-weighted acquisition (§4.5).
    fn declared_priority(&self, id: ObjectId) -> i32;
    fn speed(&self, id: ObjectId) -> f32;
    fn map_layer(&self, id: ObjectId) -> PolygonId;

    /// Whether `id` can be crushed/squished by `crusher` rather than fought
    /// at range — the attack sub-machine always chases a crushable target
    /// down instead of holding approach/pursue state (§4.3).
    fn can_crush(&self, crusher: ObjectId, id: ObjectId) -> bool;
    /// Whether `id` is under player or script control rather than the AI,
    /// a precondition on the crush-pursuit rule alongside `can_crush` (§4.3:
    /// the rule only fires for computer-controlled attackers).
    fn is_computer_controlled(&self, id: ObjectId) -> bool;

    /// The last object to have damaged `id` this life, if any — drives the
    /// guard ring's "has this guard been attacked" short-circuit straight
    /// into `AttackAggressor` (§4.4 supplement).
    fn last_attacker(&self, id: ObjectId) -> Option<ObjectId>;

    /// Marks `id` outright dead. Damage computation is out of this core's
    /// scope (§1); this is the one unconditional "this object is now dead"
    /// mutation the core itself must trigger rather than resolve (the
    /// all-or-nothing rappel outcome, §4.2 supplement).
    fn kill(&mut self, id: ObjectId);

    /// Adds (`targeting = true`) or removes (`targeting = false`) `attacker`
    /// from `target`'s targeters set (§5). Idempotent in both directions —
    /// re-adding an already-present targeter, or removing one already gone,
    /// is a no-op rather than an error.
    fn add_targeter(&mut self, target: ObjectId, attacker: ObjectId, targeting: bool);

    /// Parking space / runway reservation (§5): single-writer, explicit
    /// acquire/release. Returns `false` if `space` is already held by a
    /// different holder.
    fn reserve_space(&mut self, space: ObjectId, holder: ObjectId) -> bool;
    fn release_space(&mut self, space: ObjectId, holder: ObjectId);
}

/// Ground height, layer-at-point, waypoint and trigger-area lookups.
pub trait TerrainQuery {
    fn ground_height(&self, x: f32, y: f32) -> f32;
    fn layer_for_destination(&self, pos: Vec3) -> PolygonId;
    fn waypoint_position(&self, id: WaypointId) -> Option<Vec3>;
    fn waypoint_links(&self, id: WaypointId) -> Vec<WaypointId>;
    fn trigger_area_by_name(&self, name: &str) -> Option<(Vec3, f32)>;
    /// Nearest open ground cell within `max_radius` of `center`, for dropping
    /// a unit somewhere sane when its intended destination (e.g. a full
    /// building's contain slot) can't take it (§4.2 supplement's rappel
    /// "placed on the ground nearby" outcome).
    fn find_position_around(&self, center: Vec3, max_radius: f32) -> Option<Vec3>;
}

/// A weapon's readiness, as the attack sub-machine needs to see it (§4.3).
/// `PreAttack` covers any wind-up/reload phase that isn't ready yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    PreAttack,
    ReadyToFire,
}

/// Weapon selection, turret/chassis aiming, and firing (§4.3). Kept separate
/// from [`ObjectQuery`] because it is the one collaborator surface the attack
/// sub-machine owns almost exclusively — every other state touches
/// `ObjectQuery` but not this.
pub trait WeaponQuery {
    /// Best weapon `attacker` could bring against `target` by damage, or
    /// `None` if nothing can hit it at all (out of ammo, wrong domain).
    fn best_weapon_against(&self, attacker: ObjectId, target: ObjectId) -> Option<WeaponId>;
    fn weapon_damage(&self, attacker: ObjectId, weapon: WeaponId, target: ObjectId) -> f32;
    fn weapon_state(&self, attacker: ObjectId, weapon: WeaponId) -> WeaponState;
    /// The weapon's own minimum aim tolerance, in degrees. The attack
    /// sub-machine takes `max(this, MIN_AIM_DELTA_DEGREES)` (§4.3).
    fn weapon_intrinsic_aim_delta_degrees(&self, weapon: WeaponId) -> f32;
    fn has_rotating_turret(&self, attacker: ObjectId) -> bool;
    /// Hands aiming to the turret sub-controller; the turret owns its own
    /// timing; this never reports "aimed", only "turret is on the case".
    fn turret_track(&mut self, attacker: ObjectId, target: ObjectId);
    /// Orients the chassis toward `target_pos`, returning the current
    /// angular error in degrees for the caller to compare against the
    /// weapon's aim delta.
    fn chassis_aim_at(&mut self, attacker: ObjectId, target_pos: Vec3) -> f32;
    fn fire_weapon(&mut self, attacker: ObjectId, weapon: WeaponId, target: ObjectId);
    /// `None` means unlimited (or not ammo-tracked); `Some(0)` means dry.
    fn shots_remaining(&self, attacker: ObjectId, weapon: WeaponId) -> Option<u32>;
}

/// Per-tick bundle of borrowed collaborator references. Constructed once by
/// the caller outside this crate and threaded through every `on_enter`,
/// `update`, `on_exit`, and condition call — replacing the thread-local /
/// global-singleton access pattern the original engine used.
pub struct SimContext<'a> {
    pub pathfinder: &'a mut dyn Pathfinder,
    pub partition: &'a dyn PartitionManager,
    pub objects: &'a mut dyn ObjectQuery,
    pub terrain: &'a dyn TerrainQuery,
    pub weapons: &'a mut dyn WeaponQuery,
    /// Current simulation tick, for deadline/cooldown arithmetic.
    pub tick: u32,
}
