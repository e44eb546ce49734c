//! Hand-written fakes for the five collaborator traits (§6), used by unit
//! tests throughout this crate instead of spinning up a Bevy `World`: the
//! behavior core's logic is exercised as ordinary function calls against a
//! [`SimContext`] built over these fakes.
//!
//! [`FakeWorld`] holds the data; [`FakeCollaborators`] is a thin, `Copy`
//! view over a shared `&RefCell<FakeWorld>` that implements all five
//! collaborator traits through interior mutability — which is what lets one
//! backing fake hand out the independent `&mut`/`&` borrows `SimContext`
//! needs without resorting to unsafe aliasing.

use crate::collaborators::{
    IterationOrder, ObjectQuery, Path, Pathfinder, PartitionManager, Relationship, SimContext,
    TerrainQuery, WeaponQuery, WeaponState,
};
use crate::ids::{ObjectId, PathId, PolygonId, WaypointId, WeaponId};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use glam::Vec3;
use std::cell::RefCell;

#[derive(Debug, Clone, Default)]
pub struct FakeUnit {
    pub position: Vec3,
    pub dead: bool,
    pub airborne: bool,
    pub contained_by: Option<ObjectId>,
    pub disabled: bool,
    pub able_to_attack: bool,
    pub stealthed_and_undetected: bool,
    pub building: bool,
    pub team: u32,
    pub weapon_range: Option<f32>,
    pub contact_weapon: bool,
    pub leech_range: bool,
    pub declared_priority: i32,
    pub speed: f32,
    pub contained: Vec<ObjectId>,
    pub contain_capacity: u32,
    /// `(damage, has_rotating_turret, intrinsic_aim_delta_degrees, shots_remaining)`.
    pub weapon: Option<(f32, bool, f32, Option<u32>)>,
    pub weapon_ready: bool,
    pub crushable: bool,
    pub computer_controlled: bool,
    pub last_attacker: Option<ObjectId>,
    pub fogged: bool,
    pub insignificant: bool,
}

#[derive(Default)]
pub struct FakeWorld {
    pub units: HashMap<ObjectId, FakeUnit>,
    pub pending_paths: HashMap<ObjectId, PathId>,
    pub resolved_paths: HashMap<ObjectId, Path>,
    pub goals: HashMap<ObjectId, (Vec3, PolygonId)>,
    pub waypoints: HashMap<WaypointId, (Vec3, Vec<WaypointId>)>,
    pub view_blocked: bool,
    pub walkable: bool,
    pub chassis_aim_error_degrees: f32,
    pub shots_fired: HashMap<ObjectId, u32>,
    pub turret_tracked: HashMap<ObjectId, ObjectId>,
    pub targeters: HashMap<ObjectId, HashSet<ObjectId>>,
    pub reserved_spaces: HashMap<ObjectId, ObjectId>,
    next_path_id: u32,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self {
            walkable: true,
            next_path_id: 1,
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, id: ObjectId, unit: FakeUnit) -> Self {
        self.units.insert(id, unit);
        self
    }

    pub fn deliver_path(&mut self, owner: ObjectId, path: Path) {
        self.pending_paths.remove(&owner);
        self.resolved_paths.insert(owner, path);
    }

    /// Five independent views over the same cell, handed straight to
    /// [`SimContext`]'s five collaborator fields.
    pub fn views(cell: &RefCell<FakeWorld>) -> (
        FakeCollaborators<'_>,
        FakeCollaborators<'_>,
        FakeCollaborators<'_>,
        FakeCollaborators<'_>,
        FakeCollaborators<'_>,
    ) {
        (
            FakeCollaborators(cell),
            FakeCollaborators(cell),
            FakeCollaborators(cell),
            FakeCollaborators(cell),
            FakeCollaborators(cell),
        )
    }
}

#[derive(Clone, Copy)]
pub struct FakeCollaborators<'a>(pub &'a RefCell<FakeWorld>);

impl<'a> Pathfinder for FakeCollaborators<'a> {
    fn request_path(&mut self, owner: ObjectId, _from: Vec3, _to: Vec3, _adjust: bool) -> PathId {
        let mut world = self.0.borrow_mut();
        let id = PathId(world.next_path_id);
        world.next_path_id += 1;
        world.pending_paths.insert(owner, id);
        id
    }

    fn is_waiting_for_path(&self, owner: ObjectId) -> bool {
        self.0.borrow().pending_paths.contains_key(&owner)
    }

    fn get_path(&self, owner: ObjectId) -> Option<Path> {
        self.0.borrow().resolved_paths.get(&owner).cloned()
    }

    fn adjust_destination(&self, _owner: ObjectId, pos: Vec3) -> Option<Vec3> {
        if self.0.borrow().walkable { Some(pos) } else { None }
    }

    fn snap_closest_goal_position(&self, _owner: ObjectId, pos: Vec3) -> Option<Vec3> {
        Some(pos)
    }

    fn update_goal(&mut self, owner: ObjectId, pos: Vec3, layer: PolygonId) {
        self.0.borrow_mut().goals.insert(owner, (pos, layer));
    }

    fn remove_goal(&mut self, owner: ObjectId) {
        self.0.borrow_mut().goals.remove(&owner);
    }

    fn is_attack_view_blocked(&self, _owner: ObjectId, _from: Vec3, _target: ObjectId, _to: Vec3) -> bool {
        self.0.borrow().view_blocked
    }

    fn get_cell_walkable(&self, _layer: PolygonId, _x: i32, _y: i32) -> Option<bool> {
        Some(self.0.borrow().walkable)
    }
}

impl<'a> PartitionManager for FakeCollaborators<'a> {
    fn get_closest_object(
        &self,
        pos: Vec3,
        range: f32,
        filter: &dyn Fn(ObjectId) -> bool,
    ) -> Option<ObjectId> {
        self.iterate_objects_in_range(pos, range, IterationOrder::NearToFar)
            .into_iter()
            .find(|id| filter(*id))
    }

    fn iterate_objects_in_range(&self, pos: Vec3, range: f32, order: IterationOrder) -> Vec<ObjectId> {
        let world = self.0.borrow();
        let mut matches: Vec<(f32, ObjectId)> = world
            .units
            .iter()
            .filter(|(_, unit)| unit.position.distance(pos) <= range)
            .map(|(id, unit)| (unit.position.distance(pos), *id))
            .collect();
        if matches!(order, IterationOrder::NearToFar) {
            matches.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        }
        matches.into_iter().map(|(_, id)| id).collect()
    }

    fn get_distance_squared(&self, a: ObjectId, b: ObjectId) -> f32 {
        let world = self.0.borrow();
        let pa = world.units.get(&a).map(|u| u.position).unwrap_or_default();
        let pb = world.units.get(&b).map(|u| u.position).unwrap_or_default();
        pa.distance_squared(pb)
    }

    fn get_relative_angle_2d(&self, unit: ObjectId, target: ObjectId) -> f32 {
        let world = self.0.borrow();
        let pu = world.units.get(&unit).map(|u| u.position).unwrap_or_default();
        let pt = world.units.get(&target).map(|u| u.position).unwrap_or_default();
        (pt.z - pu.z).atan2(pt.x - pu.x)
    }
}

impl<'a> ObjectQuery for FakeCollaborators<'a> {
    fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.0.borrow().units.get(&id).map(|u| u.position)
    }

    fn is_effectively_dead(&self, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.dead).unwrap_or(true)
    }

    fn is_airborne(&self, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.airborne).unwrap_or(false)
    }

    fn is_contained_by(&self, id: ObjectId) -> Option<ObjectId> {
        self.0.borrow().units.get(&id).and_then(|u| u.contained_by)
    }

    fn is_disabled(&self, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.disabled).unwrap_or(false)
    }

    fn is_able_to_attack(&self, id: ObjectId) -> bool {
        self.0
            .borrow()
            .units
            .get(&id)
            .map(|u| u.able_to_attack)
            .unwrap_or(false)
    }

    fn is_stealthed_and_undetected(&self, _observer: ObjectId, target: ObjectId) -> bool {
        self.0
            .borrow()
            .units
            .get(&target)
            .map(|u| u.stealthed_and_undetected)
            .unwrap_or(false)
    }

    fn is_building(&self, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.building).unwrap_or(false)
    }

    fn relationship(&self, from: ObjectId, to: ObjectId) -> Relationship {
        let world = self.0.borrow();
        let ta = world.units.get(&from).map(|u| u.team);
        let tb = world.units.get(&to).map(|u| u.team);
        match (ta, tb) {
            (Some(a), Some(b)) if a == b => Relationship::Allies,
            (Some(_), Some(_)) => Relationship::Enemies,
            _ => Relationship::Neutral,
        }
    }

    fn current_weapon_range(&self, id: ObjectId) -> Option<f32> {
        self.0.borrow().units.get(&id).and_then(|u| u.weapon_range)
    }

    fn is_within_attack_range(&self, attacker: ObjectId, target: ObjectId) -> bool {
        let world = self.0.borrow();
        match (world.units.get(&attacker), world.units.get(&target)) {
            (Some(a), Some(t)) => match a.weapon_range {
                Some(range) => a.position.distance(t.position) <= range,
                None => false,
            },
            _ => false,
        }
    }

    fn is_contact_weapon(&self, id: ObjectId) -> bool {
        self.0
            .borrow()
            .units
            .get(&id)
            .map(|u| u.contact_weapon)
            .unwrap_or(false)
    }

    fn has_leech_range(&self, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.leech_range).unwrap_or(false)
    }

    fn is_too_close(&self, attacker: ObjectId, target: ObjectId) -> bool {
        let world = self.0.borrow();
        match (world.units.get(&attacker), world.units.get(&target)) {
            (Some(a), Some(t)) => a.position.distance(t.position) < 1.0,
            _ => false,
        }
    }

    fn contained_objects(&self, container: ObjectId) -> Vec<ObjectId> {
        self.0
            .borrow()
            .units
            .get(&container)
            .map(|u| u.contained.clone())
            .unwrap_or_default()
    }

    fn add_to_contain(&mut self, container: ObjectId, occupant: ObjectId) -> bool {
        let mut world = self.0.borrow_mut();
        if let Some(unit) = world.units.get_mut(&container) {
            if (unit.contained.len() as u32) < unit.contain_capacity {
                unit.contained.push(occupant);
                return true;
            }
        }
        false
    }

    fn remove_from_contain(&mut self, container: ObjectId, occupant: ObjectId) {
        let mut world = self.0.borrow_mut();
        if let Some(unit) = world.units.get_mut(&container) {
            unit.contained.retain(|id| *id != occupant);
        }
    }

    fn contain_capacity_remaining(&self, container: ObjectId) -> u32 {
        self.0
            .borrow()
            .units
            .get(&container)
            .map(|u| u.contain_capacity.saturating_sub(u.contained.len() as u32))
            .unwrap_or(0)
    }

    fn declared_priority(&self, id: ObjectId) -> i32 {
        self.0.borrow().units.get(&id).map(|u| u.declared_priority).unwrap_or(0)
    }

    fn speed(&self, id: ObjectId) -> f32 {
        self.0.borrow().units.get(&id).map(|u| u.speed).unwrap_or(0.0)
    }

    fn map_layer(&self, _id: ObjectId) -> PolygonId {
        PolygonId(0)
    }

    fn can_crush(&self, _crusher: ObjectId, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.crushable).unwrap_or(false)
    }

    fn is_computer_controlled(&self, id: ObjectId) -> bool {
        self.0
            .borrow()
            .units
            .get(&id)
            .map(|u| u.computer_controlled)
            .unwrap_or(false)
    }

    fn last_attacker(&self, id: ObjectId) -> Option<ObjectId> {
        self.0.borrow().units.get(&id).and_then(|u| u.last_attacker)
    }

    fn is_unfogged(&self, _observer: ObjectId, target: ObjectId) -> bool {
        !self.0.borrow().units.get(&target).map(|u| u.fogged).unwrap_or(false)
    }

    fn is_insignificant(&self, id: ObjectId) -> bool {
        self.0.borrow().units.get(&id).map(|u| u.insignificant).unwrap_or(false)
    }

    fn kill(&mut self, id: ObjectId) {
        if let Some(unit) = self.0.borrow_mut().units.get_mut(&id) {
            unit.dead = true;
        }
    }

    fn add_targeter(&mut self, target: ObjectId, attacker: ObjectId, targeting: bool) {
        let mut world = self.0.borrow_mut();
        let set = world.targeters.entry(target).or_default();
        if targeting {
            set.insert(attacker);
        } else {
            set.remove(&attacker);
        }
    }

    fn reserve_space(&mut self, space: ObjectId, holder: ObjectId) -> bool {
        let mut world = self.0.borrow_mut();
        match world.reserved_spaces.get(&space) {
            Some(existing) if *existing != holder => false,
            _ => {
                world.reserved_spaces.insert(space, holder);
                true
            }
        }
    }

    fn release_space(&mut self, space: ObjectId, holder: ObjectId) {
        let mut world = self.0.borrow_mut();
        if world.reserved_spaces.get(&space) == Some(&holder) {
            world.reserved_spaces.remove(&space);
        }
    }
}

impl<'a> TerrainQuery for FakeCollaborators<'a> {
    fn ground_height(&self, _x: f32, _y: f32) -> f32 {
        0.0
    }

    fn layer_for_destination(&self, _pos: Vec3) -> PolygonId {
        PolygonId(0)
    }

    fn waypoint_position(&self, id: WaypointId) -> Option<Vec3> {
        self.0.borrow().waypoints.get(&id).map(|(pos, _)| *pos)
    }

    fn waypoint_links(&self, id: WaypointId) -> Vec<WaypointId> {
        self.0
            .borrow()
            .waypoints
            .get(&id)
            .map(|(_, links)| links.clone())
            .unwrap_or_default()
    }

    fn trigger_area_by_name(&self, _name: &str) -> Option<(Vec3, f32)> {
        None
    }

    fn find_position_around(&self, center: Vec3, _max_radius: f32) -> Option<Vec3> {
        if self.0.borrow().walkable { Some(center) } else { None }
    }
}

impl<'a> WeaponQuery for FakeCollaborators<'a> {
    fn best_weapon_against(&self, attacker: ObjectId, target: ObjectId) -> Option<WeaponId> {
        let world = self.0.borrow();
        let has_weapon = world.units.get(&attacker).is_some_and(|u| u.weapon.is_some());
        let target_exists = world.units.contains_key(&target);
        (has_weapon && target_exists).then_some(WeaponId(0))
    }

    fn weapon_damage(&self, attacker: ObjectId, _weapon: WeaponId, _target: ObjectId) -> f32 {
        self.0
            .borrow()
            .units
            .get(&attacker)
            .and_then(|u| u.weapon)
            .map(|(damage, ..)| damage)
            .unwrap_or(0.0)
    }

    fn weapon_state(&self, attacker: ObjectId, _weapon: WeaponId) -> WeaponState {
        let ready = self.0.borrow().units.get(&attacker).map(|u| u.weapon_ready).unwrap_or(false);
        if ready { WeaponState::ReadyToFire } else { WeaponState::PreAttack }
    }

    fn weapon_intrinsic_aim_delta_degrees(&self, _weapon: WeaponId) -> f32 {
        0.0
    }

    fn has_rotating_turret(&self, attacker: ObjectId) -> bool {
        self.0
            .borrow()
            .units
            .get(&attacker)
            .and_then(|u| u.weapon)
            .map(|(_, turret, ..)| turret)
            .unwrap_or(false)
    }

    fn turret_track(&mut self, attacker: ObjectId, target: ObjectId) {
        self.0.borrow_mut().turret_tracked.insert(attacker, target);
    }

    fn chassis_aim_at(&mut self, _attacker: ObjectId, _target_pos: Vec3) -> f32 {
        self.0.borrow().chassis_aim_error_degrees
    }

    fn fire_weapon(&mut self, attacker: ObjectId, _weapon: WeaponId, _target: ObjectId) {
        *self.0.borrow_mut().shots_fired.entry(attacker).or_insert(0) += 1;
    }

    fn shots_remaining(&self, attacker: ObjectId, _weapon: WeaponId) -> Option<u32> {
        self.0.borrow().units.get(&attacker).and_then(|u| u.weapon).and_then(|(.., shots)| shots)
    }
}

/// Convenience macro-free helper: builds a [`SimContext`] over a fresh
/// [`FakeWorld`] cell and hands both back so the test can keep mutating the
/// world between ticks.
pub fn fresh_context(cell: &RefCell<FakeWorld>) -> SimContext<'_> {
    let (mut pathfinder, partition, mut objects, terrain, mut weapons) = FakeWorld::views(cell);
    // Leak the views into the arena-less SimContext by boxing them onto the
    // heap: SimContext needs `&mut`/`&` with the cell's lifetime, and a
    // `FakeCollaborators` is just that reference rewrapped, so a `Box::leak`
    // here only leaks a few bytes per test call and keeps call sites simple.
    let pathfinder: &mut FakeCollaborators<'_> = Box::leak(Box::new(pathfinder));
    let objects: &mut FakeCollaborators<'_> = Box::leak(Box::new(objects));
    let partition: &FakeCollaborators<'_> = Box::leak(Box::new(partition));
    let terrain: &FakeCollaborators<'_> = Box::leak(Box::new(terrain));
    let weapons: &mut FakeCollaborators<'_> = Box::leak(Box::new(weapons));
    SimContext {
        pathfinder,
        partition,
        objects,
        terrain,
        weapons,
        tick: 0,
    }
}
