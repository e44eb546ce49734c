//! Movement family (§4.2): internal-move-to is the engine behind every
//! state that has to get somewhere. The structs here are plain building
//! blocks — `on_enter`/`update`/`on_exit` inherent methods taking the
//! top-level goal record directly — rather than `StateBody` impls of their
//! own; `top_level::TopLevelState` is the single enum that implements
//! `StateBody` and match-dispatches into these.

use crate::collaborators::SimContext;
use crate::ids::ObjectId;
use crate::state::{ExitType, StateReturn};
use crate::states::top_level::TopLevelGoal;
use crate::tunables::{
    BLOCKED_SECONDS_BEFORE_REPATH, FRAMES_PER_SECOND, GOAL_DRIFT_FRACTION_BEFORE_REPATH,
    GROUND_ARRIVAL_CELL_TOLERANCE, MIN_REPATH_INTERVAL_FRAMES, PANIC_REPICK_SECONDS,
    WANDER_IN_PLACE_RADIUS, WANDER_REPICK_SECONDS,
};
use glam::Vec3;
use tracing::{info, trace};

#[derive(Debug, Clone, Copy)]
pub enum RepathReason {
    Blocked,
    GoalDrift,
}

/// Shared entry point for both repath triggers (§4.2's resolved open
/// question): one cooldown, first trigger in a tick wins the slot.
fn request_repath(
    ctx: &mut SimContext,
    owner: ObjectId,
    destination: Vec3,
    last_repath_tick: &mut Option<u32>,
    reason: RepathReason,
) -> bool {
    if let Some(last) = *last_repath_tick {
        if ctx.tick.saturating_sub(last) < MIN_REPATH_INTERVAL_FRAMES {
            return false;
        }
    }
    let from = ctx.objects.position(owner).unwrap_or_default();
    ctx.pathfinder.request_path(owner, from, destination, true);
    *last_repath_tick = Some(ctx.tick);
    info!(?reason, owner = owner.0, tick = ctx.tick, "repath requested");
    true
}

/// Ground-unit arrival tolerance: `GROUND_ARRIVAL_CELL_TOLERANCE` cells, at
/// one world unit per cell — the collaborator traits expose world-space
/// positions only, so this stands in for the loco's cell size.
const GROUND_ARRIVAL_DISTANCE: f32 = GROUND_ARRIVAL_CELL_TOLERANCE as f32;

/// The reusable path-request/repath/arrival engine every movement state
/// composes. Not a `StateBody` itself: callers own the goal-field reads
/// (`destination`) and decide what "arrived" transitions to.
#[derive(Debug, Clone, Default)]
pub struct MoveToRuntime {
    failed: bool,
    blocked_since: Option<u32>,
    last_progress_distance: Option<f32>,
    last_repath_tick: Option<u32>,
    original_distance: f32,
    last_requested_destination: Vec3,
}

impl MoveToRuntime {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, destination: Vec3, adjusts_destination: bool) {
        *self = Self::default();
        let snapped = if adjusts_destination {
            ctx.pathfinder
                .adjust_destination(owner, destination)
                .or_else(|| ctx.pathfinder.snap_closest_goal_position(owner, destination))
        } else {
            Some(destination)
        };
        match snapped {
            Some(pos) => {
                let from = ctx.objects.position(owner).unwrap_or_default();
                self.original_distance = from.distance(pos);
                self.last_requested_destination = destination;
                ctx.pathfinder.request_path(owner, from, pos, adjusts_destination);
                let layer = ctx.objects.map_layer(owner);
                ctx.pathfinder.update_goal(owner, pos, layer);
            }
            None => self.failed = true,
        }
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, destination: Vec3) -> StateReturn {
        if self.failed {
            return StateReturn::Failure;
        }
        if ctx.pathfinder.is_waiting_for_path(owner) {
            return StateReturn::Continue;
        }
        let Some(path) = ctx.pathfinder.get_path(owner) else {
            return StateReturn::Failure;
        };

        let pos = ctx.objects.position(owner).unwrap_or_default();
        let remaining = pos.distance(path.destination().unwrap_or(destination));

        let progressed = self
            .last_progress_distance
            .map(|prev| remaining + 0.01 < prev)
            .unwrap_or(true);
        if progressed {
            self.blocked_since = None;
        } else if self.blocked_since.is_none() {
            self.blocked_since = Some(ctx.tick);
        }
        self.last_progress_distance = Some(remaining);

        let blocked_secs = self
            .blocked_since
            .map(|since| (ctx.tick.saturating_sub(since)) as f32 / FRAMES_PER_SECOND as f32)
            .unwrap_or(0.0);
        let blocked = blocked_secs > BLOCKED_SECONDS_BEFORE_REPATH;

        let goal_shift = destination.distance(self.last_requested_destination);
        let drifted = self.original_distance > 0.0
            && goal_shift / self.original_distance > GOAL_DRIFT_FRACTION_BEFORE_REPATH;

        if blocked || drifted {
            let reason = if blocked { RepathReason::Blocked } else { RepathReason::GoalDrift };
            if request_repath(ctx, owner, destination, &mut self.last_repath_tick, reason) {
                self.last_requested_destination = destination;
                self.blocked_since = None;
                return StateReturn::Continue;
            }
        }

        if remaining <= GROUND_ARRIVAL_DISTANCE {
            StateReturn::Success
        } else {
            StateReturn::Continue
        }
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        ctx.pathfinder.remove_goal(owner);
    }
}

/// `Command::MoveToPosition`/`TightenToPosition`.
#[derive(Debug, Clone, Default)]
pub struct InternalMoveTo {
    runtime: MoveToRuntime,
    pub adjusts_destination: bool,
}

impl InternalMoveTo {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(destination) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, destination, self.adjusts_destination);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(destination) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.update(ctx, owner, destination)
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `Command::FollowPath`/`FollowExitProductionPath`: a fixed list of legs
/// walked in order, each leg driven by one `MoveToRuntime` pass.
#[derive(Debug, Clone, Default)]
pub struct FollowPath {
    runtime: MoveToRuntime,
    index: usize,
}

impl FollowPath {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.index = 0;
        match goal.path_points.first() {
            Some(first) => {
                self.runtime.on_enter(ctx, owner, *first, true);
                StateReturn::Continue
            }
            None => StateReturn::Failure,
        }
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(&leg) = goal.path_points.get(self.index) else {
            return StateReturn::Failure;
        };
        match self.runtime.update(ctx, owner, leg) {
            StateReturn::Success => {
                self.index += 1;
                match goal.path_points.get(self.index) {
                    Some(&next) => {
                        self.runtime.on_enter(ctx, owner, next, true);
                        StateReturn::Continue
                    }
                    None => StateReturn::Success,
                }
            }
            other => other,
        }
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `Command::FollowWaypointPath{,AsTeam}{,Exact}`. "Exact" variants never
/// adjust the destination and treat the waypoint position itself as the
/// arrival point rather than the nearest pathable cell.
#[derive(Debug, Clone, Default)]
pub struct FollowWaypointPath {
    runtime: MoveToRuntime,
    pub as_team: bool,
    pub exact: bool,
    current: Option<crate::ids::WaypointId>,
}

/// Deterministic "random" link pick: a tiny xorshift keyed on the owner and
/// the waypoint being left, so replays reproduce the same route without a
/// shared RNG state threaded through every call.
fn pick_link(owner: ObjectId, from: crate::ids::WaypointId, links: &[crate::ids::WaypointId]) -> Option<crate::ids::WaypointId> {
    if links.is_empty() {
        return None;
    }
    let mut x = owner.0 ^ from.0.wrapping_mul(2654435761);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    Some(links[(x as usize) % links.len()])
}

impl FollowWaypointPath {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.current = goal.waypoint;
        self.begin_leg(ctx, owner)
    }

    fn begin_leg(&mut self, ctx: &mut SimContext, owner: ObjectId) -> StateReturn {
        let Some(wp) = self.current else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.terrain.waypoint_position(wp) else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, pos, !self.exact);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        let Some(wp) = self.current else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.terrain.waypoint_position(wp) else {
            return StateReturn::Failure;
        };
        match self.runtime.update(ctx, owner, pos) {
            StateReturn::Success => {
                let links = ctx.terrain.waypoint_links(wp);
                match pick_link(owner, wp, &links) {
                    Some(next) => {
                        self.current = Some(next);
                        self.begin_leg(ctx, owner)
                    }
                    None => StateReturn::Success,
                }
            }
            other => other,
        }
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `Wander`/`WanderInPlace`/`Panic` share this engine: pick a nearby random
/// goal, move to it, re-pick on arrival or on a timer.
#[derive(Debug, Clone, Default)]
pub struct WanderRuntime {
    runtime: MoveToRuntime,
    anchor: Vec3,
    next_repick_tick: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WanderKind {
    Free,
    InPlace,
    Panic,
}

fn wander_pick(owner: ObjectId, tick: u32, anchor: Vec3, radius: f32) -> Vec3 {
    let mut x = owner.0 ^ tick.wrapping_mul(2246822519);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    let angle = (x % 3600) as f32 / 3600.0 * std::f32::consts::TAU;
    let dist = ((x / 3600) % 1000) as f32 / 1000.0 * radius;
    anchor + Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist)
}

pub struct Wander {
    pub kind: WanderKind,
    runtime: WanderRuntime,
}

impl Wander {
    pub fn new(kind: WanderKind) -> Self {
        Self {
            kind,
            runtime: WanderRuntime::default(),
        }
    }

    fn repick_interval(&self) -> f32 {
        match self.kind {
            WanderKind::Panic => PANIC_REPICK_SECONDS,
            _ => WANDER_REPICK_SECONDS,
        }
    }

    fn radius(&self) -> f32 {
        match self.kind {
            WanderKind::InPlace => WANDER_IN_PLACE_RADIUS,
            _ => 500.0,
        }
    }

    fn repick(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        let anchor = self.runtime.anchor;
        let target = wander_pick(owner, ctx.tick, anchor, self.radius());
        self.runtime.next_repick_tick = ctx.tick + (self.repick_interval() * FRAMES_PER_SECOND as f32) as u32;
        self.runtime.runtime.on_enter(ctx, owner, target, true);
    }

    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.runtime.anchor = goal.destination.unwrap_or_else(|| ctx.objects.position(owner).unwrap_or_default());
        self.repick(ctx, owner);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        let anchor = self.runtime.anchor;
        let ret = self.runtime.runtime.update(ctx, owner, anchor);
        if matches!(ret, StateReturn::Success) || ctx.tick >= self.runtime.next_repick_tick {
            self.repick(ctx, owner);
            return StateReturn::Continue;
        }
        StateReturn::Continue
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.runtime.on_exit(ctx, owner);
    }
}

/// `Command::MoveAndDelete`: moves like `InternalMoveTo`, but `Success`
/// marks the owner for removal rather than handing the machine to `Idle`.
/// Object deletion itself is outside the collaborator contract (§1's
/// out-of-scope list); the caller driving this machine is expected to treat
/// this state's `Success` as "now despawn the owner".
#[derive(Debug, Clone, Default)]
pub struct MoveAndDelete {
    runtime: MoveToRuntime,
}

impl MoveAndDelete {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(destination) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, destination, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(destination) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.update(ctx, owner, destination)
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `Command::MoveAndEvacuate`/`MoveAndEvacuateAndExit`: move to the rally
/// point, then unload every contained object. The automatic machine-level
/// lock (see `crate::machine`) takes the place of a manual `lock()` call
/// around the unload step.
#[derive(Debug, Clone, Default)]
pub struct MoveAndEvacuate {
    runtime: MoveToRuntime,
    pub and_exit_owner_too: bool,
    unloaded: bool,
}

impl MoveAndEvacuate {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.unloaded = false;
        let Some(destination) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, destination, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(destination) = goal.destination else {
            return StateReturn::Failure;
        };
        match self.runtime.update(ctx, owner, destination) {
            StateReturn::Success => {
                if !self.unloaded {
                    for occupant in ctx.objects.contained_objects(owner) {
                        ctx.objects.remove_from_contain(owner, occupant);
                    }
                    self.unloaded = true;
                }
                StateReturn::Success
            }
            other => other,
        }
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// A short sidestep, always entered as a temporary-state override (§4.7),
/// never as a user-issued command.
#[derive(Debug, Clone, Default)]
pub struct MoveOutOfTheWay {
    runtime: MoveToRuntime,
}

impl MoveOutOfTheWay {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        let pos = ctx.objects.position(owner).unwrap_or_default();
        let sidestep = pos + Vec3::new(2.0, 0.0, 0.0);
        self.runtime.on_enter(ctx, owner, sidestep, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        let pos = ctx.objects.position(owner).unwrap_or_default();
        self.runtime.update(ctx, owner, pos + Vec3::new(2.0, 0.0, 0.0))
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `FaceObject`/`FacePosition`: orient without translating. The collaborator
/// contract does not expose a heading/turn-rate query, so this behaves as a
/// one-tick confirmation that the target still resolves, standing in for
/// "succeeds once within the locomotor's turn tolerance" for the part of
/// that contract this core can observe.
#[derive(Debug, Clone, Default)]
pub struct Face {
    pub target: Option<ObjectId>,
}

impl Face {
    pub fn on_enter(&mut self, _ctx: &mut SimContext, _owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.target = goal.victim;
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, _owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        match self.target.or(goal.victim) {
            Some(target) if ctx.objects.position(target).is_some() => StateReturn::Success,
            Some(_) => StateReturn::Failure,
            None => {
                trace!("face with neither object nor position target");
                StateReturn::Success
            }
        }
    }

    pub fn on_exit(&mut self, _ctx: &mut SimContext, _owner: ObjectId, _exit_type: ExitType) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use std::cell::RefCell;

    #[test]
    fn scenario_move_then_repath_completes_at_the_drifted_goal() {
        let world = RefCell::new(FakeWorld::new().with_unit(
            ObjectId(1),
            FakeUnit {
                position: Vec3::ZERO,
                speed: 10.0,
                ..Default::default()
            },
        ));
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal {
            destination: Some(Vec3::new(100.0, 0.0, 0.0)),
            ..Default::default()
        };
        let mut state = InternalMoveTo::default();
        state.on_enter(&mut ctx, ObjectId(1), &mut goal);

        // Tick 5: pathfinder delivers an interim path.
        ctx.tick = 5;
        world.borrow_mut().deliver_path(
            ObjectId(1),
            crate::collaborators::Path {
                points: vec![Vec3::new(50.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0)],
                adjusted: false,
            },
        );
        world.borrow_mut().units.get_mut(&ObjectId(1)).unwrap().position = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(state.update(&mut ctx, ObjectId(1), &mut goal), StateReturn::Continue);

        // Tick 10: goal drifts by more than 10% of the original 100-unit distance.
        ctx.tick = 10;
        goal.destination = Some(Vec3::new(100.0, 50.0, 0.0));
        let ret = state.update(&mut ctx, ObjectId(1), &mut goal);
        assert_eq!(ret, StateReturn::Continue, "drift should trigger a repath, not a failure");
        assert!(world.borrow().pending_paths.contains_key(&ObjectId(1)));

        // The repathed request resolves and the unit arrives at the new goal.
        world.borrow_mut().deliver_path(
            ObjectId(1),
            crate::collaborators::Path {
                points: vec![Vec3::new(100.0, 50.0, 0.0)],
                adjusted: false,
            },
        );
        ctx.tick = 20;
        world.borrow_mut().units.get_mut(&ObjectId(1)).unwrap().position = Vec3::new(99.0, 49.0, 0.0);
        assert_eq!(state.update(&mut ctx, ObjectId(1), &mut goal), StateReturn::Success);
    }

    #[test]
    fn internal_move_to_without_a_destination_fails_immediately() {
        let world = RefCell::new(FakeWorld::new());
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::default();
        let mut state = InternalMoveTo::default();
        assert_eq!(state.on_enter(&mut ctx, ObjectId(1), &mut goal), StateReturn::Failure);
    }
}
