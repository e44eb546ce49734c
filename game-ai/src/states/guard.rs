//! The guard sub-machine (§4.4): `Return`/`Idle`/`Inner`/`Outer`/`GetCrate`/
//! `AttackAggressor`, hosting a nested [`AttackState`] sub-machine the same
//! way the top-level machine hosts this one. `GuardMode` is re-exported from
//! [`crate::command`] rather than redefined here — the top-level goal's
//! `configure_for_command` writes a `command::GuardMode` straight into this
//! machine's goal, so the two must be the same type, not two independently
//! evolving enums with the same variant names.

use crate::collaborators::SimContext;
use crate::ids::{ObjectId, StateId};
use crate::machine::{collapse_sleep, StateMachine, TransitionRow};
use crate::state::{ExitType, StateBody, StateReturn};
use crate::states::attack::{AttackExitConditions, AttackGoal, AttackState};
use crate::states::interaction::PickUpCrate;
use crate::states::movement::MoveToRuntime;
use crate::targeting::{find_closest_enemy, TargetQualifiers};
use crate::tunables::{
    FRAMES_PER_SECOND, GUARD_GUARDEE_MOVE_TOLERANCE, GUARD_INNER_RING_SCALE, GUARD_OUTER_RING_SCALE,
    GUARD_OUTER_RING_TIMEOUT_SECONDS, GUARD_RETURN_SCAN_JITTER_FRAMES,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::command::GuardMode;

/// What's being guarded, and how the guard point/scan is resolved each tick
/// (§4.4 supplement). `Retaliate` carries the specific aggressor id supplied
/// by the command rather than a guard post at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GuardKind {
    Position,
    Object,
    Area(f32),
    TunnelNetwork,
    Retaliate(ObjectId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardGoal {
    pub owner: ObjectId,
    pub guard_point: Vec3,
    /// The guarded object for `GuardKind::Object`; the aggressor id for
    /// `GuardKind::Retaliate`. Unused by `Position`/`Area`/`TunnelNetwork`.
    pub guardee: Option<ObjectId>,
    pub radius: f32,
    pub mode: GuardMode,
    pub kind: GuardKind,
    pub current_aggressor: Option<ObjectId>,
    /// Set when a kill drops something worth a `GetCrate` side trip; never
    /// populated by this core today (crate-drop is a damage-resolution event
    /// outside the collaborator contract, §1), but carried so a caller able
    /// to observe drops has somewhere to put it before the next tick.
    pub pending_crate: Option<ObjectId>,
    next_scan_tick: u32,
}

impl GuardGoal {
    pub fn new(
        owner: ObjectId,
        guard_point: Vec3,
        guardee: Option<ObjectId>,
        radius: f32,
        mode: GuardMode,
        kind: GuardKind,
    ) -> Self {
        Self {
            owner,
            guard_point,
            guardee,
            radius,
            mode,
            kind,
            current_aggressor: None,
            pending_crate: None,
            next_scan_tick: 0,
        }
    }

    fn inner_radius(&self) -> f32 {
        self.radius * GUARD_INNER_RING_SCALE
    }

    fn outer_radius(&self) -> f32 {
        self.radius * GUARD_OUTER_RING_SCALE
    }

    /// The point scans and the `Return` move target itself (§4.4 supplement:
    /// object guards track the live position of the guarded object).
    fn effective_guard_point(&self, ctx: &SimContext) -> Vec3 {
        match self.kind {
            GuardKind::Object => self
                .guardee
                .and_then(|id| ctx.objects.position(id))
                .unwrap_or(self.guard_point),
            _ => self.guard_point,
        }
    }
}

/// Inner-target scan composition (§4.4): rejects allies/neutrals,
/// stealth-undetected, cannot-attack (all three already enforced by
/// `find_closest_enemy`'s own filter chain), plus a map-layer mismatch
/// reject and, for `GuardFlyingUnitsOnly`, an airborne requirement — both
/// expressed here since they are guard-specific, not part of the shared
/// acquisition chain.
fn scan_for_aggressor(ctx: &SimContext, goal: &GuardGoal) -> Option<ObjectId> {
    let owner_layer = ctx.objects.map_layer(goal.owner);
    let mode = goal.mode;
    let extra = |ctx: &SimContext, candidate: ObjectId| -> bool {
        if ctx.objects.map_layer(candidate) != owner_layer {
            return false;
        }
        if matches!(mode, GuardMode::GuardFlyingUnitsOnly) && !ctx.objects.is_airborne(candidate) {
            return false;
        }
        true
    };
    find_closest_enemy(ctx, goal.owner, goal.inner_radius(), TargetQualifiers::default(), None, Some(&extra))
}

/// Deterministic per-tick jitter so many guards scanning the same frame
/// don't all pay the scan cost on the same tick (§4.4: "random-offset
/// cadence to avoid per-tick spikes").
/// Short-circuits `Return`/`Inner` straight into `AttackAggressor` the tick
/// something actually lands a hit on the guard, rather than waiting for the
/// next scan (§4.4: retaliation is a reaction to being attacked, not a
/// detection roll).
fn has_attacked_me(ctx: &SimContext, goal: &GuardGoal) -> bool {
    ctx.objects.last_attacker(goal.owner).is_some()
}

fn scan_jitter(owner: ObjectId, tick: u32) -> u32 {
    let mut x = owner.0 ^ tick.wrapping_mul(2654435761);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x % GUARD_RETURN_SCAN_JITTER_FRAMES.max(1)
}

fn enter_attack_sub(
    ctx: &mut SimContext,
    owner: ObjectId,
    victim: ObjectId,
    exit_conditions: Option<AttackExitConditions>,
    sub: &mut Option<Box<StateMachine<AttackState, AttackGoal>>>,
) -> StateReturn {
    let mut machine = Box::new(crate::states::attack::new_attack_machine(
        owner,
        AttackGoal::new(owner, victim, exit_conditions),
    ));
    let ret = collapse_sleep(machine.start(ctx));
    *sub = Some(machine);
    ret
}

fn update_attack_sub(ctx: &mut SimContext, sub: &mut Option<Box<StateMachine<AttackState, AttackGoal>>>) -> StateReturn {
    match sub {
        Some(machine) => collapse_sleep(machine.update_state_machine(ctx)),
        None => StateReturn::Failure,
    }
}

fn exit_attack_sub(ctx: &mut SimContext, owner: ObjectId, sub: &mut Option<Box<StateMachine<AttackState, AttackGoal>>>) {
    if let Some(mut machine) = sub.take() {
        let victim = machine.goal.victim;
        crate::states::attack::force_exit(&mut machine, ctx);
        crate::reservations::remove_targeter(ctx, victim, owner);
    }
}

pub mod ids {
    use crate::ids::StateId;

    pub const RETURN: StateId = StateId(0);
    pub const IDLE: StateId = StateId(1);
    pub const INNER: StateId = StateId(2);
    pub const OUTER: StateId = StateId(3);
    pub const GET_CRATE: StateId = StateId(4);
    pub const ATTACK_AGGRESSOR: StateId = StateId(5);
}

pub enum GuardState {
    Return(MoveToRuntime),
    Idle,
    Inner(Option<Box<StateMachine<AttackState, AttackGoal>>>),
    Outer(Option<Box<StateMachine<AttackState, AttackGoal>>>),
    GetCrate(PickUpCrate),
    AttackAggressor(Option<Box<StateMachine<AttackState, AttackGoal>>>),
}

impl GuardState {
    fn id(&self) -> StateId {
        match self {
            GuardState::Return(_) => ids::RETURN,
            GuardState::Idle => ids::IDLE,
            GuardState::Inner(_) => ids::INNER,
            GuardState::Outer(_) => ids::OUTER,
            GuardState::GetCrate(_) => ids::GET_CRATE,
            GuardState::AttackAggressor(_) => ids::ATTACK_AGGRESSOR,
        }
    }
}

impl StateBody<GuardGoal> for GuardState {
    fn state_id(&self) -> StateId {
        self.id()
    }

    fn on_enter(&mut self, ctx: &mut SimContext, goal: &mut GuardGoal) -> StateReturn {
        let owner = goal.owner;
        match self {
            GuardState::Return(runtime) => {
                goal.next_scan_tick = ctx.tick;
                let dest = goal.effective_guard_point(ctx);
                runtime.on_enter(ctx, owner, dest, true);
                StateReturn::Continue
            }
            GuardState::Idle => StateReturn::Continue,
            GuardState::Inner(sub) => {
                let Some(aggressor) = goal.current_aggressor else {
                    return StateReturn::Failure;
                };
                let center = goal.effective_guard_point(ctx);
                let exit = AttackExitConditions::within_area(center, goal.inner_radius());
                enter_attack_sub(ctx, owner, aggressor, Some(exit), sub)
            }
            GuardState::Outer(sub) => {
                let Some(aggressor) = goal.current_aggressor else {
                    return StateReturn::Failure;
                };
                let center = goal.effective_guard_point(ctx);
                let deadline = ctx.tick + (GUARD_OUTER_RING_TIMEOUT_SECONDS * FRAMES_PER_SECOND as f32) as u32;
                let exit = AttackExitConditions::within_area_and_deadline(center, goal.outer_radius(), deadline);
                enter_attack_sub(ctx, owner, aggressor, Some(exit), sub)
            }
            GuardState::GetCrate(s) => match goal.pending_crate {
                Some(crate_id) => {
                    let mut goal_stub = crate::states::top_level::TopLevelGoal::new(owner);
                    goal_stub.victim = Some(crate_id);
                    s.on_enter(ctx, owner, &mut goal_stub)
                }
                None => StateReturn::Success,
            },
            GuardState::AttackAggressor(sub) => {
                let aggressor = goal
                    .current_aggressor
                    .or(goal.guardee)
                    .or_else(|| ctx.objects.last_attacker(owner));
                let Some(aggressor) = aggressor else {
                    return StateReturn::Failure;
                };
                goal.current_aggressor = Some(aggressor);
                enter_attack_sub(ctx, owner, aggressor, None, sub)
            }
        }
    }

    fn update(&mut self, ctx: &mut SimContext, goal: &mut GuardGoal) -> StateReturn {
        let owner = goal.owner;
        match self {
            GuardState::Return(runtime) => {
                if ctx.tick >= goal.next_scan_tick {
                    goal.next_scan_tick = ctx.tick + scan_jitter(owner, ctx.tick) + 1;
                    if let Some(aggressor) = scan_for_aggressor(ctx, goal) {
                        debug!(owner = owner.0, aggressor = aggressor.0, "guard detected aggressor while returning");
                        goal.current_aggressor = Some(aggressor);
                        return StateReturn::Failure;
                    }
                }
                let dest = goal.effective_guard_point(ctx);
                runtime.update(ctx, owner, dest)
            }
            GuardState::Idle => {
                if let Some(aggressor) = scan_for_aggressor(ctx, goal) {
                    goal.current_aggressor = Some(aggressor);
                    return StateReturn::Success;
                }
                if goal.kind == GuardKind::Object {
                    if let Some(guardee) = goal.guardee {
                        if let Some(pos) = ctx.objects.position(guardee) {
                            if pos.distance(goal.guard_point) > GUARD_GUARDEE_MOVE_TOLERANCE {
                                return StateReturn::Failure;
                            }
                        }
                    }
                }
                StateReturn::Continue
            }
            GuardState::Inner(sub) => update_attack_sub(ctx, sub),
            GuardState::Outer(sub) => update_attack_sub(ctx, sub),
            GuardState::GetCrate(s) => {
                let Some(crate_id) = goal.pending_crate else {
                    return StateReturn::Success;
                };
                let mut goal_stub = crate::states::top_level::TopLevelGoal::new(owner);
                goal_stub.victim = Some(crate_id);
                let ret = s.update(ctx, owner, &mut goal_stub);
                if matches!(ret, StateReturn::Success) {
                    goal.pending_crate = None;
                }
                ret
            }
            GuardState::AttackAggressor(sub) => update_attack_sub(ctx, sub),
        }
    }

    fn on_exit(&mut self, ctx: &mut SimContext, goal: &mut GuardGoal, _exit_type: ExitType) {
        let owner = goal.owner;
        match self {
            GuardState::Return(runtime) => runtime.on_exit(ctx, owner),
            GuardState::Idle => {}
            GuardState::Inner(sub) | GuardState::Outer(sub) | GuardState::AttackAggressor(sub) => {
                exit_attack_sub(ctx, owner, sub)
            }
            GuardState::GetCrate(s) => s.on_exit(ctx, owner),
        }
    }
}

/// Builds the guard sub-machine. For every kind but `Retaliate` the default
/// start state is `Return`; `Retaliate` starts directly in
/// `AttackAggressor` and, on completing there, exits the whole guard
/// behavior instead of cycling back to `Return` (§4.4 supplement) — both
/// differences are baked into which state is registered first and what the
/// `AttackAggressor` row's success/failure targets are, decided once here
/// at construction since `goal.kind` does not change over this machine's
/// lifetime.
pub fn new_guard_machine(owner: ObjectId, goal: GuardGoal) -> StateMachine<GuardState, GuardGoal> {
    let retaliate = matches!(goal.kind, GuardKind::Retaliate(_));

    let aggressor_success = if retaliate { StateId::EXIT_WITH_SUCCESS } else { ids::RETURN };
    let aggressor_failure = if retaliate { StateId::EXIT_WITH_FAILURE } else { ids::RETURN };

    let return_state = GuardState::Return(MoveToRuntime::default());
    let idle_state = GuardState::Idle;
    let inner_state = GuardState::Inner(None);
    let outer_state = GuardState::Outer(None);
    let get_crate_state = GuardState::GetCrate(PickUpCrate::default());
    let aggressor_state = GuardState::AttackAggressor(None);

    let return_row = TransitionRow::new(ids::IDLE, ids::INNER).with_condition(has_attacked_me, ids::ATTACK_AGGRESSOR);
    let idle_row = TransitionRow::new(ids::INNER, ids::RETURN);
    let inner_row = TransitionRow::new(ids::OUTER, ids::RETURN).with_condition(has_attacked_me, ids::ATTACK_AGGRESSOR);
    let outer_row = TransitionRow::new(ids::GET_CRATE, ids::RETURN);
    let get_crate_row = TransitionRow::new(ids::RETURN, ids::RETURN);
    let aggressor_row = TransitionRow::new(aggressor_success, aggressor_failure);

    let (states, rows) = if retaliate {
        (
            vec![aggressor_state, return_state, idle_state, inner_state, outer_state, get_crate_state],
            vec![aggressor_row, return_row, idle_row, inner_row, outer_row, get_crate_row],
        )
    } else {
        (
            vec![return_state, idle_state, inner_state, outer_state, get_crate_state, aggressor_state],
            vec![return_row, idle_row, inner_row, outer_row, get_crate_row, aggressor_row],
        )
    };

    StateMachine::new("guard", owner, states, rows, goal)
}

/// Forces an in-flight guard sub-machine to release its resources as if it
/// had exited normally — used when the hosting top-level `Guard` state is
/// itself torn down rather than letting the sub-machine reach a natural
/// exit (mirrors `attack::force_exit`).
pub fn force_exit(machine: &mut StateMachine<GuardState, GuardGoal>, ctx: &mut SimContext) {
    machine.force_exit_current(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use std::cell::RefCell;

    fn guard(position: Vec3) -> FakeUnit {
        FakeUnit {
            position,
            able_to_attack: true,
            weapon: Some((10.0, false, 0.0, None)),
            weapon_ready: true,
            weapon_range: Some(50.0),
            speed: 5.0,
            team: 1,
            ..Default::default()
        }
    }

    fn enemy(position: Vec3) -> FakeUnit {
        FakeUnit {
            position,
            able_to_attack: true,
            team: 2,
            speed: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn idle_detects_inner_target_and_routes_to_inner() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), guard(Vec3::ZERO))
                .with_unit(ObjectId(2), enemy(Vec3::new(30.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let goal = GuardGoal::new(ObjectId(1), Vec3::ZERO, None, 40.0, GuardMode::Normal, GuardKind::Position);
        let mut machine = new_guard_machine(ObjectId(1), goal);
        machine.set_state(ids::IDLE, &mut ctx);
        let ret = machine.update_state_machine(&mut ctx);
        assert_eq!(ret, StateReturn::Continue);
        assert_eq!(machine.current_state_id(), ids::INNER);
        assert_eq!(machine.goal.current_aggressor, Some(ObjectId(2)));
    }

    #[test]
    fn retaliate_starts_directly_in_attack_aggressor() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), guard(Vec3::ZERO))
                .with_unit(ObjectId(2), enemy(Vec3::new(5.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let goal = GuardGoal::new(
            ObjectId(1),
            Vec3::ZERO,
            Some(ObjectId(2)),
            40.0,
            GuardMode::Normal,
            GuardKind::Retaliate(ObjectId(2)),
        );
        let mut machine = new_guard_machine(ObjectId(1), goal);
        machine.start(&mut ctx);
        assert_eq!(machine.current_state_id(), ids::ATTACK_AGGRESSOR);
    }

    #[test]
    fn being_attacked_while_returning_short_circuits_into_attack_aggressor() {
        let mut attacked_guard = guard(Vec3::ZERO);
        attacked_guard.last_attacker = Some(ObjectId(2));
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), attacked_guard)
                .with_unit(ObjectId(2), enemy(Vec3::new(30.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let goal = GuardGoal::new(ObjectId(1), Vec3::ZERO, None, 40.0, GuardMode::Normal, GuardKind::Position);
        let mut machine = new_guard_machine(ObjectId(1), goal);
        machine.start(&mut ctx);
        machine.update_state_machine(&mut ctx);
        assert_eq!(machine.current_state_id(), ids::ATTACK_AGGRESSOR);
    }

    #[test]
    fn flying_units_only_mode_rejects_ground_aggressor() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), guard(Vec3::ZERO))
                .with_unit(ObjectId(2), enemy(Vec3::new(10.0, 0.0, 0.0))),
        );
        let ctx = fresh_context(&world);
        let goal = GuardGoal::new(
            ObjectId(1),
            Vec3::ZERO,
            None,
            40.0,
            GuardMode::GuardFlyingUnitsOnly,
            GuardKind::Position,
        );
        assert_eq!(scan_for_aggressor(&ctx, &goal), None);
    }
}
