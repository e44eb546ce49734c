//! The attack sub-machine (§4.3): `AimAtTarget` → `FireWeapon`, with
//! `ChaseTarget`/`ApproachTarget` peeling off whenever the victim is out of
//! range. Hosted as an owned `Box<StateMachine<AttackState, AttackGoal>>` by
//! whichever top-level state needs one (plain `Attack`, `AttackMove`'s nested
//! engagement, `Guard`'s `AttackAggressor`) — this machine never knows who
//! its host is.

use crate::collaborators::{Relationship, SimContext};
use crate::ids::{ObjectId, StateId, WeaponId};
use crate::machine::{StateMachine, TransitionRow};
use crate::state::{ExitType, StateBody, StateReturn};
use crate::states::movement::MoveToRuntime;
use crate::targeting::{find_closest_enemy, PriorityWeighting, TargetQualifiers};
use crate::tunables::MIN_AIM_DELTA_DEGREES;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lets a hosting state (chiefly guard) end an otherwise-open-ended attack
/// once the aggressor leaves a radius or a timer expires (§4.4, §5).
/// Consulted on every `on_enter`/`update` alongside the machine's own
/// conditions; a positive result exits the whole sub-machine with `Success`
/// — a boundary being reached is not a failure to fight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackExitConditions {
    WithinArea { center: Vec3, radius: f32 },
    Deadline { tick: u32 },
    /// Guard's `Outer` ring (§4.4): exits on whichever of the two fires
    /// first, rather than requiring both.
    WithinAreaAndDeadline { center: Vec3, radius: f32, tick: u32 },
}

impl AttackExitConditions {
    pub fn within_area(center: Vec3, radius: f32) -> Self {
        Self::WithinArea { center, radius }
    }

    pub fn deadline(tick: u32) -> Self {
        Self::Deadline { tick }
    }

    pub fn within_area_and_deadline(center: Vec3, radius: f32, tick: u32) -> Self {
        Self::WithinAreaAndDeadline { center, radius, tick }
    }

    fn should_exit(&self, ctx: &SimContext, victim_pos: Vec3) -> bool {
        match self {
            Self::WithinArea { center, radius } => victim_pos.distance(*center) > *radius,
            Self::Deadline { tick } => ctx.tick >= *tick,
            Self::WithinAreaAndDeadline { center, radius, tick } => {
                victim_pos.distance(*center) > *radius || ctx.tick >= *tick
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackGoal {
    pub owner: ObjectId,
    pub victim: ObjectId,
    pub locked_weapon: Option<WeaponId>,
    pub original_victim_pos: Vec3,
    pub exit_conditions: Option<AttackExitConditions>,
}

impl AttackGoal {
    pub fn new(owner: ObjectId, victim: ObjectId, exit_conditions: Option<AttackExitConditions>) -> Self {
        Self {
            owner,
            victim,
            locked_weapon: None,
            original_victim_pos: Vec3::ZERO,
            exit_conditions,
        }
    }
}

/// Every tick, before any state steps, re-derives the weapon against the
/// current victim and enforces the weapon-lock invariant (§4.3 supplement):
/// once a weapon is locked on first selection, a different "best" weapon on
/// a later tick is `cannot-possibly-attack`, not a silent switch.
fn select_and_lock_weapon(ctx: &SimContext, goal: &mut AttackGoal) -> Option<WeaponId> {
    let best = ctx.weapons.best_weapon_against(goal.owner, goal.victim);
    match (goal.locked_weapon, best) {
        (None, Some(w)) => {
            goal.locked_weapon = Some(w);
            Some(w)
        }
        (Some(locked), Some(w)) if locked == w => Some(w),
        _ => None,
    }
}

fn victim_is_gone(ctx: &SimContext, goal: &AttackGoal) -> bool {
    ctx.objects.is_effectively_dead(goal.victim)
        || ctx.objects.relationship(goal.owner, goal.victim) != Relationship::Enemies
}

fn cannot_engage(ctx: &SimContext, goal: &AttackGoal) -> bool {
    ctx.objects.is_stealthed_and_undetected(goal.owner, goal.victim) || ctx.objects.is_disabled(goal.owner)
}

fn exit_condition_reached(ctx: &SimContext, goal: &AttackGoal) -> bool {
    match goal.exit_conditions {
        Some(cond) => {
            let victim_pos = ctx.objects.position(goal.victim).unwrap_or(goal.original_victim_pos);
            cond.should_exit(ctx, victim_pos)
        }
        None => false,
    }
}

fn out_of_range(ctx: &SimContext, goal: &AttackGoal) -> bool {
    !ctx.objects.is_within_attack_range(goal.owner, goal.victim)
}

/// `ChaseTarget` pursues a turreted weapon's fleeing (slower) victim running
/// alongside it; `ApproachTarget` is the default closing-the-gap pursuit,
/// used for contact weapons (which drive straight through the target — the
/// collaborator contract has no "treat as non-obstacle" flag to flip, so
/// this is approximated by requesting a path to the victim's exact position
/// rather than a stand-off point).
fn choose_pursuit(ctx: &SimContext, goal: &AttackGoal) -> StateId {
    let turreted = ctx.weapons.has_rotating_turret(goal.owner);
    let fleeing = ctx.objects.speed(goal.victim) > 0.0 && ctx.objects.speed(goal.victim) < ctx.objects.speed(goal.owner);
    if turreted && fleeing {
        ids::CHASE_TARGET
    } else {
        ids::APPROACH_TARGET
    }
}

/// Conditions are plain `fn` pointers (no closures, §9), so the dynamic
/// chase-vs-approach choice is split into two mutually-exclusive predicates
/// rather than one condition with a computed target.
fn out_of_range_wants_chase(ctx: &SimContext, goal: &AttackGoal) -> bool {
    out_of_range(ctx, goal) && choose_pursuit(ctx, goal) == ids::CHASE_TARGET
}

fn out_of_range_wants_approach(ctx: &SimContext, goal: &AttackGoal) -> bool {
    out_of_range(ctx, goal) && choose_pursuit(ctx, goal) == ids::APPROACH_TARGET
}

/// A computer-controlled crusher always prefers running the victim down over
/// standing and shooting, in or out of range ("always pursue if we can
/// squish"). Only attached to `AimAtTarget`/`FireWeapon`, not `ChaseTarget`
/// itself — re-checking it there would re-fire `MoveToRuntime::on_enter`
/// (which resets and re-requests the path) on every tick of a pursuit
/// already underway.
fn wants_crush_pursuit(ctx: &SimContext, goal: &AttackGoal) -> bool {
    ctx.objects.is_computer_controlled(goal.owner) && ctx.objects.can_crush(goal.owner, goal.victim)
}

pub mod ids {
    use crate::ids::StateId;

    pub const AIM_AT_TARGET: StateId = StateId(0);
    pub const FIRE_WEAPON: StateId = StateId(1);
    pub const CHASE_TARGET: StateId = StateId(2);
    pub const APPROACH_TARGET: StateId = StateId(3);
}

pub enum AttackState {
    AimAtTarget,
    FireWeapon,
    ChaseTarget(MoveToRuntime),
    ApproachTarget(MoveToRuntime),
}

impl AttackState {
    fn pursuit_runtime(&mut self) -> Option<&mut MoveToRuntime> {
        match self {
            AttackState::ChaseTarget(r) | AttackState::ApproachTarget(r) => Some(r),
            _ => None,
        }
    }
}

impl StateBody<AttackGoal> for AttackState {
    fn state_id(&self) -> StateId {
        match self {
            AttackState::AimAtTarget => ids::AIM_AT_TARGET,
            AttackState::FireWeapon => ids::FIRE_WEAPON,
            AttackState::ChaseTarget(_) => ids::CHASE_TARGET,
            AttackState::ApproachTarget(_) => ids::APPROACH_TARGET,
        }
    }

    fn on_enter(&mut self, ctx: &mut SimContext, goal: &mut AttackGoal) -> StateReturn {
        match self {
            AttackState::AimAtTarget => {
                // Re-adds idempotently every entry (§5); the set only ever
                // shrinks on the whole sub-machine's exit, handled by the host.
                crate::reservations::add_targeter(ctx, goal.victim, goal.owner);
                if goal.locked_weapon.is_none() {
                    goal.original_victim_pos = ctx.objects.position(goal.victim).unwrap_or_default();
                    if ctx.weapons.best_weapon_against(goal.owner, goal.victim).is_none() {
                        return StateReturn::Failure;
                    }
                }
                StateReturn::Continue
            }
            AttackState::FireWeapon => StateReturn::Continue,
            AttackState::ChaseTarget(runtime) | AttackState::ApproachTarget(runtime) => {
                let dest = ctx.objects.position(goal.victim).unwrap_or(goal.original_victim_pos);
                runtime.on_enter(ctx, goal.owner, dest, true);
                StateReturn::Continue
            }
        }
    }

    fn update(&mut self, ctx: &mut SimContext, goal: &mut AttackGoal) -> StateReturn {
        match self {
            AttackState::AimAtTarget => {
                let Some(weapon) = select_and_lock_weapon(ctx, goal) else {
                    return StateReturn::Failure;
                };
                if ctx.weapons.has_rotating_turret(goal.owner) {
                    ctx.weapons.turret_track(goal.owner, goal.victim);
                    return match ctx.weapons.weapon_state(goal.owner, weapon) {
                        crate::collaborators::WeaponState::ReadyToFire => StateReturn::Success,
                        crate::collaborators::WeaponState::PreAttack => StateReturn::Continue,
                    };
                }
                let target_pos = ctx.objects.position(goal.victim).unwrap_or(goal.original_victim_pos);
                let error = ctx.weapons.chassis_aim_at(goal.owner, target_pos);
                let aim_delta = ctx
                    .weapons
                    .weapon_intrinsic_aim_delta_degrees(weapon)
                    .max(MIN_AIM_DELTA_DEGREES);
                if error <= aim_delta {
                    StateReturn::Success
                } else {
                    StateReturn::Continue
                }
            }
            AttackState::FireWeapon => {
                let Some(weapon) = select_and_lock_weapon(ctx, goal) else {
                    return StateReturn::Failure;
                };
                match ctx.weapons.weapon_state(goal.owner, weapon) {
                    crate::collaborators::WeaponState::PreAttack => StateReturn::Continue,
                    crate::collaborators::WeaponState::ReadyToFire => {
                        ctx.weapons.fire_weapon(goal.owner, weapon, goal.victim);
                        if ctx.objects.is_effectively_dead(goal.victim) {
                            // continue_attack_range: re-acquire another victim
                            // near where this engagement started rather than
                            // wherever the owner has since wandered to.
                            if let Some(next) = find_closest_enemy(
                                ctx,
                                goal.owner,
                                ctx.objects.current_weapon_range(goal.owner).unwrap_or(0.0),
                                TargetQualifiers::default(),
                                None::<PriorityWeighting>,
                                None,
                            ) {
                                goal.victim = next;
                                goal.locked_weapon = None;
                            }
                        }
                        StateReturn::Success
                    }
                }
            }
            AttackState::ChaseTarget(runtime) | AttackState::ApproachTarget(runtime) => {
                let dest = ctx.objects.position(goal.victim).unwrap_or(goal.original_victim_pos);
                runtime.update(ctx, goal.owner, dest)
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut SimContext, goal: &mut AttackGoal, _exit_type: ExitType) {
        if let Some(runtime) = self.pursuit_runtime() {
            runtime.on_exit(ctx, goal.owner);
        }
        // The targeters-set removal (§5) runs once, when the whole attack
        // sub-machine is torn down — the hosting state does that (see
        // `top_level::exit_attack`), not this per-internal-state exit hook.
    }
}

/// Every row shares the same three leading conditions (checked in this
/// order, first match wins): a dead/no-longer-hostile victim exits the whole
/// machine with `Success`; a victim the owner simply cannot engage right now
/// exits with `Failure`; an exit-condition boundary (guard radius/timer)
/// exits with `Success`. `AimAtTarget`/`FireWeapon` additionally route a
/// crush-capable computer-controlled owner, or an out-of-range victim, to the
/// chosen pursuit state — `ChaseTarget`/`ApproachTarget` already handle
/// getting back into range via their own `update` returning `Success`, so
/// they don't re-check either condition.
fn with_shared_conditions(row: TransitionRow<AttackGoal>) -> TransitionRow<AttackGoal> {
    row.with_condition(victim_is_gone, StateId::EXIT_WITH_SUCCESS)
        .with_condition(cannot_engage, StateId::EXIT_WITH_FAILURE)
        .with_condition(exit_condition_reached, StateId::EXIT_WITH_SUCCESS)
}

pub fn new_attack_machine(owner: ObjectId, goal: AttackGoal) -> StateMachine<AttackState, AttackGoal> {
    let states = vec![
        AttackState::AimAtTarget,
        AttackState::FireWeapon,
        AttackState::ChaseTarget(MoveToRuntime::default()),
        AttackState::ApproachTarget(MoveToRuntime::default()),
    ];

    let aim_row = with_shared_conditions(TransitionRow::new(ids::FIRE_WEAPON, StateId::EXIT_WITH_FAILURE))
        .with_condition(wants_crush_pursuit, ids::CHASE_TARGET)
        .with_condition(out_of_range_wants_chase, ids::CHASE_TARGET)
        .with_condition(out_of_range_wants_approach, ids::APPROACH_TARGET);

    let fire_row = with_shared_conditions(TransitionRow::new(ids::AIM_AT_TARGET, ids::AIM_AT_TARGET))
        .with_condition(wants_crush_pursuit, ids::CHASE_TARGET)
        .with_condition(out_of_range_wants_chase, ids::CHASE_TARGET)
        .with_condition(out_of_range_wants_approach, ids::APPROACH_TARGET);

    let chase_row = with_shared_conditions(TransitionRow::new(ids::AIM_AT_TARGET, StateId::EXIT_WITH_FAILURE));
    let approach_row = with_shared_conditions(TransitionRow::new(ids::AIM_AT_TARGET, StateId::EXIT_WITH_FAILURE));

    let rows = vec![aim_row, fire_row, chase_row, approach_row];
    StateMachine::new("attack", owner, states, rows, goal)
}

/// Forces an in-flight attack sub-machine to release its resources as if it
/// had exited normally — used when the hosting state (top-level `Attack`,
/// `AttackMove`'s nested engagement, guard's `AttackAggressor`) is itself
/// torn down rather than letting the sub-machine reach a natural exit.
pub fn force_exit(machine: &mut StateMachine<AttackState, AttackGoal>, ctx: &mut SimContext) {
    machine.force_exit_current(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use std::cell::RefCell;

    fn shooter(position: Vec3) -> FakeUnit {
        FakeUnit {
            position,
            able_to_attack: true,
            weapon: Some((10.0, false, 0.0, None)),
            weapon_ready: true,
            weapon_range: Some(20.0),
            speed: 5.0,
            team: 1,
            ..Default::default()
        }
    }

    fn victim(position: Vec3) -> FakeUnit {
        FakeUnit {
            position,
            able_to_attack: true,
            team: 2,
            speed: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn in_range_target_fires_on_first_tick() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), shooter(Vec3::ZERO))
                .with_unit(ObjectId(2), victim(Vec3::new(5.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let goal = AttackGoal::new(ObjectId(1), ObjectId(2), None);
        let mut machine = new_attack_machine(ObjectId(1), goal);
        machine.start(&mut ctx);
        assert_eq!(world.borrow().shots_fired.get(&ObjectId(2)).copied().unwrap_or(0), 0);
        // Tick 1: AimAtTarget's chassis aim error defaults to 0, so it
        // succeeds and hands off to FireWeapon's on_enter this same tick.
        machine.update_state_machine(&mut ctx);
        assert_eq!(machine.current_state_id(), ids::FIRE_WEAPON);
        // Tick 2: FireWeapon's own update fires (weapon already ready) and
        // loops back to AimAtTarget to re-engage.
        machine.update_state_machine(&mut ctx);
        assert_eq!(machine.current_state_id(), ids::AIM_AT_TARGET);
        assert_eq!(world.borrow().shots_fired.get(&ObjectId(2)).copied().unwrap_or(0), 1);
    }

    #[test]
    fn dead_victim_exits_with_success() {
        let mut dead_victim = victim(Vec3::new(5.0, 0.0, 0.0));
        dead_victim.dead = true;
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), shooter(Vec3::ZERO))
                .with_unit(ObjectId(2), dead_victim),
        );
        let mut ctx = fresh_context(&world);
        let goal = AttackGoal::new(ObjectId(1), ObjectId(2), None);
        let mut machine = new_attack_machine(ObjectId(1), goal);
        machine.start(&mut ctx);
        // Conditions aren't re-checked on the tick a state is freshly
        // entered (§4.1); the dead-victim condition fires on the next tick.
        let ret = machine.update_state_machine(&mut ctx);
        assert_eq!(ret, StateReturn::Success);
    }

    #[test]
    fn out_of_range_target_routes_to_approach() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), shooter(Vec3::ZERO))
                .with_unit(ObjectId(2), victim(Vec3::new(500.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let goal = AttackGoal::new(ObjectId(1), ObjectId(2), None);
        let mut machine = new_attack_machine(ObjectId(1), goal);
        machine.start(&mut ctx);
        machine.update_state_machine(&mut ctx);
        assert_eq!(machine.current_state_id(), ids::APPROACH_TARGET);
    }

    #[test]
    fn computer_controlled_crusher_chases_an_in_range_victim_instead_of_firing() {
        let mut crusher = shooter(Vec3::ZERO);
        crusher.computer_controlled = true;
        let mut crushable_victim = victim(Vec3::new(5.0, 0.0, 0.0));
        crushable_victim.crushable = true;
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), crusher)
                .with_unit(ObjectId(2), crushable_victim),
        );
        let mut ctx = fresh_context(&world);
        let goal = AttackGoal::new(ObjectId(1), ObjectId(2), None);
        let mut machine = new_attack_machine(ObjectId(1), goal);
        machine.start(&mut ctx);
        machine.update_state_machine(&mut ctx);
        assert_eq!(machine.current_state_id(), ids::CHASE_TARGET);
        assert_eq!(world.borrow().shots_fired.get(&ObjectId(2)).copied().unwrap_or(0), 0);
    }
}
