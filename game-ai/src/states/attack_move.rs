//! `AttackMove` (§4.2): internal-move-to composed with a nested
//! attack-then-idle engagement. Between target acquisitions the outer moves
//! toward the destination; on spotting a target, the nested attack
//! sub-machine (reused from `states::attack`, fighting to the death rather
//! than bounded by a guard-style exit condition) takes over and movement
//! pauses. A nested engagement that cannot be finished — `cannot_engage`,
//! stealth, disabled — is retried up to `ATTACK_RETRY_COUNT` times before
//! the whole state reports failure; between retries the unit holds position
//! (it may still fire on anything that wanders into range, it just doesn't
//! translate) for `ATTACK_RETRY_HOLD_SECONDS`.

use crate::collaborators::SimContext;
use crate::ids::ObjectId;
use crate::machine::{collapse_sleep, StateMachine};
use crate::state::StateReturn;
use crate::states::attack::{AttackGoal, AttackState};
use crate::states::movement::MoveToRuntime;
use crate::states::top_level::TopLevelGoal;
use crate::targeting::{find_closest_enemy, PriorityWeighting, TargetQualifiers};
use crate::tunables::{ATTACK_RETRY_COUNT, ATTACK_RETRY_HOLD_SECONDS, FRAMES_PER_SECOND};
use tracing::debug;

#[derive(Debug, Default)]
pub struct AttackMoveState {
    runtime: MoveToRuntime,
    sub: Option<Box<StateMachine<AttackState, AttackGoal>>>,
    retries: u32,
    hold_until: Option<u32>,
}

impl AttackMoveState {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.retries = 0;
        self.hold_until = None;
        self.sub = None;
        let Some(dest) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, dest, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        if self.sub.is_some() {
            return self.step_engagement(ctx, owner);
        }

        let range = ctx.objects.current_weapon_range(owner).unwrap_or(0.0);
        if let Some(target) =
            find_closest_enemy(ctx, owner, range, TargetQualifiers::default(), None::<PriorityWeighting>, None)
        {
            self.start_engagement(ctx, owner, target);
            return StateReturn::Continue;
        }

        if let Some(until) = self.hold_until {
            if ctx.tick < until {
                return StateReturn::Continue;
            }
            self.hold_until = None;
        }

        let Some(dest) = goal.destination else {
            return StateReturn::Failure;
        };
        self.runtime.update(ctx, owner, dest)
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        if let Some(mut machine) = self.sub.take() {
            let victim = machine.goal.victim;
            crate::states::attack::force_exit(&mut machine, ctx);
            crate::reservations::remove_targeter(ctx, victim, owner);
        }
        self.runtime.on_exit(ctx, owner);
    }

    fn start_engagement(&mut self, ctx: &mut SimContext, owner: ObjectId, target: ObjectId) {
        let mut machine = Box::new(crate::states::attack::new_attack_machine(
            owner,
            AttackGoal::new(owner, target, None),
        ));
        collapse_sleep(machine.start(ctx));
        self.sub = Some(machine);
    }

    fn step_engagement(&mut self, ctx: &mut SimContext, owner: ObjectId) -> StateReturn {
        let Some(machine) = &mut self.sub else {
            return StateReturn::Continue;
        };
        match collapse_sleep(machine.update_state_machine(ctx)) {
            StateReturn::Continue => StateReturn::Continue,
            StateReturn::Success => {
                self.finish_engagement(ctx, owner);
                self.retries = 0;
                StateReturn::Continue
            }
            StateReturn::Failure => {
                self.finish_engagement(ctx, owner);
                self.retries += 1;
                if self.retries > ATTACK_RETRY_COUNT {
                    debug!(owner = owner.0, retries = self.retries, "attack-move giving up after repeated failures");
                    return StateReturn::Failure;
                }
                self.hold_until = Some(ctx.tick + (ATTACK_RETRY_HOLD_SECONDS * FRAMES_PER_SECOND as f32) as u32);
                StateReturn::Continue
            }
            StateReturn::Sleep(_) => unreachable!("collapse_sleep never returns Sleep"),
        }
    }

    fn finish_engagement(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        if let Some(mut machine) = self.sub.take() {
            let victim = machine.goal.victim;
            crate::states::attack::force_exit(&mut machine, ctx);
            crate::reservations::remove_targeter(ctx, victim, owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::top_level::TopLevelGoal;
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use glam::Vec3;
    use std::cell::RefCell;

    fn mover(position: Vec3) -> FakeUnit {
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
    fn spots_enemy_in_range_and_starts_engagement_instead_of_moving() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), mover(Vec3::ZERO))
                .with_unit(ObjectId(2), enemy(Vec3::new(5.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.destination = Some(Vec3::new(100.0, 0.0, 0.0));
        let mut state = AttackMoveState::default();
        state.on_enter(&mut ctx, ObjectId(1), &mut goal);
        state.update(&mut ctx, ObjectId(1), &mut goal);
        assert!(state.sub.is_some());
    }

    #[test]
    fn no_enemy_in_range_moves_toward_destination() {
        let world = RefCell::new(FakeWorld::new().with_unit(ObjectId(1), mover(Vec3::ZERO)));
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.destination = Some(Vec3::new(100.0, 0.0, 0.0));
        let mut state = AttackMoveState::default();
        state.on_enter(&mut ctx, ObjectId(1), &mut goal);
        let ret = state.update(&mut ctx, ObjectId(1), &mut goal);
        assert!(state.sub.is_none());
        assert_eq!(ret, StateReturn::Continue);
    }

    #[test]
    fn repeated_engagement_failure_gives_up_after_retry_count() {
        let mut disabled_shooter = mover(Vec3::ZERO);
        disabled_shooter.disabled = true;
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), disabled_shooter)
                .with_unit(ObjectId(2), enemy(Vec3::new(5.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.destination = Some(Vec3::new(100.0, 0.0, 0.0));
        let mut state = AttackMoveState::default();
        state.on_enter(&mut ctx, ObjectId(1), &mut goal);
        let mut last = StateReturn::Continue;
        for _ in 0..(ATTACK_RETRY_COUNT + 2) {
            last = state.update(&mut ctx, ObjectId(1), &mut goal);
            if last == StateReturn::Failure {
                break;
            }
            // Clear the hold so the next loop iteration re-engages immediately.
            state.hold_until = None;
        }
        assert_eq!(last, StateReturn::Failure);
    }
}
