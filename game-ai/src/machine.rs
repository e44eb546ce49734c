//! The state-machine driver (§4.1): owns a registry of states and their
//! transition rows, tracks the current state, and runs the tick loop that
//! evaluates conditions, calls `update`, and walks `success_next`/
//! `failure_next` (including instantaneous chains) down to a sentinel exit
//! or a `Continue`/`Sleep` that propagates upward.

use crate::collaborators::SimContext;
use crate::ids::{ObjectId, StateId};
use crate::state::{ConditionFn, ExitType, StateBody, StateReturn};
use tracing::{debug, trace, warn};

/// A state's row in the transition table: where `Success`/`Failure` lead,
/// and the ordered list of conditions checked before `update` runs.
pub struct TransitionRow<G> {
    pub success_next: StateId,
    pub failure_next: StateId,
    pub conditions: Vec<(ConditionFn<G>, StateId)>,
}

impl<G> TransitionRow<G> {
    pub fn new(success_next: StateId, failure_next: StateId) -> Self {
        Self {
            success_next,
            failure_next,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, predicate: ConditionFn<G>, target: StateId) -> Self {
        self.conditions.push((predicate, target));
        self
    }
}

/// One state machine instance, generic over its state enum `S` and goal
/// record `G`. Concrete machines (the top-level per-unit machine, the attack
/// sub-machine, the guard sub-machine, ...) instantiate this with their own
/// `S`/`G` pair.
pub struct StateMachine<S, G> {
    pub name: &'static str,
    pub owner: ObjectId,
    states: Vec<S>,
    rows: Vec<TransitionRow<G>>,
    current: usize,
    locked: bool,
    started: bool,
    pub goal: G,
}

impl<S, G> StateMachine<S, G>
where
    S: StateBody<G>,
{
    /// `states[0]`/`rows[0]` is the default (first-registered) start state.
    pub fn new(name: &'static str, owner: ObjectId, states: Vec<S>, rows: Vec<TransitionRow<G>>, goal: G) -> Self {
        assert_eq!(states.len(), rows.len(), "state/row count mismatch in machine {name}");
        Self {
            name,
            owner,
            states,
            rows,
            current: 0,
            locked: false,
            started: false,
            goal,
        }
    }

    pub fn current_state_id(&self) -> StateId {
        self.states[self.current].state_id()
    }

    /// The registered state instance currently hosting the machine's
    /// behavior — used by save/load (§6) to reach into a hosting state's own
    /// sub-machine (e.g. `TopLevelState::Attack`'s nested `AttackGoal`).
    pub fn current_state(&self) -> &S {
        &self.states[self.current]
    }

    pub fn current_state_mut(&mut self) -> &mut S {
        &mut self.states[self.current]
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Mutable access to every registered state instance, keyed by its own
    /// `state_id()` — used by callers that need to re-shape a state's flags
    /// per command variant without going through a transition (e.g. the
    /// top-level machine's `configure_for_command`, §6).
    pub fn states_mut(&mut self) -> &mut [S] {
        &mut self.states
    }

    fn find_index(&self, id: StateId) -> Option<usize> {
        self.states.iter().position(|s| s.state_id() == id)
    }

    /// Forces the current state to exit as a `Reset`, without entering a
    /// replacement. Used when a host is torn down outright rather than
    /// reaching a natural transition (e.g. `attack::force_exit`, used by
    /// every hosting state's `on_exit` to release the sub-machine's
    /// reservations before dropping it). Unlike `set_state`, this never goes
    /// through `find_index`, so it works even though the sentinel exit ids
    /// are never registered states.
    pub fn force_exit_current(&mut self, ctx: &mut SimContext) {
        self.exit_current(ctx, ExitType::Reset);
    }

    /// Enters `states[0]` fresh. Call once, before the first
    /// `update_state_machine` tick.
    pub fn start(&mut self, ctx: &mut SimContext) -> StateReturn {
        debug!(machine = self.name, "starting state machine");
        self.started = true;
        let ret = {
            let (state, goal) = (&mut self.states[0], &mut self.goal);
            state.on_enter(ctx, goal)
        };
        self.settle_enter_result(0, ret, ctx)
    }

    /// Runs one tick: sentinel-deadline handling is the caller's
    /// responsibility (only the top-level machine has one, §4.7); this is
    /// the shared condition/update/transition loop every machine uses.
    ///
    /// `locked` is held for the duration of this call (the "critical
    /// section" §4.1 describes) so that `set_state` calls arriving while a
    /// condition chain or sub-machine step is in flight are deferred rather
    /// than mutating the machine out from under itself; it is always clear
    /// again once this function returns, satisfying the §8 invariant.
    pub fn update_state_machine(&mut self, ctx: &mut SimContext) -> StateReturn {
        debug_assert!(self.started, "update_state_machine called before start()");
        self.locked = true;
        let result = self.update_state_machine_critical_section(ctx);
        self.locked = false;
        result
    }

    fn update_state_machine_critical_section(&mut self, ctx: &mut SimContext) -> StateReturn {
        let idx = self.current;

        if let Some(target) = self.first_matching_condition(idx, ctx) {
            trace!(machine = self.name, state = idx, ?target, "condition fired");
            return self.transition(target, ctx);
        }

        let ret = {
            let (state, goal) = (&mut self.states[idx], &mut self.goal);
            state.update(ctx, goal)
        };

        match ret {
            StateReturn::Continue => StateReturn::Continue,
            StateReturn::Sleep(n) => StateReturn::Sleep(n),
            StateReturn::Success => self.transition(self.rows[idx].success_next, ctx),
            StateReturn::Failure => self.transition(self.rows[idx].failure_next, ctx),
        }
    }

    /// External `set_state`: ignored while locked (§4.1). Exits the old
    /// state with `Reset`, enters the new one, and returns its `on_enter`
    /// result directly — it is *not* chained through `success_next`/
    /// `failure_next` the way a tick transition is; that happens on the
    /// following tick's `update_state_machine` call.
    pub fn set_state(&mut self, id: StateId, ctx: &mut SimContext) -> Option<StateReturn> {
        if self.locked {
            trace!(machine = self.name, "set_state ignored: machine locked");
            return None;
        }
        let new_idx = self.find_index(id)?;
        self.exit_current(ctx, ExitType::Reset);
        self.current = new_idx;
        self.started = true;
        let ret = {
            let (state, goal) = (&mut self.states[new_idx], &mut self.goal);
            state.on_enter(ctx, goal)
        };
        Some(ret)
    }

    fn first_matching_condition(&self, idx: usize, ctx: &SimContext) -> Option<StateId> {
        self.rows[idx]
            .conditions
            .iter()
            .find(|(predicate, _)| predicate(ctx, &self.goal))
            .map(|(_, target)| *target)
    }

    fn exit_current(&mut self, ctx: &mut SimContext, exit_type: ExitType) {
        let idx = self.current;
        let (state, goal) = (&mut self.states[idx], &mut self.goal);
        state.on_exit(ctx, goal, exit_type);
    }

    /// Shared tail of `transition`/`start`: process an `on_enter` result the
    /// same way a tick's `update` result is processed, without re-checking
    /// conditions on the freshly-entered state until the following tick.
    fn settle_enter_result(&mut self, idx: usize, ret: StateReturn, ctx: &mut SimContext) -> StateReturn {
        match ret {
            StateReturn::Continue => StateReturn::Continue,
            StateReturn::Sleep(n) => StateReturn::Sleep(n),
            StateReturn::Success => self.transition(self.rows[idx].success_next, ctx),
            StateReturn::Failure => self.transition(self.rows[idx].failure_next, ctx),
        }
    }

    fn transition(&mut self, target: StateId, ctx: &mut SimContext) -> StateReturn {
        if target == StateId::EXIT_WITH_SUCCESS {
            self.exit_current(ctx, ExitType::Normal);
            debug!(machine = self.name, "machine exits with success");
            return StateReturn::Success;
        }
        if target == StateId::EXIT_WITH_FAILURE {
            self.exit_current(ctx, ExitType::Normal);
            debug!(machine = self.name, "machine exits with failure");
            return StateReturn::Failure;
        }

        let Some(new_idx) = self.find_index(target) else {
            debug_assert!(
                false,
                "transition target {:?} is not a registered state in machine {}",
                target, self.name
            );
            warn!(machine = self.name, ?target, "dangling transition target, failing machine");
            return StateReturn::Failure;
        };

        self.exit_current(ctx, ExitType::Normal);
        self.current = new_idx;
        let ret = {
            let (state, goal) = (&mut self.states[new_idx], &mut self.goal);
            state.on_enter(ctx, goal)
        };
        trace!(machine = self.name, state = new_idx, "entered state");
        self.settle_enter_result(new_idx, ret, ctx)
    }
}

/// A sub-machine's `Sleep` collapses to `Continue` at its parent state's
/// boundary: the outer state must still be given a chance to tick every
/// frame even while its child reports it could sleep (§5, "outer machines
/// never themselves sleep while a child might need ticking").
pub fn collapse_sleep(inner: StateReturn) -> StateReturn {
    match inner {
        StateReturn::Sleep(_) => StateReturn::Continue,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_context, FakeWorld};
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct ToyGoal {
        ticks_in_b: u32,
    }

    #[derive(Debug)]
    enum ToyState {
        A { entered: u32, exited: u32 },
        B { entered: u32, exited: u32 },
    }

    impl ToyState {
        fn counts(&self) -> (u32, u32) {
            match self {
                ToyState::A { entered, exited } | ToyState::B { entered, exited } => {
                    (*entered, *exited)
                }
            }
        }
    }

    impl StateBody<ToyGoal> for ToyState {
        fn state_id(&self) -> StateId {
            match self {
                ToyState::A { .. } => StateId(0),
                ToyState::B { .. } => StateId(1),
            }
        }

        fn on_enter(&mut self, _ctx: &mut SimContext, _goal: &mut ToyGoal) -> StateReturn {
            match self {
                ToyState::A { entered, .. } => *entered += 1,
                ToyState::B { entered, .. } => *entered += 1,
            }
            StateReturn::Continue
        }

        fn update(&mut self, _ctx: &mut SimContext, goal: &mut ToyGoal) -> StateReturn {
            match self {
                ToyState::A { .. } => StateReturn::Success,
                ToyState::B { .. } => {
                    goal.ticks_in_b += 1;
                    StateReturn::Continue
                }
            }
        }

        fn on_exit(&mut self, _ctx: &mut SimContext, _goal: &mut ToyGoal, _exit_type: ExitType) {
            match self {
                ToyState::A { exited, .. } => *exited += 1,
                ToyState::B { exited, .. } => *exited += 1,
            }
        }
    }

    fn toy_machine() -> StateMachine<ToyState, ToyGoal> {
        let states = vec![
            ToyState::A {
                entered: 0,
                exited: 0,
            },
            ToyState::B {
                entered: 0,
                exited: 0,
            },
        ];
        let rows = vec![
            TransitionRow::new(StateId(1), StateId::EXIT_WITH_FAILURE),
            TransitionRow::new(StateId::EXIT_WITH_SUCCESS, StateId::EXIT_WITH_FAILURE),
        ];
        StateMachine::new("toy", ObjectId(1), states, rows, ToyGoal::default())
    }

    #[test]
    fn enter_exit_pairing_across_a_chained_transition() {
        let world = RefCell::new(FakeWorld::new());
        let mut ctx = fresh_context(&world);
        let mut machine = toy_machine();
        let ret = machine.start(&mut ctx);
        // A::update() returns Success on the very first tick via `start`,
        // so the machine should have chained straight through to B without
        // re-checking B's conditions this tick.
        assert_eq!(machine.current_state_id(), StateId(1));
        assert_eq!(ret, StateReturn::Continue);
        assert_eq!(machine.states[0].counts(), (1, 1));
        assert_eq!(machine.states[1].counts(), (1, 0));
    }

    #[test]
    fn locked_is_clear_after_every_tick() {
        let world = RefCell::new(FakeWorld::new());
        let mut ctx = fresh_context(&world);
        let mut machine = toy_machine();
        machine.start(&mut ctx);
        for _ in 0..5 {
            machine.update_state_machine(&mut ctx);
            assert!(!machine.is_locked());
        }
    }

    #[test]
    fn set_state_is_ignored_while_locked() {
        let world = RefCell::new(FakeWorld::new());
        let mut ctx = fresh_context(&world);
        let mut machine = toy_machine();
        machine.start(&mut ctx);
        machine.locked = true;
        let result = machine.set_state(StateId(0), &mut ctx);
        assert!(result.is_none());
    }
}
