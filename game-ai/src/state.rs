//! The `State` contract every behavior implements, and the value it reports
//! back to its owning [`StateMachine`](crate::machine::StateMachine).

use crate::collaborators::SimContext;
use crate::ids::StateId;

/// What a state's `update` (or `on_enter`) reported this tick.
///
/// `Sleep` is advisory: the driver may still wake the state earlier if an
/// external event (a new command, a `set_state`) touches the machine. A
/// sub-machine's `Sleep` is collapsed to `Continue` at its parent state's
/// boundary (see [`crate::machine::collapse_sleep`]) — an outer machine never
/// itself sleeps while a child might still need ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateReturn {
    Continue,
    Sleep(u32),
    Success,
    Failure,
}

impl StateReturn {
    pub fn is_continue_like(self) -> bool {
        matches!(self, StateReturn::Continue | StateReturn::Sleep(_))
    }
}

/// Why a state is being exited, passed to `on_exit` so it can tell a normal
/// hand-off from a command that replaced it outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitType {
    /// The state ran to `Success`/`Failure` and the machine is transitioning
    /// per its own table.
    Normal,
    /// An external `set_state` (or a temporary-state re-entry) is replacing
    /// the current state before it finished on its own.
    Reset,
}

/// One behavior, generic over the goal record `G` its owning machine reads
/// and writes. Concrete states are enum variants (see `states/*.rs`); the
/// enum itself implements this trait and dispatches to the variant's body by
/// `match`, not by vtable — cross-state field access is not possible because
/// each variant only ever sees its own data plus the shared goal.
pub trait StateBody<G> {
    /// Stable id of this state within its machine's transition table.
    fn state_id(&self) -> StateId;

    /// Called exactly once per entry. The returned value participates in the
    /// same tick's transition decision (see §4.1 step 6: instantaneous
    /// chains).
    fn on_enter(&mut self, ctx: &mut SimContext, goal: &mut G) -> StateReturn;

    /// Called once per tick while this state is current, after the tick's
    /// conditions were evaluated against the state that was current at tick
    /// start — a transition taken this tick does not get a second condition
    /// pass against the new state until the next tick.
    fn update(&mut self, ctx: &mut SimContext, goal: &mut G) -> StateReturn;

    /// Called exactly once per exit, `Normal` or `Reset`. Must release any
    /// external reservation (pathfinder goal, parking space, runway,
    /// contain-module flag) acquired in `on_enter`/`update`. Must not invoke
    /// further game logic beyond that release.
    fn on_exit(&mut self, ctx: &mut SimContext, goal: &mut G, exit_type: ExitType);
}

/// A pure predicate attached to a state's transition row. Conditions never
/// mutate the world; `user_data` (when needed) is carried in the condition's
/// target-selection closure captured at registration, not as an opaque
/// pointer. Expressed as a plain `fn` pointer rather than a boxed trait
/// object — conditions are stateless, so there's nothing a vtable would buy.
pub type ConditionFn<G> = fn(&SimContext, &G) -> bool;
