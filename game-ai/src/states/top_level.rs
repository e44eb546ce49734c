//! The top-level, per-unit AI machine (§2, §4.1 component table "Top-level AI
//! machine"): registers every behavior state a unit can host under one
//! [`StateMachine`](crate::machine::StateMachine), owns the goal record
//! external commands populate, and layers the temporary-state override
//! (§4.7) on top of the shared driver in [`crate::machine`].

use crate::collaborators::SimContext;
use crate::command::{Command, CommandParms};
use crate::ids::{ObjectId, PolygonId, StateId, WaypointId};
use crate::machine::{StateMachine, TransitionRow};
use crate::state::{ExitType, StateBody, StateReturn};
use crate::states::attack::{AttackExitConditions, AttackGoal, AttackState};
use crate::states::attack_move::AttackMoveState;
use crate::states::guard::{GuardGoal, GuardKind, GuardMode, GuardState};
use crate::states::interaction::{Dock, Enter, Exit, PickUpCrate, Rappel};
use crate::states::movement::{
    Face, FollowPath, FollowWaypointPath, InternalMoveTo, MoveAndDelete, MoveAndEvacuate,
    MoveOutOfTheWay, Wander, WanderKind,
};
use crate::tunables::TEMPORARY_STATE_MAX_FRAMES;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The goal record every top-level state reads and writes (§3): position,
/// object, object pair, waypoint, polygon, squad, and path, plus the stable
/// `owner` id the concrete states need to issue pathfinder/partition queries
/// (machines pass `&mut G` to `StateBody`, not the owner separately, so it
/// lives here rather than threaded through every call).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopLevelGoal {
    pub owner: ObjectId,
    pub destination: Option<Vec3>,
    pub victim: Option<ObjectId>,
    pub other_object: Option<ObjectId>,
    pub waypoint: Option<WaypointId>,
    pub polygon: Option<PolygonId>,
    pub squad: Option<crate::group::Group>,
    pub path_points: Vec<Vec3>,
    pub area_radius: Option<f32>,
    pub team_name: Option<String>,
}

impl TopLevelGoal {
    pub fn new(owner: ObjectId) -> Self {
        Self {
            owner,
            ..Default::default()
        }
    }

    fn apply_command(&mut self, parms: &CommandParms) {
        self.destination = parms.position;
        self.victim = parms.object_id;
        self.other_object = parms.other_id;
        self.waypoint = parms.waypoint_id;
        self.polygon = parms.polygon_id;
        self.path_points = parms.coord_list.clone();
        self.team_name = parms.team_name.clone();
        self.area_radius = parms.int_value.map(f32::from_bits);
    }
}

/// Every behavior state the top-level machine can host, in §4.1's component
/// table. Concrete per-kind data is the variant's payload; dispatch is by
/// `match`, never by downcast (§9's "tagged enum" redesign note).
pub enum TopLevelState {
    Idle,
    MoveTo(InternalMoveTo),
    FollowPath(FollowPath),
    FollowWaypointPath(FollowWaypointPath),
    Wander(Wander),
    AttackMove(AttackMoveState),
    /// Hosts an owned sub-machine (§9: "each state that needs a sub-machine
    /// holds an `Option<Box<StateMachine>>`"); `None` between entries.
    Attack(Option<Box<StateMachine<AttackState, AttackGoal>>>),
    Guard(Option<Box<StateMachine<GuardState, GuardGoal>>>, GuardKind, GuardMode),
    Enter(Enter),
    Dock(Dock),
    Exit(Exit),
    Rappel(Rappel),
    PickUpCrate(PickUpCrate),
    MoveOutOfTheWay(MoveOutOfTheWay),
    Face(Face),
    MoveAndDelete(MoveAndDelete),
    MoveAndEvacuate(MoveAndEvacuate),
    /// `Repair`/`ResumeConstruction`/`GetHealed`/`GetRepaired`: move to the
    /// target and hold; the actual service (healing/repair ticks) is damage
    /// resolution, out of this core's scope per §1.
    ServiceTarget(InternalMoveTo),
    /// `GoProne`: an instantaneous reaction with no further bookkeeping here
    /// (posture/animation is a client/rendering concern, §1).
    GoProne,
    /// `Busy`: refuses every transition until explicitly replaced.
    Busy,
    /// `CommandButton`: the id/target pair is recorded on the goal for a
    /// caller above this core to interpret (ability activation is per-unit
    /// game data, out of scope); this state always succeeds immediately.
    CommandButton,
}

impl TopLevelState {
    fn id(&self) -> StateId {
        match self {
            TopLevelState::Idle => ids::IDLE,
            TopLevelState::MoveTo(_) => ids::MOVE_TO,
            TopLevelState::FollowPath(_) => ids::FOLLOW_PATH,
            TopLevelState::FollowWaypointPath(_) => ids::FOLLOW_WAYPOINT_PATH,
            TopLevelState::Wander(_) => ids::WANDER,
            TopLevelState::AttackMove(_) => ids::ATTACK_MOVE,
            TopLevelState::Attack(_) => ids::ATTACK,
            TopLevelState::Guard(..) => ids::GUARD,
            TopLevelState::Enter(_) => ids::ENTER,
            TopLevelState::Dock(_) => ids::DOCK,
            TopLevelState::Exit(_) => ids::EXIT,
            TopLevelState::Rappel(_) => ids::RAPPEL,
            TopLevelState::PickUpCrate(_) => ids::PICK_UP_CRATE,
            TopLevelState::MoveOutOfTheWay(_) => ids::MOVE_OUT_OF_THE_WAY,
            TopLevelState::Face(_) => ids::FACE,
            TopLevelState::MoveAndDelete(_) => ids::MOVE_AND_DELETE,
            TopLevelState::MoveAndEvacuate(_) => ids::MOVE_AND_EVACUATE,
            TopLevelState::ServiceTarget(_) => ids::SERVICE_TARGET,
            TopLevelState::GoProne => ids::GO_PRONE,
            TopLevelState::Busy => ids::BUSY,
            TopLevelState::CommandButton => ids::COMMAND_BUTTON,
        }
    }
}

/// Stable ids for every row the top-level machine registers. Grouped in one
/// place so `TopLevelMachine::new` and `TopLevelState::id` cannot drift apart.
pub mod ids {
    use crate::ids::StateId;

    pub const IDLE: StateId = StateId(0);
    pub const MOVE_TO: StateId = StateId(1);
    pub const FOLLOW_PATH: StateId = StateId(2);
    pub const FOLLOW_WAYPOINT_PATH: StateId = StateId(3);
    pub const WANDER: StateId = StateId(4);
    pub const ATTACK_MOVE: StateId = StateId(5);
    pub const ATTACK: StateId = StateId(6);
    pub const GUARD: StateId = StateId(7);
    pub const ENTER: StateId = StateId(8);
    pub const DOCK: StateId = StateId(9);
    pub const EXIT: StateId = StateId(10);
    pub const RAPPEL: StateId = StateId(11);
    pub const PICK_UP_CRATE: StateId = StateId(12);
    pub const MOVE_OUT_OF_THE_WAY: StateId = StateId(13);
    pub const FACE: StateId = StateId(14);
    pub const MOVE_AND_DELETE: StateId = StateId(15);
    pub const MOVE_AND_EVACUATE: StateId = StateId(16);
    pub const SERVICE_TARGET: StateId = StateId(17);
    pub const GO_PRONE: StateId = StateId(18);
    pub const BUSY: StateId = StateId(19);
    pub const COMMAND_BUTTON: StateId = StateId(20);
}

impl StateBody<TopLevelGoal> for TopLevelState {
    fn state_id(&self) -> StateId {
        self.id()
    }

    fn on_enter(&mut self, ctx: &mut SimContext, goal: &mut TopLevelGoal) -> StateReturn {
        let owner = goal.owner;
        match self {
            TopLevelState::Idle => StateReturn::Sleep(crate::tunables::FRAMES_PER_SECOND),
            TopLevelState::MoveTo(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::FollowPath(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::FollowWaypointPath(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::Wander(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::AttackMove(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::Attack(sub) => enter_attack(ctx, owner, goal, sub),
            TopLevelState::Guard(sub, kind, mode) => enter_guard(ctx, owner, goal, sub, *kind, *mode),
            TopLevelState::Enter(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::Dock(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::Exit(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::Rappel(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::PickUpCrate(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::MoveOutOfTheWay(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::Face(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::MoveAndDelete(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::MoveAndEvacuate(s) => s.on_enter(ctx, owner, goal),
            TopLevelState::ServiceTarget(s) => {
                goal.destination = goal
                    .victim
                    .and_then(|v| ctx.objects.position(v))
                    .or(goal.destination);
                s.on_enter(ctx, owner, goal)
            }
            TopLevelState::GoProne => StateReturn::Success,
            TopLevelState::Busy => StateReturn::Continue,
            TopLevelState::CommandButton => StateReturn::Success,
        }
    }

    fn update(&mut self, ctx: &mut SimContext, goal: &mut TopLevelGoal) -> StateReturn {
        let owner = goal.owner;
        match self {
            TopLevelState::Idle => StateReturn::Sleep(crate::tunables::FRAMES_PER_SECOND),
            TopLevelState::MoveTo(s) => s.update(ctx, owner, goal),
            TopLevelState::FollowPath(s) => s.update(ctx, owner, goal),
            TopLevelState::FollowWaypointPath(s) => s.update(ctx, owner, goal),
            TopLevelState::Wander(s) => s.update(ctx, owner, goal),
            TopLevelState::AttackMove(s) => s.update(ctx, owner, goal),
            TopLevelState::Attack(sub) => update_attack(ctx, sub),
            TopLevelState::Guard(sub, ..) => update_guard(ctx, sub),
            TopLevelState::Enter(s) => s.update(ctx, owner, goal),
            TopLevelState::Dock(s) => s.update(ctx, owner, goal),
            TopLevelState::Exit(s) => s.update(ctx, owner, goal),
            TopLevelState::Rappel(s) => s.update(ctx, owner, goal),
            TopLevelState::PickUpCrate(s) => s.update(ctx, owner, goal),
            TopLevelState::MoveOutOfTheWay(s) => s.update(ctx, owner, goal),
            TopLevelState::Face(s) => s.update(ctx, owner, goal),
            TopLevelState::MoveAndDelete(s) => s.update(ctx, owner, goal),
            TopLevelState::MoveAndEvacuate(s) => s.update(ctx, owner, goal),
            TopLevelState::ServiceTarget(s) => s.update(ctx, owner, goal),
            TopLevelState::GoProne => StateReturn::Success,
            TopLevelState::Busy => StateReturn::Continue,
            TopLevelState::CommandButton => StateReturn::Success,
        }
    }

    fn on_exit(&mut self, ctx: &mut SimContext, goal: &mut TopLevelGoal, exit_type: ExitType) {
        let owner = goal.owner;
        match self {
            TopLevelState::Idle | TopLevelState::GoProne | TopLevelState::Busy | TopLevelState::CommandButton => {}
            TopLevelState::MoveTo(s) => s.on_exit(ctx, owner),
            TopLevelState::FollowPath(s) => s.on_exit(ctx, owner),
            TopLevelState::FollowWaypointPath(s) => s.on_exit(ctx, owner),
            TopLevelState::Wander(s) => s.on_exit(ctx, owner),
            TopLevelState::AttackMove(s) => s.on_exit(ctx, owner),
            TopLevelState::Attack(sub) => exit_attack(ctx, goal, sub),
            TopLevelState::Guard(sub, ..) => exit_guard(ctx, sub),
            TopLevelState::Enter(s) => s.on_exit(ctx, owner),
            TopLevelState::Dock(s) => s.on_exit(ctx, owner),
            TopLevelState::Exit(s) => s.on_exit(ctx, owner),
            TopLevelState::Rappel(s) => s.on_exit(ctx, owner),
            TopLevelState::PickUpCrate(s) => s.on_exit(ctx, owner),
            TopLevelState::MoveOutOfTheWay(s) => s.on_exit(ctx, owner),
            TopLevelState::Face(s) => s.on_exit(ctx, owner, exit_type),
            TopLevelState::MoveAndDelete(s) => s.on_exit(ctx, owner),
            TopLevelState::MoveAndEvacuate(s) => s.on_exit(ctx, owner),
            TopLevelState::ServiceTarget(s) => s.on_exit(ctx, owner),
        }
    }
}

fn enter_attack(
    ctx: &mut SimContext,
    owner: ObjectId,
    goal: &mut TopLevelGoal,
    sub: &mut Option<Box<StateMachine<AttackState, AttackGoal>>>,
) -> StateReturn {
    let Some(victim) = goal.victim else {
        return StateReturn::Failure;
    };
    let exit_conditions = goal
        .area_radius
        .map(|radius| AttackExitConditions::within_area(ctx.objects.position(owner).unwrap_or_default(), radius));
    let mut machine = Box::new(crate::states::attack::new_attack_machine(
        owner,
        AttackGoal::new(owner, victim, exit_conditions),
    ));
    let ret = crate::machine::collapse_sleep(machine.start(ctx));
    *sub = Some(machine);
    ret
}

fn update_attack(ctx: &mut SimContext, sub: &mut Option<Box<StateMachine<AttackState, AttackGoal>>>) -> StateReturn {
    match sub {
        Some(machine) => crate::machine::collapse_sleep(machine.update_state_machine(ctx)),
        None => StateReturn::Failure,
    }
}

fn exit_attack(ctx: &mut SimContext, goal: &mut TopLevelGoal, sub: &mut Option<Box<StateMachine<AttackState, AttackGoal>>>) {
    if let Some(mut machine) = sub.take() {
        let victim = machine.goal.victim;
        crate::states::attack::force_exit(&mut machine, ctx);
        if let Some(v) = victim {
            crate::reservations::remove_targeter(ctx, v, goal.owner);
        }
    }
}

fn enter_guard(
    ctx: &mut SimContext,
    owner: ObjectId,
    goal: &mut TopLevelGoal,
    sub: &mut Option<Box<StateMachine<GuardState, GuardGoal>>>,
    kind: GuardKind,
    mode: GuardMode,
) -> StateReturn {
    let guarded_point = match kind {
        GuardKind::Position | GuardKind::Area(_) => goal.destination,
        GuardKind::Object => goal.victim.and_then(|id| ctx.objects.position(id)),
        GuardKind::TunnelNetwork => Some(Vec3::ZERO),
        // Retaliate skips Return/Idle/Inner/Outer entirely (§4.4 supplement)
        // and enters directly into AttackAggressor, so the guard point is
        // never actually consulted; the owner's own position is as good a
        // placeholder as any.
        GuardKind::Retaliate(_) => ctx.objects.position(owner),
    };
    let Some(point) = guarded_point else {
        return StateReturn::Failure;
    };
    let radius = match kind {
        GuardKind::Area(r) => r,
        _ => 40.0,
    };
    let guard_goal = GuardGoal::new(owner, point, goal.victim, radius, mode, kind);
    let mut machine = Box::new(crate::states::guard::new_guard_machine(owner, guard_goal));
    let ret = crate::machine::collapse_sleep(machine.start(ctx));
    *sub = Some(machine);
    ret
}

fn update_guard(ctx: &mut SimContext, sub: &mut Option<Box<StateMachine<GuardState, GuardGoal>>>) -> StateReturn {
    match sub {
        Some(machine) => crate::machine::collapse_sleep(machine.update_state_machine(ctx)),
        None => StateReturn::Failure,
    }
}

fn exit_guard(ctx: &mut SimContext, sub: &mut Option<Box<StateMachine<GuardState, GuardGoal>>>) {
    if let Some(mut machine) = sub.take() {
        crate::states::guard::force_exit(&mut machine, ctx);
    }
}

/// One tick's worth of temporary-state bookkeeping (§4.7): a state entered
/// via [`TopLevelMachine::set_temporary_state`] is exited with `Reset` if
/// still active when a new temporary state arrives, and is force-finished
/// with `Success` once its frame deadline passes while still `Continue`.
struct TemporaryOverride {
    state_id: StateId,
    deadline_tick: u32,
}

/// Owns the registered [`StateMachine`] plus the temporary-state layer that
/// only the top-level machine has (§4.7); every other machine in this crate
/// (attack, guard) is a plain [`StateMachine`] with no override concept.
pub struct TopLevelMachine {
    machine: StateMachine<TopLevelState, TopLevelGoal>,
    temporary: Option<TemporaryOverride>,
}

impl TopLevelMachine {
    pub fn new(owner: ObjectId) -> Self {
        let states = vec![
            TopLevelState::Idle,
            TopLevelState::MoveTo(InternalMoveTo {
                adjusts_destination: true,
                ..Default::default()
            }),
            TopLevelState::FollowPath(FollowPath::default()),
            TopLevelState::FollowWaypointPath(FollowWaypointPath::default()),
            TopLevelState::Wander(Wander::new(WanderKind::Free)),
            TopLevelState::AttackMove(AttackMoveState::default()),
            TopLevelState::Attack(None),
            TopLevelState::Guard(None, GuardKind::Position, GuardMode::Normal),
            TopLevelState::Enter(Enter::default()),
            TopLevelState::Dock(Dock::default()),
            TopLevelState::Exit(Exit::default()),
            TopLevelState::Rappel(Rappel::default()),
            TopLevelState::PickUpCrate(PickUpCrate::default()),
            TopLevelState::MoveOutOfTheWay(MoveOutOfTheWay::default()),
            TopLevelState::Face(Face::default()),
            TopLevelState::MoveAndDelete(MoveAndDelete::default()),
            TopLevelState::MoveAndEvacuate(MoveAndEvacuate::default()),
            TopLevelState::ServiceTarget(InternalMoveTo {
                adjusts_destination: true,
                ..Default::default()
            }),
            TopLevelState::GoProne,
            TopLevelState::Busy,
            TopLevelState::CommandButton,
        ];
        // Every row returns to Idle on both Success and Failure (§7:
        // "unit goes idle ... no modal error surfaces"), except Idle's own
        // row, which the driver never consults (Idle never returns
        // Success/Failure — see `TopLevelState::update`).
        let rows = states
            .iter()
            .map(|s| TransitionRow::new(ids::IDLE, ids::IDLE).with_condition(no_op_condition, s.id()))
            .collect::<Vec<_>>();
        // `with_condition` above is a placeholder to keep row construction
        // uniform; replace it with a real empty row (conditions vary per
        // state and are installed individually below).
        let rows: Vec<TransitionRow<TopLevelGoal>> = rows
            .into_iter()
            .map(|mut r| {
                r.conditions.clear();
                r
            })
            .collect();

        let goal = TopLevelGoal::new(owner);
        let machine = StateMachine::new("top-level", owner, states, rows, goal);
        Self { machine, temporary: None }
    }

    pub fn owner(&self) -> ObjectId {
        self.machine.owner
    }

    pub fn current_state_id(&self) -> StateId {
        self.machine.current_state_id()
    }

    pub fn goal(&self) -> &TopLevelGoal {
        &self.machine.goal
    }

    /// The hosted attack sub-machine's own goal, when currently in `Attack`
    /// (§6: the fields (`original_victim_pos`, `locked_weapon`) a save/load
    /// round trip must reproduce exactly).
    pub fn attack_goal(&self) -> Option<&AttackGoal> {
        match self.machine.current_state() {
            TopLevelState::Attack(Some(sub)) => Some(&sub.goal),
            _ => None,
        }
    }

    pub fn start_idle(&mut self, ctx: &mut SimContext) {
        self.machine.start(ctx);
    }

    /// External command entry point (§6): populates the goal record, then
    /// `set_state`s into the matching row.
    pub fn issue_command(&mut self, ctx: &mut SimContext, parms: CommandParms) {
        self.machine.goal.apply_command(&parms);
        let target = state_id_for_command(&parms.cmd);
        self.configure_for_command(&parms.cmd);
        self.set_state(target, ctx);
    }

    fn configure_for_command(&mut self, cmd: &Command) {
        // Re-shape the registered row's state instance for command variants
        // that share one id but need different flags (adjusts-destination,
        // exact waypoint following, wander kind, guard kind/mode).
        for state in self.machine_states_mut() {
            match (state, cmd) {
                (TopLevelState::MoveTo(s), Command::MoveToPosition(_) | Command::MoveToObject(_)) => {
                    s.adjusts_destination = true;
                }
                (TopLevelState::MoveTo(s), Command::TightenToPosition(_)) => {
                    s.adjusts_destination = false;
                }
                (TopLevelState::FollowWaypointPath(s), Command::FollowWaypointPath(_)) => {
                    s.as_team = false;
                    s.exact = false;
                }
                (TopLevelState::FollowWaypointPath(s), Command::FollowWaypointPathAsTeam(_)) => {
                    s.as_team = true;
                    s.exact = false;
                }
                (TopLevelState::FollowWaypointPath(s), Command::FollowWaypointPathExact(_)) => {
                    s.as_team = false;
                    s.exact = true;
                }
                (TopLevelState::FollowWaypointPath(s), Command::FollowWaypointPathAsTeamExact(_)) => {
                    s.as_team = true;
                    s.exact = true;
                }
                (TopLevelState::Wander(s), Command::Wander(_)) => *s = Wander::new(WanderKind::Free),
                (TopLevelState::Wander(s), Command::WanderInPlace) => *s = Wander::new(WanderKind::InPlace),
                (TopLevelState::Wander(s), Command::Panic(_)) => *s = Wander::new(WanderKind::Panic),
                (TopLevelState::MoveAndEvacuate(s), Command::MoveAndEvacuateAndExit(_)) => {
                    s.and_exit_owner_too = true;
                }
                (TopLevelState::MoveAndEvacuate(s), Command::MoveAndEvacuate(_)) => {
                    s.and_exit_owner_too = false;
                }
                (TopLevelState::Exit(s), Command::ExitInstantly(_) | Command::EvacuateInstantly) => {
                    s.instant = true;
                }
                (TopLevelState::Exit(s), Command::Exit(_) | Command::Evacuate) => {
                    s.instant = false;
                }
                (TopLevelState::Guard(_, kind, mode), Command::GuardPosition(_, m)) => {
                    *kind = GuardKind::Position;
                    *mode = *m;
                }
                (TopLevelState::Guard(_, kind, mode), Command::GuardObject(_, m)) => {
                    *kind = GuardKind::Object;
                    *mode = *m;
                }
                (TopLevelState::Guard(_, kind, mode), Command::GuardArea(_, r, m)) => {
                    *kind = GuardKind::Area(*r);
                    *mode = *m;
                }
                (TopLevelState::Guard(_, kind, mode), Command::GuardTunnelNetwork(m)) => {
                    *kind = GuardKind::TunnelNetwork;
                    *mode = *m;
                }
                (TopLevelState::Guard(_, kind, mode), Command::GuardRetaliate(aggressor)) => {
                    *kind = GuardKind::Retaliate(*aggressor);
                    *mode = GuardMode::Normal;
                }
                _ => {}
            }
        }
    }

    fn machine_states_mut(&mut self) -> &mut [TopLevelState] {
        self.machine.states_mut()
    }

    pub fn set_state(&mut self, id: StateId, ctx: &mut SimContext) {
        if let Some(temp) = &self.temporary {
            if temp.state_id != self.machine.current_state_id() {
                self.temporary = None;
            }
        }
        self.temporary = None;
        self.machine.set_state(id, ctx);
    }

    /// §4.7: enters `id` as a temporary state capped at
    /// [`TEMPORARY_STATE_MAX_FRAMES`]. If a different temporary state is
    /// already active it is exited with `Reset` first via `set_state`.
    pub fn set_temporary_state(&mut self, id: StateId, frame_limit: u32, ctx: &mut SimContext) {
        let capped = frame_limit.min(TEMPORARY_STATE_MAX_FRAMES);
        if capped < frame_limit {
            warn!(owner = self.machine.owner.0, frame_limit, "temporary-state frame limit clamped to 60s");
        }
        self.machine.set_state(id, ctx);
        self.temporary = Some(TemporaryOverride {
            state_id: id,
            deadline_tick: ctx.tick + capped,
        });
    }

    /// Runs one tick: the temporary-state deadline check (§4.1 step 1) then
    /// the shared condition/update/transition loop.
    pub fn tick(&mut self, ctx: &mut SimContext) -> StateReturn {
        if let Some(temp) = &self.temporary {
            if temp.state_id != self.machine.current_state_id() {
                self.temporary = None;
            }
        }
        let result = self.machine.update_state_machine(ctx);
        match (&self.temporary, result) {
            (Some(temp), StateReturn::Continue | StateReturn::Sleep(_)) if ctx.tick >= temp.deadline_tick => {
                debug!(owner = self.machine.owner.0, "temporary state timed out, forcing success");
                self.temporary = None;
                self.set_state(ids::IDLE, ctx);
                StateReturn::Success
            }
            _ => result,
        }
    }
}

fn no_op_condition(_ctx: &SimContext, _goal: &TopLevelGoal) -> bool {
    false
}

/// What, if anything, the current top-level state has a sub-machine worth
/// persisting beyond the top-level goal record itself (§6: "the current
/// victim and the victim-team snapshot"). Only `Attack`/`Guard` host one;
/// every other state's transient runtime (e.g. `InternalMoveTo`'s
/// `waiting_for_path` flag) is rebuilt by re-running `on_enter` on load
/// rather than captured here, per §6's `load_post_process` note.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum SubMachineSnapshot {
    None,
    Attack(AttackGoal),
    Guard(GuardGoal),
}

/// A versioned, serializable capture of one unit's top-level machine (§6,
/// §8 scenario 6): enough to reconstruct `current_state_id`, the goal
/// record, the temporary-state override, and (for `Attack`/`Guard`) the
/// hosted sub-machine's own goal — the fields the testable properties in
/// §8 check byte-for-byte. [`TopLevelMachine::restore`] rebuilds everything
/// else (pathfinder waits, turret tracking, ...) by re-entering the saved
/// state, exactly as the original engine's `load_post_process` does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopLevelSnapshot {
    owner: ObjectId,
    current_state_id: StateId,
    goal: TopLevelGoal,
    temporary: Option<(StateId, u32)>,
    sub_machine: SubMachineSnapshot,
}

impl TopLevelMachine {
    /// Captures this machine's persistent identity (§6). Called mid-tick is
    /// fine: a state's `on_enter`/`update` in progress is never captured,
    /// only the settled goal/current-state-id as of the last completed tick.
    pub fn snapshot(&self) -> TopLevelSnapshot {
        let sub_machine = match self.machine.current_state() {
            TopLevelState::Attack(Some(sub)) => SubMachineSnapshot::Attack(sub.goal.clone()),
            TopLevelState::Guard(Some(sub), ..) => SubMachineSnapshot::Guard(sub.goal.clone()),
            _ => SubMachineSnapshot::None,
        };
        TopLevelSnapshot {
            owner: self.machine.owner,
            current_state_id: self.machine.current_state_id(),
            goal: self.machine.goal.clone(),
            temporary: self.temporary.as_ref().map(|t| (t.state_id, t.deadline_tick)),
            sub_machine,
        }
    }

    /// Rebuilds a [`TopLevelMachine`] from a [`TopLevelSnapshot`] (§6). Starts
    /// the machine fresh in `Idle`, restores the goal record, then
    /// `set_state`s into the saved `current_state_id` — which re-runs that
    /// state's `on_enter` (rebuilding transient runtime, e.g. issuing a new
    /// path request or re-adding the victim's targeter) exactly as the
    /// original engine's `load_post_process` documents per state (§6). The
    /// saved sub-machine goal (when present) then overwrites the freshly
    /// re-entered one so values that `on_enter` cannot re-derive from the
    /// world alone — the locked weapon, the original victim position, a
    /// guard's current aggressor — come back exactly as saved.
    pub fn restore(snapshot: TopLevelSnapshot, ctx: &mut SimContext) -> Self {
        let mut machine = TopLevelMachine::new(snapshot.owner);
        machine.start_idle(ctx);
        machine.machine.goal = snapshot.goal;
        machine.set_state(snapshot.current_state_id, ctx);
        match (machine.machine.current_state_mut(), snapshot.sub_machine) {
            (TopLevelState::Attack(Some(sub)), SubMachineSnapshot::Attack(saved_goal)) => {
                sub.goal = saved_goal;
            }
            (TopLevelState::Guard(Some(sub), ..), SubMachineSnapshot::Guard(saved_goal)) => {
                sub.goal = saved_goal;
            }
            _ => {}
        }
        if let Some((state_id, deadline_tick)) = snapshot.temporary {
            machine.temporary = Some(TemporaryOverride { state_id, deadline_tick });
        }
        machine
    }
}

/// Maps a command variant to the row it should `set_state` into. Payload is
/// read from the goal record (already populated by
/// [`TopLevelGoal::apply_command`]), not from the command itself.
fn state_id_for_command(cmd: &Command) -> StateId {
    match cmd {
        Command::MoveToPosition(_) | Command::MoveToObject(_) | Command::TightenToPosition(_) => ids::MOVE_TO,
        Command::MoveAndEvacuate(_) | Command::MoveAndEvacuateAndExit(_) => ids::MOVE_AND_EVACUATE,
        Command::Idle | Command::Busy => ids::IDLE,
        Command::FollowWaypointPath(_)
        | Command::FollowWaypointPathAsTeam(_)
        | Command::FollowWaypointPathExact(_)
        | Command::FollowWaypointPathAsTeamExact(_) => ids::FOLLOW_WAYPOINT_PATH,
        Command::FollowPath(_) | Command::FollowExitProductionPath(_) => ids::FOLLOW_PATH,
        Command::AttackObject(_)
        | Command::ForceAttackObject(_)
        | Command::AttackTeam(_)
        | Command::AttackPosition(_)
        | Command::AttackArea(_, _)
        | Command::Hunt => ids::ATTACK,
        Command::AttackMoveToPosition(_)
        | Command::AttackFollowWaypointPath(_)
        | Command::AttackFollowWaypointPathAsTeam(_) => ids::ATTACK_MOVE,
        Command::Repair(_) | Command::ResumeConstruction(_) | Command::GetHealed(_) | Command::GetRepaired(_) => {
            ids::SERVICE_TARGET
        }
        Command::Enter(_) => ids::ENTER,
        Command::Dock(_) => ids::DOCK,
        Command::Exit(_) | Command::ExitInstantly(_) | Command::Evacuate | Command::EvacuateInstantly => ids::EXIT,
        Command::GuardPosition(..) | Command::GuardObject(..) | Command::GuardArea(..) | Command::GuardTunnelNetwork(_) => {
            ids::GUARD
        }
        Command::GuardRetaliate(_) => ids::GUARD,
        Command::FaceObject(_) | Command::FacePosition(_) => ids::FACE,
        Command::RappelInto(_) | Command::CombatDrop(..) => ids::RAPPEL,
        Command::Wander(_) => ids::WANDER,
        Command::WanderInPlace => ids::WANDER,
        Command::Panic(_) => ids::WANDER,
        Command::GoProne(_) => ids::GO_PRONE,
        Command::MoveAwayFromUnit(_) => ids::MOVE_TO,
        Command::CommandButton(..) => ids::COMMAND_BUTTON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandParms, CommandSource};
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use crate::xfer::{xfer_load, xfer_save};
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
    fn attack_object_enters_attack_and_aims_same_tick() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), shooter(Vec3::ZERO))
                .with_unit(ObjectId(2), victim(Vec3::new(5.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let mut machine = TopLevelMachine::new(ObjectId(1));
        machine.start_idle(&mut ctx);
        machine.issue_command(
            &mut ctx,
            CommandParms::new(Command::AttackObject(ObjectId(2)), CommandSource::FromPlayer),
        );
        assert_eq!(machine.current_state_id(), ids::ATTACK);
        assert_eq!(machine.goal().victim, Some(ObjectId(2)));
        assert_eq!(world.borrow().targeters.get(&ObjectId(2)).map(|s| s.len()), Some(1));
    }

    #[test]
    fn temporary_state_override_times_out_into_success() {
        let world = RefCell::new(FakeWorld::new().with_unit(ObjectId(1), shooter(Vec3::ZERO)));
        let mut ctx = fresh_context(&world);
        let mut machine = TopLevelMachine::new(ObjectId(1));
        machine.start_idle(&mut ctx);
        machine.set_temporary_state(ids::GO_PRONE, 3, &mut ctx);
        // GoProne's on_enter already returns Success, so the override never
        // actually needs the deadline here; exercise the deadline directly
        // with a state that stays Continue (Busy never transitions on its
        // own).
        machine.set_temporary_state(ids::BUSY, 3, &mut ctx);
        ctx.tick = 2;
        assert_eq!(machine.tick(&mut ctx), StateReturn::Continue);
        ctx.tick = 4;
        assert_eq!(machine.tick(&mut ctx), StateReturn::Success);
    }

    #[test]
    fn temporary_state_frame_limit_is_clamped_to_the_cap() {
        let world = RefCell::new(FakeWorld::new().with_unit(ObjectId(1), shooter(Vec3::ZERO)));
        let mut ctx = fresh_context(&world);
        let mut machine = TopLevelMachine::new(ObjectId(1));
        machine.start_idle(&mut ctx);
        machine.set_temporary_state(ids::BUSY, TEMPORARY_STATE_MAX_FRAMES * 10, &mut ctx);
        assert_eq!(
            machine.temporary.as_ref().map(|t| t.deadline_tick),
            Some(ctx.tick + TEMPORARY_STATE_MAX_FRAMES)
        );
    }

    #[test]
    fn scenario_save_load_mid_attack_preserves_state_and_targeters() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), shooter(Vec3::ZERO))
                .with_unit(ObjectId(2), victim(Vec3::new(5.0, 0.0, 0.0))),
        );
        let mut ctx = fresh_context(&world);
        let mut machine = TopLevelMachine::new(ObjectId(1));
        machine.start_idle(&mut ctx);
        machine.issue_command(
            &mut ctx,
            CommandParms::new(Command::AttackObject(ObjectId(2)), CommandSource::FromPlayer),
        );
        let original_attack_goal = machine.attack_goal().cloned();
        assert!(original_attack_goal.is_some());
        assert_eq!(world.borrow().targeters.get(&ObjectId(2)).map(|s| s.len()), Some(1));

        let snapshot = machine.snapshot();
        let bytes = xfer_save(&snapshot).expect("save");
        let restored_snapshot: TopLevelSnapshot = xfer_load(&bytes).expect("load");
        let restored = TopLevelMachine::restore(restored_snapshot, &mut ctx);

        assert_eq!(restored.current_state_id(), ids::ATTACK);
        assert_eq!(restored.goal().victim, Some(ObjectId(2)));
        assert_eq!(restored.attack_goal().cloned(), original_attack_goal);
        // The fresh `on_enter` during restore re-adds this attacker to the
        // victim's targeters set; since that add is idempotent (§5) the set
        // still holds exactly one entry rather than a duplicate.
        assert_eq!(world.borrow().targeters.get(&ObjectId(2)).map(|s| s.len()), Some(1));
    }
}
