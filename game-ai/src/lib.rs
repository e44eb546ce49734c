//! The deterministic behavior core driving unit AI in a lockstep RTS
//! simulation: a hierarchical finite-state-machine framework (§3), the leaf
//! and composite states built on it (§4), target acquisition (§4.5), and
//! group-command dispatch (§4.6).
//!
//! This crate has no engine dependency. Every state body reads and mutates
//! the simulation only through the narrow collaborator traits in
//! [`collaborators`] ([`collaborators::SimContext`]), so the same logic runs
//! identically whether the host is a Bevy `World`, a headless lockstep
//! runner, or a unit test's [`test_support::FakeWorld`] — determinism across
//! peers depends on that isolation holding.

#![allow(clippy::type_complexity)]

pub mod collaborators;
pub mod command;
pub mod group;
pub mod ids;
pub mod machine;
pub mod reservations;
pub mod state;
pub mod states;
pub mod targeting;
pub mod tunables;
pub mod xfer;

#[cfg(test)]
pub mod test_support;

pub use collaborators::{
    IterationOrder, ObjectQuery, Path, Pathfinder, PartitionManager, Relationship, SimContext,
    TerrainQuery, WeaponQuery, WeaponState,
};
pub use command::{Command, CommandParms, CommandSource, DamageInfo, GuardMode};
pub use group::{FormationShape, Group};
pub use ids::{ObjectId, PathId, PolygonId, StateId, WaypointId, WeaponId};
pub use machine::{StateMachine, TransitionRow};
pub use state::{ConditionFn, ExitType, StateBody, StateReturn};
pub use states::top_level::{TopLevelGoal, TopLevelMachine, TopLevelSnapshot, TopLevelState};
pub use xfer::{xfer_load, xfer_save, XferError, BEHAVIOR_CORE_SAVE_VERSION};
