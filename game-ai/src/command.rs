//! The command input contract (§6): a tagged record fed to a unit's
//! top-level machine. Every variant is preserved bit-stable (same order as
//! originally registered) so save files and replays agree across versions.

use crate::ids::{ObjectId, PolygonId, WaypointId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where a command originated. Affects nothing about state behavior itself,
/// but is recorded because some states (e.g. dozer-issued repair commands)
/// branch on it, and it is part of the bit-stable save/replay record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommandSource {
    #[default]
    FromPlayer,
    FromScript,
    FromAi,
    FromDozer,
    DefaultSwitchWeapon,
}

/// A guard command's scan-filter narrowing (§4.4 supplement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuardMode {
    #[default]
    Normal,
    GuardAlertToEnemies,
    GuardFlyingUnitsOnly,
}

/// Damage-info payload carried by `GoProne`. Kept opaque to this crate
/// (damage resolution is out of scope) beyond the fields a state needs to
/// decide whether to react.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    pub amount: f32,
    pub source: ObjectId,
}

/// Complete, order-preserving list of command variants. Do not reorder or
/// renumber existing entries — the discriminant order is stored in save
/// files and replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    MoveToPosition(Vec3),
    MoveToObject(ObjectId),
    TightenToPosition(Vec3),
    MoveAndEvacuate(Vec3),
    MoveAndEvacuateAndExit(Vec3),
    Idle,
    FollowWaypointPath(WaypointId),
    FollowWaypointPathAsTeam(WaypointId),
    FollowWaypointPathExact(WaypointId),
    FollowWaypointPathAsTeamExact(WaypointId),
    FollowPath(Vec<Vec3>),
    FollowExitProductionPath(Vec<Vec3>),
    AttackObject(ObjectId),
    ForceAttackObject(ObjectId),
    AttackTeam(String),
    AttackPosition(Vec3),
    AttackMoveToPosition(Vec3),
    AttackFollowWaypointPath(WaypointId),
    AttackFollowWaypointPathAsTeam(WaypointId),
    Hunt,
    Repair(ObjectId),
    ResumeConstruction(ObjectId),
    GetHealed(ObjectId),
    GetRepaired(ObjectId),
    Enter(ObjectId),
    Dock(ObjectId),
    Exit(ObjectId),
    ExitInstantly(ObjectId),
    Evacuate,
    EvacuateInstantly,
    GuardPosition(Vec3, GuardMode),
    GuardObject(ObjectId, GuardMode),
    GuardArea(Vec3, f32, GuardMode),
    GuardTunnelNetwork(GuardMode),
    GuardRetaliate(ObjectId),
    AttackArea(Vec3, f32),
    FaceObject(ObjectId),
    FacePosition(Vec3),
    RappelInto(ObjectId),
    CombatDrop(ObjectId, Vec3),
    Wander(Vec3),
    WanderInPlace,
    Panic(Vec3),
    Busy,
    GoProne(DamageInfo),
    MoveAwayFromUnit(ObjectId),
    CommandButton(u32, Option<ObjectId>),
}

/// The full tagged record (§6). `cmd` is the only field most callers build
/// by hand; the convenience constructors below fill the rest from `cmd`'s
/// own payload so every command path still produces the same shape of
/// record regardless of entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandParms {
    pub cmd: Command,
    pub source: CommandSource,
    pub position: Option<Vec3>,
    pub object_id: Option<ObjectId>,
    pub other_id: Option<ObjectId>,
    pub team_name: Option<String>,
    pub coord_list: Vec<Vec3>,
    pub waypoint_id: Option<WaypointId>,
    pub polygon_id: Option<PolygonId>,
    pub int_value: Option<u32>,
    pub damage_info: Option<DamageInfo>,
    pub command_button_id: Option<u32>,
}

impl CommandParms {
    pub fn new(cmd: Command, source: CommandSource) -> Self {
        let mut parms = CommandParms {
            cmd: cmd.clone(),
            source,
            position: None,
            object_id: None,
            other_id: None,
            team_name: None,
            coord_list: Vec::new(),
            waypoint_id: None,
            polygon_id: None,
            int_value: None,
            damage_info: None,
            command_button_id: None,
        };
        match cmd {
            Command::MoveToPosition(p)
            | Command::TightenToPosition(p)
            | Command::MoveAndEvacuate(p)
            | Command::MoveAndEvacuateAndExit(p)
            | Command::AttackPosition(p)
            | Command::AttackMoveToPosition(p)
            | Command::FacePosition(p)
            | Command::Wander(p)
            | Command::Panic(p) => parms.position = Some(p),
            Command::GuardPosition(p, _) => parms.position = Some(p),
            Command::AttackArea(p, r) | Command::GuardArea(p, r, _) => {
                parms.position = Some(p);
                parms.int_value = Some(r.to_bits());
            }
            Command::MoveToObject(o)
            | Command::AttackObject(o)
            | Command::ForceAttackObject(o)
            | Command::Repair(o)
            | Command::ResumeConstruction(o)
            | Command::GetHealed(o)
            | Command::GetRepaired(o)
            | Command::Enter(o)
            | Command::Dock(o)
            | Command::Exit(o)
            | Command::ExitInstantly(o)
            | Command::GuardObject(o, _)
            | Command::GuardRetaliate(o)
            | Command::FaceObject(o)
            | Command::RappelInto(o)
            | Command::MoveAwayFromUnit(o) => parms.object_id = Some(o),
            Command::CombatDrop(o, p) => {
                parms.object_id = Some(o);
                parms.position = Some(p);
            }
            Command::AttackTeam(ref name) => parms.team_name = Some(name.clone()),
            Command::FollowWaypointPath(w)
            | Command::FollowWaypointPathAsTeam(w)
            | Command::FollowWaypointPathExact(w)
            | Command::FollowWaypointPathAsTeamExact(w)
            | Command::AttackFollowWaypointPath(w)
            | Command::AttackFollowWaypointPathAsTeam(w) => parms.waypoint_id = Some(w),
            Command::FollowPath(ref pts) | Command::FollowExitProductionPath(ref pts) => {
                parms.coord_list = pts.clone();
            }
            Command::GoProne(info) => parms.damage_info = Some(info),
            Command::CommandButton(id, target) => {
                parms.command_button_id = Some(id);
                parms.object_id = target;
            }
            Command::Idle
            | Command::Hunt
            | Command::Evacuate
            | Command::EvacuateInstantly
            | Command::GuardTunnelNetwork(_)
            | Command::WanderInPlace
            | Command::Busy => {}
        }
        parms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_position_fills_position_field() {
        let parms = CommandParms::new(
            Command::MoveToPosition(Vec3::new(1.0, 2.0, 3.0)),
            CommandSource::FromPlayer,
        );
        assert_eq!(parms.position, Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(parms.object_id.is_none());
    }

    #[test]
    fn idle_leaves_every_payload_field_unset() {
        let parms = CommandParms::new(Command::Idle, CommandSource::FromAi);
        assert!(parms.position.is_none());
        assert!(parms.object_id.is_none());
        assert!(parms.coord_list.is_empty());
    }
}
