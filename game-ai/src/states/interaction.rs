//! Interaction states (§4.2 supplement, §6): entering/docking/exiting a
//! container, rappelling into a building, and picking up a dropped crate.
//! Each composes the same move-then-act shape `movement.rs`'s states use:
//! inherent `on_enter`/`update`/`on_exit` methods against the top-level goal
//! record, dispatched by `top_level::TopLevelState`.

use crate::collaborators::SimContext;
use crate::ids::ObjectId;
use crate::state::StateReturn;
use crate::states::movement::MoveToRuntime;
use crate::states::top_level::TopLevelGoal;
use crate::tunables::{RAPPEL_GROUND_PLACEMENT_RADIUS, RAPPEL_MAX_KILLS};
use tracing::debug;

/// `Command::Enter`: move to the target, then occupy it (single reservation
/// through the contain module — `add_to_contain` is the enforcement point).
#[derive(Debug, Clone, Default)]
pub struct Enter {
    runtime: MoveToRuntime,
    entered: bool,
}

impl Enter {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.entered = false;
        let Some(target) = goal.victim else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.objects.position(target) else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, pos, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(target) = goal.victim else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.objects.position(target) else {
            return StateReturn::Failure;
        };
        match self.runtime.update(ctx, owner, pos) {
            StateReturn::Success => {
                self.entered = ctx.objects.add_to_contain(target, owner);
                if self.entered { StateReturn::Success } else { StateReturn::Failure }
            }
            other => other,
        }
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `Command::Dock`: identical shape to `Enter` but against a dock/runway
/// slot reserved through `reserve_space`/`release_space` rather than the
/// contain module (§5's parking-space/runway resource).
#[derive(Debug, Clone, Default)]
pub struct Dock {
    runtime: MoveToRuntime,
    reserved: Option<ObjectId>,
}

impl Dock {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.reserved = None;
        let Some(slot) = goal.victim else {
            return StateReturn::Failure;
        };
        if !crate::reservations::reserve_space(ctx, slot, owner) {
            return StateReturn::Failure;
        }
        self.reserved = Some(slot);
        let Some(pos) = ctx.objects.position(slot) else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, pos, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(slot) = goal.victim else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.objects.position(slot) else {
            return StateReturn::Failure;
        };
        self.runtime.update(ctx, owner, pos)
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
        if let Some(slot) = self.reserved.take() {
            crate::reservations::release_space(ctx, slot, owner);
        }
    }
}

/// `Command::Exit`/`ExitInstantly`: leave the current container. `instant`
/// skips the move-clear-of-the-doorway step and unloads immediately.
#[derive(Debug, Clone, Default)]
pub struct Exit {
    pub instant: bool,
    runtime: MoveToRuntime,
    cleared: bool,
}

impl Exit {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        self.cleared = self.instant;
        let Some(container) = ctx.objects.is_contained_by(owner) else {
            return StateReturn::Failure;
        };
        ctx.objects.remove_from_contain(container, owner);
        if self.instant {
            return StateReturn::Success;
        }
        let pos = ctx.objects.position(container).unwrap_or_default();
        let clear_of_doorway = pos + glam::Vec3::new(3.0, 0.0, 0.0);
        self.runtime.on_enter(ctx, owner, clear_of_doorway, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        if self.cleared {
            return StateReturn::Success;
        }
        let pos = ctx.objects.position(owner).unwrap_or_default();
        match self.runtime.update(ctx, owner, pos) {
            StateReturn::Success => {
                self.cleared = true;
                StateReturn::Success
            }
            other => other,
        }
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}

/// `Command::RappelInto`/`CombatDrop`: drop into a building. The fall itself
/// is physics, out of this core's scope (§1); what this state owns is the
/// all-or-nothing outcome on landing, resolved in `on_exit`: kill up to
/// `RAPPEL_MAX_KILLS` occupants, then the rappeller dies if it killed
/// exactly the cap, otherwise it joins the garrison or — if the building
/// turns out to be full — is routed to open ground nearby (§4.2 supplement).
#[derive(Debug, Clone, Default)]
pub struct Rappel {
    building: Option<ObjectId>,
    landed: bool,
}

impl Rappel {
    pub fn on_enter(&mut self, ctx: &mut SimContext, _owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        self.landed = false;
        let Some(building) = goal.victim else {
            return StateReturn::Failure;
        };
        if ctx.objects.position(building).is_none() {
            return StateReturn::Failure;
        }
        self.building = Some(building);
        StateReturn::Continue
    }

    pub fn update(&mut self, _ctx: &mut SimContext, _owner: ObjectId, _goal: &mut TopLevelGoal) -> StateReturn {
        self.landed = true;
        StateReturn::Success
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        let Some(building) = self.building.take() else {
            return;
        };
        if !std::mem::take(&mut self.landed) {
            // Pulled out of the rappel before landing (e.g. re-tasked
            // mid-fall) — no combat outcome to resolve.
            return;
        }
        let living: Vec<ObjectId> = ctx
            .objects
            .contained_objects(building)
            .into_iter()
            .filter(|id| *id != owner && !ctx.objects.is_effectively_dead(*id))
            .take(RAPPEL_MAX_KILLS as usize)
            .collect();
        for victim in &living {
            ctx.objects.kill(*victim);
        }
        let killed = living.len() as u32;
        debug!(owner = owner.0, building = building.0, killed, "rappel resolved on landing");
        if killed >= RAPPEL_MAX_KILLS {
            ctx.objects.kill(owner);
            return;
        }
        if ctx.objects.add_to_contain(building, owner) {
            return;
        }
        let Some(building_pos) = ctx.objects.position(building) else {
            return;
        };
        if let Some(ground_pos) = ctx.terrain.find_position_around(building_pos, RAPPEL_GROUND_PLACEMENT_RADIUS) {
            let layer = ctx.objects.map_layer(owner);
            ctx.pathfinder.update_goal(owner, ground_pos, layer);
        }
    }
}

#[cfg(test)]
mod rappel_tests {
    use super::*;
    use crate::states::top_level::TopLevelGoal;
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use glam::Vec3;
    use std::cell::RefCell;

    fn occupant() -> FakeUnit {
        FakeUnit {
            able_to_attack: true,
            team: 2,
            ..Default::default()
        }
    }

    fn land(rappel: &mut Rappel, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) {
        assert_eq!(rappel.on_enter(ctx, owner, goal), StateReturn::Continue);
        assert_eq!(rappel.update(ctx, owner, goal), StateReturn::Success);
    }

    /// §8 scenario 4: exactly `RAPPEL_MAX_KILLS` occupants killed means the
    /// rappeller itself dies rather than occupying the cleared building.
    #[test]
    fn killing_exactly_the_cap_kills_the_rappeller_instead_of_occupying() {
        let building = FakeUnit {
            building: true,
            contain_capacity: 5,
            team: 2,
            contained: vec![ObjectId(10), ObjectId(11)],
            ..Default::default()
        };
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), FakeUnit::default())
                .with_unit(ObjectId(2), building)
                .with_unit(ObjectId(10), occupant())
                .with_unit(ObjectId(11), occupant()),
        );
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.victim = Some(ObjectId(2));
        let mut rappel = Rappel::default();
        land(&mut rappel, &mut ctx, ObjectId(1), &mut goal);
        rappel.on_exit(&mut ctx, ObjectId(1));

        assert!(world.borrow().units[&ObjectId(10)].dead);
        assert!(world.borrow().units[&ObjectId(11)].dead);
        assert!(world.borrow().units[&ObjectId(1)].dead);
        assert!(!world.borrow().units[&ObjectId(2)].contained.contains(&ObjectId(1)));
    }

    /// Fewer than the cap killed (including zero, an already-clear building):
    /// the rappeller survives and joins the garrison.
    #[test]
    fn killing_fewer_than_the_cap_joins_the_building() {
        let building = FakeUnit {
            building: true,
            contain_capacity: 5,
            team: 2,
            contained: vec![ObjectId(10)],
            ..Default::default()
        };
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), FakeUnit::default())
                .with_unit(ObjectId(2), building)
                .with_unit(ObjectId(10), occupant()),
        );
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.victim = Some(ObjectId(2));
        let mut rappel = Rappel::default();
        land(&mut rappel, &mut ctx, ObjectId(1), &mut goal);
        rappel.on_exit(&mut ctx, ObjectId(1));

        assert!(world.borrow().units[&ObjectId(10)].dead);
        assert!(!world.borrow().units[&ObjectId(1)].dead);
        assert!(world.borrow().units[&ObjectId(2)].contained.contains(&ObjectId(1)));
    }

    /// A full building routes the rappeller to open ground instead (via the
    /// pathfinder goal, since this core never sets object position itself).
    #[test]
    fn a_full_building_routes_the_rappeller_to_the_ground_instead() {
        let building = FakeUnit {
            building: true,
            contain_capacity: 0,
            team: 2,
            position: Vec3::new(50.0, 0.0, 0.0),
            ..Default::default()
        };
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), FakeUnit::default())
                .with_unit(ObjectId(2), building),
        );
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.victim = Some(ObjectId(2));
        let mut rappel = Rappel::default();
        land(&mut rappel, &mut ctx, ObjectId(1), &mut goal);
        rappel.on_exit(&mut ctx, ObjectId(1));

        assert!(!world.borrow().units[&ObjectId(2)].contained.contains(&ObjectId(1)));
        assert!(world.borrow().goals.contains_key(&ObjectId(1)));
    }

    /// Being re-tasked mid-fall (a `Reset` exit before `update` ever
    /// succeeds) resolves no combat outcome at all.
    #[test]
    fn exiting_before_landing_resolves_nothing() {
        let building = FakeUnit {
            building: true,
            contain_capacity: 5,
            team: 2,
            contained: vec![ObjectId(10)],
            ..Default::default()
        };
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), FakeUnit::default())
                .with_unit(ObjectId(2), building)
                .with_unit(ObjectId(10), occupant()),
        );
        let mut ctx = fresh_context(&world);
        let mut goal = TopLevelGoal::new(ObjectId(1));
        goal.victim = Some(ObjectId(2));
        let mut rappel = Rappel::default();
        assert_eq!(rappel.on_enter(&mut ctx, ObjectId(1), &mut goal), StateReturn::Continue);
        rappel.on_exit(&mut ctx, ObjectId(1));

        assert!(!world.borrow().units[&ObjectId(10)].dead);
        assert!(!world.borrow().units[&ObjectId(2)].contained.contains(&ObjectId(1)));
    }
}

/// A short side-trip to collect a dropped crate/pickup (§4.4's `GetCrate`).
#[derive(Debug, Clone, Default)]
pub struct PickUpCrate {
    runtime: MoveToRuntime,
}

impl PickUpCrate {
    pub fn on_enter(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(crate_id) = goal.victim else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.objects.position(crate_id) else {
            return StateReturn::Failure;
        };
        self.runtime.on_enter(ctx, owner, pos, true);
        StateReturn::Continue
    }

    pub fn update(&mut self, ctx: &mut SimContext, owner: ObjectId, goal: &mut TopLevelGoal) -> StateReturn {
        let Some(crate_id) = goal.victim else {
            return StateReturn::Failure;
        };
        let Some(pos) = ctx.objects.position(crate_id) else {
            // The crate is already gone (someone else got it first); that's
            // a successful "nothing left to do" outcome, not a failure.
            return StateReturn::Success;
        };
        self.runtime.update(ctx, owner, pos)
    }

    pub fn on_exit(&mut self, ctx: &mut SimContext, owner: ObjectId) {
        self.runtime.on_exit(ctx, owner);
    }
}
