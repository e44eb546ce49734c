//! Target acquisition (§4.5): `find_closest_enemy`/`find_closest_ally`/
//! `find_closest_repulsor`, each a filter-chain composition over the
//! partition manager ordered to reject as cheaply as possible, with an
//! optional priority-weighted selection pass.

use crate::collaborators::{IterationOrder, Relationship, SimContext};
use crate::ids::ObjectId;

/// Extra qualifiers narrowing what counts as a valid enemy target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetQualifiers {
    pub allow_buildings: bool,
}

/// Declared-priority weighting for `find_closest_enemy` (§4.5's
/// priority-weighted path). `distance_modifier` must be > 0.
#[derive(Debug, Clone, Copy)]
pub struct PriorityWeighting {
    pub distance_modifier: f32,
}

type ExtraFilter<'a> = Option<&'a dyn Fn(&SimContext, ObjectId) -> bool>;

/// Filter chain ordered to reject as early as possible: alive-on-map →
/// reject-buildings-unless-qualifiers → within-weapon-range → line-of-sight →
/// can-attack → unfogged → ignore-insignificant → stealth-rejection →
/// relationship.
fn passes_common_enemy_filters(
    ctx: &SimContext,
    me: ObjectId,
    candidate: ObjectId,
    qualifiers: TargetQualifiers,
) -> bool {
    if candidate == me {
        return false;
    }
    if ctx.objects.is_effectively_dead(candidate) {
        return false;
    }
    if !qualifiers.allow_buildings && ctx.objects.is_building(candidate) {
        return false;
    }
    if !ctx.objects.is_within_attack_range(me, candidate) {
        return false;
    }
    let me_pos = ctx.objects.position(me).unwrap_or_default();
    let candidate_pos = ctx.objects.position(candidate).unwrap_or_default();
    if ctx
        .pathfinder
        .is_attack_view_blocked(me, me_pos, candidate, candidate_pos)
    {
        return false;
    }
    if !ctx.objects.is_able_to_attack(me) {
        return false;
    }
    if !ctx.objects.is_unfogged(me, candidate) {
        return false;
    }
    if ctx.objects.is_insignificant(candidate) {
        return false;
    }
    if ctx.objects.is_stealthed_and_undetected(me, candidate) {
        return false;
    }
    if ctx.objects.relationship(me, candidate) != Relationship::Enemies {
        return false;
    }
    true
}

/// Resolve the effective priority of `candidate`, inheriting the highest
/// declared priority among its contained occupants when that exceeds its
/// own (§4.5: "a low-priority shell with a high-priority occupant inherits
/// the occupant's priority").
fn effective_declared_priority(ctx: &SimContext, candidate: ObjectId) -> i32 {
    let own = ctx.objects.declared_priority(candidate);
    ctx.objects
        .contained_objects(candidate)
        .into_iter()
        .map(|occupant| ctx.objects.declared_priority(occupant))
        .fold(own, i32::max)
}

/// `find_closest_enemy(me, range, qualifiers, priorities, extra_filter)`.
///
/// Without `priorities`, returns the nearest match the partition manager
/// reports (native closest-object query). With `priorities`, iterates
/// near-to-far computing `declared_priority - floor(distance / modifier)`,
/// keeping the highest effective priority and, as a tie-break, the highest
/// raw declared priority.
pub fn find_closest_enemy(
    ctx: &SimContext,
    me: ObjectId,
    range: f32,
    qualifiers: TargetQualifiers,
    priorities: Option<PriorityWeighting>,
    extra_filter: ExtraFilter,
) -> Option<ObjectId> {
    let me_pos = ctx.objects.position(me)?;
    let passes = |candidate: ObjectId| -> bool {
        passes_common_enemy_filters(ctx, me, candidate, qualifiers)
            && extra_filter.map(|f| f(ctx, candidate)).unwrap_or(true)
    };

    match priorities {
        None => ctx.partition.get_closest_object(me_pos, range, &passes),
        Some(weighting) => {
            let candidates = ctx
                .partition
                .iterate_objects_in_range(me_pos, range, IterationOrder::NearToFar);

            let mut best: Option<(i32, i32, ObjectId)> = None; // (effective, raw, id)
            for candidate in candidates {
                if !passes(candidate) {
                    continue;
                }
                let raw = effective_declared_priority(ctx, candidate);
                let distance = ctx
                    .objects
                    .position(candidate)
                    .unwrap_or_default()
                    .distance(me_pos);
                let effective =
                    raw - (distance / weighting.distance_modifier.max(f32::EPSILON)).floor() as i32;
                let better = match best {
                    None => true,
                    Some((best_effective, best_raw, _)) => {
                        effective > best_effective || (effective == best_effective && raw > best_raw)
                    }
                };
                if better {
                    best = Some((effective, raw, candidate));
                }
            }
            best.map(|(_, _, id)| id)
        }
    }
}

/// Symmetric with [`find_closest_enemy`] but for allies (support-role target
/// selection: `GetHealed`/`GetRepaired`).
pub fn find_closest_ally(ctx: &SimContext, me: ObjectId, range: f32) -> Option<ObjectId> {
    let me_pos = ctx.objects.position(me)?;
    let passes = |candidate: ObjectId| {
        candidate != me
            && !ctx.objects.is_effectively_dead(candidate)
            && ctx.objects.relationship(me, candidate) == Relationship::Allies
    };
    ctx.partition.get_closest_object(me_pos, range, &passes)
}

/// Objects flagged "scatter on proximity" within `repulsed_distance`,
/// feeding the Wander family's flee behavior.
pub fn find_closest_repulsor(
    ctx: &SimContext,
    me: ObjectId,
    repulsed_distance: f32,
    is_repulsor: &dyn Fn(ObjectId) -> bool,
) -> Option<ObjectId> {
    let me_pos = ctx.objects.position(me)?;
    let passes = |candidate: ObjectId| candidate != me && is_repulsor(candidate);
    ctx.partition.get_closest_object(me_pos, repulsed_distance, &passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_context, FakeUnit, FakeWorld};
    use glam::Vec3;
    use std::cell::RefCell;

    fn enemy(position: Vec3, team: u32, priority: i32) -> FakeUnit {
        FakeUnit {
            position,
            team,
            able_to_attack: true,
            declared_priority: priority,
            weapon_range: Some(1000.0),
            ..Default::default()
        }
    }

    #[test]
    fn without_priorities_returns_nearest_enemy() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), enemy(Vec3::ZERO, 1, 0))
                .with_unit(ObjectId(2), enemy(Vec3::new(5.0, 0.0, 0.0), 2, 0))
                .with_unit(ObjectId(3), enemy(Vec3::new(2.0, 0.0, 0.0), 2, 0)),
        );
        let ctx = fresh_context(&world);
        let found = find_closest_enemy(&ctx, ObjectId(1), 50.0, TargetQualifiers::default(), None, None);
        assert_eq!(found, Some(ObjectId(3)));
    }

    #[test]
    fn priority_weighting_prefers_higher_effective_priority_over_distance() {
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), enemy(Vec3::ZERO, 1, 0))
                .with_unit(ObjectId(2), enemy(Vec3::new(2.0, 0.0, 0.0), 2, 1))
                .with_unit(ObjectId(3), enemy(Vec3::new(20.0, 0.0, 0.0), 2, 100)),
        );
        let ctx = fresh_context(&world);
        let weighting = PriorityWeighting { distance_modifier: 10.0 };
        let found = find_closest_enemy(
            &ctx,
            ObjectId(1),
            50.0,
            TargetQualifiers::default(),
            Some(weighting),
            None,
        );
        // effective(2) = 1 - floor(2/10) = 1; effective(3) = 100 - floor(20/10) = 98
        assert_eq!(found, Some(ObjectId(3)));
    }

    #[test]
    fn dead_candidates_are_rejected() {
        let mut dead = enemy(Vec3::new(1.0, 0.0, 0.0), 2, 5);
        dead.dead = true;
        let world = RefCell::new(
            FakeWorld::new()
                .with_unit(ObjectId(1), enemy(Vec3::ZERO, 1, 0))
                .with_unit(ObjectId(2), dead),
        );
        let ctx = fresh_context(&world);
        let found = find_closest_enemy(&ctx, ObjectId(1), 50.0, TargetQualifiers::default(), None, None);
        assert_eq!(found, None);
    }
}
