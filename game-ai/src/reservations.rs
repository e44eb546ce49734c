//! Thin, named wrappers around the §5 shared-resource calls every state's
//! `on_enter`/`on_exit` hook must make symmetrically. Kept as free functions
//! rather than methods on `SimContext` so a state body reads as "acquire
//! targeter" / "release space" at the call site instead of reaching through
//! `ctx.objects` directly — the indirection exists purely for that reading,
//! not for any extra bookkeeping of its own.

use crate::collaborators::SimContext;
use crate::ids::ObjectId;

/// Aim entry: `add_targeter(id, true)` (§5). Re-entering aim re-adds
/// idempotently — this is never conditioned on "was I already there".
pub fn add_targeter(ctx: &mut SimContext, target: ObjectId, attacker: ObjectId) {
    ctx.objects.add_targeter(target, attacker, true);
}

/// Final attack exit: `add_targeter(id, false)` (§5), run unconditionally on
/// both `Normal` and `Reset` exits, never only on the success path.
pub fn remove_targeter(ctx: &mut SimContext, target: ObjectId, attacker: ObjectId) {
    ctx.objects.add_targeter(target, attacker, false);
}

pub fn reserve_space(ctx: &mut SimContext, space: ObjectId, holder: ObjectId) -> bool {
    ctx.objects.reserve_space(space, holder)
}

pub fn release_space(ctx: &mut SimContext, space: ObjectId, holder: ObjectId) {
    ctx.objects.release_space(space, holder);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_context, FakeWorld};
    use std::cell::RefCell;

    #[test]
    fn add_targeter_is_idempotent() {
        let world = RefCell::new(FakeWorld::new());
        let mut ctx = fresh_context(&world);
        add_targeter(&mut ctx, ObjectId(1), ObjectId(2));
        add_targeter(&mut ctx, ObjectId(1), ObjectId(2));
        assert_eq!(world.borrow().targeters.get(&ObjectId(1)).map(|s| s.len()), Some(1));
        remove_targeter(&mut ctx, ObjectId(1), ObjectId(2));
        remove_targeter(&mut ctx, ObjectId(1), ObjectId(2));
        assert_eq!(world.borrow().targeters.get(&ObjectId(1)).map(|s| s.len()), Some(0));
    }

    #[test]
    fn reserve_space_is_single_writer() {
        let world = RefCell::new(FakeWorld::new());
        let mut ctx = fresh_context(&world);
        assert!(reserve_space(&mut ctx, ObjectId(10), ObjectId(1)));
        assert!(!reserve_space(&mut ctx, ObjectId(10), ObjectId(2)));
        release_space(&mut ctx, ObjectId(10), ObjectId(1));
        assert!(reserve_space(&mut ctx, ObjectId(10), ObjectId(2)));
    }
}
