//! State bodies (§4): the leaf and composite behaviors hosted by
//! [`crate::machine::StateMachine`].
//!
//! `movement` and `interaction` are building blocks reused by the two
//! top-level hosting states that own sub-machines of their own: `attack`
//! (aim/fire, peeled off into chase/approach) and `guard` (return/idle/inner
//! ring/outer ring), plus `attack_move`, which composes movement with a
//! nested to-the-death attack engagement rather than a row-based
//! sub-machine. `top_level` is the root: the twenty-one-state machine every
//! unit actually runs.

pub mod attack;
pub mod attack_move;
pub mod guard;
pub mod interaction;
pub mod movement;
pub mod top_level;
