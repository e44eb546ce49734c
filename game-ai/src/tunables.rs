//! Named constants referenced across states and the group dispatcher.
//!
//! Collected here so a balance pass or a test has one place to look instead
//! of hunting magic numbers through state bodies.

/// Simulation ticks per second (logic frames, not render frames).
pub const FRAMES_PER_SECOND: u32 = 30;

/// Hard cap on a temporary-state override's frame limit (§4.7).
pub const TEMPORARY_STATE_MAX_FRAMES: u32 = 60 * FRAMES_PER_SECOND;

/// How many consecutive blocked ticks before internal-move-to forces a repath.
pub const BLOCKED_SECONDS_BEFORE_REPATH: f32 = 2.0;

/// Goal drift, as a fraction of the original travel distance, that forces a repath.
pub const GOAL_DRIFT_FRACTION_BEFORE_REPATH: f32 = 0.10;

/// Shared cooldown between repath requests, regardless of which trigger fired.
pub const MIN_REPATH_INTERVAL_FRAMES: u32 = FRAMES_PER_SECOND; // 1s

/// Ground units are considered arrived once within this many cells of the true goal.
pub const GROUND_ARRIVAL_CELL_TOLERANCE: u32 = 4;

/// How many times attack-move retries reaching a target before reporting failure.
pub const ATTACK_RETRY_COUNT: u32 = 3;

/// While retrying, attack-move holds position (no translation) for this long.
pub const ATTACK_RETRY_HOLD_SECONDS: f32 = 3.0;

/// Minimum weapon-aim error, in degrees, treated as "on target" even for
/// zero-intrinsic-delta weapons.
pub const MIN_AIM_DELTA_DEGREES: f32 = 2.0;

/// Guard inner ring default vision-range multiplier applied to the guard command's radius.
pub const GUARD_INNER_RING_SCALE: f32 = 1.0;

/// Guard outer ring radius multiplier over the inner ring.
pub const GUARD_OUTER_RING_SCALE: f32 = 1.5;

/// Guard outer-ring give-up timer once the aggressor leaves the inner ring.
pub const GUARD_OUTER_RING_TIMEOUT_SECONDS: f32 = 8.0;

/// Upper bound on the random per-tick offset used to spread out Return-state
/// inner-target polling so many guards don't all scan on the same tick.
pub const GUARD_RETURN_SCAN_JITTER_FRAMES: u32 = FRAMES_PER_SECOND / 2;

/// How far an object-guard's guardee may drift from the last-known guard
/// point before `Idle` gives up and falls back to `Return`.
pub const GUARD_GUARDEE_MOVE_TOLERANCE: f32 = 5.0;

/// Minimum infantry headcount before the group dispatcher computes one shared
/// formation path instead of individually-routed goals.
pub const MIN_INFANTRY_FOR_GROUP: usize = 4;

/// Minimum vehicle headcount before the group dispatcher computes one shared
/// formation path instead of individually-routed goals.
pub const MIN_VEHICLES_FOR_GROUP: usize = 3;

/// Minimum move distance before the group dispatcher bothers with a shared
/// formation path at all (short hops just issue individual goals).
pub const MIN_DISTANCE_FOR_GROUP: f32 = 15.0;

/// Per-member fudge factor, multiplied by group size, for skirmish-AI
/// "close enough" group-move termination (§4.6).
pub const SKIRMISH_GROUP_FUDGE: f32 = 5.0;

/// Wander family: seconds between re-picking a random nearby goal.
pub const WANDER_REPICK_SECONDS: f32 = 6.0;

/// WanderInPlace: max radius from the entry point a re-picked goal may land in.
pub const WANDER_IN_PLACE_RADIUS: f32 = 12.0;

/// Panic: shortened re-pick interval relative to ordinary wander.
pub const PANIC_REPICK_SECONDS: f32 = 1.5;

/// Rappel: maximum occupants killed on entry before the rappeller is
/// considered to have cleared the building outright.
pub const RAPPEL_MAX_KILLS: u32 = 2;

/// Rappel: search radius for a ground cell to drop the rappeller on when
/// the target building turns out to be full.
pub const RAPPEL_GROUND_PLACEMENT_RADIUS: f32 = 200.0;
