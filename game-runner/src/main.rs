use bevy::prelude::*;
use game_audio::GameAudioPlugin;
use game_combat::GameCombatPlugin;
use game_physics::GamePhysicsPlugin;
use game_units::GameUnitsPlugin;
use game_world::GameWorldPlugin;

// game-ai is a headless behavior core driven through `SimContext`, not a
// Bevy plugin — it has no systems to register here. The lockstep sim driver
// that owns a `TopLevelMachine` per unit and feeds it a `SimContext` each
// tick lives outside this binary's Bevy `App` wiring.
fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(GamePhysicsPlugin::default())
        .add_plugins(GameWorldPlugin)
        .add_plugins(GameUnitsPlugin)
        .add_plugins(GameCombatPlugin)
        .add_plugins(GameAudioPlugin)
        .run();
}
