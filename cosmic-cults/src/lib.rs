pub mod ai;
pub mod assets;
pub mod units;
pub mod world;

pub use ai::GameAIPlugin;
pub use units::GameUnitsPlugin;
pub use world::GameWorldPlugin;
