//! Convenience re-exports for frequently used types & plugins.
pub use crate::fishing::config::FishingConfig;
pub use crate::fishing::bobber::{ObstacleProbe, OpenWater};
pub use crate::fishing::rod::{RodPose, RodState};
pub use crate::fishing::session::{
    EnvironmentEvent, FishingSession, FishingState, FishingView, FrameInput, RestartReason, SessionEvent,
};
pub use crate::plugins::core_sim::{SimState, RunLimit, ExitState, CoreSimPlugin};
pub use crate::plugins::settings::{SettingsPlugin, FishingSettings, ConfigError, load_config};
pub use crate::plugins::fishing::{
    FishingPlugin, FishingSet, FishingInput, FishingRng, ActiveSession, FishingEvent, BobberContact, Angler,
};
pub use crate::plugins::bobber::{BobberPlugin, BobberBody, Water, RapierObstacleProbe};
pub use crate::plugins::scene::ScenePlugin;
pub use crate::plugins::hud::{HudPlugin, Hud};
