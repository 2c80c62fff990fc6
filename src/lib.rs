//! Library entry for integration tests & external tooling.
//! `fishing` is the engine-free game core; `plugins` wires it into Bevy + rapier.

pub mod fishing {
    pub mod config;
    pub mod skill_check;
    pub mod casting;
    pub mod bite;
    pub mod bobber;
    pub mod rod;
    pub mod score;
    pub mod session;
}

pub mod plugins {
    pub mod core_sim;
    pub mod settings;
    pub mod fishing;
    pub mod bobber;
    pub mod scene;
    pub mod hud;
}
pub mod prelude;
