use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};

use reel_in::prelude::*;
use reel_in::plugins::settings::DEFAULT_CONFIG_PATH;

// Flags: --runtime <seconds> (auto-exit), --seed <u64> (deterministic fishing), --config <path>.
fn flag_value<T: std::str::FromStr>(args: &[String], name: &str) -> Option<T> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args: Vec<String> = std::env::args().collect();
    let runtime = flag_value::<f32>(&args, "--runtime");
    let seed = flag_value::<u64>(&args, "--seed");
    let config_path = flag_value::<String>(&args, "--config").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    App::new()
        .insert_resource(Msaa::Sample4)
        .insert_resource(AmbientLight {
            color: Color::srgb(0.55, 0.55, 0.60),
            brightness: 800.0,
        })
        .insert_resource(RunLimit { run_duration_seconds: runtime })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window { title: "Reel In".into(), ..default() }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(CoreSimPlugin)      // timing + run limit
        .add_plugins(SettingsPlugin { path: config_path, seed_override: seed })
        .add_plugins(FishingPlugin)      // session + input
        .add_plugins(BobberPlugin)       // bobber body & contacts
        .add_plugins(ScenePlugin)        // lake, shore, angler
        .add_plugins(HudPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default())
        .run();
}
