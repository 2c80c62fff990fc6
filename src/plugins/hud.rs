use bevy::prelude::*;

use crate::fishing::session::{FishingState, FishingView};
use crate::plugins::core_sim::SimState;
use crate::plugins::fishing::{ActiveSession, FishingSet};

const BAR_CELLS: usize = 20;

#[derive(Component)]
pub struct Hud;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud.in_set(FishingSet::Present));
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle { font_size: 20.0, color: Color::srgb(0.95, 0.95, 1.0), ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        }),
        Hud,
    ));
}

fn update_hud(
    sim: Res<SimState>,
    session: Res<ActiveSession>,
    mut q_text: Query<&mut Text, With<Hud>>,
) {
    let Ok(mut text) = q_text.get_single_mut() else { return; };
    text.sections[0].value = format!("t={:.1}s\n{}", sim.elapsed_seconds, hud_text(&session.0.view()));
}

/// Plain-text readout of one frame of fishing state.
pub fn hud_text(view: &FishingView) -> String {
    let mut lines = vec![format!("Score: {}", view.score)];
    if view.congrats_visible {
        lines.push(format!("Nice catch! +{}", view.last_delta));
    }
    match view.state {
        FishingState::Inactive => lines.push("Fishing off [F]".to_string()),
        FishingState::Idle => lines.push("Hold LMB to cast".to_string()),
        FishingState::Casting => {}
        FishingState::WaitingForCatch if view.bobber_biting => lines.push("Bite! RMB to strike".to_string()),
        FishingState::WaitingForCatch => lines.push("Waiting for a bite...".to_string()),
        FishingState::Reeling => {}
    }
    if view.casting_bar_visible {
        let fill = if view.max_force > 0.0 { view.cast_force / view.max_force } else { 0.0 };
        lines.push(format!("Cast [{}]", meter(fill, None)));
    }
    if let Some(qte) = view.skill_check {
        let lo = qte.target_center - qte.target_width * 0.5;
        let hi = qte.target_center + qte.target_width * 0.5;
        lines.push(format!("Reel [{}]", meter(qte.value, Some((lo, hi)))));
        lines.push(format!("Line [{}]", meter(qte.progress, None)));
    }
    lines.join("\n")
}

// `#` filled up to `fill`, `=` marks the target band, `|` the cursor when a band is shown.
fn meter(fill: f32, band: Option<(f32, f32)>) -> String {
    let fill = fill.clamp(0.0, 1.0);
    (0..BAR_CELLS)
        .map(|i| {
            let x = (i as f32 + 0.5) / BAR_CELLS as f32;
            match band {
                Some((lo, hi)) => {
                    let cursor = ((fill * BAR_CELLS as f32) as usize).min(BAR_CELLS - 1);
                    if i == cursor {
                        '|'
                    } else if x >= lo && x <= hi {
                        '='
                    } else {
                        '.'
                    }
                }
                None if x <= fill => '#',
                None => '.',
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::rod::{RodBend, RodState};
    use crate::fishing::session::SkillCheckView;

    fn view(state: FishingState) -> FishingView {
        FishingView {
            state,
            cast_force: 0.0,
            max_force: 10.0,
            casting_bar_visible: false,
            skill_check: None,
            score: 0,
            last_delta: 0,
            congrats_visible: false,
            bobber_position: None,
            bobber_biting: false,
            rod_state: RodState::Idle,
            rod_bend: RodBend::default(),
            movement_enabled: true,
        }
    }

    #[test]
    fn meter_fills_proportionally() {
        assert_eq!(meter(0.0, None), ".".repeat(BAR_CELLS));
        assert_eq!(meter(1.0, None), "#".repeat(BAR_CELLS));
        assert_eq!(meter(0.5, None).matches('#').count(), BAR_CELLS / 2);
    }

    #[test]
    fn casting_shows_force_bar() {
        let mut v = view(FishingState::Casting);
        v.casting_bar_visible = true;
        v.cast_force = 5.0;
        assert!(hud_text(&v).contains("Cast ["));
    }

    #[test]
    fn reeling_shows_band_and_cursor() {
        let mut v = view(FishingState::Reeling);
        v.skill_check = Some(SkillCheckView { value: 0.0, target_center: 0.5, target_width: 0.2, progress: 0.2 });
        let text = hud_text(&v);
        assert!(text.contains("Reel [|"));
        assert!(text.contains('='));
    }

    #[test]
    fn congrats_line_only_while_visible() {
        let mut v = view(FishingState::Idle);
        v.score = 42;
        v.last_delta = 42;
        assert!(!hud_text(&v).contains("Nice catch"));
        v.congrats_visible = true;
        assert!(hud_text(&v).contains("Nice catch! +42"));
    }
}
