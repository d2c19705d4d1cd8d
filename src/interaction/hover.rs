//! Single-hover state machine and enter/exit feedback.

use crate::animation::RotationTween;
use crate::options::{HoverFeedback, HoverOptions};
use crate::scene::{Tile, TileId};

/// Which tile, if any, the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// Pointer over empty space.
    #[default]
    Idle,
    /// Pointer over a tile.
    Hovering(TileId),
}

impl HoverState {
    /// Hovered tile, if any.
    #[must_use]
    pub fn tile(self) -> Option<TileId> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(id),
        }
    }
}

/// Enter/exit effects produced by one pointer move.
///
/// Exit always precedes enter when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverTransition {
    /// Tile the pointer left.
    pub exited: Option<TileId>,
    /// Tile the pointer entered.
    pub entered: Option<TileId>,
}

impl HoverTransition {
    /// Whether the move changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exited.is_none() && self.entered.is_none()
    }
}

/// Tracks the single hovered tile across pointer moves.
#[derive(Debug, Clone, Default)]
pub struct HoverController {
    state: HoverState,
}

impl HoverController {
    /// Controller in [`HoverState::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Advance on a pointer move whose pick resolved to `hit`.
    pub fn on_pick(&mut self, hit: Option<TileId>) -> HoverTransition {
        let previous = self.state.tile();
        if previous == hit {
            return HoverTransition::default();
        }
        self.state = hit.map_or(HoverState::Idle, HoverState::Hovering);
        HoverTransition {
            exited: previous,
            entered: hit,
        }
    }

    /// Forget the hovered tile without producing an exit (scene teardown).
    pub fn reset(&mut self) {
        self.state = HoverState::Idle;
    }
}

/// Start enter feedback on `tile` at engine time `now`.
pub fn apply_enter(tile: &mut Tile, options: &HoverOptions, now: f32) {
    tile.is_hovered = true;
    match options.feedback {
        HoverFeedback::Tween => {
            retarget(tile, options.tween_degrees.to_radians(), options, now);
        }
        HoverFeedback::Spin => tile.is_rotating = true,
    }
}

/// Start exit feedback on `tile` at engine time `now`.
pub fn apply_exit(tile: &mut Tile, options: &HoverOptions, now: f32) {
    tile.is_hovered = false;
    tile.is_rotating = false;
    match options.feedback {
        HoverFeedback::Tween => retarget(tile, 0.0, options, now),
        HoverFeedback::Spin => {
            tile.rotation_tween = None;
            tile.rotation_y = 0.0;
        }
    }
}

// Replaces any in-flight tween, starting from where the tile is now.
fn retarget(tile: &mut Tile, to: f32, options: &HoverOptions, now: f32) {
    if let Some(tween) = tile.rotation_tween {
        tile.rotation_y = tween.sample(now);
    }
    tile.rotation_tween = Some(RotationTween::new(
        tile.rotation_y,
        to,
        now,
        options.tween_secs,
        options.easing,
    ));
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::scene::{NodeId, Project};

    fn tile() -> Tile {
        let project = Project::new("T", "#", 0);
        Tile::new(TileId(0), &project, box_asset(3.0), NodeId(0), NodeId(1), 2.2)
    }

    #[test]
    fn state_machine_transitions() {
        let mut hover = HoverController::new();
        let a = TileId(0);
        let b = TileId(1);

        let t = hover.on_pick(Some(a));
        assert_eq!(t, HoverTransition { exited: None, entered: Some(a) });
        assert!(hover.on_pick(Some(a)).is_empty());

        let t = hover.on_pick(Some(b));
        assert_eq!(t, HoverTransition { exited: Some(a), entered: Some(b) });
        assert_eq!(hover.state(), HoverState::Hovering(b));

        let t = hover.on_pick(None);
        assert_eq!(t, HoverTransition { exited: Some(b), entered: None });
        assert_eq!(hover.state(), HoverState::Idle);
        assert!(hover.on_pick(None).is_empty());
    }

    #[test]
    fn tween_enter_reaches_half_turn() {
        let mut t = tile();
        let opts = HoverOptions::default();
        apply_enter(&mut t, &opts, 1.0);
        let tween = t.rotation_tween.unwrap();
        assert!((tween.target() - PI).abs() < 1e-6);
        assert!((tween.sample(1.6) - PI).abs() < 1e-5);
        assert!(t.is_hovered && !t.is_rotating);
    }

    #[test]
    fn exit_mid_tween_starts_from_current_angle() {
        let mut t = tile();
        let opts = HoverOptions::default();
        apply_enter(&mut t, &opts, 0.0);
        let midway = t.rotation_tween.unwrap().sample(0.3);
        apply_exit(&mut t, &opts, 0.3);
        let tween = t.rotation_tween.unwrap();
        assert_eq!(tween.target(), 0.0);
        assert!((tween.sample(0.3) - midway).abs() < 1e-5);
        assert!((t.rotation_y - midway).abs() < 1e-5);
    }

    #[test]
    fn spin_feedback_sets_and_clears_flag() {
        let mut t = tile();
        let opts = HoverOptions {
            feedback: HoverFeedback::Spin,
            ..HoverOptions::default()
        };
        apply_enter(&mut t, &opts, 0.0);
        assert!(t.is_rotating);
        assert!(t.rotation_tween.is_none());
        t.rotation_y = 2.5;
        apply_exit(&mut t, &opts, 1.0);
        assert!(!t.is_rotating && !t.is_hovered);
        assert_eq!(t.rotation_y, 0.0);
    }

    #[test]
    fn tween_exit_also_stops_a_spin() {
        let mut t = tile();
        let spin = HoverOptions {
            feedback: HoverFeedback::Spin,
            ..HoverOptions::default()
        };
        apply_enter(&mut t, &spin, 0.0);
        t.rotation_y = 1.2;
        apply_exit(&mut t, &HoverOptions::default(), 0.5);
        assert!(!t.is_rotating && !t.is_hovered);
        assert_eq!(t.rotation_tween.map(|tw| tw.target()), Some(0.0));
    }
}
