use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResized};

const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Drawable size of the host container in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT.x, DEFAULT_VIEWPORT.y)
    }
}

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Star Field".into(),
            resolution: (DEFAULT_VIEWPORT.x, DEFAULT_VIEWPORT.y).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Keep `ViewportSize` in step with the primary window.
pub fn track_window_resize(
    mut resized: EventReader<WindowResized>,
    mut viewport: ResMut<ViewportSize>,
) {
    if let Some(last) = resized.read().last() {
        let next = ViewportSize::new(last.width, last.height);
        if *viewport != next {
            *viewport = next;
        }
    }
}
