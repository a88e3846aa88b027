use super::frame_loop::FrameLoop;
use crate::engine::camera::CameraController;
use crate::engine::core::window_config::ViewportSize;
use crate::engine::filter::{
    ActiveModes, FilterConfig, FilterUpdate, FilterUpdateError, SearchQuery, ViewMode,
};
use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// External command from the UI collaborator. Queued as an event and
/// drained once per frame in the input stage.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    SetFilter(FilterUpdate),
    ToggleMode(ViewMode),
    SetSearchQuery(String),
    ToggleCamera,
    Resize { width: f32, height: f32 },
    Teardown,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Filter(#[from] FilterUpdateError),

    #[error("unknown view mode: {0}")]
    UnknownMode(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },
}

#[derive(Deserialize)]
struct SetFilterParams {
    key: String,
    value: serde_json::Value,
}

#[derive(Deserialize)]
struct ToggleModeParams {
    mode: String,
}

#[derive(Deserialize)]
struct SearchParams {
    text: String,
}

#[derive(Deserialize)]
struct ResizeParams {
    width: f32,
    height: f32,
}

fn params<T: for<'de> Deserialize<'de>>(
    method: &str,
    value: &serde_json::Value,
) -> Result<T, CommandError> {
    serde_json::from_value(value.clone()).map_err(|e| CommandError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

impl ViewerCommand {
    /// Parse a bridge method call into a command.
    pub fn parse(method: &str, value: &serde_json::Value) -> Result<Self, CommandError> {
        match method {
            "set_filter" => {
                let p: SetFilterParams = params(method, value)?;
                Ok(Self::SetFilter(FilterUpdate::parse(&p.key, &p.value)?))
            }
            "toggle_mode" => {
                let p: ToggleModeParams = params(method, value)?;
                ViewMode::from_tag(&p.mode)
                    .map(Self::ToggleMode)
                    .ok_or(CommandError::UnknownMode(p.mode))
            }
            "set_search_query" => {
                let p: SearchParams = params(method, value)?;
                Ok(Self::SetSearchQuery(p.text))
            }
            "toggle_camera" => Ok(Self::ToggleCamera),
            "resize" => {
                let p: ResizeParams = params(method, value)?;
                if !(p.width.is_finite() && p.height.is_finite()) || p.width < 0.0 || p.height < 0.0
                {
                    return Err(CommandError::InvalidParams {
                        method: method.to_string(),
                        reason: format!("bad size {}x{}", p.width, p.height),
                    });
                }
                Ok(Self::Resize {
                    width: p.width,
                    height: p.height,
                })
            }
            "teardown" => Ok(Self::Teardown),
            other => Err(CommandError::UnknownMethod(other.to_string())),
        }
    }
}

/// Input stage: apply every queued command in arrival order.
#[allow(clippy::too_many_arguments)]
pub fn apply_viewer_commands(
    mut queue: EventReader<ViewerCommand>,
    mut filters: ResMut<FilterConfig>,
    mut modes: ResMut<ActiveModes>,
    mut search: ResMut<SearchQuery>,
    mut camera: ResMut<CameraController>,
    mut viewport: ResMut<ViewportSize>,
    mut frame_loop: ResMut<FrameLoop>,
) {
    let mut torn_down = false;
    for command in queue.read() {
        if torn_down {
            // Nothing after a teardown is applied.
            continue;
        }
        debug!("Command: {:?}", command);
        match command {
            ViewerCommand::SetFilter(update) => filters.apply(*update),
            ViewerCommand::ToggleMode(mode) => {
                modes.toggle(*mode);
            }
            ViewerCommand::SetSearchQuery(text) => {
                if search.0 != *text {
                    search.0 = text.clone();
                }
            }
            ViewerCommand::ToggleCamera => {
                camera.toggle();
            }
            ViewerCommand::Resize { width, height } => {
                let next = ViewportSize::new(*width, *height);
                if *viewport != next {
                    *viewport = next;
                }
            }
            ViewerCommand::Teardown => {
                frame_loop.cancel();
                torn_down = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::CameraMode;
    use crate::engine::filter::MagnitudeType;
    use serde_json::json;

    #[test]
    fn bridge_methods_parse_into_commands() {
        assert_eq!(
            ViewerCommand::parse("set_filter", &json!({"key": "magnitude", "value": 4.5})),
            Ok(ViewerCommand::SetFilter(FilterUpdate::Magnitude(4.5)))
        );
        assert_eq!(
            ViewerCommand::parse("toggle_mode", &json!({"mode": "solarSystem"})),
            Ok(ViewerCommand::ToggleMode(ViewMode::SolarSystem))
        );
        assert_eq!(
            ViewerCommand::parse("resize", &json!({"width": 800, "height": 600})),
            Ok(ViewerCommand::Resize {
                width: 800.0,
                height: 600.0
            })
        );
        assert_eq!(
            ViewerCommand::parse("toggle_camera", &json!({})),
            Ok(ViewerCommand::ToggleCamera)
        );
    }

    #[test]
    fn bad_commands_are_rejected() {
        assert_eq!(
            ViewerCommand::parse("toggle_mode", &json!({"mode": "nebulae"})),
            Err(CommandError::UnknownMode("nebulae".to_string()))
        );
        assert!(matches!(
            ViewerCommand::parse("set_filter", &json!({"key": "colour", "value": 1})),
            Err(CommandError::Filter(FilterUpdateError::UnknownKey(_)))
        ));
        assert!(matches!(
            ViewerCommand::parse("set_search_query", &json!({})),
            Err(CommandError::InvalidParams { .. })
        ));
        assert!(matches!(
            ViewerCommand::parse("resize", &json!({"width": -1, "height": 10})),
            Err(CommandError::InvalidParams { .. })
        ));
        assert_eq!(
            ViewerCommand::parse("explode", &json!({})),
            Err(CommandError::UnknownMethod("explode".to_string()))
        );
    }

    fn command_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ViewerCommand>()
            .init_resource::<FilterConfig>()
            .init_resource::<ActiveModes>()
            .init_resource::<SearchQuery>()
            .init_resource::<CameraController>()
            .init_resource::<ViewportSize>()
            .init_resource::<FrameLoop>()
            .add_systems(Update, apply_viewer_commands);
        app
    }

    #[test]
    fn queued_commands_are_applied_in_order() {
        let mut app = command_app();
        let world = app.world_mut();
        world.send_event(ViewerCommand::SetFilter(FilterUpdate::MagnitudeType(
            MagnitudeType::Absolute,
        )));
        world.send_event(ViewerCommand::ToggleMode(ViewMode::Brightest));
        world.send_event(ViewerCommand::ToggleMode(ViewMode::Hottest));
        world.send_event(ViewerCommand::ToggleMode(ViewMode::Brightest));
        world.send_event(ViewerCommand::SetSearchQuery("Cas".to_string()));
        world.send_event(ViewerCommand::ToggleCamera);
        world.send_event(ViewerCommand::Resize {
            width: 640.0,
            height: 480.0,
        });
        app.update();

        let world = app.world();
        assert_eq!(
            world.resource::<FilterConfig>().magnitude_type,
            MagnitudeType::Absolute
        );
        assert_eq!(world.resource::<ActiveModes>().tags(), vec!["hottest"]);
        assert_eq!(world.resource::<SearchQuery>().0, "Cas");
        assert_eq!(
            world.resource::<CameraController>().mode(),
            CameraMode::FreeFly
        );
        assert_eq!(
            *world.resource::<ViewportSize>(),
            ViewportSize::new(640.0, 480.0)
        );
    }

    #[test]
    fn teardown_drops_later_commands() {
        let mut app = command_app();
        let world = app.world_mut();
        world.send_event(ViewerCommand::Teardown);
        world.send_event(ViewerCommand::ToggleCamera);
        app.update();

        assert!(app.world().resource::<FrameLoop>().is_cancelled());
        assert_eq!(
            app.world().resource::<CameraController>().mode(),
            CameraMode::Orbit
        );
    }
}
