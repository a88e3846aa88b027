use crate::engine::camera::CameraController;
use crate::engine::picking::PickThrottle;
use crate::engine::scene::StarFieldMaterial;
use crate::engine::scene::manager::{SceneNodes, clear_scene};
use bevy::prelude::*;

/// Per-frame stages of the `Update` schedule, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameStage {
    /// Commands, pointer and keyboard input, picking.
    Input,
    /// Filter recompute and scene reconciliation.
    Recompute,
    /// Camera integration and pose write-back.
    Integrate,
    /// Orbits and constellation line sync.
    Animate,
}

/// Frame counter and cancellation flag of the viewer loop.
#[derive(Resource, Debug, Default)]
pub struct FrameLoop {
    tick: u64,
    cancelled: bool,
    torn_down: bool,
}

impl FrameLoop {
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        if !self.cancelled {
            info!("Frame loop cancelled at tick {}", self.tick);
        }
        self.cancelled = true;
    }
}

/// Run condition for every frame stage.
pub fn frame_loop_running(frame_loop: Res<FrameLoop>) -> bool {
    !frame_loop.cancelled
}

pub fn configure_frame_stages(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameStage::Input,
            FrameStage::Recompute,
            FrameStage::Integrate,
            FrameStage::Animate,
        )
            .chain(),
    );
    for stage in [
        FrameStage::Input,
        FrameStage::Recompute,
        FrameStage::Integrate,
        FrameStage::Animate,
    ] {
        app.configure_sets(Update, stage.run_if(frame_loop_running));
    }
}

pub fn advance_frame(mut frame_loop: ResMut<FrameLoop>) {
    frame_loop.tick += 1;
}

/// Runs once after cancellation: drops input state, releases the scene and
/// asks the app to exit. The frame stages stop running from the next tick.
#[allow(clippy::too_many_arguments)]
pub fn teardown_viewer(
    mut commands: Commands,
    mut frame_loop: ResMut<FrameLoop>,
    mut camera: ResMut<CameraController>,
    mut throttle: ResMut<PickThrottle>,
    mut nodes: ResMut<SceneNodes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut star_materials: ResMut<Assets<StarFieldMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut exit: EventWriter<AppExit>,
) {
    if !frame_loop.cancelled || frame_loop.torn_down {
        return;
    }
    camera.stop_listening();
    throttle.reset();
    clear_scene(
        &mut commands,
        &mut nodes,
        &mut meshes,
        &mut star_materials,
        &mut materials,
    );
    frame_loop.torn_down = true;
    info!("Viewer torn down");
    exit.write(AppExit::Success);
}
