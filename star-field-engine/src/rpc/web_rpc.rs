use crate::engine::camera::{CameraController, CameraMode};
use crate::engine::catalog::Star;
use crate::engine::filter::{ActiveModes, FilterConfig, SearchQuery, SelectedConstellation};
use crate::engine::loading::LoadingError;
use crate::engine::picking::Selection;
use crate::engine::systems::commands::apply_viewer_commands;
use crate::engine::systems::{CommandError, FrameStage, ViewerCommand};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::engine::systems::FrameLoop;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the UI.
///
/// In the browser, messages travel over `postMessage`. Native hosts and tests
/// push raw JSON with [`WebRpcInterface::inject`] and, after
/// [`WebRpcInterface::capture_outgoing`], read replies from
/// [`WebRpcInterface::take_outbox`].
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    inbox: Vec<String>,
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
    capture: bool,
    outbox: Vec<String>,
}

impl WebRpcInterface {
    /// Send notification to the UI without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the UI.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Deliver a raw JSON-RPC message as if it came from the UI.
    pub fn inject(&mut self, message: impl Into<String>) {
        self.inbox.push(message.into());
    }

    /// Keep serialised outgoing messages for [`Self::take_outbox`].
    pub fn capture_outgoing(&mut self) {
        self.capture = true;
    }

    pub fn take_outbox(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outbox)
    }
}

/// Plugin establishing the JSON-RPC bridge between the UI and the viewer.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(FrameStage::Input)
                    .before(apply_viewer_commands),
            )
            .add_systems(
                Update,
                (publish_viewer_outputs, send_outgoing_messages)
                    .chain()
                    .after(FrameStage::Animate),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener)
            .add_systems(Update, remove_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(world: &mut World) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Kept alive until teardown removes it from the window.
    world.insert_non_send_resource(MessageListener(Some(closure)));
    world.insert_resource(MessageQueue(message_queue));
}

#[cfg(target_arch = "wasm32")]
struct MessageListener(Option<Closure<dyn FnMut(MessageEvent)>>);

/// Detach the window listener once the frame loop is cancelled.
#[cfg(target_arch = "wasm32")]
fn remove_message_listener(
    frame_loop: Res<FrameLoop>,
    listener: Option<NonSendMut<MessageListener>>,
) {
    if !frame_loop.is_cancelled() {
        return;
    }
    let Some(mut listener) = listener else {
        return;
    };
    if let Some(closure) = listener.0.take() {
        if let Some(window) = window() {
            if let Err(e) = window
                .remove_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to remove message listener: {:?}", e);
            }
        }
        info!("Message listener removed");
    }
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the UI.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let mut messages = std::mem::take(&mut rpc_interface.inbox);

    if let Some(queue_res) = message_queue {
        if let Ok(mut queue) = queue_res.0.lock() {
            messages.append(&mut queue);
        }
    }

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only view of the state reported by `get_state`.
#[derive(SystemParam)]
pub struct ViewerStateView<'w> {
    filters: Res<'w, FilterConfig>,
    modes: Res<'w, ActiveModes>,
    search: Res<'w, SearchQuery>,
    constellation: Res<'w, SelectedConstellation>,
    camera: Res<'w, CameraController>,
    selection: Res<'w, Selection>,
    loading_error: Res<'w, LoadingError>,
}

impl ViewerStateView<'_> {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "filters": &*self.filters,
            "modes": self.modes.tags(),
            "searchQuery": self.search.0,
            "selectedConstellation": self.constellation.0,
            "camera": camera_json(self.camera.mode()),
            "selection": selection_json(&self.selection),
            "loadingError": self.loading_error.0,
        })
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    state: ViewerStateView,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut commands: EventWriter<ViewerCommand>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &state, &mut commands) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Invalid RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    serde_json::Value::Null,
                    -32600,
                    "Invalid request",
                    Some(serde_json::json!({"reason": parse_error.to_string()})),
                ));
            }
        }
    }
}

/// Handle one request. Calls without an id are notifications and get no
/// response, but their command is still dispatched.
fn handle_rpc_request(
    request: &RpcRequest,
    state: &ViewerStateView,
    commands: &mut EventWriter<ViewerCommand>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_state" => Ok(state.to_json()),
        method => dispatch_command(method, &request.params, commands),
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn dispatch_command(
    method: &str,
    params: &serde_json::Value,
    commands: &mut EventWriter<ViewerCommand>,
) -> Result<serde_json::Value, RpcError> {
    let command = ViewerCommand::parse(method, params).map_err(|err| {
        warn!("Rejected RPC call {}: {}", method, err);
        RpcError::from(err)
    })?;
    commands.write(command);
    Ok(serde_json::json!({ "success": true }))
}

impl From<CommandError> for RpcError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::UnknownMethod(method) => Self {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": method })),
            },
            other => Self::invalid_params(&other.to_string()),
        }
    }
}

fn camera_json(mode: CameraMode) -> serde_json::Value {
    serde_json::json!({ "mode": mode, "label": mode.label() })
}

fn star_json(star: &Star) -> serde_json::Value {
    serde_json::json!({
        "id": star.id,
        "name": star.display_name(),
        "distance": star.distance,
        "magnitude": star.apparent_magnitude,
        "spectralType": star.spectral_type,
        "luminosity": star.luminosity,
        "constellation": star.constellation_code,
    })
}

fn selection_json(selection: &Selection) -> serde_json::Value {
    serde_json::json!({
        "star": selection.star().map(star_json),
        "object": selection.object(),
    })
}

/// Push selection, camera mode and loading error changes to the UI.
fn publish_viewer_outputs(
    selection: Res<Selection>,
    camera: Res<CameraController>,
    loading_error: Res<LoadingError>,
    mut last_mode: Local<Option<CameraMode>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if selection.is_changed() && !selection.is_added() {
        rpc_interface.send_notification("selection_changed", selection_json(&selection));
    }

    let mode = camera.mode();
    if *last_mode != Some(mode) {
        *last_mode = Some(mode);
        rpc_interface.send_notification("camera_mode_changed", camera_json(mode));
    }

    if loading_error.is_changed() {
        if let Some(message) = &loading_error.0 {
            rpc_interface.send_notification(
                "loading_error",
                serde_json::json!({ "message": message }),
            );
        }
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the UI.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    let rpc_interface = rpc_interface.as_mut();
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        deliver(&notification, rpc_interface.capture, &mut rpc_interface.outbox);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        deliver(&response, rpc_interface.capture, &mut rpc_interface.outbox);
    }
}

fn deliver<T: Serialize>(message: &T, capture: bool, outbox: &mut Vec<String>) {
    if capture {
        match serde_json::to_string(message) {
            Ok(json) => outbox.push(json),
            Err(e) => error!("Failed to serialize message: {}", e),
        }
    }
    send_message_to_parent(message);
}

/// Send serialized message to parent window (the UI frame).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
