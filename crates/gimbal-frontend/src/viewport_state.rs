//! Viewport rendering state

use std::sync::Arc;

use egui::{Painter, Pos2, Rect, Vec2};
use gimbal_core::{SharedGizmoHandle, SharedOrbitSwitch};
use gimbal_renderer::{
    CameraConfig, GizmoEvent, OrbitCamera, RendererConfig, Scene, SceneRenderer, Transform,
    ViewportGizmo,
};
use parking_lot::Mutex;

/// Scene, camera and gizmo handle owned by the viewport
///
/// The gizmo and camera live behind their own locks because the gimbal
/// controller holds references to them; never call into the controller
/// while holding either lock.
pub struct ViewportState {
    pub scene: Scene,
    camera: Arc<Mutex<OrbitCamera>>,
    gizmo: Arc<Mutex<ViewportGizmo>>,
    renderer: SceneRenderer,
    camera_config: CameraConfig,
}

impl ViewportState {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            scene: Scene::new(config),
            camera: Arc::new(Mutex::new(OrbitCamera::from_config(&config.camera))),
            gizmo: Arc::new(Mutex::new(ViewportGizmo::new(config.gizmo.clone()))),
            renderer: SceneRenderer::new(),
            camera_config: config.camera.clone(),
        }
    }

    /// Handle to mount on the gimbal controller
    pub fn gizmo_handle(&self) -> SharedGizmoHandle {
        self.gizmo.clone()
    }

    /// Switch for the drag arbiter
    pub fn orbit_switch(&self) -> SharedOrbitSwitch {
        self.camera.clone()
    }

    pub fn reset_object(&mut self) {
        self.scene.cube.transform = Transform::IDENTITY;
    }

    /// Restore the configured camera pose, keeping the orbit switch state
    pub fn reset_view(&mut self) {
        let mut camera = self.camera.lock();
        let fresh = OrbitCamera::from_config(&self.camera_config);
        camera.target = fresh.target;
        camera.yaw = fresh.yaw;
        camera.pitch = fresh.pitch;
        camera.distance = fresh.distance;
    }

    /// Start a gizmo drag if `pointer` grabs the gizmo
    pub fn try_begin_drag(&mut self, rect: Rect, pointer: Pos2) -> Option<GizmoEvent> {
        let origin = {
            let camera = self.camera.lock();
            self.renderer.gizmo_origin(rect, &self.scene, &camera)?
        };
        let mut gizmo = self.gizmo.lock();
        if !gizmo.hit_test(pointer, origin) {
            return None;
        }
        gizmo.begin_drag(&self.scene.cube.transform)
    }

    /// Route a pointer drag to the gizmo, or to the camera if no gizmo drag is active
    ///
    /// Returns true if the gizmo took the drag.
    pub fn drag(&mut self, rect: Rect, delta: Vec2) -> bool {
        let camera = self.camera.lock();
        let mut gizmo = self.gizmo.lock();
        if gizmo.is_dragging() {
            if let Some(transform) = gizmo.drag(delta, &camera, rect.height()) {
                self.scene.cube.transform = transform;
            }
            return true;
        }
        drop(gizmo);
        drop(camera);
        self.camera.lock().rotate(delta.x, delta.y);
        false
    }

    pub fn end_drag(&mut self) -> Option<GizmoEvent> {
        self.gizmo.lock().end_drag()
    }

    pub fn zoom(&mut self, delta: f32) {
        self.camera.lock().zoom(delta);
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let camera = self.camera.lock();
        let gizmo = self.gizmo.lock();
        self.renderer.paint(painter, rect, &self.scene, &camera, &gizmo);
    }
}

pub type SharedViewportState = Arc<Mutex<ViewportState>>;
