//! 3D viewport panel

use std::time::Instant;

use gimbal_renderer::GizmoEvent;

use crate::app_state::SharedAppState;
use crate::panels::Panel;
use crate::viewport_state::SharedViewportState;

/// Viewport showing the cube; routes pointer drags to the gizmo or the camera
pub struct ViewportPanel {
    viewport_state: SharedViewportState,
}

impl ViewportPanel {
    pub fn new(viewport_state: SharedViewportState) -> Self {
        Self { viewport_state }
    }

    fn forward(app_state: &SharedAppState, event: GizmoEvent) {
        let state = app_state.lock();
        let result = match event {
            GizmoEvent::DragStarted => state.controller.on_drag_start(),
            GizmoEvent::DragEnded => state.controller.on_drag_end(),
        };
        if let Err(e) = result {
            tracing::warn!("Ignoring unmatched gizmo {:?}: {}", event, e);
        }
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "Viewport"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        // Gizmo events are forwarded after the viewport lock is released
        let mut events = Vec::new();
        let mut gizmo_moved = false;
        {
            let mut vp = self.viewport_state.lock();

            if response.drag_started()
                && let Some(pointer) = response.interact_pointer_pos()
                && let Some(event) = vp.try_begin_drag(rect, pointer)
            {
                events.push(event);
            }

            if response.dragged() {
                gizmo_moved = vp.drag(rect, response.drag_delta());
            }

            if response.drag_stopped()
                && let Some(event) = vp.end_drag()
            {
                events.push(event);
            }

            if response.hovered() {
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll != 0.0 {
                    vp.zoom(scroll);
                }
            }

            vp.paint(&painter, rect);
        }

        for event in events {
            Self::forward(app_state, event);
        }
        // No-op once the drag has ended
        if gizmo_moved {
            app_state.lock().controller.on_drag_moved(Instant::now());
        }
    }
}
