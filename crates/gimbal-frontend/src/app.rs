//! Main application

use std::sync::Arc;
use std::time::{Duration, Instant};

use egui::Color32;
use gimbal_core::{GimbalController, KeyBus};
use parking_lot::Mutex;

use crate::app_state::{AppAction, AppState, SharedAppState};
use crate::config::{SharedConfig, UiTheme, create_shared_config};
use crate::input::KeyBridge;
use crate::panels::{ModeSelectorPanel, Panel, ViewportPanel};
use crate::viewport_state::{SharedViewportState, ViewportState};

/// Gimbal cube application
pub struct GimbalApp {
    config: SharedConfig,
    keys: KeyBus,
    key_bridge: KeyBridge,
    app_state: SharedAppState,
    viewport_state: SharedViewportState,
    mode_selector: ModeSelectorPanel,
    viewport: ViewportPanel,
}

impl GimbalApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();
        let (renderer_config, editor_config, ui_config) = {
            let cfg = config.read();
            let c = cfg.config();
            (c.renderer.clone(), c.editor.clone(), c.ui.clone())
        };

        cc.egui_ctx.set_visuals(ui_config.theme.visuals());
        cc.egui_ctx.set_zoom_factor(ui_config.font_size.clamp(0.5, 3.0));

        let viewport_state = Arc::new(Mutex::new(ViewportState::new(&renderer_config)));
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        controller.set_drag_timeout(editor_config.drag_timeout());
        {
            let vp = viewport_state.lock();
            controller.attach_orbit_switch(vp.orbit_switch());
            controller.mount_handle(&vp.gizmo_handle());
        }

        tracing::info!("Gimbal controller ready");

        Self {
            config,
            keys,
            key_bridge: KeyBridge::new(),
            app_state: Arc::new(Mutex::new(AppState::new(controller))),
            viewport: ViewportPanel::new(viewport_state.clone()),
            viewport_state,
            mode_selector: ModeSelectorPanel::new(ui_config.theme),
        }
    }

    fn dispatch_keys(&mut self, ctx: &egui::Context) {
        for event in self.key_bridge.collect(ctx) {
            self.keys.dispatch(&event);
        }
    }

    fn process_actions(&mut self, ctx: &egui::Context) {
        let actions = self.app_state.lock().take_actions();
        for action in actions {
            tracing::debug!("Action: {:?}", action);
            match action {
                AppAction::SelectMode(mode) => self.app_state.lock().controller.select_mode(mode),
                AppAction::ToggleSnap => self.app_state.lock().controller.toggle_snap(),
                AppAction::ToggleOrientation => {
                    self.app_state.lock().controller.toggle_orientation()
                }
                AppAction::SetTheme(theme) => self.set_theme(ctx, theme),
                AppAction::ResetObject => self.viewport_state.lock().reset_object(),
                AppAction::ResetView => self.viewport_state.lock().reset_view(),
                AppAction::ResetSettings => self.reset_settings(ctx),
            }
        }
    }

    fn reset_settings(&mut self, ctx: &egui::Context) {
        let (editor, ui) = {
            let mut config = self.config.write();
            config.reset_to_defaults();
            (config.config().editor.clone(), config.config().ui.clone())
        };
        ctx.set_visuals(ui.theme.visuals());
        ctx.set_zoom_factor(ui.font_size.clamp(0.5, 3.0));
        self.mode_selector.set_theme(ui.theme);
        self.app_state
            .lock()
            .controller
            .set_drag_timeout(editor.drag_timeout());
        tracing::info!("Settings reset to defaults");
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: UiTheme) {
        ctx.set_visuals(theme.visuals());
        self.config.write().config_mut().ui.theme = theme;
    }
}

/// Run the drag watchdog and end the gizmo drag if it released the camera
///
/// Returns true if the watchdog fired.
fn tick_drag_watchdog(
    app_state: &SharedAppState,
    viewport_state: &SharedViewportState,
    now: Instant,
) -> bool {
    let fired = app_state.lock().controller.tick(now);
    if fired && viewport_state.lock().end_drag().is_some() {
        tracing::warn!("Cancelled gizmo drag after watchdog release");
    }
    fired
}

impl eframe::App for GimbalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dispatch_keys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.viewport.ui(ui, &self.app_state);
            });

        egui::Window::new(self.mode_selector.name())
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .frame(
                egui::Frame::none()
                    .fill(Color32::from_black_alpha(178))
                    .inner_margin(10.0)
                    .rounding(5.0),
            )
            .show(ctx, |ui| {
                self.mode_selector.ui(ui, &self.app_state);
            });

        self.process_actions(ctx);

        tick_drag_watchdog(&self.app_state, &self.viewport_state, Instant::now());
        if self.app_state.lock().controller.snapshot().dragging {
            // Keep ticking so the drag watchdog can fire without input
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl Drop for GimbalApp {
    fn drop(&mut self) {
        if let Err(e) = self.config.write().save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}
