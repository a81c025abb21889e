//! Interactive chart viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the laid-out chart tree
//! and its icon textures, and implements [`eframe::App`] to render the
//! diagram and handle pan/zoom/hover interaction.

use chart_core::tree::Tree;
use eframe::App;

use crate::icons::IconStore;
use crate::render::{self, ViewState};

/// Default scale: screen pixels per layout unit.
const DEFAULT_SCALE: f32 = 96.0;
const MIN_SCALE: f32 = 12.0;
const MAX_SCALE: f32 = 384.0;

/// Main application state for the chart viewer.
///
/// [`Viewer`] glues together:
/// - The chart data: a laid-out [`Tree`] and its [`IconStore`].
/// - View state (pan offset, scale, fullscreen flag).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The tree is read-only after construction; input only ever mutates the
/// screen-space mapping. Per-frame update:
/// 1. Keys: Space recenters, F11 toggles fullscreen.
/// 2. Canvas: right-button drag pans, scroll zooms around the cursor.
/// 3. Draw walk, then the hover overlay for the node under the pointer.
///
/// ### Fields
/// - `tree` - The chart being displayed, positions already computed.
/// - `icons` - Uploaded icon textures, keyed by resource name.
/// - `status` - One-line load status shown in the status bar.
///
/// - `pan` - Screen-space pan offset in pixels; zero means the layout
///   origin sits at the canvas center.
/// - `scale` - Pixels per layout unit.
/// - `fullscreen` - Tracks the F11 toggle state.
pub struct Viewer {
    tree: Tree,
    icons: IconStore,
    status: String,

    pan: egui::Vec2,
    scale: f32,
    fullscreen: bool,
}

impl Viewer {
    /// Creates a viewer for an already laid-out tree.
    ///
    /// Icon resources are decoded and uploaded here, eagerly, because the
    /// texture upload needs the egui context; from then on every frame is
    /// pure drawing.
    pub fn new(ctx: &egui::Context, tree: Tree, status: String) -> Self {
        let icons = IconStore::load(ctx, &tree);
        Self {
            tree,
            icons,
            status,
            pan: egui::Vec2::ZERO,
            scale: DEFAULT_SCALE,
            fullscreen: false,
        }
    }

    fn view(&self, rect: egui::Rect) -> ViewState {
        ViewState {
            rect,
            pan: self.pan,
            scale: self.scale,
        }
    }

    /// Rescales around `pointer` so the world point under the cursor
    /// stays put on screen.
    fn zoom_at(&mut self, rect: egui::Rect, pointer: egui::Pos2, scroll: f32) {
        let world_before = self.view(rect).screen_to_world(pointer);

        let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);

        let screen_after = self.view(rect).world_to_screen(world_before);
        self.pan += pointer - screen_after;
    }

    /// Global key handling: Space recenters, F11 toggles fullscreen.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.pan = egui::Vec2::ZERO;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            self.fullscreen = !self.fullscreen;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
        }
    }

    /// Builds the bottom status bar (load status, node count).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("nodes = {}", self.tree.nodes.len()));
                ui.separator();
                ui.label(self.status.as_str());
            });
        });
    }

    /// Builds the central canvas where the chart is drawn and interacted
    /// with.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with right-button drag.
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer = response.hover_pos().unwrap_or(rect.center());
                self.zoom_at(rect, pointer, scroll);
            }

            let view = self.view(rect);
            render::draw_tree(&painter, &self.tree, &self.icons, &view);

            if let Some(pointer) = response.hover_pos() {
                render::draw_overlay(&painter, &self.tree, &view, pointer);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
