//! Drawing and hit-testing for a laid-out chart tree.
//!
//! The tree's layout coordinates are abstract: x is the node's computed
//! horizontal position, y is its depth level. [`ViewState`] maps those to
//! screen space, and the recursive walks here turn the mapped positions
//! into connector lines, node boxes, icons and the hover overlay.

use chart_core::tree::Tree;
use chart_core::types::{NodeId, ROOT};
use glam::Vec2;

use crate::icons::IconStore;

/// Side length of a node box, in layout units.
pub const BOX_SIDE: f32 = 2.0 / 3.0;
/// Horizontal offset of a node's connector stem from its left edge.
const STEM_X: f32 = 1.0 / 3.0;
/// Vertical offset of the connector bus below a parent's level.
const BUS_Y: f32 = 5.0 / 6.0;
/// Icon side length and inset inside the node box.
const ICON_SIDE: f32 = 8.0 / 15.0;
const ICON_INSET: f32 = 1.0 / 15.0;

const BOX_FILL: egui::Color32 = egui::Color32::from_rgb(127, 138, 168);
const OVERLAY_FILL: egui::Color32 = egui::Color32::from_rgb(69, 71, 79);
const OVERLAY_PAD: f32 = 12.0;
const NAME_FONT: f32 = 24.0;
const DESCRIPTION_FONT: f32 = 14.0;

/// Screen-space mapping for one frame.
///
/// Rebuilt every frame from the viewer's pan/scale state and the canvas
/// rectangle; draw and hit-test calls receive it explicitly instead of
/// reading globals.
#[derive(Clone, Copy, Debug)]
pub struct ViewState {
    pub rect: egui::Rect,
    pub pan: egui::Vec2,
    pub scale: f32,
}

impl ViewState {
    /// Maps a layout-space point (x = horizontal position, y = level) to
    /// screen space. `pan == 0` centers layout origin on the canvas.
    pub fn world_to_screen(&self, p: Vec2) -> egui::Pos2 {
        let center = self.rect.center();
        egui::pos2(
            center.x + p.x * self.scale + self.pan.x,
            center.y + p.y * self.scale + self.pan.y,
        )
    }

    /// Inverse of [`ViewState::world_to_screen`].
    pub fn screen_to_world(&self, p: egui::Pos2) -> Vec2 {
        let center = self.rect.center();
        Vec2::new(
            (p.x - center.x - self.pan.x) / self.scale,
            (p.y - center.y - self.pan.y) / self.scale,
        )
    }

    /// The screen rectangle of a node's box at the given level.
    pub fn node_rect(&self, pos: f32, level: f32) -> egui::Rect {
        let min = self.world_to_screen(Vec2::new(pos, level));
        let side = BOX_SIDE * self.scale;
        egui::Rect::from_min_size(min, egui::vec2(side, side))
    }
}

/// Draws the whole tree: connector lines first, then each node's box and
/// icon, recursing a level deeper per generation.
pub fn draw_tree(painter: &egui::Painter, tree: &Tree, icons: &IconStore, view: &ViewState) {
    draw_node(painter, tree, icons, view, ROOT, 0.0);
}

fn draw_node(
    painter: &egui::Painter,
    tree: &Tree,
    icons: &IconStore,
    view: &ViewState,
    id: NodeId,
    level: f32,
) {
    let node = &tree.nodes[id];
    let stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);

    if !node.children.is_empty() {
        let bus_y = level + BUS_Y;
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;

        for &child in &node.children {
            let stem_x = tree.nodes[child].pos + STEM_X;
            painter.line_segment(
                [
                    view.world_to_screen(Vec2::new(stem_x, bus_y)),
                    view.world_to_screen(Vec2::new(stem_x, bus_y + 0.5)),
                ],
                stroke,
            );
            min_x = min_x.min(stem_x);
            max_x = max_x.max(stem_x);
            draw_node(painter, tree, icons, view, child, level + 1.0);
        }

        let own_x = node.pos + STEM_X;
        painter.line_segment(
            [
                view.world_to_screen(Vec2::new(own_x, bus_y - 0.5)),
                view.world_to_screen(Vec2::new(own_x, bus_y)),
            ],
            stroke,
        );

        // The horizontal bus only exists once there are stems to join.
        if node.children.len() > 1 {
            painter.line_segment(
                [
                    view.world_to_screen(Vec2::new(min_x, bus_y)),
                    view.world_to_screen(Vec2::new(max_x, bus_y)),
                ],
                stroke,
            );
        }
    }

    painter.rect_filled(view.node_rect(node.pos, level), 0.0, BOX_FILL);

    if let Some(name) = &node.image
        && let Some(texture) = icons.get(name)
    {
        let icon_rect = egui::Rect::from_min_size(
            view.world_to_screen(Vec2::new(node.pos + ICON_INSET, level + ICON_INSET)),
            egui::Vec2::splat(ICON_SIDE * view.scale),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture.id(), icon_rect, uv, egui::Color32::WHITE);
    }
}

/// Finds the node under `pointer`, if any.
///
/// Every node is eligible: the walk tests boxes in pre-order traversal
/// order and the first hit wins. A parent that misses never prevents its
/// children (or later siblings) from matching.
pub fn hit_test(tree: &Tree, view: &ViewState, pointer: egui::Pos2) -> Option<NodeId> {
    hit_test_node(tree, view, ROOT, 0.0, pointer)
}

fn hit_test_node(
    tree: &Tree,
    view: &ViewState,
    id: NodeId,
    level: f32,
    pointer: egui::Pos2,
) -> Option<NodeId> {
    if view.node_rect(tree.nodes[id].pos, level).contains(pointer) {
        return Some(id);
    }
    for &child in &tree.nodes[id].children {
        if let Some(hit) = hit_test_node(tree, view, child, level + 1.0, pointer) {
            return Some(hit);
        }
    }
    None
}

/// Draws the info panel for the node under `pointer`, anchored at the
/// pointer itself: name on top, description below, on a padded dark box.
pub fn draw_overlay(painter: &egui::Painter, tree: &Tree, view: &ViewState, pointer: egui::Pos2) {
    let Some(id) = hit_test(tree, view, pointer) else {
        return;
    };
    let node = &tree.nodes[id];

    let name = painter.layout_no_wrap(
        node.name.clone(),
        egui::FontId::proportional(NAME_FONT),
        egui::Color32::WHITE,
    );
    let description = painter.layout_no_wrap(
        node.description.clone(),
        egui::FontId::proportional(DESCRIPTION_FONT),
        egui::Color32::WHITE,
    );

    let width = name.size().x.max(description.size().x) + 2.0 * OVERLAY_PAD;
    let height = name.size().y + description.size().y + 3.0 * OVERLAY_PAD;
    painter.rect_filled(
        egui::Rect::from_min_size(pointer, egui::vec2(width, height)),
        4.0,
        OVERLAY_FILL,
    );

    let name_height = name.size().y;
    painter.galley(
        pointer + egui::vec2(OVERLAY_PAD, OVERLAY_PAD),
        name,
        egui::Color32::WHITE,
    );
    painter.galley(
        pointer + egui::vec2(OVERLAY_PAD, 2.0 * OVERLAY_PAD + name_height),
        description,
        egui::Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::layout;
    use chart_core::tree::Tree;

    fn test_view() -> ViewState {
        ViewState {
            rect: egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0)),
            pan: egui::Vec2::ZERO,
            scale: 96.0,
        }
    }

    fn two_child_tree() -> Tree {
        let mut tree = Tree::new("root", "Root", "the root", None);
        tree.add_child(ROOT, "a", "A", "left child", None);
        tree.add_child(ROOT, "b", "B", "right child", None);
        layout::layout(&mut tree);
        tree
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut view = test_view();
        // Non-trivial pan and scale to exercise the math.
        view.pan = egui::vec2(33.0, -12.5);
        view.scale = 72.0;

        let world_points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.5, 1.0),
            Vec2::new(-1.75, 3.0),
        ];
        let eps = 1e-4;

        for p in world_points {
            let screen = view.world_to_screen(p);
            let back = view.screen_to_world(screen);
            assert!(
                (back.x - p.x).abs() < eps && (back.y - p.y).abs() < eps,
                "roundtrip mismatch: p={p:?}, back={back:?}"
            );
        }
    }

    #[test]
    fn zero_pan_puts_layout_origin_at_canvas_center() {
        let view = test_view();
        assert_eq!(view.world_to_screen(Vec2::ZERO), view.rect.center());
    }

    #[test]
    fn node_rect_is_scaled_box_side() {
        let view = test_view();
        let rect = view.node_rect(0.0, 0.0);
        assert_eq!(rect.width(), BOX_SIDE * 96.0);
        assert_eq!(rect.height(), BOX_SIDE * 96.0);
        assert_eq!(rect.min, view.world_to_screen(Vec2::ZERO));
    }

    #[test]
    fn pointer_inside_one_box_resolves_to_that_node_only() {
        let tree = two_child_tree();
        let view = test_view();

        // Center of child "a"'s box (child level is 1).
        let a = tree.nodes[ROOT].children[0];
        let pointer = view.node_rect(tree.nodes[a].pos, 1.0).center();

        // Exactly one node's box contains the pointer.
        let mut containing = 0;
        for (id, node) in tree.nodes.iter().enumerate() {
            let level = if id == ROOT { 0.0 } else { 1.0 };
            if view.node_rect(node.pos, level).contains(pointer) {
                containing += 1;
            }
        }
        assert_eq!(containing, 1);

        assert_eq!(hit_test(&tree, &view, pointer), Some(a));
        assert_eq!(tree.nodes[a].name, "A");
        assert_eq!(tree.nodes[a].description, "left child");
    }

    #[test]
    fn pointer_outside_every_box_misses() {
        let tree = two_child_tree();
        let view = test_view();
        assert_eq!(hit_test(&tree, &view, egui::pos2(1.0, 1.0)), None);
    }

    #[test]
    fn hit_order_is_pre_order_first_match() {
        let tree = two_child_tree();
        let view = test_view();

        let pointer = view.node_rect(tree.nodes[ROOT].pos, 0.0).center();
        assert_eq!(hit_test(&tree, &view, pointer), Some(ROOT));

        let b = tree.nodes[ROOT].children[1];
        let pointer = view.node_rect(tree.nodes[b].pos, 1.0).center();
        assert_eq!(hit_test(&tree, &view, pointer), Some(b));
    }
}
