//! Icon textures for chart nodes.
//!
//! Icons are decoded once at startup from `img/<name>.png` and uploaded
//! as egui textures. A missing or undecodable file is logged and skipped;
//! the node then simply renders without an icon.

use std::collections::HashMap;
use std::path::PathBuf;

use chart_core::tree::Tree;
use tracing::{debug, warn};

pub struct IconStore {
    textures: HashMap<String, egui::TextureHandle>,
}

impl IconStore {
    /// Decodes and uploads every icon resource referenced by `tree`.
    ///
    /// Each distinct resource name is loaded once, no matter how many
    /// nodes share it. Load failures degrade to icon-less nodes.
    pub fn load(ctx: &egui::Context, tree: &Tree) -> Self {
        let mut textures = HashMap::new();
        for node in &tree.nodes {
            let Some(name) = &node.image else { continue };
            if textures.contains_key(name) {
                continue;
            }
            match decode(name) {
                Ok(image) => {
                    debug!("loaded icon {name:?}");
                    let handle =
                        ctx.load_texture(format!("icon/{name}"), image, egui::TextureOptions::LINEAR);
                    textures.insert(name.clone(), handle);
                }
                Err(err) => warn!("couldn't load icon {name:?}: {err}"),
            }
        }
        Self { textures }
    }

    pub fn get(&self, name: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(name)
    }
}

fn decode(name: &str) -> Result<egui::ColorImage, image::ImageError> {
    let path = PathBuf::from("img").join(format!("{name}.png"));
    let image = image::open(&path)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_flat_samples().as_slice(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::types::ROOT;

    #[test]
    fn missing_icon_file_degrades_to_no_texture() {
        let mut tree = Tree::new("root", "Root", "", None);
        tree.add_child(ROOT, "a", "A", "", Some("definitely-not-on-disk"));

        let ctx = egui::Context::default();
        let icons = IconStore::load(&ctx, &tree);

        assert!(icons.get("definitely-not-on-disk").is_none());
    }

    #[test]
    fn nodes_without_images_load_nothing() {
        let tree = Tree::new("root", "Root", "", None);
        let ctx = egui::Context::default();
        let icons = IconStore::load(&ctx, &tree);
        assert!(icons.textures.is_empty());
    }
}
