use crate::types::{NodeId, ROOT};

#[derive(Debug)]
pub struct ChartNode {
    pub key: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub pos: f32,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct Tree {
    pub nodes: Vec<ChartNode>,
}

impl ChartNode {
    pub fn new_root(key: &str, name: &str, description: &str, image: Option<&str>) -> Self {
        Self {
            key: key.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            image: image.map(str::to_owned),
            pos: 0.0,
            parent: None,
            children: Vec::with_capacity(4),
        }
    }

    pub fn new_child(
        key: &str,
        name: &str,
        description: &str,
        image: Option<&str>,
        parent: NodeId,
    ) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new_root(key, name, description, image)
        }
    }
}

impl Tree {
    pub fn new(key: &str, name: &str, description: &str, image: Option<&str>) -> Self {
        Self {
            nodes: vec![ChartNode::new_root(key, name, description, image)],
        }
    }

    pub fn root(&self) -> &ChartNode {
        &self.nodes[ROOT]
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        key: &str,
        name: &str,
        description: &str,
        image: Option<&str>,
    ) -> NodeId {
        let id: usize = self.nodes.len();
        self.nodes
            .push(ChartNode::new_child(key, name, description, image, parent));
        self.nodes[parent].children.push(id);
        id
    }

    /// Adds `delta` to this node's position and to every descendant's.
    pub fn shift_by(&mut self, id: NodeId, delta: f32) {
        self.nodes[id].pos += delta;
        for i in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[i];
            self.shift_by(child, delta);
        }
    }

    /// Re-anchors this node at `target`, dragging its whole subtree along.
    pub fn move_to(&mut self, id: NodeId, target: f32) {
        let delta = target - self.nodes[id].pos;
        for i in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[i];
            self.shift_by(child, delta);
        }
        self.nodes[id].pos = target;
    }
}
