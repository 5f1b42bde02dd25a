//! Retained, in-memory [`RenderSurface`]: a node tree with typed attributes and a listener
//! registry. Hosts paint it and route input through [`Scene::dispatch`]; it also renders
//! to a standalone SVG document.

use crate::geometry::{DisplayNumber, Rect};
use crate::surface::{
    Attribute, ElementKind, EventKind, EventTarget, ListenerId, NodeId, RenderSurface,
};
use std::collections::BTreeMap;
use std::fmt;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: ElementKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub attributes: BTreeMap<&'static str, Attribute>,
    pub text: Option<String>,
}

impl Node {
    fn new(kind: ElementKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    bounds: Rect,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: vec![Some(Node::new(ElementKind::Svg, None))],
            root: NodeId::from(0),
            bounds: Rect::new(0.0, 0.0, width, height),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(usize::from(id)).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(usize::from(id)).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&Attribute> {
        self.node(id)?.attribute(key)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.text.as_deref()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Every live node below the root in document (painting) order.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Listeners that an event of `kind` at `target` reaches, in registration order.
    pub fn dispatch(&self, target: EventTarget, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.id)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_at(&self, target: EventTarget) -> usize {
        self.listeners.iter().filter(|l| l.target == target).count()
    }

    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = vec![id];
        let mut i = 0;
        while i < ids.len() {
            ids.extend(self.children(ids[i]));
            i += 1;
        }
        ids
    }

    pub fn svg(&self) -> SvgDocument<'_> {
        SvgDocument(self)
    }
}

impl RenderSurface for Scene {
    fn bounding_box(&self, _node: NodeId) -> Rect {
        // one coordinate space for the whole canvas
        self.bounds
    }

    fn first_child(&self, parent: NodeId, kind: ElementKind) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).is_some_and(|n| n.kind == kind))
    }

    fn count_children(&self, parent: NodeId, kind: ElementKind) -> usize {
        self.children(parent)
            .iter()
            .filter(|&&c| self.node(c).is_some_and(|n| n.kind == kind))
            .count()
    }

    fn create(&mut self, parent: NodeId, kind: ElementKind) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(Some(Node::new(kind, Some(parent))));
        match self.node_mut(parent) {
            Some(p) => p.children.push(id),
            None => log::warn!("{kind} {id} created under missing parent {parent}"),
        }
        id
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.contains(node) {
            return;
        }

        let removed = self.subtree(node);
        if let Some(parent) = self.node(node).and_then(|n| n.parent)
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|&c| c != node);
        }
        for id in &removed {
            if let Some(slot) = self.nodes.get_mut(usize::from(*id)) {
                *slot = None;
            }
        }
        self.listeners.retain(|l| match l.target {
            EventTarget::Element(target) => !removed.contains(&target),
            EventTarget::Document => true,
        });
    }

    fn set_attribute(&mut self, node: NodeId, attribute: Attribute) {
        if let Some(n) = self.node_mut(node) {
            n.attributes.insert(attribute.key(), attribute);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = Some(text.to_string());
        }
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId::from(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, target, kind });
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| l.id != listener);
    }
}

/// Standalone SVG rendering of a [`Scene`].
#[derive(Debug, Clone, Copy)]
pub struct SvgDocument<'a>(&'a Scene);

impl SvgDocument<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.0.node(id) else {
            return Ok(());
        };

        write!(f, "{:indent$}<{}", "", node.kind, indent = depth * 2)?;
        for attribute in node.attributes.values() {
            write_attribute(f, attribute)?;
        }

        if node.children.is_empty() && node.text.is_none() {
            return writeln!(f, "/>");
        }

        f.write_str(">")?;
        if let Some(text) = &node.text {
            f.write_str(&escape(text))?;
        }
        if !node.children.is_empty() {
            writeln!(f)?;
            for &child in &node.children {
                self.write_node(f, child, depth + 1)?;
            }
            write!(f, "{:indent$}", "", indent = depth * 2)?;
        }
        writeln!(f, "</{}>", node.kind)
    }
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            r#"<svg xmlns="{SVG_NAMESPACE}" width="{}" height="{}">"#,
            DisplayNumber(scene.bounds.width),
            DisplayNumber(scene.bounds.height)
        )?;
        for &child in scene.children(scene.root) {
            self.write_node(f, child, 1)?;
        }
        writeln!(f, "</svg>")
    }
}

fn write_attribute(f: &mut fmt::Formatter<'_>, attribute: &Attribute) -> fmt::Result {
    match attribute {
        Attribute::Fill(color) => write!(f, r#" fill="{}""#, escape(color.as_str())),
        Attribute::Stroke(color) => write!(f, r#" stroke="{}""#, escape(color.as_str())),
        Attribute::Path(path) => write!(f, r#" d="{path}""#),
        Attribute::Center(p) => write!(
            f,
            r#" cx="{}" cy="{}""#,
            DisplayNumber(p.x),
            DisplayNumber(p.y)
        ),
        Attribute::Radius(r) => write!(f, r#" r="{}""#, DisplayNumber(*r)),
        Attribute::Position(p) => write!(
            f,
            r#" x="{}" y="{}""#,
            DisplayNumber(p.x),
            DisplayNumber(p.y)
        ),
        Attribute::Size { width, height } => write!(
            f,
            r#" width="{}" height="{}""#,
            DisplayNumber(*width),
            DisplayNumber(*height)
        ),
        Attribute::FontSize(size) => write!(f, r#" font-size="{}""#, DisplayNumber(*size)),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_create_and_query_children() {
        let mut scene = Scene::new(300.0, 300.0);
        let root = scene.root();
        assert_eq!(scene.first_child(root, ElementKind::Group), None);

        let path = scene.create(root, ElementKind::Path);
        let group = scene.create(root, ElementKind::Group);
        scene.create(group, ElementKind::Text);
        scene.create(group, ElementKind::Text);
        scene.create(group, ElementKind::Rect);

        assert_eq!(scene.first_child(root, ElementKind::Group), Some(group));
        assert_eq!(scene.count_children(group, ElementKind::Text), 2);
        assert_eq!(scene.paint_order()[0], path);
        assert_eq!(scene.paint_order().len(), 5);
    }

    #[test]
    fn test_attributes_replace_by_key() {
        let mut scene = Scene::new(10.0, 10.0);
        let circle = scene.create(scene.root(), ElementKind::Circle);
        scene.set_attribute(circle, Attribute::Radius(2.0));
        scene.set_attribute(circle, Attribute::Radius(3.0));
        assert_eq!(scene.attribute(circle, "r"), Some(&Attribute::Radius(3.0)));
    }

    #[test]
    fn test_listener_dispatch_and_removal() {
        let mut scene = Scene::new(10.0, 10.0);
        let path = scene.create(scene.root(), ElementKind::Path);

        let press = scene.listen(EventTarget::Element(path), EventKind::Press);
        let doc_move = scene.listen(EventTarget::Document, EventKind::Move);

        assert_eq!(
            scene.dispatch(EventTarget::Element(path), EventKind::Press),
            vec![press]
        );
        assert_eq!(
            scene.dispatch(EventTarget::Document, EventKind::Move),
            vec![doc_move]
        );
        assert!(
            scene
                .dispatch(EventTarget::Element(path), EventKind::Move)
                .is_empty()
        );

        scene.unlisten(doc_move);
        assert!(
            scene
                .dispatch(EventTarget::Document, EventKind::Move)
                .is_empty()
        );
        assert_eq!(scene.listener_count(), 1);
    }

    #[test]
    fn test_remove_drops_subtree_and_its_listeners() {
        let mut scene = Scene::new(10.0, 10.0);
        let group = scene.create(scene.root(), ElementKind::Group);
        let text = scene.create(group, ElementKind::Text);
        scene.listen(EventTarget::Element(text), EventKind::Click);
        scene.listen(EventTarget::Document, EventKind::Release);

        scene.remove(group);
        assert!(!scene.contains(group));
        assert!(!scene.contains(text));
        assert!(scene.children(scene.root()).is_empty());
        assert_eq!(scene.listener_count(), 1);

        scene.remove(scene.root());
        assert!(scene.contains(scene.root()));
    }

    #[test]
    fn test_svg_export() {
        let mut scene = Scene::new(200.0, 100.0);
        let group = scene.create(scene.root(), ElementKind::Group);
        let text = scene.create(group, ElementKind::Text);
        scene.set_attribute(text, Attribute::Position(Point::new(4.0, 8.5)));
        scene.set_text(text, "a < b");
        let circle = scene.create(scene.root(), ElementKind::Circle);
        scene.set_attribute(circle, Attribute::Center(Point::new(1.0, 2.0)));
        scene.set_attribute(circle, Attribute::Fill("tomato".parse().unwrap()));

        let svg = scene.svg().to_string();
        assert_eq!(
            svg,
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"100\">\n",
                "  <g>\n",
                "    <text x=\"4\" y=\"8.5\">a &lt; b</text>\n",
                "  </g>\n",
                "  <circle cx=\"1\" cy=\"2\" fill=\"tomato\"/>\n",
                "</svg>\n",
            )
        );
    }
}
