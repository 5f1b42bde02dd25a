//! The drawing and event-subscription contract sliders render through.

use crate::color::Color;
use crate::geometry::{PathDescription, Point, Rect};
use derive_more::{Display, From, Into};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("node#{_0}")]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("listener#{_0}")]
pub struct ListenerId(u64);

/// Node kinds, displayed as their SVG tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    Svg,
    #[strum(serialize = "g")]
    Group,
    Path,
    Circle,
    Rect,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Press,
    Move,
    Release,
    Click,
}

/// Where a listener is attached. `Document` receives events wherever the pointer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Element(NodeId),
    Document,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Fill(Color),
    Stroke(Color),
    Path(PathDescription),
    Center(Point),
    Radius(f64),
    Position(Point),
    Size { width: f64, height: f64 },
    FontSize(f64),
}

impl Attribute {
    /// Storage key; setting an attribute replaces any earlier one with the same key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Fill(_) => "fill",
            Self::Stroke(_) => "stroke",
            Self::Path(_) => "d",
            Self::Center(_) => "center",
            Self::Radius(_) => "r",
            Self::Position(_) => "position",
            Self::Size { .. } => "size",
            Self::FontSize(_) => "font-size",
        }
    }
}

pub trait RenderSurface {
    /// Bounding box of `node` in client coordinates.
    fn bounding_box(&self, node: NodeId) -> Rect;

    fn first_child(&self, parent: NodeId, kind: ElementKind) -> Option<NodeId>;

    fn count_children(&self, parent: NodeId, kind: ElementKind) -> usize;

    /// Creates a node of `kind` and appends it as the last child of `parent`.
    fn create(&mut self, parent: NodeId, kind: ElementKind) -> NodeId;

    /// Detaches `node` and its subtree, dropping listeners attached to any of them.
    fn remove(&mut self, node: NodeId);

    fn set_attribute(&mut self, node: NodeId, attribute: Attribute);

    fn set_text(&mut self, node: NodeId, text: &str);

    /// Subscribes to `kind` events at `target`. The returned id is the only handle that
    /// removes the subscription again.
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId;

    fn unlisten(&mut self, listener: ListenerId);
}
