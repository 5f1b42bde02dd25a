//! Circular stepped slider: ring geometry, value/angle mapping and the pointer interaction
//! state machine, drawn through a [`surface::RenderSurface`].

pub mod color;
pub mod error;
pub mod event;
pub mod geometry;
pub mod options;
pub mod range;
pub mod scene;
pub mod slider;
pub mod surface;

pub use color::Color;
pub use error::InvalidConfiguration;
pub use event::{PointerEvent, PointerSource};
pub use geometry::{PathDescription, Point, Rect, RingSegment};
pub use options::{Options, SliderSpec};
pub use range::{Snap, StepRange};
pub use scene::Scene;
pub use slider::{DragState, Slider, SliderUpdate};
pub use surface::{
    Attribute, ElementKind, EventKind, EventTarget, ListenerId, NodeId, RenderSurface,
};
