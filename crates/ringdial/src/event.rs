use crate::geometry::Point;
use crate::surface::EventKind;

#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    Mouse { client: Point },
    /// Active touch points in client coordinates; only the first one is used.
    Touch { touches: Vec<Point> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(kind: EventKind, client: Point) -> Self {
        Self {
            kind,
            source: PointerSource::Mouse { client },
        }
    }

    pub fn touch(kind: EventKind, touches: Vec<Point>) -> Self {
        Self {
            kind,
            source: PointerSource::Touch { touches },
        }
    }

    pub fn client_position(&self) -> Option<Point> {
        match &self.source {
            PointerSource::Mouse { client } => Some(*client),
            PointerSource::Touch { touches } => touches.first().copied(),
        }
    }
}
