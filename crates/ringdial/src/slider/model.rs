use super::view::SliderNodes;
use super::{SLIDER_WIDTH, START_ANGLE};
use crate::error::InvalidConfiguration;
use crate::event::PointerEvent;
use crate::geometry::{Point, Rect, RingSegment, radians_to_degrees};
use crate::options::Options;
use crate::range::{Snap, StepRange};
use crate::surface::{ElementKind, EventKind, EventTarget, ListenerId, RenderSurface};

/// Angle of `pointer` around `center`, in degrees, unwrapped so it lies on the sweep that
/// starts at `start_angle`.
pub fn pointer_angle(center: Point, pointer: Point, start_angle: f64) -> f64 {
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);

    let mut angle = radians_to_degrees(dy.atan2(dx));
    // atan2 is (-180, 180]; move the cut below the center
    if dy < 0.0 {
        angle += 360.0;
    }

    if start_angle < 0.0 && angle > 360.0 + start_angle {
        angle -= 360.0;
    } else if start_angle > 0.0 && angle < start_angle {
        angle += 360.0;
    }
    angle
}

/// Drag state. While dragging, the slider holds the two document-scope subscriptions it
/// has to give back on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        on_move: ListenerId,
        on_release: ListenerId,
    },
}

/// Outcome of one processed event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderUpdate {
    pub changed: bool,
    pub value: f64,
    pub angle: f64,
}

#[derive(Debug)]
pub struct Slider {
    options: Options,
    range: StepRange,
    ring: RingSegment,
    bounds: Rect,
    current_index: usize,
    current_angle: f64,
    current_value: f64,
    drag: DragState,
    nodes: SliderNodes,
    element_listeners: Vec<(ListenerId, EventKind)>,
}

impl Slider {
    /// Validates `options`, draws the slider at its minimum value and subscribes to input
    /// on its track, arc and marker.
    pub fn new<S: RenderSurface>(
        options: Options,
        surface: &mut S,
    ) -> Result<Self, InvalidConfiguration> {
        let range = options.spec.validate()?;
        if range.start_angle() != START_ANGLE {
            log::warn!(
                "start angle {} is unverified, wraparound is only validated for {START_ANGLE}",
                range.start_angle()
            );
        }

        let bounds = surface.bounding_box(options.container);
        let ring = RingSegment::around(
            bounds.center(),
            options.spec.radius,
            SLIDER_WIDTH,
            range.start_angle(),
        );

        let row = surface.count_children(options.legend_group, ElementKind::Text);
        let nodes = SliderNodes::create(surface, &options, row);
        nodes.draw_track(surface, &ring, &range);

        let element_listeners = nodes
            .hit_targets()
            .into_iter()
            .flat_map(|node| {
                [EventKind::Press, EventKind::Click].map(|kind| (node, kind))
            })
            .map(|(node, kind)| (surface.listen(EventTarget::Element(node), kind), kind))
            .collect();

        let initial = range.snap(range.start_angle());
        nodes.draw_value(surface, &ring, options.spec.radius, &initial);

        log::debug!(
            "slider {}..{} by {} created ({} steps of {} degrees, legend row {row})",
            range.min(),
            range.max(),
            range.step(),
            range.step_count(),
            range.angle_step()
        );

        Ok(Self {
            options,
            range,
            ring,
            bounds,
            current_index: initial.index,
            current_angle: initial.angle,
            current_value: initial.value,
            drag: DragState::Idle,
            nodes,
            element_listeners,
        })
    }

    pub fn value(&self) -> f64 {
        self.current_value
    }

    pub fn angle(&self) -> f64 {
        self.current_angle
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn range(&self) -> &StepRange {
        &self.range
    }

    pub fn ring(&self) -> &RingSegment {
        &self.ring
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn nodes(&self) -> &SliderNodes {
        &self.nodes
    }

    pub fn owns(&self, listener: ListenerId) -> bool {
        self.listener_kind(listener).is_some()
    }

    fn listener_kind(&self, listener: ListenerId) -> Option<EventKind> {
        if let DragState::Dragging {
            on_move,
            on_release,
        } = self.drag
        {
            if listener == on_move {
                return Some(EventKind::Move);
            }
            if listener == on_release {
                return Some(EventKind::Release);
            }
        }
        self.element_listeners
            .iter()
            .find(|(id, _)| *id == listener)
            .map(|&(_, kind)| kind)
    }

    /// Runs the handler registered as `listener`. Returns `None` for listeners this slider
    /// doesn't own.
    pub fn handle<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        listener: ListenerId,
        event: &PointerEvent,
    ) -> Option<SliderUpdate> {
        let update = match self.listener_kind(listener)? {
            EventKind::Press => self.press(surface),
            EventKind::Move => self.pointer_move(surface, event),
            EventKind::Release => self.release(surface),
            EventKind::Click => self.click(surface, event),
        };
        Some(update)
    }

    pub fn press<S: RenderSurface>(&mut self, surface: &mut S) -> SliderUpdate {
        if self.drag == DragState::Idle {
            self.drag = DragState::Dragging {
                on_move: surface.listen(EventTarget::Document, EventKind::Move),
                on_release: surface.listen(EventTarget::Document, EventKind::Release),
            };
            log::debug!("drag started at value {}", self.current_value);
        }
        self.unchanged()
    }

    pub fn pointer_move<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        event: &PointerEvent,
    ) -> SliderUpdate {
        match self.drag {
            DragState::Idle => self.unchanged(),
            DragState::Dragging { .. } => self.track(surface, event),
        }
    }

    pub fn release<S: RenderSurface>(&mut self, surface: &mut S) -> SliderUpdate {
        if let DragState::Dragging {
            on_move,
            on_release,
        } = self.drag
        {
            surface.unlisten(on_move);
            surface.unlisten(on_release);
            self.drag = DragState::Idle;
            log::debug!("drag ended at value {}", self.current_value);
        }
        self.unchanged()
    }

    /// A click moves the value like a drag would, without starting one.
    pub fn click<S: RenderSurface>(&mut self, surface: &mut S, event: &PointerEvent) -> SliderUpdate {
        self.track(surface, event)
    }

    /// Detaches every listener and removes every node this slider created.
    pub fn destroy<S: RenderSurface>(mut self, surface: &mut S) {
        self.release(surface);
        for (listener, _) in self.element_listeners.drain(..) {
            surface.unlisten(listener);
        }
        self.nodes.remove(surface);
        log::debug!("slider {}..{} destroyed", self.range.min(), self.range.max());
    }

    fn track<S: RenderSurface>(&mut self, surface: &mut S, event: &PointerEvent) -> SliderUpdate {
        let Some(client) = event.client_position() else {
            return self.unchanged();
        };

        let pointer = self.bounds.relative(client);
        let raw = pointer_angle(self.ring.center, pointer, self.range.start_angle());
        let snap = self.range.snap(raw);
        let changed = snap.index != self.current_index;

        self.apply(surface, &snap);
        log::trace!("pointer {raw:.2} degrees snapped to value {}", snap.value);

        SliderUpdate {
            changed,
            value: snap.value,
            angle: snap.angle,
        }
    }

    fn apply<S: RenderSurface>(&mut self, surface: &mut S, snap: &Snap) {
        self.nodes
            .draw_value(surface, &self.ring, self.options.spec.radius, snap);
        self.current_index = snap.index;
        self.current_angle = snap.angle;
        self.current_value = snap.value;
    }

    fn unchanged(&self) -> SliderUpdate {
        SliderUpdate {
            changed: false,
            value: self.current_value,
            angle: self.current_angle,
        }
    }
}
