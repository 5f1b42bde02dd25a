use anyhow::Context;
use ringdial::{EventKind, EventTarget, NodeId, Options, PointerEvent, Scene, Slider, SliderSpec};

/// The canvas scene plus the sliders drawn into it.
pub struct Board {
    scene: Scene,
    sliders: Vec<Slider>,
}

impl Board {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scene: Scene::new(width, height),
            sliders: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Replaces every slider. All specs are checked first, so a bad spec leaves the current
    /// sliders untouched.
    pub fn rebuild(&mut self, specs: &[SliderSpec]) -> anyhow::Result<()> {
        for (i, spec) in specs.iter().enumerate() {
            spec.validate()
                .with_context(|| format!("slider #{} is invalid", i + 1))?;
        }

        for slider in self.sliders.drain(..) {
            slider.destroy(&mut self.scene);
        }

        let root = self.scene.root();
        for (i, spec) in specs.iter().enumerate() {
            let options = Options::new(&mut self.scene, root, spec.clone());
            let slider = Slider::new(options, &mut self.scene)
                .with_context(|| format!("failed to build slider #{}", i + 1))?;
            self.sliders.push(slider);
        }

        log::info!("Built {} sliders", self.sliders.len());
        Ok(())
    }

    /// Delivers `event` to the listeners on `hit` (the topmost node under the pointer) and,
    /// for moves and releases, to document listeners. Returns whether any value changed.
    pub fn dispatch(&mut self, hit: Option<NodeId>, event: &PointerEvent) -> bool {
        let mut listeners = hit
            .map(|node| self.scene.dispatch(EventTarget::Element(node), event.kind))
            .unwrap_or_default();
        if matches!(event.kind, EventKind::Move | EventKind::Release) {
            listeners.extend(self.scene.dispatch(EventTarget::Document, event.kind));
        }

        let mut changed = false;
        for listener in listeners {
            // an earlier handler may have unsubscribed this one
            if let Some(slider) = self.sliders.iter_mut().find(|s| s.owns(listener))
                && let Some(update) = slider.handle(&mut self.scene, listener, event)
            {
                changed |= update.changed;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringdial::geometry::polar_to_cartesian;
    use ringdial::{ElementKind, Point, RenderSurface};

    fn spec(color: &str, radius: f64) -> SliderSpec {
        SliderSpec::new(color.parse().unwrap(), 0.0, 100.0, 10.0, radius)
    }

    fn board() -> Board {
        let mut board = Board::new(400.0, 400.0);
        board
            .rebuild(&[spec("red", 150.0), spec("blue", 100.0)])
            .unwrap();
        board
    }

    #[test]
    fn test_drag_routes_to_pressed_slider_only() {
        let mut board = board();
        let center = Point::new(200.0, 200.0);
        let inner = board.sliders()[1].nodes().background;

        let press = PointerEvent::mouse(EventKind::Press, center);
        assert!(!board.dispatch(Some(inner), &press));
        assert!(board.sliders()[1].is_dragging());
        assert!(!board.sliders()[0].is_dragging());

        // the pointer may leave the ring while dragging
        let far = PointerEvent::mouse(EventKind::Move, polar_to_cartesian(center, 300.0, 90.0));
        assert!(board.dispatch(None, &far));
        assert_eq!(board.sliders()[1].value(), 50.0);
        assert_eq!(board.sliders()[0].value(), 0.0);

        let release = PointerEvent::mouse(EventKind::Release, center);
        board.dispatch(None, &release);
        assert!(!board.sliders()[1].is_dragging());
        assert_eq!(board.scene().listener_count_at(EventTarget::Document), 0);

        assert!(!board.dispatch(None, &far));
    }

    #[test]
    fn test_click_on_track() {
        let mut board = board();
        let outer = board.sliders()[0].nodes().background;
        let click = PointerEvent::mouse(
            EventKind::Click,
            polar_to_cartesian(Point::new(200.0, 200.0), 150.0, 0.0),
        );
        assert!(board.dispatch(Some(outer), &click));
        assert_eq!(board.sliders()[0].value(), 30.0);
    }

    #[test]
    fn test_invalid_rebuild_keeps_sliders() {
        let mut board = board();
        let uneven = SliderSpec::new("red".parse().unwrap(), 0.0, 10.0, 3.0, 80.0);
        assert!(board.rebuild(&[spec("green", 80.0), uneven]).is_err());
        assert_eq!(board.sliders().len(), 2);
    }

    #[test]
    fn test_rebuild_replaces_sliders_and_legend() {
        let mut board = board();
        board.rebuild(&[spec("green", 120.0)]).unwrap();

        assert_eq!(board.sliders().len(), 1);
        let legend = board.sliders()[0].options().legend_group;
        let scene = board.scene();
        assert_eq!(scene.count_children(legend, ElementKind::Text), 1);
        assert_eq!(scene.count_children(scene.root(), ElementKind::Path), 2);
        // 3 hit targets x press/click
        assert_eq!(scene.listener_count(), 6);
    }
}
