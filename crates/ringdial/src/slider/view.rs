use super::{
    LEGEND_FONT_SIZE, LEGEND_LEFT, LEGEND_ROW_HEIGHT, LEGEND_SWATCH_SIZE, LEGEND_TEXT_GAP,
    LEGEND_TOP, MARKER_FILL, MARKER_RADIUS, TRACK_COLOR,
};
use crate::color::Color;
use crate::geometry::{DisplayNumber, Point, RingSegment, polar_to_cartesian};
use crate::options::Options;
use crate::range::{Snap, StepRange};
use crate::surface::{Attribute, ElementKind, NodeId, RenderSurface};

/// Top-left corner of legend row `row` (its color swatch).
pub fn legend_row_origin(row: usize) -> Point {
    Point::new(LEGEND_LEFT, LEGEND_TOP + row as f64 * LEGEND_ROW_HEIGHT)
}

pub fn format_value(value: f64) -> String {
    DisplayNumber(value).to_string()
}

/// The nodes one slider owns on its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderNodes {
    pub background: NodeId,
    pub foreground: NodeId,
    pub marker: NodeId,
    pub swatch: NodeId,
    pub label: NodeId,
}

impl SliderNodes {
    pub fn create<S: RenderSurface>(surface: &mut S, options: &Options, row: usize) -> Self {
        let color = &options.spec.color;
        let track = Color::from_srgb(TRACK_COLOR);

        let background = surface.create(options.container, ElementKind::Path);
        surface.set_attribute(background, Attribute::Fill(track.clone()));
        surface.set_attribute(background, Attribute::Stroke(track));

        let foreground = surface.create(options.container, ElementKind::Path);
        surface.set_attribute(foreground, Attribute::Fill(color.clone()));
        surface.set_attribute(foreground, Attribute::Stroke(color.clone()));

        let marker = surface.create(options.container, ElementKind::Circle);
        surface.set_attribute(marker, Attribute::Fill(Color::from_srgb(MARKER_FILL)));
        surface.set_attribute(marker, Attribute::Stroke(color.clone()));
        surface.set_attribute(marker, Attribute::Radius(MARKER_RADIUS));

        let origin = legend_row_origin(row);

        let swatch = surface.create(options.legend_group, ElementKind::Rect);
        surface.set_attribute(swatch, Attribute::Fill(color.clone()));
        surface.set_attribute(swatch, Attribute::Position(origin));
        surface.set_attribute(
            swatch,
            Attribute::Size {
                width: LEGEND_SWATCH_SIZE,
                height: LEGEND_SWATCH_SIZE,
            },
        );

        // text baseline sits on the swatch's bottom edge
        let label = surface.create(options.legend_group, ElementKind::Text);
        surface.set_attribute(
            label,
            Attribute::Position(Point::new(
                origin.x + LEGEND_SWATCH_SIZE + LEGEND_TEXT_GAP,
                origin.y + LEGEND_SWATCH_SIZE,
            )),
        );
        surface.set_attribute(label, Attribute::FontSize(LEGEND_FONT_SIZE));

        Self {
            background,
            foreground,
            marker,
            swatch,
            label,
        }
    }

    /// Nodes that start a drag or take a click.
    pub fn hit_targets(&self) -> [NodeId; 3] {
        [self.background, self.foreground, self.marker]
    }

    pub fn draw_track<S: RenderSurface>(&self, surface: &mut S, ring: &RingSegment, range: &StepRange) {
        let track = ring.stepped_track(range.step_count(), range.angle_step());
        surface.set_attribute(self.background, Attribute::Path(track));
    }

    pub fn draw_value<S: RenderSurface>(
        &self,
        surface: &mut S,
        ring: &RingSegment,
        radius: f64,
        snap: &Snap,
    ) {
        surface.set_attribute(
            self.foreground,
            Attribute::Path(ring.path(ring.origin, snap.angle)),
        );
        surface.set_attribute(
            self.marker,
            Attribute::Center(polar_to_cartesian(ring.center, radius, snap.angle)),
        );
        surface.set_text(self.label, &format_value(snap.value));
    }

    pub fn remove<S: RenderSurface>(&self, surface: &mut S) {
        for node in [
            self.background,
            self.foreground,
            self.marker,
            self.swatch,
            self.label,
        ] {
            surface.remove(node);
        }
    }
}
