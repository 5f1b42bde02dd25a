//! Polar geometry and ring-segment path construction.
//!
//! Angles are in degrees, measured from the positive x axis and growing clockwise on screen
//! (y points down).

use std::f64::consts::PI;
use std::fmt;

/// Two angles closer than this are treated as the same position on the circle.
pub const ANGLE_EPSILON: f64 = 1e-5;

/// Fraction of one step's angular width left blank on each side of a track wedge.
pub const TRACK_GAP_RATIO: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center in the rectangle's own coordinate space.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Translates a client-space position into the rectangle's coordinate space.
    pub fn relative(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

pub fn polar_to_cartesian(center: Point, radius: f64, angle_degrees: f64) -> Point {
    let angle = angle_degrees * PI / 180.0;
    Point::new(
        center.x + (radius * angle.cos()),
        center.y + (radius * angle.sin()),
    )
}

/// Formats a number the way ECMAScript's `Number#toString` does, so generated path data
/// matches what a browser-side widget would emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayNumber(pub f64);

impl fmt::Display for DisplayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("NaN");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
        }
        if v == 0.0 {
            // covers -0 as well
            return f.write_str("0");
        }

        let magnitude = v.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let exp = format!("{v:e}");
            match exp.split_once('e') {
                Some((mantissa, power)) if !power.starts_with('-') => {
                    write!(f, "{mantissa}e+{power}")
                }
                _ => f.write_str(&exp),
            }
        } else {
            write!(f, "{v}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Clockwise,
    CounterClockwise,
}

impl Sweep {
    pub fn flag(&self) -> u8 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => 0,
        }
    }
}

/// A circular arc in SVG endpoint form. The circle center and angles are carried along
/// so renderers that want center parameterization don't have to recover them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcTo {
    pub radius: f64,
    pub large_arc: bool,
    pub sweep: Sweep,
    pub to: Point,
    pub center: Point,
    pub from_angle: f64,
    pub to_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc(ArcTo),
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {} {}", DisplayNumber(p.x), DisplayNumber(p.y)),
            Self::LineTo(p) => write!(f, "L {} {}", DisplayNumber(p.x), DisplayNumber(p.y)),
            Self::Arc(arc) => write!(
                f,
                "A {r} {r} 0 {} {} {} {}",
                u8::from(arc.large_arc),
                arc.sweep.flag(),
                DisplayNumber(arc.to.x),
                DisplayNumber(arc.to.y),
                r = DisplayNumber(arc.radius),
            ),
            Self::Close => f.write_str("Z"),
        }
    }
}

/// An ordered list of path commands. `Display` renders SVG path data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDescription {
    commands: Vec<PathCommand>,
}

impl PathDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, other: PathDescription) {
        self.commands.extend(other.commands);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcTo> {
        self.commands.iter().filter_map(|c| match c {
            PathCommand::Arc(arc) => Some(arc),
            _ => None,
        })
    }
}

impl fmt::Display for PathDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

/// A ring (annulus) around `center`. `origin` is the angle of the zero position, which the
/// full-circle rule is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSegment {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub origin: f64,
}

impl RingSegment {
    /// A ring `width` thick, centered on the circle of the given `radius`.
    pub fn around(center: Point, radius: f64, width: f64, origin: f64) -> Self {
        Self {
            center,
            inner_radius: radius - width / 2.0,
            outer_radius: radius + width / 2.0,
            origin,
        }
    }

    /// True when `end` lands back on the origin after a non-trivial sweep, which a single
    /// SVG arc cannot express.
    pub fn closes_circle(&self, start: f64, end: f64) -> bool {
        let offset = (end - (self.origin + 360.0)).rem_euclid(360.0);
        let congruent = offset < ANGLE_EPSILON || 360.0 - offset < ANGLE_EPSILON;
        congruent && (end - start).abs() > ANGLE_EPSILON
    }

    /// Closed wedge: outer arc clockwise from `start` to `end`, inner arc back.
    pub fn path(&self, start: f64, end: f64) -> PathDescription {
        let closes = self.closes_circle(start, end);
        let end = if closes { end - 1.0 } else { end };

        let outer_start = polar_to_cartesian(self.center, self.outer_radius, start);
        let outer_end = polar_to_cartesian(self.center, self.outer_radius, end);
        let inner_start = polar_to_cartesian(self.center, self.inner_radius, start);
        let inner_end = polar_to_cartesian(self.center, self.inner_radius, end);

        let large_arc = (end - start).abs() > 180.0;

        let mut path = PathDescription::new();
        path.push(PathCommand::MoveTo(inner_start));
        path.push(PathCommand::LineTo(outer_start));
        path.push(PathCommand::Arc(ArcTo {
            radius: self.outer_radius,
            large_arc,
            sweep: Sweep::Clockwise,
            to: outer_end,
            center: self.center,
            from_angle: start,
            to_angle: end,
        }));
        if closes {
            path.push(PathCommand::Close);
            path.push(PathCommand::MoveTo(inner_end));
        } else {
            path.push(PathCommand::LineTo(inner_end));
        }
        path.push(PathCommand::Arc(ArcTo {
            radius: self.inner_radius,
            large_arc,
            sweep: Sweep::CounterClockwise,
            to: inner_start,
            center: self.center,
            from_angle: end,
            to_angle: start,
        }));
        path
    }

    /// The full ring cut into `steps` equal wedges, each inset by [`TRACK_GAP_RATIO`] of a
    /// step on both sides.
    pub fn stepped_track(&self, steps: usize, angle_step: f64) -> PathDescription {
        let gap = angle_step * TRACK_GAP_RATIO;
        (0..steps)
            .map(|k| self.origin + k as f64 * angle_step)
            .fold(PathDescription::new(), |mut track, wedge_start| {
                track.extend(self.path(wedge_start + gap, wedge_start + angle_step - gap));
                track
            })
    }
}
