use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use ringdial::geometry::{PathCommand, Sweep};
use ringdial::scene::Node;
use ringdial::{Attribute, ElementKind, NodeId, Point, Scene};
use std::f64::consts::PI;

const OUTLINE_WIDTH: f64 = 1.0;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn paint_of(node: &Node, key: &str) -> Option<Srgba<f64>> {
    match node.attribute(key) {
        Some(Attribute::Fill(color) | Attribute::Stroke(color)) => Some(color.to_srgba(1.0)),
        _ => None,
    }
}

/// Appends the node's outline to the current path. Returns `false` for nodes without
/// geometry.
fn trace(cr: &Context, node: &Node) -> bool {
    match node.kind {
        ElementKind::Path => {
            let Some(Attribute::Path(path)) = node.attribute("d") else {
                return false;
            };
            for command in path.commands() {
                match command {
                    PathCommand::MoveTo(p) => cr.move_to(p.x, p.y),
                    PathCommand::LineTo(p) => cr.line_to(p.x, p.y),
                    PathCommand::Arc(arc) => {
                        let (from, to) = (arc.from_angle.to_radians(), arc.to_angle.to_radians());
                        match arc.sweep {
                            Sweep::Clockwise => {
                                cr.arc(arc.center.x, arc.center.y, arc.radius, from, to)
                            }
                            Sweep::CounterClockwise => {
                                cr.arc_negative(arc.center.x, arc.center.y, arc.radius, from, to)
                            }
                        }
                    }
                    PathCommand::Close => cr.close_path(),
                }
            }
            true
        }
        ElementKind::Circle => match (node.attribute("center"), node.attribute("r")) {
            (Some(Attribute::Center(c)), Some(Attribute::Radius(r))) => {
                cr.new_sub_path();
                cr.arc(c.x, c.y, *r, 0.0, 2.0 * PI);
                true
            }
            _ => false,
        },
        ElementKind::Rect => match (node.attribute("position"), node.attribute("size")) {
            (Some(Attribute::Position(p)), Some(Attribute::Size { width, height })) => {
                cr.rectangle(p.x, p.y, *width, *height);
                true
            }
            _ => false,
        },
        ElementKind::Svg | ElementKind::Group | ElementKind::Text => false,
    }
}

fn draw_shape(cr: &Context, node: &Node) -> Result<(), cairo::Error> {
    cr.new_path();
    if !trace(cr, node) {
        return Ok(());
    }

    if let Some(fill) = paint_of(node, "fill") {
        set_source(cr, fill);
        cr.fill_preserve()?;
    }
    if let Some(stroke) = paint_of(node, "stroke") {
        set_source(cr, stroke);
        cr.set_line_width(OUTLINE_WIDTH);
        cr.stroke_preserve()?;
    }
    cr.new_path();
    Ok(())
}

fn draw_text(cr: &Context, node: &Node, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (Some(text), Some(Attribute::Position(p))) = (&node.text, node.attribute("position"))
    else {
        return Ok(());
    };

    let color = paint_of(node, "fill").unwrap_or(colors.text);
    set_source(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    if let Some(Attribute::FontSize(size)) = node.attribute("font-size") {
        cr.set_font_size(*size);
    }
    cr.move_to(p.x, p.y);
    cr.show_text(text)
}

pub fn draw(cr: &Context, scene: &Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.backdrop);
    cr.paint()?;

    for id in scene.paint_order() {
        let Some(node) = scene.node(id) else {
            continue;
        };
        match node.kind {
            ElementKind::Text => draw_text(cr, node, colors)?,
            _ => draw_shape(cr, node)?,
        }
    }
    Ok(())
}

/// Topmost path or circle whose painted area contains `point`.
pub fn hit_test(scene: &Scene, point: Point) -> Result<Option<NodeId>, cairo::Error> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)?;
    let cr = Context::new(&surface)?;
    cr.set_line_width(OUTLINE_WIDTH);

    for id in scene.paint_order().into_iter().rev() {
        let Some(node) = scene.node(id) else {
            continue;
        };
        if !matches!(node.kind, ElementKind::Path | ElementKind::Circle) {
            continue;
        }

        cr.new_path();
        if trace(&cr, node) && (cr.in_fill(point.x, point.y)? || cr.in_stroke(point.x, point.y)?)
        {
            return Ok(Some(id));
        }
    }
    Ok(None)
}
