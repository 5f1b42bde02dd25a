use crate::color::Color;
use crate::error::InvalidConfiguration;
use crate::range::StepRange;
use crate::slider::{SLIDER_WIDTH, START_ANGLE};
use crate::surface::{ElementKind, NodeId, RenderSurface};
use serde::{Deserialize, Serialize};

fn default_start_angle() -> f64 {
    START_ANGLE
}

/// What a single slider looks like and which values it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub color: Color,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub radius: f64,
    /// Angle (degrees, clockwise from 3 o'clock) of the minimum value.
    #[serde(default = "default_start_angle")]
    pub start_angle: f64,
}

impl SliderSpec {
    pub fn new(color: Color, min: f64, max: f64, step: f64, radius: f64) -> Self {
        Self {
            color,
            min,
            max,
            step,
            radius,
            start_angle: START_ANGLE,
        }
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn validate(&self) -> Result<StepRange, InvalidConfiguration> {
        let range = StepRange::new(self.min, self.max, self.step, self.start_angle)?;

        if !self.radius.is_finite() {
            return Err(InvalidConfiguration::NonFinite("radius"));
        }
        if self.radius <= SLIDER_WIDTH / 2.0 {
            return Err(InvalidConfiguration::RadiusTooSmall {
                radius: self.radius,
                width: SLIDER_WIDTH,
            });
        }
        Ok(range)
    }
}

/// Construction input for a slider: where to draw it and where its legend row goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub container: NodeId,
    pub legend_group: NodeId,
    pub spec: SliderSpec,
}

impl Options {
    /// Uses the container's first group as the legend, appending a new one if there is none.
    pub fn new<S: RenderSurface>(surface: &mut S, container: NodeId, spec: SliderSpec) -> Self {
        let legend_group = surface
            .first_child(container, ElementKind::Group)
            .unwrap_or_else(|| surface.create(container, ElementKind::Group));

        Self {
            container,
            legend_group,
            spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn spec(radius: f64) -> SliderSpec {
        SliderSpec::new("#ff8800".parse().unwrap(), 0.0, 100.0, 10.0, radius)
    }

    #[test]
    fn test_legend_group_is_discovered_or_created() {
        let mut scene = Scene::new(300.0, 300.0);
        let root = scene.root();

        let first = Options::new(&mut scene, root, spec(100.0));
        let second = Options::new(&mut scene, root, spec(80.0));
        assert_eq!(first.legend_group, second.legend_group);
        assert_eq!(scene.count_children(root, ElementKind::Group), 1);
    }

    #[test]
    fn test_radius_must_fit_ring() {
        assert!(spec(100.0).validate().is_ok());
        assert_eq!(
            spec(5.0).validate(),
            Err(InvalidConfiguration::RadiusTooSmall {
                radius: 5.0,
                width: SLIDER_WIDTH
            })
        );
        assert_eq!(
            spec(f64::NAN).validate(),
            Err(InvalidConfiguration::NonFinite("radius"))
        );
    }

    #[test]
    fn test_spec_deserialization() {
        let json = r##"{"color": "#00aa00", "min": 0, "max": 50, "step": 5, "radius": 60}"##;
        let spec: SliderSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.start_angle, START_ANGLE);
        assert_eq!(spec.color.as_str(), "#00aa00");
        assert_eq!(spec.validate().map(|r| r.step_count()), Ok(10));

        let bad = r#"{"color": "blurple", "min": 0, "max": 50, "step": 5, "radius": 60}"#;
        assert!(serde_json::from_str::<SliderSpec>(bad).is_err());
    }
}
