//! Mapping between a stepped value range and angles on the dial.

use crate::error::InvalidConfiguration;

/// Upper bound on steps per turn (a tenth of a degree each). Every step becomes a track wedge.
pub const MAX_STEPS: usize = 3600;

/// A value snapped onto the nearest step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub index: usize,
    pub angle: f64,
    pub value: f64,
}

/// `{min, max, step}` spread over a full turn starting at `start_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRange {
    min: f64,
    max: f64,
    step: f64,
    start_angle: f64,
    step_count: usize,
    angle_step: f64,
}

impl StepRange {
    pub fn new(
        min: f64,
        max: f64,
        step: f64,
        start_angle: f64,
    ) -> Result<Self, InvalidConfiguration> {
        for (name, value) in [
            ("min", min),
            ("max", max),
            ("step", step),
            ("start_angle", start_angle),
        ] {
            if !value.is_finite() {
                return Err(InvalidConfiguration::NonFinite(name));
            }
        }
        if step <= 0.0 {
            return Err(InvalidConfiguration::NonPositiveStep(step));
        }

        let span = max - min;
        if span % step != 0.0 {
            return Err(InvalidConfiguration::UnevenStep { min, max, step });
        }

        let steps = (span / step).floor();
        if span <= 0.0 || steps <= 0.0 {
            return Err(InvalidConfiguration::EmptyRange { min, max });
        }
        if steps > MAX_STEPS as f64 {
            return Err(InvalidConfiguration::TooManySteps {
                steps,
                limit: MAX_STEPS,
            });
        }

        Ok(Self {
            min,
            max,
            step,
            start_angle,
            step_count: steps as usize,
            angle_step: 360.0 / steps,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    pub fn value_to_angle(&self, value: f64) -> f64 {
        self.start_angle + ((value - self.min) / self.step) * self.angle_step
    }

    /// Nearest step to `angle`, clamped to the range. NaN snaps to 0.
    pub fn angle_to_step_index(&self, angle: f64) -> usize {
        let index = ((angle - self.start_angle) / self.angle_step).round();
        index.clamp(0.0, self.step_count as f64) as usize
    }

    pub fn step_index_to_value(&self, index: usize) -> f64 {
        self.min + index as f64 * self.step
    }

    pub fn step_index_to_angle(&self, index: usize) -> f64 {
        self.start_angle + index as f64 * self.angle_step
    }

    pub fn snap(&self, angle: f64) -> Snap {
        let index = self.angle_to_step_index(angle);
        Snap {
            index,
            angle: self.step_index_to_angle(index),
            value: self.step_index_to_value(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent() -> StepRange {
        StepRange::new(0.0, 100.0, 10.0, -90.0).unwrap()
    }

    #[test]
    fn test_steps_cover_full_turn() {
        let cases = [
            (0.0, 100.0, 10.0),
            (0.0, 100.0, 1.0),
            (-50.0, 50.0, 25.0),
            (0.0, 7.0, 1.0),
            (10.0, 13.0, 1.0),
            (0.0, 2.5, 0.5),
            (1.0, 2.0, 1.0),
        ];
        for (min, max, step) in cases {
            let range = StepRange::new(min, max, step, -90.0).unwrap();
            let turn = range.step_count() as f64 * range.angle_step();
            assert!((turn - 360.0).abs() < 1e-9, "{min}..{max} by {step}");
        }
    }

    #[test]
    fn test_percent_range() {
        let range = percent();
        assert_eq!(range.step_count(), 10);
        assert_eq!(range.angle_step(), 36.0);
        assert_eq!(range.value_to_angle(0.0), -90.0);
        assert_eq!(range.value_to_angle(50.0), 90.0);
        assert_eq!(range.value_to_angle(100.0), 270.0);
    }

    #[test]
    fn test_value_angle_round_trip() {
        let range = StepRange::new(-20.0, 40.0, 5.0, -90.0).unwrap();
        for i in 0..=range.step_count() {
            let angle = range.value_to_angle(range.step_index_to_value(i));
            let expected = range.start_angle() + i as f64 * range.angle_step();
            assert!((angle - expected).abs() < 1e-9, "step {i}");
        }
    }

    #[test]
    fn test_snapping_is_idempotent() {
        let range = StepRange::new(0.0, 70.0, 10.0, -90.0).unwrap();
        for raw in [-90.0, -60.0, 0.0, 33.3, 100.0, 200.0, 269.0] {
            let first = range.snap(raw);
            let second = range.snap(first.angle);
            assert_eq!(first.index, second.index, "raw angle {raw}");
            assert_eq!(first.angle, second.angle);
        }
    }

    #[test]
    fn test_angle_to_step_index_clamps() {
        let range = percent();
        assert_eq!(range.angle_to_step_index(-200.0), 0);
        assert_eq!(range.angle_to_step_index(-100.0), 0);
        assert_eq!(range.angle_to_step_index(500.0), 10);
        assert_eq!(range.angle_to_step_index(f64::NAN), 0);
    }

    #[test]
    fn test_snap_to_nearest_step() {
        let snap = percent().snap(95.0);
        assert_eq!(snap.index, 5);
        assert_eq!(snap.value, 50.0);
        assert_eq!(snap.angle, 90.0);
    }

    #[test]
    fn test_uneven_step_rejected() {
        assert_eq!(
            StepRange::new(0.0, 100.0, 7.0, -90.0),
            Err(InvalidConfiguration::UnevenStep {
                min: 0.0,
                max: 100.0,
                step: 7.0
            })
        );
    }

    #[test]
    fn test_empty_range_rejected() {
        assert_eq!(
            StepRange::new(10.0, 10.0, 1.0, -90.0),
            Err(InvalidConfiguration::EmptyRange {
                min: 10.0,
                max: 10.0
            })
        );
        assert!(matches!(
            StepRange::new(10.0, 0.0, 1.0, -90.0),
            Err(InvalidConfiguration::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_step_count_is_capped() {
        assert_eq!(
            StepRange::new(0.0, 1e9, 1.0, -90.0),
            Err(InvalidConfiguration::TooManySteps {
                steps: 1e9,
                limit: MAX_STEPS
            })
        );
        assert_eq!(
            StepRange::new(0.0, MAX_STEPS as f64, 1.0, -90.0).map(|r| r.step_count()),
            Ok(MAX_STEPS)
        );
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert_eq!(
            StepRange::new(0.0, 10.0, 0.0, -90.0),
            Err(InvalidConfiguration::NonPositiveStep(0.0))
        );
        assert_eq!(
            StepRange::new(0.0, 10.0, -1.0, -90.0),
            Err(InvalidConfiguration::NonPositiveStep(-1.0))
        );
        assert_eq!(
            StepRange::new(0.0, f64::INFINITY, 1.0, -90.0),
            Err(InvalidConfiguration::NonFinite("max"))
        );
        assert_eq!(
            StepRange::new(0.0, 10.0, 1.0, f64::NAN),
            Err(InvalidConfiguration::NonFinite("start_angle"))
        );
    }
}
