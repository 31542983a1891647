use strum::{Display, EnumString};

/// Timing curve of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Cubic bezier control points `(x1, y1, x2, y2)`.
    pub fn control_points(&self) -> [f64; 4] {
        match self {
            Self::Linear => [0.0, 0.0, 1.0, 1.0],
            Self::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Self::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Self::EaseInOut => [0.42, 0.0, 0.58, 1.0],
        }
    }

    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let [x1, y1, x2, y2] = self.control_points();
        if *self == Self::Linear || t == 0.0 || t == 1.0 {
            return t;
        }
        // x(u) is monotonic for control x values in [0, 1], so bisect for u.
        let mut lo = 0.0;
        let mut hi = 1.0;
        let mut u = t;
        for _ in 0..32 {
            let x = cubic_bezier(x1, x2, u);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = u;
            } else {
                hi = u;
            }
            u = 0.5 * (lo + hi);
        }
        cubic_bezier(y1, y2, u)
    }
}

/// One axis of a cubic bezier anchored at 0 and 1.
fn cubic_bezier(p1: f64, p2: f64, u: f64) -> f64 {
    let v = 1.0 - u;
    3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Easing::Linear)]
    #[case(Easing::EaseIn)]
    #[case(Easing::EaseOut)]
    #[case(Easing::EaseInOut)]
    fn endpoints_are_fixed(#[case] easing: Easing) {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert_eq!(easing.apply(-3.0), 0.0);
        assert_eq!(easing.apply(7.0), 1.0);
    }

    #[rstest]
    #[case(Easing::EaseIn)]
    #[case(Easing::EaseOut)]
    #[case(Easing::EaseInOut)]
    fn curves_are_monotonic(#[case] easing: Easing) {
        let samples: Vec<f64> = (0..=50).map(|i| easing.apply(i as f64 / 50.0)).collect();
        assert!(samples.windows(2).all(|w| w[1] >= w[0] - 1e-6), "{easing} is not monotonic");
    }

    #[test]
    fn curve_shapes() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-4);
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
    }

    #[test]
    fn parse_names() {
        assert_eq!("ease-in-out".parse::<Easing>().ok(), Some(Easing::EaseInOut));
        assert_eq!(Easing::EaseOut.to_string(), "ease-out");
    }
}
