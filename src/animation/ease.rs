/// Abstract easing names offered by the animation controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Gentle acceleration and deceleration (`ease`).
    Smooth,
    /// Slow start.
    EaseIn,
    /// Slow finish.
    EaseOut,
    /// Slow start and finish.
    EaseInOut,
    /// Overshoots past both ends before settling.
    Bounce,
}

impl Easing {
    pub const ALL: [Self; 6] = [
        Self::Linear,
        Self::Smooth,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Bounce,
    ];

    /// Parse a stored or user-facing easing name. Unrecognized names map to [`Easing::Linear`].
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "linear" => Self::Linear,
            "smooth" | "ease" => Self::Smooth,
            "easein" => Self::EaseIn,
            "easeout" => Self::EaseOut,
            "easeinout" => Self::EaseInOut,
            "bounce" => Self::Bounce,
            _ => {
                if !key.is_empty() {
                    tracing::debug!(name, "unknown easing name, using linear");
                }
                Self::Linear
            }
        }
    }

    /// Attribute spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Smooth => "Smooth",
            Self::EaseIn => "EaseIn",
            Self::EaseOut => "EaseOut",
            Self::EaseInOut => "EaseInOut",
            Self::Bounce => "Bounce",
        }
    }

    /// Cubic-bezier control points `(x1, y1, x2, y2)` of the timing curve.
    pub fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Smooth => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::Bounce => (0.68, -0.55, 0.265, 1.55),
        }
    }

    /// Native timing-function expression.
    pub fn timing_function(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Smooth => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Bounce => "cubic-bezier(0.68, -0.55, 0.265, 1.55)",
        }
    }

    /// Apply this easing to normalized progress `t` in `[0, 1]`.
    ///
    /// Output may leave `[0, 1]` for overshooting curves.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if matches!(self, Self::Linear) {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        cubic_bezier_y_for_x(x1, y1, x2, y2, t)
    }
}

fn bezier(a1: f64, a2: f64, s: f64) -> f64 {
    // B(s) for P0 = 0, P3 = 1.
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_derivative(a1: f64, a2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Solve `x(s) = x` for the curve parameter, then return `y(s)`.
///
/// Newton iterations first, bisection when the slope is too flat to converge.
fn cubic_bezier_y_for_x(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < EPS {
            return bezier(y1, y2, s);
        }
        let d = bezier_derivative(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    s = x;
    for _ in 0..64 {
        let v = bezier(x1, x2, s);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
