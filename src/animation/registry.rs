use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Easing;
use crate::foundation::core::fmt_num;

/// 2D motion at one keyframe. Translations are percentages of the element's own box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub translate_x_pct: f64,
    pub translate_y_pct: f64,
    pub scale: f64,
    pub rotate_deg: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Motion {
    pub const IDENTITY: Self = Self {
        translate_x_pct: 0.0,
        translate_y_pct: 0.0,
        scale: 1.0,
        rotate_deg: 0.0,
    };

    const fn translate(x: f64, y: f64) -> Self {
        Self {
            translate_x_pct: x,
            translate_y_pct: y,
            ..Self::IDENTITY
        }
    }

    const fn scale(s: f64) -> Self {
        Self {
            scale: s,
            ..Self::IDENTITY
        }
    }

    const fn rotate(deg: f64) -> Self {
        Self {
            rotate_deg: deg,
            ..Self::IDENTITY
        }
    }

    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let l = |x: f64, y: f64| x + (y - x) * t;
        Self {
            translate_x_pct: l(a.translate_x_pct, b.translate_x_pct),
            translate_y_pct: l(a.translate_y_pct, b.translate_y_pct),
            scale: l(a.scale, b.scale),
            rotate_deg: l(a.rotate_deg, b.rotate_deg),
        }
    }

    /// Native `transform` expression.
    pub fn to_transform(&self) -> String {
        format!(
            "translate({}%, {}%) scale({}) rotate({}deg)",
            fmt_num(self.translate_x_pct, 3),
            fmt_num(self.translate_y_pct, 3),
            fmt_num(self.scale, 3),
            fmt_num(self.rotate_deg, 3)
        )
    }
}

/// One keyframe of an effect. Absent properties are not animated at this offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in `[0, 1]` along one iteration.
    pub offset: f64,
    pub opacity: Option<f64>,
    pub motion: Option<Motion>,
    pub blur_px: Option<f64>,
}

impl Keyframe {
    const fn at(offset: f64) -> Self {
        Self {
            offset,
            opacity: None,
            motion: None,
            blur_px: None,
        }
    }

    const fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    const fn motion(mut self, m: Motion) -> Self {
        self.motion = Some(m);
        self
    }

    const fn blur(mut self, px: f64) -> Self {
        self.blur_px = Some(px);
        self
    }

    /// Native property map for this keyframe (`opacity`, `transform`, `filter`).
    pub fn to_native(&self) -> BTreeMap<&'static str, String> {
        let mut out = BTreeMap::new();
        if let Some(o) = self.opacity {
            out.insert("opacity", fmt_num(o, 3));
        }
        if let Some(m) = &self.motion {
            out.insert("transform", m.to_transform());
        }
        if let Some(b) = self.blur_px {
            out.insert("filter", format!("blur({}px)", fmt_num(b, 2)));
        }
        out
    }
}

/// Iteration count of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Iterations {
    Count(u32),
    Infinite,
}

/// Timing used when an effect is first chosen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultTiming {
    pub duration_s: f64,
    pub easing: Easing,
    pub iterations: Iterations,
}

impl DefaultTiming {
    const fn once(duration_s: f64, easing: Easing) -> Self {
        Self {
            duration_s,
            easing,
            iterations: Iterations::Count(1),
        }
    }

    const fn looping(duration_s: f64, easing: Easing) -> Self {
        Self {
            duration_s,
            easing,
            iterations: Iterations::Infinite,
        }
    }
}

/// Named animation effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Stable name stored in `data-animation-*-type`.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    pub keyframes: Vec<Keyframe>,
    pub timing: DefaultTiming,
}

impl Effect {
    fn new(name: &str, label: &str, keyframes: &[Keyframe], timing: DefaultTiming) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            keyframes: keyframes.to_vec(),
            timing,
        }
    }
}

/// Name of the "no animation" effect.
pub const NONE_EFFECT: &str = "none";

/// Table mapping effect names to keyframes and default timing.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    effects: Vec<Effect>,
}

impl EffectRegistry {
    /// Empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in effect set.
    pub fn builtin() -> Self {
        use Easing::{Bounce, EaseIn, EaseInOut, EaseOut, Linear, Smooth};
        let k = Keyframe::at;

        let effects = vec![
            Effect::new(NONE_EFFECT, "None", &[], DefaultTiming::once(0.0, Linear)),
            Effect::new(
                "fade-in",
                "Fade In",
                &[k(0.0).opacity(0.0), k(1.0).opacity(1.0)],
                DefaultTiming::once(1.0, EaseOut),
            ),
            Effect::new(
                "fade-out",
                "Fade Out",
                &[k(0.0).opacity(1.0), k(1.0).opacity(0.0)],
                DefaultTiming::once(1.0, EaseIn),
            ),
            Effect::new(
                "slide-in-left",
                "Slide In Left",
                &[
                    k(0.0).opacity(0.0).motion(Motion::translate(-100.0, 0.0)),
                    k(1.0).opacity(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.8, EaseOut),
            ),
            Effect::new(
                "slide-in-right",
                "Slide In Right",
                &[
                    k(0.0).opacity(0.0).motion(Motion::translate(100.0, 0.0)),
                    k(1.0).opacity(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.8, EaseOut),
            ),
            Effect::new(
                "slide-in-up",
                "Slide In Up",
                &[
                    k(0.0).opacity(0.0).motion(Motion::translate(0.0, 100.0)),
                    k(1.0).opacity(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.8, EaseOut),
            ),
            Effect::new(
                "slide-in-down",
                "Slide In Down",
                &[
                    k(0.0).opacity(0.0).motion(Motion::translate(0.0, -100.0)),
                    k(1.0).opacity(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.8, EaseOut),
            ),
            Effect::new(
                "slide-out-left",
                "Slide Out Left",
                &[
                    k(0.0).opacity(1.0).motion(Motion::IDENTITY),
                    k(1.0).opacity(0.0).motion(Motion::translate(-100.0, 0.0)),
                ],
                DefaultTiming::once(0.8, EaseIn),
            ),
            Effect::new(
                "slide-out-right",
                "Slide Out Right",
                &[
                    k(0.0).opacity(1.0).motion(Motion::IDENTITY),
                    k(1.0).opacity(0.0).motion(Motion::translate(100.0, 0.0)),
                ],
                DefaultTiming::once(0.8, EaseIn),
            ),
            Effect::new(
                "zoom-in",
                "Zoom In",
                &[
                    k(0.0).opacity(0.0).motion(Motion::scale(0.3)),
                    k(1.0).opacity(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.6, Smooth),
            ),
            Effect::new(
                "zoom-out",
                "Zoom Out",
                &[
                    k(0.0).opacity(1.0).motion(Motion::IDENTITY),
                    k(1.0).opacity(0.0).motion(Motion::scale(0.3)),
                ],
                DefaultTiming::once(0.6, Smooth),
            ),
            Effect::new(
                "blur-in",
                "Blur In",
                &[k(0.0).opacity(0.0).blur(12.0), k(1.0).opacity(1.0).blur(0.0)],
                DefaultTiming::once(1.0, EaseOut),
            ),
            Effect::new(
                "blur-out",
                "Blur Out",
                &[k(0.0).opacity(1.0).blur(0.0), k(1.0).opacity(0.0).blur(12.0)],
                DefaultTiming::once(1.0, EaseIn),
            ),
            Effect::new(
                "bounce",
                "Bounce",
                &[
                    k(0.0).motion(Motion::IDENTITY),
                    k(0.3).motion(Motion::translate(0.0, -25.0)),
                    k(0.5).motion(Motion::IDENTITY),
                    k(0.7).motion(Motion::translate(0.0, -12.0)),
                    k(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(1.0, Bounce),
            ),
            Effect::new(
                "pulse",
                "Pulse",
                &[
                    k(0.0).motion(Motion::IDENTITY),
                    k(0.5).motion(Motion::scale(1.08)),
                    k(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::looping(1.2, EaseInOut),
            ),
            Effect::new(
                "shake",
                "Shake",
                &[
                    k(0.0).motion(Motion::IDENTITY),
                    k(0.2).motion(Motion::translate(-4.0, 0.0)),
                    k(0.4).motion(Motion::translate(4.0, 0.0)),
                    k(0.6).motion(Motion::translate(-4.0, 0.0)),
                    k(0.8).motion(Motion::translate(4.0, 0.0)),
                    k(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.6, Linear),
            ),
            Effect::new(
                "spin",
                "Spin",
                &[
                    k(0.0).motion(Motion::rotate(0.0)),
                    k(1.0).motion(Motion::rotate(360.0)),
                ],
                DefaultTiming::looping(1.5, Linear),
            ),
            Effect::new(
                "flip",
                "Flip",
                &[
                    k(0.0).opacity(0.0).motion(Motion::rotate(-90.0)),
                    k(1.0).opacity(1.0).motion(Motion::IDENTITY),
                ],
                DefaultTiming::once(0.8, EaseInOut),
            ),
        ];

        Self { effects }
    }

    /// Look up an effect by name (case-insensitive).
    pub fn lookup(&self, name: &str) -> Option<&Effect> {
        let name = name.trim();
        self.effects
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Effect names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().map(|e| e.name.as_str())
    }

    /// Add an effect, replacing any effect of the same name.
    pub fn register(&mut self, effect: Effect) {
        match self
            .effects
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(&effect.name))
        {
            Some(slot) => *slot = effect,
            None => self.effects.push(effect),
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/registry.rs"]
mod tests;
