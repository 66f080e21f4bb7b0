use serde::{Deserialize, Serialize};

use crate::animation::ease::Easing;
use crate::animation::registry::{EffectRegistry, NONE_EFFECT};

pub const DELAY_RANGE_S: (f64, f64) = (0.0, 60.0);
pub const DURATION_RANGE_S: (f64, f64) = (0.1, 60.0);
pub const SPEED_RANGE: (f64, f64) = (0.1, 10.0);

const DEFAULT_DURATION_S: f64 = 1.0;

/// Lifecycle moment an [`AnimationSettings`] bundle applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriggerContext {
    #[default]
    Open,
    Close,
    Interact,
}

impl TriggerContext {
    pub const ALL: [Self; 3] = [Self::Open, Self::Close, Self::Interact];

    /// Attribute key segment (`data-animation-{segment}-*`).
    pub fn segment(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Interact => "interact",
        }
    }

    /// Parse the trigger-context selector. The legacy combined `open+close` mode collapses to
    /// [`TriggerContext::Open`].
    pub fn from_selector(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "open+close" | "open-close" | "openclose" => Some(Self::Open),
            "close" => Some(Self::Close),
            "interact" | "interaction" => Some(Self::Interact),
            _ => None,
        }
    }

    /// Stored trigger for this context.
    pub fn trigger(self) -> AnimationTrigger {
        match self {
            Self::Open | Self::Close => AnimationTrigger::WhileOpening,
            Self::Interact => AnimationTrigger::OnPage,
        }
    }
}

/// Value of `data-animation-trigger`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationTrigger {
    #[default]
    WhileOpening,
    OnPage,
}

impl AnimationTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WhileOpening => "While Opening",
            Self::OnPage => "On Page",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim() {
            "While Opening" => Some(Self::WhileOpening),
            "On Page" => Some(Self::OnPage),
            _ => None,
        }
    }

    /// Context the controls show first for this trigger.
    pub fn context(self) -> TriggerContext {
        match self {
            Self::WhileOpening => TriggerContext::Open,
            Self::OnPage => TriggerContext::Interact,
        }
    }
}

/// Interaction that starts an on-page animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractAction {
    #[default]
    Click,
    Hover,
    Always,
}

impl InteractAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "Click",
            Self::Hover => "Hover",
            Self::Always => "Always",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "click" => Some(Self::Click),
            "hover" => Some(Self::Hover),
            "always" => Some(Self::Always),
            _ => None,
        }
    }
}

/// Per-trigger animation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Effect name from the registry; [`NONE_EFFECT`] disables the animation.
    pub effect: String,
    pub delay_s: f64,
    pub duration_s: f64,
    pub speed: f64,
    pub easing: Easing,
    /// Replay on every visit to the page instead of only the first.
    pub every_visit: bool,
    pub fade_start: bool,
    pub fade_end: bool,
    pub fade_start_end: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            effect: NONE_EFFECT.to_owned(),
            delay_s: 0.0,
            duration_s: DEFAULT_DURATION_S,
            speed: 1.0,
            easing: Easing::Linear,
            every_visit: false,
            fade_start: false,
            fade_end: false,
            fade_start_end: false,
        }
    }
}

impl AnimationSettings {
    pub fn is_none(&self) -> bool {
        self.effect.eq_ignore_ascii_case(NONE_EFFECT)
    }

    /// Apply one edit, clamping numeric values. Returns whether anything changed.
    pub fn apply(&mut self, edit: &AnimationEdit) -> bool {
        let before = self.clone();
        match edit {
            AnimationEdit::Effect(name) => {
                let name = name.trim();
                self.effect = if name.is_empty() {
                    NONE_EFFECT.to_owned()
                } else {
                    name.to_owned()
                };
            }
            AnimationEdit::Delay(v) => self.delay_s = clamp_range(*v, DELAY_RANGE_S, 0.0),
            AnimationEdit::Duration(v) => {
                self.duration_s = clamp_range(*v, DURATION_RANGE_S, DEFAULT_DURATION_S)
            }
            AnimationEdit::Speed(v) => self.speed = clamp_range(*v, SPEED_RANGE, 1.0),
            AnimationEdit::Easing(e) => self.easing = *e,
            AnimationEdit::EveryVisit(b) => self.every_visit = *b,
            AnimationEdit::FadeStart(b) => self.fade_start = *b,
            AnimationEdit::FadeEnd(b) => self.fade_end = *b,
            AnimationEdit::FadeStartEnd(b) => self.fade_start_end = *b,
        }
        *self != before
    }

    /// Choose an effect and adopt its default duration and easing from `registry`.
    pub fn choose_effect(&mut self, registry: &EffectRegistry, name: &str) -> bool {
        let mut changed = self.apply(&AnimationEdit::Effect(name.to_owned()));
        if let Some(effect) = registry.lookup(name) {
            if effect.timing.duration_s > 0.0 {
                changed |= self.apply(&AnimationEdit::Duration(effect.timing.duration_s));
                changed |= self.apply(&AnimationEdit::Easing(effect.timing.easing));
            }
        }
        changed
    }

    /// Duration stretched by the speed multiplier, in seconds.
    pub fn effective_duration_s(&self) -> f64 {
        self.duration_s / self.speed.max(SPEED_RANGE.0)
    }
}

/// Input values outside `range` are clamped; non-finite values fall back to `fallback`.
pub(crate) fn clamp_range(v: f64, range: (f64, f64), fallback: f64) -> f64 {
    if !v.is_finite() {
        return fallback;
    }
    v.clamp(range.0, range.1)
}

/// A single field edit issued by the animation controls.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationEdit {
    Effect(String),
    Delay(f64),
    Duration(f64),
    Speed(f64),
    Easing(Easing),
    EveryVisit(bool),
    FadeStart(bool),
    FadeEnd(bool),
    FadeStartEnd(bool),
}

/// The three independent per-trigger bundles of one element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationBundle {
    pub open: AnimationSettings,
    pub close: AnimationSettings,
    pub interact: AnimationSettings,
}

impl AnimationBundle {
    pub fn get(&self, ctx: TriggerContext) -> &AnimationSettings {
        match ctx {
            TriggerContext::Open => &self.open,
            TriggerContext::Close => &self.close,
            TriggerContext::Interact => &self.interact,
        }
    }

    pub fn get_mut(&mut self, ctx: TriggerContext) -> &mut AnimationSettings {
        match ctx {
            TriggerContext::Open => &mut self.open,
            TriggerContext::Close => &mut self.close,
            TriggerContext::Interact => &mut self.interact,
        }
    }

    pub fn all_none(&self) -> bool {
        TriggerContext::ALL.iter().all(|c| self.get(*c).is_none())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/settings.rs"]
mod tests;
