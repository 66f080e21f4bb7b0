use std::collections::BTreeMap;
use std::time::Duration;

use crate::animation::ease::Easing;
use crate::animation::registry::{EffectRegistry, Iterations, Keyframe, Motion};
use crate::animation::settings::{AnimationBundle, AnimationSettings};
use crate::foundation::core::{ElementId, fmt_num};
use crate::host::element::{Element, HostEditor};
use crate::runtime::timers::{TimerId, TimerQueue};

/// Slack added to the auto-cancel deadline after `duration + delay`.
pub const DEFAULT_PREVIEW_EPSILON: Duration = Duration::from_millis(50);

/// Inline properties a forwards-filled animation can leave behind.
pub const ANIMATION_RESIDUE_PROPERTIES: [&str; 5] = [
    "opacity",
    "transform",
    "filter",
    "backdrop-filter",
    "-webkit-backdrop-filter",
];

/// Opaque handle to one in-flight preview animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewHandle(u64);

/// Whether the end state persists after the animation completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillMode {
    None,
    Forwards,
}

/// Native timing derived from abstract settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeTiming {
    /// Effective duration (`duration / speed`) in milliseconds.
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
    pub fill: FillMode,
    pub iterations: Iterations,
}

impl NativeTiming {
    pub fn from_settings(settings: &AnimationSettings, iterations: Iterations) -> Self {
        Self {
            duration_ms: settings.effective_duration_s() * 1000.0,
            delay_ms: settings.delay_s.max(0.0) * 1000.0,
            easing: settings.easing,
            fill: FillMode::Forwards,
            iterations,
        }
    }

    /// Native timing-function expression.
    pub fn timing_function(&self) -> &'static str {
        self.easing.timing_function()
    }

    /// Length of the preview window: one pass of the animation plus its delay.
    pub fn window(&self) -> Duration {
        Duration::from_secs_f64(((self.duration_ms + self.delay_ms) / 1000.0).max(0.0))
    }
}

/// Interpolated style values at one instant of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatedFrame {
    pub opacity: Option<f64>,
    pub motion: Option<Motion>,
    pub blur_px: Option<f64>,
}

impl AnimatedFrame {
    /// Native property map (`opacity`, `transform`, `filter`).
    pub fn to_native(&self) -> BTreeMap<&'static str, String> {
        Keyframe {
            offset: 0.0,
            opacity: self.opacity,
            motion: self.motion,
            blur_px: self.blur_px,
        }
        .to_native()
    }
}

/// An animation playing on an element.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeAnimation {
    pub handle: PreviewHandle,
    pub effect: String,
    pub keyframes: Vec<Keyframe>,
    pub timing: NativeTiming,
    /// Virtual time at which the animation was started.
    pub started_at: Duration,
}

impl NativeAnimation {
    /// Sample the animated values at virtual time `now`.
    ///
    /// Returns `None` while the start delay is still running. After the last iteration the final
    /// state is held when the fill mode is forwards.
    pub fn sample(&self, now: Duration) -> Option<AnimatedFrame> {
        let elapsed_ms = now.saturating_sub(self.started_at).as_secs_f64() * 1000.0;
        let local = elapsed_ms - self.timing.delay_ms;
        if local < 0.0 {
            return None;
        }

        let d = self.timing.duration_ms;
        let progress = if d <= 0.0 {
            1.0
        } else {
            match self.timing.iterations {
                Iterations::Infinite => (local % d) / d,
                Iterations::Count(n) => {
                    let total = d * f64::from(n.max(1));
                    if local >= total {
                        if self.timing.fill == FillMode::None {
                            return None;
                        }
                        1.0
                    } else {
                        (local % d) / d
                    }
                }
            }
        };

        let eased = self.timing.easing.apply(progress);
        Some(AnimatedFrame {
            opacity: interpolate(&self.keyframes, eased, |k| k.opacity, |a, b, t| a + (b - a) * t),
            motion: interpolate(&self.keyframes, eased, |k| k.motion, |a, b, t| {
                Motion::lerp(&a, &b, t)
            }),
            blur_px: interpolate(&self.keyframes, eased, |k| k.blur_px, |a, b, t| {
                (a + (b - a) * t).max(0.0)
            }),
        })
    }
}

/// Interpolate one property across the keyframes that define it.
///
/// `t` may overshoot `[0, 1]` for bouncing curves; the outer segments extrapolate in that case.
fn interpolate<T: Copy>(
    keyframes: &[Keyframe],
    t: f64,
    get: impl Fn(&Keyframe) -> Option<T>,
    lerp: impl Fn(T, T, f64) -> T,
) -> Option<T> {
    let points: Vec<(f64, T)> = keyframes
        .iter()
        .filter_map(|k| get(k).map(|v| (k.offset, v)))
        .collect();
    match points.as_slice() {
        [] => None,
        [(_, v)] => Some(*v),
        _ => {
            let idx = points
                .partition_point(|(o, _)| *o <= t)
                .clamp(1, points.len() - 1);
            let (o0, v0) = points[idx - 1];
            let (o1, v1) = points[idx];
            let span = o1 - o0;
            if span <= 0.0 {
                return Some(v1);
            }
            Some(lerp(v0, v1, (t - o0) / span))
        }
    }
}

/// Something that can play and cancel native animations.
pub trait Animatable {
    fn play(&mut self, animation: NativeAnimation);
    /// Cancel an animation, dropping its effect. Returns `false` if it was not playing.
    fn cancel_animation(&mut self, handle: PreviewHandle) -> bool;
    fn running_animations(&self) -> &[NativeAnimation];
}

/// Resolves animation targets by element id.
pub trait AnimationStage {
    fn target(&mut self, id: ElementId) -> Option<&mut dyn Animatable>;
}

impl<H: HostEditor + ?Sized> AnimationStage for H {
    fn target(&mut self, id: ElementId) -> Option<&mut dyn Animatable> {
        self.element_mut(id).map(|e| e as &mut dyn Animatable)
    }
}

/// Scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewState {
    Idle,
    Playing(PreviewHandle),
}

#[derive(Debug)]
struct ActivePreview {
    handle: PreviewHandle,
    element: ElementId,
    deadline: TimerId,
}

/// Plays at most one preview animation at a time.
pub struct PreviewScheduler {
    registry: EffectRegistry,
    epsilon: Duration,
    next_handle: u64,
    active: Option<ActivePreview>,
}

impl PreviewScheduler {
    pub fn new(registry: EffectRegistry) -> Self {
        Self::with_epsilon(registry, DEFAULT_PREVIEW_EPSILON)
    }

    pub fn with_epsilon(registry: EffectRegistry, epsilon: Duration) -> Self {
        Self {
            registry,
            epsilon,
            next_handle: 0,
            active: None,
        }
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn state(&self) -> PreviewState {
        match &self.active {
            Some(a) => PreviewState::Playing(a.handle),
            None => PreviewState::Idle,
        }
    }

    pub fn is_live(&self, handle: PreviewHandle) -> bool {
        self.active.as_ref().is_some_and(|a| a.handle == handle)
    }

    /// Start previewing `effect` on `element`.
    ///
    /// Any live preview is cancelled first, so at most one handle is ever live. Unknown or empty
    /// effects are a no-op and return `None`. The returned handle is auto-cancelled when the timer
    /// produced by `on_expire` fires and is passed to [`PreviewScheduler::expire`].
    pub fn preview<S, E>(
        &mut self,
        stage: &mut S,
        element: ElementId,
        effect: &str,
        settings: &AnimationSettings,
        timers: &mut TimerQueue<E>,
        on_expire: impl FnOnce(PreviewHandle) -> E,
    ) -> Option<PreviewHandle>
    where
        S: AnimationStage + ?Sized,
    {
        self.cancel(stage, timers);

        let Some(fx) = self.registry.lookup(effect) else {
            tracing::debug!(effect, "preview requested for unknown effect");
            return None;
        };
        if fx.keyframes.is_empty() {
            return None;
        }
        let keyframes = fx.keyframes.clone();
        let timing = NativeTiming::from_settings(settings, fx.timing.iterations);

        let target = stage.target(element)?;
        let handle = PreviewHandle(self.next_handle);
        self.next_handle += 1;

        target.play(NativeAnimation {
            handle,
            effect: fx.name.clone(),
            keyframes,
            timing,
            started_at: timers.now(),
        });
        let deadline = timers.schedule(timing.window() + self.epsilon, on_expire(handle));
        tracing::debug!(
            ?handle,
            %element,
            effect,
            duration_ms = %fmt_num(timing.duration_ms, 1),
            delay_ms = %fmt_num(timing.delay_ms, 1),
            easing = timing.timing_function(),
            "preview started"
        );

        self.active = Some(ActivePreview {
            handle,
            element,
            deadline,
        });
        Some(handle)
    }

    /// Cancel the live preview, if any. Returns the cancelled handle.
    pub fn cancel<S, E>(&mut self, stage: &mut S, timers: &mut TimerQueue<E>) -> Option<PreviewHandle>
    where
        S: AnimationStage + ?Sized,
    {
        let active = self.active.take()?;
        timers.cancel(active.deadline);
        if let Some(target) = stage.target(active.element) {
            target.cancel_animation(active.handle);
        }
        tracing::trace!(handle = ?active.handle, "preview cancelled");
        Some(active.handle)
    }

    /// Handle the auto-cancel deadline of `handle`. Stale handles are ignored.
    pub fn expire<S>(&mut self, stage: &mut S, handle: PreviewHandle) -> bool
    where
        S: AnimationStage + ?Sized,
    {
        if !self.is_live(handle) {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };
        if let Some(target) = stage.target(active.element) {
            target.cancel_animation(active.handle);
        }
        tracing::trace!(?handle, "preview window elapsed");
        true
    }

    /// Strip every animation attribute and inline animation residue from `element` and return
    /// fresh settings bundles (all effects `none`).
    pub fn reset<E>(&mut self, element: &mut Element, timers: &mut TimerQueue<E>) -> AnimationBundle {
        if self.active.as_ref().is_some_and(|a| a.element == element.id) {
            if let Some(active) = self.active.take() {
                timers.cancel(active.deadline);
                element.cancel_animation(active.handle);
            }
        }

        let removed = element.remove_attrs_where(|name| {
            name.starts_with("data-animation-")
                || (name.starts_with("data-") && name.ends_with("-color"))
        });
        for prop in ANIMATION_RESIDUE_PROPERTIES {
            element.remove_style(prop);
        }
        tracing::debug!(element = %element.id, removed = removed.len(), "animations reset");
        AnimationBundle::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
