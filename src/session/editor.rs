use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::registry::EffectRegistry;
use crate::animation::scheduler::{DEFAULT_PREVIEW_EPSILON, PreviewHandle, PreviewScheduler, PreviewState};
use crate::animation::settings::{AnimationEdit, InteractAction, TriggerContext};
use crate::foundation::core::ElementId;
use crate::foundation::error::StyleResult;
use crate::host::capability::{PickOutcome, SamplerCapability};
use crate::host::element::HostEditor;
use crate::persist::guard::{GuardState, SyncGuard};
use crate::persist::schema::{AnimationSnapshot, StyleSnapshot, write_style};
use crate::runtime::timers::{Debouncer, TimerId, TimerQueue};
use crate::session::controller::AnimationSettingsController;
use crate::style::compositor::{Composition, Compositor, LayoutSnapshot, RenderMode};
use crate::style::state::{ElementStyleState, PaintTarget, StyleEdit};
use crate::text::measure::TextMeasurer;

/// Session timing knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay before style and animation edits are mirrored to attributes.
    pub persist_debounce_ms: u64,
    /// Delay before the host is told about committed changes.
    pub update_debounce_ms: u64,
    /// Slack added to a preview window before it is force-cancelled.
    pub preview_epsilon_ms: u64,
    /// Layout settle tick used by the sync guard and deferred composition.
    pub settle_tick_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_debounce_ms: 150,
            update_debounce_ms: 150,
            preview_epsilon_ms: DEFAULT_PREVIEW_EPSILON.as_millis() as u64,
            settle_tick_ms: 0,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(s: &str) -> StyleResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }

    pub fn update_debounce(&self) -> Duration {
        Duration::from_millis(self.update_debounce_ms)
    }

    pub fn preview_epsilon(&self) -> Duration {
        Duration::from_millis(self.preview_epsilon_ms)
    }

    pub fn settle_tick(&self) -> Duration {
        Duration::from_millis(self.settle_tick_ms)
    }
}

/// Deferred work queued on the session timers. Element-scoped events carry their target so
/// work outliving a selection change is discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    RestoreSettled { element: ElementId, epoch: u64 },
    Recompose { element: ElementId },
    PersistStyle { element: ElementId },
    PersistAnimation { element: ElementId },
    NotifyUpdate,
    PreviewExpired(PreviewHandle),
}

/// Edit received while the sync guard was raised, replayed once it lowers.
#[derive(Clone, Debug, PartialEq)]
enum PendingEdit {
    Style(StyleEdit),
    Animation(TriggerContext, AnimationEdit),
    Trigger(TriggerContext),
    Action(InteractAction),
    ResetAnimations,
}

#[derive(Debug)]
struct Selection {
    element: ElementId,
    style: ElementStyleState,
}

/// Single-threaded editing session over a host editor.
///
/// All deferred work (restore settle, composition, debounced persistence, preview deadlines)
/// runs on a virtual-time [`TimerQueue`] driven by [`EditorSession::advance`].
pub struct EditorSession<H: HostEditor> {
    host: H,
    config: SessionConfig,
    timers: TimerQueue<SessionEvent>,
    guard: SyncGuard,
    compositor: Compositor,
    scheduler: PreviewScheduler,
    animations: AnimationSettingsController,
    measurer: Option<Box<dyn TextMeasurer>>,
    sampler: SamplerCapability,
    selection: Option<Selection>,
    pending: Vec<PendingEdit>,
    style_persist: Debouncer,
    update_notify: Debouncer,
    recompose: Option<TimerId>,
    awaiting_layout: bool,
    last_mode: Option<RenderMode>,
}

impl<H: HostEditor> EditorSession<H> {
    pub fn new(host: H, config: SessionConfig) -> Self {
        Self {
            host,
            timers: TimerQueue::new(),
            guard: SyncGuard::new(),
            compositor: Compositor::new(),
            scheduler: PreviewScheduler::with_epsilon(
                EffectRegistry::builtin(),
                config.preview_epsilon(),
            ),
            animations: AnimationSettingsController::new(config.persist_debounce()),
            measurer: None,
            sampler: SamplerCapability::Unsupported,
            selection: None,
            pending: Vec::new(),
            style_persist: Debouncer::new(config.persist_debounce()),
            update_notify: Debouncer::new(config.update_debounce()),
            recompose: None,
            awaiting_layout: false,
            last_mode: None,
            config,
        }
    }

    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Some(Box::new(measurer));
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerCapability) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_registry(mut self, registry: EffectRegistry) -> Self {
        self.scheduler = PreviewScheduler::with_epsilon(registry, self.config.preview_epsilon());
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Virtual time elapsed since the session started.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selection.as_ref().map(|s| s.element)
    }

    /// In-memory style of the selected element.
    pub fn style(&self) -> Option<&ElementStyleState> {
        self.selection.as_ref().map(|s| &s.style)
    }

    pub fn animations(&self) -> &AnimationSettingsController {
        &self.animations
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    pub fn preview_state(&self) -> PreviewState {
        self.scheduler.state()
    }

    /// Mode of the last committed composition.
    pub fn render_mode(&self) -> Option<RenderMode> {
        self.last_mode
    }

    /// Number of live timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Select `id`, restoring its persisted state under the sync guard.
    ///
    /// Returns `false` when the host has no such element.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn select(&mut self, id: ElementId) -> bool {
        self.deselect();
        let Some(element) = self.host.element(id) else {
            tracing::warn!(%id, "selected element not found");
            return false;
        };

        let epoch = self.guard.begin(id);
        let style = StyleSnapshot::read(element).resolve(&element.computed);
        let animations = AnimationSnapshot::read(element);
        self.animations.load(animations, &mut self.timers);
        self.selection = Some(Selection { element: id, style });
        self.timers.schedule(
            self.config.settle_tick(),
            SessionEvent::RestoreSettled { element: id, epoch },
        );
        true
    }

    /// Drop the selection. Pending persistence for the element is written out first.
    pub fn deselect(&mut self) {
        let Some(selection) = self.selection.take() else {
            return;
        };
        let id = selection.element;
        if let Some(t) = self.recompose.take() {
            self.timers.cancel(t);
        }
        self.awaiting_layout = false;
        self.scheduler.cancel(&mut self.host, &mut self.timers);

        if self.guard.is_restoring() {
            if !self.pending.is_empty() {
                tracing::debug!(element = %id, dropped = self.pending.len(), "dropping edits queued during restore");
            }
            self.pending.clear();
            self.guard.abandon();
            return;
        }

        let style_dirty = self.style_persist.flush(&mut self.timers);
        let animation_dirty = self.animations.flush(&mut self.timers);
        if !(style_dirty || animation_dirty) {
            return;
        }
        if let Some(element) = self.host.element_mut(id) {
            if style_dirty {
                write_style(&selection.style, element);
            }
            if animation_dirty {
                self.animations.persist(element);
            }
            self.update_notify.arm(&mut self.timers, SessionEvent::NotifyUpdate);
        }
    }

    /// Apply a style control edit. Returns whether it was accepted (applied or queued).
    pub fn edit_style(&mut self, edit: StyleEdit) -> bool {
        self.submit(PendingEdit::Style(edit))
    }

    pub fn edit_animation(&mut self, ctx: TriggerContext, edit: AnimationEdit) -> bool {
        self.submit(PendingEdit::Animation(ctx, edit))
    }

    pub fn set_trigger(&mut self, ctx: TriggerContext) -> bool {
        self.submit(PendingEdit::Trigger(ctx))
    }

    pub fn set_action(&mut self, action: InteractAction) -> bool {
        self.submit(PendingEdit::Action(action))
    }

    /// Strip animation attributes and residue from the selected element.
    pub fn reset_animations(&mut self) -> bool {
        self.submit(PendingEdit::ResetAnimations)
    }

    fn submit(&mut self, edit: PendingEdit) -> bool {
        if self.selection.is_none() {
            tracing::debug!(?edit, "edit ignored without a selection");
            return false;
        }
        if self.guard.is_restoring() {
            tracing::trace!(?edit, "queueing edit until restore settles");
            self.pending.push(edit);
            return true;
        }
        self.apply(edit)
    }

    fn apply(&mut self, edit: PendingEdit) -> bool {
        let Some(selection) = self.selection.as_mut() else {
            return false;
        };
        let element = selection.element;
        match edit {
            PendingEdit::Style(edit) => {
                // Compute first, commit second.
                let next = selection.style.with_edit(&edit);
                if next == selection.style {
                    return false;
                }
                selection.style = next;
                self.style_persist
                    .arm(&mut self.timers, SessionEvent::PersistStyle { element });
                self.schedule_recompose(element);
                true
            }
            PendingEdit::Animation(ctx, edit) => self.animations.edit(
                ctx,
                &edit,
                self.scheduler.registry(),
                &mut self.timers,
                SessionEvent::PersistAnimation { element },
            ),
            PendingEdit::Trigger(ctx) => self.animations.set_context(
                ctx,
                &mut self.timers,
                SessionEvent::PersistAnimation { element },
            ),
            PendingEdit::Action(action) => self.animations.set_action(
                action,
                &mut self.timers,
                SessionEvent::PersistAnimation { element },
            ),
            PendingEdit::ResetAnimations => {
                let Some(el) = self.host.element_mut(element) else {
                    return false;
                };
                let bundle = self.scheduler.reset(el, &mut self.timers);
                self.animations.reset(bundle, &mut self.timers);
                // A pending style write would put the stripped color keys back.
                self.style_persist.flush(&mut self.timers);
                self.update_notify.arm(&mut self.timers, SessionEvent::NotifyUpdate);
                true
            }
        }
    }

    /// Preview the selected element's `ctx` animation.
    pub fn preview(&mut self, ctx: TriggerContext) -> Option<PreviewHandle> {
        let element = self.selected()?;
        let settings = self.animations.settings(ctx).clone();
        self.scheduler.preview(
            &mut self.host,
            element,
            &settings.effect,
            &settings,
            &mut self.timers,
            SessionEvent::PreviewExpired,
        )
    }

    pub fn cancel_preview(&mut self) -> Option<PreviewHandle> {
        self.scheduler.cancel(&mut self.host, &mut self.timers)
    }

    /// Sample a color for `target`. Unsupported platforms leave the style untouched.
    pub fn pick_color(&mut self, target: PaintTarget) -> PickOutcome {
        let outcome = self.sampler.pick();
        if let PickOutcome::Picked(color) = outcome {
            self.edit_style(StyleEdit::Color(target, color));
        }
        outcome
    }

    /// The host reports a layout change (resize, font load, text edit).
    pub fn notify_layout_changed(&mut self) {
        if let Some(element) = self.selected() {
            if self.awaiting_layout {
                tracing::trace!(%element, "retrying deferred composition");
            }
            self.schedule_recompose(element);
        }
    }

    fn schedule_recompose(&mut self, element: ElementId) {
        if let Some(t) = self.recompose.take() {
            self.timers.cancel(t);
        }
        let id = self
            .timers
            .schedule(self.config.settle_tick(), SessionEvent::Recompose { element });
        self.recompose = Some(id);
    }

    /// Advance virtual time by `dt`, handling every timer that falls due. Returns the number of
    /// events handled.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.timers.now() + dt;
        let mut handled = 0;
        while let Some((id, event)) = self.timers.pop_due(until) {
            self.handle(id, event);
            handled += 1;
        }
        self.timers.set_now(until);
        handled
    }

    fn handle(&mut self, id: TimerId, event: SessionEvent) {
        match event {
            SessionEvent::RestoreSettled { element, epoch } => {
                if !self.guard.settle(epoch) {
                    return;
                }
                for edit in std::mem::take(&mut self.pending) {
                    self.apply(edit);
                }
                self.schedule_recompose(element);
            }
            SessionEvent::Recompose { element } => {
                if self.recompose == Some(id) {
                    self.recompose = None;
                }
                if self.selected() != Some(element) {
                    tracing::debug!(%element, "discarding composition for a deselected element");
                    return;
                }
                self.compose(element);
            }
            SessionEvent::PersistStyle { element } => {
                if !self.style_persist.fired(id) || !self.can_write(element) {
                    return;
                }
                let Some(selection) = self.selection.as_ref() else {
                    return;
                };
                if let Some(el) = self.host.element_mut(element) {
                    write_style(&selection.style, el);
                    self.update_notify.arm(&mut self.timers, SessionEvent::NotifyUpdate);
                }
            }
            SessionEvent::PersistAnimation { element } => {
                if !self.animations.persist_fired(id) || !self.can_write(element) {
                    return;
                }
                if let Some(el) = self.host.element_mut(element) {
                    self.animations.persist(el);
                    self.update_notify.arm(&mut self.timers, SessionEvent::NotifyUpdate);
                }
            }
            SessionEvent::NotifyUpdate => {
                if self.update_notify.fired(id) {
                    self.host.on_update();
                }
            }
            SessionEvent::PreviewExpired(handle) => {
                self.scheduler.expire(&mut self.host, handle);
            }
        }
    }

    fn can_write(&self, element: ElementId) -> bool {
        if self.selected() != Some(element) {
            tracing::debug!(%element, "discarding persistence for a deselected element");
            return false;
        }
        self.guard.allows_write(element)
    }

    fn compose(&mut self, element: ElementId) {
        let Some(selection) = self.selection.as_ref() else {
            return;
        };
        let Some(el) = self.host.element_mut(element) else {
            tracing::warn!(%element, "selected element disappeared");
            return;
        };
        let layout = LayoutSnapshot::from_element(el);
        let measurer = self
            .measurer
            .as_deref_mut()
            .map(|m| m as &mut dyn TextMeasurer);
        let composition = self.compositor.compose(&selection.style, &layout, measurer);
        let mode = match &composition {
            Composition::Deferred => {
                self.awaiting_layout = true;
                return;
            }
            Composition::Native(_) => RenderMode::Native,
            Composition::Synthesized { .. } => RenderMode::Synthesized,
        };
        if let Some(patch) = composition.patch() {
            patch.apply_to(el);
        }
        self.awaiting_layout = false;
        self.last_mode = Some(mode);
        tracing::trace!(%element, ?mode, "composition committed");
    }
}

impl<H: HostEditor + std::fmt::Debug> std::fmt::Debug for EditorSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("host", &self.host)
            .field("selected", &self.selected())
            .field("guard", &self.guard.state())
            .field("preview", &self.scheduler.state())
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
