use std::time::Duration;

use crate::animation::registry::EffectRegistry;
use crate::animation::settings::{
    AnimationBundle, AnimationEdit, AnimationSettings, InteractAction, TriggerContext,
};
use crate::host::element::Element;
use crate::persist::schema::{AnimationSnapshot, write_animation};
use crate::runtime::timers::{Debouncer, TimerId, TimerQueue};

/// Animation controls of the selected element.
///
/// Edits land in memory immediately; attribute persistence is debounced so dragging a slider
/// does not flood the host with change notifications.
#[derive(Debug)]
pub struct AnimationSettingsController {
    bundle: AnimationBundle,
    context: TriggerContext,
    action: InteractAction,
    persist: Debouncer,
    dirty: bool,
}

impl AnimationSettingsController {
    pub fn new(persist_delay: Duration) -> Self {
        Self {
            bundle: AnimationBundle::default(),
            context: TriggerContext::default(),
            action: InteractAction::default(),
            persist: Debouncer::new(persist_delay),
            dirty: false,
        }
    }

    /// Replace the in-memory controls with restored values. Does not schedule persistence.
    pub fn load<E>(&mut self, snapshot: AnimationSnapshot, timers: &mut TimerQueue<E>) {
        self.persist.flush(timers);
        self.bundle = snapshot.bundle;
        self.context = snapshot.context.unwrap_or_default();
        self.action = snapshot.action.unwrap_or_default();
        self.dirty = false;
    }

    pub fn bundle(&self) -> &AnimationBundle {
        &self.bundle
    }

    pub fn settings(&self, ctx: TriggerContext) -> &AnimationSettings {
        self.bundle.get(ctx)
    }

    /// Context selected in the trigger selector.
    pub fn context(&self) -> TriggerContext {
        self.context
    }

    pub fn action(&self) -> InteractAction {
        self.action
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply `edit` to the `ctx` bundle. Choosing an effect adopts its default timing.
    pub fn edit<E>(
        &mut self,
        ctx: TriggerContext,
        edit: &AnimationEdit,
        registry: &EffectRegistry,
        timers: &mut TimerQueue<E>,
        event: E,
    ) -> bool {
        let settings = self.bundle.get_mut(ctx);
        let changed = match edit {
            AnimationEdit::Effect(name) => settings.choose_effect(registry, name),
            other => settings.apply(other),
        };
        if changed {
            self.mark_dirty(timers, event);
        }
        changed
    }

    pub fn set_context<E>(&mut self, ctx: TriggerContext, timers: &mut TimerQueue<E>, event: E) -> bool {
        if self.context == ctx {
            return false;
        }
        self.context = ctx;
        self.mark_dirty(timers, event);
        true
    }

    pub fn set_action<E>(&mut self, action: InteractAction, timers: &mut TimerQueue<E>, event: E) -> bool {
        if self.action == action {
            return false;
        }
        self.action = action;
        self.mark_dirty(timers, event);
        true
    }

    /// Adopt freshly reset bundles. Pending persistence is dropped so the stripped attributes
    /// are not written back.
    pub fn reset<E>(&mut self, bundle: AnimationBundle, timers: &mut TimerQueue<E>) {
        self.persist.flush(timers);
        self.bundle = bundle;
        self.dirty = false;
    }

    fn mark_dirty<E>(&mut self, timers: &mut TimerQueue<E>, event: E) {
        self.dirty = true;
        self.persist.arm(timers, event);
    }

    /// Acknowledge the persistence timer. `false` for timers superseded by a later edit.
    pub fn persist_fired(&mut self, id: TimerId) -> bool {
        self.persist.fired(id)
    }

    /// Cancel a pending persistence timer; returns whether unsaved edits remain.
    pub fn flush<E>(&mut self, timers: &mut TimerQueue<E>) -> bool {
        self.persist.flush(timers);
        self.dirty
    }

    /// Write the controls to `element`.
    pub fn persist(&mut self, element: &mut Element) {
        write_animation(self.context, self.action, &self.bundle, element);
        self.dirty = false;
        tracing::trace!(element = %element.id, "animation attributes persisted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
