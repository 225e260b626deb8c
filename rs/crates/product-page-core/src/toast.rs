use crate::config::ToastPolicy;
use crate::controller::Deferred;
use crate::timer::{Scheduler, TaskId};
use crate::view::ProductView;

/// The notification toast. Each message is shown at once and hidden by a
/// timer `delay_ms` later; see [`ToastPolicy`] for overlapping messages.
#[derive(Debug, Clone)]
pub struct Toast {
    policy: ToastPolicy,
    delay_ms: u64,
    visible: bool,
    message: String,
    pending_hide: Option<TaskId>,
}

impl Toast {
    pub fn new(policy: ToastPolicy, delay_ms: u64) -> Self {
        Self { policy, delay_ms, visible: false, message: String::new(), pending_hide: None }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notify<V: ProductView>(&mut self, message: &str, view: &mut V, timers: &mut Scheduler<Deferred>) {
        self.message = message.to_string();
        self.visible = true;
        view.show_toast(message);

        if self.policy == ToastPolicy::Supersede {
            if let Some(previous) = self.pending_hide.take() {
                timers.cancel(previous);
            }
        }
        let id = timers.schedule(self.delay_ms, Deferred::HideToast);
        if self.policy == ToastPolicy::Supersede {
            self.pending_hide = Some(id);
        }
        tracing::debug!(text = message, "toast shown");
    }

    /// A scheduled hide came due.
    pub fn hide<V: ProductView>(&mut self, view: &mut V) {
        self.pending_hide = None;
        self.visible = false;
        view.hide_toast();
        tracing::trace!("toast hidden");
    }
}
