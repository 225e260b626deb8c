use crate::controller::Deferred;
use crate::numeric::parse_int_prefix;
use crate::timer::Scheduler;
use crate::view::ProductView;

/// Add `delta` to the count shown on the cart button (unreadable text
/// counts as zero) and start the highlight. Returns the new count.
pub fn add_to_cart<V: ProductView>(
    view: &mut V,
    timers: &mut Scheduler<Deferred>,
    delta: i64,
    animation_ms: u64,
) -> i64 {
    let shown = view.cart_count_text();
    let count = parse_int_prefix(&shown).unwrap_or(0).saturating_add(delta);
    view.set_cart_count(count);
    view.set_cart_animating(true);
    timers.schedule(animation_ms, Deferred::EndCartAnimation);
    tracing::debug!(count, "cart count updated");
    count
}

pub fn end_animation<V: ProductView>(view: &mut V) {
    view.set_cart_animating(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{RecordingView, ViewCall};

    #[test]
    fn test_adds_to_displayed_count() {
        let mut view = RecordingView { cart_count: "3".into(), ..RecordingView::default() };
        let mut timers = Scheduler::new();
        assert_eq!(add_to_cart(&mut view, &mut timers, 1, 500), 4);
        assert_eq!(view.cart_count, "4");
        assert_eq!(view.calls, vec![ViewCall::CartCount(4), ViewCall::CartAnimating(true)]);
        assert_eq!(timers.pop_due(500), Some((500, Deferred::EndCartAnimation)));
    }

    #[test]
    fn test_unreadable_count_starts_from_zero() {
        let mut view = RecordingView { cart_count: "".into(), ..RecordingView::default() };
        let mut timers = Scheduler::new();
        assert_eq!(add_to_cart(&mut view, &mut timers, 2, 500), 2);
    }
}
