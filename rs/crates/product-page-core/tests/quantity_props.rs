use proptest::prelude::*;
use product_page_core::{Action, PageConfig, PageController, RecordingView, ViewCall};

fn controller() -> PageController<RecordingView> {
    PageController::new(PageConfig::default(), RecordingView::new())
}

fn shown(c: &PageController<RecordingView>) -> Option<u8> {
    c.view().calls.iter().rev().find_map(|call| match call {
        ViewCall::QuantityDisplay(q) => Some(*q),
        _ => None,
    })
}

proptest! {
    #[test]
    fn test_valid_input_is_displayed(q in 1i64..=10) {
        let mut c = controller();
        c.dispatch(Action::QuantityInput { text: q.to_string() });
        prop_assert_eq!(shown(&c), Some(q as u8));
        prop_assert_eq!(c.selection().quantity.get() as i64, q);
    }

    #[test]
    fn test_out_of_range_input_keeps_previous(start in 1i64..=10, q in prop_oneof![i64::MIN..=0, 11i64..=i64::MAX]) {
        let mut c = controller();
        c.dispatch(Action::QuantityInput { text: start.to_string() });
        c.dispatch(Action::QuantityInput { text: q.to_string() });
        prop_assert_eq!(shown(&c), Some(start as u8));
        prop_assert_eq!(c.selection().quantity.get() as i64, start);
    }

    #[test]
    fn test_non_numeric_input_keeps_previous(start in 1i64..=10, text in "[a-zA-Z ]*") {
        let mut c = controller();
        c.dispatch(Action::QuantityInput { text: start.to_string() });
        c.dispatch(Action::QuantityInput { text });
        prop_assert_eq!(shown(&c), Some(start as u8));
    }

    #[test]
    fn test_stepping_never_leaves_bounds(steps in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut c = controller();
        for up in steps {
            c.dispatch(if up { Action::IncrementQuantity } else { Action::DecrementQuantity });
            let q = c.selection().quantity.get();
            prop_assert!((1..=10).contains(&q));
            prop_assert_eq!(shown(&c), Some(q));
        }
    }
}
