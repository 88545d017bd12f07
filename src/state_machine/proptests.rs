//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::catalog::Catalog;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> OrderContext {
    OrderContext::new(Arc::new(Catalog::default()), "https://dummy-payment.com/order123")
}

fn category_names() -> Vec<String> {
    Catalog::default().category_names()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[ a-zA-Z0-9]{0,20}".prop_map(|body| Event::Text { body }),
        "[a-zA-Z ]{1,20}".prop_map(Event::list_reply),
        ("[a-z-]{1,10}", "[a-zA-Z ]{1,20}")
            .prop_map(|(id, title)| Event::ButtonReply { id, title }),
    ]
}

fn arb_category() -> impl Strategy<Value = String> {
    prop::sample::select(category_names())
}

fn arb_confirmation_state() -> impl Strategy<Value = OrderState> {
    (arb_category(), "[a-zA-Z ]{1,12}", "[0-9]{1,3}").prop_map(|(category, item, quantity)| {
        OrderState::AwaitingConfirmation {
            category,
            item,
            quantity,
        }
    })
}

/// Choices may only be present once the flow has reached them
fn fields_match_step(state: &OrderState) -> bool {
    let step = state.step();
    state.category().is_some() == (step >= 3)
        && state.item().is_some() == (step >= 4)
        && state.quantity().is_some() == (step >= 5)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_greeting_ignores_content(event in arb_event()) {
        let result = transition(&OrderState::AwaitingGreeting, &test_context(), &event);

        prop_assert_eq!(result.new_state, Some(OrderState::AwaitingCategory));
        let is_category_menu = matches!(
            result.effects.first(),
            Some(Effect::SendList(prompt)) if prompt.options == category_names()
        );
        prop_assert!(is_category_menu);
    }

    #[test]
    fn prop_catalog_category_sends_its_items(name in arb_category(), as_text in any::<bool>()) {
        let event = if as_text {
            Event::text(name.clone())
        } else {
            Event::list_reply(name.clone())
        };
        let result = transition(&OrderState::AwaitingCategory, &test_context(), &event);

        let catalog = Catalog::default();
        let expected = catalog.find(&name).unwrap();
        prop_assert_eq!(
            result.new_state,
            Some(OrderState::AwaitingItem { category: name.clone() })
        );
        let sends_items = matches!(
            result.effects.first(),
            Some(Effect::SendList(prompt)) if prompt.options == expected.items
        );
        prop_assert!(sends_items);
    }

    #[test]
    fn prop_unknown_category_stays_at_step_two(name in "[a-z]{1,12}") {
        prop_assume!(Catalog::default().find(&name).is_none());

        let result = transition(&OrderState::AwaitingCategory, &test_context(), &Event::text(name));
        prop_assert_eq!(result.new_state.as_ref().map(OrderState::step), Some(2));
        prop_assert!(!result.effects.contains(&Effect::PersistState));
    }

    #[test]
    fn prop_confirmation_always_ends(state in arb_confirmation_state(), event in arb_event()) {
        let result = transition(&state, &test_context(), &event);
        prop_assert!(result.ends_session());
        prop_assert_eq!(result.effects.last(), Some(&Effect::EndSession));
    }

    #[test]
    fn prop_transitions_preserve_validity(
        events in proptest::collection::vec(arb_event(), 0..20)
    ) {
        let context = test_context();
        let mut state = OrderState::default();

        for event in events {
            let result = transition(&state, &context, &event);

            // Exactly one reply per message
            prop_assert_eq!(result.effects.iter().filter(|e| e.is_reply()).count(), 1);
            // Session ends iff the effects say so
            prop_assert_eq!(result.ends_session(), result.effects.contains(&Effect::EndSession));

            match result.new_state {
                Some(next) => {
                    prop_assert!(fields_match_step(&next));
                    prop_assert!(next.step() <= state.step() + 1);
                    // Progress is always persisted, a repeated prompt is not
                    prop_assert_eq!(
                        next != state,
                        result.effects.contains(&Effect::PersistState)
                    );
                    state = next;
                }
                None => {
                    prop_assert_eq!(state.step(), 5);
                    state = OrderState::default();
                }
            }
        }
    }
}
