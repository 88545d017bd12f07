//! Pure state transition function
//!
//! Given the same state, context and event this always yields the same
//! replies and next state. Nothing here touches the network or the store.

use super::{Effect, Event, OrderContext, OrderState};
use crate::catalog::Category;

pub const CATEGORY_PROMPT_HEADER: &str = "Select a category";
pub const CATEGORY_PROMPT_BODY: &str = "Please choose a category:";
pub const INVALID_CATEGORY: &str = "Please select a valid category.";
pub const ORDER_CANCELLED: &str = "Order canceled. Type 'order' to start again.";

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// Next state, or `None` when the order flow is over
    pub new_state: Option<OrderState>,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: OrderState) -> Self {
        Self {
            new_state: Some(state),
            effects: vec![],
        }
    }

    /// The session ends after this transition
    pub fn finished() -> Self {
        Self {
            new_state: None,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[allow(dead_code)] // Used by tests
    pub fn ends_session(&self) -> bool {
        self.new_state.is_none()
    }
}

/// Pure transition function
///
/// Only the category (step 2) and confirmation (step 5) replies are checked.
/// Item and quantity are taken as typed, except that an empty reply repeats
/// the question.
pub fn transition(state: &OrderState, context: &OrderContext, event: &Event) -> TransitionResult {
    let selection = event.selection();

    match state {
        // Any message opens the menu, content is ignored
        OrderState::AwaitingGreeting => TransitionResult::new(OrderState::AwaitingCategory)
            .with_effect(category_prompt(context))
            .with_effect(Effect::PersistState),

        OrderState::AwaitingCategory => match context.catalog.find(&selection) {
            Some(category) => TransitionResult::new(OrderState::AwaitingItem {
                category: category.name.clone(),
            })
            .with_effect(item_prompt(category))
            .with_effect(Effect::PersistState),
            None => TransitionResult::new(OrderState::AwaitingCategory)
                .with_effect(Effect::send_text(INVALID_CATEGORY)),
        },

        OrderState::AwaitingItem { category } => {
            if selection.is_empty() {
                let reprompt = context
                    .catalog
                    .find(category)
                    .map_or_else(|| category_prompt(context), item_prompt);
                return TransitionResult::new(state.clone()).with_effect(reprompt);
            }

            let effect = Effect::send_text(quantity_question(&selection));
            TransitionResult::new(OrderState::AwaitingQuantity {
                category: category.clone(),
                item: selection,
            })
            .with_effect(effect)
            .with_effect(Effect::PersistState)
        }

        OrderState::AwaitingQuantity { category, item } => {
            if selection.is_empty() {
                return TransitionResult::new(state.clone())
                    .with_effect(Effect::send_text(quantity_question(item)));
            }

            let summary = format!("You are ordering {selection} {item}. Confirm? (Yes/No)");
            TransitionResult::new(OrderState::AwaitingConfirmation {
                category: category.clone(),
                item: item.clone(),
                quantity: selection,
            })
            .with_effect(Effect::send_text(summary))
            .with_effect(Effect::PersistState)
        }

        OrderState::AwaitingConfirmation { .. } => {
            let reply = if selection.eq_ignore_ascii_case("yes") {
                format!(
                    "Order confirmed! ✅ Proceed to payment: {}",
                    context.payment_link
                )
            } else {
                ORDER_CANCELLED.to_string()
            };
            TransitionResult::finished()
                .with_effect(Effect::send_text(reply))
                .with_effect(Effect::EndSession)
        }
    }
}

fn category_prompt(context: &OrderContext) -> Effect {
    Effect::send_list(
        CATEGORY_PROMPT_HEADER,
        CATEGORY_PROMPT_BODY,
        context.catalog.category_names(),
    )
}

fn item_prompt(category: &Category) -> Effect {
    Effect::send_list(
        format!("Select a {}", category.name),
        format!("Here are the available {}:", category.name),
        category.items.clone(),
    )
}

fn quantity_question(item: &str) -> String {
    format!("How many {item} would you like to order?")
}
