//! Order session state types

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a user is in the ordering flow
///
/// Each variant carries exactly the choices made so far, so a category
/// can only be present from step 3 on, an item from step 4, and a quantity
/// at step 5.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderState {
    /// Fresh session, the next message gets the category menu
    #[default]
    AwaitingGreeting,

    /// Category menu sent
    AwaitingCategory,

    /// Item menu for `category` sent
    AwaitingItem { category: String },

    /// Quantity question sent
    AwaitingQuantity { category: String, item: String },

    /// Order summary sent, waiting for yes/no
    AwaitingConfirmation {
        category: String,
        item: String,
        quantity: String,
    },
}

impl OrderState {
    /// Numeric step, 1 through 5
    pub fn step(&self) -> u8 {
        match self {
            OrderState::AwaitingGreeting => 1,
            OrderState::AwaitingCategory => 2,
            OrderState::AwaitingItem { .. } => 3,
            OrderState::AwaitingQuantity { .. } => 4,
            OrderState::AwaitingConfirmation { .. } => 5,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            OrderState::AwaitingItem { category }
            | OrderState::AwaitingQuantity { category, .. }
            | OrderState::AwaitingConfirmation { category, .. } => Some(category),
            OrderState::AwaitingGreeting | OrderState::AwaitingCategory => None,
        }
    }

    pub fn item(&self) -> Option<&str> {
        match self {
            OrderState::AwaitingQuantity { item, .. }
            | OrderState::AwaitingConfirmation { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn quantity(&self) -> Option<&str> {
        match self {
            OrderState::AwaitingConfirmation { quantity, .. } => Some(quantity),
            _ => None,
        }
    }
}

/// Immutable configuration every transition reads
#[derive(Debug, Clone)]
pub struct OrderContext {
    pub catalog: Arc<Catalog>,
    /// Link sent once an order is confirmed
    pub payment_link: String,
}

impl OrderContext {
    pub fn new(catalog: Arc<Catalog>, payment_link: impl Into<String>) -> Self {
        Self {
            catalog,
            payment_link: payment_link.into(),
        }
    }
}
