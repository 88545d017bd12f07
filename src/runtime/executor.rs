//! Order runtime executor

use super::traits::SessionStore;
use super::{InboundMessage, UserLocks};
use crate::gateway::MessagingGateway;
use crate::session::SessionError;
use crate::state_machine::{transition, Effect, OrderContext, OrderState, TransitionResult};
use std::sync::Arc;

/// Processes inbound messages one user at a time
pub struct OrderRuntime {
    context: OrderContext,
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn MessagingGateway>,
    locks: UserLocks,
}

impl OrderRuntime {
    pub fn new(
        context: OrderContext,
        store: Arc<dyn SessionStore>,
        gateway: Arc<dyn MessagingGateway>,
    ) -> Self {
        Self {
            context,
            store,
            gateway,
            locks: UserLocks::new(),
        }
    }

    /// Run one message through the state machine and apply the outcome.
    ///
    /// Messages from the same user are handled strictly one after another.
    /// Delivery failures are logged and do not stop the session update.
    pub async fn handle(&self, message: InboundMessage) -> Result<TransitionResult, SessionError> {
        let _guard = self.locks.acquire(&message.user_id).await;

        let session = self.store.get_or_create(&message.user_id).await;
        let result = transition(&session.state, &self.context, &message.event);

        tracing::info!(
            user_id = %message.user_id,
            input = message.event.kind(),
            from_step = session.step(),
            to_step = ?result.new_state.as_ref().map(OrderState::step),
            "Order transition"
        );

        for effect in &result.effects {
            self.execute_effect(&message, &result, effect).await?;
        }

        Ok(result)
    }

    async fn execute_effect(
        &self,
        message: &InboundMessage,
        result: &TransitionResult,
        effect: &Effect,
    ) -> Result<(), SessionError> {
        match effect {
            Effect::SendText { body } => {
                if let Err(e) = self
                    .gateway
                    .send_text(&message.channel_id, &message.user_id, body)
                    .await
                {
                    tracing::warn!(user_id = %message.user_id, error = %e, "Reply not delivered");
                }
            }
            Effect::SendList(prompt) => {
                if let Err(e) = self
                    .gateway
                    .send_list(&message.channel_id, &message.user_id, prompt)
                    .await
                {
                    tracing::warn!(user_id = %message.user_id, error = %e, "Prompt not delivered");
                }
            }
            Effect::PersistState => {
                if let Some(state) = &result.new_state {
                    self.store.update(&message.user_id, state.clone()).await?;
                }
            }
            Effect::EndSession => {
                self.store.delete(&message.user_id).await;
                tracing::info!(user_id = %message.user_id, "Order flow finished");
            }
        }
        Ok(())
    }
}
