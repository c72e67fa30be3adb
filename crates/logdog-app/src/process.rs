//! Message processing - runs a message and its follow-ups through update()

use crate::handler::{update, UpdateAction};
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update loop.
///
/// Returns the actions the event loop should perform, in order.
pub fn process_message(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        if let Some(action) = result.action {
            actions.push(action);
        }
        msg = result.message;
    }
    actions
}
