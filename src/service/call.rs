//! One-shot response handle
//!
//! A [`PendingCall`] can be cloned and handed to several actors; only the
//! first resolution reaches the caller. Later attempts return
//! [`DeliveryError::AlreadyResolved`] instead of panicking.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

use super::errors::DeliveryError;

/// Lifecycle of a pending call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// No reply yet
    Unresolved,
    /// A success reply was submitted
    Resolved,
    /// An error reply was submitted
    Failed,
}

/// What the caller receives
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Success(Value),
    Error { code: String, message: String },
}

struct Slot {
    state: CallState,
    sender: Option<oneshot::Sender<Reply>>,
}

/// Sending half, held by whoever may answer the call
#[derive(Clone)]
pub struct PendingCall {
    id: Uuid,
    slot: Arc<Mutex<Slot>>,
}

/// Receiving half, held by the caller
#[derive(Debug)]
pub struct CallReceiver {
    id: Uuid,
    receiver: oneshot::Receiver<Reply>,
}

impl PendingCall {
    /// Creates a connected call/receiver pair
    pub fn channel() -> (PendingCall, CallReceiver) {
        let (sender, receiver) = oneshot::channel();
        let id = Uuid::new_v4();
        let call = PendingCall {
            id,
            slot: Arc::new(Mutex::new(Slot {
                state: CallState::Unresolved,
                sender: Some(sender),
            })),
        };
        (call, CallReceiver { id, receiver })
    }

    /// Identifier shared by both halves, used as the request id in logs
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> CallState {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).state
    }

    /// Resolves the call with a success payload
    pub fn success(&self, payload: Value) -> Result<(), DeliveryError> {
        self.resolve(CallState::Resolved, Reply::Success(payload))
    }

    /// Resolves the call with an error reply
    pub fn error(&self, code: &str, message: &str) -> Result<(), DeliveryError> {
        self.resolve(
            CallState::Failed,
            Reply::Error {
                code: code.to_string(),
                message: message.to_string(),
            },
        )
    }

    fn resolve(&self, next: CallState, reply: Reply) -> Result<(), DeliveryError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.state != CallState::Unresolved {
            return Err(DeliveryError::AlreadyResolved(slot.state));
        }
        // The attempt is consumed even if the receiver has gone away.
        slot.state = next;
        let sender = slot.sender.take().ok_or(DeliveryError::Disconnected)?;
        sender.send(reply).map_err(|_| DeliveryError::Disconnected)
    }
}

impl std::fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCall")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}

impl CallReceiver {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for the reply. `None` if every sender was dropped unresolved.
    pub async fn reply(self) -> Option<Reply> {
        self.receiver.await.ok()
    }

    /// Non-blocking check for a reply
    pub fn try_reply(&mut self) -> Option<Reply> {
        self.receiver.try_recv().ok()
    }
}
