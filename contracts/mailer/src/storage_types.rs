use soroban_sdk::{contracttype, panic_with_error, Address, Env, String, Symbol};

use crate::error::Error;

pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 69120; // 4 days
pub(crate) const INSTANCE_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT / 2;
pub(crate) const MESSAGE_BUMP_AMOUNT: u32 = 518400; // 30 days
pub(crate) const MESSAGE_THRESHOLD: u32 = MESSAGE_BUMP_AMOUNT / 2;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,         // Address of the relayer operating the outbox
    Sender,        // String used as the "from" of every message
    Paused,        // bool, refuses new messages while set
    MessageId,     // u64 for the next message id
    Pending,       // Vec<u64> of queued, unacknowledged ids (persistent)
    Source(Address),
}

/// Same shape as the payload produced by the withdrawal desk.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub to: String,
    pub recipient_name: String,
    pub subject: String,
    pub withdrawal_id: u64,
    pub amount: i128,
    pub method: String,
    pub fee: i128,
    pub fee_label: String,
    pub date: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutboxMessage {
    pub id: u64,
    pub source: Address,
    pub from: String,
    pub notification: Notification,
    pub queued_at: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct MessageManager {
    pub id: u64,
}

impl MessageManager {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn read_message(&self, e: &Env) -> OutboxMessage {
        if let Some(message) = e.storage().persistent().get::<_, OutboxMessage>(self) {
            e.storage()
                .persistent()
                .extend_ttl(self, MESSAGE_THRESHOLD, MESSAGE_BUMP_AMOUNT);
            message
        } else {
            panic_with_error!(e, Error::ErrMessageNotExist)
        }
    }

    pub fn write_message(&self, e: &Env, message: &OutboxMessage) {
        e.storage().persistent().set(self, message);
        e.storage()
            .persistent()
            .extend_ttl(self, MESSAGE_THRESHOLD, MESSAGE_BUMP_AMOUNT);
    }

    pub fn remove_message(&self, e: &Env) {
        e.storage().persistent().remove(self);
    }

    pub fn emit_queued(&self, e: &Env, message: &OutboxMessage) {
        let topics = (Symbol::new(e, "queued"), &message.source);
        e.events()
            .publish(topics, (self.id, message.notification.to.clone()));
    }

    pub fn emit_delivered(&self, e: &Env) {
        let topics = (Symbol::new(e, "delivered"),);
        e.events().publish(topics, self.id);
    }
}
