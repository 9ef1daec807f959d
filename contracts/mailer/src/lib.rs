#![no_std]
//! Outbox for user notifications. Contracts allowed as sources queue messages
//! with `notify`; the owner relays them to the mail transport off-chain and
//! acknowledges each one once it went out.

use crate::storage_types::{
    DataKey, MessageManager, INSTANCE_BUMP_AMOUNT, INSTANCE_THRESHOLD, MESSAGE_BUMP_AMOUNT,
    MESSAGE_THRESHOLD,
};
use soroban_sdk::{
    assert_with_error, contract, contractimpl, log, panic_with_error, Address, Env, String,
    Symbol, Vec,
};

mod error;
mod storage_types;


pub use crate::{
    error::Error,
    storage_types::{Notification, OutboxMessage},
};

fn get_owner(e: &Env) -> Address {
    match e.storage().instance().get::<_, Address>(&DataKey::Owner) {
        Some(owner) => owner,
        None => panic_with_error!(e, Error::ErrNotInitialized),
    }
}

fn get_sender(e: &Env) -> String {
    match e.storage().instance().get::<_, String>(&DataKey::Sender) {
        Some(sender) => sender,
        None => panic_with_error!(e, Error::ErrNotInitialized),
    }
}

fn is_paused(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or_default()
}

fn get_pending(e: &Env) -> Vec<u64> {
    let pending = e.storage().persistent().get::<_, Vec<u64>>(&DataKey::Pending);
    if pending.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&DataKey::Pending, MESSAGE_THRESHOLD, MESSAGE_BUMP_AMOUNT);
    }
    pending.unwrap_or(Vec::new(e))
}

fn write_pending(e: &Env, pending: &Vec<u64>) {
    e.storage().persistent().set(&DataKey::Pending, pending);
    e.storage()
        .persistent()
        .extend_ttl(&DataKey::Pending, MESSAGE_THRESHOLD, MESSAGE_BUMP_AMOUNT);
}

fn next_message_id(e: &Env) -> u64 {
    let id = e
        .storage()
        .instance()
        .get::<_, u64>(&DataKey::MessageId)
        .unwrap_or(0);
    e.storage().instance().set(&DataKey::MessageId, &(id + 1));
    id
}

fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

#[contract]
pub struct Mailer;

#[contractimpl]
#[allow(clippy::needless_pass_by_value)]
impl Mailer {
    pub fn initialize(e: Env, owner: Address, sender: String) {
        assert_with_error!(
            &e,
            !e.storage().instance().has(&DataKey::Owner),
            Error::ErrAlreadyInitialized
        );

        e.storage().instance().set(&DataKey::Owner, &owner);
        e.storage().instance().set(&DataKey::Sender, &sender);
        bump_instance(&e);
    }

    pub fn owner(e: Env) -> Address {
        get_owner(&e)
    }

    pub fn sender(e: Env) -> String {
        get_sender(&e)
    }

    pub fn set_source(e: Env, source: Address, allowed: bool) {
        get_owner(&e).require_auth();

        let key = DataKey::Source(source.clone());
        if allowed {
            e.storage().instance().set(&key, &true);
        } else {
            e.storage().instance().remove(&key);
        }
        bump_instance(&e);

        let topics = (Symbol::new(&e, "source"), source);
        e.events().publish(topics, allowed);
    }

    pub fn is_source(e: Env, source: Address) -> bool {
        e.storage().instance().has(&DataKey::Source(source))
    }

    /// While paused every `notify` fails, as it would during a transport outage.
    pub fn set_paused(e: Env, paused: bool) {
        get_owner(&e).require_auth();

        e.storage().instance().set(&DataKey::Paused, &paused);
        bump_instance(&e);

        let topics = (Symbol::new(&e, "paused"),);
        e.events().publish(topics, paused);
    }

    pub fn paused(e: Env) -> bool {
        is_paused(&e)
    }

    pub fn notify(e: Env, source: Address, notification: Notification) {
        source.require_auth();

        assert_with_error!(&e, !is_paused(&e), Error::ErrPaused);
        assert_with_error!(
            &e,
            e.storage()
                .instance()
                .has(&DataKey::Source(source.clone())),
            Error::ErrSourceNotAllowed
        );
        assert_with_error!(&e, notification.to.len() > 0, Error::ErrMissingRecipient);

        let id = next_message_id(&e);
        let message = OutboxMessage {
            id,
            source,
            from: get_sender(&e),
            notification,
            queued_at: e.ledger().timestamp(),
        };

        let manager = MessageManager::new(id);
        manager.write_message(&e, &message);

        let mut pending = get_pending(&e);
        pending.push_back(id);
        write_pending(&e, &pending);
        bump_instance(&e);

        log!(&e, "message queued", id);
        manager.emit_queued(&e, &message);
    }

    pub fn message(e: Env, id: u64) -> OutboxMessage {
        MessageManager::new(id).read_message(&e)
    }

    pub fn pending(e: Env) -> Vec<u64> {
        get_pending(&e)
    }

    /// Drops a message from the outbox once the relayer handed it to the transport.
    pub fn acknowledge(e: Env, id: u64) {
        get_owner(&e).require_auth();

        let mut pending = get_pending(&e);
        let Some(index) = pending.first_index_of(id) else {
            panic_with_error!(&e, Error::ErrMessageNotExist)
        };
        pending.remove(index);
        write_pending(&e, &pending);

        let manager = MessageManager::new(id);
        manager.remove_message(&e);
        bump_instance(&e);

        manager.emit_delivered(&e);
    }
}
