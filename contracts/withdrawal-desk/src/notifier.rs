use soroban_sdk::{contractclient, log, Address, Env, String};

use crate::{events::emit_notify_failed, types::Notification};

pub(crate) const WITHDRAWAL_SUBJECT: &str =
    "Withdrawal Request - Fee Payment Required - UniversalFX Group";

/// Interface of the notification sender contract.
#[contractclient(name = "NotifierClient")]
pub trait Notifier {
    fn notify(env: Env, source: Address, notification: Notification);
}

pub(crate) fn subject(e: &Env) -> String {
    String::from_str(e, WITHDRAWAL_SUBJECT)
}

/// Best-effort delivery. A missing notifier or a failed call is logged and
/// reported as `false`; it never aborts the caller.
pub(crate) fn deliver(e: &Env, notifier: Option<Address>, notification: &Notification) -> bool {
    let Some(notifier) = notifier else {
        log!(e, "no notifier configured, skipping", notification.withdrawal_id);
        emit_notify_failed(e, notification.withdrawal_id);
        return false;
    };

    let client = NotifierClient::new(e, &notifier);
    match client.try_notify(&e.current_contract_address(), notification) {
        Ok(Ok(())) => true,
        _ => {
            log!(e, "notification delivery failed", notification.withdrawal_id);
            emit_notify_failed(e, notification.withdrawal_id);
            false
        }
    }
}
