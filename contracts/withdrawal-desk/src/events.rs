use soroban_sdk::{Address, Env, String, Symbol};

pub(crate) fn emit_withdrawal_rejected(e: &Env, email: &String, code: u32) {
    let topics = (Symbol::new(e, "withdrawal_rejected"), email.clone());
    e.events().publish(topics, code);
}

pub(crate) fn emit_notify_failed(e: &Env, withdrawal_id: u64) {
    let topics = (Symbol::new(e, "notify_failed"),);
    e.events().publish(topics, withdrawal_id);
}

pub(crate) fn emit_notifier_changed(e: &Env, notifier: &Option<Address>) {
    let topics = (Symbol::new(e, "notifier"),);
    e.events().publish(topics, notifier.clone());
}
