use soroban_sdk::{contracttype, String, Vec};

use crate::storage_types::WithdrawalRecord;

/// Withdrawal form as submitted by the client, fields untouched.
#[contracttype]
#[derive(Clone, Debug)]
pub struct WithdrawalRequest {
    pub email: String,
    pub method: String,
    pub account: String,
    pub amount: String,
    /// Accepted for compatibility; the desk always decides the initial status.
    pub transaction_status: String,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseMessage {
    Text(String),
    History(Vec<WithdrawalRecord>),
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawalResponse {
    pub success: bool,
    /// `Error` value of the rejection, 0 on success.
    pub code: u32,
    pub message: ResponseMessage,
    pub receipt: Receipt,
}

/// Id and date of the record an accepted request created.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawalReceipt {
    pub id: u64,
    pub date: String,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum Receipt {
    NotRecorded,
    Recorded(WithdrawalReceipt),
}

impl WithdrawalResponse {
    pub fn id(&self) -> Option<u64> {
        match &self.receipt {
            Receipt::Recorded(receipt) => Some(receipt.id),
            Receipt::NotRecorded => None,
        }
    }

    pub fn date(&self) -> Option<String> {
        match &self.receipt {
            Receipt::Recorded(receipt) => Some(receipt.date.clone()),
            Receipt::NotRecorded => None,
        }
    }
}

/// Payload handed to the notifier; the mail template is rendered off-chain.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
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
