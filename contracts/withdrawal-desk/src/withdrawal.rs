use core::fmt::Write;

use soroban_sdk::{log, Env, String};

use crate::{
    error::Error,
    events::emit_withdrawal_rejected,
    fee::{compute_fee, FeeQuote},
    get_notifier, next_withdrawal_id, notifier,
    storage_types::{
        AccountType, FeeSetting, KycStatus, UserAccount, UserAccountManager, WithdrawalRecord,
        WithdrawalStatus,
    },
    text::{self, Dollars, TextBuf},
    types::{
        Notification, Receipt, ResponseMessage, WithdrawalReceipt, WithdrawalRequest,
        WithdrawalResponse,
    },
};

/// $10.00
pub const MIN_WITHDRAWAL: i128 = 1_000;
const MESSAGE_LEN: usize = 256;

/// Business-rule failures, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Rejection {
    UserNotFound,
    KycRequired,
    InvalidAmount,
    BelowMinimum,
    InvalidAccountType,
    InsufficientBalance {
        account: AccountType,
        available: i128,
        required: i128,
    },
}

impl Rejection {
    pub fn error(&self) -> Error {
        match self {
            Self::UserNotFound => Error::ErrUserNotFound,
            Self::KycRequired => Error::ErrKycRequired,
            Self::InvalidAmount => Error::ErrInvalidAmount,
            Self::BelowMinimum => Error::ErrBelowMinimumWithdrawal,
            Self::InvalidAccountType => Error::ErrInvalidAccountType,
            Self::InsufficientBalance { .. } => Error::ErrInsufficientBalance,
        }
    }

    pub fn message(&self, e: &Env) -> String {
        let text = match self {
            Self::UserNotFound => "User not found",
            Self::KycRequired => {
                "KYC verification required before withdrawal. Please complete KYC verification first."
            }
            Self::InvalidAmount => "Invalid withdrawal amount. Please enter a valid amount.",
            Self::BelowMinimum => "Minimum withdrawal amount is $10.",
            Self::InvalidAccountType => {
                "Invalid withdrawal account type. Please select a valid account."
            }
            Self::InsufficientBalance {
                account,
                available,
                required,
            } => {
                // two i128 dollar figures and the longest label stay well below this
                let mut out = TextBuf::<MESSAGE_LEN>::new();
                match write!(
                    out,
                    "Insufficient {} for withdrawal. Available: ${}, Required: ${}.",
                    account.label(),
                    Dollars(*available),
                    Dollars(*required),
                ) {
                    Ok(()) => return out.to_soroban(e),
                    Err(_) => "Insufficient balance for withdrawal.",
                }
            }
        };
        String::from_str(e, text)
    }
}

/// Outcome of a request that passed every rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Approval {
    pub account: AccountType,
    pub amount: i128,
    pub available: i128,
    pub fee: FeeQuote,
}

/// Applies the withdrawal rules to `request`; first failure wins.
pub(crate) fn evaluate(
    user: Option<&UserAccount>,
    request: &WithdrawalRequest,
    fee_setting: &FeeSetting,
) -> Result<Approval, Rejection> {
    let user = user.ok_or(Rejection::UserNotFound)?;

    if user.kyc_status != KycStatus::Approved {
        return Err(Rejection::KycRequired);
    }

    let amount = text::parse_amount(&request.amount).ok_or(Rejection::InvalidAmount)?;
    if amount.is_below_cents(MIN_WITHDRAWAL) {
        return Err(Rejection::BelowMinimum);
    }

    let account =
        text::parse_account_type(&request.account).ok_or(Rejection::InvalidAccountType)?;

    let available = account.balance_of(user);
    if amount.exceeds_cents(available) {
        return Err(Rejection::InsufficientBalance {
            account,
            available,
            required: amount.to_cents(),
        });
    }

    // never above `available`: rounding cannot cross a whole cent
    let amount = amount.to_cents();
    Ok(Approval {
        account,
        amount,
        available,
        fee: compute_fee(amount, fee_setting),
    })
}

impl Approval {
    pub fn into_record(
        self,
        e: &Env,
        id: u64,
        date_added: String,
        method: String,
    ) -> WithdrawalRecord {
        WithdrawalRecord {
            id,
            date_added,
            method,
            account: self.account,
            amount: self.amount,
            status: WithdrawalStatus::PendingFee,
            fee: self.fee.fee,
            fee_paid: false,
            fee_type: self.fee.fee_type,
            fee_rate: self.fee.fee_rate,
            balance_type: String::from_str(e, self.account.label()),
            available_balance: self.available,
        }
    }
}

fn rejected(e: &Env, request: &WithdrawalRequest, rejection: Rejection) -> WithdrawalResponse {
    let code = rejection.error() as u32;
    log!(e, "withdrawal rejected", code);
    emit_withdrawal_rejected(e, &request.email, code);

    WithdrawalResponse {
        success: false,
        code,
        message: ResponseMessage::Text(rejection.message(e)),
        receipt: Receipt::NotRecorded,
    }
}

/// Validates `request`, records the withdrawal and notifies the user.
pub(crate) fn process_withdrawal_request(
    e: &Env,
    request: WithdrawalRequest,
    fee_setting: &FeeSetting,
) -> WithdrawalResponse {
    let manager = text::normalize_email(e, &request.email).map(UserAccountManager::new);
    let user = manager
        .as_ref()
        .and_then(|manager| manager.read_user_account(e));

    let approval = match evaluate(user.as_ref(), &request, fee_setting) {
        Ok(approval) => approval,
        Err(rejection) => return rejected(e, &request, rejection),
    };
    // `evaluate` only approves known users
    let (Some(manager), Some(mut user)) = (manager, user) else {
        return rejected(e, &request, Rejection::UserNotFound);
    };

    let id = next_withdrawal_id(e);
    let date = text::format_date(e, e.ledger().timestamp());
    let record = approval.into_record(e, id, date.clone(), request.method.clone());

    manager.append_withdrawal(e, &mut user, &record);
    manager.write_user_account(e, &user);
    manager.emit_withdrawal_requested(e, &record);

    let notification = Notification {
        to: request.email,
        recipient_name: user.name.clone(),
        subject: notifier::subject(e),
        withdrawal_id: id,
        amount: record.amount,
        method: record.method.clone(),
        fee: record.fee,
        fee_label: text::format_fee_label(e, record.fee_rate),
        date: date.clone(),
    };
    notifier::deliver(e, get_notifier(e), &notification);

    WithdrawalResponse {
        success: true,
        code: 0,
        message: ResponseMessage::History(manager.withdrawal_history(e, &user)),
        receipt: Receipt::Recorded(WithdrawalReceipt { id, date }),
    }
}
