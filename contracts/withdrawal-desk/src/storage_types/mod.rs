pub(crate) mod fee_setting;
pub(crate) mod user_account_manager;
pub(crate) mod withdrawal_record_manager;

use soroban_sdk::{contracttype, String};

pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 69120; // 4 days
pub(crate) const INSTANCE_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT / 2;
pub(crate) const USER_DATA_BUMP_AMOUNT: u32 = 518400; // 30 days
pub(crate) const PERSISTENT_THRESHOLD: u32 = USER_DATA_BUMP_AMOUNT / 2;

/// Fixed-point scale of `FeeSetting::withdrawal_fee` (4 decimal places).
pub const FEE_RATE_SCALE: i128 = 10_000;
/// $10 fixed fee, applied while no setting has been stored.
pub const DEFAULT_WITHDRAWAL_FEE: i128 = 10 * FEE_RATE_SCALE;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Owner,        // Address of the desk owner
    Notifier,     // Address of the notification sender contract
    FeeSetting,   // FeeSetting applied to new withdrawals
    WithdrawalId, // u64 for the next withdrawal id
}

#[derive(Clone)]
#[contracttype]
pub struct UserAccountManager {
    pub email: String,
}

/// The `index`-th withdrawal of a user, counting from 0.
#[derive(Clone)]
#[contracttype]
pub struct WithdrawalRecordManager {
    pub email: String,
    pub index: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KycStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

/// Sub-balance a withdrawal is funded from.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountType {
    MainAccount,
    Profit,
    TotalWon,
}

impl AccountType {
    /// Parses the client-side account name.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "mainAccount" => Some(Self::MainAccount),
            "profit" => Some(Self::Profit),
            "totalWon" => Some(Self::TotalWon),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MainAccount => "trading balance",
            Self::Profit => "profit balance",
            Self::TotalWon => "total won balance",
        }
    }

    pub fn balance_of(self, account: &UserAccount) -> i128 {
        match self {
            Self::MainAccount => account.trading_balance,
            Self::Profit => account.plan_bonus,
            Self::TotalWon => account.total_won,
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeeType {
    Percentage,
    Fixed,
}

/// Only the initial state is set here; later states belong to the fee approval flow.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WithdrawalStatus {
    PendingFee,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeSetting {
    /// Values below `FEE_RATE_SCALE` are a fraction of the amount, the rest a fixed
    /// dollar fee.
    pub withdrawal_fee: i128,
}

/// All amounts are in cents.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AccountBalances {
    pub trading_balance: i128,
    pub plan_bonus: i128,
    pub total_won: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRecord {
    pub id: u64,
    pub date_added: String,
    pub method: String,
    pub account: AccountType,
    pub amount: i128,
    pub status: WithdrawalStatus,
    pub fee: i128,
    pub fee_paid: bool,
    pub fee_type: FeeType,
    pub fee_rate: i128,
    pub balance_type: String,
    pub available_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserAccount {
    pub email: String,
    pub name: String,
    pub kyc_status: KycStatus,
    pub trading_balance: i128,
    pub plan_bonus: i128,
    pub total_won: i128,
    /// Records live under `WithdrawalRecordManager` keys `0..withdrawal_count`.
    pub withdrawal_count: u32,
}
