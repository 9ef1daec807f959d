use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u32)]
pub enum Error {
    ErrNotInitialized = 1,
    ErrAlreadyInitialized = 2,
    ErrUserNotFound = 3,
    ErrKycRequired = 4,
    ErrInvalidAmount = 5,
    ErrBelowMinimumWithdrawal = 6,
    ErrInvalidAccountType = 7,
    ErrInsufficientBalance = 8,
    ErrInvalidFeeRate = 9,
    ErrInvalidEmail = 10,
    ErrAccountAlreadyExist = 11,
    ErrNegativeBalance = 12,
    ErrWithdrawalNotExist = 13,
    ErrInvalidName = 14,
}
