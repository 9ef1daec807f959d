use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u32)]
pub enum Error {
    ErrNotInitialized = 1,
    ErrAlreadyInitialized = 2,
    ErrPaused = 3,
    ErrSourceNotAllowed = 4,
    ErrMissingRecipient = 5,
    ErrMessageNotExist = 6,
}
