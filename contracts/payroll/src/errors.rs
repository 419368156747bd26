use soroban_sdk::contracterror;

/// Typed errors returned by every fallible payroll entry point.
///
/// Callers can tell permission problems (`Unauthorized`) from data problems
/// (`NotFound`, `InvalidInput`, `RateNotSet`, `NoAllocation`), funding
/// problems (`InsufficientFunds`, `TransferFailed`) and timing problems
/// (`TooEarly`).
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PayrollError {
    /// The caller does not hold the owner or oracle role.
    Unauthorized = 1,
    /// Unknown employee id or address, or the caller is not an active employee.
    NotFound = 2,
    /// Malformed arrays, non-positive amounts, bad percentages, unpermitted token.
    InvalidInput = 3,
    /// A conversion touched a token that has never been priced.
    RateNotSet = 4,
    /// Custody does not hold enough of a token to cover a debit.
    InsufficientFunds = 5,
    /// The token contract rejected a transfer.
    TransferFailed = 6,
    /// The pay period since the last payday has not elapsed.
    TooEarly = 7,
    /// Payday requested before the employee stored an allocation.
    NoAllocation = 8,
    AlreadyInitialized = 9,
    NotInitialized = 10,
    /// A fixed-point result does not fit in an `i128`.
    ArithmeticOverflow = 11,
}
