use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val, Vec};

use crate::errors::PayrollError;

// ---------------------------------------------------------------------------
// Ledger TTL constants
// ---------------------------------------------------------------------------

/// Each ledger is ~5 s, so 17_280 ≈ 1 day.
pub const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

/// 30 days, in seconds of ledger time.
pub const DEFAULT_PAY_PERIOD: u64 = 30 * 24 * 60 * 60;

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// Contract-wide configuration, written once by `initialize`.
///
/// `owner` and `oracle` are the two roles checked by [`crate::access`].
/// `settlement_token` is the native asset contract that `add_funds` deposits
/// into; `pay_period` is the minimum number of seconds between paydays.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PayrollConfig {
    pub owner: Address,
    pub oracle: Address,
    pub settlement_token: Address,
    pub pay_period: u64,
}

/// Employee record. Never deleted; removal only clears `active`.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub id: u64,
    pub address: Address,
    pub permitted_tokens: Vec<Address>,
    /// Reference-currency salary per year, 18-decimal fixed point.
    pub annual_salary: i128,
    pub active: bool,
    pub added_at: u64,
    pub last_paid_at: Option<u64>,
}

/// Oracle-published price of one whole token in reference currency.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeRate {
    pub price: i128,
    pub updated_at: u64,
}

/// An employee's salary split. `tokens[i]` receives `percentages[i]` percent.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    pub tokens: Vec<Address>,
    pub percentages: Vec<u32>,
}

/// Storage key space for the payroll contract.
///
/// - `Config`               → `PayrollConfig`       (Instance)
/// - `EmployeeCount`        → `u64`                 (Instance)
/// - `ActiveEmployeeCount`  → `u64`                 (Instance)
/// - `PricedTokens`         → `Vec<Address>`        (Instance, registration order)
/// - `CustodyTokens`        → `Vec<Address>`        (Instance, first-deposit order)
/// - `SettlementBalance`    → `i128`                (Instance)
/// - `Employee(u64)`        → `Employee`            (Persistent)
/// - `EmployeeId(Address)`  → `u64`                 (Persistent)
/// - `Allocation(u64)`      → `Allocation`          (Persistent)
/// - `Rate(Address)`        → `ExchangeRate`        (Persistent)
/// - `TokenBalance(Address)`→ `i128`                (Persistent)
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    EmployeeCount,
    ActiveEmployeeCount,
    PricedTokens,
    CustodyTokens,
    SettlementBalance,
    Employee(u64),
    EmployeeId(Address),
    Allocation(u64),
    Rate(Address),
    TokenBalance(Address),
}

// ---------------------------------------------------------------------------
// Instance storage
// ---------------------------------------------------------------------------

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<PayrollConfig, PayrollError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(PayrollError::NotInitialized)
}

pub fn write_config(env: &Env, config: &PayrollConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_counter(env: &Env, key: &DataKey) -> u64 {
    env.storage().instance().get(key).unwrap_or(0u64)
}

pub fn write_counter(env: &Env, key: &DataKey, value: u64) {
    env.storage().instance().set(key, &value);
}

pub fn read_token_list(env: &Env, key: &DataKey) -> Vec<Address> {
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| Vec::new(env))
}

/// Appends `token` to the ordered list under `key` unless already present.
pub fn register_token(env: &Env, key: &DataKey, token: &Address) {
    let mut tokens = read_token_list(env, key);
    if !tokens.contains(token) {
        tokens.push_back(token.clone());
        env.storage().instance().set(key, &tokens);
    }
}

pub fn read_settlement_balance(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::SettlementBalance)
        .unwrap_or(0i128)
}

pub fn write_settlement_balance(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::SettlementBalance, &amount);
}

// ---------------------------------------------------------------------------
// Persistent storage
// ---------------------------------------------------------------------------

/// Reads a persistent record. A hit pushes its TTL out like a write does, so
/// records that are only ever read (address index, allocations, rates) stay
/// live as long as they are in use.
pub fn read_persistent<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    value
}

/// Writes a persistent record and pushes its TTL out to the bump amount.
pub fn write_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
