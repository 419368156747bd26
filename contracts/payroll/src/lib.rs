#![no_std]

//! Multi-token payroll.
//!
//! Holds custody of a settlement asset and any number of SEP-41 tokens, keeps
//! a roster of employees with annual salaries in a reference currency, lets
//! each employee split their salary across permitted tokens by percentage,
//! and pays monthly at oracle-published exchange rates.
//!
//! | Role     | Entry points |
//! |----------|--------------|
//! | owner    | `set_oracle`, `transfer_ownership`, `add_employee`, `remove_employee`, `set_employee_salary`, `escape_hatch` |
//! | oracle   | `set_exchange_rate`, `set_exchange_rates` |
//! | employee | `determine_allocation`, `get_allocation`, `payday` |
//! | anyone   | deposits and every read |
//!
//! All amounts are 18-decimal fixed point; percentages are integers in
//! `[0, 100]`.

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod access;
mod accounting;
mod allocation;
mod custody;
mod employees;
mod errors;
mod events;
mod fixed_point;
mod payday;
mod rates;
mod storage;

pub use accounting::{BurnRates, Runway, TokenBurnRate};
pub use errors::PayrollError;
pub use fixed_point::SCALE;
pub use payday::TokenAmount;
pub use storage::{Allocation, DataKey, Employee, PayrollConfig, DEFAULT_PAY_PERIOD};

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct Payroll;

#[contractimpl]
impl Payroll {
    // -----------------------------------------------------------------------
    // Setup and roles
    // -----------------------------------------------------------------------

    /// Store the owner, oracle, settlement asset and pay period. Callable once.
    pub fn initialize(env: Env, config: PayrollConfig) -> Result<(), PayrollError> {
        access::initialize(&env, config)
    }

    pub fn get_config(env: Env) -> Result<PayrollConfig, PayrollError> {
        storage::read_config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, PayrollError> {
        storage::read_config(&env).map(|config| config.owner)
    }

    pub fn get_oracle(env: Env) -> Result<Address, PayrollError> {
        storage::read_config(&env).map(|config| config.oracle)
    }

    /// Owner only.
    pub fn set_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), PayrollError> {
        access::set_oracle(&env, &caller, oracle)
    }

    /// Owner only.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        owner: Address,
    ) -> Result<(), PayrollError> {
        access::transfer_ownership(&env, &caller, owner)
    }

    // -----------------------------------------------------------------------
    // Exchange rates
    // -----------------------------------------------------------------------

    /// Oracle only. `price` is reference currency per whole token.
    pub fn set_exchange_rate(
        env: Env,
        caller: Address,
        token: Address,
        price: i128,
    ) -> Result<(), PayrollError> {
        rates::set_exchange_rate(&env, &caller, token, price)
    }

    /// Oracle only. Applies every pair or none.
    pub fn set_exchange_rates(
        env: Env,
        caller: Address,
        tokens: Vec<Address>,
        prices: Vec<i128>,
    ) -> Result<(), PayrollError> {
        rates::set_exchange_rates(&env, &caller, tokens, prices)
    }

    pub fn get_rate(env: Env, token: Address) -> Result<i128, PayrollError> {
        rates::get_rate(&env, &token).map(|price| price.raw())
    }

    pub fn get_rate_updated_at(env: Env, token: Address) -> Result<u64, PayrollError> {
        rates::get_rate_updated_at(&env, &token)
    }

    pub fn get_priced_tokens(env: Env) -> Vec<Address> {
        rates::priced_tokens(&env)
    }

    // -----------------------------------------------------------------------
    // Employees
    // -----------------------------------------------------------------------

    /// Owner only. Returns the new employee id.
    pub fn add_employee(
        env: Env,
        caller: Address,
        address: Address,
        permitted_tokens: Vec<Address>,
        annual_salary: i128,
    ) -> Result<u64, PayrollError> {
        employees::add_employee(&env, &caller, address, permitted_tokens, annual_salary)
    }

    /// Owner only. Soft delete: the record and its allocation are kept.
    pub fn remove_employee(env: Env, caller: Address, id: u64) -> Result<(), PayrollError> {
        employees::remove_employee(&env, &caller, id)
    }

    /// Owner only.
    pub fn set_employee_salary(
        env: Env,
        caller: Address,
        id: u64,
        annual_salary: i128,
    ) -> Result<(), PayrollError> {
        employees::set_employee_salary(&env, &caller, id, annual_salary)
    }

    pub fn get_employee(env: Env, id: u64) -> Result<Employee, PayrollError> {
        employees::get_employee(&env, id)
    }

    pub fn get_employee_count(env: Env) -> u64 {
        employees::employee_count(&env)
    }

    pub fn get_active_employee_count(env: Env) -> u64 {
        employees::active_employee_count(&env)
    }

    /// 0 when `address` was never registered.
    pub fn employee_address_to_id(env: Env, address: Address) -> u64 {
        employees::address_to_id(&env, &address)
    }

    // -----------------------------------------------------------------------
    // Allocations
    // -----------------------------------------------------------------------

    /// Called by the employee. Replaces any previous allocation.
    pub fn determine_allocation(
        env: Env,
        employee: Address,
        tokens: Vec<Address>,
        percentages: Vec<u32>,
    ) -> Result<(), PayrollError> {
        allocation::determine_allocation(&env, &employee, tokens, percentages)
    }

    /// The calling employee's own allocation.
    pub fn get_allocation(env: Env, employee: Address) -> Result<Allocation, PayrollError> {
        employee.require_auth();
        allocation::get_allocation_for_address(&env, &employee)
    }

    pub fn get_allocation_for_address(
        env: Env,
        address: Address,
    ) -> Result<Allocation, PayrollError> {
        allocation::get_allocation_for_address(&env, &address)
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    pub fn calculate_payroll_burnrate(env: Env) -> Result<i128, PayrollError> {
        accounting::calculate_payroll_burnrate(&env)
    }

    pub fn calculate_burnrates_for_tokens(env: Env) -> Result<BurnRates, PayrollError> {
        accounting::calculate_burnrates_for_tokens(&env)
    }

    pub fn calculate_payroll_runway(env: Env) -> Result<Runway, PayrollError> {
        accounting::calculate_payroll_runway(&env)
    }

    // -----------------------------------------------------------------------
    // Custody
    // -----------------------------------------------------------------------

    /// Deposit the settlement asset.
    pub fn add_funds(env: Env, from: Address, amount: i128) -> Result<(), PayrollError> {
        custody::add_funds(&env, &from, amount)
    }

    /// Pull `amount` of `token` from `from`; needs a prior `approve` for this
    /// contract.
    pub fn add_token_funds(
        env: Env,
        from: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), PayrollError> {
        custody::add_token_funds(&env, &from, token, amount)
    }

    pub fn get_token_balance(env: Env, token: Address) -> i128 {
        custody::token_balance(&env, &token).raw()
    }

    pub fn get_settlement_balance(env: Env) -> i128 {
        custody::settlement_balance(&env)
    }

    /// Owner only. Sends every custody balance to the owner.
    pub fn escape_hatch(env: Env, caller: Address) -> Result<(), PayrollError> {
        custody::escape_hatch(&env, &caller)
    }

    // -----------------------------------------------------------------------
    // Payday
    // -----------------------------------------------------------------------

    /// Called by the employee, at most once per pay period.
    pub fn payday(env: Env, employee: Address) -> Result<Vec<TokenAmount>, PayrollError> {
        payday::payday(&env, &employee)
    }

    pub fn calculate_payout(env: Env, address: Address) -> Result<Vec<TokenAmount>, PayrollError> {
        payday::calculate_payout(&env, &address)
    }

    pub fn get_last_paid_at(env: Env, address: Address) -> Result<Option<u64>, PayrollError> {
        payday::last_paid_at(&env, &address)
    }
}
