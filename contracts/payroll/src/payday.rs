//! Monthly payout of one employee's salary across their allocated tokens.
//!
//! An employee is eligible when never paid or when at least one pay period
//! has elapsed since `last_paid_at`. A payday runs in two phases:
//!
//! 1. compute every token amount and check each token's total against
//!    custody, touching nothing;
//! 2. debit and transfer each amount, then stamp `last_paid_at`.
//!
//! If a transfer fails in phase 2 the call returns `TransferFailed`. An error
//! return aborts the invocation and the host discards all of its writes and
//! every transfer already made, so no partial payout is ever committed.

use soroban_sdk::{contracttype, log, Address, Env, Map, Vec};

use crate::accounting::{self, PERCENT};
use crate::allocation;
use crate::custody;
use crate::employees;
use crate::errors::PayrollError;
use crate::events;
use crate::fixed_point::Fixed;
use crate::rates;
use crate::storage::{self, Allocation, Employee};

/// One line of a payout.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct TokenAmount {
    pub token: Address,
    pub amount: i128,
}

pub fn payday(env: &Env, employee: &Address) -> Result<Vec<TokenAmount>, PayrollError> {
    employee.require_auth();
    let config = storage::read_config(env)?;
    let mut record = employees::get_active_by_address(env, employee)?;
    let split = allocation::read_allocation(env, record.id).ok_or(PayrollError::NoAllocation)?;

    let now = env.ledger().timestamp();
    if let Some(last_paid_at) = record.last_paid_at {
        let next_payday = last_paid_at
            .checked_add(config.pay_period)
            .ok_or(PayrollError::ArithmeticOverflow)?;
        if now < next_payday {
            return Err(PayrollError::TooEarly);
        }
    }

    // Phase 1.
    let payout = compute_payout(env, &record, &split)?;
    ensure_covered(env, &payout)?;

    // Phase 2.
    let mut tokens = Vec::new(env);
    let mut amounts = Vec::new(env);
    for line in payout.iter() {
        let amount = Fixed::from_raw(line.amount)?;
        if !amount.is_zero() {
            custody::debit(env, &line.token, amount)?;
            custody::release(env, &line.token, employee, amount)?;
        }
        tokens.push_back(line.token);
        amounts.push_back(line.amount);
    }

    record.last_paid_at = Some(now);
    employees::write_employee(env, &record);
    storage::extend_instance(env);

    events::emit_payday(env, record.id, employee.clone(), tokens, amounts);
    Ok(payout)
}

/// Checks that custody holds every token's total across `payout`.
pub fn ensure_covered(env: &Env, payout: &Vec<TokenAmount>) -> Result<(), PayrollError> {
    let mut totals: Map<Address, i128> = Map::new(env);
    for line in payout.iter() {
        let so_far = Fixed::from_raw(totals.get(line.token.clone()).unwrap_or(0))?;
        let total = so_far.checked_add(Fixed::from_raw(line.amount)?)?;
        totals.set(line.token, total.raw());
    }

    for (token, total) in totals.iter() {
        if custody::token_balance(env, &token) < Fixed::from_raw(total)? {
            log!(env, "payday short on custody", token, total);
            return Err(PayrollError::InsufficientFunds);
        }
    }
    Ok(())
}

/// What `payday` would pay `address` at current rates, without checking
/// timing or custody.
pub fn calculate_payout(env: &Env, address: &Address) -> Result<Vec<TokenAmount>, PayrollError> {
    let record = employees::get_active_by_address(env, address)?;
    let split = allocation::read_allocation(env, record.id).ok_or(PayrollError::NoAllocation)?;
    compute_payout(env, &record, &split)
}

pub fn last_paid_at(env: &Env, address: &Address) -> Result<Option<u64>, PayrollError> {
    let id = employees::address_to_id(env, address);
    if id == 0 {
        return Err(PayrollError::NotFound);
    }
    employees::get_employee(env, id).map(|record| record.last_paid_at)
}

/// Per line, in allocation order:
/// `floor(annual / 12)` → `floor(· × pct / 100)` → `floor(· × 10^18 / price)`.
fn compute_payout(
    env: &Env,
    record: &Employee,
    split: &Allocation,
) -> Result<Vec<TokenAmount>, PayrollError> {
    let monthly = accounting::monthly_salary(record.annual_salary)?;

    let mut payout = Vec::new(env);
    for (token, percentage) in split.tokens.iter().zip(split.percentages.iter()) {
        let price = rates::get_rate(env, &token)?;
        let amount = monthly
            .mul_ratio(env, percentage as i128, PERCENT)?
            .div_price(env, price)?;
        payout.push_back(TokenAmount {
            token,
            amount: amount.raw(),
        });
    }
    Ok(payout)
}
