//! Funds held by the payroll contract.
//!
//! Custody keeps its own ledger of what it holds: one aggregate balance for
//! the settlement asset and one balance per token. Stored balances only move
//! through this module, and a debit is written before the matching external
//! transfer is made.

use soroban_sdk::{log, token, Address, Env};

use crate::access;
use crate::errors::PayrollError;
use crate::events;
use crate::fixed_point::Fixed;
use crate::storage::{self, DataKey};

/// Deposits `amount` of the settlement asset from `from`.
pub fn add_funds(env: &Env, from: &Address, amount: i128) -> Result<(), PayrollError> {
    from.require_auth();
    if amount <= 0 {
        return Err(PayrollError::InvalidInput);
    }
    let config = storage::read_config(env)?;

    let credited = Fixed::from_raw(storage::read_settlement_balance(env))?
        .checked_add(Fixed::from_raw(amount)?)?;

    let client = token::Client::new(env, &config.settlement_token);
    let result = client.try_transfer(from, &env.current_contract_address(), &amount);
    if !matches!(result, Ok(Ok(()))) {
        log!(env, "settlement deposit rejected", from.clone(), amount);
        return Err(PayrollError::TransferFailed);
    }

    storage::write_settlement_balance(env, credited.raw());
    storage::extend_instance(env);
    events::emit_deposit(env, from.clone(), amount);
    Ok(())
}

/// Pulls `amount` of `token` from `from`, who must have approved this
/// contract as spender beforehand.
pub fn add_token_funds(
    env: &Env,
    from: &Address,
    token: Address,
    amount: i128,
) -> Result<(), PayrollError> {
    from.require_auth();
    if amount <= 0 {
        return Err(PayrollError::TransferFailed);
    }

    let credited = token_balance(env, &token).checked_add(Fixed::from_raw(amount)?)?;

    let this = env.current_contract_address();
    let client = token::Client::new(env, &token);
    let result = client.try_transfer_from(&this, from, &this, &amount);
    if !matches!(result, Ok(Ok(()))) {
        log!(env, "token deposit rejected", from.clone(), token, amount);
        return Err(PayrollError::TransferFailed);
    }

    storage::write_persistent(env, &DataKey::TokenBalance(token.clone()), &credited.raw());
    storage::register_token(env, &DataKey::CustodyTokens, &token);
    storage::extend_instance(env);
    events::emit_token_deposit(env, from.clone(), token, amount);
    Ok(())
}

/// Lowers the stored balance of `token` by `amount`.
pub fn debit(env: &Env, token: &Address, amount: Fixed) -> Result<(), PayrollError> {
    let remaining = token_balance(env, token).checked_sub(amount)?;
    storage::write_persistent(env, &DataKey::TokenBalance(token.clone()), &remaining.raw());
    Ok(())
}

/// Sends `amount` of `token` from the contract to `to`. Call only after the
/// amount has been debited.
pub fn release(env: &Env, token: &Address, to: &Address, amount: Fixed) -> Result<(), PayrollError> {
    let client = token::Client::new(env, token);
    let result = client.try_transfer(&env.current_contract_address(), to, &amount.raw());
    if !matches!(result, Ok(Ok(()))) {
        log!(env, "release rejected", token.clone(), to.clone(), amount.raw());
        return Err(PayrollError::TransferFailed);
    }
    Ok(())
}

pub fn token_balance(env: &Env, token: &Address) -> Fixed {
    let raw: i128 =
        storage::read_persistent(env, &DataKey::TokenBalance(token.clone())).unwrap_or(0);
    Fixed::from_raw(raw).unwrap_or(Fixed::ZERO)
}

pub fn settlement_balance(env: &Env) -> i128 {
    storage::read_settlement_balance(env)
}

/// Owner-only emergency exit: every custody balance goes to the owner.
pub fn escape_hatch(env: &Env, caller: &Address) -> Result<(), PayrollError> {
    let config = access::require_owner(env, caller)?;

    let settlement = Fixed::from_raw(storage::read_settlement_balance(env))?;
    if !settlement.is_zero() {
        storage::write_settlement_balance(env, 0);
        release(env, &config.settlement_token, &config.owner, settlement)?;
    }

    for token in storage::read_token_list(env, &DataKey::CustodyTokens).iter() {
        let balance = token_balance(env, &token);
        if balance.is_zero() {
            continue;
        }
        debit(env, &token, balance)?;
        release(env, &token, &config.owner, balance)?;
    }

    storage::extend_instance(env);
    events::emit_escape_hatch(env, config.owner, settlement.raw());
    Ok(())
}
