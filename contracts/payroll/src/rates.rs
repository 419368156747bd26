use soroban_sdk::{Address, Env, Vec};

use crate::access;
use crate::errors::PayrollError;
use crate::events;
use crate::fixed_point::Fixed;
use crate::storage::{self, DataKey, ExchangeRate};

pub fn set_exchange_rate(
    env: &Env,
    caller: &Address,
    token: Address,
    price: i128,
) -> Result<(), PayrollError> {
    access::require_oracle(env, caller)?;
    if price <= 0 {
        return Err(PayrollError::InvalidInput);
    }

    write_rate(env, token, price);
    storage::extend_instance(env);
    Ok(())
}

/// Batch form of [`set_exchange_rate`]. Every entry is validated before the
/// first one is written, so a rejected batch leaves all rates untouched.
pub fn set_exchange_rates(
    env: &Env,
    caller: &Address,
    tokens: Vec<Address>,
    prices: Vec<i128>,
) -> Result<(), PayrollError> {
    access::require_oracle(env, caller)?;
    if tokens.len() != prices.len() {
        return Err(PayrollError::InvalidInput);
    }
    if prices.iter().any(|price| price <= 0) {
        return Err(PayrollError::InvalidInput);
    }

    for (token, price) in tokens.iter().zip(prices.iter()) {
        write_rate(env, token, price);
    }
    storage::extend_instance(env);
    Ok(())
}

pub fn get_rate(env: &Env, token: &Address) -> Result<Fixed, PayrollError> {
    read_rate(env, token).and_then(|rate| Fixed::from_raw(rate.price))
}

pub fn get_rate_updated_at(env: &Env, token: &Address) -> Result<u64, PayrollError> {
    read_rate(env, token).map(|rate| rate.updated_at)
}

/// Tokens that have ever been priced, in first-registration order. This is
/// the iteration order of every projection.
pub fn priced_tokens(env: &Env) -> Vec<Address> {
    storage::read_token_list(env, &DataKey::PricedTokens)
}

fn read_rate(env: &Env, token: &Address) -> Result<ExchangeRate, PayrollError> {
    storage::read_persistent(env, &DataKey::Rate(token.clone())).ok_or(PayrollError::RateNotSet)
}

fn write_rate(env: &Env, token: Address, price: i128) {
    let rate = ExchangeRate {
        price,
        updated_at: env.ledger().timestamp(),
    };
    storage::write_persistent(env, &DataKey::Rate(token.clone()), &rate);
    storage::register_token(env, &DataKey::PricedTokens, &token);
    events::emit_rate_set(env, token, price);
}
