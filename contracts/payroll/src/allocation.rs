use soroban_sdk::{Address, Env, Vec};

use crate::employees;
use crate::errors::PayrollError;
use crate::events;
use crate::storage::{self, Allocation, DataKey};

const FULL_ALLOCATION: u32 = 100;

/// Stores `employee`'s salary split, replacing any previous one.
///
/// The split must name each token at most once, only use tokens from the
/// employee's permitted set, and its percentages must add up to exactly 100.
pub fn determine_allocation(
    env: &Env,
    employee: &Address,
    tokens: Vec<Address>,
    percentages: Vec<u32>,
) -> Result<(), PayrollError> {
    employee.require_auth();
    let record = employees::get_active_by_address(env, employee)?;

    if tokens.is_empty() || tokens.len() != percentages.len() {
        return Err(PayrollError::InvalidInput);
    }
    if employees::has_duplicates(&tokens) {
        return Err(PayrollError::InvalidInput);
    }
    if tokens
        .iter()
        .any(|token| !record.permitted_tokens.contains(&token))
    {
        return Err(PayrollError::InvalidInput);
    }

    let mut total: u32 = 0;
    for percentage in percentages.iter() {
        if percentage > FULL_ALLOCATION {
            return Err(PayrollError::InvalidInput);
        }
        total += percentage;
    }
    if total != FULL_ALLOCATION {
        return Err(PayrollError::InvalidInput);
    }

    let allocation = Allocation {
        tokens: tokens.clone(),
        percentages: percentages.clone(),
    };
    storage::write_persistent(env, &DataKey::Allocation(record.id), &allocation);
    storage::extend_instance(env);

    events::emit_allocation_set(env, record.id, tokens, percentages);
    Ok(())
}

pub fn get_allocation_for_address(env: &Env, address: &Address) -> Result<Allocation, PayrollError> {
    let id = employees::address_to_id(env, address);
    if id == 0 {
        return Err(PayrollError::NotFound);
    }
    read_allocation(env, id).ok_or(PayrollError::NotFound)
}

pub fn read_allocation(env: &Env, id: u64) -> Option<Allocation> {
    storage::read_persistent(env, &DataKey::Allocation(id))
}
