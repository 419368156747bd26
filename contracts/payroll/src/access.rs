//! Owner / oracle role checks.
//!
//! Both roles are plain fields of [`PayrollConfig`]. A restricted operation
//! starts with `require_owner` or `require_oracle`, which demand the caller's
//! signature and then compare it against the stored role.

use soroban_sdk::{Address, Env};

use crate::errors::PayrollError;
use crate::events;
use crate::storage::{self, PayrollConfig};

pub fn initialize(env: &Env, config: PayrollConfig) -> Result<(), PayrollError> {
    if storage::has_config(env) {
        return Err(PayrollError::AlreadyInitialized);
    }
    if config.pay_period == 0 {
        return Err(PayrollError::InvalidInput);
    }
    config.owner.require_auth();

    storage::write_config(env, &config);
    storage::extend_instance(env);
    events::emit_initialized(env, config.owner, config.oracle);
    Ok(())
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<PayrollConfig, PayrollError> {
    caller.require_auth();
    let config = storage::read_config(env)?;
    if config.owner != *caller {
        return Err(PayrollError::Unauthorized);
    }
    Ok(config)
}

pub fn require_oracle(env: &Env, caller: &Address) -> Result<PayrollConfig, PayrollError> {
    caller.require_auth();
    let config = storage::read_config(env)?;
    if config.oracle != *caller {
        return Err(PayrollError::Unauthorized);
    }
    Ok(config)
}

pub fn set_oracle(env: &Env, caller: &Address, oracle: Address) -> Result<(), PayrollError> {
    let mut config = require_owner(env, caller)?;
    config.oracle = oracle.clone();
    storage::write_config(env, &config);
    storage::extend_instance(env);
    events::emit_oracle_changed(env, oracle);
    Ok(())
}

pub fn transfer_ownership(env: &Env, caller: &Address, owner: Address) -> Result<(), PayrollError> {
    let mut config = require_owner(env, caller)?;
    config.owner = owner.clone();
    storage::write_config(env, &config);
    storage::extend_instance(env);
    events::emit_owner_changed(env, caller.clone(), owner);
    Ok(())
}
