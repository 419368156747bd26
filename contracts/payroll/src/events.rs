//-----------------------------------------------------------------------------
// Events
//-----------------------------------------------------------------------------
//
// Every state change publishes one event. Topics are `(name, subject)` so an
// indexer can filter on the employee id, token or address involved.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

pub const INITIALIZED_EVENT: Symbol = symbol_short!("init");
pub const OWNER_CHANGED_EVENT: Symbol = symbol_short!("owner");
pub const ORACLE_CHANGED_EVENT: Symbol = symbol_short!("oracle");
pub const RATE_SET_EVENT: Symbol = symbol_short!("rate");
pub const EMPLOYEE_ADDED_EVENT: Symbol = symbol_short!("emp_add");
pub const EMPLOYEE_REMOVED_EVENT: Symbol = symbol_short!("emp_rm");
pub const SALARY_CHANGED_EVENT: Symbol = symbol_short!("salary");
pub const ALLOCATION_SET_EVENT: Symbol = symbol_short!("alloc");
pub const DEPOSIT_EVENT: Symbol = symbol_short!("deposit");
pub const TOKEN_DEPOSIT_EVENT: Symbol = symbol_short!("tok_dep");
pub const PAYDAY_EVENT: Symbol = symbol_short!("payday");
pub const ESCAPE_HATCH_EVENT: Symbol = symbol_short!("escape");

pub fn emit_initialized(env: &Env, owner: Address, oracle: Address) {
    env.events().publish((INITIALIZED_EVENT,), (owner, oracle));
}

pub fn emit_owner_changed(env: &Env, previous: Address, owner: Address) {
    env.events().publish((OWNER_CHANGED_EVENT,), (previous, owner));
}

pub fn emit_oracle_changed(env: &Env, oracle: Address) {
    env.events().publish((ORACLE_CHANGED_EVENT,), oracle);
}

pub fn emit_rate_set(env: &Env, token: Address, price: i128) {
    env.events().publish((RATE_SET_EVENT, token), price);
}

pub fn emit_employee_added(env: &Env, id: u64, address: Address, annual_salary: i128) {
    env.events()
        .publish((EMPLOYEE_ADDED_EVENT, id), (address, annual_salary));
}

pub fn emit_employee_removed(env: &Env, id: u64, address: Address) {
    env.events().publish((EMPLOYEE_REMOVED_EVENT, id), address);
}

pub fn emit_salary_changed(env: &Env, id: u64, previous: i128, annual_salary: i128) {
    env.events()
        .publish((SALARY_CHANGED_EVENT, id), (previous, annual_salary));
}

pub fn emit_allocation_set(env: &Env, id: u64, tokens: Vec<Address>, percentages: Vec<u32>) {
    env.events()
        .publish((ALLOCATION_SET_EVENT, id), (tokens, percentages));
}

pub fn emit_deposit(env: &Env, from: Address, amount: i128) {
    env.events().publish((DEPOSIT_EVENT, from), amount);
}

pub fn emit_token_deposit(env: &Env, from: Address, token: Address, amount: i128) {
    env.events()
        .publish((TOKEN_DEPOSIT_EVENT, from), (token, amount));
}

pub fn emit_payday(env: &Env, id: u64, employee: Address, tokens: Vec<Address>, amounts: Vec<i128>) {
    env.events()
        .publish((PAYDAY_EVENT, id), (employee, tokens, amounts));
}

pub fn emit_escape_hatch(env: &Env, owner: Address, settlement_amount: i128) {
    env.events()
        .publish((ESCAPE_HATCH_EVENT,), (owner, settlement_amount));
}
