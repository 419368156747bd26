//! Employee roster.
//!
//! Records live in an id-indexed arena: ids are handed out densely from 1 and
//! are never reused. Removal only clears `active`, so allocations and
//! projections that refer to a removed id stay well defined.

use soroban_sdk::{Address, Env, Vec};

use crate::access;
use crate::errors::PayrollError;
use crate::events;
use crate::storage::{self, DataKey, Employee};

pub fn add_employee(
    env: &Env,
    caller: &Address,
    address: Address,
    permitted_tokens: Vec<Address>,
    annual_salary: i128,
) -> Result<u64, PayrollError> {
    access::require_owner(env, caller)?;

    if permitted_tokens.is_empty() || has_duplicates(&permitted_tokens) {
        return Err(PayrollError::InvalidInput);
    }
    if annual_salary <= 0 {
        return Err(PayrollError::InvalidInput);
    }
    if address_to_id(env, &address) != 0 {
        return Err(PayrollError::InvalidInput);
    }

    let id = employee_count(env) + 1;
    let employee = Employee {
        id,
        address: address.clone(),
        permitted_tokens,
        annual_salary,
        active: true,
        added_at: env.ledger().timestamp(),
        last_paid_at: None,
    };

    write_employee(env, &employee);
    storage::write_persistent(env, &DataKey::EmployeeId(address.clone()), &id);
    storage::write_counter(env, &DataKey::EmployeeCount, id);
    storage::write_counter(env, &DataKey::ActiveEmployeeCount, active_employee_count(env) + 1);
    storage::extend_instance(env);

    events::emit_employee_added(env, id, address, annual_salary);
    Ok(id)
}

pub fn remove_employee(env: &Env, caller: &Address, id: u64) -> Result<(), PayrollError> {
    access::require_owner(env, caller)?;

    let mut employee = get_employee(env, id)?;
    if !employee.active {
        return Err(PayrollError::InvalidInput);
    }
    employee.active = false;

    write_employee(env, &employee);
    storage::write_counter(env, &DataKey::ActiveEmployeeCount, active_employee_count(env) - 1);
    storage::extend_instance(env);

    events::emit_employee_removed(env, id, employee.address);
    Ok(())
}

pub fn set_employee_salary(
    env: &Env,
    caller: &Address,
    id: u64,
    annual_salary: i128,
) -> Result<(), PayrollError> {
    access::require_owner(env, caller)?;
    if annual_salary <= 0 {
        return Err(PayrollError::InvalidInput);
    }

    let mut employee = get_employee(env, id)?;
    if !employee.active {
        return Err(PayrollError::NotFound);
    }
    let previous = employee.annual_salary;
    employee.annual_salary = annual_salary;

    write_employee(env, &employee);
    storage::extend_instance(env);

    events::emit_salary_changed(env, id, previous, annual_salary);
    Ok(())
}

pub fn get_employee(env: &Env, id: u64) -> Result<Employee, PayrollError> {
    storage::read_persistent(env, &DataKey::Employee(id)).ok_or(PayrollError::NotFound)
}

/// Resolves an address to its active employee record.
pub fn get_active_by_address(env: &Env, address: &Address) -> Result<Employee, PayrollError> {
    let id = address_to_id(env, address);
    if id == 0 {
        return Err(PayrollError::NotFound);
    }
    let employee = get_employee(env, id)?;
    if !employee.active {
        return Err(PayrollError::NotFound);
    }
    Ok(employee)
}

pub fn write_employee(env: &Env, employee: &Employee) {
    storage::write_persistent(env, &DataKey::Employee(employee.id), employee);
}

pub fn employee_count(env: &Env) -> u64 {
    storage::read_counter(env, &DataKey::EmployeeCount)
}

pub fn active_employee_count(env: &Env) -> u64 {
    storage::read_counter(env, &DataKey::ActiveEmployeeCount)
}

/// Id for `address`, or 0 when the address was never registered.
pub fn address_to_id(env: &Env, address: &Address) -> u64 {
    storage::read_persistent(env, &DataKey::EmployeeId(address.clone())).unwrap_or(0u64)
}

/// Active employees in id order.
pub fn active_employees(env: &Env) -> Vec<Employee> {
    let mut active = Vec::new(env);
    for id in 1..=employee_count(env) {
        if let Some(employee) = storage::read_persistent::<Employee>(env, &DataKey::Employee(id)) {
            if employee.active {
                active.push_back(employee);
            }
        }
    }
    active
}

pub fn has_duplicates(tokens: &Vec<Address>) -> bool {
    for (i, token) in tokens.iter().enumerate() {
        for other in tokens.iter().skip(i + 1) {
            if token == other {
                return true;
            }
        }
    }
    false
}
