//! Read-only payroll projections: burn rates and runway.
//!
//! Nothing here writes to storage or caches anything; every call recomputes
//! from the current roster, allocations, rates and custody balances.

use soroban_sdk::{contracttype, Address, Env, Map, Vec};

use crate::allocation;
use crate::custody;
use crate::employees;
use crate::errors::PayrollError;
use crate::fixed_point::Fixed;
use crate::rates;

pub const MONTHS_PER_YEAR: i128 = 12;
pub const DAYS_PER_YEAR: i128 = 365;
pub const PERCENT: i128 = 100;

/// Daily quantity of one token consumed by the active payroll.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct TokenBurnRate {
    pub token: Address,
    pub daily_burn: i128,
}

/// `daily_reference` is the aggregate daily cost in reference currency of
/// every active employee with an allocation; `tokens` breaks it down per
/// token, in rate-registration order.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct BurnRates {
    pub daily_reference: i128,
    pub tokens: Vec<TokenBurnRate>,
}

/// The token that runs out first and how many whole days it lasts.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Runway {
    pub token: Address,
    pub days: u128,
}

/// `floor(annual_salary / 12)`.
pub fn monthly_salary(annual_salary: i128) -> Result<Fixed, PayrollError> {
    Fixed::from_raw(annual_salary)?.div_int(MONTHS_PER_YEAR)
}

/// `floor(annual_salary / 365)`.
pub fn daily_salary(annual_salary: i128) -> Result<Fixed, PayrollError> {
    Fixed::from_raw(annual_salary)?.div_int(DAYS_PER_YEAR)
}

/// Monthly reference-currency cost of all active employees.
pub fn calculate_payroll_burnrate(env: &Env) -> Result<i128, PayrollError> {
    let mut total = Fixed::ZERO;
    for employee in employees::active_employees(env).iter() {
        total = total.checked_add(monthly_salary(employee.annual_salary)?)?;
    }
    Ok(total.raw())
}

/// Per-token daily burn of the active payroll.
///
/// For each allocation entry the burn is `floor(annual / 365)`, then
/// `floor(· × pct / 100)`, then truncated to whole tokens at the token's
/// price. Fails with `RateNotSet` if any referenced token is unpriced.
pub fn calculate_burnrates_for_tokens(env: &Env) -> Result<BurnRates, PayrollError> {
    let mut burns: Map<Address, i128> = Map::new(env);
    let mut daily_reference = Fixed::ZERO;

    for employee in employees::active_employees(env).iter() {
        let Some(split) = allocation::read_allocation(env, employee.id) else {
            continue;
        };
        let daily = daily_salary(employee.annual_salary)?;
        daily_reference = daily_reference.checked_add(daily)?;

        for (token, percentage) in split.tokens.iter().zip(split.percentages.iter()) {
            let price = rates::get_rate(env, &token)?;
            let burn = daily
                .mul_ratio(env, percentage as i128, PERCENT)?
                .whole_units_at(price)?;
            let accumulated = Fixed::from_raw(burns.get(token.clone()).unwrap_or(0))?;
            burns.set(token, accumulated.checked_add(burn)?.raw());
        }
    }

    let mut tokens = Vec::new(env);
    for token in rates::priced_tokens(env).iter() {
        if let Some(daily_burn) = burns.get(token.clone()) {
            tokens.push_back(TokenBurnRate { token, daily_burn });
        }
    }

    Ok(BurnRates {
        daily_reference: daily_reference.raw(),
        tokens,
    })
}

/// Shortest runway across tokens with a nonzero burn.
///
/// Runway for a token is `floor(custody_balance / daily_burn)` days. When two
/// tokens share the minimum, the one priced first wins. Zero-burn tokens are
/// skipped; if nothing burns the result is `NotFound`.
pub fn calculate_payroll_runway(env: &Env) -> Result<Runway, PayrollError> {
    let burn_rates = calculate_burnrates_for_tokens(env)?;

    let mut shortest: Option<Runway> = None;
    for entry in burn_rates.tokens.iter() {
        let burn = Fixed::from_raw(entry.daily_burn)?;
        if burn.is_zero() {
            continue;
        }
        let days = custody::token_balance(env, &entry.token).count_of(burn)?;
        let replace = match &shortest {
            Some(current) => days < current.days,
            None => true,
        };
        if replace {
            shortest = Some(Runway {
                token: entry.token,
                days,
            });
        }
    }

    shortest.ok_or(PayrollError::NotFound)
}
