#![no_std]

//! SEP-41 fungible token used as the payroll's token collaborator in tests and
//! local deployments. Amounts use the decimal scale passed to `initialize`.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

/// Persistent-storage TTL bump, roughly 30 days of ~5 s ledgers.
const BALANCE_BUMP_LEDGERS: u32 = 17_280 * 30;
const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_LEDGERS - 17_280;

const INSTANCE_BUMP_LEDGERS: u32 = 17_280 * 30;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_LEDGERS - 17_280;

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
pub enum DataKey {
    Admin,
    Balance(Address),
    Allowance(Address, Address), // (from, spender)
}

#[contract]
pub struct Token;

fn check_nonnegative_amount(amount: i128) {
    if amount < 0 {
        panic!("Negative amount is not allowed: {}", amount)
    }
}

fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_LEDGERS);
}

fn read_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Not initialized")
}

fn read_balance(e: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match e.storage().persistent().get::<DataKey, i128>(&key) {
        Some(balance) => {
            e.storage().persistent().extend_ttl(
                &key,
                BALANCE_LIFETIME_THRESHOLD,
                BALANCE_BUMP_LEDGERS,
            );
            balance
        }
        None => 0,
    }
}

fn write_balance(e: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_LEDGERS);
}

fn receive_balance(e: &Env, id: &Address, amount: i128) {
    let balance = read_balance(e, id);
    let next = balance
        .checked_add(amount)
        .expect("Balance overflow");
    write_balance(e, id, next);
}

fn spend_balance(e: &Env, id: &Address, amount: i128) {
    let balance = read_balance(e, id);
    if balance < amount {
        panic!("Insufficient balance");
    }
    write_balance(e, id, balance - amount);
}

fn read_allowance(e: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    match e.storage().persistent().get::<DataKey, AllowanceValue>(&key) {
        Some(allowance) if allowance.expiration_ledger >= e.ledger().sequence() => allowance,
        Some(allowance) => AllowanceValue {
            amount: 0,
            expiration_ledger: allowance.expiration_ledger,
        },
        None => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

fn write_allowance(e: &Env, from: &Address, spender: &Address, amount: i128, expiration_ledger: u32) {
    if amount > 0 && expiration_ledger < e.ledger().sequence() {
        panic!("Expiration ledger is in the past");
    }
    let key = DataKey::Allowance(from.clone(), spender.clone());
    let allowance = AllowanceValue {
        amount,
        expiration_ledger,
    };
    e.storage().persistent().set(&key, &allowance);
    if amount > 0 {
        let live_for = expiration_ledger
            .checked_sub(e.ledger().sequence())
            .expect("Expiration ledger is in the past");
        e.storage().persistent().extend_ttl(&key, live_for, live_for);
    }
}

fn spend_allowance(e: &Env, from: &Address, spender: &Address, amount: i128) {
    let allowance = read_allowance(e, from, spender);
    if allowance.amount < amount {
        panic!("Insufficient allowance");
    }
    if amount > 0 {
        write_allowance(
            e,
            from,
            spender,
            allowance.amount - amount,
            allowance.expiration_ledger,
        );
    }
}

#[contractimpl]
impl Token {
    pub fn initialize(e: Env, admin: Address, decimal: u32, name: String, symbol: String) {
        extend_instance(&e);
        if e.storage().instance().has(&DataKey::Admin) {
            panic!("Already initialized");
        }
        if decimal > 18 {
            panic!("Decimal must not be greater than 18");
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        TokenUtils::new(&e).metadata().set_metadata(&TokenMetadata {
            decimal,
            name,
            symbol,
        });
    }

    pub fn mint(e: Env, to: Address, amount: i128) {
        extend_instance(&e);
        check_nonnegative_amount(amount);
        let admin = read_admin(&e);
        admin.require_auth();

        receive_balance(&e, &to, amount);
        TokenUtils::new(&e).events().mint(admin, to, amount);
    }

    /// Admin-forced removal of funds from `from`, as on regulated assets.
    pub fn clawback(e: Env, from: Address, amount: i128) {
        extend_instance(&e);
        check_nonnegative_amount(amount);
        let admin = read_admin(&e);
        admin.require_auth();

        spend_balance(&e, &from, amount);
        TokenUtils::new(&e).events().clawback(admin, from, amount);
    }

    pub fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        extend_instance(&e);
        read_allowance(&e, &from, &spender).amount
    }

    pub fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        extend_instance(&e);
        from.require_auth();
        check_nonnegative_amount(amount);

        write_allowance(&e, &from, &spender, amount, expiration_ledger);
        TokenUtils::new(&e)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        extend_instance(&e);
        read_balance(&e, &id)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        extend_instance(&e);
        from.require_auth();
        check_nonnegative_amount(amount);

        spend_balance(&e, &from, amount);
        receive_balance(&e, &to, amount);
        TokenUtils::new(&e).events().transfer(from, to, amount);
    }

    pub fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        extend_instance(&e);
        spender.require_auth();
        check_nonnegative_amount(amount);

        spend_allowance(&e, &from, &spender, amount);
        spend_balance(&e, &from, amount);
        receive_balance(&e, &to, amount);
        TokenUtils::new(&e).events().transfer(from, to, amount);
    }

    pub fn burn(e: Env, from: Address, amount: i128) {
        extend_instance(&e);
        from.require_auth();
        check_nonnegative_amount(amount);

        spend_balance(&e, &from, amount);
        TokenUtils::new(&e).events().burn(from, amount);
    }

    pub fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
        extend_instance(&e);
        spender.require_auth();
        check_nonnegative_amount(amount);

        spend_allowance(&e, &from, &spender, amount);
        spend_balance(&e, &from, amount);
        TokenUtils::new(&e).events().burn(from, amount);
    }

    pub fn decimals(e: Env) -> u32 {
        extend_instance(&e);
        TokenUtils::new(&e).metadata().get_metadata().decimal
    }

    pub fn name(e: Env) -> String {
        extend_instance(&e);
        TokenUtils::new(&e).metadata().get_metadata().name
    }

    pub fn symbol(e: Env) -> String {
        extend_instance(&e);
        TokenUtils::new(&e).metadata().get_metadata().symbol
    }
}
