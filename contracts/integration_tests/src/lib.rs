#![no_std]

/// End-to-end tests for the multi-token payroll.
///
/// These run the payroll contract against real token contracts through the
/// whole lifecycle a deployment goes through:
///   1. SETUP       – owner hands the oracle role over, oracle prices tokens
///   2. FUNDING     – settlement asset and two payout tokens are deposited
///   3. ONBOARDING  – an employee is hired and chooses a 60 / 40 split
///   4. PROJECTION  – burn rates and runway reflect roster, rates and custody
///   5. PAYDAY      – the employee is paid, once per period, all or nothing
#[cfg(test)]
mod e2e {
    use multi_token_payroll::{Payroll, PayrollClient, PayrollConfig, PayrollError, SCALE};
    use soroban_sdk::{
        testutils::{Address as _, Events, Ledger as _},
        vec, Address, Env, String, Vec,
    };
    use token::{Token, TokenClient};

    // ── Helpers ──────────────────────────────────────────────────────────────

    const MONTH: u64 = 30 * 24 * 60 * 60;

    fn units(n: i128) -> i128 {
        n * SCALE
    }

    fn deploy_token<'a>(env: &Env, issuer: &Address, symbol: &str) -> TokenClient<'a> {
        let id = env.register_contract(None, Token);
        let client = TokenClient::new(env, &id);
        client.initialize(
            issuer,
            &18,
            &String::from_str(env, symbol),
            &String::from_str(env, symbol),
        );
        client
    }

    struct TestContext<'a> {
        env: Env,
        owner: Address,
        oracle: Address,
        treasury: Address,
        alice: Address,
        bob: Address,
        native: TokenClient<'a>,
        widget: TokenClient<'a>,
        pay: TokenClient<'a>,
        payroll: PayrollClient<'a>,
    }

    fn setup() -> TestContext<'static> {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_700_000_000);

        // ── Actors ────────────────────────────────────────────────────────────
        let owner = Address::generate(&env);
        let oracle = Address::generate(&env);
        let treasury = Address::generate(&env);
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        let issuer = Address::generate(&env);

        // ── Tokens ────────────────────────────────────────────────────────────
        let native = deploy_token(&env, &issuer, "XLM");
        let widget = deploy_token(&env, &issuer, "WGT");
        let pay = deploy_token(&env, &issuer, "PAY");
        for token in [&native, &widget, &pay] {
            token.mint(&treasury, &units(1_000_000));
        }

        // ── Payroll ───────────────────────────────────────────────────────────
        // The owner starts out as its own oracle until one is appointed.
        let payroll_id = env.register_contract(None, Payroll);
        let payroll = PayrollClient::new(&env, &payroll_id);
        payroll.initialize(&PayrollConfig {
            owner: owner.clone(),
            oracle: owner.clone(),
            settlement_token: native.address.clone(),
            pay_period: MONTH,
        });

        TestContext {
            env,
            owner,
            oracle,
            treasury,
            alice,
            bob,
            native,
            widget,
            pay,
            payroll,
        }
    }

    impl<'a> TestContext<'a> {
        fn tokens(&self) -> Vec<Address> {
            vec![&self.env, self.widget.address.clone(), self.pay.address.clone()]
        }

        fn fund(&self, token: &TokenClient, amount: i128) {
            let expiration = self.env.ledger().sequence() + 100;
            token.approve(&self.treasury, &self.payroll.address, &amount, &expiration);
            self.payroll
                .add_token_funds(&self.treasury, &token.address, &amount);
        }

        /// Appoints the oracle, prices WGT at 0.25 and PAY at 0.2, deposits
        /// 50 000 of each and hires Alice at 102 000 a year on a 60 / 40 split.
        fn onboard_alice(&self) {
            self.payroll.set_oracle(&self.owner, &self.oracle);
            self.payroll.set_exchange_rates(
                &self.oracle,
                &self.tokens(),
                &vec![&self.env, SCALE / 4, SCALE / 5],
            );
            self.fund(&self.widget, units(50_000));
            self.fund(&self.pay, units(50_000));
            self.payroll
                .add_employee(&self.owner, &self.alice, &self.tokens(), &units(102_000));
            self.payroll
                .determine_allocation(&self.alice, &self.tokens(), &vec![&self.env, 60u32, 40u32]);
        }

        fn advance(&self, seconds: u64) {
            self.env
                .ledger()
                .set_timestamp(self.env.ledger().timestamp() + seconds);
        }
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// Full happy-path: Setup → Funding → Onboarding → Projection → Payday.
    #[test]
    fn test_e2e_full_payroll_flow() {
        let ctx = setup();

        // ── PHASE 1: SETUP ────────────────────────────────────────────────────
        assert_eq!(ctx.payroll.get_owner(), ctx.owner);
        ctx.payroll.set_oracle(&ctx.owner, &ctx.oracle);
        assert_eq!(ctx.payroll.get_oracle(), ctx.oracle);

        ctx.payroll
            .set_exchange_rate(&ctx.oracle, &ctx.widget.address, &(SCALE / 2));
        assert_eq!(ctx.payroll.get_rate(&ctx.widget.address), SCALE / 2);

        // Batch update reprices WGT and introduces PAY.
        ctx.payroll.set_exchange_rates(
            &ctx.oracle,
            &ctx.tokens(),
            &vec![&ctx.env, SCALE / 4, SCALE / 5],
        );
        assert_eq!(ctx.payroll.get_rate(&ctx.widget.address), SCALE / 4);
        assert_eq!(ctx.payroll.get_rate(&ctx.pay.address), SCALE / 5);

        // ── PHASE 2: FUNDING ──────────────────────────────────────────────────
        ctx.payroll.add_funds(&ctx.treasury, &units(1));
        assert_eq!(ctx.native.balance(&ctx.payroll.address), units(1));
        assert_eq!(ctx.payroll.get_settlement_balance(), units(1));

        let deposit = units(50_000);
        ctx.fund(&ctx.widget, deposit);
        ctx.fund(&ctx.pay, deposit);
        assert_eq!(ctx.widget.balance(&ctx.payroll.address), deposit);
        assert_eq!(ctx.pay.balance(&ctx.payroll.address), deposit);

        // ── PHASE 3: ONBOARDING ───────────────────────────────────────────────
        let salary = units(102_000);
        let id = ctx
            .payroll
            .add_employee(&ctx.owner, &ctx.alice, &ctx.tokens(), &salary);
        assert_eq!(id, 1);
        assert_eq!(ctx.payroll.get_employee_count(), 1);
        assert_eq!(ctx.payroll.get_active_employee_count(), 1);
        assert_eq!(ctx.payroll.employee_address_to_id(&ctx.alice), 1);

        let record = ctx.payroll.get_employee(&1);
        assert_eq!(record.address, ctx.alice);
        assert_eq!(record.permitted_tokens, ctx.tokens());
        assert_eq!(record.annual_salary, salary);

        ctx.payroll
            .determine_allocation(&ctx.alice, &ctx.tokens(), &vec![&ctx.env, 60u32, 40u32]);
        let allocation = ctx.payroll.get_allocation_for_address(&ctx.alice);
        assert_eq!(allocation.tokens, ctx.tokens());
        assert_eq!(allocation.percentages, vec![&ctx.env, 60u32, 40u32]);

        // ── PHASE 4: PROJECTION ───────────────────────────────────────────────
        assert_eq!(ctx.payroll.calculate_payroll_burnrate(), salary / 12);

        let burn = ctx.payroll.calculate_burnrates_for_tokens();
        assert_eq!(burn.tokens.get(0).unwrap().daily_burn, units(670));
        assert_eq!(burn.tokens.get(1).unwrap().daily_burn, units(558));

        let runway = ctx.payroll.calculate_payroll_runway();
        assert_eq!(runway.token, ctx.widget.address);
        assert_eq!(runway.days, 74);

        // ── PHASE 5: PAYDAY ───────────────────────────────────────────────────
        // 8 500 a month: 5 100 at 0.25 and 3 400 at 0.2.
        ctx.payroll.payday(&ctx.alice);

        let (contract, _, _) = ctx.env.events().all().last().unwrap();
        assert_eq!(
            contract, ctx.payroll.address,
            "Payday must finish with the payroll's own event"
        );

        assert_eq!(
            ctx.widget.balance(&ctx.alice),
            units(20_400),
            "Alice must receive 60% of a month in WGT"
        );
        assert_eq!(
            ctx.pay.balance(&ctx.alice),
            units(17_000),
            "Alice must receive 40% of a month in PAY"
        );
        assert_eq!(ctx.widget.balance(&ctx.payroll.address), deposit - units(20_400));
        assert_eq!(ctx.pay.balance(&ctx.payroll.address), deposit - units(17_000));
        assert_eq!(
            ctx.payroll.get_token_balance(&ctx.widget.address),
            deposit - units(20_400)
        );
    }

    /// Paying twice within one pay period is rejected; the next period pays.
    #[test]
    fn test_one_payday_per_period() {
        let ctx = setup();
        ctx.onboard_alice();

        ctx.payroll.payday(&ctx.alice);
        ctx.advance(MONTH / 2);
        assert_eq!(
            ctx.payroll.try_payday(&ctx.alice),
            Err(Ok(PayrollError::TooEarly))
        );
        assert_eq!(ctx.widget.balance(&ctx.alice), units(20_400));

        ctx.advance(MONTH / 2);
        ctx.payroll.payday(&ctx.alice);
        assert_eq!(ctx.widget.balance(&ctx.alice), units(40_800));
        assert_eq!(ctx.pay.balance(&ctx.alice), units(34_000));
    }

    /// Once custody can no longer cover a full payout nothing moves at all.
    #[test]
    fn test_exhausted_custody_pays_nothing() {
        let ctx = setup();
        ctx.onboard_alice();

        // Two paydays leave 9 200 WGT and 16 000 PAY, short of 20 400 and
        // 17 000.
        ctx.payroll.payday(&ctx.alice);
        ctx.advance(MONTH);
        ctx.payroll.payday(&ctx.alice);
        ctx.advance(MONTH);

        let widget_before = ctx.widget.balance(&ctx.alice);
        let pay_before = ctx.pay.balance(&ctx.alice);
        assert_eq!(
            ctx.payroll.try_payday(&ctx.alice),
            Err(Ok(PayrollError::InsufficientFunds))
        );
        assert_eq!(ctx.widget.balance(&ctx.alice), widget_before);
        assert_eq!(ctx.pay.balance(&ctx.alice), pay_before);

        // Topping up makes Alice payable again.
        ctx.fund(&ctx.widget, units(50_000));
        ctx.fund(&ctx.pay, units(50_000));
        ctx.payroll.payday(&ctx.alice);
        assert_eq!(ctx.widget.balance(&ctx.alice), widget_before + units(20_400));
    }

    /// Removing an employee stops their pay and drops them from projections.
    #[test]
    fn test_removed_employee_leaves_the_books() {
        let ctx = setup();
        ctx.onboard_alice();
        ctx.payroll
            .add_employee(&ctx.owner, &ctx.bob, &ctx.tokens(), &units(60_000));
        assert_eq!(ctx.payroll.get_employee_count(), 2);
        assert_eq!(
            ctx.payroll.calculate_payroll_burnrate(),
            units(102_000) / 12 + units(5_000)
        );

        ctx.payroll.remove_employee(&ctx.owner, &1);

        assert_eq!(ctx.payroll.get_employee_count(), 2);
        assert_eq!(ctx.payroll.get_active_employee_count(), 1);
        assert_eq!(ctx.payroll.calculate_payroll_burnrate(), units(5_000));
        assert_eq!(
            ctx.payroll.try_payday(&ctx.alice),
            Err(Ok(PayrollError::NotFound))
        );
        // Bob never chose a split, so nothing burns.
        assert_eq!(
            ctx.payroll.try_calculate_payroll_runway(),
            Err(Ok(PayrollError::NotFound))
        );
    }

    /// A replaced oracle loses the right to publish rates.
    #[test]
    fn test_oracle_rotation() {
        let ctx = setup();
        ctx.onboard_alice();
        let successor = Address::generate(&ctx.env);

        ctx.payroll.set_oracle(&ctx.owner, &successor);

        assert_eq!(
            ctx.payroll
                .try_set_exchange_rate(&ctx.oracle, &ctx.widget.address, &(SCALE / 2)),
            Err(Ok(PayrollError::Unauthorized))
        );
        ctx.payroll
            .set_exchange_rate(&successor, &ctx.widget.address, &(SCALE / 2));

        // New rate flows straight into the next payout.
        ctx.payroll.payday(&ctx.alice);
        assert_eq!(ctx.widget.balance(&ctx.alice), units(10_200));
    }

    /// The escape hatch sends whatever custody holds back to the owner.
    #[test]
    fn test_escape_hatch_after_payday() {
        let ctx = setup();
        ctx.onboard_alice();
        ctx.payroll.add_funds(&ctx.treasury, &units(1));
        ctx.payroll.payday(&ctx.alice);

        ctx.payroll.escape_hatch(&ctx.owner);

        assert_eq!(ctx.native.balance(&ctx.owner), units(1));
        assert_eq!(ctx.widget.balance(&ctx.owner), units(50_000 - 20_400));
        assert_eq!(ctx.pay.balance(&ctx.owner), units(50_000 - 17_000));
        assert_eq!(ctx.widget.balance(&ctx.payroll.address), 0);
        assert_eq!(ctx.pay.balance(&ctx.payroll.address), 0);
        assert_eq!(
            ctx.payroll.try_payday(&ctx.alice),
            Err(Ok(PayrollError::TooEarly))
        );
    }
}
