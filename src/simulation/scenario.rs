//! Random scenario generation.
//!
//! Builds random groups with evenly split expenses and a mix of payment
//! statuses, for benchmarks, stress tests, and the CLI `generate` command.

use crate::core::expense::{even_splits, Expense};
use crate::core::group::{Group, GroupId};
use crate::core::member::MemberId;
use crate::core::money::CurrencyCode;
use crate::core::payment::{Payment, PaymentStatus};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random group scenario.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of expenses to generate.
    pub expense_count: usize,
    /// Number of payments to generate (random statuses).
    pub payment_count: usize,
    /// Currency tag for the group.
    pub currency: CurrencyCode,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            payment_count: 5,
            currency: CurrencyCode::new("USD"),
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
        }
    }
}

/// A generated group with its expenses and payments.
#[derive(Debug, Clone)]
pub struct GroupScenario {
    pub group: Group,
    pub expenses: Vec<Expense>,
    pub payments: Vec<Payment>,
}

/// Generate a random group scenario.
///
/// Expenses are split evenly across a random subset of members (always
/// including the payer), so every generated expense is well-formed and
/// the resulting balances satisfy the zero-sum invariant exactly.
pub fn generate_group_scenario(config: &ScenarioConfig) -> GroupScenario {
    let mut rng = rand::thread_rng();

    let members: Vec<MemberId> = (0..config.member_count)
        .map(|i| MemberId::new(format!("member-{:03}", i)))
        .collect();

    let group_id = GroupId::new("generated");
    let group = Group::new(group_id.clone(), "Generated Group", config.currency.clone())
        .with_members(members.iter().cloned());

    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(5.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(500.0);

    let mut expenses = Vec::with_capacity(config.expense_count);
    for _ in 0..config.expense_count {
        let payer_idx = rng.gen_range(0..members.len());
        let amount_f64 = rng.gen_range(min_f64..max_f64);
        let amount = Decimal::from_f64_retain(amount_f64)
            .unwrap_or(Decimal::from(10))
            .round_dp(2);
        if amount <= Decimal::ZERO {
            continue;
        }

        // Random participant subset, payer always included.
        let mut participants: Vec<MemberId> = members
            .iter()
            .filter(|m| *m != &members[payer_idx] && rng.gen_bool(0.6))
            .cloned()
            .collect();
        participants.push(members[payer_idx].clone());

        expenses.push(Expense::new(
            group_id.clone(),
            members[payer_idx].clone(),
            amount,
            even_splits(amount, &participants),
        ));
    }

    let mut payments = Vec::with_capacity(config.payment_count);
    for _ in 0..config.payment_count {
        let from_idx = rng.gen_range(0..members.len());
        let mut to_idx = rng.gen_range(0..members.len());
        while to_idx == from_idx {
            to_idx = rng.gen_range(0..members.len());
        }
        let amount_f64 = rng.gen_range(min_f64..max_f64);
        let amount = Decimal::from_f64_retain(amount_f64)
            .unwrap_or(Decimal::from(10))
            .round_dp(2);
        if amount <= Decimal::ZERO {
            continue;
        }
        let status = match rng.gen_range(0..3) {
            0 => PaymentStatus::Pending,
            1 => PaymentStatus::Completed,
            _ => PaymentStatus::Failed,
        };
        payments.push(Payment::new(
            group_id.clone(),
            members[from_idx].clone(),
            members[to_idx].clone(),
            amount,
            status,
        ));
    }

    GroupScenario {
        group,
        expenses,
        payments,
    }
}
