//! Basic balance and settlement example.
//!
//! Walks through the canonical three-member scenario: one dinner paid by
//! one member and split evenly, then a partial settlement payment.

use rust_decimal_macros::dec;
use split_engine::core::expense::{even_splits, Expense};
use split_engine::core::group::{Group, GroupId};
use split_engine::core::member::MemberId;
use split_engine::core::money::CurrencyCode;
use split_engine::core::payment::{Payment, PaymentStatus};
use split_engine::store::repository::{GroupQueries, InMemoryStore};

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   split-engine: Basic Split Example      ║");
    println!("╚══════════════════════════════════════════╝\n");

    let alice = MemberId::new("alice");
    let bob = MemberId::new("bob");
    let carol = MemberId::new("carol");
    let g1 = GroupId::new("g1");

    let mut store = InMemoryStore::new();
    store.add_group(
        Group::new(g1.clone(), "Vacation Trip", CurrencyCode::new("USD"))
            .with_members([alice.clone(), bob.clone(), carol.clone()]),
    );

    // --- Scenario 1: one dinner, split evenly ---
    println!("━━━ Scenario 1: Dinner, 120 split three ways ━━━\n");

    let members = [alice.clone(), bob.clone(), carol.clone()];
    store
        .add_expense(
            Expense::new(g1.clone(), alice.clone(), dec!(120), even_splits(dec!(120), &members))
                .with_description("Dinner at Restaurant"),
        )
        .expect("well-formed expense");

    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&g1);
    println!("{}", report);

    let plan = queries.suggest_settlements(&g1);
    println!("{}", plan);

    // --- Scenario 2: bob pays his share back ---
    println!("━━━ Scenario 2: After bob pays alice 40 ━━━\n");

    store
        .add_payment(Payment::new(
            g1.clone(),
            bob.clone(),
            alice.clone(),
            dec!(40),
            PaymentStatus::Completed,
        ))
        .expect("valid payment");

    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&g1);
    println!("{}", report);

    let plan = queries.suggest_settlements(&g1);
    println!("{}", plan);
}
