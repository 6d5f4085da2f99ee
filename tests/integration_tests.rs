use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::group::{Group, GroupId};
use split_engine::core::member::MemberId;
use split_engine::core::money::{is_settled, CurrencyCode};
use split_engine::core::payment::{Payment, PaymentStatus};
use split_engine::engine::settlement::SettlementSuggestion;
use split_engine::graph::debt_graph::DebtGraph;
use split_engine::store::repository::{ExpenseStore, GroupQueries, InMemoryStore};

fn member(id: &str) -> MemberId {
    MemberId::new(id)
}

fn trip_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.add_group(
        Group::new(GroupId::new("g1"), "Vacation Trip", CurrencyCode::new("USD"))
            .with_members(["alice", "bob", "carol"].map(MemberId::new))
            .with_notes("Trip to Thailand"),
    );
    store
        .add_expense(
            Expense::new(
                GroupId::new("g1"),
                member("alice"),
                dec!(120),
                vec![
                    Split::new(member("alice"), dec!(40)),
                    Split::new(member("bob"), dec!(40)),
                    Split::new(member("carol"), dec!(40)),
                ],
            )
            .with_description("Dinner at Restaurant")
            .with_category("food"),
        )
        .unwrap();
    store
}

/// Full pipeline: record → balances → suggestions → replay to zero.
#[test]
fn full_pipeline_trip_scenario() {
    let store = trip_store();
    let queries = GroupQueries::new(&store);
    let g1 = GroupId::new("g1");

    let report = queries.compute_balances(&g1);
    assert_eq!(report.balance(&member("alice")), dec!(80));
    assert_eq!(report.balance(&member("bob")), dec!(-40));
    assert_eq!(report.balance(&member("carol")), dec!(-40));
    assert_eq!(report.total_spend(), dec!(120));
    assert!(report.is_valid());

    let plan = queries.suggest_settlements(&g1);
    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan.suggestions()[0],
        SettlementSuggestion {
            from: member("bob"),
            to: member("alice"),
            amount: dec!(40),
        }
    );
    assert_eq!(
        plan.suggestions()[1],
        SettlementSuggestion {
            from: member("carol"),
            to: member("alice"),
            amount: dec!(40),
        }
    );

    let settled = plan.replay(report.sheet());
    for (_, balance) in settled.iter() {
        assert!(is_settled(balance));
    }
}

/// A completed payment shrinks the plan; pending and failed ones do not.
#[test]
fn payments_only_count_when_completed() {
    let mut store = trip_store();
    let g1 = GroupId::new("g1");

    store
        .add_payment(
            Payment::new(
                g1.clone(),
                member("bob"),
                member("alice"),
                dec!(40),
                PaymentStatus::Completed,
            )
            .with_note("dinner share"),
        )
        .unwrap();
    // These must have no effect at all.
    store
        .add_payment(Payment::new(
            g1.clone(),
            member("carol"),
            member("alice"),
            dec!(40),
            PaymentStatus::Pending,
        ))
        .unwrap();
    store
        .add_payment(Payment::new(
            g1.clone(),
            member("carol"),
            member("alice"),
            dec!(40),
            PaymentStatus::Failed,
        ))
        .unwrap();

    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&g1);
    assert_eq!(report.balance(&member("alice")), dec!(40));
    assert_eq!(report.balance(&member("bob")), Decimal::ZERO);
    assert_eq!(report.balance(&member("carol")), dec!(-40));

    let plan = queries.suggest_settlements(&g1);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.suggestions()[0].from, member("carol"));
    assert_eq!(plan.suggestions()[0].to, member("alice"));
    assert_eq!(plan.suggestions()[0].amount, dec!(40));
}

/// Unknown groups read as empty, never as an error.
#[test]
fn unknown_group_reads_empty() {
    let store = trip_store();
    let queries = GroupQueries::new(&store);
    let ghost = GroupId::new("ghost");

    assert!(store.group(&ghost).is_none());
    let report = queries.compute_balances(&ghost);
    assert!(report.sheet().is_empty());
    assert_eq!(report.total_spend(), Decimal::ZERO);
    assert!(queries.suggest_settlements(&ghost).is_empty());
}

/// Store boundary rejects malformed expenses; the engine never sees them.
#[test]
fn boundary_rejects_malformed_expenses() {
    let mut store = trip_store();

    // Split sum disagrees with the total.
    let unbalanced = Expense::new(
        GroupId::new("g1"),
        member("alice"),
        dec!(100),
        vec![Split::new(member("bob"), dec!(40))],
    );
    assert!(store.add_expense(unbalanced).is_err());

    // Non-roster member with a real share.
    let stranger = Expense::new(
        GroupId::new("g1"),
        member("alice"),
        dec!(50),
        vec![
            Split::new(member("alice"), dec!(25)),
            Split::new(member("mallory"), dec!(25)),
        ],
    );
    assert!(store.add_expense(stranger).is_err());

    // Zero-share placeholder for a non-roster member is tolerated.
    let placeholder = Expense::new(
        GroupId::new("g1"),
        member("alice"),
        dec!(80),
        vec![
            Split::new(member("u0"), Decimal::ZERO),
            Split::new(member("alice"), dec!(40)),
            Split::new(member("bob"), dec!(40)),
        ],
    );
    assert!(store.add_expense(placeholder).is_ok());
}

/// Uneven even-split remainders settle cleanly end to end.
#[test]
fn uneven_cent_splits_settle() {
    let mut store = InMemoryStore::new();
    store.add_group(
        Group::new(GroupId::new("g2"), "House Expenses", CurrencyCode::new("USD"))
            .with_members(["alice", "bob", "dave"].map(MemberId::new)),
    );
    store
        .add_expense(Expense::new(
            GroupId::new("g2"),
            member("alice"),
            dec!(80),
            vec![
                Split::new(member("alice"), dec!(26.67)),
                Split::new(member("bob"), dec!(26.67)),
                Split::new(member("dave"), dec!(26.66)),
            ],
        ))
        .unwrap();

    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&GroupId::new("g2"));
    assert_eq!(report.balance(&member("alice")), dec!(53.33));
    assert!(report.is_valid());

    let plan = queries.suggest_settlements(&GroupId::new("g2"));
    let settled = plan.replay(report.sheet());
    for (_, balance) in settled.iter() {
        assert!(is_settled(balance), "residual {}", balance);
    }
}

/// The gross debt graph agrees with the original expenses.
#[test]
fn debt_graph_matches_expense_history() {
    let store = trip_store();
    let expenses = store.expenses(&GroupId::new("g1"));
    let graph = DebtGraph::from_expenses(&expenses);

    assert_eq!(graph.edge_amount(&member("bob"), &member("alice")), dec!(40));
    assert_eq!(graph.owed_total(&member("alice")), dec!(80));
    assert_eq!(graph.owes_total(&member("alice")), Decimal::ZERO);
    assert_eq!(
        graph.net_between(&member("bob"), &member("alice")),
        dec!(40)
    );
}

/// Suggestion lists serialize to the shape the API layer expects.
#[test]
fn settlement_plan_serializes() {
    let store = trip_store();
    let queries = GroupQueries::new(&store);
    let plan = queries.suggest_settlements(&GroupId::new("g1"));

    let json = serde_json::to_string_pretty(&plan).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let suggestions = parsed["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["from"], "bob");
    assert_eq!(suggestions[0]["to"], "alice");
}

/// Balance reports serialize with the sheet and totals present.
#[test]
fn balance_report_serializes() {
    let store = trip_store();
    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&GroupId::new("g1"));

    let json = serde_json::to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("sheet").is_some());
    assert!(parsed.get("total_spend").is_some());
}
