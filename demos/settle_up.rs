//! Settlement of an uneven five-member group.
//!
//! Shows the greedy largest-creditor / largest-debtor matching on
//! balances of mixed magnitude, plus the gross debt-graph view.

use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::group::{Group, GroupId};
use split_engine::core::member::MemberId;
use split_engine::core::money::CurrencyCode;
use split_engine::graph::debt_graph::DebtGraph;
use split_engine::store::repository::{ExpenseStore, GroupQueries, InMemoryStore};

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   split-engine: Settle Up Example        ║");
    println!("╚══════════════════════════════════════════╝\n");

    let ids = ["alice", "bob", "carol", "dave", "erin"].map(MemberId::new);
    let g = GroupId::new("office");

    let mut store = InMemoryStore::new();
    store.add_group(
        Group::new(g.clone(), "Office Team", CurrencyCode::new("USD"))
            .with_members(ids.iter().cloned()),
    );

    // alice fronts a big team lunch, bob covers coffee for a few people.
    store
        .add_expense(
            Expense::new(
                g.clone(),
                ids[0].clone(),
                dec!(250),
                vec![
                    Split::new(ids[0].clone(), dec!(50)),
                    Split::new(ids[1].clone(), dec!(50)),
                    Split::new(ids[2].clone(), dec!(50)),
                    Split::new(ids[3].clone(), dec!(50)),
                    Split::new(ids[4].clone(), dec!(50)),
                ],
            )
            .with_description("Team lunch"),
        )
        .expect("well-formed expense");
    store
        .add_expense(
            Expense::new(
                g.clone(),
                ids[1].clone(),
                dec!(45),
                vec![
                    Split::new(ids[1].clone(), dec!(15)),
                    Split::new(ids[2].clone(), dec!(15)),
                    Split::new(ids[4].clone(), dec!(15)),
                ],
            )
            .with_description("Coffee run"),
        )
        .expect("well-formed expense");

    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&g);
    println!("{}", report);

    let plan = queries.suggest_settlements(&g);
    println!("{}", plan);

    // Gross debt view: how the debt arose, pair by pair.
    println!("━━━ Gross debts (who ran up what with whom) ━━━\n");
    let graph = DebtGraph::from_expenses(&store.expenses(&g));
    let mut edges = graph.edges();
    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    for (debtor, creditor, amount) in edges {
        println!("  {} owes {} a gross {}", debtor, creditor, amount);
    }
}
