use crate::core::expense::Expense;
use crate::core::member::MemberId;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// A directed graph of gross debts between members of one group.
///
/// Each expense contributes one edge per split entry: the split member
/// owes the payer their share. Edges aggregate across expenses, so the
/// graph answers "who ran up debt with whom", the gross view that the
/// balance sheet collapses into per-member positions.
///
/// Payments are deliberately excluded: this is a record of how debt
/// arose, not of what remains outstanding.
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::{Expense, Split};
/// use split_engine::core::group::GroupId;
/// use split_engine::core::member::MemberId;
/// use split_engine::graph::debt_graph::DebtGraph;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     GroupId::new("g1"),
///     MemberId::new("alice"),
///     dec!(120),
///     vec![
///         Split::new(MemberId::new("alice"), dec!(40)),
///         Split::new(MemberId::new("bob"), dec!(40)),
///         Split::new(MemberId::new("carol"), dec!(40)),
///     ],
/// );
/// let graph = DebtGraph::from_expenses(&[dinner]);
/// assert_eq!(
///     graph.edge_amount(&MemberId::new("bob"), &MemberId::new("alice")),
///     dec!(40),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebtGraph {
    /// Aggregated edges: (debtor, creditor) -> total owed.
    edges: HashMap<(MemberId, MemberId), Decimal>,
    /// All members that appear on either side of an edge.
    members: HashSet<MemberId>,
    /// Number of expenses folded in.
    expense_count: usize,
}

impl DebtGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an expense into the graph. The payer's own share produces no
    /// edge; zero shares are skipped.
    pub fn add_expense(&mut self, expense: &Expense) {
        self.members.insert(expense.paid_by().clone());
        for split in expense.splits() {
            self.members.insert(split.member.clone());
            if &split.member == expense.paid_by() || split.amount == Decimal::ZERO {
                continue;
            }
            let key = (split.member.clone(), expense.paid_by().clone());
            *self.edges.entry(key).or_insert(Decimal::ZERO) += split.amount;
        }
        self.expense_count += 1;
    }

    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut graph = Self::new();
        for expense in expenses {
            graph.add_expense(expense);
        }
        graph
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn expense_count(&self) -> usize {
        self.expense_count
    }

    pub fn members(&self) -> &HashSet<MemberId> {
        &self.members
    }

    /// Aggregated gross amount `debtor` owes `creditor`.
    pub fn edge_amount(&self, debtor: &MemberId, creditor: &MemberId) -> Decimal {
        self.edges
            .get(&(debtor.clone(), creditor.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// All edges as (debtor, creditor, amount).
    pub fn edges(&self) -> Vec<(&MemberId, &MemberId, Decimal)> {
        self.edges
            .iter()
            .map(|((d, c), &amt)| (d, c, amt))
            .collect()
    }

    /// Gross total a member owes others across all expenses.
    pub fn owes_total(&self, member: &MemberId) -> Decimal {
        self.edges
            .iter()
            .filter(|((d, _), _)| d == member)
            .map(|(_, &amt)| amt)
            .sum()
    }

    /// Gross total others owe a member.
    pub fn owed_total(&self, member: &MemberId) -> Decimal {
        self.edges
            .iter()
            .filter(|((_, c), _)| c == member)
            .map(|(_, &amt)| amt)
            .sum()
    }

    /// Bilateral net between two members: positive means `a` owes `b`
    /// net, negative means `b` owes `a` net. Offsetting mutual debts is
    /// the pairwise version of what the balance sheet does group-wide.
    pub fn net_between(&self, a: &MemberId, b: &MemberId) -> Decimal {
        self.edge_amount(a, b) - self.edge_amount(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Split;
    use crate::core::group::GroupId;
    use rust_decimal_macros::dec;

    fn member(id: &str) -> MemberId {
        MemberId::new(id)
    }

    fn expense(paid_by: &str, amount: Decimal, splits: &[(&str, Decimal)]) -> Expense {
        Expense::new(
            GroupId::new("g1"),
            member(paid_by),
            amount,
            splits
                .iter()
                .map(|(m, a)| Split::new(member(m), *a))
                .collect(),
        )
    }

    #[test]
    fn test_edges_point_at_payer() {
        let graph = DebtGraph::from_expenses(&[expense(
            "alice",
            dec!(120),
            &[("alice", dec!(40)), ("bob", dec!(40)), ("carol", dec!(40))],
        )]);

        assert_eq!(graph.edge_amount(&member("bob"), &member("alice")), dec!(40));
        assert_eq!(graph.edge_amount(&member("carol"), &member("alice")), dec!(40));
        // No self-edge for the payer's own share.
        assert_eq!(
            graph.edge_amount(&member("alice"), &member("alice")),
            Decimal::ZERO
        );
        assert_eq!(graph.member_count(), 3);
    }

    #[test]
    fn test_edge_aggregation() {
        let graph = DebtGraph::from_expenses(&[
            expense("alice", dec!(60), &[("bob", dec!(60))]),
            expense("alice", dec!(40), &[("bob", dec!(40))]),
        ]);
        assert_eq!(graph.edge_amount(&member("bob"), &member("alice")), dec!(100));
    }

    #[test]
    fn test_gross_totals() {
        let graph = DebtGraph::from_expenses(&[
            expense("alice", dec!(100), &[("bob", dec!(60)), ("carol", dec!(40))]),
            expense("bob", dec!(50), &[("alice", dec!(50))]),
        ]);

        assert_eq!(graph.owed_total(&member("alice")), dec!(100));
        assert_eq!(graph.owes_total(&member("alice")), dec!(50));
        assert_eq!(graph.owes_total(&member("bob")), dec!(60));
        assert_eq!(graph.owed_total(&member("bob")), dec!(50));
    }

    #[test]
    fn test_bilateral_net() {
        let graph = DebtGraph::from_expenses(&[
            expense("alice", dec!(100), &[("bob", dec!(100))]),
            expense("bob", dec!(60), &[("alice", dec!(60))]),
        ]);
        // bob owes alice 100, alice owes bob 60 → bob owes 40 net.
        assert_eq!(graph.net_between(&member("bob"), &member("alice")), dec!(40));
        assert_eq!(graph.net_between(&member("alice"), &member("bob")), dec!(-40));
    }

    #[test]
    fn test_zero_shares_skipped() {
        let graph = DebtGraph::from_expenses(&[expense(
            "alice",
            dec!(80),
            &[("ghost", Decimal::ZERO), ("bob", dec!(80))],
        )]);
        assert_eq!(
            graph.edge_amount(&member("ghost"), &member("alice")),
            Decimal::ZERO
        );
        // The placeholder member still shows up in the roster view.
        assert!(graph.members().contains(&member("ghost")));
    }
}
