//! Gross who-owes-whom view of a group's expenses.

pub mod debt_graph;
