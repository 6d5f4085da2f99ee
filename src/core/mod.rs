//! Foundational types: members, groups, money, expenses, payments,
//! and the derived balance sheet.

pub mod balance;
pub mod expense;
pub mod group;
pub mod member;
pub mod money;
pub mod payment;
