//! split-engine CLI
//!
//! Compute group balances and settlement suggestions from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Net balances for a group from a JSON snapshot
//! split-engine balances --input snapshot.json --group g1
//!
//! # Settlement suggestions, as JSON
//! split-engine settle --input snapshot.json --group g1 --format json
//!
//! # Generate a random snapshot for testing
//! split-engine generate --members 8 --expenses 30
//! ```

use rust_decimal::Decimal;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::group::{Group, GroupId};
use split_engine::core::member::MemberId;
use split_engine::core::money::CurrencyCode;
use split_engine::core::payment::{Payment, PaymentStatus};
use split_engine::simulation::scenario::{generate_group_scenario, ScenarioConfig};
use split_engine::store::repository::{ExpenseStore, GroupQueries, InMemoryStore};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — group expense splitting and settlement suggestions

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute net member balances for a group
    settle      Suggest transfers that settle a group
    generate    Generate a random snapshot (for testing)
    help        Show this message

OPTIONS (balances, settle):
    --input <FILE>      Path to JSON snapshot file
    --group <ID>        Group to compute
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --members <N>       Number of members (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --payments <N>      Number of payments (default: 5)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine balances --input snapshot.json --group g1
    split-engine settle --input snapshot.json --group g1 --format json
    split-engine generate --members 8 --expenses 30 --output snapshot.json"#
    );
}

/// JSON schema for snapshot input.
#[derive(serde::Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    groups: Vec<GroupInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default)]
    payments: Vec<PaymentInput>,
}

#[derive(serde::Deserialize)]
struct GroupInput {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_currency")]
    currency: String,
    members: Vec<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(serde::Deserialize)]
struct ExpenseInput {
    group: String,
    paid_by: String,
    amount: String,
    splits: Vec<SplitInput>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(serde::Deserialize)]
struct SplitInput {
    member: String,
    amount: String,
}

#[derive(serde::Deserialize)]
struct PaymentInput {
    group: String,
    from: String,
    to: String,
    amount: String,
    status: PaymentStatus,
}

/// JSON output schema for balance results.
#[derive(serde::Serialize)]
struct BalancesOutput {
    group: String,
    total_spend: String,
    total_outstanding: String,
    valid: bool,
    balances: Vec<BalanceOutput>,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    member: String,
    balance: String,
    status: String,
}

#[derive(serde::Serialize)]
struct SettlementOutput {
    group: String,
    transfer_count: usize,
    total_transferred: String,
    suggestions: Vec<SuggestionOutput>,
}

#[derive(serde::Serialize)]
struct SuggestionOutput {
    from: String,
    to: String,
    amount: String,
}

fn parse_amount(raw: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid amount '{}': {}", raw, e);
        process::exit(1);
    })
}

fn load_snapshot(path: &str) -> InMemoryStore {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: SnapshotFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "groups": [
    {{ "id": "g1", "name": "Trip", "currency": "USD", "members": ["alice", "bob"] }}
  ],
  "expenses": [
    {{ "group": "g1", "paid_by": "alice", "amount": "120",
       "splits": [{{ "member": "alice", "amount": "60" }}, {{ "member": "bob", "amount": "60" }}] }}
  ],
  "payments": [
    {{ "group": "g1", "from": "bob", "to": "alice", "amount": "60", "status": "completed" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut store = InMemoryStore::new();
    for g in file.groups {
        store.add_group(
            Group::new(GroupId::new(&g.id), g.name, CurrencyCode::new(&g.currency))
                .with_members(g.members.iter().map(|m| MemberId::new(m.as_str()))),
        );
    }
    for e in file.expenses {
        let splits = e
            .splits
            .iter()
            .map(|s| Split::new(MemberId::new(&s.member), parse_amount(&s.amount)))
            .collect();
        let mut expense = Expense::new(
            GroupId::new(&e.group),
            MemberId::new(&e.paid_by),
            parse_amount(&e.amount),
            splits,
        );
        if let Some(description) = e.description {
            expense = expense.with_description(description);
        }
        store.add_expense(expense).unwrap_or_else(|err| {
            eprintln!("Rejected expense: {}", err);
            process::exit(1);
        });
    }
    for p in file.payments {
        store
            .add_payment(Payment::new(
                GroupId::new(&p.group),
                MemberId::new(&p.from),
                MemberId::new(&p.to),
                parse_amount(&p.amount),
                p.status,
            ))
            .unwrap_or_else(|err| {
                eprintln!("Rejected payment: {}", err);
                process::exit(1);
            });
    }
    store
}

struct QueryArgs {
    input: String,
    group: GroupId,
    format: String,
}

fn parse_query_args(args: &[String]) -> QueryArgs {
    let mut input = None;
    let mut group = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--group" => {
                i += 1;
                group = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--group requires a group id");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = input.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    let group = group.unwrap_or_else(|| {
        eprintln!("Error: --group <ID> is required");
        process::exit(1);
    });

    QueryArgs {
        input,
        group: GroupId::new(group),
        format,
    }
}

fn warn_if_unknown_group(store: &InMemoryStore, group: &GroupId) {
    if store.group(group).is_none() {
        eprintln!(
            "Warning: group '{}' not found in snapshot; treating as empty",
            group
        );
    }
}

fn cmd_balances(args: &[String]) {
    let args = parse_query_args(args);
    let store = load_snapshot(&args.input);
    warn_if_unknown_group(&store, &args.group);

    let queries = GroupQueries::new(&store);
    let report = queries.compute_balances(&args.group);

    if args.format == "json" {
        let balances = report
            .sheet()
            .iter()
            .map(|(member, balance)| BalanceOutput {
                member: member.to_string(),
                balance: balance.to_string(),
                status: if balance > Decimal::ZERO {
                    "CREDITOR".to_string()
                } else if balance < Decimal::ZERO {
                    "DEBTOR".to_string()
                } else {
                    "SETTLED".to_string()
                },
            })
            .collect();

        let output = BalancesOutput {
            group: args.group.to_string(),
            total_spend: report.total_spend().to_string(),
            total_outstanding: report.total_outstanding().to_string(),
            valid: report.is_valid(),
            balances,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Group: {}\n", args.group);
        println!("{}", report);
    }
}

fn cmd_settle(args: &[String]) {
    let args = parse_query_args(args);
    let store = load_snapshot(&args.input);
    warn_if_unknown_group(&store, &args.group);

    let queries = GroupQueries::new(&store);
    let plan = queries.suggest_settlements(&args.group);

    if args.format == "json" {
        let output = SettlementOutput {
            group: args.group.to_string(),
            transfer_count: plan.len(),
            total_transferred: plan.total_transferred().to_string(),
            suggestions: plan
                .suggestions()
                .iter()
                .map(|s| SuggestionOutput {
                    from: s.from.to_string(),
                    to: s.to.to_string(),
                    amount: s.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Group: {}\n", args.group);
        println!("{}", plan);
    }
}

fn cmd_generate(args: &[String]) {
    let mut members = 5usize;
    let mut expenses = 20usize;
    let mut payments = 5usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--payments" => {
                i += 1;
                payments = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--payments requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = ScenarioConfig {
        member_count: members,
        expense_count: expenses,
        payment_count: payments,
        ..Default::default()
    };
    let scenario = generate_group_scenario(&config);

    #[derive(serde::Serialize)]
    struct OutputSplit {
        member: String,
        amount: String,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        group: String,
        paid_by: String,
        amount: String,
        splits: Vec<OutputSplit>,
    }

    #[derive(serde::Serialize)]
    struct OutputPayment {
        group: String,
        from: String,
        to: String,
        amount: String,
        status: PaymentStatus,
    }

    #[derive(serde::Serialize)]
    struct OutputGroup {
        id: String,
        name: String,
        currency: String,
        members: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        groups: Vec<OutputGroup>,
        expenses: Vec<OutputExpense>,
        payments: Vec<OutputPayment>,
    }

    let output = OutputFile {
        groups: vec![OutputGroup {
            id: scenario.group.id().to_string(),
            name: scenario.group.name().to_string(),
            currency: scenario.group.currency().to_string(),
            members: scenario
                .group
                .members()
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }],
        expenses: scenario
            .expenses
            .iter()
            .map(|e| OutputExpense {
                group: e.group().to_string(),
                paid_by: e.paid_by().to_string(),
                amount: e.amount().to_string(),
                splits: e
                    .splits()
                    .iter()
                    .map(|s| OutputSplit {
                        member: s.member.to_string(),
                        amount: s.amount.to_string(),
                    })
                    .collect(),
            })
            .collect(),
        payments: scenario
            .payments
            .iter()
            .map(|p| OutputPayment {
                group: p.group().to_string(),
                from: p.from().to_string(),
                to: p.to().to_string(),
                amount: p.amount().to_string(),
                status: p.status(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses and {} payments for {} members → {}",
            output.expenses.len(),
            output.payments.len(),
            members,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
