use std::collections::HashMap;

use chrono::Utc;

use engine::{Category, Expense, Payer, SplitRule, calculate_debts};

fn equal_expense(id: &str, payer: Payer, base_amount: f64, involved: &[&str]) -> Expense {
    Expense {
        id: id.to_string(),
        trip_id: "chiang-mai".to_string(),
        payer,
        amount: base_amount,
        currency: "THB".to_string(),
        exchange_rate: 1.0,
        base_amount,
        split: SplitRule::Equal {
            involved_user_ids: involved.iter().map(|id| (*id).to_string()).collect(),
        },
        category: Category::Food,
        note: None,
        occurred_at: Utc::now(),
        is_settlement: false,
    }
}

fn exact_expense(
    id: &str,
    payer: &str,
    amount: f64,
    currency: &str,
    exchange_rate: f64,
    shares: &[(&str, f64)],
) -> Expense {
    Expense {
        id: id.to_string(),
        trip_id: "chiang-mai".to_string(),
        payer: Payer::from(payer.to_string()),
        amount,
        currency: currency.to_string(),
        exchange_rate,
        base_amount: amount * exchange_rate,
        split: SplitRule::Exact {
            involved_user_ids: shares.iter().map(|(id, _)| (*id).to_string()).collect(),
            amounts: shares
                .iter()
                .map(|(id, share)| ((*id).to_string(), *share))
                .collect(),
        },
        category: Category::Activities,
        note: None,
        occurred_at: Utc::now(),
        is_settlement: false,
    }
}

fn settlement(id: &str, debtor: &str, creditor: &str, base_amount: f64) -> Expense {
    Expense {
        id: id.to_string(),
        trip_id: "chiang-mai".to_string(),
        payer: Payer::Participant(debtor.to_string()),
        amount: base_amount,
        currency: "THB".to_string(),
        exchange_rate: 1.0,
        base_amount,
        split: SplitRule::Exact {
            involved_user_ids: vec![creditor.to_string()],
            amounts: HashMap::from([(creditor.to_string(), base_amount)]),
        },
        category: Category::Settlement,
        note: None,
        occurred_at: Utc::now(),
        is_settlement: true,
    }
}

#[test]
fn worked_example_from_shared_dinner_ledger() {
    let expenses = vec![
        equal_expense(
            "dinner",
            Payer::Participant("u1".to_string()),
            3000.0,
            &["u1", "u2", "u3"],
        ),
        equal_expense(
            "taxi",
            Payer::Participant("u2".to_string()),
            900.0,
            &["u1", "u2", "u3"],
        ),
    ];

    let summary = calculate_debts(&expenses, "u1");

    let entries: Vec<(&str, f64)> = summary
        .who_owes_me
        .iter()
        .map(|entry| (entry.counterparty_id.as_str(), entry.amount))
        .collect();
    assert_eq!(entries, [("u3", 1000.0), ("u2", 700.0)]);
    assert!(summary.i_owe_who.is_empty());
    assert_eq!(summary.total_receivable, 1700.0);
    assert_eq!(summary.total_payable, 0.0);
    assert_eq!(summary.net_balance, 1700.0);
}

#[test]
fn net_balance_matches_receivable_minus_payable() {
    let expenses = vec![
        equal_expense(
            "hotel",
            Payer::Participant("u1".to_string()),
            8000.0,
            &["u1", "u2", "u3", "u4"],
        ),
        equal_expense(
            "scooters",
            Payer::Participant("u2".to_string()),
            1200.0,
            &["u1", "u2"],
        ),
        exact_expense(
            "museum",
            "u3",
            90.0,
            "USD",
            36.5,
            &[("u1", 30.0), ("u3", 60.0)],
        ),
    ];

    for viewpoint in ["u1", "u2", "u3", "u4"] {
        let summary = calculate_debts(&expenses, viewpoint);
        assert!(
            (summary.net_balance - (summary.total_receivable - summary.total_payable)).abs()
                < 1e-9,
            "zero-sum violated for {viewpoint}"
        );
    }
}

#[test]
fn central_fund_expenses_create_no_debt() {
    let expenses = vec![
        equal_expense("pot-dinner", Payer::CentralFund, 5000.0, &["u1", "u2", "u3"]),
        exact_expense(
            "pot-tickets",
            "central_fund",
            300.0,
            "THB",
            1.0,
            &[("u1", 100.0), ("u2", 200.0)],
        ),
    ];

    for viewpoint in ["u1", "u2", "u3"] {
        let summary = calculate_debts(&expenses, viewpoint);
        assert!(summary.who_owes_me.is_empty());
        assert!(summary.i_owe_who.is_empty());
        assert_eq!(summary.net_balance, 0.0);
    }
}

#[test]
fn paying_only_for_yourself_contributes_nothing() {
    let expenses = vec![equal_expense(
        "solo-lunch",
        Payer::Participant("u1".to_string()),
        400.0,
        &["u1"],
    )];

    let own = calculate_debts(&expenses, "u1");
    assert_eq!(own, engine::DebtSummary::default());

    let other = calculate_debts(&expenses, "u2");
    assert_eq!(other, engine::DebtSummary::default());
}

#[test]
fn equal_split_charges_each_other_participant_one_share() {
    let expenses = vec![equal_expense(
        "boat-trip",
        Payer::Participant("u1".to_string()),
        1000.0,
        &["u1", "u2", "u3", "u4"],
    )];

    let summary = calculate_debts(&expenses, "u1");
    assert_eq!(summary.who_owes_me.len(), 3);
    for entry in &summary.who_owes_me {
        assert!((entry.amount - 250.0).abs() < 1e-9);
    }
}

#[test]
fn exact_split_shares_conserve_the_base_amount() {
    let expense = exact_expense(
        "cooking-class",
        "u1",
        100.0,
        "USD",
        36.5,
        &[("u1", 20.0), ("u2", 30.0), ("u3", 50.0)],
    );
    let base_amount = expense.base_amount;

    let derived_total: f64 = ["u1", "u2", "u3"]
        .iter()
        .map(|id| expense.split.base_share(id, base_amount, expense.exchange_rate))
        .sum();
    assert!((derived_total - base_amount).abs() < 0.01 * expense.exchange_rate);

    // From the payer's viewpoint the receivable is everything but their own
    // share.
    let summary = calculate_debts(std::slice::from_ref(&expense), "u1");
    assert!((summary.total_receivable - (base_amount - 20.0 * 36.5)).abs() < 1e-9);
}

#[test]
fn exact_split_converts_with_the_expense_rate() {
    // The stored rate is authoritative even if the trip's table has moved on.
    let expense = exact_expense("old-tour", "u1", 80.0, "EUR", 40.0, &[("u2", 80.0)]);

    let summary = calculate_debts(std::slice::from_ref(&expense), "u1");
    assert_eq!(summary.who_owes_me[0].amount, 3200.0);
}

#[test]
fn settled_noise_is_dropped_but_kept_in_net_balance() {
    // u2 owes exactly 0.50 after netting: below the ±1 noise threshold.
    let expenses = vec![
        equal_expense(
            "coffee",
            Payer::Participant("u1".to_string()),
            101.0,
            &["u1", "u2"],
        ),
        equal_expense(
            "water",
            Payer::Participant("u2".to_string()),
            100.0,
            &["u1", "u2"],
        ),
    ];

    let summary = calculate_debts(&expenses, "u1");
    assert!(summary.who_owes_me.is_empty());
    assert!(summary.i_owe_who.is_empty());
    assert_eq!(summary.total_receivable, 0.0);
    assert_eq!(summary.total_payable, 0.0);
    assert!((summary.net_balance - 0.5).abs() < 1e-9);
}

#[test]
fn opposite_debts_net_into_a_single_entry() {
    let expenses = vec![
        equal_expense(
            "brunch",
            Payer::Participant("u1".to_string()),
            600.0,
            &["u1", "u2"],
        ),
        equal_expense(
            "cinema",
            Payer::Participant("u2".to_string()),
            200.0,
            &["u1", "u2"],
        ),
    ];

    let summary = calculate_debts(&expenses, "u1");
    assert_eq!(summary.who_owes_me.len(), 1);
    let entry = &summary.who_owes_me[0];
    assert_eq!(entry.counterparty_id, "u2");
    assert_eq!(entry.amount, 200.0);
    // Evidence keeps both contributing expenses for drill-down.
    assert_eq!(entry.transactions.len(), 2);
}

#[test]
fn settlement_expense_zeroes_the_displayed_balance() {
    let expenses = vec![
        equal_expense(
            "street-food",
            Payer::Participant("u1".to_string()),
            300.0,
            &["u1", "u2"],
        ),
        settlement("payback", "u2", "u1", 150.0),
    ];

    let creditor = calculate_debts(&expenses, "u1");
    assert!(creditor.who_owes_me.is_empty());
    assert!(creditor.i_owe_who.is_empty());
    assert!(creditor.net_balance.abs() < 1e-9);

    let debtor = calculate_debts(&expenses, "u2");
    assert!(debtor.i_owe_who.is_empty());
    assert!(debtor.net_balance.abs() < 1e-9);
}

#[test]
fn uninvolved_viewpoint_sees_nothing() {
    let expenses = vec![equal_expense(
        "massage",
        Payer::Participant("u1".to_string()),
        900.0,
        &["u1", "u2"],
    )];

    let summary = calculate_debts(&expenses, "u3");
    assert_eq!(summary, engine::DebtSummary::default());
}
