//! End-to-end tests driving the chat surface against a real store

use chrono::NaiveDate;
use tally_core::{ChatSession, Database, EstimateKind, YearWeek};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 24).unwrap() // Monday, ISO week 2025-09
}

fn drive(session: &mut ChatSession, lines: &[&str]) -> Vec<String> {
    let mut replies = Vec::new();
    for line in lines {
        replies.extend(session.handle_at(line, today()).unwrap());
    }
    replies
}

#[test]
fn first_contact_then_full_week_workflow() {
    let db = Database::in_memory().unwrap();
    let mut session = ChatSession::new(db.clone(), Some("sam".to_string()));

    // First /start creates the settings document
    let replies = drive(&mut session, &["/start"]);
    assert!(replies[0].contains("Created default settings with balance = 0"));

    // Set up a starting balance and estimates for the current week
    drive(&mut session, &["/setbalance 2000"]);
    drive(
        &mut session,
        &[
            "/setweekly", "current", "income", "salary", "1000", "add more", "expense", "rent",
            "-600", "done",
        ],
    );

    // Log actual spending
    drive(
        &mut session,
        &["/add", "-550", "rent", "current", "/add", "950", "salary", "current"],
    );

    // Stats: both sections compare actuals against estimates
    let reply = drive(&mut session, &["/weekstats 2025-09"]).remove(0);
    assert!(reply.contains("- salary: expected 1000, real 950, diff -50"));
    assert!(reply.contains("- rent: expected -600, real -550, diff 50"));
    assert!(reply.contains("Balance difference (real - expected): 0"));

    // Projection: the current week is "real", later weeks fall back to
    // estimates (none set, so zero deltas)
    let reply = drive(&mut session, &["/balance"]).remove(0);
    assert!(reply.contains("Current balance: 2400"));
    assert!(reply.contains("2025-09: 400 (real) -> balance 2800"));
    assert!(reply.contains("2025-10: 0 (est) -> balance 2800"));
}

#[test]
fn estimate_only_week_projects_from_estimates() {
    let db = Database::in_memory().unwrap();
    db.set_initial_balance(100.0).unwrap();
    db.set_estimate(YearWeek::new(2025, 10), EstimateKind::Income, "salary", 500.0)
        .unwrap();
    db.set_estimate(YearWeek::new(2025, 10), EstimateKind::Expense, "groceries", -80.0)
        .unwrap();

    let mut session = ChatSession::new(db, None);
    let reply = session
        .handle_at("/balance", today())
        .unwrap()
        .remove(0);

    assert!(reply.contains("Current balance: 100"));
    assert!(reply.contains("2025-09: 0 (est) -> balance 100"));
    assert!(reply.contains("2025-10: 420 (est) -> balance 520"));
}

#[test]
fn wizard_cancel_leaves_no_trace() {
    let db = Database::in_memory().unwrap();
    let mut session = ChatSession::new(db.clone(), None);

    drive(&mut session, &["/add", "-25", "groceries", "/cancel"]);

    assert!(db.records_for_week(YearWeek::new(2025, 9)).unwrap().is_empty());
    let reply = drive(&mut session, &["/showrecords 2025-09"]).remove(0);
    assert_eq!(reply, "No records found for 2025-09");
}

#[test]
fn sessions_share_one_household_store() {
    let db = Database::in_memory().unwrap();
    let mut alice = ChatSession::new(db.clone(), Some("alice".to_string()));
    let mut bob = ChatSession::new(db.clone(), Some("bob".to_string()));

    drive(&mut alice, &["/add", "-40", "party", "2025-09"]);

    // Bob sees Alice's record: no per-user isolation
    let reply = drive(&mut bob, &["/showrecords 2025-09"]).remove(0);
    assert!(reply.contains("party: -40"));

    let records = db.records_for_week(YearWeek::new(2025, 9)).unwrap();
    assert_eq!(records[0].user.as_deref(), Some("alice"));
}
