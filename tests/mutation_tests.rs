mod common;

use chrono::Duration;
use common::{TestEnv, NOW};
use ledger_engine::{
    core::services::TransactionService,
    domain::{AccountKind, Category, DepreciableAsset, LedgerEntry, MovementKind},
    MergeError, MutationRequest,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn full_request(env: &TestEnv) -> (MutationRequest, Uuid, Uuid) {
    let checking = env.account("Checking", AccountKind::Current);
    let groceries = env.store.add_category(Category::new("Groceries"));
    let request = MutationRequest::new()
        .kind(MovementKind::Expense)
        .account(checking)
        .amount(dec!(42.10))
        .note("weekly shop")
        .category(groceries)
        .location(52.52, 13.40)
        .executed_at(*NOW - Duration::hours(3))
        .photo("receipts/2024-07-01.jpg");
    (request, checking, groceries)
}

#[test]
fn create_populates_every_requested_field() {
    let env = TestEnv::new();
    let (request, checking, groceries) = full_request(&env);
    let entry = TransactionService::create(&env.ctx(), &request).unwrap();

    assert_eq!(entry.kind, MovementKind::Expense);
    assert_eq!(entry.account, checking);
    assert_eq!(entry.amount, dec!(42.10));
    assert_eq!(entry.note, "weekly shop");
    assert_eq!(entry.category, Some(groceries));
    assert_eq!(entry.latitude, Some(52.52));
    assert_eq!(entry.longitude, Some(13.40));
    assert_eq!(entry.executed_at, *NOW - Duration::hours(3));
    assert_eq!(entry.photo.as_deref(), Some("receipts/2024-07-01.jpg"));
    assert_eq!(entry.receiver, None);
    assert!(!entry.removed);
}

#[test]
fn create_with_negative_amount_produces_nothing() {
    let env = TestEnv::new();
    let checking = env.account("Checking", AccountKind::Current);
    let request = MutationRequest::new()
        .kind(MovementKind::Expense)
        .account(checking)
        .amount(dec!(-10));

    let err = env
        .store
        .apply_mutation(None, &request, &env.clock, &env.config)
        .unwrap_err();
    assert!(matches!(
        err,
        ledger_engine::EngineError::Merge(MergeError::AmountMustBePositive)
    ));
    assert_eq!(env.store.entry_count(), 0);
}

#[test]
fn create_without_account_fails() {
    let env = TestEnv::new();
    let request = MutationRequest::new()
        .kind(MovementKind::Income)
        .amount(dec!(10));
    let err = TransactionService::create(&env.ctx(), &request).unwrap_err();
    assert_eq!(err, MergeError::AccountNotFound(None));
}

#[test]
fn rules_short_circuit_in_order() {
    let env = TestEnv::new();
    // Unknown account and bad amount: the account rule runs first.
    let ghost = Uuid::new_v4();
    let request = MutationRequest::new()
        .kind(MovementKind::Income)
        .account(ghost)
        .amount(dec!(0));
    let err = TransactionService::create(&env.ctx(), &request).unwrap_err();
    assert_eq!(err, MergeError::AccountNotFound(Some(ghost)));
}

#[test]
fn changing_transfer_to_expense_clears_receiver() {
    let env = TestEnv::new();
    let checking = env.account("Checking", AccountKind::Current);
    let savings = env.account("Savings", AccountKind::Savings);
    let previous = LedgerEntry::new(checking, MovementKind::Transfer, dec!(75), *NOW)
        .with_receiver(savings);

    let request = MutationRequest::new().kind(MovementKind::Expense);
    let updated = TransactionService::update(&env.ctx(), &previous, &request).unwrap();
    assert_eq!(updated.kind, MovementKind::Expense);
    assert_eq!(updated.receiver, None);
}

#[test]
fn transfer_update_keeps_previous_receiver() {
    let env = TestEnv::new();
    let checking = env.account("Checking", AccountKind::Current);
    let savings = env.account("Savings", AccountKind::Savings);
    let previous = LedgerEntry::new(checking, MovementKind::Transfer, dec!(75), *NOW)
        .with_receiver(savings);

    let updated = TransactionService::update(
        &env.ctx(),
        &previous,
        &MutationRequest::new().amount(dec!(80)),
    )
    .unwrap();
    assert_eq!(updated.receiver, Some(savings));
    assert_eq!(updated.amount, dec!(80));
}

#[test]
fn unknown_receiver_is_not_found() {
    let env = TestEnv::new();
    let checking = env.account("Checking", AccountKind::Current);
    let ghost = Uuid::new_v4();
    let request = MutationRequest::new()
        .kind(MovementKind::Transfer)
        .account(checking)
        .amount(dec!(5))
        .receiver(ghost);
    let err = TransactionService::create(&env.ctx(), &request).unwrap_err();
    assert_eq!(err, MergeError::ReceiverNotFound(Some(ghost)));
    assert!(err.is_not_found());
}

#[test]
fn asset_reference_resolves_or_fails() {
    let env = TestEnv::new();
    let (request, checking, _) = full_request(&env);
    let bike = env.store.add_asset(DepreciableAsset::new(
        checking,
        dec!(800),
        dec!(100),
        *NOW,
        *NOW + Duration::days(365),
    ));
    let entry = TransactionService::create(&env.ctx(), &request.clone().asset(bike)).unwrap();
    assert_eq!(entry.asset, Some(bike));

    let ghost = Uuid::new_v4();
    let err = TransactionService::update(&env.ctx(), &entry, &MutationRequest::new().asset(ghost))
        .unwrap_err();
    assert_eq!(err, MergeError::AssetNotFound(ghost));
}

#[test]
fn empty_request_is_a_no_op() {
    let env = TestEnv::new();
    let (request, _, _) = full_request(&env);
    let created = TransactionService::create(&env.ctx(), &request).unwrap();
    let again = TransactionService::update(&env.ctx(), &created, &MutationRequest::new()).unwrap();
    assert_eq!(again, created);
}

#[test]
fn single_field_update_preserves_the_rest() {
    let env = TestEnv::new();
    let (request, _, _) = full_request(&env);
    let created = TransactionService::create(&env.ctx(), &request).unwrap();

    let updated = TransactionService::update(
        &env.ctx(),
        &created,
        &MutationRequest::new().note("monthly shop"),
    )
    .unwrap();
    assert_eq!(updated.note, "monthly shop");
    assert_eq!(
        LedgerEntry {
            note: created.note.clone(),
            ..updated
        },
        created
    );
}

#[test]
fn stored_update_round_trip() {
    let env = TestEnv::new();
    let (request, _, _) = full_request(&env);
    let created = env
        .store
        .apply_mutation(None, &request, &env.clock, &env.config)
        .unwrap();
    let updated = env
        .store
        .apply_mutation(
            Some(created.id),
            &MutationRequest::new().location(10.0, 200.0),
            &env.clock,
            &env.config,
        )
        .unwrap();
    assert_eq!(updated.latitude, Some(10.0));
    assert_eq!(updated.longitude, created.longitude);
    assert_eq!(env.store.entry(created.id), Some(updated));
}
