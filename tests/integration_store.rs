//! PostgreSQL Store Integration Tests
//!
//! Require a reachable database in DATABASE_URL; each test returns early
//! when it is not set.

use std::sync::Arc;

use wallet_ledger::handlers::CreateWalletCommand;
use wallet_ledger::{BalanceStore, ErrorKind, PgBalanceStore, StoreError, WalletHandler};
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_pg_store_primitives() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let store = PgBalanceStore::new(pool);
    let id = Uuid::new_v4();

    assert_eq!(store.insert(id, 0).await.unwrap(), 1);
    assert!(matches!(store.insert(id, 0).await, Err(StoreError::UniqueViolation)));

    assert_eq!(store.add(id, 100).await.unwrap(), 1);
    assert_eq!(store.subtract_if_sufficient(id, 101).await.unwrap(), 0);
    assert_eq!(store.subtract_if_sufficient(id, 40).await.unwrap(), 1);
    assert_eq!(store.read(id).await.unwrap(), Some(60));
    assert!(store.exists(id).await.unwrap());

    let missing = Uuid::new_v4();
    assert_eq!(store.add(missing, 1).await.unwrap(), 0);
    assert_eq!(store.read(missing).await.unwrap(), None);
    assert!(!store.exists(missing).await.unwrap());
}

#[tokio::test]
async fn test_pg_store_overflow_is_classified() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let store = PgBalanceStore::new(pool);
    let id = Uuid::new_v4();

    store.insert(id, i64::MAX).await.unwrap();
    assert!(matches!(store.add(id, 1).await, Err(StoreError::Overflow(_))));
    assert_eq!(store.read(id).await.unwrap(), Some(i64::MAX));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pg_concurrent_deposits() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let ledger = Arc::new(WalletHandler::new(PgBalanceStore::new(pool)));
    let wallet = ledger.create_wallet(CreateWalletCommand::new()).await.unwrap();

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.deposit(wallet.id, 1).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(ledger.get_wallet(wallet.id).await.unwrap().balance, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pg_concurrent_withdrawals_never_overdraw() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let ledger = Arc::new(WalletHandler::new(PgBalanceStore::new(pool)));
    let wallet = ledger.create_wallet(CreateWalletCommand::new()).await.unwrap();
    ledger.deposit(wallet.id, 1000).await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.withdraw(wallet.id, 100).await })
        })
        .collect();

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => succeeded += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::InsufficientFunds),
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(ledger.get_wallet(wallet.id).await.unwrap().balance, 0);
}
