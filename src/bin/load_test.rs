//! Load Testing Tool
//!
//! Hammers a single wallet with concurrent deposits and withdrawals and
//! checks that no update was lost.
//!
//! Run with: cargo run --bin load_test --release -- --workers 50 --operations 100

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use wallet_ledger::handlers::CreateWalletCommand;
use wallet_ledger::{db, Config, ErrorKind, PgBalanceStore, WalletHandler};

const SEED_BALANCE: i64 = 10_000;
const DEPOSIT_AMOUNT: i64 = 7;
const WITHDRAW_AMOUNT: i64 = 11;

#[derive(Default)]
struct Tally {
    deposited: AtomicI64,
    withdrawn: AtomicI64,
    succeeded: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

fn arg_or(args: &[String], flag: &str, default: u64) -> u64 {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let workers = arg_or(&args, "--workers", 50);
    let operations = arg_or(&args, "--operations", 100);

    let config = Config::load()?;

    println!(
        "Load Test - {} workers x {} operations against one wallet",
        workers, operations
    );
    println!("Connecting to database...");

    let pool = db::connect(&config).await?;
    db::run_migrations(&pool).await?;

    let ledger = Arc::new(WalletHandler::with_timeout(
        PgBalanceStore::new(pool.clone()),
        config.store_timeout,
    ));

    let wallet = ledger.create_wallet(CreateWalletCommand::new()).await?;
    ledger.deposit(wallet.id, SEED_BALANCE).await?;
    println!("Wallet {} seeded with {}", wallet.id, SEED_BALANCE);

    let tally = Arc::new(Tally::default());
    let start = Instant::now();

    let tasks: Vec<_> = (0..workers)
        .map(|worker| {
            let ledger = ledger.clone();
            let tally = tally.clone();
            tokio::spawn(async move {
                for i in 0..operations {
                    // Two withdrawals per deposit drains the wallet mid-run
                    let is_deposit = (worker + i) % 3 == 0;
                    let result = if is_deposit {
                        ledger.deposit(wallet.id, DEPOSIT_AMOUNT).await
                    } else {
                        ledger.withdraw(wallet.id, WITHDRAW_AMOUNT).await
                    };

                    match result {
                        Ok(()) => {
                            tally.succeeded.fetch_add(1, Ordering::Relaxed);
                            if is_deposit {
                                tally.deposited.fetch_add(DEPOSIT_AMOUNT, Ordering::Relaxed);
                            } else {
                                tally.withdrawn.fetch_add(WITHDRAW_AMOUNT, Ordering::Relaxed);
                            }
                        }
                        Err(e) if e.kind() == ErrorKind::InsufficientFunds => {
                            tally.rejected.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            eprintln!("worker {}: {}", worker, e);
                            tally.failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for task in tasks {
        task.await?;
    }

    let elapsed = start.elapsed();
    let total = workers * operations;
    let rate = total as f64 / elapsed.as_secs_f64();

    let final_balance = ledger.get_wallet(wallet.id).await?.balance;
    let expected = SEED_BALANCE + tally.deposited.load(Ordering::Relaxed)
        - tally.withdrawn.load(Ordering::Relaxed);

    println!("\n=== Load Test Results ===");
    println!("Total operations: {}", total);
    println!("Successful: {}", tally.succeeded.load(Ordering::Relaxed));
    println!("Insufficient funds: {}", tally.rejected.load(Ordering::Relaxed));
    println!("Store failures: {}", tally.failed.load(Ordering::Relaxed));
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} ops/sec", rate);
    println!("Final balance: {} (expected {})", final_balance, expected);

    pool.close().await;

    // Store failures may hide applied mutations, so only a clean run is
    // expected to reconcile exactly.
    if tally.failed.load(Ordering::Relaxed) == 0 && final_balance != expected {
        anyhow::bail!("balance mismatch: {} != {}", final_balance, expected);
    }
    if final_balance < 0 {
        anyhow::bail!("negative balance: {}", final_balance);
    }

    Ok(())
}
