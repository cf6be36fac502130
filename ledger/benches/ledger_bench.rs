use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use granary_ledger::{accrual, LedgerConfig, Position, StakingLedger};
use granary_tokens::MemTokenBank;
use granary_types::{AccountAddress, LedgerParams, Timestamp, TokenId, SECONDS_PER_YEAR};

fn staker() -> AccountAddress {
    AccountAddress::new(format!("gry_{:0>60}", 1))
}

fn make_positions(n: usize) -> Vec<Position> {
    (0..n)
        .map(|i| Position {
            amount: 1_000_000 + i as u128,
            created_at: Timestamp::new(i as u64 * 60),
        })
        .collect()
}

fn bench_total_reward(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_reward");
    let params = LedgerParams::new(12, 0);
    let now = Timestamp::new(SECONDS_PER_YEAR);

    for position_count in [1, 10, 100, 1000] {
        let positions = make_positions(position_count);
        group.bench_with_input(
            BenchmarkId::new("positions", position_count),
            &position_count,
            |b, _| {
                b.iter(|| {
                    black_box(accrual::total_reward(
                        black_box(&positions),
                        black_box(&params),
                        black_box(now),
                    ))
                });
            },
        );
    }

    group.finish();
}

fn bench_stake(c: &mut Criterion) {
    c.bench_function("ledger_stake", |b| {
        b.iter_batched(
            || {
                let ledger = StakingLedger::new(&LedgerConfig::default());
                let mut bank = MemTokenBank::new();
                bank.credit(&TokenId::new("GRAIN"), &staker(), u128::MAX / 4);
                (ledger, bank)
            },
            |(mut ledger, mut bank)| {
                for i in 0..100u64 {
                    ledger
                        .stake(&staker(), 1_000, Timestamp::new(i), &mut bank)
                        .unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_apply_and_claim(c: &mut Criterion) {
    c.bench_function("ledger_apply_and_claim", |b| {
        b.iter_batched(
            || {
                let mut ledger = StakingLedger::with_params(
                    TokenId::new("GRAIN"),
                    TokenId::new("YIELD"),
                    LedgerParams::new(12, 0),
                    None,
                );
                let mut bank = MemTokenBank::new();
                bank.credit(&TokenId::new("GRAIN"), &staker(), u128::MAX / 4);
                for i in 0..100u64 {
                    ledger
                        .stake(&staker(), 1_000_000, Timestamp::new(i), &mut bank)
                        .unwrap();
                }
                (ledger, bank)
            },
            |(mut ledger, mut bank)| {
                let now = Timestamp::new(SECONDS_PER_YEAR);
                let mut issuer = MemTokenBank::new();
                ledger.apply_claim(&staker(), now).unwrap();
                ledger.claim(&staker(), now, &mut bank, &mut issuer).unwrap();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_total_reward, bench_stake, bench_apply_and_claim);
criterion_main!(benches);
