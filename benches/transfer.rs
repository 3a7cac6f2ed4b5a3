use {
    criterion::{Criterion, criterion_group, criterion_main},
    pix_core::models::{Account, Bank, PixKey, Transaction},
    std::hint::black_box,
};

fn bench_lifecycle(c: &mut Criterion) {
    let bank = Bank::new("001", "bench bank").unwrap();
    let account_from = Account::new(&bank, "12345-6", "Alice").unwrap();
    let account_to = Account::new(&bank, "65432-1", "Bob").unwrap();
    let pix_key = PixKey::new("email", &account_to, "bob@bench.com").unwrap();

    c.bench_function("transaction_factory", |b| {
        b.iter(|| {
            Transaction::new(
                account_from.clone(),
                black_box(42.0),
                pix_key.clone(),
                None,
            )
            .unwrap()
        })
    });

    c.bench_function("transaction_lifecycle", |b| {
        b.iter(|| {
            let mut transaction =
                Transaction::new(account_from.clone(), black_box(42.0), pix_key.clone(), None)
                    .unwrap();
            transaction.complete().unwrap();
            transaction.confirm().unwrap();
            transaction
        })
    });
}

criterion_group!(benches, bench_lifecycle);
criterion_main!(benches);
