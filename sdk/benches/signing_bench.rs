// Signing & validation benchmarks for the RELYO SDK.
//
// Covers Ed25519 keypair generation, raw signing and verification, the
// full wallet signing path, validator throughput, transaction ids, and HD
// derivation at various batch sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use relyo_sdk::crypto::{sign, verify};
use relyo_sdk::transaction::compute_transaction_id;
use relyo_sdk::{HdWallet, KeyPair, TransactionValidator, Wallet};

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("ed25519/keypair_generate", |b| {
        b.iter(KeyPair::generate);
    });
}

fn bench_sign_message(c: &mut Criterion) {
    let secret = KeyPair::generate().secret_key_bytes();
    let message = b"RELYO_TX:aa:bb:1000000000000000000:1000000000000000:42:1700000000000";

    c.bench_function("ed25519/sign_message", |b| {
        b.iter(|| sign(message, &secret));
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let keypair = KeyPair::generate();
    let message = b"RELYO_TX:aa:bb:1000000000000000000:1000000000000000:42:1700000000000";
    let signature = keypair.sign(message).to_bytes();
    let public_key = keypair.public_key();

    c.bench_function("ed25519/verify_signature", |b| {
        b.iter(|| verify(&signature, message, public_key.as_bytes()));
    });
}

fn bench_create_transaction(c: &mut Criterion) {
    let wallet = Wallet::create();
    let to = Wallet::create().address().to_hex();

    c.bench_function("wallet/create_transaction", |b| {
        b.iter(|| {
            wallet
                .create_transaction(&to, 1.5, 0.001, 42, Some(1_700_000_000_000))
                .unwrap()
        });
    });
}

fn bench_validate(c: &mut Criterion) {
    let wallet = Wallet::create();
    let tx = wallet
        .create_transaction(
            &Wallet::create().address().to_hex(),
            1.5,
            0.001,
            42,
            Some(1_700_000_000_000),
        )
        .unwrap();
    let validator = TransactionValidator::new();

    c.bench_function("validator/validate", |b| {
        b.iter(|| validator.validate(&tx));
    });
    c.bench_function("transaction/compute_id", |b| {
        b.iter(|| compute_transaction_id(&tx.data));
    });
}

fn bench_hd_derive(c: &mut Criterion) {
    let hd = HdWallet::from_seed(&[7u8; 32]).unwrap();
    let mut group = c.benchmark_group("hd/derive_wallets");

    for count in [1u32, 10, 100] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| hd.derive_wallets(count, 0).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_message,
    bench_verify_signature,
    bench_create_transaction,
    bench_validate,
    bench_hd_derive,
);
criterion_main!(benches);
