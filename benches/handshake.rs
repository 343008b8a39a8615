use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use solinas_pairing_auth::{generate, Handshake, PairingEngine, SeededRng, TypeA};

fn engine() -> TypeA {
    TypeA::new(&generate(160, 512, 1).unwrap()).unwrap()
}

fn bench_pairing(c: &mut Criterion) {
    let engine = engine();
    let mut rng = SeededRng::from_seed(1);
    let p = engine.random_g1(&mut rng);
    let q = engine.random_g1(&mut rng);

    c.bench_function("type_a_pairing", |b| {
        b.iter(|| engine.pairing(black_box(&p), black_box(&q)))
    });
}

fn bench_g1_exponentiation(c: &mut Criterion) {
    let engine = engine();
    let mut rng = SeededRng::from_seed(2);
    let p = engine.random_g1(&mut rng);
    let s = engine.random_scalar(&mut rng);

    c.bench_function("type_a_g1_mul", |b| {
        b.iter(|| engine.g1_mul(black_box(&p), black_box(&s)))
    });
}

fn bench_full_handshake(c: &mut Criterion) {
    let mut rng = SeededRng::from_seed(3);
    let handshake = Handshake::new(engine(), &mut rng);
    let a = handshake.enroll_named("vehicle-a").unwrap();
    let b = handshake.enroll_named("vehicle-b").unwrap();

    let mut group = c.benchmark_group("handshake");
    group.sample_size(10);
    group.bench_function("seal_extract_verify", |bench| {
        bench.iter(|| {
            handshake
                .run(&a, &b, black_box(b"The quick brown fox"), &mut rng)
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_pairing,
    bench_g1_exponentiation,
    bench_full_handshake
);
criterion_main!(benches);
