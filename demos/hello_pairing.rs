//! Minimal tour of the Type-A engine.
//!
//! This example demonstrates:
//! - Generating small Solinas-form parameters
//! - Sampling a point of G1
//! - Hashing that point back into G1
//! - Checking bilinearity on the result

use solinas_pairing_auth::{generate, DomainHash, ElementRef, PairingEngine, SeededRng, TypeA};

fn main() {
    println!("Type-A Pairing: Hello Example\n");

    println!("Step 1: Generate parameters (rbits = 100, qbits = 200, seed = 1)");
    let params = generate(100, 200, 1).expect("Parameter search should succeed");
    print!("{}", params.to_block());
    println!();

    println!("Step 2: Build the pairing engine");
    let engine = TypeA::new(&params).expect("Generated parameters are consistent");
    println!("  G1 elements take {} bytes\n", engine.g1_len());

    println!("Step 3: Sample P in G1");
    let mut rng = SeededRng::from_seed(1);
    let p = engine.random_g1(&mut rng);
    println!("  P = {}\n", hex::encode(engine.g1_to_bytes(&p)));

    println!("Step 4: Hash P into G1");
    let hash = DomainHash::new(engine.clone());
    let h = hash.hash_to_g1(&[ElementRef::G1(&p)]);
    println!("  H = {}\n", hex::encode(engine.g1_to_bytes(&h)));

    println!("Step 5: Check e(P^a, H) == e(P, H)^a");
    let a = engine.random_scalar(&mut rng);
    let lhs = engine.pairing(&engine.g1_mul(&p, &a), &h);
    let rhs = engine.gt_pow(&engine.pairing(&p, &h), &a);
    println!("  bilinear: {}", lhs == rhs);
}
