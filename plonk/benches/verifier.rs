use criterion::{criterion_group, criterion_main, Criterion};
use kestrel_algebra::{bn254::BN254Scalar, prelude::*};
use kestrel_plonk::plonk::constraint_system::{ArithCS, ConstraintSystem};
use kestrel_plonk::plonk::indexer::indexer;
use kestrel_plonk::plonk::prover::prover;
use kestrel_plonk::plonk::verifier::verifier;
use kestrel_plonk::poly_commit::kzg_poly_com::KZGCommitmentSchemeBN254;

/// A chain of squarings of a public input, 2^10 rows once padded.
fn square_chain(num_squarings: usize) -> ArithCS<BN254Scalar> {
    let mut cs = ArithCS::new();
    let mut value = BN254Scalar::from(3u32);
    let input = cs.new_variable(value);
    cs.prepare_pi_variable(input);

    let mut var = input;
    for _ in 0..num_squarings {
        var = cs.mul(var, var);
        value = value.square();
    }
    cs.insert_constant_gate(var, value);
    cs.pad();
    cs
}

fn bench_verifier(c: &mut Criterion) {
    let mut prng = test_rng();
    let mut cs = square_chain(1000);
    let witness = cs.get_and_clear_witness();
    let pi = cs.public_inputs(&witness);
    cs.verify_witness(&witness, &pi).unwrap();

    let pcs = KZGCommitmentSchemeBN254::new(cs.size() + 2, &mut prng);
    let prover_params = indexer(&cs, &pcs).unwrap();
    let proof = prover(&pcs, &cs, &prover_params, &witness).unwrap();

    let verifier_pcs = pcs.shrink_to_verifier_only();
    let verifier_params = prover_params.get_verifier_params();
    verifier(&verifier_pcs, &verifier_params, &pi, &proof).unwrap();

    let mut verifier_group = c.benchmark_group("bench_verifier");
    verifier_group.bench_function("verifier".to_string(), |b| {
        b.iter(|| verifier(&verifier_pcs, &verifier_params, &pi, &proof).unwrap())
    });
    verifier_group.finish();
}

criterion_group!(benches, bench_verifier);
criterion_main!(benches);
