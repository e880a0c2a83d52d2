//! Blocked GEMM throughput benchmark.
//!
//! Square sizes 64..512 plus batched decoder-ish shapes; reports element
//! throughput (2*M*N*K FLOPs per iteration). Compares the scalar reference
//! microkernel against the auto-selected one.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bgemm_kernels::{
    select_matmul_kernel, BlockedKernel, MatmulKernel, ScalarKernel, TensorView, TensorViewMut,
};

const GEMM_SIZES: &[(usize, usize, usize)] = &[
    (64, 64, 64),
    (128, 128, 128),
    (256, 256, 256),
    (512, 512, 512),
];

/// Batched shapes in the style of encoder activations against one weight.
const BATCHED_SIZES: &[(usize, usize, usize, usize)] = &[
    (6, 64, 384, 384),
    (2, 128, 512, 512),
];

fn generate_data(n: usize, seed: u64) -> Vec<f32> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as f32) / (u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

fn bench_square(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm_square");
    let scalar = BlockedKernel::new(ScalarKernel);
    let auto = select_matmul_kernel().expect("kernel selection");

    for &(n, m, o) in GEMM_SIZES {
        let a = generate_data(n * m, 1);
        let b = generate_data(m * o, 2);
        let a_shape = [1usize, n, m];
        let b_shape = [m, o];
        let c_shape = [1usize, n, o];

        group.throughput(Throughput::Elements((2 * n * m * o) as u64));

        group.bench_with_input(BenchmarkId::new("scalar", n), &n, |bench, _| {
            let mut out = vec![0.0f32; n * o];
            bench.iter(|| {
                scalar.matmul(
                    &TensorView::new(black_box(&a), &a_shape),
                    &TensorView::new(black_box(&b), &b_shape),
                    &mut TensorViewMut::new(&mut out, &c_shape),
                );
            });
        });

        group.bench_with_input(BenchmarkId::new(auto.name(), n), &n, |bench, _| {
            let mut out = vec![0.0f32; n * o];
            bench.iter(|| {
                auto.matmul(
                    &TensorView::new(black_box(&a), &a_shape),
                    &TensorView::new(black_box(&b), &b_shape),
                    &mut TensorViewMut::new(&mut out, &c_shape),
                );
            });
        });
    }
    group.finish();
}

fn bench_batched(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm_batched_shared_b");
    let auto = select_matmul_kernel().expect("kernel selection");

    for &(batch, n, m, o) in BATCHED_SIZES {
        let a = generate_data(batch * n * m, 3);
        let b = generate_data(m * o, 4);
        let a_shape = [batch, n, m];
        let b_shape = [m, o];
        let c_shape = [batch, n, o];

        group.throughput(Throughput::Elements((2 * batch * n * m * o) as u64));

        group.bench_with_input(
            BenchmarkId::new(auto.name(), format!("{}x{}x{}x{}", batch, n, m, o)),
            &batch,
            |bench, _| {
                let mut out = vec![0.0f32; batch * n * o];
                bench.iter(|| {
                    auto.matmul(
                        &TensorView::new(black_box(&a), &a_shape),
                        &TensorView::new(black_box(&b), &b_shape),
                        &mut TensorViewMut::new(&mut out, &c_shape),
                    );
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_square, bench_batched);
criterion_main!(benches);
