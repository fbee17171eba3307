use std::hint::black_box;
use std::time::Instant;

use perf_bench::*;

fn main() {
    let queries = generate_benchmark_queries();

    let start_time = Instant::now();
    let mut checksum: f64 = 0.0;

    // Bracket expansion plus BISECTION_STEPS gain evaluations per query.
    for q in &queries {
        checksum += bisect_required_operations(
            black_box(q.current),
            q.max,
            black_box(q.desired_gain),
            q.rate,
        );
    }

    let elapsed_time = start_time.elapsed();

    let final_checksum = black_box(checksum);

    println!("--- Bisection Solver Results ({} Queries) ---", NUM_QUERIES);
    println!("Checksum: {:.10}", final_checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
