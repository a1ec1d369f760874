//! Builds one sampler per worker from a name and overrides, then prints the
//! first few training units of each worker.
//!
//! Run with `RUST_LOG=debug` to see lifecycle transitions and retries.

use framepair_core::init_logging;
use framepair_data::builder::{build_worker_samplers, SamplerConfig};
use framepair_data::{DatasetHandle, Record, SampleStream, TaskFamily, VecDataset};
use std::sync::Arc;

fn synthetic_dataset(name: &str, len: usize) -> DatasetHandle {
    let records: Vec<Record> = (0..len)
        .map(|i| {
            let x = i as f32;
            Record::with_box(format!("{}/{:05}.jpg", name, i), [x, x, x + 32.0, x + 32.0])
        })
        .collect();
    Arc::new(VecDataset::new(records).with_name(name))
}

fn main() {
    init_logging();

    let datasets = vec![synthetic_dataset("got10k", 120), synthetic_dataset("lasot", 40)];
    let config = SamplerConfig::new(TaskFamily::Track, "uniform")
        .with_seed(7)
        .with_override("pair_gap_max", 5)
        .with_override("negative_pair_ratio", 0.2);

    let workers = build_worker_samplers(&config, &datasets, 2).expect("valid sampler config");
    for (worker, sampler) in workers.into_iter().enumerate() {
        println!("--- worker {} ---", worker);
        for unit in SampleStream::new(sampler).take(4) {
            match unit {
                Ok(unit) => println!(
                    "  {:?} negative={} frames={:?}",
                    unit.indices(),
                    unit.negative,
                    unit.frames.iter().map(|f| f.record.frame.as_str()).collect::<Vec<_>>()
                ),
                Err(e) => println!("  sampling error: {}", e),
            }
        }
    }
}
