//! Random data generation for benchmarks and stress testing.

pub mod scenario;
