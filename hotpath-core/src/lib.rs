//! Hotpath Core Library
//!
//! Building blocks for measuring FFI call overhead: a monotonic clock, the
//! two workload kernels, the kernel capability abstraction, the foreign
//! module loader and capability probe, and configuration parsing.

pub mod clock;
pub mod config;
pub mod error;
pub mod foreign;
pub mod kernels;
pub mod probe;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, MonotonicClock};
pub use config::{BenchConfig, BenchPlan, ConfigLoader};
pub use error::{ForeignUnavailable, HardValidationError, HotpathError, HotpathResult};
pub use foreign::ForeignKernels;
pub use kernels::{Kernels, NativeKernels};
pub use probe::{try_acquire_foreign_kernels, ProbeConfig};
pub use types::{IterationCount, Mode, TimeUnit, Workload};
