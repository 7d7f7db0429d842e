//! Acceleration hardware detection.
//!
//! Chunk size and worker-pool width both depend on whether the inference
//! stack has a GPU behind it, so detection happens once at startup and the
//! result is threaded through the shared state.

use std::env;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accelerator {
    Cpu,
    Cuda,
}

impl Accelerator {
    /// Detect acceleration hardware.
    ///
    /// `RECAP_DEVICE=cpu|cuda` overrides detection; otherwise the NVIDIA
    /// driver interfaces are probed.
    #[must_use]
    pub fn detect() -> Self {
        if let Ok(forced) = env::var("RECAP_DEVICE")
            && let Some(device) = Self::parse(&forced)
        {
            return device;
        }

        if Path::new("/proc/driver/nvidia/version").exists() || Path::new("/dev/nvidia0").exists()
        {
            Accelerator::Cuda
        } else {
            Accelerator::Cpu
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cpu" => Some(Accelerator::Cpu),
            "cuda" | "gpu" => Some(Accelerator::Cuda),
            _ => None,
        }
    }

    /// Maximum characters per chunk.
    #[must_use]
    pub const fn chunk_size(self) -> usize {
        match self {
            Accelerator::Cpu => 512,
            Accelerator::Cuda => 1024,
        }
    }

    /// Width of the bounded worker pool.
    #[must_use]
    pub const fn worker_count(self) -> usize {
        match self {
            Accelerator::Cpu => 2,
            Accelerator::Cuda => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Accelerator::Cpu => "cpu",
            Accelerator::Cuda => "cuda",
        }
    }
}
