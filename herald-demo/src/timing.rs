use std::time::Duration;

/// Simulated delays used by VMs and the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long a VM takes to boot.
    pub boot_delay: Duration,
    /// Pause between two data emissions of a running VM.
    pub work_interval: Duration,
    /// Simulated I/O wait after a VM receives a task.
    pub task_delay: Duration,
    /// How long the host lets VMs work after each broadcast.
    pub settle: Duration,
}

impl Timing {
    /// Timing with every delay set to zero.
    pub const fn instant() -> Self {
        Self {
            boot_delay: Duration::ZERO,
            work_interval: Duration::ZERO,
            task_delay: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            boot_delay: Duration::from_millis(200),
            work_interval: Duration::from_millis(300),
            task_delay: Duration::from_millis(100),
            settle: Duration::from_millis(1_000),
        }
    }
}
