//! # herald-demo
//!
//! A usage harness for [`herald::Signal`]: a host owns a fixed set of
//! simulated VMs and talks to them exclusively through signals.
//!
//! ```text
//!            on_boot (sync)            on_data (sync)
//!   Vm ───────────────────► Host ◄─────────────────── Vm
//!    ▲                                                 ▲
//!    └──────────── broadcast (async fan-out) ──────────┘
//! ```
//!
//! - Each [`Vm`] owns a public `on_boot` signal and a private `on_data`
//!   signal.
//! - The [`Host`] connects its own handlers to both, and owns an
//!   asynchronous `broadcast` signal with one slot per VM. It waits for every
//!   VM to announce its boot before broadcasting; a broadcast returns once
//!   every VM has queued the command.
//! - A VM emits no data before its boot has been announced.
//!
//! Nothing here manages real processes; VMs sleep and emit strings.

mod error;
mod host;
mod timing;
mod vm;

pub use error::HostError;
pub use host::{Host, HostEvent, RunSummary};
pub use timing::Timing;
pub use vm::{Vm, VmId};
