use crate::{
    error::HostError,
    timing::Timing,
    vm::{Vm, VmId},
};
use herald::{EmitMode, Signal};
use std::{
    panic,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread,
};

/// Something the host heard from one of its VMs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The VM announced that it booted.
    Booted(VmId),
    /// The VM reported a line of data.
    Data {
        /// The reporting VM.
        vm: VmId,
        /// What it reported.
        line: String,
    },
}

#[derive(Debug, Default)]
struct HostState {
    booted: usize,
    abandoned: usize,
    events: Vec<HostEvent>,
}

/// State the host shares with the handlers it connects to its VMs.
#[derive(Debug, Default)]
struct Shared {
    state: Mutex<HostState>,
    boots: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn vm_booted(&self, id: VmId) {
        let up = {
            let mut state = self.lock();
            state.booted += 1;
            state.events.push(HostEvent::Booted(id));
            state.booted
        };
        self.boots.notify_all();
        tracing::info!(vm = id, thread = ?thread::current().id(), up, "vm booted");
    }

    fn vm_data(&self, id: VmId, line: &str) {
        tracing::info!(vm = id, thread = ?thread::current().id(), "received: {line}");
        self.lock().events.push(HostEvent::Data {
            vm: id,
            line: line.to_owned(),
        });
    }

    fn boot_abandoned(&self, id: VmId) {
        tracing::warn!(vm = id, "vm stopped before announcing boot");
        self.lock().abandoned += 1;
        self.boots.notify_all();
    }

    /// Block until every VM either booted or gave up. True if all booted.
    fn wait_for_boots(&self, expected: usize) -> bool {
        let state = self
            .boots
            .wait_while(self.lock(), |s| s.booted + s.abandoned < expected)
            .unwrap_or_else(PoisonError::into_inner);
        state.booted >= expected
    }
}

/// Reports a VM thread that ends without its VM having booted.
struct BootWatch<'a> {
    vm: &'a Vm,
    shared: &'a Shared,
}

impl Drop for BootWatch<'_> {
    fn drop(&mut self) {
        if !self.vm.is_booted() {
            self.shared.boot_abandoned(self.vm.id());
        }
    }
}

/// Outcome of [`Host::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of VMs the host manages.
    pub vms: usize,
    /// Number of boot announcements received.
    pub booted: usize,
    /// Everything the host heard, in arrival order.
    pub events: Vec<HostEvent>,
}

impl RunSummary {
    /// The data lines received, in arrival order.
    pub fn data(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|event| match event {
            HostEvent::Data { line, .. } => Some(line.as_str()),
            HostEvent::Booted(_) => None,
        })
    }

    /// The data lines received from one VM, in arrival order.
    pub fn data_from(&self, vm: VmId) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(move |event| match event {
            HostEvent::Data { vm: from, line } if *from == vm => Some(line.as_str()),
            _ => None,
        })
    }
}

/// Owns a fixed set of VMs and a broadcast signal reaching all of them.
pub struct Host {
    vms: Vec<Arc<Vm>>,
    broadcast: Signal<String>,
    shared: Arc<Shared>,
    timing: Timing,
    rounds: usize,
}

impl Host {
    /// Create `count` VMs and wire them to the host.
    pub fn new(count: u32, timing: Timing) -> Self {
        let shared = Arc::new(Shared::default());
        let mut broadcast = Signal::builder(EmitMode::Asynchronous)
            .name("host.broadcast")
            .build();

        let vms = (0..count)
            .map(|id| {
                let mut vm = Vm::new(id, timing);

                let on_boot = Arc::clone(&shared);
                vm.on_boot
                    .connect(move |id: &VmId| on_boot.vm_booted(*id));
                let on_data = Arc::clone(&shared);
                vm.on_data_out(move |line: &String| on_data.vm_data(id, line));

                let vm = Arc::new(vm);
                let target = Arc::clone(&vm);
                broadcast.connect(move |task: &String| target.data_in(task));
                vm
            })
            .collect();

        Self {
            vms,
            broadcast,
            shared,
            timing,
            rounds: 3,
        }
    }

    /// Number of work rounds each VM performs during [`Host::run`].
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// The managed VMs.
    pub fn vms(&self) -> &[Arc<Vm>] {
        &self.vms
    }

    /// Run every VM on its own thread and broadcast `commands` to them.
    ///
    /// Commands go out only once every VM has announced its boot, and each
    /// broadcast returns once every VM has queued the command. VMs are killed
    /// and joined before this returns, on success and on failure.
    ///
    /// # Panics
    ///
    /// A host runs its VMs once: calling this again boots every VM a second
    /// time, which panics. A panic on a VM thread is re-raised here after
    /// all VMs have been joined.
    pub fn run(&self, commands: &[String]) -> Result<RunSummary, HostError> {
        if let Some(vm) = self.vms.iter().find(|vm| vm.has_started()) {
            panic!("vm {} booted twice", vm.id());
        }

        let mut errors = Vec::new();
        let mut panicked = None;

        thread::scope(|scope| {
            let rounds = self.rounds;
            let shared: &Shared = &self.shared;
            let mut handles = Vec::with_capacity(self.vms.len());
            for vm in &self.vms {
                let spawned = thread::Builder::new()
                    .name(format!("vm-{}", vm.id()))
                    .spawn_scoped(scope, move || {
                        let _watch = BootWatch { vm: &**vm, shared };
                        vm.run(rounds)
                    });
                match spawned {
                    Ok(handle) => handles.push((vm.id(), handle)),
                    Err(source) => errors.push(HostError::Spawn { id: vm.id(), source }),
                }
            }

            if errors.is_empty() {
                if shared.wait_for_boots(self.vms.len()) {
                    if let Err(err) = self.broadcast_all(commands) {
                        errors.push(err);
                    }
                } else {
                    tracing::warn!("not every vm booted, nothing broadcast");
                }
            }
            self.kill_all();

            for (id, handle) in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(source)) => errors.push(HostError::Vm { id, source }),
                    Err(payload) => {
                        tracing::error!(vm = id, "vm thread panicked");
                        if panicked.is_none() {
                            panicked = Some(payload);
                        }
                    }
                }
            }
        });

        if let Some(payload) = panicked {
            panic::resume_unwind(payload);
        }
        if let Some(err) = HostError::from_many(errors) {
            return Err(err);
        }

        let state = self.shared.lock();
        Ok(RunSummary {
            vms: self.vms.len(),
            booted: state.booted,
            events: state.events.clone(),
        })
    }

    fn broadcast_all(&self, commands: &[String]) -> Result<(), HostError> {
        for command in commands {
            tracing::info!(%command, vms = self.vms.len(), "broadcasting");
            self.broadcast
                .emit(command)
                .map_err(|source| HostError::Broadcast {
                    command: command.clone(),
                    source,
                })?;
            thread::sleep(self.timing.settle);
        }
        Ok(())
    }

    /// Stop every VM.
    pub fn kill_all(&self) {
        for vm in &self.vms {
            vm.kill();
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("vms", &self.vms.len())
            .field("broadcast", &self.broadcast)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}
