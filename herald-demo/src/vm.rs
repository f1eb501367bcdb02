use crate::timing::Timing;
use herald::{EmitError, EmitMode, IntoSlotResult, Signal};
use std::{
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

/// Identifier of a simulated VM.
pub type VmId = u32;

/// A simulated virtual machine.
///
/// A VM announces its boot on [`Vm::on_boot`] and reports output through a
/// private data signal that only its owner can subscribe to, via
/// [`Vm::on_data_out`]. Both are synchronous: the VM's own thread runs the
/// subscribers.
///
/// Data is only ever emitted once the VM is booted: [`Vm::work`] requires a
/// booted VM and [`Vm::data_in`] queues silently until then.
pub struct Vm {
    id: VmId,
    timing: Timing,
    started: AtomicBool,
    booted: AtomicBool,
    running: AtomicBool,
    tasks: Mutex<Vec<String>>,
    /// Emitted once with the VM id when boot completes.
    pub on_boot: Signal<VmId>,
    on_data: Signal<String>,
}

impl Vm {
    /// Create a powered-off VM.
    pub fn new(id: VmId, timing: Timing) -> Self {
        Self {
            id,
            timing,
            started: AtomicBool::new(false),
            booted: AtomicBool::new(false),
            running: AtomicBool::new(true),
            tasks: Mutex::new(Vec::new()),
            on_boot: Signal::builder(EmitMode::Synchronous)
                .name(format!("vm-{id}.on_boot"))
                .build(),
            on_data: Signal::builder(EmitMode::Synchronous)
                .name(format!("vm-{id}.on_data"))
                .build(),
        }
    }

    /// This VM's id.
    pub fn id(&self) -> VmId {
        self.id
    }

    /// Subscribe to the VM's data output.
    pub fn on_data_out<F, R>(&mut self, f: F)
    where
        F: Fn(&String) -> R + Send + Sync + 'static,
        R: IntoSlotResult,
    {
        self.on_data.connect(f);
    }

    /// Whether [`Vm::boot`] has been called, finished or not.
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Whether the VM is up. Stays `false` if the boot announcement failed.
    pub fn is_booted(&self) -> bool {
        self.booted.load(Ordering::Acquire)
    }

    /// Whether the VM has not been killed yet.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of tasks waiting to be worked on.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Boot the VM and announce it on [`Vm::on_boot`].
    ///
    /// # Panics
    ///
    /// Panics if the VM was already booted.
    pub fn boot(&self) -> Result<(), EmitError> {
        assert!(
            !self.started.swap(true, Ordering::AcqRel),
            "vm {} booted twice",
            self.id
        );
        tracing::debug!(vm = self.id, "booting");
        thread::sleep(self.timing.boot_delay);
        // Listeners of the announcement may already send work.
        self.booted.store(true, Ordering::Release);
        if let Err(err) = self.on_boot.emit(&self.id) {
            self.booted.store(false, Ordering::Release);
            return Err(err);
        }
        Ok(())
    }

    /// Perform up to `rounds` units of work, stopping early once killed.
    ///
    /// Each round reports either the oldest queued task or a generated page
    /// on the data signal.
    ///
    /// # Panics
    ///
    /// Panics if the VM has not booted.
    pub fn work(&self, rounds: usize) -> Result<(), EmitError> {
        assert!(self.is_booted(), "vm {} must boot before working", self.id);
        for _ in 0..rounds {
            if !self.is_running() {
                break;
            }
            thread::sleep(self.timing.work_interval);

            let next = {
                let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
                (!tasks.is_empty()).then(|| tasks.remove(0))
            };
            let line = match next {
                Some(task) => format!("VM {} solving task: {task}", self.id),
                None => format!("<html>... VM {} ...</html>", self.id),
            };
            self.on_data.emit(&line)?;
        }
        Ok(())
    }

    /// Boot, then work until killed or `rounds` are done.
    pub fn run(&self, rounds: usize) -> Result<(), EmitError> {
        self.boot()?;
        self.work(rounds)
    }

    /// Queue a task and acknowledge it on the data signal.
    ///
    /// A VM that has not booted queues the task without acknowledging it.
    pub fn data_in(&self, task: &str) -> Result<(), EmitError> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task.to_owned());
        if !self.is_booted() {
            tracing::debug!(vm = self.id, %task, "queued before boot");
            return Ok(());
        }
        thread::sleep(self.timing.task_delay);
        self.on_data
            .emit(&format!("{}: Task received: {task}", self.id))
    }

    /// Stop the VM. [`Vm::work`] returns after its current round.
    pub fn kill(&self) {
        tracing::info!(vm = self.id, "going down");
        self.running.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("id", &self.id)
            .field("started", &self.has_started())
            .field("booted", &self.is_booted())
            .field("running", &self.is_running())
            .field("pending_tasks", &self.pending_tasks())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn capture(vm: &mut Vm) -> Arc<Mutex<Vec<String>>> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = lines.clone();
        vm.on_data_out(move |line: &String| sink.lock().unwrap().push(line.clone()));
        lines
    }

    #[test]
    fn test_boot_announces_id() {
        let mut vm = Vm::new(7, Timing::instant());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        vm.on_boot.connect(move |id: &VmId| sink.lock().unwrap().push(*id));

        assert!(!vm.is_booted());
        vm.boot().unwrap();

        assert!(vm.has_started());
        assert!(vm.is_booted());
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_failed_announcement_leaves_vm_unbooted() {
        let mut vm = Vm::new(4, Timing::instant());
        vm.on_boot.connect(|_: &VmId| Err::<(), _>("host unreachable"));
        let lines = capture(&mut vm);

        assert!(vm.boot().is_err());
        assert!(vm.has_started());
        assert!(!vm.is_booted());

        vm.data_in("Take backup").unwrap();
        assert!(lines.lock().unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "vm 3 booted twice")]
    fn test_double_boot_panics() {
        let vm = Vm::new(3, Timing::instant());
        vm.boot().unwrap();
        let _ = vm.boot();
    }

    #[test]
    fn test_work_prefers_queued_tasks() {
        let mut vm = Vm::new(1, Timing::instant());
        let lines = capture(&mut vm);

        vm.boot().unwrap();
        vm.data_in("Take backup").unwrap();
        vm.work(2).unwrap();

        assert_eq!(
            *lines.lock().unwrap(),
            vec![
                "1: Task received: Take backup".to_string(),
                "VM 1 solving task: Take backup".to_string(),
                "<html>... VM 1 ...</html>".to_string(),
            ]
        );
        assert_eq!(vm.pending_tasks(), 0);
    }

    #[test]
    fn test_killed_vm_does_no_work() {
        let mut vm = Vm::new(2, Timing::instant());
        let lines = capture(&mut vm);

        vm.boot().unwrap();
        vm.kill();
        vm.work(5).unwrap();

        assert!(!vm.is_running());
        assert!(lines.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unbooted_vm_queues_without_emitting() {
        let mut vm = Vm::new(9, Timing::instant());
        let lines = capture(&mut vm);

        vm.data_in("x").unwrap();

        assert!(lines.lock().unwrap().is_empty());
        assert_eq!(vm.pending_tasks(), 1);

        // Queued work is picked up once the VM is up.
        vm.boot().unwrap();
        vm.work(1).unwrap();
        assert_eq!(*lines.lock().unwrap(), vec!["VM 9 solving task: x".to_string()]);
    }

    #[test]
    #[should_panic(expected = "vm 9 must boot before working")]
    fn test_work_before_boot_panics() {
        let vm = Vm::new(9, Timing::instant());
        let _ = vm.work(1);
    }
}
