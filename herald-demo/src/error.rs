use crate::vm::VmId;
use herald::EmitError;
use thiserror::Error;

/// Errors produced while running the host.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HostError {
    /// Broadcasting a command to the VMs failed.
    #[error("broadcast of {command:?} failed")]
    Broadcast {
        /// The command being broadcast.
        command: String,
        /// The underlying emission failure.
        #[source]
        source: EmitError,
    },

    /// A VM's own signal emission failed.
    #[error("vm {id} failed")]
    Vm {
        /// The failing VM.
        id: VmId,
        /// The underlying emission failure.
        #[source]
        source: EmitError,
    },

    /// A VM thread could not be started.
    #[error("failed to start vm {id}")]
    Spawn {
        /// The VM that could not be started.
        id: VmId,
        /// The OS error.
        #[source]
        source: std::io::Error,
    },

    /// More than one thing went wrong during a run.
    #[error("{first} (and {} more)", .rest.len())]
    Several {
        /// The first error, in the order they were observed.
        #[source]
        first: Box<HostError>,
        /// The remaining errors.
        rest: Vec<HostError>,
    },
}

impl HostError {
    /// Fold the errors of a run into one, keeping all of them.
    pub(crate) fn from_many(errors: Vec<HostError>) -> Option<HostError> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        let rest: Vec<_> = errors.collect();
        if rest.is_empty() {
            return Some(first);
        }
        Some(HostError::Several {
            first: Box::new(first),
            rest,
        })
    }

    /// Number of individual errors this value stands for.
    pub fn count(&self) -> usize {
        match self {
            HostError::Several { first, rest } => {
                first.count() + rest.iter().map(HostError::count).sum::<usize>()
            }
            _ => 1,
        }
    }
}
