//! Error taxonomy (spec.md §7).
//!
//! `InputFormat` and `ConfigInvalid` are ordinary, recoverable errors that
//! propagate to the caller unmodified. `StateInvariant` indicates a bug in
//! this crate and is always fatal; the CLI aborts the process on it, but it
//! is still a value so an embedding library caller can catch it instead of
//! going down with the library. `Infeasible` is the one condition the
//! recursive-bisection driver is allowed to catch and report at the root
//! (spec.md §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HypartError {
    #[error("malformed hypergraph input: {0}")]
    InputFormat(String),

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("internal invariant violated: {0}")]
    StateInvariant(String),

    #[error("no feasible partition exists for k={k}, epsilon={epsilon}: {reason}")]
    Infeasible {
        k: usize,
        epsilon: f64,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, HypartError>;

impl HypartError {
    pub fn state_invariant(message: impl Into<String>) -> Self {
        HypartError::StateInvariant(message.into())
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        HypartError::ConfigInvalid(message.into())
    }

    pub fn input_format(message: impl Into<String>) -> Self {
        HypartError::InputFormat(message.into())
    }

    /// The process-level exit code this crate's CLI reports for this error
    /// (spec.md §6: "0 on success; non-zero on I/O or configuration
    /// errors").
    pub fn exit_code(&self) -> i32 {
        match self {
            HypartError::InputFormat(_) | HypartError::ConfigInvalid(_) => 2,
            HypartError::Infeasible { .. } => 3,
            HypartError::StateInvariant(_) => 70, // EX_SOFTWARE
        }
    }
}

/// Aborts the process with a diagnostic, per spec.md §7: "`StateInvariant`
/// aborts the process with diagnostic." Library code should prefer
/// returning `Err(HypartError::StateInvariant(..))`; this helper is for the
/// binary's top-level handler only.
pub fn abort_on_state_invariant(err: &HypartError) -> ! {
    if let HypartError::StateInvariant(message) = err {
        eprintln!("fatal: internal invariant violated: {message}");
    } else {
        eprintln!("fatal: {err}");
    }
    std::process::exit(70);
}
