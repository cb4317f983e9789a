//! Spawn the backend as a child process and relay SIGINT/SIGTERM to it.
//!
//! The parent does no shutdown sequencing of its own: whatever signal it
//! receives is delivered to the child verbatim, then it keeps waiting until
//! the child exits and logs the result.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::{Context, Result};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

/// Pid of the currently running child, readable from signal-handler context.
static CHILD_PID: AtomicI32 = AtomicI32::new(0);

/// Relay a received signal to the child verbatim.
///
/// Runs in signal-handler context, so only async-signal-safe calls are
/// allowed; kill(2) is, tracing is not.
extern "C" fn relay_signal(sig: libc::c_int) {
    let pid = CHILD_PID.load(Ordering::SeqCst);
    if pid > 0 {
        unsafe {
            libc::kill(pid, sig);
        }
    }
}

/// What to launch and where
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    /// Program to run
    pub command: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub working_dir: PathBuf,
}

/// Run the backend to completion and return its exit code.
///
/// Stdio is inherited so the backend's output lands on the launcher's own
/// terminal. A child killed by a signal maps to the conventional 128+N code.
pub fn run(spec: &LaunchSpec) -> Result<i32> {
    let mut child = Command::new(&spec.command)
        .args(&spec.args)
        .current_dir(&spec.working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .with_context(|| format!("Failed to spawn {}", spec.command))?;

    CHILD_PID.store(child.id() as i32, Ordering::SeqCst);
    install_forwarding().context("Failed to install signal handlers")?;

    tracing::info!("Launched {} (pid {})", spec.command, child.id());

    let status = child.wait().context("Failed to wait for child")?;
    CHILD_PID.store(0, Ordering::SeqCst);

    match status.code() {
        Some(code) => {
            tracing::info!("Backend exited with code {}", code);
            Ok(code)
        }
        None => {
            use std::os::unix::process::ExitStatusExt;
            let sig = status.signal().unwrap_or(0);
            tracing::info!("Backend terminated by signal {}", sig);
            Ok(128 + sig)
        }
    }
}

/// Install the relay handler for SIGINT and SIGTERM.
///
/// SA_RESTART keeps the parent's wait(2) going after the handler has run, so
/// forwarding a signal does not abort the launcher before the child exits.
fn install_forwarding() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(relay_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );

    unsafe {
        signal::sigaction(Signal::SIGINT, &action).context("sigaction(SIGINT)")?;
        signal::sigaction(Signal::SIGTERM, &action).context("sigaction(SIGTERM)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::sync::Mutex;

    // Serializes tests that go through the shared CHILD_PID slot.
    static PID_SLOT: Mutex<()> = Mutex::new(());

    fn spec(command: &str, args: &[&str]) -> LaunchSpec {
        LaunchSpec {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn test_run_returns_child_exit_code() {
        let _guard = PID_SLOT.lock().unwrap();
        assert_eq!(run(&spec("true", &[])).unwrap(), 0);
        assert_eq!(run(&spec("sh", &["-c", "exit 3"])).unwrap(), 3);
    }

    #[test]
    fn test_run_missing_program_is_an_error() {
        assert!(run(&spec("definitely-not-a-real-program", &[])).is_err());
    }

    #[test]
    fn test_relay_signal_reaches_child() {
        let _guard = PID_SLOT.lock().unwrap();
        let mut child = Command::new("sleep")
            .arg("30")
            .stdin(Stdio::null())
            .spawn()
            .unwrap();

        CHILD_PID.store(child.id() as i32, Ordering::SeqCst);
        relay_signal(libc::SIGTERM);
        CHILD_PID.store(0, Ordering::SeqCst);

        let status = child.wait().unwrap();
        assert_eq!(status.signal(), Some(libc::SIGTERM));
    }

    #[test]
    fn test_relay_signal_without_child_is_a_noop() {
        let _guard = PID_SLOT.lock().unwrap();
        // Must not kill(0, ...), which would signal our own process group.
        relay_signal(libc::SIGTERM);
    }
}
