use nix::sys::signal::{self, SigHandler, Signal};
use std::sync::atomic::{AtomicBool, Ordering};

static TERMINATE_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Installs a SIGINT handler that only records the signal in a process-wide
/// flag; it performs no other work, so it stays async-signal-safe. The
/// fetch-execute loop observes the flag between instructions and tears down
/// through the normal exit path (dropping the raw-mode guard) rather than
/// letting the default SIGINT disposition kill the process mid-raw-mode.
pub fn install_handler() -> nix::Result<()> {
    unsafe { signal::signal(Signal::SIGINT, SigHandler::Handler(handle_sigint)) }?;
    Ok(())
}

extern "C" fn handle_sigint(_: libc::c_int) {
    TERMINATE_REQUESTED.store(true, Ordering::SeqCst);
}

pub fn terminate_requested() -> bool {
    TERMINATE_REQUESTED.load(Ordering::SeqCst)
}

/// Exit status used when an asynchronous terminate request ends execution,
/// distinguishing it from a clean HALT (0) or a fatal-opcode abort.
pub const TERMINATED_EXIT_CODE: i32 = 130;
