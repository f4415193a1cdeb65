use crate::memory::Keyboard;
use nix::sys::select::{select, FdSet};
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, Termios};
use nix::sys::time::{TimeVal, TimeValLike};
use std::io::{self, Read, Write};

const STDIN_FILENO: i32 = 0;

/// The concrete host collaborator: non-blocking keyboard polling and
/// unbuffered character I/O against the real terminal, as required by the
/// core's Memory and Trap Service.
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Terminal
    }

    /// Switches stdin to raw (non-canonical, non-echo) mode and returns a
    /// guard that restores the previous mode when dropped, on any exit
    /// path.
    pub fn enter_raw_mode(&self) -> nix::Result<RawModeGuard> {
        RawModeGuard::acquire()
    }

    /// Blocking read of exactly one byte from stdin.
    pub fn read_key(&mut self) -> u8 {
        let mut buffer = [0; 1];
        io::stdin()
            .read_exact(&mut buffer)
            .expect("unable to read from stdin");
        buffer[0]
    }

    pub fn write_byte(&mut self, byte: u8) {
        io::stdout()
            .write_all(&[byte])
            .expect("unable to write to stdout");
    }

    pub fn flush(&mut self) {
        io::stdout().flush().expect("unable to flush stdout");
    }
}

impl Keyboard for Terminal {
    fn poll_key(&mut self) -> Option<u8> {
        if !stdin_ready() {
            return None;
        }

        let mut buffer = [0; 1];
        match io::stdin().read_exact(&mut buffer) {
            Ok(()) => Some(buffer[0]),
            Err(_) => None,
        }
    }
}

fn stdin_ready() -> bool {
    let mut readfds = FdSet::new();
    readfds.insert(STDIN_FILENO);

    match select(None, &mut readfds, None, None, &mut TimeVal::zero()) {
        Ok(count) => count > 0,
        Err(_) => false,
    }
}

/// RAII guard for raw terminal mode. Captures the mode in effect at
/// construction and restores it on drop, so the terminal is never left raw
/// on any exit path, including unwinding.
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    fn acquire() -> nix::Result<Self> {
        let original = tcgetattr(STDIN_FILENO)?;

        let mut raw = original.clone();
        raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);
        tcsetattr(STDIN_FILENO, SetArg::TCSANOW, &raw)?;

        Ok(RawModeGuard { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = tcsetattr(STDIN_FILENO, SetArg::TCSANOW, &self.original);
    }
}
