//! Terminal utilities
//!
//! Raw-mode handling for the form: keypresses must arrive unbuffered and
//! without echo, and the terminal must be restored on exit.

use crate::Result;
use log::debug;
use nix::libc;
use std::os::unix::io::RawFd;

/// Get the terminal size for the given file descriptor
pub fn get_terminal_size(fd: RawFd) -> Result<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };

    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 {
        Ok((ws.ws_col, ws.ws_row))
    } else {
        // Default size if ioctl fails
        Ok((80, 24))
    }
}

/// Set raw mode on a terminal file descriptor
///
/// Raw mode is required to capture individual keypresses and escape
/// sequences without line buffering or local echo.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let original_termios = unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios
    };

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        libc::tcsetattr(fd, libc::TCSANOW, &raw_termios);
    }

    Ok(original_termios)
}

/// Restore terminal attributes
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}

/// RAII guard to restore terminal on exit
///
/// Ensures the terminal is returned to normal mode even on a crash
pub struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl TermiosGuard {
    pub fn new(fd: RawFd, termios: libc::termios) -> Self {
        Self { fd, termios }
    }
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
