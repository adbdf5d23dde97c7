//! Pushing a command line back into the controlling shell.
//!
//! With TIOCSTI every byte is placed in the terminal's input queue as if the
//! user had typed it: `Ctrl-A` `Ctrl-K` clears the shell's current line, the
//! command follows, and `Ctrl-B` presses move readline's cursor back into
//! place. Several kernels disable TIOCSTI for unprivileged users, in which
//! case the first ioctl fails and nothing at all is sent.

use std::io::{self, Write};

use thiserror::Error;

const CLEAR_LINE: &[u8] = &[0x01, 0x0b];
const CURSOR_BACK: u8 = 0x02;
const EXECUTE: u8 = b'\n';

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("TIOCSTI injection failed (it may be disabled on this system; try without --iocsti)")]
    Ioctl(#[source] io::Error),

    #[error("TIOCSTI is not supported on this platform")]
    Unsupported,

    #[error("failed to write the selection to stdout")]
    Write(#[source] io::Error),
}

/// Byte sequence that replaces the shell's line with `text`, leaving the
/// cursor `cursor` characters in, and runs it when `execute` is set.
pub fn replay_sequence(text: &str, cursor: usize, execute: bool) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(CLEAR_LINE.len() + text.len() + 1);
    bytes.extend_from_slice(CLEAR_LINE);
    bytes.extend(text.bytes().filter(|b| *b != b'\n' && *b != b'\r'));
    if execute {
        bytes.push(EXECUTE);
    } else {
        let back = text.chars().count().saturating_sub(cursor);
        bytes.extend(std::iter::repeat_n(CURSOR_BACK, back));
    }
    bytes
}

/// Inject `text` into the controlling terminal with TIOCSTI.
pub fn inject(text: &str, cursor: usize, execute: bool) -> Result<(), InjectError> {
    send(&replay_sequence(text, cursor, execute))
}

#[cfg(unix)]
fn send(bytes: &[u8]) -> Result<(), InjectError> {
    for byte in bytes {
        // SAFETY: TIOCSTI reads exactly one byte through the pointer, which
        // stays valid for the duration of the call.
        let rc = unsafe { libc::ioctl(libc::STDIN_FILENO, libc::TIOCSTI, byte as *const u8) };
        if rc < 0 {
            return Err(InjectError::Ioctl(io::Error::last_os_error()));
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn send(_bytes: &[u8]) -> Result<(), InjectError> {
    Err(InjectError::Unsupported)
}

/// Print `text` for a shell widget that captures our stdout.
pub fn print(text: &str) -> Result<(), InjectError> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", text).map_err(InjectError::Write)?;
    out.flush().map_err(InjectError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_execute() {
        assert_eq!(replay_sequence("ls", 2, true), b"\x01\x0bls\n".to_vec());
    }

    #[test]
    fn test_replay_replace_restores_cursor() {
        assert_eq!(
            replay_sequence("git log", 3, false),
            b"\x01\x0bgit log\x02\x02\x02\x02".to_vec()
        );
        assert_eq!(replay_sequence("ls", 2, false), b"\x01\x0bls".to_vec());
    }

    #[test]
    fn test_replay_strips_newlines() {
        assert_eq!(replay_sequence("a\nb", 3, true), b"\x01\x0bab\n".to_vec());
    }
}
