use std::io;
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    // A panic while holding the lock leaves the data intact; keep using it
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log lines are stored instead of being
/// printed to stderr.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = lock();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `io::Write` handle for the tracing subscriber. Each formatted event
/// arrives as one write and becomes one buffered line.
pub struct BufferedStderr;

/// `MakeWriter` entry point for `tracing_subscriber::fmt().with_writer(..)`.
pub fn writer() -> BufferedStderr {
    BufferedStderr
}

impl io::Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end_matches('\n');
        if !msg.is_empty() {
            warn(msg.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
