//! Event retrieval and output buffer control

use super::Xlib;
use crate::event::XEvent;
use crate::handles::Display;
use std::os::raw::c_int;

#[cfg(unix)]
use crate::Result;
#[cfg(unix)]
use std::time::Duration;

impl Xlib {
    /// Block until an event is available and copy it into `event`
    /// (`XNextEvent`). Flushes the output buffer first. There is no way to
    /// cancel this call; use [`Xlib::wait_for_event`] for a deadline.
    pub unsafe fn next_event(&self, display: Display, event: &mut XEvent) -> c_int {
        (self.fns.XNextEvent)(display.as_ptr(), event.as_mut_ptr())
    }

    /// Number of events that can be read without blocking (`XPending`).
    /// Flushes the output buffer.
    pub unsafe fn pending(&self, display: Display) -> c_int {
        (self.fns.XPending)(display.as_ptr())
    }

    /// Send all buffered requests (`XFlush`).
    pub unsafe fn flush(&self, display: Display) -> c_int {
        (self.fns.XFlush)(display.as_ptr())
    }

    /// Flush and wait until the server has processed every request
    /// (`XSync`). With `discard` the event queue is emptied as well.
    pub unsafe fn sync(&self, display: Display, discard: bool) -> c_int {
        (self.fns.XSync)(display.as_ptr(), discard as c_int)
    }

    /// Wait until `next_event` would not block, or until `timeout` passes.
    ///
    /// Returns `Ok(true)` when an event is queued. Already queued events
    /// return immediately; otherwise the connection's file descriptor is
    /// polled for input. `None` waits without a deadline. An interrupted poll
    /// counts as a timeout.
    #[cfg(unix)]
    pub unsafe fn wait_for_event(&self, display: Display, timeout: Option<Duration>) -> Result<bool> {
        use nix::errno::Errno;
        use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
        use std::os::fd::BorrowedFd;

        if self.pending(display) > 0 {
            return Ok(true);
        }

        let fd = BorrowedFd::borrow_raw(self.connection_number(display));
        let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
        let timeout = PollTimeout::try_from(poll_millis(timeout)).unwrap_or(PollTimeout::NONE);

        match poll(&mut fds, timeout) {
            Ok(0) | Err(Errno::EINTR) => Ok(false),
            Ok(_) => Ok(self.pending(display) > 0),
            Err(e) => Err(e.into()),
        }
    }
}

/// Poll timeout in milliseconds, `-1` for no deadline. Partial milliseconds
/// round up so a short remaining wait never becomes a zero-timeout poll.
#[cfg(unix)]
fn poll_millis(timeout: Option<Duration>) -> i32 {
    match timeout {
        Some(limit) => limit.as_nanos().div_ceil(1_000_000).min(i32::MAX as u128) as i32,
        None => -1,
    }
}
