//! The device operation table.

use slate_core::DevResult;
use slate_uaccess::{UserReader, UserWriter};

use crate::session::{OpenFlags, Session};

/// Operations a character device exposes to the host.
///
/// This is the dispatch table the registry stores per device region. The
/// host resolves a device number to an `Arc<dyn DeviceOps>` and drives the
/// session lifecycle through it: `open`, any number of `read`/`write` calls,
/// then `release`.
///
/// Transfer lengths are advisory. An implementation clamps them to what the
/// device can actually serve and reports the number of bytes moved; the
/// engine in this crate provides the reference clamping rules.
pub trait DeviceOps: Send + Sync {
    /// Start a session. The returned session carries the cursor for all
    /// subsequent transfers.
    fn open(&self, flags: OpenFlags) -> DevResult<Session>;

    /// End a session. Per-session state is discarded; nothing persists into
    /// the next open.
    fn release(&self, session: Session) -> DevResult<()>;

    /// Copy up to `requested` bytes from the device into `dest`, starting
    /// at the session cursor. Returns the number of bytes moved; zero means
    /// end of device.
    fn read(
        &self,
        session: &mut Session,
        dest: &mut dyn UserWriter,
        requested: usize,
    ) -> DevResult<usize>;

    /// Copy up to `requested` bytes from `src` into the device, starting at
    /// the session cursor. Returns the number of bytes moved.
    fn write(
        &self,
        session: &mut Session,
        src: &mut dyn UserReader,
        requested: usize,
    ) -> DevResult<usize>;
}
