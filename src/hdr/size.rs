//! Message size helpers.

use mach2::message::{mach_msg_header_t, mach_msg_size_t};
use std::mem;

/// The alignment used when sizing a message that carries a body.
///
/// `mach_msg` itself only requires `msgh_size` to be a multiple of 4;
/// sizing buffers to 8 bytes keeps any 64-bit payload fields naturally
/// aligned.
pub const MSG_ALIGNMENT: usize = 8;

/// Returns the minimum legal size of a Mach message, in bytes.
///
/// This is the size of a bare `mach_msg_header_t`. The kernel fails a send
/// with `MACH_SEND_MSG_TOO_SMALL` when `msgh_size` is below this value, so
/// callers should check buffer sizes against it before building a header.
#[inline(always)]
pub const fn min_msg_size() -> mach_msg_size_t {
    mem::size_of::<mach_msg_header_t>() as mach_msg_size_t
}

/// Rounds `size` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two.
#[inline(always)]
pub const fn aligned_size(size: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());

    (size + (alignment - 1)) & !(alignment - 1)
}
