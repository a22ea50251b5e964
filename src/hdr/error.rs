//! Provides the error type returned when a built header fails validation.
//!
//! The checks mirror conditions the kernel itself enforces when a message
//! is handed to `mach_msg`: an undersized or unaligned `msgh_size` fails
//! the send with `MACH_SEND_MSG_TOO_SMALL`, and a header that carries a
//! disposition for a null port name fails with `MACH_SEND_INVALID_HEADER`.

use mach2::message::mach_msg_size_t;
use std::{error, fmt};

/// Identifies a port field of a message header.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PortField {
    /// The `msgh_remote_port` field.
    Remote,
    /// The `msgh_local_port` field.
    Local,
    /// The `msgh_voucher_port` field.
    Voucher,
}

impl fmt::Display for PortField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            PortField::Remote => "msgh_remote_port",
            PortField::Local => "msgh_local_port",
            PortField::Voucher => "msgh_voucher_port",
        };
        f.write_str(s)
    }
}

/// An error returned when a built header violates a constraint enforced by
/// `mach_msg`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum HeaderError {
    /// The `msgh_size` field is smaller than a bare message header.
    SizeTooSmall {
        /// The size recorded in the header.
        size: mach_msg_size_t,
        /// The smallest size the kernel accepts.
        min: mach_msg_size_t,
    },
    /// The `msgh_size` field is not a multiple of 4.
    SizeMisaligned {
        /// The size recorded in the header.
        size: mach_msg_size_t,
    },
    /// A disposition is set for a port field that holds `MACH_PORT_NULL`.
    DispositionWithoutPort {
        /// The field the disposition was found in.
        field: PortField,
    },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HeaderError::SizeTooSmall { size, min } => {
                write!(f, "msgh_size is {} but a message header takes {}", size, min)
            }
            HeaderError::SizeMisaligned { size } => {
                write!(f, "msgh_size {} is not a multiple of 4", size)
            }
            HeaderError::DispositionWithoutPort { field } => {
                write!(f, "{} carries a disposition but no port name", field)
            }
        }
    }
}

impl error::Error for HeaderError {}
