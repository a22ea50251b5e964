//! Contains the implementation of the `HeaderBuilder` structure used to
//! build Mach message headers.

use crate::{
    bits::MsgBits,
    hdr::{
        error::{HeaderError, PortField},
        size::{aligned_size, min_msg_size, MSG_ALIGNMENT},
        MsgId,
    },
};
use mach2::{
    message::*,
    port::{mach_port_t, MACH_PORT_NULL},
};
use std::mem;

/// A Mach message header builder.
///
/// The builder assembles a `mach_msg_header_t` field by field and validates
/// it against the constraints `mach_msg` enforces before handing it back.
///
/// # Port names
/// Ports are written into the header as raw `mach_port_t` names together
/// with the disposition describing how the right is transferred. The
/// builder never changes right reference counts; keeping the named rights
/// alive until the message reaches the kernel is the caller's
/// responsibility.
#[derive(Debug, Copy, Clone)]
pub struct HeaderBuilder {
    header: mach_msg_header_t,
}

impl HeaderBuilder {
    /// Creates a builder for a bodyless message header addressed to no
    /// port.
    pub fn new() -> Self {
        Self {
            header: mach_msg_header_t {
                msgh_size: min_msg_size(),
                ..Default::default()
            },
        }
    }

    /// Sets the `msgh_id` field in the message header.
    pub fn set_id(&mut self, id: MsgId) {
        self.header.msgh_id = id;
    }

    /// Sets the destination port and the disposition applied to it when
    /// the message is sent.
    pub fn set_remote_port(&mut self, name: mach_port_t, disposition: mach_msg_type_name_t) {
        self.header.msgh_remote_port = name;
        self.header.msgh_bits = self.bits().set_remote(disposition).into_bits();
    }

    /// Sets the reply port and the disposition applied to it when the
    /// message is sent.
    pub fn set_local_port(&mut self, name: mach_port_t, disposition: mach_msg_type_name_t) {
        self.header.msgh_local_port = name;
        self.header.msgh_bits = self.bits().set_local(disposition).into_bits();
    }

    /// Sets the voucher port and the disposition applied to it when the
    /// message is sent.
    pub fn set_voucher_port(&mut self, name: mach_port_t, disposition: mach_msg_type_name_t) {
        self.header.msgh_voucher_port = name;
        self.header.msgh_bits = self.bits().set_voucher(disposition).into_bits();
    }

    /// Marks the message as complex, i.e. carrying descriptors in its
    /// body.
    pub fn set_complex(&mut self) {
        self.header.msgh_bits = self.bits().into_complex().into_bits();
    }

    /// Declares the length of the message body following the header.
    ///
    /// The `msgh_size` field is set to the header size plus `len`, rounded
    /// up to [`MSG_ALIGNMENT`].
    pub fn set_body_size(&mut self, len: usize) {
        let total = mem::size_of::<mach_msg_header_t>() + len;
        self.header.msgh_size = aligned_size(total, MSG_ALIGNMENT) as mach_msg_size_t;
    }

    /// Sets the `msgh_size` field to a size computed by the caller.
    ///
    /// Unlike [`set_body_size`](Self::set_body_size) the value is written
    /// as is; [`finish`](Self::finish) will reject sizes the kernel would
    /// not accept.
    pub fn set_size(&mut self, size: mach_msg_size_t) {
        self.header.msgh_size = size;
    }

    /// Validates the header and returns it.
    pub fn finish(&self) -> Result<mach_msg_header_t, HeaderError> {
        let header = self.header;
        let bits = self.bits();

        if header.msgh_size < min_msg_size() {
            return Err(HeaderError::SizeTooSmall {
                size: header.msgh_size,
                min: min_msg_size(),
            });
        }

        if header.msgh_size % 4 != 0 {
            return Err(HeaderError::SizeMisaligned {
                size: header.msgh_size,
            });
        }

        if bits.remote() != 0 && header.msgh_remote_port == MACH_PORT_NULL {
            return Err(HeaderError::DispositionWithoutPort {
                field: PortField::Remote,
            });
        }

        if bits.local() != 0 && header.msgh_local_port == MACH_PORT_NULL {
            return Err(HeaderError::DispositionWithoutPort {
                field: PortField::Local,
            });
        }

        if bits.voucher() != 0 && header.msgh_voucher_port == MACH_PORT_NULL {
            return Err(HeaderError::DispositionWithoutPort {
                field: PortField::Voucher,
            });
        }

        Ok(header)
    }

    #[inline(always)]
    fn bits(&self) -> MsgBits {
        MsgBits::from_bits(self.header.msgh_bits)
    }
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
