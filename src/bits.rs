//! Packing and unpacking of the `msgh_bits` field of a Mach message header.
//!
//! The kernel encodes three port dispositions and a set of flags into the
//! single 32-bit `msgh_bits` value of a message header: the remote port
//! disposition in bits 0..8, the local (reply) port disposition in bits
//! 8..16, the voucher port disposition in bits 16..24 and flags such as
//! `MACH_MSGH_BITS_COMPLEX` in the top byte. The functions here mirror the
//! `MACH_MSGH_BITS`, `MACH_MSGH_BITS_REMOTE` and `MACH_MSGH_BITS_LOCAL`
//! macros from `<mach/message.h>`.
//!
//! Disposition arguments are truncated to the 8 bits of the field they are
//! placed into, exactly as the kernel macros truncate them. Passing a value
//! that isn't one of the `MACH_MSG_TYPE_*` constants produces a header the
//! kernel will reject at send time, not an error here.

use mach2::message::*;

const FIELD_MASK: mach_msg_bits_t = 0xff;
const LOCAL_SHIFT: u32 = 8;
const VOUCHER_SHIFT: u32 = 16;

/// Places a remote port disposition into its field of a `msgh_bits` value.
///
/// All bits outside the remote disposition field are zero in the result.
#[inline(always)]
pub const fn remote_bits(remote: mach_msg_type_name_t) -> mach_msg_bits_t {
    remote & FIELD_MASK
}

/// Places a local port disposition into its field of a `msgh_bits` value.
///
/// All bits outside the local disposition field are zero in the result.
#[inline(always)]
pub const fn local_bits(local: mach_msg_type_name_t) -> mach_msg_bits_t {
    (local & FIELD_MASK) << LOCAL_SHIFT
}

/// Combines a remote and a local port disposition into a `msgh_bits` value.
///
/// Equivalent to `remote_bits(remote) | local_bits(local)`.
#[inline(always)]
pub const fn combined_bits(
    remote: mach_msg_type_name_t,
    local: mach_msg_type_name_t,
) -> mach_msg_bits_t {
    remote_bits(remote) | local_bits(local)
}

/// A wrapper for a `mach_msg_bits_t` value. Provides accessors for the
/// individual fields packed into the value.
///
/// Field updates return a new value and leave every other field untouched,
/// so flags already present in a header (the complex bit, a voucher
/// disposition) survive updates to the port disposition fields.
#[repr(transparent)]
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct MsgBits(mach_msg_bits_t);

impl MsgBits {
    /// Packs all four fields into a `MsgBits` value.
    pub const fn new(
        complex: bool,
        remote: mach_msg_type_name_t,
        local: mach_msg_type_name_t,
        voucher: mach_msg_type_name_t,
    ) -> Self {
        let port_bits =
            combined_bits(remote, local) | ((voucher & FIELD_MASK) << VOUCHER_SHIFT);
        if complex {
            Self(port_bits | MACH_MSGH_BITS_COMPLEX)
        } else {
            Self(port_bits)
        }
    }

    /// Wraps a raw `msgh_bits` value.
    #[inline(always)]
    pub const fn from_bits(value: mach_msg_bits_t) -> Self {
        MsgBits(value)
    }

    /// Returns the wrapped raw value, suitable for the `msgh_bits` field.
    #[inline(always)]
    pub const fn into_bits(self) -> mach_msg_bits_t {
        self.0
    }

    /// Returns the remote port disposition.
    #[inline(always)]
    pub const fn remote(self) -> mach_msg_type_name_t {
        self.0 & FIELD_MASK
    }

    /// Returns the same value with the remote port disposition replaced.
    #[inline(always)]
    pub const fn set_remote(self, disposition: mach_msg_type_name_t) -> Self {
        Self((self.0 & !FIELD_MASK) | remote_bits(disposition))
    }

    /// Returns the local port disposition.
    #[inline(always)]
    pub const fn local(self) -> mach_msg_type_name_t {
        (self.0 >> LOCAL_SHIFT) & FIELD_MASK
    }

    /// Returns the same value with the local port disposition replaced.
    #[inline(always)]
    pub const fn set_local(self, disposition: mach_msg_type_name_t) -> Self {
        Self((self.0 & !(FIELD_MASK << LOCAL_SHIFT)) | local_bits(disposition))
    }

    /// Returns the voucher port disposition.
    #[inline(always)]
    pub const fn voucher(self) -> mach_msg_type_name_t {
        (self.0 >> VOUCHER_SHIFT) & FIELD_MASK
    }

    /// Returns the same value with the voucher port disposition replaced.
    #[inline(always)]
    pub const fn set_voucher(self, disposition: mach_msg_type_name_t) -> Self {
        let voucher = (disposition & FIELD_MASK) << VOUCHER_SHIFT;
        Self((self.0 & !(FIELD_MASK << VOUCHER_SHIFT)) | voucher)
    }

    /// Returns whether the complex flag is set.
    #[inline(always)]
    pub const fn complex(self) -> bool {
        (self.0 & MACH_MSGH_BITS_COMPLEX) == MACH_MSGH_BITS_COMPLEX
    }

    /// Returns the same value with the complex flag set.
    #[inline(always)]
    pub const fn into_complex(self) -> Self {
        Self(self.0 | MACH_MSGH_BITS_COMPLEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_is_or_of_parts() {
        for remote in 0..=255u32 {
            for local in 0..=255u32 {
                assert_eq!(
                    combined_bits(remote, local),
                    remote_bits(remote) | local_bits(local)
                );
            }
        }
    }

    #[test]
    fn fields_land_in_their_bytes() {
        for value in 0..=255u32 {
            assert_eq!(remote_bits(value) & 0xff, value);
            assert_eq!((local_bits(value) >> 8) & 0xff, value);
            assert_eq!(local_bits(value) & 0xff, 0);
        }
    }

    #[test]
    fn combined_of_nothing_is_zero() {
        assert_eq!(combined_bits(0, 0), 0);
    }

    #[test]
    fn oversized_dispositions_are_truncated() {
        assert_eq!(remote_bits(0x1234), 0x34);
        assert_eq!(local_bits(0x1234), 0x3400);
        assert_eq!(combined_bits(0x1ff, 0x2ff), 0xffff);
    }

    #[test]
    fn move_send_header() {
        let bits = combined_bits(MACH_MSG_TYPE_MOVE_SEND, MACH_MSG_TYPE_MOVE_SEND_ONCE);

        assert_eq!(bits & 0xff, 17);
        assert_eq!((bits >> 8) & 0xff, 18);
        assert_eq!(bits >> 16, 0);
    }

    #[test]
    fn round_trip() {
        for remote in 0..=255u32 {
            for local in [0, 17, 19, 21, 255] {
                let bits = MsgBits::from_bits(combined_bits(remote, local));

                assert_eq!(bits.remote(), remote & 0xff);
                assert_eq!(bits.local(), local & 0xff);
            }
        }
    }

    #[test]
    fn new_packs_all_fields() {
        let bits = MsgBits::new(
            true,
            MACH_MSG_TYPE_COPY_SEND,
            MACH_MSG_TYPE_MAKE_SEND_ONCE,
            MACH_MSG_TYPE_MOVE_SEND,
        );

        assert_eq!(bits.remote(), MACH_MSG_TYPE_COPY_SEND);
        assert_eq!(bits.local(), MACH_MSG_TYPE_MAKE_SEND_ONCE);
        assert_eq!(bits.voucher(), MACH_MSG_TYPE_MOVE_SEND);
        assert!(bits.complex());

        let plain = MsgBits::new(false, 0, 0, 0);
        assert_eq!(plain.into_bits(), 0);
        assert!(!plain.complex());
    }

    #[test]
    fn updates_preserve_other_fields() {
        let bits = MsgBits::new(true, 0, MACH_MSG_TYPE_MAKE_SEND, MACH_MSG_TYPE_COPY_SEND);

        let bits = bits.set_remote(MACH_MSG_TYPE_COPY_SEND);
        assert_eq!(bits.local(), MACH_MSG_TYPE_MAKE_SEND);
        assert_eq!(bits.voucher(), MACH_MSG_TYPE_COPY_SEND);
        assert!(bits.complex());

        let bits = bits.set_local(MACH_MSG_TYPE_MOVE_SEND_ONCE);
        assert_eq!(bits.remote(), MACH_MSG_TYPE_COPY_SEND);
        assert_eq!(bits.voucher(), MACH_MSG_TYPE_COPY_SEND);

        let bits = bits.set_voucher(0);
        assert_eq!(bits.remote(), MACH_MSG_TYPE_COPY_SEND);
        assert_eq!(bits.local(), MACH_MSG_TYPE_MOVE_SEND_ONCE);
        assert!(bits.complex());
    }

    #[test]
    fn raw_value_round_trips() {
        let raw = MsgBits::new(false, 19, 21, 0).into_bits();
        assert_eq!(MsgBits::from_bits(raw).into_bits(), raw);
    }
}
