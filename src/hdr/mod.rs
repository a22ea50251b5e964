//! Construction and validation of Mach message headers.

pub mod builder;
pub mod error;
pub mod size;

pub use builder::HeaderBuilder;
pub use error::{HeaderError, PortField};
pub use size::{aligned_size, min_msg_size, MSG_ALIGNMENT};

use mach2::message::mach_msg_id_t;

/// A type for Mach message IDs.
pub type MsgId = mach_msg_id_t;
