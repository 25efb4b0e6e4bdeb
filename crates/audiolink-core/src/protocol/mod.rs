//! Protocol module containing the message types, the JSON codec, and the
//! two-phase validation lifecycle.

pub mod codec;
pub mod messages;
pub mod validate;

pub use codec::{decode_message, encode_message, ProtocolError};
pub use messages::*;
pub use validate::{Unvalidated, Validate, ValidationError};
