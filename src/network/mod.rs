//! Node communication envelope
//!
//! Only the wire envelope lives here; transports and the peer shell are
//! external collaborators of the core.

pub mod message;

pub use message::{
    decode_message, encode_message, message_checksum, Message, MESSAGE_TYPE_REQUEST,
    MESSAGE_TYPE_RESPONSE,
};
