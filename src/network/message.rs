// Communication between nodes happens as JSON strings. This module only
// defines the envelope: a thin frame with a message type, an optional
// command, an arbitrary JSON payload and an integrity checksum over that
// payload. Transport and dispatch live outside the core.

use crate::error::{LedgerError, Result};
use crate::utils::{current_timestamp, double_hash};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MESSAGE_TYPE_REQUEST: &str = "request";
pub const MESSAGE_TYPE_RESPONSE: &str = "response";

/// Wire envelope carrying a request or response between nodes. The `data`
/// payload is any JSON value - typically a serialized transaction or
/// block - and `checksum` is the double hash of its compact rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub timestamp: i64,
    pub mtype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub data: Value,
    pub checksum: String,
}

impl Message {
    pub fn request(command: &str, data: Value) -> Result<Message> {
        Ok(Message {
            timestamp: current_timestamp()?,
            mtype: MESSAGE_TYPE_REQUEST.to_string(),
            command: Some(command.to_string()),
            success: None,
            checksum: message_checksum(&data),
            data,
        })
    }

    pub fn response(data: Value, success: bool) -> Result<Message> {
        Ok(Message {
            timestamp: current_timestamp()?,
            mtype: MESSAGE_TYPE_RESPONSE.to_string(),
            command: None,
            success: Some(success),
            checksum: message_checksum(&data),
            data,
        })
    }

    pub fn is_request(&self) -> bool {
        self.mtype == MESSAGE_TYPE_REQUEST
    }
}

/// Integrity checksum over the payload's compact JSON rendering.
pub fn message_checksum(data: &Value) -> String {
    double_hash(&data.to_string())
}

/// Encode a message into its JSON wire form.
pub fn encode_message(message: &Message) -> Result<String> {
    serde_json::to_string(message)
        .map_err(|e| LedgerError::Message(format!("Message can not be encoded: {e}")))
}

/// Decode a JSON string into a message, verifying the message type and
/// the payload checksum.
pub fn decode_message(raw: &str) -> Result<Message> {
    let message: Message = serde_json::from_str(raw)
        .map_err(|e| LedgerError::Message(format!("Message can not be parsed: {e}")))?;
    if message.mtype != MESSAGE_TYPE_REQUEST && message.mtype != MESSAGE_TYPE_RESPONSE {
        return Err(LedgerError::Message(format!(
            "Unknown message type: {}",
            message.mtype
        )));
    }
    let expected = message_checksum(&message.data);
    if message.checksum != expected {
        return Err(LedgerError::Message(
            "Message checksum does not match payload".to_string(),
        ));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_round_trip() {
        let message = Message::request("get_block", json!({"index": 3})).unwrap();
        let raw = encode_message(&message).unwrap();
        let decoded = decode_message(&raw).unwrap();
        assert!(decoded.is_request());
        assert_eq!(decoded.command.as_deref(), Some("get_block"));
        assert_eq!(decoded.data, json!({"index": 3}));
    }

    #[test]
    fn test_response_round_trip() {
        let message = Message::response(json!(["a", "b"]), true).unwrap();
        let raw = encode_message(&message).unwrap();
        let decoded = decode_message(&raw).unwrap();
        assert!(!decoded.is_request());
        assert_eq!(decoded.success, Some(true));
    }

    #[test]
    fn test_checksum_is_double_hash_of_payload() {
        let data = json!({"amount": "1000"});
        let message = Message::request("send", data.clone()).unwrap();
        assert_eq!(message.checksum, double_hash(&data.to_string()));
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let message = Message::request("send", json!({"amount": "1"})).unwrap();
        let raw = encode_message(&message).unwrap();
        let tampered = raw.replace("\"amount\":\"1\"", "\"amount\":\"1000\"");
        assert!(decode_message(&tampered).is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let mut message = Message::request("send", json!(null)).unwrap();
        message.mtype = "broadcast".to_string();
        let raw = encode_message(&message).unwrap();
        assert!(decode_message(&raw).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_message("not json").is_err());
        assert!(decode_message("{}").is_err());
    }

    #[test]
    fn test_envelope_carries_transaction() {
        use crate::core::{Coin, Transaction};
        let tx = Transaction::new_coinbase("alice", Coin::new("50").unwrap(), None).unwrap();
        let payload = serde_json::to_value(&tx).unwrap();
        let message = Message::request("new_transaction", payload).unwrap();
        let decoded = decode_message(&encode_message(&message).unwrap()).unwrap();
        let recovered: Transaction = serde_json::from_value(decoded.data).unwrap();
        assert_eq!(recovered.get_hash(), tx.get_hash());
    }
}
