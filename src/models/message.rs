//! Relay message models and payload decoding.
//!
//! A message is an authenticated, uniquely-identified instruction delivered
//! by the relay operator. Its payload is opaque bytes on the wire
//! (hex-encoded JSON) that decode to one or more `{selector, arguments}`
//! instructions naming the operations to advance. Unknown selectors fail
//! closed; a malformed payload never reaches the ledger.
use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{AccountId, OperationTransition, TransitionOutcome};

pub const SELECTOR_COMPLETE_OPERATION: &str = "complete_operation";
pub const SELECTOR_FAIL_OPERATION: &str = "fail_operation";

#[derive(Error, Debug, PartialEq)]
pub enum PayloadError {
    #[error("Invalid payload encoding: {0}")]
    Encoding(String),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Unknown selector: {0}")]
    UnknownSelector(String),

    #[error("Payload carries no instructions")]
    Empty,
}

/// Globally unique identifier of a relay message, 32 bytes.
///
/// Producers derive it from the operation id and its sender so that a
/// replayed logical event collides with the registry entry of the first
/// delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[schema(value_type = String, example = "0x9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
pub struct MessageId([u8; 32]);

impl MessageId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the message id for a logical event as
    /// `sha256(operation_id_be || sender)`.
    pub fn derive(operation_id: u64, sender: &AccountId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(operation_id.to_be_bytes());
        hasher.update(sender.as_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for MessageId {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| PayloadError::Encoding(format!("invalid hex: {}", e)))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| PayloadError::Encoding(format!("expected 32 bytes: {}", s)))?;
        Ok(Self(bytes))
    }
}

impl Serialize for MessageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Completion message submitted by the relay operator.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProcessMessageRequest {
    pub message_id: MessageId,
    /// Counter-domain gateway that produced the message. Must be on the
    /// authorized-endpoint allowlist.
    pub source_endpoint: AccountId,
    /// Hex-encoded instruction payload.
    pub payload: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageStatusResponse {
    pub message_id: MessageId,
    pub processed: bool,
}

/// A decoded payload instruction targeting one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageInstruction {
    pub operation_id: u64,
    pub outcome: TransitionOutcome,
}

impl From<MessageInstruction> for OperationTransition {
    fn from(instruction: MessageInstruction) -> Self {
        OperationTransition {
            operation_id: instruction.operation_id,
            outcome: instruction.outcome,
        }
    }
}

/// Decodes a hex payload into its instruction batch.
///
/// A payload is either a single instruction object or an array of them;
/// every instruction must carry a known selector and an operation id.
pub fn decode_payload(payload: &str) -> Result<Vec<MessageInstruction>, PayloadError> {
    let stripped = payload.strip_prefix("0x").unwrap_or(payload);
    let bytes = hex::decode(stripped)
        .map_err(|e| PayloadError::Encoding(format!("invalid hex: {}", e)))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| PayloadError::Malformed(e.to_string()))?;

    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        object @ serde_json::Value::Object(_) => vec![object],
        other => {
            return Err(PayloadError::Malformed(format!(
                "expected object or array, got {}",
                other
            )))
        }
    };

    if entries.is_empty() {
        return Err(PayloadError::Empty);
    }

    entries.into_iter().map(decode_instruction).collect()
}

fn decode_instruction(entry: serde_json::Value) -> Result<MessageInstruction, PayloadError> {
    let object = entry
        .as_object()
        .ok_or_else(|| PayloadError::Malformed("instruction is not an object".to_string()))?;

    let selector = object
        .get("selector")
        .and_then(|s| s.as_str())
        .ok_or_else(|| PayloadError::Malformed("missing selector".to_string()))?;

    let operation_id = object
        .get("operation_id")
        .and_then(|id| id.as_u64())
        .ok_or_else(|| PayloadError::Malformed("missing operation_id".to_string()))?;

    let outcome = match selector {
        SELECTOR_COMPLETE_OPERATION => TransitionOutcome::Complete,
        SELECTOR_FAIL_OPERATION => {
            let reason = object
                .get("reason")
                .and_then(|r| r.as_str())
                .unwrap_or("relay reported failure")
                .to_string();
            TransitionOutcome::Fail { reason }
        }
        other => return Err(PayloadError::UnknownSelector(other.to_string())),
    };

    Ok(MessageInstruction {
        operation_id,
        outcome,
    })
}

/// Encodes an instruction batch into the wire payload format. Used by
/// clients and tests; the processor only ever decodes.
pub fn encode_payload(instructions: &[serde_json::Value]) -> String {
    let body = if instructions.len() == 1 {
        serde_json::to_vec(&instructions[0]).unwrap_or_default()
    } else {
        serde_json::to_vec(instructions).unwrap_or_default()
    };
    format!("0x{}", hex::encode(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_id_round_trip() {
        let id = MessageId::derive(1, &"0x1000000000000000000000000000000000000001".parse().unwrap());
        let s = id.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
        assert_eq!(s.parse::<MessageId>().unwrap(), id);
    }

    #[test]
    fn test_message_id_derivation_is_stable() {
        let sender: AccountId = "0x1000000000000000000000000000000000000001".parse().unwrap();
        assert_eq!(MessageId::derive(1, &sender), MessageId::derive(1, &sender));
        assert_ne!(MessageId::derive(1, &sender), MessageId::derive(2, &sender));
    }

    #[test]
    fn test_decode_single_complete() {
        let payload = encode_payload(&[json!({
            "selector": "complete_operation",
            "operation_id": 42,
        })]);
        let instructions = decode_payload(&payload).unwrap();
        assert_eq!(
            instructions,
            vec![MessageInstruction {
                operation_id: 42,
                outcome: TransitionOutcome::Complete,
            }]
        );
    }

    #[test]
    fn test_decode_fail_with_reason() {
        let payload = encode_payload(&[json!({
            "selector": "fail_operation",
            "operation_id": 7,
            "reason": "counter-domain execution reverted",
        })]);
        let instructions = decode_payload(&payload).unwrap();
        assert_eq!(
            instructions[0].outcome,
            TransitionOutcome::Fail {
                reason: "counter-domain execution reverted".to_string()
            }
        );
    }

    #[test]
    fn test_decode_batch() {
        let payload = encode_payload(&[
            json!({"selector": "complete_operation", "operation_id": 1}),
            json!({"selector": "complete_operation", "operation_id": 2}),
        ]);
        let instructions = decode_payload(&payload).unwrap();
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[1].operation_id, 2);
    }

    #[test]
    fn test_unknown_selector_fails_closed() {
        let payload = encode_payload(&[json!({
            "selector": "mint_unbacked_tokens",
            "operation_id": 1,
        })]);
        let err = decode_payload(&payload).unwrap_err();
        assert_eq!(
            err,
            PayloadError::UnknownSelector("mint_unbacked_tokens".to_string())
        );
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        assert!(matches!(
            decode_payload("0xzz"),
            Err(PayloadError::Encoding(_))
        ));
        assert!(matches!(
            decode_payload(&format!("0x{}", hex::encode(b"not json"))),
            Err(PayloadError::Malformed(_))
        ));
        assert!(matches!(
            decode_payload(&format!("0x{}", hex::encode(b"[]"))),
            Err(PayloadError::Empty)
        ));
        assert!(matches!(
            decode_payload(&format!(
                "0x{}",
                hex::encode(b"{\"selector\":\"complete_operation\"}")
            )),
            Err(PayloadError::Malformed(_))
        ));
    }
}
