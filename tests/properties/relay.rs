//! Property-based tests for the relay's pure functions: submission cost
//! pricing, message id derivation and payload round-trips.
use proptest::{prelude::*, test_runner::Config};
use serde_json::json;

use bridge_relayer::models::{
    decode_payload, encode_payload, AccountId, MessageId, RetryableConfig, TransitionOutcome,
};

fn account_from(bytes: [u8; 20]) -> AccountId {
    AccountId::new(bytes)
}

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  /// Cost estimates never decrease when the payload grows.
  #[test]
  fn prop_estimate_cost_monotonic_in_payload_size(
      base in 0u128..=1_000_000_000_000_000_000,
      per_byte in 0u128..=1_000_000,
      multiplier in 1u32..=200,
      size_a in 0usize..=65_536,
      size_b in 0usize..=65_536,
  ) {
      let config = RetryableConfig {
          base_submission_cost: base,
          base_gas_limit: 100_000,
          gas_limit_per_byte: per_byte,
          max_retry_window_secs: 3600,
          submission_fee_multiplier: multiplier,
      };
      let (small, large) = if size_a <= size_b { (size_a, size_b) } else { (size_b, size_a) };
      prop_assert!(config.estimate_cost(small) <= config.estimate_cost(large));
  }

  /// A higher multiplier never prices below a lower one.
  #[test]
  fn prop_estimate_cost_monotonic_in_multiplier(
      base in 0u128..=1_000_000_000_000_000_000,
      per_byte in 0u128..=1_000_000,
      size in 0usize..=65_536,
      mult_a in 1u32..=200,
      mult_b in 1u32..=200,
  ) {
      let make = |multiplier| RetryableConfig {
          base_submission_cost: base,
          base_gas_limit: 100_000,
          gas_limit_per_byte: per_byte,
          max_retry_window_secs: 3600,
          submission_fee_multiplier: multiplier,
      };
      let (low, high) = if mult_a <= mult_b { (mult_a, mult_b) } else { (mult_b, mult_a) };
      prop_assert!(make(low).estimate_cost(size) <= make(high).estimate_cost(size));
  }

  /// The estimate matches the documented formula for inputs that cannot
  /// overflow.
  #[test]
  fn prop_estimate_cost_formula(
      base in 0u128..=1_000_000_000_000_000_000,
      per_byte in 0u128..=1_000_000,
      size in 0usize..=65_536,
      multiplier in 1u32..=200,
  ) {
      let config = RetryableConfig {
          base_submission_cost: base,
          base_gas_limit: 100_000,
          gas_limit_per_byte: per_byte,
          max_retry_window_secs: 3600,
          submission_fee_multiplier: multiplier,
      };
      let expected = (base + per_byte * size as u128) * multiplier as u128 / 100;
      prop_assert_eq!(config.estimate_cost(size), expected);
  }

  /// Message id derivation is a pure function of (operation id, sender),
  /// and distinct logical events collide with overwhelming improbability.
  #[test]
  fn prop_message_id_derivation(
      id_a in 1u64..=u64::MAX,
      id_b in 1u64..=u64::MAX,
      sender in proptest::array::uniform20(any::<u8>()),
  ) {
      let sender = account_from(sender);
      prop_assert_eq!(MessageId::derive(id_a, &sender), MessageId::derive(id_a, &sender));
      if id_a != id_b {
          prop_assert_ne!(MessageId::derive(id_a, &sender), MessageId::derive(id_b, &sender));
      }
  }

  /// Message ids survive their hex wire encoding.
  #[test]
  fn prop_message_id_hex_round_trip(
      id in 1u64..=u64::MAX,
      sender in proptest::array::uniform20(any::<u8>()),
  ) {
      let message_id = MessageId::derive(id, &account_from(sender));
      let rendered = message_id.to_string();
      prop_assert_eq!(rendered.parse::<MessageId>().unwrap(), message_id);
  }

  /// Account ids survive their hex wire encoding.
  #[test]
  fn prop_account_id_round_trip(bytes in proptest::array::uniform20(any::<u8>())) {
      let account = account_from(bytes);
      let rendered = account.to_string();
      prop_assert_eq!(rendered.parse::<AccountId>().unwrap(), account);
  }

  /// Completion instructions survive payload encoding for any operation id.
  #[test]
  fn prop_complete_payload_round_trip(operation_id in any::<u64>()) {
      let payload = encode_payload(&[json!({
          "selector": "complete_operation",
          "operation_id": operation_id,
      })]);
      let instructions = decode_payload(&payload).unwrap();
      prop_assert_eq!(instructions.len(), 1);
      prop_assert_eq!(instructions[0].operation_id, operation_id);
      prop_assert_eq!(&instructions[0].outcome, &TransitionOutcome::Complete);
  }

  /// Failure instructions preserve arbitrary reason strings through the
  /// hex/JSON wire format.
  #[test]
  fn prop_fail_payload_round_trip(operation_id in any::<u64>(), reason in ".*") {
      let payload = encode_payload(&[json!({
          "selector": "fail_operation",
          "operation_id": operation_id,
          "reason": reason.clone(),
      })]);
      let instructions = decode_payload(&payload).unwrap();
      prop_assert_eq!(instructions.len(), 1);
      prop_assert_eq!(
          &instructions[0].outcome,
          &TransitionOutcome::Fail { reason }
      );
  }

  /// Batched payloads preserve instruction order.
  #[test]
  fn prop_batch_payload_preserves_order(ids in proptest::collection::vec(any::<u64>(), 1..=16)) {
      let entries: Vec<_> = ids
          .iter()
          .map(|id| json!({"selector": "complete_operation", "operation_id": id}))
          .collect();
      let payload = encode_payload(&entries);
      let instructions = decode_payload(&payload).unwrap();
      let decoded: Vec<u64> = instructions.iter().map(|i| i.operation_id).collect();
      prop_assert_eq!(decoded, ids);
  }
}
