use serde::{Deserialize, Serialize};

use crate::domain::catalog::Money;
use crate::domain::pricing::PricingPolicy;
use crate::error::ValidationError;

use super::value_objects::DeliverySpeed;

pub const MAX_GIFT_MESSAGE_CHARS: usize = 200;
pub const MAX_INSTRUCTIONS_CHARS: usize = 150;

/// Checkout-time delivery choices. Length limits are enforced on every
/// setter and on deserialization, so a value of this type is always within
/// bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDeliveryOptions")]
pub struct DeliveryOptions {
    speed: DeliverySpeed,
    is_gift: bool,
    gift_message: Option<String>,
    special_instructions: Option<String>,
}

impl DeliveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_speed(&mut self, speed: DeliverySpeed) {
        self.speed = speed;
    }

    /// Turning the gift option off discards any message.
    pub fn set_gift(&mut self, is_gift: bool, message: Option<&str>) -> Result<(), ValidationError> {
        let message = if is_gift { normalize(message) } else { None };

        if let Some(text) = &message {
            let len = text.chars().count();
            if len > MAX_GIFT_MESSAGE_CHARS {
                return Err(ValidationError::GiftMessageTooLong {
                    len,
                    max: MAX_GIFT_MESSAGE_CHARS,
                });
            }
        }

        self.is_gift = is_gift;
        self.gift_message = message;
        Ok(())
    }

    pub fn set_instructions(&mut self, text: &str) -> Result<(), ValidationError> {
        let text = normalize(Some(text));

        if let Some(value) = &text {
            let len = value.chars().count();
            if len > MAX_INSTRUCTIONS_CHARS {
                return Err(ValidationError::InstructionsTooLong {
                    len,
                    max: MAX_INSTRUCTIONS_CHARS,
                });
            }
        }

        self.special_instructions = text;
        Ok(())
    }

    pub fn speed(&self) -> DeliverySpeed {
        self.speed
    }

    pub fn is_gift(&self) -> bool {
        self.is_gift
    }

    pub fn gift_message(&self) -> Option<&str> {
        self.gift_message.as_deref()
    }

    pub fn special_instructions(&self) -> Option<&str> {
        self.special_instructions.as_deref()
    }

    /// Delivery surcharge plus gift surcharge
    pub fn surcharge(&self, policy: &PricingPolicy) -> Money {
        policy.delivery_surcharge(self.speed) + policy.gift_surcharge(self.is_gift)
    }
}

/// Wire shape of `DeliveryOptions`, checked before it becomes one
#[derive(Deserialize)]
struct RawDeliveryOptions {
    #[serde(default)]
    speed: DeliverySpeed,
    #[serde(default)]
    is_gift: bool,
    #[serde(default)]
    gift_message: Option<String>,
    #[serde(default)]
    special_instructions: Option<String>,
}

impl TryFrom<RawDeliveryOptions> for DeliveryOptions {
    type Error = ValidationError;

    fn try_from(raw: RawDeliveryOptions) -> Result<Self, Self::Error> {
        if !raw.is_gift && raw.gift_message.is_some() {
            return Err(ValidationError::GiftMessageWithoutGift);
        }

        let mut options = Self::new();
        options.set_speed(raw.speed);
        options.set_gift(raw.is_gift, raw.gift_message.as_deref())?;
        if let Some(text) = raw.special_instructions.as_deref() {
            options.set_instructions(text)?;
        }
        Ok(options)
    }
}

fn normalize(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DeliveryOptions::new();
        assert_eq!(options.speed(), DeliverySpeed::Standard);
        assert!(!options.is_gift());
        assert!(options.gift_message().is_none());
        assert!(options.special_instructions().is_none());
    }

    #[test]
    fn test_gift_message_at_limit_accepted() {
        let mut options = DeliveryOptions::new();
        let message = "a".repeat(MAX_GIFT_MESSAGE_CHARS);
        options.set_gift(true, Some(&message)).unwrap();
        assert_eq!(options.gift_message().unwrap().len(), MAX_GIFT_MESSAGE_CHARS);
    }

    #[test]
    fn test_gift_message_over_limit_rejected() {
        let mut options = DeliveryOptions::new();
        let message = "a".repeat(MAX_GIFT_MESSAGE_CHARS + 1);
        let result = options.set_gift(true, Some(&message));

        assert_eq!(
            result.unwrap_err(),
            ValidationError::GiftMessageTooLong { len: 201, max: 200 }
        );
        assert!(!options.is_gift());
    }

    #[test]
    fn test_gift_message_counts_characters_not_bytes() {
        let mut options = DeliveryOptions::new();
        // 200 two-byte characters
        let message = "é".repeat(MAX_GIFT_MESSAGE_CHARS);
        assert!(options.set_gift(true, Some(&message)).is_ok());
    }

    #[test]
    fn test_gift_off_clears_message() {
        let mut options = DeliveryOptions::new();
        options.set_gift(true, Some("Happy birthday!")).unwrap();
        options.set_gift(false, Some("ignored")).unwrap();

        assert!(!options.is_gift());
        assert!(options.gift_message().is_none());
    }

    #[test]
    fn test_instructions_limit() {
        let mut options = DeliveryOptions::new();
        options.set_instructions("Ring the bell").unwrap();
        assert_eq!(options.special_instructions(), Some("Ring the bell"));

        let too_long = "x".repeat(MAX_INSTRUCTIONS_CHARS + 1);
        assert!(matches!(
            options.set_instructions(&too_long),
            Err(ValidationError::InstructionsTooLong { len: 151, max: 150 })
        ));
        assert_eq!(options.special_instructions(), Some("Ring the bell"));
    }

    #[test]
    fn test_blank_instructions_clear_value() {
        let mut options = DeliveryOptions::new();
        options.set_instructions("Leave at door").unwrap();
        options.set_instructions("   ").unwrap();
        assert!(options.special_instructions().is_none());
    }

    #[test]
    fn test_surcharge() {
        let policy = PricingPolicy::default();
        let mut options = DeliveryOptions::new();
        assert_eq!(options.surcharge(&policy), Money::ZERO);

        options.set_speed(DeliverySpeed::Express);
        assert_eq!(options.surcharge(&policy), Money::from_rupees(50));

        options.set_gift(true, None).unwrap();
        assert_eq!(options.surcharge(&policy), Money::from_rupees(80));

        options.set_speed(DeliverySpeed::Overnight);
        assert_eq!(options.surcharge(&policy), Money::from_rupees(180));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut options = DeliveryOptions::new();
        options.set_speed(DeliverySpeed::Overnight);
        options.set_gift(true, Some("Happy Diwali")).unwrap();
        options.set_instructions("Call on arrival").unwrap();

        let json = serde_json::to_string(&options).unwrap();
        let parsed: DeliveryOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_deserialize_rejects_over_limit_payload() {
        let long_message = serde_json::json!({
            "speed": "standard",
            "is_gift": true,
            "gift_message": "a".repeat(500),
            "special_instructions": null,
        });
        let err = serde_json::from_value::<DeliveryOptions>(long_message).unwrap_err();
        assert!(err.to_string().contains("Gift message is 500 characters"));

        let long_instructions = serde_json::json!({
            "speed": "express",
            "is_gift": false,
            "gift_message": null,
            "special_instructions": "x".repeat(500),
        });
        let err = serde_json::from_value::<DeliveryOptions>(long_instructions).unwrap_err();
        assert!(err.to_string().contains("Delivery instructions are 500 characters"));
    }

    #[test]
    fn test_deserialize_rejects_message_without_gift() {
        let payload = serde_json::json!({
            "speed": "standard",
            "is_gift": false,
            "gift_message": "Surprise!",
        });
        let err = serde_json::from_value::<DeliveryOptions>(payload).unwrap_err();
        assert!(err.to_string().contains("gift wrap is off"));
    }
}
