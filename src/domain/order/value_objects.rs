use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;
use crate::domain::catalog::Money;
use crate::domain::ids::ProductId;

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Snapshot of a cart line at the moment the order was placed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.item.id,
            name: line.item.name.clone(),
            unit_price: line.item.unit_price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Courier details attached when an order is shipped
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrackingInfo {
    pub agency: String,
    pub tracking_number: String,
    pub estimated_delivery: Option<NaiveDate>,
}

impl TrackingInfo {
    pub fn new(
        agency: impl Into<String>,
        tracking_number: impl Into<String>,
        estimated_delivery: NaiveDate,
    ) -> Self {
        Self {
            agency: agency.into(),
            tracking_number: tracking_number.into(),
            estimated_delivery: Some(estimated_delivery),
        }
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        if self.agency.trim().is_empty() {
            return Err(OrderError::IncompleteTracking("agency"));
        }
        if self.tracking_number.trim().is_empty() {
            return Err(OrderError::IncompleteTracking("tracking_number"));
        }
        if self.estimated_delivery.is_none() {
            return Err(OrderError::IncompleteTracking("estimated_delivery"));
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_parse_matches_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("returned".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }

    #[test]
    fn test_tracking_validation() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert!(TrackingInfo::new("Blue Dart", "BD123456", date).validate().is_ok());

        let blank_agency = TrackingInfo::new("  ", "BD123456", date);
        assert_eq!(blank_agency.validate(), Err(OrderError::IncompleteTracking("agency")));

        let blank_number = TrackingInfo::new("Blue Dart", "", date);
        assert_eq!(blank_number.validate(), Err(OrderError::IncompleteTracking("tracking_number")));

        let no_date = TrackingInfo {
            estimated_delivery: None,
            ..TrackingInfo::new("Blue Dart", "BD123456", date)
        };
        assert_eq!(no_date.validate(), Err(OrderError::IncompleteTracking("estimated_delivery")));
    }
}
