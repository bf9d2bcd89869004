//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Fulfillment status of an order.
///
/// Orders start as [`Pending`](Self::Pending) and move forward through the
/// shop workflow. Two states are terminal: a completed order has been
/// delivered, a cancelled order will never be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.order_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Just placed, not yet picked up by the shop.
    #[default]
    Pending,
    /// Being prepared and packed.
    Processing,
    /// Delivered. Terminal.
    Completed,
    /// Called off by the shop or the customer. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Whether this status permits no further changes.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether an order may move from this status to `next`.
    ///
    /// Allowed transitions:
    /// - `pending` -> `processing` or `cancelled`
    /// - `processing` -> `completed` or `cancelled`
    ///
    /// Terminal statuses allow nothing, and re-asserting the current
    /// status does not count as a transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing | Self::Cancelled)
                | (Self::Processing, Self::Completed | Self::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
