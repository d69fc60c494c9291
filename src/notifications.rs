//! Notifications
//!
//! User-facing messages emitted when a cart operation is refused. Only the
//! human-readable message crosses this boundary.

use std::fmt;

use mockall::automock;
use tracing::warn;

/// Message categories shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Requested quantity exceeds the available stock.
    InsufficientStock,

    /// A product could not be added to the cart.
    AddFailed,

    /// A product could not be removed from the cart.
    RemoveFailed,

    /// The amount of a product could not be changed.
    UpdateFailed,
}

impl Notice {
    /// Message text for this category.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InsufficientStock => "Requested quantity is out of stock",
            Self::AddFailed => "Could not add the product to the cart",
            Self::RemoveFailed => "Could not remove the product from the cart",
            Self::UpdateFailed => "Could not update the product amount",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-facing error notifications.
#[automock]
pub trait Notifier: Send + Sync {
    /// Show an error message to the user.
    fn error(&self, message: &str);
}

/// Notifier that reports messages through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(target: "cartstore::notice", "{message}");
    }
}
