//! Cart store.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, info, warn};

use crate::{
    cart::{
        errors::CartError,
        models::{CART_STORAGE_KEY, Cart},
    },
    inventory::InventoryService,
    notifications::{Notice, Notifier},
    products::ProductId,
    storage::PersistentStore,
};

/// Result of a cart operation, as seen by the caller.
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    /// The cart changed and the new snapshot was stored.
    Updated,

    /// The request was a no-op; neither the cart nor storage was touched.
    Unchanged,

    /// The request was refused and the user was notified. The cart and
    /// storage are untouched.
    Rejected(CartError),
}

impl Outcome {
    /// Whether the cart changed.
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Reason the request was refused, if it was.
    pub fn error(&self) -> Option<&CartError> {
        match self {
            Self::Rejected(error) => Some(error),
            Self::Updated | Self::Unchanged => None,
        }
    }
}

/// Session cart backed by an inventory and a persistent store.
pub struct CartStore {
    cart: Mutex<Cart>,
    inventory: Arc<dyn InventoryService>,
    storage: Arc<dyn PersistentStore>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart stored under [`CART_STORAGE_KEY`], or an empty cart when
    /// nothing was stored yet. An undecodable snapshot is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] when the store cannot be read.
    pub fn open(
        inventory: Arc<dyn InventoryService>,
        storage: Arc<dyn PersistentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CartError> {
        let cart = match storage.read(CART_STORAGE_KEY)? {
            Some(snapshot) => Cart::from_snapshot(&snapshot).unwrap_or_else(|error| {
                warn!("discarding unreadable cart snapshot: {error}");

                Cart::new()
            }),
            None => Cart::new(),
        };

        info!("cart opened with {} line item(s)", cart.len());

        Ok(Self {
            cart: Mutex::new(cart),
            inventory,
            storage,
            notifier,
        })
    }

    /// Current cart contents.
    pub fn cart(&self) -> Cart {
        self.lock().clone()
    }

    /// Add one unit of a product, appending a new line when the product is not
    /// in the cart yet.
    pub async fn add_item(&self, id: ProductId) -> Outcome {
        match self.try_add_item(id).await {
            Ok(outcome) => outcome,
            Err(error) => self.reject(error, Notice::AddFailed),
        }
    }

    /// Remove the line for a product.
    pub fn remove_item(&self, id: ProductId) -> Outcome {
        let result = self.commit(|cart| match cart.without(id) {
            Some(updated) => Ok(Some(updated)),
            None => Err(CartError::LineItemNotFound(id)),
        });

        match result {
            Ok(outcome) => outcome,
            Err(error) => self.reject(error, Notice::RemoveFailed),
        }
    }

    /// Set the amount of a product already in the cart.
    ///
    /// Amounts of zero or less are ignored, as are products that are not in
    /// the cart.
    pub async fn update_amount(&self, id: ProductId, amount: i64) -> Outcome {
        if amount <= 0 {
            return Outcome::Unchanged;
        }

        match self.try_update_amount(id, amount.unsigned_abs()).await {
            Ok(outcome) => outcome,
            Err(error) => self.reject(error, Notice::UpdateFailed),
        }
    }

    async fn try_add_item(&self, id: ProductId) -> Result<Outcome, CartError> {
        let (product, stock) = tokio::join!(
            self.inventory.get_product(id),
            self.inventory.get_stock(id)
        );

        // An unknown product usually has no stock record either.
        let product = product?.ok_or(CartError::ProductNotFound(id))?;
        let stock = stock?;

        self.commit(|cart| {
            let current = cart.get(id).map_or(0, |item| item.amount);

            let requested = match current.checked_add(1) {
                Some(requested) if stock.covers(requested) => requested,
                _ => {
                    return Err(CartError::InsufficientStock {
                        product: id,
                        requested: u64::from(current) + 1,
                        available: stock.amount,
                    });
                }
            };

            Ok(Some(cart.with_line(product, requested)))
        })
    }

    async fn try_update_amount(&self, id: ProductId, requested: u64) -> Result<Outcome, CartError> {
        let stock = self.inventory.get_stock(id).await?;

        let amount = match u32::try_from(requested) {
            Ok(amount) if stock.covers(amount) => amount,
            _ => {
                return Err(CartError::InsufficientStock {
                    product: id,
                    requested,
                    available: stock.amount,
                });
            }
        };

        self.commit(|cart| Ok(cart.with_amount(id, amount)))
    }

    /// Apply `change` to the current cart, store the result and swap it in.
    ///
    /// `change` returns `None` for a no-op. The lock is held from reading the
    /// cart until the swap, and nothing is modified unless the write succeeds.
    fn commit<F>(&self, change: F) -> Result<Outcome, CartError>
    where
        F: FnOnce(&Cart) -> Result<Option<Cart>, CartError>,
    {
        let mut cart = self.lock();

        let Some(updated) = change(&cart)? else {
            return Ok(Outcome::Unchanged);
        };

        let snapshot = updated.to_snapshot().map_err(CartError::Snapshot)?;

        self.storage.write(CART_STORAGE_KEY, &snapshot)?;

        debug!(
            "stored cart snapshot: {} line item(s), {} unit(s)",
            updated.len(),
            updated.total_amount()
        );

        *cart = updated;

        Ok(Outcome::Updated)
    }

    fn reject(&self, error: CartError, fallback: Notice) -> Outcome {
        let notice = match error {
            CartError::InsufficientStock { .. } => Notice::InsufficientStock,
            _ => fallback,
        };

        if error.is_transient() {
            warn!("cart operation failed: {error}");
        } else {
            debug!("cart operation refused: {error}");
        }

        self.notifier.error(notice.message());

        Outcome::Rejected(error)
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
