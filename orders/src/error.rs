//! Error types for order lifecycle operations.

use crate::types::{AddressId, OrderStatus, ProductId, ShopId};
use thiserror::Error;

/// Result type alias for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;

/// Broad classification of an [`OrderError`], used by callers that map
/// errors onto a transport (HTTP status, RPC code, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// The caller is not allowed to act on the referenced entity.
    Forbidden,
    /// The request itself is invalid.
    BadRequest,
    /// A concurrent writer won; the caller should re-read and retry.
    Conflict,
    /// Infrastructure failure; no partial state was left behind.
    Internal,
}

/// Error taxonomy for the order core.
///
/// Every variant carries a stable [`code`](OrderError::code) so clients can
/// branch on it without parsing messages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderError {
    // ═══════════════════════════════════════════════════════════
    // Address Resolution
    // ═══════════════════════════════════════════════════════════

    /// The referenced saved address does not exist.
    #[error("Delivery address not found")]
    AddressNotFound {
        /// The address id that failed to resolve.
        address_id: AddressId,
    },

    /// The referenced saved address belongs to a different customer.
    #[error("Delivery address belongs to another customer")]
    AddressAccessDenied {
        /// The address id the caller tried to use.
        address_id: AddressId,
    },

    /// Neither a saved-address reference nor an inline snapshot was supplied.
    #[error("Order request carries no delivery address")]
    InvalidAddress,

    // ═══════════════════════════════════════════════════════════
    // Creation Preconditions
    // ═══════════════════════════════════════════════════════════

    /// The cart has no non-empty item group for the requested shop.
    #[error("Cart has no items for shop {shop_id}")]
    EmptyCart {
        /// The shop the order was requested for.
        shop_id: ShopId,
    },

    /// The requested shop does not exist.
    #[error("Shop {shop_id} not found")]
    ShopNotFound {
        /// The missing shop.
        shop_id: ShopId,
    },

    /// The requested shop exists but is not accepting orders.
    #[error("Shop {shop_id} is closed")]
    ShopClosed {
        /// The closed shop.
        shop_id: ShopId,
    },

    /// A cart line references a product that does not exist.
    #[error("Product {product_id} not found")]
    ProductNotFound {
        /// The missing product.
        product_id: ProductId,
    },

    /// A cart line references a product that is unavailable or deleted.
    #[error("Product {product_id} is not available")]
    ProductUnavailable {
        /// The unavailable product.
        product_id: ProductId,
    },

    // ═══════════════════════════════════════════════════════════
    // Order Access
    // ═══════════════════════════════════════════════════════════

    /// The referenced order does not exist.
    #[error("Order not found")]
    OrderNotFound,

    /// The caller may not view or act on this order.
    #[error("Order access denied")]
    OrderAccessDenied,

    // ═══════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════

    /// The requested status change is not an edge of the transition graph.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Status the order currently has.
        from: OrderStatus,
        /// Status the caller requested.
        to: OrderStatus,
    },

    /// The order has already been marked as paid.
    #[error("Order payment has already been marked")]
    PaymentAlreadyMarked,

    // ═══════════════════════════════════════════════════════════
    // Store
    // ═══════════════════════════════════════════════════════════

    /// A guarded write found the record changed underneath it.
    #[error("Concurrent update conflict: {reason}")]
    Conflict {
        /// Which guard failed.
        reason: String,
    },

    /// The store rejected the atomic unit of work; no partial state exists.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Store infrastructure failure outside a transaction.
    #[error("Store error: {0}")]
    StoreError(String),
}

impl OrderError {
    /// Stable machine-readable code for client branching.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AddressNotFound { .. } => "ADDRESS_NOT_FOUND",
            Self::AddressAccessDenied { .. } => "ADDRESS_ACCESS_DENIED",
            Self::InvalidAddress => "ORDER_INVALID_ADDRESS",
            Self::EmptyCart { .. } => "ORDER_EMPTY_CART",
            Self::ShopNotFound { .. } => "SHOP_NOT_FOUND",
            Self::ShopClosed { .. } => "SHOP_CLOSED",
            Self::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            Self::ProductUnavailable { .. } => "PRODUCT_UNAVAILABLE",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::OrderAccessDenied => "ORDER_ACCESS_DENIED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::PaymentAlreadyMarked => "PAYMENT_ALREADY_MARKED",
            Self::Conflict { .. } => "CONFLICT",
            Self::TransactionFailed(_) => "TRANSACTION_FAILED",
            Self::StoreError(_) => "STORE_ERROR",
        }
    }

    /// Classification used when mapping onto a transport.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AddressNotFound { .. } | Self::ShopNotFound { .. }
            | Self::ProductNotFound { .. } | Self::OrderNotFound => ErrorKind::NotFound,
            Self::AddressAccessDenied { .. } | Self::OrderAccessDenied => ErrorKind::Forbidden,
            Self::InvalidAddress
            | Self::EmptyCart { .. }
            | Self::ShopClosed { .. }
            | Self::ProductUnavailable { .. }
            | Self::InvalidTransition { .. }
            | Self::PaymentAlreadyMarked => ErrorKind::BadRequest,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::TransactionFailed(_) | Self::StoreError(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` if this error is due to invalid caller input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::BadRequest)
    }

    /// Returns `true` if the caller may safely retry the whole operation.
    ///
    /// Transaction failures leave no partial state, and conflicts mean a
    /// concurrent writer won; both are retriable from a fresh read.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::TransactionFailed(_))
    }
}
