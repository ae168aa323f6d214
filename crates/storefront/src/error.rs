//! Unified error handling for cart operations.
//!
//! Nothing in the widget is fatal: the binder turns every `CartError` into a
//! log line and a visible message. Store and view functions still return
//! `Result<T, CartError>` so the decision stays with the caller.

use thiserror::Error;
use trolley_core::ProductNameError;

/// Error type for the cart store and views.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product name was empty after trimming.
    #[error("Invalid product name: {0}")]
    InvalidName(#[from] ProductNameError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::from(ProductNameError::Empty);
        assert_eq!(err.to_string(), "Invalid product name: product name cannot be empty");
    }
}
