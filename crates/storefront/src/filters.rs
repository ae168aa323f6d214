//! Custom Askama template filters.

use std::fmt::Display;

/// Image shown for line items that have no image of their own.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/50";

/// Returns the image URL, or the placeholder when it is empty.
///
/// Usage in templates: `{{ item.image|placeholder_image }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn placeholder_image(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let url = url.to_string();
    if url.trim().is_empty() {
        Ok(PLACEHOLDER_IMAGE.to_string())
    } else {
        Ok(url)
    }
}
