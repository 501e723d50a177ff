//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the item-count label for the cart heading.
///
/// Usage in templates: `{{ page.cart.item_count|items_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn items_label(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let count = count.to_string();
    if count == "1" {
        Ok("1 item".to_string())
    } else {
        Ok(format!("{count} items"))
    }
}
