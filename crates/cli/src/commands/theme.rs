//! Theme command.

use super::{CliError, open_shop};

/// Flip the saved theme.
///
/// With nothing saved yet the current theme counts as light.
pub fn toggle() -> Result<(), CliError> {
    let mut shop = open_shop()?;
    let theme = shop.toggle_theme(false);
    tracing::info!("Theme is now {}", theme.as_str());
    Ok(())
}
