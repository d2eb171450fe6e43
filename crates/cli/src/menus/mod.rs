//! The built-in menu tree: `/`, `/crypto/`, `/crypto/defi/` and
//! `/crypto/onchain/`.

use coinshell_core::{MenuTree, Result};

pub mod crypto;
pub mod defi;
pub mod onchain;

/// Builds the full menu tree the binary starts with.
///
/// # Errors
///
/// Fails only on authoring mistakes (duplicate commands, menus or flags),
/// which are construction-time errors by design.
pub fn build_tree() -> Result<MenuTree> {
    let mut tree = MenuTree::new();
    tree.register(crypto::root_menu())?;
    tree.register(crypto::crypto_menu()?)?;
    tree.register(defi::menu()?)?;
    tree.register(onchain::menu()?)?;
    Ok(tree)
}
