//! The root menu and the `/crypto/` hub.

use coinshell_core::{ArgumentSchema, HandlerOutput, Menu, Result};

const ROOT_HELP: &str = "\
coinshell - interactive terminal for exploring crypto data

Menus:
    crypto        cryptocurrency markets, DeFi and on-chain analytics

Type a menu name to enter it, `..` to go back, `help` for this text and
`quit` to leave.";

const CRYPTO_HELP: &str = "\
Cryptocurrency:
    dashboard     run the standard DeFi overview (tvl, top protocols)

Menus:
    defi          decentralized finance: rates, protocols, Uniswap
    onchain       on-chain analytics: addresses, balances, hashrate";

pub fn root_menu() -> Menu {
    Menu::builder("/").help_text(ROOT_HELP).build()
}

/// The `/crypto/` hub. Its single command demonstrates queue chaining: one
/// action that navigates into defi, runs two reports and returns.
///
/// # Errors
///
/// Fails only on duplicate command registration.
pub fn crypto_menu() -> Result<Menu> {
    Ok(Menu::builder("/crypto/")
        .help_text(CRYPTO_HELP)
        .command(
            "dashboard",
            "Run the standard DeFi overview",
            ArgumentSchema::new(),
            None,
            Box::new(|_| {
                Ok(HandlerOutput::silent().with_queued(["defi", "tvl", "llama -l 5", ".."]))
            }),
        )?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinshell_core::ArgumentBundle;

    #[test]
    fn test_dashboard_chains_through_defi_and_back() {
        let menu = crypto_menu().unwrap();
        let spec = menu.resolve("dashboard").unwrap();

        let output = spec.invoke(&ArgumentBundle::default()).unwrap();
        assert!(output.table.is_none());
        assert_eq!(output.queued, vec!["defi", "tvl", "llama -l 5", ".."]);
    }

    #[test]
    fn test_root_menu_has_no_commands() {
        assert_eq!(root_menu().commands().count(), 0);
    }
}
