//! Derived suggestion data for interactive input.
//!
//! A pure projection of the active menu: command and submenu names, plus the
//! choice sets of enumerated flags. Rebuilt from scratch on every menu
//! transition and never consulted for dispatch correctness, so staleness is
//! cosmetic at worst.

use indexmap::IndexMap;

use crate::menu::Menu;
use crate::schema::FlagKind;

/// Tokens that are always accepted regardless of the active menu,
/// aliases included.
pub const RESERVED_COMMANDS: [&str; 7] = ["help", "h", "?", "quit", "exit", "..", "q"];

#[derive(Debug, Default)]
pub struct CompletionIndex {
    candidates: Vec<String>,
    choices: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl CompletionIndex {
    /// Builds the index for one menu and its direct submenus.
    pub fn rebuild(menu: &Menu, submenus: &[String]) -> Self {
        let mut candidates: Vec<String> =
            menu.command_names().map(ToString::to_string).collect();
        candidates.extend(submenus.iter().cloned());
        candidates.extend(RESERVED_COMMANDS.iter().map(ToString::to_string));

        let mut choices = IndexMap::new();
        for spec in menu.commands() {
            let mut flag_choices = IndexMap::new();
            for flag in spec.schema.flags() {
                if let FlagKind::Choice {
                    choices: values, ..
                } = &flag.kind
                {
                    flag_choices.insert(flag.name.clone(), values.clone());
                }
            }
            if !flag_choices.is_empty() {
                choices.insert(spec.name.clone(), flag_choices);
            }
        }

        Self {
            candidates,
            choices,
        }
    }

    /// Everything that is a valid first token in the current menu.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Valid values for one enumerated flag of one command.
    pub fn flag_values(&self, command: &str, flag: &str) -> Option<&[String]> {
        self.choices
            .get(command)?
            .get(flag)
            .map(Vec::as_slice)
    }

    /// Commands that carry at least one enumerated flag.
    pub fn commands_with_choices(&self) -> impl Iterator<Item = &str> {
        self.choices.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::HandlerOutput;
    use crate::schema::{ArgumentSchema, FlagSpec};

    fn sample_menu() -> Menu {
        let schema = ArgumentSchema::new()
            .flag(FlagSpec::choice(
                "sort",
                Some('s'),
                "",
                "tvl",
                &["tvl", "name", "symbol"],
            ))
            .unwrap()
            .flag(FlagSpec::positive_int("limit", Some('l'), "", 10))
            .unwrap();

        Menu::builder("/crypto/defi/")
            .command(
                "llama",
                "DeFi protocols on DeFi Llama",
                schema,
                None,
                Box::new(|_| Ok(HandlerOutput::silent())),
            )
            .unwrap()
            .command(
                "stats",
                "Uniswap base statistics",
                ArgumentSchema::new(),
                None,
                Box::new(|_| Ok(HandlerOutput::silent())),
            )
            .unwrap()
            .build()
    }

    #[test]
    fn test_candidates_cover_commands_submenus_and_reserved_tokens() {
        let index = CompletionIndex::rebuild(&sample_menu(), &["uniswap".to_string()]);
        let candidates = index.candidates();

        assert!(candidates.iter().any(|c| c == "llama"));
        assert!(candidates.iter().any(|c| c == "stats"));
        assert!(candidates.iter().any(|c| c == "uniswap"));
        assert!(candidates.iter().any(|c| c == "quit"));
        assert!(candidates.iter().any(|c| c == ".."));
    }

    // Every pseudo-command the dispatcher accepts, aliases included, must
    // appear in the derived view.
    #[test]
    fn test_reserved_tokens_cover_dispatcher_aliases() {
        let index = CompletionIndex::rebuild(&sample_menu(), &[]);
        for token in ["help", "h", "?", "quit", "exit", "..", "q"] {
            assert!(
                index.candidates().iter().any(|c| c == token),
                "`{token}` missing from candidates"
            );
        }
    }

    #[test]
    fn test_only_enumerated_flags_contribute_values() {
        let index = CompletionIndex::rebuild(&sample_menu(), &[]);

        assert_eq!(
            index.flag_values("llama", "sort"),
            Some(["tvl", "name", "symbol"].map(String::from).as_slice())
        );
        assert!(index.flag_values("llama", "limit").is_none());
        assert!(index.flag_values("stats", "sort").is_none());

        let with_choices: Vec<&str> = index.commands_with_choices().collect();
        assert_eq!(with_choices, vec!["llama"]);
    }
}
