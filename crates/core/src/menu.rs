//! Menus: named sets of commands, one per navigable topic.
//!
//! A menu is built once from a fixed ordered list of commands and is
//! immutable afterwards. Parent linkage is derived from the path string
//! (`/crypto/defi/` → `/crypto/`), a navigational back-reference only; the
//! tree never forms ownership cycles.

use indexmap::IndexMap;

use crate::command::{CommandSpec, Handler};
use crate::error::{Error, Result};
use crate::export::{self, ExportPolicy};
use crate::schema::ArgumentSchema;

#[derive(Debug)]
pub struct Menu {
    path: String,
    help: String,
    commands: IndexMap<String, CommandSpec>,
}

impl Menu {
    pub fn builder(path: &str) -> MenuBuilder {
        MenuBuilder {
            path: path.to_string(),
            help: String::new(),
            commands: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path of the parent menu, or `None` at the root.
    pub fn parent_path(&self) -> Option<String> {
        let trimmed = self.path.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        let cut = trimmed.rfind('/')?;
        Some(self.path[..=cut].to_string())
    }

    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// The authored help summary for this menu. Grouping by category is an
    /// editorial decision made per menu, not derived from the command set.
    pub fn help(&self) -> &str {
        &self.help
    }
}

pub struct MenuBuilder {
    path: String,
    help: String,
    commands: IndexMap<String, CommandSpec>,
}

impl MenuBuilder {
    #[must_use]
    pub fn help_text(mut self, text: &str) -> Self {
        self.help = text.to_string();
        self
    }

    /// Registers one command, injecting the shared export sub-schema when
    /// the command opts into an export policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCommand`] for a repeated name — menus are
    /// validated while they are built, before the session starts.
    pub fn command(
        mut self,
        name: &str,
        description: &str,
        schema: ArgumentSchema,
        policy: Option<ExportPolicy>,
        handler: Handler,
    ) -> Result<Self> {
        if self.commands.contains_key(name) {
            return Err(Error::DuplicateCommand(self.path, name.to_string()));
        }

        let schema = match policy {
            Some(policy) => export::inject_flags(schema, policy)?,
            None => schema,
        };

        self.commands.insert(
            name.to_string(),
            CommandSpec::new(name, description, schema, policy, handler),
        );
        Ok(self)
    }

    pub fn build(self) -> Menu {
        Menu {
            path: self.path,
            help: self.help,
            commands: self.commands,
        }
    }
}

/// All menus of a session, registered by path.
#[derive(Debug, Default)]
pub struct MenuTree {
    menus: IndexMap<String, Menu>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`Error::DuplicateMenu`] if a menu is already registered at
    /// the same path.
    pub fn register(&mut self, menu: Menu) -> Result<()> {
        if self.menus.contains_key(menu.path()) {
            return Err(Error::DuplicateMenu(menu.path().to_string()));
        }
        self.menus.insert(menu.path().to_string(), menu);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Menu> {
        self.menus.get(path)
    }

    /// Resolves a bare submenu name relative to `path`.
    pub fn submenu(&self, path: &str, name: &str) -> Option<String> {
        let child = format!("{path}{name}/");
        self.menus.contains_key(&child).then_some(child)
    }

    /// Names of the direct submenus of `path`.
    pub fn submenu_names(&self, path: &str) -> Vec<String> {
        self.menus
            .keys()
            .filter_map(|candidate| {
                let rest = candidate.strip_prefix(path)?;
                let name = rest.strip_suffix('/')?;
                (!name.is_empty() && !name.contains('/')).then(|| name.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::HandlerOutput;

    fn noop() -> Handler {
        Box::new(|_| Ok(HandlerOutput::silent()))
    }

    fn menu_at(path: &str) -> Menu {
        Menu::builder(path).build()
    }

    #[test]
    fn test_resolve_finds_registered_commands() {
        let menu = Menu::builder("/crypto/defi/")
            .command("tvl", "Total value locked", ArgumentSchema::new(), None, noop())
            .unwrap()
            .build();

        assert!(menu.resolve("tvl").is_some());
        assert!(menu.resolve("dpi").is_none());
    }

    #[test]
    fn test_duplicate_command_fails_at_construction() {
        let result = Menu::builder("/crypto/defi/")
            .command("tvl", "", ArgumentSchema::new(), None, noop())
            .unwrap()
            .command("tvl", "", ArgumentSchema::new(), None, noop());

        assert!(matches!(
            result,
            Err(Error::DuplicateCommand(path, name)) if path == "/crypto/defi/" && name == "tvl"
        ));
    }

    #[test]
    fn test_export_policy_injects_shared_flag() {
        let menu = Menu::builder("/crypto/defi/")
            .command(
                "dpi",
                "",
                ArgumentSchema::new(),
                Some(ExportPolicy::RawOnly),
                noop(),
            )
            .unwrap()
            .build();

        let spec = menu.resolve("dpi").unwrap();
        assert!(spec.schema.get(crate::export::EXPORT_FLAG).is_some());
    }

    #[test]
    fn test_parent_path_derivation() {
        assert_eq!(
            menu_at("/crypto/defi/").parent_path(),
            Some("/crypto/".to_string())
        );
        assert_eq!(menu_at("/crypto/").parent_path(), Some("/".to_string()));
        assert_eq!(menu_at("/").parent_path(), None);
    }

    #[test]
    fn test_tree_rejects_duplicate_paths() {
        let mut tree = MenuTree::new();
        tree.register(menu_at("/crypto/")).unwrap();
        let result = tree.register(menu_at("/crypto/"));
        assert!(matches!(result, Err(Error::DuplicateMenu(path)) if path == "/crypto/"));
    }

    #[test]
    fn test_submenu_lookup_is_relative() {
        let mut tree = MenuTree::new();
        tree.register(menu_at("/")).unwrap();
        tree.register(menu_at("/crypto/")).unwrap();
        tree.register(menu_at("/crypto/defi/")).unwrap();

        assert_eq!(tree.submenu("/", "crypto"), Some("/crypto/".to_string()));
        assert_eq!(
            tree.submenu("/crypto/", "defi"),
            Some("/crypto/defi/".to_string())
        );
        assert_eq!(tree.submenu("/", "defi"), None);
    }

    #[test]
    fn test_submenu_names_lists_direct_children_only() {
        let mut tree = MenuTree::new();
        tree.register(menu_at("/")).unwrap();
        tree.register(menu_at("/crypto/")).unwrap();
        tree.register(menu_at("/crypto/defi/")).unwrap();
        tree.register(menu_at("/crypto/onchain/")).unwrap();

        assert_eq!(tree.submenu_names("/"), vec!["crypto"]);
        assert_eq!(tree.submenu_names("/crypto/"), vec!["defi", "onchain"]);
        assert!(tree.submenu_names("/crypto/defi/").is_empty());
    }
}
