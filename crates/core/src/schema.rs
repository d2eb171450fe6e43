//! Declarative argument schemas and token validation.
//!
//! Every command declares the flags it accepts up front: name, optional short
//! alias, type, default and (for enumerated flags) the allowed choice set.
//! Validation turns raw tokens into a fully-defaulted [`ArgumentBundle`] or
//! rejects the whole invocation before the handler runs.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// The type, default and constraint of a single flag.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagKind {
    /// Integer flag; `positive` rejects values ≤ 0.
    Int { default: i64, positive: bool },
    /// Free-form string flag.
    Text { default: String },
    /// Presence-only flag. Supplying it flips the declared default, which
    /// covers both store-true and store-false style toggles.
    Toggle { default: bool },
    /// Enumerated string flag; the value must match a choice exactly.
    Choice {
        default: String,
        choices: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub name: String,
    pub short: Option<char>,
    pub help: String,
    pub kind: FlagKind,
}

impl FlagSpec {
    pub fn int(name: &str, short: Option<char>, help: &str, default: i64) -> Self {
        Self {
            name: name.to_string(),
            short,
            help: help.to_string(),
            kind: FlagKind::Int {
                default,
                positive: false,
            },
        }
    }

    pub fn positive_int(name: &str, short: Option<char>, help: &str, default: i64) -> Self {
        Self {
            name: name.to_string(),
            short,
            help: help.to_string(),
            kind: FlagKind::Int {
                default,
                positive: true,
            },
        }
    }

    pub fn text(name: &str, short: Option<char>, help: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            short,
            help: help.to_string(),
            kind: FlagKind::Text {
                default: default.to_string(),
            },
        }
    }

    pub fn toggle(name: &str, help: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            help: help.to_string(),
            kind: FlagKind::Toggle { default },
        }
    }

    pub fn choice(
        name: &str,
        short: Option<char>,
        help: &str,
        default: &str,
        choices: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            short,
            help: help.to_string(),
            kind: FlagKind::Choice {
                default: default.to_string(),
                choices: choices.iter().map(ToString::to_string).collect(),
            },
        }
    }

    fn default_value(&self) -> FlagValue {
        match &self.kind {
            FlagKind::Int { default, .. } => FlagValue::Int(*default),
            FlagKind::Text { default } => FlagValue::Text(default.clone()),
            FlagKind::Toggle { default } => FlagValue::Bool(*default),
            FlagKind::Choice { default, .. } => FlagValue::Text(default.clone()),
        }
    }
}

/// A coerced, typed flag value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

/// What to do with flags the schema does not know about.
///
/// Interactive sessions warn and continue with the known flags; batch
/// sessions abort the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFlagPolicy {
    Warn,
    Strict,
}

/// A successful validation: the total bundle plus any tokens that were
/// ignored under [`UnknownFlagPolicy::Warn`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub bundle: ArgumentBundle,
    pub ignored: Vec<String>,
}

/// The fully-defaulted, type-checked values for one command invocation.
///
/// Always total over the owning schema's flag set: unsupplied flags carry
/// their declared defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentBundle {
    values: IndexMap<String, FlagValue>,
}

impl ArgumentBundle {
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingFlag`] if the flag is absent or not an integer.
    pub fn int(&self, name: &str) -> Result<i64> {
        match self.values.get(name) {
            Some(FlagValue::Int(value)) => Ok(*value),
            _ => Err(Error::MissingFlag(name.to_string())),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingFlag`] if the flag is absent or not a string.
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(FlagValue::Text(value)) => Ok(value),
            _ => Err(Error::MissingFlag(name.to_string())),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingFlag`] if the flag is absent or not a toggle.
    pub fn toggled(&self, name: &str) -> Result<bool> {
        match self.values.get(name) {
            Some(FlagValue::Bool(value)) => Ok(*value),
            _ => Err(Error::MissingFlag(name.to_string())),
        }
    }
}

/// Ordered set of flag specs for one command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSchema {
    flags: IndexMap<String, FlagSpec>,
}

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag to the schema, checking the construction-time invariants:
    /// unique names and short aliases, and defaults that satisfy their own
    /// constraint and choice set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonUniqueFlag`], [`Error::DefaultOutsideChoices`] or
    /// [`Error::DefaultOutsideConstraint`].
    pub fn flag(mut self, spec: FlagSpec) -> Result<Self> {
        if self.flags.contains_key(&spec.name) {
            return Err(Error::NonUniqueFlag(spec.name));
        }

        if let Some(short) = spec.short {
            if self.flags.values().any(|existing| existing.short == Some(short)) {
                return Err(Error::NonUniqueFlag(format!("-{short}")));
            }
        }

        match &spec.kind {
            FlagKind::Int {
                default,
                positive: true,
            } if *default <= 0 => {
                return Err(Error::DefaultOutsideConstraint(spec.name));
            }
            FlagKind::Choice { default, choices } if !choices.contains(default) => {
                return Err(Error::DefaultOutsideChoices {
                    flag: spec.name,
                    value: default.clone(),
                });
            }
            _ => {}
        }

        self.flags.insert(spec.name.clone(), spec);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.get(name)
    }

    pub fn flags(&self) -> impl Iterator<Item = &FlagSpec> {
        self.flags.values()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    fn lookup(&self, token: &str) -> Option<&FlagSpec> {
        if let Some(name) = token.strip_prefix("--") {
            return self.flags.get(name);
        }

        let mut chars = token.chars();
        if chars.next() == Some('-') {
            if let (Some(short), None) = (chars.next(), chars.next()) {
                return self.flags.values().find(|spec| spec.short == Some(short));
            }
        }

        None
    }

    /// Validates raw argument tokens into a total [`ArgumentBundle`].
    ///
    /// Recognized flags are coerced to their declared type; unsupplied flags
    /// take their defaults. A flag that expects a value consumes the next
    /// token unconditionally, so negative numbers reach the constraint check
    /// rather than being mistaken for flags.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: [`Error::UnknownFlag`] (under
    /// [`UnknownFlagPolicy::Strict`]), [`Error::FlagType`],
    /// [`Error::ConstraintViolation`], [`Error::InvalidChoice`] or
    /// [`Error::MissingValue`]. The handler must never see a bundle built
    /// from tokens that failed validation.
    pub fn validate(&self, tokens: &[String], policy: UnknownFlagPolicy) -> Result<Validated> {
        let mut values: IndexMap<String, FlagValue> = self
            .flags
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default_value()))
            .collect();
        let mut ignored = Vec::new();

        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];
            index += 1;

            let Some(spec) = self.lookup(token) else {
                if policy == UnknownFlagPolicy::Strict {
                    return Err(Error::UnknownFlag(token.clone()));
                }

                ignored.push(token.clone());
                // An unknown value-style flag drags its value token with it.
                if token.starts_with('-')
                    && index < tokens.len()
                    && !tokens[index].starts_with('-')
                {
                    ignored.push(tokens[index].clone());
                    index += 1;
                }
                continue;
            };

            if let FlagKind::Toggle { default } = spec.kind {
                values.insert(spec.name.clone(), FlagValue::Bool(!default));
                continue;
            }

            if index >= tokens.len() {
                return Err(Error::MissingValue(spec.name.clone()));
            }
            let raw = &tokens[index];
            index += 1;

            values.insert(spec.name.clone(), coerce(spec, raw)?);
        }

        Ok(Validated {
            bundle: ArgumentBundle { values },
            ignored,
        })
    }

    /// Renders a bundle back into argument tokens, defaults included.
    ///
    /// Toggles appear only when flipped away from their default; values
    /// containing spaces are quoted. The rendered tokens re-validate to the
    /// same bundle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFlag`] if the bundle is not total over this
    /// schema.
    pub fn command_line(&self, bundle: &ArgumentBundle) -> Result<Vec<String>> {
        let mut rendered = Vec::new();

        for (name, spec) in &self.flags {
            let value = bundle
                .get(name)
                .ok_or_else(|| Error::MissingFlag(name.clone()))?;

            match (&spec.kind, value) {
                (FlagKind::Toggle { default }, FlagValue::Bool(current)) => {
                    if current != default {
                        rendered.push(format!("--{name}"));
                    }
                }
                (_, FlagValue::Int(current)) => {
                    rendered.push(format!("--{name}"));
                    rendered.push(current.to_string());
                }
                (_, FlagValue::Text(current)) => {
                    rendered.push(format!("--{name}"));
                    if current.contains(' ') {
                        rendered.push(format!("\"{current}\""));
                    } else {
                        rendered.push(current.clone());
                    }
                }
                _ => return Err(Error::MissingFlag(name.clone())),
            }
        }

        Ok(rendered)
    }
}

fn coerce(spec: &FlagSpec, raw: &str) -> Result<FlagValue> {
    match &spec.kind {
        FlagKind::Int { positive, .. } => {
            let value: i64 = raw.parse().map_err(|_| Error::FlagType {
                flag: spec.name.clone(),
                value: raw.to_string(),
                expected: "an integer",
            })?;
            if *positive && value <= 0 {
                return Err(Error::ConstraintViolation {
                    flag: spec.name.clone(),
                    value,
                });
            }
            Ok(FlagValue::Int(value))
        }
        FlagKind::Text { .. } => Ok(FlagValue::Text(raw.to_string())),
        FlagKind::Choice { choices, .. } => {
            if choices.iter().any(|choice| choice == raw) {
                Ok(FlagValue::Text(raw.to_string()))
            } else {
                Err(Error::InvalidChoice {
                    flag: spec.name.clone(),
                    value: raw.to_string(),
                    choices: choices.clone(),
                })
            }
        }
        FlagKind::Toggle { .. } => unreachable!("toggles never consume a value token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn sample_schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .flag(FlagSpec::positive_int(
                "limit",
                Some('l'),
                "Number of records to display",
                15,
            ))
            .unwrap()
            .flag(FlagSpec::choice(
                "sort",
                Some('s'),
                "Sort by given column",
                "Rank",
                &["Rank", "Name", "TVL"],
            ))
            .unwrap()
            .flag(FlagSpec::toggle(
                "descend",
                "Flag to sort in descending order",
                true,
            ))
            .unwrap()
            .flag(FlagSpec::text("asset", Some('a'), "Asset symbol", "BTC"))
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_unsupplied_flags() {
        let schema = sample_schema();
        let validated = schema.validate(&[], UnknownFlagPolicy::Strict).unwrap();

        assert_eq!(validated.bundle.int("limit").unwrap(), 15);
        assert_eq!(validated.bundle.text("sort").unwrap(), "Rank");
        assert!(validated.bundle.toggled("descend").unwrap());
        assert_eq!(validated.bundle.text("asset").unwrap(), "BTC");
        assert!(validated.ignored.is_empty());
    }

    #[test]
    fn test_short_and_long_flags_coerce() {
        let schema = sample_schema();
        let validated = schema
            .validate(&tokens(&["-l", "3", "--sort", "Name"]), UnknownFlagPolicy::Strict)
            .unwrap();

        assert_eq!(validated.bundle.int("limit").unwrap(), 3);
        assert_eq!(validated.bundle.text("sort").unwrap(), "Name");
    }

    #[test]
    fn test_toggle_flips_declared_default() {
        let schema = sample_schema();
        let validated = schema
            .validate(&tokens(&["--descend"]), UnknownFlagPolicy::Strict)
            .unwrap();
        assert!(!validated.bundle.toggled("descend").unwrap());
    }

    #[test]
    fn test_type_error_names_flag_and_value() {
        let schema = sample_schema();
        let result = schema.validate(&tokens(&["--limit", "abc"]), UnknownFlagPolicy::Strict);
        match result {
            Err(Error::FlagType { flag, value, .. }) => {
                assert_eq!(flag, "limit");
                assert_eq!(value, "abc");
            }
            other => panic!("expected FlagType, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_value_hits_constraint_not_tokenizer() {
        let schema = sample_schema();
        let result = schema.validate(&tokens(&["--limit", "-5"]), UnknownFlagPolicy::Strict);
        assert!(matches!(
            result,
            Err(Error::ConstraintViolation { flag, value: -5 }) if flag == "limit"
        ));
    }

    #[test]
    fn test_invalid_choice_lists_allowed_set() {
        let schema = sample_schema();
        let result = schema.validate(&tokens(&["-s", "bogus"]), UnknownFlagPolicy::Strict);
        match result {
            Err(Error::InvalidChoice { flag, choices, .. }) => {
                assert_eq!(flag, "sort");
                assert_eq!(choices, vec!["Rank", "Name", "TVL"]);
            }
            other => panic!("expected InvalidChoice, got {other:?}"),
        }
    }

    #[test]
    fn test_choice_match_is_case_sensitive() {
        let schema = sample_schema();
        let result = schema.validate(&tokens(&["-s", "name"]), UnknownFlagPolicy::Strict);
        assert!(matches!(result, Err(Error::InvalidChoice { .. })));
    }

    #[test]
    fn test_unknown_flag_strict_aborts() {
        let schema = sample_schema();
        let result = schema.validate(&tokens(&["--bogus", "1"]), UnknownFlagPolicy::Strict);
        assert!(matches!(result, Err(Error::UnknownFlag(flag)) if flag == "--bogus"));
    }

    #[test]
    fn test_unknown_flag_warn_continues_with_known_flags() {
        let schema = sample_schema();
        let validated = schema
            .validate(
                &tokens(&["--bogus", "1", "-l", "7"]),
                UnknownFlagPolicy::Warn,
            )
            .unwrap();

        assert_eq!(validated.ignored, vec!["--bogus", "1"]);
        assert_eq!(validated.bundle.int("limit").unwrap(), 7);
    }

    #[test]
    fn test_missing_value_is_reported() {
        let schema = sample_schema();
        let result = schema.validate(&tokens(&["--limit"]), UnknownFlagPolicy::Strict);
        assert!(matches!(result, Err(Error::MissingValue(flag)) if flag == "limit"));
    }

    #[test]
    fn test_duplicate_flag_name_rejected_at_construction() {
        let result = ArgumentSchema::new()
            .flag(FlagSpec::text("asset", None, "", "BTC"))
            .unwrap()
            .flag(FlagSpec::text("asset", None, "", "ETH"));
        assert!(matches!(result, Err(Error::NonUniqueFlag(name)) if name == "asset"));
    }

    #[test]
    fn test_duplicate_short_alias_rejected_at_construction() {
        let result = ArgumentSchema::new()
            .flag(FlagSpec::text("asset", Some('a'), "", "BTC"))
            .unwrap()
            .flag(FlagSpec::text("address", Some('a'), "", ""));
        assert!(matches!(result, Err(Error::NonUniqueFlag(_))));
    }

    #[test]
    fn test_choice_default_must_be_a_member() {
        let result = ArgumentSchema::new().flag(FlagSpec::choice(
            "sort",
            None,
            "",
            "bogus",
            &["Rank", "Name"],
        ));
        assert!(matches!(result, Err(Error::DefaultOutsideChoices { .. })));
    }

    #[test]
    fn test_positive_default_must_satisfy_constraint() {
        let result =
            ArgumentSchema::new().flag(FlagSpec::positive_int("limit", None, "", 0));
        assert!(matches!(
            result,
            Err(Error::DefaultOutsideConstraint(flag)) if flag == "limit"
        ));
    }

    #[test]
    fn test_command_line_round_trips() {
        let schema = sample_schema();
        let validated = schema
            .validate(
                &tokens(&["-l", "3", "--descend", "-a", "ETH"]),
                UnknownFlagPolicy::Strict,
            )
            .unwrap();

        let rendered = schema.command_line(&validated.bundle).unwrap();
        let reparsed = schema.validate(&rendered, UnknownFlagPolicy::Strict).unwrap();
        assert_eq!(reparsed.bundle, validated.bundle);
    }

    #[test]
    fn test_command_line_of_defaults_round_trips() {
        let schema = sample_schema();
        let defaults = schema.validate(&[], UnknownFlagPolicy::Strict).unwrap();

        let rendered = schema.command_line(&defaults.bundle).unwrap();
        // Toggles at their default stay out of the rendering.
        assert!(!rendered.contains(&"--descend".to_string()));

        let reparsed = schema.validate(&rendered, UnknownFlagPolicy::Strict).unwrap();
        assert_eq!(reparsed.bundle, defaults.bundle);
    }

    #[test]
    fn test_validation_is_stateless_across_runs() {
        let schema = sample_schema();
        let first = schema
            .validate(&tokens(&["-l", "9"]), UnknownFlagPolicy::Strict)
            .unwrap();
        let second = schema
            .validate(&tokens(&["-l", "9"]), UnknownFlagPolicy::Strict)
            .unwrap();
        assert_eq!(first, second);

        // A run with overrides leaves no trace on a later default run.
        let defaults = schema.validate(&[], UnknownFlagPolicy::Strict).unwrap();
        assert_eq!(defaults.bundle.int("limit").unwrap(), 15);
    }
}
