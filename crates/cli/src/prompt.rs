//! Interactive input: the stdin line source and "did you mean" hints.

use std::io::{BufRead, Write};

use crossterm::style::Stylize;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use coinshell_core::completion::CompletionIndex;
use coinshell_core::{Error, InputSource, Result};

/// Blocking line reader over stdin with a styled prompt.
#[derive(Debug, Default)]
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt.dark_cyan()).map_err(Error::Stdio)?;
        stdout.flush().map_err(Error::Stdio)?;

        let mut line = String::new();
        let bytes = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(Error::Stdio)?;

        if bytes == 0 {
            // Ctrl-D / end of piped input.
            return Ok(None);
        }
        Ok(Some(line.trim_end().to_string()))
    }
}

/// Fuzzy-matches an unrecognized token against the completion candidates of
/// the active menu and returns a one-line hint for the best match.
pub fn suggest(token: &str, completion: &CompletionIndex) -> Option<String> {
    let matcher = SkimMatcherV2::default();
    let best = completion
        .candidates()
        .iter()
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, token)
                .map(|score| (score, candidate))
        })
        .max_by_key(|(score, _)| *score)?;

    Some(format!("Did you mean `{}`?", best.1))
}
