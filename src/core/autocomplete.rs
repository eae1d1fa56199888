//! Tab completion for command names and paths.
//!
//! - A single token completes against command names
//! - After `cd`, `ls`, `cat` or `nano`, the last token completes against the
//!   children of the directory it points into; directories get a trailing `/`
//!
//! Candidates are ordered directories first, then lexicographically. One
//! candidate is applied at once; several open a list that Tab cycles and
//! Enter accepts.

use crate::core::filesystem::VirtualFs;

/// Commands whose arguments are paths.
const PATH_COMMANDS: &[&str] = &["cd", "ls", "cat", "nano"];

// ============================================================================
// Completion Context
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum CompletionMode {
    Command,
    Path,
    None,
}

impl CompletionMode {
    fn from_tokens(tokens: &[&str]) -> Self {
        match tokens {
            [_] => Self::Command,
            [cmd, ..] if PATH_COMMANDS.contains(cmd) => Self::Path,
            _ => Self::None,
        }
    }
}

/// A partial path split at its last `/`.
struct ParsedPath<'a> {
    /// Everything up to and including the last `/`, kept verbatim.
    dir_part: &'a str,
    /// Basename prefix being completed.
    name_part: &'a str,
}

impl<'a> ParsedPath<'a> {
    fn parse(partial: &'a str) -> Self {
        match partial.rfind('/') {
            Some(idx) => Self {
                dir_part: &partial[..=idx],
                name_part: &partial[idx + 1..],
            },
            None => Self {
                dir_part: "",
                name_part: partial,
            },
        }
    }

    fn search_dir(&self, cwd: &str) -> String {
        if self.dir_part.is_empty() {
            cwd.to_string()
        } else {
            VirtualFs::resolve_path(self.dir_part, cwd)
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Candidates for the last token of `input`, already sorted.
pub fn generate_completions(
    input: &str,
    cwd: &str,
    fs: &VirtualFs,
    command_names: &[&str],
) -> Vec<String> {
    let tokens: Vec<&str> = input.split(' ').collect();
    let last = tokens.last().copied().unwrap_or_default();

    let mut candidates = match CompletionMode::from_tokens(&tokens) {
        CompletionMode::Command => command_names
            .iter()
            .filter(|name| name.starts_with(last))
            .map(|name| name.to_string())
            .collect(),
        CompletionMode::Path => complete_path(last, cwd, fs),
        CompletionMode::None => Vec::new(),
    };
    sort_candidates(&mut candidates);
    candidates
}

fn complete_path(partial: &str, cwd: &str, fs: &VirtualFs) -> Vec<String> {
    let parsed = ParsedPath::parse(partial);
    let Some(entries) = fs.list_dir(&parsed.search_dir(cwd)) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|e| e.name.starts_with(parsed.name_part))
        .map(|e| {
            let slash = if e.is_dir() { "/" } else { "" };
            format!("{}{}{}", parsed.dir_part, e.name, slash)
        })
        .collect()
}

/// Directories (trailing `/`) first, then everything else; each group sorted.
pub fn sort_candidates(candidates: &mut [String]) {
    candidates.sort_by(|a, b| {
        b.ends_with('/')
            .cmp(&a.ends_with('/'))
            .then_with(|| a.cmp(b))
    });
}

/// Replace the last space-separated token of `input` with `replacement`.
pub fn replace_last_token(input: &str, replacement: &str) -> String {
    match input.rfind(' ') {
        Some(idx) => format!("{}{}", &input[..=idx], replacement),
        None => replacement.to_string(),
    }
}

// ============================================================================
// Cycling State
// ============================================================================

/// Open candidate list with a highlighted entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionState {
    candidates: Vec<String>,
    index: usize,
}

impl CompletionState {
    pub fn is_open(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn selected(&self) -> usize {
        self.index
    }

    pub fn open(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.index = 0;
    }

    /// Move the highlight to the next candidate, wrapping around.
    pub fn cycle(&mut self) {
        if self.is_open() {
            self.index = (self.index + 1) % self.candidates.len();
        }
    }

    /// Close the list and return the highlighted candidate.
    pub fn take_selected(&mut self) -> Option<String> {
        let chosen = self.candidates.get(self.index).cloned();
        self.close();
        chosen
    }

    /// Close the list and return candidate `index`, if it exists.
    pub fn take(&mut self, index: usize) -> Option<String> {
        let chosen = self.candidates.get(index).cloned();
        self.close();
        chosen
    }

    pub fn close(&mut self) {
        self.candidates.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMANDS: &[&str] = &["help", "history", "clear", "cat", "cd", "calendar", "credits"];

    fn complete(input: &str, cwd: &str) -> Vec<String> {
        generate_completions(input, cwd, &VirtualFs::nucaloric(), COMMANDS)
    }

    #[test]
    fn test_command_prefix() {
        assert_eq!(complete("h", "/"), vec!["help", "history"]);
        assert_eq!(complete("cl", "/"), vec!["clear"]);
        assert!(complete("zz", "/").is_empty());
    }

    #[test]
    fn test_empty_input_lists_all_commands() {
        assert_eq!(complete("", "/").len(), COMMANDS.len());
    }

    #[test]
    fn test_path_in_current_dir() {
        assert_eq!(complete("cd s", "/home/user"), vec!["sites/", "system/"]);
        assert_eq!(complete("ls d", "/home/user"), vec!["documents/"]);
    }

    #[test]
    fn test_path_with_dir_prefix() {
        let got = complete("cat sites/d", "/home/user");
        assert_eq!(got, vec!["sites/dashboard/", "sites/directory"]);
    }

    #[test]
    fn test_absolute_path() {
        assert_eq!(complete("cd /ho", "/"), vec!["/home/"]);
    }

    #[test]
    fn test_non_path_command_has_no_candidates() {
        assert!(complete("echo s", "/home/user").is_empty());
    }

    #[test]
    fn test_missing_directory_has_no_candidates() {
        assert!(complete("cd nope/x", "/home/user").is_empty());
    }

    #[test]
    fn test_sort_dirs_first() {
        let mut items = vec!["b".to_string(), "z/".to_string(), "a".to_string(), "c/".to_string()];
        sort_candidates(&mut items);
        assert_eq!(items, vec!["c/", "z/", "a", "b"]);
    }

    #[test]
    fn test_replace_last_token() {
        assert_eq!(replace_last_token("cd si", "sites/"), "cd sites/");
        assert_eq!(replace_last_token("he", "help"), "help");
        assert_eq!(replace_last_token("cat a b", "bin/"), "cat a bin/");
    }

    #[test]
    fn test_cycle_and_take() {
        let mut state = CompletionState::default();
        assert!(!state.is_open());
        state.open(vec!["a".into(), "b".into()]);
        state.cycle();
        assert_eq!(state.selected(), 1);
        state.cycle();
        assert_eq!(state.selected(), 0);
        state.cycle();
        assert_eq!(state.take_selected().as_deref(), Some("b"));
        assert!(!state.is_open());
    }
}
