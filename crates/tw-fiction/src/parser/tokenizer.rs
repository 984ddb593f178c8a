//! Turning a raw input line into command tokens.

/// The tokens derived from one line of player input.
///
/// `command` and `arguments` are lowercased. `command_with_arguments` keeps the
/// arguments as typed and only folds the command word, which is what exact
/// phrase lookup is matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTokens {
    raw: String,
    command: String,
    arguments: Vec<String>,
    command_with_arguments: String,
}

impl CommandTokens {
    /// The trimmed input line exactly as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The lowercased first word.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The lowercased words after the first.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The arguments joined by single spaces.
    pub fn arguments_text(&self) -> String {
        self.arguments.join(" ")
    }

    /// The lowercased command word followed by the arguments in their
    /// original case.
    pub fn command_with_arguments(&self) -> &str {
        &self.command_with_arguments
    }

    /// The command followed by its arguments. Empty for blank input.
    pub fn tokens(&self) -> Vec<&str> {
        if self.is_empty() {
            return Vec::new();
        }
        std::iter::once(self.command.as_str())
            .chain(self.arguments.iter().map(String::as_str))
            .collect()
    }

    /// Whether the input contained no words at all.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Split a line on spaces into command tokens.
///
/// Runs of spaces do not produce empty tokens. Blank input yields an empty
/// token set, which callers must not dispatch.
pub fn tokenize(input: &str) -> CommandTokens {
    let raw = input.trim();
    let mut words = raw.split(' ').filter(|w| !w.is_empty());
    let Some(first) = words.next() else {
        return CommandTokens::default();
    };
    let rest: Vec<&str> = words.collect();

    let command = first.to_lowercase();
    let arguments = rest.iter().map(|w| w.to_lowercase()).collect();
    let mut command_with_arguments = command.clone();
    for word in &rest {
        command_with_arguments.push(' ');
        command_with_arguments.push_str(word);
    }

    CommandTokens {
        raw: raw.to_string(),
        command,
        arguments,
        command_with_arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn take_all() {
        let t = tokenize("take all");
        assert_eq!(t.command(), "take");
        assert_eq!(t.arguments(), ["all"]);
        assert_eq!(t.command_with_arguments(), "take all");
        assert_eq!(t.tokens(), vec!["take", "all"]);
    }

    #[test]
    fn command_is_folded_but_arguments_keep_case_in_phrase() {
        let t = tokenize("TAKE Coin Purse");
        assert_eq!(t.command(), "take");
        assert_eq!(t.arguments(), ["coin", "purse"]);
        assert_eq!(t.command_with_arguments(), "take Coin Purse");
        assert_eq!(t.raw(), "TAKE Coin Purse");
        assert_eq!(t.arguments_text(), "coin purse");
    }

    #[test]
    fn single_word() {
        let t = tokenize("North");
        assert_eq!(t.command(), "north");
        assert!(t.arguments().is_empty());
        assert_eq!(t.tokens(), vec!["north"]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let t = tokenize("  look  self \n");
        assert_eq!(t.command(), "look");
        assert_eq!(t.arguments(), ["self"]);
        assert_eq!(t.command_with_arguments(), "look self");
        assert_eq!(t.raw(), "look  self");
    }

    #[test]
    fn empty_input_is_degenerate() {
        for input in ["", "   ", "\n"] {
            let t = tokenize(input);
            assert!(t.is_empty());
            assert!(t.arguments().is_empty());
            assert_eq!(t.command_with_arguments(), "");
            assert!(t.tokens().is_empty());
        }
    }

    proptest! {
        #[test]
        fn tokens_are_command_then_arguments(words in prop::collection::vec("[A-Za-z]{1,8}", 1..6)) {
            let line = words.join(" ");
            let t = tokenize(&line);
            prop_assert_eq!(t.command(), words[0].to_lowercase());
            prop_assert_eq!(t.arguments().len(), words.len() - 1);
            prop_assert_eq!(t.tokens().len(), words.len());
            prop_assert!(t.arguments().iter().all(|a| *a == a.to_lowercase()));
            prop_assert_eq!(t.command_with_arguments().len(), line.len());
        }
    }
}
