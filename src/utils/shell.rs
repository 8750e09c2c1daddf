//! Shell quoting helpers for logging and parsing command strings.

/// Quote a single argument so a logged command line can be pasted into a shell.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }

    let plain = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '@' | ','));
    if plain {
        return s.to_string();
    }

    // abc's -> 'abc'"'"'s'
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}

/// Render a program and its arguments as one shell-safe line.
pub fn command_line<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    std::iter::once(quote(program))
        .chain(args.iter().map(|a| quote(a.as_ref())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a configured command string (e.g. `npx @openai/codex`) into program and arguments.
/// Returns `None` for blank or unparsable input.
pub fn split_command(s: &str) -> Option<(String, Vec<String>)> {
    let mut words = match shell_words::split(s) {
        Ok(words) => words,
        Err(e) => {
            tracing::debug!("Failed to split command '{}': {}", s, e);
            return None;
        }
    };

    if words.is_empty() {
        return None;
    }
    let program = words.remove(0);
    Some((program, words))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("simple"), "simple");
        assert_eq!(quote("/usr/bin/claude"), "/usr/bin/claude");
        assert_eq!(quote("with space"), "'with space'");
        assert_eq!(quote("it's"), "'it'\"'\"'s'");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("$var"), "'$var'");
    }

    #[test]
    fn test_command_line() {
        assert_eq!(
            command_line("claude", &["-p", "hello world"]),
            "claude -p 'hello world'"
        );
        let empty: [&str; 0] = [];
        assert_eq!(command_line("codex", &empty), "codex");
    }

    #[test]
    fn test_split_command() {
        let (program, args) = split_command("npx '@openai/codex' --yes").unwrap();
        assert_eq!(program, "npx");
        assert_eq!(args, vec!["@openai/codex", "--yes"]);

        assert!(split_command("   ").is_none());
        assert!(split_command("unterminated 'quote").is_none());
    }
}
