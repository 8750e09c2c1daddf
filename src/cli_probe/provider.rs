//! Agent CLI providers and where they usually live.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Agent CLIs AutoMaker can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CliProvider {
    Claude,
    Codex,
    Cursor,
}

impl CliProvider {
    pub const ALL: [CliProvider; 3] = [CliProvider::Claude, CliProvider::Codex, CliProvider::Cursor];

    /// Stable identifier used in configuration.
    pub fn id(&self) -> &'static str {
        match self {
            CliProvider::Claude => "claude",
            CliProvider::Codex => "codex",
            CliProvider::Cursor => "cursor",
        }
    }

    /// Executable name looked up on `PATH`.
    pub fn command(&self) -> &'static str {
        match self {
            CliProvider::Claude => "claude",
            CliProvider::Codex => "codex",
            CliProvider::Cursor => "cursor-agent",
        }
    }

    /// Environment variables holding an API key, checked in order.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            CliProvider::Claude => &["ANTHROPIC_API_KEY", "CLAUDE_CODE_OAUTH_TOKEN"],
            CliProvider::Codex => &["OPENAI_API_KEY"],
            CliProvider::Cursor => &["CURSOR_API_KEY"],
        }
    }

    /// Credential files written by each CLI's login flow, relative to home.
    pub fn credential_files(&self) -> &'static [&'static str] {
        match self {
            CliProvider::Claude => &[".claude/.credentials.json", ".claude.json"],
            CliProvider::Codex => &[".codex/auth.json"],
            CliProvider::Cursor => &[".cursor/cli-config.json"],
        }
    }

    /// Install locations checked when the command is not on `PATH`.
    pub fn known_locations(&self, home: Option<&Path>) -> Vec<PathBuf> {
        let command = self.command();
        let mut locations = Vec::new();

        if let Some(home) = home {
            locations.push(home.join(".local/bin").join(command));
            if *self == CliProvider::Claude {
                locations.push(home.join(".claude/local").join(command));
            }
            locations.push(home.join(".npm-global/bin").join(command));
        }

        #[cfg(unix)]
        {
            locations.push(PathBuf::from("/usr/local/bin").join(command));
            locations.push(PathBuf::from("/opt/homebrew/bin").join(command));
        }

        #[cfg(windows)]
        {
            if let Some(appdata) = dirs::data_dir() {
                locations.push(appdata.join("npm").join(format!("{}.cmd", command)));
            }
        }

        locations
    }
}

impl std::str::FromStr for CliProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "claude" => Ok(CliProvider::Claude),
            "codex" => Ok(CliProvider::Codex),
            "cursor" | "cursor-agent" => Ok(CliProvider::Cursor),
            other => Err(format!("unknown CLI provider '{}'", other)),
        }
    }
}

impl std::fmt::Display for CliProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!("claude".parse::<CliProvider>(), Ok(CliProvider::Claude));
        assert_eq!("Codex".parse::<CliProvider>(), Ok(CliProvider::Codex));
        assert_eq!("cursor-agent".parse::<CliProvider>(), Ok(CliProvider::Cursor));
        assert!("gemini".parse::<CliProvider>().is_err());
    }

    #[test]
    fn test_known_locations_include_home() {
        let home = Path::new("/home/dev");
        let locations = CliProvider::Claude.known_locations(Some(home));
        assert!(locations.contains(&PathBuf::from("/home/dev/.local/bin/claude")));
        assert!(locations.contains(&PathBuf::from("/home/dev/.claude/local/claude")));

        let codex = CliProvider::Codex.known_locations(Some(home));
        assert!(!codex.iter().any(|p| p.starts_with("/home/dev/.claude")));
    }
}
