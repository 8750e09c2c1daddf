//! Authentication status of agent CLIs.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli_probe::provider::CliProvider;

/// How a CLI is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum AuthMethod {
    /// An API key environment variable is set.
    ApiKeyEnv { variable: String },
    /// A login credential file exists.
    CredentialsFile { path: PathBuf },
    None,
}

/// Authentication status for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub authenticated: bool,
    pub method: AuthMethod,
}

impl AuthStatus {
    fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            method: AuthMethod::None,
        }
    }
}

/// Check authentication for `provider`.
///
/// API key variables win over credential files. `env` looks up environment
/// variables; blank values count as unset.
pub fn check_auth<F>(provider: CliProvider, env: F, home: Option<&Path>) -> AuthStatus
where
    F: Fn(&str) -> Option<String>,
{
    for variable in provider.api_key_env_vars() {
        if env(variable).is_some_and(|v| !v.trim().is_empty()) {
            return AuthStatus {
                authenticated: true,
                method: AuthMethod::ApiKeyEnv {
                    variable: variable.to_string(),
                },
            };
        }
    }

    if let Some(home) = home {
        for file in provider.credential_files() {
            let path = home.join(file);
            if path.is_file() {
                return AuthStatus {
                    authenticated: true,
                    method: AuthMethod::CredentialsFile { path },
                };
            }
        }
    }

    AuthStatus::unauthenticated()
}

/// Check authentication against the real environment and home directory.
pub fn check_auth_from_env(provider: CliProvider) -> AuthStatus {
    check_auth(
        provider,
        |key| std::env::var(key).ok(),
        dirs::home_dir().as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_api_key_env() {
        let status = check_auth(
            CliProvider::Claude,
            |key| (key == "ANTHROPIC_API_KEY").then(|| "sk-test".to_string()),
            None,
        );
        assert!(status.authenticated);
        assert_eq!(
            status.method,
            AuthMethod::ApiKeyEnv {
                variable: "ANTHROPIC_API_KEY".to_string()
            }
        );
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let status = check_auth(CliProvider::Codex, |_| Some("  ".to_string()), None);
        assert!(!status.authenticated);
        assert_eq!(status.method, AuthMethod::None);
    }

    #[test]
    fn test_credentials_file() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(home.path().join(".codex")).unwrap();
        std::fs::write(home.path().join(".codex/auth.json"), "{}").unwrap();

        let status = check_auth(CliProvider::Codex, no_env, Some(home.path()));
        assert!(status.authenticated);
        assert_eq!(
            status.method,
            AuthMethod::CredentialsFile {
                path: home.path().join(".codex/auth.json")
            }
        );

        // Another provider's credentials do not count.
        let cursor = check_auth(CliProvider::Cursor, no_env, Some(home.path()));
        assert!(!cursor.authenticated);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AuthStatus {
            authenticated: true,
            method: AuthMethod::ApiKeyEnv {
                variable: "OPENAI_API_KEY".to_string(),
            },
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "authenticated": true,
                "method": {"type": "apiKeyEnv", "variable": "OPENAI_API_KEY"}
            })
        );
    }
}
