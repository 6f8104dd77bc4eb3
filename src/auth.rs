use std::env;

const USERNAME_VAR: &str = "QUIZ_USERNAME";
const PASSWORD_VAR: &str = "QUIZ_PASSWORD";

/// Credential check supplied to the login gate.
pub trait Authenticator {
    fn check_credentials(&self, username: &str, password: &str) -> bool;
}

/// Accepts a single username/password pair read from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvAuthenticator {
    username: String,
    password: String,
}

impl EnvAuthenticator {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Reads `QUIZ_USERNAME` and `QUIZ_PASSWORD`. Errors name the missing variable.
    pub fn from_env() -> Result<Self, String> {
        let username = env::var(USERNAME_VAR).map_err(|err| format!("{USERNAME_VAR}: {err}"))?;
        let password = env::var(PASSWORD_VAR).map_err(|err| format!("{PASSWORD_VAR}: {err}"))?;
        Ok(Self::new(username, password))
    }

    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl Authenticator for EnvAuthenticator {
    fn check_credentials(&self, username: &str, password: &str) -> bool {
        self.is_configured() && username.trim() == self.username && password == self.password
    }
}
