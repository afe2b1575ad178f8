use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the API deployments the dashboard can read from.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development server.
    Local,
    /// Hosted read-only API.
    #[default]
    Production,
    /// Any other base URL, supplied by flag or config file.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the API base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:3000".to_string(),
            Environment::Production => "https://sundial-fe-interview.vercel.app".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
