use crate::VitalsError;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub user_id: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, VitalsError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, VitalsError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("VITALS_API_KEY")
            .ok_or_else(|| VitalsError::Config("VITALS_API_KEY missing".into()))?;
        let user_id = get("VITALS_USER_ID")
            .ok_or_else(|| VitalsError::Config("VITALS_USER_ID missing".into()))?;
        let base_url =
            get("VITALS_BASE_URL").unwrap_or_else(|| "https://api.vitals.example.com".into());
        Ok(Self {
            api_key: SecretString::new(api.into()),
            user_id,
            base_url,
        })
    }
}
