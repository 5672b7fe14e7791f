use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use crate::{config, types::Credentials};

#[derive(Debug)]
pub enum CredentialsError {
    Incomplete,
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::Incomplete => {
                write!(f, "Client ID and Client Secret are required!")
            }
            CredentialsError::IoError(e) => write!(f, "{}", e),
            CredentialsError::SerdeError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CredentialsError {}

impl From<Error> for CredentialsError {
    fn from(err: Error) -> Self {
        CredentialsError::IoError(err)
    }
}

/// Reads and writes the credentials file.
pub struct CredentialsManager {
    path: PathBuf,
}

impl CredentialsManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        Self::new(config::config_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored credentials.
    ///
    /// A missing file, unreadable JSON and a record without id or secret all
    /// come back as `None`; callers only need to know whether setup ran.
    pub async fn load(&self) -> Option<Credentials> {
        let content = async_fs::read_to_string(&self.path).await.ok()?;
        let credentials: Credentials = serde_json::from_str(&content).ok()?;
        credentials.is_complete().then_some(credentials)
    }

    /// Overwrites the credentials file.
    ///
    /// Nothing is written when the client id or secret is blank.
    pub async fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        if !credentials.is_complete() {
            return Err(CredentialsError::Incomplete);
        }

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json =
            serde_json::to_string_pretty(credentials).map_err(CredentialsError::SerdeError)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}
