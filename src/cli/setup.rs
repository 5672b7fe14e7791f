use colored::Colorize;
use dialoguer::{Input, Password};

use crate::{
    config, error,
    management::{CredentialsError, CredentialsManager},
    success,
    types::Credentials,
};

/// Interactive credential setup for `--setup`.
///
/// Exits with code 1 when the client id or secret is left empty.
pub async fn setup() {
    println!("{}", "SpotiStats Setup".cyan().bold());
    println!("Please enter your Spotify App credentials.");
    println!(
        "You can get these from {}",
        config::DEVELOPER_DASHBOARD_URL.cyan()
    );

    let (client_id, client_secret, redirect_uri) = match prompt_credentials() {
        Ok(answers) => answers,
        Err(e) => error!("Failed to read input. Err: {}", e),
    };

    let manager = CredentialsManager::default_location();
    match save_setup(&manager, &client_id, &client_secret, &redirect_uri).await {
        Ok(_) => success!("Configuration saved to {}", manager.path().display()),
        Err(CredentialsError::Incomplete) => {
            error!("Error: Client ID and Client Secret are required!")
        }
        Err(e) => error!("Failed to save configuration. Err: {}", e),
    }
}

/// Empty answers are accepted here so that `save_setup` decides what is
/// missing, the same way for every input source.
fn prompt_credentials() -> Result<(String, String, String), dialoguer::Error> {
    let client_id: String = Input::new()
        .with_prompt("Enter Client ID")
        .allow_empty(true)
        .interact_text()?;

    let client_secret: String = Password::new()
        .with_prompt("Enter Client Secret (hidden)")
        .allow_empty_password(true)
        .interact()?;

    let redirect_uri: String = Input::new()
        .with_prompt(format!(
            "Enter Redirect URI (default: {})",
            config::DEFAULT_REDIRECT_URI
        ))
        .allow_empty(true)
        .interact_text()?;

    Ok((client_id, client_secret, redirect_uri))
}

/// Trims the answers, defaults the redirect URI and saves the result.
///
/// An empty redirect URI becomes [`config::DEFAULT_REDIRECT_URI`]. Nothing is
/// written when the id or secret is empty.
pub async fn save_setup(
    manager: &CredentialsManager,
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
) -> Result<Credentials, CredentialsError> {
    let redirect_uri = match redirect_uri.trim() {
        "" => config::DEFAULT_REDIRECT_URI,
        uri => uri,
    };

    let credentials = Credentials {
        client_id: client_id.trim().to_string(),
        client_secret: client_secret.trim().to_string(),
        redirect_uri: redirect_uri.to_string(),
    };

    manager.save(&credentials).await?;
    Ok(credentials)
}
