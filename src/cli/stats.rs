use colored::Colorize;

use crate::{
    Res, config, error,
    management::CredentialsManager,
    spotify::{self, ApiError, SpotifyClient},
    types::{Credentials, TimeRange},
    ui, utils,
};

/// Default command: prints the statistics dashboard.
///
/// Missing configuration is reported before any network call. Spotify
/// failures and everything else are reported on one line each.
pub async fn stats(global: bool) {
    let Some(credentials) = CredentialsManager::default_location().load().await else {
        error!(
            "Error: Configuration not found.\nPlease run: {}",
            "spotistats --setup".yellow()
        );
    };

    if let Err(e) = show_dashboard(credentials, TimeRange::from_global(global)).await {
        match e.downcast_ref::<ApiError>() {
            Some(api_error) => error!("Spotify API Error: {}", api_error),
            None => error!("An unexpected error occurred: {}", e),
        }
    }
}

pub async fn show_dashboard(credentials: Credentials, time_range: TimeRange) -> Res<()> {
    let tokens = spotify::auth::authorize(&credentials, &config::token_cache_file()).await?;
    let mut client = SpotifyClient::new(credentials, tokens);

    let pb = utils::spinner("Fetching your Spotify stats...");
    let result = spotify::fetch_dashboard(&mut client, time_range).await;
    pb.finish_and_clear();

    ui::display_dashboard(&result?);
    Ok(())
}
