use crate::{
    spotify::ApiError,
    types::{
        Artist, DashboardView, TimeRange, TopItemsResponse, Track, TrackEntry, UserProfile,
    },
};

/// Number of top artists and top tracks requested for the dashboard.
pub const TOP_ITEMS_LIMIT: u32 = 5;

/// The reads the dashboard needs.
///
/// [`crate::spotify::SpotifyClient`] implements it against the Web API; tests
/// substitute a recording fake.
#[allow(async_fn_in_trait)]
pub trait StatsApi {
    async fn current_user(&mut self) -> Result<UserProfile, ApiError>;

    async fn top_artists(
        &mut self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopItemsResponse<Artist>, ApiError>;

    async fn top_tracks(
        &mut self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopItemsResponse<Track>, ApiError>;
}

/// Issues the profile, top artists and top tracks calls, in that order, and
/// maps them into the dashboard view. The first failing call aborts.
pub async fn fetch_dashboard<A: StatsApi>(
    api: &mut A,
    time_range: TimeRange,
) -> Result<DashboardView, ApiError> {
    let user = api.current_user().await?;
    let top_artists = api.top_artists(time_range, TOP_ITEMS_LIMIT).await?;
    let top_tracks = api.top_tracks(time_range, TOP_ITEMS_LIMIT).await?;

    Ok(build_view(&user, top_artists.items, top_tracks.items, time_range))
}

pub fn build_view(
    user: &UserProfile,
    artists: Vec<Artist>,
    tracks: Vec<Track>,
    time_range: TimeRange,
) -> DashboardView {
    let display_name = match user.display_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if !user.id.is_empty() => user.id.clone(),
        _ => "Unknown".to_string(),
    };

    DashboardView {
        display_name,
        followers: user.followers.total,
        period: time_range.label().to_string(),
        artists: artists
            .into_iter()
            .take(TOP_ITEMS_LIMIT as usize)
            .map(|a| a.name)
            .collect(),
        tracks: tracks
            .into_iter()
            .take(TOP_ITEMS_LIMIT as usize)
            .map(|t| TrackEntry {
                name: t.name,
                artists: t.artists.into_iter().map(|a| a.name).collect(),
            })
            .collect(),
    }
}
