use tracing::debug;

use crate::{
    error::Result,
    types::{
        Artist, ItemKind, TopItem, TopItems, TopItemsPage, TopItemsParams, TopItemsResponse,
        Track, User,
    },
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the profile of the user owning `token`.
    ///
    /// The token is forwarded as is; its freshness and scope are Spotify's
    /// business.
    pub async fn fetch_profile(&self, token: &str) -> Result<User> {
        self.get_json::<User, ()>("/me", token, None).await
    }

    /// Retrieves one page of the user's top artists or top tracks.
    ///
    /// The kind is picked by the item type:
    ///
    /// ```
    /// let artists = client.fetch_top_items::<Artist>(token, &params).await?;
    /// let tracks = client.fetch_top_items::<Track>(token, &params).await?;
    /// ```
    ///
    /// `limit`, `time_range` and `offset` are sent exactly as they appear in
    /// `params`, and nothing else is added to the query string.
    pub async fn fetch_top_items<T: TopItem>(
        &self,
        token: &str,
        params: &TopItemsParams,
    ) -> Result<TopItemsResponse<T>> {
        let path = format!("/me/top/{}", T::KIND);
        self.get_json(&path, token, Some(params)).await
    }

    /// Same as [`fetch_top_items`](SpotifyClient::fetch_top_items) for a kind
    /// chosen at runtime.
    pub async fn fetch_top_items_kind(
        &self,
        token: &str,
        kind: ItemKind,
        params: &TopItemsParams,
    ) -> Result<TopItemsPage> {
        Ok(match kind {
            ItemKind::Artists => TopItemsPage::Artists(self.fetch_top_items(token, params).await?),
            ItemKind::Tracks => TopItemsPage::Tracks(self.fetch_top_items(token, params).await?),
        })
    }

    /// Fetches top artists and top tracks concurrently.
    ///
    /// Both requests are in flight at the same time; the aggregate is only
    /// produced once both have succeeded. The first failure is returned and
    /// the other request is dropped.
    pub async fn fetch_all_top_items(
        &self,
        token: &str,
        params: &TopItemsParams,
    ) -> Result<TopItems> {
        let (top_artists, top_tracks) = tokio::try_join!(
            self.fetch_top_items::<Artist>(token, params),
            self.fetch_top_items::<Track>(token, params),
        )?;

        debug!(
            "Fetched {} top artists and {} top tracks",
            top_artists.items.len(),
            top_tracks.items.len()
        );

        Ok(TopItems {
            top_artists,
            top_tracks,
        })
    }
}
