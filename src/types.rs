use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::Error;

// Literal tags. Each accepts exactly one value for the `type` field.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtistType {
    #[default]
    #[serde(rename = "artist")]
    Artist,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlbumObjectType {
    #[default]
    #[serde(rename = "album")]
    Album,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackType {
    #[default]
    #[serde(rename = "track")]
    Track,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[default]
    #[serde(rename = "user")]
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDatePrecision {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionReason {
    Market,
    Product,
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    // Omitted by the API for some art sizes.
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub href: Option<String>,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    pub reason: RestrictionReason,
}

/// Artist as embedded in tracks and albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ArtistType,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_urls: Option<HashMap<String, String>>,
}

/// Full artist object.
///
/// The extra fields are optional so the same type decodes both the full
/// object returned by `/me/top/artists` and the simplified form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub href: String,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ArtistType,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_urls: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<Followers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
}

/// Album as embedded in a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub album_type: AlbumType,
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_markets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_urls: Option<HashMap<String, String>>,
    pub href: String,
    pub id: String,
    pub images: Vec<Image>,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: ReleaseDatePrecision,
    pub total_tracks: u32,
    #[serde(rename = "type")]
    pub kind: AlbumObjectType,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_playable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restriction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub album: SimplifiedAlbum,
    pub artists: Vec<SimplifiedArtist>,
    pub available_markets: Vec<String>,
    pub disc_number: u32,
    pub duration_ms: u64,
    pub explicit: bool,
    pub external_urls: HashMap<String, String>,
    pub href: String,
    pub id: String,
    pub is_local: bool,
    pub is_playable: bool,
    pub name: String,
    pub popularity: u32,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub track_number: u32,
    #[serde(rename = "type")]
    pub kind: TrackType,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restriction>,
}

/// Profile of the current user, as returned by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub country: String,
    pub display_name: String,
    pub email: String,
    pub followers: Followers,
    pub href: String,
    pub id: String,
    pub images: Vec<Image>,
    #[serde(rename = "type")]
    pub kind: UserType,
    pub uri: String,
}

/// Body of a successful authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Which list a top-items request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Artists,
    Tracks,
}

impl ItemKind {
    /// Path segment used in `/me/top/{kind}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Artists => "artists",
            ItemKind::Tracks => "tracks",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    LongTerm,
    #[default]
    MediumTerm,
    ShortTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LongTerm => "long_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::ShortTerm => "short_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long_term" => Ok(TimeRange::LongTerm),
            "medium_term" => Ok(TimeRange::MediumTerm),
            "short_term" => Ok(TimeRange::ShortTerm),
            other => Err(Error::InvalidParams(format!(
                "time_range must be one of long_term, medium_term, short_term, got '{}'",
                other
            ))),
        }
    }
}

/// Query constraints for a top-items request.
///
/// Serializes to exactly the three query parameters the API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopItemsParams {
    pub limit: u32,
    pub time_range: TimeRange,
    pub offset: u32,
}

impl TopItemsParams {
    pub const MIN_LIMIT: u32 = 1;
    pub const MAX_LIMIT: u32 = 50;

    /// Builds validated parameters.
    ///
    /// Takes signed values so a negative offset coming from a query string is
    /// reported as a range violation rather than a parse failure.
    pub fn new(limit: i64, time_range: TimeRange, offset: i64) -> Result<Self, Error> {
        if limit < Self::MIN_LIMIT as i64 || limit > Self::MAX_LIMIT as i64 {
            return Err(Error::InvalidParams(format!(
                "limit must be between {} and {}, got {}",
                Self::MIN_LIMIT,
                Self::MAX_LIMIT,
                limit
            )));
        }
        let offset = u32::try_from(offset).map_err(|_| {
            Error::InvalidParams(format!(
                "offset must be a non-negative integer, got {}",
                offset
            ))
        })?;

        Ok(Self {
            limit: limit as u32,
            time_range,
            offset,
        })
    }

    /// Reads `limit`, `time_range` and `offset` from raw query parameters,
    /// falling back to the defaults for any that are absent.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, Error> {
        let defaults = Self::default();

        let limit = match query.get("limit") {
            Some(raw) => parse_integer("limit", raw)?,
            None => defaults.limit as i64,
        };
        let time_range = match query.get("time_range") {
            Some(raw) => raw.parse()?,
            None => defaults.time_range,
        };
        let offset = match query.get("offset") {
            Some(raw) => parse_integer("offset", raw)?,
            None => defaults.offset as i64,
        };

        Self::new(limit, time_range, offset)
    }
}

impl Default for TopItemsParams {
    fn default() -> Self {
        Self {
            limit: 20,
            time_range: TimeRange::MediumTerm,
            offset: 0,
        }
    }
}

fn parse_integer(name: &str, raw: &str) -> Result<i64, Error> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidParams(format!("{} must be an integer, got '{}'", name, raw)))
}

/// Paginated envelope around a list of top items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItemsResponse<T> {
    pub href: String,
    pub limit: u32,
    #[serde(default)]
    pub next: Option<String>,
    pub offset: u32,
    #[serde(default)]
    pub previous: Option<String>,
    pub total: u32,
    pub items: Vec<T>,
}

/// An entity that can be listed through `/me/top/{kind}`.
pub trait TopItem: DeserializeOwned + Send + 'static {
    const KIND: ItemKind;
}

impl TopItem for Artist {
    const KIND: ItemKind = ItemKind::Artists;
}

impl TopItem for Track {
    const KIND: ItemKind = ItemKind::Tracks;
}

/// A single top-items page whose kind is only known at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TopItemsPage {
    Artists(TopItemsResponse<Artist>),
    Tracks(TopItemsResponse<Track>),
}

/// Top artists and top tracks for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItems {
    pub top_artists: TopItemsResponse<Artist>,
    pub top_tracks: TopItemsResponse<Track>,
}
