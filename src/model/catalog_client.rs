//! Supabase (PostgREST) catalog client: select/insert/delete with field renaming

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

use super::content::{CatalogSection, Track};
use super::types::PlaylistItem;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog is not configured (set SUPABASE_URL and SUPABASE_ANON_KEY)")]
    NotConfigured,
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Catalog returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Invalid catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Row shape shared by the track tables
#[derive(Debug, Deserialize)]
struct TrackRow {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    /// Present on `recently_played`, where `id` is the play entry
    #[serde(default, deserialize_with = "opt_id_as_string")]
    track_id: Option<String>,
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    #[serde(default)]
    album_art: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

impl TrackRow {
    fn into_track(self, source: &str) -> Track {
        Track {
            id: self.id,
            track_id: self.track_id.filter(|id| !id.is_empty()),
            source: source.to_string(),
            title: self.title,
            artist: self.artist,
            album: self.album,
            album_art: self.album_art.filter(|s| !s.is_empty()),
            duration: self.duration.map(|d| d.max(0.0).round() as u32).unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistRow {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
    name: String,
}

/// Insert payload for `recently_played`
#[derive(Debug, Serialize)]
struct PlayRecord<'a> {
    track_id: &'a str,
    title: &'a str,
    artist: &'a str,
    album: &'a str,
    album_art: Option<&'a str>,
    duration: u32,
}

impl<'a> PlayRecord<'a> {
    fn for_track(track: &'a Track) -> Self {
        Self {
            track_id: track.catalog_id(),
            title: &track.title,
            artist: &track.artist,
            album: &track.album,
            album_art: track.album_art.as_deref(),
            duration: track.duration,
        }
    }
}

/// Postgres ids may be integers, uuids or text
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(RawId::deserialize(deserializer)?.into())
}

fn opt_id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn table_for(section: CatalogSection) -> (&'static str, &'static str) {
    match section {
        CatalogSection::RecentlyPlayed => ("recently_played", "played_at.desc"),
        CatalogSection::MadeForYou => ("made_for_you", "position.asc"),
        CatalogSection::PopularAlbums => ("popular_albums", "popularity.desc"),
    }
}

/// PostgREST client with API-key auth
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    rest_url: Option<String>,
    anon_key: String,
}

impl CatalogClient {
    pub fn new(http: Client, supabase_url: Option<&str>, anon_key: Option<&str>) -> Self {
        let rest_url = match (supabase_url, anon_key) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => {
                Some(format!("{}/rest/v1", url.trim_end_matches('/')))
            }
            _ => None,
        };
        Self {
            http,
            rest_url,
            anon_key: anon_key.unwrap_or_default().to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.rest_url.is_some()
    }

    fn request(&self, method: reqwest::Method, table: &str) -> Result<RequestBuilder, CatalogError> {
        let base = self.rest_url.as_ref().ok_or(CatalogError::NotConfigured)?;
        Ok(self
            .http
            .request(method, format!("{}/{}", base, table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key))
    }

    async fn send(request: RequestBuilder) -> Result<String, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Status { status, body });
        }
        Ok(body)
    }

    async fn select<R: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<R>, CatalogError> {
        tracing::debug!(table, ?query, "API: select");
        let request = self
            .request(reqwest::Method::GET, table)?
            .query(&[("select", "*")])
            .query(query);
        let result = Self::send(request)
            .await
            .and_then(|body| serde_json::from_str::<Vec<R>>(&body).map_err(CatalogError::from));
        match result {
            Ok(rows) => {
                tracing::debug!(table, rows = rows.len(), "API: select done");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(table, error = %e, "API: select failed");
                Err(e)
            }
        }
    }

    pub async fn get_section(&self, section: CatalogSection, limit: usize) -> Result<Vec<Track>, CatalogError> {
        let (table, order) = table_for(section);
        let rows: Vec<TrackRow> = self
            .select(table, &[("order", order.to_string()), ("limit", limit.to_string())])
            .await?;
        Ok(rows.into_iter().map(|row| row.into_track(table)).collect())
    }

    pub async fn get_playlists(&self) -> Result<Vec<PlaylistItem>, CatalogError> {
        let rows: Vec<PlaylistRow> = self
            .select("playlists", &[("order", "name.asc".to_string())])
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| PlaylistItem { id: r.id, name: r.name })
            .collect())
    }

    pub async fn get_playlist_tracks(&self, playlist_id: &str, limit: usize) -> Result<Vec<Track>, CatalogError> {
        let rows: Vec<TrackRow> = self
            .select(
                "playlist_tracks",
                &[
                    ("playlist_id", format!("eq.{}", playlist_id)),
                    ("order", "position.asc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.into_track("playlist_tracks")).collect())
    }

    /// Append a play to the recently played feed
    pub async fn record_play(&self, track: &Track) -> Result<(), CatalogError> {
        let track_id = track.catalog_id();
        tracing::debug!(track_id, "API: insert recently_played");
        let request = self
            .request(reqwest::Method::POST, "recently_played")?
            .header("Prefer", "return=minimal")
            .json(&PlayRecord::for_track(track));
        match Self::send(request).await {
            Ok(_) => {
                tracing::info!(track_id, "Play recorded");
                Ok(())
            }
            Err(e) => {
                tracing::error!(track_id, error = %e, "API: insert recently_played failed");
                Err(e)
            }
        }
    }

    pub async fn delete_recently_played(&self, id: &str) -> Result<(), CatalogError> {
        tracing::debug!(id, "API: delete recently_played");
        let request = self
            .request(reqwest::Method::DELETE, "recently_played")?
            .query(&[("id", format!("eq.{}", id))]);
        match Self::send(request).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(id, error = %e, "API: delete recently_played failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_renamed_into_tracks() {
        let body = r#"[
            {"id": 12, "title": "Intro", "artist": "The XX", "album": "xx", "album_art": "https://cdn/x.jpg", "duration": 127.6, "played_at": "2024-01-01T00:00:00Z"},
            {"id": "b7c1", "title": "Loose", "album_art": "", "duration": null}
        ]"#;
        let rows: Vec<TrackRow> = serde_json::from_str(body).unwrap();
        let tracks: Vec<Track> = rows.into_iter().map(|r| r.into_track("popular_albums")).collect();

        assert_eq!(tracks[0].id, "12");
        assert_eq!(tracks[0].source, "popular_albums");
        assert_eq!(tracks[0].track_id, None);
        assert_eq!(tracks[0].album_art.as_deref(), Some("https://cdn/x.jpg"));
        assert_eq!(tracks[0].duration, 128);

        assert_eq!(tracks[1].id, "b7c1");
        assert_eq!(tracks[1].artist, "");
        assert_eq!(tracks[1].album_art, None);
        assert_eq!(tracks[1].duration, 0);
    }

    #[test]
    fn replaying_a_recent_entry_records_the_catalog_track() {
        let body = r#"[{"id": 901, "track_id": "t-42", "title": "Song", "artist": "A", "album": "B", "album_art": "c.jpg", "duration": 200}]"#;
        let rows: Vec<TrackRow> = serde_json::from_str(body).unwrap();
        let track = rows.into_iter().next().unwrap().into_track("recently_played");
        assert_eq!(track.id, "901");

        let value = serde_json::to_value(PlayRecord::for_track(&track)).unwrap();
        assert_eq!(value["track_id"], "t-42");
        assert_eq!(value["album_art"], "c.jpg");
        assert_eq!(value["duration"], 200);
    }

    #[test]
    fn rows_without_track_id_record_their_own_id() {
        let body = r#"[{"id": 3, "track_id": null, "title": "Song"}, {"id": 4, "track_id": 77, "title": "Other"}]"#;
        let rows: Vec<TrackRow> = serde_json::from_str(body).unwrap();
        let tracks: Vec<Track> = rows.into_iter().map(|r| r.into_track("made_for_you")).collect();

        assert_eq!(PlayRecord::for_track(&tracks[0]).track_id, "3");
        assert_eq!(PlayRecord::for_track(&tracks[1]).track_id, "77");
    }

    #[test]
    fn rest_url_requires_both_settings() {
        let http = Client::new();
        assert!(!CatalogClient::new(http.clone(), Some("https://x.supabase.co"), None).is_configured());
        assert!(!CatalogClient::new(http.clone(), Some(""), Some("key")).is_configured());

        let client = CatalogClient::new(http, Some("https://x.supabase.co/"), Some("key"));
        assert_eq!(client.rest_url.as_deref(), Some("https://x.supabase.co/rest/v1"));
    }

    #[tokio::test]
    async fn unconfigured_client_fails_fast() {
        let client = CatalogClient::new(Client::new(), None, None);
        let err = client.get_section(CatalogSection::MadeForYou, 6).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured));
    }
}
