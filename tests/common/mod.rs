#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
};
use serde_json::{Value, json};
use statify::{config::Config, server, spotify::SpotifyClient};
use tokio::net::TcpListener;

/// A request as seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (k.to_string(), v.to_string())
            })
            .collect()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct StubState {
    responder: Responder,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process stand-in for the Spotify hosts.
pub struct Upstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Upstream {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            responder: Arc::new(responder),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(record).with_state(state);

        Self {
            base_url: serve(app).await,
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    };
    let (status, body) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub fn config(accounts_base_url: &str, api_base_url: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("CLIENT_ID", "abc".to_string()),
        ("CLIENT_SECRET", "s3cr3t".to_string()),
        ("REDIRECT_URI", "https://app.example/cb".to_string()),
        ("SPOTIFY_ACCOUNTS_BASE_URL", accounts_base_url.to_string()),
        ("SPOTIFY_API_BASE_URL", api_base_url.to_string()),
        ("FRONTEND_URL", "http://localhost:5173".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn client(accounts_base_url: &str, api_base_url: &str) -> SpotifyClient {
    SpotifyClient::new(Arc::new(config(accounts_base_url, api_base_url)))
}

/// Starts the proxy itself and returns its base URL.
pub async fn spawn_app(client: SpotifyClient) -> String {
    serve(server::router(client).unwrap()).await
}

/// HTTP client that reports redirects instead of following them.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

pub fn ok(body: Value) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

// Upstream documents, shaped like real Web API responses.

pub fn image_json() -> Value {
    json!({
        "url": "https://i.scdn.co/image/ab67616d0000b273",
        "height": 640,
        "width": 640
    })
}

pub fn user_json() -> Value {
    json!({
        "country": "SE",
        "display_name": "Ada",
        "email": "ada@example.com",
        "followers": { "href": null, "total": 42 },
        "href": "https://api.spotify.com/v1/users/ada",
        "id": "ada",
        "images": [image_json()],
        "type": "user",
        "uri": "spotify:user:ada"
    })
}

pub fn simplified_artist_json(id: &str) -> Value {
    json!({
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{}", id) },
        "href": format!("https://api.spotify.com/v1/artists/{}", id),
        "id": id,
        "name": format!("Artist {}", id),
        "type": "artist",
        "uri": format!("spotify:artist:{}", id)
    })
}

pub fn artist_json(id: &str) -> Value {
    let mut artist = simplified_artist_json(id);
    let object = artist.as_object_mut().unwrap();
    object.insert("followers".into(), json!({ "href": null, "total": 1000 }));
    object.insert("genres".into(), json!(["synthpop", "indie"]));
    object.insert("images".into(), json!([image_json()]));
    object.insert("popularity".into(), json!(71));
    artist
}

pub fn album_json() -> Value {
    json!({
        "album_type": "album",
        "artists": [simplified_artist_json("a1")],
        "available_markets": ["SE", "US"],
        "external_urls": { "spotify": "https://open.spotify.com/album/al1" },
        "href": "https://api.spotify.com/v1/albums/al1",
        "id": "al1",
        "images": [image_json(), { "url": "https://i.scdn.co/image/small", "height": null, "width": null }],
        "name": "First Album",
        "release_date": "2019-05",
        "release_date_precision": "month",
        "total_tracks": 11,
        "type": "album",
        "uri": "spotify:album:al1"
    })
}

pub fn track_json(id: &str) -> Value {
    json!({
        "album": album_json(),
        "artists": [simplified_artist_json("a1")],
        "available_markets": ["SE"],
        "disc_number": 1,
        "duration_ms": 215_000,
        "explicit": false,
        "external_ids": { "isrc": "SEXXX1900001" },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
        "href": format!("https://api.spotify.com/v1/tracks/{}", id),
        "id": id,
        "is_local": false,
        "is_playable": true,
        "name": format!("Track {}", id),
        "popularity": 64,
        "preview_url": null,
        "track_number": 3,
        "type": "track",
        "uri": format!("spotify:track:{}", id)
    })
}

pub fn envelope(kind: &str, items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "href": format!("https://api.spotify.com/v1/me/top/{}?offset=0&limit=20", kind),
        "limit": 20,
        "next": null,
        "offset": 0,
        "previous": null,
        "total": total,
        "items": items
    })
}

/// Answers `/me/top/artists` and `/me/top/tracks` with one item each.
pub fn top_items_responder(req: &Recorded) -> (StatusCode, String) {
    match req.path.as_str() {
        "/me/top/artists" => ok(envelope("artists", vec![artist_json("a1")])),
        "/me/top/tracks" => ok(envelope("tracks", vec![track_json("t1")])),
        "/me" => ok(user_json()),
        _ => (StatusCode::NOT_FOUND, json!({ "error": "not found" }).to_string()),
    }
}
