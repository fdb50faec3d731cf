use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use community_atlas::data::Coordinate;
use community_atlas::error::Error;
use community_atlas::geocoding::Geocoder;
use community_atlas::submission::CommunityDraft;

/// Answers a single HTTP request with `status` and `body`, returning the raw request head.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let (endpoint, handle) = serve_once_timed(status, body).await;
    let handle = tokio::spawn(async move { handle.await.unwrap().0 });
    (endpoint, handle)
}

/// Like `serve_once`, also reporting when the connection was accepted.
async fn serve_once_timed(
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<(String, Instant)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/search", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let accepted = Instant::now();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        (String::from_utf8_lossy(&request).into_owned(), accepted)
    });

    (endpoint, handle)
}

fn geocoder(endpoint: &str) -> Geocoder {
    Geocoder::new(endpoint, "atlas-tests/1.0", Duration::ZERO)
}

#[tokio::test]
async fn first_match_is_returned() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"[{"lat":"-34.9011","lon":"-56.1645","display_name":"Montevideo, Uruguay"},
            {"lat":"0","lon":"0"}]"#,
    )
    .await;

    let found = geocoder(&endpoint).resolve(Some("Montevideo"), "Uruguay").await;
    assert_eq!(found, Some(Coordinate::new(-34.9011, -56.1645)));

    let request = server.await.unwrap();
    assert!(request
        .starts_with("GET /search?city=Montevideo&country=Uruguay&format=json&limit=1 "));
    assert!(request.to_ascii_lowercase().contains("user-agent: atlas-tests/1.0"));
}

#[tokio::test]
async fn empty_result_set_is_not_found() {
    let (endpoint, server) = serve_once("200 OK", "[]").await;
    let result = geocoder(&endpoint).lookup(Some("Atlantis"), "Nowhere").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn server_error_collapses_to_none() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "{}").await;
    let geocoder = geocoder(&endpoint);
    assert!(geocoder.resolve(None, "Peru").await.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_collapses_to_none() {
    let (endpoint, server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
    assert!(geocoder(&endpoint).resolve(Some("Lima"), "Peru").await.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn unparsable_coordinates_collapse_to_none() {
    let (endpoint, server) = serve_once("200 OK", r#"[{"lat":"north","lon":"-56.1"}]"#).await;
    let result = geocoder(&endpoint).lookup(Some("Lima"), "Peru").await;
    assert!(matches!(result, Err(Error::InvalidCoordinates(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_collapses_to_none() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/search", listener.local_addr().unwrap());
    drop(listener);

    assert!(geocoder(&endpoint).resolve(Some("Lima"), "Peru").await.is_none());
}

#[tokio::test]
async fn draft_coordinates_are_filled_from_the_geocoder() {
    let (endpoint, server) = serve_once("200 OK", r#"[{"lat":"-12.0464","lon":"-77.0428"}]"#).await;

    let mut draft = CommunityDraft {
        name: "ETH Lima".into(),
        country: "Peru".into(),
        city: "Lima".into(),
        ..CommunityDraft::default()
    };
    let coordinate = draft.fill_coordinates(&geocoder(&endpoint)).await.unwrap();
    assert_eq!(coordinate, Coordinate::new(-12.0464, -77.0428));
    assert_eq!(draft.coordinates().unwrap(), Some(coordinate));
    server.await.unwrap();
}

#[tokio::test]
async fn draft_without_city_is_not_sent() {
    let mut draft = CommunityDraft {
        name: "ETH Peru".into(),
        country: "Peru".into(),
        ..CommunityDraft::default()
    };
    let result = draft
        .fill_coordinates(&geocoder("http://127.0.0.1:9/search"))
        .await;
    assert!(matches!(result, Err(Error::MissingField("city"))));
}

#[tokio::test]
async fn request_waits_out_the_courtesy_delay() {
    let delay = Duration::from_millis(200);
    let (endpoint, server) = serve_once_timed("200 OK", r#"[{"lat":"1.5","lon":"2.5"}]"#).await;
    let geocoder = Geocoder::new(endpoint, "atlas-tests/1.0", delay);

    let start = Instant::now();
    let found = geocoder.resolve(None, "Peru").await;
    assert_eq!(found, Some(Coordinate::new(1.5, 2.5)));

    let (_, accepted) = server.await.unwrap();
    assert!(accepted.duration_since(start) >= delay);
    assert!(start.elapsed() >= delay);
}
