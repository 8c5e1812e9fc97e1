use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use skell::client::{ClientConfig, Result, SkellClient, SkellError, Transport};
use skell::models::{Language, WordSketchKind};

/// Transport replaying canned bodies in order and recording requested URLs.
/// Once the canned bodies run out every request fails.
#[derive(Clone, Default)]
struct MockTransport {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    fn with_responses(bodies: &[&str]) -> Self {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .unwrap()
            .extend(bodies.iter().map(|body| body.to_string()));
        transport
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SkellError::Transport("connection refused".to_string()))
    }
}

fn client_with(bodies: &[&str]) -> (SkellClient<MockTransport>, MockTransport) {
    let transport = MockTransport::with_responses(bodies);
    let config = ClientConfig {
        base_url: "http://skell.test/api".to_string(),
        ..ClientConfig::default()
    };
    (
        SkellClient::with_transport(transport.clone(), config),
        transport,
    )
}

const LINES: &str = r#"{
    "Lines": [
        {
            "Left": [{"Str": "It was a "}, {"Str": "very "}],
            "Kwic": [{"Str": "good"}],
            "Right": [{"Str": " day"}, {"Str": "."}]
        },
        {
            "Left": [],
            "Kwic": [{"Str": "Good"}],
            "Right": [{"Str": " morning!"}]
        }
    ]
}"#;

const SKETCH: &str = r#"{
    "GramRels": [
        {
            "Name": "nouns modified by \"good\"",
            "Words": [
                {"Word": "idea", "Lempos": "idea-n", "Cm": "good idea"},
                {"Word": "news", "Lempos": "news-n", "Cm": "good news"}
            ]
        },
        {
            "Name": "verbs before \"good\"",
            "Words": [
                {"Word": "look", "Lempos": "look-v"}
            ]
        },
        {
            "Words": []
        }
    ]
}"#;

#[tokio::test]
async fn test_examples_join_line_parts() {
    let (client, transport) = client_with(&[LINES]);

    let sentences = client.get_examples("good").await.unwrap();

    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].left(), "It was a very ");
    assert_eq!(sentences[0].kwic(), "good");
    assert_eq!(sentences[0].right(), " day.");
    assert_eq!(sentences[0].text(), "It was a very good day.");
    assert_eq!(sentences[1].text(), "Good morning!");
    assert_eq!(
        transport.requests(),
        vec!["http://skell.test/api/concordance?query=good&lang=English&format=json"]
    );
}

#[tokio::test]
async fn test_examples_are_memoized_per_word() {
    // Only one body is available; a second network call would fail
    let (client, transport) = client_with(&[LINES]);

    let first = client.get_examples("good").await.unwrap();
    let second = client.get_examples("good").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(client.cached_words(), 1);

    let err = client.get_examples("bad").await.unwrap_err();
    assert!(matches!(err, SkellError::Transport(_)));
    assert_eq!(client.cached_words(), 1);
}

#[tokio::test]
async fn test_language_change_keeps_cached_examples() {
    let (mut client, transport) = client_with(&[LINES, r#"{"Lines": []}"#]);

    client.get_examples("good").await.unwrap();
    client.set_language(Language::German);
    let cached = client.get_examples("good").await.unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(transport.requests().len(), 1);

    client.clear_cache();
    let refetched = client.get_examples("good").await.unwrap();
    assert!(refetched.is_empty());
    assert!(transport.requests()[1].contains("lang=German"));
}

#[tokio::test]
async fn test_examples_missing_lines_is_empty() {
    let (client, _) = client_with(&["{}"]);
    assert!(client.get_examples("good").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let (client, _) = client_with(&["<html>Service unavailable</html>"]);

    let err = client.get_similar_words("good").await.unwrap_err();
    assert!(matches!(err, SkellError::Decode(_)));
}

#[tokio::test]
async fn test_word_sketch_builds_relation_tree() {
    let (client, transport) = client_with(&[SKETCH]);

    let sketch = client
        .get_word_sketch("good", Some(WordSketchKind::Adjective))
        .await
        .unwrap();

    assert_eq!(
        transport.requests(),
        vec!["http://skell.test/api/wordsketch?lang=English&query=good&format=json&lpos=-j"]
    );
    assert_eq!(sketch.headword(), "good");
    assert_eq!(sketch.kind(), Some(WordSketchKind::Adjective));

    let descriptions: Vec<&str> = sketch.relations().map(|r| r.get().description()).collect();
    assert_eq!(
        descriptions,
        vec!["nouns modified by \"good\"", "verbs before \"good\"", ""]
    );

    let look = sketch.relation(1).unwrap().collocations().next().unwrap();
    assert_eq!(look.word(), "look");
    assert_eq!(look.lemma_pos(), "look-v");
    assert_eq!(look.pair_key(), "");
}

#[tokio::test]
async fn test_word_sketch_collocations_point_to_their_relation() {
    let (client, _) = client_with(&[SKETCH]);

    let sketch = client.get_word_sketch("good", None).await.unwrap();

    for (index, relation) in sketch.relations().enumerate() {
        assert!(std::ptr::eq(relation.word_sketch(), &sketch));
        for collocation in relation.collocations() {
            assert!(std::ptr::eq(
                collocation.relation().get(),
                &*sketch.relation(index).unwrap()
            ));
            assert_eq!(collocation.relation_index(), index);
        }
    }
    assert_eq!(sketch.collocations().count(), 3);
}

#[tokio::test]
async fn test_word_sketch_empty_relations() {
    let (client, transport) = client_with(&[r#"{"GramRels": []}"#]);

    let sketch = client.get_word_sketch("xyzzy", None).await.unwrap();

    assert!(sketch.is_empty());
    assert_eq!(sketch.relations().len(), 0);
    assert!(!transport.requests()[0].contains("lpos"));
}

#[tokio::test]
async fn test_concordances_for_collocation_url() {
    let (client, transport) = client_with(&[SKETCH, LINES]);

    let sketch = client
        .get_word_sketch("good", Some(WordSketchKind::Adjective))
        .await
        .unwrap();
    let idea = sketch.collocations().next().unwrap();

    let sentences = client.get_concordances_for_collocation(idea).await.unwrap();

    assert_eq!(sentences.len(), 2);
    assert_eq!(
        transport.requests()[1],
        "http://skell.test/api/wordsketch_concordance?headword=good-j&lang=English\
         &coll=idea-n&gramrel=nouns%20modified%20by%20%22good%22&format=json"
    );
}

#[tokio::test]
async fn test_concordances_require_sketch_kind() {
    let (client, transport) = client_with(&[SKETCH]);

    let sketch = client.get_word_sketch("good", None).await.unwrap();
    let idea = sketch.collocations().next().unwrap();

    let err = client
        .get_concordances_for_collocation(idea)
        .await
        .unwrap_err();
    assert!(matches!(err, SkellError::MissingKind(ref word) if word == "good"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_similar_words_in_order() {
    let (client, transport) = client_with(&[r#"{"Words":[{"Word":"great"},{"Word":"fine"}]}"#]);

    let words = client.get_similar_words("good").await.unwrap();

    assert_eq!(words, vec!["great".to_string(), "fine".to_string()]);
    assert_eq!(
        transport.requests(),
        vec!["http://skell.test/api/thesaurus?lang=English&query=good&format=json"]
    );
}

#[tokio::test]
async fn test_similar_words_skip_entries_without_word() {
    let (client, _) = client_with(&[
        r#"{"Words":[{"Score": 0.4},{"Word":"decent"},{"Word":null}]}"#,
    ]);

    let words = client.get_similar_words("good").await.unwrap();
    assert_eq!(words, vec!["decent".to_string()]);
}

#[tokio::test]
async fn test_examples_cache_shared_across_tasks() {
    let (client, transport) = client_with(&[LINES]);
    let client = Arc::new(client);

    client.get_examples("good").await.unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_examples("good").await.map(|s| s.len()) })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 2);
    }
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn test_for_language_rejects_unsupported() {
    assert!(SkellClient::for_language("Czech").is_ok());
    let err = SkellClient::for_language("Klingon").err().unwrap();
    assert!(matches!(err, SkellError::Model(_)));
}

/// Serves a single HTTP/1.1 response on a local port and hands back the raw
/// request head once the connection is done.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
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
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn header_value<'a>(request: &'a str, name: &str) -> Option<&'a str> {
    request.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim().eq_ignore_ascii_case(name).then_some(value.trim())
    })
}

#[tokio::test]
async fn test_http_transport_sends_configured_user_agent() {
    let (base_url, server) = serve_once("200 OK", r#"{"Words":[{"Word":"great"}]}"#).await;
    let config = ClientConfig {
        base_url,
        user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
        ..ClientConfig::default()
    };
    let client = SkellClient::with_config(config.clone());

    let words = client.get_similar_words("good").await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(words, vec!["great".to_string()]);
    assert!(request.starts_with("GET /thesaurus?lang=English&query=good&format=json "));
    assert_eq!(header_value(&request, "user-agent"), Some(config.user_agent.as_str()));
}

#[tokio::test]
async fn test_http_transport_error_status_is_http_error() {
    let (base_url, server) = serve_once("503 Service Unavailable", "{}").await;
    let client = SkellClient::with_config(ClientConfig {
        base_url,
        ..ClientConfig::default()
    });

    let err = client.get_examples("good").await.unwrap_err();
    server.await.unwrap();

    match err {
        SkellError::Http(e) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE))
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert_eq!(client.cached_words(), 0);
}
