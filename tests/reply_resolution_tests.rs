use std::sync::Arc;
use std::time::{Duration, Instant};

use chatbox::Provider;
use chatbox::core::action::{Action, Effect, update};
use chatbox::core::config::{ChatboxConfig, CliOverrides, resolve_with_env};
use chatbox::core::message::{ReplyOrigin, Sender};
use chatbox::core::state::App;
use chatbox::inference::fallback::{FallbackKind, SeededRandom, TEMPLATES, canned_reply};
use chatbox::inference::{ChatCompletionsProvider, ReplyResolver, ResolverSettings};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const FALLBACK_DELAY: Duration = Duration::from_millis(200);

fn settings() -> ResolverSettings {
    ResolverSettings {
        fallback_delay: FALLBACK_DELAY,
        request_timeout: Duration::from_secs(5),
        ..ResolverSettings::default()
    }
}

fn resolver_for(server: &MockServer, api_key: Option<&str>) -> ReplyResolver {
    let provider = ChatCompletionsProvider::new(api_key.map(str::to_string), server.uri(), true);
    ReplyResolver::new(Arc::new(provider), settings())
        .with_random_source(Box::new(SeededRandom::new(7)))
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": text } }]
    }))
}

// ============================================================================
// Resolver against a live endpoint
// ============================================================================

#[tokio::test]
async fn test_model_reply_is_returned_verbatim() {
    let server = MockServer::start().await;
    mount(&server, completion("The ocean covers most of the planet.")).await;

    let started = Instant::now();
    let reply = resolver_for(&server, Some("key")).resolve("tell me about oceans").await;

    assert_eq!(reply.origin, ReplyOrigin::Model);
    assert_eq!(reply.text, "The ocean covers most of the planet.");
    assert!(started.elapsed() < FALLBACK_DELAY, "model replies are not delayed");
}

#[tokio::test]
async fn test_server_error_falls_back_after_delay() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let started = Instant::now();
    let reply = resolver_for(&server, Some("key")).resolve("hey").await;

    assert_eq!(reply.origin, ReplyOrigin::Fallback);
    assert_eq!(reply.text, canned_reply(FallbackKind::Greeting));
    assert!(started.elapsed() >= FALLBACK_DELAY);
}

#[tokio::test]
async fn test_unmatched_text_is_echoed_through_a_template() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(503)).await;

    let reply = resolver_for(&server, Some("key")).resolve("tell me about oceans").await;

    assert_eq!(reply.origin, ReplyOrigin::Fallback);
    assert!(reply.text.contains("\"tell me about oceans\""), "{}", reply.text);
    assert!(
        TEMPLATES
            .iter()
            .any(|t| t.replace("{text}", "tell me about oceans") == reply.text)
    );
}

#[tokio::test]
async fn test_missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let reply = resolver_for(&server, None).resolve("thanks!").await;

    assert_eq!(reply.origin, ReplyOrigin::Fallback);
    assert_eq!(reply.text, canned_reply(FallbackKind::Thanks));
}

#[tokio::test]
async fn test_slow_endpoint_times_out_into_fallback() {
    let server = MockServer::start().await;
    mount(&server, completion("too late").set_delay(Duration::from_secs(3))).await;

    let provider = ChatCompletionsProvider::new(Some("key".into()), server.uri(), true);
    let resolver = ReplyResolver::new(
        Arc::new(provider),
        ResolverSettings {
            request_timeout: Duration::from_millis(100),
            fallback_delay: Duration::from_millis(10),
            ..ResolverSettings::default()
        },
    );

    let started = Instant::now();
    let reply = resolver.resolve("bye").await;

    assert_eq!(reply.origin, ReplyOrigin::Fallback);
    assert_eq!(reply.text, canned_reply(FallbackKind::Farewell));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_seeded_resolvers_agree_on_template_choice() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let a = resolver_for(&server, Some("key")).resolve("quantum gardening").await;
    let b = resolver_for(&server, Some("key")).resolve("quantum gardening").await;
    assert_eq!(a, b);
}

// ============================================================================
// Config → provider → resolver → reducer
// ============================================================================

#[tokio::test]
async fn test_lmstudio_preset_works_without_key() {
    let server = MockServer::start().await;
    mount(&server, completion("Hello from a local model")).await;

    let cli = CliOverrides {
        provider: Some(Provider::LmStudio),
        base_url: Some(format!("{}/", server.uri())),
        ..CliOverrides::default()
    };
    let config = resolve_with_env(&ChatboxConfig::default(), &cli, |_| None);
    assert!(config.api_key.is_none());

    let provider = ChatCompletionsProvider::from_config(&config);
    let resolver = ReplyResolver::new(Arc::new(provider), config.resolver_settings());
    let reply = resolver.resolve("hello").await;

    assert_eq!(reply.origin, ReplyOrigin::Model);
    assert_eq!(reply.text, "Hello from a local model");
}

#[tokio::test]
async fn test_full_turn_through_the_reducer() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;
    let resolver = resolver_for(&server, Some("key"));
    let mut app = App::new("test-model".to_string());

    let effect = update(&mut app, Action::Submit("  hey  ".to_string()));
    let Effect::SpawnRequest(user_text) = effect else {
        panic!("expected SpawnRequest, got {effect:?}");
    };
    assert_eq!(user_text, "hey");
    assert!(app.is_loading());
    assert!(app.has_started());

    // A second submit while the first is pending is rejected
    assert_eq!(update(&mut app, Action::Submit("again".into())), Effect::None);

    let reply = resolver.resolve(&user_text).await;
    assert_eq!(update(&mut app, Action::ReplyResolved(reply)), Effect::None);

    let messages = app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender(), Sender::User);
    assert_eq!(messages[0].text(), "hey");
    assert_eq!(messages[1].sender(), Sender::Bot);
    assert!(messages[1].is_fallback());
    assert_eq!(messages[1].text(), canned_reply(FallbackKind::Greeting));
    assert!(!app.is_loading());
    assert_eq!(app.status_message, "Offline reply");
}
