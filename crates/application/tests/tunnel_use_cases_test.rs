use ferrous_tunnel_application::ports::TunnelSessionPort;
use ferrous_tunnel_application::use_cases::{
    GetTunnelStatusUseCase, SetResolverUseCase, SetStrategyUseCase, StartTunnelUseCase,
    StopTunnelUseCase,
};
use ferrous_tunnel_domain::{DomainError, DEFAULT_RESOLVER_URL};
use std::sync::Arc;

mod helpers;
use helpers::MockTunnelSession;

#[tokio::test]
async fn test_start_uses_current_config_without_overrides() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = StartTunnelUseCase::new(session.clone());

    use_case.execute(None, None).await.unwrap();

    assert!(session.is_running());
    assert_eq!(session.config().resolver_url, DEFAULT_RESOLVER_URL);
    assert_eq!(session.config().strategy_id, "general");
}

#[tokio::test]
async fn test_start_applies_overrides() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = StartTunnelUseCase::new(session.clone());

    use_case
        .execute(
            Some("https://dns.google/dns-query".to_string()),
            Some("youtube".to_string()),
        )
        .await
        .unwrap();

    let config = session.config();
    assert_eq!(config.resolver_url, "https://dns.google/dns-query");
    assert_eq!(config.strategy_id, "youtube");
}

#[tokio::test]
async fn test_start_with_empty_url_uses_default_resolver() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = StartTunnelUseCase::new(session.clone());

    use_case.execute(Some(String::new()), None).await.unwrap();

    assert_eq!(session.config().resolver_url, DEFAULT_RESOLVER_URL);
}

#[tokio::test]
async fn test_start_rejects_invalid_url_without_touching_session() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = StartTunnelUseCase::new(session.clone());

    let result = use_case
        .execute(Some("tcp://8.8.8.8:53".to_string()), None)
        .await;

    assert!(matches!(result, Err(DomainError::InvalidResolverUrl(_))));
    assert_eq!(session.start_calls(), 0);
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_start_while_running_is_noop() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = StartTunnelUseCase::new(session.clone());

    use_case.execute(None, None).await.unwrap();
    use_case
        .execute(Some("https://dns.google/dns-query".to_string()), None)
        .await
        .unwrap();

    assert_eq!(session.start_calls(), 1);
    assert_eq!(session.config().resolver_url, DEFAULT_RESOLVER_URL);
}

#[tokio::test]
async fn test_start_failure_is_reported() {
    let session = Arc::new(MockTunnelSession::failing());
    let use_case = StartTunnelUseCase::new(session.clone());

    let result = use_case.execute(None, None).await;

    assert!(matches!(result, Err(DomainError::InterfaceUnavailable(_))));
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_stop_delegates_to_session() {
    let session = Arc::new(MockTunnelSession::new());
    StartTunnelUseCase::new(session.clone())
        .execute(None, None)
        .await
        .unwrap();

    StopTunnelUseCase::new(session.clone()).execute().await;

    assert!(!session.is_running());
    assert_eq!(session.stop_calls(), 1);
}

#[test]
fn test_set_resolver_normalizes_and_applies() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = SetResolverUseCase::new(session.clone());

    let applied = use_case
        .execute("  https://dns.adguard-dns.com/dns-query ")
        .unwrap();

    assert_eq!(applied, "https://dns.adguard-dns.com/dns-query");
    assert_eq!(session.config().resolver_url, applied);

    assert_eq!(use_case.execute("").unwrap(), DEFAULT_RESOLVER_URL);
    assert!(use_case.execute("not a url").is_err());
    assert_eq!(session.config().resolver_url, DEFAULT_RESOLVER_URL);
}

#[test]
fn test_set_strategy_rejects_blank() {
    let session = Arc::new(MockTunnelSession::new());
    let use_case = SetStrategyUseCase::new(session.clone());

    assert_eq!(use_case.execute("discord").unwrap(), "discord");
    assert_eq!(session.config().strategy_id, "discord");

    assert!(matches!(
        use_case.execute("   "),
        Err(DomainError::InvalidStrategy(_))
    ));
    assert_eq!(session.config().strategy_id, "discord");
}

#[tokio::test]
async fn test_status_reflects_session() {
    let session = Arc::new(MockTunnelSession::new());
    let status = GetTunnelStatusUseCase::new(session.clone());

    let stopped = status.execute();
    assert!(!stopped.active);
    assert_eq!(stopped.label, "Cloudflare • general");
    assert!(stopped.started_at.is_none());

    StartTunnelUseCase::new(session.clone())
        .execute(
            Some("https://dns.quad9.net/dns-query".to_string()),
            Some("games".to_string()),
        )
        .await
        .unwrap();

    let running = status.execute();
    assert!(running.active);
    assert_eq!(running.label, "Quad9 • games");
    assert!(running.started_at.is_some());
}
