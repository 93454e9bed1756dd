use dynforce::{SalesforceRestClient, Session};

/// Build a client for the org named by `SF_INSTANCE_URL` / `SF_ACCESS_TOKEN`.
///
/// **IMPORTANT**: these tests MUST run against a real Salesforce org. This
/// panics with a helpful message instead of silently skipping when the
/// environment is not configured.
pub fn client() -> SalesforceRestClient {
    init_tracing();

    let instance_url = required_env("SF_INSTANCE_URL");
    let access_token = required_env("SF_ACCESS_TOKEN");

    let mut session =
        Session::new(instance_url, access_token).expect("SF_INSTANCE_URL must be an absolute URL");
    if let Ok(version) = std::env::var("SF_API_VERSION") {
        if !version.is_empty() {
            session = session.with_api_version(version);
        }
    }

    SalesforceRestClient::with_session(session).expect("Failed to create REST client")
}

fn required_env(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => panic!(
            "\n\n\
            INTEGRATION TEST CONFIGURATION ERROR\n\
            {name} is not set.\n\n\
            To fix:\n\
            \x20 1. Authenticate to an org: sf org login web\n\
            \x20 2. Show the session: sf org display\n\
            \x20 3. export SF_INSTANCE_URL='<Instance Url>' SF_ACCESS_TOKEN='<Access Token>'\n\n"
        ),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dynforce=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A value unique to this test run.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
