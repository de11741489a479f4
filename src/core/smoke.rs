use reqwest::{Client, StatusCode};
use url::Url;

/// Result of probing the store before an upload. Each variant maps to the
/// exit code CI keys off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
    Ok { pin_rank_supported: bool },
    MissingUrl,
    MissingKey,
    AuthRejected { status: u16 },
    Unexpected { status: u16, body: String },
    RequestFailed { message: String },
}

impl SmokeOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            SmokeOutcome::Ok { .. } => 0,
            SmokeOutcome::MissingUrl => 2,
            SmokeOutcome::MissingKey => 3,
            SmokeOutcome::AuthRejected { .. } => 4,
            SmokeOutcome::Unexpected { .. } => 5,
            SmokeOutcome::RequestFailed { .. } => 6,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SmokeOutcome::Ok { .. })
    }
}

const BODY_PREVIEW_CHARS: usize = 300;

pub fn classify_response(status: StatusCode, body: &str) -> SmokeOutcome {
    match status.as_u16() {
        200 | 206 => SmokeOutcome::Ok {
            pin_rank_supported: true,
        },
        // PostgREST answers 400 when the selected column does not exist.
        400 => SmokeOutcome::Ok {
            pin_rank_supported: false,
        },
        401 | 403 => SmokeOutcome::AuthRejected {
            status: status.as_u16(),
        },
        other => SmokeOutcome::Unexpected {
            status: other,
            body: body.chars().take(BODY_PREVIEW_CHARS).collect(),
        },
    }
}

/// Checks settings presence, then issues one probing request. Raw setting
/// values are taken here so a missing URL or key is reported as an outcome
/// rather than failing configuration loading.
pub async fn run_smoke_check(client: &Client, store_url: &str, api_key: &str) -> SmokeOutcome {
    let store_url = store_url.trim().trim_end_matches('/');
    let api_key = api_key.trim();

    let parsed = Url::parse(store_url).ok();
    let scheme_ok = parsed
        .as_ref()
        .is_some_and(|u| matches!(u.scheme(), "http" | "https"));
    let host = parsed
        .as_ref()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    tracing::info!(
        url_present = !store_url.is_empty(),
        scheme_ok,
        host = %host,
        key_present = !api_key.is_empty(),
        "Store settings"
    );

    if store_url.is_empty() || !scheme_ok {
        return SmokeOutcome::MissingUrl;
    }
    if api_key.is_empty() {
        return SmokeOutcome::MissingKey;
    }

    let port = parsed
        .as_ref()
        .and_then(Url::port_or_known_default)
        .unwrap_or(443);
    resolve_host(&host, port).await;

    let url = format!("{}/rest/v1/businesses", store_url);
    let response = client
        .get(&url)
        .query(&[("select", "pin_rank"), ("limit", "1")])
        .header("apikey", api_key)
        .bearer_auth(api_key)
        .send()
        .await;

    match response {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::info!("GET /rest/v1/businesses -> HTTP {}", status.as_u16());
            classify_response(status, &body)
        }
        Err(e) => SmokeOutcome::RequestFailed {
            message: e.to_string(),
        },
    }
}

/// Best-effort DNS check. A failure is only logged; the request that follows
/// reports the real outcome.
pub async fn resolve_host(host: &str, port: u16) -> bool {
    match tokio::net::lookup_host((host, port)).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => {
                tracing::info!(host = %host, ip = %addr.ip(), "DNS resolved");
                true
            }
            None => {
                tracing::warn!(host = %host, "DNS lookup returned no addresses");
                false
            }
        },
        Err(e) => {
            tracing::warn!(host = %host, "DNS lookup failed: {}", e);
            false
        }
    }
}
