use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::SessionId;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const TRACER_NAME: &str = "catchabite-web";

/// Runtime that hosts the tonic exporter. `dioxus::serve` may call the init
/// closure before a Tokio context is entered, and tonic spawns on connect.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Register a global OTLP TracerProvider.
///
/// Dioxus owns the `tracing` subscriber; this only wires the exporter that
/// [`OtelTraceLayer`] spans go to. Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address (required)
///   - `OTEL_SERVICE_NAME`: defaults to `catchabite-web`
///   - `OTEL_INGESTION_KEY`: sent as `ingestion-key` metadata when set
///   - `DEPLOY_ENV`: defaults to `development`
///
/// Any failure is logged and leaves telemetry off.
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| TRACER_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .build()
    {
        Ok(rt) => OTEL_RUNTIME.get_or_init(|| rt),
        Err(e) => {
            tracing::error!(error = %e, "Could not start telemetry runtime");
            return;
        }
    };
    let _guard = runtime.enter();

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);

    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    if let Some(key) = std::env::var("OTEL_INGESTION_KEY")
        .ok()
        .filter(|k| !k.is_empty())
    {
        match key.parse() {
            Ok(value) => {
                let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
                metadata.insert("ingestion-key", value);
                builder = builder.with_metadata(metadata);
            }
            Err(_) => tracing::warn!("OTEL_INGESTION_KEY is not valid gRPC metadata, ignoring"),
        }
    }

    let exporter = match builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create OTLP exporter");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider);
    tracing::info!(version = APP_VERSION, %endpoint, "Telemetry initialized");
}

/// Client platform from `X-Client-Platform`, else a User-Agent guess.
/// Native Dioxus clients send no User-Agent and report as "native".
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(p) = explicit {
        return match p {
            "ios" => "ios",
            "android" => "android",
            "desktop" => "desktop",
            "mobile" => "mobile",
            "web" => "web",
            _ => "unknown",
        };
    }

    if ua == "unknown" || ua.is_empty() {
        return "native";
    }
    if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("CFNetwork") {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ua.contains("Mozilla") || ua.contains("Chrome") || ua.contains("Safari") {
        "web"
    } else {
        "native"
    }
}

/// Span name for a request path. Role segments are kept since there are
/// only three of them; server function hashes are folded.
fn route_name(path: &str) -> String {
    match path.strip_prefix("/api/") {
        Some(rest) => {
            let name = rest.split('/').next().unwrap_or_default();
            let name = name.trim_end_matches(|c: char| c.is_ascii_digit());
            format!("/api/{name}")
        }
        None => path.to_string(),
    }
}

/// Tower layer that opens an OpenTelemetry server span per HTTP request.
///
/// Records method, path, user agent, platform, request id, response status
/// and whether the browser presented a session. Never the session id.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(TRACER_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let user_agent = header("user-agent").unwrap_or_else(|| "unknown".to_string());
        let client_platform =
            detect_platform(&user_agent, header("x-client-platform").as_deref());
        let request_id = header("x-request-id").unwrap_or_default();

        let auth_status = if req.extensions().get::<SessionId>().is_some() {
            "session"
        } else {
            "anonymous"
        };

        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("client.platform", client_platform),
            KeyValue::new("http.request_id", request_id),
            KeyValue::new("auth.status", auth_status),
        ];

        let span = tracer
            .span_builder(format!("{} {}", method, route_name(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
