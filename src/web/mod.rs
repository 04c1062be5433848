use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::excel::build_workbook;
use crate::generate::TestCaseGenerator;

pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DOWNLOAD_NAME: &str = "test_cases.xlsx";

pub struct AppState {
    pub generator: TestCaseGenerator,
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub context: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(render_form(None))
}

/// One synchronous pipeline per submission: validate the form, generate,
/// build the workbook, stream it back. Any failure re-renders the form with
/// the error message and produces no download.
async fn generate(State(state): State<Arc<AppState>>, Form(form): Form<GenerateForm>) -> Response {
    let source_url = form.source_url.trim();
    let context = form.context.trim();

    if source_url.is_empty() {
        return Html(render_form(Some("Enter the URL under test."))).into_response();
    }

    let result = state
        .generator
        .generate(source_url, context)
        .await
        .and_then(|cases| build_workbook(source_url, &cases));

    match result {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_NAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, url = %source_url, "request failed");
            Html(render_form(Some(&err.to_string()))).into_response()
        }
    }
}

fn render_form(error: Option<&str>) -> String {
    let flash = match error {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape_html(msg)),
        None => String::new(),
    };
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Test case generator</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }}
    label {{ display: block; margin-top: 1rem; }}
    input[type=url], textarea {{ width: 100%; }}
    .error {{ color: #b00020; }}
  </style>
</head>
<body>
  <h1>Test case generator</h1>
  <p>Generates a manual test case spreadsheet from the page at the given URL.</p>
  {flash}
  <form method="post" action="/">
    <label>URL under test
      <input type="url" name="source_url" required placeholder="https://example.com/login">
    </label>
    <label>Additional context (optional)
      <textarea name="context" rows="4" placeholder="Anything the tester should focus on"></textarea>
    </label>
    <button type="submit">Generate spreadsheet</button>
  </form>
</body>
</html>"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerateError;
    use crate::fetch::SourceFetcher;
    use crate::provider::ChatProvider;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StubProvider(String);

    #[async_trait]
    impl ChatProvider for StubProvider {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerateError> {
            Ok(self.0.clone())
        }
    }

    /// Fails the test if the pipeline is ever invoked.
    struct PanicProvider;

    #[async_trait]
    impl ChatProvider for PanicProvider {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerateError> {
            panic!("provider must not be called for an invalid form");
        }
    }

    fn app(provider: Box<dyn ChatProvider + Send + Sync>) -> Router {
        let generator = TestCaseGenerator::from_parts(SourceFetcher::new(15), provider);
        router(Arc::new(AppState { generator }))
    }

    fn post_form(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn index_renders_the_form() {
        let app = app(Box::new(PanicProvider));
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"name="source_url""#));
        assert!(html.contains(r#"name="context""#));
    }

    #[tokio::test]
    async fn blank_url_never_reaches_the_generator() {
        let app = app(Box::new(PanicProvider));
        let resp = app
            .oneshot(post_form("source_url=&context=whatever".into()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Enter the URL under test."));
    }

    #[tokio::test]
    async fn successful_run_streams_an_attachment() {
        let source = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("login page"))
            .mount(&source)
            .await;

        let app = app(Box::new(StubProvider(
            r#"{"test_cases": [{"test_id": "TC-001", "title": "Valid login"}]}"#.into(),
        )));
        let resp = app
            .oneshot(post_form(format!("source_url={}&context=", source.uri())))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], XLSX_MIME);
        assert!(resp.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("test_cases.xlsx"));

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(!body.is_empty());
    }

    #[tokio::test]
    async fn pipeline_failure_re_renders_the_form_with_the_message() {
        let source = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("login page"))
            .mount(&source)
            .await;

        let app = app(Box::new(StubProvider("not json at all".into())));
        let resp = app
            .oneshot(post_form(format!("source_url={}&context=", source.uri())))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("could not parse model response as JSON"));
    }
}
