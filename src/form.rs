//! Interactive form shell. Server-rendered page with the same two operations
//! as the JSON shell.

use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;
use std::sync::Arc;
use tracing::Instrument;

use crate::error::ParaphraseError;
use crate::paraphraser::Paraphraser;

pub const ACADEMIC_LEVELS: [&str; 4] = ["High-School", "Undergraduate", "Graduate", "Ph.D."];
const SELECTED_LEVEL: &str = "Undergraduate";

const API_ERROR_HINT: &str = "Please check your API key or try again later.";

const TIPS: [&str; 5] = [
    "Paste your academic text in the editor",
    "Select the appropriate academic level",
    "Click \"Paraphrase\" to generate a new version",
    "The paraphrased text will be natural and concise",
    "Review and edit the result as needed",
];

#[derive(Debug, Deserialize, Default)]
pub struct FormInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub academic_level: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

/// What to show below the form after an action.
#[derive(Debug, PartialEq)]
enum Outcome {
    Empty,
    Paraphrased(String),
    ProbeOk(String),
    Error(String),
    /// Provider-side failure, shown with a hint to check the credential.
    ApiError(String),
}

impl From<ParaphraseError> for Outcome {
    fn from(e: ParaphraseError) -> Self {
        match e {
            ParaphraseError::InvalidInput => {
                Outcome::Error("Please enter some text to paraphrase.".to_string())
            }
            ParaphraseError::Configuration => Outcome::Error(e.to_string()),
            ParaphraseError::Authentication
            | ParaphraseError::Provider { .. }
            | ParaphraseError::ProviderProtocol(_)
            | ParaphraseError::Transport(_) => Outcome::ApiError(e.to_string()),
        }
    }
}

struct PageState<'a> {
    text: &'a str,
    level: &'a str,
    outcome: Outcome,
}

pub fn router(paraphraser: Arc<Paraphraser>) -> Router {
    Router::new()
        .route("/", get(show).post(submit))
        .with_state(paraphraser)
}

async fn show() -> impl IntoResponse {
    Html(render(&PageState {
        text: "",
        level: SELECTED_LEVEL,
        outcome: Outcome::Empty,
    }))
}

async fn submit(
    State(paraphraser): State<Arc<Paraphraser>>,
    Form(input): Form<FormInput>,
) -> impl IntoResponse {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("form", %request_id, shell = "form");
    let level = input
        .academic_level
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(SELECTED_LEVEL);

    let outcome = match input.action.as_deref() {
        Some("test") => match paraphraser.check_connection().instrument(span).await {
            Ok(()) => Outcome::ProbeOk(
                "API key is valid and connection to the provider is working!".to_string(),
            ),
            Err(e) => e.into(),
        },
        _ => match paraphraser
            .paraphrase(&input.text, Some(level))
            .instrument(span)
            .await
        {
            Ok(text) => Outcome::Paraphrased(text),
            Err(e) => {
                tracing::error!("form paraphrase error: {}", e);
                e.into()
            }
        },
    };

    Html(render(&PageState {
        text: &input.text,
        level,
        outcome,
    }))
}

fn word_count_label(text: &str) -> String {
    let count = text.split_whitespace().count();
    if count == 1 {
        "1 word".to_string()
    } else {
        format!("{count} words")
    }
}

fn render(state: &PageState<'_>) -> String {
    let options: String = ACADEMIC_LEVELS
        .iter()
        .map(|level| {
            let selected = if *level == state.level { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = encode_double_quoted_attribute(level),
                label = encode_text(level),
            )
        })
        .collect();

    let tips: String = TIPS
        .iter()
        .map(|tip| format!("<li>{}</li>", encode_text(tip)))
        .collect();

    let outcome = match &state.outcome {
        Outcome::Empty => String::new(),
        Outcome::Paraphrased(text) => format!(
            concat!(
                r#"<section id="result"><h3>Paraphrased Text</h3>"#,
                "<textarea id=\"paraphrased-text\" rows=\"10\" readonly>\n{}</textarea>",
                r#"<button type="button" id="copy-btn" "#,
                r#"onclick="navigator.clipboard.writeText(document.getElementById('paraphrased-text').value)">"#,
                "Copy to Clipboard</button></section>"
            ),
            encode_text(text)
        ),
        Outcome::ProbeOk(message) => format!(
            r#"<div class="alert alert-success" id="api-test-result">{}</div>"#,
            encode_text(message)
        ),
        Outcome::Error(message) => format!(
            r#"<div class="alert alert-danger" id="error">{}</div>"#,
            encode_text(message)
        ),
        Outcome::ApiError(message) => format!(
            r#"<div class="alert alert-danger" id="error"><h5>API Error</h5><p>{}</p><p>{}</p></div>"#,
            encode_text(message),
            API_ERROR_HINT
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Academic Paraphraser</title>
</head>
<body>
<h1>Academic Paraphraser</h1>
<p class="subheader">Paraphrase academic text naturally</p>
<form method="post" action="/">
<label for="academic-level">Academic Level</label>
<select id="academic-level" name="academic_level">{options}</select>
<h3>Original Text</h3>
<textarea id="original-text" name="text" rows="10" placeholder="Paste your academic text here">
{text}</textarea>
<p id="word-count">{words}</p>
<button type="submit" name="action" value="paraphrase">Paraphrase</button>
<button type="submit" name="action" value="test">Test API Connection</button>
<a href="/" id="clear-btn">Clear</a>
</form>
{outcome}
<h3>Tips</h3>
<ul>{tips}</ul>
<p class="info-box">This tool helps with paraphrasing while maintaining academic integrity. Always review the output and cite your sources properly.</p>
</body>
</html>
"#,
        text = encode_text(state.text),
        words = word_count_label(state.text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paraphraser::tests::{MockTransport, paraphraser_with, reply};
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_router(mock: Arc<MockTransport>, credential: Option<&str>) -> Router {
        router(Arc::new(paraphraser_with(mock, credential)))
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::post("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn html(response: axum::response::Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn form_page_renders_levels() {
        let mock = Arc::new(MockTransport::new(vec![]));
        let response = test_router(mock, Some("key"))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = html(response).await;
        for level in ACADEMIC_LEVELS {
            assert!(page.contains(&format!(r#"value="{level}""#)));
        }
        assert!(page.contains(r#"<option value="Undergraduate" selected>"#));
        assert!(page.contains("0 words"));
    }

    #[tokio::test]
    async fn form_paraphrase_shows_result() {
        let mock = Arc::new(MockTransport::new(vec![Ok(reply(
            "Plants make food from light.\nAlternatively: Plants photosynthesize.",
        ))]));
        let response = test_router(Arc::clone(&mock), Some("key"))
            .oneshot(post_form(
                "text=Plants+use+light+to+make+food.&academic_level=Graduate&action=paraphrase",
            ))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(page.contains(">\nPlants make food from light.</textarea>"));
        assert!(page.contains(r#"id="copy-btn""#));
        assert!(!page.contains("photosynthesize"));
        assert!(page.contains(r#"<option value="Graduate" selected>"#));
        assert!(page.contains("6 words"));

        let requests = mock.requests.lock().unwrap();
        assert!(requests[0].messages[1].content.contains("for Graduate level"));
    }

    #[tokio::test]
    async fn form_empty_text_makes_no_call() {
        let mock = Arc::new(MockTransport::new(vec![]));
        let response = test_router(Arc::clone(&mock), Some("key"))
            .oneshot(post_form("text=&academic_level=Graduate&action=paraphrase"))
            .await
            .unwrap();

        assert!(html(response).await.contains("Please enter some text to paraphrase."));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn form_escapes_user_text() {
        let mock = Arc::new(MockTransport::new(vec![Err(ParaphraseError::Configuration)]));
        let response = test_router(mock, None)
            .oneshot(post_form(
                "text=%3Cscript%3Ealert(1)%3C%2Fscript%3E&action=paraphrase",
            ))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("API key not configured"));
    }

    #[tokio::test]
    async fn form_connection_test() {
        let mock =
            Arc::new(MockTransport::new(vec![]).with_probe(Err(ParaphraseError::Authentication)));
        let response = test_router(Arc::clone(&mock), Some("key"))
            .oneshot(post_form("text=&action=test"))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(page.contains("Authentication error"));
        assert!(page.contains(API_ERROR_HINT));
        assert_eq!(mock.probe_count(), 1);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn form_keeps_leading_newline_of_text() {
        let mock = Arc::new(MockTransport::new(vec![]));
        let response = test_router(mock, None)
            .oneshot(post_form("text=%0AFirst+line&action=paraphrase"))
            .await
            .unwrap();

        let page = html(response).await;
        // The parser drops the newline right after <textarea>, the text's own survives
        assert!(page.contains("placeholder=\"Paste your academic text here\">\n\nFirst line</textarea>"));
        assert!(page.contains(r#"<a href="/" id="clear-btn">Clear</a>"#));
    }

    #[tokio::test]
    async fn form_whitespace_text_is_invalid_input() {
        let mock = Arc::new(MockTransport::new(vec![]));
        let response = test_router(Arc::clone(&mock), None)
            .oneshot(post_form("text=+++&action=paraphrase"))
            .await
            .unwrap();

        let page = html(response).await;
        assert!(page.contains("Please enter some text to paraphrase."));
        assert!(!page.contains("API key not configured"));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn error_outcomes() {
        assert_eq!(
            Outcome::from(ParaphraseError::InvalidInput),
            Outcome::Error("Please enter some text to paraphrase.".to_string())
        );
        assert_eq!(
            Outcome::from(ParaphraseError::Configuration),
            Outcome::Error("API key not configured".to_string())
        );
        assert!(matches!(
            Outcome::from(ParaphraseError::Provider { status: 502 }),
            Outcome::ApiError(_)
        ));
    }

    #[test]
    fn word_count_labels() {
        assert_eq!(word_count_label(""), "0 words");
        assert_eq!(word_count_label("one"), "1 word");
        assert_eq!(word_count_label(" two  words\n"), "2 words");
    }
}
