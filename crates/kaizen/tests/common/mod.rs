#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

pub const TOKEN: &str = "learner-token";

/// In-memory stand-in for the learning platform api.
///
/// Module `spc` has three questions whose correct option is always `a`, module `intro` has
/// no quiz (404), module `empty` has an empty quiz and module `flaky` rejects submissions.
#[derive(Default)]
pub struct Platform {
    pub progress: Mutex<HashMap<String, u8>>,
    pub submissions: Mutex<Vec<Value>>,
    pub authorization: Mutex<Vec<Option<String>>>,
}

impl Platform {
    fn remember_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        self.authorization.lock().unwrap().push(value);
    }
}

type Shared = State<Arc<Platform>>;

pub async fn serve(platform: Arc<Platform>) -> Url {
    let module = "/api/v0/courses/{course}/modules/{module}";
    let app = Router::new()
        .route("/api/v0/status", get(status))
        .route(&format!("{module}/quiz"), get(quiz))
        .route(&format!("{module}/quiz/submit"), post(submit))
        .route(&format!("{module}/quiz/results"), get(results))
        .route(&format!("{module}/progress"), get(get_progress).post(set_progress))
        .route("/api/v0/assistant/ask", post(ask))
        .route("/api/v0/assistant/ask/stream", post(ask_stream))
        .with_state(platform);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    Url::parse(&format!("http://{address}/")).unwrap()
}

async fn status(State(platform): Shared, headers: HeaderMap) -> Json<Value> {
    platform.remember_auth(&headers);
    Json(json!({"database": "ok", "llm": "ok"}))
}

async fn quiz(Path((_course, module)): Path<(String, String)>) -> Result<Json<Value>, StatusCode> {
    match module.as_str() {
        "intro" => Err(StatusCode::NOT_FOUND),
        "empty" => Ok(Json(json!([]))),
        _ => Ok(Json(json!([
            {"id": "q1", "question": "What does SPC monitor?", "options": [
                {"option_id": "a", "option_text": "Process variation"},
                {"option_id": "b", "option_text": "Inventory"}
            ]},
            {"id": "q2", "question": "What marks special cause variation?", "options": [
                {"option_id": "a", "option_text": "A point outside the control limits"},
                {"option_id": "b", "option_text": "Any point above the mean"}
            ]},
            {"id": "q3", "question": "What is a subgroup?", "options": [
                {"option_id": "a", "option_text": "Samples taken under similar conditions"},
                {"option_id": "b", "option_text": "A department"}
            ]}
        ]))),
    }
}

async fn submit(
    State(platform): Shared,
    Path((_course, module)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    platform.submissions.lock().unwrap().push(body.clone());
    if module == "flaky" {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let answers = body["answers"].as_array().cloned().unwrap_or_default();
    let feedback: serde_json::Map<String, Value> = answers
        .iter()
        .map(|answer| {
            let question = answer["question_id"].as_str().unwrap_or_default().to_owned();
            (question, Value::Bool(answer["option_id"] == "a"))
        })
        .collect();
    let correct = feedback.values().filter(|correct| *correct == &Value::Bool(true)).count();
    Ok(Json(json!({
        "correct": correct,
        "total": 3,
        "passed": correct * 100 >= 80 * 3,
        "feedback": feedback,
    })))
}

async fn results(Path((course, module)): Path<(String, String)>) -> Result<Json<Value>, StatusCode> {
    if module == "intro" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!([
        {
            "id": "7d1f0f0e-5a8e-4b8b-9a59-1c2b3c4d5e6f",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "course_id": course,
            "module_id": module,
            "score": 67,
            "passed": false,
            "completed_at": "2024-05-02T12:00:00Z",
            "feedback": {"q1": true, "q2": true, "q3": false}
        },
        {
            "id": "8e2a1a1f-6b9f-4c9c-8b6a-2d3c4d5e6f70",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "course_id": course,
            "module_id": module,
            "score": 100,
            "passed": true,
            "completed_at": "2024-05-09T12:00:00Z"
        }
    ])))
}

async fn get_progress(
    State(platform): Shared,
    Path((course, module)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let percentage = platform
        .progress
        .lock()
        .unwrap()
        .get(&module)
        .copied()
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({"course_id": course, "module_id": module, "percentage": percentage})))
}

async fn set_progress(
    State(platform): Shared,
    headers: HeaderMap,
    Path((course, module)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    platform.remember_auth(&headers);
    let requested = u8::try_from(body["percentage"].as_u64().unwrap_or_default()).unwrap_or(100);
    let mut progress = platform.progress.lock().unwrap();
    let stored = progress.entry(module.clone()).or_insert(0);
    *stored = (*stored).max(requested);
    Json(json!({"course_id": course, "module_id": module, "percentage": *stored}))
}

async fn ask(Json(body): Json<Value>) -> Json<Value> {
    let question = body["question"].as_str().unwrap_or_default();
    Json(json!({"answer": format!("You asked about {question}")}))
}

async fn ask_stream(Json(body): Json<Value>) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let question = body["question"].as_str().unwrap_or_default();
    let mut events: Vec<Result<Event, Infallible>> = ["Statistical ", "Process ", "Control"]
        .into_iter()
        .map(|delta| Ok(Event::default().data(json!({"delta": delta}).to_string())))
        .collect();
    // Questions mentioning "cut" get a stream that stops before it is finished.
    if !question.contains("cut") {
        events.push(Ok(Event::default().data("[DONE]")));
    }
    Sse::new(stream::iter(events))
}
