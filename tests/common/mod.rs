//! In-process stand-in for the question-answering service.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Notify;

use datachat::answer::Answerer;
use datachat::answer::providers::http::HttpAnswerer;

/// How the mock answers `POST /consulta`.
#[derive(Clone)]
pub enum Reply {
    /// `200 {"pergunta": <q>, "resposta": <text>}`
    Answer(String),
    /// Given status with the service's error body.
    Status(u16),
    /// `200` with this body verbatim.
    Raw(&'static str),
    /// Answer after sleeping.
    Delayed(Duration, String),
    /// Answer once the gate is notified.
    Gated(Arc<Notify>, String),
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    hits: Arc<AtomicUsize>,
    questions: Arc<Mutex<Vec<String>>>,
}

pub struct MockService {
    pub url: String,
    hits: Arc<AtomicUsize>,
    questions: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn answerer(&self, timeout_seconds: u64) -> Answerer {
        Answerer::Http(HttpAnswerer::new(self.url.clone(), timeout_seconds).unwrap())
    }
}

pub async fn spawn(reply: Reply) -> MockService {
    let hits = Arc::new(AtomicUsize::new(0));
    let questions = Arc::new(Mutex::new(Vec::new()));
    let state = MockState { reply, hits: hits.clone(), questions: questions.clone() };

    let router = Router::new().route("/consulta", post(consulta)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockService { url: format!("http://{addr}/consulta"), hits, questions }
}

async fn consulta(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let pergunta = body["pergunta"].as_str().unwrap_or_default().to_string();
    state.questions.lock().unwrap().push(pergunta.clone());

    match state.reply {
        Reply::Answer(text) => answer(&pergunta, &text),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({ "detail": "Erro ao processar a pergunta." })),
        )
            .into_response(),
        Reply::Raw(raw) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], raw).into_response()
        }
        Reply::Delayed(delay, text) => {
            tokio::time::sleep(delay).await;
            answer(&pergunta, &text)
        }
        Reply::Gated(gate, text) => {
            gate.notified().await;
            answer(&pergunta, &text)
        }
    }
}

fn answer(pergunta: &str, resposta: &str) -> Response {
    Json(json!({ "pergunta": pergunta, "resposta": resposta })).into_response()
}
