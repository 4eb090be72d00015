//! Shared fixtures: in-memory PDFs, stub models, a recording observer and a
//! local stand-in for the chat-completions endpoint.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use pdf_summarizer::services::{
    ChatModel, ChatRequest, ModelError, PdfProcessor, SummarizationClient, SummaryObserver,
    SummaryPipeline, SummaryPrompt,
};
use pdf_summarizer::AppState;

pub const BOUNDARY: &str = "X-PDF-SUMMARIZER-BOUNDARY";

fn text_operations(text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 24.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Builds a PDF with one page per entry; `None` gives a page with an empty
/// content stream.
pub fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let page_ids: Vec<ObjectId> = pages
        .iter()
        .map(|page_text| {
            let operations = page_text.map(text_operations).unwrap_or_default();
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content stream encodes"),
            ));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            })
        })
        .collect();

    let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_ids.len() as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("pdf serializes");
    buffer
}

pub fn single_page_pdf(text: &str) -> Vec<u8> {
    build_pdf(&[Some(text)])
}

pub fn multi_page_pdf(pages: usize) -> Vec<u8> {
    let texts: Vec<Option<&str>> = (0..pages).map(|_| Some("Page content")).collect();
    build_pdf(&texts)
}

pub fn blank_pdf() -> Vec<u8> {
    build_pdf(&[None])
}

/// A page tree with no kids.
pub fn pageless_pdf() -> Vec<u8> {
    build_pdf(&[])
}

/// Returns a fixed reply and keeps every request it was sent.
pub struct StubModel {
    reply: String,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubModel {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Fails `failures` times with the given error, then replies.
pub struct FlakyModel {
    failures: u32,
    error: ModelError,
    reply: String,
    calls: AtomicU32,
}

impl FlakyModel {
    pub fn new(failures: u32, error: ModelError, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            failures,
            error,
            reply: reply.to_string(),
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FlakyModel {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, ModelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(self.error.clone())
        } else {
            Ok(self.reply.clone())
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
    prompts: Mutex<Vec<SummaryPrompt>>,
    responses: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<SummaryPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn responses(&self) -> Vec<String> {
        self.responses.lock().unwrap().clone()
    }
}

impl SummaryObserver for RecordingObserver {
    fn on_prompt(&self, prompt: &SummaryPrompt) {
        self.events.lock().unwrap().push("prompt".to_string());
        self.prompts.lock().unwrap().push(prompt.clone());
    }

    fn on_response(&self, raw: &str) {
        self.events.lock().unwrap().push("response".to_string());
        self.responses.lock().unwrap().push(raw.to_string());
    }

    fn on_complete(&self, _elapsed: Duration) {
        self.events.lock().unwrap().push("complete".to_string());
    }
}

pub fn pipeline(model: Arc<dyn ChatModel>, observer: Arc<RecordingObserver>) -> SummaryPipeline {
    let client = SummarizationClient::new(model, observer.clone());
    SummaryPipeline::new(PdfProcessor::new(), client, observer)
}

pub fn app_state(model: Arc<dyn ChatModel>, observer: Arc<RecordingObserver>) -> AppState {
    AppState::new(pipeline(model, observer), 10)
}

/// Single-field multipart upload request for `/summarize`.
pub fn upload_request(field_name: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/summarize")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Serves `/v1/chat/completions` on a random local port, answering with the
/// queued responses in order. Once the queue is drained it answers 500.
pub struct FakeProvider {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    authorizations: Mutex<Vec<String>>,
    bodies: Mutex<Vec<Value>>,
}

impl FakeProvider {
    /// Starts the server and returns it with its base URL.
    pub async fn start(responses: Vec<(StatusCode, String)>) -> (Arc<Self>, String) {
        let provider = Arc::new(Self {
            responses: Mutex::new(responses.into()),
            authorizations: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(provider.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (provider, format!("http://{}/v1", addr))
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.authorizations.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }
}

async fn completions(
    State(provider): State<Arc<FakeProvider>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    provider.authorizations.lock().unwrap().push(authorization);
    provider
        .bodies
        .lock()
        .unwrap()
        .push(serde_json::from_str(&body).unwrap_or(Value::Null));

    let (status, body) = provider
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "no response queued".to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// A chat-completions body carrying one choice with the given content.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
