#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use serde_json::{json, Value};

use petpack::types::{GenerationRequest, ImageBlob};
use petpack::{Client, ImageGenerator, Result, Session};

pub const PNG_SIGNATURE_B64: &str = "iVBORw0KGgo=";

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn image_response() -> Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Here is your image."},
                        {"inlineData": {"mimeType": "image/png", "data": PNG_SIGNATURE_B64}}
                    ]
                },
                "finishReason": "STOP"
            }
        ]
    })
}

pub fn text_only_response() -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": "I can't draw that."}]}}
        ]
    })
}

pub fn png(n: usize) -> ImageBlob {
    ImageBlob::new(format!("generated-{n}").into_bytes(), "image/png")
}

pub fn session_with_images(count: usize) -> Arc<Session> {
    let session = Arc::new(Session::new());
    for n in 0..count {
        session.add_image(ImageBlob::new(vec![u8::try_from(n).unwrap()], "image/jpeg"));
    }
    session
}

type Respond = Box<dyn Fn(usize, &GenerationRequest) -> Result<Option<ImageBlob>> + Send + Sync>;

/// In-memory generator driven by a closure over `(call index, request)`.
pub struct ScriptedGenerator {
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    respond: Respond,
}

impl ScriptedGenerator {
    pub fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(usize, &GenerationRequest) -> Result<Option<ImageBlob>> + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn always_ok() -> Arc<Self> {
        Self::new(|index, _| Ok(Some(png(index))))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageGenerator for ScriptedGenerator {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<Option<ImageBlob>>> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let outcome = (self.respond)(index, request);
        Box::pin(async move {
            tokio::task::yield_now().await;
            outcome
        })
    }
}
