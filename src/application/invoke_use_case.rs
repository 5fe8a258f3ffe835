// ============================================================
// Layer 2 — InvokeUseCase
// ============================================================
// A minimal in-process host: loads the model once, then runs
// parse → predict → serialize for each request body it is
// given, the same order a serving runtime would.

use anyhow::Result;
use std::path::Path;

use crate::domain::traits::InferenceHandler;

pub struct InvokeUseCase<H: InferenceHandler> {
    handler: H,
    model:   H::Model,
}

impl<H: InferenceHandler> InvokeUseCase<H> {
    /// Run the load hook once and keep the model for later requests.
    pub fn new(handler: H, model_dir: &Path) -> Result<Self> {
        let model = handler.load_model(model_dir)?;
        Ok(Self { handler, model })
    }

    /// Handle one request. Returns (response body, response content type).
    pub fn invoke(&self, body: &[u8], content_type: &str, accept: &str) -> Result<(String, String)> {
        let input      = self.handler.parse_input(body, content_type)?;
        let prediction = self.handler.predict(&input, &self.model)?;
        self.handler.serialize_output(&prediction, accept)
    }
}
