// src/services/assistant.rs
use tracing::{error, info};

use super::completion::{ChatMessage, CompletionProvider, CompletionSettings, ProviderResult};

pub const MODEL: &str = "llama-3.3-70b-versatile";
pub const TEMPERATURE: f64 = 0.3;
pub const MAX_TOKENS: u32 = 500;

pub const SYSTEM_PROMPT: &str = "\
You are an AI Doctor Assistant.
You help doctors with:
- Medical explanations
- Differential diagnoses
- Treatment guidelines
- Drug information
- Clinical reasoning

Rules:
- Do NOT provide definitive diagnoses
- Do NOT replace professional medical judgment
- Keep responses concise, clinical, and evidence-based
- If unsure, say so clearly
";

pub fn settings() -> CompletionSettings {
    CompletionSettings {
        model: MODEL.to_string(),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// System instruction first, then the doctor's message untouched.
pub fn build_conversation(user_msg: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_msg)]
}

/// Forwards one message to the provider. A single call, never retried.
pub async fn relay(provider: &dyn CompletionProvider, user_msg: &str) -> ProviderResult<String> {
    let conversation = build_conversation(user_msg);

    match provider.complete(&conversation, &settings()).await {
        Ok(reply) => {
            info!(provider = provider.name(), reply_len = reply.len(), "Relay completed");
            Ok(reply)
        }
        Err(e) => {
            error!(provider = provider.name(), kind = e.kind(), error = %e, "Relay failed");
            Err(e)
        }
    }
}
