//! # AI Assistant
//!
//! Text generation for content descriptions and the student chat. Callers
//! always get a string back: a missing key or a failed call turns into a
//! fixed fallback reply.

use async_trait::async_trait;
use eyre::{eyre, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use studio_core::models::{
    assistant::{ChatMessage, ChatRole},
    content::ContentType,
};
use tracing::warn;

pub const DESCRIPTION_KEY_MISSING: &str = "Description generated (Mock: API Key missing).";
pub const CHAT_KEY_MISSING: &str =
    "I am a simulated Yoga Assistant (API Key missing). How can I help?";
pub const DESCRIPTION_FAILED: &str = "Could not generate description at this time.";
pub const CHAT_FAILED: &str =
    "I am having trouble connecting to the universe right now. Please try again later.";

const EMPTY_DESCRIPTION: &str = "Namaste.";
const CHAT_INSTRUCTION: &str = "You are a helpful, calm, and knowledgeable Yoga Assistant for the studio app. Answer questions about yoga poses, breathing, and scheduling briefly.";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[async_trait]
pub trait AssistantService: Send + Sync {
    async fn generate_description(&self, title: &str, content_type: ContentType) -> String;

    async fn chat(&self, history: &[ChatMessage], message: &str) -> String;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

fn description_prompt(title: &str, content_type: ContentType) -> String {
    format!(
        "You are a professional Yoga teacher. Write a short, calming, and inspiring description (max 2 sentences) for a yoga content piece titled \"{}\" which is a {}.",
        title,
        content_type.as_str()
    )
}

fn chat_contents(history: &[ChatMessage], message: &str) -> Vec<Content> {
    history
        .iter()
        .map(|turn| {
            let role = match turn.role {
                ChatRole::Model => "model",
                ChatRole::User => "user",
            };
            Content::text(Some(role), &turn.text)
        })
        .chain(std::iter::once(Content::text(Some("user"), message)))
        .collect()
}

/// Gemini `generateContent` over REST.
#[derive(Debug, Clone)]
pub struct GeminiAssistant {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiAssistant {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    async fn generate(&self, api_key: &str, request: &GenerateRequest) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", API_BASE, self.model))
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(eyre!("Gemini returned {}: {}", status, body));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<String>();
        Ok(text)
    }
}

#[async_trait]
impl AssistantService for GeminiAssistant {
    async fn generate_description(&self, title: &str, content_type: ContentType) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return DESCRIPTION_KEY_MISSING.to_string();
        };

        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), &description_prompt(title, content_type))],
            system_instruction: None,
        };
        match self.generate(api_key, &request).await {
            Ok(text) if text.trim().is_empty() => EMPTY_DESCRIPTION.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Description generation failed: {}", e);
                DESCRIPTION_FAILED.to_string()
            }
        }
    }

    async fn chat(&self, history: &[ChatMessage], message: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return CHAT_KEY_MISSING.to_string();
        };

        let request = GenerateRequest {
            contents: chat_contents(history, message),
            system_instruction: Some(Content::text(None, CHAT_INSTRUCTION)),
        };
        match self.generate(api_key, &request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => CHAT_FAILED.to_string(),
            Err(e) => {
                warn!("Assistant chat failed: {}", e);
                CHAT_FAILED.to_string()
            }
        }
    }
}
