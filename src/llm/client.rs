use anyhow::Result;
use async_trait::async_trait;

/// A completion provider: prompt in, generated text out.
/// Model parameters (model id, temperature, token budget) live on the implementor.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Offline client for `serve --dry-run` and tests.
/// Replies with a fixed rewrite that follows the three-part `---` layout.
pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut reply = String::from(
            "Iedereen verdient een dak boven zijn hoofd.\n\
             ---\n\
             Er zijn te weinig huizen, en ze zijn te duur.\n\
             ---\n\
             We bouwen meer, zodat jij ook een thuis vindt.",
        );
        if prompt.contains("image description") {
            reply.push_str("\n\nAfbeelding: een jong gezin voor de deur van hun nieuwe huis.");
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_reply_has_three_parts() {
        let reply = MockLlmClient::new().complete("any prompt").await.unwrap();
        assert_eq!(reply.split("---").count(), 3);
        assert!(!reply.contains("Afbeelding"));
    }

    #[tokio::test]
    async fn test_mock_reply_adds_image_when_asked() {
        let reply = MockLlmClient::default()
            .complete("Suggest a compelling image description for the post.")
            .await
            .unwrap();
        assert!(reply.contains("Afbeelding"));
    }
}
