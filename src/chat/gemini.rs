// Gemini streaming client
//
// One outbound surface: POST to the generative-language API's
// streamGenerateContent endpoint with alt=sse. The response is a lazy,
// finite, non-restartable SSE stream of JSON chunks; text fragments are
// forwarded over an mpsc channel as they arrive.
//
// The REST API keeps no server-side chat session, so the full completed
// conversation history is sent with every call.

use super::ChatEvent;
use anyhow::{anyhow, Context, Result};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Persona and formatting rules for the assistant, verbatim from the
/// product definition of the embedded analyst.
const SYSTEM_INSTRUCTION: &str = "你是一位拥有10年经验的资深电商数据分析师和产品经理。
你被嵌入在一个名为“生鲜智能BI”的仪表盘工具中。
你的能力包括：
1. 分析销售趋势、转化率和库存周转率。
2. 提供日报、周报和月报。
3. 诊断销售下滑原因并提出营销策略建议。
4. 深入分析特定商品的表现。

回答要求：
- 使用中文回答。
- 态度专业、简洁，基于数据说话。
- 使用要点（Bullet points）提高可读性。
- 如果用户询问屏幕上的数据，请基于标准的电商指标（GMV, UV, PV, CVR, 退款率等）进行分析。
- 涉及到金额时使用人民币符号 (¥)。
- 可以使用Markdown格式化回答。
";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

// Wire format: https://ai.google.dev/api/generate-content

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base,
            model,
        }
    }

    /// Send the conversation and forward each text fragment through
    /// `tx` as it arrives. The receiving side owns accumulation; this
    /// only reports whether the stream finished cleanly.
    ///
    /// `history` is (is_user, text) pairs in order, ending with the
    /// message being answered. If the TUI has gone away the channel is
    /// closed and forwarding stops silently.
    pub async fn stream_reply(
        &self,
        history: &[(bool, String)],
        tx: &mpsc::Sender<ChatEvent>,
    ) -> Result<()> {
        let contents = history
            .iter()
            .map(|(is_user, text)| Content {
                role: Some(if *is_user { "user" } else { "model" }.to_string()),
                parts: vec![Part { text: text.clone() }],
            })
            .collect();

        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents,
        };

        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse&key={}",
            self.api_base, self.model, self.api_key
        );

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to reach Gemini API")?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, text));
        }

        let mut stream = resp.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Gemini stream interrupted")?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // SSE frames are newline-delimited `data: {json}` lines
            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim().to_string();
                buffer.drain(..=pos);

                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };

                let parsed: StreamResponse = match serde_json::from_str(data) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        tracing::debug!("skipping unparseable SSE chunk: {}", e);
                        continue;
                    }
                };

                for text in extract_text(&parsed) {
                    // Receiver dropped means the view is gone - stop
                    // forwarding, nothing left to update
                    if tx.send(ChatEvent::Fragment(text)).await.is_err() {
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }
}

/// Pull the text parts out of one stream chunk, in order
fn extract_text(resp: &StreamResponse) -> Vec<String> {
    resp.candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|p| !p.text.is_empty())
                .map(|p| p.text.clone())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_fragments_in_order() {
        let chunk: StreamResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"你好"},{"text":"，老板"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&chunk), vec!["你好", "，老板"]);
    }

    #[test]
    fn tolerates_empty_and_finish_chunks() {
        let empty: StreamResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(extract_text(&empty).is_empty());

        let finish: StreamResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"STOP"}]}"#).unwrap();
        assert!(extract_text(&finish).is_empty());
    }

    #[test]
    fn request_serializes_roles() {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: "persona".to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: "问题".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "persona");
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_err_without_fragments() {
        // Nothing listens on this port; the request fails before any
        // SSE frame exists
        let client = GeminiClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:9".to_string(),
            "gemini-2.5-flash".to_string(),
        );
        let (tx, mut rx) = mpsc::channel::<ChatEvent>(8);

        let history = vec![(true, "今日GMV？".to_string())];
        let outcome = client.stream_reply(&history, &tx).await;

        assert!(outcome.is_err());
        drop(tx);
        assert!(rx.recv().await.is_none());
    }
}
