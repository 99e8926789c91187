// Copyright 2026 the gentsuki-dojo authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::provider::QuestionProvider;
use crate::provider::fallback::ENCOURAGEMENT_EMPTY;
use crate::provider::fallback::ENCOURAGEMENT_FAILED;
use crate::provider::fallback::fallback_questions;
use crate::types::question::Question;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// How long to wait for question generation.
const QUESTIONS_TIMEOUT: Duration = Duration::from_secs(30);

/// How long to wait for the feedback message. Kept short: the result
/// screen polls for it and should not show the placeholder for long.
const ENCOURAGEMENT_TIMEOUT: Duration = Duration::from_secs(10);

const QUESTIONS_INSTRUCTION: &str = "\
あなたは日本の原付免許（原動機付自転車免許）の学科試験の鬼教官です。
生徒を合格させるために、特に間違いやすい「ひっかけ問題」や「重要ルール」を中心に出題してください。

以下のトピックを重点的に含めてください：
1. 追い越し禁止場所と追い抜き
2. 徐行すべき場所 vs 一時停止すべき場所
3. 二段階右折（フックターン）のルールと適用場所
4. 駐停車禁止場所
5. 緊急自動車への対応

問題文は日本語で、明確かつ簡潔に作成してください。
各問題には、正誤（○か×か）と、なぜそうなるのかの分かりやすい解説を付けてください。
解説は「〜だから、○です。」「〜は間違いです。正しくは〜です。」のように初学者にも優しく教えてください。";

const ENCOURAGEMENT_INSTRUCTION: &str = "あなたは熱血かつ優しい自動車学校の教官です。生徒のテスト結果に基づいて、短いメッセージ（100文字以内）を送ってください。";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response contained no text")]
    NoText,
    #[error("no usable questions in response")]
    NoUsableQuestions,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// One item of the model's JSON payload, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    #[serde(default)]
    text: String,
    is_correct: Option<bool>,
    #[serde(default)]
    explanation: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Send a `generateContent` request and pull out the text of the first
    /// candidate.
    async fn generate(
        &self,
        body: serde_json::Value,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let response = self
            .client
            .post(format!("{API_BASE}/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let response: GenerateResponse = response.json().await?;
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(FetchError::NoText);
        }
        Ok(text)
    }

    async fn generate_questions(&self, count: usize) -> Result<Vec<Question>, FetchError> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": QUESTIONS_INSTRUCTION }] },
            "contents": [{ "parts": [{
                "text": format!("原付免許の学科試験の模擬問題をランダムに{count}問作成してください。")
            }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "text": {
                                "type": "STRING",
                                "description": "The quiz question text in Japanese.",
                            },
                            "isCorrect": {
                                "type": "BOOLEAN",
                                "description": "True if the answer is O (circle), false if the answer is X (cross).",
                            },
                            "explanation": {
                                "type": "STRING",
                                "description": "Detailed explanation of the answer in Japanese.",
                            },
                        },
                        "required": ["text", "isCorrect", "explanation"],
                    },
                },
            },
        });
        let text = self.generate(body, QUESTIONS_TIMEOUT).await?;
        parse_questions(&text)
    }
}

/// Parse the model's JSON payload into validated questions. Items missing
/// a field or with empty text are dropped rather than failing the batch;
/// a batch where nothing survives counts as a failed fetch.
fn parse_questions(text: &str) -> Result<Vec<Question>, FetchError> {
    let items: Vec<GeneratedQuestion> = serde_json::from_str(text)?;
    let stamp = chrono::Utc::now().timestamp_millis();
    let mut questions = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        let Some(answer) = item.is_correct else {
            log::debug!("dropping generated question {index}: missing isCorrect");
            continue;
        };
        if item.text.trim().is_empty() || item.explanation.trim().is_empty() {
            log::debug!("dropping generated question {index}: empty text or explanation");
            continue;
        }
        questions.push(Question::new(
            format!("q-{stamp}-{index}"),
            item.text,
            answer,
            item.explanation,
        ));
    }
    if questions.is_empty() {
        return Err(FetchError::NoUsableQuestions);
    }
    Ok(questions)
}

impl QuestionProvider for GeminiProvider {
    fn fetch_questions(&self, count: usize) -> impl Future<Output = Vec<Question>> + Send {
        async move {
            match self.generate_questions(count).await {
                Ok(questions) => {
                    log::debug!("generated {} questions", questions.len());
                    questions
                }
                Err(e) => {
                    log::warn!("question generation failed, using the fallback set: {e}");
                    fallback_questions()
                }
            }
        }
    }

    fn fetch_encouragement(
        &self,
        score: usize,
        total: usize,
    ) -> impl Future<Output = String> + Send {
        async move {
            let body = json!({
                "systemInstruction": { "parts": [{ "text": ENCOURAGEMENT_INSTRUCTION }] },
                "contents": [{ "parts": [{
                    "text": format!("テスト結果は {total}問中 {score}問正解でした。この結果に対するフィードバックと応援メッセージを日本語で作成してください。")
                }] }],
            });
            match self.generate(body, ENCOURAGEMENT_TIMEOUT).await {
                Ok(text) => text,
                Err(FetchError::NoText) => ENCOURAGEMENT_EMPTY.to_string(),
                Err(e) => {
                    log::warn!("encouragement fetch failed, using the fallback message: {e}");
                    ENCOURAGEMENT_FAILED.to_string()
                }
            }
        }
    }
}
