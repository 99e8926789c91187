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

/// A true/false exam question. Immutable once created; the provider is
/// responsible for validating the content before construction.
#[derive(Clone, Debug)]
pub struct Question {
    /// Opaque identifier, unique within a session.
    id: String,
    /// The statement the examinee judges as true or false.
    text: String,
    /// Whether the statement is true (○) or false (×).
    answer: bool,
    /// Why the statement is true or false.
    explanation: String,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        answer: bool,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            answer,
            explanation: explanation.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer(&self) -> bool {
        self.answer
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}
