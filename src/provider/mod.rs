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

pub mod fallback;
pub mod gemini;

use std::future::Future;

use crate::types::question::Question;

/// A source of exam questions and post-exam feedback.
///
/// Implementations must never fail outward: any upstream error is absorbed
/// into fixed fallback content so the exam can always proceed.
pub trait QuestionProvider: Clone + Send + Sync + 'static {
    /// Fetch up to `count` freshly generated true/false questions. May
    /// return fewer; the session then simply runs a shorter exam.
    fn fetch_questions(&self, count: usize) -> impl Future<Output = Vec<Question>> + Send;

    /// Fetch a short feedback message for the given score.
    fn fetch_encouragement(
        &self,
        score: usize,
        total: usize,
    ) -> impl Future<Output = String> + Send;
}
