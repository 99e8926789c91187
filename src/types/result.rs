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

use crate::types::record::AnswerRecord;

/// The passing criterion of the real exam: 90% of answers correct.
pub const PASS_THRESHOLD: u32 = 90;

/// The outcome of a completed quiz, computed once by folding the history.
#[derive(Clone, Debug)]
pub struct QuizResult {
    score: usize,
    total: usize,
    history: Vec<AnswerRecord>,
}

impl QuizResult {
    pub fn from_history(history: Vec<AnswerRecord>) -> Self {
        let score = history.iter().filter(|r| r.is_correct()).count();
        let total = history.len();
        Self {
            score,
            total,
            history,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Rounded percentage of correct answers. A quiz never starts with
    /// zero questions, so `total` is at least 1.
    pub fn percentage(&self) -> u32 {
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn passed(&self) -> bool {
        self.percentage() >= PASS_THRESHOLD
    }

    /// Incorrect answers in their original order, each paired with its
    /// original 1-based position in the history.
    pub fn mistakes(&self) -> Vec<(usize, &AnswerRecord)> {
        self.history
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_correct())
            .map(|(index, record)| (index + 1, record))
            .collect()
    }
}
