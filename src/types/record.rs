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

use crate::types::question::Question;

/// One committed answer. Created exactly once per question, in question
/// order, and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct AnswerRecord {
    question: Question,
    user_answer: bool,
    is_correct: bool,
}

impl AnswerRecord {
    pub fn new(question: Question, user_answer: bool) -> Self {
        let is_correct = user_answer == question.answer();
        Self {
            question,
            user_answer,
            is_correct,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn user_answer(&self) -> bool {
        self.user_answer
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correctness_is_derived_from_the_question() {
        let truthy = Question::new("q-1", "text", true, "explanation");
        let falsy = Question::new("q-2", "text", false, "explanation");
        for (question, user_answer) in [
            (&truthy, true),
            (&truthy, false),
            (&falsy, true),
            (&falsy, false),
        ] {
            let record = AnswerRecord::new(question.clone(), user_answer);
            assert_eq!(record.is_correct(), user_answer == question.answer());
            assert_eq!(record.user_answer(), user_answer);
        }
    }
}
