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

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use serde::Deserialize;

use crate::provider::QuestionProvider;
use crate::serve::state::ServerState;
use crate::serve::template::page_template;
use crate::session::Phase;
use crate::session::QuizPhase;
use crate::session::ResultPhase;
use crate::types::record::AnswerRecord;

#[derive(Deserialize)]
pub struct ViewQuery {
    mistakes: Option<u8>,
}

pub async fn get_handler<P: QuestionProvider>(
    State(state): State<ServerState<P>>,
    Query(query): Query<ViewQuery>,
) -> (StatusCode, Html<String>) {
    let session = state.session.lock().unwrap();
    let mistakes_only = query.mistakes == Some(1);
    let (body, refresh) = match session.phase() {
        Phase::Start { notice } => (start_view(*notice), false),
        Phase::Loading { .. } => (loading_view(), true),
        Phase::Quiz(quiz) => (quiz_view(quiz), false),
        // Keep refreshing the result screen until the instructor's
        // message has arrived.
        Phase::Result(result) => (
            result_view(result, mistakes_only),
            result.message().is_none(),
        ),
    };
    let html = page_template(body, refresh);
    (StatusCode::OK, Html(html.into_string()))
}

fn start_view(notice: Option<&str>) -> Markup {
    html! {
        div.start {
            @if let Some(notice) = notice {
                div.notice { (notice) }
            }
            div.panel {
                h1 { "原付免許" br; "合格道場" }
                p.lead { "Gemini教官が厳選した" br; "ひっかけ問題に挑戦！" }
                ul.features {
                    li { "最新の交通ルールに対応した問題をランダムに出題" }
                    li { "回答後すぐに詳しい解説を表示" }
                }
                form action="/" method="post" {
                    input type="hidden" name="action" value="Start";
                    p.count-label { "問題数を選択してください" }
                    div.count-buttons {
                        button type="submit" name="count" value="5" { "5問" }
                        button type="submit" name="count" value="10" { "10問" }
                        button type="submit" name="count" value="15" { "15問" }
                    }
                }
            }
        }
    }
}

fn loading_view() -> Markup {
    html! {
        div.loading {
            div.spinner {}
            p.loading-message { "教官が問題を作成中..." }
            p.loading-hint { "Gemini AI powered" }
        }
    }
}

fn quiz_view(quiz: &QuizPhase) -> Markup {
    let number = quiz.position() + 1;
    let total = quiz.len();
    let question = quiz.current_question();
    let progress = format!("width: {}%;", quiz.position() * 100 / total);
    html! {
        div.quiz {
            div.quiz-header {
                span.question-number { "第 " (number) " 問" }
                span.question-total { "全 " (total) " 問" }
            }
            div.progress-bar {
                div.progress-fill style=(progress) {}
            }
            div.question-card {
                h2 { (question.text()) }
            }
            @match quiz.current_record() {
                None => {
                    form.answers action="/" method="post" {
                        button.maru type="submit" name="action" value="AnswerTrue" {
                            span.mark { "○" }
                            span.label { "正しい" }
                        }
                        button.batsu type="submit" name="action" value="AnswerFalse" {
                            span.mark { "×" }
                            span.label { "間違い" }
                        }
                    }
                }
                Some(record) => {
                    @let correct = record.is_correct();
                    div.verdict .correct[correct] .wrong[!correct] {
                        h3 { @if correct { "正解！" } @else { "不正解..." } }
                        p.explanation-label { "Gemini教官の解説" }
                        p.explanation { (question.explanation()) }
                    }
                    form.next action="/" method="post" {
                        button type="submit" name="action" value="Next" {
                            @if quiz.is_last() { "結果を見る" } @else { "次の問題へ" }
                        }
                    }
                }
            }
        }
    }
}

fn result_view(result: &ResultPhase, mistakes_only: bool) -> Markup {
    let quiz_result = result.result();
    let percentage = quiz_result.percentage();
    let passed = quiz_result.passed();
    let has_mistakes = quiz_result.score() < quiz_result.total();
    let entries: Vec<(usize, &AnswerRecord)> = if mistakes_only {
        quiz_result.mistakes()
    } else {
        quiz_result
            .history()
            .iter()
            .enumerate()
            .map(|(index, record)| (index + 1, record))
            .collect()
    };
    html! {
        div.result {
            div.score-panel {
                h2 { "試験結果" }
                div.badge .passed[passed] .failed[!passed] {
                    @if passed { "合格" } @else { "不合格" }
                }
                div.score {
                    (quiz_result.score())
                    span.score-total { "/" (quiz_result.total()) }
                }
                div.percentage { "正答率 " (percentage) "%" }
            }
            div.message-panel {
                h3 { "Gemini教官より" }
                @match result.message() {
                    Some(message) => {
                        p.message { "“" (message) "”" }
                    }
                    None => {
                        p.message.pending { "教官からのメッセージを受信中..." }
                    }
                }
            }
            div.review {
                div.review-header {
                    h3 { "回答の振り返り" }
                    @if has_mistakes {
                        @if mistakes_only {
                            a.filter href="/" { "全て表示" }
                        } @else {
                            a.filter href="/?mistakes=1" { "間違いのみ表示" }
                        }
                    }
                }
                @if entries.is_empty() {
                    div.review-empty { "表示する問題がありません" }
                }
                @for (position, record) in &entries {
                    div.review-item data-question-id=(record.question().id()) {
                        div.review-item-header {
                            span.position { "Q" (position) }
                            span.verdict-mark .correct[record.is_correct()] .wrong[!record.is_correct()] {
                                @if record.is_correct() { "○" } @else { "×" }
                            }
                        }
                        p.review-text { (record.question().text()) }
                        @if !record.is_correct() {
                            div.review-explanation {
                                p.correct-answer {
                                    "正解: "
                                    (if record.question().answer() { "○" } else { "×" })
                                }
                                p { (record.question().explanation()) }
                            }
                        }
                    }
                }
            }
            form.retry action="/" method="post" {
                button type="submit" name="action" value="Retry" { "もう一度挑戦する" }
            }
        }
    }
}
