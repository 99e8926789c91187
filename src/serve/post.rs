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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::provider::QuestionProvider;
use crate::serve::state::ServerState;
use crate::session::Advanced;
use crate::session::Generation;

/// Question count used when the form somehow omits one.
const DEFAULT_COUNT: usize = 10;

#[derive(Debug, Deserialize)]
enum Action {
    Start,
    AnswerTrue,
    AnswerFalse,
    Next,
    Retry,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    count: Option<usize>,
}

pub async fn post_handler<P: QuestionProvider>(
    State(state): State<ServerState<P>>,
    Form(form): Form<FormData>,
) -> Redirect {
    match form.action {
        Action::Start => {
            let count = form.count.unwrap_or(DEFAULT_COUNT);
            let begun = {
                let mut session = state.session.lock().unwrap();
                session.begin(count)
            };
            match begun {
                Ok(generation) => spawn_question_fetch(&state, generation, count),
                Err(e) => log::error!("start rejected: {e}"),
            }
        }
        Action::AnswerTrue | Action::AnswerFalse => {
            let user_answer = matches!(form.action, Action::AnswerTrue);
            let mut session = state.session.lock().unwrap();
            if let Err(e) = session.answer(user_answer) {
                log::error!("answer rejected: {e}");
            }
        }
        Action::Next => {
            let advanced = {
                let mut session = state.session.lock().unwrap();
                let advanced = session.advance();
                advanced.map(|a| (a, session.generation()))
            };
            match advanced {
                Ok((Advanced::Finished { score, total }, generation)) => {
                    spawn_encouragement_fetch(&state, generation, score, total);
                }
                Ok((Advanced::Next, _)) => {}
                Err(e) => log::error!("advance rejected: {e}"),
            }
        }
        Action::Retry => {
            state.session.lock().unwrap().reset();
        }
    }
    Redirect::to("/")
}

fn spawn_question_fetch<P: QuestionProvider>(
    state: &ServerState<P>,
    generation: Generation,
    count: usize,
) {
    let state = state.clone();
    tokio::spawn(async move {
        let questions = state.provider.fetch_questions(count).await;
        let resolution = state
            .session
            .lock()
            .unwrap()
            .resolve_questions(generation, questions);
        log::debug!("question fetch resolved: {resolution:?}");
    });
}

fn spawn_encouragement_fetch<P: QuestionProvider>(
    state: &ServerState<P>,
    generation: Generation,
    score: usize,
    total: usize,
) {
    let state = state.clone();
    tokio::spawn(async move {
        let message = state.provider.fetch_encouragement(score, total).await;
        let applied = state
            .session
            .lock()
            .unwrap()
            .attach_message(generation, message);
        if !applied {
            log::debug!("discarding a stale encouragement message");
        }
    });
}
