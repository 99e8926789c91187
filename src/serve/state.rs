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

use std::sync::Arc;
use std::sync::Mutex;

use crate::provider::QuestionProvider;
use crate::session::Session;

/// Shared server state: the single session instance behind a mutex, and
/// the provider used by the background fetch tasks. Guards are never held
/// across an await point.
#[derive(Clone)]
pub struct ServerState<P: QuestionProvider> {
    pub provider: P,
    pub session: Arc<Mutex<Session>>,
}
