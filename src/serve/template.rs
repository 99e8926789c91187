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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

/// Page shell. Screens that are waiting on a background fetch pass
/// `refresh` so the page reloads itself until the fetch lands.
pub fn page_template(body: Markup, refresh: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ja" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "原付免許合格道場" }
                @if refresh {
                    meta http-equiv="refresh" content="1";
                }
                link rel="stylesheet" href="/style.css";
            }
            body {
                header.site-header {
                    span.logo { "🔰" }
                    span.site-title { "原付免許合格道場" }
                }
                main {
                    (body)
                }
                footer {
                    p { "© 2026 Gentsuki Dojo - Powered by Gemini" }
                }
            }
        }
    }
}
