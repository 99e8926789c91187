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

use clap::Parser;

use crate::error::Fallible;
use crate::provider::gemini::GeminiProvider;
use crate::serve::server::start_server;

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Start the exam server and open the browser.
    Serve {
        /// Port to serve on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Gemini model used for question generation.
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve { port, model } => {
            let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
            if api_key.is_empty() {
                log::warn!(
                    "GEMINI_API_KEY is not set. Every exam will use the built-in fallback questions."
                );
            }
            let provider = GeminiProvider::new(api_key, model);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(start_server(port, provider))
        }
    }
}
