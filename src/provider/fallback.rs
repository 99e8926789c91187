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

/// Feedback used when the service answered but sent no text.
pub const ENCOURAGEMENT_EMPTY: &str = "お疲れ様でした！復習して完璧を目指しましょう！";

/// Feedback used when the service could not be reached at all.
pub const ENCOURAGEMENT_FAILED: &str = "お疲れ様でした！結果を確認して、また挑戦してくださいね！";

/// The pre-authored question set used when generation fails. Three
/// questions covering representative exam topics.
pub fn fallback_questions() -> Vec<Question> {
    vec![
        Question::new(
            "fallback-1",
            "原動機付自転車が二段階右折をしなければならない交差点では、右折の合図を出して交差点の側端に沿って徐行する。",
            true,
            "正解です。二段階右折が必要な場所では、交差点の側端に沿って徐行し、直進した先の地点で向きを変えます。",
        ),
        Question::new(
            "fallback-2",
            "信号機のある交差点で、信号が黄色の灯火に変わったとき、停止位置に近づいていたが安全に停止できない場合は、そのまま進むことができる。",
            true,
            "正解です。急ブレーキになり危険な場合は、そのまま通過することができます。",
        ),
        Question::new(
            "fallback-3",
            "原動機付自転車の法定速度は時速60キロメートルである。",
            false,
            "間違いです。原動機付自転車の法定最高速度は時速30キロメートルです。",
        ),
    ]
}
