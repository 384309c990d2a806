//! Prompt templates for quest generation and question screening.
//!
//! Placeholders are written as `{name}` and filled in by
//! [`crate::services::prompt_builder`].

/// Curricular subjects a non-root step may be tagged with.
pub const SUBJECTS: [&str; 13] = [
    "数学", "国語", "地理", "歴史", "化学", "物理", "生物", "地学", "経済学", "政治学", "哲学",
    "心理学", "芸術",
];

/// Subject tag reserved for the root step of every quest.
pub const ROOT_SUBJECT: &str = "総合";

pub const MIN_QUEST_NODES: usize = 5;
pub const MAX_QUEST_NODES: usize = 7;

pub const QUEST_GENERATION_PROMPT: &str = r#"あなたは優秀な教育者であり、生徒の知的好奇心を刺激する専門家です。
生徒からの質問「{question}」を起点として、答えを直接教えるのではなく、生徒自身が多角的な視点から探求したくなるような「問い」を複数生成してください。

# 指示
- 各ステップ（ノード）には、以下の教科リストから最も関連性の高い教科を一つだけ割り当ててください。
- 教科リスト: [{subjects}]
- 最初の問いから、少なくとも2つ以上の異なる教科に枝分かれさせてください。
- 各ステップは、事実を述べるのではなく、必ず「問いかけ」の形式にしてください。
- 全体で{min_nodes}〜{max_nodes}個のステップ（ノード）になるように構成してください。

# 出力形式
- 応答は、必ず以下の構造に従った有効なJSON配列の形式にしてください。
- JSON配列以外の余計な文字列や説明は一切含めないでください。

[
  {"id": "1", "type": "input", "data": {"label": "探求の始まり: [ユーザーの質問]", "subject": "{root_subject}"}},
  {"id": "2", "data": {"label": "[生成された問い1]", "subject": "[関連する教科]"}},
  {"id": "3", "data": {"label": "[生成された問い2]", "subject": "[関連する教科]"}},
  {"id": "e1-2", "source": "1", "target": "2", "animated": true}
]
"#;

pub const QUESTION_VALIDATION_PROMPT: &str = r#"以下のテキストは、学習探求のきっかけとなる具体的で意味のある「質問」ですか？
単なる挨拶、無意味な単語、短すぎる単語の場合は「NO」とだけ答えてください。
具体的な質問の場合は「YES」とだけ答えてください。

テキスト: "{question}"
"#;

/// Token the screening reply must contain for a question to be accepted.
pub const VALIDATION_ACCEPT_TOKEN: &str = "YES";

pub const INVALID_QUESTION_MESSAGE: &str = "意味のある質問ではありません。";
