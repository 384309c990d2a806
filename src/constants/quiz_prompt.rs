//! Prompt templates for the per-step summary and fill-in-the-blank quiz.

pub const QUIZ_COUNT: usize = 3;

/// Marker the model is told to put where a key term was removed.
pub const BLANK_MARKER: &str = "[BLANK]";

pub const SUMMARY_PROMPT: &str = "「{quest_text}」という問いに対する答えの概要を、小中学生にも分かりやすいように300文字程度で簡潔に説明してください。";

pub const QUIZ_PROMPT: &str = r#"以下の文章を読んで、重要なキーワードを{blank}に置き換えた穴埋め問題を{count}問作成してください。
応答は必ず以下の形式の有効なJSONオブジェクトにしてください。JSON以外の文字列は絶対に含めないでください。
{
  "quizzes": [
    {"quiz": "問題文1", "answer": "答え1"},
    {"quiz": "問題文2", "answer": "答え2"},
    {"quiz": "問題文3", "answer": "答え3"}
  ]
}

文章:
{summary}
"#;

pub const DETAIL_FAILURE_MESSAGE: &str = "詳細の生成に失敗しました。";
