use crate::constants::{
    prompts::{
        MAX_QUEST_NODES, MIN_QUEST_NODES, QUESTION_VALIDATION_PROMPT, QUEST_GENERATION_PROMPT,
        ROOT_SUBJECT, SUBJECTS,
    },
    quiz_prompt::{BLANK_MARKER, QUIZ_COUNT, QUIZ_PROMPT, SUMMARY_PROMPT},
};

// Caller-supplied text is substituted last so that placeholder-looking text inside it
// is never expanded.

/// Prompt asking for the quest graph rooted at `question`.
pub fn quest_generation_prompt(question: &str) -> String {
    QUEST_GENERATION_PROMPT
        .replace("{subjects}", &SUBJECTS.join(", "))
        .replace("{min_nodes}", &MIN_QUEST_NODES.to_string())
        .replace("{max_nodes}", &MAX_QUEST_NODES.to_string())
        .replace("{root_subject}", ROOT_SUBJECT)
        .replace("{question}", question)
}

/// Yes/no prompt asking whether `question` is a meaningful inquiry.
pub fn question_validation_prompt(question: &str) -> String {
    QUESTION_VALIDATION_PROMPT.replace("{question}", question)
}

pub fn summary_prompt(quest_text: &str) -> String {
    SUMMARY_PROMPT.replace("{quest_text}", quest_text)
}

/// Quiz prompt built around the summary produced for the same step.
pub fn quiz_prompt(summary: &str) -> String {
    QUIZ_PROMPT
        .replace("{blank}", BLANK_MARKER)
        .replace("{count}", &QUIZ_COUNT.to_string())
        .replace("{summary}", summary)
}
