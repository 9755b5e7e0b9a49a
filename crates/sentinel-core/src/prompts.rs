/// System-role framing: who the model is and what the report looks like.
/// The example steers formatting only; the output is never parsed.
pub const SYSTEM_PROMPT: &str = r#"You are a seasoned project manager. From the latest information about a project you receive, write a progress report for it. The report must start with "<ProjectName> progress report" and must contain these sections: time range, new features, major improvements, fixed issues.

Here is a reference example:
# LangChain progress report
## Time range: 2024-08-13 ~ 2024-08-18

## New features
- Added support for Chinese
- Added support for OpenAI function calling

## Major improvements
- Improved stream handling
- Improved routing and handoff

## Fixed issues
- Fixed a bug in the LLM proxy module
- Fixed a bug in the data processing module
"#;

/// Per-call instruction; the activity text is appended verbatim after it.
pub const USER_INSTRUCTION: &str = "Below is the latest progress of the project. Merge duplicate items by theme into a brief report containing at least: 1) new features; 2) major improvements; 3) fixed issues:\n\n";

/// Assemble the user message for `activity_text`.
pub fn build_user_prompt(activity_text: &str) -> String {
    let mut prompt = String::with_capacity(USER_INSTRUCTION.len() + activity_text.len());
    prompt.push_str(USER_INSTRUCTION);
    prompt.push_str(activity_text);
    prompt
}
