//! Prompt templates for the request flow

use crate::orchestration::value_objects::{DraftAnalysis, EnrichmentItem, ToolOutput};
use crate::tool::entities::Command;
use serde_json::Value;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt paired with every structured-output request
    pub fn structured_system() -> &'static str {
        r#"You are a JSON-only response assistant. Never include explanations or notes.
Only output valid JSON that matches the requested schema exactly. Do not escape underscores or other characters."#
    }

    /// Wrap a prompt with the schema it must answer in
    pub fn structured_prompt(prompt: &str, schema: &Value) -> String {
        let schema = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
        format!(
            r#"Follow this schema exactly:
{}

For the user input: {}

Rules:
- Return valid JSON matching the schema
- Do not escape special characters
- No markdown formatting
- No explanations outside JSON"#,
            schema, prompt
        )
    }

    /// Planning prompt: command catalog, extraction rules, and worked examples
    pub fn planning_prompt(user_input: &str) -> String {
        let mut catalog = String::new();
        for command in Command::ALL {
            catalog.push_str(&format!("- {}: {}\n", command.as_str(), command.description()));
        }

        format!(
            r#"Based on the user input: '{user_input}'
Determine which tools are needed to provide a complete answer.
Available tools:
{catalog}
Parameter handling rules:
1. For weather and location-based queries:
   - Extract city or country name if present
   - If no location is specified, use empty params to get default location
2. For time queries:
   - Extract timezone or city/country if present
   - If no location is specified, use empty params to get local time
3. For news:
   - Extract specific topic if present
   - If no topic specified, use empty params for default topic
4. For search:
   - Use the entire query if no other specific parameters are found

Return a JSON array of commands and their parameters.

Examples:
"weather in London" -> [{{"command": "weather", "params": {{"location": "London"}}}}]
"weather" -> [{{"command": "weather", "params": {{}}}}]
"what time is it in Tokyo" -> [{{"command": "time", "params": {{"timezone": "Asia/Tokyo"}}}}]
"what's the weather and time in Paris" -> [
    {{"command": "weather", "params": {{"location": "Paris"}}}},
    {{"command": "time", "params": {{"timezone": "Europe/Paris"}}}}
]
"news about AI" -> [{{"command": "news", "params": {{"topic": "AI"}}}}]
"current time" -> [{{"command": "time", "params": {{}}}}]"#
        )
    }

    /// Drafting prompt: the question plus every tool output from the plan
    pub fn draft_prompt(user_input: &str, outputs: &[ToolOutput]) -> String {
        let data = serde_json::to_string(outputs).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"Based on:
User question: "{}"
Available data: {}

1. Analyze if this data is sufficient to answer the question
2. Identify any suggestions or recommendations you want to make
3. Return in JSON format:
{{
    "draft_answer": string,
    "suggestions": array of strings,
    "needs_search": array of strings with search queries for each suggestion
}}"#,
            user_input, data
        )
    }

    /// System prompt for the final answer
    pub fn final_system() -> &'static str {
        r#"You are a helpful assistant. Provide clear, concise answers that include both direct responses and relevant suggestions."#
    }

    /// Synthesis prompt combining draft, suggestions, and enrichment data
    pub fn final_prompt(draft: &DraftAnalysis, enrichment: &[EnrichmentItem]) -> String {
        let suggestions =
            serde_json::to_string(&draft.suggestions).unwrap_or_else(|_| "[]".to_string());
        let additional = serde_json::to_string(enrichment).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"Original answer: {}
Suggestions to address: {}
Additional information: {}

Provide a complete response that:
1. Starts with the main answer to the user's question
2. Includes relevant suggestions with supporting information
3. Keeps each part concise but informative
4. Uses natural, conversational language
5. Total response should be 6-7 sentences maximum"#,
            draft.draft_answer, suggestions, additional
        )
    }
}
