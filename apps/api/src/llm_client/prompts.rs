// Prompt templates sent through the LLM client.

/// Keyword extraction prompt. Replace `{query}` before sending.
pub const KEYWORD_EXTRACTION_PROMPT: &str = "Extract key technical skills, job roles, and locations \
    from this user query: \"{query}\". \
    Return ONLY a comma-separated list of keywords. Do not include any other text. \
    Example output: Java, Spring Boot, New York";

pub fn keyword_extraction_prompt(query: &str) -> String {
    KEYWORD_EXTRACTION_PROMPT.replace("{query}", query)
}
