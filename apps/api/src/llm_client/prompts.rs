// Shared prompt fragments used by every flow.
// Each flow's own template lives in flows/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prompt that asks for Markdown inside a JSON string field.
pub const MARKDOWN_SUBSET_INSTRUCTION: &str = "\
    Markdown inside string fields may use ONLY: '# ', '## ', '### ' headings at line start, \
    '- ' bullets at line start, a leading '**bold**' lead-in, [text](url) links, and blank lines. \
    Escape newlines as \\n inside the JSON string.";

/// Truthfulness constraint shared by the resume-writing flows.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    Keep truthful: do NOT fabricate experience, dates, or employers.";
