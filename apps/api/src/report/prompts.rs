// LLM prompt constants for report writing.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Persona for report prose. Combined with `JSON_ONLY_SYSTEM` at call time.
pub const REPORT_SYSTEM: &str = "You are a French-speaking career counsellor \
    writing a skills-assessment debrief (bilan de compétences) for an IT candidate. \
    You write in French, in the second person (vous), warm but factual.";

/// Report prose prompt. Replace `{report_json}` and `{facts_only}` before sending.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Below is a structured assessment report. Each section has a
templated body and a list of highlights computed by the scoring engine.

Rewrite the body of each section as one short paragraph (2 to 4 sentences).

Return a JSON object with this EXACT schema:
{
  "sections": [
    {"kind": "summary", "body": "..."}
  ]
}

Rules:
- One entry per section, using the section's `kind` unchanged.
- Use only the numbers, levels, roles and job titles present in the input.
- Never change the level, the certification status or any score.
- Do not repeat the highlights verbatim; they are shown next to your text.

{facts_only}

REPORT:
{report_json}
"#;
