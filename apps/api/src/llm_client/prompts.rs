// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prompt that rewrites scored data as prose.
pub const FACTS_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Every figure, level, role and job title you mention must appear in the input. \
    Do NOT infer, round differently, or invent results. \
    Never state or imply a certification status other than the one given.";
