/// Description written for the `fallback` intent.
pub const FALLBACK_DESCRIPTION: &str = "User say something not relate to question";

/// Derives the `INTENT_DESCRIPTION` of an intent row from its example utterances.
///
/// `silence` never gets a description and `fallback` always gets
/// [`FALLBACK_DESCRIPTION`] (both case-insensitive). Otherwise a delimited list of
/// examples (a comma, or four or more double quotes) is summarized by its first
/// element as `user say something like "<first>"`, and a single example is used
/// verbatim. The result depends only on the arguments.
pub fn describe_intent(
    intent: &str,
    user_examples: Option<&str>,
    _loop_count: Option<u32>,
) -> Option<String> {
    let intent = intent.to_lowercase();
    if intent == "silence" {
        return None;
    }
    if intent == "fallback" {
        return Some(FALLBACK_DESCRIPTION.to_string());
    }

    let examples = user_examples.map(str::trim).filter(|e| !e.is_empty())?;
    if examples.contains(',') || examples.matches('"').count() >= 4 {
        Some(format!(
            "user say something like \"{}\"",
            first_example(examples)
        ))
    } else {
        Some(examples.to_string())
    }
}

fn first_example(examples: &str) -> &str {
    if examples.starts_with('"') {
        examples
            .split("\",")
            .next()
            .unwrap_or(examples)
            .trim()
            .trim_matches('"')
    } else {
        examples.split(',').next().unwrap_or(examples).trim()
    }
}

/// `fallback` and `silence` are written lower-case; every other intent keeps its spelling.
pub fn normalize_intent_name(intent: &str) -> String {
    let lowered = intent.to_lowercase();
    if lowered == "fallback" || lowered == "silence" {
        lowered
    } else {
        intent.to_string()
    }
}
