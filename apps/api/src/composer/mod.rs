//! Prompt Composer — builds the system instruction from knowledge text, a detail level,
//! and (for the consultant persona) a business context.
//!
//! Pure: no I/O, same inputs always produce the same string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::knowledge::Persona;

pub mod prompts;

use prompts::{
    CONSULTANT_RESPONSE_OUTLINE, CONSULTANT_SYSTEM_TEMPLATE, DEFAULT_BUSINESS_CONTEXT,
    DETAIL_FRAGMENTS, MENTOR_SYSTEM_TEMPLATE, QUESTION_TEMPLATE,
};

/// Level used when the caller does not pick one.
pub const DEFAULT_DETAIL_LEVEL: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("detail level must be between 1 and 5, got {0}")]
    InvalidLevel(i64),
}

/// How much depth and structure a response should have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailLevel {
    Overview = 1,
    Brief = 2,
    Standard = 3,
    Detailed = 4,
    Comprehensive = 5,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 5] = [
        DetailLevel::Overview,
        DetailLevel::Brief,
        DetailLevel::Standard,
        DetailLevel::Detailed,
        DetailLevel::Comprehensive,
    ];

    /// The canned instruction fragment for this level.
    pub fn fragment(self) -> &'static str {
        DETAIL_FRAGMENTS[self as usize - 1]
    }
}

impl TryFrom<i64> for DetailLevel {
    type Error = ComposeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DetailLevel::Overview),
            2 => Ok(DetailLevel::Brief),
            3 => Ok(DetailLevel::Standard),
            4 => Ok(DetailLevel::Detailed),
            5 => Ok(DetailLevel::Comprehensive),
            other => Err(ComposeError::InvalidLevel(other)),
        }
    }
}

/// Builds the system instruction for `persona`.
///
/// `level` is validated here because it arrives unchecked from the request body.
/// `business_context` is only used by the consultant persona; blank means
/// [`DEFAULT_BUSINESS_CONTEXT`].
pub fn compose(
    persona: Persona,
    knowledge: &str,
    level: i64,
    business_context: Option<&str>,
) -> Result<String, ComposeError> {
    let level = DetailLevel::try_from(level)?;

    let instruction = match persona {
        Persona::Mentor => fill(
            MENTOR_SYSTEM_TEMPLATE,
            &[
                ("knowledge", knowledge),
                ("detail_instruction", level.fragment()),
            ],
        ),
        Persona::Consultant => {
            let business_context = business_context
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_BUSINESS_CONTEXT);
            fill(
                CONSULTANT_SYSTEM_TEMPLATE,
                &[
                    ("knowledge", knowledge),
                    ("business_context", business_context),
                    ("detail_instruction", level.fragment()),
                    ("response_outline", CONSULTANT_RESPONSE_OUTLINE),
                ],
            )
        }
    };

    Ok(instruction)
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
///
/// Inserted values are never rescanned, so caller text containing `{knowledge}`
/// or similar lands verbatim. Unknown placeholders are left as-is.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after.find('}').and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Wraps a raw question the way the completion service expects the user turn.
pub fn user_message(question: &str) -> String {
    fill(QUESTION_TEMPLATE, &[("question", question)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWLEDGE: &str = "# Module 1\n- {braces} stay literal\n- ownership";

    #[test]
    fn test_every_level_has_non_empty_fragment() {
        for level in DetailLevel::ALL {
            assert!(!level.fragment().trim().is_empty(), "{level:?} fragment empty");
        }
    }

    #[test]
    fn test_fragments_are_distinct() {
        for (i, a) in DETAIL_FRAGMENTS.iter().enumerate() {
            for b in DETAIL_FRAGMENTS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_compose_contains_knowledge_for_all_levels() {
        for persona in [Persona::Mentor, Persona::Consultant] {
            for level in 1..=5 {
                let out = compose(persona, KNOWLEDGE, level, None).unwrap();
                assert!(!out.is_empty());
                assert!(
                    out.contains(KNOWLEDGE),
                    "{persona} level {level} lost the knowledge text"
                );
                let fragment = DetailLevel::try_from(level).unwrap().fragment();
                assert!(out.contains(fragment));
            }
        }
    }

    #[test]
    fn test_compose_rejects_out_of_range_levels() {
        assert_eq!(
            compose(Persona::Mentor, KNOWLEDGE, 0, None),
            Err(ComposeError::InvalidLevel(0))
        );
        assert_eq!(
            compose(Persona::Consultant, KNOWLEDGE, 6, Some("Retail")),
            Err(ComposeError::InvalidLevel(6))
        );
        assert!(compose(Persona::Mentor, KNOWLEDGE, -1, None).is_err());
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose(Persona::Consultant, KNOWLEDGE, 4, Some("Coffee roaster")).unwrap();
        let b = compose(Persona::Consultant, KNOWLEDGE, 4, Some("Coffee roaster")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mentor_has_persona_preamble_and_no_placeholders() {
        let out = compose(Persona::Mentor, "curriculum body", 2, None).unwrap();
        assert!(out.starts_with("You are a helpful assistant and a personal mentor."));
        assert!(!out.contains("{detail_instruction}"));
        assert!(!out.contains("{knowledge}"));
    }

    #[test]
    fn test_mentor_ignores_business_context() {
        let with = compose(Persona::Mentor, "body", 3, Some("Steel mill")).unwrap();
        let without = compose(Persona::Mentor, "body", 3, None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_consultant_embeds_business_context() {
        let out = compose(Persona::Consultant, "framework", 3, Some("  Regional bakery chain ")).unwrap();
        assert!(out.contains("BUSINESS CONTEXT:\nRegional bakery chain\n"));
        assert!(!out.contains(DEFAULT_BUSINESS_CONTEXT));
    }

    #[test]
    fn test_consultant_defaults_blank_business_context() {
        for ctx in [None, Some(""), Some("   ")] {
            let out = compose(Persona::Consultant, "framework", 3, ctx).unwrap();
            assert!(out.contains(DEFAULT_BUSINESS_CONTEXT));
        }
    }

    #[test]
    fn test_consultant_outline_is_level_independent() {
        for level in 1..=5 {
            let out = compose(Persona::Consultant, "framework", level, None).unwrap();
            assert!(out.contains(CONSULTANT_RESPONSE_OUTLINE));
            for part in ["Opportunities", "Strategy", "Roadmap", "Metrics", "Risk"] {
                assert!(out.contains(part), "missing outline part {part}");
            }
        }
    }

    #[test]
    fn test_business_context_placeholders_stay_literal() {
        let ctx = "We sell {knowledge} kits and {detail_instruction} boxes";
        let out = compose(Persona::Consultant, "FRAMEWORK", 3, Some(ctx)).unwrap();
        assert!(out.contains(&format!("BUSINESS CONTEXT:\n{ctx}\n")));
        assert_eq!(out.matches("FRAMEWORK").count(), 1);
    }

    #[test]
    fn test_knowledge_placeholders_stay_literal() {
        let knowledge = "Section {business_context} and {response_outline}";
        let out = compose(Persona::Consultant, knowledge, 2, Some("Bakery")).unwrap();
        assert!(out.contains(knowledge));
        assert_eq!(out.matches(CONSULTANT_RESPONSE_OUTLINE).count(), 1);
    }

    #[test]
    fn test_fill_leaves_unknown_and_unclosed_braces() {
        assert_eq!(fill("a {x} {y} {", &[("x", "1")]), "a 1 {y} {");
        assert_eq!(fill("{x}{x}", &[("x", "{x}")]), "{x}{x}");
    }

    #[test]
    fn test_user_message_keeps_braces_in_question() {
        assert_eq!(user_message("what is {question}?"), "Question: what is {question}?");
    }

    #[test]
    fn test_user_message_wraps_question() {
        assert_eq!(user_message("Explain X"), "Question: Explain X");
    }
}
