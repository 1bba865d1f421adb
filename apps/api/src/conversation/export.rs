//! Plain-text transcript export.

use chrono::{DateTime, Utc};

use crate::conversation::{Conversation, Role};
use crate::knowledge::Persona;

const USER_LABEL: &str = "USER";

/// Flattens the conversation into `"<LABEL>: <content>"` blocks separated by a blank line.
pub fn render_transcript(conversation: &Conversation, persona: Persona) -> String {
    conversation
        .replay()
        .map(|turn| {
            let label = match turn.role {
                Role::User => USER_LABEL,
                Role::Assistant => persona.assistant_label(),
            };
            format!("{label}: {}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Download name for a transcript, stamped with `now`.
pub fn transcript_filename(persona: Persona, now: DateTime<Utc>) -> String {
    format!(
        "{}_conversation_{}.txt",
        persona.as_str(),
        now.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_consultant_transcript() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "Hi");
        conv.append(Role::Assistant, "Hello");

        assert_eq!(
            render_transcript(&conv, Persona::Consultant),
            "USER: Hi\n\nCONSULTANT: Hello"
        );
    }

    #[test]
    fn test_mentor_transcript_keeps_content_verbatim() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "What is\nownership?");
        conv.append(Role::Assistant, "  Module 2.  ");

        assert_eq!(
            render_transcript(&conv, Persona::Mentor),
            "USER: What is\nownership?\n\nMENTOR:   Module 2.  "
        );
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(render_transcript(&Conversation::new(), Persona::Mentor), "");
    }

    #[test]
    fn test_filename_uses_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            transcript_filename(Persona::Consultant, now),
            "consultant_conversation_20240309_140507.txt"
        );
    }
}
