//! Static knowledge source — the reference document every system instruction is built around.
//!
//! Loaded exactly once at startup and shared read-only for the life of the process.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub mod texts;

use texts::{DEFAULT_CURRICULUM, SUSTAINABILITY_FRAMEWORK};

/// Which assistant this deployment plays. Selects the knowledge source,
/// the system instruction template, and the transcript labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Curriculum mentor. Knowledge comes from a file, with a built-in fallback.
    #[default]
    Mentor,
    /// Sustainability consultant. Knowledge is the built-in framework.
    Consultant,
}

#[derive(Debug, Error)]
#[error("unknown persona '{0}' (expected 'mentor' or 'consultant')")]
pub struct UnknownPersona(pub String);

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Mentor => "mentor",
            Persona::Consultant => "consultant",
        }
    }

    /// Label used for assistant turns in exported transcripts.
    pub fn assistant_label(&self) -> &'static str {
        match self {
            Persona::Mentor => "MENTOR",
            Persona::Consultant => "CONSULTANT",
        }
    }
}

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mentor" | "curriculum" => Ok(Persona::Mentor),
            "consultant" | "sustainability" => Ok(Persona::Consultant),
            other => Err(UnknownPersona(other.to_string())),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the loaded knowledge text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeOrigin {
    File(PathBuf),
    BuiltInFallback,
    BuiltIn,
}

/// Immutable reference document.
#[derive(Debug, Clone)]
pub struct KnowledgeDocument {
    text: String,
    origin: KnowledgeOrigin,
}

impl KnowledgeDocument {
    /// Loads the knowledge text for `persona`.
    ///
    /// Never fails: an unreadable curriculum file degrades to the built-in curriculum.
    pub fn load(persona: Persona, path: &Path) -> Self {
        match persona {
            Persona::Consultant => Self {
                text: SUSTAINABILITY_FRAMEWORK.to_string(),
                origin: KnowledgeOrigin::BuiltIn,
            },
            Persona::Mentor => match std::fs::read_to_string(path) {
                Ok(text) => {
                    info!(
                        "Loaded curriculum from {} ({} bytes)",
                        path.display(),
                        text.len()
                    );
                    Self {
                        text,
                        origin: KnowledgeOrigin::File(path.to_path_buf()),
                    }
                }
                Err(e) => {
                    warn!(
                        "Could not read curriculum at {}: {e}; using built-in default",
                        path.display()
                    );
                    Self {
                        text: DEFAULT_CURRICULUM.to_string(),
                        origin: KnowledgeOrigin::BuiltInFallback,
                    }
                }
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &KnowledgeOrigin {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mentor_reads_curriculum_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Rust 101\n- ownership\n- borrowing").unwrap();

        let doc = KnowledgeDocument::load(Persona::Mentor, file.path());
        assert_eq!(doc.text(), "# Rust 101\n- ownership\n- borrowing");
        assert_eq!(doc.origin(), &KnowledgeOrigin::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_mentor_falls_back_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.md");

        let doc = KnowledgeDocument::load(Persona::Mentor, &missing);
        assert_eq!(doc.text(), DEFAULT_CURRICULUM);
        assert_eq!(doc.origin(), &KnowledgeOrigin::BuiltInFallback);
    }

    #[test]
    fn test_consultant_ignores_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "should not be read").unwrap();

        let doc = KnowledgeDocument::load(Persona::Consultant, file.path());
        assert_eq!(doc.text(), SUSTAINABILITY_FRAMEWORK);
        assert_eq!(doc.origin(), &KnowledgeOrigin::BuiltIn);
    }

    #[test]
    fn test_persona_parses_aliases() {
        assert_eq!("mentor".parse::<Persona>().unwrap(), Persona::Mentor);
        assert_eq!("Curriculum".parse::<Persona>().unwrap(), Persona::Mentor);
        assert_eq!(
            " sustainability ".parse::<Persona>().unwrap(),
            Persona::Consultant
        );
        assert!("tutor".parse::<Persona>().is_err());
    }

    #[test]
    fn test_assistant_labels() {
        assert_eq!(Persona::Mentor.assistant_label(), "MENTOR");
        assert_eq!(Persona::Consultant.assistant_label(), "CONSULTANT");
    }
}
