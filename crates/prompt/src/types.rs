//! Prompt types.

use serde::{Deserialize, Serialize};

/// Variable holding the concatenated retrieved context.
pub const CONTEXT_VAR: &str = "context";

/// Variable holding the user's question.
pub const QUESTION_VAR: &str = "question";

/// System template used when no override is configured.
pub const DEFAULT_SYSTEM_TEMPLATE: &str =
    "Answer the question based strictly on the context below:\n\n{{context}}";

/// User template used when no override is configured.
pub const DEFAULT_USER_TEMPLATE: &str = "{{question}}";

/// A two-part chat prompt template.
///
/// Both parts use Handlebars syntax. The system part receives `{{context}}`,
/// the user part receives `{{question}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Template identifier
    pub id: String,

    /// System instruction template
    pub system: String,

    /// User turn template
    #[serde(default = "default_user_template")]
    pub user: String,
}

fn default_user_template() -> String {
    DEFAULT_USER_TEMPLATE.to_string()
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            id: "rag.default".to_string(),
            system: DEFAULT_SYSTEM_TEMPLATE.to_string(),
            user: default_user_template(),
        }
    }
}

/// A rendered prompt ready for LLM execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: String,

    /// User message
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_deserialization_defaults_user() {
        let yaml = r#"
id: rag.strict
system: "Use only this:\n{{context}}"
"#;
        let template: PromptTemplate = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(template.id, "rag.strict");
        assert_eq!(template.user, "{{question}}");
    }

    #[test]
    fn test_default_template_references_variables() {
        let template = PromptTemplate::default();
        assert!(template.system.contains("{{context}}"));
        assert!(template.user.contains("{{question}}"));
    }
}
