//! Loads prompt template overrides from YAML files.

use crate::types::{PromptTemplate, CONTEXT_VAR, QUESTION_VAR};
use askrag_core::{AppError, AppResult};
use std::path::Path;

/// Load a prompt template from a YAML file.
///
/// The file must define `id` and `system`; `user` defaults to
/// `{{question}}`.
pub fn load_template(path: &Path) -> AppResult<PromptTemplate> {
    tracing::debug!("Loading prompt template from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            path
        )));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e)))?;

    let template: PromptTemplate = serde_yaml::from_str(&contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e)))?;

    validate_template(&template)?;

    tracing::info!("Loaded prompt template: {}", template.id);

    Ok(template)
}

/// Check that a template references the variables it will be given.
fn validate_template(template: &PromptTemplate) -> AppResult<()> {
    if template.id.trim().is_empty() {
        return Err(AppError::Prompt("Prompt template id is empty".to_string()));
    }

    if !references(&template.system, CONTEXT_VAR) {
        return Err(AppError::Prompt(format!(
            "Prompt template '{}' system part must reference {{{{{}}}}}",
            template.id, CONTEXT_VAR
        )));
    }

    if !references(&template.user, QUESTION_VAR) {
        return Err(AppError::Prompt(format!(
            "Prompt template '{}' user part must reference {{{{{}}}}}",
            template.id, QUESTION_VAR
        )));
    }

    Ok(())
}

fn references(template: &str, var: &str) -> bool {
    template.contains(&format!("{{{{{}}}}}", var))
        || template.contains(&format!("{{{{ {} }}}}", var))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prompt.yml");
        std::fs::write(
            &path,
            "id: rag.terse\nsystem: \"Context:\\n{{context}}\\nAnswer in one sentence.\"\n",
        )
        .unwrap();

        let template = load_template(&path).unwrap();
        assert_eq!(template.id, "rag.terse");
        assert!(template.system.contains("{{context}}"));
        assert_eq!(template.user, "{{question}}");
    }

    #[test]
    fn test_missing_file() {
        let result = load_template(Path::new("/nonexistent/prompt.yml"));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_template_without_context_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prompt.yml");
        std::fs::write(&path, "id: rag.bad\nsystem: \"No context here\"\n").unwrap();

        let err = load_template(&path).unwrap_err();
        assert!(err.to_string().contains("{{context}}"));
    }

    #[test]
    fn test_references_allows_spaces() {
        assert!(references("x {{ context }} y", "context"));
        assert!(references("{{context}}", "context"));
        assert!(!references("{context}", "context"));
    }
}
