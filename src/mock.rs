use crate::prompt::PromptRequest;

/// Canned "refined prompt" used when no API key is available.
pub fn mock(request: &PromptRequest) -> String {
    let context = if request.context.trim().is_empty() {
        "No additional context provided.".to_string()
    } else {
        format!("Context: {}", request.context.trim())
    };

    format!(
        "### Refined Prompt\n\n\
You are a {role}. {context} Your task: {task}\n\n\
### Expected Response Format\n\n\
- A short summary\n\
- Bullet points, if applicable\n\
- Actionable steps\n\n\
### Assumptions Made\n\n\
- The user expects a clear, short response\n\
- No domain-specific jargon\n\
- Written for a general audience",
        role = request.role.trim(),
        context = context,
        task = request.task.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restates_fields_and_includes_sections() {
        let request = PromptRequest::new("Career Coach", "", "Suggest 3 reflection questions.");
        let text = mock(&request);

        assert!(text.contains("Career Coach"));
        assert!(text.contains("Suggest 3 reflection questions."));
        assert!(text.contains("No additional context provided."));
        for header in ["Refined Prompt", "Expected Response Format", "Assumptions Made"] {
            assert!(text.contains(header), "missing {header}");
        }
    }

    #[test]
    fn includes_context_when_present() {
        let text = mock(&PromptRequest::new("Tutor", "High school algebra", "Explain slopes"));
        assert!(text.contains("Context: High school algebra"));
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let request = PromptRequest::new("Analyst", "Q3 numbers", "Summarize trends");
        assert_eq!(mock(&request), mock(&request.clone()));
    }
}
