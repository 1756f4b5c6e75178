//! Prompt templates for knowledge-base chat

use std::collections::HashMap;

/// Template for generating prompts
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template with variables in a single pass; substituted
    /// values are never scanned for placeholders
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                result.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let name = &after[..end];
            match values.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("{{");
                    result.push_str(name);
                    result.push_str("}}");
                }
            }
            rest = &after[end + 2..];
        }

        result.push_str(rest);
        result
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    chars.next();
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        break;
                    }
                } else {
                    var_name.push(ch);
                    chars.next();
                }
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

/// Standard chat prompt templates
pub struct ChatPrompts;

impl ChatPrompts {
    /// Answer strictly from the supplied context
    #[must_use]
    pub fn strict_knowledge_base() -> PromptTemplate {
        PromptTemplate::new(
            r#"
You are {{assistant}}, a strict knowledge-base assistant.

RULES:
- Answer ONLY using the provided context
- Do NOT use outside knowledge
- If the answer is not clearly in the context, reply exactly:
  "{{refusal}}"

Keep answers concise and natural.

CONTEXT:
{{context}}

QUESTION:
{{question}}
"#,
        )
    }
}
