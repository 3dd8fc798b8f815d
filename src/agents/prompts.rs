// Prompt templates for LLM-backed skill selection
//
// Prompts are versioned so a routing decision can be traced back to the
// exact wording that produced it.

use std::collections::HashMap;

use super::selector::ToolSpec;

/// Prompt template structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub system: String,
    pub user_template: String,
}

impl PromptTemplate {
    /// Render the user template, replacing each `{{key}}` with its value
    ///
    /// Placeholders without a value are left untouched.
    pub fn render(&self, variables: &HashMap<String, String>) -> String {
        variables
            .iter()
            .fold(self.user_template.clone(), |rendered, (key, value)| {
                rendered.replace(&format!("{{{{{}}}}}", key), value)
            })
    }
}

/// Bulleted list of tools, one `- name: description` line each
pub fn format_tools(tools: &[ToolSpec]) -> String {
    tools
        .iter()
        .map(|tool| format!("- {}: {}", tool.name, tool.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub mod library {
    use super::PromptTemplate;

    pub fn skill_selection() -> PromptTemplate {
        PromptTemplate {
            name: "skill_selection".to_string(),
            version: "1.1.0".to_string(),
            system: "You are an orchestrator deciding which tool handles a user story. \
                     Always call exactly one tool. Never answer with free text. \
                     Only use tool names from the list you are given; never invent one.\n\n\
                     Routing criteria:\n\
                     - Stories about weather, temperature or forecasts \
                     (clima, temperatura, tiempo) go to `clima`.\n\
                     - Stories about login, passwords or credentials \
                     (login, contraseña, credenciales) go to `pgp`.\n\
                     - Otherwise pick the tool whose description best fits the story."
                .to_string(),
            user_template: "Available tools:\n\
                            {{tools}}\n\n\
                            User story:\n\
                            {{work_item}}"
                .to_string(),
        }
    }
}
