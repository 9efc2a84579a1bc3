use serde::Serialize;
use tera::{Context, Error as TeraError, Tera};

use crate::agent::AgentIdentity;
use crate::errors::PipelineError;

const AGENT_TEMPLATE: &str = include_str!("prompts/agent.md");
const DELIVERY_TEMPLATE: &str = include_str!("prompts/delivery.html");

pub fn render_template<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

#[derive(Serialize)]
struct AgentPromptContext<'a> {
    name: &'a str,
    role: &'a str,
    persona: &'a str,
    context: &'a str,
    memory: String,
    task: &'a str,
}

/// Build the full prompt for one agent task.
///
/// The block ordering is fixed: identity, then context, then the bounded
/// memory window (newest last), then the task. The task must come last --
/// models weight the most recent instruction heaviest.
pub fn agent_prompt(
    identity: &AgentIdentity,
    context: &str,
    memory: &[String],
    task: &str,
) -> Result<String, PipelineError> {
    let memory = if memory.is_empty() {
        "No previous interactions".to_string()
    } else {
        memory.join("\n")
    };

    render_template(
        AGENT_TEMPLATE,
        &AgentPromptContext {
            name: &identity.name,
            role: &identity.role,
            persona: &identity.persona,
            context,
            memory,
            task,
        },
    )
    .map_err(|e| PipelineError::Template(e.to_string()))
}

#[derive(Serialize)]
struct BriefContext<'a> {
    request: &'a str,
}

/// Instantiate a roster member's brief template with the project request.
pub fn task_brief(brief: &str, request: &str) -> Result<String, PipelineError> {
    render_template(brief, &BriefContext { request })
        .map_err(|e| PipelineError::Template(e.to_string()))
}

#[derive(Serialize)]
struct DeliveryBodyContext<'a> {
    recipient_name: &'a str,
    project_title: &'a str,
    roles: &'a [String],
}

/// Render the HTML body for a delivery package.
pub fn delivery_body(
    recipient_name: &str,
    project_title: &str,
    roles: &[String],
) -> Result<String, PipelineError> {
    render_template(
        DELIVERY_TEMPLATE,
        &DeliveryBodyContext {
            recipient_name,
            project_title,
            roles,
        },
    )
    .map_err(|e| PipelineError::Template(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> AgentIdentity {
        AgentIdentity::new(
            "Dr. Research",
            "Senior Research Analyst",
            "You are methodical and thorough.",
            "llama3.2:latest",
        )
    }

    #[test]
    fn test_agent_prompt_ordering() {
        let prompt = agent_prompt(
            &identity(),
            "a market entry project",
            &["Dr. Research: prior note".to_string()],
            "Analyze the market",
        )
        .unwrap();

        let identity_at = prompt.find("You are Dr. Research").unwrap();
        let context_at = prompt.find("Context: a market entry project").unwrap();
        let memory_at = prompt.find("Dr. Research: prior note").unwrap();
        let task_at = prompt.find("Current task: Analyze the market").unwrap();

        assert!(identity_at < context_at);
        assert!(context_at < memory_at);
        assert!(memory_at < task_at);
    }

    #[test]
    fn test_agent_prompt_empty_memory() {
        let prompt = agent_prompt(&identity(), "", &[], "Analyze the market").unwrap();
        assert!(prompt.contains("No previous interactions"));
    }

    #[test]
    fn test_task_brief() {
        let brief = "Conduct comprehensive analysis of: {{ request }}";
        let rendered = task_brief(brief, "Expand into a new market").unwrap();
        assert_eq!(
            rendered,
            "Conduct comprehensive analysis of: Expand into a new market"
        );
    }

    #[test]
    fn test_delivery_body_lists_roles() {
        let roles = vec![
            "Senior Research Analyst".to_string(),
            "Content Specialist".to_string(),
        ];
        let body = delivery_body("Valued Client", "Project X", &roles).unwrap();
        assert!(body.contains("Dear Valued Client"));
        assert!(body.contains("Project X"));
        assert!(body.contains("Senior Research Analyst"));
        assert!(body.contains("Content Specialist"));
    }
}
