use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agent::{Agent, GeneratedContent};
use crate::delivery::{DeliveryService, Recipient};
use crate::errors::{PipelineError, PipelineResult, RenderError};
use crate::prompt_template;
use crate::providers::base::CompletionProvider;
use crate::report::{Artifact, DocumentRenderer};
use crate::roster::RosterMember;

/// One roster step's result: the artifact, or the render failure that kept
/// it from being persisted. Inference failures never show up here -- they
/// are folded into failure-tagged artifacts upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStep {
    pub agent_name: String,
    pub agent_role: String,
    pub outcome: Result<Artifact, RenderError>,
}

/// Human-readable result of the single delivery attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub message: String,
}

/// The full record of one end-to-end pipeline execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRun {
    pub request: String,
    pub project_title: String,
    pub steps: Vec<ProjectStep>,
    pub delivery: Option<DeliveryOutcome>,
}

impl ProjectRun {
    /// Artifacts that were actually persisted, in roster order.
    pub fn artifacts(&self) -> Vec<&Artifact> {
        self.steps
            .iter()
            .filter_map(|step| step.outcome.as_ref().ok())
            .collect()
    }
}

/// Drives a fixed roster of agents through one project request and
/// optionally bundles the results into a delivery.
pub struct Orchestrator {
    agents: Vec<(Agent, String)>,
    renderer: DocumentRenderer,
    delivery: Option<DeliveryService>,
}

impl Orchestrator {
    pub fn new(
        roster: Vec<RosterMember>,
        provider: Arc<dyn CompletionProvider>,
        renderer: DocumentRenderer,
    ) -> Self {
        let agents = roster
            .into_iter()
            .map(|member| (Agent::new(member.identity, provider.clone()), member.brief))
            .collect();
        Self {
            agents,
            renderer,
            delivery: None,
        }
    }

    pub fn with_delivery(mut self, service: DeliveryService) -> Self {
        self.delivery = Some(service);
        self
    }

    /// Run every roster member against the request, in declared order.
    ///
    /// Each step is independent: one member's failure never blocks the
    /// next. Every member receives the original request, not another
    /// member's output. If a recipient is given, one delivery attempt is
    /// made at the end over whatever artifacts exist; the run itself still
    /// succeeds when delivery does not.
    pub async fn run(
        &mut self,
        request: &str,
        recipient: Option<&Recipient>,
    ) -> PipelineResult<ProjectRun> {
        if request.trim().is_empty() {
            return Err(PipelineError::EmptyRequest);
        }

        let project_title = format!("Multi-Agent Project: {}", request);
        let mut steps = Vec::with_capacity(self.agents.len());

        for (agent, brief) in &mut self.agents {
            let identity = agent.identity().clone();
            tracing::info!(agent = %identity.name, role = %identity.role, "running step");

            // task construction and inference failures are contained per
            // step, the same as provider failures inside `think`
            let content = match prompt_template::task_brief(brief, request) {
                Ok(task) => match agent.think(&task, "").await {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!(agent = %identity.name, error = %e, "think step failed");
                        GeneratedContent::failed(&identity.name, &e.to_string())
                    }
                },
                Err(e) => {
                    tracing::warn!(agent = %identity.name, error = %e, "brief rendering failed");
                    GeneratedContent::failed(&identity.name, &e.to_string())
                }
            };

            let outcome = self
                .renderer
                .render(&identity, &content, request, &project_title);
            match &outcome {
                Ok(artifact) => {
                    tracing::info!(
                        agent = %identity.name,
                        path = %artifact.path.display(),
                        failed = artifact.failed,
                        "artifact persisted"
                    );
                }
                Err(e) => {
                    tracing::warn!(agent = %identity.name, error = %e, "render step failed");
                }
            }

            steps.push(ProjectStep {
                agent_name: identity.name,
                agent_role: identity.role,
                outcome,
            });
        }

        let delivery = match recipient {
            Some(recipient) => Some(self.deliver(recipient, &project_title, &steps).await),
            None => None,
        };

        Ok(ProjectRun {
            request: request.to_string(),
            project_title,
            steps,
            delivery,
        })
    }

    async fn deliver(
        &self,
        recipient: &Recipient,
        project_title: &str,
        steps: &[ProjectStep],
    ) -> DeliveryOutcome {
        let Some(service) = &self.delivery else {
            return DeliveryOutcome {
                success: false,
                message: "Email delivery is not configured".to_string(),
            };
        };

        let artifacts: Vec<Artifact> = steps
            .iter()
            .filter_map(|step| step.outcome.as_ref().ok().cloned())
            .collect();

        match service
            .send(&recipient.address, &recipient.name, project_title, &artifacts)
            .await
        {
            Ok(receipt) => DeliveryOutcome {
                success: true,
                message: receipt.message,
            },
            Err(e) => {
                tracing::warn!(error = %e, "delivery failed");
                DeliveryOutcome {
                    success: false,
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use crate::roster::default_roster;
    use crate::workspace::Workspace;

    fn orchestrator_with(provider: MockProvider, workspace: Arc<Workspace>) -> Orchestrator {
        Orchestrator::new(
            default_roster("llama3.2:latest"),
            Arc::new(provider),
            DocumentRenderer::new(workspace),
        )
    }

    #[tokio::test]
    async fn test_empty_request_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Arc::new(Workspace::create(dir.path()).unwrap());
        let mut orchestrator = orchestrator_with(MockProvider::new(vec![]), workspace);

        let result = orchestrator.run("  ", None).await;
        assert_eq!(result.unwrap_err(), PipelineError::EmptyRequest);

        // no side effects: the workspace stays empty
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_one_step_per_roster_member_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Arc::new(Workspace::create(dir.path()).unwrap());
        let responses: Vec<String> = (0..5).map(|i| format!("# SECTION\n\nreport {}", i)).collect();
        let mut orchestrator = orchestrator_with(MockProvider::new(responses), workspace);

        let run = orchestrator
            .run("Expand into a new market", None)
            .await
            .unwrap();

        assert_eq!(run.steps.len(), 5);
        let names: Vec<&str> = run.steps.iter().map(|s| s.agent_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Director AI",
                "Alex Manager",
                "Dr. Research",
                "Tech Oracle",
                "Maya Writer"
            ]
        );
        assert_eq!(run.artifacts().len(), 5);
        assert!(run.delivery.is_none());
    }
}
