use std::sync::Arc;

use anyhow::{anyhow, Result};
use cliclack::spinner;
use console::style;

use consult::delivery::{DeliveryService, Recipient, SmtpConfig, SmtpMailTransport};
use consult::orchestrator::Orchestrator;
use consult::providers::configs::{OllamaProviderConfig, ProviderConfig};
use consult::providers::factory::get_provider;
use consult::report::DocumentRenderer;
use consult::roster::default_roster;
use consult::workspace::Workspace;

use crate::profile::{load_profile, SMTP_PASSWORD_ENV};

pub async fn execute(
    request: String,
    to: Option<String>,
    client_name: String,
    model: Option<String>,
    workspace: Option<String>,
) -> Result<()> {
    let profile = load_profile()?;
    let model = model.unwrap_or(profile.model);
    let workspace_dir = workspace.unwrap_or(profile.workspace);

    let provider = get_provider(ProviderConfig::Ollama(OllamaProviderConfig {
        host: profile.ollama_host,
    }))?;
    let workspace = Arc::new(Workspace::create(&workspace_dir)?);
    let roster = default_roster(&model);
    let roles: Vec<String> = roster.iter().map(|m| m.identity.role.clone()).collect();

    let mut orchestrator = Orchestrator::new(roster, provider, DocumentRenderer::new(workspace));

    let recipient = to.map(|address| Recipient::new(address, client_name));
    if recipient.is_some() {
        let smtp = profile
            .smtp
            .ok_or_else(|| anyhow!("No SMTP settings in profile; run `consult configure` first"))?;
        let password = std::env::var(SMTP_PASSWORD_ENV)
            .map_err(|_| anyhow!("{} is not set", SMTP_PASSWORD_ENV))?;

        let transport = SmtpMailTransport::new(SmtpConfig {
            host: smtp.host,
            port: smtp.port,
            sender_address: smtp.sender_address,
            sender_name: smtp.sender_name,
            password,
        });
        orchestrator =
            orchestrator.with_delivery(DeliveryService::new(Box::new(transport), roles));
    }

    println!(
        "{} {}",
        style("Starting multi-agent collaboration:").bold(),
        style(&request).cyan()
    );

    let spin = spinner();
    spin.start("running the roster");
    let run = orchestrator.run(&request, recipient.as_ref()).await?;
    spin.stop("roster complete");

    for step in &run.steps {
        match &step.outcome {
            Ok(artifact) if !artifact.failed => println!(
                "  {} {} ({}) -> {}",
                style("ok").green(),
                step.agent_name,
                step.agent_role,
                artifact.path.display()
            ),
            Ok(artifact) => println!(
                "  {} {} ({}) -> {} (generation failed, see report)",
                style("!!").yellow(),
                step.agent_name,
                step.agent_role,
                artifact.path.display()
            ),
            Err(e) => println!(
                "  {} {} ({}) -> {}",
                style("xx").red(),
                step.agent_name,
                step.agent_role,
                e
            ),
        }
    }

    match &run.delivery {
        Some(outcome) if outcome.success => {
            println!("{} {}", style("Delivery:").bold().green(), outcome.message)
        }
        Some(outcome) => println!("{} {}", style("Delivery:").bold().red(), outcome.message),
        None => println!(
            "{} reports saved to {}",
            style("Done:").bold(),
            workspace_dir
        ),
    }

    Ok(())
}
