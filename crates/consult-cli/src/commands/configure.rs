use anyhow::Result;
use console::style;

use crate::profile::{load_profile, profile_path, save_profile, SmtpProfile, SMTP_PASSWORD_ENV};

pub fn execute() -> Result<()> {
    cliclack::intro(style(" configure-consult ").on_cyan().black())?;

    let mut profile = load_profile()?;

    profile.ollama_host = cliclack::input("Ollama host?")
        .default_input(&profile.ollama_host)
        .interact()?;

    profile.model = cliclack::input("Model identifier?")
        .default_input(&profile.model)
        .interact()?;

    profile.workspace = cliclack::input("Workspace directory for reports?")
        .default_input(&profile.workspace)
        .interact()?;

    if cliclack::confirm("Set up email delivery?")
        .initial_value(profile.smtp.is_some())
        .interact()?
    {
        let existing = profile.smtp.clone().unwrap_or(SmtpProfile {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            sender_address: String::new(),
            sender_name: "AI Consulting Team".to_string(),
        });

        let host: String = cliclack::input("SMTP host?")
            .default_input(&existing.host)
            .interact()?;
        let port: String = cliclack::input("SMTP port?")
            .default_input(&existing.port.to_string())
            .interact()?;
        let sender_address: String = cliclack::input("Sender email address?")
            .default_input(&existing.sender_address)
            .interact()?;
        let sender_name: String = cliclack::input("Sender display name?")
            .default_input(&existing.sender_name)
            .interact()?;

        profile.smtp = Some(SmtpProfile {
            host,
            port: port.trim().parse()?,
            sender_address,
            sender_name,
        });

        cliclack::log::info(format!(
            "The SMTP password is read from {} at run time and never stored.",
            SMTP_PASSWORD_ENV
        ))?;
    } else {
        profile.smtp = None;
    }

    save_profile(&profile)?;
    cliclack::outro(format!("Profile saved to {}", profile_path()?.display()))?;
    Ok(())
}
