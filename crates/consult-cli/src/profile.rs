use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use consult::providers::ollama::{OLLAMA_HOST, OLLAMA_MODEL};

pub const PROFILE_CONFIG_PATH: &str = ".config/consult/profile.yaml";

/// The SMTP credential is read from this variable at run time. It is never
/// written to the profile file.
pub const SMTP_PASSWORD_ENV: &str = "CONSULT_SMTP_PASSWORD";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SmtpProfile {
    pub host: String,
    pub port: u16,
    pub sender_address: String,
    pub sender_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Profile {
    pub ollama_host: String,
    pub model: String,
    pub workspace: String,
    pub smtp: Option<SmtpProfile>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            ollama_host: OLLAMA_HOST.to_string(),
            model: OLLAMA_MODEL.to_string(),
            workspace: "consult_workspace".to_string(),
            smtp: None,
        }
    }
}

pub fn profile_path() -> Result<PathBuf> {
    let mut path = dirs::home_dir().ok_or_else(|| anyhow!("Failed to find home directory"))?;
    path.push(PROFILE_CONFIG_PATH);
    Ok(path)
}

pub fn load_profile() -> Result<Profile> {
    let path = profile_path()?;
    if !path.exists() {
        return Ok(Profile::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read profile at {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse profile at {}", path.display()))
}

pub fn save_profile(profile: &Profile) -> Result<()> {
    let path = profile_path()?;

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let yaml_string = serde_yaml::to_string(profile)?;
    let mut file = File::create(&path)?;
    file.write_all(yaml_string.as_bytes())?;
    Ok(())
}
