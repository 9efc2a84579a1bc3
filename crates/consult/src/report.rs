use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::agent::{AgentIdentity, GeneratedContent};
use crate::errors::RenderError;
use crate::workspace::Workspace;

/// Paragraphs shorter than this that are fully upper-case count as headings.
pub const HEADING_MAX_LEN: usize = 50;

/// One element of the structured document handed to the layout writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentNode {
    Title(String),
    Metadata { label: String, value: String },
    Heading(String),
    Body(String),
    Closing(String),
}

/// A persisted report document plus its authoring metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub title: String,
    pub agent_name: String,
    pub agent_role: String,
    pub generated_at: DateTime<Local>,
    /// True when the generation step failed; the document still exists and
    /// states the failure.
    pub failed: bool,
}

/// Heading heuristic: markup marker, enumerated-list marker, or a short
/// fully upper-case line.
pub fn is_heading(paragraph: &str) -> bool {
    let p = paragraph.trim();
    if p.starts_with('#') {
        return true;
    }
    let mut chars = p.chars();
    if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
        if first.is_ascii_digit() && second == '.' {
            return true;
        }
    }
    p.chars().count() < HEADING_MAX_LEN
        && p.chars().any(|c| c.is_uppercase())
        && !p.chars().any(|c| c.is_lowercase())
}

/// Build the structured node list for one agent report: title, metadata,
/// classified content paragraphs, closing marker.
pub fn build_nodes(
    identity: &AgentIdentity,
    content: &str,
    generated_at: DateTime<Local>,
    project_title: &str,
) -> Vec<DocumentNode> {
    let mut nodes = Vec::new();

    if !project_title.is_empty() {
        nodes.push(DocumentNode::Title(project_title.to_string()));
    }

    nodes.push(DocumentNode::Metadata {
        label: "Report by".to_string(),
        value: identity.name.clone(),
    });
    nodes.push(DocumentNode::Metadata {
        label: "Role".to_string(),
        value: identity.role.clone(),
    });
    nodes.push(DocumentNode::Metadata {
        label: "Generated".to_string(),
        value: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    });

    for paragraph in content.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        if is_heading(paragraph) {
            let heading = paragraph.replace('#', "").trim().to_string();
            nodes.push(DocumentNode::Heading(heading));
        } else {
            nodes.push(DocumentNode::Body(paragraph.to_string()));
        }
    }

    nodes.push(DocumentNode::Closing("— End of Report —".to_string()));
    nodes
}

/// The layout engine seam: turns a node list into a file on disk. The
/// concrete engine is replaceable; the pipeline only depends on this trait.
pub trait DocumentWriter: Send + Sync {
    fn write(&self, nodes: &[DocumentNode], path: &std::path::Path) -> Result<(), RenderError>;
    fn extension(&self) -> &'static str;
}

/// Default writer: a markdown-shaped plain-text document.
pub struct TextDocumentWriter;

impl DocumentWriter for TextDocumentWriter {
    fn write(&self, nodes: &[DocumentNode], path: &std::path::Path) -> Result<(), RenderError> {
        let mut out = String::new();
        for node in nodes {
            match node {
                DocumentNode::Title(title) => {
                    out.push_str(&format!("# {}\n\n", title));
                }
                DocumentNode::Metadata { label, value } => {
                    out.push_str(&format!("*{}: {}*\n\n", label, value));
                }
                DocumentNode::Heading(heading) => {
                    out.push_str(&format!("## {}\n\n", heading));
                }
                DocumentNode::Body(body) => {
                    out.push_str(&format!("{}\n\n", body));
                }
                DocumentNode::Closing(closing) => {
                    out.push_str(&format!("{}\n", closing));
                }
            }
        }

        std::fs::write(path, out).map_err(|e| RenderError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// Turns one agent's output into a persisted, structured report document.
pub struct DocumentRenderer {
    workspace: Arc<Workspace>,
    writer: Box<dyn DocumentWriter>,
}

impl DocumentRenderer {
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self {
            workspace,
            writer: Box::new(TextDocumentWriter),
        }
    }

    pub fn with_writer(workspace: Arc<Workspace>, writer: Box<dyn DocumentWriter>) -> Self {
        Self { workspace, writer }
    }

    /// Render and persist one report. A storage failure surfaces as a
    /// `RenderError`; the caller records it as a failed step and moves on.
    pub fn render(
        &self,
        identity: &AgentIdentity,
        content: &GeneratedContent,
        topic: &str,
        project_title: &str,
    ) -> Result<Artifact, RenderError> {
        let generated_at = Local::now();
        let nodes = build_nodes(identity, &content.text, generated_at, project_title);
        let path = self
            .workspace
            .next_artifact_path(&identity.name, self.writer.extension());

        self.writer.write(&nodes, &path)?;

        Ok(Artifact {
            path,
            title: topic.to_string(),
            agent_name: identity.name.clone(),
            agent_role: identity.role.clone(),
            generated_at,
            failed: content.failed,
        })
    }
}
