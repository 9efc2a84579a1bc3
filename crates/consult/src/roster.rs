use serde::{Deserialize, Serialize};

use crate::agent::AgentIdentity;

/// One roster slot: an identity plus the brief template the orchestrator
/// instantiates with the project request to form this member's task.
/// Briefs use `{{ request }}` as the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    pub identity: AgentIdentity,
    pub brief: String,
}

impl RosterMember {
    pub fn new(identity: AgentIdentity, brief: impl Into<String>) -> Self {
        Self {
            identity,
            brief: brief.into(),
        }
    }
}

const DIRECTOR_BRIEF: &str = "\
Create strategic overview for: {{ request }}

Provide:
# STRATEGIC ANALYSIS
Project assessment and approach

# TEAM COORDINATION PLAN
Which agents will be involved and how

# EXPECTED DELIVERABLES
What outputs we'll produce

# SUCCESS FACTORS
Key elements for project success";

const MANAGER_BRIEF: &str = "\
Create detailed project plan for: {{ request }}

Format as professional project management document:

# PROJECT OVERVIEW
Project goals, scope, and success criteria

# STAKEHOLDER ANALYSIS
Key stakeholders and their roles

# WORK BREAKDOWN STRUCTURE
Major phases and tasks

# TIMELINE AND MILESTONES
Project schedule with key dates

# RESOURCE REQUIREMENTS
Team, tools, and budget needed

# RISK ASSESSMENT
Potential risks and mitigation strategies

# COMMUNICATION PLAN
How progress will be tracked and reported

# SUCCESS METRICS
How success will be measured

Provide specific, actionable details for each section.";

const RESEARCHER_BRIEF: &str = "\
Conduct comprehensive analysis of: {{ request }}

Provide a professional research report with these sections:

# EXECUTIVE SUMMARY
Brief overview of key findings

# METHODOLOGY
Research approach and sources

# KEY CONCEPTS AND DEFINITIONS
Essential terms and concepts

# CURRENT TRENDS AND DEVELOPMENTS
What's happening now in this space

# MARKET ANALYSIS
Size, growth, key players (if applicable)

# CHALLENGES AND OPPORTUNITIES
Potential obstacles and advantages

# RECOMMENDATIONS
Actionable next steps

# CONCLUSION
Summary of insights and implications

Format each section clearly with bullet points and specific details.";

const TECHNICAL_BRIEF: &str = "\
Analyze and solve this technical problem: technical requirements for {{ request }}

Provide comprehensive technical report:

# PROBLEM ANALYSIS
Detailed description and root cause analysis

# TECHNICAL REQUIREMENTS
System requirements and constraints

# PROPOSED SOLUTION
Step-by-step implementation approach

# ARCHITECTURE OVERVIEW
System design and component interactions

# IMPLEMENTATION PLAN
Detailed development phases

# TESTING STRATEGY
Quality assurance and validation approach

# DEPLOYMENT CONSIDERATIONS
Production deployment and monitoring

# MAINTENANCE AND SUPPORT
Ongoing support requirements

Include specific technical details and best practices.";

const WRITER_BRIEF: &str = "\
Create professional executive summary report about {{ request }} for executive audience.

Structure your response as:

# CONTENT BRIEF
Purpose, audience, and objectives

# MAIN CONTENT
The primary deliverable formatted appropriately

# SUPPORTING MATERIALS
Additional elements (headlines, taglines, etc.)

# DISTRIBUTION STRATEGY
How this content should be used

# PERFORMANCE METRICS
How to measure success

Ensure content is engaging, professional, and appropriate for an executive audience.";

/// The default consulting roster, in run order. The coordinating member
/// comes first; its output is recorded but never fed into later members --
/// every specialist receives the original request so their reasoning stays
/// independently auditable.
pub fn default_roster(model: &str) -> Vec<RosterMember> {
    vec![
        RosterMember::new(
            AgentIdentity::new(
                "Director AI",
                "Team Supervisor",
                "You are wise, strategic, and excellent at seeing the big picture.",
                model,
            ),
            DIRECTOR_BRIEF,
        ),
        RosterMember::new(
            AgentIdentity::new(
                "Alex Manager",
                "Project Coordinator",
                "You are organized, decisive, and excellent at breaking down complex projects.",
                model,
            ),
            MANAGER_BRIEF,
        ),
        RosterMember::new(
            AgentIdentity::new(
                "Dr. Research",
                "Senior Research Analyst",
                "You are methodical, thorough, and love diving deep into topics. \
                 You always provide well-structured analysis with multiple perspectives.",
                model,
            ),
            RESEARCHER_BRIEF,
        ),
        RosterMember::new(
            AgentIdentity::new(
                "Tech Oracle",
                "Senior Technical Specialist",
                "You are logical, precise, and excellent at solving technical problems.",
                model,
            ),
            TECHNICAL_BRIEF,
        ),
        RosterMember::new(
            AgentIdentity::new(
                "Maya Writer",
                "Content Specialist",
                "You are creative, articulate, and skilled at adapting your writing style.",
                model,
            ),
            WRITER_BRIEF,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt_template;
    use crate::providers::ollama::OLLAMA_MODEL;

    #[test]
    fn test_default_roster_order() {
        let roster = default_roster(OLLAMA_MODEL);
        let names: Vec<&str> = roster.iter().map(|m| m.identity.name.as_str()).collect();
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
        // coordinator first
        assert_eq!(roster[0].identity.role, "Team Supervisor");
    }

    #[test]
    fn test_roster_names_unique() {
        let roster = default_roster(OLLAMA_MODEL);
        let mut names: Vec<&str> = roster.iter().map(|m| m.identity.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), roster.len());
    }

    #[test]
    fn test_briefs_accept_request() {
        for member in default_roster(OLLAMA_MODEL) {
            let task =
                prompt_template::task_brief(&member.brief, "Expand into a new market").unwrap();
            assert!(task.contains("Expand into a new market"));
        }
    }
}
