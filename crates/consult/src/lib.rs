pub mod agent;
pub mod delivery;
pub mod errors;
pub mod orchestrator;
pub mod prompt_template;
pub mod providers;
pub mod report;
pub mod roster;
pub mod workspace;
