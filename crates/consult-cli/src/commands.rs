pub mod configure;
pub mod run;
