//! Command implementations

mod apply;
mod project;
mod show;

pub use apply::run_apply;
pub use project::run_project;
pub use show::run_show;
