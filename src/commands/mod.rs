pub mod add;
pub mod config;
pub mod context;
pub mod goal;
pub mod history;
pub mod init;
pub mod reset;
pub mod settings;
pub mod status;

pub use add::{run_add, run_add_impl};
pub use config::run_config;
pub use context::{CliSession, CommandContext};
pub use goal::{run_goal, run_goal_impl};
pub use history::{run_history, run_history_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use reset::{run_reset, run_reset_impl};
pub use settings::{run_settings, run_settings_impl};
pub use status::{run_status, run_status_impl};
