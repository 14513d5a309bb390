// CLI module
// Public interface for the command-line front end

mod args;
mod commands;

pub use args::{Cli, Command, DesiredArgs, MemberCommand, StateCommand};
pub use commands::{desired_config, handle_command, parse_assignment, CommandOutput};
