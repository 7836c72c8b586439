//! Subcommands of the filler CLI.

mod run;
pub use run::RunCommand;

mod prove;
pub use prove::ProveCommand;

pub use send_test::SendTestCommand;
