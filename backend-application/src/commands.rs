pub mod match_commands;
pub mod report_commands;
