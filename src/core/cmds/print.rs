use crate::types::AppResult;

pub mod buckets;
pub mod config;

pub enum PrintCommand {
    Config(String),
    Buckets(String),
}

pub async fn execute_print(command: PrintCommand) -> AppResult<()> {
    match command {
        PrintCommand::Config(format) => config::execute(format).await,
        PrintCommand::Buckets(format) => buckets::execute(format).await,
    }
}
