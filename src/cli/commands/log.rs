use crate::cli::Ctx;
use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let pool = ctx.open_db()?;
        LogLogic::print_log(&pool.conn, *limit)?;
    }
    Ok(())
}
