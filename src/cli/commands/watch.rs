use crate::cli::Ctx;
use crate::cli::parser::Commands;
use crate::core::overtime::OvertimeScanner;
use crate::errors::AppResult;
use crate::notify::{ConsoleNotifier, dispatch_breaches};
use crate::scheduler::OvertimeWatch;
use crate::ui::messages::info;
use std::sync::Arc;
use tokio::sync::watch;

pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    match cmd {
        Commands::Scan => {
            let pool = ctx.open_db()?;
            let breaches = OvertimeScanner::new(ctx.clock).scan_all(&pool.conn, ctx.now)?;
            let sent = dispatch_breaches(&ConsoleNotifier, &breaches);
            info(format!("{sent} overtime alert(s) sent"));
        }

        Commands::Watch => {
            let overtime = OvertimeWatch::from_config(ctx.cfg, Arc::new(ConsoleNotifier))?;

            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            rt.block_on(async move {
                let (tx, rx) = watch::channel(false);
                tokio::spawn(async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::warn!(error = %e, "Ctrl-C handler unavailable, watch runs until killed");
                        std::future::pending::<()>().await;
                    }
                    let _ = tx.send(true);
                });
                overtime.run(rx).await;
            });
        }

        _ => {}
    }
    Ok(())
}
