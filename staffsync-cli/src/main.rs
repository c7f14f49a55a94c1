mod actions;
mod cli;
mod error;
mod paths;
mod poller;
mod table_view;

use std::fs::{self, File};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simplelog::{LevelFilter, WriteLogger};
use staffsync_lib::{Config, StaffSyncClient};
use staffsync_ui::notifications::{ENTER_DELAY, NotificationHandle, Phase, TOAST_WIDTH};
use tokio_util::sync::CancellationToken;

use crate::actions::Actions;
use crate::cli::{Cli, Command, ServerCommand};
use crate::error::CliError;
use crate::table_view::TableOptions;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    init_logging(&config.log_level)?;
    log::info!("staffsync {} starting", env!("CARGO_PKG_VERSION"));

    let command = match cli.command {
        Command::Table {
            file,
            filter,
            sort,
            csv,
        } => {
            let table = table_view::load(&file)?;
            let options = TableOptions { filter, sort, csv };
            print!("{}", table_view::render(table, &options)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Server(command) => command,
    };
    let api = client(&config, cli.url.as_deref())?;

    let handle = NotificationHandle::default();
    let cancel = CancellationToken::new();
    let driver = {
        let handle = handle.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            handle
                .drive(cancel, |event, center| {
                    if event.phase != Phase::Visible {
                        return;
                    }
                    if let Some(notification) = center.get(event.id) {
                        println!("{}", notification.line(TOAST_WIDTH as usize));
                    }
                })
                .await;
        })
    };

    let actions = Arc::new(Actions::new(
        Arc::new(api),
        handle.clone(),
        config.toast_duration,
    ));

    let ok = match command {
        ServerCommand::Attendance => match actions.mark_attendance().await {
            Some(status) => {
                println!("{}", status);
                true
            }
            None => false,
        },
        ServerCommand::Notifications { watch: false } => {
            if actions.poll_notifications().await == 0 {
                println!("No new notifications");
            }
            true
        }
        ServerCommand::Notifications { watch: true } => {
            let poller = tokio::spawn(poller::run(
                actions.clone(),
                config.poll_interval,
                cancel.child_token(),
            ));
            tokio::select! {
                _ = tokio::signal::ctrl_c() => log::info!("Interrupted"),
                _ = poller => {}
            }
            true
        }
        ServerCommand::DeleteEmployee { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this employee?")? {
                println!("Cancelled");
                return Ok(ExitCode::SUCCESS);
            }
            actions.delete_employee(id).await
        }
        ServerCommand::Payroll {
            employee_id,
            period,
        } => actions.generate_payroll(employee_id, &period).await,
    };

    settle(&handle).await;
    cancel.cancel();
    let _ = driver.await;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn client(config: &Config, url: Option<&str>) -> Result<StaffSyncClient, CliError> {
    let Some(url) = url else {
        return Ok(StaffSyncClient::from_config(config)?);
    };
    Ok(StaffSyncClient::builder()
        .url(url)
        .timeout(config.timeout)
        .build()?)
}

fn init_logging(level: &str) -> Result<(), CliError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let level = level.parse().unwrap_or(LevelFilter::Debug);
    WriteLogger::init(level, simplelog::Config::default(), File::create(path)?)?;
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Wait until every pending notification has been printed.
async fn settle(handle: &NotificationHandle) {
    loop {
        let pending = handle.with(|center| {
            center
                .active()
                .any(|n| matches!(n.phase(), Phase::Created | Phase::Mounting))
        });
        if !pending {
            return;
        }
        tokio::time::sleep(ENTER_DELAY).await;
    }
}
