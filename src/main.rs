use std::process;

use postboard::{
    application::{controller::BlogClient, error::AppError},
    config,
    host::{self, HostCommand, ParseError},
    infra::{error::InfraError, http::HttpPostsApi, telemetry},
    presentation::page::MemoryPage,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let api = HttpPostsApi::new(settings.api.base_url.as_str())?;
    let client = BlogClient::new(api, MemoryPage::new());
    let html_out = cli_args.html_out.as_deref();
    info!(base_url = %client.api().base(), "postboard started");

    if let Err(err) = client.start().await {
        warn!(error = %err, "initial post list load failed");
    }

    let mut stdout = tokio::io::stdout();
    host::present(&client, &mut stdout, html_out).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(InfraError::from)? {
        let command = match host::parse_command(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(err) => {
                write_line(&mut stdout, &format!("error: {err}")).await?;
                continue;
            }
        };

        if command == HostCommand::Help {
            write_line(&mut stdout, host::HELP).await?;
            continue;
        }
        if !host::apply(&client, command).await {
            break;
        }
        host::present(&client, &mut stdout, html_out).await?;
    }

    info!("postboard stopped");
    Ok(())
}

async fn write_line(out: &mut tokio::io::Stdout, text: &str) -> Result<(), InfraError> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
