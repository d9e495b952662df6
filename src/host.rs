//! Line-oriented host for running the client in a terminal.
//!
//! Each input line maps to a form edit or a page event; after every command
//! the page is printed and, optionally, written out as HTML.

use std::path::Path;

use postboard_api_types::PostId;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::application::api::PostsApi;
use crate::application::controller::{BlogClient, UiEvent};
use crate::infra::error::InfraError;
use crate::presentation::page::{FormField, MemoryPage};

pub const HELP: &str = "\
commands:
  open <id>              show a post's detail
  set <field> <value>    fill a field (title, content, author, image, edit-title, edit-content)
  create                 submit the new-post form
  edit                   open the edit form for the post on screen
  save                   submit the edit form
  cancel                 hide the edit form
  delete                 delete the post on screen
  search [query]         filter the list by author
  refresh                reload the post list
  show                   print the page
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Event(UiEvent),
    SetField(FormField, String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0}")]
    Field(String),
}

pub fn parse_command(line: &str) -> Result<HostCommand, ParseError> {
    let line = line.trim_start();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line.trim_end(), ""));

    match verb {
        "" => Err(ParseError::Empty),
        "open" | "select" => {
            let id = rest.trim();
            if id.is_empty() {
                return Err(ParseError::MissingArgument("open"));
            }
            Ok(HostCommand::Event(UiEvent::SelectPost(PostId::parse(id))))
        }
        "set" => {
            let rest = rest.trim_start();
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest.trim_end(), ""));
            if field.is_empty() {
                return Err(ParseError::MissingArgument("set"));
            }
            let field = field.parse::<FormField>().map_err(ParseError::Field)?;
            Ok(HostCommand::SetField(field, value.to_string()))
        }
        "create" => Ok(HostCommand::Event(UiEvent::SubmitCreate)),
        "edit" => Ok(HostCommand::Event(UiEvent::EditClicked)),
        "save" => Ok(HostCommand::Event(UiEvent::SubmitEdit)),
        "cancel" => Ok(HostCommand::Event(UiEvent::CancelEdit)),
        "delete" => Ok(HostCommand::Event(UiEvent::DeleteClicked)),
        "search" => Ok(HostCommand::Event(UiEvent::SearchInput(rest.to_string()))),
        "refresh" => Ok(HostCommand::Event(UiEvent::Refresh)),
        "show" => Ok(HostCommand::Show),
        "help" => Ok(HostCommand::Help),
        "quit" | "exit" => Ok(HostCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Apply one command to the client. Returns `false` once the host should stop.
pub async fn apply<A: PostsApi>(client: &BlogClient<A, MemoryPage>, command: HostCommand) -> bool {
    match command {
        HostCommand::Event(UiEvent::SearchInput(query)) => {
            client.with_page_mut(|page| page.set_search(query.clone()));
            client.handle(UiEvent::SearchInput(query)).await;
        }
        HostCommand::Event(event) => client.handle(event).await,
        HostCommand::SetField(field, value) => {
            client.with_page_mut(|page| page.set_field(field, value));
        }
        HostCommand::Show | HostCommand::Help => {}
        HostCommand::Quit => return false,
    }
    true
}

/// Print pending alerts and the page summary, then refresh the HTML file.
pub async fn present<A, W>(
    client: &BlogClient<A, MemoryPage>,
    out: &mut W,
    html_out: Option<&Path>,
) -> Result<(), InfraError>
where
    A: PostsApi,
    W: AsyncWrite + Unpin,
{
    let (alerts, summary, html) = client.with_page_mut(|page| {
        let html = html_out.map(|_| page.render_html());
        (page.take_alerts(), page.to_string(), html)
    });

    let mut text = String::new();
    for alert in alerts {
        text.push_str("! ");
        text.push_str(&alert);
        text.push('\n');
    }
    text.push_str(&summary);
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;

    if let (Some(path), Some(html)) = (html_out, html) {
        let html = html?;
        tokio::fs::write(path, html).await?;
    }
    Ok(())
}
