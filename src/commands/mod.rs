mod executor;

pub use executor::CommandPipeline;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only verb the shell understands.
pub const ALLOWED_COMMAND: &str = "curl";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Error calling the API! Check the route you typed or send me a message about this: me@example.dev.";

/// Everything that can go wrong between a submitted line and its output.
/// Each variant renders as the exact text shown in the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command not found: {0}")]
    UnknownCommand(String),
    #[error("invalid arguments: {}", .0.join(" "))]
    BadArguments(Vec<String>),
    #[error("Sorry, I can only fetch from {origin}")]
    DisallowedOrigin { origin: String },
    #[error("{}", TRANSPORT_FAILURE_MESSAGE)]
    Transport,
}

/// Result descriptor handed back to the session once a command resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

impl From<CommandError> for CommandOutcome {
    fn from(error: CommandError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Splits a line on whitespace. An empty or blank line yields the empty name.
pub fn parse_command(command: &str) -> ParsedCommand<'_> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    ParsedCommand {
        name,
        args: parts.collect(),
    }
}

/// Resolves the single argument against the allowed origin and returns the
/// path that follows it. The origin must lead the argument, end at a URL
/// boundary, and occur only once; the parsed URL must land on the same
/// scheme, host and port.
pub fn resolve_route<'a>(arg: &'a str, origin: &str) -> Option<&'a str> {
    if origin.is_empty() {
        return None;
    }
    let rest = arg.strip_prefix(origin)?;
    if rest.contains(origin) {
        return None;
    }
    if !(rest.is_empty() || rest.starts_with(['/', '?', '#'])) {
        return None;
    }
    same_origin(arg, origin).then_some(rest)
}

fn same_origin(url: &str, origin: &str) -> bool {
    match (Url::parse(url), Url::parse(origin)) {
        (Ok(url), Ok(origin)) => {
            url.username().is_empty()
                && url.password().is_none()
                && url.origin() == origin.origin()
        }
        _ => false,
    }
}

/// Validates a line and returns the URL to fetch, without touching the network.
pub fn plan_request(command: &str, origin: &str) -> Result<String, CommandError> {
    let parsed = parse_command(command);
    if parsed.name != ALLOWED_COMMAND {
        return Err(CommandError::UnknownCommand(parsed.name.to_string()));
    }
    let [arg] = parsed.args.as_slice() else {
        return Err(CommandError::BadArguments(
            parsed.args.iter().map(|arg| arg.to_string()).collect(),
        ));
    };

    match resolve_route(arg, origin) {
        Some(route) => Ok(format!("{origin}{route}")),
        None => Err(CommandError::DisallowedOrigin {
            origin: origin.to_string(),
        }),
    }
}
