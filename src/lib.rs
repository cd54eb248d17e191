// Library root
// -----------
// The binary (`main.rs`) only parses arguments and sets up logging; the
// work happens here.
//
// Module responsibilities:
// - `api`: HTTP calls to the Mochi Cards REST API (decks, cards,
//   attachments, templates) and the request payload types.
// - `config`: resolves the API key and base URL handed to the client.
// - `content`: the `# front\n---\nback` card body format.
// - `ui`: prompts, spinner and response formatting.
// - `cli`: argument definitions and command handlers.
pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod ui;

use anyhow::Result;
use api::MochiClient;
use cli::Cli;
use config::Config;

/// Resolve the configuration, build the client and run the command.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.api_key.as_deref(), &cli.base_url)?;
    let api = MochiClient::new(&config)?;
    cli::execute(&api, cli.command)
}
