use crate::api::{CardsView, SortBy};
use crate::config::DEFAULT_BASE_URL;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for mochi
#[derive(Parser, Debug)]
#[command(name = "mochi")]
#[command(about = "Mochi Cards CLI - Manage your flashcards from the command line")]
#[command(version)]
pub struct Cli {
    /// API key from Mochi Cards
    #[arg(long, env = "MOCHI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the Mochi API
    #[arg(long, env = "MOCHI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simplified deck commands
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Simplified card commands
    #[command(subcommand)]
    Card(CardCommand),

    /// Manage decks (one-to-one with the API)
    #[command(subcommand)]
    Decks(DecksCommand),

    /// Manage cards (one-to-one with the API)
    #[command(subcommand)]
    Cards(CardsCommand),

    /// Manage templates (one-to-one with the API)
    #[command(subcommand)]
    Templates(TemplatesCommand),
}

#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    /// List decks as a numbered summary
    List {
        /// Pagination bookmark
        #[arg(long)]
        bookmark: Option<String>,
    },
    /// Create a deck
    New {
        name: String,
        /// Parent deck ID
        #[arg(long)]
        parent_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardCommand {
    /// Add cards to a deck, prompting until an empty front is entered
    Add {
        /// Deck to add to; chosen interactively when omitted
        #[arg(long)]
        deck_id: Option<String>,
        /// Front side; together with --back adds exactly one card
        #[arg(long, requires = "back")]
        front: Option<String>,
        /// Back side
        #[arg(long, requires = "front")]
        back: Option<String>,
    },
    /// List the fronts of the cards in a deck
    List {
        /// Deck to list; chosen interactively when omitted
        #[arg(long)]
        deck_id: Option<String>,
        /// Pagination bookmark
        #[arg(long)]
        bookmark: Option<String>,
        /// Number of cards to return
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DecksCommand {
    /// List all decks
    List {
        /// Pagination bookmark
        #[arg(long)]
        bookmark: Option<String>,
    },
    /// Create a new deck
    Create(DeckCreateArgs),
    /// Get details of a specific deck
    Get { deck_id: String },
    /// Update fields of a deck
    Update(DeckUpdateArgs),
    /// Delete a deck
    Delete {
        deck_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct DeckCreateArgs {
    pub name: String,
    /// Parent deck ID
    #[arg(long)]
    pub parent_id: Option<String>,
    /// Sort order
    #[arg(long)]
    pub sort: Option<i64>,
    /// Create the deck archived
    #[arg(long)]
    pub archived: bool,
    /// Hide both sides of cards
    #[arg(long)]
    pub hide_sides: bool,
    /// How to sort cards
    #[arg(long, value_enum, default_value_t = SortBy::Lexicographically)]
    pub sort_by: SortBy,
    /// How to display cards
    #[arg(long, value_enum, default_value_t = CardsView::List)]
    pub cards_view: CardsView,
    /// Enable reverse review
    #[arg(long)]
    pub review_reverse: bool,
}

#[derive(Args, Debug)]
pub struct DeckUpdateArgs {
    pub deck_id: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New parent deck ID
    #[arg(long)]
    pub parent_id: Option<String>,
    /// Sort order
    #[arg(long)]
    pub sort: Option<i64>,
    /// Archive state
    #[arg(long)]
    pub archived: Option<bool>,
    /// Show both sides of cards
    #[arg(long)]
    pub show_sides: Option<bool>,
    /// How to sort cards
    #[arg(long, value_enum)]
    pub sort_by: Option<SortBy>,
    /// How to display cards
    #[arg(long, value_enum)]
    pub cards_view: Option<CardsView>,
    /// Reverse review
    #[arg(long)]
    pub review_reverse: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum CardsCommand {
    /// List cards, optionally filtered by deck
    List {
        /// Filter by deck ID
        #[arg(long)]
        deck_id: Option<String>,
        /// Pagination bookmark
        #[arg(long)]
        bookmark: Option<String>,
        /// Number of cards to return
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Create a new card
    Create(CardCreateArgs),
    /// Get details of a specific card
    Get { card_id: String },
    /// Update fields of a card
    Update(CardUpdateArgs),
    /// Delete a card
    Delete {
        card_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Add an attachment to a card
    Attach { card_id: String, file_path: PathBuf },
}

#[derive(Args, Debug)]
pub struct CardCreateArgs {
    /// ID of the deck to add the card to
    #[arg(long)]
    pub deck_id: String,
    /// Front side of the card; prompted when omitted
    #[arg(long)]
    pub front: Option<String>,
    /// Back side of the card; prompted when omitted
    #[arg(long)]
    pub back: Option<String>,
    /// Template ID to use
    #[arg(long)]
    pub template_id: Option<String>,
    /// Template field in NAME=VALUE format (can be specified multiple times)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
    /// Create the card archived
    #[arg(long)]
    pub archived: bool,
    /// Enable reverse review
    #[arg(long)]
    pub review_reverse: bool,
}

#[derive(Args, Debug)]
pub struct CardUpdateArgs {
    pub card_id: String,
    /// Replace the whole content
    #[arg(long, conflicts_with_all = ["front", "back"])]
    pub content: Option<String>,
    /// New front; requires --back
    #[arg(long, requires = "back")]
    pub front: Option<String>,
    /// New back; requires --front
    #[arg(long, requires = "front")]
    pub back: Option<String>,
    /// Move the card to another deck
    #[arg(long)]
    pub deck_id: Option<String>,
    /// Template ID
    #[arg(long)]
    pub template_id: Option<String>,
    /// Template field in NAME=VALUE format (can be specified multiple times)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
    /// Archive state
    #[arg(long)]
    pub archived: Option<bool>,
    /// Reverse review
    #[arg(long)]
    pub review_reverse: Option<bool>,
    /// Position within the deck
    #[arg(long)]
    pub pos: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List all templates
    List {
        /// Pagination bookmark
        #[arg(long)]
        bookmark: Option<String>,
    },
    /// Get details of a specific template
    Get { template_id: String },
}

/// Split a `NAME=VALUE` argument.
pub fn parse_field(arg: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid field format: {arg}. Expected NAME=VALUE"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Invalid field format: {arg}. Field name is empty");
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simplified_card_add() {
        let cli = Cli::try_parse_from([
            "mochi", "--api-key", "k", "card", "add", "--deck-id", "d1", "--front", "Q", "--back",
            "A",
        ])
        .unwrap();
        match cli.command {
            Command::Card(CardCommand::Add {
                deck_id,
                front,
                back,
            }) => {
                assert_eq!(deck_id.as_deref(), Some("d1"));
                assert_eq!(front.as_deref(), Some("Q"));
                assert_eq!(back.as_deref(), Some("A"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_front_requires_back() {
        let result = Cli::try_parse_from(["mochi", "card", "add", "--front", "Q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decks_create_defaults() {
        let cli = Cli::try_parse_from(["mochi", "decks", "create", "Spanish"]).unwrap();
        match cli.command {
            Command::Decks(DecksCommand::Create(args)) => {
                assert_eq!(args.sort_by, SortBy::Lexicographically);
                assert_eq!(args.cards_view, CardsView::List);
                assert!(!args.hide_sides);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_sort_by_accepts_kebab_case() {
        let cli = Cli::try_parse_from([
            "mochi",
            "decks",
            "update",
            "d1",
            "--sort-by",
            "retention-rate-asc",
            "--archived",
            "true",
        ])
        .unwrap();
        match cli.command {
            Command::Decks(DecksCommand::Update(args)) => {
                assert_eq!(args.sort_by, Some(SortBy::RetentionRateAsc));
                assert_eq!(args.archived, Some(true));
                assert_eq!(args.name, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("name=Hola=Hi").unwrap(),
            ("name".to_string(), "Hola=Hi".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }
}
