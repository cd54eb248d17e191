//! CLI command implementations

use crate::api::{self, CardQuery, CardUpdate, DeckUpdate, MochiClient, NewCard, NewDeck};
use crate::cli::args::{
    parse_field, CardCommand, CardCreateArgs, CardUpdateArgs, CardsCommand, Command, DeckCommand,
    DeckCreateArgs, DeckUpdateArgs, DecksCommand, TemplatesCommand,
};
use crate::content::card_content;
use crate::ui::{self, with_spinner, Prompter, TerminalPrompter};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Execute one parsed command against the API.
pub fn execute(api: &MochiClient, command: Command) -> Result<()> {
    match command {
        Command::Deck(cmd) => execute_deck(api, cmd),
        Command::Card(cmd) => execute_card(api, cmd),
        Command::Decks(cmd) => execute_decks(api, cmd),
        Command::Cards(cmd) => execute_cards(api, cmd),
        Command::Templates(cmd) => execute_templates(api, cmd),
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", ui::format_json(value)?);
    Ok(())
}

fn id_of(doc: &Value) -> &str {
    doc.get("id").and_then(Value::as_str).unwrap_or("?")
}

// Simplified commands

fn execute_deck(api: &MochiClient, cmd: DeckCommand) -> Result<()> {
    match cmd {
        DeckCommand::List { bookmark } => {
            let listing = with_spinner("Fetching decks...", || api.list_decks(bookmark.as_deref()))?;
            println!("{}", ui::deck_summary(&listing));
        }
        DeckCommand::New { name, parent_id } => {
            let deck = NewDeck {
                parent_id,
                ..NewDeck::new(name.as_str())
            };
            let created = with_spinner("Creating deck...", || api.create_deck(&deck))?;
            println!("Created deck {} ({})", name, id_of(&created));
        }
    }
    Ok(())
}

fn execute_card(api: &MochiClient, cmd: CardCommand) -> Result<()> {
    match cmd {
        CardCommand::Add {
            deck_id,
            front,
            back,
        } => {
            let deck_id = match deck_id {
                Some(id) => id,
                None => choose_deck(api, &mut TerminalPrompter)?,
            };
            if let (Some(front), Some(back)) = (front, back) {
                return add_card(api, &deck_id, &front, &back);
            }
            add_cards_interactively(&mut TerminalPrompter, &deck_id, |card| {
                with_spinner("Creating card...", || api.create_card(card))
            })?;
            Ok(())
        }
        CardCommand::List {
            deck_id,
            bookmark,
            limit,
        } => {
            let deck_id = match deck_id {
                Some(id) => id,
                None => choose_deck(api, &mut TerminalPrompter)?,
            };
            let query = CardQuery {
                deck_id: Some(deck_id),
                bookmark,
                limit,
            };
            let listing = with_spinner("Fetching cards...", || api.list_cards(&query))?;
            println!("{}", ui::card_summary(&listing));
            Ok(())
        }
    }
}

fn choose_deck(api: &MochiClient, prompter: &mut dyn Prompter) -> Result<String> {
    let listing = with_spinner("Fetching decks...", || api.list_decks(None))?;
    Ok(ui::select_deck(prompter, api::docs(&listing))?)
}

fn add_card(api: &MochiClient, deck_id: &str, front: &str, back: &str) -> Result<()> {
    let card = NewCard::new(deck_id, card_content(front, back));
    let created = with_spinner("Creating card...", || api.create_card(&card))?;
    println!("Created card {}", id_of(&created));
    Ok(())
}

/// Prompt for front and back and create a card per pair until the front is
/// left empty. Returns the number of cards created.
fn add_cards_interactively(
    prompter: &mut dyn Prompter,
    deck_id: &str,
    mut create: impl FnMut(&NewCard) -> crate::error::Result<Value>,
) -> Result<usize> {
    println!("Adding cards to deck {deck_id}. Leave the front empty to quit.");
    let mut added = 0usize;
    loop {
        let front = prompter.input("Front", true)?;
        if front.trim().is_empty() {
            break;
        }
        let back = prompter.input("Back", false)?;
        let card = NewCard::new(deck_id, card_content(front.trim(), back.trim()));
        let created = create(&card)?;
        println!("Created card {}", id_of(&created));
        added += 1;
    }
    info!("Added {} card(s) to deck {}", added, deck_id);
    println!("Added {added} card(s).");
    Ok(added)
}

// One-to-one API commands

fn execute_decks(api: &MochiClient, cmd: DecksCommand) -> Result<()> {
    match cmd {
        DecksCommand::List { bookmark } => {
            print_json(&with_spinner("Fetching decks...", || {
                api.list_decks(bookmark.as_deref())
            })?)
        }
        DecksCommand::Create(args) => {
            let deck = new_deck(args);
            print_json(&with_spinner("Creating deck...", || api.create_deck(&deck))?)
        }
        DecksCommand::Get { deck_id } => {
            print_json(&with_spinner("Fetching deck...", || api.get_deck(&deck_id))?)
        }
        DecksCommand::Update(args) => {
            let (deck_id, update) = deck_update(args);
            print_json(&with_spinner("Updating deck...", || {
                api.update_deck(&deck_id, &update)
            })?)
        }
        DecksCommand::Delete { deck_id, yes } => {
            if !yes && !TerminalPrompter.confirm("Are you sure you want to delete this deck?")? {
                println!("Aborted.");
                return Ok(());
            }
            with_spinner("Deleting deck...", || api.delete_deck(&deck_id))?;
            println!("Deck {deck_id} deleted successfully.");
            Ok(())
        }
    }
}

fn new_deck(args: DeckCreateArgs) -> NewDeck {
    NewDeck {
        name: args.name,
        parent_id: args.parent_id,
        sort: args.sort,
        archived: args.archived,
        show_sides: !args.hide_sides,
        sort_by: args.sort_by,
        cards_view: args.cards_view,
        review_reverse: args.review_reverse,
    }
}

fn deck_update(args: DeckUpdateArgs) -> (String, DeckUpdate) {
    let update = DeckUpdate {
        name: args.name,
        parent_id: args.parent_id,
        sort: args.sort,
        archived: args.archived,
        show_sides: args.show_sides,
        sort_by: args.sort_by,
        cards_view: args.cards_view,
        review_reverse: args.review_reverse,
    };
    (args.deck_id, update)
}

fn execute_cards(api: &MochiClient, cmd: CardsCommand) -> Result<()> {
    match cmd {
        CardsCommand::List {
            deck_id,
            bookmark,
            limit,
        } => {
            let query = CardQuery {
                deck_id,
                bookmark,
                limit,
            };
            print_json(&with_spinner("Fetching cards...", || api.list_cards(&query))?)
        }
        CardsCommand::Create(args) => {
            let card = new_card(args, &mut TerminalPrompter)?;
            print_json(&with_spinner("Creating card...", || api.create_card(&card))?)
        }
        CardsCommand::Get { card_id } => {
            print_json(&with_spinner("Fetching card...", || api.get_card(&card_id))?)
        }
        CardsCommand::Update(args) => {
            let (card_id, update) = card_update(args)?;
            print_json(&with_spinner("Updating card...", || {
                api.update_card(&card_id, &update)
            })?)
        }
        CardsCommand::Delete { card_id, yes } => {
            if !yes && !TerminalPrompter.confirm("Are you sure you want to delete this card?")? {
                println!("Aborted.");
                return Ok(());
            }
            with_spinner("Deleting card...", || api.delete_card(&card_id))?;
            println!("Card {card_id} deleted successfully.");
            Ok(())
        }
        CardsCommand::Attach { card_id, file_path } => attach(api, &card_id, &file_path),
    }
}

fn attach(api: &MochiClient, card_id: &str, file_path: &Path) -> Result<()> {
    if !file_path.is_file() {
        anyhow::bail!("File not found: {}", file_path.display());
    }
    let result = with_spinner("Uploading...", || api.add_attachment(card_id, file_path))
        .with_context(|| format!("Failed to attach {}", file_path.display()))?;
    print_json(&result)
}

fn field_map(fields: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for arg in fields {
        let (name, value) = parse_field(arg)?;
        map.insert(name.clone(), api::card_field(&name, &value));
    }
    Ok(map)
}

fn new_card(args: CardCreateArgs, prompter: &mut dyn Prompter) -> Result<NewCard> {
    let front = match args.front {
        Some(front) => front,
        None => prompter.input("Front", false)?,
    };
    let back = match args.back {
        Some(back) => back,
        None => prompter.input("Back", false)?,
    };
    Ok(NewCard {
        template_id: args.template_id,
        fields: field_map(&args.fields)?,
        archived: args.archived,
        review_reverse: args.review_reverse,
        ..NewCard::new(args.deck_id, card_content(&front, &back))
    })
}

fn card_update(args: CardUpdateArgs) -> Result<(String, CardUpdate)> {
    let content = match (args.content, args.front, args.back) {
        (Some(content), _, _) => Some(content),
        (None, Some(front), Some(back)) => Some(card_content(&front, &back)),
        _ => None,
    };
    let fields = if args.fields.is_empty() {
        None
    } else {
        Some(field_map(&args.fields)?)
    };
    let update = CardUpdate {
        content,
        deck_id: args.deck_id,
        template_id: args.template_id,
        fields,
        archived: args.archived,
        review_reverse: args.review_reverse,
        pos: args.pos,
    };
    Ok((args.card_id, update))
}

fn execute_templates(api: &MochiClient, cmd: TemplatesCommand) -> Result<()> {
    match cmd {
        TemplatesCommand::List { bookmark } => print_json(&with_spinner(
            "Fetching templates...",
            || api.list_templates(bookmark.as_deref()),
        )?),
        TemplatesCommand::Get { template_id } => print_json(&with_spinner(
            "Fetching template...",
            || api.get_template(&template_id),
        )?),
    }
}
