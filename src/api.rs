// API client module: a small blocking HTTP client for the Mochi Cards REST
// API. Every call authenticates with basic auth (API key as user name, empty
// password), sends JSON and returns the parsed JSON body.

use crate::config::Config;
use crate::error::{MochiError, Result};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Blocking client bound to one base URL and one API key.
#[derive(Clone)]
pub struct MochiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// How a deck orders its cards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    None,
    Lexicographically,
    CreatedAt,
    UpdatedAt,
    RetentionRateAsc,
    IntervalLength,
}

/// How a deck displays its cards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CardsView {
    List,
    Grid,
    Note,
    Column,
}

/// Body of `POST decks`.
#[derive(Serialize, Debug, Clone)]
pub struct NewDeck {
    pub name: String,
    #[serde(rename = "parent-id")]
    pub parent_id: Option<String>,
    pub sort: Option<i64>,
    #[serde(rename = "archived?")]
    pub archived: bool,
    #[serde(rename = "show-sides?")]
    pub show_sides: bool,
    #[serde(rename = "sort-by")]
    pub sort_by: SortBy,
    #[serde(rename = "cards-view")]
    pub cards_view: CardsView,
    #[serde(rename = "review-reverse?")]
    pub review_reverse: bool,
}

impl NewDeck {
    pub fn new(name: impl Into<String>) -> Self {
        NewDeck {
            name: name.into(),
            parent_id: None,
            sort: None,
            archived: false,
            show_sides: true,
            sort_by: SortBy::Lexicographically,
            cards_view: CardsView::List,
            review_reverse: false,
        }
    }
}

/// Partial update of a deck. Only the fields that are `Some` are sent.
#[derive(Serialize, Debug, Clone, Default)]
pub struct DeckUpdate {
    pub name: Option<String>,
    #[serde(rename = "parent-id")]
    pub parent_id: Option<String>,
    pub sort: Option<i64>,
    #[serde(rename = "archived?")]
    pub archived: Option<bool>,
    #[serde(rename = "show-sides?")]
    pub show_sides: Option<bool>,
    #[serde(rename = "sort-by")]
    pub sort_by: Option<SortBy>,
    #[serde(rename = "cards-view")]
    pub cards_view: Option<CardsView>,
    #[serde(rename = "review-reverse?")]
    pub review_reverse: Option<bool>,
}

/// Body of `POST cards`.
#[derive(Serialize, Debug, Clone)]
pub struct NewCard {
    #[serde(rename = "deck-id")]
    pub deck_id: String,
    pub content: String,
    #[serde(rename = "template-id")]
    pub template_id: Option<String>,
    pub fields: Map<String, Value>,
    #[serde(rename = "archived?")]
    pub archived: bool,
    #[serde(rename = "review-reverse?")]
    pub review_reverse: bool,
    pub pos: Option<String>,
}

impl NewCard {
    pub fn new(deck_id: impl Into<String>, content: impl Into<String>) -> Self {
        NewCard {
            deck_id: deck_id.into(),
            content: content.into(),
            template_id: None,
            fields: Map::new(),
            archived: false,
            review_reverse: false,
            pos: None,
        }
    }

    /// Set a template field, stored the way Mochi expects:
    /// `{"<name>": {"id": "<name>", "value": "<value>"}}`.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), card_field(name, value));
        self
    }
}

/// Partial update of a card. Only the fields that are `Some` are sent.
#[derive(Serialize, Debug, Clone, Default)]
pub struct CardUpdate {
    pub content: Option<String>,
    #[serde(rename = "deck-id")]
    pub deck_id: Option<String>,
    #[serde(rename = "template-id")]
    pub template_id: Option<String>,
    pub fields: Option<Map<String, Value>>,
    #[serde(rename = "archived?")]
    pub archived: Option<bool>,
    #[serde(rename = "review-reverse?")]
    pub review_reverse: Option<bool>,
    pub pos: Option<String>,
}

/// Filters for `GET cards`.
#[derive(Debug, Clone, Default)]
pub struct CardQuery {
    pub deck_id: Option<String>,
    pub bookmark: Option<String>,
    pub limit: Option<u32>,
}

impl CardQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(deck_id) = self.deck_id.as_deref().filter(|s| !s.is_empty()) {
            params.push(("deck-id", deck_id.to_string()));
        }
        params.extend(bookmark_param(self.bookmark.as_deref()));
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

pub fn card_field(name: &str, value: &str) -> Value {
    serde_json::json!({ "id": name, "value": value })
}

/// Drop every top-level key whose value is `null`.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    Ok(strip_nulls(serde_json::to_value(payload)?))
}

fn bookmark_param(bookmark: Option<&str>) -> Option<(&'static str, String)> {
    bookmark
        .filter(|b| !b.is_empty())
        .map(|b| ("bookmark", b.to_string()))
}

/// The `docs` array of a listing response; empty when missing.
pub fn docs(listing: &Value) -> &[Value] {
    listing
        .get("docs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The pagination cursor of a listing response, if any.
pub fn bookmark(listing: &Value) -> Option<&str> {
    listing
        .get("bookmark")
        .and_then(Value::as_str)
        .filter(|b| !b.is_empty())
}

impl MochiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(MochiClient {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = self.url(endpoint);
        debug!("{} {}", method, url);
        let mut req = self
            .client
            .request(method, &url)
            .basic_auth(&self.api_key, Some(""));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        parse_response(req.send()?)
    }

    // Decks

    pub fn list_decks(&self, bookmark: Option<&str>) -> Result<Value> {
        let query: Vec<_> = bookmark_param(bookmark).into_iter().collect();
        self.request(Method::GET, "decks", &query, None)
    }

    pub fn create_deck(&self, deck: &NewDeck) -> Result<Value> {
        self.request(Method::POST, "decks", &[], Some(to_body(deck)?))
    }

    pub fn get_deck(&self, deck_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("decks/{deck_id}"), &[], None)
    }

    pub fn update_deck(&self, deck_id: &str, update: &DeckUpdate) -> Result<Value> {
        let body = to_body(update)?;
        self.request(Method::POST, &format!("decks/{deck_id}"), &[], Some(body))
    }

    pub fn delete_deck(&self, deck_id: &str) -> Result<()> {
        self.request(Method::DELETE, &format!("decks/{deck_id}"), &[], None)?;
        Ok(())
    }

    // Cards

    pub fn list_cards(&self, query: &CardQuery) -> Result<Value> {
        self.request(Method::GET, "cards", &query.params(), None)
    }

    pub fn create_card(&self, card: &NewCard) -> Result<Value> {
        self.request(Method::POST, "cards", &[], Some(to_body(card)?))
    }

    pub fn get_card(&self, card_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("cards/{card_id}"), &[], None)
    }

    pub fn update_card(&self, card_id: &str, update: &CardUpdate) -> Result<Value> {
        let body = to_body(update)?;
        self.request(Method::POST, &format!("cards/{card_id}"), &[], Some(body))
    }

    pub fn delete_card(&self, card_id: &str) -> Result<()> {
        self.request(Method::DELETE, &format!("cards/{card_id}"), &[], None)?;
        Ok(())
    }

    /// Upload a file to a card as multipart/form-data under the `file` part.
    pub fn add_attachment(&self, card_id: &str, file_path: &Path) -> Result<Value> {
        let url = self.url(&format!("cards/{card_id}/attachments"));
        let bytes = std::fs::read(file_path)?;
        let file_name = file_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("attachment")
            .to_string();

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        debug!("POST {} (multipart)", url);
        let res = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(""))
            .multipart(form)
            .send()?;
        parse_response(res)
    }

    // Templates

    pub fn list_templates(&self, bookmark: Option<&str>) -> Result<Value> {
        let query: Vec<_> = bookmark_param(bookmark).into_iter().collect();
        self.request(Method::GET, "templates", &query, None)
    }

    pub fn get_template(&self, template_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("templates/{template_id}"), &[], None)
    }
}

/// Turn non-2xx statuses into `MochiError::Api`; parse everything else as
/// JSON, with an empty body mapping to `null`.
fn parse_response(res: Response) -> Result<Value> {
    let status = res.status();
    debug!("Response status: {}", status);
    let text = res.text()?;
    if !status.is_success() {
        return Err(MochiError::Api { status, body: text });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}
