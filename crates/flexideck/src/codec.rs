//! # Deck File Codec
//!
//! Decks travel between installs as self-contained JSON files. A file holds either
//! one deck or a bulk export of many:
//!
//! ```text
//! { "name", "newCardsAre2Sided", "cards": [..], "exportDate", "exportVersion" }
//! { "decks": [ <deck>, .. ], "exportDate", "exportVersion" }
//! ```
//!
//! Each card carries `title`, `front`, `back`, `is2Sided`, `tags`, `starRating`,
//! `isCompleted`, `creationDate` and `modifiedDate`; timestamps are RFC 3339.
//! Ids and the card-to-deck handle are never written. Decoding mints fresh ids and
//! the handle falls out of nesting cards under their deck.
//!
//! ## Tolerated Input
//!
//! Files written by older versions may lack fields. Decoding substitutes:
//!
//! | missing | becomes |
//! |---------|---------|
//! | `name` | empty string |
//! | `newCardsAre2Sided`, `is2Sided` | one-sided |
//! | `title` | empty string |
//! | `tags` | recomputed from `front` (always) |
//! | `starRating` | 0 |
//! | `isCompleted` | false |
//! | `creationDate`, `modifiedDate` | now |
//! | `exportVersion` | accepted as current |
//!
//! `cards`, `front` and `back` are required. A missing or mistyped required field,
//! a star rating outside 0-5 or an unknown major version is a [`DeckError::Decode`].

use crate::error::{DeckError, Result};
use crate::model::{Card, Deck, Sides, MAX_STAR_RATING};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXPORT_VERSION: &str = "1.0";

pub const DECK_FILE_EXTENSION: &str = "flexideck";

pub const DECK_CONTENT_TYPE: &str = "application/vnd.flexideck+json";

// --- Encoding ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckRecord<'a> {
    name: &'a str,
    #[serde(rename = "newCardsAre2Sided")]
    new_cards_are_2_sided: bool,
    cards: Vec<CardRecord<'a>>,
    export_date: DateTime<Utc>,
    export_version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord<'a> {
    title: &'a str,
    front: &'a str,
    back: &'a str,
    #[serde(rename = "is2Sided")]
    is_2_sided: bool,
    tags: &'a [String],
    star_rating: u8,
    is_completed: bool,
    creation_date: DateTime<Utc>,
    modified_date: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkRecord {
    decks: Vec<Value>,
    export_date: DateTime<Utc>,
    export_version: &'static str,
}

fn deck_record(deck: &Deck, exported_at: DateTime<Utc>) -> DeckRecord<'_> {
    DeckRecord {
        name: &deck.name,
        new_cards_are_2_sided: deck.new_cards_sides.is_two_sided(),
        cards: deck
            .cards()
            .iter()
            .map(|card| CardRecord {
                title: &card.title,
                front: card.front(),
                back: card.back(),
                is_2_sided: card.sides().is_two_sided(),
                tags: card.tags(),
                star_rating: card.rating(),
                is_completed: card.completed,
                creation_date: card.created_at,
                modified_date: card.modified_at,
            })
            .collect(),
        export_date: exported_at,
        export_version: EXPORT_VERSION,
    }
}

fn encode_error(deck: &Deck, source: serde_json::Error) -> DeckError {
    DeckError::Encode {
        deck_id: deck.id,
        deck_name: deck.name.clone(),
        source,
    }
}

/// Encodes one deck as a pretty-printed deck file.
pub fn encode_deck(deck: &Deck) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(&deck_record(deck, Utc::now())).map_err(|e| encode_error(deck, e))
}

/// Encodes every deck into one bulk file. The first deck that fails is reported.
pub fn encode_decks(decks: &[Deck]) -> Result<Vec<u8>> {
    let exported_at = Utc::now();
    let records = decks
        .iter()
        .map(|deck| {
            serde_json::to_value(deck_record(deck, exported_at)).map_err(|e| encode_error(deck, e))
        })
        .collect::<Result<Vec<Value>>>()?;

    let bulk = BulkRecord {
        decks: records,
        export_date: exported_at,
        export_version: EXPORT_VERSION,
    };
    Ok(serde_json::to_vec_pretty(&bulk)?)
}

// --- Decoding ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "newCardsAre2Sided", default)]
    new_cards_are_2_sided: Option<bool>,
    cards: Vec<CardPayload>,
    #[serde(default)]
    export_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardPayload {
    #[serde(default)]
    title: Option<String>,
    front: String,
    back: String,
    #[serde(rename = "is2Sided", default)]
    is_2_sided: Option<bool>,
    #[serde(default)]
    star_rating: Option<i64>,
    #[serde(default)]
    is_completed: Option<bool>,
    #[serde(default)]
    creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    modified_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkPayload {
    decks: Vec<DeckPayload>,
    #[serde(default)]
    export_version: Option<String>,
}

fn check_version(version: Option<&str>) -> Result<()> {
    let Some(version) = version else {
        return Ok(());
    };
    let major = |v: &str| v.split('.').next().unwrap_or_default().trim().to_string();
    if major(version) != major(EXPORT_VERSION) {
        return Err(DeckError::Decode(format!(
            "unsupported export version \"{}\" (expected {})",
            version, EXPORT_VERSION
        )));
    }
    Ok(())
}

fn build_card(payload: CardPayload, position: usize) -> Result<Card> {
    let rating = payload.star_rating.unwrap_or(0);
    if !(0..=i64::from(MAX_STAR_RATING)).contains(&rating) {
        return Err(DeckError::Decode(format!(
            "card {} has star rating {}, expected 0 to {}",
            position + 1,
            rating,
            MAX_STAR_RATING
        )));
    }

    let now = Utc::now();
    let sides = Sides::from_two_sided(payload.is_2_sided.unwrap_or(false));
    let mut card = Card::new(payload.title.unwrap_or_default(), sides);
    card.set_front(payload.front);
    card.set_back(payload.back);
    card.set_rating(rating as u8);
    card.set_completed(payload.is_completed.unwrap_or(false));
    // Setters touch the modification time; restore the recorded one last.
    card.created_at = payload.creation_date.unwrap_or(now);
    card.modified_at = payload.modified_date.unwrap_or(now);
    Ok(card)
}

fn build_deck(payload: DeckPayload) -> Result<Deck> {
    check_version(payload.export_version.as_deref())?;
    let sides = Sides::from_two_sided(payload.new_cards_are_2_sided.unwrap_or(false));
    let mut deck = Deck::new(payload.name.unwrap_or_default(), sides);
    for (position, card) in payload.cards.into_iter().enumerate() {
        deck.add_card(build_card(card, position)?);
    }
    Ok(deck)
}

fn parse<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| DeckError::Decode(e.to_string()))
}

fn parse_object(bytes: &[u8]) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DeckError::Decode("expected a JSON object".to_string())),
        Err(e) => Err(DeckError::Decode(e.to_string())),
    }
}

/// Decodes a single-deck file.
pub fn decode_deck(bytes: &[u8]) -> Result<Deck> {
    let object = parse_object(bytes)?;
    build_deck(parse(Value::Object(object))?)
}

/// Decodes a deck file of either shape, returning its decks in file order.
///
/// Either every deck decodes or an error is returned; there is no partial result.
pub fn decode_file(bytes: &[u8]) -> Result<Vec<Deck>> {
    let object = parse_object(bytes)?;
    if !object.contains_key("decks") {
        return Ok(vec![build_deck(parse(Value::Object(object))?)?]);
    }

    let bulk: BulkPayload = parse(Value::Object(object))?;
    check_version(bulk.export_version.as_deref())?;
    bulk.decks.into_iter().map(build_deck).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::spanish_deck;

    fn assert_same_content(decoded: &Deck, original: &Deck) {
        assert_eq!(decoded.name, original.name);
        assert_eq!(decoded.new_cards_sides, original.new_cards_sides);
        assert_eq!(decoded.len(), original.len());
        for (got, want) in decoded.cards().iter().zip(original.cards()) {
            assert!(got.content_eq(want), "{:?} != {:?}", got, want);
            assert_eq!(got.deck_id(), Some(decoded.id));
        }
    }

    #[test]
    fn round_trips_a_deck() {
        let mut deck = spanish_deck();
        let first = deck.cards()[0].id;
        deck.card_mut(&first).unwrap().set_completed(true);

        let decoded = decode_deck(&encode_deck(&deck).unwrap()).unwrap();
        assert_same_content(&decoded, &deck);
        assert_ne!(decoded.id, deck.id);
        assert!(decoded.is_linked());
    }

    #[test]
    fn round_trips_an_empty_deck() {
        let deck = Deck::new("Empty", Sides::One);
        let decoded = decode_deck(&encode_deck(&deck).unwrap()).unwrap();
        assert_same_content(&decoded, &deck);
        assert!(decoded.is_empty());
    }

    #[test]
    fn round_trips_bulk_files() {
        let decks = vec![spanish_deck(), Deck::new("Empty", Sides::One)];
        let decoded = decode_file(&encode_decks(&decks).unwrap()).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_same_content(&decoded[0], &decks[0]);
        assert_same_content(&decoded[1], &decks[1]);
    }

    #[test]
    fn decode_file_accepts_single_deck() {
        let deck = spanish_deck();
        let decoded = decode_file(&encode_deck(&deck).unwrap()).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_same_content(&decoded[0], &deck);
    }

    #[test]
    fn writes_expected_field_names() {
        let json: Value = serde_json::from_slice(&encode_deck(&spanish_deck()).unwrap()).unwrap();
        assert_eq!(json["name"], "Spanish");
        assert_eq!(json["newCardsAre2Sided"], true);
        assert_eq!(json["exportVersion"], EXPORT_VERSION);
        assert!(json.get("id").is_none());

        let adios = &json["cards"][1];
        assert_eq!(adios["is2Sided"], true);
        assert_eq!(adios["starRating"], 3);
        assert_eq!(adios["tags"][0], "#greeting");
        assert!(adios["creationDate"].is_string());
        assert!(adios.get("deck").is_none() && adios.get("deckId").is_none());
    }

    #[test]
    fn fills_defaults_for_legacy_fields() {
        let json = br#"{ "cards": [ { "front": "Hola #greeting", "back": "ignored" } ] }"#;
        let deck = decode_deck(json).unwrap();

        assert_eq!(deck.name, "");
        assert_eq!(deck.new_cards_sides, Sides::One);
        let card = &deck.cards()[0];
        assert_eq!(card.title, "");
        assert_eq!(card.sides(), Sides::One);
        assert_eq!(card.back(), "");
        assert_eq!(card.tags(), ["#greeting"]);
        assert_eq!(card.rating(), 0);
        assert!(!card.completed);
    }

    #[test]
    fn tags_follow_front_not_payload() {
        let json = br##"{ "name": "D", "cards": [
            { "front": "x #real", "back": "", "tags": ["#stale"] } ] }"##;
        let deck = decode_deck(json).unwrap();
        assert_eq!(deck.cards()[0].tags(), ["#real"]);
    }

    #[test]
    fn keeps_recorded_timestamps() {
        let json = br#"{ "name": "D", "cards": [ { "front": "", "back": "",
            "creationDate": "2024-12-26T10:00:00Z", "modifiedDate": "2025-01-02T08:30:00Z" } ] }"#;
        let deck = decode_deck(json).unwrap();
        let card = &deck.cards()[0];
        assert_eq!(card.created_at.to_rfc3339(), "2024-12-26T10:00:00+00:00");
        assert_eq!(card.modified_at.to_rfc3339(), "2025-01-02T08:30:00+00:00");
    }

    #[test]
    fn rejects_missing_required_fields() {
        let no_cards = br#"{ "name": "D" }"#;
        let no_back = br#"{ "name": "D", "cards": [ { "front": "x" } ] }"#;
        let wrong_shape = br#"{ "name": "D", "cards": "nope" }"#;

        for bytes in [&no_cards[..], &no_back[..], &wrong_shape[..]] {
            match decode_file(bytes) {
                Err(DeckError::Decode(msg)) => assert!(!msg.is_empty()),
                other => panic!("expected decode error, got {:?}", other.map(|d| d.len())),
            }
        }
    }

    #[test]
    fn rejects_garbage_and_non_objects() {
        assert!(matches!(decode_file(b"not json"), Err(DeckError::Decode(_))));
        assert!(matches!(decode_file(b"[1, 2]"), Err(DeckError::Decode(_))));
        assert!(matches!(decode_file(b""), Err(DeckError::Decode(_))));
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let json = br#"{ "name": "D", "cards": [ { "front": "", "back": "", "starRating": 7 } ] }"#;
        match decode_deck(json) {
            Err(DeckError::Decode(msg)) => assert!(msg.contains("star rating 7")),
            _ => panic!("expected decode error"),
        }
    }

    #[test]
    fn rejects_other_major_versions() {
        let json = br#"{ "name": "D", "cards": [], "exportVersion": "2.0" }"#;
        assert!(matches!(decode_deck(json), Err(DeckError::Decode(_))));

        let json = br#"{ "name": "D", "cards": [], "exportVersion": "1.3" }"#;
        assert!(decode_deck(json).is_ok());

        let bulk = br#"{ "decks": [], "exportVersion": "0.9" }"#;
        assert!(matches!(decode_file(bulk), Err(DeckError::Decode(_))));
    }

    #[test]
    fn bulk_fails_as_a_whole() {
        let json = br#"{ "decks": [
            { "name": "Good", "cards": [] },
            { "name": "Bad", "cards": [ { "front": "" } ] } ] }"#;
        assert!(matches!(decode_file(json), Err(DeckError::Decode(_))));
    }
}
