//! Response bodies of the deck service. Every field is optional so a
//! partial reply decodes and is then rejected with a precise message.

use serde::Deserialize;

use crate::domain::{Card, DeckError, DrawnCard, NewDeck, ShuffledDeck};

#[derive(Debug, Deserialize)]
pub struct NewDeckResponse {
    pub success: Option<bool>,
    pub deck_id: Option<String>,
    pub remaining: Option<u32>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DrawResponse {
    pub success: Option<bool>,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub remaining: Option<u32>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShuffleResponse {
    pub success: Option<bool>,
    pub remaining: Option<u32>,
    pub error: Option<String>,
}

fn check_success(success: Option<bool>, error: Option<String>) -> Result<(), DeckError> {
    match success {
        Some(false) => Err(DeckError::Protocol(
            error.unwrap_or_else(|| "service reported failure".to_string()),
        )),
        _ => Ok(()),
    }
}

impl TryFrom<NewDeckResponse> for NewDeck {
    type Error = DeckError;

    fn try_from(resp: NewDeckResponse) -> Result<Self, Self::Error> {
        check_success(resp.success, resp.error)?;
        Ok(NewDeck {
            deck_id: resp.deck_id.ok_or_else(|| DeckError::missing("deck_id"))?,
            remaining: resp.remaining.ok_or_else(|| DeckError::missing("remaining"))?,
        })
    }
}

impl TryFrom<DrawResponse> for DrawnCard {
    type Error = DeckError;

    fn try_from(resp: DrawResponse) -> Result<Self, Self::Error> {
        check_success(resp.success, resp.error)?;
        let remaining = resp.remaining.ok_or_else(|| DeckError::missing("remaining"))?;
        let card = resp
            .cards
            .into_iter()
            .next()
            .ok_or_else(|| DeckError::missing("cards[0]"))?;
        Ok(DrawnCard { card, remaining })
    }
}

impl TryFrom<ShuffleResponse> for ShuffledDeck {
    type Error = DeckError;

    fn try_from(resp: ShuffleResponse) -> Result<Self, Self::Error> {
        check_success(resp.success, resp.error)?;
        Ok(ShuffledDeck {
            remaining: resp.remaining.ok_or_else(|| DeckError::missing("remaining"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_response() {
        let resp: NewDeckResponse = serde_json::from_str(
            r#"{"success": true, "deck_id": "3p40paa87x90", "shuffled": true, "remaining": 52}"#,
        )
        .unwrap();
        let deck = NewDeck::try_from(resp).unwrap();
        assert_eq!(deck, NewDeck { deck_id: "3p40paa87x90".into(), remaining: 52 });
    }

    #[test]
    fn test_new_deck_missing_id() {
        let resp: NewDeckResponse =
            serde_json::from_str(r#"{"success": true, "remaining": 52}"#).unwrap();
        assert_eq!(NewDeck::try_from(resp).unwrap_err(), DeckError::missing("deck_id"));
    }

    #[test]
    fn test_draw_takes_first_card() {
        let resp: DrawResponse = serde_json::from_str(
            r#"{
                "success": true,
                "deck_id": "kxozasf3edqu",
                "cards": [{"code": "KH", "image": "https://x/KH.png", "value": "KING", "suit": "HEARTS"}],
                "remaining": 50
            }"#,
        )
        .unwrap();
        let drawn = DrawnCard::try_from(resp).unwrap();
        assert_eq!(drawn.card.label(), "KING of HEARTS");
        assert_eq!(drawn.remaining, 50);
    }

    #[test]
    fn test_draw_without_cards_is_protocol_failure() {
        let resp: DrawResponse = serde_json::from_str(
            r#"{"success": false, "cards": [], "remaining": 0,
                "error": "Not enough cards remaining to draw 1 additional"}"#,
        )
        .unwrap();
        let err = DrawnCard::try_from(resp).unwrap_err();
        assert_eq!(
            err,
            DeckError::Protocol("Not enough cards remaining to draw 1 additional".into())
        );

        let resp: DrawResponse = serde_json::from_str(r#"{"remaining": 3}"#).unwrap();
        assert_eq!(DrawnCard::try_from(resp).unwrap_err(), DeckError::missing("cards[0]"));
    }

    #[test]
    fn test_shuffle_response() {
        let resp: ShuffleResponse = serde_json::from_str(
            r#"{"success": true, "deck_id": "3p40paa87x90", "shuffled": true, "remaining": 52}"#,
        )
        .unwrap();
        assert_eq!(ShuffledDeck::try_from(resp).unwrap(), ShuffledDeck { remaining: 52 });

        let resp: ShuffleResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(ShuffledDeck::try_from(resp).unwrap_err().kind(), crate::domain::ErrorKind::ProtocolFailure);
    }
}
