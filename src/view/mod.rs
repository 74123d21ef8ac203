pub mod card_view;
pub mod controls;

use crate::domain::DeckView;
use controls::ControlsProps;

const INDEX_PAGE: &str = include_str!("index.html");

/// The shell page; everything inside `#root` arrives over the websocket.
pub fn index_page() -> &'static str {
    INDEX_PAGE
}

pub fn render_app(view: &DeckView) -> String {
    let controls = controls::render(&ControlsProps {
        draw_disabled: view.draw_disabled,
        shuffle_disabled: view.shuffle_disabled,
        shuffle_label: &view.shuffle_label,
    });
    let card = card_view::render(view.latest_card.as_ref());

    format!(
        r#"<div class="deck-app"><h1>Card Dealer</h1><div class="controls">{controls}</div><div class="card-view">{card}</div></div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, DeckState, DrawnCard, NewDeck};

    #[test]
    fn test_render_app_before_deck_arrives() {
        let html = render_app(&DeckState::default().view());
        assert!(html.contains("<h1>Card Dealer</h1>"));
        assert!(html.contains(card_view::EMPTY_MESSAGE));
        assert_eq!(html.matches(" disabled").count(), 2);
    }

    #[test]
    fn test_render_app_with_card() {
        let mut state = DeckState::default();
        state.apply_new_deck(NewDeck { deck_id: "d".into(), remaining: 52 });
        state.apply_draw(DrawnCard {
            card: Card { value: "ACE".into(), suit: "HEARTS".into(), image: "https://x/AH.png".into() },
            remaining: 51,
        });

        let html = render_app(&state.view());
        assert!(html.contains("ACE of HEARTS"));
        assert!(!html.contains(card_view::EMPTY_MESSAGE));
        assert!(!html.contains(" disabled"));
    }

    #[test]
    fn test_index_page_connects_socket() {
        let page = index_page();
        assert!(page.contains("id=\"root\""));
        assert!(page.contains("/ws"));
    }
}
