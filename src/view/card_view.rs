use crate::domain::Card;
use html_escape::{encode_double_quoted_attribute, encode_text};

pub const EMPTY_MESSAGE: &str = "No card drawn yet!";

pub fn render(card: Option<&Card>) -> String {
    let Some(card) = card else {
        return format!("<p>{EMPTY_MESSAGE}</p>");
    };

    let label = card.label();
    format!(
        r#"<div><img src="{src}" alt="{alt}" /><p>{text}</p></div>"#,
        src = encode_double_quoted_attribute(&card.image),
        alt = encode_double_quoted_attribute(&label),
        text = encode_text(&label),
    )
}
