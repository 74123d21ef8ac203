use html_escape::encode_text;

/// Clicks are reported by the page as `{"action": <data-action>}`.
pub struct ControlsProps<'a> {
    pub draw_disabled: bool,
    pub shuffle_disabled: bool,
    pub shuffle_label: &'a str,
}

pub fn render(props: &ControlsProps<'_>) -> String {
    format!(
        "{}{}",
        button("draw", "Draw", props.draw_disabled),
        button("shuffle", props.shuffle_label, props.shuffle_disabled),
    )
}

fn button(action: &str, label: &str, disabled: bool) -> String {
    let disabled = if disabled { " disabled" } else { "" };
    format!(r#"<button data-action="{action}"{disabled}>{}</button>"#, encode_text(label))
}
