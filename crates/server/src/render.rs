use std::fmt::Write as _;

use shared::{
    domain::ParticipantRecord,
    protocol::{PageView, CARD_LABELS},
};

pub const LISTING_TITLE: &str = "Conference Participants";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
.card { border: 1px solid #DDD; border-radius: 6px; padding: 12px; margin-bottom: 16px; }
.error { background: #FDECEA; color: #8A1C1C; border-radius: 6px; padding: 8px 12px; }
.pagination { display: grid; grid-template-columns: 1fr 2fr 1fr; align-items: center; }
.pagination .indicator { text-align: center; font-weight: bold; }
.pagination .next { text-align: right; }
label { display: block; margin-top: 8px; }
"#;

#[derive(Debug, Clone)]
pub struct Branding {
    pub title: String,
    pub logo_src: String,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn login_page(branding: &Branding, error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&logo(branding));
    let _ = write!(
        body,
        "<h1>{}</h1><h2>Log in</h2><p>Enter your user name and password to log in.</p>",
        escape_html(&branding.title)
    );
    body.push_str(
        r#"<form method="post" action="/login">
<label>User name <input type="text" name="username" autocomplete="username"></label>
<label>Password <input type="password" name="password" autocomplete="current-password"></label>
<p><button type="submit">Submit</button></p>
</form>"#,
    );
    if let Some(error) = error {
        let _ = write!(
            body,
            r#"<p class="error" role="alert">{}</p>"#,
            escape_html(error)
        );
    }
    layout(&branding.title, &body)
}

pub fn participants_page(branding: &Branding, view: &PageView) -> String {
    let mut body = String::new();
    body.push_str(&logo(branding));
    let _ = write!(body, "<h1>{LISTING_TITLE}</h1>");
    if let Some(username) = &view.username {
        let _ = write!(
            body,
            r#"<p class="greeting">Signed in as {}</p>"#,
            escape_html(username)
        );
    }
    for participant in &view.participants {
        body.push_str(&participant_card(participant));
    }
    body.push_str(&pagination_controls(view));
    body.push_str(
        r#"<form method="post" action="/logout"><button type="submit">Log out</button></form>"#,
    );
    layout(LISTING_TITLE, &body)
}

pub fn participant_card(participant: &ParticipantRecord) -> String {
    let mut card = String::from(r#"<div class="card">"#);
    for (i, (label, value)) in CARD_LABELS.iter().zip(participant.field_values()).enumerate() {
        if i > 0 {
            card.push_str("<br>");
        }
        let _ = write!(card, "<strong>{label}:</strong> {}", escape_html(value));
    }
    card.push_str("</div>");
    card
}

pub fn pagination_controls(view: &PageView) -> String {
    format!(
        r#"<div class="pagination"><div class="back">{}</div><div class="indicator">{}</div><div class="next">{}</div></div>"#,
        nav_button("/back", "⬅ Back", view.can_go_back),
        escape_html(&view.indicator()),
        nav_button("/next", "Next ➡", view.can_go_next),
    )
}

fn nav_button(action: &str, label: &str, enabled: bool) -> String {
    let disabled = if enabled { "" } else { " disabled" };
    format!(
        r#"<form method="post" action="{action}"><button type="submit"{disabled}>{label}</button></form>"#
    )
}

fn logo(branding: &Branding) -> String {
    format!(
        r#"<img src="{}" alt="logo" width="180">"#,
        escape_html(&branding.logo_src)
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>{body}</body></html>",
        escape_html(title)
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
