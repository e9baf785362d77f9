use super::*;

fn branding() -> Branding {
    Branding {
        title: "UiPath Fusion App".to_string(),
        logo_src: "/logo.png".to_string(),
    }
}

fn record(name: &str) -> ParticipantRecord {
    ParticipantRecord {
        name: name.to_string(),
        company: "Apex Dynamics".to_string(),
        role: "Data Scientist".to_string(),
        email: "alex.archer@apexdynamics.com".to_string(),
        ticket_type: "VIP".to_string(),
    }
}

fn view(page: usize, total_pages: usize) -> PageView {
    PageView {
        page,
        total_pages,
        total_participants: 19,
        username: Some("alice".to_string()),
        participants: vec![record("Alex Archer"), record("Blair Bennett")],
        can_go_back: page > 1,
        can_go_next: page < total_pages,
    }
}

#[test]
fn escapes_markup_characters() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn card_lists_every_label_with_its_value() {
    let card = participant_card(&record("Alex Archer"));
    for label in CARD_LABELS {
        assert!(card.contains(&format!("<strong>{label}:</strong>")), "{label}");
    }
    assert!(card.contains("Alex Archer"));
    assert!(card.contains("Apex Dynamics"));
    assert!(card.contains("Data Scientist"));
    assert!(card.contains("alex.archer@apexdynamics.com"));
    assert!(card.contains("VIP"));
}

#[test]
fn card_escapes_user_visible_values() {
    let card = participant_card(&record("<script>"));
    assert!(!card.contains("<script>"));
    assert!(card.contains("&lt;script&gt;"));
}

#[test]
fn first_page_disables_back_only() {
    let controls = pagination_controls(&view(1, 5));
    assert!(controls.contains(r#"action="/back"><button type="submit" disabled>"#));
    assert!(controls.contains(r#"action="/next"><button type="submit">"#));
    assert!(controls.contains("Page 1 of 5"));
}

#[test]
fn last_page_disables_next_only() {
    let controls = pagination_controls(&view(5, 5));
    assert!(controls.contains(r#"action="/back"><button type="submit">"#));
    assert!(controls.contains(r#"action="/next"><button type="submit" disabled>"#));
    assert!(controls.contains("Page 5 of 5"));
}

#[test]
fn participants_page_renders_cards_and_greeting() {
    let html = participants_page(&branding(), &view(2, 5));
    assert!(html.contains(LISTING_TITLE));
    assert!(html.contains("Signed in as alice"));
    assert_eq!(html.matches(r#"<div class="card">"#).count(), 2);
    assert!(html.contains("Page 2 of 5"));
    assert!(html.contains(r#"action="/logout""#));
}

#[test]
fn login_page_shows_form_and_optional_error() {
    let clean = login_page(&branding(), None);
    assert!(clean.contains(r#"name="username""#));
    assert!(clean.contains(r#"type="password""#));
    assert!(clean.contains("Enter your user name and password to log in."));
    assert!(!clean.contains("class=\"error\""));

    let failed = login_page(&branding(), Some("Invalid credentials, please try again."));
    assert!(failed.contains("Invalid credentials, please try again."));
    assert!(failed.contains(r#"src="/logo.png""#));
    assert!(failed.contains("<h1>UiPath Fusion App</h1>"));
    assert!(failed.contains("<title>UiPath Fusion App</title>"));
}
