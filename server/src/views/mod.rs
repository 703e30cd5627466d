//! Server-rendered HTML pages.
//!
//! Every value that came from a visitor goes through [`escape_html`] before it
//! is placed in markup.

use crate::store::{Registration, EXPORT_COLUMNS};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
form { display: grid; gap: 0.75rem; max-width: 420px; }
label { display: grid; gap: 0.25rem; font-weight: 600; }
input, textarea { padding: 0.5rem; font: inherit; border: 1px solid #cbd2d9; border-radius: 4px; }
button { padding: 0.6rem 1rem; font: inherit; border: 0; border-radius: 4px; background: #2563eb; color: #fff; cursor: pointer; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border: 1px solid #e4e7eb; padding: 0.4rem; text-align: left; vertical-align: top; }
th { background: #f5f7fa; }
.error { color: #b91c1c; font-weight: 600; }
.actions a { margin-right: 1rem; }
"#;

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Public intake form. Only name, email, phone and year are exposed; the
/// handler still accepts branch, college and note when they are posted.
pub fn registration_form(event_name: &str) -> String {
    let body = format!(
        r#"<h1>{event}</h1>
<p>Fill in your details to register.</p>
<form method="post" action="/register">
  <label>Name <input name="name" required></label>
  <label>Email <input name="email" type="email" required></label>
  <label>Phone <input name="phone" type="tel" required></label>
  <label>Year <input name="year" required></label>
  <button type="submit">Register</button>
</form>
<p><a href="/admin">Admin</a></p>"#,
        event = escape_html(event_name),
    );
    layout(event_name, &body)
}

pub fn confirmation(event_name: &str, registration: &Registration) -> String {
    let body = format!(
        r#"<h1>Thanks, {name}!</h1>
<p>Your registration for {event} has been received.</p>
<p>Reference: <code>{id}</code></p>
<p><a href="/">Register someone else</a></p>"#,
        name = escape_html(&registration.name),
        event = escape_html(event_name),
        id = escape_html(&registration.id),
    );
    layout("Registered", &body)
}

pub fn login_form(error: Option<&str>) -> String {
    let error = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Admin login</h1>
{error}
<form method="post" action="/admin/login">
  <label>PIN <input name="pin" type="password" inputmode="numeric" autocomplete="off" required autofocus></label>
  <button type="submit">Enter</button>
</form>
<p><a href="/">Back to registration</a></p>"#
    );
    layout("Admin login", &body)
}

pub fn admin_panel(event_name: &str, registrations: &[Registration]) -> String {
    let header: String = EXPORT_COLUMNS
        .iter()
        .map(|column| format!("<th>{column}</th>"))
        .collect();

    let rows: String = if registrations.is_empty() {
        format!(
            r#"<tr><td colspan="{}">No registrations yet.</td></tr>"#,
            EXPORT_COLUMNS.len()
        )
    } else {
        registrations
            .iter()
            .map(|registration| {
                let cells: String = registration
                    .columns()
                    .iter()
                    .map(|value| format!("<td>{}</td>", escape_html(value)))
                    .collect();
                format!("<tr>{cells}</tr>\n")
            })
            .collect()
    };

    let body = format!(
        r#"<h1>{event} &middot; Admin</h1>
<p>Total registrations: <strong>{count}</strong></p>
<p class="actions">
  <a href="/admin/export/csv">Export CSV</a>
  <a href="/admin/export/json">Export JSON</a>
  <a href="/admin/reset" onclick="return confirm('Delete all registrations?')">Reset</a>
  <a href="/logout">Logout</a>
</p>
<table>
<thead><tr>{header}</tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        event = escape_html(event_name),
        count = registrations.len(),
    );
    layout("Admin panel", &body)
}
