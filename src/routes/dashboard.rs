//! Dashboard pages. Every handler here sits behind the session gate.

use axum::extract::Path;
use axum::response::Html;

use super::guard::CurrentSession;

/// `GET /dashboard`
pub async fn index(CurrentSession(session): CurrentSession) -> Html<String> {
    Html(render_page("Dashboard", &session.name, None))
}

/// `GET /dashboard/{section}`
pub async fn section(CurrentSession(session): CurrentSession, Path(section): Path<String>) -> Html<String> {
    Html(render_page("Dashboard", &session.name, Some(&section)))
}

fn render_page(title: &str, user_name: &str, section: Option<&str>) -> String {
    let heading = match section {
        Some(s) => format!("{} / {}", escape_html(title), escape_html(s)),
        None => escape_html(title),
    };
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><main><h1>{heading}</h1><p>Signed in as {user}</p></main></body></html>",
        title = escape_html(title),
        user = escape_html(user_name),
    )
}

pub(crate) fn escape_html(raw: &str) -> String {
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

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
