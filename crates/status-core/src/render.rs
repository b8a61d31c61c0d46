//! Dashboard (HTML) and summary (markdown) rendering of a store snapshot
//!
//! Both renderers walk the snapshot exactly once and append the name cell and
//! the glyph cell of a user in the same step, so column `i` of every row always
//! belongs to the same user.

use crate::store::StatusEntry;

/// Seconds between dashboard reloads
pub const DASHBOARD_REFRESH_SECS: u32 = 5;

/// Two-row HTML table: user names, then colored status glyphs
pub fn render_html_table(entries: &[StatusEntry]) -> String {
    let mut names = String::new();
    let mut glyphs = String::new();
    for entry in entries {
        names.push_str("<td>");
        names.push_str(&escape_html(&entry.user));
        names.push_str("</td>");

        glyphs.push_str("<td>");
        glyphs.push_str(&entry.status.html());
        glyphs.push_str("</td>");
    }

    format!("<table>\n<tr>{}</tr>\n<tr>{}</tr>\n</table>\n", names, glyphs)
}

/// Full dashboard page around [`render_html_table`], reloading itself every
/// [`DASHBOARD_REFRESH_SECS`] seconds
pub fn render_dashboard(entries: &[StatusEntry]) -> String {
    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n  \
         <meta charset=\"utf-8\">\n  \
         <meta http-equiv=\"refresh\" content=\"{}\">\n  \
         <title>SIP dashboard</title>\n\
         </head>\n\
         <body>\n\
         {}\
         </body>\n\
         </html>\n",
        DASHBOARD_REFRESH_SECS,
        render_html_table(entries)
    )
}

/// Three-row markdown table: names, separator, plain glyphs
///
/// Names are escaped so that no user can add a column or a row.
pub fn render_markdown(entries: &[StatusEntry]) -> String {
    let mut names = String::from("|");
    let mut separator = String::from("|");
    let mut glyphs = String::from("|");
    for entry in entries {
        names.push_str(&escape_markdown_cell(&entry.user));
        names.push('|');
        separator.push_str("---|");
        glyphs.push_str(entry.status.icon());
        glyphs.push('|');
    }

    format!("{}\n{}\n{}\n", names, separator, glyphs)
}

// HTML-escaped, with table delimiters and line breaks neutralized
fn escape_markdown_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in escape_html(text).chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\r' | '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
