//! Layout components - headers, cards, buttons, form fields

/// Escapes text for use in HTML content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the palace header shown above visitor screens.
///
/// The title links back home. `subtitle` is plain text and gets escaped.
pub fn page_header(title: &str, subtitle: Option<&str>) -> String {
    let subtitle_html = subtitle
        .map(|s| format!(r#"<p class="subtitle">{}</p>"#, escape_html(s)))
        .unwrap_or_default();

    format!(
        r#"<header class="page-header">
            <a href="/" class="brand"><h1>{}</h1></a>
            {subtitle_html}
        </header>"#,
        escape_html(title)
    )
}

/// Renders a card container with an optional heading.
///
/// `content` is inserted as-is and must already be safe HTML.
pub fn card(title: Option<&str>, content: &str) -> String {
    let header_html = title
        .map(|t| format!(r#"<h2 class="card-title">{}</h2>"#, escape_html(t)))
        .unwrap_or_default();

    format!(
        r#"<section class="card">
            {header_html}
            {content}
        </section>"#
    )
}

/// Renders a link styled as a button.
///
/// Variants: `primary`, `outline`. Anything else renders as a plain link.
pub fn link_button(href: &str, text: &str, variant: &str) -> String {
    let class = match variant {
        "primary" => "btn btn-primary",
        "outline" => "btn btn-outline",
        _ => "btn-link",
    };

    format!(
        r#"<a href="{}" class="{class}">{}</a>"#,
        escape_html(href),
        escape_html(text)
    )
}

/// Renders a single-button form posting to `action`.
pub fn post_button(action: &str, text: &str, variant: &str) -> String {
    let class = match variant {
        "primary" => "btn btn-primary",
        "danger" => "btn btn-danger",
        _ => "btn btn-outline",
    };

    format!(
        r#"<form method="post" action="{}" class="inline-form">
            <button type="submit" class="{class}">{}</button>
        </form>"#,
        escape_html(action),
        escape_html(text)
    )
}

/// Renders a labelled input field.
pub fn input(name: &str, label: &str, input_type: &str, value: Option<&str>) -> String {
    let value_attr = value
        .map(|v| format!(r#" value="{}""#, escape_html(v)))
        .unwrap_or_default();

    format!(
        r#"<label class="field">
            <span class="field-label">{}</span>
            <input type="{input_type}" name="{name}" id="{name}"{value_attr} required />
        </label>"#,
        escape_html(label)
    )
}
