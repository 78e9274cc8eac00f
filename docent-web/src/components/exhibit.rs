//! Exhibit-specific components - language buttons, admin lists, QR links

use docent_core::language_select::{LanguageOption, OptionState};
use docent_core::{ExhibitId, QrLink};

use super::layout::{escape_html, post_button};

/// Renders one language choice.
///
/// Each option is a plain link so the choice always triggers a full page
/// load. The page script marks the clicked link pending and disables the
/// others while navigation is in flight.
pub fn language_button(option: &LanguageOption, href: &str) -> String {
    let state_class = match option.state {
        OptionState::Idle => "",
        OptionState::Pending => " is-pending",
        OptionState::Disabled => " is-disabled",
    };
    let dir = if option.rtl { "rtl" } else { "ltr" };
    let hint = if option.dedicated_media {
        ""
    } else {
        r#"<span class="language-hint">Default narration</span>"#
    };

    format!(
        r#"<a href="{}" class="language-option{state_class}" data-language="{}" dir="{dir}" lang="{}">
            <span class="language-label">{}</span>
            {hint}
            <span class="language-spinner" aria-hidden="true"></span>
        </a>"#,
        escape_html(href),
        option.tag.code(),
        option.tag.code(),
        escape_html(option.label)
    )
}

/// Renders the admin's registered exhibit list.
pub fn exhibit_list(exhibits: &[ExhibitId]) -> String {
    if exhibits.is_empty() {
        return r#"<p class="empty-state">No exhibits added yet</p>"#.to_string();
    }

    let items: String = exhibits
        .iter()
        .map(|id| {
            format!(
                r#"<li class="exhibit-item">
                    <span>{}</span>
                    {}
                </li>"#,
                escape_html(id.as_str()),
                post_button(&format!("/admin/exhibits/{id}/remove"), "Remove", "danger")
            )
        })
        .collect();

    format!(r#"<ul class="exhibit-list">{items}</ul>"#)
}

/// Renders generated QR links with copy buttons.
pub fn qr_link_list(links: &[QrLink]) -> String {
    let rows: String = links
        .iter()
        .map(|link| {
            let url = escape_html(&link.url);
            format!(
                r#"<li class="qr-link">
                    <div class="qr-link-title">{}</div>
                    <code class="qr-link-url">{url}</code>
                    <button type="button" class="btn btn-outline" data-copy="{url}">Copy</button>
                </li>"#,
                escape_html(&link.title)
            )
        })
        .collect();

    format!(
        r#"<ul class="qr-links">{rows}</ul>
        <p class="hint">Copy these URLs and use a QR code generator to create QR codes for each exhibit.</p>"#
    )
}
