//! Base HTML document shared by every page

use crate::components::escape_html;

/// Wraps `content` in the full HTML document with the shared styles.
///
/// `body_class` selects a page variant (`visitor`, `player`, `admin`).
pub fn base_template(title: &str, body_class: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>{} - Museum Guide</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, viewport-fit=cover">
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
               background: #121212; color: #ffffff; line-height: 1.6; min-height: 100vh; }}
        a {{ color: inherit; }}

        /* Visitor screens */
        .screen {{ min-height: 100vh; display: flex; flex-direction: column; align-items: center;
                   justify-content: center; padding: 24px; text-align: center; }}
        .page-header {{ margin-bottom: 32px; }}
        .page-header h1 {{ font-family: Georgia, serif; font-size: 30px; color: #d4af37; }}
        .brand {{ text-decoration: none; }}
        .subtitle {{ color: #cccccc; }}
        .hero-title {{ font-family: Georgia, serif; font-size: 44px; margin-bottom: 20px; }}
        .hero-text {{ font-size: 20px; margin-bottom: 40px; color: #e0e0e0; }}

        /* Cards */
        .card {{ background: rgba(0, 0, 0, 0.35); border: 1px solid #333; border-radius: 12px;
                 padding: 28px; width: 100%; max-width: 480px; margin-bottom: 20px; text-align: left; }}
        .card-title {{ font-family: Georgia, serif; font-size: 20px; margin-bottom: 14px; }}

        /* Buttons */
        .btn {{ display: inline-block; padding: 12px 24px; border-radius: 6px; font-size: 16px;
                text-decoration: none; cursor: pointer; border: 1px solid transparent; }}
        .btn-primary {{ background: #d4af37; color: #000; }}
        .btn-primary:hover {{ background: #b8962e; }}
        .btn-outline {{ background: transparent; color: #fff; border-color: #555; }}
        .btn-outline:hover {{ border-color: #d4af37; color: #d4af37; }}
        .btn-danger {{ background: transparent; color: #ff7b7b; border-color: #7a2d2d; padding: 4px 12px; }}
        .btn-wide {{ display: block; width: 100%; text-align: center; margin-top: 12px; }}
        .inline-form {{ display: inline; }}

        /* Forms */
        .field {{ display: block; margin-bottom: 14px; }}
        .field-label {{ display: block; font-size: 14px; color: #bbbbbb; margin-bottom: 4px; }}
        .field input {{ width: 100%; padding: 10px 12px; background: #1e1e1e; border: 1px solid #444;
                        border-radius: 6px; color: #fff; font-size: 16px; }}

        /* Language selection */
        .language-option {{ display: flex; align-items: center; justify-content: space-between;
                            padding: 16px 20px; margin-bottom: 12px; border: 1px solid #555;
                            border-radius: 8px; text-decoration: none; font-size: 18px; }}
        .language-option:hover {{ border-color: #d4af37; }}
        .language-option.is-disabled {{ opacity: 0.4; pointer-events: none; }}
        .language-option.is-pending {{ border-color: #d4af37; pointer-events: none; }}
        .language-hint {{ font-size: 12px; color: #999; }}
        .language-spinner {{ display: none; width: 18px; height: 18px; border: 2px solid #d4af37;
                             border-top-color: transparent; border-radius: 50%; animation: spin 0.8s linear infinite; }}
        .language-option.is-pending .language-spinner {{ display: inline-block; }}

        /* Feedback */
        .toast {{ position: fixed; top: 16px; right: 16px; display: flex; align-items: center; gap: 12px;
                  padding: 14px 18px; border-radius: 8px; max-width: 420px; z-index: 100; }}
        .toast-success {{ background: #1f4d2b; border: 1px solid #2f7a43; }}
        .toast-error {{ background: #5c1f1f; border: 1px solid #8f3131; }}
        .toast-info {{ background: #1f3a5c; border: 1px solid #31598f; }}
        .toast-close {{ background: none; border: none; color: #ccc; font-size: 20px; cursor: pointer; }}
        .spinner-wrap {{ display: flex; flex-direction: column; align-items: center; gap: 12px; }}
        .spinner {{ width: 48px; height: 48px; border: 4px solid #d4af37; border-top-color: transparent;
                    border-radius: 50%; animation: spin 0.9s linear infinite; }}
        .error-screen {{ display: flex; flex-direction: column; align-items: center; gap: 20px; }}
        .error-message {{ font-size: 20px; }}
        @keyframes spin {{ to {{ transform: rotate(360deg); }} }}

        /* Admin */
        .exhibit-list, .qr-links {{ list-style: none; }}
        .exhibit-item, .qr-link {{ display: flex; align-items: center; justify-content: space-between;
                                   gap: 12px; padding: 8px 0; border-bottom: 1px solid #2a2a2a; }}
        .qr-link {{ flex-wrap: wrap; }}
        .qr-link-url {{ font-size: 13px; color: #d4af37; word-break: break-all; }}
        .empty-state, .hint {{ color: #888; font-style: italic; font-size: 14px; }}
    </style>
</head>
<body class="{body_class}">
{content}
</body>
</html>"#,
        escape_html(title)
    )
}
