//! The standalone proposal page template.
//!
//! One HTML document, no external assets: theme values are substituted into
//! the embedded CSS via the same `{{token}}` convention the theme files use
//! for their own gradient variables.

use mdprop_diagrams::escape_attr;
use mdprop_theme::{Theme, add_unit};

use crate::frontmatter::DocumentMeta;

/// Compose the full page around a rendered body.
#[must_use]
pub fn render_page(
    theme: &Theme,
    title: &str,
    meta: &DocumentMeta,
    toc: &str,
    body: &str,
) -> String {
    // Theme tokens are substituted first, document content last, so a body
    // that happens to contain "{{primary}}" as text is never rewritten.
    let replacements: &[(&str, &str)] = &[
        ("{{text}}", &theme.colors.text),
        ("{{background}}", &theme.colors.background),
        ("{{primary}}", &theme.colors.primary),
        ("{{secondary}}", &theme.colors.secondary),
        ("{{link}}", &theme.colors.link),
        ("{{code_bg}}", &theme.colors.code_bg),
        ("{{code_text}}", &theme.colors.code_text),
        ("{{border_color}}", &theme.colors.border_color),
        ("{{header_text}}", &theme.colors.header_text),
        ("{{code_inline_bg}}", &theme.colors.code_inline_bg),
        ("{{code_inline_color}}", &theme.colors.code_inline_color),
        ("{{border_radius}}", &add_unit(&theme.styles.border_radius)),
        ("{{box_shadow}}", &theme.styles.box_shadow),
        ("{{header_padding}}", &theme.styles.header_padding),
        ("{{content_padding}}", &theme.styles.content_padding),
        ("{{header_h1_weight}}", &theme.styles.header_h1_weight),
        ("{{header_meta_opacity}}", &theme.styles.header_meta_opacity),
        ("{{header_text_shadow}}", &theme.styles.header_text_shadow),
        ("{{header_h1_size}}", &theme.font_sizes.header_h1),
        ("{{header_meta_size}}", &theme.font_sizes.header_meta),
        ("{{h2_size}}", &theme.font_sizes.h2),
        ("{{h3_size}}", &theme.font_sizes.h3),
        ("{{h4_size}}", &theme.font_sizes.h4),
        ("{{body_size}}", &theme.font_sizes.body),
        ("{{code_size}}", &theme.font_sizes.code),
        ("{{h2_margin}}", &theme.spacing.h2_margin),
        ("{{h3_margin}}", &theme.spacing.h3_margin),
        ("{{h4_margin}}", &theme.spacing.h4_margin),
        ("{{p_margin}}", &theme.spacing.p_margin),
        ("{{gradient_bg}}", &theme.gradients.background),
        ("{{gradient_header}}", &theme.gradients.header),
        ("{{gradient_table}}", &theme.gradients.table_header),
        ("{{gradient_blockquote}}", &theme.gradients.blockquote),
        ("{{gradient_table_hover}}", &theme.gradients.table_hover),
        ("{{title}}", &escape_attr(title)),
        ("{{prepared_by}}", &escape_attr(&meta.prepared_by)),
        ("{{date}}", &escape_attr(&meta.date)),
        ("{{version}}", &escape_attr(&meta.version)),
        ("{{toc}}", toc),
        ("{{content}}", body),
    ];

    let mut page = PAGE_TEMPLATE.to_owned();
    for (token, value) in replacements {
        page = page.replace(token, value);
    }
    page
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, "Noto Sans", sans-serif;
            line-height: 1.8;
            color: {{text}};
            background: {{gradient_bg}};
            padding: 20px;
            display: flex;
            gap: 20px;
            max-width: 1600px;
            margin: 0 auto;
        }

        .container {
            flex: 1;
            background: {{background}};
            border-radius: {{border_radius}};
            box-shadow: {{box_shadow}};
            overflow: hidden;
            min-width: 0;
        }

        .header {
            background: {{gradient_header}};
            color: {{header_text}};
            padding: {{header_padding}};
            text-align: center;
        }

        .header h1 {
            font-size: {{header_h1_size}};
            margin-bottom: 20px;
            font-weight: {{header_h1_weight}};
            color: {{header_text}};
            text-shadow: {{header_text_shadow}};
        }

        .header strong {
            color: {{header_text}};
            font-weight: 600;
        }

        .header .meta {
            font-size: {{header_meta_size}};
            opacity: {{header_meta_opacity}};
        }

        h1, h2 {
            color: {{primary}};
            font-size: {{h2_size}};
            margin: {{h2_margin}};
            padding-bottom: 12px;
            border-bottom: 3px solid {{primary}};
            font-weight: 600;
        }

        h3 {
            color: {{secondary}};
            font-size: {{h3_size}};
            margin: {{h3_margin}};
            font-weight: 600;
        }

        h4 {
            color: {{primary}};
            font-size: {{h4_size}};
            margin: {{h4_margin}};
            font-weight: 600;
        }

        h5 {
            color: #666;
            font-size: 1.1em;
            margin: 20px 0 12px 0;
            font-weight: 600;
        }

        p {
            margin: {{p_margin}};
            text-align: justify;
            font-size: {{body_size}};
            line-height: 1.9;
        }

        strong {
            color: {{secondary}};
            font-weight: 600;
        }

        blockquote {
            margin: 20px 0;
            padding: 15px 20px;
            background: {{gradient_blockquote}};
            border-left: 4px solid {{primary}};
            font-style: italic;
            border-radius: 0 8px 8px 0;
        }

        blockquote p {
            margin: 0;
            font-style: italic;
        }

        ul, ol {
            margin: 15px 0;
            padding-left: 35px;
        }

        li {
            margin: 10px 0;
            line-height: 1.8;
        }

        table {
            width: 100%;
            border-collapse: collapse;
            margin: 30px 0;
            box-shadow: 0 4px 12px rgba(0,0,0,0.08);
            border-radius: 10px;
            overflow: hidden;
        }

        thead {
            background: {{gradient_table}};
            color: #fff;
        }

        th {
            padding: 16px 18px;
            text-align: left;
            font-weight: 600;
            font-size: 15px;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        td {
            padding: 14px 18px;
            border-bottom: 1px solid #f0f0f0;
            font-size: 15px;
        }

        tr:last-child td {
            border-bottom: none;
        }

        tr:hover {
            background: {{gradient_table_hover}};
            transition: background 0.3s ease;
        }

        pre {
            background: {{code_bg}};
            color: {{code_text}};
            padding: 25px;
            border-radius: 10px;
            overflow-x: auto;
            margin: 25px 0;
            font-family: "SFMono-Regular", Consolas, "Liberation Mono", Menlo, "Courier New", monospace;
            font-size: 14px;
            line-height: 1.6;
            box-shadow: 0 4px 12px rgba(0,0,0,0.1);
        }

        code {
            background: {{code_inline_bg}};
            padding: 3px 8px;
            border-radius: 4px;
            font-family: "SFMono-Regular", Consolas, "Liberation Mono", Menlo, monospace;
            font-size: {{code_size}};
            color: {{code_inline_color}};
        }

        pre code {
            background: transparent;
            padding: 0;
            border-radius: 0;
            color: inherit;
        }

        a {
            color: {{link}};
            text-decoration: none;
            font-weight: 500;
        }

        a:hover {
            color: {{primary}};
            text-decoration: underline;
        }

        hr {
            border: none;
            border-top: 2px solid #e9ecef;
            margin: 35px 0;
        }

        .content {
            padding: {{content_padding}};
        }

        .sidebar {
            width: 280px;
            background: #ffffff;
            border-radius: {{border_radius}};
            box-shadow: {{box_shadow}};
            height: calc(100vh - 40px);
            position: sticky;
            top: 20px;
            flex-shrink: 0;
            overflow: hidden;
            display: flex;
            flex-direction: column;
        }

        .sidebar.collapsed {
            display: none;
        }

        .sidebar-header {
            padding: 20px;
            border-bottom: 1px solid {{border_color}};
            display: flex;
            justify-content: space-between;
            align-items: center;
            background: {{gradient_header}};
            color: {{header_text}};
            min-height: 70px;
            flex-shrink: 0;
        }

        .sidebar-header h3 {
            margin: 0;
            font-size: 1.2em;
            font-weight: 600;
            color: #eee;
            border: none;
        }

        .sidebar-toggle {
            background: rgba(255, 255, 255, 0.1);
            border: none;
            color: {{header_text}};
            font-size: 1.2em;
            cursor: pointer;
            padding: 5px 10px;
            border-radius: 4px;
            transition: background 0.2s;
            flex-shrink: 0;
        }

        .sidebar-toggle:hover {
            background: rgba(255, 255, 255, 0.2);
        }

        .sidebar-content {
            padding: 15px 0;
            overflow-y: auto;
            flex: 1;
        }

        .toc-list {
            list-style: none;
            padding: 0;
            margin: 0;
        }

        .toc-item {
            margin: 0;
        }

        .toc-link {
            display: block;
            padding: 10px 20px;
            color: {{text}};
            text-decoration: none;
            transition: all 0.2s;
            border-left: 3px solid transparent;
            width: 100%;
        }

        .toc-link:hover {
            background: {{code_inline_bg}};
            border-left-color: {{primary}};
            color: {{primary}};
        }

        .toc-level-2 {
            font-weight: 500;
        }

        .toc-h2-wrapper {
            display: flex;
            align-items: center;
            gap: 8px;
            justify-content: space-between;
            width: 100%;
        }

        .toc-toggle-icon {
            cursor: pointer;
            user-select: none;
            transition: transform 0.2s;
            flex-shrink: 0;
            font-size: 10px;
            color: #999;
            margin-left: auto;
            margin-right: 15px;
        }

        .toc-toggle-icon.expanded {
            transform: rotate(90deg);
        }

        .toc-sublist {
            list-style: none;
            padding-left: 0;
            margin: 0;
            max-height: 2000px;
            opacity: 1;
            transition: all 0.3s ease;
            overflow: hidden;
        }

        .toc-sublist.collapsed {
            max-height: 0;
            opacity: 0;
        }

        .toc-level-3 .toc-link {
            padding-left: 40px;
            font-size: 0.95em;
            font-weight: 400;
        }

        .toc-toggle-button {
            display: none;
            position: fixed;
            left: 0;
            top: 50%;
            transform: translateY(-50%);
            width: 24px;
            height: 80px;
            background: {{primary}};
            color: white;
            border: none;
            border-radius: 0 {{border_radius}} {{border_radius}} 0;
            cursor: pointer;
            font-size: 20px;
            box-shadow: 2px 2px 8px rgba(0, 0, 0, 0.15);
            align-items: center;
            justify-content: center;
            z-index: 1000;
        }

        .toc-toggle-button:hover {
            background: {{secondary}};
        }

        .sidebar.collapsed ~ .toc-toggle-button {
            display: flex;
        }

        @media (max-width: 768px) {
            body {
                flex-direction: column;
                padding: 10px;
            }

            .sidebar {
                position: fixed;
                left: 0;
                top: 0;
                height: 100vh;
                z-index: 1000;
                border-radius: 0;
                width: 280px;
            }

            .container {
                width: 100%;
            }

            .content {
                padding: 30px 20px;
            }

            .header h1 {
                font-size: 24px;
            }

            h1, h2 {
                font-size: 22px;
            }

            h3 {
                font-size: 19px;
            }

            table {
                font-size: 13px;
            }

            th, td {
                padding: 10px 12px;
            }
        }

        @media print {
            body {
                display: block;
                background: #fff;
                padding: 0;
            }

            .sidebar, .toc-toggle-button {
                display: none;
            }

            .container {
                box-shadow: none;
                border-radius: 0;
            }

            .header {
                background: #fff;
                color: #333;
                border-bottom: 3px solid #333;
                padding: 20px;
            }

            .header h1 {
                color: #333;
            }

            h1, h2 {
                color: #333;
                border-bottom: 2px solid #333;
                page-break-after: avoid;
            }

            h3 {
                color: #555;
                page-break-after: avoid;
            }

            table, pre {
                page-break-inside: avoid;
            }

            .content {
                padding: 40px 50px;
            }
        }
    </style>
</head>
<body>
    <aside class="sidebar">
        <div class="sidebar-header">
            <h3>Contents</h3>
            <button class="sidebar-toggle" onclick="toggleSidebar()">☰</button>
        </div>
        <div class="sidebar-content">
            {{toc}}
        </div>
    </aside>

    <button class="toc-toggle-button" onclick="toggleSidebar()">☰</button>

    <div class="container">
        <div class="header">
            <h1>{{title}}</h1>
            <div class="meta">
                <strong>Prepared by:</strong> {{prepared_by}} |
                <strong>Date:</strong> {{date}} |
                <strong>Version:</strong> {{version}}
            </div>
        </div>
        <div class="content">
            {{content}}
        </div>
    </div>

    <script>
        function toggleSidebar() {
            document.querySelector('.sidebar').classList.toggle('collapsed');
        }

        function toggleChildren(icon) {
            const sublist = icon.parentElement.nextElementSibling;
            if (sublist && sublist.classList.contains('toc-sublist')) {
                icon.classList.toggle('expanded');
                sublist.classList.toggle('collapsed');
            }
        }

        window.addEventListener('scroll', () => {
            const headings = document.querySelectorAll('h1[id], h2[id], h3[id]');
            const tocLinks = document.querySelectorAll('.toc-link');

            let current = '';
            headings.forEach(heading => {
                if (heading.getBoundingClientRect().top <= 100) {
                    current = heading.getAttribute('id');
                }
            });

            tocLinks.forEach(link => {
                link.classList.remove('active');
                if (link.getAttribute('href') === '#' + current) {
                    link.classList.add('active');
                }
            });
        });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            prepared_by: "Acme Consulting".to_owned(),
            date: "2026-08-01".to_owned(),
            version: "1.0".to_owned(),
        }
    }

    #[test]
    fn test_all_tokens_substituted() {
        let theme = Theme::load("purple", None).unwrap();
        let page = render_page(&theme, "My Proposal", &meta(), "<ul></ul>", "<p>body</p>");
        assert!(!page.contains("{{"), "unsubstituted token left in page");
    }

    #[test]
    fn test_content_and_meta_present() {
        let theme = Theme::load("purple", None).unwrap();
        let page = render_page(&theme, "My Proposal", &meta(), "<ul>toc</ul>", "<p>body</p>");
        assert!(page.contains("<title>My Proposal</title>"));
        assert!(page.contains("Acme Consulting"));
        assert!(page.contains("2026-08-01"));
        assert!(page.contains("<p>body</p>"));
        assert!(page.contains("<ul>toc</ul>"));
    }

    #[test]
    fn test_theme_colors_in_css() {
        let theme = Theme::load("green", None).unwrap();
        let page = render_page(&theme, "t", &meta(), "", "");
        assert!(page.contains("#52c41a"));
        // border_radius gets its px unit
        assert!(page.contains("border-radius: 16px;"));
    }

    #[test]
    fn test_body_tokens_not_rewritten() {
        let theme = Theme::load("purple", None).unwrap();
        let page = render_page(&theme, "t", &meta(), "", "<p>{{primary}}</p>");
        assert!(page.contains("<p>{{primary}}</p>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let theme = Theme::load("purple", None).unwrap();
        let page = render_page(&theme, "<A & B>", &meta(), "", "");
        assert!(page.contains("<title>&lt;A &amp; B&gt;</title>"));
    }
}
