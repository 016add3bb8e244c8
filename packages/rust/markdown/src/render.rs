//! Markdown → HTML page rendering.

use maud::{DOCTYPE, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

/// Page-level settings of the generated HTML documents.
#[derive(Debug, Clone)]
pub struct PageShell {
    /// `lang` attribute of the `<html>` element.
    pub lang: String,
    /// Stylesheet href, relative to the page.
    pub stylesheet: String,
}

/// Render Markdown to an HTML fragment. Inline HTML passes through untouched.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut body, parser);
    body
}

/// Render Markdown into a complete HTML page.
pub fn render_page(markdown: &str, shell: &PageShell) -> String {
    let body = render_markdown(markdown);

    html! {
        (DOCTYPE)
        html lang=(shell.lang) {
            head {
                meta charset="UTF-8";
                title {}
                link rel="stylesheet" href=(shell.stylesheet);
            }
            body {
                div.markdown-body {
                    (PreEscaped(body))
                }
            }
        }
    }
    .into_string()
}
