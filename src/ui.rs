//! The single-page UI served at `/`.
//!
//! The page template lives in `static/index.html`; the language selectors are
//! rendered from the registry so the page and the API never disagree about
//! the supported set.

use crate::i18n::{LanguageConfig, LanguageRegistry};

const INDEX_TEMPLATE: &str = include_str!("../static/index.html");

/// Quick examples offered above the input box (label, text).
pub const EXAMPLES: &[(&str, &str)] = &[
    ("Greeting", "Hello, how are you?"),
    ("Request", "Can you translate this to Spanish, please?"),
    ("Directions", "Where is the nearest cafe?"),
    ("Short Bio", "I am a software developer from India."),
];

pub fn render_index() -> String {
    let registry = LanguageRegistry::get();
    let languages = registry.list_supported();
    let default_code = registry.default_target().code;

    let target_options = languages
        .iter()
        .map(|lang| option(lang, lang.code == default_code))
        .collect::<Vec<_>>()
        .join("\n");

    let source_options = std::iter::once(r#"<option value="auto" selected>Detect language</option>"#.to_string())
        .chain(languages.iter().map(|lang| option(lang, false)))
        .collect::<Vec<_>>()
        .join("\n");

    let example_buttons = EXAMPLES
        .iter()
        .map(|(label, text)| {
            format!(
                r#"<button type="button" class="example-btn" data-text="{}">{}</button>"#,
                escape_html(text),
                escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    INDEX_TEMPLATE
        .replace("{{TARGET_OPTIONS}}", &target_options)
        .replace("{{SOURCE_OPTIONS}}", &source_options)
        .replace("{{EXAMPLES}}", &example_buttons)
}

fn option(lang: &LanguageConfig, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{} ({})</option>"#,
        escape_html(lang.code),
        if selected { " selected" } else { "" },
        escape_html(lang.name),
        escape_html(lang.native_name)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
