use super::RewriteRule;
use crate::context::RenderContext;
use crate::splice::{map_text_segments, replace_range, replace_trimmed};
use regex::Regex;
use std::sync::OnceLock;
use storefront_content::markup_scan::scan_elements;
use tracing::debug;

fn symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:©|&copy;|&#169;)\s*\d{4}[^<]*").unwrap())
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)Copyright\s*(?:©|&copy;)?\s*\d{4}[^<]*").unwrap())
}

fn rights_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)all\s+rights\s+reserved").unwrap())
}

/// Rewrites whatever copyright notice the template ships with to the store's
/// standard line.
///
/// Passes go from precise to permissive and each runs only while the standard
/// line is still missing, so the first pass that hits wins and a rendered page
/// is a fixed point.
pub struct CopyrightRule;

impl CopyrightRule {
    /// Body of the first `.copyright` element
    fn by_class(markup: &str, notice: &str) -> String {
        match scan_elements(markup)
            .into_iter()
            .find(|e| e.has_class("copyright") && !e.close.is_empty())
        {
            Some(element) => replace_range(markup, element.inner, notice),
            None => markup.to_string(),
        }
    }

    fn by_pattern(markup: &str, pattern: &Regex, notice: &str) -> String {
        map_text_segments(markup, |text| {
            pattern
                .replace_all(text, |caps: &regex::Captures| {
                    // Keep the whitespace the match swallowed at its end
                    let matched = &caps[0];
                    let trailing = &matched[matched.trim_end().len()..];
                    format!("{}{}", notice, trailing)
                })
                .into_owned()
        })
    }

    fn by_rights_text(markup: &str, notice: &str) -> String {
        map_text_segments(markup, |text| {
            if rights_pattern().is_match(text) {
                replace_trimmed(text, notice)
            } else {
                text.to_string()
            }
        })
    }
}

impl RewriteRule for CopyrightRule {
    fn name(&self) -> &'static str {
        "copyright"
    }

    fn description(&self) -> &'static str {
        "Rewrite legacy copyright notices to the standard line"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        let notice = ctx.copyright_notice()?;

        let passes: [(&str, fn(&str, &str) -> String); 4] = [
            ("class", Self::by_class),
            ("symbol", |m: &str, n: &str| Self::by_pattern(m, symbol_pattern(), n)),
            ("word", |m: &str, n: &str| Self::by_pattern(m, word_pattern(), n)),
            ("rights", Self::by_rights_text),
        ];

        let mut out = markup.to_string();
        for (name, pass) in passes {
            if out.contains(&notice) {
                break;
            }
            let next = pass(&out, &notice);
            if next != out {
                debug!(pass = name, "Rewrote copyright notice");
                out = next;
            }
        }

        (out != markup).then_some(out)
    }
}
