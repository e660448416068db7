//! CSS generated from the content document: page background and per-node
//! typography. Both renderers inject the same block, the static engine
//! before `</head>` and the live engine into the document head.

use crate::assets::AssetResolver;
use crate::identity::{ElementId, GENERATED_ATTRIBUTE, ID_ATTRIBUTE};
use crate::model::{BackgroundKind, BackgroundSettings, TextStyle};
use crate::render_model::RenderModel;
use crate::text::css_value;

/// Marker value on the injected `<style>` element
pub const STYLE_MARKER: &str = "content-style";

/// Selector that disables the template's hero overlay under an image background
const HERO_OVERLAY_SELECTOR: &str = ".hero::before, .hero-overlay";

pub fn background_css(background: &BackgroundSettings, resolver: &dyn AssetResolver) -> String {
    if !background.is_set() {
        return String::new();
    }

    let mut decls = Vec::new();
    let color = css_value(&background.color);
    if !color.is_empty() {
        decls.push(format!("background-color:{} !important;", color));
    }

    let image = background.image.trim();
    let has_image = background.kind == BackgroundKind::Image && !image.is_empty();
    if has_image {
        decls.push(format!("background-image:url(\"{}\") !important;", css_url(&resolver.resolve(image))));
        for (prop, value) in [
            ("background-repeat", &background.repeat),
            ("background-size", &background.size),
            ("background-position", &background.position),
        ] {
            let value = css_value(value);
            if !value.is_empty() {
                decls.push(format!("{}:{} !important;", prop, value));
            }
        }
    }

    if decls.is_empty() {
        return String::new();
    }

    let mut css = format!("html, body {{ {} }}\n", decls.join(" "));
    if has_image {
        css.push_str(&format!("{} {{ display:none !important; }}\n", HERO_OVERLAY_SELECTOR));
    }
    css
}

pub fn rule_for(id: &ElementId, style: &TextStyle) -> Option<String> {
    let decls = style.declarations();
    if decls.is_empty() {
        return None;
    }

    let body = decls
        .iter()
        .map(|(prop, value)| format!("{}:{} !important;", prop, value))
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!("[{}=\"{}\"] {{ {} }}\n", ID_ATTRIBUTE, id, body))
}

pub fn typography_css(model: &RenderModel) -> String {
    model
        .styled_entries()
        .filter_map(|(id, style)| rule_for(id, style))
        .collect()
}

/// Background and typography rules together, empty when nothing is customized
pub fn content_css(background: &BackgroundSettings, model: &RenderModel, resolver: &dyn AssetResolver) -> String {
    let mut css = background_css(background, resolver);
    css.push_str(&typography_css(model));
    css
}

/// The `<style>` element to inject, or `None` when there is nothing to say
pub fn style_block(css: &str) -> Option<String> {
    if css.trim().is_empty() {
        return None;
    }
    Some(format!(
        "<style {}=\"{}\">\n{}</style>\n",
        GENERATED_ATTRIBUTE, STYLE_MARKER, css
    ))
}

fn css_url(url: &str) -> String {
    url.chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' => "%22".to_string(),
            '\\' => "%5C".to_string(),
            '<' => "%3C".to_string(),
            '>' => "%3E".to_string(),
            c => c.to_string(),
        })
        .collect()
}
