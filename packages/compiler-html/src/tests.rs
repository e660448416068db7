use crate::{ElementStateReplay, RenderOptions, StaticRenderer};
use serde_json::json;
use storefront_content::markup_scan::scan_selectable;
use storefront_content::{BaseUrlResolver, ContentDocument, ElementId, ElementState, StoreProfile};
use storefront_products::Product;
use storefront_templates::{TemplateCatalog, TemplateKey};

fn store() -> StoreProfile {
    StoreProfile {
        display_name: "Fireside Pottery".into(),
        description: "Stoneware from the hills".into(),
        domain: "fireside.shop.example".into(),
        email: Some("hello@fireside.example".into()),
        ..Default::default()
    }
}

fn renderer() -> StaticRenderer {
    StaticRenderer::new(RenderOptions {
        copyright_year: Some(2026),
        ..Default::default()
    })
}

fn products() -> Vec<Product> {
    vec![
        Product::new("1", "Mug", 199.5).with_image("products/mug.jpg"),
        Product::new("2", "Vase", 80.0).inactive(),
    ]
}

fn render(key: TemplateKey, content: &ContentDocument) -> String {
    let template = TemplateCatalog::embedded().load(key).unwrap();
    renderer().render(
        &template,
        content,
        &products(),
        &store(),
        &BaseUrlResolver::new("https://cdn.example.com"),
    )
}

#[test]
fn test_blank_title_renders_display_name() {
    let html = render(TemplateKey::Classic, &ContentDocument::new());
    println!("Rendered HTML:\n{}", html);

    assert!(html.contains(
        r#"<h1 data-sf-id="h1-timeless-pieces-for-modern-living">Fireside Pottery</h1>"#
    ));
    assert!(html.contains(">Stoneware from the hills</p>"));
    assert!(html.contains(">Shop the Collection</a>"));
}

#[test]
fn test_every_template_renders_the_basics() {
    for key in TemplateKey::ALL {
        let html = render(key, &ContentDocument::new());

        assert!(html.contains(">Fireside Pottery</h1>"), "{} title", key);
        assert!(html.contains("FIRESIDE"), "{} brand", key);
        assert!(!html.contains(key.placeholder_brand()), "{} placeholder left", key);
        assert!(html.contains("© 2026 Fireside Pottery. All rights reserved."), "{} copyright", key);
        assert!(html.contains("<span class=\"product-price\">₱199.50</span>"), "{} price", key);
        assert!(!html.contains("Vase"), "{} inactive product", key);
        assert!(html.contains("data-sf-generated=\"inquiry\""), "{} script", key);
    }
}

#[test]
fn test_render_is_deterministic_and_a_fixed_point() {
    let mut content = ContentDocument::new();
    content.hero.title = "Hand-thrown & kiln-fired".into();
    content.background.color = "#112233".into();

    let template = TemplateCatalog::embedded().load(TemplateKey::Modern).unwrap();
    let resolver = BaseUrlResolver::new("https://cdn.example.com");
    let renderer = renderer();

    let first = renderer.render(&template, &content, &products(), &store(), &resolver);
    let second = renderer.render(&template, &content, &products(), &store(), &resolver);
    assert_eq!(first, second);

    let rendered = storefront_templates::TemplateDocument::new(TemplateKey::Modern, first.clone());
    let again = renderer.render(&rendered, &content, &products(), &store(), &resolver);
    assert_eq!(first, again);
}

#[test]
fn test_color_background_style() {
    let mut content = ContentDocument::new();
    content.background.color = "#112233".into();
    let html = render(TemplateKey::Minimal, &content);

    let head_end = html.find("</head>").unwrap();
    let style = html.find("html, body { background-color:#112233 !important; }").unwrap();
    assert!(style < head_end);
}

#[test]
fn test_ids_survive_rendering() {
    let template = TemplateCatalog::embedded().load(TemplateKey::Classic).unwrap();
    let before: Vec<ElementId> = scan_selectable(&template.raw_markup)
        .into_iter()
        .map(|s| s.identified.id)
        .collect();

    let html = render(TemplateKey::Classic, &ContentDocument::new());
    let after: Vec<ElementId> = scan_selectable(&html)
        .into_iter()
        .map(|s| s.identified.id)
        .collect();

    assert_eq!(before, after);
}

#[test]
fn test_element_states_skipped_by_default() {
    let mut content = ContentDocument::new();
    content.element_states.insert(
        ElementId::new("p-footer-text-crafted-with-patience-purpose"),
        ElementState { hidden: true, ..Default::default() },
    );

    let skipped = render(TemplateKey::Classic, &content);
    assert!(!skipped.contains("display: none;"));

    let template = TemplateCatalog::embedded().load(TemplateKey::Classic).unwrap();
    let replaying = StaticRenderer::new(RenderOptions {
        element_state_replay: ElementStateReplay::Apply,
        copyright_year: Some(2026),
    });
    let html = replaying.render(
        &template,
        &content,
        &products(),
        &store(),
        &BaseUrlResolver::default(),
    );
    assert!(html.contains(
        r#"<p style="display: none;" data-sf-id="p-footer-text-crafted-with-patience-purpose" class="footer-text">"#
    ));
}

#[test]
fn test_render_json_recovers_from_bad_fields() {
    let template = TemplateCatalog::embedded().load(TemplateKey::Classic).unwrap();
    let content = json!({
        "version": 1,
        "hero": { "title": 42, "buttonText": "Visit" },
        "background": { "type": "color", "color": "#112233" }
    });
    let products = json!([
        { "id": 1, "name": "Mug", "price": "199.50", "isActive": true },
        { "name": "No id" }
    ]);

    let html = renderer().render_json(
        &template,
        Some(&content),
        &products,
        &store(),
        &BaseUrlResolver::default(),
    );

    assert!(html.contains(">Fireside Pottery</h1>"));
    assert!(html.contains(">Visit</a>"));
    assert!(html.contains("background-color:#112233"));
    assert!(html.contains("₱199.50"));
    assert!(!html.contains("No id"));
}

#[test]
fn test_render_page_unknown_key_uses_default_template() {
    let html = renderer()
        .render_page(
            &TemplateCatalog::embedded(),
            "art-deco",
            &ContentDocument::new(),
            &[],
            &store(),
            &BaseUrlResolver::default(),
        )
        .unwrap();
    assert!(html.contains("<title>FIRESIDE | Boutique</title>"));
}

#[test]
fn test_render_page_missing_file_is_an_error() {
    let catalog = TemplateCatalog::from_dir("/nonexistent/storefront/templates");
    let result = renderer().render_page(
        &catalog,
        "classic",
        &ContentDocument::new(),
        &[],
        &store(),
        &BaseUrlResolver::default(),
    );
    assert!(matches!(result, Err(crate::RenderError::Template(_))));
}

#[test]
fn test_states_saved_by_the_editor_replay_onto_the_same_nodes() -> anyhow::Result<()> {
    use storefront_content::markup_scan::find_by_id;
    use storefront_content::{ContentStore, MemoryContentStore};
    use storefront_editor::{EditorConfig, EditorEvent, EditorSession, Key, Modifiers};

    const FOOTER_TEXT: &str = "p-footer-text-crafted-with-patience-purpose";
    const LOGO: &str = "a-logo-luxe";

    let template = TemplateCatalog::embedded().load(TemplateKey::Classic)?;
    let resolver = BaseUrlResolver::new("https://cdn.example.com");
    let mut session = EditorSession::open(
        &template.raw_markup,
        ContentDocument::new(),
        &products(),
        &store(),
        &resolver,
        EditorConfig::default(),
    );
    session.enter_move_mode();

    let footer = session.node(&ElementId::new(FOOTER_TEXT)).expect("footer node");
    session.handle(EditorEvent::Click { target: footer });
    session.handle(EditorEvent::KeyDown {
        key: Key::ArrowRight,
        modifiers: Modifiers::SHIFT,
    });
    session.handle(EditorEvent::DoubleClick { target: footer });
    session.handle(EditorEvent::TextInput {
        text: "Made by hand".into(),
    });
    session.handle(EditorEvent::Blur);
    session.set_hidden(&ElementId::new(LOGO), true);

    let records = MemoryContentStore::new();
    session.save(&records, "fireside")?;
    let saved = records.load_content("fireside")?.expect("content saved");

    let replaying = StaticRenderer::new(RenderOptions {
        element_state_replay: ElementStateReplay::Apply,
        copyright_year: Some(2026),
    });
    let html = replaying.render_json(&template, Some(&saved), &json!([]), &store(), &resolver);

    let footer_el = find_by_id(&html, FOOTER_TEXT).expect("footer rendered");
    assert_eq!(&html[footer_el.inner.clone()], "Made by hand");
    let footer_style = footer_el.attribute("style").unwrap_or_default();
    assert!(footer_style.contains("position: relative;"), "{}", footer_style);
    assert!(footer_style.contains("left: 10px;"), "{}", footer_style);
    assert_eq!(
        session.document().style_property(footer, "left").as_deref(),
        Some("10px")
    );

    let logo_el = find_by_id(&html, LOGO).expect("logo rendered");
    assert!(logo_el.attribute("style").unwrap_or_default().contains("display: none;"));

    let skipping = renderer().render_json(&template, Some(&saved), &json!([]), &store(), &resolver);
    let footer_el = find_by_id(&skipping, FOOTER_TEXT).expect("footer rendered");
    assert_eq!(footer_el.attribute("style"), None);
    Ok(())
}

