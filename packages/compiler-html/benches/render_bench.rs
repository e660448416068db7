use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storefront_compiler_html::{ElementStateReplay, RenderOptions, StaticRenderer};
use storefront_content::{BaseUrlResolver, ContentDocument, ElementId, ElementState, StoreProfile};
use storefront_products::Product;
use storefront_templates::{TemplateCatalog, TemplateKey};

fn store() -> StoreProfile {
    StoreProfile {
        display_name: "Fireside Pottery".into(),
        description: "Stoneware from the hills".into(),
        domain: "fireside.shop.example".into(),
        email: Some("hello@fireside.example".into()),
        phone: Some("+63 917 555 0100".into()),
        address: None,
    }
}

fn catalog_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| {
            Product::new(i.to_string(), format!("Product {}", i), 150.0 + i as f64)
                .with_description("Wheel-thrown stoneware, glazed by hand and fired twice for a deep finish.")
                .with_image(format!("products/{}.jpg", i))
        })
        .collect()
}

fn render_empty_content(c: &mut Criterion) {
    let template = TemplateCatalog::embedded().load(TemplateKey::Classic).unwrap();
    let renderer = StaticRenderer::default();
    let resolver = BaseUrlResolver::new("https://cdn.example.com");
    let content = ContentDocument::new();
    let store = store();

    c.bench_function("render_classic_empty", |b| {
        b.iter(|| renderer.render(black_box(&template), &content, &[], &store, &resolver))
    });
}

fn render_full_page(c: &mut Criterion) {
    let template = TemplateCatalog::embedded().load(TemplateKey::Modern).unwrap();
    let renderer = StaticRenderer::new(RenderOptions {
        element_state_replay: ElementStateReplay::Apply,
        copyright_year: Some(2026),
    });
    let resolver = BaseUrlResolver::new("https://cdn.example.com");
    let store = store();
    let products = catalog_products(48);

    let mut content = ContentDocument::new();
    content.hero.title = "Hand-thrown & kiln-fired".into();
    content.hero.subtitle = "<p>Small <b>batch</b> stoneware</p>".into();
    content.background.color = "#112233".into();
    content.hero.title_style.font_size = Some("48px".into());
    content.element_states.insert(
        ElementId::new("p-section-lead-fresh-arrivals-picked-by-our-team"),
        ElementState { offset_top: 12.0, ..Default::default() },
    );

    c.bench_function("render_modern_48_products", |b| {
        b.iter(|| renderer.render(black_box(&template), &content, &products, &store, &resolver))
    });
}

criterion_group!(benches, render_empty_content, render_full_page);
criterion_main!(benches);
