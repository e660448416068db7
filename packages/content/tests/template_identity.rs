use std::collections::HashSet;
use storefront_content::markup_scan::{scan_selectable, find_by_id};
use storefront_content::{ContentDocument, HeroRole, RenderModel, StoreProfile};
use storefront_templates::{TemplateCatalog, TemplateKey};

fn markup(key: TemplateKey) -> String {
    TemplateCatalog::embedded().load(key).unwrap().raw_markup
}

#[test]
fn test_every_template_has_unique_ids_and_hero_roles() {
    for key in TemplateKey::ALL {
        let markup = markup(key);
        let selectable = scan_selectable(&markup);
        assert!(!selectable.is_empty(), "{} has no selectable nodes", key);

        let ids: HashSet<_> = selectable.iter().map(|s| s.identified.id.clone()).collect();
        assert_eq!(ids.len(), selectable.len(), "{} produced duplicate ids", key);

        let elements: Vec<_> = selectable.iter().map(|s| s.identified.clone()).collect();
        let model = RenderModel::build(&elements, &ContentDocument::new(), &StoreProfile::default());
        assert!(model.roles.title.is_some(), "{} has no hero title", key);
        assert!(model.roles.subtitle.is_some(), "{} has no hero subtitle", key);
        assert!(model.roles.button.is_some(), "{} has no hero button", key);
    }
}

#[test]
fn test_classic_ids() {
    let markup = markup(TemplateKey::Classic);
    let ids: Vec<String> = scan_selectable(&markup)
        .into_iter()
        .map(|s| s.identified.id.to_string())
        .collect();

    assert_eq!(ids[0], "a-logo-luxe");
    assert!(ids.contains(&"h1-timeless-pieces-for-modern-living".to_string()));
    assert!(ids.contains(&"p-footer-brand-luxe".to_string()));
    assert!(ids.contains(&"p-copyright-2023-luxe-all-rights-reserved".to_string()));
    assert!(ids.contains(&"p-footer-text-crafted-with-patience-purpose".to_string()));
}

#[test]
fn test_hero_roles_per_template() {
    let expectations = [
        (TemplateKey::Classic, "h1-timeless-pieces-for-modern-living"),
        (TemplateKey::Modern, "h1-hero-title-design-that-moves-with-you"),
        (TemplateKey::Minimal, "h1-less-but-better"),
    ];

    for (key, title_id) in expectations {
        let markup = markup(key);
        let elements: Vec<_> = scan_selectable(&markup).into_iter().map(|s| s.identified).collect();
        let model = RenderModel::build(&elements, &ContentDocument::new(), &StoreProfile::default());
        assert_eq!(
            model.roles.id_for(HeroRole::Title).map(|id| id.as_str()),
            Some(title_id),
            "title role for {}",
            key
        );
    }
}

#[test]
fn test_modern_button_is_the_cta() {
    let markup = markup(TemplateKey::Modern);
    let elements: Vec<_> = scan_selectable(&markup).into_iter().map(|s| s.identified).collect();
    let model = RenderModel::build(&elements, &ContentDocument::new(), &StoreProfile::default());

    let button_id = model.roles.id_for(HeroRole::Button).unwrap();
    let node = find_by_id(&markup, button_id.as_str());
    assert!(node.is_none(), "raw templates carry no stamped ids");
    assert_eq!(button_id.as_str(), "button-cta-button-explore-now");
}
