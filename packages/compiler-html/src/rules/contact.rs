use super::RewriteRule;
use crate::context::RenderContext;
use crate::splice::insert_before_closing;
use storefront_content::text::escape_html;
use storefront_content::GENERATED_ATTRIBUTE;

const CONTACT_MARKER: &str = "contact";

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Appends a contact section when the store has any contact detail
pub struct ContactSectionRule;

impl ContactSectionRule {
    pub fn section(ctx: &RenderContext) -> Option<String> {
        let mut lines = Vec::new();

        if let Some(email) = non_blank(&ctx.store.email) {
            let email = escape_html(email);
            lines.push(format!(
                "<p class=\"contact-email\">Email: <a href=\"mailto:{0}\">{0}</a></p>",
                email
            ));
        }
        if let Some(phone) = non_blank(&ctx.store.phone) {
            let dial: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
            lines.push(format!(
                "<p class=\"contact-phone\">Phone: <a href=\"tel:{}\">{}</a></p>",
                escape_html(&dial),
                escape_html(phone)
            ));
        }
        if let Some(address) = non_blank(&ctx.store.address) {
            lines.push(format!("<p class=\"contact-address\">Address: {}</p>", escape_html(address)));
        }

        if lines.is_empty() {
            return None;
        }

        Some(format!(
            concat!(
                "<section class=\"contact-section\" id=\"contact\" {marker}=\"{value}\">",
                "<h2 class=\"section-title\">Contact Us</h2>",
                "<div class=\"contact-info\">{lines}</div>",
                "</section>\n"
            ),
            marker = GENERATED_ATTRIBUTE,
            value = CONTACT_MARKER,
            lines = lines.join(""),
        ))
    }
}

impl RewriteRule for ContactSectionRule {
    fn name(&self) -> &'static str {
        "contact-section"
    }

    fn description(&self) -> &'static str {
        "Append a contact section when email, phone or address is set"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        if markup.contains(&format!("{}=\"{}\"", GENERATED_ATTRIBUTE, CONTACT_MARKER)) {
            return None;
        }
        let section = Self::section(ctx)?;
        Some(insert_before_closing(markup, "body", &section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::Fixture;

    const MARKUP: &str = "<html><body><h1>Hi</h1></body></html>";

    #[test]
    fn test_no_contact_no_section() {
        let fixture = Fixture::new(MARKUP);
        assert!(ContactSectionRule.apply(MARKUP, &fixture.context()).is_none());

        let mut fixture = Fixture::new(MARKUP);
        fixture.store.email = Some("   ".into());
        assert!(ContactSectionRule.apply(MARKUP, &fixture.context()).is_none());
    }

    #[test]
    fn test_only_present_fields_render() {
        let mut fixture = Fixture::new(MARKUP);
        fixture.store.phone = Some("+63 917 555 0100".into());
        let out = ContactSectionRule.apply(MARKUP, &fixture.context()).unwrap();

        assert!(out.contains(r#"<a href="tel:+639175550100">+63 917 555 0100</a>"#));
        assert!(!out.contains("contact-email"));
        assert!(!out.contains("contact-address"));
        assert!(out.ends_with("</section>\n</body></html>"));
        assert!(ContactSectionRule.apply(&out, &fixture.context()).is_none());
    }

    #[test]
    fn test_values_are_escaped() {
        let mut fixture = Fixture::new(MARKUP);
        fixture.store.address = Some("12 <Kiln> Rd & Co".into());
        let out = ContactSectionRule.apply(MARKUP, &fixture.context()).unwrap();
        assert!(out.contains("Address: 12 &lt;Kiln&gt; Rd &amp; Co"));
    }
}
