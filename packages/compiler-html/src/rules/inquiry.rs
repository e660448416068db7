use super::RewriteRule;
use crate::context::RenderContext;
use crate::splice::insert_before_closing;
use storefront_content::GENERATED_ATTRIBUTE;

const INQUIRY_MARKER: &str = "inquiry";

const INQUIRY_SCRIPT: &str = r#"(function () {
  var email = __EMAIL__;
  document.addEventListener('click', function (event) {
    var button = event.target.closest ? event.target.closest('.inquire-btn') : null;
    if (!button) return;
    event.preventDefault();
    var name = button.getAttribute('data-product-name') || '';
    if (email) {
      window.location.href = 'mailto:' + email + '?subject=' + encodeURIComponent('Inquiry: ' + name);
    } else {
      window.alert('Please contact the store to ask about ' + name + '.');
    }
  });
})();
"#;

/// JSON string literal that is safe inside a `<script>` element
fn script_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

/// Injects the self-contained script behind the product cards' Inquire buttons
pub struct InquiryScriptRule;

impl RewriteRule for InquiryScriptRule {
    fn name(&self) -> &'static str {
        "inquiry-script"
    }

    fn description(&self) -> &'static str {
        "Inject the inline script for the product inquiry action"
    }

    fn apply(&self, markup: &str, ctx: &RenderContext) -> Option<String> {
        if markup.contains(&format!("{}=\"{}\"", GENERATED_ATTRIBUTE, INQUIRY_MARKER)) {
            return None;
        }

        let email = ctx.store.email.as_deref().map(str::trim).unwrap_or("");
        let script = format!(
            "<script {}=\"{}\">\n{}</script>\n",
            GENERATED_ATTRIBUTE,
            INQUIRY_MARKER,
            INQUIRY_SCRIPT.replace("__EMAIL__", &script_string(email))
        );
        Some(insert_before_closing(markup, "body", &script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::Fixture;

    const MARKUP: &str = "<html><body><h1>Hi</h1></body></html>";

    #[test]
    fn test_script_before_body_close() {
        let mut fixture = Fixture::new(MARKUP);
        fixture.store.email = Some("hello@fireside.example".into());
        let out = InquiryScriptRule.apply(MARKUP, &fixture.context()).unwrap();

        assert!(out.contains(r#"var email = "hello@fireside.example";"#));
        assert!(out.ends_with("</script>\n</body></html>"));
        assert!(InquiryScriptRule.apply(&out, &fixture.context()).is_none());
    }

    #[test]
    fn test_email_cannot_close_the_script() {
        assert_eq!(script_string("a</script>\"b"), r#""a<\/script>\"b""#);
    }

    #[test]
    fn test_no_email_still_injects() {
        let fixture = Fixture::new(MARKUP);
        let out = InquiryScriptRule.apply(MARKUP, &fixture.context()).unwrap();
        assert!(out.contains(r#"var email = "";"#));
    }
}
