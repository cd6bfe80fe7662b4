#![forbid(unsafe_code)]

//! Literal demo content: the before/after stylesheet and component source,
//! placeholder strings, icon fill, and informative-element texts.
//!
//! The "before" component carries pending-edit highlights on the lines the
//! assistant is about to touch; the "after" content is identical structure
//! with the primary variant wired up and no highlights.

use typereel_core::surface::Span;

/// Stylesheet shown before the demo runs (secondary button variant).
pub const ORIGINAL_CSS: &str = ".btn {
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 12px 16px;
  font-family: 'Alpha Lyrae', sans-serif;
  font-size: 16px;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.3s ease;
  position: relative;
}

.btn-secondary {
  background: linear-gradient(to bottom, #cfcfcf, #5a5a5a);
  border: 1px solid #595959;
  color: #242424;
}";

/// Stylesheet streamed in by the demo (primary button variant).
pub const UPDATED_CSS: &str = ".btn {
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 12px 16px;
  font-family: 'Alpha Lyrae', sans-serif;
  font-size: 16px;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.3s ease;
  position: relative;
}

.btn-primary {
  background: linear-gradient(to bottom, #5b1ea7, #380f6c);
  border: 1px solid #4c198c;
  border-radius: 100px;
  color: white;
}

.btn-primary::before {
  content: '';
  position: absolute;
  inset: 0;
  box-shadow: inset 0px 1px 2px 0px rgba(44, 12, 83, 0.5);
  pointer-events: none;
  border-radius: 100px;
}";

/// Chat placeholder shown before the demo runs (with shimmer).
pub const ORIGINAL_PLACEHOLDER: &str = "Change the button similar to the screenshot";

/// Chat placeholder after the prepare step (plain styling).
pub const UPDATED_PLACEHOLDER: &str =
    "Make file edits to LoginLayout.tsk, @tag elements for context";

/// Solid fill applied to the send icon while the sequence runs.
pub const SEND_FILL_SOLID: &str = "#6B4C8D";

/// Informative element content on a fresh page.
#[must_use]
pub fn initial_informative() -> Vec<Span> {
    vec![
        Span::plain("Click on "),
        Span::value("\u{2B06}"),
        Span::plain(" in console to see the magic"),
    ]
}

/// Informative element content once the sequence has completed.
#[must_use]
pub fn reload_informative() -> Vec<Span> {
    vec![
        Span::value("\u{27F3}"),
        Span::plain(" Click here to reload the console"),
    ]
}

/// Component source as syntax-categorized spans.
///
/// `updated` selects the primary-variant ternary; the original (non-updated)
/// content additionally highlights the render block the assistant is about
/// to edit.
#[must_use]
pub fn jsx_content(updated: bool) -> Vec<Span> {
    let hl = |span: Span| if updated { span } else { span.highlighted() };

    let (test_lit, then_lit, else_lit) = if updated {
        ("\"primary\"", "\"btn-primary\"", "\"btn-secondary\"")
    } else {
        ("\"secondary\"", "\"btn-secondary\"", "\"btn-primary\"")
    };

    vec![
        Span::keyword("export default function"),
        Span::plain(" "),
        Span::variable("Button"),
        Span::plain("({ "),
        Span::variable("variant"),
        Span::plain(", "),
        Span::variable("children"),
        Span::plain(", "),
        Span::variable("onClick"),
        Span::plain(" }) {\n  "),
        Span::keyword("const"),
        Span::plain(" "),
        Span::variable("baseClass"),
        Span::plain(" = "),
        Span::string_lit("\"btn\""),
        Span::plain(";\n  "),
        Span::keyword("const"),
        Span::plain(" "),
        Span::variable("variantClass"),
        Span::plain(" = "),
        Span::variable("variant"),
        Span::plain(" === "),
        Span::string_lit(test_lit),
        Span::plain(" ? "),
        Span::string_lit(then_lit),
        Span::plain(" : "),
        Span::string_lit(else_lit),
        Span::plain(";\n\n  "),
        hl(Span::keyword("return")),
        hl(Span::plain(" (")),
        Span::plain("\n    "),
        hl(Span::tag("<button")),
        Span::plain("\n      "),
        hl(Span::attribute("className")),
        hl(Span::plain("=")),
        hl(Span::value("{`${baseClass} ${variantClass}`}")),
        Span::plain("\n      "),
        hl(Span::attribute("onClick")),
        hl(Span::plain("=")),
        hl(Span::value("{onClick}")),
        Span::plain("\n    "),
        hl(Span::tag(">")),
        Span::plain("\n      "),
        hl(Span::tag("<span>")),
        hl(Span::plain("{")),
        hl(Span::variable("children")),
        hl(Span::plain("}")),
        hl(Span::tag("</span>")),
        Span::plain("\n    "),
        Span::tag("</button>"),
        Span::plain("\n  );\n}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn original_component_uses_secondary_variant() {
        let text = text_of(&jsx_content(false));
        assert!(text.contains("variant === \"secondary\" ? \"btn-secondary\" : \"btn-primary\""));
    }

    #[test]
    fn updated_component_uses_primary_variant() {
        let text = text_of(&jsx_content(true));
        assert!(text.contains("variant === \"primary\" ? \"btn-primary\" : \"btn-secondary\""));
    }

    #[test]
    fn highlights_only_in_original() {
        assert!(jsx_content(false).iter().any(|s| s.highlighted));
        assert!(!jsx_content(true).iter().any(|s| s.highlighted));
    }

    #[test]
    fn component_texts_share_structure() {
        let original = text_of(&jsx_content(false));
        let updated = text_of(&jsx_content(true));
        for needle in ["export default function Button", "<button", "</button>", "{children}"] {
            assert!(original.contains(needle));
            assert!(updated.contains(needle));
        }
    }

    #[test]
    fn stylesheets_differ_by_variant() {
        assert!(ORIGINAL_CSS.contains(".btn-secondary"));
        assert!(!ORIGINAL_CSS.contains(".btn-primary"));
        assert!(UPDATED_CSS.contains(".btn-primary"));
        assert!(!UPDATED_CSS.contains(".btn-secondary"));
    }

    #[test]
    fn informative_texts() {
        let initial: String = initial_informative().iter().map(|s| s.text.as_str()).collect();
        let reload: String = reload_informative().iter().map(|s| s.text.as_str()).collect();
        assert!(initial.contains("see the magic"));
        assert!(reload.contains("reload the console"));
    }
}
