//! Source annotations attached to a diagnostic.

use folio_source::Span;
use serde::{Deserialize, Serialize};

/// Primary labels get carets, secondary ones dashes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The location the diagnostic is about.
    Primary,
    /// Related context.
    Secondary,
}

/// A span plus a short message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Annotated span.
    pub span: Span,
    /// Text printed after the underline.
    pub message: String,
    /// Primary or secondary.
    pub style: LabelStyle,
}

impl Label {
    /// A primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// A secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_style() {
        assert_eq!(Label::primary(Span::DUMMY, "here").style, LabelStyle::Primary);
        let l = Label::secondary(Span::DUMMY, "opened here");
        assert_eq!(l.style, LabelStyle::Secondary);
        assert_eq!(l.message, "opened here");
    }
}
