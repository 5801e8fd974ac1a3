//! Reference and footnote resolution.
//!
//! Declarations are collected by two pre-passes over the whole document
//! before the main parse, so a link may use a reference declared further
//! down. Reference labels are compared structurally: two labels match when
//! their inline elements have the same shape and the same text, ignoring
//! case.

use mdpeg_ast::{Element, ElementKind, Link};
use tracing::debug;

use crate::context::ParseContext;
use crate::machine::Rule;
use crate::ParseError;

/// Runs the reference pass, then the footnote pass when footnotes are
/// enabled. Without footnotes the footnote table is left empty.
pub(crate) fn collect_declarations<'a>(
    ctx: &ParseContext<'a>,
    input: &'a str,
) -> Result<(), ParseError> {
    pre_pass(ctx, Rule::References, input)?;
    if ctx.extensions().notes {
        pre_pass(ctx, Rule::Notes, input)?;
    } else {
        ctx.store_notes(None)?;
    }
    debug!(
        references = ctx.references().count(),
        notes = ctx.notes().count(),
        "collected declarations"
    );
    Ok(())
}

/// Runs one declaration pass. The pass skips every block it does not
/// collect, so a syntax error is reported as an internal error.
fn pre_pass<'a>(ctx: &ParseContext<'a>, rule: Rule, input: &'a str) -> Result<(), ParseError> {
    match ctx.run(rule, input) {
        Ok(_) => Ok(()),
        Err(err @ ParseError::Internal(_)) => Err(err),
        Err(err) => Err(ParseError::internal(format!("{rule:?} pass failed: {err}"))),
    }
}

impl<'a> ParseContext<'a> {
    /// Finds the first reference declaration whose label matches `label`.
    pub(crate) fn find_reference(&self, label: Option<&'a Element<'a>>) -> Option<&'a Link<'a>> {
        self.references()
            .filter_map(Element::link)
            .find(|reference| labels_match(label, reference.label))
    }

    /// Finds the footnote declared with exactly `label`.
    pub(crate) fn find_note(&self, label: &str) -> Option<&'a Element<'a>> {
        self.notes().find(|note| note.text() == Some(label))
    }
}

/// Compares two inline lists element by element.
///
/// Links and images never match, nor does anything that cannot appear in
/// a label.
pub(crate) fn labels_match<'a>(
    mut left: Option<&'a Element<'a>>,
    mut right: Option<&'a Element<'a>>,
) -> bool {
    while let (Some(a), Some(b)) = (left, right) {
        if a.kind() != b.kind() {
            return false;
        }
        let same = match a.kind() {
            ElementKind::Space
            | ElementKind::LineBreak
            | ElementKind::Ellipsis
            | ElementKind::EmDash
            | ElementKind::EnDash
            | ElementKind::Apostrophe => true,
            ElementKind::Str | ElementKind::Code | ElementKind::Html => {
                eq_ignore_case(a.text().unwrap_or_default(), b.text().unwrap_or_default())
            }
            ElementKind::Emph
            | ElementKind::Strong
            | ElementKind::List
            | ElementKind::SingleQuoted
            | ElementKind::DoubleQuoted => labels_match(a.first_child(), b.first_child()),
            _ => false,
        };
        if !same {
            return false;
        }
        left = a.next_sibling();
        right = b.next_sibling();
    }
    left.is_none() && right.is_none()
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}
