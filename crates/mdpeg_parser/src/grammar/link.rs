//! Links, images and reference declarations.

use mdpeg_ast::{ElementKind, Span};

use crate::classify::ByteClass;
use crate::machine::{Action, Machine, Slot};

const TEXT: Slot = Slot::new(1);
const SOURCE: Slot = Slot::new(2);
const KEY: Slot = Slot::new(2);
const TITLE: Slot = Slot::new(3);

const LABEL_ITEMS: Slot = Slot::new(1);

impl Machine<'_, '_> {
    pub(super) fn image(&mut self) -> bool {
        self.seq(|m| m.byte(b'!') && m.bracketed_link() && m.act(Action::Image))
    }

    pub(super) fn link(&mut self) -> bool {
        self.bracketed_link() || self.auto_link()
    }

    /// `[text](source "title")`, `[text][key]`, `[text][]` or `[text]`.
    ///
    /// The label is parsed once and shared by the three forms.
    fn bracketed_link(&mut self) -> bool {
        self.seq(|m| {
            m.push(3)
                && m.label()
                && m.set(TEXT)
                && (m.explicit_link_tail()
                    || m.reference_link_double_tail()
                    || m.reference_link_single_tail())
                && m.pop(3)
        })
    }

    fn explicit_link_tail(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'(')
                && m.sp()
                && m.source()
                && m.set(SOURCE)
                && m.spnl()
                && m.title()
                && m.set(TITLE)
                && m.sp()
                && m.byte(b')')
                && m.act(Action::Link {
                    label: TEXT,
                    source: SOURCE,
                    title: TITLE,
                    kind: ElementKind::Link,
                })
        })
    }

    fn reference_link_double_tail(&mut self) -> bool {
        self.seq(|m| {
            let Some(gap) = m.capture(Self::spnl) else {
                return false;
            };
            m.not(|m| m.literal("[]"))
                && m.label()
                && m.set(KEY)
                && m.act_on(
                    Action::ReferenceLink {
                        text: TEXT,
                        key: Some(KEY),
                    },
                    gap,
                )
        })
    }

    fn reference_link_single_tail(&mut self) -> bool {
        match self.capture(|m| m.opt(|m| m.spnl() && m.literal("[]"))) {
            Some(gap) => self.act_on(Action::ReferenceLink { text: TEXT, key: None }, gap),
            None => false,
        }
    }

    fn source(&mut self) -> bool {
        let span = self
            .enclosed(|m| m.byte(b'<'), Self::source_contents, |m| m.byte(b'>'))
            .or_else(|| self.capture(Self::source_contents));
        match span {
            Some(span) => self.act_on(Action::Matched(ElementKind::Str), span),
            None => false,
        }
    }

    /// A url with balanced parentheses.
    fn source_contents(&mut self) -> bool {
        self.star(|m| {
            m.plus(|m| {
                m.not(|m| m.byte_if(|b| matches!(b, b'(' | b')' | b'>'))) && m.nonspacechar()
            }) || m.seq(|m| m.byte(b'(') && m.nested(Self::source_contents) && m.byte(b')'))
        })
    }

    fn title(&mut self) -> bool {
        let span = match self.link_title(b'\'') {
            Some(span) => span,
            None => match self.link_title(b'"') {
                Some(span) => span,
                None => self.here(),
            },
        };
        self.act_on(Action::Matched(ElementKind::Str), span)
    }

    /// Title text up to the closing quote that ends the link.
    fn link_title(&mut self, quote: u8) -> Option<Span> {
        self.enclosed(
            |m| m.byte(quote),
            |m| {
                m.star(|m| {
                    m.not(|m| {
                        m.byte(quote) && m.sp() && (m.byte(b')') || m.newline())
                    }) && m.any()
                })
            },
            |m| m.byte(quote),
        )
    }

    fn auto_link(&mut self) -> bool {
        self.auto_link_url() || self.auto_link_email()
    }

    fn auto_link_url(&mut self) -> bool {
        let url = self.enclosed(
            |m| m.byte(b'<'),
            |m| {
                m.plus(|m| m.class(ByteClass::Alpha))
                    && m.literal("://")
                    && m.plus(|m| m.not(Self::newline) && m.not(|m| m.byte(b'>')) && m.any())
            },
            |m| m.byte(b'>'),
        );
        match url {
            Some(span) => self.act_on(Action::AutoLink { mailto: false }, span),
            None => false,
        }
    }

    fn auto_link_email(&mut self) -> bool {
        let address = self.enclosed(
            |m| m.byte(b'<') && m.opt(|m| m.literal("mailto:")),
            |m| {
                m.plus(|m| m.class(ByteClass::EmailLocal))
                    && m.byte(b'@')
                    && m.plus(|m| m.not(Self::newline) && m.not(|m| m.byte(b'>')) && m.any())
            },
            |m| m.byte(b'>'),
        );
        match address {
            Some(span) => self.act_on(Action::AutoLink { mailto: true }, span),
            None => false,
        }
    }

    /// `[label]: source "title"`
    pub(super) fn reference(&mut self) -> bool {
        self.seq(|m| {
            m.push(3)
                && m.nonindent_space()
                && m.not(|m| m.literal("[]"))
                && m.label()
                && m.set(TEXT)
                && m.byte(b':')
                && m.spnl()
                && m.ref_src()
                && m.set(SOURCE)
                && m.ref_title()
                && m.set(TITLE)
                && m.plus(Self::blank_line)
                && m.act(Action::Link {
                    label: TEXT,
                    source: SOURCE,
                    title: TITLE,
                    kind: ElementKind::Reference,
                })
                && m.pop(3)
        })
    }

    /// Bracketed inlines, yielding a `List`. With footnotes enabled a
    /// label cannot start with `^`.
    pub(super) fn label(&mut self) -> bool {
        self.seq(|m| {
            m.byte(b'[')
                && (if m.extensions().notes {
                    m.not(|m| m.byte(b'^'))
                } else {
                    m.peek(Self::any)
                })
                && m.push(1)
                && m.start_list()
                && m.star(|m| {
                    m.not(|m| m.byte(b']')) && m.inline() && m.act(Action::Cons(LABEL_ITEMS))
                })
                && m.byte(b']')
                && m.act(Action::Wrap(ElementKind::List, LABEL_ITEMS))
                && m.pop(1)
        })
    }

    fn ref_src(&mut self) -> bool {
        self.capture_then(Action::Matched(ElementKind::Html), |m| {
            m.plus(Self::nonspacechar)
        })
    }

    fn ref_title(&mut self) -> bool {
        let span = [(b'\'', b'\''), (b'"', b'"'), (b'(', b')')]
            .into_iter()
            .find_map(|(open, close)| self.ref_title_quoted(open, close))
            .unwrap_or_else(|| self.here());
        self.act_on(Action::Matched(ElementKind::Str), span)
    }

    /// Title text up to the closing delimiter that ends the line.
    fn ref_title_quoted(&mut self, open: u8, close: u8) -> Option<Span> {
        self.enclosed(
            |m| m.spnl() && m.byte(open),
            |m| {
                m.star(|m| {
                    m.not(|m| m.seq(|m| m.byte(close) && m.sp() && m.newline()) || m.newline())
                        && m.any()
                })
            },
            |m| m.byte(close),
        )
    }
}
