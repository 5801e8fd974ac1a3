//! Replays committed thunks to build elements.

use mdpeg_ast::{list, Element, ElementKind, Span};

use crate::context::ParseContext;
use crate::ParseError;

use super::stack::ValueStack;
use super::thunk::{Action, HtmlFilter, Slot, Thunk};

/// Separates list item chunks that must be parsed as separate documents.
pub(crate) const BLOCK_SEPARATOR: &str = "\u{1}";

pub(super) struct Executor<'a, 'c> {
    ctx: &'c ParseContext<'a>,
    input: &'a str,
    stack: ValueStack<'a>,
    yy: Option<&'a Element<'a>>,
    tree: Option<&'a Element<'a>>,
}

impl<'a, 'c> Executor<'a, 'c> {
    pub(super) fn new(ctx: &'c ParseContext<'a>, input: &'a str) -> Self {
        Self {
            ctx,
            input,
            stack: ValueStack::new(),
            yy: None,
            tree: None,
        }
    }

    /// Block list produced by a [`Action::Document`] thunk.
    pub(super) fn tree(&self) -> Option<&'a Element<'a>> {
        self.tree
    }

    pub(super) fn run(&mut self, thunk: Thunk) -> Result<(), ParseError> {
        let arena = self.ctx.arena();
        let span = thunk.span;

        match thunk.action {
            Action::Push(n) => self.stack.push(n),
            Action::Pop(n) => self.stack.pop(n),
            Action::Set(slot) => self.stack.set(slot, self.yy),

            Action::Clear => self.yy = None,
            Action::Cons(slot) => self.cons_into(slot, self.yy),
            Action::ConsLiteral(slot, text) => self.cons_into(slot, Some(arena.string(text))),
            Action::ConsMatched(slot) => {
                let text = self.text(span);
                self.cons_into(slot, Some(arena.string(text)));
            }
            Action::ConsSeparator(slot) => {
                let text = match self.text(span) {
                    "" => BLOCK_SEPARATOR,
                    blank => blank,
                };
                self.cons_into(slot, Some(arena.string(text)));
            }
            Action::Wrap(kind, slot) => self.yy = Some(arena.list(kind, self.stack.get(slot))),
            Action::SetKind(kind) => self.set_kind(kind),
            Action::Concat {
                list,
                kind,
                newline,
            } => {
                let element = arena.string_from_list(self.stack.get(list), newline);
                element.set_kind(kind);
                self.yy = Some(element);
            }
            Action::Append(slot) => {
                if let Some(item) = self.yy {
                    match self.stack.get(slot) {
                        Some(head) => list::append(item, head),
                        None => self.stack.set(slot, Some(list::cons(item, None))),
                    }
                }
            }

            Action::Element(kind) => self.yy = Some(arena.element(kind)),
            Action::Matched(kind) => {
                let text = self.text(span);
                self.yy = Some(arena.string(text));
                self.set_kind(kind);
            }
            Action::Literal(kind, text) => {
                self.yy = Some(arena.string(text));
                self.set_kind(kind);
            }

            Action::AtxStart => {
                let kind = ElementKind::heading(span.len() as usize).unwrap_or(ElementKind::H6);
                self.yy = Some(arena.element(kind));
            }
            Action::AtxHeading { level, inlines } => {
                let kind = self
                    .stack
                    .get(level)
                    .map_or(ElementKind::H1, |start| start.kind());
                self.yy = Some(arena.list(kind, self.stack.get(inlines)));
            }
            Action::BlockQuote(slot) => {
                let quote = arena.element(ElementKind::BlockQuote);
                quote.set_children(self.stack.get(slot));
                self.yy = Some(quote);
            }
            Action::ListItem(slot) => {
                let raw = arena.string_from_list(self.stack.get(slot), false);
                raw.set_kind(ElementKind::Raw);
                let item = arena.element(ElementKind::ListItem);
                item.set_children(Some(raw));
                self.yy = Some(item);
            }
            Action::LooseItem { item, list } => {
                let item = self.stack.get(item);
                if let Some(raw) = item.and_then(Element::first_child) {
                    let text = raw.text().unwrap_or_default();
                    raw.set_text(arena.alloc_str(&format!("{text}\n\n")));
                }
                self.cons_into(list, item);
            }
            Action::StrRun(slot) => {
                self.yy = match self.stack.get(slot) {
                    Some(chunk) if chunk.next_sibling().is_none() => Some(chunk),
                    chunks => Some(arena.list(ElementKind::List, chunks)),
                };
            }
            Action::Html(filter, kind) => {
                let filtered = match filter {
                    HtmlFilter::Html => self.ctx.extensions().filter_html,
                    HtmlFilter::Styles => self.ctx.extensions().filter_styles,
                };
                self.yy = Some(if filtered {
                    arena.list(ElementKind::List, None)
                } else {
                    let element = arena.string(self.text(span));
                    element.set_kind(kind);
                    element
                });
            }

            Action::Image => {
                if let Some(link) = self.yy {
                    if link.kind() == ElementKind::Link {
                        link.set_kind(ElementKind::Image);
                    } else {
                        let bang = arena.string("!");
                        link.set_children(Some(list::cons(bang, link.first_child())));
                    }
                }
            }
            Action::Link {
                label,
                source,
                title,
                kind,
            } => {
                let label = self.stack.get(label).and_then(Element::first_child);
                let url = self.slot_text(source);
                let title = self.slot_text(title);
                let link = arena.link(label, url, title);
                link.set_kind(kind);
                self.yy = Some(link);
            }
            Action::ReferenceLink { text, key } => self.reference_link(text, key, span),
            Action::AutoLink { mailto } => {
                let address = self.text(span);
                let url = if mailto {
                    arena.alloc_str(&format!("mailto:{address}"))
                } else {
                    address
                };
                self.yy = Some(arena.link(Some(arena.string(address)), url, ""));
            }

            Action::NoteReference(slot) => {
                let label = self.slot_text(slot);
                let note = if self.ctx.in_note() {
                    None
                } else {
                    self.ctx.find_note(label)
                };
                self.yy = Some(match note {
                    Some(note) => {
                        let blocks = note.children().map(|block| {
                            let copy = arena.element(block.kind());
                            copy.set_contents(block.contents());
                            copy.set_children(block.first_child());
                            copy
                        });
                        let reference = arena.element(ElementKind::Note);
                        reference.set_children(list::from_elements(blocks));
                        reference.set_text("");
                        reference
                    }
                    None => arena.string(arena.alloc_str(&format!("[^{label}]"))),
                });
            }
            Action::Note { label, blocks } => {
                let note = arena.list(ElementKind::Note, self.stack.get(blocks));
                note.set_text(self.slot_text(label));
                self.yy = Some(note);
            }
            Action::InlineNote(slot) => {
                let note = arena.list(ElementKind::Note, self.stack.get(slot));
                note.set_text("");
                self.yy = Some(note);
            }

            Action::Definition(slot) => {
                if let Some(definitions) = self.yy {
                    for item in definitions.children() {
                        item.set_kind(ElementKind::DefData);
                    }
                    self.cons_into(slot, Some(definitions));
                }
            }

            Action::TableHead(slot) => {
                self.set_kind(ElementKind::TableHead);
                self.cons_into(slot, self.yy);
            }
            Action::Table { rows, captions } => {
                if let Some(captions) = self.stack.get(captions) {
                    match self.stack.get(rows) {
                        Some(head) => list::chain(head, captions),
                        None => self.stack.set(rows, Some(captions)),
                    }
                }
                self.yy = Some(arena.list(ElementKind::Table, self.stack.get(rows)));
            }
            Action::CellSpan => {
                if let Some(cell) = self.yy {
                    let marker = arena.string(self.text(span));
                    marker.set_kind(ElementKind::CellSpan);
                    cell.set_children(Some(list::cons(marker, cell.first_child())));
                }
            }
            Action::TableLabel { from, into } => {
                let label = self.stack.get(from);
                if let Some(label) = label {
                    label.set_kind(ElementKind::TableLabel);
                }
                self.stack.set(into, label);
            }
            Action::TableCaption { caption, label } => {
                let caption = self.stack.get(caption);
                if let Some(caption) = caption {
                    caption.set_kind(ElementKind::TableCaption);
                    if let Some(label) = self
                        .stack
                        .get(label)
                        .filter(|label| label.kind() == ElementKind::TableLabel)
                    {
                        caption.set_children(Some(list::cons(label, caption.first_child())));
                    }
                }
                self.yy = caption;
            }

            Action::Document(slot) => self.tree = list::reverse(self.stack.get(slot)),
            Action::References(slot) => {
                self.ctx.store_references(list::reverse(self.stack.get(slot)))?;
            }
            Action::Notes(slot) => {
                self.ctx.store_notes(list::reverse(self.stack.get(slot)))?;
            }
        }
        Ok(())
    }

    /// Text of the input covered by `span`.
    fn text(&self, span: Span) -> &'a str {
        let range = span.range();
        match self.input.get(range.clone()) {
            Some(text) => text,
            None => {
                let bytes = self.input.as_bytes().get(range).unwrap_or_default();
                self.ctx
                    .arena()
                    .alloc_str(&String::from_utf8_lossy(bytes))
            }
        }
    }

    fn slot_text(&self, slot: Slot) -> &'a str {
        self.stack
            .get(slot)
            .and_then(Element::text)
            .unwrap_or_default()
    }

    fn set_kind(&self, kind: ElementKind) {
        if let Some(element) = self.yy {
            element.set_kind(kind);
        }
    }

    fn cons_into(&mut self, slot: Slot, item: Option<&'a Element<'a>>) {
        if let Some(item) = item {
            let head = list::cons(item, self.stack.get(slot));
            self.stack.set(slot, Some(head));
        }
    }

    /// Resolves `[text][key]`, `[text][]` and `[text]`; unresolved forms are
    /// kept as their literal bracketed text.
    fn reference_link(&mut self, text: Slot, key: Option<Slot>, gap: Span) {
        let arena = self.ctx.arena();
        let text_list = self.stack.get(text);
        let key_list = match key {
            Some(key) => self.stack.get(key),
            None => text_list,
        };

        let label = text_list.and_then(Element::first_child);
        let target = self.ctx.find_reference(key_list.and_then(Element::first_child));

        self.yy = Some(match target {
            Some(target) => arena.link(label, target.url, target.title),
            None => {
                let mut parts = vec![
                    Some(arena.string("[")),
                    text_list,
                    Some(arena.string("]")),
                    Some(arena.string(self.text(gap))),
                ];
                if key.is_some() {
                    parts.extend([Some(arena.string("[")), key_list, Some(arena.string("]"))]);
                }
                let literal = arena.element(ElementKind::List);
                literal.set_children(list::from_elements(parts.into_iter().flatten()));
                literal
            }
        });
    }
}
