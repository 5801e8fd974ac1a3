//! Deferred semantic actions.
//!
//! Rules never build elements while they match. They record a [`Thunk`]
//! instead: an [`Action`] plus the span of input it observed. The queue is
//! truncated when an alternative is abandoned and replayed in order once
//! the outermost rule commits.

use mdpeg_ast::{ElementKind, Span};

/// Slot of the value stack, counted from the top of the current frame.
///
/// `Slot::new(1)` is the topmost slot of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot(u8);

impl Slot {
    pub(crate) const fn new(offset: u8) -> Self {
        Self(offset)
    }

    pub(crate) const fn offset(self) -> usize {
        self.0 as usize
    }
}

/// Which filter flag silences a raw HTML action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HtmlFilter {
    Html,
    Styles,
}

/// A semantic action. `yy` is the result register of the last action;
/// slot arguments name value stack slots of the recording rule's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Reserves a zeroed frame of `n` slots.
    Push(u8),
    /// Releases `n` slots.
    Pop(u8),
    /// Stores `yy` in a slot.
    Set(Slot),

    /// Clears `yy`.
    Clear,
    /// Prepends `yy` to the list held in a slot.
    Cons(Slot),
    /// Prepends a string element with fixed text.
    ConsLiteral(Slot, &'static str),
    /// Prepends a string element with the matched text.
    ConsMatched(Slot),
    /// Prepends the matched blank lines, or the block separator if none.
    ConsSeparator(Slot),
    /// `yy` becomes a new element of `kind` with the slot list as children.
    Wrap(ElementKind, Slot),
    /// Re-keys `yy`.
    SetKind(ElementKind),
    /// `yy` becomes the concatenated text of the slot list.
    Concat {
        list: Slot,
        kind: ElementKind,
        newline: bool,
    },
    /// Appends `yy` at the end of the slot list.
    Append(Slot),

    /// `yy` becomes an empty element.
    Element(ElementKind),
    /// `yy` becomes an element holding the matched text.
    Matched(ElementKind),
    /// `yy` becomes an element holding fixed text.
    Literal(ElementKind, &'static str),

    /// Heading kind from the length of a matched `#` run.
    AtxStart,
    AtxHeading { level: Slot, inlines: Slot },
    BlockQuote(Slot),
    ListItem(Slot),
    /// Terminates the raw text of a loose list item with a blank line.
    LooseItem { item: Slot, list: Slot },
    /// A single string chunk stays as is; several are grouped.
    StrRun(Slot),
    /// Raw HTML, dropped when the filter flag is set.
    Html(HtmlFilter, ElementKind),

    /// Turns a link into an image, or prefixes unresolved link text with `!`.
    Image,
    /// Explicit link or reference declaration built from label, source
    /// and title slots.
    Link {
        label: Slot,
        source: Slot,
        title: Slot,
        kind: ElementKind,
    },
    /// Reference link; `key` is absent for the `[text]` and `[text][]` forms.
    ReferenceLink { text: Slot, key: Option<Slot> },
    AutoLink { mailto: bool },

    /// Resolves a footnote label; the note gets its own copy of the
    /// declaration's blocks. Inside footnote text the reference stays
    /// literal.
    NoteReference(Slot),
    Note { label: Slot, blocks: Slot },
    InlineNote(Slot),

    /// Re-keys the items of `yy` as definitions and prepends it to the slot.
    Definition(Slot),

    /// Re-keys `yy` as the table head and prepends it to the slot.
    TableHead(Slot),
    Table { rows: Slot, captions: Slot },
    CellSpan,
    TableLabel { from: Slot, into: Slot },
    TableCaption { caption: Slot, label: Slot },

    /// Stores the reversed slot list as the parsed block list.
    Document(Slot),
    /// Stores the reversed slot list as the reference table.
    References(Slot),
    /// Stores the reversed slot list as the footnote table.
    Notes(Slot),
}

/// A recorded action and the span of input it observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Thunk {
    pub(crate) action: Action,
    pub(crate) span: Span,
}

/// Queue of thunks recorded since the last commit.
#[derive(Debug, Default)]
pub(crate) struct ThunkQueue {
    thunks: Vec<Thunk>,
}

impl ThunkQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record(&mut self, action: Action, span: Span) {
        self.thunks.push(Thunk { action, span });
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.thunks.len()
    }

    /// Drops every thunk recorded after `len`.
    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.thunks.truncate(len);
    }

    /// Removes and returns every queued thunk.
    pub(crate) fn take(&mut self) -> Vec<Thunk> {
        std::mem::take(&mut self.thunks)
    }
}
