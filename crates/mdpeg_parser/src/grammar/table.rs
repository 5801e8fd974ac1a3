//! Pipe tables.
//!
//! A table's children lead with its metadata: captions first, then the
//! `TableSeparator` holding one alignment letter per column, then the
//! `TableHead` and the `TableBody` groups in source order.

use mdpeg_ast::ElementKind;

use crate::machine::{Action, Machine, Slot};

const ROWS: Slot = Slot::new(1);
const CAPTIONS: Slot = Slot::new(2);

const ITEMS: Slot = Slot::new(1);

const CAPTION: Slot = Slot::new(1);
const SECOND: Slot = Slot::new(2);
const LABEL: Slot = Slot::new(3);

impl Machine<'_, '_> {
    pub(super) fn table(&mut self) -> bool {
        self.seq(|m| {
            m.push(2)
                && m.start_list()
                && m.start_list()
                && m.opt(|m| m.table_caption() && m.act(Action::Cons(CAPTIONS)))
                && m.table_body()
                && m.act(Action::TableHead(ROWS))
                && m.separator_line()
                && m.act(Action::Append(ROWS))
                && m.table_body()
                && m.act(Action::Cons(ROWS))
                && m.star(|m| {
                    m.blank_line()
                        && m.not(Self::table_caption)
                        && m.table_body()
                        && m.act(Action::Cons(ROWS))
                        && m.peek(|m| m.table_caption() || m.blank_line())
                })
                && (m.seq(|m| {
                    m.table_caption()
                        && m.act(Action::Cons(CAPTIONS))
                        && m.peek(Self::blank_line)
                }) || m.peek(Self::blank_line))
                && m.act(Action::Table {
                    rows: ROWS,
                    captions: CAPTIONS,
                })
                && m.pop(2)
        })
    }

    fn table_body(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.plus(|m| m.table_row() && m.act(Action::Cons(ITEMS)))
                && m.act(Action::Wrap(ElementKind::TableBody, ITEMS))
                && m.pop(1)
        })
    }

    fn table_row(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.not(Self::separator_line)
                && m.peek(Self::table_line)
                && m.opt(|m| m.byte(b'|'))
                && m.plus(|m| m.table_cell() && m.act(Action::Cons(ITEMS)))
                && m.sp()
                && m.newline()
                && m.act(Action::Wrap(ElementKind::TableRow, ITEMS))
                && m.pop(1)
        })
    }

    /// A line containing at least one `|`.
    fn table_line(&mut self) -> bool {
        self.star(|m| m.not(Self::newline) && m.not(|m| m.byte(b'|')) && m.any())
            && self.byte(b'|')
    }

    fn table_cell(&mut self) -> bool {
        self.extended_cell() || self.empty_cell() || self.full_cell()
    }

    /// A cell followed by extra `|`, kept as a `CellSpan` child.
    fn extended_cell(&mut self) -> bool {
        self.seq(|m| {
            (m.empty_cell() || m.full_cell())
                && m.capture_then(Action::CellSpan, |m| m.plus(|m| m.byte(b'|')))
        })
    }

    fn cell_str(&mut self) -> bool {
        let cell_char = |m: &mut Self| m.not(|m| m.byte(b'|')) && m.normal_char();
        self.capture_then(Action::Matched(ElementKind::Str), |m| {
            cell_char(m)
                && m.star(|m| {
                    cell_char(m)
                        || m.seq(|m| m.plus(|m| m.byte(b'_')) && m.peek(Self::alphanumeric))
                })
        })
    }

    fn full_cell(&mut self) -> bool {
        self.seq(|m| {
            m.sp()
                && m.push(1)
                && m.start_list()
                && m.plus(|m| {
                    (m.seq(|m| m.not(|m| m.byte(b'|')) && m.cell_str())
                        || m.seq(|m| {
                            m.not(Self::newline)
                                && m.not(Self::endline)
                                && m.not(|m| m.byte(b'|'))
                                && m.not(Self::str)
                                && m.not(|m| m.sp() && m.peek_byte(b'|'))
                                && m.inline()
                        }))
                        && m.act(Action::Cons(ITEMS))
                })
                && m.sp()
                && m.opt(|m| m.byte(b'|'))
                && m.act(Action::Wrap(ElementKind::TableCell, ITEMS))
                && m.pop(1)
        })
    }

    fn empty_cell(&mut self) -> bool {
        self.seq(|m| m.sp() && m.byte(b'|') && m.act(Action::Element(ElementKind::TableCell)))
    }

    /// The alignment row, yielding the column alignment letters.
    fn separator_line(&mut self) -> bool {
        self.seq(|m| {
            m.push(1)
                && m.start_list()
                && m.peek(Self::table_line)
                && m.opt(|m| m.byte(b'|'))
                && m.plus(|m| m.alignment_cell() && m.act(Action::Cons(ITEMS)))
                && m.sp()
                && m.newline()
                && m.act(Action::Concat {
                    list: ITEMS,
                    kind: ElementKind::TableSeparator,
                    newline: false,
                })
                && m.pop(1)
        })
    }

    fn alignment_cell(&mut self) -> bool {
        self.seq(|m| {
            m.sp()
                && m.not(|m| m.byte(b'|'))
                && (m.alignment("L", |m| {
                    m.opt(|m| m.byte(b':')) && m.dashes() && m.byte(b'+')
                }) || m.alignment("C", |m| {
                    m.byte(b':') && m.star(|m| m.byte(b'-')) && m.byte(b'+') && m.byte(b':')
                }) || m.alignment("R", |m| m.dashes() && m.byte(b':') && m.byte(b'+'))
                    || m.alignment("l", |m| m.opt(|m| m.byte(b':')) && m.dashes())
                    || m.alignment("r", |m| m.dashes() && m.byte(b':'))
                    || m.alignment("c", |m| {
                        m.byte(b':') && m.star(|m| m.byte(b'-')) && m.byte(b':')
                    }))
                && m.sp()
                && m.opt(|m| m.byte(b'|'))
        })
    }

    /// Matches an alignment marker that ends the cell, yielding `letter`.
    fn alignment(&mut self, letter: &'static str, marker: impl FnOnce(&mut Self) -> bool) -> bool {
        self.seq(|m| {
            marker(m)
                && m.not(|m| m.byte_if(|b| matches!(b, b'-' | b':')))
                && m.act(Action::Literal(ElementKind::Str, letter))
        })
    }

    fn dashes(&mut self) -> bool {
        self.plus(|m| m.byte(b'-'))
    }

    /// `[caption]` or `[caption][label]` on a line of its own.
    fn table_caption(&mut self) -> bool {
        self.seq(|m| {
            m.push(3)
                && m.start_list()
                && m.label()
                && m.set(CAPTION)
                && m.opt(|m| {
                    m.label()
                        && m.set(SECOND)
                        && m.act(Action::TableLabel {
                            from: SECOND,
                            into: LABEL,
                        })
                })
                && m.sp()
                && m.newline()
                && m.act(Action::TableCaption {
                    caption: CAPTION,
                    label: LABEL,
                })
                && m.pop(3)
        })
    }
}
