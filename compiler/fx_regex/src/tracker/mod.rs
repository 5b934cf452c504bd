//! Group tracker.
//!
//! Follows group nesting, alternation, quantifiers and backreferences as
//! tokens arrive, keeping one frame per group and one per alternative in
//! an arena. Frames are never removed, so backreference checks that need
//! the whole pattern can run after the scan against the same tree.
//!
//! Each alternative frame carries the committed size of what it has
//! matched so far plus at most one pending unit: the last atom, which a
//! following quantifier may still apply to.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{RegexErrorKind as K, ValidationError};
use crate::token::{Backref, Bounds, GroupKind, Quantifier};
use crate::PatternOptions;

/// Deepest allowed group nesting.
pub const MAX_GROUP_DEPTH: usize = 64;

/// Longest match a lookbehind may have, in UTF-16 code units.
pub const MAX_LOOKBEHIND_LENGTH: u32 = 250;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
struct FrameId(usize);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum FrameKind {
    /// The pattern itself.
    Base,
    Capture,
    NonCapture,
    Lookahead,
    Lookbehind,
    /// One `|`-separated branch of its parent group.
    Alternative,
}

impl FrameKind {
    fn is_lookaround(self) -> bool {
        matches!(self, FrameKind::Lookahead | FrameKind::Lookbehind)
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
    struct FrameFlags: u8 {
        /// The closing parenthesis has been seen.
        const CLOSED = 1 << 0;
        /// The group was quantified with a lower bound of zero.
        const ZERO_QUANTIFIER = 1 << 1;
        /// The group has more than one alternative.
        const ALTERNATION = 1 << 2;
        /// A capture was opened somewhere inside the group.
        const NESTED_CAPTURE = 1 << 3;
        /// Quantifying the group could repeat an empty capture.
        const EMPTY_CAPTURE_RISK = 1 << 4;
        /// Some group nested inside carries `EMPTY_CAPTURE_RISK`.
        const NESTED_RISK = 1 << 5;
    }
}

/// The most recent atom of an alternative.
#[derive(Copy, Clone, Debug)]
struct Unit {
    size: Bounds,
    /// The group this unit is, if it is one.
    group: Option<FrameId>,
    quantified: bool,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    parent: Option<FrameId>,
    /// Byte offset of the opening token.
    offset: usize,
    flags: FrameFlags,
    /// Alternatives: committed size of the branch so far.
    size: Bounds,
    /// Alternatives: the atom a quantifier would apply to.
    pending: Option<Unit>,
    /// Groups: size over the alternatives finished so far.
    folded: Option<Bounds>,
}

impl Frame {
    fn new(kind: FrameKind, parent: Option<FrameId>, offset: usize) -> Self {
        Frame {
            kind,
            parent,
            offset,
            flags: FrameFlags::empty(),
            size: Bounds::ZERO,
            pending: None,
            folded: None,
        }
    }

    fn group_size(&self) -> Bounds {
        self.folded.unwrap_or(Bounds::ZERO)
    }
}

/// An open group and its current alternative.
#[derive(Copy, Clone, Debug)]
struct Open {
    group: FrameId,
    alt: FrameId,
}

/// A backreference whose blocking check waits for the end of the pattern.
#[derive(Debug)]
struct PendingBackref {
    name: String,
    capture: FrameId,
    /// The alternative the reference appears in.
    site: FrameId,
    offset: usize,
    len: usize,
}

/// The captures a valid pattern defines, in order of appearance.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Captures {
    /// Capture names; positional captures are named `1`, `2`, ...
    pub names: Vec<String>,
    pub numbered: bool,
}

pub(crate) struct GroupTracker<'p> {
    pattern: &'p str,
    options: PatternOptions,
    frames: Vec<Frame>,
    current: Open,
    /// Enclosing open groups, outermost first.
    stack: SmallVec<[Open; 16]>,
    captures: FxHashMap<String, FrameId>,
    capture_order: Vec<String>,
    backrefs: Vec<PendingBackref>,
    next_number: u32,
}

impl<'p> GroupTracker<'p> {
    pub fn new(pattern: &'p str, options: PatternOptions) -> Self {
        let base = Frame::new(FrameKind::Base, None, 0);
        let alt = Frame::new(FrameKind::Alternative, Some(FrameId(0)), 0);
        GroupTracker {
            pattern,
            options,
            frames: vec![base, alt],
            current: Open {
                group: FrameId(0),
                alt: FrameId(1),
            },
            stack: SmallVec::new(),
            captures: FxHashMap::default(),
            capture_order: Vec::new(),
            backrefs: Vec::new(),
            next_number: 1,
        }
    }

    /// An atom of the given size.
    pub fn atom(&mut self, size: Bounds) {
        self.set_pending(Unit {
            size,
            group: None,
            quantified: false,
        });
    }

    /// An anchor: matches nothing and cannot be quantified.
    pub fn zero_width(&mut self) {
        self.commit(self.current.alt);
    }

    pub fn open(&mut self, kind: &GroupKind, offset: usize, len: usize) -> Result<(), ValidationError> {
        if self.stack.len() >= MAX_GROUP_DEPTH {
            return Err(self.error(K::GroupDepthOverflow(MAX_GROUP_DEPTH), offset, len));
        }
        let numbered = self.options.numbered();
        let (frame_kind, name) = match kind {
            GroupKind::Plain if numbered => (FrameKind::Capture, Some(self.next_number.to_string())),
            GroupKind::Plain | GroupKind::NonCapture => (FrameKind::NonCapture, None),
            GroupKind::Named(_) if numbered => {
                return Err(self.error(K::MixedCaptures, offset, len));
            }
            GroupKind::Named(name) => (FrameKind::Capture, Some(name.clone())),
            GroupKind::Lookahead => (FrameKind::Lookahead, None),
            GroupKind::Lookbehind => (FrameKind::Lookbehind, None),
        };
        if let Some(name) = &name {
            if self.in_lookaround() {
                return Err(self.error(K::CaptureInLookaround, offset, len));
            }
            if self.captures.contains_key(name) {
                return Err(self.error(K::DuplicateCaptureName(name.clone()), offset, len));
            }
            for open in self.open_groups().collect::<SmallVec<[FrameId; 16]>>() {
                self.frame_mut(open).flags |= FrameFlags::NESTED_CAPTURE;
            }
        }

        self.commit(self.current.alt);
        let group = self.push_frame(frame_kind, Some(self.current.alt), offset);
        let alt = self.push_frame(FrameKind::Alternative, Some(group), offset);
        self.stack.push(self.current);
        self.current = Open { group, alt };

        if let Some(name) = name {
            tracing::trace!(%name, offset, "capture opened");
            self.captures.insert(name.clone(), group);
            self.capture_order.push(name);
            if numbered {
                self.next_number += 1;
            }
        }
        Ok(())
    }

    /// `|` in the current group.
    pub fn alternate(&mut self) {
        let Open { group, alt } = self.current;
        self.finish_alternative(group, alt);
        self.frame_mut(group).flags |= FrameFlags::ALTERNATION;
        self.current.alt = self.push_frame(FrameKind::Alternative, Some(group), 0);
    }

    pub fn close(&mut self, offset: usize, len: usize) -> Result<(), ValidationError> {
        let Some(parent) = self.stack.pop() else {
            return Err(self.error(K::UnopenedGroup, offset, len));
        };
        let Open { group, alt } = self.current;
        self.finish_alternative(group, alt);
        self.current = parent;

        let frame = self.frame_mut(group);
        let size = frame.group_size();
        let captures = frame.kind == FrameKind::Capture
            || frame.flags.contains(FrameFlags::NESTED_CAPTURE);
        let risky = (captures && size.min == 0) || frame.flags.contains(FrameFlags::NESTED_RISK);
        frame.flags |= FrameFlags::CLOSED;
        frame.flags.set(FrameFlags::EMPTY_CAPTURE_RISK, risky);
        let kind = frame.kind;
        let start = frame.offset;

        if kind == FrameKind::Lookbehind
            && size.max.map_or(true, |max| max > MAX_LOOKBEHIND_LENGTH)
        {
            return Err(self.error(
                K::LookbehindTooLong(MAX_LOOKBEHIND_LENGTH),
                start,
                offset + len - start,
            ));
        }
        if risky {
            self.frame_mut(parent.group).flags |= FrameFlags::NESTED_RISK;
        }
        self.set_pending(Unit {
            size: if kind.is_lookaround() { Bounds::ZERO } else { size },
            group: Some(group),
            quantified: false,
        });
        Ok(())
    }

    pub fn quantify(&mut self, q: Quantifier, offset: usize, len: usize) -> Result<(), ValidationError> {
        if q.max.is_some_and(|max| max < q.min) {
            return Err(self.error(K::ReversedQuantifier, offset, len));
        }
        let alt = self.current.alt;
        let Some(unit) = self.frame(alt).pending else {
            return Err(self.error(K::QuantifierOnNothing, offset, len));
        };
        if unit.quantified {
            return Err(self.error(K::DoubleQuantifier, offset, len));
        }
        if q.max.is_none() && self.in_lookaround() {
            return Err(self.error(K::UnlimitedQuantifierInLookaround, offset, len));
        }
        if let Some(group) = unit.group {
            let target = self.frame(group);
            if target.kind.is_lookaround() {
                return Err(self.error(K::QuantifiedLookaround, offset, len));
            }
            if target.flags.contains(FrameFlags::EMPTY_CAPTURE_RISK) {
                return Err(self.error(K::QuantifiedPossiblyEmptyCapture, offset, len));
            }
            if q.min == 0 {
                self.frame_mut(group).flags |= FrameFlags::ZERO_QUANTIFIER;
            }
        }
        self.frame_mut(alt).pending = Some(Unit {
            size: unit.size.repeat(q.min, q.max),
            quantified: true,
            ..unit
        });
        Ok(())
    }

    pub fn backref(&mut self, backref: &Backref, offset: usize, len: usize) -> Result<(), ValidationError> {
        if backref.numeric != self.options.numbered() {
            return Err(self.error(K::MixedCaptures, offset, len));
        }
        let Some(&capture) = self.captures.get(&backref.name) else {
            return Err(self.error(K::UndefinedBackref(backref.name.clone()), offset, len));
        };
        let target = self.frame(capture);
        if !target.flags.contains(FrameFlags::CLOSED) {
            return Err(self.error(K::SelfReferencingBackref(backref.name.clone()), offset, len));
        }
        let size = target.group_size();
        if size.max.is_none() && self.in_lookbehind() {
            return Err(self.error(
                K::UnboundedBackrefInLookbehind(backref.name.clone()),
                offset,
                len,
            ));
        }
        self.backrefs.push(PendingBackref {
            name: backref.name.clone(),
            capture,
            site: self.current.alt,
            offset,
            len,
        });
        self.atom(size);
        Ok(())
    }

    /// End of pattern: check balance and the deferred backreferences.
    pub fn finish(self) -> Result<Captures, ValidationError> {
        if !self.stack.is_empty() {
            return Err(ValidationError::at_end(K::UnterminatedGroup, self.pattern));
        }
        if let Some(blocked) = self.backrefs.iter().find(|r| self.is_blocked(r)) {
            return Err(self.error(
                K::BlockedBackref(blocked.name.clone()),
                blocked.offset,
                blocked.len,
            ));
        }
        Ok(Captures {
            names: self.capture_order,
            numbered: self.options.numbered(),
        })
    }

    /// Could the capture be empty or unset when the reference is reached?
    ///
    /// Walks up from the capture until reaching a frame that also encloses
    /// the reference. Anything on the way that can be skipped (a group
    /// quantified from zero, or one branch of an alternation) blocks it.
    fn is_blocked(&self, backref: &PendingBackref) -> bool {
        if self.frame(backref.capture).group_size().min == 0 {
            return true;
        }
        let mut cursor = Some(backref.capture);
        while let Some(id) = cursor {
            if self.encloses(id, backref.site) {
                return false;
            }
            let frame = self.frame(id);
            if frame.flags.contains(FrameFlags::ZERO_QUANTIFIER) {
                return true;
            }
            if frame.kind == FrameKind::Alternative
                && frame
                    .parent
                    .is_some_and(|p| self.frame(p).flags.contains(FrameFlags::ALTERNATION))
            {
                return true;
            }
            cursor = frame.parent;
        }
        false
    }

    /// Is `outer` equal to `inner` or one of its ancestors?
    fn encloses(&self, outer: FrameId, inner: FrameId) -> bool {
        let mut cursor = Some(inner);
        while let Some(id) = cursor {
            if id == outer {
                return true;
            }
            cursor = self.frame(id).parent;
        }
        false
    }

    fn open_groups(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.stack
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|open| open.group)
    }

    fn in_lookaround(&self) -> bool {
        self.open_groups().any(|g| self.frame(g).kind.is_lookaround())
    }

    fn in_lookbehind(&self) -> bool {
        self.open_groups()
            .any(|g| self.frame(g).kind == FrameKind::Lookbehind)
    }

    fn push_frame(&mut self, kind: FrameKind, parent: Option<FrameId>, offset: usize) -> FrameId {
        let id = FrameId(self.frames.len());
        self.frames.push(Frame::new(kind, parent, offset));
        id
    }

    /// Fold the pending unit of `alt` into its committed size.
    fn commit(&mut self, alt: FrameId) {
        let frame = self.frame_mut(alt);
        if let Some(unit) = frame.pending.take() {
            frame.size = frame.size.then(unit.size);
        }
    }

    fn set_pending(&mut self, unit: Unit) {
        let alt = self.current.alt;
        self.commit(alt);
        self.frame_mut(alt).pending = Some(unit);
    }

    /// Close `alt` and merge its size into `group`.
    fn finish_alternative(&mut self, group: FrameId, alt: FrameId) {
        self.commit(alt);
        let size = self.frame(alt).size;
        let frame = self.frame_mut(group);
        frame.folded = Some(frame.folded.map_or(size, |folded| folded.either(size)));
    }

    fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    fn frame_mut(&mut self, id: FrameId) -> &mut Frame {
        &mut self.frames[id.0]
    }

    fn error(&self, kind: K, offset: usize, len: usize) -> ValidationError {
        ValidationError::at(kind, self.pattern, offset, len)
    }
}
