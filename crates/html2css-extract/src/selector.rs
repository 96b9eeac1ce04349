use std::collections::BTreeSet;

/// Selector classification for names recovered from markup.
///
/// Each kind renders with its own prefix, so a tag, a class and an id that
/// share a name never collide once rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectorKind {
    Tag,   // p
    Class, // .card
    Id,    // #main
}

impl SelectorKind {
    pub fn prefix(self) -> &'static str {
        match self {
            SelectorKind::Tag => "",
            SelectorKind::Class => ".",
            SelectorKind::Id => "#",
        }
    }

    /// Classify a rendered selector by its leading character.
    ///
    /// Anything not starting with `.` or `#` counts as a tag selector,
    /// including compound and pseudo-class keys such as `a:hover`.
    pub fn of_selector(selector: &str) -> Self {
        match selector.as_bytes().first() {
            Some(b'.') => SelectorKind::Class,
            Some(b'#') => SelectorKind::Id,
            _ => SelectorKind::Tag,
        }
    }

    /// Render a bare name with this kind's prefix.
    pub fn render(self, name: &str) -> String {
        format!("{}{name}", self.prefix())
    }
}

/// The tag, class and id names used by a batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSet {
    pub tags: BTreeSet<String>,
    pub classes: BTreeSet<String>,
    pub ids: BTreeSet<String>,
}

impl SelectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: SelectorKind, name: impl Into<String>) -> bool {
        self.names_mut(kind).insert(name.into())
    }

    pub fn contains(&self, kind: SelectorKind, name: &str) -> bool {
        self.names(kind).contains(name)
    }

    pub fn names(&self, kind: SelectorKind) -> &BTreeSet<String> {
        match kind {
            SelectorKind::Tag => &self.tags,
            SelectorKind::Class => &self.classes,
            SelectorKind::Id => &self.ids,
        }
    }

    fn names_mut(&mut self, kind: SelectorKind) -> &mut BTreeSet<String> {
        match kind {
            SelectorKind::Tag => &mut self.tags,
            SelectorKind::Class => &mut self.classes,
            SelectorKind::Id => &mut self.ids,
        }
    }

    pub fn union(&mut self, other: SelectorSet) {
        self.tags.extend(other.tags);
        self.classes.extend(other.classes);
        self.ids.extend(other.ids);
    }

    pub fn len(&self) -> usize {
        self.tags.len() + self.classes.len() + self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every name rendered with its prefix: tags, then classes, then ids.
    pub fn rendered(&self) -> impl Iterator<Item = String> + '_ {
        [SelectorKind::Tag, SelectorKind::Class, SelectorKind::Id]
            .into_iter()
            .flat_map(move |kind| self.names(kind).iter().map(move |name| kind.render(name)))
    }
}
