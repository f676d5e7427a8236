//! The query expression tree and its two observers: rendering and validity.

use std::fmt;

use serde::{Serialize, Serializer};

/// A search query expression.
///
/// Values are built only through [`Builder`](crate::Builder), which normalizes
/// at construction time: `And`/`Or` never hold a single child or a direct
/// child of their own kind, and `Not` only ever wraps a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// A free-text term.
    Word(Word),
    /// A term with a fixed operator prefix, like `from:` or `#`.
    Tagged(Tagged),
    /// A field modifier that narrows results but cannot stand alone.
    Filter(Filter),
    /// Conjunction: all children must match.
    And(Conjunction),
    /// Disjunction: any child may match.
    Or(Disjunction),
    /// Negation of a leaf.
    Not(Negation),
}

/// A free-text keyword or phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    quoted: bool,
}

impl Word {
    pub(crate) fn new(s: &str) -> Self {
        let text = s.trim();
        Self {
            text: text.to_string(),
            quoted: text.contains([' ', '\t']),
        }
    }

    /// The trimmed text of the word.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the word renders as a quoted phrase.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

/// Operator prefixes for [`Tagged`] terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `from:user`
    From,
    /// `to:user`
    To,
    /// `retweets_of:user`
    RetweetsOf,
    /// `#hashtag`
    Hashtag,
    /// `@mention`
    Mention,
    /// `url:"…"`
    Url,
    /// `conversation_id:…`
    Conversation,
    /// `entity:…`
    Entity,
}

impl Tag {
    /// The literal prefix written before the argument.
    pub const fn prefix(self) -> &'static str {
        match self {
            Tag::From => "from:",
            Tag::To => "to:",
            Tag::RetweetsOf => "retweets_of:",
            Tag::Hashtag => "#",
            Tag::Mention => "@",
            Tag::Url => "url:",
            Tag::Conversation => "conversation_id:",
            Tag::Entity => "entity:",
        }
    }

    /// A sigil callers commonly include that is redundant with the prefix.
    pub(crate) const fn sigil(self) -> Option<char> {
        match self {
            Tag::From | Tag::To | Tag::RetweetsOf | Tag::Mention => Some('@'),
            Tag::Hashtag => Some('#'),
            Tag::Url | Tag::Conversation | Tag::Entity => None,
        }
    }

    const fn quotes_argument(self) -> bool {
        matches!(self, Tag::Url)
    }
}

/// A prefix-tagged term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tagged {
    tag: Tag,
    arg: String,
}

impl Tagged {
    pub(crate) fn new(tag: Tag, arg: &str) -> Self {
        // Only one sigil is removed, so "##x" keeps one of its own.
        let arg = match tag.sigil() {
            Some(sigil) => arg.strip_prefix(sigil).unwrap_or(arg),
            None => arg,
        };
        Self {
            tag,
            arg: arg.to_string(),
        }
    }

    /// The operator prefix.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The argument, with any redundant sigil removed.
    pub fn arg(&self) -> &str {
        &self.arg
    }
}

/// Boolean field filters.
///
/// These never make a query valid on their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `is:retweet`
    IsRetweet,
    /// `is:verified`
    IsVerified,
    /// `has:hashtags`
    HasHashtags,
    /// `has:links`
    HasLinks,
    /// `has:mentions`
    HasMentions,
    /// `has:media`
    HasMedia,
    /// `has:images`
    HasImages,
    /// `has:videos`
    HasVideos,
    /// `lang:<code>`
    Lang(String),
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Filter::IsRetweet => "is:retweet",
            Filter::IsVerified => "is:verified",
            Filter::HasHashtags => "has:hashtags",
            Filter::HasLinks => "has:links",
            Filter::HasMentions => "has:mentions",
            Filter::HasMedia => "has:media",
            Filter::HasImages => "has:images",
            Filter::HasVideos => "has:videos",
            Filter::Lang(code) => return write!(f, "lang:{code}"),
        };
        f.write_str(token)
    }
}

/// The ordered children of an `And` node.
///
/// Conjunctions and disjunctions are distinct types, so the children of one
/// cannot be rewrapped as the other:
///
/// ```compile_fail
/// use tweetq::{Builder, Query};
///
/// let b = Builder::new();
/// if let Query::Or(children) = b.some(["a", "b"]) {
///     let _ = Query::And(children);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Conjunction(pub(crate) Vec<Query>);

impl Conjunction {
    /// Children in insertion order.
    pub fn children(&self) -> &[Query] {
        &self.0
    }

    /// Returns true for the node produced by an argument-less `and()`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// The ordered children of an `Or` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Disjunction(pub(crate) Vec<Query>);

impl Disjunction {
    /// Children in insertion order.
    pub fn children(&self) -> &[Query] {
        &self.0
    }

    /// Returns true for the node produced by an argument-less `or()`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A negated leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Negation(pub(crate) Box<Query>);

impl Negation {
    /// The negated query.
    pub fn inner(&self) -> &Query {
        &self.0
    }
}

impl Query {
    /// Render the query in the search endpoint's grammar.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Reports whether the query contains at least one standalone term.
    ///
    /// Filters narrow a search but cannot justify one, so a query built only
    /// from filters (or an empty `And`/`Or`) is invalid. A valid query may
    /// still contain invalid subqueries.
    pub fn is_valid(&self) -> bool {
        match self {
            Query::Word(_) | Query::Tagged(_) => true,
            Query::Filter(_) => false,
            Query::And(Conjunction(qs)) | Query::Or(Disjunction(qs)) => {
                qs.iter().any(Query::is_valid)
            }
            Query::Not(n) => n.0.is_valid(),
        }
    }

    /// Returns true if the query needs parentheses when nested.
    pub fn is_compound(&self) -> bool {
        match self {
            Query::And(Conjunction(qs)) | Query::Or(Disjunction(qs)) => qs.len() > 1,
            Query::Not(n) => n.0.is_compound(),
            Query::Word(_) | Query::Tagged(_) | Query::Filter(_) => false,
        }
    }

    /// Returns true for `Word`, `Tagged` and `Filter` nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Query::Word(_) | Query::Tagged(_) | Query::Filter(_))
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Query], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        if child.is_compound() {
            write!(f, "({child})")?;
        } else {
            write!(f, "{child}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Embedded double quotes are passed through unescaped.
            Query::Word(w) if w.quoted => write!(f, "\"{}\"", w.text),
            Query::Word(w) => f.write_str(&w.text),
            Query::Tagged(t) if t.tag.quotes_argument() => {
                write!(f, "{}\"{}\"", t.tag.prefix(), t.arg)
            }
            Query::Tagged(t) => write!(f, "{}{}", t.tag.prefix(), t.arg),
            Query::Filter(x) => write!(f, "{x}"),
            Query::And(j) => write_joined(f, &j.0, " "),
            Query::Or(j) => write_joined(f, &j.0, " OR "),
            Query::Not(n) => write!(f, "-{}", n.0),
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::ops::Not for Query {
    type Output = Query;

    fn not(self) -> Query {
        crate::Builder.not(self)
    }
}
