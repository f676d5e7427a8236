//! Constructors for query terms.

use crate::query::{Conjunction, Disjunction, Filter, Negation, Query, Tag, Tagged, Word};

/// Exports methods to construct query terms.
///
/// The builder carries no state; `Builder` (or `Builder::new()`) is ready for
/// use and may be copied and shared freely.
///
/// ```
/// use tweetq::Builder;
///
/// let b = Builder::new();
/// let q = b.and([
///     b.or([b.all(["red", "green", "blue"]), b.some(["black", "white"])]),
///     b.has_images(),
///     b.not(b.is_retweet()),
/// ]);
/// assert!(q.is_valid());
/// assert_eq!(
///     q.render(),
///     "((red green blue) OR black OR white) has:images -is:retweet",
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Builder;

impl Builder {
    /// Returns a new query builder.
    pub const fn new() -> Self {
        Builder
    }

    /// Converts a string into a keyword term, quoted if it contains spaces.
    pub fn word(&self, s: impl AsRef<str>) -> Query {
        Query::Word(Word::new(s.as_ref()))
    }

    /// Matches a conjunction of words, equivalent to `and(word(s)...)`.
    pub fn all<I>(&self, words: I) -> Query
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        conjoin(words.into_iter().map(|s| self.word(s)))
    }

    /// Matches a disjunction of words, equivalent to `or(word(s)...)`.
    pub fn some<I>(&self, words: I) -> Query
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        disjoin(words.into_iter().map(|s| self.word(s)))
    }

    /// Matches the conjunction of the given queries.
    pub fn and(&self, qs: impl IntoIterator<Item = Query>) -> Query {
        conjoin(qs)
    }

    /// Matches the disjunction of the given queries.
    pub fn or(&self, qs: impl IntoIterator<Item = Query>) -> Query {
        disjoin(qs)
    }

    /// Matches the negation of the given query.
    pub fn not(&self, q: Query) -> Query {
        negate(q)
    }

    /// Matches tweets from the given user.
    pub fn from(&self, user: impl AsRef<str>) -> Query {
        tagged(Tag::From, user)
    }

    /// Matches tweets that reply to the given user.
    pub fn to(&self, user: impl AsRef<str>) -> Query {
        tagged(Tag::To, user)
    }

    /// Matches tweets containing the given URL, plain or expanded.
    pub fn url(&self, url: impl AsRef<str>) -> Query {
        tagged(Tag::Url, url)
    }

    /// Matches tweets containing the given hashtag.
    pub fn hashtag(&self, tag: impl AsRef<str>) -> Query {
        tagged(Tag::Hashtag, tag)
    }

    /// Matches tweets that mention the given username.
    pub fn mention(&self, user: impl AsRef<str>) -> Query {
        tagged(Tag::Mention, user)
    }

    /// Matches retweets of the given user.
    pub fn retweets_of(&self, user: impl AsRef<str>) -> Query {
        tagged(Tag::RetweetsOf, user)
    }

    /// Matches tweets containing an entity with the given value.
    pub fn entity(&self, value: impl AsRef<str>) -> Query {
        tagged(Tag::Entity, value)
    }

    /// Matches tweets in the conversation with the given ID.
    pub fn in_thread(&self, conversation_id: impl AsRef<str>) -> Query {
        tagged(Tag::Conversation, conversation_id)
    }

    /// Matches tweets marked with the given language. A tweet carries at
    /// most one language tag.
    pub fn lang(&self, code: impl AsRef<str>) -> Query {
        Query::Filter(Filter::Lang(code.as_ref().to_string()))
    }

    /// Matches native retweets (not quote tweets).
    pub const fn is_retweet(&self) -> Query {
        Query::Filter(Filter::IsRetweet)
    }

    /// Matches tweets whose authors are verified.
    pub const fn is_verified(&self) -> Query {
        Query::Filter(Filter::IsVerified)
    }

    /// Matches tweets with at least one hashtag.
    pub const fn has_hashtags(&self) -> Query {
        Query::Filter(Filter::HasHashtags)
    }

    /// Matches tweets with at least one link in the body.
    pub const fn has_links(&self) -> Query {
        Query::Filter(Filter::HasLinks)
    }

    /// Matches tweets with at least one mention.
    pub const fn has_mentions(&self) -> Query {
        Query::Filter(Filter::HasMentions)
    }

    /// Matches tweets with a recognized media URL.
    pub const fn has_media(&self) -> Query {
        Query::Filter(Filter::HasMedia)
    }

    /// Matches tweets with a recognized image URL.
    pub const fn has_images(&self) -> Query {
        Query::Filter(Filter::HasImages)
    }

    /// Matches tweets with native videos. Links to video on other sites do
    /// not count.
    pub const fn has_videos(&self) -> Query {
        Query::Filter(Filter::HasVideos)
    }
}

fn tagged(tag: Tag, arg: impl AsRef<str>) -> Query {
    Query::Tagged(Tagged::new(tag, arg.as_ref()))
}

/// Splices the children of same-kind arguments into one list.
///
/// Arguments were normalized when they were built, so one level of splicing
/// flattens the whole tree.
fn flatten(
    qs: impl IntoIterator<Item = Query>,
    same: fn(Query) -> Result<Vec<Query>, Query>,
    wrap: fn(Vec<Query>) -> Query,
) -> Query {
    let mut qs: Vec<Query> = qs.into_iter().collect();
    if qs.len() == 1 {
        if let Some(q) = qs.pop() {
            return q;
        }
    }

    let mut flat = Vec::with_capacity(qs.len());
    for q in qs {
        match same(q) {
            Ok(children) => flat.extend(children),
            Err(q) => flat.push(q),
        }
    }
    // An empty argument can leave a lone survivor.
    if flat.len() == 1 {
        if let Some(q) = flat.pop() {
            return q;
        }
    }
    wrap(flat)
}

fn conjoin(qs: impl IntoIterator<Item = Query>) -> Query {
    flatten(
        qs,
        |q| match q {
            Query::And(c) => Ok(c.0),
            q => Err(q),
        },
        |qs| Query::And(Conjunction(qs)),
    )
}

fn disjoin(qs: impl IntoIterator<Item = Query>) -> Query {
    flatten(
        qs,
        |q| match q {
            Query::Or(d) => Ok(d.0),
            q => Err(q),
        },
        |qs| Query::Or(Disjunction(qs)),
    )
}

fn negate(q: Query) -> Query {
    match q {
        Query::Not(n) => *n.0,
        Query::And(c) => disjoin(c.0.into_iter().map(negate)),
        Query::Or(d) => conjoin(d.0.into_iter().map(negate)),
        leaf => Query::Not(Negation(Box::new(leaf))),
    }
}
