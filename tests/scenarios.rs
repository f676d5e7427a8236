use tweetq::{Builder, Query};

#[test]
fn example_query() {
    let b = Builder::new();
    let q = b.and([
        b.or([b.all(["red", "green", "blue"]), b.some(["black", "white"])]),
        b.has_images(),
        b.not(b.is_retweet()),
    ]);
    assert!(q.is_valid());
    assert_eq!(
        q.to_string(),
        "((red green blue) OR black OR white) has:images -is:retweet"
    );
}

#[test]
fn valid_queries() {
    let b = Builder;

    let tests: Vec<(Query, &str)> = vec![
        (b.word("cat"), "cat"),
        (b.word("you are here"), r#""you are here""#),
        (b.not(b.word("you are gone")), r#"-"you are gone""#),
        (b.or([b.word("cat"), b.word("dog")]), "cat OR dog"),
        (b.some(["cat", "dog"]), "cat OR dog"),
        (
            b.or([b.all(["cat", "dog"]), b.all(["sheep", "goat"])]),
            "(cat dog) OR (sheep goat)",
        ),
        (b.and([b.word("cat"), b.word("dog")]), "cat dog"),
        (b.all(["cat", "dog"]), "cat dog"),
        (
            b.and([b.has_images(), b.some(["cat", "dog"])]),
            "has:images (cat OR dog)",
        ),
        // Nested logic is flattened.
        (b.not(b.not(b.all(["x", "y"]))), "x y"),
        (
            b.and([b.word("a"), b.all(["b", "c"]), b.and([b.hashtag("x")])]),
            "a b c #x",
        ),
        (
            b.or([
                b.word("a"),
                b.or([b.word("b")]),
                b.or([b.mention("foo"), b.mention("bar")]),
            ]),
            "a OR b OR @foo OR @bar",
        ),
        // Negated compounds are pushed down to the leaves.
        (b.not(b.all(["cat", "dog"])), "-cat OR -dog"),
        (b.not(b.some(["cat", "dog"])), "-cat -dog"),
        (
            b.not(b.and([
                b.all(["sheep", "goat", "pig"]),
                b.not(b.word("horny")),
                b.mention("jack"),
            ])),
            "-sheep OR -goat OR -pig OR horny OR -@jack",
        ),
        (
            b.not(b.or([
                b.and([b.word("six"), b.word("strapping stars")]),
                b.not(b.and([b.has_links(), b.in_thread("122")])),
            ])),
            r#"(-six OR -"strapping stars") has:links conversation_id:122"#,
        ),
        (
            b.and([b.from("@jack"), b.url("https://example.com/x")]),
            r#"from:jack url:"https://example.com/x""#,
        ),
        (
            b.or([b.retweets_of("jack"), b.to("jack"), b.entity("Rust")]),
            "retweets_of:jack OR to:jack OR entity:Rust",
        ),
    ];

    for (q, want) in tests {
        assert!(q.is_valid(), "query {q:?} is invalid");
        assert_eq!(q.render(), want, "query {q:?}");
    }
}

#[test]
fn invalid_queries() {
    let b = Builder;

    let tests = [
        b.has_mentions(),
        b.and([b.is_verified(), b.not(b.has_media())]),
        b.not(b.or([b.lang("en"), b.is_retweet(), b.not(b.has_videos())])),
        b.and(Vec::<Query>::new()),
        b.or(Vec::<Query>::new()),
    ];

    for q in tests {
        assert!(!q.is_valid(), "query {q} is unexpectedly valid");
    }
}

#[test]
fn one_standalone_branch_is_enough() {
    let b = Builder;

    // A conjunction needs only one standalone term among its filters.
    let q = b.and([b.word("cat"), b.has_images(), b.lang("en"), b.is_verified()]);
    assert!(q.is_valid());

    // A disjunction is valid even when sibling branches are filter-only.
    let q = b.or([b.has_links(), b.hashtag("rust")]);
    assert!(q.is_valid());
    assert_eq!(q.render(), "has:links OR #rust");
}

#[test]
fn sigils_are_not_doubled() {
    let b = Builder;
    assert_eq!(b.hashtag("#x").render(), b.hashtag("x").render());
    assert_eq!(b.mention("@x").render(), b.mention("x").render());
    assert_eq!(b.from("@x").render(), "from:x");
}
