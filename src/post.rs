/// Upper bound on the number of posts shown in the feed section.
pub const MAX_POSTS: usize = 4;

/// A single post as shown in the recent-posts section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub title: String,
    pub link: String,
    /// Publication date text as supplied by the source.
    pub published_at: String,
    pub description: String,
    /// Richer body; equal to `description` when the source has none.
    pub content: String,
}

impl PostRecord {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        published_at: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let description = description.into();
        Self {
            title: title.into(),
            link: link.into(),
            published_at: published_at.into(),
            content: description.clone(),
            description,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Text the excerpt is built from: the description, or the content when
    /// the description is empty.
    pub fn excerpt_source(&self) -> &str {
        if self.description.is_empty() {
            &self.content
        } else {
            &self.description
        }
    }
}

const FALLBACK: [(&str, &str, &str, &str); MAX_POSTS] = [
    (
        "We've made public science boring. It's time to make it magnificent.",
        "https://www.ersatzben.com/p/weve-made-public-science-boring-its",
        "2025-09-01T00:00:00Z",
        "An essay on the urgency of 'demonstration statecraft' \u{2013} a way of building that pairs theatrical ambition with democratic delivery.",
    ),
    (
        "What Actually Counts as Interdisciplinary Research?",
        "https://www.ersatzben.com/p/what-actually-counts-as-interdisciplinary",
        "2025-07-09T00:00:00Z",
        "A data-driven look at which funders support knowledge integration",
    ),
    (
        "The future of research belongs to those with clarity of purpose",
        "https://www.ersatzben.com/p/the-future-of-research-belongs-to",
        "2025-06-06T00:00:00Z",
        "Replacing US leadership means tackling fundamental questions about our research institutions' role in society",
    ),
    (
        "Tips for new advisers in government",
        "https://www.ersatzben.com/p/tips-for-new-advisers-in-government",
        "2025-05-28T00:00:00Z",
        "What I wish someone had told me. Now sharing for interest!",
    ),
];

/// Hardcoded posts shown when the live feed cannot be loaded, newest first.
pub fn fallback_posts() -> Vec<PostRecord> {
    FALLBACK
        .iter()
        .map(|(title, link, published_at, description)| {
            PostRecord::new(*title, *link, *published_at, *description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_content_defaults_to_description() {
        let post = PostRecord::new("T", "https://a.example", "", "desc");
        assert_eq!(post.content, "desc");
    }

    #[test]
    fn test_with_content_overrides_body() {
        let post = PostRecord::new("T", "https://a.example", "", "desc").with_content("<p>body</p>");
        assert_eq!(post.description, "desc");
        assert_eq!(post.content, "<p>body</p>");
    }

    #[test]
    fn test_excerpt_source_prefers_description() {
        let post = PostRecord::new("T", "", "", "desc").with_content("body");
        assert_eq!(post.excerpt_source(), "desc");

        let post = PostRecord::new("T", "", "", "").with_content("body");
        assert_eq!(post.excerpt_source(), "body");
    }

    #[test]
    fn test_fallback_posts_capped_and_newest_first() {
        let posts = fallback_posts();
        assert_eq!(posts.len(), MAX_POSTS);

        let dates: Vec<_> = posts
            .iter()
            .map(|p| DateTime::parse_from_rfc3339(&p.published_at).unwrap())
            .collect();
        assert!(dates.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_fallback_posts_have_links() {
        for post in fallback_posts() {
            assert!(post.link.starts_with("https://www.ersatzben.com/p/"));
            assert!(!post.title.is_empty());
        }
    }
}
