use askama::Template;
use tracing::warn;

use crate::error::SiteResult;
use crate::post::{PostRecord, MAX_POSTS};
use crate::text::{format_date, strip_markup, truncate};
use crate::theme::{Theme, ThemeSurface};

/// Maximum excerpt length on a post card, before the ellipsis.
pub const EXCERPT_LENGTH: usize = 180;

/// The area post cards are drawn into.
pub trait FeedSurface {
    fn has_feed_area(&self) -> bool;
    fn clear_feed_area(&mut self);
    fn append_to_feed_area(&mut self, fragment: String);
}

#[derive(Template)]
#[template(path = "post_card.html")]
pub struct PostCard {
    pub date: String,
    pub title: String,
    pub link: String,
    pub excerpt: String,
}

impl PostCard {
    pub fn from_post(post: &PostRecord) -> Self {
        Self {
            date: format_date(&post.published_at),
            title: post.title.clone(),
            link: post.link.clone(),
            excerpt: truncate(&strip_markup(post.excerpt_source()), EXCERPT_LENGTH),
        }
    }
}

#[derive(Template)]
#[template(path = "loading_skeleton.html")]
struct LoadingSkeleton;

#[derive(Template)]
#[template(path = "posts_error.html")]
struct PostsError<'a> {
    archive_url: &'a str,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    dark: bool,
    toggle_label: Option<&'a str>,
    posts: Option<String>,
}

/// Fill the feed area with [`MAX_POSTS`] loading placeholders.
pub fn show_loading_placeholder(surface: &mut dyn FeedSurface) -> SiteResult<()> {
    if !surface.has_feed_area() {
        return Ok(());
    }
    surface.clear_feed_area();
    let skeleton = LoadingSkeleton.render()?;
    for _ in 0..MAX_POSTS {
        surface.append_to_feed_area(skeleton.clone());
    }
    Ok(())
}

/// Replace the feed area with a message pointing at the archive.
pub fn show_error_state(surface: &mut dyn FeedSurface, archive_url: &str) -> SiteResult<()> {
    if !surface.has_feed_area() {
        return Ok(());
    }
    surface.clear_feed_area();
    surface.append_to_feed_area(PostsError { archive_url }.render()?);
    Ok(())
}

/// Replace the feed area with one card per post, in order.
pub fn render(surface: &mut dyn FeedSurface, posts: &[PostRecord]) -> SiteResult<()> {
    if !surface.has_feed_area() {
        return Ok(());
    }
    surface.clear_feed_area();
    for post in posts {
        let card = PostCard::from_post(post).render()?;
        surface.append_to_feed_area(card);
    }
    Ok(())
}

/// An in-memory page that can be written out as static HTML.
#[derive(Debug, Clone)]
pub struct StaticPage {
    theme: Theme,
    toggle_label: Option<String>,
    feed_area: Option<Vec<String>>,
}

impl Default for StaticPage {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticPage {
    /// A page with both a posts grid and a theme toggle.
    pub fn new() -> Self {
        Self {
            theme: Theme::Light,
            toggle_label: Some(String::new()),
            feed_area: Some(Vec::new()),
        }
    }

    pub fn without_feed_area(mut self) -> Self {
        self.feed_area = None;
        self
    }

    pub fn without_toggle(mut self) -> Self {
        self.toggle_label = None;
        self
    }

    pub fn toggle_label(&self) -> Option<&str> {
        self.toggle_label.as_deref()
    }

    pub fn feed_fragments(&self) -> &[String] {
        self.feed_area.as_deref().unwrap_or_default()
    }

    pub fn to_html(&self) -> SiteResult<String> {
        let page = PageTemplate {
            dark: self.theme == Theme::Dark,
            toggle_label: self.toggle_label.as_deref(),
            posts: self.feed_area.as_ref().map(|fragments| fragments.join("\n")),
        };
        Ok(page.render()?)
    }
}

impl FeedSurface for StaticPage {
    fn has_feed_area(&self) -> bool {
        self.feed_area.is_some()
    }

    fn clear_feed_area(&mut self) {
        if let Some(area) = self.feed_area.as_mut() {
            area.clear();
        }
    }

    fn append_to_feed_area(&mut self, fragment: String) {
        match self.feed_area.as_mut() {
            Some(area) => area.push(fragment),
            None => warn!("Dropping fragment: page has no posts grid"),
        }
    }
}

impl ThemeSurface for StaticPage {
    fn applied_theme(&self) -> Theme {
        self.theme
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn set_toggle_label(&mut self, label: &str) {
        if let Some(current) = self.toggle_label.as_mut() {
            *current = label.to_string();
        }
    }
}
