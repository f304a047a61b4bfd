use tracing::{info, warn};

use crate::error::SiteResult;
use crate::fetcher::{FeedError, Fetcher};
use crate::post::{fallback_posts, PostRecord};
use crate::render::{self, FeedSurface};
use crate::theme::{self, PreferenceStore, Theme, ThemeSurface};

/// Anything that can produce the live post list.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn fetch_posts(&self) -> Result<Vec<PostRecord>, FeedError>;
}

impl PostSource for Fetcher {
    async fn fetch_posts(&self) -> Result<Vec<PostRecord>, FeedError> {
        Fetcher::fetch_posts(self).await
    }
}

/// How the feed section ended up being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Posts came from the live feed.
    Live(usize),
    /// The hardcoded list was shown instead.
    Fallback,
    /// The surface has no feed area.
    Skipped,
}

/// Show the placeholder, then the live posts or the fallback list.
///
/// Feed failures never reach the surface: the fallback list stands in.
pub async fn load_feed<S: PostSource>(
    source: &S,
    surface: &mut dyn FeedSurface,
) -> SiteResult<FeedOutcome> {
    if !surface.has_feed_area() {
        warn!("Posts grid not found, skipping feed");
        return Ok(FeedOutcome::Skipped);
    }

    render::show_loading_placeholder(surface)?;

    match source.fetch_posts().await {
        Ok(posts) if !posts.is_empty() => {
            render::render(surface, &posts)?;
            info!("Loaded {} posts from the live feed", posts.len());
            Ok(FeedOutcome::Live(posts.len()))
        }
        Ok(_) => {
            info!("Feed returned no posts, using fallback posts");
            render::render(surface, &fallback_posts())?;
            Ok(FeedOutcome::Fallback)
        }
        Err(e) => {
            info!("Feed fetch failed, using fallback posts: {}", e);
            render::render(surface, &fallback_posts())?;
            Ok(FeedOutcome::Fallback)
        }
    }
}

/// Startup: apply the theme first, then fill the feed section.
pub async fn run<P, S>(
    store: &dyn PreferenceStore,
    page: &mut P,
    source: &S,
    system_prefers_dark: bool,
) -> SiteResult<(Theme, FeedOutcome)>
where
    P: FeedSurface + ThemeSurface,
    S: PostSource,
{
    let theme = theme::initialize(store, page, system_prefers_dark)?;
    let outcome = load_feed(source, page).await?;
    Ok((theme, outcome))
}
