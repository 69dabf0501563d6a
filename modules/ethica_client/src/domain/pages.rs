//! Read-only content pages backed by injected collection sources.

use std::sync::Arc;

use modkit::PageRequest;

use crate::contract::{
    client::CollectionSource,
    content::{
        Achievement, ActivityItem, ChatMessage, Community, Conversation, ForumCategory,
        ForumThread, Post, ProfileStat, RecentCall, UpcomingCall,
    },
    error::ClientError,
};

/// Every content provider the authenticated pages read from.
#[derive(Clone)]
pub struct ContentSources {
    pub posts: Arc<dyn CollectionSource<Post>>,
    pub communities: Arc<dyn CollectionSource<Community>>,
    pub forum_categories: Arc<dyn CollectionSource<ForumCategory>>,
    pub forum_threads: Arc<dyn CollectionSource<ForumThread>>,
    pub conversations: Arc<dyn CollectionSource<Conversation>>,
    pub messages: Arc<dyn CollectionSource<ChatMessage>>,
    pub upcoming_calls: Arc<dyn CollectionSource<UpcomingCall>>,
    pub recent_calls: Arc<dyn CollectionSource<RecentCall>>,
    pub profile_stats: Arc<dyn CollectionSource<ProfileStat>>,
    pub achievements: Arc<dyn CollectionSource<Achievement>>,
    pub activity: Arc<dyn CollectionSource<ActivityItem>>,
}

/// Items fetched so far from one source, plus the cursor to continue from.
pub struct CollectionView<T> {
    source: Arc<dyn CollectionSource<T>>,
    page_size: Option<u64>,
    items: Vec<T>,
    next_cursor: Option<String>,
    loaded: bool,
}

impl<T> CollectionView<T> {
    pub fn new(source: Arc<dyn CollectionSource<T>>) -> Self {
        Self {
            source,
            page_size: None,
            items: Vec::new(),
            next_cursor: None,
            loaded: false,
        }
    }

    pub fn with_page_size(mut self, size: u64) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Replace the items with the first page.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let page = self
            .source
            .fetch_page(PageRequest::first(self.page_size))
            .await?;
        self.items = page.items;
        self.next_cursor = page.page_info.next_cursor;
        self.loaded = true;
        Ok(())
    }

    /// Append the next page. Returns how many items arrived.
    pub async fn load_more(&mut self) -> Result<usize, ClientError> {
        if !self.loaded {
            self.load().await?;
            return Ok(self.items.len());
        }
        let Some(cursor) = self.next_cursor.clone() else {
            return Ok(0);
        };
        let page = self
            .source
            .fetch_page(PageRequest::after(cursor, self.page_size))
            .await?;
        let added = page.items.len();
        self.items.extend(page.items);
        self.next_cursor = page.page_info.next_cursor;
        Ok(added)
    }
}

pub struct FeedPage {
    pub posts: CollectionView<Post>,
    loading_message: bool,
}

impl FeedPage {
    pub fn new(sources: &ContentSources) -> Self {
        Self {
            posts: CollectionView::new(sources.posts.clone()),
            loading_message: false,
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.posts.load().await
    }

    /// Show the "loading more" indicator and fetch the next page. The host
    /// hides the indicator with [`FeedPage::hide_loading_message`].
    pub async fn load_more(&mut self) -> Result<usize, ClientError> {
        self.loading_message = true;
        self.posts.load_more().await
    }

    pub fn is_loading_message_shown(&self) -> bool {
        self.loading_message
    }

    pub fn hide_loading_message(&mut self) {
        self.loading_message = false;
    }
}

pub struct CommunitiesPage {
    pub communities: CollectionView<Community>,
}

impl CommunitiesPage {
    pub fn new(sources: &ContentSources) -> Self {
        Self {
            communities: CollectionView::new(sources.communities.clone()),
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.communities.load().await
    }

    pub fn joined(&self) -> impl Iterator<Item = &Community> {
        self.communities.items().iter().filter(|c| c.joined)
    }
}

pub struct ForumsPage {
    pub categories: CollectionView<ForumCategory>,
    pub threads: CollectionView<ForumThread>,
}

impl ForumsPage {
    pub fn new(sources: &ContentSources) -> Self {
        Self {
            categories: CollectionView::new(sources.forum_categories.clone()),
            threads: CollectionView::new(sources.forum_threads.clone()),
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.categories.load().await?;
        self.threads.load().await
    }
}

pub const DEFAULT_CONVERSATION: u32 = 1;

pub struct MessagesPage {
    pub conversations: CollectionView<Conversation>,
    pub messages: CollectionView<ChatMessage>,
    selected: u32,
    draft: String,
}

impl MessagesPage {
    pub fn new(sources: &ContentSources) -> Self {
        Self {
            conversations: CollectionView::new(sources.conversations.clone()),
            messages: CollectionView::new(sources.messages.clone()),
            selected: DEFAULT_CONVERSATION,
            draft: String::new(),
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.conversations.load().await?;
        self.messages.load().await
    }

    pub fn selected(&self) -> u32 {
        self.selected
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.conversations
            .items()
            .iter()
            .find(|c| c.id == self.selected)
    }

    pub fn select(&mut self, conversation_id: u32) {
        self.selected = conversation_id;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Clears the compose box when it holds anything but whitespace.
    /// Nothing is transmitted.
    pub fn send(&mut self) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }
        self.draft.clear();
        true
    }
}

pub struct VideoCallsPage {
    pub upcoming: CollectionView<UpcomingCall>,
    pub recent: CollectionView<RecentCall>,
}

impl VideoCallsPage {
    pub fn new(sources: &ContentSources) -> Self {
        Self {
            upcoming: CollectionView::new(sources.upcoming_calls.clone()),
            recent: CollectionView::new(sources.recent_calls.clone()),
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.upcoming.load().await?;
        self.recent.load().await
    }

    pub fn missed(&self) -> impl Iterator<Item = &RecentCall> {
        self.recent.items().iter().filter(|c| c.missed)
    }
}

/// Stats, achievements and recent activity shown beside the profile.
pub struct ProfileExtras {
    pub stats: CollectionView<ProfileStat>,
    pub achievements: CollectionView<Achievement>,
    pub activity: CollectionView<ActivityItem>,
}

impl ProfileExtras {
    pub fn new(sources: &ContentSources) -> Self {
        Self {
            stats: CollectionView::new(sources.profile_stats.clone()),
            achievements: CollectionView::new(sources.achievements.clone()),
            activity: CollectionView::new(sources.activity.clone()),
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.stats.load().await?;
        self.achievements.load().await?;
        self.activity.load().await
    }
}
