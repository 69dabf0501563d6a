use std::sync::Arc;

use async_trait::async_trait;
use modkit::{Page, PageRequest};

use crate::contract::{
    client::CollectionSource,
    content::{
        Achievement, ActivityItem, ActivityKind, ChatMessage, Community, Conversation, Engagement,
        ForumCategory, ForumThread, Post, ProfileStat, RecentCall, Sender, UpcomingCall,
    },
    error::ClientError,
};
use crate::domain::pages::ContentSources;

/// In-memory collection served page by page.
pub struct StaticCollection<T> {
    items: Vec<T>,
    default_limit: u64,
    max_limit: u64,
}

impl<T> StaticCollection<T> {
    pub fn new(items: Vec<T>, default_limit: u64, max_limit: u64) -> Self {
        Self {
            items,
            default_limit,
            max_limit,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl<T> CollectionSource<T> for StaticCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>, ClientError> {
        Page::from_slice(&self.items, &request, self.default_limit, self.max_limit)
            .map_err(Into::into)
    }
}

/// Every page source backed by the built-in sample content.
pub fn seeded_sources(default_limit: u64, max_limit: u64) -> ContentSources {
    fn source<T: Clone + Send + Sync + 'static>(
        items: Vec<T>,
        default_limit: u64,
        max_limit: u64,
    ) -> Arc<dyn CollectionSource<T>> {
        Arc::new(StaticCollection::new(items, default_limit, max_limit))
    }

    ContentSources {
        posts: source(posts(), default_limit, max_limit),
        communities: source(communities(), default_limit, max_limit),
        forum_categories: source(forum_categories(), default_limit, max_limit),
        forum_threads: source(forum_threads(), default_limit, max_limit),
        conversations: source(conversations(), default_limit, max_limit),
        messages: source(messages(), default_limit, max_limit),
        upcoming_calls: source(upcoming_calls(), default_limit, max_limit),
        recent_calls: source(recent_calls(), default_limit, max_limit),
        profile_stats: source(profile_stats(), default_limit, max_limit),
        achievements: source(achievements(), default_limit, max_limit),
        activity: source(activity(), default_limit, max_limit),
    }
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: u32,
    author: &str,
    username: &str,
    avatar: &str,
    content: &str,
    timestamp: &str,
    (likes, comments): (u32, u32),
    (saved, liked): (bool, bool),
) -> Post {
    Post {
        id,
        author: author.into(),
        username: username.into(),
        avatar: avatar.into(),
        content: content.into(),
        timestamp: timestamp.into(),
        likes,
        comments,
        saved,
        liked,
    }
}

pub fn posts() -> Vec<Post> {
    vec![
        post(
            1,
            "Sarah Chen",
            "@sarahchen",
            "SC",
            "Just finished reading an amazing book on sustainable living. The small changes we make today can have a huge impact on our planet tomorrow. What are some sustainable practices you follow?",
            "2 hours ago",
            (42, 8),
            (false, false),
        ),
        post(
            2,
            "Marcus Rivera",
            "@marcusr",
            "MR",
            "Working on a new photography project capturing local wildlife. Nature is incredible when you take the time to really observe it. Here are some of my favorite shots from this week.",
            "5 hours ago",
            (127, 23),
            (false, true),
        ),
        post(
            3,
            "Emma Thompson",
            "@emmathompson",
            "ET",
            "Reminder: It's okay to take breaks from social media. Your mental health matters more than staying constantly connected. I'm taking a week off starting tomorrow.",
            "1 day ago",
            (89, 15),
            (true, false),
        ),
    ]
}

pub fn communities() -> Vec<Community> {
    let c = |id, name: &str, description: &str, members, posts, category: &str, trending, joined| {
        Community {
            id,
            name: name.into(),
            description: description.into(),
            members,
            posts,
            category: category.into(),
            trending,
            joined,
        }
    };
    vec![
        c(1, "Sustainable Living", "Tips and discussions about eco-friendly lifestyle choices", 12500, 1840, "Environment", true, true),
        c(2, "Digital Privacy", "Protecting your online presence and data", 8900, 2100, "Technology", false, true),
        c(3, "Mental Health & Wellness", "Support and resources for mental wellbeing", 15200, 3450, "Health", true, false),
        c(4, "Photography Enthusiasts", "Share your photos and learn from others", 9800, 5600, "Arts", false, true),
        c(5, "Book Club", "Monthly book discussions and recommendations", 6700, 890, "Literature", false, false),
        c(6, "Indie Game Developers", "Connect with game creators and share your projects", 11200, 4200, "Gaming", true, false),
    ]
}

pub fn forum_categories() -> Vec<ForumCategory> {
    [
        (1, "General Discussion", 1243, 8901),
        (2, "Privacy & Security", 567, 3421),
        (3, "Feature Requests", 234, 1890),
        (4, "Community Support", 789, 5432),
    ]
    .into_iter()
    .map(|(id, name, threads, posts)| ForumCategory {
        id,
        name: name.into(),
        threads,
        posts,
    })
    .collect()
}

pub fn forum_threads() -> Vec<ForumThread> {
    let t = |id,
             title: &str,
             author: &str,
             avatar: &str,
             category: &str,
             (replies, views),
             last_activity: &str,
             (pinned, solved, trending)| ForumThread {
        id,
        title: title.into(),
        author: author.into(),
        avatar: avatar.into(),
        category: category.into(),
        replies,
        views,
        last_activity: last_activity.into(),
        pinned,
        solved,
        trending,
    };
    vec![
        t(1, "How to customize your privacy settings?", "Sarah Chen", "SC", "Privacy & Security", (23, 456), "2h ago", (true, true, false)),
        t(2, "Ideas for improving the feed algorithm", "Marcus Rivera", "MR", "Feature Requests", (47, 892), "4h ago", (false, false, true)),
        t(3, "Welcome new members! Introduce yourself here", "Community Team", "CT", "General Discussion", (156, 2341), "1h ago", (true, false, false)),
        t(4, "Best practices for community moderation", "Alex Johnson", "AJ", "Community Support", (31, 678), "6h ago", (false, true, false)),
        t(5, "Feature announcement: New video call rooms", "Ethica Team", "ET", "General Discussion", (89, 1567), "3h ago", (false, false, true)),
    ]
}

pub fn conversations() -> Vec<Conversation> {
    let c = |id, name: &str, username: &str, avatar: &str, last: &str, ts: &str, unread, online| {
        Conversation {
            id,
            name: name.into(),
            username: username.into(),
            avatar: avatar.into(),
            last_message: last.into(),
            timestamp: ts.into(),
            unread,
            online,
        }
    };
    vec![
        c(1, "Alex Johnson", "@alexj", "AJ", "That sounds great! When should we meet?", "2m ago", 2, true),
        c(2, "Community Team", "@team", "CT", "Welcome to the community! Feel free to...", "1h ago", 0, false),
        c(3, "Sarah Chen", "@sarahchen", "SC", "Thanks for the recommendation!", "3h ago", 0, true),
        c(4, "Marcus Rivera", "@marcusr", "MR", "Check out these photos", "1d ago", 0, false),
    ]
}

pub fn messages() -> Vec<ChatMessage> {
    [
        (1, Sender::Other, "Hey! How are you doing?", "10:30 AM"),
        (2, Sender::Me, "I'm doing great, thanks! Just finished working on a new project.", "10:32 AM"),
        (3, Sender::Other, "Oh that's awesome! What kind of project?", "10:33 AM"),
        (4, Sender::Me, "It's a privacy-focused social platform. Really excited about it!", "10:35 AM"),
        (5, Sender::Other, "That sounds great! When should we meet to discuss it further?", "10:37 AM"),
    ]
    .into_iter()
    .map(|(id, sender, content, timestamp)| ChatMessage {
        id,
        sender,
        content: content.into(),
        timestamp: timestamp.into(),
    })
    .collect()
}

pub fn upcoming_calls() -> Vec<UpcomingCall> {
    vec![
        UpcomingCall {
            id: 1,
            title: "Project Discussion".into(),
            participants: vec!["Alex Johnson".into(), "Sarah Chen".into()],
            time: "Today, 2:00 PM".into(),
            duration: "30 min".into(),
            kind: "Meeting".into(),
        },
        UpcomingCall {
            id: 2,
            title: "Community Catch-up".into(),
            participants: vec![
                "Marcus Rivera".into(),
                "Emma Thompson".into(),
                "+3 others".into(),
            ],
            time: "Tomorrow, 10:00 AM".into(),
            duration: "1 hour".into(),
            kind: "Group".into(),
        },
    ]
}

pub fn recent_calls() -> Vec<RecentCall> {
    [
        (1, "Alex Johnson", "AJ", "Video Call", "2 hours ago", "45 min", false),
        (2, "Sarah Chen", "SC", "Voice Call", "Yesterday", "12 min", false),
        (3, "Marcus Rivera", "MR", "Video Call", "2 days ago", "0 min", true),
    ]
    .into_iter()
    .map(|(id, name, avatar, kind, time, duration, missed)| RecentCall {
        id,
        name: name.into(),
        avatar: avatar.into(),
        kind: kind.into(),
        time: time.into(),
        duration: duration.into(),
        missed,
    })
    .collect()
}

pub fn profile_stats() -> Vec<ProfileStat> {
    [
        ("Posts", "127", "+12%"),
        ("Followers", "1,234", "+8%"),
        ("Following", "389", "+3%"),
        ("Engagement", "94%", "+5%"),
    ]
    .into_iter()
    .map(|(label, value, change)| ProfileStat {
        label: label.into(),
        value: value.into(),
        change: change.into(),
    })
    .collect()
}

pub fn achievements() -> Vec<Achievement> {
    [
        ("Early Adopter", "Joined in the first month", "January 2026"),
        ("Community Helper", "Helped 100+ community members", "February 2026"),
        ("Privacy Advocate", "Promoted privacy best practices", "February 2026"),
        ("Top Contributor", "Most valuable community member", "February 2026"),
    ]
    .into_iter()
    .map(|(name, description, date)| Achievement {
        name: name.into(),
        description: description.into(),
        date: date.into(),
    })
    .collect()
}

pub fn activity() -> Vec<ActivityItem> {
    vec![
        ActivityItem {
            id: 1,
            kind: ActivityKind::Post,
            content: "Shared thoughts on sustainable living practices".into(),
            time: "2 hours ago".into(),
            engagement: Some(Engagement {
                likes: 42,
                comments: 8,
            }),
        },
        ActivityItem {
            id: 2,
            kind: ActivityKind::Community,
            content: "Joined \"Digital Privacy Advocates\" community".into(),
            time: "1 day ago".into(),
            engagement: None,
        },
        ActivityItem {
            id: 3,
            kind: ActivityKind::Achievement,
            content: "Earned \"Privacy Advocate\" badge".into(),
            time: "3 days ago".into(),
            engagement: None,
        },
    ]
}
