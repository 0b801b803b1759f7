//! Feed content mixer
//!
//! Reorders a newest-first list of posts so that video, image and text posts
//! are interleaved instead of clustered. Single pass, in memory.
//!
//! Rules, checked in order at every position:
//! 1. After two media posts of the same kind, switch to the other media kind,
//!    or to text when the other media kind has run out.
//! 2. Every fourth position (starting at 0) prefers a text post.
//! 3. Otherwise pick video while the video cursor is behind
//!    `position * video_frequency`, else image.
//!
//! The output is always a permutation of the input and keeps the relative
//! order of posts of the same kind. A run of three or more same-kind media
//! posts only happens once every other kind is exhausted.

use std::collections::VecDeque;

use crate::domain::entities::{ContentKind, Post};

/// Posts of one kind, consumed front to back
struct Bucket<T> {
    items: VecDeque<T>,
    taken: usize,
}

impl<T> Bucket<T> {
    fn new() -> Self {
        Self {
            items: VecDeque::new(),
            taken: 0,
        }
    }

    fn has_remaining(&self) -> bool {
        !self.items.is_empty()
    }

    fn take(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        self.taken += 1;
        Some(item)
    }
}

/// What the next-kind decision looks at
#[derive(Debug, Clone, Copy)]
struct MixState {
    position: usize,
    last: Option<ContentKind>,
    run_length: usize,
    video_frequency: f64,
    video_cursor: usize,
    video_left: bool,
    image_left: bool,
    text_left: bool,
}

impl MixState {
    fn next_kind(&self) -> Option<ContentKind> {
        if self.run_length >= 2 {
            match self.last {
                Some(ContentKind::Video) if self.image_left => return Some(ContentKind::Image),
                Some(ContentKind::Image) if self.video_left => return Some(ContentKind::Video),
                Some(ContentKind::Video | ContentKind::Image) if self.text_left => {
                    return Some(ContentKind::Text)
                }
                _ => {}
            }
        }

        if self.position % 4 == 0 && self.text_left {
            return Some(ContentKind::Text);
        }

        if self.video_left && self.image_left {
            let target = self.position as f64 * self.video_frequency;
            if target > self.video_cursor as f64 {
                Some(ContentKind::Video)
            } else {
                Some(ContentKind::Image)
            }
        } else if self.video_left {
            Some(ContentKind::Video)
        } else if self.image_left {
            Some(ContentKind::Image)
        } else if self.text_left {
            Some(ContentKind::Text)
        } else {
            None
        }
    }
}

/// Interleave items by content kind.
///
/// `kind_of` classifies each item. Inputs with no media items at all are
/// returned untouched.
pub fn mix_by_kind<T, F>(items: Vec<T>, kind_of: F) -> Vec<T>
where
    F: Fn(&T) -> ContentKind,
{
    if items.is_empty() {
        return items;
    }

    let total = items.len();
    let mut video = Bucket::new();
    let mut image = Bucket::new();
    let mut text = Bucket::new();

    for item in items {
        match kind_of(&item) {
            ContentKind::Video => video.items.push_back(item),
            ContentKind::Image => image.items.push_back(item),
            ContentKind::Text => text.items.push_back(item),
        }
    }

    if !video.has_remaining() && !image.has_remaining() {
        return text.items.into();
    }

    let video_frequency = video.items.len() as f64 / total as f64;
    let mut mixed = Vec::with_capacity(total);
    let mut state = MixState {
        position: 0,
        last: None,
        run_length: 0,
        video_frequency,
        video_cursor: 0,
        video_left: video.has_remaining(),
        image_left: image.has_remaining(),
        text_left: text.has_remaining(),
    };

    while let Some(kind) = state.next_kind() {
        let bucket = match kind {
            ContentKind::Video => &mut video,
            ContentKind::Image => &mut image,
            ContentKind::Text => &mut text,
        };
        // next_kind only names buckets that still hold items
        let Some(item) = bucket.take() else {
            break;
        };
        mixed.push(item);

        state.run_length = if state.last == Some(kind) {
            state.run_length + 1
        } else {
            1
        };
        state.last = Some(kind);
        state.position += 1;
        state.video_cursor = video.taken;
        state.video_left = video.has_remaining();
        state.image_left = image.has_remaining();
        state.text_left = text.has_remaining();
    }

    mixed
}

/// Mix feed posts by the kind of media they carry
pub fn mix_posts(posts: Vec<Post>) -> Vec<Post> {
    mix_by_kind(posts, Post::content_kind)
}
