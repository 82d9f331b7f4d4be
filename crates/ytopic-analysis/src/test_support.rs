//! Builders for `Video` fixtures.

use ytopic_youtube::{ContentDetails, Video, VideoSnippet, VideoStatistics};

pub(crate) struct VideoBuilder {
    video: Video,
}

pub(crate) fn video(id: &str) -> VideoBuilder {
    VideoBuilder {
        video: Video {
            id: id.to_string(),
            snippet: VideoSnippet {
                channel_id: "UC-default".to_string(),
                channel_title: "Default Channel".to_string(),
                ..VideoSnippet::default()
            },
            statistics: VideoStatistics::default(),
            content_details: ContentDetails {
                duration: "PT10M".to_string(),
            },
        },
    }
}

impl VideoBuilder {
    pub(crate) fn views(mut self, n: u64) -> Self {
        self.video.statistics.view_count = n;
        self
    }

    pub(crate) fn likes(mut self, n: u64) -> Self {
        self.video.statistics.like_count = n;
        self
    }

    pub(crate) fn comments(mut self, n: u64) -> Self {
        self.video.statistics.comment_count = n;
        self
    }

    pub(crate) fn category(mut self, id: &str) -> Self {
        self.video.snippet.category_id = Some(id.to_string());
        self
    }

    pub(crate) fn duration(mut self, iso: &str) -> Self {
        self.video.content_details.duration = iso.to_string();
        self
    }

    pub(crate) fn channel(mut self, id: &str, title: &str) -> Self {
        self.video.snippet.channel_id = id.to_string();
        self.video.snippet.channel_title = title.to_string();
        self
    }

    pub(crate) fn published(mut self, rfc3339: &str) -> Self {
        self.video.snippet.published_at = Some(rfc3339.to_string());
        self
    }

    pub(crate) fn title(mut self, title: &str) -> Self {
        self.video.snippet.title = title.to_string();
        self
    }

    pub(crate) fn build(self) -> Video {
        self.video
    }
}
