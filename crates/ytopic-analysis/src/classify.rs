//! Duration-based short-form / long-form split.

use ytopic_youtube::Video;

/// Videos at or under this many seconds are short-form.
pub const SHORT_FORM_MAX_SECS: u64 = 60;

#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub shorts: Vec<&'a Video>,
    pub long_form: Vec<&'a Video>,
}

/// Partition `videos` by parsed duration, preserving input order.
///
/// A missing or malformed duration parses as zero and lands in `shorts`.
#[must_use]
pub fn classify_videos(videos: &[Video]) -> Classified<'_> {
    let mut classified = Classified::default();
    for video in videos {
        if video.duration_secs() <= SHORT_FORM_MAX_SECS {
            classified.shorts.push(video);
        } else {
            classified.long_form.push(video);
        }
    }
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytopic_youtube::{ContentDetails, Video};

    fn video(id: &str, duration: &str) -> Video {
        Video {
            id: id.to_string(),
            snippet: ytopic_youtube::VideoSnippet::default(),
            statistics: ytopic_youtube::VideoStatistics::default(),
            content_details: ContentDetails {
                duration: duration.to_string(),
            },
        }
    }

    #[test]
    fn sixty_seconds_is_short_and_sixty_one_is_long() {
        let videos = vec![video("a", "PT60S"), video("b", "PT1M1S")];
        let c = classify_videos(&videos);
        assert_eq!(c.shorts.len(), 1);
        assert_eq!(c.shorts[0].id, "a");
        assert_eq!(c.long_form.len(), 1);
        assert_eq!(c.long_form[0].id, "b");
    }

    #[test]
    fn unparsable_duration_is_short_form() {
        let videos = vec![video("a", "soon"), video("b", "")];
        let c = classify_videos(&videos);
        assert_eq!(c.shorts.len(), 2);
        assert!(c.long_form.is_empty());
    }

    #[test]
    fn order_is_preserved_within_buckets() {
        let videos = vec![
            video("l1", "PT10M"),
            video("s1", "PT30S"),
            video("l2", "PT1H"),
            video("s2", "PT5S"),
        ];
        let c = classify_videos(&videos);
        let shorts: Vec<&str> = c.shorts.iter().map(|v| v.id.as_str()).collect();
        let longs: Vec<&str> = c.long_form.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(shorts, ["s1", "s2"]);
        assert_eq!(longs, ["l1", "l2"]);
    }
}
