use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

/// Path or URI of a media file.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct MediaSource(String);

crate::impl_string_newtype!(MediaSource);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    #[strum(to_string = "image", serialize = "img", serialize = "picture")]
    Image,
    #[strum(to_string = "video", serialize = "clip", serialize = "movie")]
    Video,
}

/// One entry painted onto a cube face. The carousel only ever reads items by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub id: ItemId,
    #[serde(default)]
    pub kind: MediaKind,
    pub src: MediaSource,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub poster: Option<MediaSource>,
}

impl CarouselItem {
    pub fn image(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            kind: MediaKind::Image,
            src: MediaSource::new(src),
            alt: None,
            poster: None,
        }
    }

    pub fn video(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            ..Self::image(id, src)
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(MediaSource::new(poster));
        self
    }

    /// Text shown to assistive technology: the alt text, or the id when none is set.
    pub fn description(&self) -> &str {
        self.alt
            .as_deref()
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .unwrap_or(self.id.as_str())
    }

    /// The still image to paint for this item, if any.
    pub fn still(&self) -> Option<&MediaSource> {
        match self.kind {
            MediaKind::Image => Some(&self.src),
            MediaKind::Video => self.poster.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_deserialization() {
        let cases = vec![
            ("\"image\"", MediaKind::Image),
            ("\"IMAGE\"", MediaKind::Image),
            ("\"img\"", MediaKind::Image),
            ("\"video\"", MediaKind::Video),
            ("\"Clip\"", MediaKind::Video),
        ];

        for (json, expected) in cases {
            let deserialized: MediaKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_item_defaults_to_image() {
        let item: CarouselItem =
            serde_json::from_str(r#"{ "id": "finals", "src": "finals.png" }"#).unwrap();
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.still().map(|s| s.as_str()), Some("finals.png"));
    }

    #[test]
    fn test_description_falls_back_to_id() {
        let item = CarouselItem::image("bracket", "bracket.png");
        assert_eq!(item.description(), "bracket");

        let item = item.with_alt("   ");
        assert_eq!(item.description(), "bracket");

        let item = CarouselItem::image("bracket", "bracket.png").with_alt("Upper bracket");
        assert_eq!(item.description(), "Upper bracket");
    }

    #[test]
    fn test_video_still_uses_poster() {
        let clip = CarouselItem::video("highlight", "highlight.webm");
        assert!(clip.still().is_none());

        let clip = clip.with_poster("highlight.jpg");
        assert_eq!(clip.still().map(|s| s.as_str()), Some("highlight.jpg"));
    }
}
