use crate::item::CarouselItem;
use derive_more::Display;

/// Text for assistive technology describing the settled item.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Showing item {position} of {total}: {description}")]
pub struct Announcement {
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub description: String,
}

impl Announcement {
    pub fn for_item(items: &[CarouselItem], index: usize) -> Option<Self> {
        items.get(index).map(|item| Self {
            position: index + 1,
            total: items.len(),
            description: item.description().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_text() {
        let items = vec![
            CarouselItem::image("a", "a.png").with_alt("Opening ceremony"),
            CarouselItem::video("b", "b.webm"),
        ];

        let first = Announcement::for_item(&items, 0).unwrap();
        assert_eq!(first.to_string(), "Showing item 1 of 2: Opening ceremony");

        let second = Announcement::for_item(&items, 1).unwrap();
        assert_eq!(second.to_string(), "Showing item 2 of 2: b");
    }

    #[test]
    fn test_out_of_range_has_no_announcement() {
        assert!(Announcement::for_item(&[], 0).is_none());
    }
}
