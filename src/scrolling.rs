/// Vertical extent of one page section, in document pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Returns the element id an in-page link points at, or `None` for links
/// that leave the page or carry an empty fragment.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_destination(target_top: f64, header_height: f64) -> f64 {
    (target_top - header_height).max(0.0)
}

/// Picks the section under `scroll_y + lookahead`. With overlapping bounds
/// the last section in document order wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, lookahead: f64) -> Option<&str> {
    let position = scroll_y + lookahead;

    sections
        .iter()
        .rev()
        .find(|section| section.contains(position))
        .map(|section| section.id.as_str())
}

pub fn nav_link_is_active(href: &str, active: Option<&str>) -> bool {
    match (anchor_target_id(href), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BACK_TO_TOP_THRESHOLD, DEFAULT_HIGHLIGHT_LOOKAHEAD};

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    fn page() -> Vec<SectionBounds> {
        vec![
            section("home", 0.0, 800.0),
            section("about", 800.0, 600.0),
            section("pricing", 2000.0, 700.0),
        ]
    }

    #[test]
    fn pricing_link_scrolls_below_header() {
        let target = anchor_target_id("#pricing").expect("in-page anchor");

        assert_eq!(target, "pricing");
        assert_eq!(scroll_destination(2000.0, 80.0), 1920.0);
    }

    #[test]
    fn destination_never_goes_above_document_top() {
        assert_eq!(scroll_destination(20.0, 80.0), 0.0);
    }

    #[test]
    fn empty_and_external_hrefs_have_no_target() {
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("https://example.com/#pricing"), None);
    }

    #[test]
    fn lookahead_moves_the_boundary_early() {
        let sections = page();

        assert_eq!(active_section(&sections, 0.0, DEFAULT_HIGHLIGHT_LOOKAHEAD), Some("home"));
        assert_eq!(active_section(&sections, 649.0, DEFAULT_HIGHLIGHT_LOOKAHEAD), Some("home"));
        assert_eq!(active_section(&sections, 650.0, DEFAULT_HIGHLIGHT_LOOKAHEAD), Some("about"));
    }

    #[test]
    fn gap_between_sections_clears_active() {
        assert_eq!(active_section(&page(), 1500.0, DEFAULT_HIGHLIGHT_LOOKAHEAD), None);
    }

    #[test]
    fn at_most_one_link_is_active_for_any_scroll_position() {
        let sections = page();
        let links = ["#home", "#about", "#pricing", "#contact"];

        for step in 0..300 {
            let scroll_y = f64::from(step) * 10.0;
            let active = active_section(&sections, scroll_y, DEFAULT_HIGHLIGHT_LOOKAHEAD);
            let marked = links
                .iter()
                .filter(|href| nav_link_is_active(href, active))
                .count();
            assert!(marked <= 1, "scroll_y {scroll_y} marked {marked} links");
        }
    }

    #[test]
    fn back_to_top_follows_threshold() {
        assert!(!back_to_top_visible(0.0, DEFAULT_BACK_TO_TOP_THRESHOLD));
        assert!(!back_to_top_visible(500.0, DEFAULT_BACK_TO_TOP_THRESHOLD));
        assert!(back_to_top_visible(600.0, DEFAULT_BACK_TO_TOP_THRESHOLD));
    }
}
