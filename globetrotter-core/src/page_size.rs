//! Responsive page size: how many countries fit on one page at a given window width.

// (max width inclusive, items per page)
const BREAKPOINTS: [(u32, usize); 4] = [(720, 10), (1150, 12), (1350, 15), (1600, 12)];
const WIDE_ITEMS_PER_PAGE: usize = 27;

/// Items per page for a viewport width in pixels.
///
/// Not monotonic: the 1351..=1600 bucket shows fewer items than the one below it.
pub fn items_per_page(width: u32) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(max_width, _)| width <= *max_width)
        .map(|(_, items)| *items)
        .unwrap_or(WIDE_ITEMS_PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_edges() {
        assert_eq!(items_per_page(0), 10);
        assert_eq!(items_per_page(720), 10);
        assert_eq!(items_per_page(721), 12);
        assert_eq!(items_per_page(1150), 12);
        assert_eq!(items_per_page(1151), 15);
        assert_eq!(items_per_page(1350), 15);
        assert_eq!(items_per_page(1351), 12);
        assert_eq!(items_per_page(1600), 12);
        assert_eq!(items_per_page(1601), 27);
        assert_eq!(items_per_page(u32::MAX), 27);
    }

    #[test]
    fn test_non_monotonic_bucket_is_kept() {
        assert!(items_per_page(1600) < items_per_page(1350));
    }

    #[test]
    fn test_every_width_maps_to_known_size() {
        for width in (0..4000).step_by(7) {
            let size = items_per_page(width);
            assert!([10, 12, 15, 27].contains(&size), "width {} gave {}", width, size);
            assert_eq!(size, items_per_page(width));
        }
    }
}
