//! Property-based tests for browse pagination and shelf counts

use bookworm::client::catalog::paginate;
use bookworm::shared::{BookRef, LibraryEntry, Shelf, ShelfStats};
use proptest::prelude::*;

fn shelf() -> impl Strategy<Value = Shelf> {
    prop::sample::select(Shelf::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_page_is_always_in_range(
        len in 0usize..60,
        page in 0usize..20,
        page_size in 1usize..10,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let result = paginate(&items, page, page_size);

        prop_assert!(result.total_pages >= 1);
        prop_assert!(result.page >= 1 && result.page <= result.total_pages);
        prop_assert!(result.items.len() <= page_size);
        prop_assert_eq!(result.total_items, len);
    }

    #[test]
    fn test_pages_cover_every_item_once(len in 0usize..60, page_size in 1usize..10) {
        let items: Vec<usize> = (0..len).collect();
        let total_pages = paginate(&items, 1, page_size).total_pages;

        let collected: Vec<usize> = (1..=total_pages)
            .flat_map(|p| paginate(&items, p, page_size).items)
            .collect();
        prop_assert_eq!(collected, items);
    }

    #[test]
    fn test_shelf_stats_count_every_entry(shelves in prop::collection::vec(shelf(), 0..30)) {
        let entries: Vec<LibraryEntry> = shelves
            .iter()
            .enumerate()
            .map(|(i, shelf)| LibraryEntry {
                id: None,
                book: BookRef::Id(format!("b{}", i)),
                shelf: *shelf,
                progress: 0,
            })
            .collect();

        let stats = ShelfStats::from_entries(&entries);
        prop_assert_eq!(stats.total(), entries.len());
        prop_assert_eq!(stats.read, shelves.iter().filter(|s| **s == Shelf::Read).count());
    }
}
