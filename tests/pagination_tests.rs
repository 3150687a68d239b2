use checkdesk::core::pagination::{MEMBERS_PER_PAGE, Paginator, server_page_summary};

#[test]
fn test_pages_of_ten() {
    let items: Vec<u32> = (1..=23).collect();
    let paginator = Paginator::new(MEMBERS_PER_PAGE);
    assert_eq!(paginator.total_pages(items.len()), 3);

    let first = paginator.page(&items, 1);
    assert_eq!(first.items, &items[..10]);
    assert!(!first.has_previous());
    assert!(first.has_next());

    let last = paginator.page(&items, 3);
    assert_eq!(last.items, &[21, 22, 23]);
    assert!(!last.has_next());
    assert_eq!(last.summary(), "Showing 21 to 23 of 23 results (page 3/3)");
}

#[test]
fn test_out_of_range_pages_are_clamped() {
    let items: Vec<u32> = (1..=7).collect();
    let paginator = Paginator::new(5);

    assert_eq!(paginator.page(&items, 0).number, 1);
    let p = paginator.page(&items, 99);
    assert_eq!(p.number, 2);
    assert_eq!(p.items, &[6, 7]);
}

#[test]
fn test_empty_collection() {
    let items: Vec<u32> = Vec::new();
    let p = Paginator::new(10).page(&items, 3);
    assert!(p.items.is_empty());
    assert_eq!(p.total_pages, 0);
    assert!(!p.has_next());
    assert_eq!(p.summary(), "No results");
}

#[test]
fn test_server_page_footer() {
    assert_eq!(server_page_summary(1, 10, 42), "Showing 1 to 10 of 42 results");
    assert_eq!(server_page_summary(5, 10, 42), "Showing 41 to 42 of 42 results");
    assert_eq!(server_page_summary(1, 10, 0), "No results");
}
