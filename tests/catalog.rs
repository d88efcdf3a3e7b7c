//! Catalog Integration Tests
//!
//! Ordering, partitioning, identity and live-count behavior of the catalog.

use bookshelf::{BookKind, Catalog, Curator, Librarian, Removal};

fn titles(catalog: &Catalog) -> Vec<String> {
    catalog.list_all().map(|b| b.title().to_string()).collect()
}

#[test]
fn test_count_after_adds() {
    let mut catalog = Catalog::new();
    for n in 0..25u32 {
        catalog.add(catalog.physical(format!("Book {}", n), "Author", n));
        assert_eq!(catalog.count(), n as usize + 1);
    }
}

#[test]
fn test_add_list_remove_scenario() {
    let mut catalog = Catalog::new();
    let t1 = catalog.add(catalog.physical("T1", "A1", 10));
    catalog.add(catalog.online("T2", "A2", "u"));

    assert_eq!(catalog.count(), 2);
    assert_eq!(titles(&catalog), vec!["T1", "T2"]);

    assert!(catalog.remove_by_identity(t1).is_removed());
    assert_eq!(catalog.count(), 1);
    assert_eq!(titles(&catalog), vec!["T2"]);
}

#[test]
fn test_removed_record_is_never_found_again() {
    let mut catalog = Catalog::new();
    let first = catalog.add(catalog.physical("Twin", "A", 1));
    let second = catalog.add(catalog.physical("Twin", "B", 2));

    assert_eq!(catalog.remove_by_identity(first), Removal::Removed);

    let found = catalog.find_first_by_title("Twin").map(|b| b.id());
    assert_eq!(found, Some(second));

    assert_eq!(catalog.remove_by_identity(second), Removal::Removed);
    assert!(catalog.find_first_by_title("Twin").is_none());
}

#[test]
fn test_variant_listings_partition_catalog() {
    let mut catalog = Catalog::new();
    catalog.add(catalog.physical("P1", "A", 1));
    catalog.add(catalog.online("O1", "B", "u1"));
    catalog.add(catalog.online("O2", "C", "u2"));
    catalog.add(catalog.physical("P2", "D", 2));

    let physical: Vec<_> = catalog.list_by_variant("Physical").map(|b| b.id()).collect();
    let online: Vec<_> = catalog.list_by_variant("Online").map(|b| b.id()).collect();

    assert!(catalog
        .list_by_variant("Physical")
        .all(|b| b.kind() == BookKind::Physical));
    assert!(catalog
        .list_by_variant("Online")
        .all(|b| b.kind() == BookKind::Online));

    assert_eq!(physical.len() + online.len(), catalog.len());
    for book in catalog.list_all() {
        let in_physical = physical.contains(&book.id());
        let in_online = online.contains(&book.id());
        assert!(in_physical != in_online, "each record is in exactly one listing");
    }
}

#[test]
fn test_most_recently_added() {
    let mut catalog = Catalog::new();
    assert!(catalog.most_recently_added().is_none());

    catalog.add(catalog.physical("A", "X", 1));
    catalog.add(catalog.physical("B", "X", 2));
    let c = catalog.add(catalog.physical("C", "X", 3));
    assert_eq!(catalog.most_recently_added().map(|b| b.title()), Some("C"));

    let _ = catalog.remove_by_identity(c);
    assert_eq!(catalog.most_recently_added().map(|b| b.title()), Some("B"));
}

#[test]
fn test_rename_then_find() {
    let mut catalog = Catalog::new();
    let id = catalog.add(catalog.online("Draft", "Writer", "u"));
    let librarian = Librarian::new();

    librarian.rename_title(catalog.get_mut(id).unwrap(), "X");

    assert_eq!(catalog.find_first_by_title("X").map(|b| b.id()), Some(id));
    assert!(catalog.find_first_by_title("Draft").is_none());
}

#[test]
fn test_empty_catalog_lookups() {
    let catalog = Catalog::new();

    assert!(catalog.find_first_by_title("nonexistent").is_none());
    assert!(catalog.find_first_by_author("nobody").is_none());
    assert_eq!(catalog.list_all().count(), 0);
    assert_eq!(catalog.count(), 0);
}

#[test]
fn test_add_moves_record_between_catalogs() {
    let mut catalog = Catalog::new();
    catalog.add(catalog.physical("A", "X", 1));
    let loose = catalog.online("B", "Y", "u");
    assert_eq!(catalog.count(), 2);

    // A record built for a catalog but never added is still live
    let mut other = Catalog::new();
    other.add(loose);
    assert_eq!(catalog.count(), 1);
    assert_eq!(other.count(), 1);

    drop(other);
    assert_eq!(catalog.count(), 1);
}
