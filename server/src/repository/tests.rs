//! Repository Integration Tests
//!
//! Tests for the item and grocery list repositories with in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, GroceryList, Item, ItemId, ListEntry, ListId, OwnerId};
    use crate::repository::{
        init_db, AddOutcome, GroceryListOperations, GroceryListRepository, ItemRepository,
        Repository,
    };
    use std::collections::BTreeSet;
    use std::path::Path;

    async fn setup_test_db() -> (ItemRepository, GroceryListRepository) {
        // Use in-memory database for tests
        let db_state = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
        (
            ItemRepository::new(db_state.conn.clone()),
            GroceryListRepository::new(db_state.conn.clone()),
        )
    }

    fn owner() -> OwnerId {
        OwnerId::new("tester").unwrap()
    }

    async fn create_item(repo: &ItemRepository, name: &str) -> Item {
        repo.create(&Item::new(name.to_string())).await.expect("Failed to create item")
    }

    #[tokio::test]
    async fn test_create_and_find_item() {
        let (items, _) = setup_test_db().await;

        let mut item = Item::new("Milk".to_string());
        item.price = Some(2.49);
        item.store = Some("Corner Market".to_string());
        let created = items.create(&item).await.unwrap();

        let found = items.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(items.find_by_id(&ItemId::from("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_items_in_creation_order() {
        let (items, _) = setup_test_db().await;
        create_item(&items, "Apples").await;
        create_item(&items, "Bread").await;

        let names: Vec<_> = items.list().await.unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Apples", "Bread"]);
    }

    #[tokio::test]
    async fn test_invalid_item_is_rejected() {
        let (items, _) = setup_test_db().await;
        let err = items.create(&Item::new("  ".to_string())).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_list_with_name() {
        let (_, lists) = setup_test_db().await;

        let created = lists.create_list(Some("  Weekly  ".to_string()), owner()).await.unwrap();
        assert_eq!(created.list_name, "Weekly");
        assert!(created.items.is_empty());

        let all = lists.list_populated().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].list_name, "Weekly");
        assert_eq!(all[0].created_by.as_str(), "tester");
    }

    #[tokio::test]
    async fn test_default_names_follow_list_count() {
        let (_, lists) = setup_test_db().await;

        lists.create_list(Some("Named".to_string()), owner()).await.unwrap();
        lists.create_list(None, owner()).await.unwrap();
        assert_eq!(lists.count().await.unwrap(), 2);

        let third = lists.create_list(Some("   ".to_string()), owner()).await.unwrap();
        assert_eq!(third.list_name, "List 3");
    }

    #[tokio::test]
    async fn test_first_default_name() {
        let (_, lists) = setup_test_db().await;
        let created = lists.create_list(None, owner()).await.unwrap();
        assert_eq!(created.list_name, "List 1");
    }

    #[tokio::test]
    async fn test_overlong_name_is_rejected() {
        let (_, lists) = setup_test_db().await;
        let err = lists.create_list(Some("x".repeat(101)), owner()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(lists.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_entry_is_idempotent() {
        let (items, lists) = setup_test_db().await;
        let milk = create_item(&items, "Milk").await;
        let list = lists.create_list(None, owner()).await.unwrap();

        let first = lists.add_entry(&list.id, ListEntry::new(milk.id.clone())).await.unwrap();
        let second = lists.add_entry(&list.id, ListEntry::new(milk.id.clone())).await.unwrap();
        assert_eq!(first, AddOutcome::Added);
        assert_eq!(second, AddOutcome::AlreadyPresent);

        let stored = lists.find_populated(&list.id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].item.id, milk.id);
    }

    #[tokio::test]
    async fn test_add_entry_stores_bare_reference() {
        let (items, lists) = setup_test_db().await;
        let milk = create_item(&items, "Milk").await;
        let list = lists.create_list(None, owner()).await.unwrap();

        lists.add_entry(&list.id, ListEntry::new(milk.id.clone())).await.unwrap();

        let bare: GroceryList = lists.find_bare(&list.id).await.unwrap().unwrap();
        assert_eq!(bare.items, vec![ListEntry::new(milk.id)]);
    }

    #[tokio::test]
    async fn test_add_entry_keeps_supplied_snapshot() {
        let (items, lists) = setup_test_db().await;
        let eggs = create_item(&items, "Eggs").await;
        let list = lists.create_list(None, owner()).await.unwrap();

        let mut entry = ListEntry::new(eggs.id.clone());
        entry.quantity = 12;
        entry.item_name = Some("Free range eggs".to_string());
        entry.price = Some(0.35);
        entry.store = Some("Farm Shop".to_string());
        lists.add_entry(&list.id, entry).await.unwrap();

        let stored = lists.find_populated(&list.id).await.unwrap().unwrap();
        let entry = &stored.items[0];
        assert_eq!(entry.quantity, 12);
        assert_eq!(entry.item_name.as_deref(), Some("Free range eggs"));
        assert_eq!(entry.item.name, "Eggs");
    }

    #[tokio::test]
    async fn test_add_entry_to_missing_list() {
        let (items, lists) = setup_test_db().await;
        let milk = create_item(&items, "Milk").await;

        let err = lists
            .add_entry(&ListId::from("nope"), ListEntry::new(milk.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(lists.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_missing_item() {
        let (_, lists) = setup_test_db().await;
        let list = lists.create_list(None, owner()).await.unwrap();

        let err = lists
            .add_entry(&list.id, ListEntry::new(ItemId::from("ghost")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let stored = lists.find_populated(&list.id).await.unwrap().unwrap();
        assert!(stored.items.is_empty());
    }

    #[tokio::test]
    async fn test_entries_keep_insertion_order() {
        let (items, lists) = setup_test_db().await;
        let list = lists.create_list(None, owner()).await.unwrap();
        for name in ["Zucchini", "Apples", "Milk"] {
            let item = create_item(&items, name).await;
            lists.add_entry(&list.id, ListEntry::new(item.id)).await.unwrap();
        }

        let stored = lists.find_populated(&list.id).await.unwrap().unwrap();
        let names: Vec<_> = stored.items.iter().map(|e| e.item.name.as_str()).collect();
        assert_eq!(names, vec!["Zucchini", "Apples", "Milk"]);
    }

    #[tokio::test]
    async fn test_list_populated_resolves_items() {
        let (items, lists) = setup_test_db().await;
        let bread = create_item(&items, "Bread").await;
        let a = lists.create_list(Some("A".to_string()), owner()).await.unwrap();
        lists.create_list(Some("B".to_string()), owner()).await.unwrap();
        lists.add_entry(&a.id, ListEntry::new(bread.id.clone())).await.unwrap();

        let all = lists.list_populated().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].items[0].item, bread);
        assert!(all[1].items.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_default_names_are_distinct() {
        let (_, lists) = setup_test_db().await;
        const CREATORS: usize = 50;

        let handles: Vec<_> = (0..CREATORS)
            .map(|_| {
                let lists = lists.clone();
                tokio::spawn(async move { lists.create_list(None, owner()).await })
            })
            .collect();

        let mut names = BTreeSet::new();
        for handle in handles {
            let list = handle.await.unwrap().unwrap();
            names.insert(list.list_name);
        }

        let expected: BTreeSet<_> = (1..=CREATORS).map(|n| format!("List {n}")).collect();
        assert_eq!(names, expected);
        assert_eq!(lists.count().await.unwrap(), CREATORS as u64);
    }

    #[tokio::test]
    async fn test_uninitialized_state_reports_not_ready() {
        let state = crate::repository::DbState::new(":memory:".into());
        let lists = GroceryListRepository::new(state.conn.clone());
        let err = lists.list_populated().await.unwrap_err();
        assert!(matches!(err, DomainError::NotReady(_)));
    }
}
