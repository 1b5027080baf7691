mod common;

use std::sync::atomic::{AtomicU32, Ordering};

use common::{task, tasks};
use taigalist::api::ApiError;
use taigalist::entities::CommonTask;
use taigalist::paging::{PagedList, Paginator};
use taigalist::result::LoadResult;

fn page_of(size: usize) -> impl FnOnce(u32) -> std::future::Ready<Result<Vec<CommonTask>, ApiError>> {
    move |page| std::future::ready(Ok(tasks(page as i64 * 1000, size)))
}

#[test]
fn test_paginator_pins_on_short_page() {
    let mut paginator = Paginator::new(20);
    assert_eq!(paginator.next_page(), Some(1));

    paginator.advance(20);
    assert_eq!(paginator.current_page(), 1);
    assert_eq!(paginator.max_page(), None);
    assert_eq!(paginator.next_page(), Some(2));

    paginator.advance(5);
    assert_eq!(paginator.max_page(), Some(2));
    assert!(paginator.is_exhausted());
    assert_eq!(paginator.next_page(), None);
}

#[test]
fn test_zero_page_size_still_pins_on_empty_page() {
    let mut paginator = Paginator::new(0);
    assert_eq!(paginator.page_size(), 1);

    paginator.advance(1);
    assert_eq!(paginator.next_page(), Some(2));
    paginator.advance(0);
    assert!(paginator.is_exhausted());
}

#[test]
fn test_paginator_switch_query() {
    let mut paginator = Paginator::new(20);
    assert!(!paginator.switch_query(""));

    paginator.advance(3);
    assert!(paginator.is_exhausted());

    assert!(paginator.switch_query("bug"));
    assert_eq!(paginator.current_page(), 0);
    assert_eq!(paginator.max_page(), None);
    assert_eq!(paginator.query(), "bug");
    assert!(!paginator.switch_query("bug"));
}

#[tokio::test]
async fn test_full_then_short_page_then_noop() {
    let mut list = PagedList::new(20);

    let items = list.load_next("", page_of(20)).await;
    assert_eq!(items.len(), 20);
    assert_eq!(list.paginator().current_page(), 1);
    assert_eq!(list.paginator().max_page(), None);

    let items = list.load_next("", page_of(5)).await;
    assert_eq!(items.len(), 25);
    assert_eq!(list.paginator().max_page(), Some(2));

    let calls = AtomicU32::new(0);
    let items = list
        .load_next("", |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(tasks(page as i64, 20)))
        })
        .await
        .to_vec();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(items.len(), 25);
    assert_eq!(list.paginator().current_page(), 2);

    match list.result().current() {
        LoadResult::Success(all) => assert_eq!(all.len(), 25),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pages_are_requested_in_order() {
    let mut list = PagedList::new(2);
    let mut seen = Vec::new();

    for _ in 0..4 {
        list.load_next("", |page| {
            seen.push(page);
            let size = if page < 3 { 2 } else { 0 };
            std::future::ready(Ok(tasks(page as i64 * 10, size)))
        })
        .await;
    }

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(list.items().len(), 4);
    assert_eq!(list.paginator().max_page(), Some(3));
}

#[tokio::test]
async fn test_query_change_resets_items_and_cursor() {
    let mut list = PagedList::new(20);
    list.load_next("", page_of(20)).await;
    list.load_next("", page_of(3)).await;
    assert!(list.is_exhausted());

    let mut requested = None;
    let items = list
        .load_next("login", |page| {
            requested = Some(page);
            std::future::ready(Ok(vec![task(1)]))
        })
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(requested, Some(1));
    assert_eq!(list.paginator().query(), "login");
    assert_eq!(list.paginator().current_page(), 1);
}

#[tokio::test]
async fn test_failure_keeps_cursor_for_retry() {
    let mut list = PagedList::new(20);
    list.load_next("", page_of(20)).await;

    let items = list
        .load_next("", |_| std::future::ready(Err(ApiError::Network("timeout".to_string()))))
        .await;
    assert_eq!(items.len(), 20);
    assert_eq!(list.paginator().current_page(), 1);
    assert!(list.result().current().is_error());

    let mut retried = None;
    list.load_next("", |page| {
        retried = Some(page);
        std::future::ready(Ok(tasks(500, 4)))
    })
    .await;
    assert_eq!(retried, Some(2));
    assert_eq!(list.items().len(), 24);
    assert!(list.is_exhausted());
}

#[tokio::test]
async fn test_empty_first_page_pins_immediately() {
    let mut list: PagedList<CommonTask> = PagedList::new(20);
    let items = list.load_next("", page_of(0)).await;

    assert!(items.is_empty());
    assert_eq!(list.paginator().max_page(), Some(1));
    assert_eq!(list.result().current(), LoadResult::Success(vec![]));
}

#[tokio::test]
async fn test_reset_and_refresh() {
    let mut list = PagedList::new(20);
    list.load_next("design", page_of(20)).await;
    list.load_next("design", page_of(20)).await;
    assert_eq!(list.items().len(), 40);

    let mut requested = None;
    list.refresh(|page| {
        requested = Some(page);
        std::future::ready(Ok(tasks(1, 2)))
    })
    .await;
    assert_eq!(requested, Some(1));
    assert_eq!(list.items().len(), 2);
    assert_eq!(list.paginator().query(), "design");

    list.reset();
    assert!(list.items().is_empty());
    assert_eq!(list.paginator().current_page(), 0);
    assert_eq!(list.paginator().query(), "");
    assert!(list.result().current().is_nothing());
}
