//! Paginated task listings over the in-memory store.

use super::helpers::{Stack, stack};
use rstest::rstest;
use taskflow::task::{domain::PageRequest, services::TaskServiceError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pages_are_newest_first_and_bounded(stack: Stack) -> Result<(), eyre::Report> {
    let alice = stack.sign_up("alice").await?;
    for index in 1..=12 {
        stack
            .task_service
            .create(&alice, &format!("Task number {index}"))
            .await?;
    }

    let first = stack
        .task_service
        .list_page(&alice, PageRequest::new(1, 10))
        .await?;
    eyre::ensure!(first.total() == 12, "total should count every task");
    eyre::ensure!(first.items().len() == 10, "first page should be full");
    eyre::ensure!(first.has_next() && !first.has_previous(), "first page links");
    let newest = first
        .items()
        .first()
        .ok_or_else(|| eyre::eyre!("first page is empty"))?;
    eyre::ensure!(
        newest.description().as_str() == "Task number 12",
        "newest task should come first, got {:?}",
        newest.description().as_str()
    );

    let second = stack
        .task_service
        .list_page(&alice, PageRequest::new(2, 10))
        .await?;
    eyre::ensure!(second.items().len() == 2, "second page holds the rest");
    eyre::ensure!(!second.has_next() && second.has_previous(), "second page links");

    let beyond = stack
        .task_service
        .list_page(&alice, PageRequest::new(3, 10))
        .await;
    eyre::ensure!(
        matches!(beyond, Err(TaskServiceError::PageOutOfRange(3))),
        "third page should be out of range, got {beyond:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_page_of_empty_listing_is_available(stack: Stack) -> Result<(), eyre::Report> {
    let bob = stack.sign_up("bob").await?;
    let page = stack
        .task_service
        .list_page(&bob, PageRequest::new(1, 10))
        .await?;
    eyre::ensure!(page.total() == 0 && page.items().is_empty(), "empty page");
    eyre::ensure!(!page.has_next() && !page.has_previous(), "no links");
    Ok(())
}
