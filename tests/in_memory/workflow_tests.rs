//! End-to-end workflows across registration, authentication, and tasks.

use super::helpers::{PASSWORD, Stack, stack};
use rstest::rstest;
use taskflow::auth::AuthError;
use taskflow::identity::domain::IdentityDraft;
use taskflow::task::{
    domain::{TaskChanges, TaskScope},
    ports::TaskRepository,
    services::TaskServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_members_manage_only_their_own_tasks(stack: Stack) -> Result<(), eyre::Report> {
    let alice = stack.sign_up("alice").await?;
    let bob = stack.sign_up("bob").await?;

    let milk = stack.task_service.create(&alice, "Buy milk").await?;
    stack.task_service.create(&bob, "Walk the dog").await?;

    let alice_tasks = stack.task_service.list(&alice).await?;
    eyre::ensure!(alice_tasks.len() == 1, "alice should see one task");
    eyre::ensure!(
        alice_tasks.iter().all(|task| task.owner_id() == alice.id()),
        "alice should only see her own tasks"
    );

    let denied = stack
        .task_service
        .update(
            &bob,
            milk.id(),
            TaskChanges {
                done: Some(true),
                ..TaskChanges::default()
            },
        )
        .await;
    eyre::ensure!(
        matches!(denied, Err(TaskServiceError::NotFound(_))),
        "bob should not reach alice's task, got {denied:?}"
    );

    let done = stack.task_service.mark_done(&alice, milk.id()).await?;
    eyre::ensure!(done.is_done(), "alice can complete her own task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrapped_staff_sees_and_removes_everything(stack: Stack) -> Result<(), eyre::Report> {
    stack.administration.ensure_staff("admin", PASSWORD).await?;
    let admin = stack.log_in("admin").await?;
    eyre::ensure!(admin.is_staff(), "bootstrapped account should be staff");

    let alice = stack.sign_up("alice").await?;
    let pair = stack.auth.obtain_pair("alice", PASSWORD).await?;
    stack.task_service.create(&alice, "Buy milk").await?;
    stack.task_service.create(&alice, "Pay rent").await?;

    let everything = stack.task_service.list(&admin).await?;
    eyre::ensure!(everything.len() == 2, "staff should see all tasks");

    stack.administration.delete(&admin, alice.id()).await?;

    let remaining = stack.tasks.count(&TaskScope::All).await?;
    eyre::ensure!(remaining == 0, "deleting alice should delete her tasks");
    let rejected = stack.auth.authenticate(&pair.access.token).await;
    eyre::ensure!(
        matches!(rejected, Err(AuthError::InvalidToken)),
        "tokens of deleted accounts should be rejected, got {rejected:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demoted_staff_lose_visibility_on_next_request(stack: Stack) -> Result<(), eyre::Report> {
    stack.administration.ensure_staff("root", PASSWORD).await?;
    stack.administration.ensure_staff("admin", PASSWORD).await?;
    let root = stack.log_in("root").await?;
    let pair = stack.auth.obtain_pair("admin", PASSWORD).await?;
    let alice = stack.sign_up("alice").await?;
    stack.task_service.create(&alice, "Buy milk").await?;

    let admin = stack.auth.authenticate(&pair.access.token).await?;
    let demoted = stack
        .administration
        .update(
            &root,
            admin.id(),
            IdentityDraft {
                username: "admin".to_owned(),
                is_staff: false,
                is_active: true,
                ..IdentityDraft::default()
            },
        )
        .await?;
    eyre::ensure!(!demoted.is_staff(), "update should clear the staff flag");

    let reloaded = stack.auth.authenticate(&pair.access.token).await?;
    let visible = stack.task_service.list(&reloaded).await?;
    eyre::ensure!(visible.is_empty(), "demoted account sees only its own tasks");
    Ok(())
}
