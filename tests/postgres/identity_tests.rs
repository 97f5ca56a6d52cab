//! `PostgreSQL` identity repository tests.

use super::helpers::{TestDatabase, database, store_identity};
use mockable::DefaultClock;
use rstest::rstest;
use taskflow::identity::{
    domain::{IdentityDraft, IdentityId, IdentityProfile, NewIdentity, Username},
    ports::{IdentityRepository, IdentityRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identities_round_trip_through_lookups(
    database: Result<Option<TestDatabase>, eyre::Report>,
) -> Result<(), eyre::Report> {
    let Some(db) = database? else {
        return Ok(());
    };
    let alice = store_identity(&db, "alice", false).await?;
    let admin = store_identity(&db, "admin", true).await?;

    let by_id = db
        .identities
        .find_by_id(alice.id())
        .await?
        .ok_or_else(|| eyre::eyre!("alice not found by id"))?;
    eyre::ensure!(by_id.username().as_str() == "alice", "{by_id:?}");
    eyre::ensure!(by_id.email() == "alice@example.com", "{by_id:?}");
    eyre::ensure!(by_id.password_hash().is_some(), "hash should persist");

    let by_name = db
        .identities
        .find_by_username(&Username::new("admin")?)
        .await?
        .ok_or_else(|| eyre::eyre!("admin not found by username"))?;
    eyre::ensure!(by_name.id() == admin.id() && by_name.is_staff(), "{by_name:?}");

    let listed = db.identities.list().await?;
    let ids: Vec<IdentityId> = listed.iter().map(|identity| identity.id()).collect();
    eyre::ensure!(ids == vec![alice.id(), admin.id()], "list order: {ids:?}");

    eyre::ensure!(
        db.identities.find_by_id(IdentityId::new(-1)).await?.is_none(),
        "unknown ids read as missing"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn usernames_are_unique(
    database: Result<Option<TestDatabase>, eyre::Report>,
) -> Result<(), eyre::Report> {
    let Some(db) = database? else {
        return Ok(());
    };
    store_identity(&db, "alice", false).await?;

    let profile = IdentityProfile::parse(IdentityDraft {
        username: "alice".to_owned(),
        is_active: true,
        ..IdentityDraft::default()
    })
    .map_err(|err| eyre::eyre!("invalid profile: {err}"))?;
    let result = db
        .identities
        .create(&NewIdentity::new(profile, None, &DefaultClock))
        .await;

    eyre::ensure!(
        matches!(result, Err(IdentityRepositoryError::DuplicateUsername(_))),
        "expected DuplicateUsername, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_missing_rows(
    database: Result<Option<TestDatabase>, eyre::Report>,
) -> Result<(), eyre::Report> {
    let Some(db) = database? else {
        return Ok(());
    };
    let mut alice = store_identity(&db, "alice", false).await?;
    alice.promote_to_staff();
    db.identities.update(&alice).await?;
    let reloaded = db
        .identities
        .find_by_id(alice.id())
        .await?
        .ok_or_else(|| eyre::eyre!("alice vanished"))?;
    eyre::ensure!(reloaded.is_staff(), "promotion should persist");

    eyre::ensure!(db.identities.delete(alice.id()).await?, "first delete");
    eyre::ensure!(!db.identities.delete(alice.id()).await?, "second delete");
    let missing = db.identities.update(&alice).await;
    eyre::ensure!(
        matches!(missing, Err(IdentityRepositoryError::NotFound(_))),
        "expected NotFound, got {missing:?}"
    );
    Ok(())
}
