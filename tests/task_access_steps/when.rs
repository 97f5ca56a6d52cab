//! When steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskflow::task::domain::TaskChanges;

#[when(r#""{username}" lists tasks"#)]
fn member_lists_tasks(world: &mut TaskAccessWorld, username: String) -> Result<(), eyre::Report> {
    let caller = world.caller(&username)?;
    world.last_listing = run_async(world.service.list(&caller)).wrap_err("list tasks")?;
    Ok(())
}

#[when(r#""{username}" marks the task as done"#)]
fn member_marks_task_done(
    world: &mut TaskAccessWorld,
    username: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&username)?;
    let task_id = world.task()?.id();
    world.last_result = Some(run_async(world.service.mark_done(&caller, task_id)));
    Ok(())
}

#[when(r#""{username}" updates the task to "{description}" and marks it done"#)]
fn member_updates_task(
    world: &mut TaskAccessWorld,
    username: String,
    description: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&username)?;
    let task_id = world.task()?.id();
    let changes = TaskChanges {
        description: Some(description),
        done: Some(true),
    };
    world.last_result = Some(run_async(world.service.update(&caller, task_id, changes)));
    Ok(())
}
