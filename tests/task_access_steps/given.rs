//! Given steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a member named "{username}""#)]
fn member_named(world: &mut TaskAccessWorld, username: String) -> Result<(), eyre::Report> {
    world.add_member(&username, false)
}

#[given(r#"a staff member named "{username}""#)]
fn staff_member_named(world: &mut TaskAccessWorld, username: String) -> Result<(), eyre::Report> {
    world.add_member(&username, true)
}

#[given(r#""{username}" has created a task "{description}""#)]
fn member_created_task(
    world: &mut TaskAccessWorld,
    username: String,
    description: String,
) -> Result<(), eyre::Report> {
    let caller = world.caller(&username)?;
    let task = run_async(world.service.create(&caller, &description))
        .wrap_err("create task in scenario setup")?;
    world.current_task = Some(task);
    Ok(())
}
