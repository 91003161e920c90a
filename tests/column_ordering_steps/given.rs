//! Given steps for column ordering BDD scenarios.

use super::world::{OrderingWorld, run_async, titles};
use corkboard::item::services::CreateItemRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a board owned by the current user")]
fn board_owned_by_user(world: &mut OrderingWorld) -> Result<(), eyre::Report> {
    let board = run_async(world.boards.create_board(world.owner, "Scenario board"))
        .wrap_err("create board for ordering scenario")?;
    world.board = Some(board.id());
    Ok(())
}

#[given(r#"column "{column}" holds "{list}""#)]
fn column_holds(
    world: &mut OrderingWorld,
    column: String,
    list: String,
) -> Result<(), eyre::Report> {
    add_items(world, &column, &list)
}

/// Appends each title in `list` to `column` and records its identifier.
///
/// # Errors
///
/// Returns an error if any item cannot be created.
pub fn add_items(world: &mut OrderingWorld, column: &str, list: &str) -> Result<(), eyre::Report> {
    let board = world.board()?;
    for title in titles(list) {
        let request = CreateItemRequest::new(board, title.clone()).with_column(column);
        let item = run_async(world.items.create_item(world.owner, request))
            .wrap_err_with(|| format!("create item {title}"))?;
        world.ids_by_title.insert(title, item.id());
    }
    Ok(())
}
