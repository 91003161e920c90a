//! Then steps for column ordering BDD scenarios.

use super::world::{OrderingWorld, run_async, titles};
use corkboard::item::{
    domain::{Column, DELETED_ORDER, Item},
    ports::ItemRepository,
    services::ErrorKind,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(r#"column "{column}" lists "{list}""#)]
fn column_lists(world: &OrderingWorld, column: String, list: String) -> Result<(), eyre::Report> {
    let column = Column::try_from(column.as_str())
        .map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))?;
    let columns = run_async(world.items.list_items(world.owner, world.board()?))
        .wrap_err("list items")?;

    let actual: Vec<String> = columns
        .get(&column)
        .map(|items| {
            items
                .iter()
                .map(|item| item.title().as_str().to_owned())
                .collect()
        })
        .unwrap_or_default();
    let expected = titles(&list);

    if actual != expected {
        return Err(eyre::eyre!(
            "column {column} holds {actual:?}, expected {expected:?}"
        ));
    }
    Ok(())
}

#[then("every column is densely numbered")]
fn every_column_dense(world: &OrderingWorld) -> Result<(), eyre::Report> {
    let columns = run_async(world.items.list_items(world.owner, world.board()?))
        .wrap_err("list items")?;

    for (column, items) in &columns {
        let orders: Vec<u32> = items.iter().map(Item::order).collect();
        let expected: Vec<u32> = (1..=u32::try_from(items.len())?).collect();
        if orders != expected {
            return Err(eyre::eyre!("column {column} has orders {orders:?}"));
        }
    }
    Ok(())
}

#[then(r#"item "{title}" is a tombstone"#)]
fn item_is_tombstone(world: &OrderingWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.item_id(&title)?;
    let stored = run_async(world.store.find_by_id(id))
        .wrap_err("find tombstone")?
        .ok_or_else(|| eyre::eyre!("item {title} vanished from the store"))?;

    if !stored.is_deleted() || stored.order() != DELETED_ORDER {
        return Err(eyre::eyre!(
            "expected a tombstone at order {DELETED_ORDER}, found {stored:?}"
        ));
    }
    Ok(())
}

#[then("the move is rejected as an invalid transition")]
fn move_rejected(world: &OrderingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    match result {
        Err(err) if err.kind() == ErrorKind::InvalidTransition && err.status_code() == 400 => {
            Ok(())
        }
        other => Err(eyre::eyre!("expected an invalid transition, got {other:?}")),
    }
}
