//! In-memory integration tests for the item lifecycle across both services.

use corkboard::item::{
    domain::Column,
    services::{CreateItemRequest, ErrorKind, PositionConfig, UpdateItemRequest},
};
use rstest::rstest;

use super::helpers::{Workspace, workspace};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn scenario_walkthrough_keeps_columns_dense(workspace: Workspace) -> eyre::Result<()> {
    let board = workspace.board("Release").await?;
    workspace.fill(board, Column::Todo, &["a", "b", "c", "d"]).await?;
    let doing = workspace.fill(board, Column::Doing, &["x"]).await?;
    let moving = doing.first().ok_or_else(|| eyre::eyre!("missing item"))?;

    workspace
        .items
        .update_item(
            workspace.owner,
            moving.id(),
            UpdateItemRequest::new().with_column("todo").with_order(2),
        )
        .await?;

    workspace.ensure_titles(board, Column::Todo, &["a", "x", "b", "c", "d"]).await?;
    workspace.ensure_titles(board, Column::Doing, &[]).await?;
    workspace.ensure_dense(board).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_then_creating_reuses_the_tail_slot(workspace: Workspace) -> eyre::Result<()> {
    let board = workspace.board("Chores").await?;
    let created = workspace
        .fill(board, Column::Backlog, &["dishes", "laundry", "bins"])
        .await?;
    let first = created.first().ok_or_else(|| eyre::eyre!("missing item"))?;

    let tombstone = workspace.items.delete_item(workspace.owner, first.id()).await?;
    let appended = workspace
        .items
        .create_item(workspace.owner, CreateItemRequest::new(board, "hoover"))
        .await?;

    eyre::ensure!(tombstone.is_deleted(), "delete should return a tombstone");
    eyre::ensure!(appended.order() == 3, "expected order 3, got {}", appended.order());
    workspace.ensure_titles(board, Column::Backlog, &["laundry", "bins", "hoover"]).await?;
    workspace.ensure_dense(board).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_of_one_owner_are_isolated(workspace: Workspace) -> eyre::Result<()> {
    let home = workspace.board("Home").await?;
    let work = workspace.board("Work").await?;
    let home_items = workspace.fill(home, Column::Todo, &["h1", "h2"]).await?;
    workspace.fill(work, Column::Todo, &["w1", "w2", "w3"]).await?;
    let first = home_items.first().ok_or_else(|| eyre::eyre!("missing item"))?;

    workspace.items.delete_item(workspace.owner, first.id()).await?;

    workspace.ensure_titles(home, Column::Todo, &["h2"]).await?;
    workspace.ensure_titles(work, Column::Todo, &["w1", "w2", "w3"]).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_reports_400_and_keeps_the_column() -> eyre::Result<()> {
    let workspace = Workspace::with_config(PositionConfig::default());
    let board = workspace.board("Strict").await?;
    let created = workspace.fill(board, Column::Doing, &["a", "b"]).await?;
    let first = created.first().ok_or_else(|| eyre::eyre!("missing item"))?;

    let err = workspace
        .items
        .update_item(
            workspace.owner,
            first.id(),
            UpdateItemRequest::new().with_column("done").with_order(3),
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("move should be rejected"))?;

    eyre::ensure!(err.kind() == ErrorKind::InvalidTransition, "unexpected error: {err}");
    eyre::ensure!(err.status_code() == 400, "unexpected status for {err}");
    workspace.ensure_titles(board, Column::Doing, &["a", "b"]).await?;
    workspace.ensure_titles(board, Column::Done, &[]).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clamping_workspace_pins_moves_to_the_column_end() -> eyre::Result<()> {
    let workspace = Workspace::with_config(PositionConfig::clamping());
    let board = workspace.board("Lenient").await?;
    workspace.fill(board, Column::Done, &["d1"]).await?;
    let todo = workspace.fill(board, Column::Todo, &["t1", "t2"]).await?;
    let first = todo.first().ok_or_else(|| eyre::eyre!("missing item"))?;

    let moved = workspace
        .items
        .update_item(
            workspace.owner,
            first.id(),
            UpdateItemRequest::new().with_column("done").with_order(40),
        )
        .await?;

    eyre::ensure!(moved.order() == 2, "expected order 2, got {}", moved.order());
    workspace.ensure_titles(board, Column::Done, &["d1", "t1"]).await?;
    workspace.ensure_dense(board).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_board_hides_its_items(workspace: Workspace) -> eyre::Result<()> {
    let board = workspace.board("Temporary").await?;
    workspace.fill(board, Column::Todo, &["a"]).await?;
    workspace.boards.delete_board(workspace.owner, board).await?;

    let err = workspace
        .items
        .list_items(workspace.owner, board)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("listing should fail"))?;

    eyre::ensure!(err.kind() == ErrorKind::NotFound, "unexpected error: {err}");
    eyre::ensure!(err.status_code() == 404, "unexpected status for {err}");
    Ok(())
}
