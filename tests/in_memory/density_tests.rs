//! In-memory integration tests for column density under operation sequences.

use corkboard::item::{
    domain::{Column, Placement},
    services::UpdateItemRequest,
};
use rstest::rstest;

use super::helpers::{Workspace, workspace};

#[rstest]
#[case(1, vec!["e", "a", "b", "c", "d"])]
#[case(3, vec!["a", "b", "e", "c", "d"])]
#[case(5, vec!["a", "b", "c", "d", "e"])]
#[tokio::test(flavor = "multi_thread")]
async fn moving_the_last_item_forward(
    workspace: Workspace,
    #[case] destination: u32,
    #[case] expected: Vec<&str>,
) -> eyre::Result<()> {
    let board = workspace.board("Ordering").await?;
    let created = workspace
        .fill(board, Column::Todo, &["a", "b", "c", "d", "e"])
        .await?;
    let last = created.last().ok_or_else(|| eyre::eyre!("missing item"))?;

    workspace
        .items
        .update_item(
            workspace.owner,
            last.id(),
            UpdateItemRequest::new().with_order(destination),
        )
        .await?;

    workspace.ensure_titles(board, Column::Todo, &expected).await?;
    workspace.ensure_dense(board).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn walking_an_item_through_every_column(workspace: Workspace) -> eyre::Result<()> {
    let board = workspace.board("Pipeline").await?;
    for column in Column::ALL {
        let titles = [format!("{column}-1"), format!("{column}-2")];
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        workspace.fill(board, column, &titles).await?;
    }
    let walker = workspace
        .fill(board, Column::Backlog, &["walker"])
        .await?
        .pop()
        .ok_or_else(|| eyre::eyre!("missing item"))?;

    for (column, order) in [(Column::Todo, 1), (Column::Doing, 3), (Column::Done, 2)] {
        let moved = workspace
            .items
            .update_item(
                workspace.owner,
                walker.id(),
                UpdateItemRequest::new()
                    .with_column(column.as_str())
                    .with_order(order),
            )
            .await?;
        eyre::ensure!(
            moved.placement() == Some(Placement::new(column, order)),
            "walker landed at {:?}",
            moved.placement()
        );
        workspace.ensure_dense(board).await?;
    }

    workspace.ensure_titles(board, Column::Backlog, &["backlog-1", "backlog-2"]).await?;
    workspace.ensure_titles(board, Column::Todo, &["todo-1", "todo-2"]).await?;
    workspace.ensure_titles(board, Column::Doing, &["doing-1", "doing-2"]).await?;
    workspace.ensure_titles(board, Column::Done, &["done-1", "walker", "done-2"]).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn draining_a_column_from_the_middle(workspace: Workspace) -> eyre::Result<()> {
    let board = workspace.board("Drain").await?;
    let mut remaining = workspace
        .fill(board, Column::Doing, &["a", "b", "c", "d", "e", "f"])
        .await?;

    while !remaining.is_empty() {
        let victim = remaining.remove(remaining.len() / 2);
        workspace.items.delete_item(workspace.owner, victim.id()).await?;
        workspace.ensure_dense(board).await?;

        let expected: Vec<String> = remaining
            .iter()
            .map(|item| item.title().as_str().to_owned())
            .collect();
        let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
        workspace.ensure_titles(board, Column::Doing, &expected).await?;
    }
    Ok(())
}
