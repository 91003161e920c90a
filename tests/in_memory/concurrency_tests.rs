//! In-memory integration tests for moves issued from parallel tasks.

use std::sync::Arc;

use corkboard::item::{
    domain::Column,
    services::{PositionConfig, UpdateItemRequest},
};
use eyre::WrapErr;

use super::helpers::Workspace;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_moves_in_separate_columns_stay_dense() -> eyre::Result<()> {
    let shared = Arc::new(Workspace::with_config(PositionConfig::default()));
    let board = shared.board("Parallel").await?;
    let mut handles = Vec::new();

    for column in Column::ALL {
        let titles: Vec<String> = (1..=6).map(|n| format!("{column}-{n}")).collect();
        let borrowed: Vec<&str> = titles.iter().map(String::as_str).collect();
        let created = shared.fill(board, column, &borrowed).await?;

        let worker: Arc<Workspace> = Arc::clone(&shared);
        handles.push(tokio::spawn(async move {
            for (index, item) in created.iter().enumerate().rev() {
                let destination = u32::try_from(index % 3 + 1)?;
                worker
                    .items
                    .update_item(
                        worker.owner,
                        item.id(),
                        UpdateItemRequest::new().with_order(destination),
                    )
                    .await
                    .wrap_err("parallel reposition")?;
            }
            Ok::<_, eyre::Report>(())
        }));
    }

    for handle in handles {
        handle.await.wrap_err("join mover")??;
    }
    shared.ensure_dense(board).await
}
