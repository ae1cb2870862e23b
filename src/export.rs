//! Pre-baked JSON for the static site: `games.json`, `leaderboard.json` and
//! one `comments/{gameId}.json` per listed game.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::catalog::models::{Comment, Game};
use crate::state::SharedStore;
use crate::users::dto::PublicUser;

pub const LEADERBOARD_SIZE: usize = 10;

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("write {}", path.display()))
}

/// Writes the export into `dir`, returning the number of files written.
pub async fn export_static(store: &SharedStore, dir: &Path) -> anyhow::Result<usize> {
    let (games, leaderboard, comments): (Vec<Game>, Vec<PublicUser>, Vec<(u32, Vec<Comment>)>) = {
        let store = store.read().await;
        let games = store.games();
        let leaderboard = store
            .top_players(LEADERBOARD_SIZE)
            .into_iter()
            .map(PublicUser::from)
            .collect();
        let comments = games
            .iter()
            .map(|g| (g.id, store.comments_by_game(g.id)))
            .collect();
        (games, leaderboard, comments)
    };

    let comments_dir = dir.join("comments");
    tokio::fs::create_dir_all(&comments_dir)
        .await
        .with_context(|| format!("create {}", comments_dir.display()))?;

    write_json(&dir.join("games.json"), &games).await?;
    write_json(&dir.join("leaderboard.json"), &leaderboard).await?;
    for (game_id, rows) in &comments {
        write_json(&comments_dir.join(format!("{game_id}.json")), rows).await?;
    }

    let written = 2 + comments.len();
    info!(dir = %dir.display(), games = games.len(), files = written, "static export written");
    Ok(written)
}
