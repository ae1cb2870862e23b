//! Read-only views over the store. Every list of games skips hidden entries;
//! only [`CatalogStore::game`] can reach a hidden game.

use std::cmp::Reverse;

use super::models::{Comment, Game, GameHistory, Rating, User};
use super::store::CatalogStore;

impl CatalogStore {
    fn listed_games(&self) -> impl Iterator<Item = &Game> {
        self.games.values().filter(|g| !g.hidden)
    }

    pub fn game(&self, id: u32) -> Option<&Game> {
        self.games.get(&id)
    }

    pub fn games(&self) -> Vec<Game> {
        self.listed_games().cloned().collect()
    }

    pub fn games_by_category(&self, category: &str) -> Vec<Game> {
        self.listed_games()
            .filter(|g| g.in_category(category))
            .cloned()
            .collect()
    }

    pub fn featured_games(&self) -> Vec<Game> {
        self.listed_games().filter(|g| g.is_featured).cloned().collect()
    }

    pub fn new_games(&self) -> Vec<Game> {
        self.listed_games().filter(|g| g.is_new).cloned().collect()
    }

    /// Most played first; equal counts keep insertion order.
    pub fn popular_games(&self, limit: usize) -> Vec<Game> {
        let mut games: Vec<Game> = self.listed_games().cloned().collect();
        games.sort_by_key(|g| Reverse(g.play_count));
        games.truncate(limit);
        games
    }

    /// Case-insensitive substring search over title and description.
    pub fn search_games(&self, term: &str) -> Vec<Game> {
        self.listed_games()
            .filter(|g| g.matches_text(term))
            .cloned()
            .collect()
    }

    /// Leaderboard: highest points first, ties in insertion order.
    pub fn top_players(&self, limit: usize) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| Reverse(u.points));
        users.truncate(limit);
        users
    }

    /// Newest first.
    pub fn comments_by_game(&self, game_id: u32) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| c.game_id == game_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| Reverse((c.created_at, c.id)));
        comments
    }

    pub fn ratings_by_game(&self, game_id: u32) -> Vec<Rating> {
        self.ratings
            .values()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect()
    }

    /// Newest first by `played_at`.
    pub fn history_by_user(&self, user_id: u32) -> Vec<GameHistory> {
        let mut rows: Vec<GameHistory> = self
            .history
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|h| Reverse((h.played_at, h.id)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;
    use crate::catalog::models::{NewGame, NewGameHistory, NewUser};

    fn add_game(store: &mut CatalogStore, title: &str, category: &str, secondary: Option<&str>) -> Game {
        store.create_game(NewGame {
            title: title.into(),
            description: format!("Play {title} and test your skills!"),
            category: category.into(),
            secondary_category: secondary.map(Into::into),
            thumbnail_url: format!("/games/{title}/icon.png"),
            ..NewGame::default()
        })
    }

    fn add_user(store: &mut CatalogStore, name: &str, points: u64) -> User {
        store.create_user(NewUser {
            username: name.into(),
            email: format!("{name}@example.com"),
            password_hash: String::new(),
            avatar: None,
            points,
        })
    }

    #[test]
    fn hidden_games_are_excluded_from_every_list_but_fetchable() {
        let mut store = CatalogStore::new();
        let hidden = store.create_game(NewGame {
            title: "Alpha Balls".into(),
            category: "puzzle".into(),
            is_featured: true,
            is_new: true,
            play_count: 9_999,
            hidden: true,
            ..NewGame::default()
        });
        add_game(&mut store, "Bridges", "puzzle", None);

        assert!(store.games().iter().all(|g| g.id != hidden.id));
        assert!(store.games_by_category("puzzle").iter().all(|g| g.id != hidden.id));
        assert!(store.featured_games().is_empty());
        assert!(store.new_games().is_empty());
        assert!(store.popular_games(10).iter().all(|g| g.id != hidden.id));
        assert!(store.search_games("alpha").is_empty());
        assert_eq!(store.game(hidden.id).map(|g| g.hidden), Some(true));
    }

    #[test]
    fn category_filter_is_union_of_both_tags() {
        let mut store = CatalogStore::new();
        add_game(&mut store, "Blue Block", "Puzzle", Some("educational"));
        add_game(&mut store, "Blocky 360", "racing", Some("puzzle"));
        add_game(&mut store, "Drifter", "racing", Some("arcade"));

        let titles: Vec<String> = store
            .games_by_category("puzzle")
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Blue Block", "Blocky 360"]);
    }

    #[test]
    fn popular_games_sorted_desc_and_truncated() {
        let mut store = CatalogStore::new();
        for (title, plays) in [("a", 10), ("b", 50), ("c", 30), ("d", 5)] {
            store.create_game(NewGame {
                title: title.into(),
                play_count: plays,
                ..NewGame::default()
            });
        }
        let counts: Vec<u64> = store.popular_games(3).iter().map(|g| g.play_count).collect();
        assert_eq!(counts, vec![50, 30, 10]);
    }

    #[test]
    fn popular_games_ties_keep_insertion_order() {
        let mut store = CatalogStore::new();
        for title in ["first", "second", "third"] {
            store.create_game(NewGame {
                title: title.into(),
                play_count: 7,
                ..NewGame::default()
            });
        }
        let titles: Vec<String> = store.popular_games(2).into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn leaderboard_orders_by_points() {
        let mut store = CatalogStore::new();
        add_user(&mut store, "low", 100);
        add_user(&mut store, "high", 9845);
        add_user(&mut store, "mid", 4000);
        let names: Vec<String> = store.top_players(2).into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["high", "mid"]);
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let mut store = CatalogStore::new();
        add_game(&mut store, "Happy Glass", "puzzle", None);
        add_game(&mut store, "Drifter", "racing", None);
        assert_eq!(store.search_games("GLASS").len(), 1);
        assert_eq!(store.search_games("skills").len(), 2);
        assert!(store.search_games("chess").is_empty());
    }

    #[test]
    fn comments_are_newest_first_for_one_game() {
        let mut store = CatalogStore::new();
        let first = store.create_comment(1, 1, "first".into());
        let second = store.create_comment(1, 2, "second".into());
        store.create_comment(2, 1, "other game".into());

        let ids: Vec<u32> = store.comments_by_game(1).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn history_is_newest_first_for_one_user() {
        let mut store = CatalogStore::new();
        let now = OffsetDateTime::now_utc();
        for (hours, user_id) in [(24, 1), (2, 1), (3, 2)] {
            store.create_game_history(NewGameHistory {
                game_id: 1,
                user_id,
                score: 100,
                played_at: Some(now - Duration::hours(hours)),
            });
        }
        let rows = store.history_by_user(1);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].played_at > rows[1].played_at);
    }
}
