use std::collections::BTreeMap;

use time::OffsetDateTime;

use super::models::{
    level_for_points, Comment, Game, GameHistory, NewGame, NewGameHistory, NewUser, Rating, User,
};

/// Monotonic id counter starting at 1. Ids are never reused.
#[derive(Debug)]
struct IdSequence(u32);

impl Default for IdSequence {
    fn default() -> Self {
        Self(1)
    }
}

impl IdSequence {
    fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// In-process owner of every catalog collection.
///
/// Collections are keyed by id in a `BTreeMap`, so iteration follows id order,
/// which is also insertion order. Nothing is ever deleted.
#[derive(Debug, Default)]
pub struct CatalogStore {
    pub(super) users: BTreeMap<u32, User>,
    pub(super) games: BTreeMap<u32, Game>,
    pub(super) comments: BTreeMap<u32, Comment>,
    pub(super) ratings: BTreeMap<u32, Rating>,
    pub(super) history: BTreeMap<u32, GameHistory>,
    user_ids: IdSequence,
    game_ids: IdSequence,
    comment_ids: IdSequence,
    rating_ids: IdSequence,
    history_ids: IdSequence,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the user. `level` is derived from the starting points.
    pub fn create_user(&mut self, input: NewUser) -> User {
        let user = User {
            id: self.user_ids.next(),
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            avatar: input.avatar,
            level: level_for_points(input.points),
            points: input.points,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn create_game(&mut self, input: NewGame) -> Game {
        let game = Game {
            id: self.game_ids.next(),
            title: input.title,
            description: input.description,
            category: input.category,
            secondary_category: input.secondary_category,
            thumbnail_url: input.thumbnail_url,
            is_featured: input.is_featured,
            is_new: input.is_new,
            rating: input.rating,
            play_count: input.play_count,
            hidden: input.hidden,
            created_at: OffsetDateTime::now_utc(),
        };
        self.games.insert(game.id, game.clone());
        game
    }

    pub(super) fn create_comment(&mut self, game_id: u32, user_id: u32, content: String) -> Comment {
        let comment = Comment {
            id: self.comment_ids.next(),
            game_id,
            user_id,
            content,
            created_at: OffsetDateTime::now_utc(),
        };
        self.comments.insert(comment.id, comment.clone());
        comment
    }

    pub(super) fn create_rating(&mut self, game_id: u32, user_id: u32, rating: u8) -> Rating {
        let row = Rating {
            id: self.rating_ids.next(),
            game_id,
            user_id,
            rating,
            created_at: OffsetDateTime::now_utc(),
        };
        self.ratings.insert(row.id, row.clone());
        row
    }

    pub fn create_game_history(&mut self, input: NewGameHistory) -> GameHistory {
        let row = GameHistory {
            id: self.history_ids.next(),
            game_id: input.game_id,
            user_id: input.user_id,
            score: input.score,
            played_at: input.played_at.unwrap_or_else(OffsetDateTime::now_utc),
        };
        self.history.insert(row.id, row.clone());
        row
    }

    pub fn user(&self, id: u32) -> Option<&User> {
        self.users.get(&id)
    }

    /// Case-insensitive username lookup.
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        let wanted = username.to_lowercase();
        self.users
            .values()
            .find(|u| u.username.to_lowercase() == wanted)
    }

    pub(super) fn user_mut(&mut self, id: u32) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub(super) fn game_mut(&mut self, id: u32) -> Option<&mut Game> {
        self.games.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, points: u64) -> NewUser {
        NewUser {
            username: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "hash".into(),
            avatar: None,
            points,
        }
    }

    #[test]
    fn ids_are_per_collection_and_start_at_one() {
        let mut store = CatalogStore::new();
        let a = store.create_user(new_user("Alice", 0));
        let b = store.create_user(new_user("Bob", 0));
        let g = store.create_game(NewGame {
            title: "Bounce".into(),
            ..NewGame::default()
        });
        assert_eq!((a.id, b.id, g.id), (1, 2, 1));
    }

    #[test]
    fn create_user_applies_defaults_and_derives_level() {
        let mut store = CatalogStore::new();
        let fresh = store.create_user(new_user("Fresh", 0));
        assert_eq!((fresh.level, fresh.points), (1, 0));

        let veteran = store.create_user(new_user("JediMaster", 9845));
        assert_eq!(veteran.level, 10);
    }

    #[test]
    fn create_game_defaults() {
        let mut store = CatalogStore::new();
        let game = store.create_game(NewGame {
            title: "Cube Jump".into(),
            category: "arcade".into(),
            ..NewGame::default()
        });
        assert!(!game.is_featured && !game.is_new && !game.hidden);
        assert_eq!((game.rating, game.play_count), (0, 0));
    }

    #[test]
    fn history_keeps_supplied_played_at() {
        let mut store = CatalogStore::new();
        let earlier = OffsetDateTime::now_utc() - time::Duration::hours(2);
        let row = store.create_game_history(NewGameHistory {
            game_id: 1,
            user_id: 1,
            score: 5280,
            played_at: Some(earlier),
        });
        assert_eq!(row.played_at, earlier);
    }

    #[test]
    fn username_lookup_ignores_case() {
        let mut store = CatalogStore::new();
        store.create_user(new_user("PixelPro", 0));
        assert!(store.user_by_username("pixelpro").is_some());
        assert!(store.user_by_username("PIXELPRO").is_some());
        assert!(store.user_by_username("pixel").is_none());
    }
}
