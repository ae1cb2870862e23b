use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::error::CatalogError;
use super::models::{NewGame, NewGameHistory, NewUser};
use super::store::CatalogStore;

const USERS: &[(&str, &str, &str, u64)] = &[
    ("JediMaster", "jedi@example.com", "JD", 9845),
    ("PixelPro", "pixel@example.com", "PP", 8732),
    ("GameWizard", "wizard@example.com", "GW", 7914),
    ("NinjaSlayer", "ninja@example.com", "NS", 7156),
    ("RocketPower", "rocket@example.com", "RP", 6873),
];

struct SampleGame {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    secondary: &'static str,
    thumb: &'static str,
    featured: bool,
    new: bool,
    rating: i64,
    plays: u64,
    hidden: bool,
}

macro_rules! sample {
    ($title:literal, $desc:literal, $cat:literal, $sec:literal, $thumb:literal,
     $featured:literal, $new:literal, $rating:literal, $plays:literal) => {
        sample!($title, $desc, $cat, $sec, $thumb, $featured, $new, $rating, $plays, false)
    };
    ($title:literal, $desc:literal, $cat:literal, $sec:literal, $thumb:literal,
     $featured:literal, $new:literal, $rating:literal, $plays:literal, $hidden:literal) => {
        SampleGame {
            title: $title,
            description: $desc,
            category: $cat,
            secondary: $sec,
            thumb: $thumb,
            featured: $featured,
            new: $new,
            rating: $rating,
            plays: $plays,
            hidden: $hidden,
        }
    };
}

const GAMES: &[SampleGame] = &[
    sample!("Alpha Balls", "Dive into this engaging board game and test your skills!",
        "adventure", "arcade", "/games/AlphaBalls/HTML5/icons/icon-512.png", true, true, 5, 3032, true),
    sample!("Basket Slide", "Dive into this entertaining adventure game and test your skills!",
        "action", "casual", "/games/BasketSlide/HTML5/icons/icon-512.png", true, true, 5, 1351),
    sample!("Blocks 8", "Play this entertaining adventure game and test your skills!",
        "sports", "racing", "/games/Blocks8/HTML5/icons/icon-256.png", false, false, 5, 1500),
    sample!("Blocky 360", "Challenge yourself with this challenging board game and test your skills!",
        "racing", "puzzle", "/games/Blocky360/HTML5/icons/icon-256.png", false, true, 5, 2259),
    sample!("Blue Block", "Play this engaging puzzle game and test your skills!",
        "puzzle", "educational", "/games/BlueBlock/HTML5/icons/icon-256.png", false, true, 4, 5540),
    sample!("Bounce", "Bounce your way through challenging levels with physics-based gameplay",
        "action", "arcade", "/games/Bounce/HTML5/icon-256.png", true, false, 4, 5298),
    sample!("Bridges", "Build bridges to connect islands and solve tricky puzzles",
        "strategy", "board", "/games/Bridges/HTML5/icons/icon-512.png", true, false, 4, 3496),
    sample!("Cards 2048", "Enjoy this fun puzzle game and test your skills!",
        "card", "board", "/games/Cards2048/HTML5/icons/icon-512.png", true, false, 4, 1255),
    sample!("Colored Bricks", "Enjoy this challenging casual game and test your skills!",
        "puzzle", "adventure", "/games/ColoredBricks/HTML5/icons/icon-512.png", true, false, 4, 5737),
    sample!("Connect Me", "Experience this entertaining multiplayer game and test your skills!",
        "puzzle", "board", "/games/ConnectMe/HTML5/icons/icon-512.png", false, false, 5, 3568),
    sample!("Cross Path", "Experience this entertaining racing game and test your skills!",
        "racing", "arcade", "/games/CrossPath/HTML5/icons/icon-256.png", false, false, 4, 3929),
    sample!("Dino Bubbles", "Play this exciting educational game and test your skills!",
        "adventure", "sports", "/games/DinoBubbles/HTML5/icon-256.png", true, false, 4, 1406),
    sample!("Donut Box", "Play this addictive arcade game and test your skills!",
        "multiplayer", "casual", "/games/DonutBox/HTML5/icons/icon-512.png", false, true, 5, 2986),
    sample!("Drifter", "Dive into this challenging card game and test your skills!",
        "adventure", "card", "/games/Drifter/HTML5/icon-256.png", false, false, 5, 5255),
    sample!("Emoji Puzzle", "Play this addictive adventure game and test your skills!",
        "arcade", "casual", "/games/EmojiPuzzle/HTML5/icons/icon-512.png", false, false, 4, 2513),
    sample!("Zero 21", "Enjoy this exciting multiplayer game and test your skills!",
        "arcade", "strategy", "/games/Zero21/HTML5/icons/icon-512.png", false, true, 5, 2961),
];

const COMMENTS: &[(u32, u32, &str)] = &[
    (1, 1, "This game is awesome! I love the speed and graphics."),
    (1, 2, "Great gameplay but could use more levels."),
    (2, 3, "Very challenging puzzles, kept me entertained for hours."),
    (3, 4, "The storyline is amazing, can't wait for more content."),
    (4, 5, "Best multiplayer game on the platform!"),
];

/// (game, user, score, hours ago)
const HISTORY: &[(u32, u32, u64, i64)] = &[
    (1, 1, 5280, 2),
    (2, 1, 12450, 24),
    (3, 2, 8760, 3),
    (4, 3, 4500, 5),
    (1, 4, 6200, 12),
];

impl CatalogStore {
    /// A store holding the canonical sample dataset. Every sample account
    /// shares `password_hash`.
    pub fn seeded(password_hash: &str) -> Result<Self, CatalogError> {
        let mut store = Self::new();
        load_sample_data(&mut store, password_hash)?;
        Ok(store)
    }
}

/// Ratings go through the rating mutator so each game's average matches its
/// rating rows.
fn load_sample_data(store: &mut CatalogStore, password_hash: &str) -> Result<(), CatalogError> {
    for &(username, email, avatar, points) in USERS {
        store.create_user(NewUser {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            avatar: Some(avatar.into()),
            points,
        });
    }

    let user_count = USERS.len() as u32;
    for sample in GAMES {
        let game = store.create_game(NewGame {
            title: sample.title.into(),
            description: sample.description.into(),
            category: sample.category.into(),
            secondary_category: Some(sample.secondary.into()),
            thumbnail_url: sample.thumb.into(),
            is_featured: sample.featured,
            is_new: sample.new,
            rating: 0,
            play_count: sample.plays,
            hidden: sample.hidden,
        });
        let rater = (game.id - 1) % user_count + 1;
        store.submit_rating(game.id, rater, sample.rating)?;
    }
    store.submit_rating(1, 2, 4)?;

    for &(game_id, user_id, content) in COMMENTS {
        store.submit_comment(game_id, user_id, content)?;
    }

    let now = OffsetDateTime::now_utc();
    for &(game_id, user_id, score, hours_ago) in HISTORY {
        store.create_game_history(NewGameHistory {
            game_id,
            user_id,
            score,
            played_at: Some(now - Duration::hours(hours_ago)),
        });
    }

    debug!(
        users = USERS.len(),
        games = GAMES.len(),
        "sample catalog loaded"
    );
    Ok(())
}
