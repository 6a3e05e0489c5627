pub mod prelude;

pub mod matches;
pub mod player_match_participations;
pub mod player_match_stats;
pub mod player_season_details;
pub mod player_total_stats;
pub mod players;
pub mod season_stats;
pub mod seasons;
pub mod teams;
pub mod users;
