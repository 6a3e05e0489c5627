pub use super::matches::Entity as Matches;
pub use super::player_match_participations::Entity as PlayerMatchParticipations;
pub use super::player_match_stats::Entity as PlayerMatchStats;
pub use super::player_season_details::Entity as PlayerSeasonDetails;
pub use super::player_total_stats::Entity as PlayerTotalStats;
pub use super::players::Entity as Players;
pub use super::season_stats::Entity as SeasonStats;
pub use super::seasons::Entity as Seasons;
pub use super::teams::Entity as Teams;
pub use super::users::Entity as Users;
