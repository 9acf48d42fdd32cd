pub mod league;

pub use league::{LeagueNotFound, LeaguePage};
