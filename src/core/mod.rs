pub mod aggregate;
pub mod etl;
pub mod normalize;
pub mod report;
pub mod roster;

pub use crate::domain::model::{League, PlayerRecord, SchoolGrouping, SchoolRanking, TeamRoster};
pub use crate::domain::ports::{Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
