pub mod fetch;
pub mod leaderboard;
pub mod lenient;
pub mod load;
pub mod model;
pub mod output;
pub mod parser;
pub mod tier;
