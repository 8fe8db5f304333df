pub mod google_news;
pub mod vader;

pub use google_news::GoogleNewsFeed;
pub use vader::VaderSentimentModel;
