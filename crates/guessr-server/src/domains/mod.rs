pub mod donations;
pub mod errors;
pub mod usernames;
