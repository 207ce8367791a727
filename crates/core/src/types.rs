/// User ids are sequential integers handed out by the user store.
pub type DbId = i64;
