mod annotations;
mod intents;

pub use self::annotations::*;
pub use self::intents::*;
