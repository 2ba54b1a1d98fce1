use failure::Fail;

#[derive(Debug, Fail)]
pub enum RemindMeError {
    #[fail(display = "Unable to read intent catalog from '{}'", _0)]
    CatalogLoad(String),
    #[fail(display = "Unable to read entity annotations from '{}'", _0)]
    LexiconLoad(String),
    #[fail(display = "Unable to read configuration from '{}'", _0)]
    ConfigLoad(String),
    #[fail(display = "Duplicate intent tag: '{}'", _0)]
    DuplicateIntent(String),
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
