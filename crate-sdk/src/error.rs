#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not connected")]
    NotConnected,

    #[error("nickname not known yet")]
    NicknameUnknown,

    /// the bounded outbound queue is full; the command was not buffered
    #[error("outbound queue full")]
    QueueFull,

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(#[from] figment::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
