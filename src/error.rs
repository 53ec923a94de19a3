use derive_more::From;

pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    /// Timer window where `end <= start`.
    InvalidWindow,
    /// Color string not in `#RRGGBB` form.
    InvalidColorFormat(String),
    /// Surface with a zero dimension.
    DegenerateSurface { width: u32, height: u32 },
    #[from]
    Io(std::io::Error),
    #[from]
    Image(image::ImageError),
    #[from]
    Toml(toml::de::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidWindow => write!(f, "invalid window: end must be after start"),
            Error::InvalidColorFormat(s) => write!(f, "invalid color {s:?}: expected #RRGGBB"),
            Error::DegenerateSurface { width, height } => {
                write!(f, "degenerate surface: {width}x{height}")
            }
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Image(e) => write!(f, "image error: {e}"),
            Error::Toml(e) => write!(f, "config error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Image(e) => Some(e),
            Error::Toml(e) => Some(e),
            _ => None,
        }
    }
}
