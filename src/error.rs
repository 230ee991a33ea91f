/// Uniform error definition for status probing.
#[derive(Debug)]
pub enum StatusErr {
    /// Unintended data, either from a server reply or from caller input.
    DataErr(String),
    /// Internal errors, including type conversion, string analysis, etc.
    InternalErr(String),
    /// Handling errors that occur during sockets.
    IoErr(std::io::Error),
    /// Icon decoding or encoding failed.
    ImageErr(image::ImageError),
}

impl std::fmt::Display for StatusErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusErr::DataErr(str) => write!(f, "{}", str),
            StatusErr::InternalErr(str) => write!(f, "{}", str),
            StatusErr::IoErr(err) => write!(f, "{}", err),
            StatusErr::ImageErr(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StatusErr {}

impl From<std::io::Error> for StatusErr {
    fn from(err: std::io::Error) -> Self {
        StatusErr::IoErr(err)
    }
}

impl From<std::time::SystemTimeError> for StatusErr {
    fn from(err: std::time::SystemTimeError) -> Self {
        StatusErr::InternalErr(err.to_string())
    }
}

impl From<std::num::ParseIntError> for StatusErr {
    fn from(err: std::num::ParseIntError) -> Self {
        StatusErr::DataErr(err.to_string())
    }
}

impl From<std::string::FromUtf16Error> for StatusErr {
    fn from(err: std::string::FromUtf16Error) -> Self {
        StatusErr::DataErr(format!("Can not parse response data to string, reason: {}", err))
    }
}

impl From<serde_json::Error> for StatusErr {
    fn from(err: serde_json::Error) -> Self {
        StatusErr::DataErr(err.to_string())
    }
}

impl From<base64::DecodeError> for StatusErr {
    fn from(err: base64::DecodeError) -> Self {
        StatusErr::DataErr(format!("Invalid base64 icon data, reason: {}", err))
    }
}

impl From<image::ImageError> for StatusErr {
    fn from(err: image::ImageError) -> Self {
        StatusErr::ImageErr(err)
    }
}
