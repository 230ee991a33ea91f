use crate::{Family, StatusErr};
use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use std::{path::Path, sync::Arc};

/// Prefix of every favicon data URI.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// File name of the generic (Java) default icon.
pub const DEFAULT_ICON_FILE: &str = "default.png";
/// File name of the Bedrock default icon.
pub const BEDROCK_ICON_FILE: &str = "bedrock.png";

/// A PNG encoded server icon. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    png: Arc<[u8]>,
}

impl Icon {
    /// Encode a decoded image as PNG.
    pub fn from_image(img: &DynamicImage) -> Result<Self, StatusErr> {
        let mut png = Vec::new();

        img.write_to(&mut png, ImageOutputFormat::Png)?;

        Ok(Self { png: png.into() })
    }

    /// Decode any supported image bytes and re-encode them as PNG.
    pub fn from_bytes(bufs: &[u8]) -> Result<Self, StatusErr> {
        Self::from_image(&image::load_from_memory(bufs)?)
    }

    /// Decode a `data:image/png;base64,...` favicon.
    ///
    /// The prefix is optional, some servers send bare base64.
    pub fn from_data_uri(uri: &str) -> Result<Self, StatusErr> {
        let encoded = uri.strip_prefix(DATA_URI_PREFIX).unwrap_or(uri);
        // Line breaks show up in favicons of old server software.
        let encoded = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>();

        Self::from_bytes(&base64::decode(encoded)?)
    }

    /// Load an image file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StatusErr> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|err| {
            StatusErr::DataErr(format!("Can not load icon {}, reason: {}", path.display(), err))
        })?;

        Self::from_image(&img)
    }

    /// Raw PNG bytes, servable as `image/png`.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn to_data_uri(&self) -> String {
        format!("{}{}", DATA_URI_PREFIX, base64::encode(&self.png))
    }

    /// Decode the PNG back into an image.
    pub fn decode(&self) -> Result<DynamicImage, StatusErr> {
        Ok(image::load_from_memory_with_format(&self.png, ImageFormat::Png)?)
    }
}

/// The two default icons, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct IconSet {
    java: Icon,
    java_uri: String,
    bedrock: Icon,
    bedrock_uri: String,
}

impl IconSet {
    pub fn create(java: Icon, bedrock: Icon) -> Self {
        Self {
            java_uri: java.to_data_uri(),
            java,
            bedrock_uri: bedrock.to_data_uri(),
            bedrock,
        }
    }

    /// Load `default.png` and `bedrock.png` from `dir`.
    ///
    /// Fails if either file is missing or not a decodable image; callers
    /// should treat that as fatal.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, StatusErr> {
        let dir = dir.as_ref();
        let icons = Self::create(
            Icon::load(dir.join(DEFAULT_ICON_FILE))?,
            Icon::load(dir.join(BEDROCK_ICON_FILE))?,
        );

        log::info!("loaded default icons from {}", dir.display());
        Ok(icons)
    }

    /// Default icon of a family.
    pub fn default_icon(&self, family: Family) -> &Icon {
        match family {
            Family::Java => &self.java,
            Family::Bedrock => &self.bedrock,
        }
    }

    /// Default icon of a family as a data URI.
    pub fn default_uri(&self, family: Family) -> &str {
        match family {
            Family::Java => &self.java_uri,
            Family::Bedrock => &self.bedrock_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(color: [u8; 4]) -> Icon {
        Icon::from_image(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba(color),
        )))
        .unwrap()
    }

    #[test]
    fn data_uri_round() {
        let icon = solid([200, 10, 10, 255]);
        let uri = icon.to_data_uri();

        assert!(uri.starts_with(DATA_URI_PREFIX));
        assert_eq!(Icon::from_data_uri(&uri).unwrap().decode().unwrap().to_rgba8(),
            icon.decode().unwrap().to_rgba8());
    }

    #[test]
    fn png_signature() {
        assert_eq!(&solid([0, 0, 0, 255]).png()[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Icon::from_data_uri("data:image/png;base64,!!!").is_err());
        assert!(Icon::from_data_uri("data:image/png;base64,AAAA").is_err());
        assert!(Icon::from_bytes(b"not an image").is_err());
    }

    #[test]
    fn missing_dir_fails() {
        assert!(IconSet::load("/nonexistent/icons").is_err());
    }

    #[test]
    fn loads_shipped_icons() {
        let icons = IconSet::load(concat!(env!("CARGO_MANIFEST_DIR"), "/icons")).unwrap();

        for family in [Family::Java, Family::Bedrock] {
            let uri = icons.default_uri(family);
            let icon = Icon::from_data_uri(uri).unwrap();

            assert!(uri.starts_with(DATA_URI_PREFIX));
            assert_eq!(&icon.png()[..8], b"\x89PNG\r\n\x1a\n");
            assert_eq!(
                icon.decode().unwrap().to_rgba8(),
                icons.default_icon(family).decode().unwrap().to_rgba8()
            );
        }
    }

    #[test]
    fn picks_family_default() {
        let java = solid([1, 1, 1, 255]);
        let bedrock = solid([2, 2, 2, 255]);
        let icons = IconSet::create(java.clone(), bedrock.clone());

        assert_eq!(icons.default_icon(Family::Java), &java);
        assert_eq!(icons.default_icon(Family::Bedrock), &bedrock);
        assert_eq!(icons.default_uri(Family::Bedrock), bedrock.to_data_uri());
    }
}
