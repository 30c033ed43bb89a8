use crate::value::{Map, Value};

/// Opaque handle to file contents held in memory.
///
/// The handle owns its own map layout through [`FileHandle::to_dict`] and
/// [`FileHandle::from_dict`]; codecs only move that map around.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FileHandle {
    pub path: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl FileHandle {
    pub fn new(path: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            media_type: media_type.into(),
            content,
        }
    }

    /// File name component of `path`.
    pub fn name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path)
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// `path`, `media_type` and hex-encoded `content`.
    pub fn to_dict(&self) -> Map {
        let mut dict = Map::new();
        dict.insert("path".into(), Value::Str(self.path.clone()));
        dict.insert("media_type".into(), Value::Str(self.media_type.clone()));
        dict.insert("content".into(), Value::Str(hex::encode(&self.content)));
        dict
    }

    /// Rebuild from a map produced by [`FileHandle::to_dict`]. `None` when a
    /// field is missing, not a string, or `content` is not valid hex.
    pub fn from_dict(dict: &Map) -> Option<Self> {
        let path = dict.get("path")?.as_str()?;
        let media_type = dict.get("media_type")?.as_str()?;
        let content = hex::decode(dict.get("content")?.as_str()?).ok()?;
        Some(Self::new(path, media_type, content))
    }
}
