/// Where a chunk kind stores its name inside the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameLayout {
    /// The payload starts with the name string.
    Leading,
    /// A `u32` version field precedes the name string.
    AfterVersion,
}

/// Type identifier of a chunk.
///
/// Tags are plain `u32` values in the file format. A handful of well-known
/// tags carry a human-readable name; everything else is passed through
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkTag(u32);

impl ChunkTag {
    pub const HISTORY: Self = Self(0x0000_7000);
    pub const CAMERA: Self = Self(0x0000_2200);
    pub const SKELETON: Self = Self(0x0000_4500);
    pub const COMPOSITE_DRAWABLE: Self = Self(0x0000_4512);
    pub const MULTI_CONTROLLER: Self = Self(0x0000_48A0);
    pub const MESH: Self = Self(0x0001_0000);
    pub const SHADER: Self = Self(0x0001_1000);
    pub const LIGHT: Self = Self(0x0001_3000);
    pub const TEXTURE: Self = Self(0x0001_9000);
    pub const IMAGE: Self = Self(0x0001_9001);
    pub const SPRITE: Self = Self(0x0001_9005);
    pub const SCENEGRAPH: Self = Self(0x0012_0100);
    pub const ANIMATION: Self = Self(0x0012_1000);

    /// Wrap a raw tag value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw tag value as stored in the file.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Human-readable name for well-known tags.
    pub fn name(self) -> Option<&'static str> {
        KNOWN_TAGS
            .iter()
            .find(|known| known.tag == self)
            .map(|known| known.name)
    }

    /// How the chunk's display name is laid out, if the kind has one.
    pub fn name_layout(self) -> Option<NameLayout> {
        KNOWN_TAGS
            .iter()
            .find(|known| known.tag == self)
            .and_then(|known| known.layout)
    }

    /// Returns `true` for the history/annotation chunk kind.
    pub fn is_history(self) -> bool {
        self == Self::HISTORY
    }
}

impl From<u32> for ChunkTag {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:08X})", self.0),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

struct KnownTag {
    tag: ChunkTag,
    name: &'static str,
    layout: Option<NameLayout>,
}

const KNOWN_TAGS: &[KnownTag] = &[
    KnownTag { tag: ChunkTag::HISTORY, name: "History", layout: None },
    KnownTag { tag: ChunkTag::CAMERA, name: "Camera", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::SKELETON, name: "Skeleton", layout: Some(NameLayout::Leading) },
    KnownTag {
        tag: ChunkTag::COMPOSITE_DRAWABLE,
        name: "Composite Drawable",
        layout: Some(NameLayout::Leading),
    },
    KnownTag {
        tag: ChunkTag::MULTI_CONTROLLER,
        name: "Multi Controller",
        layout: Some(NameLayout::Leading),
    },
    KnownTag { tag: ChunkTag::MESH, name: "Mesh", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::SHADER, name: "Shader", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::LIGHT, name: "Light", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::TEXTURE, name: "Texture", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::IMAGE, name: "Image", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::SPRITE, name: "Sprite", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::SCENEGRAPH, name: "Scenegraph", layout: Some(NameLayout::Leading) },
    KnownTag { tag: ChunkTag::ANIMATION, name: "Animation", layout: Some(NameLayout::AfterVersion) },
];
