/// Destination classification for cache entries.
///
/// Maps a real file extension to the game subdirectory the file belongs in.
/// Unrecognized extensions are an ordinary `None`, handled by the caller as
/// a skip-and-retain branch rather than an abort.
///
/// # Examples
///
/// ```
/// use utcachex::category::Category;
///
/// assert_eq!(Category::from_extension(".utx"), Some(Category::Textures));
/// assert_eq!(Category::Textures.dir_name(), "Textures");
/// assert_eq!(Category::from_extension(".xyz"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Animation packages (`.ukx`)
    Animations,
    /// Map files (`.ut2`)
    Maps,
    /// Music tracks (`.ogg`)
    Music,
    /// Sound packages (`.uax`)
    Sounds,
    /// Static mesh packages (`.usx`)
    StaticMeshes,
    /// Code packages (`.u`)
    System,
    /// Texture packages (`.utx`)
    Textures,
}

impl Category {
    /// Resolves a real extension (leading dot included) to its category.
    pub fn from_extension(ext: &str) -> Option<Category> {
        match ext {
            ".ukx" => Some(Category::Animations),
            ".ut2" => Some(Category::Maps),
            ".ogg" => Some(Category::Music),
            ".uax" => Some(Category::Sounds),
            ".usx" => Some(Category::StaticMeshes),
            ".u" => Some(Category::System),
            ".utx" => Some(Category::Textures),
            _ => None,
        }
    }

    /// Returns the subdirectory name for this category under the target
    /// directory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Animations => "Animations",
            Category::Maps => "Maps",
            Category::Music => "Music",
            Category::Sounds => "Sounds",
            Category::StaticMeshes => "StaticMeshes",
            Category::System => "System",
            Category::Textures => "Textures",
        }
    }
}
