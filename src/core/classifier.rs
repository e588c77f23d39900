//! File classification: decide which repository entries are renderable text.
//!
//! [`classify`] is a total, pure function mapping a path and size to a
//! [`Category`]. It never touches the network or the filesystem, which keeps
//! the classification pass synchronous and trivially testable.
//!
//! # Public API
//! - [`classify`]: Map (path, size) to a [`Category`]
//! - [`Category`] / [`Bucket`]: Classification outcome types
//! - [`file_extension`]: Lowercased extension of a path's basename
//!
//! # Rule order (first match wins)
//! 1. Basename on the explicit ignore list (VCS metadata, lockfiles, license
//!    boilerplate, OS artifacts)
//! 2. Any directory segment on the ignored-directory list
//! 3. Over the size threshold (notebooks exempt)
//! 4. Known binary extension
//! 5. Known text extension
//! 6. Extensionless but text-like basename
//! 7. Unknown extension: assumed text (permissive default)

/// Maximum size for a renderable file. Larger files are skipped, except
/// Jupyter notebooks which embed outputs and routinely exceed it.
pub const MAX_TEXT_FILE_SIZE: u64 = 100 * 1024;

/// Basenames that are never rendered, compared case-insensitively.
const IGNORED_BASENAMES: &[&str] = &[
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
    "license",
    "license.md",
    "license.txt",
    "licence",
    "licence.md",
    "licence.txt",
    "contributors.md",
    "contributing.md",
    "code_of_conduct.md",
    "security.md",
    "funding.yml",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "pipfile.lock",
    ".ds_store",
    "thumbs.db",
    "desktop.ini",
];

/// Directory names whose contents are never rendered, wherever they appear.
const IGNORED_DIR_SEGMENTS: &[&str] = &[
    ".git",
    ".github",
    ".vscode",
    ".idea",
    ".vs",
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "vendor",
    "deps",
    "target",
    "build",
    "dist",
    ".devcontainer",
    ".devenv",
    ".anthropic",
    ".openai",
];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "svg", "ico", "webp", "pdf", "doc", "docx", "xls", "xlsx",
    "ppt", "pptx", "zip", "tar", "gz", "rar", "7z", "exe", "dmg", "pkg", "deb", "rpm", "mp3",
    "mp4", "avi", "mov", "wav", "flac", "ttf", "otf", "woff", "woff2", "eot",
];

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "asciidoc", "js", "ts", "jsx", "tsx", "vue", "svelte", "py",
    "rb", "php", "go", "rs", "java", "kt", "scala", "c", "cpp", "cc", "cxx", "h", "hpp", "hxx",
    "cs", "fs", "vb", "html", "htm", "xml", "xhtml", "css", "scss", "sass", "less", "stylus",
    "json", "yaml", "yml", "toml", "ini", "conf", "config", "sh", "bash", "zsh", "fish", "ps1",
    "bat", "cmd", "sql", "graphql", "gql", "r", "m", "swift", "dart", "elm", "clj", "cljs",
    "dockerfile", "makefile", "gradle", "cmake", "ipynb", "rmd", "tex", "bib", "editorconfig",
    "prettierrc", "eslintrc",
];

/// Extensionless basenames containing one of these substrings are treated as text.
const TEXT_BASENAME_HINTS: &[&str] = &["readme", "makefile", "dockerfile", "changelog", "todo"];

/// Non-included classification outcomes, plus the renderable `Text` bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Repository metadata, lockfiles, boilerplate: excluded and unreported in trees
    Ignored,
    /// Known binary format: excluded, reported in the binary bucket
    Binary,
    /// Over the size threshold: excluded, reported in the large bucket
    TooLarge,
    /// Renderable text: included
    Text,
}

/// Classification outcome for a single repository entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub included: bool,
    pub bucket: Bucket,
}

impl Category {
    fn excluded(bucket: Bucket) -> Self {
        Self {
            included: false,
            bucket,
        }
    }

    fn text() -> Self {
        Self {
            included: true,
            bucket: Bucket::Text,
        }
    }
}

/// Lowercased extension of a path's basename, or empty when there is none.
///
/// A leading dot does not start an extension, so `.gitignore` has no
/// extension while `archive.tar.gz` has extension `gz`.
pub fn file_extension(path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or(path);
    match basename.rfind('.') {
        Some(pos) if pos > 0 => basename[pos + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Classify a repository entry by path and size.
///
/// Total over all inputs: never panics, never performs I/O.
pub fn classify(path: &str, size: u64) -> Category {
    let basename = path.rsplit('/').next().unwrap_or(path).to_lowercase();

    if IGNORED_BASENAMES.contains(&basename.as_str()) {
        return Category::excluded(Bucket::Ignored);
    }

    // Every path component except the basename is a directory name
    let mut segments = path.split('/').collect::<Vec<_>>();
    segments.pop();
    if segments
        .iter()
        .any(|segment| IGNORED_DIR_SEGMENTS.contains(&segment.to_lowercase().as_str()))
    {
        return Category::excluded(Bucket::Ignored);
    }

    let ext = file_extension(path);

    if size > MAX_TEXT_FILE_SIZE && ext != "ipynb" {
        return Category::excluded(Bucket::TooLarge);
    }

    if BINARY_EXTENSIONS.contains(&ext.as_str()) {
        return Category::excluded(Bucket::Binary);
    }

    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        return Category::text();
    }

    if ext.is_empty() {
        if TEXT_EXTENSIONS.contains(&basename.as_str())
            || TEXT_BASENAME_HINTS
                .iter()
                .any(|hint| basename.contains(hint))
        {
            return Category::text();
        }
    }

    // Unknown extensions are assumed renderable
    Category::text()
}
