//! The closed set of action verbs the assistant understands
//!
//! Every verb the classifier may emit and the parser may match is declared
//! here. The registry is the single source of truth: classifier response
//! validation and command parsing both resolve against it, so no command
//! can be routed to a verb that is not registered.

use std::fmt;

/// Handler capability a verb is bound to
///
/// Automation capabilities are bound in the dispatcher's `HandlerSet`;
/// `Chat`, `Realtime`, and `Exit` are routed by the assistant turn loop
/// before dispatch. `GenerateImage` and `Reminder` are integrator seams
/// with no default binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AppOpen,
    AppClose,
    MediaPlay,
    GoogleSearch,
    YoutubeSearch,
    System,
    Content,
    File(FileOp),
    Chat,
    Realtime,
    GenerateImage,
    Reminder,
    Exit,
}

/// Operations of the file-command family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOp {
    Open,
    Edit,
    Read,
    Create,
    Delete,
    Copy,
    Move,
    Rename,
    List,
    Info,
}

impl FileOp {
    pub const ALL: [FileOp; 10] = [
        FileOp::Open,
        FileOp::Edit,
        FileOp::Read,
        FileOp::Create,
        FileOp::Delete,
        FileOp::Copy,
        FileOp::Move,
        FileOp::Rename,
        FileOp::List,
        FileOp::Info,
    ];
}

/// Whether a verb needs a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Commands without a target are skipped with a diagnostic
    Required,
    /// A missing target falls back to the sentinel default
    Optional { default: &'static str },
}

/// A recognized action verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Exit,
    General,
    Realtime,
    Open,
    Close,
    Play,
    GenerateImage,
    System,
    Content,
    GoogleSearch,
    YoutubeSearch,
    Reminder,
    OpenFile,
    EditFile,
    ReadFile,
    CreateFile,
    DeleteFile,
    CopyFile,
    MoveFile,
    RenameFile,
    ListFiles,
    FileInfo,
}

impl Verb {
    pub const ALL: [Verb; 22] = [
        Verb::Exit,
        Verb::General,
        Verb::Realtime,
        Verb::Open,
        Verb::Close,
        Verb::Play,
        Verb::GenerateImage,
        Verb::System,
        Verb::Content,
        Verb::GoogleSearch,
        Verb::YoutubeSearch,
        Verb::Reminder,
        Verb::OpenFile,
        Verb::EditFile,
        Verb::ReadFile,
        Verb::CreateFile,
        Verb::DeleteFile,
        Verb::CopyFile,
        Verb::MoveFile,
        Verb::RenameFile,
        Verb::ListFiles,
        Verb::FileInfo,
    ];

    /// Canonical textual form, as emitted by the classifier
    pub fn canonical(self) -> &'static str {
        match self {
            Verb::Exit => "exit",
            Verb::General => "general",
            Verb::Realtime => "realtime",
            Verb::Open => "open",
            Verb::Close => "close",
            Verb::Play => "play",
            Verb::GenerateImage => "generate image",
            Verb::System => "system",
            Verb::Content => "content",
            Verb::GoogleSearch => "google search",
            Verb::YoutubeSearch => "youtube search",
            Verb::Reminder => "reminder",
            Verb::OpenFile => "open file",
            Verb::EditFile => "edit file",
            Verb::ReadFile => "read file",
            Verb::CreateFile => "create file",
            Verb::DeleteFile => "delete file",
            Verb::CopyFile => "copy file",
            Verb::MoveFile => "move file",
            Verb::RenameFile => "rename file",
            Verb::ListFiles => "list files",
            Verb::FileInfo => "file info",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Verb::Exit => Arity::Optional { default: "" },
            Verb::ListFiles => Arity::Optional { default: "." },
            _ => Arity::Required,
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Verb::Exit => Capability::Exit,
            Verb::General => Capability::Chat,
            Verb::Realtime => Capability::Realtime,
            Verb::Open => Capability::AppOpen,
            Verb::Close => Capability::AppClose,
            Verb::Play => Capability::MediaPlay,
            Verb::GenerateImage => Capability::GenerateImage,
            Verb::System => Capability::System,
            Verb::Content => Capability::Content,
            Verb::GoogleSearch => Capability::GoogleSearch,
            Verb::YoutubeSearch => Capability::YoutubeSearch,
            Verb::Reminder => Capability::Reminder,
            Verb::OpenFile => Capability::File(FileOp::Open),
            Verb::EditFile => Capability::File(FileOp::Edit),
            Verb::ReadFile => Capability::File(FileOp::Read),
            Verb::CreateFile => Capability::File(FileOp::Create),
            Verb::DeleteFile => Capability::File(FileOp::Delete),
            Verb::CopyFile => Capability::File(FileOp::Copy),
            Verb::MoveFile => Capability::File(FileOp::Move),
            Verb::RenameFile => Capability::File(FileOp::Rename),
            Verb::ListFiles => Capability::File(FileOp::List),
            Verb::FileInfo => Capability::File(FileOp::Info),
        }
    }

    /// True for verbs whose canonical form spans multiple words
    pub fn is_multi_word(self) -> bool {
        self.canonical().contains(' ')
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Lookup over the closed verb set
///
/// Verbs are held longest-canonical-form first so that multi-word forms
/// ("google search", "open file") always win over a single-word form that
/// happens to share their prefix.
#[derive(Debug, Clone)]
pub struct VerbRegistry {
    ordered: Vec<Verb>,
}

impl VerbRegistry {
    pub fn new() -> Self {
        let mut ordered = Verb::ALL.to_vec();
        ordered.sort_by(|a, b| b.canonical().len().cmp(&a.canonical().len()));
        Self { ordered }
    }

    /// Resolve the most specific verb whose canonical form is a
    /// case-insensitive prefix of `token`
    ///
    /// Pure and total: returns `None` on no match, never errors.
    pub fn resolve(&self, token: &str) -> Option<Verb> {
        let token = token.trim();
        self.ordered.iter().copied().find(|verb| {
            let prefix = verb.canonical();
            token.len() >= prefix.len()
                && token.is_char_boundary(prefix.len())
                && token[..prefix.len()].eq_ignore_ascii_case(prefix)
        })
    }

    /// All registered verbs, longest canonical form first
    pub fn all_verbs(&self) -> &[Verb] {
        &self.ordered
    }
}

impl Default for VerbRegistry {
    fn default() -> Self {
        Self::new()
    }
}
