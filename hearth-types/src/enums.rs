use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Classify a MIME type; anything under `image/` is an image, the rest video
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

/// Which projection of the draft the composer modal shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComposerTab {
    #[default]
    Edit,
    Preview,
}

impl ComposerTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComposerTab::Edit => "Edit",
            ComposerTab::Preview => "Preview",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ComposerTab::Edit => ComposerTab::Preview,
            ComposerTab::Preview => ComposerTab::Edit,
        }
    }
}

/// Input that receives keystrokes on the Edit tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerField {
    Title,
    #[default]
    Content,
    Tags,
    Media,
    Links,
}

impl ComposerField {
    pub fn next(&self) -> Self {
        match self {
            ComposerField::Title => ComposerField::Content,
            ComposerField::Content => ComposerField::Tags,
            ComposerField::Tags => ComposerField::Media,
            ComposerField::Media => ComposerField::Links,
            ComposerField::Links => ComposerField::Title,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ComposerField::Title => ComposerField::Links,
            ComposerField::Content => ComposerField::Title,
            ComposerField::Tags => ComposerField::Content,
            ComposerField::Media => ComposerField::Tags,
            ComposerField::Links => ComposerField::Media,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComposerField::Title => "Title",
            ComposerField::Content => "Content",
            ComposerField::Tags => "Tags",
            ComposerField::Media => "Media",
            ComposerField::Links => "Links",
        }
    }
}

/// Markdown template appended by the formatting toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    Bold,
    Italic,
    Heading,
    Quote,
    Code,
}

impl FormatStyle {
    pub fn template(&self) -> &'static str {
        match self {
            FormatStyle::Bold => "**text**",
            FormatStyle::Italic => "_text_",
            FormatStyle::Heading => "# text",
            FormatStyle::Quote => "> text",
            FormatStyle::Code => "```\ntext\n```",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Dark,
    Light,
    Solarized,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Default => "Default",
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
            ColorScheme::Solarized => "Solarized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Default" => Some(ColorScheme::Default),
            "Dark" => Some(ColorScheme::Dark),
            "Light" => Some(ColorScheme::Light),
            "Solarized" => Some(ColorScheme::Solarized),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Default => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Solarized,
            ColorScheme::Solarized => ColorScheme::Default,
        }
    }
}

/// Ordering applied to the feed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedTab {
    #[default]
    All,
    Latest,
    Popular,
    Topics,
}

impl FeedTab {
    pub const ALL: [FeedTab; 4] = [FeedTab::All, FeedTab::Latest, FeedTab::Popular, FeedTab::Topics];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedTab::All => "All",
            FeedTab::Latest => "Latest",
            FeedTab::Popular => "Popular",
            FeedTab::Topics => "Topics",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            FeedTab::All => 0,
            FeedTab::Latest => 1,
            FeedTab::Popular => 2,
            FeedTab::Topics => 3,
        }
    }
}

/// Sidebar navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavSection {
    #[default]
    Home,
    Feed,
    Groups,
    Events,
    Help,
}

impl NavSection {
    pub const ALL: [NavSection; 5] = [
        NavSection::Home,
        NavSection::Feed,
        NavSection::Groups,
        NavSection::Events,
        NavSection::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NavSection::Home => "Home",
            NavSection::Feed => "Feed",
            NavSection::Groups => "Groups",
            NavSection::Events => "Events",
            NavSection::Help => "Help",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            NavSection::Home => NavSection::Feed,
            NavSection::Feed => NavSection::Groups,
            NavSection::Groups => NavSection::Events,
            NavSection::Events => NavSection::Help,
            NavSection::Help => NavSection::Home,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            NavSection::Home => NavSection::Help,
            NavSection::Feed => NavSection::Home,
            NavSection::Groups => NavSection::Feed,
            NavSection::Events => NavSection::Groups,
            NavSection::Help => NavSection::Events,
        }
    }
}
