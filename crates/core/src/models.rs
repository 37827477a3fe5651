//! Shared data models used by the bootstrap layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScreenError;

/// Top-level views of the application. The string form is the DOM element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    MainMenu,
    Lobby,
    LobbyConnect,
    LoadingScreen,
    GameScreen,
}

impl ScreenId {
    pub const ALL: [ScreenId; 5] = [
        ScreenId::MainMenu,
        ScreenId::Lobby,
        ScreenId::LobbyConnect,
        ScreenId::LoadingScreen,
        ScreenId::GameScreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::MainMenu => "main_menu",
            ScreenId::Lobby => "lobby",
            ScreenId::LobbyConnect => "lobby_connect",
            ScreenId::LoadingScreen => "loading_screen",
            ScreenId::GameScreen => "game_screen",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ScreenError::UnknownScreen { id: s.to_string() })
    }
}

/// What a load request expects to receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Image,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub path: String,
    pub kind: ContentKind,
}

impl LoadRequest {
    pub fn text(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: ContentKind::Text }
    }

    pub fn image(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: ContentKind::Image }
    }

    pub fn binary(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: ContentKind::Binary }
    }
}

/// Successful payload of a load, generic over the platform's image handle
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult<I> {
    Text(String),
    Image(I),
    Binary(Vec<u8>),
}

/// Raw HTTP response as seen by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What the loading indicator currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    pub percent: f64,
    pub message: String,
}

impl ProgressState {
    pub fn new(percent: f64, message: impl Into<String>) -> Self {
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        Self { percent, message: message.into() }
    }
}

/// Progress of a batch load, reported after each item settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchProgress {
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
}

impl BatchProgress {
    pub fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.settled() >= self.total
    }
}

/// Stage of the runtime bootstrap a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootStage {
    Fetch,
    Instantiate,
    Start,
}

impl fmt::Display for BootStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BootStage::Fetch => "fetching",
            BootStage::Instantiate => "instantiating",
            BootStage::Start => "starting",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootState {
    #[default]
    NotStarted,
    Fetching,
    Instantiating,
    Running,
    Failed(BootStage),
}

impl BootState {
    pub fn label(&self) -> &'static str {
        match self {
            BootState::NotStarted => "not_started",
            BootState::Fetching => "fetching",
            BootState::Instantiating => "instantiating",
            BootState::Running => "running",
            BootState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for BootState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootState::Failed(stage) => write!(f, "failed while {}", stage),
            other => f.write_str(other.label()),
        }
    }
}

/// The started application module. Lives as long as the page.
#[derive(Debug)]
pub struct RuntimeHandle<I> {
    instance: I,
}

impl<I> RuntimeHandle<I> {
    pub(crate) fn new(instance: I) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }
}

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
